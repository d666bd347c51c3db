//! Implements a struct that holds the state of the server.

use std::{path::PathBuf, sync::Arc};

use crate::{
    assistant::Assistant,
    datasets::{FileSource, TransactionSource},
};

/// The state of the server.
#[derive(Clone)]
pub struct AppState {
    /// The directory dataset files live in, used by the import endpoint.
    pub data_dir: PathBuf,

    /// Where transaction datasets are read from.
    pub source: Arc<dyn TransactionSource>,

    /// Answers questions about the dataset the dashboard is showing.
    pub assistant: Arc<dyn Assistant>,
}

impl AppState {
    /// Create an [AppState] that reads datasets from `data_dir`.
    pub fn new(data_dir: impl Into<PathBuf>, assistant: Arc<dyn Assistant>) -> Self {
        let data_dir = data_dir.into();

        Self {
            source: Arc::new(FileSource::new(data_dir.clone())),
            data_dir,
            assistant,
        }
    }
}
