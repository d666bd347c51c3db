//! The file-backed dataset source.

use std::{fs, path::PathBuf};

use crate::{Error, transaction::RawTransaction};

use super::{
    TransactionSource,
    parse::{DatasetFormat, parse_dataset},
};

/// Reads datasets from a directory of `.json` and `.csv` files.
///
/// The directory is listed on every catalog call so datasets uploaded while
/// the server is running appear without a restart.
#[derive(Debug, Clone)]
pub struct FileSource {
    data_dir: PathBuf,
}

impl FileSource {
    /// Create a source that reads datasets from `data_dir`.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }
}

impl TransactionSource for FileSource {
    fn dataset_names(&self) -> Vec<String> {
        let entries = match fs::read_dir(&self.data_dir) {
            Ok(entries) => entries,
            Err(error) => {
                tracing::error!("could not read data directory {:?}: {error}", self.data_dir);
                return Vec::new();
            }
        };

        let mut names: Vec<String> = entries
            .filter_map(|entry| entry.ok())
            .filter_map(|entry| entry.file_name().into_string().ok())
            .filter(|name| DatasetFormat::from_name(name).is_some())
            .collect();

        names.sort();
        names
    }

    fn fetch_records(&self, dataset: &str) -> Result<Vec<RawTransaction>, Error> {
        if !is_plain_file_name(dataset) {
            return Err(Error::DatasetNotFound(dataset.to_owned()));
        }

        let format = DatasetFormat::from_name(dataset)
            .ok_or_else(|| Error::DatasetNotFound(dataset.to_owned()))?;

        let path = self.data_dir.join(dataset);
        let content = fs::read_to_string(&path).map_err(|error| {
            if error.kind() == std::io::ErrorKind::NotFound {
                Error::DatasetNotFound(dataset.to_owned())
            } else {
                tracing::error!("could not read dataset {path:?}: {error}");
                Error::DatasetRead(error.to_string())
            }
        })?;

        parse_dataset(format, &content)
    }
}

/// Whether `name` is a bare file name.
///
/// Dataset names appear in URLs and upload forms; rejecting separators and
/// leading dots keeps lookups from escaping the data directory.
pub fn is_plain_file_name(name: &str) -> bool {
    !name.is_empty()
        && !name.starts_with('.')
        && !name.contains(['/', '\\'])
        && !name.contains("..")
}
