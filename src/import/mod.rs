//! Dataset import module
//!
//! Provides the upload page and the endpoint that saves JSON and CSV dataset
//! files into the data directory, where they become selectable on the
//! dashboard.

mod import_page;
mod upload;

pub use import_page::get_import_page;
pub use upload::{ImportState, upload_datasets};
