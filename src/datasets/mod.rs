//! Dataset access for the dashboard.
//!
//! A dataset is a JSON or CSV file of raw transaction records. The
//! [TransactionSource] trait hides where datasets come from so the reward
//! pipeline and the route handlers can be tested without a filesystem.

mod file;
mod parse;

pub use file::{FileSource, is_plain_file_name};
pub use parse::{DatasetFormat, parse_csv_records, parse_dataset, parse_json_records};

use crate::{Error, transaction::RawTransaction};

/// Read access to named transaction datasets.
pub trait TransactionSource: Send + Sync {
    /// List the catalog of dataset names in sorted order.
    fn dataset_names(&self) -> Vec<String>;

    /// Fetch the raw records of the named dataset.
    ///
    /// # Errors
    /// Returns [Error::DatasetNotFound] when `dataset` is not in the catalog,
    /// [Error::DatasetRead] when the dataset cannot be read, or
    /// [Error::DatasetParse] when the file itself is malformed. Individual
    /// bad records inside a well-formed file are not errors; they are
    /// filtered later by enrichment.
    fn fetch_records(&self, dataset: &str) -> Result<Vec<RawTransaction>, Error>;
}
