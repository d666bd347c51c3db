//! Parsing for the JSON and CSV dataset file formats.

use crate::{Error, transaction::RawTransaction};

/// The file formats a dataset may use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatasetFormat {
    /// A JSON array of record objects.
    Json,
    /// A CSV file with a camelCase header row.
    Csv,
}

impl DatasetFormat {
    /// Determine the format from a dataset file name, by extension.
    pub fn from_name(name: &str) -> Option<Self> {
        let extension = name
            .rsplit_once('.')
            .map(|(_, extension)| extension.to_ascii_lowercase());

        match extension.as_deref() {
            Some("json") => Some(Self::Json),
            Some("csv") => Some(Self::Csv),
            _ => None,
        }
    }
}

/// Parse dataset `content` in the given format.
pub fn parse_dataset(format: DatasetFormat, content: &str) -> Result<Vec<RawTransaction>, Error> {
    match format {
        DatasetFormat::Json => parse_json_records(content),
        DatasetFormat::Csv => parse_csv_records(content),
    }
}

/// Parse a JSON dataset: a top-level array of record objects.
///
/// Records that are `null` or otherwise fail to deserialize become empty
/// records rather than errors, so one bad entry cannot take down the whole
/// dataset.
///
/// # Errors
/// Returns [Error::DatasetParse] when `content` is not a JSON array.
pub fn parse_json_records(content: &str) -> Result<Vec<RawTransaction>, Error> {
    let values: Vec<serde_json::Value> =
        serde_json::from_str(content).map_err(|error| Error::DatasetParse(error.to_string()))?;

    Ok(values
        .into_iter()
        .map(|value| serde_json::from_value(value).unwrap_or_default())
        .collect())
}

/// Parse a CSV dataset with a camelCase header row.
///
/// Rows that fail typed deserialization are retried field by field so a
/// single malformed value, e.g. a word in the customerId column, drops that
/// field instead of failing the file.
///
/// # Errors
/// Returns [Error::DatasetParse] when the CSV structure itself is invalid.
pub fn parse_csv_records(content: &str) -> Result<Vec<RawTransaction>, Error> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(content.as_bytes());

    let headers = reader
        .headers()
        .map_err(|error| Error::DatasetParse(error.to_string()))?
        .clone();

    let mut records = Vec::new();
    for row in reader.records() {
        let row = row.map_err(|error| Error::DatasetParse(error.to_string()))?;
        let record = row
            .deserialize(Some(&headers))
            .unwrap_or_else(|_| lenient_record(&row, &headers));
        records.push(record);
    }

    Ok(records)
}

fn lenient_record(row: &csv::StringRecord, headers: &csv::StringRecord) -> RawTransaction {
    let field = |name: &str| {
        headers
            .iter()
            .position(|header| header == name)
            .and_then(|index| row.get(index))
            .filter(|value| !value.is_empty())
    };

    RawTransaction {
        transaction_id: field("transactionId").and_then(|value| value.parse().ok()),
        customer_id: field("customerId").and_then(|value| value.parse().ok()),
        customer_name: field("customerName").map(str::to_owned),
        purchase_date: field("purchaseDate").map(str::to_owned),
        product_purchased: field("productPurchased").map(str::to_owned),
        price: field("price").and_then(|value| value.parse().ok()),
    }
}
