//! Defines the app level error type and conversions to rendered HTML pages and alerts.
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::{alert::Alert, internal_server_error::InternalServerError, not_found::NotFound};

/// The errors that may occur in the application.
///
/// The reward pipeline itself (points, enrichment, aggregation) never
/// produces errors; these cover dataset access and the upload endpoint.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The requested dataset is not in the catalog.
    #[error("the dataset \"{0}\" could not be found")]
    DatasetNotFound(String),

    /// The dataset file exists but could not be read.
    #[error("could not read the dataset: {0}")]
    DatasetRead(String),

    /// The dataset file could not be parsed as JSON or CSV records.
    #[error("could not parse the dataset: {0}")]
    DatasetParse(String),

    /// The dataset file could not be written to the data directory.
    #[error("could not save the dataset: {0}")]
    DatasetWrite(String),

    /// The multipart form could not be parsed as a list of dataset files.
    #[error("could not parse multipart form: {0}")]
    MultipartError(String),

    /// The uploaded file is not a JSON or CSV dataset.
    #[error("\"{0}\" is not a JSON or CSV dataset")]
    UnsupportedDataset(String),
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::DatasetNotFound(name) => NotFound {
                description: &format!("The dataset \"{name}\" is not in the catalog."),
                fix: "Check the dataset name or upload it from the import page.",
            }
            .into_response(),
            Error::DatasetParse(details) => InternalServerError {
                description: "Could Not Parse Dataset",
                fix: &format!(
                    "The dataset file is not valid JSON or CSV. Fix the file and upload it \
                    again. Parser said: {details}"
                ),
            }
            .into_response(),
            // Any errors that are not handled above are not intended to be shown to the client.
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                InternalServerError::default().into_response()
            }
        }
    }
}

impl Error {
    /// Convert the error into an HTTP response with an HTML alert.
    pub fn into_alert_response(self) -> Response {
        let (status_code, alert) = match self {
            Error::DatasetNotFound(name) => (
                StatusCode::NOT_FOUND,
                Alert::error(
                    "Dataset not found",
                    format!("The dataset \"{name}\" is not in the catalog."),
                ),
            ),
            Error::DatasetParse(details) => (
                StatusCode::BAD_REQUEST,
                Alert::error(
                    "Could not parse the dataset",
                    format!("The file is not valid JSON or CSV: {details}"),
                ),
            ),
            Error::UnsupportedDataset(name) => (
                StatusCode::BAD_REQUEST,
                Alert::error(
                    "Unsupported file type",
                    format!("\"{name}\" is not a dataset. Upload a .json or .csv file."),
                ),
            ),
            Error::MultipartError(details) => (
                StatusCode::BAD_REQUEST,
                Alert::error("Could not read the upload", details),
            ),
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Alert::error(
                        "Sorry, something went wrong",
                        "Try again later or check the server logs.",
                    ),
                )
            }
        };

        (status_code, alert.into_html()).into_response()
    }
}

#[cfg(test)]
mod tests {
    use axum::{http::StatusCode, response::IntoResponse};

    use super::Error;

    #[test]
    fn missing_dataset_renders_not_found_page() {
        let response = Error::DatasetNotFound("nope.json".to_owned()).into_response();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn unsupported_dataset_renders_bad_request_alert() {
        let response = Error::UnsupportedDataset("notes.txt".to_owned()).into_alert_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn unexpected_errors_render_internal_server_error() {
        let response = Error::DatasetWrite("disk full".to_owned()).into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
