//! The endpoint that saves uploaded dataset files.

use std::{fs, path::PathBuf};

use axum::{
    extract::{FromRef, Multipart, State, multipart::Field},
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::{
    AppState, Error,
    alert::Alert,
    datasets::{DatasetFormat, is_plain_file_name, parse_dataset},
};

/// The state needed for uploading datasets.
#[derive(Debug, Clone)]
pub struct ImportState {
    /// The directory dataset files are saved to.
    pub data_dir: PathBuf,
}

impl FromRef<AppState> for ImportState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            data_dir: state.data_dir.clone(),
        }
    }
}

/// Route handler for uploading dataset files.
///
/// Each uploaded file is validated as a parseable JSON or CSV dataset before
/// it is written to the data directory under its own file name. A file that
/// fails validation fails the whole upload, and nothing after it is saved.
pub async fn upload_datasets(
    State(state): State<ImportState>,
    mut multipart: Multipart,
) -> Result<Response, Response> {
    let mut saved_files = 0;
    let mut saved_records = 0;

    while let Some(field) = multipart.next_field().await.map_err(|error| {
        tracing::error!("could not read multipart field: {error}");
        Error::MultipartError(error.to_string()).into_alert_response()
    })? {
        let (file_name, format, content) = parse_dataset_field(field)
            .await
            .map_err(|error| error.into_alert_response())?;

        let records =
            parse_dataset(format, &content).map_err(|error| error.into_alert_response())?;

        fs::write(state.data_dir.join(&file_name), &content).map_err(|error| {
            tracing::error!("could not save dataset {file_name}: {error}");
            Error::DatasetWrite(error.to_string()).into_alert_response()
        })?;

        tracing::info!("saved dataset {file_name} with {} records", records.len());
        saved_files += 1;
        saved_records += records.len();
    }

    if saved_files == 0 {
        return Err((
            StatusCode::BAD_REQUEST,
            Alert::error("Nothing to import", "Choose at least one JSON or CSV file.").into_html(),
        )
            .into_response());
    }

    let alert = Alert::success(
        "Import completed successfully!",
        format!("Saved {saved_files} dataset file(s) holding {saved_records} records."),
    );

    Ok((StatusCode::CREATED, alert.into_html()).into_response())
}

/// Pull the validated file name, format, and content out of one form field.
async fn parse_dataset_field(field: Field<'_>) -> Result<(String, DatasetFormat, String), Error> {
    let file_name = field.file_name().map(ToOwned::to_owned).ok_or_else(|| {
        Error::MultipartError("Could not get file name from multipart form field".to_owned())
    })?;

    if !is_plain_file_name(&file_name) {
        return Err(Error::UnsupportedDataset(file_name));
    }

    let Some(format) = DatasetFormat::from_name(&file_name) else {
        return Err(Error::UnsupportedDataset(file_name));
    };

    let content = field.text().await.map_err(|error| {
        tracing::error!("could not read data from multipart form field: {error}");
        Error::MultipartError("Could not read data from multipart form field.".to_owned())
    })?;

    Ok((file_name, format, content))
}

#[cfg(test)]
mod upload_datasets_tests {
    use std::{fs, path::PathBuf};

    use axum::{
        body::Body,
        extract::{FromRequest, Multipart, State},
        http::{Request, StatusCode},
        response::Response,
    };
    use uuid::Uuid;

    use crate::{
        datasets::{FileSource, TransactionSource},
        endpoints,
        test_utils::{assert_valid_html, parse_html_fragment},
    };

    use super::{ImportState, upload_datasets};

    const RETAIL_JSON: &str = r#"[
        {"transactionId": 1, "customerId": 101, "customerName": "Amit Sharma",
         "purchaseDate": "2024-01-15", "productPurchased": "Laptop", "price": 120.5}
    ]"#;

    const RETAIL_CSV: &str = "\
transactionId,customerId,customerName,purchaseDate,productPurchased,price
2,102,Neha Gupta,2024-01-20,Headphones,75";

    fn temp_data_dir() -> PathBuf {
        let dir = std::env::temp_dir().join(format!("rewardeur-import-{}", Uuid::new_v4()));
        fs::create_dir_all(&dir).expect("could not create test data directory");
        dir
    }

    async fn must_make_multipart(files: &[(&str, &str)]) -> Multipart {
        let boundary = "MY_BOUNDARY123456789";
        let boundary_start = format!("--{boundary}");
        let boundary_end = format!("--{boundary}--");

        let mut lines: Vec<String> = Vec::new();

        for (file_name, content) in files {
            lines.push(boundary_start.clone());
            lines.push(format!(
                "Content-Disposition: form-data; name=\"files\"; filename=\"{file_name}\";"
            ));
            lines.push("Content-Type: application/octet-stream".to_owned());
            lines.push(String::new());
            lines.push((*content).to_owned());
        }

        lines.push(boundary_end);

        let data = lines.join("\r\n").into_bytes();

        let request = Request::builder()
            .method("POST")
            .uri(endpoints::DATASETS_API)
            .header(
                "Content-Type",
                format!("multipart/form-data; boundary={boundary}"),
            )
            .body(Body::from(data))
            .unwrap();

        Multipart::from_request(request, &{}).await.unwrap()
    }

    async fn assert_alert_message(response: Response, expected_message: &str) {
        let html = parse_html_fragment(response).await;
        assert_valid_html(&html);

        let alert = html
            .select(&scraper::Selector::parse("div[role='alert']").unwrap())
            .next()
            .expect("No alert found");
        let message = alert
            .select(&scraper::Selector::parse("p").unwrap())
            .next()
            .expect("No alert message found")
            .text()
            .collect::<String>();

        assert_eq!(message.trim(), expected_message);
    }

    #[tokio::test]
    async fn uploads_json_and_csv_datasets() {
        let data_dir = temp_data_dir();
        let state = ImportState {
            data_dir: data_dir.clone(),
        };

        let response = upload_datasets(
            State(state),
            must_make_multipart(&[("retail.json", RETAIL_JSON), ("retail.csv", RETAIL_CSV)]).await,
        )
        .await
        .unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);

        let source = FileSource::new(&data_dir);
        assert_eq!(source.dataset_names(), vec!["retail.csv", "retail.json"]);
        assert_eq!(source.fetch_records("retail.json").unwrap().len(), 1);
        assert_eq!(source.fetch_records("retail.csv").unwrap().len(), 1);

        assert_alert_message(response, "Import completed successfully!").await;
    }

    #[tokio::test]
    async fn rejects_files_that_are_not_datasets() {
        let data_dir = temp_data_dir();
        let state = ImportState {
            data_dir: data_dir.clone(),
        };

        let response = upload_datasets(
            State(state),
            must_make_multipart(&[("notes.txt", "not a dataset")]).await,
        )
        .await
        .expect_err("a text file should not import");

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(
            FileSource::new(&data_dir).dataset_names().is_empty(),
            "rejected files must not be saved"
        );
    }

    #[tokio::test]
    async fn rejects_datasets_that_do_not_parse() {
        let data_dir = temp_data_dir();
        let state = ImportState {
            data_dir: data_dir.clone(),
        };

        let response = upload_datasets(
            State(state),
            must_make_multipart(&[("broken.json", "{ not json")]).await,
        )
        .await
        .expect_err("malformed JSON should not import");

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(FileSource::new(&data_dir).dataset_names().is_empty());
    }

    #[tokio::test]
    async fn rejects_path_traversal_file_names() {
        let data_dir = temp_data_dir();
        let state = ImportState {
            data_dir: data_dir.clone(),
        };

        let response = upload_datasets(
            State(state),
            must_make_multipart(&[("../escape.json", "[]")]).await,
        )
        .await
        .expect_err("path traversal names should be rejected");

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(
            !data_dir.parent().unwrap().join("escape.json").exists(),
            "nothing may be written outside the data directory"
        );
    }

    #[tokio::test]
    async fn rejects_empty_uploads() {
        let state = ImportState {
            data_dir: temp_data_dir(),
        };

        let response = upload_datasets(State(state), must_make_multipart(&[]).await)
            .await
            .expect_err("an upload without files should be rejected");

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
