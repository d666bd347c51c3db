//! Defines the view and route handler for the 404 page.
use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};

use crate::html::error_view;

pub struct NotFound<'a> {
    pub description: &'a str,
    pub fix: &'a str,
}

impl Default for NotFound<'_> {
    fn default() -> Self {
        Self {
            description: "The page you are looking for does not exist.",
            fix: "Check the address for typos or head back to the dashboard.",
        }
    }
}

impl NotFound<'_> {
    pub fn into_html(self) -> Html<String> {
        Html(error_view("Not Found", "404", self.description, self.fix).into_string())
    }
}

impl IntoResponse for NotFound<'_> {
    fn into_response(self) -> Response {
        (StatusCode::NOT_FOUND, self.into_html()).into_response()
    }
}

pub async fn get_404_not_found() -> Response {
    NotFound::default().into_response()
}
