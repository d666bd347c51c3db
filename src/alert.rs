//! Success and error alerts rendered as HTML fragments for htmx responses.

use maud::{Markup, html};

const SUCCESS_STYLE: &str = "p-4 mb-4 text-sm text-green-800 rounded-lg bg-green-50 \
    dark:bg-gray-800 dark:text-green-400";

const ERROR_STYLE: &str = "p-4 mb-4 text-sm text-red-800 rounded-lg bg-red-50 \
    dark:bg-gray-800 dark:text-red-400";

/// An alert message shown to the user after an action.
#[derive(Debug, Clone, PartialEq)]
pub enum Alert {
    /// Confirms an action worked.
    Success {
        /// The headline, e.g. "Import completed successfully!".
        message: String,
        /// Supporting detail shown under the headline.
        details: String,
    },
    /// Explains why an action failed.
    Error {
        /// The headline, e.g. "Could not parse the dataset".
        message: String,
        /// Supporting detail shown under the headline.
        details: String,
    },
}

impl Alert {
    /// Create a success alert.
    pub fn success(message: impl Into<String>, details: impl Into<String>) -> Self {
        Alert::Success {
            message: message.into(),
            details: details.into(),
        }
    }

    /// Create an error alert.
    pub fn error(message: impl Into<String>, details: impl Into<String>) -> Self {
        Alert::Error {
            message: message.into(),
            details: details.into(),
        }
    }

    /// Render the alert as an HTML fragment.
    pub fn into_html(self) -> Markup {
        let (style, message, details) = match self {
            Alert::Success { message, details } => (SUCCESS_STYLE, message, details),
            Alert::Error { message, details } => (ERROR_STYLE, message, details),
        };

        html! {
            div class=(style) role="alert" {
                p class="font-medium" { (message) }

                @if !details.is_empty() {
                    p class="mt-1" { (details) }
                }
            }
        }
    }
}
