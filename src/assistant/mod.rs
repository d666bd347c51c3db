//! The AI insights assistant.
//!
//! Answers natural language questions about the dataset the dashboard is
//! showing. The panel under the reward tables posts questions to
//! [crate::endpoints::ASSISTANT_API] along with the filter bar values, so the
//! model sees exactly the transactions the user is looking at.

mod ask_endpoint;
mod openrouter;

pub use ask_endpoint::{AssistantState, ask_assistant};
pub use openrouter::{API_KEY_VAR, OpenRouterAssistant};

use async_trait::async_trait;
use maud::{Markup, html};

use crate::{
    endpoints,
    html::{BUTTON_PRIMARY_STYLE, FORM_TEXT_INPUT_STYLE, loading_spinner},
    transaction::Transaction,
};

/// Answers questions about transaction data.
///
/// Implementations never fail: network and configuration problems are
/// reported in the answer text so the panel always has something to show.
#[async_trait]
pub trait Assistant: Send + Sync {
    /// Answer `question` using the transaction `context`.
    async fn ask(&self, question: &str, context: &str) -> String;
}

/// The assistant used when no API key is configured.
///
/// Keeps the rest of the dashboard usable and tells the user how to turn the
/// assistant on.
pub struct NotConfiguredAssistant;

#[async_trait]
impl Assistant for NotConfiguredAssistant {
    async fn ask(&self, _question: &str, _context: &str) -> String {
        format!("The AI assistant is not configured. Set {API_KEY_VAR} and restart the server.")
    }
}

/// Describe transactions as the plain sentences the model reads.
///
/// Transactions without a parsed purchase date are still described so their
/// points show up in answers about totals.
pub(crate) fn build_context(transactions: &[Transaction]) -> String {
    transactions
        .iter()
        .map(|transaction| {
            let date = match transaction.purchase_date {
                Some(date) => date.to_string(),
                None => "an unknown date".to_owned(),
            };

            format!(
                "\"{} bought {} for ${} on {} with {} points.\"",
                transaction.customer_name,
                transaction.product_purchased,
                transaction.price,
                date,
                transaction.reward_points,
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Combine the question and the transaction context into the prompt sent to
/// the model.
pub(crate) fn build_prompt(question: &str, context: &str) -> String {
    format!(
        "You are an AI assistant analyzing reward program data. \
        Below are the transactions currently shown on the dashboard:\n\
        {context}\n\n\
        User question: {question}\n\n\
        Answer clearly in at most 30 words using only the transactions above. \
        If the answer is not directly available, say \"Not available in data.\""
    )
}

/// Render the assistant panel shown under the dashboard tables.
///
/// The form includes the filter bar inputs so the question is answered
/// against the filtered view, and the hidden dataset input keeps the answer
/// tied to the dataset on screen.
pub fn assistant_panel(dataset: &str) -> Markup {
    let spinner = loading_spinner();

    html! {
        section class="mt-8"
        {
            h2 class="text-lg font-bold mb-3" { "AI Insights Assistant" }

            form
                hx-post=(endpoints::ASSISTANT_API)
                hx-target="#assistant-answer"
                hx-target-error="#assistant-answer"
                hx-swap="innerHTML"
                hx-include="#filter-bar"
                hx-indicator="#assistant-indicator"
                hx-disabled-elt="#assistant-question, #assistant-ask-button"
            {
                input type="hidden" name="dataset" value=(dataset);

                div class="flex gap-2"
                {
                    input
                        id="assistant-question"
                        type="text"
                        name="question"
                        placeholder="Ask AI (e.g. 'Who earned the most points?')"
                        required
                        class=(FORM_TEXT_INPUT_STYLE);

                    button
                        type="submit"
                        id="assistant-ask-button"
                        class=(BUTTON_PRIMARY_STYLE)
                    {
                        span class="inline htmx-indicator" id="assistant-indicator" { (spinner) }
                        " Ask"
                    }
                }
            }

            div id="assistant-answer" class="mt-4" {}
        }
    }
}
