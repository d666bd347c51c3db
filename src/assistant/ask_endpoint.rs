//! The endpoint that answers assistant questions.

use std::sync::Arc;

use axum::{
    Form,
    extract::{FromRef, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use serde::Deserialize;

use crate::{
    AppState,
    alert::Alert,
    dashboard::{filter_bar_transactions, load_transactions},
    datasets::TransactionSource,
    transaction::parse_purchase_date,
};

use super::{Assistant, build_context};

/// The state needed by the assistant endpoint.
#[derive(Clone)]
pub struct AssistantState {
    /// Where transaction datasets are read from.
    pub source: Arc<dyn TransactionSource>,
    /// The assistant that answers the questions.
    pub assistant: Arc<dyn Assistant>,
}

impl FromRef<AppState> for AssistantState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            source: state.source.clone(),
            assistant: state.assistant.clone(),
        }
    }
}

/// The form fields sent by the assistant panel.
///
/// `name`, `from`, and `to` are the filter bar inputs, included so the answer
/// describes the same rows the transactions table is showing.
#[derive(Debug, Deserialize)]
pub struct AssistantQuestion {
    /// The user's question.
    pub question: String,
    /// The dataset the dashboard is showing.
    pub dataset: String,
    /// The filter bar's customer name search.
    pub name: Option<String>,
    /// The filter bar's start date.
    pub from: Option<String>,
    /// The filter bar's end date.
    pub to: Option<String>,
}

/// Answer a question about the dataset the dashboard is showing.
///
/// Responds with an answer box fragment for the panel's `#assistant-answer`
/// element. Dataset problems respond with an alert fragment and an error
/// status so htmx swaps them into the same element.
pub async fn ask_assistant(
    State(state): State<AssistantState>,
    Form(form): Form<AssistantQuestion>,
) -> Response {
    let question = form.question.trim();
    if question.is_empty() {
        return (
            StatusCode::UNPROCESSABLE_ENTITY,
            Alert::error("Ask a question first", "Type a question and press Ask.").into_html(),
        )
            .into_response();
    }

    let transactions = match load_transactions(state.source.as_ref(), &form.dataset) {
        Ok(transactions) => transactions,
        Err(error) => return error.into_alert_response(),
    };

    let name = form
        .name
        .as_deref()
        .map(str::trim)
        .filter(|name| !name.is_empty());
    let from = form.from.as_deref().and_then(parse_purchase_date);
    let to = form.to.as_deref().and_then(parse_purchase_date);

    let visible = filter_bar_transactions(&transactions, name, from, to);
    let context = build_context(&visible);
    let answer = state.assistant.ask(question, &context).await;

    answer_view(&answer).into_response()
}

/// Render the assistant's answer box.
fn answer_view(answer: &str) -> Markup {
    html! {
        div
            role="alert"
            class="p-4 text-sm rounded-lg bg-blue-50 text-blue-800 \
                dark:bg-gray-800 dark:text-blue-400"
        {
            strong { "AI says: " }
            (answer)
        }
    }
}

#[cfg(test)]
mod ask_endpoint_tests {
    use std::sync::Arc;

    use axum::{Form, extract::State, http::StatusCode};
    use scraper::Selector;

    use crate::test_utils::{InMemorySource, StubAssistant, parse_html_fragment, raw_transaction};

    use super::{AssistantQuestion, AssistantState, ask_assistant};

    fn question_form(question: &str) -> AssistantQuestion {
        AssistantQuestion {
            question: question.to_owned(),
            dataset: "retail.json".to_owned(),
            name: None,
            from: None,
            to: None,
        }
    }

    fn demo_state(assistant: Arc<StubAssistant>) -> AssistantState {
        let records = vec![
            raw_transaction(1, 1, "Amit Sharma", "2024-01-10", "Laptop", 120.0),
            raw_transaction(2, 2, "Neha Verma", "2024-02-05", "Monitor", 200.0),
        ];

        AssistantState {
            source: Arc::new(InMemorySource::with_dataset("retail.json", records)),
            assistant,
        }
    }

    #[tokio::test]
    async fn answers_render_in_an_answer_box() {
        let assistant = Arc::new(StubAssistant::new("Amit Sharma earned the most."));
        let state = demo_state(assistant.clone());

        let response = ask_assistant(
            State(state),
            Form(question_form("Who earned the most points?")),
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);

        let html = parse_html_fragment(response).await;
        let answer = html
            .select(&Selector::parse("div[role='alert']").unwrap())
            .next()
            .expect("no answer box found");
        let text = answer.text().collect::<String>();

        assert!(text.contains("AI says:"), "got answer box text {text:?}");
        assert!(text.contains("Amit Sharma earned the most."));
    }

    #[tokio::test]
    async fn questions_are_answered_against_the_filtered_view() {
        let assistant = Arc::new(StubAssistant::new("Only Amit is visible."));
        let state = demo_state(assistant.clone());

        let mut form = question_form("Who is shown?");
        form.name = Some("amit".to_owned());

        ask_assistant(State(state), Form(form)).await;

        let asked = assistant.asked();
        assert_eq!(asked.len(), 1);

        let (question, context) = &asked[0];
        assert_eq!(question, "Who is shown?");
        assert!(context.contains("Amit Sharma"), "got context {context:?}");
        assert!(
            !context.contains("Neha Verma"),
            "filtered out rows should not reach the model: {context:?}"
        );
    }

    #[tokio::test]
    async fn date_bounds_narrow_the_context() {
        let assistant = Arc::new(StubAssistant::new("February only."));
        let state = demo_state(assistant.clone());

        let mut form = question_form("What was bought?");
        form.from = Some("2024-02-01".to_owned());

        ask_assistant(State(state), Form(form)).await;

        let asked = assistant.asked();
        let (_, context) = &asked[0];
        assert!(context.contains("Monitor"));
        assert!(!context.contains("Laptop"));
    }

    #[tokio::test]
    async fn blank_questions_are_rejected() {
        let assistant = Arc::new(StubAssistant::new("unused"));
        let state = demo_state(assistant.clone());

        let response = ask_assistant(State(state), Form(question_form("   "))).await;

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert!(assistant.asked().is_empty(), "blank questions should not reach the model");
    }

    #[tokio::test]
    async fn unknown_datasets_render_an_alert() {
        let assistant = Arc::new(StubAssistant::new("unused"));
        let state = demo_state(assistant);

        let mut form = question_form("Who earned the most points?");
        form.dataset = "nope.json".to_owned();

        let response = ask_assistant(State(state), Form(form)).await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
