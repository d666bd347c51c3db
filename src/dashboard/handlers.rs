//! Axum handlers for the dashboard page and its table fragments.

use std::sync::Arc;

use axum::{
    extract::{FromRef, Query, State},
    response::{IntoResponse, Redirect, Response},
};
use axum_htmx::HxRequest;
use maud::Markup;

use crate::{
    AppState,
    datasets::TransactionSource,
    endpoints,
    error::Error,
    rewards::{monthly_rewards, total_rewards},
    table::shape,
};

use super::{
    data::{filter_bar_transactions, load_transactions},
    query::{DashboardQuery, Tab},
    tables::{monthly_columns, tab_panel_content, total_columns, transaction_columns},
    view::{dashboard_no_data_view, dashboard_view},
};

/// The state needed by the dashboard routes.
#[derive(Clone)]
pub struct DashboardState {
    /// Where transaction datasets are read from.
    pub source: Arc<dyn TransactionSource>,
}

impl FromRef<AppState> for DashboardState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            source: state.source.clone(),
        }
    }
}

/// What to do with the query parameters of a page request.
#[derive(Debug, PartialEq)]
enum QueryDecision {
    /// The parameters were not canonical, send the client to this URL.
    Redirect(String),
    /// The parameters were already canonical.
    Normalized(DashboardQuery),
}

/// Decide whether the requested URL is the canonical one for its state.
///
/// Every dashboard state has exactly one URL spelling, which keeps bookmarks
/// and shared links stable. Anything else redirects.
fn normalize_query(params: DashboardQuery, default_dataset: &str) -> QueryDecision {
    let canonical = params.clone().canonicalized(default_dataset);

    if canonical == params {
        QueryDecision::Normalized(canonical)
    } else {
        QueryDecision::Redirect(canonical.to_url(endpoints::DASHBOARD_VIEW))
    }
}

/// Serve the dashboard page.
pub async fn get_dashboard_page(
    State(state): State<DashboardState>,
    Query(params): Query<DashboardQuery>,
) -> Result<Response, Error> {
    let datasets = state.source.dataset_names();
    let Some(default_dataset) = datasets.first() else {
        return Ok(dashboard_no_data_view().into_response());
    };

    let query = match normalize_query(params, default_dataset) {
        QueryDecision::Redirect(url) => return Ok(Redirect::to(&url).into_response()),
        QueryDecision::Normalized(query) => query,
    };

    let panel = render_tab_panel(state.source.as_ref(), &query)?;

    Ok(dashboard_view(&datasets, &query, panel).into_response())
}

/// Serve the transactions table fragment.
pub async fn get_transactions_partial(
    State(state): State<DashboardState>,
    HxRequest(is_htmx): HxRequest,
    Query(params): Query<DashboardQuery>,
) -> Response {
    tab_partial(&state, params, Tab::Transactions, is_htmx)
}

/// Serve the monthly rewards table fragment.
pub async fn get_monthly_rewards_partial(
    State(state): State<DashboardState>,
    HxRequest(is_htmx): HxRequest,
    Query(params): Query<DashboardQuery>,
) -> Response {
    tab_partial(&state, params, Tab::MonthlyRewards, is_htmx)
}

/// Serve the total rewards table fragment.
pub async fn get_total_rewards_partial(
    State(state): State<DashboardState>,
    HxRequest(is_htmx): HxRequest,
    Query(params): Query<DashboardQuery>,
) -> Response {
    tab_partial(&state, params, Tab::TotalRewards, is_htmx)
}

/// Render one tab's fragment for requests made by the dashboard's inputs.
///
/// The route decides the tab, overriding whatever tab the parameters carry.
/// Fragments render from silently canonicalized parameters instead of
/// redirecting: only `#tab-panel` is changing, not the URL bar. Errors render
/// as alert fragments so htmx can swap them into the panel. A request without
/// the HX-Request header is a pasted or bookmarked fragment URL and gets the
/// full page instead.
fn tab_partial(
    state: &DashboardState,
    mut params: DashboardQuery,
    tab: Tab,
    is_htmx: bool,
) -> Response {
    params.tab = Some(tab);

    let default_dataset = state
        .source
        .dataset_names()
        .into_iter()
        .next()
        .unwrap_or_default();
    let query = params.canonicalized(&default_dataset);

    if !is_htmx {
        return Redirect::to(&query.to_url(endpoints::DASHBOARD_VIEW)).into_response();
    }

    match render_tab_panel(state.source.as_ref(), &query) {
        Ok(panel) => panel.into_response(),
        Err(error) => error.into_alert_response(),
    }
}

/// Load the query's dataset and render the active tab's table.
fn render_tab_panel(
    source: &dyn TransactionSource,
    query: &DashboardQuery,
) -> Result<Markup, Error> {
    let transactions = load_transactions(source, query.dataset_name())?;

    let filters = query.active_filters();
    let sort = query.sort_for_table();
    let page = query.current_page();
    let per_page = query.rows_per_page();

    let panel = match query.active_tab() {
        Tab::Transactions => {
            let rows = filter_bar_transactions(
                &transactions,
                query.name_search(),
                query.from_date(),
                query.to_date(),
            );
            let columns = transaction_columns();
            let table = shape(&rows, &columns, &filters, sort, page, per_page);
            tab_panel_content(&columns, &table, query)
        }
        Tab::MonthlyRewards => {
            let rows = monthly_rewards(&transactions);
            let columns = monthly_columns();
            let table = shape(&rows, &columns, &filters, sort, page, per_page);
            tab_panel_content(&columns, &table, query)
        }
        Tab::TotalRewards => {
            let rows = total_rewards(&monthly_rewards(&transactions));
            let columns = total_columns();
            let table = shape(&rows, &columns, &filters, sort, page, per_page);
            tab_panel_content(&columns, &table, query)
        }
    };

    Ok(panel)
}
