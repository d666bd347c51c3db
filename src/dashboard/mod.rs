//! Dashboard module
//!
//! Provides the reward points overview page: an enriched transactions table,
//! monthly and total reward rollups, a shared filter bar, and URL-driven
//! sorting, filtering, and pagination.

mod data;
mod handlers;
mod query;
mod tables;
mod view;

pub use handlers::{
    DashboardState, get_dashboard_page, get_monthly_rewards_partial, get_total_rewards_partial,
    get_transactions_partial,
};
pub use query::{DashboardQuery, Tab};

pub(crate) use data::{filter_bar_transactions, load_transactions};
