//! The API endpoints URIs.

/// The root route which redirects to the dashboard.
pub const ROOT: &str = "/";
/// The dashboard page with the reward tables.
pub const DASHBOARD_VIEW: &str = "/dashboard";
/// The fragment route for the transactions table.
pub const TRANSACTIONS_PARTIAL: &str = "/dashboard/transactions";
/// The fragment route for the monthly rewards table.
pub const MONTHLY_REWARDS_PARTIAL: &str = "/dashboard/monthly-rewards";
/// The fragment route for the total rewards table.
pub const TOTAL_REWARDS_PARTIAL: &str = "/dashboard/total-rewards";
/// The page for uploading dataset files.
pub const IMPORT_VIEW: &str = "/import";
/// The page to display when an internal server error occurs.
pub const INTERNAL_ERROR_VIEW: &str = "/error";
/// The route for static files.
pub const STATIC: &str = "/static";

/// The route to request a cup of coffee (experimental).
pub const COFFEE: &str = "/api/coffee";
/// The route to upload dataset files.
pub const DATASETS_API: &str = "/api/datasets";
/// The route that answers questions about the loaded dataset.
pub const ASSISTANT_API: &str = "/api/assistant";
