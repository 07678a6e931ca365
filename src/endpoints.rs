//! The API endpoints URIs.

/// The root route which redirects to the dashboard.
pub const ROOT: &str = "/";
/// The landing page which summarises recorded transactions.
pub const DASHBOARD_VIEW: &str = "/dashboard";
/// The page with the forms for creating a category and a transaction.
pub const NEW_TRANSACTION_VIEW: &str = "/transactions/new";
/// The page to display when an internal server error occurs.
pub const INTERNAL_ERROR_VIEW: &str = "/error";
/// The route for static files.
pub const STATIC: &str = "/static";

/// The route to create a category.
pub const CATEGORIES_API: &str = "/api/categories";
/// The route for re-validating the category form after a field loses focus.
pub const VALIDATE_CATEGORY_FORM: &str = "/api/categories/validate";
/// The route that renders the options for the category selector.
pub const CATEGORY_OPTIONS: &str = "/api/categories/options";
/// The route to create a transaction.
pub const TRANSACTIONS_API: &str = "/api/transactions";
/// The route for re-validating the transaction form after a field loses focus.
pub const VALIDATE_TRANSACTION_FORM: &str = "/api/transactions/validate";
