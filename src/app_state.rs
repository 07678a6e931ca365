//! Implements a struct that holds the state of the REST server.

use std::sync::Arc;

use crate::{api::FinanceApi, category::CategoryListProvider, submission::InFlightSubmissions};

/// The state of the REST server.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The finance API that stores categories and transactions.
    pub finance_api: Arc<dyn FinanceApi>,

    /// The cached category list shared by every page that shows the category
    /// selector.
    pub category_list: Arc<CategoryListProvider>,

    /// The rendered forms whose submission is waiting on the finance API.
    pub submissions: Arc<InFlightSubmissions>,
}

impl AppState {
    /// Create a new [AppState] backed by `finance_api`.
    ///
    /// The category list starts empty and is fetched on first use.
    pub fn new(finance_api: Arc<dyn FinanceApi>) -> Self {
        Self {
            category_list: Arc::new(CategoryListProvider::new(finance_api.clone())),
            finance_api,
            submissions: Arc::new(InFlightSubmissions::new()),
        }
    }
}
