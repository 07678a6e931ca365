use std::sync::Arc;

use axum::{
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};

use crate::{
    AppState,
    category::{Category, CategoryForm, CategoryListProvider},
    endpoints,
    html::{FORM_CONTAINER_STYLE, base, dollar_input_styles},
    navigation::NavBar,
    transaction::TransactionForm,
};

/// The state needed for the new transaction page.
#[derive(Debug, Clone)]
pub struct NewTransactionPageState {
    /// Supplies the options for the category selector.
    pub category_list: Arc<CategoryListProvider>,
}

impl FromRef<AppState> for NewTransactionPageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            category_list: state.category_list.clone(),
        }
    }
}

fn new_transaction_view(categories: &[Category]) -> Markup {
    let nav_bar = NavBar::new(endpoints::NEW_TRANSACTION_VIEW).into_html();

    let content = html! {
        (nav_bar)

        div class=(FORM_CONTAINER_STYLE)
        {
            div class="w-full my-10 space-y-10 p-6 rounded-lg shadow-lg bg-white dark:bg-gray-800"
            {
                (CategoryForm::empty().into_html())
                (TransactionForm::empty().into_html(categories))
            }
        }
    };

    base("New Transaction", &[dollar_input_styles()], &content)
}

/// Renders the page with the forms for adding a category and a transaction.
///
/// If the categories cannot be loaded the page is still shown, the category
/// selector then only offers its placeholder.
pub async fn get_new_transaction_page(State(state): State<NewTransactionPageState>) -> Response {
    let categories = state.category_list.categories_or_empty().await;

    new_transaction_view(&categories).into_response()
}
