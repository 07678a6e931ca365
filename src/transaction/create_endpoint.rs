//! Defines the endpoints for submitting and validating the transaction form.
use std::sync::Arc;

use axum::{
    extract::{FromRef, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
// axum_extra's Form collects the repeated `touched` keys into a Vec.
use axum_extra::extract::Form;
use axum_htmx::HxRedirect;

use crate::{
    AppState,
    api::FinanceApi,
    category::{CategoryListProvider, CategoryOptionsState},
    endpoints,
    form::ControlledForm,
    submission::InFlightSubmissions,
    transaction::form::{
        TRANSACTION_NOTICES, TransactionForm, TransactionFormData, validate_transaction,
    },
};

/// The state needed to create a transaction.
#[derive(Debug, Clone)]
pub struct CreateTransactionState {
    pub finance_api: Arc<dyn FinanceApi>,
    /// Supplies the category selector when the form is re-rendered.
    pub category_list: Arc<CategoryListProvider>,
    pub submissions: Arc<InFlightSubmissions>,
}

impl FromRef<AppState> for CreateTransactionState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            finance_api: state.finance_api.clone(),
            category_list: state.category_list.clone(),
            submissions: state.submissions.clone(),
        }
    }
}

/// A route handler for the transaction form, redirects to the dashboard on
/// success.
///
/// Otherwise the form is re-rendered with its errors or with an error notice.
pub async fn create_transaction_endpoint(
    State(state): State<CreateTransactionState>,
    Form(data): Form<TransactionFormData>,
) -> Response {
    let mut form = TransactionForm::from_data(&data);
    form.touch_all();

    let new_transaction = match validate_transaction(&data) {
        Ok(new_transaction) => new_transaction,
        Err(errors) => {
            form.apply_errors(&errors);
            return render_form(form, &state.category_list).await;
        }
    };

    let in_flight = match state.submissions.begin(form.submission_id, &mut form.status) {
        Ok(in_flight) => in_flight,
        Err(error) => return error.into_alert_response(),
    };

    let outcome = state.finance_api.create_transaction(new_transaction).await;
    let created = form.status.resolve(outcome, TRANSACTION_NOTICES);
    in_flight.finish();

    match created {
        Some(transaction) => {
            tracing::info!(
                "created {} transaction {} for {}",
                transaction.transaction_type,
                transaction.id,
                transaction.amount
            );

            (
                HxRedirect(endpoints::DASHBOARD_VIEW.to_owned()),
                StatusCode::SEE_OTHER,
            )
                .into_response()
        }
        None => render_form(form, &state.category_list).await,
    }
}

/// A route handler that re-validates the transaction form when a field loses
/// focus.
pub async fn validate_transaction_form(
    State(state): State<CategoryOptionsState>,
    Form(data): Form<TransactionFormData>,
) -> Response {
    let mut form = TransactionForm::from_data(&data);

    if let Err(errors) = validate_transaction(&data) {
        form.apply_errors(&errors);
    }

    render_form(form, &state.category_list).await
}

async fn render_form(form: TransactionForm, category_list: &CategoryListProvider) -> Response {
    let categories = category_list.categories_or_empty().await;

    form.into_html(&categories).into_response()
}
