//! Defines the endpoints for submitting and validating the category form.
use std::sync::Arc;

use axum::{
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
// axum_extra's Form collects the repeated `touched` keys into a Vec.
use axum_extra::extract::Form;
use axum_htmx::HX_TRIGGER;

use crate::{
    AppState,
    api::FinanceApi,
    category::{
        CategoryListProvider,
        form::{CATEGORY_NOTICES, CategoryForm, CategoryFormData, validate_category},
        provider::CATEGORIES_CHANGED_EVENT,
    },
    form::ControlledForm,
    submission::InFlightSubmissions,
};

/// The state needed to create a category.
#[derive(Debug, Clone)]
pub struct CreateCategoryState {
    pub finance_api: Arc<dyn FinanceApi>,
    /// Refreshed after a category is created so the selector sees it.
    pub category_list: Arc<CategoryListProvider>,
    pub submissions: Arc<InFlightSubmissions>,
}

impl FromRef<AppState> for CreateCategoryState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            finance_api: state.finance_api.clone(),
            category_list: state.category_list.clone(),
            submissions: state.submissions.clone(),
        }
    }
}

/// A route handler for the category form.
///
/// Responds with the re-rendered form: with inline errors if validation
/// fails, reset with a success notice once the category is created, or with
/// the user's input and an error notice if the API rejects it.
pub async fn create_category_endpoint(
    State(state): State<CreateCategoryState>,
    Form(data): Form<CategoryFormData>,
) -> Response {
    let mut form = CategoryForm::from_data(&data);
    form.touch_all();

    let new_category = match validate_category(&data) {
        Ok(new_category) => new_category,
        Err(errors) => {
            form.apply_errors(&errors);
            return form.into_html().into_response();
        }
    };

    let in_flight = match state.submissions.begin(form.submission_id, &mut form.status) {
        Ok(in_flight) => in_flight,
        Err(error) => return error.into_alert_response(),
    };

    let outcome = state.finance_api.create_category(new_category).await;
    let created = form.status.resolve(outcome, CATEGORY_NOTICES);
    in_flight.finish();

    let Some(category) = created else {
        return form.into_html().into_response();
    };

    tracing::info!("created category {} ({})", category.name, category.id);

    if let Err(error) = state.category_list.refresh().await {
        tracing::error!("could not refresh categories after creating {}: {error}", category.name);
    }

    form.reset();

    ([(HX_TRIGGER, CATEGORIES_CHANGED_EVENT)], form.into_html()).into_response()
}

/// A route handler that re-validates the category form when a field loses
/// focus.
pub async fn validate_category_form(Form(data): Form<CategoryFormData>) -> Response {
    let mut form = CategoryForm::from_data(&data);

    if let Err(errors) = validate_category(&data) {
        form.apply_errors(&errors);
    }

    form.into_html().into_response()
}
