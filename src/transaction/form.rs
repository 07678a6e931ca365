//! The form for adding a transaction: its fields, validation and markup.

use maud::{Markup, html};
use serde::{Deserialize, Serialize};
use time::{Date, macros::format_description};
use uuid::Uuid;

use crate::{
    category::{Category, category_options, parse_type},
    endpoints,
    form::{
        ControlledForm, Field, FieldErrors, field_error, submission_id_input, touched_inputs,
    },
    html::{BUTTON_SUCCESS_STYLE, FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE, loading_spinner},
    submission::{Notices, SubmissionStatus},
    transaction::{NewTransaction, TransactionType},
};

pub const TYPE_FIELD: &str = "type";
pub const AMOUNT_FIELD: &str = "amount";
pub const CATEGORY_FIELD: &str = "category";
pub const DATE_FIELD: &str = "date";
pub const DESCRIPTION_FIELD: &str = "description";

pub const TRANSACTION_FORM_ID: &str = "transaction-form";

pub const TRANSACTION_NOTICES: Notices = Notices {
    success: "Transaction added successfully",
    failure_fallback: "Transaction failed",
};

/// The raw transaction form data sent by the browser.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TransactionFormData {
    #[serde(default, rename = "type")]
    pub transaction_type: String,
    #[serde(default)]
    pub amount: String,
    #[serde(default)]
    pub category: String,
    /// The date as entered in a date input, e.g. "2025-03-14".
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub touched: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blurred: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub submission_id: Option<Uuid>,
}

/// Check the transaction form, producing the payload for the finance API.
///
/// The category is only checked for presence, it is not matched against the
/// known categories.
///
/// # Errors
///
/// Returns the error message for each invalid field.
pub fn validate_transaction(data: &TransactionFormData) -> Result<NewTransaction, FieldErrors> {
    let mut errors = FieldErrors::new();

    let transaction_type = parse_type(&data.transaction_type, "Transaction type is required")
        .inspect_err(|message| {
            errors.insert(TYPE_FIELD, message.clone());
        })
        .ok();

    let amount = parse_amount(&data.amount)
        .inspect_err(|message| {
            errors.insert(AMOUNT_FIELD, (*message).to_owned());
        })
        .ok();

    let category = data.category.trim();
    if category.is_empty() {
        errors.insert(CATEGORY_FIELD, "Category is required".to_owned());
    }

    let date = parse_date(&data.date)
        .inspect_err(|message| {
            errors.insert(DATE_FIELD, (*message).to_owned());
        })
        .ok();

    match (transaction_type, amount, date) {
        (Some(transaction_type), Some(amount), Some(date)) if errors.is_empty() => {
            Ok(NewTransaction {
                transaction_type,
                amount,
                category: category.to_owned(),
                date,
                description: data.description.clone(),
            })
        }
        _ => Err(errors),
    }
}

fn parse_amount(value: &str) -> Result<f64, &'static str> {
    let value = value.trim();

    if value.is_empty() {
        return Err("Amount is required");
    }

    let amount: f64 = value.parse().map_err(|_| "Amount must be a number")?;

    if !amount.is_finite() {
        Err("Amount must be a number")
    } else if amount <= 0.0 {
        Err("Must be positive")
    } else {
        Ok(amount)
    }
}

fn parse_date(value: &str) -> Result<Date, &'static str> {
    let value = value.trim();

    if value.is_empty() {
        return Err("Date is required");
    }

    Date::parse(value, format_description!("[year]-[month]-[day]"))
        .map_err(|_| "Date must be a valid date")
}

/// The state of the transaction form.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionForm {
    pub transaction_type: Field,
    pub amount: Field,
    pub category: Field,
    pub date: Field,
    pub description: Field,
    pub status: SubmissionStatus,
    pub submission_id: Uuid,
}

impl TransactionForm {
    pub fn empty() -> Self {
        Self::from_data(&TransactionFormData::default())
    }

    /// The form holding the values and touch events sent by the browser.
    pub fn from_data(data: &TransactionFormData) -> Self {
        let mut form = Self {
            transaction_type: Field::new(&data.transaction_type),
            amount: Field::new(&data.amount),
            category: Field::new(&data.category),
            date: Field::new(&data.date),
            description: Field::new(&data.description),
            status: SubmissionStatus::Idle,
            submission_id: data.submission_id.unwrap_or_else(Uuid::new_v4),
        };
        form.touch_reported(&data.touched, data.blurred.as_deref());

        form
    }

    /// Render the form with `categories` offered in the category selector.
    pub fn into_html(self, categories: &[Category]) -> Markup {
        transaction_form_view(&self, categories)
    }

    fn named_fields(&self) -> [(&'static str, &Field); 5] {
        [
            (TYPE_FIELD, &self.transaction_type),
            (AMOUNT_FIELD, &self.amount),
            (CATEGORY_FIELD, &self.category),
            (DATE_FIELD, &self.date),
            (DESCRIPTION_FIELD, &self.description),
        ]
    }
}

impl ControlledForm for TransactionForm {
    fn fields_mut(&mut self) -> Vec<(&'static str, &mut Field)> {
        vec![
            (TYPE_FIELD, &mut self.transaction_type),
            (AMOUNT_FIELD, &mut self.amount),
            (CATEGORY_FIELD, &mut self.category),
            (DATE_FIELD, &mut self.date),
            (DESCRIPTION_FIELD, &mut self.description),
        ]
    }

    fn touched_fields(&self) -> Vec<&'static str> {
        self.named_fields()
            .into_iter()
            .filter(|(_, field)| field.touched)
            .map(|(name, _)| name)
            .collect()
    }
}

/// The htmx attributes for re-validating the form when `field` loses focus.
fn blur_vals(field: &str) -> String {
    format!(r#"{{"blurred": "{field}"}}"#)
}

fn transaction_form_view(form: &TransactionForm, categories: &[Category]) -> Markup {
    let spinner = loading_spinner();
    let target = format!("#{TRANSACTION_FORM_ID}");

    html! {
        form
            id=(TRANSACTION_FORM_ID)
            hx-post=(endpoints::TRANSACTIONS_API)
            hx-target="this"
            hx-swap="outerHTML"
            hx-sync="this:drop"
            hx-disabled-elt="find button[type=submit]"
            hx-target-error="#alert-container"
            class="w-full space-y-4"
        {
            h2 class="text-xl font-bold text-center" { "Add Transaction" }

            (form.status.banner())
            (submission_id_input(form.submission_id))
            (touched_inputs(&form.touched_fields()))

            div
            {
                label for="transaction-type" class=(FORM_LABEL_STYLE) { "Type" }

                select
                    name=(TYPE_FIELD)
                    id="transaction-type"
                    hx-post=(endpoints::VALIDATE_TRANSACTION_FORM)
                    hx-trigger="change, blur"
                    hx-target=(target)
                    hx-swap="outerHTML"
                    hx-sync="closest form:abort"
                    hx-vals=(blur_vals(TYPE_FIELD))
                    class=(FORM_TEXT_INPUT_STYLE)
                {
                    option value="" selected[form.transaction_type.value.is_empty()] { "Select type" }

                    @for transaction_type in TransactionType::ALL {
                        option
                            value=(transaction_type.as_str())
                            selected[form.transaction_type.value == transaction_type.as_str()]
                        {
                            (transaction_type.label())
                        }
                    }
                }

                (field_error(&form.transaction_type, "transaction-type"))
            }

            div
            {
                label for="amount" class=(FORM_LABEL_STYLE) { "Amount" }

                div class="input-wrapper w-full"
                {
                    input
                        name=(AMOUNT_FIELD)
                        id="amount"
                        type="number"
                        step="0.01"
                        placeholder="Amount"
                        value=(form.amount.value)
                        hx-post=(endpoints::VALIDATE_TRANSACTION_FORM)
                        hx-trigger="blur changed"
                        hx-target=(target)
                        hx-swap="outerHTML"
                        hx-sync="closest form:abort"
                        hx-vals=(blur_vals(AMOUNT_FIELD))
                        class=(FORM_TEXT_INPUT_STYLE);
                }

                (field_error(&form.amount, "amount"))
            }

            div
            {
                label for="category" class=(FORM_LABEL_STYLE) { "Category" }

                // Reloads the options when a category is added by the other form.
                div
                    hx-get=(endpoints::CATEGORY_OPTIONS)
                    hx-trigger="categories-changed from:body"
                    hx-target="#category"
                    hx-swap="innerHTML"
                    hx-include="#category"
                {
                    select
                        name=(CATEGORY_FIELD)
                        id="category"
                        hx-post=(endpoints::VALIDATE_TRANSACTION_FORM)
                        hx-trigger="change, blur"
                        hx-target=(target)
                        hx-swap="outerHTML"
                        hx-sync="closest form:abort"
                        hx-vals=(blur_vals(CATEGORY_FIELD))
                        class=(FORM_TEXT_INPUT_STYLE)
                    {
                        (category_options(categories, &form.category.value))
                    }
                }

                (field_error(&form.category, "category"))
            }

            div
            {
                label for="date" class=(FORM_LABEL_STYLE) { "Date" }

                input
                    name=(DATE_FIELD)
                    id="date"
                    type="date"
                    value=(form.date.value)
                    hx-post=(endpoints::VALIDATE_TRANSACTION_FORM)
                    hx-trigger="blur changed"
                    hx-target=(target)
                    hx-swap="outerHTML"
                    hx-sync="closest form:abort"
                    hx-vals=(blur_vals(DATE_FIELD))
                    class=(FORM_TEXT_INPUT_STYLE);

                (field_error(&form.date, "date"))
            }

            div
            {
                label for="description" class=(FORM_LABEL_STYLE) { "Description" }

                textarea
                    name=(DESCRIPTION_FIELD)
                    id="description"
                    rows="3"
                    placeholder="Optional description"
                    class=(FORM_TEXT_INPUT_STYLE)
                {
                    (form.description.value)
                }
            }

            button
                type="submit"
                disabled[form.status.is_submitting()]
                class=(BUTTON_SUCCESS_STYLE)
            {
                span class="htmx-indicator" { (spinner) }
                "Submit Transaction"
            }
        }
    }
}
