//! The form for adding a category: its fields, validation and markup.

use maud::{Markup, html};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    category::{CategoryName, NewCategory},
    endpoints,
    form::{
        ControlledForm, Field, FieldErrors, field_error, submission_id_input, touched_inputs,
    },
    html::{BUTTON_PRIMARY_STYLE, FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE, loading_spinner},
    submission::{Notices, SubmissionStatus},
    transaction::TransactionType,
};

pub const NAME_FIELD: &str = "name";
pub const TYPE_FIELD: &str = "type";

/// The element ID of the category form, used as the htmx swap target.
pub const CATEGORY_FORM_ID: &str = "category-form";

pub const CATEGORY_NOTICES: Notices = Notices {
    success: "Category added successfully",
    failure_fallback: "Category add failed",
};

const INVALID_TYPE_MESSAGE: &str = "Type must be one of: income, expense";

/// The raw category form data sent by the browser.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CategoryFormData {
    #[serde(default)]
    pub name: String,
    #[serde(default, rename = "type")]
    pub category_type: String,
    /// The fields the user has interacted with so far.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub touched: Vec<String>,
    /// The field that just lost focus, only set for validation requests.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blurred: Option<String>,
    /// The ID of the rendered form, see [crate::form::submission_id_input].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub submission_id: Option<Uuid>,
}

/// Check the category form, producing the payload for the finance API.
///
/// # Errors
///
/// Returns the error message for each invalid field.
pub fn validate_category(data: &CategoryFormData) -> Result<NewCategory, FieldErrors> {
    let mut errors = FieldErrors::new();

    let name = CategoryName::new(&data.name)
        .inspect_err(|_| {
            errors.insert(NAME_FIELD, "Category name is required".to_owned());
        })
        .ok();

    let category_type = parse_type(&data.category_type, "Category type is required")
        .inspect_err(|message| {
            errors.insert(TYPE_FIELD, message.clone());
        })
        .ok();

    match (name, category_type) {
        (Some(name), Some(category_type)) if errors.is_empty() => Ok(NewCategory {
            name,
            category_type,
        }),
        _ => Err(errors),
    }
}

/// Parse a transaction type select value.
pub(crate) fn parse_type(value: &str, required_message: &str) -> Result<TransactionType, String> {
    if value.trim().is_empty() {
        return Err(required_message.to_owned());
    }

    value
        .parse()
        .map_err(|_| INVALID_TYPE_MESSAGE.to_owned())
}

/// The state of the category form.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryForm {
    pub name: Field,
    pub category_type: Field,
    pub status: SubmissionStatus,
    pub submission_id: Uuid,
}

impl CategoryForm {
    /// An empty, untouched form with a fresh ID.
    pub fn empty() -> Self {
        Self {
            name: Field::default(),
            category_type: Field::default(),
            status: SubmissionStatus::Idle,
            submission_id: Uuid::new_v4(),
        }
    }

    /// The form holding the values and touch events sent by the browser.
    ///
    /// A request without a form ID is treated as a new form.
    pub fn from_data(data: &CategoryFormData) -> Self {
        let mut form = Self {
            name: Field::new(&data.name),
            category_type: Field::new(&data.category_type),
            status: SubmissionStatus::Idle,
            submission_id: data.submission_id.unwrap_or_else(Uuid::new_v4),
        };
        form.touch_reported(&data.touched, data.blurred.as_deref());

        form
    }

    /// Clear every field back to empty and untouched, keeping the status.
    pub fn reset(&mut self) {
        self.name = Field::default();
        self.category_type = Field::default();
    }

    pub fn into_html(self) -> Markup {
        category_form_view(&self)
    }
}

impl ControlledForm for CategoryForm {
    fn fields_mut(&mut self) -> Vec<(&'static str, &mut Field)> {
        vec![
            (NAME_FIELD, &mut self.name),
            (TYPE_FIELD, &mut self.category_type),
        ]
    }

    fn touched_fields(&self) -> Vec<&'static str> {
        [(TYPE_FIELD, &self.category_type), (NAME_FIELD, &self.name)]
            .into_iter()
            .filter(|(_, field)| field.touched)
            .map(|(name, _)| name)
            .collect()
    }
}

/// Attributes shared by inputs that re-validate the form when they lose focus.
struct BlurValidation {
    field: &'static str,
    trigger: &'static str,
}

impl BlurValidation {
    fn hx_vals(&self) -> String {
        format!(r#"{{"blurred": "{}"}}"#, self.field)
    }
}

fn category_form_view(form: &CategoryForm) -> Markup {
    let spinner = loading_spinner();
    let target = format!("#{CATEGORY_FORM_ID}");
    let type_validation = BlurValidation {
        field: TYPE_FIELD,
        trigger: "change, blur",
    };
    let name_validation = BlurValidation {
        field: NAME_FIELD,
        trigger: "blur changed",
    };

    html! {
        form
            id=(CATEGORY_FORM_ID)
            hx-post=(endpoints::CATEGORIES_API)
            hx-target="this"
            hx-swap="outerHTML"
            hx-sync="this:drop"
            hx-disabled-elt="find button[type=submit]"
            hx-target-error="#alert-container"
            class="w-full space-y-4"
        {
            h2 class="text-xl font-bold text-center" { "Add Category" }

            (form.status.banner())
            (submission_id_input(form.submission_id))
            (touched_inputs(&form.touched_fields()))

            div
            {
                label for="category-type" class=(FORM_LABEL_STYLE) { "Type" }

                select
                    name=(TYPE_FIELD)
                    id="category-type"
                    hx-post=(endpoints::VALIDATE_CATEGORY_FORM)
                    hx-trigger=(type_validation.trigger)
                    hx-target=(target)
                    hx-swap="outerHTML"
                    hx-sync="closest form:abort"
                    hx-vals=(type_validation.hx_vals())
                    class=(FORM_TEXT_INPUT_STYLE)
                {
                    option value="" selected[form.category_type.value.is_empty()] { "Select type" }

                    @for transaction_type in TransactionType::ALL {
                        option
                            value=(transaction_type.as_str())
                            selected[form.category_type.value == transaction_type.as_str()]
                        {
                            (transaction_type.label())
                        }
                    }
                }

                (field_error(&form.category_type, "category-type"))
            }

            div
            {
                label for="category-name" class=(FORM_LABEL_STYLE) { "Name" }

                input
                    name=(NAME_FIELD)
                    id="category-name"
                    type="text"
                    placeholder="Category name"
                    value=(form.name.value)
                    hx-post=(endpoints::VALIDATE_CATEGORY_FORM)
                    hx-trigger=(name_validation.trigger)
                    hx-target=(target)
                    hx-swap="outerHTML"
                    hx-sync="closest form:abort"
                    hx-vals=(name_validation.hx_vals())
                    class=(FORM_TEXT_INPUT_STYLE);

                (field_error(&form.name, "category-name"))
            }

            button
                type="submit"
                disabled[form.status.is_submitting()]
                class=(BUTTON_PRIMARY_STYLE)
            {
                span class="htmx-indicator" { (spinner) }
                "Add Category"
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use scraper::Html;

    use crate::{
        category::{
            CategoryName,
            form::{
                CATEGORY_FORM_ID, CategoryForm, CategoryFormData, NAME_FIELD, TYPE_FIELD,
                validate_category,
            },
        },
        endpoints,
        form::{ControlledForm, FieldErrors},
        test_utils::{
            assert_field_error, assert_form_input, assert_form_submit_button_with_text,
            assert_hx_endpoint, assert_valid_html, field_error, field_value, must_get_form,
            select_options, touched_fields,
        },
        transaction::TransactionType,
    };

    fn form_data(name: &str, category_type: &str) -> CategoryFormData {
        CategoryFormData {
            name: name.to_owned(),
            category_type: category_type.to_owned(),
            ..Default::default()
        }
    }

    fn render(form: CategoryForm) -> Html {
        Html::parse_fragment(&form.into_html().into_string())
    }

    #[test]
    fn valid_form_produces_payload() {
        let payload = validate_category(&form_data(" Groceries ", "expense")).unwrap();

        assert_eq!(payload.name, CategoryName::new_unchecked("Groceries"));
        assert_eq!(payload.category_type, TransactionType::Expense);
    }

    #[test]
    fn empty_form_reports_both_fields() {
        let errors = validate_category(&form_data("", "")).unwrap_err();

        let mut want = FieldErrors::new();
        want.insert(NAME_FIELD, "Category name is required".to_owned());
        want.insert(TYPE_FIELD, "Category type is required".to_owned());
        assert_eq!(errors, want);
    }

    #[test]
    fn unknown_type_is_rejected() {
        let errors = validate_category(&form_data("Groceries", "invalid")).unwrap_err();

        assert_eq!(
            errors.get(TYPE_FIELD).map(String::as_str),
            Some("Type must be one of: income, expense")
        );
        assert!(!errors.contains_key(NAME_FIELD));
    }

    #[test]
    fn renders_form_with_fields() {
        let html = render(CategoryForm::empty());
        assert_valid_html(&html);

        let form = must_get_form(&html, CATEGORY_FORM_ID);
        assert_hx_endpoint(&form, endpoints::CATEGORIES_API, "hx-post");
        assert_form_input(&form, "name", "text");
        assert_eq!(select_options(&form, "type"), vec!["", "income", "expense"]);
        assert_form_submit_button_with_text(&form, "Add Category");
    }

    #[test]
    fn each_new_form_gets_its_own_id() {
        let first = CategoryForm::empty();
        let second = CategoryForm::empty();
        assert_ne!(first.submission_id, second.submission_id);

        let form_id = first.submission_id;
        let html = render(first);
        let form = must_get_form(&html, CATEGORY_FORM_ID);
        assert_eq!(field_value(&form, "submission_id"), form_id.to_string());

        let data = CategoryFormData {
            submission_id: Some(form_id),
            ..form_data("Groceries", "")
        };
        assert_eq!(CategoryForm::from_data(&data).submission_id, form_id);
    }

    #[test]
    fn selector_only_offers_valid_types() {
        let html = render(CategoryForm::empty());
        let form = must_get_form(&html, CATEGORY_FORM_ID);

        for option in select_options(&form, "type") {
            assert!(
                option.is_empty() || option.parse::<TransactionType>().is_ok(),
                "unexpected type option {option:?}"
            );
        }
    }

    #[test]
    fn errors_hidden_for_untouched_fields() {
        let data = CategoryFormData {
            blurred: Some("type".to_owned()),
            ..form_data("", "")
        };
        let mut form = CategoryForm::from_data(&data);
        form.apply_errors(&validate_category(&data).unwrap_err());

        let html = render(form);
        let form = must_get_form(&html, CATEGORY_FORM_ID);

        assert_field_error(&form, "category-type", "Category type is required");
        assert_eq!(field_error(&form, "category-name"), None);
        assert_eq!(touched_fields(&form), vec!["type"]);
    }

    #[test]
    fn reset_clears_values_and_touches() {
        let data = CategoryFormData {
            touched: vec!["name".to_owned(), "type".to_owned()],
            ..form_data("Groceries", "expense")
        };
        let mut form = CategoryForm::from_data(&data);

        form.reset();

        assert_eq!(form.name.value, "");
        assert_eq!(form.category_type.value, "");
        assert!(form.touched_fields().is_empty());
    }
}
