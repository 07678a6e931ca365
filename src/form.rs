//! Controlled form fields shared by the category and transaction forms.
//!
//! A form is a record of [Field]s. The browser reports which fields the user
//! has interacted with, the server re-runs validation and renders each
//! field's error only once that field has been touched.

use std::collections::BTreeMap;

use maud::{Markup, html};
use uuid::Uuid;

/// The name of the hidden input holding the ID of a rendered form.
pub const SUBMISSION_ID_FIELD: &str = "submission_id";

/// Validation errors keyed by the name of the offending field.
pub type FieldErrors = BTreeMap<&'static str, String>;

/// The state of a single form input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Field {
    /// The raw text the user entered.
    pub value: String,
    /// Whether the user has interacted with the field.
    pub touched: bool,
    /// The validation error for the current value, if any.
    pub error: Option<String>,
}

impl Field {
    /// An untouched field holding `value`.
    pub fn new(value: &str) -> Self {
        Self {
            value: value.to_owned(),
            touched: false,
            error: None,
        }
    }

    /// Mark the field as interacted with.
    pub fn touch(&mut self) {
        self.touched = true;
    }

    /// The error to display, which is hidden until the field is touched.
    pub fn visible_error(&self) -> Option<&str> {
        if self.touched {
            self.error.as_deref()
        } else {
            None
        }
    }
}

/// A form made of named [Field]s.
pub trait ControlledForm {
    /// The form's fields paired with their input names.
    fn fields_mut(&mut self) -> Vec<(&'static str, &mut Field)>;

    /// The names of the fields that have been touched.
    fn touched_fields(&self) -> Vec<&'static str>;

    /// Mark the field called `name` as touched. Unknown names are ignored.
    fn touch(&mut self, name: &str) {
        for (field_name, field) in self.fields_mut() {
            if field_name == name {
                field.touch();
            }
        }
    }

    /// Mark every field as touched, as happens when the form is submitted.
    fn touch_all(&mut self) {
        for (_, field) in self.fields_mut() {
            field.touch();
        }
    }

    /// Replace each field's error with the entry in `errors`, clearing the
    /// errors of fields that are now valid.
    fn apply_errors(&mut self, errors: &FieldErrors) {
        for (field_name, field) in self.fields_mut() {
            field.error = errors.get(field_name).cloned();
        }
    }

    /// Apply the touch events sent by the browser: the fields touched so far
    /// plus the field that just lost focus.
    fn touch_reported(&mut self, touched: &[String], blurred: Option<&str>) {
        for name in touched {
            self.touch(name);
        }

        if let Some(name) = blurred {
            self.touch(name);
        }
    }
}

/// Hidden inputs that echo the touched fields back to the server on the next
/// request.
pub fn touched_inputs(touched: &[&'static str]) -> Markup {
    html! {
        @for name in touched {
            input type="hidden" name="touched" value=(name);
        }
    }
}

/// The hidden input that identifies one rendered form across re-renders, so
/// that a pending submission only blocks the form that sent it.
pub fn submission_id_input(form_id: Uuid) -> Markup {
    html! {
        input type="hidden" name=(SUBMISSION_ID_FIELD) value=(form_id.to_string());
    }
}

/// The inline error message shown beneath a field.
pub fn field_error(field: &Field, field_id: &str) -> Markup {
    html! {
        @if let Some(error) = field.visible_error() {
            p id=(format!("{field_id}-error")) class="mt-1 text-red-500 text-xs" { (error) }
        }
    }
}
