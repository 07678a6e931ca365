//! Categories classify transactions as named buckets of income or expenses.
//!
//! This module contains the category domain types, the form for adding a
//! category and the cached category list that feeds the transaction form.

mod core;
mod create_endpoint;
mod form;
mod provider;

pub use core::{Category, CategoryName, NewCategory};
pub use create_endpoint::{create_category_endpoint, validate_category_form};
pub use form::{CATEGORY_FORM_ID, CategoryForm, CategoryFormData};
pub(crate) use form::parse_type;
pub use provider::{
    CategoryListProvider, CategoryOptionsState, category_options, get_category_options,
};
