//! Transactions record money earned or spent.
//!
//! This module contains:
//! - The `Transaction` model and its creation payload
//! - The form for adding a transaction and its validation
//! - The endpoints that submit and re-validate that form
//! - The page that shows the category and transaction forms

mod core;
mod create_endpoint;
mod form;
mod new_transaction_page;

pub use core::{NewTransaction, Transaction, TransactionType};
pub use create_endpoint::{create_transaction_endpoint, validate_transaction_form};
pub use form::{TRANSACTION_FORM_ID, TransactionForm, TransactionFormData};
pub use new_transaction_page::get_new_transaction_page;
