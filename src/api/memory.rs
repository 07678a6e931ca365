//! A finance API that keeps everything in memory.

use std::sync::Mutex;

use async_trait::async_trait;
use axum::http::StatusCode;
use serde_json::json;
use uuid::Uuid;

use crate::{
    api::{ApiError, FinanceApi},
    category::{Category, NewCategory},
    transaction::{NewTransaction, Transaction},
};

#[derive(Debug, Default)]
struct Records {
    categories: Vec<Category>,
    transactions: Vec<Transaction>,
}

/// Stores categories and transactions for the lifetime of the process.
///
/// Category names are unique, ignoring case.
#[derive(Debug, Default)]
pub struct InMemoryFinanceApi {
    records: Mutex<Records>,
}

impl InMemoryFinanceApi {
    /// Create an API with no categories or transactions.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an API preloaded with `categories`.
    ///
    /// Duplicate names after the first are skipped.
    pub fn with_categories(categories: Vec<NewCategory>) -> Self {
        let mut records = Records::default();

        for category in categories {
            if !contains_name(&records.categories, category.name.as_ref()) {
                records
                    .categories
                    .push(category.into_category(Uuid::new_v4()));
            }
        }

        Self {
            records: Mutex::new(records),
        }
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Records>, ApiError> {
        self.records.lock().map_err(|error| {
            tracing::error!("could not acquire the in-memory API lock: {error}");
            ApiError::with_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({"message": "The finance API is unavailable"}),
            )
        })
    }
}

fn contains_name(categories: &[Category], name: &str) -> bool {
    let name = name.to_lowercase();

    categories
        .iter()
        .any(|category| category.name.as_ref().to_lowercase() == name)
}

#[async_trait]
impl FinanceApi for InMemoryFinanceApi {
    async fn list_categories(&self) -> Result<Vec<Category>, ApiError> {
        Ok(self.lock()?.categories.clone())
    }

    async fn create_category(&self, category: NewCategory) -> Result<Category, ApiError> {
        let mut records = self.lock()?;

        if contains_name(&records.categories, category.name.as_ref()) {
            return Err(ApiError::with_response(
                StatusCode::CONFLICT,
                json!({"message": format!("Category \"{}\" already exists", category.name)}),
            ));
        }

        let category = category.into_category(Uuid::new_v4());
        records.categories.push(category.clone());

        Ok(category)
    }

    async fn create_transaction(
        &self,
        transaction: NewTransaction,
    ) -> Result<Transaction, ApiError> {
        let transaction = transaction.into_transaction(Uuid::new_v4());
        self.lock()?.transactions.push(transaction.clone());

        Ok(transaction)
    }

    async fn list_transactions(&self) -> Result<Vec<Transaction>, ApiError> {
        Ok(self.lock()?.transactions.clone())
    }
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use time::macros::date;

    use crate::{
        api::{FinanceApi, InMemoryFinanceApi},
        category::{CategoryName, NewCategory},
        transaction::{NewTransaction, TransactionType},
    };

    fn new_category(name: &str, category_type: TransactionType) -> NewCategory {
        NewCategory {
            name: CategoryName::new_unchecked(name),
            category_type,
        }
    }

    #[tokio::test]
    async fn created_category_is_listed() {
        let api = InMemoryFinanceApi::new();

        let created = api
            .create_category(new_category("Groceries", TransactionType::Expense))
            .await
            .unwrap();
        let categories = api.list_categories().await.unwrap();

        assert_eq!(categories, vec![created]);
    }

    #[tokio::test]
    async fn duplicate_category_name_is_rejected() {
        let api = InMemoryFinanceApi::new();
        api.create_category(new_category("Groceries", TransactionType::Expense))
            .await
            .unwrap();

        let error = api
            .create_category(new_category("groceries", TransactionType::Income))
            .await
            .unwrap_err();

        assert_eq!(
            error.response.as_ref().map(|response| response.status),
            Some(StatusCode::CONFLICT)
        );
        assert_eq!(
            error.server_message(),
            Some("Category \"groceries\" already exists")
        );
        assert_eq!(api.list_categories().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn duplicate_check_ignores_non_ascii_case() {
        let api = InMemoryFinanceApi::new();
        api.create_category(new_category("Café", TransactionType::Expense))
            .await
            .unwrap();

        let error = api
            .create_category(new_category("CAFÉ", TransactionType::Expense))
            .await
            .unwrap_err();

        assert_eq!(
            error.response.as_ref().map(|response| response.status),
            Some(StatusCode::CONFLICT)
        );
        assert_eq!(api.list_categories().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn seeded_categories_skip_duplicates() {
        let api = InMemoryFinanceApi::with_categories(vec![
            new_category("Salary", TransactionType::Income),
            new_category("SALARY", TransactionType::Income),
            new_category("Rent", TransactionType::Expense),
        ]);

        let names = api
            .list_categories()
            .await
            .unwrap()
            .into_iter()
            .map(|category| category.name.to_string())
            .collect::<Vec<_>>();

        assert_eq!(names, vec!["Salary", "Rent"]);
    }

    #[tokio::test]
    async fn created_transaction_is_listed() {
        let api = InMemoryFinanceApi::new();
        let new_transaction = NewTransaction {
            transaction_type: TransactionType::Expense,
            amount: 45.99,
            category: "Groceries".to_owned(),
            date: date!(2025 - 02 - 01),
            description: "Weekly shop".to_owned(),
        };

        let created = api
            .create_transaction(new_transaction.clone())
            .await
            .unwrap();

        assert_eq!(created.amount, new_transaction.amount);
        assert_eq!(api.list_transactions().await.unwrap(), vec![created]);
    }
}
