use std::sync::{
    Mutex,
    atomic::{AtomicUsize, Ordering},
};

use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    api::{ApiError, FinanceApi},
    category::{Category, CategoryName, NewCategory},
    transaction::{NewTransaction, Transaction, TransactionType},
};

/// A finance API with scripted failures that counts the calls made to it.
#[derive(Debug, Default)]
pub(crate) struct FakeFinanceApi {
    categories: Mutex<Vec<Category>>,
    transactions: Mutex<Vec<Transaction>>,
    list_categories_error: Option<ApiError>,
    create_category_error: Option<ApiError>,
    create_transaction_error: Option<ApiError>,
    list_transactions_error: Option<ApiError>,
    list_categories_calls: AtomicUsize,
    create_category_calls: AtomicUsize,
    create_transaction_calls: AtomicUsize,
}

impl FakeFinanceApi {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_categories(self, categories: Vec<Category>) -> Self {
        Self {
            categories: Mutex::new(categories),
            ..self
        }
    }

    pub(crate) fn with_transactions(self, transactions: Vec<Transaction>) -> Self {
        Self {
            transactions: Mutex::new(transactions),
            ..self
        }
    }

    pub(crate) fn failing_category_listing(self, error: ApiError) -> Self {
        Self {
            list_categories_error: Some(error),
            ..self
        }
    }

    pub(crate) fn failing_category_creation(self, error: ApiError) -> Self {
        Self {
            create_category_error: Some(error),
            ..self
        }
    }

    pub(crate) fn failing_transaction_creation(self, error: ApiError) -> Self {
        Self {
            create_transaction_error: Some(error),
            ..self
        }
    }

    pub(crate) fn failing_transaction_listing(self, error: ApiError) -> Self {
        Self {
            list_transactions_error: Some(error),
            ..self
        }
    }

    pub(crate) fn list_categories_calls(&self) -> usize {
        self.list_categories_calls.load(Ordering::SeqCst)
    }

    pub(crate) fn create_category_calls(&self) -> usize {
        self.create_category_calls.load(Ordering::SeqCst)
    }

    pub(crate) fn create_transaction_calls(&self) -> usize {
        self.create_transaction_calls.load(Ordering::SeqCst)
    }

    pub(crate) fn created_transactions(&self) -> Vec<Transaction> {
        self.transactions.lock().unwrap().clone()
    }
}

#[async_trait]
impl FinanceApi for FakeFinanceApi {
    async fn list_categories(&self) -> Result<Vec<Category>, ApiError> {
        self.list_categories_calls.fetch_add(1, Ordering::SeqCst);

        match &self.list_categories_error {
            Some(error) => Err(error.clone()),
            None => Ok(self.categories.lock().unwrap().clone()),
        }
    }

    async fn create_category(&self, category: NewCategory) -> Result<Category, ApiError> {
        self.create_category_calls.fetch_add(1, Ordering::SeqCst);

        if let Some(error) = &self.create_category_error {
            return Err(error.clone());
        }

        let category = category.into_category(Uuid::new_v4());
        self.categories.lock().unwrap().push(category.clone());

        Ok(category)
    }

    async fn create_transaction(
        &self,
        transaction: NewTransaction,
    ) -> Result<Transaction, ApiError> {
        self.create_transaction_calls.fetch_add(1, Ordering::SeqCst);

        if let Some(error) = &self.create_transaction_error {
            return Err(error.clone());
        }

        let transaction = transaction.into_transaction(Uuid::new_v4());
        self.transactions.lock().unwrap().push(transaction.clone());

        Ok(transaction)
    }

    async fn list_transactions(&self) -> Result<Vec<Transaction>, ApiError> {
        match &self.list_transactions_error {
            Some(error) => Err(error.clone()),
            None => Ok(self.transactions.lock().unwrap().clone()),
        }
    }
}

pub(crate) fn sample_category(name: &str, category_type: TransactionType) -> Category {
    Category {
        id: Uuid::new_v4(),
        name: CategoryName::new_unchecked(name),
        category_type,
    }
}
