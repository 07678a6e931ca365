//! Core category domain types.

use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Error, transaction::TransactionType};

/// Identifier assigned to a category by the finance API.
pub type CategoryId = Uuid;

/// A validated, non-empty category name.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Hash)]
#[serde(try_from = "String", into = "String")]
pub struct CategoryName(String);

impl CategoryName {
    /// Create a category name.
    ///
    /// Leading and trailing whitespace is removed.
    ///
    /// # Errors
    ///
    /// This function will return an [Error::EmptyCategoryName] if `name` is
    /// empty or only whitespace.
    pub fn new(name: &str) -> Result<Self, Error> {
        let name = name.trim();

        if name.is_empty() {
            Err(Error::EmptyCategoryName)
        } else {
            Ok(Self(name.to_string()))
        }
    }

    /// Create a category name without validation.
    ///
    /// The caller should ensure that the string is not empty.
    pub fn new_unchecked(name: &str) -> Self {
        Self(name.to_string())
    }
}

impl AsRef<str> for CategoryName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl FromStr for CategoryName {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CategoryName::new(s)
    }
}

impl TryFrom<String> for CategoryName {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        CategoryName::new(&value)
    }
}

impl From<CategoryName> for String {
    fn from(value: CategoryName) -> Self {
        value.0
    }
}

impl Display for CategoryName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A named bucket of income or expenses used to classify transactions,
/// e.g. 'Groceries' or 'Salary'.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Hash)]
pub struct Category {
    pub id: CategoryId,
    pub name: CategoryName,
    #[serde(rename = "type")]
    pub category_type: TransactionType,
}

/// The payload for creating a category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewCategory {
    /// The name shown in the category selector.
    pub name: CategoryName,
    /// Whether the category groups income or expenses.
    #[serde(rename = "type")]
    pub category_type: TransactionType,
}

impl NewCategory {
    /// Attach an ID to the payload, producing the stored record.
    pub fn into_category(self, id: CategoryId) -> Category {
        Category {
            id,
            name: self.name,
            category_type: self.category_type,
        }
    }
}

/// Parses `NAME:TYPE`, e.g. "Groceries:expense".
impl FromStr for NewCategory {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (name, category_type) = s
            .rsplit_once(':')
            .ok_or_else(|| Error::InvalidCategorySpec(s.to_owned()))?;

        Ok(Self {
            name: CategoryName::new(name)?,
            category_type: category_type.trim().parse()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        Error,
        category::{CategoryName, NewCategory},
        transaction::TransactionType,
    };

    #[test]
    fn name_is_trimmed() {
        let name = CategoryName::new("  Groceries ").unwrap();

        assert_eq!(name.as_ref(), "Groceries");
    }

    #[test]
    fn empty_name_is_rejected() {
        assert_eq!(CategoryName::new(""), Err(Error::EmptyCategoryName));
        assert_eq!(CategoryName::new("   "), Err(Error::EmptyCategoryName));
    }

    #[test]
    fn deserializing_empty_name_fails() {
        let result = serde_json::from_str::<NewCategory>(r#"{"name": "", "type": "expense"}"#);

        assert!(result.is_err());
    }

    #[test]
    fn payload_uses_type_key() {
        let payload = NewCategory {
            name: CategoryName::new_unchecked("Salary"),
            category_type: TransactionType::Income,
        };

        let json = serde_json::to_value(&payload).unwrap();

        assert_eq!(json, serde_json::json!({"name": "Salary", "type": "income"}));
    }

    #[test]
    fn parses_name_and_type_pair() {
        let category: NewCategory = "Eating Out:expense".parse().unwrap();

        assert_eq!(category.name.as_ref(), "Eating Out");
        assert_eq!(category.category_type, TransactionType::Expense);
    }

    #[test]
    fn pair_without_type_is_rejected() {
        assert_eq!(
            "Groceries".parse::<NewCategory>(),
            Err(Error::InvalidCategorySpec("Groceries".to_owned()))
        );
        assert_eq!(
            "Groceries:snacks".parse::<NewCategory>(),
            Err(Error::InvalidTransactionType("snacks".to_owned()))
        );
    }
}
