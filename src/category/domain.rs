//! Core category domain types.

use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{Error, user::UserID};

/// Database identifier for a category.
pub type CategoryId = i64;

/// Whether a category groups money coming in or going out.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CategoryType {
    /// Money coming in, e.g. wages.
    Income,
    /// Money going out, e.g. groceries.
    Expense,
}

impl CategoryType {
    /// The string stored in the database for this type.
    pub fn as_str(&self) -> &'static str {
        match self {
            CategoryType::Income => "INCOME",
            CategoryType::Expense => "EXPENSE",
        }
    }
}

impl FromStr for CategoryType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "INCOME" => Ok(CategoryType::Income),
            "EXPENSE" => Ok(CategoryType::Expense),
            other => Err(Error::InvalidCategoryType(other.to_owned())),
        }
    }
}

impl Display for CategoryType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A category name that passed validation.
///
/// Only [validate_category_request](super::validate_category_request) and the
/// database layer construct these, so it is serialised but never deserialised.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Hash)]
pub struct CategoryName(String);

impl CategoryName {
    /// Create a category name without validation.
    ///
    /// The caller should ensure that the name follows the category name rules.
    ///
    /// This function has `_unchecked` in the name but is not `unsafe`, because if the invariant is violated it will cause incorrect behaviour but not affect memory safety.
    pub fn new_unchecked(name: &str) -> Self {
        Self(name.to_owned())
    }
}

impl AsRef<str> for CategoryName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Display for CategoryName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A category for grouping income and expenses, e.g., 'Groceries', 'Eating Out', 'Wages'.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Hash)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    /// The ID of the category.
    pub id: CategoryId,
    /// The name of the category.
    pub name: CategoryName,
    /// Whether the category is for income or expenses.
    #[serde(rename = "type")]
    pub category_type: CategoryType,
    /// The ID of the user that owns the category.
    pub user_id: UserID,
}

/// A category that has been validated but not yet stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCategory {
    pub name: CategoryName,
    pub category_type: CategoryType,
    pub user_id: UserID,
}

/// The JSON body for creating or updating a category.
///
/// Every field is optional so that missing or null values are reported as
/// validation failures instead of being rejected by the JSON extractor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryRequest {
    /// The name to give the category.
    pub name: Option<String>,
    /// `"INCOME"` or `"EXPENSE"`.
    #[serde(rename = "type")]
    pub category_type: Option<CategoryType>,
    /// The ID of the user that will own the category, sent as `userId` or `ownerId`.
    #[serde(alias = "ownerId")]
    pub user_id: Option<UserID>,
}


#[cfg(test)]
mod category_request_tests {
    use crate::{
        category::{CategoryRequest, CategoryType},
        user::UserID,
    };

    #[test]
    fn deserialises_wire_names() {
        let request: CategoryRequest =
            serde_json::from_str(r#"{"name":"Category","type":"INCOME","userId":1}"#).unwrap();

        assert_eq!(
            request,
            CategoryRequest {
                name: Some("Category".to_owned()),
                category_type: Some(CategoryType::Income),
                user_id: Some(UserID::new(1)),
            }
        );
    }

    #[test]
    fn null_and_missing_fields_deserialise_to_none() {
        let request: CategoryRequest =
            serde_json::from_str(r#"{"name":null,"type":null}"#).unwrap();

        assert_eq!(request, CategoryRequest::default());
    }

    #[test]
    fn accepts_owner_id_alias() {
        let request: CategoryRequest = serde_json::from_str(r#"{"ownerId":7}"#).unwrap();

        assert_eq!(request.user_id, Some(UserID::new(7)));
    }
}
