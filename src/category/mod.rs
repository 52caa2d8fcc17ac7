//! Categories for grouping a user's income and expenses.

mod create;
mod db;
mod delete;
mod domain;
mod edit;
mod read;
mod validation;

pub use create::{create_category_endpoint, validate_and_create_category};
pub use db::{
    count_categories, create_category, create_category_table, delete_category,
    get_categories_for_user, get_category, update_category,
};
pub use delete::delete_category_endpoint;
pub use domain::{Category, CategoryId, CategoryName, CategoryRequest, CategoryType, NewCategory};
pub use edit::{update_category_endpoint, validate_and_update_category};
pub use read::{get_category_endpoint, list_categories_endpoint};
pub use validation::{RuleViolation, ValidationFailure, validate_category_request};
