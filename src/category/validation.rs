//! Validation of category requests and the mapping of rule violations to business errors.

use std::fmt::Display;

use thiserror::Error;

use crate::{
    category::{CategoryName, CategoryRequest, NewCategory},
    error_code::ErrorCode,
    user::{User, UserID, UserStatus},
    validation_rules::{CATEGORY_NAME_MAX_LENGTH, has_valid_category_name_chars},
};

/// A single rule that a category request broke.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuleViolation {
    /// The request did not include a name.
    #[error("a category name is required")]
    MissingName,

    /// The name was empty or only contained spaces.
    #[error("a category name cannot be empty")]
    EmptyName,

    /// The name has more characters than [CATEGORY_NAME_MAX_LENGTH].
    #[error("the category name has {0} characters, the maximum is {CATEGORY_NAME_MAX_LENGTH}")]
    NameTooLong(usize),

    /// The name used something other than ASCII letters, digits and spaces.
    #[error("a category name may only contain letters, digits and spaces")]
    NameHasInvalidCharacters,

    /// The request did not include a category type.
    #[error("a category type is required")]
    MissingType,

    /// The request did not include the owner's user ID.
    #[error("the ID of the user that owns the category is required")]
    MissingOwner,

    /// The owner's user ID does not belong to a registered user.
    #[error("the user {0} does not exist")]
    UnknownOwner(UserID),

    /// The caller may not create categories for the owner.
    #[error("the user {0} may not own this category")]
    OwnerNotPermitted(UserID),

    /// The request body could not be read as a category request.
    #[error("the request body is not a valid category: {0}")]
    MalformedBody(String),
}

impl RuleViolation {
    /// The name of the request field the rule applies to.
    pub fn field(&self) -> &'static str {
        match self {
            RuleViolation::MissingName
            | RuleViolation::EmptyName
            | RuleViolation::NameTooLong(_)
            | RuleViolation::NameHasInvalidCharacters => "name",
            RuleViolation::MissingType => "type",
            RuleViolation::MissingOwner
            | RuleViolation::UnknownOwner(_)
            | RuleViolation::OwnerNotPermitted(_) => "userId",
            RuleViolation::MalformedBody(_) => "body",
        }
    }
}

/// Every rule a category request broke, in field order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationFailure(pub Vec<RuleViolation>);

impl ValidationFailure {
    /// The business error reported to the client.
    ///
    /// Every failure maps to [ErrorCode::TEA003] no matter which rules were
    /// broken, field level details only go to the logs.
    pub fn error_code(&self) -> ErrorCode {
        ErrorCode::TEA003
    }

    /// The rules that were broken.
    pub fn violations(&self) -> &[RuleViolation] {
        &self.0
    }
}

impl Display for ValidationFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut violations = self.0.iter();

        if let Some(first) = violations.next() {
            write!(f, "{}: {first}", first.field())?;
        }

        for violation in violations {
            write!(f, "; {}: {violation}", violation.field())?;
        }

        Ok(())
    }
}

impl std::error::Error for ValidationFailure {}

/// Check a category request before anything is stored.
///
/// `caller` is the authenticated user making the request and `owner` is the
/// user referenced by `request.user_id`, or `None` if no such user exists.
/// The owner must be the caller and must not be banned.
///
/// All broken rules are collected rather than stopping at the first.
///
/// # Errors
///
/// Returns a [ValidationFailure] listing every broken rule.
pub fn validate_category_request(
    request: &CategoryRequest,
    caller: UserID,
    owner: Option<&User>,
) -> Result<NewCategory, ValidationFailure> {
    let mut violations = Vec::new();

    let name = match &request.name {
        Some(name) => {
            let name_violations = check_name(name);
            let is_valid = name_violations.is_empty();
            violations.extend(name_violations);

            is_valid.then(|| CategoryName::new_unchecked(name))
        }
        None => {
            violations.push(RuleViolation::MissingName);
            None
        }
    };

    if request.category_type.is_none() {
        violations.push(RuleViolation::MissingType);
    }

    match request.user_id {
        None => violations.push(RuleViolation::MissingOwner),
        Some(user_id) => match owner {
            Some(owner) if owner.id != caller || owner.status == UserStatus::Banned => {
                violations.push(RuleViolation::OwnerNotPermitted(user_id))
            }
            Some(_) => {}
            None => violations.push(RuleViolation::UnknownOwner(user_id)),
        },
    }

    match (name, request.category_type, request.user_id) {
        (Some(name), Some(category_type), Some(user_id)) if violations.is_empty() => {
            Ok(NewCategory {
                name,
                category_type,
                user_id,
            })
        }
        _ => Err(ValidationFailure(violations)),
    }
}

fn check_name(name: &str) -> Vec<RuleViolation> {
    if name.trim_matches(' ').is_empty() {
        return vec![RuleViolation::EmptyName];
    }

    let mut violations = Vec::new();

    let length = name.chars().count();
    if length > CATEGORY_NAME_MAX_LENGTH {
        violations.push(RuleViolation::NameTooLong(length));
    }

    if !has_valid_category_name_chars(name) {
        violations.push(RuleViolation::NameHasInvalidCharacters);
    }

    violations
}
