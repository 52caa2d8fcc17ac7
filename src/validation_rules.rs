//! Stateless validation rules for passwords, email addresses and category names.
//!
//! The patterns are compiled once on first use and never mutated afterwards.

use std::sync::LazyLock;

use regex::Regex;

/// The symbols a password may contain, at least one of which is required.
pub const PASSWORD_SYMBOLS: &str = "!@#$%^&*?";

/// The minimum number of characters in a password.
pub const PASSWORD_MIN_LENGTH: usize = 8;

/// The maximum number of characters in a password.
pub const PASSWORD_MAX_LENGTH: usize = 100;

/// The maximum number of characters in a category name.
pub const CATEGORY_NAME_MAX_LENGTH: usize = 30;

// The regex crate does not support look-around, so each required character
// class of a password is checked with its own pattern.
static PASSWORD_CHARSET: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9!@#$%^&*?]{8,100}$").expect("password charset pattern is valid")
});
static UPPERCASE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("[A-Z]").expect("uppercase pattern is valid"));
static LOWERCASE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("[a-z]").expect("lowercase pattern is valid"));
static DIGIT: LazyLock<Regex> = LazyLock::new(|| Regex::new("[0-9]").expect("digit pattern is valid"));
static SYMBOL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("[!@#$%^&*?]").expect("symbol pattern is valid"));

static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9_.-]+@([A-Za-z0-9_-]+\.)+[A-Za-z0-9_-]{2,4}$")
        .expect("email pattern is valid")
});

static CATEGORY_NAME_CHARSET: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("^[A-Za-z0-9 ]*$").expect("category name pattern is valid"));

/// Check that `password` has an uppercase letter, a lowercase letter, a digit
/// and one of [PASSWORD_SYMBOLS], and is made up of only those characters with
/// a length between [PASSWORD_MIN_LENGTH] and [PASSWORD_MAX_LENGTH] inclusive.
pub fn is_strong_password(password: &str) -> bool {
    PASSWORD_CHARSET.is_match(password)
        && UPPERCASE.is_match(password)
        && LOWERCASE.is_match(password)
        && DIGIT.is_match(password)
        && SYMBOL.is_match(password)
}

/// Check that `email` looks like `local@domain.tld` without any whitespace.
pub fn is_valid_email(email: &str) -> bool {
    EMAIL.is_match(email)
}

/// Check that `name` only uses ASCII letters, digits and spaces.
///
/// An empty string passes this check, length is checked separately.
pub fn has_valid_category_name_chars(name: &str) -> bool {
    CATEGORY_NAME_CHARSET.is_match(name)
}
