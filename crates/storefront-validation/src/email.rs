//! Email shape check

use once_cell::sync::Lazy;
use regex::Regex;

/// `local@domain.tld`: no whitespace anywhere, exactly one `@`, and a dot in
/// the domain with something on both sides of it.
static EMAIL_SHAPE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email regex is valid"));

/// Validates the basic shape of an email address.
///
/// This is deliberately loose: it rejects obvious typos (`bob@`,
/// `bob@example`, `bob smith@example.com`) and leaves deliverability to the
/// server.
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_SHAPE.is_match(&email.to_lowercase())
}
