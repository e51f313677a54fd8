//! Email and phone format checks applied before anything reaches the store.
//!
//! Both patterns are anchored so they only accept a full-string match.

use regex::Regex;
use std::sync::OnceLock;

/// Alphanumeric local-part segments joined by a separator, `@`, a domain label, and one or more
/// alphabetic TLDs of at least two characters.
///
/// `[.-_]` is the character range `.` to `_`, and `[A-Z|a-z]` also admits `|`.
pub const EMAIL_PATTERN: &str =
    r"^(?:([A-Za-z0-9]+[.-_])*[A-Za-z0-9]+@[A-Za-z0-9-]+(\.[A-Z|a-z]{2,})+)$";

/// Ten-digit North American number in 3-3-4 groups, optional parenthesised
/// area code, optional `-`, `.` or space separators.
pub const PHONE_PATTERN: &str = r"^(?:\(?([0-9]{3})\)?[-. ]?([0-9]{3})[-. ]?([0-9]{4}))$";

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();
static PHONE_RE: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| Regex::new(EMAIL_PATTERN).expect("email pattern is valid"))
}

fn phone_regex() -> &'static Regex {
    PHONE_RE.get_or_init(|| Regex::new(PHONE_PATTERN).expect("phone pattern is valid"))
}

pub fn is_email_valid(email: &str) -> bool {
    email_regex().is_match(email)
}

pub fn is_phone_valid(phone: &str) -> bool {
    phone_regex().is_match(phone)
}
