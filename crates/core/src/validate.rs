//! Field validation for complaint intake
//!
//! Validators are deliberately forgiving about formatting: phone numbers are
//! normalized by stripping separators before the digit-count check.

use once_cell::sync::Lazy;
use regex::Regex;

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$").unwrap()
});

/// Check email format
pub fn validate_email(email: &str) -> bool {
    EMAIL_RE.is_match(email.trim())
}

/// Normalize a phone number: strip every non-digit character and accept
/// 10 digits (mobile) up to 12 (with country code). Returns the digit
/// string on success.
pub fn normalize_phone(phone: &str) -> Option<String> {
    let digits: String = phone.chars().filter(|c| c.is_ascii_digit()).collect();
    if (10..=12).contains(&digits.len()) {
        Some(digits)
    } else {
        None
    }
}

/// Check phone number format
pub fn validate_phone(phone: &str) -> bool {
    normalize_phone(phone).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_validation() {
        assert!(validate_email("john.doe@ietlucknow.ac.in"));
        assert!(validate_email("a_b+c@example.co"));
        assert!(!validate_email("plainaddress"));
        assert!(!validate_email("missing@tld"));
        assert!(!validate_email("@example.com"));
    }

    #[test]
    fn test_phone_normalization() {
        assert_eq!(normalize_phone("9876543210").as_deref(), Some("9876543210"));
        assert_eq!(
            normalize_phone("+91 98765 43210").as_deref(),
            Some("919876543210")
        );
        assert_eq!(normalize_phone("98-76-54-32-10").as_deref(), Some("9876543210"));
        assert!(normalize_phone("12345").is_none());
        assert!(normalize_phone("1234567890123").is_none());
    }

    #[test]
    fn test_phone_validation() {
        assert!(validate_phone("9876543210"));
        assert!(!validate_phone("call me maybe"));
    }
}
