//! Phone number utilities
//!
//! Used for log output only. Search requests always carry the caller's
//! phone number exactly as given.

use once_cell::sync::Lazy;
use regex::Regex;

// Chinese mobile phone number regex
static CHINA_MOBILE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^1[3-9]\d{9}$").expect("valid regex")
});

// International phone number regex (E.164 format)
static INTERNATIONAL_PHONE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\+[1-9]\d{1,14}$").expect("valid regex")
});

/// Strip formatting characters, keeping digits and '+'
fn digits_only(phone: &str) -> String {
    phone
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '+')
        .collect()
}

/// Check if a phone number looks like a Chinese mobile or E.164 number
pub fn looks_like_phone_number(phone: &str) -> bool {
    let digits = digits_only(phone);
    CHINA_MOBILE_REGEX.is_match(&digits) || INTERNATIONAL_PHONE_REGEX.is_match(&digits)
}

/// Mask a phone number for display (e.g., 138****5678)
pub fn mask_phone_number(phone: &str) -> String {
    let digits = digits_only(phone);
    if digits.len() >= 7 {
        format!("{}****{}", &digits[0..3], &digits[digits.len() - 4..])
    } else {
        "****".to_string()
    }
}
