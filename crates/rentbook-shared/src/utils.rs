//! Utility functions

use once_cell::sync::Lazy;
use regex::Regex;

static MOBILE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^91[0-9]{10}$").expect("valid mobile pattern"));

static MONTH_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{4}-[0-9]{2}$").expect("valid month pattern"));

/// `91` followed by exactly ten ASCII digits.
pub fn is_valid_mobile(mobile: &str) -> bool {
    MOBILE_PATTERN.is_match(mobile)
}

/// `YYYY-MM`, shape only.
pub fn is_valid_month(month: &str) -> bool {
    MONTH_PATTERN.is_match(month)
}

/// Expects a validated mobile number; anything of four chars or fewer is fully hidden.
pub fn mask_mobile(mobile: &str) -> String {
    let digits: Vec<char> = mobile.chars().collect();
    if digits.len() <= 4 {
        return "***".to_string();
    }
    let tail: String = digits[digits.len() - 2..].iter().collect();
    let head: String = digits[..2].iter().collect();
    format!("{}******{}", head, tail)
}
