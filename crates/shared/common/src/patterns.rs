//! Compiled regular expressions for request validation.

use once_cell::sync::Lazy;
use regex::Regex;

use domain::{MATRICULE_PATTERN, PHONE_PATTERN};

/// Staff registration number, e.g. `EMP12345`.
pub static MATRICULE_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(MATRICULE_PATTERN).expect("valid matricule regex"));

/// Ten digit phone number.
pub static PHONE_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(PHONE_PATTERN).expect("valid phone regex"));

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matricule_pattern() {
        assert!(MATRICULE_REGEX.is_match("EMP12345"));
        assert!(MATRICULE_REGEX.is_match("A1B2C3"));
        assert!(!MATRICULE_REGEX.is_match("emp12345"));
        assert!(!MATRICULE_REGEX.is_match("ABC12"));
        assert!(!MATRICULE_REGEX.is_match("ABCDEFGHIJK"));
    }

    #[test]
    fn test_phone_pattern() {
        assert!(PHONE_REGEX.is_match("0612345678"));
        assert!(!PHONE_REGEX.is_match("061234567"));
        assert!(!PHONE_REGEX.is_match("06-12-34-56"));
    }
}
