use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Regex for validating username fields
    /// Letters, digits and `@ . + - _`
    /// - Valid: "ops", "john.doe", "user+1@moh", "district_officer"
    /// - Invalid: "user name", "user/1", "ram!"
    pub static ref USERNAME_REGEX: Regex = Regex::new(r"^[\w.@+-]+$").unwrap();

    /// Regex for phone-like contact fields: digits with optional leading `+`,
    /// spaces and hyphens
    pub static ref CONTACT_REGEX: Regex = Regex::new(r"^\+?[0-9][0-9 \-]{2,19}$").unwrap();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_username_regex_valid() {
        assert!(USERNAME_REGEX.is_match("ops"));
        assert!(USERNAME_REGEX.is_match("john.doe"));
        assert!(USERNAME_REGEX.is_match("user+1@moh"));
        assert!(USERNAME_REGEX.is_match("district_officer"));
        assert!(USERNAME_REGEX.is_match("a-b"));
    }

    #[test]
    fn test_username_regex_invalid() {
        assert!(!USERNAME_REGEX.is_match("user name")); // space
        assert!(!USERNAME_REGEX.is_match("user/1")); // slash
        assert!(!USERNAME_REGEX.is_match("ram!")); // bang
        assert!(!USERNAME_REGEX.is_match("")); // empty
    }

    #[test]
    fn test_contact_regex() {
        assert!(CONTACT_REGEX.is_match("9841000000"));
        assert!(CONTACT_REGEX.is_match("+977 1-4200000"));
        assert!(!CONTACT_REGEX.is_match("call me"));
        assert!(!CONTACT_REGEX.is_match("12"));
    }
}
