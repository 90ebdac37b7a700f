//! Query redaction.
//!
//! Strips personally identifying patterns from the raw query before it
//! reaches retrieval, the generator, or the audit trail. Downstream
//! components assume the query they see is already redacted.

#![deny(unsafe_code)]
#![warn(rust_2018_idioms)]

use regex::Regex;

pub const REDACTED_EMAIL: &str = "[REDACTED_EMAIL]";
pub const REDACTED_SSN: &str = "[REDACTED_SSN]";
pub const REDACTED_PHONE: &str = "[REDACTED_PHONE]";

/// Compiled redaction patterns. Build once at startup and share.
pub struct Redactor {
    email: Regex,
    ssn: Regex,
    phone: Regex,
}

impl Redactor {
    pub fn new() -> Self {
        // Patterns are fixed literals; compilation cannot fail.
        Self {
            email: Regex::new(r"[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}")
                .expect("email pattern compiles"),
            ssn: Regex::new(r"\b\d{3}-\d{2}-\d{4}\b").expect("ssn pattern compiles"),
            phone: Regex::new(r"\b\d{10}\b").expect("phone pattern compiles"),
        }
    }

    /// Replace every email address, SSN and bare 10-digit phone number with
    /// its redaction marker. Everything else passes through untouched.
    pub fn redact(&self, text: &str) -> String {
        let text = self.email.replace_all(text, REDACTED_EMAIL);
        let text = self.ssn.replace_all(&text, REDACTED_SSN);
        self.phone.replace_all(&text, REDACTED_PHONE).into_owned()
    }
}

impl Default for Redactor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn redacts_email_addresses() {
        let redactor = Redactor::new();
        assert_eq!(
            redactor.redact("contact alice.smith+legal@example.co.uk please"),
            format!("contact {REDACTED_EMAIL} please")
        );
    }

    #[test]
    fn redacts_ssns() {
        let redactor = Redactor::new();
        assert_eq!(
            redactor.redact("my ssn is 123-45-6789."),
            format!("my ssn is {REDACTED_SSN}.")
        );
    }

    #[test]
    fn redacts_ten_digit_phones() {
        let redactor = Redactor::new();
        assert_eq!(
            redactor.redact("call 5551234567 now"),
            format!("call {REDACTED_PHONE} now")
        );
    }

    #[test]
    fn leaves_clean_text_untouched() {
        let redactor = Redactor::new();
        let query = "what is the termination clause in section 12.3?";
        assert_eq!(redactor.redact(query), query);
    }

    #[test]
    fn redacts_multiple_occurrences() {
        let redactor = Redactor::new();
        let out = redactor.redact("a@b.com and c@d.org, ssn 111-22-3333");
        assert_eq!(
            out,
            format!("{REDACTED_EMAIL} and {REDACTED_EMAIL}, ssn {REDACTED_SSN}")
        );
    }

    #[test]
    fn short_digit_runs_are_not_phones() {
        let redactor = Redactor::new();
        assert_eq!(redactor.redact("section 123456789"), "section 123456789");
    }
}
