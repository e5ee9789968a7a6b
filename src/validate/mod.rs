//! The validation pipeline.
//!
//! A rule is a pure function from an input value to a list of human-readable
//! failure messages; an empty list means the rule passed. Rules run
//! independently and their messages are concatenated in declaration order,
//! never short-circuited, so one round-trip can report a weak password *and*
//! a malformed email at once.
//!
//! The shipped rule sets live in [`email`] and [`password`]; the pipeline
//! itself only aggregates.
//!
//! # Example
//!
//! ```rust
//! use doorman::validate::{run_rules, EmailPolicy, PasswordPolicy, ValidationReport};
//!
//! let mut report = ValidationReport::new();
//! report.check("email", &EmailPolicy::default().rules(), "not-an-email");
//! report.check("password", &PasswordPolicy::default().rules(), "short");
//!
//! assert!(!report.is_valid());
//! assert_eq!(report.messages().len(), 2);
//! ```

pub mod email;
pub mod password;

pub use email::EmailPolicy;
pub use password::PasswordPolicy;

/// A single validation rule over one field.
pub type Rule = Box<dyn Fn(&str) -> Vec<String> + Send + Sync>;

/// Runs every rule against `input` and returns the ordered union of all
/// non-empty outputs, preserving rule-declaration order.
#[must_use]
pub fn run_rules(rules: &[Rule], input: &str) -> Vec<String> {
    rules.iter().flat_map(|rule| rule(input)).collect()
}

/// Aggregated failure messages per field for one request.
///
/// Constructed fresh per request, never persisted.
#[derive(Debug, Default)]
pub struct ValidationReport {
    fields: Vec<(&'static str, Vec<String>)>,
}

impl ValidationReport {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs `rules` against `input` and records the outcome under `field`.
    pub fn check(&mut self, field: &'static str, rules: &[Rule], input: &str) {
        let messages = run_rules(rules, input);
        if !messages.is_empty() {
            self.fields.push((field, messages));
        }
    }

    /// True when every checked field passed every rule.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.fields.is_empty()
    }

    /// All failure messages, in field-then-rule declaration order.
    #[must_use]
    pub fn messages(&self) -> Vec<&str> {
        self.fields
            .iter()
            .flat_map(|(_, messages)| messages.iter().map(String::as_str))
            .collect()
    }

    /// Failure messages for one field; empty when the field is valid.
    #[must_use]
    pub fn field_messages(&self, field: &str) -> Vec<&str> {
        self.fields
            .iter()
            .filter(|(name, _)| *name == field)
            .flat_map(|(_, messages)| messages.iter().map(String::as_str))
            .collect()
    }

    /// Joins every message into one display string.
    #[must_use]
    pub fn joined(&self, separator: &str) -> String {
        self.messages().join(separator)
    }
}
