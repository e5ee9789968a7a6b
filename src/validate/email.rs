use std::sync::LazyLock;

use regex::Regex;

use super::Rule;

static EMAIL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").unwrap());

/// Email validation rules.
///
/// Each constraint is one pipeline [`Rule`], so a bad input reports every
/// violated constraint rather than the first.
#[derive(Debug, Clone)]
pub struct EmailPolicy {
    /// Maximum email length (default: 254, per RFC 5321)
    pub max_length: usize,
}

impl Default for EmailPolicy {
    fn default() -> Self {
        Self { max_length: 254 }
    }
}

impl EmailPolicy {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the rule set for this policy, in declaration order.
    #[must_use]
    pub fn rules(&self) -> Vec<Rule> {
        let max_length = self.max_length;

        vec![
            Box::new(|email: &str| {
                if email.is_empty() {
                    vec!["Email cannot be empty".to_owned()]
                } else {
                    vec![]
                }
            }),
            Box::new(move |email: &str| {
                if email.len() > max_length {
                    vec![format!("Email is too long (max {max_length} characters)")]
                } else {
                    vec![]
                }
            }),
            Box::new(|email: &str| {
                if !email.is_empty() && !EMAIL_REGEX.is_match(email) {
                    vec!["Invalid email format".to_owned()]
                } else {
                    vec![]
                }
            }),
        ]
    }

    /// Runs the policy against one email.
    #[must_use]
    pub fn check(&self, email: &str) -> Vec<String> {
        super::run_rules(&self.rules(), email)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_emails() {
        let policy = EmailPolicy::default();
        assert!(policy.check("user@example.com").is_empty());
        assert!(policy.check("user.name@example.com").is_empty());
        assert!(policy.check("user+tag@example.com").is_empty());
        assert!(policy.check("user@subdomain.example.com").is_empty());
    }

    #[test]
    fn test_empty_email() {
        let policy = EmailPolicy::default();
        assert_eq!(policy.check(""), vec!["Email cannot be empty"]);
    }

    #[test]
    fn test_invalid_format() {
        let policy = EmailPolicy::default();
        assert_eq!(policy.check("notanemail"), vec!["Invalid email format"]);
        assert_eq!(policy.check("missing@domain"), vec!["Invalid email format"]);
        assert_eq!(policy.check("@nodomain.com"), vec!["Invalid email format"]);
        assert_eq!(
            policy.check("spaces in@email.com"),
            vec!["Invalid email format"]
        );
    }

    #[test]
    fn test_too_long_reports_both_violations() {
        let policy = EmailPolicy::default();
        let long_email = format!("{}@@example.com", "a".repeat(250));
        let messages = policy.check(&long_email);
        assert_eq!(
            messages,
            vec![
                "Email is too long (max 254 characters)",
                "Invalid email format"
            ]
        );
    }
}
