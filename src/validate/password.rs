use super::Rule;

/// Password validation rules.
///
/// Builder-style configuration; each enabled constraint becomes one pipeline
/// [`Rule`], so a weak password reports every violated constraint at once.
///
/// # Examples
///
/// ```
/// use doorman::validate::PasswordPolicy;
///
/// // Default policy: 8-128 characters, no character-class requirements
/// let policy = PasswordPolicy::default();
/// assert!(policy.check("password123").is_empty());
///
/// // Strict policy: 12+ chars, uppercase, lowercase, digit, special char
/// let strict = PasswordPolicy::strict();
/// assert!(strict.check("MyP@ssw0rd123").is_empty());
/// assert!(!strict.check("weak").is_empty());
/// ```
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone)]
pub struct PasswordPolicy {
    /// Minimum password length (default: 8)
    pub min_length: usize,
    /// Maximum password length (default: 128)
    pub max_length: usize,
    /// Require at least one uppercase letter
    pub require_uppercase: bool,
    /// Require at least one lowercase letter
    pub require_lowercase: bool,
    /// Require at least one digit
    pub require_digit: bool,
    /// Require at least one special character
    pub require_special: bool,
}

impl Default for PasswordPolicy {
    fn default() -> Self {
        Self {
            min_length: 8,
            max_length: 128,
            require_uppercase: false,
            require_lowercase: false,
            require_digit: false,
            require_special: false,
        }
    }
}

impl PasswordPolicy {
    /// Creates a new password policy with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a strict password policy suitable for production.
    ///
    /// Requirements:
    /// - Minimum 12 characters
    /// - At least one uppercase letter
    /// - At least one lowercase letter
    /// - At least one digit
    /// - At least one special character
    #[must_use]
    pub fn strict() -> Self {
        Self {
            min_length: 12,
            max_length: 128,
            require_uppercase: true,
            require_lowercase: true,
            require_digit: true,
            require_special: true,
        }
    }

    /// Sets the minimum password length.
    #[must_use]
    pub fn min(mut self, len: usize) -> Self {
        self.min_length = len;
        self
    }

    /// Sets the maximum password length.
    #[must_use]
    pub fn max(mut self, len: usize) -> Self {
        self.max_length = len;
        self
    }

    /// Requires at least one uppercase letter.
    #[must_use]
    pub fn require_uppercase(mut self) -> Self {
        self.require_uppercase = true;
        self
    }

    /// Requires at least one lowercase letter.
    #[must_use]
    pub fn require_lowercase(mut self) -> Self {
        self.require_lowercase = true;
        self
    }

    /// Requires at least one digit.
    #[must_use]
    pub fn require_digit(mut self) -> Self {
        self.require_digit = true;
        self
    }

    /// Requires at least one special character.
    #[must_use]
    pub fn require_special(mut self) -> Self {
        self.require_special = true;
        self
    }

    /// Builds the rule set for this policy, in declaration order.
    #[must_use]
    pub fn rules(&self) -> Vec<Rule> {
        let min_length = self.min_length;
        let max_length = self.max_length;

        let mut rules: Vec<Rule> = vec![
            Box::new(|password: &str| {
                if password.is_empty() {
                    vec!["Password cannot be empty".to_owned()]
                } else {
                    vec![]
                }
            }),
            Box::new(move |password: &str| {
                if !password.is_empty() && password.len() < min_length {
                    vec![format!("Password must be at least {min_length} characters")]
                } else {
                    vec![]
                }
            }),
            Box::new(move |password: &str| {
                if password.len() > max_length {
                    vec![format!("Password is too long (max {max_length} characters)")]
                } else {
                    vec![]
                }
            }),
        ];

        if self.require_uppercase {
            rules.push(Box::new(|password: &str| {
                if password.chars().any(char::is_uppercase) {
                    vec![]
                } else {
                    vec!["Password must contain an uppercase letter".to_owned()]
                }
            }));
        }

        if self.require_lowercase {
            rules.push(Box::new(|password: &str| {
                if password.chars().any(char::is_lowercase) {
                    vec![]
                } else {
                    vec!["Password must contain a lowercase letter".to_owned()]
                }
            }));
        }

        if self.require_digit {
            rules.push(Box::new(|password: &str| {
                if password.chars().any(|c| c.is_ascii_digit()) {
                    vec![]
                } else {
                    vec!["Password must contain a digit".to_owned()]
                }
            }));
        }

        if self.require_special {
            rules.push(Box::new(|password: &str| {
                if password.chars().any(is_special_char) {
                    vec![]
                } else {
                    vec!["Password must contain a special character".to_owned()]
                }
            }));
        }

        rules
    }

    /// Runs the policy against one password.
    #[must_use]
    pub fn check(&self, password: &str) -> Vec<String> {
        super::run_rules(&self.rules(), password)
    }
}

/// Checks if a character is a special character.
fn is_special_char(c: char) -> bool {
    matches!(
        c,
        '!' | '@'
            | '#'
            | '$'
            | '%'
            | '^'
            | '&'
            | '*'
            | '('
            | ')'
            | '_'
            | '+'
            | '-'
            | '='
            | '['
            | ']'
            | '{'
            | '}'
            | '|'
            | ';'
            | ':'
            | ','
            | '.'
            | '<'
            | '>'
            | '?'
            | '/'
            | '`'
            | '~'
            | '\''
            | '"'
            | '\\'
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_policy_valid_passwords() {
        let policy = PasswordPolicy::default();
        assert!(policy.check("password123").is_empty());
        assert!(policy.check("12345678").is_empty());
        assert!(policy.check("a]b@c#d$e%f^g&h*").is_empty());
    }

    #[test]
    fn test_empty_password() {
        let policy = PasswordPolicy::default();
        assert_eq!(policy.check(""), vec!["Password cannot be empty"]);
    }

    #[test]
    fn test_too_short() {
        let policy = PasswordPolicy::default();
        assert_eq!(
            policy.check("1234567"),
            vec!["Password must be at least 8 characters"]
        );
    }

    #[test]
    fn test_too_long() {
        let policy = PasswordPolicy::default();
        let long_password = "a".repeat(129);
        assert_eq!(
            policy.check(&long_password),
            vec!["Password is too long (max 128 characters)"]
        );
    }

    #[test]
    fn test_strict_policy_aggregates_all_failures() {
        let policy = PasswordPolicy::strict();
        let messages = policy.check("abc");
        // Short, no uppercase, no digit, no special: all reported at once
        assert_eq!(
            messages,
            vec![
                "Password must be at least 12 characters",
                "Password must contain an uppercase letter",
                "Password must contain a digit",
                "Password must contain a special character",
            ]
        );
    }

    #[test]
    fn test_strict_policy_valid() {
        let policy = PasswordPolicy::strict();
        assert!(policy.check("MyP@ssw0rd123").is_empty());
    }

    #[test]
    fn test_builder() {
        let policy = PasswordPolicy::new().min(10).require_digit();
        assert!(!policy.check("abcdefghij").is_empty());
        assert!(policy.check("abcdefghi1").is_empty());
    }
}
