//! Typed request shapes for the form endpoints.
//!
//! The web layer deserializes the urlencoded body into one of the raw form
//! structs below; `into_request` is the explicit shape check that either
//! yields the typed request the flow works with or a [`ShapeError`] naming
//! every missing field (422-style, re-render the form).
//!
//! Sign-in has its own shape: it carries no consent checkbox and must not be
//! parsed against the sign-up schema.

use std::fmt;

use serde::Deserialize;

use crate::SecretString;

/// The literal value an HTML checkbox submits when ticked.
const CHECKBOX_AFFIRMATIVE: &str = "on";

/// Raw `POST /account/signup` body.
#[derive(Debug, Clone, Deserialize)]
pub struct SignupForm {
    pub email: Option<String>,
    pub password: Option<SecretString>,
    pub agreed_to_terms: Option<String>,
}

/// A shape-checked sign-up request.
#[derive(Debug, Clone)]
pub struct SignupRequest {
    pub email: String,
    pub password: SecretString,
    /// True only when the consent checkbox carried its affirmative literal.
    pub agreed_to_terms: bool,
}

impl SignupForm {
    /// Shape check: both credentials must be present. Consent absence is not
    /// a shape failure; the flow rejects it separately with its own message.
    ///
    /// # Errors
    ///
    /// Returns a [`ShapeError`] listing every missing field.
    pub fn into_request(self) -> Result<SignupRequest, ShapeError> {
        let mut missing = Vec::new();
        if self.email.is_none() {
            missing.push("email");
        }
        if self.password.is_none() {
            missing.push("password");
        }
        if !missing.is_empty() {
            return Err(ShapeError { missing });
        }

        #[allow(clippy::unwrap_used)] // presence checked above
        Ok(SignupRequest {
            email: self.email.unwrap(),
            password: self.password.unwrap(),
            agreed_to_terms: self.agreed_to_terms.as_deref() == Some(CHECKBOX_AFFIRMATIVE),
        })
    }
}

/// Raw `POST /account/signin` body.
#[derive(Debug, Clone, Deserialize)]
pub struct SigninForm {
    pub email: Option<String>,
    pub password: Option<SecretString>,
}

/// A shape-checked sign-in request.
#[derive(Debug, Clone)]
pub struct SigninRequest {
    pub email: String,
    pub password: SecretString,
}

impl SigninForm {
    /// Shape check against the sign-in schema.
    ///
    /// # Errors
    ///
    /// Returns a [`ShapeError`] listing every missing field.
    pub fn into_request(self) -> Result<SigninRequest, ShapeError> {
        let mut missing = Vec::new();
        if self.email.is_none() {
            missing.push("email");
        }
        if self.password.is_none() {
            missing.push("password");
        }
        if !missing.is_empty() {
            return Err(ShapeError { missing });
        }

        #[allow(clippy::unwrap_used)] // presence checked above
        Ok(SigninRequest {
            email: self.email.unwrap(),
            password: self.password.unwrap(),
        })
    }
}

/// A request body that does not match the expected schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShapeError {
    pub missing: Vec<&'static str>,
}

impl ShapeError {
    /// One message per missing field, in schema order.
    #[must_use]
    pub fn messages(&self) -> Vec<String> {
        self.missing
            .iter()
            .map(|field| format!("Missing form field: {field}"))
            .collect()
    }
}

impl fmt::Display for ShapeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "missing form fields: {}", self.missing.join(", "))
    }
}

impl std::error::Error for ShapeError {}
