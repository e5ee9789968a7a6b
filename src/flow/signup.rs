//! The sign-up transition.

use chrono::Utc;

use super::{messages, AuthFlow, FormOutcome};
use crate::forms::{SignupForm, SignupRequest};
use crate::repository::{SessionRepository, UserRepository};
use crate::response::{Response, LANDING_PAGE, SIGNUP_PAGE};
use crate::validate::ValidationReport;
use crate::AuthError;

impl<U, S> AuthFlow<U, S>
where
    U: UserRepository,
    S: SessionRepository,
{
    /// Handles `POST /account/signup`.
    ///
    /// Shape failure and missing consent reject the body outright (re-render
    /// the form); validation failures, duplicate emails, and store failures
    /// redirect back to the signup page with a flash message; success sets
    /// the session cookie and redirects to the landing page.
    #[cfg_attr(feature = "tracing", tracing::instrument(name = "signup", skip_all))]
    pub async fn signup(&self, form: SignupForm) -> FormOutcome {
        let request = match form.into_request() {
            Ok(request) => request,
            Err(shape) => return FormOutcome::rejected(shape.messages()),
        };

        if !request.agreed_to_terms {
            return FormOutcome::rejected(vec![messages::TERMS_REQUIRED.to_owned()]);
        }

        let mut report = ValidationReport::new();
        report.check("email", &self.email_policy().rules(), &request.email);
        report.check(
            "password",
            &self.password_policy().rules(),
            request.password.expose_secret(),
        );
        if !report.is_valid() {
            return FormOutcome::Redirect(
                Response::redirect(SIGNUP_PAGE)
                    .with_flash(report.joined("; "), self.cookies_secure()),
            );
        }

        match self.signup_inner(&request).await {
            Ok(response) => FormOutcome::Redirect(response),
            Err(AuthError::DuplicateEmail) => FormOutcome::Redirect(
                Response::redirect(SIGNUP_PAGE)
                    .with_flash(messages::DUPLICATE_EMAIL, self.cookies_secure()),
            ),
            Err(e) => {
                log::error!(target: "doorman::flow", "msg=\"signup failed\", error=\"{e}\"");
                FormOutcome::Redirect(self.failure(SIGNUP_PAGE))
            }
        }
    }

    async fn signup_inner(&self, request: &SignupRequest) -> Result<Response, AuthError> {
        let hashed = self.hash_blocking(request.password.clone()).await?;

        let user = self
            .bounded(self.users().create_user(&request.email, &hashed, true))
            .await?;

        let expires_at = Utc::now() + self.config().session_lifetime;
        let token = self.bounded(self.sessions().create(user.id, expires_at)).await?;

        log::info!(target: "doorman::flow", "msg=\"signup success\", user_id={}", user.id);

        Ok(Response::redirect(LANDING_PAGE).with_cookie(self.session_cookie_op(&token)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flow::test_support::mock_flow;
    use crate::response::CookieOp;
    use crate::response::SESSION_COOKIE;
    use crate::SecretString;

    fn valid_form() -> SignupForm {
        SignupForm {
            email: Some("a@x.com".to_owned()),
            password: Some(SecretString::new("Str0ng!Pass")),
            agreed_to_terms: Some("on".to_owned()),
        }
    }

    #[tokio::test]
    async fn test_signup_success_sets_session_and_redirects_to_landing() {
        let flow = mock_flow();

        let outcome = flow.signup(valid_form()).await;
        let FormOutcome::Redirect(response) = outcome else {
            panic!("expected redirect");
        };

        assert_eq!(response.redirect, LANDING_PAGE);
        assert!(response
            .cookies
            .iter()
            .any(|op| matches!(op, CookieOp::Set { name, .. } if *name == SESSION_COOKIE)));

        // The user exists and never stores the plaintext
        let user = flow
            .users()
            .find_user_by_email("a@x.com")
            .await
            .unwrap()
            .unwrap();
        assert!(user.agreed_to_terms);
        assert_ne!(user.hashed_password, "Str0ng!Pass");
    }

    #[tokio::test]
    async fn test_signup_missing_fields_rejected_with_all_errors() {
        let flow = mock_flow();

        let outcome = flow
            .signup(SignupForm {
                email: None,
                password: None,
                agreed_to_terms: Some("on".to_owned()),
            })
            .await;

        let FormOutcome::Rejected { errors, .. } = outcome else {
            panic!("expected rejection");
        };
        assert_eq!(errors.len(), 2);
    }

    #[tokio::test]
    async fn test_signup_without_consent_rejected() {
        let flow = mock_flow();

        let mut form = valid_form();
        form.agreed_to_terms = None;
        let outcome = flow.signup(form).await;

        let FormOutcome::Rejected { errors, .. } = outcome else {
            panic!("expected rejection");
        };
        assert_eq!(errors, vec![messages::TERMS_REQUIRED]);

        // No user row was created
        assert!(flow
            .users()
            .find_user_by_email("a@x.com")
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_signup_invalid_input_redirects_back_with_aggregated_flash() {
        let flow = mock_flow();

        let outcome = flow
            .signup(SignupForm {
                email: Some("notanemail".to_owned()),
                password: Some(SecretString::new("short")),
                agreed_to_terms: Some("on".to_owned()),
            })
            .await;

        let FormOutcome::Redirect(response) = outcome else {
            panic!("expected redirect");
        };
        assert_eq!(response.redirect, SIGNUP_PAGE);

        // Both the email and the password failure travel in one flash value
        let flash_value = response
            .cookies
            .iter()
            .find_map(|op| match op {
                CookieOp::Set { name, value, .. } if *name == crate::flash::FLASH_COOKIE => {
                    Some(value.clone())
                }
                _ => None,
            })
            .unwrap();
        assert!(flash_value.contains("Invalid email format"));
        assert!(flash_value.contains("Password must be at least 8 characters"));
    }

    #[tokio::test]
    async fn test_signup_hashing_failure_is_fatal_with_generic_flash() {
        use std::sync::Arc;
        use crate::Argon2Hasher;

        // Zero-cost argon2 params are invalid, so every hash attempt fails
        let flow =
            crate::flow::test_support::mock_flow_with_hasher(Arc::new(Argon2Hasher::new(0, 0, 0)));

        let outcome = flow.signup(valid_form()).await;
        let FormOutcome::Redirect(response) = outcome else {
            panic!("expected redirect");
        };
        assert_eq!(response.redirect, SIGNUP_PAGE);
        assert!(response.cookies.iter().any(|op| matches!(
            op,
            CookieOp::Set { name, value, .. }
                if *name == crate::flash::FLASH_COOKIE && value == messages::GENERIC_FAILURE
        )));

        // The request died before any row was written
        assert!(flow.users().users.lock().unwrap().is_empty());
        assert!(flow.sessions().is_empty());
    }

    #[tokio::test]
    async fn test_flash_cookie_follows_secure_config() {
        use std::sync::Arc;
        use crate::repository::{MockSessionRepository, MockUserRepository};
        use crate::{Argon2Hasher, AuthConfig, CookieConfig};

        let config = AuthConfig {
            cookies: CookieConfig {
                secure: true,
                signing_key: SecretString::new("test-signing-key-that-is-32-bytes!!"),
                ..Default::default()
            },
            ..Default::default()
        };
        let flow = crate::AuthFlow::new(
            MockUserRepository::new(),
            MockSessionRepository::new(),
            Arc::new(Argon2Hasher::new(1024, 1, 1)),
            config,
        )
        .unwrap();

        let mut form = valid_form();
        form.email = Some("notanemail".to_owned());
        let outcome = flow.signup(form).await;

        let FormOutcome::Redirect(response) = outcome else {
            panic!("expected redirect");
        };
        // The flash set rides with the same Secure attribute as the session cookie
        assert!(response.cookies.iter().any(|op| matches!(
            op,
            CookieOp::Set { name, secure: true, .. } if *name == crate::flash::FLASH_COOKIE
        )));
    }

    #[tokio::test]
    async fn test_signup_duplicate_email_redirects_back_without_session() {
        let flow = mock_flow();

        let outcome = flow.signup(valid_form()).await;
        assert!(matches!(outcome, FormOutcome::Redirect(ref r) if r.redirect == LANDING_PAGE));
        let sessions_after_first = flow.sessions().len();

        let outcome = flow.signup(valid_form()).await;
        let FormOutcome::Redirect(response) = outcome else {
            panic!("expected redirect");
        };
        assert_eq!(response.redirect, SIGNUP_PAGE);
        assert!(response.cookies.iter().any(|op| matches!(
            op,
            CookieOp::Set { name, value, .. }
                if *name == crate::flash::FLASH_COOKIE && value == messages::DUPLICATE_EMAIL
        )));

        // No second user row and no new session
        assert_eq!(flow.users().users.lock().unwrap().len(), 1);
        assert_eq!(flow.sessions().len(), sessions_after_first);
    }
}
