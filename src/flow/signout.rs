//! Explicit sign-out.

use super::AuthFlow;
use crate::repository::{SessionRepository, UserRepository};
use crate::response::{Response, SIGNIN_PAGE};
use crate::cookie;

impl<U, S> AuthFlow<U, S>
where
    U: UserRepository,
    S: SessionRepository,
{
    /// Handles `POST /account/signout`.
    ///
    /// Revokes the presented session server-side and drops the cookie. A
    /// missing, tampered, or already-revoked session still signs the client
    /// out; revocation failure is logged but does not block the redirect.
    #[cfg_attr(feature = "tracing", tracing::instrument(name = "signout", skip_all))]
    pub async fn signout(&self, session_cookie: Option<&str>) -> Response {
        if let Some(token) = session_cookie
            .and_then(|raw| cookie::verify_signed_cookie(raw, self.signing_key()))
        {
            if let Err(e) = self.bounded(self.sessions().destroy(&token)).await {
                log::warn!(target: "doorman::flow", "msg=\"session revoke failed\", error=\"{e}\"");
            } else {
                log::info!(target: "doorman::flow", "msg=\"signout success\"");
            }
        }

        Response::redirect(SIGNIN_PAGE).with_cookie(Self::clear_session_op())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flow::test_support::mock_flow;
    use crate::flow::{FormOutcome, Gate};
    use crate::forms::SignupForm;
    use crate::response::{CookieOp, SESSION_COOKIE};
    use crate::SecretString;

    #[tokio::test]
    async fn test_signout_revokes_session() {
        let flow = mock_flow();

        let outcome = flow
            .signup(SignupForm {
                email: Some("a@x.com".to_owned()),
                password: Some(SecretString::new("Str0ng!Pass")),
                agreed_to_terms: Some("on".to_owned()),
            })
            .await;
        let FormOutcome::Redirect(response) = outcome else {
            panic!("expected redirect");
        };
        let cookie_value = response
            .cookies
            .iter()
            .find_map(|op| match op {
                CookieOp::Set { name, value, .. } if *name == SESSION_COOKIE => {
                    Some(value.clone())
                }
                _ => None,
            })
            .unwrap();

        let response = flow.signout(Some(&cookie_value)).await;
        assert_eq!(response.redirect, SIGNIN_PAGE);
        assert!(response
            .cookies
            .iter()
            .any(|op| matches!(op, CookieOp::Clear { name, .. } if *name == SESSION_COOKIE)));
        assert!(flow.sessions().is_empty());

        // The old cookie no longer grants access
        let gate = flow.current_user(Some(&cookie_value)).await;
        assert!(matches!(gate, Gate::Denied(_)));
    }

    #[tokio::test]
    async fn test_signout_without_cookie_still_redirects() {
        let flow = mock_flow();

        let response = flow.signout(None).await;
        assert_eq!(response.redirect, SIGNIN_PAGE);
    }
}
