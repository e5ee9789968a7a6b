//! Authenticated view access.

use super::{messages, AuthFlow};
use crate::repository::{resolve_session, SessionRepository, UserRepository};
use crate::response::{CookieOp, Response, SIGNIN_PAGE};
use crate::{cookie, flash, User};

/// Outcome of presenting (or not presenting) a session cookie to an
/// authenticated page.
#[derive(Debug, Clone)]
pub enum Gate {
    /// A valid session; the web layer renders with this user's identity and
    /// applies the cookie operations (at minimum the flash clear).
    Allowed { user: User, cookies: Vec<CookieOp> },
    /// No valid session; redirect to sign-in.
    Denied(Response),
}

impl<U, S> AuthFlow<U, S>
where
    U: UserRepository,
    S: SessionRepository,
{
    /// Gate for authenticated pages such as `GET /welcome`.
    ///
    /// `session_cookie` is the raw value of the session cookie from the
    /// incoming request, if present. A missing cookie asks the visitor to
    /// sign in; a cookie whose session cannot be resolved (tampered, expired,
    /// or orphaned by user deletion) reads as an expired session.
    #[cfg_attr(feature = "tracing", tracing::instrument(name = "current_user", skip_all))]
    pub async fn current_user(&self, session_cookie: Option<&str>) -> Gate {
        let Some(raw) = session_cookie else {
            return Gate::Denied(
                Response::redirect(SIGNIN_PAGE)
                    .with_flash(messages::SIGNIN_REQUIRED, self.cookies_secure()),
            );
        };

        let Some(token) = cookie::verify_signed_cookie(raw, self.signing_key()) else {
            return self.denied_expired();
        };

        match self
            .bounded(resolve_session(self.sessions(), self.users(), &token))
            .await
        {
            Ok(Some(user)) => Gate::Allowed {
                user,
                cookies: vec![flash::clear_op()],
            },
            Ok(None) => self.denied_expired(),
            Err(e) => {
                log::error!(target: "doorman::flow", "msg=\"session resolve failed\", error=\"{e}\"");
                Gate::Denied(self.failure(SIGNIN_PAGE))
            }
        }
    }

    /// The expired-session terminal also drops the useless session cookie.
    fn denied_expired(&self) -> Gate {
        Gate::Denied(
            Response::redirect(SIGNIN_PAGE)
                .with_flash(messages::SESSION_EXPIRED, self.cookies_secure())
                .with_cookie(Self::clear_session_op()),
        )
    }
}
