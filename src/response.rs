//! Redirect and cookie instructions handed to the web layer.
//!
//! The flow controller never touches the HTTP framework directly. Each
//! transition produces a [`Response`]: a redirect target plus an ordered list
//! of [`CookieOp`]s for the collaborator layer to apply to the outgoing
//! reply. Cookie operations are ordered; the first operation on every
//! response clears the flash cookie so a stale message never survives past
//! one render (clear-then-set).

use crate::config::SameSite;
use crate::flash;

/// Page rendered by `GET /signup`.
pub const SIGNUP_PAGE: &str = "/signup";
/// Page rendered by `GET /signin`.
pub const SIGNIN_PAGE: &str = "/signin";
/// Authenticated landing page.
pub const LANDING_PAGE: &str = "/welcome";
/// Form target for sign-up submissions.
pub const SIGNUP_ACTION: &str = "/account/signup";
/// Form target for sign-in submissions.
pub const SIGNIN_ACTION: &str = "/account/signin";
/// Form target for sign-out submissions.
pub const SIGNOUT_ACTION: &str = "/account/signout";

/// Name of the session identity cookie.
pub const SESSION_COOKIE: &str = "session";
/// All cookies are scoped to the whole site.
pub const COOKIE_PATH: &str = "/";

/// A single cookie mutation on the outgoing reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CookieOp {
    Set {
        name: &'static str,
        value: String,
        path: &'static str,
        http_only: bool,
        secure: bool,
        same_site: SameSite,
    },
    Clear {
        name: &'static str,
        path: &'static str,
    },
}

impl CookieOp {
    /// The cookie name this operation targets.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            CookieOp::Set { name, .. } | CookieOp::Clear { name, .. } => name,
        }
    }
}

/// A terminal flow transition: where the client goes next and which cookies
/// travel with it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub redirect: &'static str,
    pub cookies: Vec<CookieOp>,
}

impl Response {
    /// Starts a redirect response.
    ///
    /// The flash cookie is cleared unconditionally up front; a handler that
    /// wants to surface a message appends a fresh set afterwards, so the
    /// final cookie value is deterministic regardless of handler order.
    #[must_use]
    pub fn redirect(target: &'static str) -> Self {
        Self {
            redirect: target,
            cookies: vec![flash::clear_op()],
        }
    }

    /// Appends a flash message after the unconditional clear. `secure` should
    /// follow the deployment's cookie config.
    #[must_use]
    pub fn with_flash(mut self, message: impl Into<String>, secure: bool) -> Self {
        self.cookies.push(flash::set_op(message, secure));
        self
    }

    /// Appends an arbitrary cookie operation.
    #[must_use]
    pub fn with_cookie(mut self, op: CookieOp) -> Self {
        self.cookies.push(op);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_redirect_clears_flash_first() {
        let response = Response::redirect(SIGNIN_PAGE);
        assert_eq!(response.redirect, SIGNIN_PAGE);
        assert_eq!(
            response.cookies,
            vec![CookieOp::Clear {
                name: flash::FLASH_COOKIE,
                path: COOKIE_PATH,
            }]
        );
    }

    #[test]
    fn test_clear_then_set_ordering() {
        let response = Response::redirect(SIGNUP_PAGE).with_flash("oops", false);
        assert_eq!(response.cookies.len(), 2);
        assert!(matches!(response.cookies[0], CookieOp::Clear { .. }));
        assert!(matches!(
            response.cookies[1],
            CookieOp::Set { name, ref value, .. } if name == flash::FLASH_COOKIE && value == "oops"
        ));
    }
}
