//! The flash channel: a one-shot, cookie-carried message.
//!
//! A flash message is written by one response, consumed by the immediately
//! following request, and cleared by every response unconditionally. It
//! exists to relay a human-readable outcome (usually a validation or
//! authentication failure) across the redirect boundary between a form
//! submission and the page rendered next.
//!
//! The channel is single-use by construction: [`Response`](crate::response::Response)
//! emits [`clear_op`] before anything else, and a handler surfacing an error
//! appends [`set_op`] after the clear. Reading the value a handler just wrote
//! is not possible; it travels only via the client's next request.

use crate::config::SameSite;
use crate::response::{CookieOp, COOKIE_PATH};

/// Name of the flash message cookie.
pub const FLASH_COOKIE: &str = "flash";

/// The unconditional clear applied to every outgoing response.
#[must_use]
pub fn clear_op() -> CookieOp {
    CookieOp::Clear {
        name: FLASH_COOKIE,
        path: COOKIE_PATH,
    }
}

/// A set operation carrying `message` to the next request.
///
/// Not `HttpOnly`: the flash value is display text, and the signup page's
/// script reads it to decorate the offending fields. `secure` follows the
/// deployment's cookie config so the flash cookie is never downgraded
/// relative to the session cookie it rides alongside.
#[must_use]
pub fn set_op(message: impl Into<String>, secure: bool) -> CookieOp {
    CookieOp::Set {
        name: FLASH_COOKIE,
        value: message.into(),
        path: COOKIE_PATH,
        http_only: false,
        secure,
        same_site: SameSite::Lax,
    }
}

/// Extracts the inbound flash message, if any.
///
/// `cookie_value` is the raw value of the `flash` cookie from the incoming
/// request, or `None` if the cookie is absent. An empty value (the residue of
/// a clear on clients that keep the cookie around) reads as no message.
#[must_use]
pub fn take(cookie_value: Option<&str>) -> Option<String> {
    match cookie_value {
        Some(value) if !value.is_empty() => Some(value.to_owned()),
        _ => None,
    }
}
