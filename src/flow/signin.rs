//! The sign-in transition.

use chrono::Utc;

use super::{messages, AuthFlow, FormOutcome};
use crate::forms::{SigninForm, SigninRequest};
use crate::repository::{SessionRepository, UserRepository};
use crate::response::{Response, LANDING_PAGE, SIGNIN_PAGE};
use crate::AuthError;

impl<U, S> AuthFlow<U, S>
where
    U: UserRepository,
    S: SessionRepository,
{
    /// Handles `POST /account/signin`.
    ///
    /// An unknown email and a wrong password produce the same outward
    /// rejection, so responses do not reveal which accounts exist.
    #[cfg_attr(feature = "tracing", tracing::instrument(name = "signin", skip_all))]
    pub async fn signin(&self, form: SigninForm) -> FormOutcome {
        let request = match form.into_request() {
            Ok(request) => request,
            Err(shape) => return FormOutcome::rejected(shape.messages()),
        };

        match self.signin_inner(&request).await {
            Ok(response) => FormOutcome::Redirect(response),
            Err(AuthError::InvalidCredentials) => FormOutcome::Redirect(
                Response::redirect(SIGNIN_PAGE)
                    .with_flash(messages::AUTH_REJECTED, self.cookies_secure()),
            ),
            Err(e) => {
                log::error!(target: "doorman::flow", "msg=\"signin failed\", error=\"{e}\"");
                FormOutcome::Redirect(self.failure(SIGNIN_PAGE))
            }
        }
    }

    async fn signin_inner(&self, request: &SigninRequest) -> Result<Response, AuthError> {
        let user = self
            .bounded(self.users().find_user_by_email(&request.email))
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        let verified = self
            .verify_blocking(request.password.clone(), user.hashed_password.clone())
            .await?;
        if !verified {
            return Err(AuthError::InvalidCredentials);
        }

        let expires_at = Utc::now() + self.config().session_lifetime;
        let token = self.bounded(self.sessions().create(user.id, expires_at)).await?;

        log::info!(target: "doorman::flow", "msg=\"signin success\", user_id={}", user.id);

        Ok(Response::redirect(LANDING_PAGE).with_cookie(self.session_cookie_op(&token)))
    }
}
