//! Session helpers that keep handlers free of cookie mechanics.
//!
//! The cookie holds the signed-in user's id and platform access token, the
//! chosen interface language, and an anonymous submitter id used to gate
//! duplicate form submissions before sign-in.

use actix_session::Session;
use actix_web::{FromRequest, HttpRequest, dev::Payload};
use futures_util::future::LocalBoxFuture;
use tracing::warn;
use uuid::Uuid;

use crate::domain::{AccessToken, AuthSession, Caller, Error, Language, UserId};

pub(crate) const USER_ID_KEY: &str = "user_id";
pub(crate) const ACCESS_TOKEN_KEY: &str = "access_token";
pub(crate) const LANGUAGE_KEY: &str = "language";
pub(crate) const SUBMITTER_KEY: &str = "submitter";

fn read_error(error: impl std::fmt::Display) -> Error {
    Error::internal(format!("failed to read session: {error}"))
}

fn write_error(error: impl std::fmt::Display) -> Error {
    Error::internal(format!("failed to persist session: {error}"))
}

/// Newtype exposing portal-level session operations.
#[derive(Clone)]
pub struct SessionContext(Session);

impl SessionContext {
    pub fn new(session: Session) -> Self {
        Self(session)
    }

    /// Remember the user a successful sign-in or sign-up produced.
    ///
    /// A sign-up still awaiting email confirmation carries no access token;
    /// the session is left untouched in that case.
    pub fn persist_auth(&self, auth: &AuthSession) -> Result<(), Error> {
        let Some(token) = &auth.access_token else {
            return Ok(());
        };
        self.0
            .insert(USER_ID_KEY, auth.user_id.to_string())
            .map_err(write_error)?;
        self.0
            .insert(ACCESS_TOKEN_KEY, token.expose())
            .map_err(write_error)
    }

    /// The signed-in user id, if any. Tampered values are ignored.
    pub fn user_id(&self) -> Result<Option<UserId>, Error> {
        let Some(raw) = self.0.get::<String>(USER_ID_KEY).map_err(read_error)? else {
            return Ok(None);
        };
        match UserId::new(raw) {
            Ok(id) => Ok(Some(id)),
            Err(error) => {
                warn!(%error, "invalid user id in session cookie");
                Ok(None)
            }
        }
    }

    /// The signed-in caller or `401 Unauthorized`.
    pub fn require_caller(&self) -> Result<Caller, Error> {
        let user_id = self.user_id()?;
        let token = self
            .0
            .get::<String>(ACCESS_TOKEN_KEY)
            .map_err(read_error)?
            .and_then(|raw| AccessToken::new(raw).ok());
        match (user_id, token) {
            (Some(user_id), Some(token)) => Ok(Caller::new(user_id, token)),
            _ => Err(Error::unauthorized("login required")),
        }
    }

    /// Interface language stored in the session; English when unset.
    pub fn language(&self) -> Result<Language, Error> {
        let stored = self.0.get::<String>(LANGUAGE_KEY).map_err(read_error)?;
        Ok(stored
            .and_then(|raw| match raw.parse::<Language>() {
                Ok(language) => Some(language),
                Err(error) => {
                    warn!(%error, "invalid language in session cookie");
                    None
                }
            })
            .unwrap_or_default())
    }

    pub fn set_language(&self, language: Language) -> Result<(), Error> {
        self.0
            .insert(LANGUAGE_KEY, language.code())
            .map_err(write_error)
    }

    /// Stable id keying this browser's in-flight submissions.
    ///
    /// Signed-in users are keyed by their user id; anonymous visitors get a
    /// random id minted on first use.
    pub fn submitter_id(&self) -> Result<Uuid, Error> {
        if let Some(user_id) = self.user_id()? {
            return Ok(*user_id.as_uuid());
        }
        let stored = self
            .0
            .get::<String>(SUBMITTER_KEY)
            .map_err(read_error)?
            .and_then(|raw| Uuid::parse_str(&raw).ok());
        if let Some(id) = stored {
            return Ok(id);
        }
        let id = Uuid::new_v4();
        self.0
            .insert(SUBMITTER_KEY, id.to_string())
            .map_err(write_error)?;
        Ok(id)
    }

    /// Forget the signed-in user while keeping the language choice.
    pub fn sign_out(&self) -> Result<(), Error> {
        let language = self.language()?;
        self.0.clear();
        self.set_language(language)
    }
}

impl FromRequest for SessionContext {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = Session::from_request(req, payload);
        Box::pin(async move { fut.await.map(SessionContext::new) })
    }
}
