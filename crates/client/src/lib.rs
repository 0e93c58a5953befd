//! Async client for the supply dashboard backend.
//!
//! [`Client`] owns the HTTP connection, the base URL and the session
//! context; operations are grouped per endpoint family in the modules below
//! and all return the [`ApiError`] taxonomy. Role checks run locally (via
//! `engine`) before a request is sent, so a forbidden action fails without
//! touching the network.

use std::sync::RwLock;

use engine::Role;
use reqwest::{RequestBuilder, StatusCode};
use serde::{Serialize, de::DeserializeOwned};

use api_types::ErrorBody;

pub use auth::NextStep;
pub use error::{ApiError, Result};
pub use session::{Identity, Session, SessionStore};

mod auth;
mod dashboard;
mod error;
mod expenses;
mod organizers;
mod products;
mod session;
mod suppliers;
mod supplies;
mod users;

/// Endpoint families that shade the error mapping: the auth endpoints reuse
/// generic statuses for identity conflicts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Scope {
    General,
    Register,
    Login,
}

#[derive(Debug)]
pub struct Client {
    http: reqwest::Client,
    base_url: String,
    store: SessionStore,
    session: RwLock<Option<Session>>,
}

impl Client {
    pub fn new(base_url: impl Into<String>, store: SessionStore) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
            store,
            session: RwLock::new(None),
        }
    }

    /// Restores a persisted session into memory, if one exists.
    ///
    /// Partial or malformed state on disk is cleared by the store, so this
    /// either yields a complete session or none at all.
    pub fn restore(&self) -> Option<Identity> {
        let session = self.store.load()?;
        let identity = session.identity.clone();
        tracing::debug!(email = %identity.email, "session restored");
        *self.session.write().unwrap_or_else(|e| e.into_inner()) = Some(session);
        Some(identity)
    }

    /// The signed-in identity, if any.
    pub fn current_identity(&self) -> Option<Identity> {
        self.session
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .as_ref()
            .map(|session| session.identity.clone())
    }

    /// The signed-in identity, or `Unauthorized` when signed out.
    pub fn identity(&self) -> Result<Identity> {
        self.current_identity().ok_or(ApiError::Unauthorized)
    }

    /// The signed-in user's domain role.
    pub fn role(&self) -> Result<Role> {
        Ok(self.identity()?.role())
    }

    fn token(&self) -> Option<String> {
        self.session
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .as_ref()
            .map(|session| session.token.clone())
    }

    pub(crate) fn install_session(&self, token: String, identity: Identity) -> Result<()> {
        let session = Session { token, identity };
        self.store.save(&session)?;
        *self.session.write().unwrap_or_else(|e| e.into_inner()) = Some(session);
        Ok(())
    }

    pub(crate) fn update_identity(&self, identity: Identity) -> Result<()> {
        let token = self.token().ok_or(ApiError::Unauthorized)?;
        self.install_session(token, identity)
    }

    pub(crate) fn clear_session(&self) {
        *self.session.write().unwrap_or_else(|e| e.into_inner()) = None;
        self.store.clear();
    }

    fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    fn authorized(&self, req: RequestBuilder) -> RequestBuilder {
        match self.token() {
            Some(token) => req.bearer_auth(token),
            None => req,
        }
    }

    /// Sends the request and decodes a JSON body.
    async fn execute<T: DeserializeOwned>(&self, req: RequestBuilder, scope: Scope) -> Result<T> {
        let resp = self.authorized(req).send().await?;
        let status = resp.status();
        if status.is_success() {
            return Ok(resp.json::<T>().await?);
        }
        Err(self.response_error(status, resp, scope).await)
    }

    /// Sends the request and ignores the response body (`204`-style
    /// endpoints).
    async fn execute_unit(&self, req: RequestBuilder, scope: Scope) -> Result<()> {
        let resp = self.authorized(req).send().await?;
        let status = resp.status();
        if status.is_success() {
            return Ok(());
        }
        Err(self.response_error(status, resp, scope).await)
    }

    async fn response_error(
        &self,
        status: StatusCode,
        resp: reqwest::Response,
        scope: Scope,
    ) -> ApiError {
        let message = match resp.json::<ErrorBody>().await {
            Ok(body) => body.details.join(),
            Err(_) => "server error".to_string(),
        };
        self.map_error(status, message, scope)
    }

    fn map_error(&self, status: StatusCode, message: String, scope: Scope) -> ApiError {
        match status.as_u16() {
            400 if scope == Scope::Register => ApiError::UserAlreadyExists,
            400 | 422 => ApiError::Validation(message),
            // Wrong password and unknown email are deliberately
            // indistinguishable to the caller.
            401 | 404 if scope == Scope::Login => ApiError::UserNotFound,
            401 => {
                tracing::warn!("session rejected by the backend, signing out");
                self.clear_session();
                ApiError::Unauthorized
            }
            403 => ApiError::Forbidden(message),
            404 => ApiError::NotFound(message),
            409 => ApiError::Conflict(message),
            _ => ApiError::Server { status, message },
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.execute(self.http.get(self.url(path)), Scope::General)
            .await
    }

    async fn get_json_query<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T> {
        self.execute(self.http.get(self.url(path)).query(query), Scope::General)
            .await
    }

    async fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        self.execute(self.http.post(self.url(path)).json(body), Scope::General)
            .await
    }

    async fn post_json_unit<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<()> {
        self.execute_unit(self.http.post(self.url(path)).json(body), Scope::General)
            .await
    }

    async fn post_unit(&self, path: &str) -> Result<()> {
        self.execute_unit(self.http.post(self.url(path)), Scope::General)
            .await
    }

    async fn put_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        self.execute(self.http.put(self.url(path)).json(body), Scope::General)
            .await
    }

    async fn patch_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        self.execute(self.http.patch(self.url(path)).json(body), Scope::General)
            .await
    }

    async fn delete_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.execute(self.http.delete(self.url(path)), Scope::General)
            .await
    }

    async fn delete_unit(&self, path: &str) -> Result<()> {
        self.execute_unit(self.http.delete(self.url(path)), Scope::General)
            .await
    }

    async fn delete_unit_query(&self, path: &str, query: &[(&str, String)]) -> Result<()> {
        self.execute_unit(self.http.delete(self.url(path)).query(query), Scope::General)
            .await
    }
}
