//! Session-backed storage adapter.
//!
//! The slot lives in the shopper's `tower-sessions` record. The session layer
//! loads the record on first access and writes it back after the handler
//! returns, so every mutation reaches the session store before the response
//! is sent.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use tower_sessions::Session;

use super::{CartStorage, StorageError};
use crate::cart::CartStore;

/// Key-value slots stored in a browser session.
#[derive(Clone)]
pub struct SessionStorage {
    session: Session,
}

impl SessionStorage {
    #[must_use]
    pub const fn new(session: Session) -> Self {
        Self { session }
    }
}

impl CartStorage for SessionStorage {
    async fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.session.get::<String>(key).await?)
    }

    async fn set_item(&self, key: &str, value: String) -> Result<(), StorageError> {
        Ok(self.session.insert(key, value).await?)
    }
}

/// Cart store bound to the current request's session.
pub type SessionCartStore = CartStore<SessionStorage>;

impl<S> FromRequestParts<S> for CartStore<SessionStorage>
where
    S: Send + Sync,
{
    type Rejection = <Session as FromRequestParts<S>>::Rejection;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let session = Session::from_request_parts(parts, state).await?;
        Ok(Self::new(SessionStorage::new(session)))
    }
}
