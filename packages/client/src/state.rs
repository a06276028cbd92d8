use std::sync::Arc;

use sea_orm::DatabaseConnection;
use tokio::sync::watch;

use crate::config::AppConfig;
use crate::models::auth::Principal;
use crate::realtime::CommentFeed;

/// Shared handle passed to every facade operation.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub config: AppConfig,
    pub comments: CommentFeed,
    pub session: Session,
}

impl AppState {
    pub fn new(db: DatabaseConnection, config: AppConfig) -> Self {
        Self {
            db,
            config,
            comments: CommentFeed::new(),
            session: Session::new(),
        }
    }
}

/// Process-wide holder for the signed-in principal.
///
/// Consumers read the current value or subscribe for change notification;
/// only the auth operations write to it.
#[derive(Clone)]
pub struct Session {
    tx: Arc<watch::Sender<Option<Principal>>>,
}

impl Session {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(None);
        Self { tx: Arc::new(tx) }
    }

    /// The currently signed-in principal, if any.
    pub fn current(&self) -> Option<Principal> {
        self.tx.borrow().clone()
    }

    /// Subscribe to sign-in/sign-out transitions.
    pub fn subscribe(&self) -> watch::Receiver<Option<Principal>> {
        self.tx.subscribe()
    }

    pub(crate) fn set(&self, principal: Option<Principal>) {
        self.tx.send_replace(principal);
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
