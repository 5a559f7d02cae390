use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tokio::sync::watch;

use super::{IdentityProvider, Session};
use crate::error::{AppError, Result};
use crate::models::UserProfile;

#[derive(Debug, Serialize, Deserialize)]
struct SessionFile {
    user: UserProfile,
}

/// Identity provider backed by a session file on disk.
///
/// Starts out unresolved; [`LocalIdentity::resolve`] reads the file and
/// publishes the outcome to every subscriber.
pub struct LocalIdentity {
    path: PathBuf,
    tx: watch::Sender<Session>,
}

impl LocalIdentity {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let (tx, _rx) = watch::channel(Session::loading());
        Self {
            path: path.into(),
            tx,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub async fn resolve(&self) -> Result<()> {
        let session = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => match toml::from_str::<SessionFile>(&content) {
                Ok(file) if !file.user.id.trim().is_empty() => Session::signed_in(file.user),
                Ok(_) => Session::signed_out(),
                Err(e) => {
                    tracing::warn!("Ignoring unreadable session file {:?}: {}", self.path, e);
                    Session::signed_out()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Session::signed_out(),
            Err(e) => {
                self.tx.send_replace(Session::signed_out());
                return Err(e.into());
            }
        };

        tracing::info!("Session resolved (signed in: {})", session.is_signed_in);
        self.tx.send_replace(session);
        Ok(())
    }
}

impl IdentityProvider for LocalIdentity {
    fn session(&self) -> Session {
        self.tx.borrow().clone()
    }

    fn subscribe(&self) -> watch::Receiver<Session> {
        self.tx.subscribe()
    }

    fn sign_in(&self, user: UserProfile) -> Result<()> {
        if user.id.trim().is_empty() {
            return Err(AppError::Identity("user id must not be empty".to_string()));
        }
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(&SessionFile { user: user.clone() })?;
        std::fs::write(&self.path, content)?;

        tracing::info!("Signed in as {}", user.display_name());
        self.tx.send_replace(Session::signed_in(user));
        Ok(())
    }

    fn sign_out(&self) -> Result<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => return Err(e.into()),
        }
        tracing::info!("Signed out");
        self.tx.send_replace(Session::signed_out());
        Ok(())
    }
}
