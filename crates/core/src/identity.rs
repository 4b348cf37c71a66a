//! Identity collaborator.
//!
//! The client never authenticates anyone itself. It asks an [`IdentityProvider`] for the
//! current identity, subscribes to identity changes, and delegates interactive sign-in and
//! sign-out to it.

use crate::validation::validate_path_component;
use crate::{IdentityError, IdentityResult};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::sync::{watch, Mutex};
use uuid::Uuid;

/// A verified identity as reported by the identity provider.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// Opaque unique id; also the profile document id.
    pub id: String,
    pub display_name: Option<String>,
    pub avatar_url: Option<String>,
    pub email: Option<String>,
}

impl Identity {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            display_name: None,
            avatar_url: None,
            email: None,
        }
    }

    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = Some(name.into());
        self
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }
}

#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// The identity of an existing session, if any.
    async fn current_identity(&self) -> Option<Identity>;

    /// Receives every identity change pushed by the provider.
    fn subscribe(&self) -> watch::Receiver<Option<Identity>>;

    /// Runs the provider's interactive sign-in flow.
    async fn sign_in_interactive(&self) -> IdentityResult<Identity>;

    async fn sign_out(&self) -> IdentityResult<()>;
}

// ============================================================================
// LOCAL PROVIDER
// ============================================================================

/// Settings for [`LocalIdentityProvider`], usually read from the environment.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LocalIdentityConfig {
    pub id: Option<String>,
    pub display_name: Option<String>,
    pub email: Option<String>,
    /// Start with an existing session for the configured identity.
    pub signed_in: bool,
}

/// Identity provider for a single local user.
///
/// Sign-in succeeds with the configured id. Without one the user signs in as a guest (or
/// under the configured display name) with a minted id of 32 lowercase hex characters. The
/// minted id is reused for the lifetime of the provider and, when an id file is attached
/// with [`LocalIdentityProvider::with_id_file`], across runs as well.
#[derive(Debug)]
pub struct LocalIdentityProvider {
    config: LocalIdentityConfig,
    id_file: Option<PathBuf>,
    minted_id: Mutex<Option<String>>,
    sender: watch::Sender<Option<Identity>>,
}

#[derive(Serialize, Deserialize)]
struct StoredIdentity {
    id: String,
}

impl LocalIdentityProvider {
    pub fn new(config: LocalIdentityConfig) -> Self {
        let initial = if config.signed_in {
            config.id.as_ref().map(|id| Self::identity_for(&config, id.clone()))
        } else {
            None
        };
        let (sender, _) = watch::channel(initial);

        Self {
            config,
            id_file: None,
            minted_id: Mutex::new(None),
            sender,
        }
    }

    /// Keeps the minted id in `path` so later runs sign in as the same user.
    pub fn with_id_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.id_file = Some(path.into());
        self
    }

    fn identity_for(config: &LocalIdentityConfig, id: String) -> Identity {
        Identity {
            id,
            display_name: config.display_name.clone(),
            avatar_url: None,
            email: config.email.clone(),
        }
    }

    async fn resolve_id(&self) -> IdentityResult<String> {
        if let Some(id) = &self.config.id {
            return Ok(id.clone());
        }

        let mut minted = self.minted_id.lock().await;
        if let Some(id) = minted.as_ref() {
            return Ok(id.clone());
        }

        let id = match &self.id_file {
            Some(path) => load_or_mint_id(path).await?,
            None => Uuid::new_v4().simple().to_string(),
        };
        *minted = Some(id.clone());
        Ok(id)
    }
}

async fn load_or_mint_id(path: &Path) -> IdentityResult<String> {
    match tokio::fs::read_to_string(path).await {
        Ok(raw) => {
            let stored: StoredIdentity = serde_json::from_str(&raw)
                .map_err(|e| IdentityError::Persist(format!("{}: {}", path.display(), e)))?;
            validate_path_component("identity id", &stored.id)
                .map_err(|e| IdentityError::Persist(e.to_string()))?;
            Ok(stored.id)
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            let id = Uuid::new_v4().simple().to_string();
            let raw = serde_json::to_string(&StoredIdentity { id: id.clone() })
                .map_err(|e| IdentityError::Persist(e.to_string()))?;
            if let Some(parent) = path.parent() {
                tokio::fs::create_dir_all(parent)
                    .await
                    .map_err(|e| IdentityError::Persist(format!("{}: {}", parent.display(), e)))?;
            }
            tokio::fs::write(path, raw)
                .await
                .map_err(|e| IdentityError::Persist(format!("{}: {}", path.display(), e)))?;
            tracing::info!("++ Minted local identity {} in {}", id, path.display());
            Ok(id)
        }
        Err(e) => Err(IdentityError::Persist(format!("{}: {}", path.display(), e))),
    }
}

#[async_trait]
impl IdentityProvider for LocalIdentityProvider {
    async fn current_identity(&self) -> Option<Identity> {
        self.sender.borrow().clone()
    }

    fn subscribe(&self) -> watch::Receiver<Option<Identity>> {
        self.sender.subscribe()
    }

    async fn sign_in_interactive(&self) -> IdentityResult<Identity> {
        let id = self.resolve_id().await?;
        let identity = Self::identity_for(&self.config, id);
        self.sender.send_replace(Some(identity.clone()));
        tracing::info!("signed in as {}", identity.id);
        Ok(identity)
    }

    async fn sign_out(&self) -> IdentityResult<()> {
        self.sender.send_replace(None);
        tracing::info!("signed out");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::LOCAL_IDENTITY_FILE;

    #[tokio::test]
    async fn test_configured_session_is_current() {
        let provider = LocalIdentityProvider::new(LocalIdentityConfig {
            id: Some("u-1".into()),
            display_name: Some("Jane".into()),
            email: None,
            signed_in: true,
        });

        let current = provider.current_identity().await.unwrap();
        assert_eq!(current.id, "u-1");
        assert_eq!(current.display_name.as_deref(), Some("Jane"));
    }

    #[tokio::test]
    async fn test_no_session_until_sign_in() {
        let provider = LocalIdentityProvider::new(LocalIdentityConfig {
            id: Some("u-1".into()),
            ..Default::default()
        });
        assert!(provider.current_identity().await.is_none());

        let mut changes = provider.subscribe();
        let identity = provider.sign_in_interactive().await.unwrap();
        assert_eq!(identity.id, "u-1");

        assert!(changes.has_changed().unwrap());
        assert_eq!(changes.borrow_and_update().as_ref(), Some(&identity));

        provider.sign_out().await.unwrap();
        assert!(provider.current_identity().await.is_none());
    }

    #[tokio::test]
    async fn test_display_name_only_mints_stable_id() {
        let provider = LocalIdentityProvider::new(LocalIdentityConfig {
            display_name: Some("Guest User".into()),
            ..Default::default()
        });

        let first = provider.sign_in_interactive().await.unwrap();
        provider.sign_out().await.unwrap();
        let second = provider.sign_in_interactive().await.unwrap();

        assert_eq!(first.id.len(), 32);
        assert!(first.id.bytes().all(|b| b.is_ascii_hexdigit()));
        assert_eq!(first.id, second.id, "minted id should be reused");
    }

    #[tokio::test]
    async fn test_sign_in_without_configuration_is_guest() {
        let provider = LocalIdentityProvider::new(LocalIdentityConfig::default());
        let guest = provider.sign_in_interactive().await.unwrap();

        assert_eq!(guest.id.len(), 32);
        assert!(guest.display_name.is_none());
        assert_eq!(provider.current_identity().await, Some(guest));
    }

    #[tokio::test]
    async fn test_minted_id_survives_restart_with_id_file() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let id_file = temp_dir.path().join("data").join(LOCAL_IDENTITY_FILE);

        let first = LocalIdentityProvider::new(LocalIdentityConfig::default())
            .with_id_file(&id_file)
            .sign_in_interactive()
            .await
            .unwrap();
        assert!(id_file.exists());

        let second = LocalIdentityProvider::new(LocalIdentityConfig::default())
            .with_id_file(&id_file)
            .sign_in_interactive()
            .await
            .unwrap();
        assert_eq!(first.id, second.id);
    }

    #[tokio::test]
    async fn test_configured_id_ignores_id_file() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let id_file = temp_dir.path().join(LOCAL_IDENTITY_FILE);

        let identity = LocalIdentityProvider::new(LocalIdentityConfig {
            id: Some("u-1".into()),
            ..Default::default()
        })
        .with_id_file(&id_file)
        .sign_in_interactive()
        .await
        .unwrap();

        assert_eq!(identity.id, "u-1");
        assert!(!id_file.exists());
    }

    #[tokio::test]
    async fn test_unsafe_stored_id_is_rejected() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let id_file = temp_dir.path().join(LOCAL_IDENTITY_FILE);
        std::fs::write(&id_file, r#"{"id":"../escape"}"#).unwrap();

        let provider = LocalIdentityProvider::new(LocalIdentityConfig::default()).with_id_file(&id_file);
        let err = provider.sign_in_interactive().await.unwrap_err();

        assert!(matches!(err, IdentityError::Persist(_)));
        assert!(provider.current_identity().await.is_none());
    }
}
