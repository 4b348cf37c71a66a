//! User profile and tag-list management.
//!
//! A profile holds the user's display name plus two ordered tag lists (allergies and
//! medications) shown on the Health tab. It is backed by the document
//! `users/{identity.id}` in the [`DocumentStore`]:
//!
//! ```text
//! { "name": "...", "allergies": [...], "medications": [...], "lastUpdated": "<RFC 3339>" }
//! ```
//!
//! ## Local authority
//!
//! Every accepted change is applied to the in-memory profile first and then written through
//! as a shallow merge. A failed write is logged and swallowed: the in-memory profile stays
//! the source of truth for the rest of the session. There is no retry queue and no
//! rollback, so a second device may see stale data.

use crate::constants::{DEFAULT_DISPLAY_NAME, USERS_COLLECTION};
use crate::identity::Identity;
use crate::store::{Document, DocumentStore, WriteOptions};
use crate::StoreResult;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sickseek_types::NonEmptyText;
use std::sync::Arc;

// ============================================================================
// TYPES
// ============================================================================

/// Which tag list an operation targets.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TagKind {
    Allergy,
    Medication,
}

impl TagKind {
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim().to_ascii_lowercase().as_str() {
            "allergy" | "allergies" => Some(TagKind::Allergy),
            "medication" | "medications" | "med" | "meds" => Some(TagKind::Medication),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TagKind::Allergy => "Allergies",
            TagKind::Medication => "Medications",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct UserProfile {
    /// Never blank.
    pub name: String,
    pub allergies: Vec<String>,
    pub medications: Vec<String>,
}

impl UserProfile {
    /// Profile for an identity with no stored document.
    pub fn default_for(identity: &Identity) -> Self {
        Self {
            name: default_name(identity),
            allergies: Vec::new(),
            medications: Vec::new(),
        }
    }

    pub fn tags(&self, kind: TagKind) -> &[String] {
        match kind {
            TagKind::Allergy => &self.allergies,
            TagKind::Medication => &self.medications,
        }
    }

    fn tags_mut(&mut self, kind: TagKind) -> &mut Vec<String> {
        match kind {
            TagKind::Allergy => &mut self.allergies,
            TagKind::Medication => &mut self.medications,
        }
    }
}

fn default_name(identity: &Identity) -> String {
    identity
        .display_name
        .as_deref()
        .and_then(|name| NonEmptyText::new(name).ok())
        .map(NonEmptyText::into_inner)
        .unwrap_or_else(|| DEFAULT_DISPLAY_NAME.to_owned())
}

/// Why a profile change was not applied.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RejectReason {
    /// Empty after trimming.
    Empty,
    /// Already present (exact, case-sensitive match).
    Duplicate,
    /// Not present, nothing to remove.
    Absent,
}

/// Outcome of a profile operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProfileChange {
    /// Applied locally. `persisted` is false when the write-through failed.
    Applied { persisted: bool },
    /// Nothing changed and nothing was written.
    Rejected(RejectReason),
}

impl ProfileChange {
    pub fn is_applied(self) -> bool {
        matches!(self, ProfileChange::Applied { .. })
    }
}

/// Stored document shape. Unknown fields are tolerated because writes are merges.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UserRecord {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    allergies: Vec<String>,
    #[serde(default)]
    medications: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    last_updated: Option<DateTime<Utc>>,
}

// ============================================================================
// PROFILE MANAGER
// ============================================================================

/// Owns the signed-in user's profile and persists changes through a [`DocumentStore`].
pub struct ProfileManager<S> {
    store: Arc<S>,
    document_id: String,
    profile: UserProfile,
}

impl<S: DocumentStore> ProfileManager<S> {
    /// Loads the profile for `identity`.
    ///
    /// A missing document yields the default profile and writes nothing. A read or decode
    /// failure is logged and also yields the default profile.
    pub async fn load(store: Arc<S>, identity: &Identity) -> Self {
        let profile = match Self::read_profile(store.as_ref(), identity).await {
            Ok(Some(profile)) => profile,
            Ok(None) => {
                tracing::debug!("no stored profile for {}, using defaults", identity.id);
                UserProfile::default_for(identity)
            }
            Err(e) => {
                tracing::warn!("failed to load profile for {}: {}", identity.id, e);
                UserProfile::default_for(identity)
            }
        };

        Self {
            store,
            document_id: identity.id.clone(),
            profile,
        }
    }

    async fn read_profile(store: &S, identity: &Identity) -> StoreResult<Option<UserProfile>> {
        let Some(document) = store.read_document(USERS_COLLECTION, &identity.id).await? else {
            return Ok(None);
        };
        let record: UserRecord = serde_json::from_value(Value::Object(document))?;

        let name = record
            .name
            .as_deref()
            .and_then(|n| NonEmptyText::new(n).ok())
            .map(NonEmptyText::into_inner)
            .unwrap_or_else(|| default_name(identity));

        Ok(Some(UserProfile {
            name,
            allergies: record.allergies,
            medications: record.medications,
        }))
    }

    pub fn profile(&self) -> &UserProfile {
        &self.profile
    }

    pub fn document_id(&self) -> &str {
        &self.document_id
    }

    /// Appends a trimmed tag. Empty values and exact duplicates are rejected silently.
    pub async fn add_tag(&mut self, kind: TagKind, value: &str) -> ProfileChange {
        let value = value.trim();
        if value.is_empty() {
            return ProfileChange::Rejected(RejectReason::Empty);
        }
        let tags = self.profile.tags_mut(kind);
        if tags.iter().any(|t| t == value) {
            return ProfileChange::Rejected(RejectReason::Duplicate);
        }
        tags.push(value.to_owned());
        self.write_through().await
    }

    /// Removes a tag by exact match.
    pub async fn remove_tag(&mut self, kind: TagKind, value: &str) -> ProfileChange {
        let tags = self.profile.tags_mut(kind);
        let Some(index) = tags.iter().position(|t| t == value) else {
            return ProfileChange::Rejected(RejectReason::Absent);
        };
        tags.remove(index);
        self.write_through().await
    }

    /// Sets the display name. Blank input is rejected.
    pub async fn rename(&mut self, value: &str) -> ProfileChange {
        let Ok(name) = NonEmptyText::new(value) else {
            return ProfileChange::Rejected(RejectReason::Empty);
        };
        self.profile.name = name.into_inner();
        self.write_through().await
    }

    async fn write_through(&self) -> ProfileChange {
        let persisted = match self.persist().await {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(
                    "profile write for {} failed, keeping local state: {}",
                    self.document_id,
                    e
                );
                false
            }
        };
        ProfileChange::Applied { persisted }
    }

    async fn persist(&self) -> StoreResult<()> {
        let record = UserRecord {
            name: Some(self.profile.name.clone()),
            allergies: self.profile.allergies.clone(),
            medications: self.profile.medications.clone(),
            last_updated: Some(Utc::now()),
        };
        let document: Document = match serde_json::to_value(record)? {
            Value::Object(map) => map,
            _ => Document::new(),
        };

        self.store
            .write_document(USERS_COLLECTION, &self.document_id, document, WriteOptions::MERGE)
            .await
    }
}
