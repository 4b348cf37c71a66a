//! # Sick&Seek Core
//!
//! Client-side business logic for Sick&Seek, a healthcare-provider discovery app for
//! foreign residents and visitors.
//!
//! This crate contains:
//! - Search, filtering and HOT ordering over the provider catalog
//! - Category label resolution for badges and chips
//! - The navigation state machine (splash, sign-in gate, app shell)
//! - The session gate over an external identity provider
//! - The user profile with write-through persistence to a document store
//! - The simulated prescription scan
//!
//! **No rendering**: the [`app::App`] controller describes what is on screen; drawing it
//! belongs to the binaries.

pub mod app;
pub mod category;
pub mod config;
pub mod constants;
pub mod error;
pub mod identity;
pub mod image;
pub mod matching;
pub mod navigation;
pub mod profile;
pub mod scan;
pub mod search;
pub mod session;
pub mod store;
pub mod validation;

pub use app::{App, Effect, Intent, Screen, ShellBody};
pub use category::{resolve_category, CategoryIdentity};
pub use config::ClientConfig;
pub use error::{
    AppError, AppResult, CoreError, CoreResult, IdentityError, IdentityResult, NavResult,
    NavigationError, ScanError, ScanResult, StoreError, StoreResult,
};
pub use identity::{Identity, IdentityProvider, LocalIdentityConfig, LocalIdentityProvider};
pub use image::ImageRef;
pub use navigation::{profile_share_link, DeepLink, DrillDown, NavigationState, ShellState, Tab};
pub use profile::{ProfileChange, ProfileManager, RejectReason, TagKind, UserProfile};
pub use scan::{ScanAnnotations, ScanFlow, ScanState};
pub use search::{category_chips, search, CategoryFilter};
pub use session::{SessionGate, SessionState};
pub use store::{Document, DocumentStore, FileDocumentStore, MemoryDocumentStore, WriteOptions};

pub use sickseek_types::NonEmptyText;
