use crate::navigation::Tab;
use sickseek_types::{CategoryId, ProviderId};
use std::path::PathBuf;

/// Errors raised while assembling the client at startup.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("catalog error: {0}")]
    Catalog(#[from] sickseek_catalog::CatalogError),

    #[error("document store error: {0}")]
    Store(#[from] StoreError),
}

pub type CoreResult<T> = std::result::Result<T, CoreError>;

/// Errors from the document-store collaborator.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("invalid document path: {0}")]
    InvalidPath(String),

    #[error("failed to read document {path}: {source}", path = path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write document {path}: {source}", path = path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("document {path} is not a JSON object", path = path.display())]
    NotAnObject { path: PathBuf },

    #[error("failed to (de)serialize document: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("document store unavailable: {0}")]
    Unavailable(String),
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Errors from the identity collaborator.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IdentityError {
    #[error("sign-in was cancelled")]
    Cancelled,

    #[error("no identity is available to sign in with")]
    Unavailable,

    #[error("identity provider rejected the request: {0}")]
    Rejected(String),

    #[error("local identity could not be kept: {0}")]
    Persist(String),
}

pub type IdentityResult<T> = std::result::Result<T, IdentityError>;

/// A navigation intent that is not valid in the current state.
///
/// The navigation state is left untouched whenever one of these is returned.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NavigationError {
    #[error("the app shell is not active")]
    NotInShell,

    #[error("not waiting at the sign-in gate")]
    NotAtSignInGate,

    #[error("intent requires the {expected:?} tab, current tab is {actual:?}")]
    WrongTab { expected: Tab, actual: Tab },

    #[error("a provider is selected; close it first")]
    ProviderFocused,

    #[error("drill-down levels cannot be skipped")]
    SkippedLevel,

    #[error("nothing to go back from")]
    AtTopLevel,

    #[error("unknown provider {0}")]
    UnknownProvider(ProviderId),

    #[error("unknown procedure category '{0}'")]
    UnknownCategory(CategoryId),

    #[error("category '{category}' has no procedure at index {index}")]
    UnknownProcedure { category: CategoryId, index: usize },
}

pub type NavResult<T> = std::result::Result<T, NavigationError>;

/// Errors from the simulated scan flow and image picking.
#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    #[error("a scan can only start from the idle state")]
    NotIdle,

    #[error("no scan is in progress")]
    NotScanning,

    #[error("failed to read image {path}: {source}", path = path.display())]
    ImageUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{path} is not a recognised image", path = path.display())]
    NotAnImage { path: PathBuf },
}

pub type ScanResult<T> = std::result::Result<T, ScanError>;

/// Errors surfaced by [`crate::app::App::dispatch`].
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Navigation(#[from] NavigationError),

    #[error(transparent)]
    Identity(#[from] IdentityError),

    #[error(transparent)]
    Scan(#[from] ScanError),

    #[error("no profile is loaded")]
    NoProfile,
}

pub type AppResult<T> = std::result::Result<T, AppError>;
