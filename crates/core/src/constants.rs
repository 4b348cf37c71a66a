//! Constants used throughout the Sick&Seek core crate.

use std::time::Duration;

/// Default directory for locally stored user documents.
pub const DEFAULT_DATA_DIR: &str = "user_data";

/// File under the data directory holding the minted local identity id.
pub const LOCAL_IDENTITY_FILE: &str = "identity.json";

/// Document-store collection holding one profile document per identity.
pub const USERS_COLLECTION: &str = "users";

/// How long the splash screen is shown before the sign-in gate.
pub const DEFAULT_SPLASH_DURATION: Duration = Duration::from_millis(2500);

/// Default delay of the simulated scan.
pub const DEFAULT_SCAN_DELAY: Duration = Duration::from_millis(2000);

/// Bounds applied to a configured scan delay.
pub const MIN_SCAN_DELAY: Duration = Duration::from_millis(2000);
pub const MAX_SCAN_DELAY: Duration = Duration::from_millis(2500);

/// Deep-link fragment that opens the Health (profile) tab.
pub const PROFILE_DEEP_LINK: &str = "#profile";

/// Display name used when the identity provider supplies none.
pub const DEFAULT_DISPLAY_NAME: &str = "Guest";

/// Longest identity id accepted as a document id.
pub const MAX_DOCUMENT_ID_LEN: usize = 128;
