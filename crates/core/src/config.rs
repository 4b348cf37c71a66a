//! Client runtime configuration.
//!
//! Configuration is resolved once at process startup and then passed into the app
//! controller. Nothing in the core reads process environment during event handling; the
//! binaries call [`ClientConfig::from_lookup`] with `std::env::var` after loading `.env`.

use crate::constants::{
    DEFAULT_DATA_DIR, DEFAULT_SCAN_DELAY, DEFAULT_SPLASH_DURATION, LOCAL_IDENTITY_FILE,
    MAX_SCAN_DELAY, MIN_SCAN_DELAY,
};
use crate::identity::LocalIdentityConfig;
use crate::{CoreError, CoreResult};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const ENV_DATA_DIR: &str = "SICKSEEK_DATA_DIR";
pub const ENV_SPLASH_MS: &str = "SICKSEEK_SPLASH_MS";
pub const ENV_SCAN_MS: &str = "SICKSEEK_SCAN_MS";
pub const ENV_START_HINT: &str = "SICKSEEK_START_HINT";
pub const ENV_IDENTITY_ID: &str = "SICKSEEK_IDENTITY_ID";
pub const ENV_IDENTITY_NAME: &str = "SICKSEEK_IDENTITY_NAME";
pub const ENV_IDENTITY_EMAIL: &str = "SICKSEEK_IDENTITY_EMAIL";
pub const ENV_SIGNED_IN: &str = "SICKSEEK_SIGNED_IN";

/// Client configuration resolved at startup.
#[derive(Clone, Debug)]
pub struct ClientConfig {
    data_dir: PathBuf,
    splash_duration: Duration,
    scan_delay: Duration,
    start_hint: Option<String>,
    identity: LocalIdentityConfig,
}

impl ClientConfig {
    /// Create a new `ClientConfig`.
    ///
    /// The scan delay is clamped into the supported 2.0–2.5 s window.
    pub fn new(
        data_dir: PathBuf,
        splash_duration: Duration,
        scan_delay: Duration,
        start_hint: Option<String>,
        identity: LocalIdentityConfig,
    ) -> CoreResult<Self> {
        if data_dir.as_os_str().is_empty() {
            return Err(CoreError::InvalidConfig("data_dir cannot be empty".into()));
        }

        Ok(Self {
            data_dir,
            splash_duration,
            scan_delay: scan_delay.clamp(MIN_SCAN_DELAY, MAX_SCAN_DELAY),
            start_hint: start_hint
                .map(|h| h.trim().to_string())
                .filter(|h| !h.is_empty()),
            identity,
        })
    }

    /// Resolve configuration from a key lookup (usually `std::env::var(..).ok()`).
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidConfig`] if a duration or boolean value does not parse.
    pub fn from_lookup<F>(lookup: F) -> CoreResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let data_dir = lookup(ENV_DATA_DIR)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_DATA_DIR.into());

        let splash_duration =
            duration_from_env_value(ENV_SPLASH_MS, lookup(ENV_SPLASH_MS), DEFAULT_SPLASH_DURATION)?;
        let scan_delay =
            duration_from_env_value(ENV_SCAN_MS, lookup(ENV_SCAN_MS), DEFAULT_SCAN_DELAY)?;

        let identity = LocalIdentityConfig {
            id: non_blank(lookup(ENV_IDENTITY_ID)),
            display_name: non_blank(lookup(ENV_IDENTITY_NAME)),
            email: non_blank(lookup(ENV_IDENTITY_EMAIL)),
            signed_in: bool_from_env_value(ENV_SIGNED_IN, lookup(ENV_SIGNED_IN))?,
        };

        Self::new(
            PathBuf::from(data_dir),
            splash_duration,
            scan_delay,
            lookup(ENV_START_HINT),
            identity,
        )
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Where the local identity provider keeps a minted id.
    pub fn identity_file(&self) -> PathBuf {
        self.data_dir.join(LOCAL_IDENTITY_FILE)
    }

    pub fn splash_duration(&self) -> Duration {
        self.splash_duration
    }

    pub fn scan_delay(&self) -> Duration {
        self.scan_delay
    }

    pub fn start_hint(&self) -> Option<&str> {
        self.start_hint.as_deref()
    }

    pub fn identity(&self) -> &LocalIdentityConfig {
        &self.identity
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            splash_duration: DEFAULT_SPLASH_DURATION,
            scan_delay: DEFAULT_SCAN_DELAY,
            start_hint: None,
            identity: LocalIdentityConfig::default(),
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Parse a millisecond duration from an optional string value.
///
/// If `value` is `None` or empty/whitespace, returns `default`.
pub fn duration_from_env_value(
    key: &str,
    value: Option<String>,
    default: Duration,
) -> CoreResult<Duration> {
    match non_blank(value) {
        None => Ok(default),
        Some(v) => v.parse::<u64>().map(Duration::from_millis).map_err(|_| {
            CoreError::InvalidConfig(format!("{key} must be a whole number of milliseconds"))
        }),
    }
}

/// Parse a boolean flag; accepts `true/false`, `1/0`, `yes/no`. Missing means `false`.
pub fn bool_from_env_value(key: &str, value: Option<String>) -> CoreResult<bool> {
    match non_blank(value).map(|v| v.to_ascii_lowercase()).as_deref() {
        None => Ok(false),
        Some("true" | "1" | "yes") => Ok(true),
        Some("false" | "0" | "no") => Ok(false),
        Some(_) => Err(CoreError::InvalidConfig(format!("{key} must be true or false"))),
    }
}
