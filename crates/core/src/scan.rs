//! Simulated prescription scan.
//!
//! `Idle -> Scanning -> Result`, with an explicit reset back to `Idle`. The scan performs
//! no analysis: after a fixed delay the result always carries the same canned annotations.

use crate::constants::DEFAULT_SCAN_DELAY;
use crate::image::ImageRef;
use crate::{ScanError, ScanResult};
use serde::Serialize;
use std::time::Duration;

pub const MEDICINE_ANNOTATION: &str = "Medicine: Tylenol";
pub const DOSAGE_ANNOTATION: &str = "Take: After Meal";
pub const SCAN_DISCLAIMER: &str =
    "The information provided above does not constitute medical advice.";

/// What the scan "found".
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ScanAnnotations {
    pub lines: Vec<String>,
    pub disclaimer: String,
}

impl ScanAnnotations {
    pub fn canned() -> Self {
        Self {
            lines: vec![MEDICINE_ANNOTATION.to_owned(), DOSAGE_ANNOTATION.to_owned()],
            disclaimer: SCAN_DISCLAIMER.to_owned(),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ScanState {
    #[default]
    Idle,
    Scanning {
        image: ImageRef,
    },
    Result {
        image: ImageRef,
        annotations: ScanAnnotations,
    },
}

#[derive(Debug)]
pub struct ScanFlow {
    state: ScanState,
    delay: Duration,
}

impl Default for ScanFlow {
    fn default() -> Self {
        Self::new(DEFAULT_SCAN_DELAY)
    }
}

impl ScanFlow {
    pub fn new(delay: Duration) -> Self {
        Self {
            state: ScanState::Idle,
            delay,
        }
    }

    pub fn state(&self) -> &ScanState {
        &self.state
    }

    /// How long a scan takes before its result is shown.
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Starts scanning a picked image.
    pub fn start(&mut self, image: ImageRef) -> ScanResult<()> {
        if self.state != ScanState::Idle {
            return Err(ScanError::NotIdle);
        }
        tracing::info!("scanning {}", image.file_name());
        self.state = ScanState::Scanning { image };
        Ok(())
    }

    /// Finishes the current scan with the canned annotations.
    pub fn complete(&mut self) -> ScanResult<&ScanAnnotations> {
        let image = match std::mem::take(&mut self.state) {
            ScanState::Scanning { image } => image,
            other => {
                self.state = other;
                return Err(ScanError::NotScanning);
            }
        };
        self.state = ScanState::Result {
            image,
            annotations: ScanAnnotations::canned(),
        };
        match &self.state {
            ScanState::Result { annotations, .. } => Ok(annotations),
            _ => Err(ScanError::NotScanning),
        }
    }

    /// Waits the configured delay, then completes the scan.
    pub async fn complete_after_delay(&mut self) -> ScanResult<&ScanAnnotations> {
        if !matches!(self.state, ScanState::Scanning { .. }) {
            return Err(ScanError::NotScanning);
        }
        tokio::time::sleep(self.delay).await;
        self.complete()
    }

    /// "New scan": back to idle from any state.
    pub fn reset(&mut self) {
        self.state = ScanState::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image::tests::write_png;
    use tempfile::TempDir;

    async fn picked_image(dir: &TempDir) -> ImageRef {
        ImageRef::pick(write_png(dir, "rx.png")).await.unwrap()
    }

    #[tokio::test]
    async fn test_scan_runs_idle_to_result() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let image = picked_image(&temp_dir).await;
        let mut flow = ScanFlow::default();

        flow.start(image.clone()).unwrap();
        assert_eq!(flow.state(), &ScanState::Scanning { image: image.clone() });

        let annotations = flow.complete().unwrap().clone();
        assert_eq!(
            annotations.lines,
            vec!["Medicine: Tylenol", "Take: After Meal"]
        );
        assert_eq!(annotations.disclaimer, SCAN_DISCLAIMER);
        assert_eq!(
            flow.state(),
            &ScanState::Result {
                image,
                annotations
            }
        );
    }

    #[tokio::test]
    async fn test_invalid_transitions_are_rejected() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let image = picked_image(&temp_dir).await;
        let mut flow = ScanFlow::default();

        assert!(matches!(flow.complete(), Err(ScanError::NotScanning)));

        flow.start(image.clone()).unwrap();
        assert!(matches!(flow.start(image.clone()), Err(ScanError::NotIdle)));

        flow.complete().unwrap();
        assert!(matches!(flow.complete(), Err(ScanError::NotScanning)));
        assert!(matches!(flow.state(), ScanState::Result { .. }));
    }

    #[tokio::test]
    async fn test_reset_returns_to_idle_from_any_state() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let image = picked_image(&temp_dir).await;
        let mut flow = ScanFlow::default();

        flow.start(image.clone()).unwrap();
        flow.reset();
        assert_eq!(flow.state(), &ScanState::Idle);

        flow.start(image).unwrap();
        flow.complete().unwrap();
        flow.reset();
        assert_eq!(flow.state(), &ScanState::Idle);
    }

    #[tokio::test(start_paused = true)]
    async fn test_complete_after_delay_waits_configured_time() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let image = picked_image(&temp_dir).await;
        let mut flow = ScanFlow::new(Duration::from_millis(2200));
        flow.start(image).unwrap();

        let started = tokio::time::Instant::now();
        flow.complete_after_delay().await.unwrap();
        assert!(started.elapsed() >= Duration::from_millis(2200));
        assert!(matches!(flow.state(), ScanState::Result { .. }));
    }
}
