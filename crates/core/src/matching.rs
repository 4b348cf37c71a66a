//! Matching tab. A locked premium placeholder with no matching logic behind it.

use serde::Serialize;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct MatchingView {
    pub title: &'static str,
    pub subtitle: &'static str,
    pub headline: &'static str,
    pub pitch: &'static str,
    pub call_to_action: &'static str,
    pub locked: bool,
}

impl MatchingView {
    pub fn locked() -> Self {
        Self {
            title: "Matching",
            subtitle: "Connect with buddies.",
            headline: "Premium Feature",
            pitch: "Connect with verified local bilingual buddies.",
            call_to_action: "Unlock Premium",
            locked: true,
        }
    }
}
