//! Navigation/view-state controller.
//!
//! The navigation state is an explicit value, mutated only through the named transitions on
//! [`Navigator`]. Every transition either applies completely or returns a
//! [`NavigationError`] and leaves the state untouched.
//!
//! ```text
//! Splash --splash_elapsed--> SignInGate --identity_confirmed--> Shell
//!   ^                             ^                               |
//!   |                             +----------signed_out-----------+
//! ```
//!
//! Inside the shell:
//! - a selected provider suspends the tab body until it is closed
//! - the Procedures tab drills down category, then procedure; `back` pops one level
//! - the insurance modal is independent of both

use crate::constants::PROFILE_DEEP_LINK;
use crate::{NavResult, NavigationError};
use serde::{Deserialize, Serialize};
use sickseek_catalog::Catalog;
use sickseek_types::{CategoryId, InsuranceKey, ProviderId};
use std::sync::Arc;

// ============================================================================
// STATE
// ============================================================================

/// Top-level tabs of the app shell, in tab-bar order.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tab {
    #[default]
    Find,
    Procedures,
    Scan,
    Matching,
    /// The "Health" tab.
    Profile,
}

impl Tab {
    pub const ALL: [Tab; 5] = [
        Tab::Find,
        Tab::Procedures,
        Tab::Scan,
        Tab::Matching,
        Tab::Profile,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Tab::Find => "Find",
            Tab::Procedures => "Procedures",
            Tab::Scan => "Scan",
            Tab::Matching => "Matching",
            Tab::Profile => "Health",
        }
    }

    /// Case-insensitive lookup by label or serialised name.
    pub fn parse(input: &str) -> Option<Self> {
        let input = input.trim();
        Self::ALL.into_iter().find(|tab| {
            tab.label().eq_ignore_ascii_case(input) || tab.as_key().eq_ignore_ascii_case(input)
        })
    }

    fn as_key(self) -> &'static str {
        match self {
            Tab::Find => "find",
            Tab::Procedures => "procedures",
            Tab::Scan => "scan",
            Tab::Matching => "matching",
            Tab::Profile => "profile",
        }
    }
}

impl std::fmt::Display for Tab {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Drill-down position within the Procedures tab.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "level", rename_all = "snake_case")]
pub enum DrillDown {
    /// The category grid.
    #[default]
    None,
    /// A category's procedure list.
    Category { category: CategoryId },
    /// The steps of one procedure.
    Procedure { category: CategoryId, index: usize },
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShellState {
    pub tab: Tab,
    pub drill_down: DrillDown,
    pub selected_provider: Option<ProviderId>,
    /// Insurance key shown in the info modal. At most one modal at a time.
    pub modal: Option<InsuranceKey>,
}

impl ShellState {
    pub fn on_tab(tab: Tab) -> Self {
        Self {
            tab,
            ..Self::default()
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "screen", rename_all = "snake_case")]
pub enum NavigationState {
    #[default]
    Splash,
    SignInGate,
    Shell(ShellState),
}

// ============================================================================
// DEEP LINKS
// ============================================================================

/// A recognised startup navigation hint.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeepLink {
    Profile,
}

impl DeepLink {
    /// Recognises `#profile` and `profile`, ignoring surrounding whitespace and case.
    pub fn parse(hint: &str) -> Option<Self> {
        let hint = hint.trim();
        let fragment = hint.strip_prefix('#').unwrap_or(hint);
        let expected = PROFILE_DEEP_LINK.trim_start_matches('#');
        fragment
            .eq_ignore_ascii_case(expected)
            .then_some(DeepLink::Profile)
    }

    pub fn tab(self) -> Tab {
        match self {
            DeepLink::Profile => Tab::Profile,
        }
    }
}

/// Link that opens the Health tab directly, for sharing a profile.
pub fn profile_share_link(origin: &str) -> String {
    format!("{}/{}", origin.trim_end_matches('/'), PROFILE_DEEP_LINK)
}

// ============================================================================
// NAVIGATOR
// ============================================================================

pub struct Navigator {
    catalog: Arc<Catalog>,
    state: NavigationState,
    deep_link: Option<DeepLink>,
}

impl Navigator {
    /// Starts at the splash screen. `start_hint` is consumed by the first
    /// [`Navigator::identity_confirmed`].
    pub fn new(catalog: Arc<Catalog>, start_hint: Option<&str>) -> Self {
        let deep_link = start_hint.and_then(DeepLink::parse);
        if let Some(link) = deep_link {
            tracing::debug!("startup deep link to {}", link.tab());
        }
        Self {
            catalog,
            state: NavigationState::Splash,
            deep_link,
        }
    }

    pub fn state(&self) -> &NavigationState {
        &self.state
    }

    pub fn catalog(&self) -> &Arc<Catalog> {
        &self.catalog
    }

    pub fn shell(&self) -> Option<&ShellState> {
        match &self.state {
            NavigationState::Shell(shell) => Some(shell),
            _ => None,
        }
    }

    fn shell_mut(&mut self) -> NavResult<&mut ShellState> {
        match &mut self.state {
            NavigationState::Shell(shell) => Ok(shell),
            _ => Err(NavigationError::NotInShell),
        }
    }

    /// Splash timer fired. Ignored outside the splash screen.
    ///
    /// Returns `true` if the state changed.
    pub fn splash_elapsed(&mut self) -> bool {
        if self.state != NavigationState::Splash {
            return false;
        }
        self.state = NavigationState::SignInGate;
        true
    }

    /// Identity confirmed at the sign-in gate: enter the shell.
    ///
    /// The opening tab is the startup deep link if one is pending (used once), else
    /// `target`, else [`Tab::Find`].
    ///
    /// # Errors
    ///
    /// Returns [`NavigationError::NotAtSignInGate`] from any other screen.
    pub fn identity_confirmed(&mut self, target: Option<Tab>) -> NavResult<Tab> {
        if self.state != NavigationState::SignInGate {
            return Err(NavigationError::NotAtSignInGate);
        }
        let tab = self
            .deep_link
            .take()
            .map(DeepLink::tab)
            .or(target)
            .unwrap_or_default();
        self.state = NavigationState::Shell(ShellState::on_tab(tab));
        Ok(tab)
    }

    /// Session ended: back to the sign-in gate from anywhere.
    pub fn signed_out(&mut self) {
        self.state = NavigationState::SignInGate;
    }

    /// Switches tab. Clears drill-down and provider focus; the modal is independent.
    pub fn select_tab(&mut self, tab: Tab) -> NavResult<()> {
        let shell = self.shell_mut()?;
        shell.tab = tab;
        shell.drill_down = DrillDown::None;
        shell.selected_provider = None;
        Ok(())
    }

    /// Focuses a provider from any tab.
    pub fn select_provider(&mut self, id: ProviderId) -> NavResult<()> {
        if self.catalog.provider(id).is_none() {
            return Err(NavigationError::UnknownProvider(id));
        }
        self.shell_mut()?.selected_provider = Some(id);
        Ok(())
    }

    /// Clears provider focus, returning to the tab that was active. No-op without focus.
    pub fn close_provider(&mut self) -> NavResult<()> {
        self.shell_mut()?.selected_provider = None;
        Ok(())
    }

    /// Opens a category's procedure list from the category grid.
    pub fn select_category(&mut self, category: CategoryId) -> NavResult<()> {
        let known = self.catalog.category(&category).is_some();
        let shell = self.procedures_shell()?;
        if shell.drill_down != DrillDown::None {
            return Err(NavigationError::SkippedLevel);
        }
        if !known {
            return Err(NavigationError::UnknownCategory(category));
        }
        shell.drill_down = DrillDown::Category { category };
        Ok(())
    }

    /// Opens a procedure's steps from the current category's procedure list.
    pub fn select_procedure(&mut self, index: usize) -> NavResult<()> {
        let catalog = Arc::clone(&self.catalog);
        let shell = self.procedures_shell()?;
        let category = match &shell.drill_down {
            DrillDown::Category { category } => category.clone(),
            _ => return Err(NavigationError::SkippedLevel),
        };

        let exists = catalog
            .category(&category)
            .and_then(|c| c.procedure(index))
            .is_some();
        if !exists {
            return Err(NavigationError::UnknownProcedure { category, index });
        }
        shell.drill_down = DrillDown::Procedure { category, index };
        Ok(())
    }

    /// Pops exactly one level: provider focus first, then the procedures drill-down.
    ///
    /// # Errors
    ///
    /// Returns [`NavigationError::AtTopLevel`] when there is nothing to pop.
    pub fn back(&mut self) -> NavResult<()> {
        let shell = self.shell_mut()?;
        if shell.selected_provider.take().is_some() {
            return Ok(());
        }
        shell.drill_down = match std::mem::take(&mut shell.drill_down) {
            DrillDown::Procedure { category, .. } => DrillDown::Category { category },
            DrillDown::Category { .. } => DrillDown::None,
            DrillDown::None => return Err(NavigationError::AtTopLevel),
        };
        Ok(())
    }

    /// Shows the insurance modal. Drill-down and provider focus are untouched.
    pub fn open_insurance(&mut self, key: InsuranceKey) -> NavResult<()> {
        self.shell_mut()?.modal = Some(key);
        Ok(())
    }

    /// Hides the insurance modal and nothing else.
    pub fn close_insurance(&mut self) -> NavResult<()> {
        self.shell_mut()?.modal = None;
        Ok(())
    }

    fn procedures_shell(&mut self) -> NavResult<&mut ShellState> {
        let shell = self.shell_mut()?;
        if shell.tab != Tab::Procedures {
            return Err(NavigationError::WrongTab {
                expected: Tab::Procedures,
                actual: shell.tab,
            });
        }
        if shell.selected_provider.is_some() {
            return Err(NavigationError::ProviderFocused);
        }
        Ok(shell)
    }
}
