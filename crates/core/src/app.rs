//! Application controller.
//!
//! [`App`] owns every piece of client state and is the only thing the runtime talks to:
//! - the session gate, which decides whether the shell may be shown at all
//! - the navigator (screen, tab, drill-down, provider focus, modal)
//! - the signed-in user's profile
//! - the scan flow and the Find tab's search inputs
//!
//! Timers live outside. The runtime sleeps for the splash duration and calls
//! [`App::splash_elapsed`], and sleeps for [`Effect::ScanTimer`] before calling
//! [`App::scan_elapsed`]. All business logic runs on the caller's task.

use crate::category::{resolve_category, CategoryIdentity};
use crate::config::ClientConfig;
use crate::identity::{Identity, IdentityProvider};
use crate::image::ImageRef;
use crate::matching::MatchingView;
use crate::navigation::{profile_share_link, DrillDown, NavigationState, Navigator, Tab};
use crate::profile::{ProfileChange, ProfileManager, TagKind, UserProfile};
use crate::scan::{ScanFlow, ScanState};
use crate::search::{category_chips, search, CategoryFilter};
use crate::session::{SessionGate, SessionState};
use crate::store::DocumentStore;
use crate::{AppError, AppResult, NavigationError};
use sickseek_catalog::{
    nationality_options, Catalog, InsuranceInfo, Procedure, ProcedureCategory, Provider, Review,
    ReviewFilter,
};
use sickseek_types::{CategoryId, InsuranceKey, ProviderId};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;

// ============================================================================
// INTENTS AND EFFECTS
// ============================================================================

/// A user intent handled by [`App::dispatch`].
#[derive(Clone, Debug, PartialEq)]
pub enum Intent {
    SelectTab(Tab),
    /// Replace the Find tab's free-text query.
    Search(String),
    /// Pick a category chip on the Find tab.
    SelectChip(CategoryFilter),
    SelectProvider(ProviderId),
    CloseProvider,
    FilterReviews(ReviewFilter),
    SelectCategory(CategoryId),
    SelectProcedure(usize),
    Back,
    OpenInsurance(InsuranceKey),
    CloseInsurance,
    AddTag(TagKind, String),
    RemoveTag(TagKind, String),
    Rename(String),
    /// Pick the image at this path and start scanning it.
    StartScan(PathBuf),
    ResetScan,
    SignOut,
}

/// Follow-up work the runtime must perform after an intent.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Effect {
    None,
    /// The result of a profile operation.
    Profile(ProfileChange),
    /// Call [`App::scan_elapsed`] after this delay.
    ScanTimer(Duration),
}

// ============================================================================
// SCREENS
// ============================================================================

/// What should be on screen right now.
#[derive(Debug)]
pub enum Screen<'a> {
    Splash,
    /// Past the splash but the session is not resolved yet.
    Loading,
    SignInGate,
    Shell {
        tab: Tab,
        body: ShellBody<'a>,
        modal: Option<InsuranceInfo>,
    },
}

#[derive(Debug)]
pub enum ShellBody<'a> {
    Provider {
        provider: &'a Provider,
        badge: CategoryIdentity,
        insurance: Vec<InsuranceInfo>,
        reviews: Vec<&'a Review>,
        nationalities: Vec<String>,
        filter: &'a ReviewFilter,
    },
    Find {
        chips: Vec<CategoryFilter>,
        selected: &'a CategoryFilter,
        query: &'a str,
        results: Vec<&'a Provider>,
    },
    CategoryGrid {
        categories: &'a [ProcedureCategory],
    },
    ProcedureList {
        category: &'a ProcedureCategory,
    },
    Steps {
        category: &'a ProcedureCategory,
        procedure: &'a Procedure,
    },
    Scan(&'a ScanState),
    Matching(MatchingView),
    Profile {
        identity: Option<&'a Identity>,
        profile: Option<&'a UserProfile>,
    },
}

#[derive(Debug, Default)]
struct FindInputs {
    category: CategoryFilter,
    query: String,
}

// ============================================================================
// APP
// ============================================================================

pub struct App<P, S> {
    catalog: Arc<Catalog>,
    navigator: Navigator,
    session: SessionGate<P>,
    identity_changes: watch::Receiver<Option<Identity>>,
    store: Arc<S>,
    profile: Option<ProfileManager<S>>,
    scan: ScanFlow,
    find: FindInputs,
    review_filter: ReviewFilter,
}

impl<P: IdentityProvider, S: DocumentStore> App<P, S> {
    pub fn new(catalog: Arc<Catalog>, provider: Arc<P>, store: Arc<S>, config: &ClientConfig) -> Self {
        let identity_changes = provider.subscribe();
        Self {
            navigator: Navigator::new(Arc::clone(&catalog), config.start_hint()),
            catalog,
            session: SessionGate::new(provider),
            identity_changes,
            store,
            profile: None,
            scan: ScanFlow::new(config.scan_delay()),
            find: FindInputs::default(),
            review_filter: ReviewFilter::All,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn navigation(&self) -> &NavigationState {
        self.navigator.state()
    }

    pub fn session(&self) -> &SessionState {
        self.session.state()
    }

    pub fn profile(&self) -> Option<&UserProfile> {
        self.profile.as_ref().map(ProfileManager::profile)
    }

    /// Category identity used to colour a label (badges, active chips).
    pub fn category_identity(&self, label: &str) -> CategoryIdentity {
        resolve_category(self.catalog.categories(), label)
    }

    /// Link that opens the Health tab on `origin`.
    pub fn share_link(&self, origin: &str) -> String {
        profile_share_link(origin)
    }

    // ------------------------------------------------------------------------
    // Session lifecycle
    // ------------------------------------------------------------------------

    /// Startup identity check. Runs alongside the splash timer.
    pub async fn resolve_session(&mut self) -> &SessionState {
        self.session.resolve().await;
        self.enter_shell_if_authenticated().await;
        self.session.state()
    }

    /// Applies a startup identity check the runtime ran concurrently with the splash.
    pub async fn session_resolved(&mut self, existing: Option<Identity>) -> &SessionState {
        self.session.resolve_with(existing);
        self.enter_shell_if_authenticated().await;
        self.session.state()
    }

    /// Splash timer fired.
    ///
    /// An existing session skips the sign-in gate.
    pub async fn splash_elapsed(&mut self) {
        if self.navigator.splash_elapsed() {
            self.enter_shell_if_authenticated().await;
        }
    }

    /// Interactive sign-in from the gate, opening `target` (or the default tab).
    ///
    /// # Errors
    ///
    /// - [`NavigationError::NotAtSignInGate`] outside the gate
    /// - [`AppError::Identity`] if the identity provider fails; the gate stays up
    pub async fn sign_in(&mut self, target: Option<Tab>) -> AppResult<Tab> {
        if self.navigator.state() != &NavigationState::SignInGate {
            return Err(NavigationError::NotAtSignInGate.into());
        }
        let identity = self.session.sign_in().await?;
        self.open_shell(&identity, target).await
    }

    /// Signs out and returns to the sign-in gate. Provider errors are logged only.
    pub async fn sign_out(&mut self) {
        let _ = self.session.sign_out().await;
        self.leave_shell();
    }

    /// Applies identity changes pushed by the identity provider since the last call.
    ///
    /// Returns `true` if the session changed.
    pub async fn sync_identity(&mut self) -> bool {
        if !self.identity_changes.has_changed().unwrap_or(false) {
            return false;
        }
        let identity = self.identity_changes.borrow_and_update().clone();
        if !self.session.apply_identity_change(identity) {
            return false;
        }

        match self.session.identity().cloned() {
            Some(identity) => {
                tracing::info!("identity changed to {}", identity.id);
                if self.navigator.state() == &NavigationState::SignInGate {
                    if let Err(e) = self.open_shell(&identity, None).await {
                        tracing::warn!("could not open shell after identity change: {}", e);
                    }
                } else if self.profile.is_some() {
                    self.profile = Some(ProfileManager::load(Arc::clone(&self.store), &identity).await);
                }
            }
            None => {
                tracing::info!("identity provider ended the session");
                self.leave_shell();
            }
        }
        true
    }

    async fn enter_shell_if_authenticated(&mut self) {
        if self.navigator.state() != &NavigationState::SignInGate {
            return;
        }
        if let Some(identity) = self.session.identity().cloned() {
            if let Err(e) = self.open_shell(&identity, None).await {
                tracing::warn!("could not open shell for restored session: {}", e);
            }
        }
    }

    async fn open_shell(&mut self, identity: &Identity, target: Option<Tab>) -> AppResult<Tab> {
        let tab = self.navigator.identity_confirmed(target)?;
        self.profile = Some(ProfileManager::load(Arc::clone(&self.store), identity).await);
        tracing::info!("entered app shell on the {} tab", tab);
        Ok(tab)
    }

    fn leave_shell(&mut self) {
        self.navigator.signed_out();
        self.profile = None;
        self.scan.reset();
        self.find = FindInputs::default();
        self.review_filter = ReviewFilter::All;
    }

    // ------------------------------------------------------------------------
    // Intents
    // ------------------------------------------------------------------------

    /// Handles one user intent.
    ///
    /// # Errors
    ///
    /// Every intent except [`Intent::SignOut`] requires the shell. Invalid intents leave
    /// all state unchanged.
    pub async fn dispatch(&mut self, intent: Intent) -> AppResult<Effect> {
        if intent != Intent::SignOut && self.navigator.shell().is_none() {
            return Err(NavigationError::NotInShell.into());
        }

        match intent {
            Intent::SelectTab(tab) => self.navigator.select_tab(tab)?,
            Intent::Search(query) => self.find.query = query,
            Intent::SelectChip(category) => self.find.category = category,
            Intent::SelectProvider(id) => {
                self.navigator.select_provider(id)?;
                self.review_filter = ReviewFilter::All;
            }
            Intent::CloseProvider => self.navigator.close_provider()?,
            Intent::FilterReviews(filter) => self.review_filter = filter,
            Intent::SelectCategory(id) => self.navigator.select_category(id)?,
            Intent::SelectProcedure(index) => self.navigator.select_procedure(index)?,
            Intent::Back => self.navigator.back()?,
            Intent::OpenInsurance(key) => self.navigator.open_insurance(key)?,
            Intent::CloseInsurance => self.navigator.close_insurance()?,
            Intent::AddTag(kind, value) => {
                let change = self.profile_mut()?.add_tag(kind, &value).await;
                return Ok(Effect::Profile(change));
            }
            Intent::RemoveTag(kind, value) => {
                let change = self.profile_mut()?.remove_tag(kind, &value).await;
                return Ok(Effect::Profile(change));
            }
            Intent::Rename(name) => {
                let change = self.profile_mut()?.rename(&name).await;
                return Ok(Effect::Profile(change));
            }
            Intent::StartScan(path) => {
                let image = ImageRef::pick(&path).await?;
                self.scan.start(image)?;
                return Ok(Effect::ScanTimer(self.scan.delay()));
            }
            Intent::ResetScan => self.scan.reset(),
            Intent::SignOut => self.sign_out().await,
        }
        Ok(Effect::None)
    }

    /// Scan timer fired.
    pub fn scan_elapsed(&mut self) -> AppResult<()> {
        self.scan.complete()?;
        Ok(())
    }

    fn profile_mut(&mut self) -> AppResult<&mut ProfileManager<S>> {
        self.profile.as_mut().ok_or(AppError::NoProfile)
    }

    // ------------------------------------------------------------------------
    // Rendering
    // ------------------------------------------------------------------------

    pub fn screen(&self) -> Screen<'_> {
        let shell = match self.navigator.state() {
            NavigationState::Splash => return Screen::Splash,
            _ if !self.session.is_resolved() => return Screen::Loading,
            NavigationState::SignInGate => return Screen::SignInGate,
            NavigationState::Shell(shell) => shell,
        };

        Screen::Shell {
            tab: shell.tab,
            body: self.shell_body(shell.tab, &shell.drill_down, shell.selected_provider),
            modal: shell.modal.as_ref().map(|key| self.catalog.insurance(key)),
        }
    }

    fn shell_body(
        &self,
        tab: Tab,
        drill_down: &DrillDown,
        selected: Option<ProviderId>,
    ) -> ShellBody<'_> {
        if let Some(provider) = selected.and_then(|id| self.catalog.provider(id)) {
            let all_reviews = self.catalog.reviews_for(provider.id);
            return ShellBody::Provider {
                provider,
                badge: self.category_identity(provider.specialty.label()),
                insurance: provider
                    .insurance
                    .iter()
                    .map(|key| self.catalog.insurance(key))
                    .collect(),
                nationalities: nationality_options(&all_reviews),
                reviews: self.review_filter.apply(&all_reviews),
                filter: &self.review_filter,
            };
        }

        match tab {
            Tab::Find => ShellBody::Find {
                chips: category_chips(),
                selected: &self.find.category,
                query: &self.find.query,
                results: search(self.catalog.providers(), &self.find.category, &self.find.query),
            },
            Tab::Procedures => self.procedures_body(drill_down),
            Tab::Scan => ShellBody::Scan(self.scan.state()),
            Tab::Matching => ShellBody::Matching(MatchingView::locked()),
            Tab::Profile => ShellBody::Profile {
                identity: self.session.identity(),
                profile: self.profile(),
            },
        }
    }

    fn procedures_body(&self, drill_down: &DrillDown) -> ShellBody<'_> {
        let grid = ShellBody::CategoryGrid {
            categories: self.catalog.categories(),
        };
        match drill_down {
            DrillDown::None => grid,
            DrillDown::Category { category } => match self.catalog.category(category) {
                Some(category) => ShellBody::ProcedureList { category },
                None => grid,
            },
            DrillDown::Procedure { category, index } => {
                let Some(category) = self.catalog.category(category) else {
                    return grid;
                };
                match category.procedure(*index) {
                    Some(procedure) => ShellBody::Steps {
                        category,
                        procedure,
                    },
                    None => ShellBody::ProcedureList { category },
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image::tests::write_png;
    use crate::profile::RejectReason;
    use crate::session::tests::ScriptedIdentityProvider;
    use crate::store::MemoryDocumentStore;
    use crate::{IdentityError, ScanError};
    use tempfile::TempDir;

    type TestApp = App<ScriptedIdentityProvider, MemoryDocumentStore>;

    fn jane() -> Identity {
        Identity::new("u-jane").with_display_name("Jane")
    }

    fn app_with(
        provider: ScriptedIdentityProvider,
        hint: Option<&str>,
    ) -> (TestApp, Arc<ScriptedIdentityProvider>, Arc<MemoryDocumentStore>) {
        let catalog = Arc::new(Catalog::load_builtin().unwrap());
        let provider = Arc::new(provider);
        let store = Arc::new(MemoryDocumentStore::new());
        let mut config = ClientConfig::default();
        if let Some(hint) = hint {
            config = ClientConfig::new(
                config.data_dir().to_path_buf(),
                config.splash_duration(),
                config.scan_delay(),
                Some(hint.to_owned()),
                config.identity().clone(),
            )
            .unwrap();
        }
        let app = App::new(catalog, Arc::clone(&provider), Arc::clone(&store), &config);
        (app, provider, store)
    }

    async fn signed_in_app() -> (TestApp, Arc<MemoryDocumentStore>) {
        let (mut app, _, store) =
            app_with(ScriptedIdentityProvider::new(Some(jane()), vec![]), None);
        app.resolve_session().await;
        app.splash_elapsed().await;
        (app, store)
    }

    fn current_tab(app: &TestApp) -> Option<Tab> {
        match app.screen() {
            Screen::Shell { tab, .. } => Some(tab),
            _ => None,
        }
    }

    #[tokio::test]
    async fn test_anonymous_start_shows_gate_then_find() {
        let (mut app, _, store) = app_with(
            ScriptedIdentityProvider::new(None, vec![Ok(jane())]),
            None,
        );
        assert!(matches!(app.screen(), Screen::Splash));

        app.resolve_session().await;
        app.splash_elapsed().await;
        assert!(matches!(app.screen(), Screen::SignInGate));

        assert_eq!(app.sign_in(None).await.unwrap(), Tab::Find);
        assert_eq!(current_tab(&app), Some(Tab::Find));
        assert_eq!(app.profile().unwrap().name, "Jane");
        assert_eq!(store.write_count(), 0, "default profile is not written");
    }

    #[tokio::test]
    async fn test_restored_session_skips_gate() {
        let (app, _) = signed_in_app().await;
        assert_eq!(current_tab(&app), Some(Tab::Find));
        assert!(app.profile().is_some());
    }

    #[tokio::test]
    async fn test_shell_waits_for_session_resolution() {
        let (mut app, _, _) = app_with(ScriptedIdentityProvider::new(Some(jane()), vec![]), None);

        app.splash_elapsed().await;
        assert!(matches!(app.screen(), Screen::Loading));

        app.resolve_session().await;
        assert_eq!(current_tab(&app), Some(Tab::Find));
    }

    #[tokio::test]
    async fn test_late_identity_check_resolves_from_loading() {
        let (mut app, _, _) = app_with(ScriptedIdentityProvider::new(None, vec![]), None);
        app.splash_elapsed().await;
        assert!(matches!(app.screen(), Screen::Loading));

        app.session_resolved(Some(jane())).await;
        assert_eq!(current_tab(&app), Some(Tab::Find));
        assert_eq!(app.profile().unwrap().name, "Jane");

        let (mut anonymous, _, _) = app_with(ScriptedIdentityProvider::new(None, vec![]), None);
        anonymous.splash_elapsed().await;
        anonymous.session_resolved(None).await;
        assert!(matches!(anonymous.screen(), Screen::SignInGate));
    }

    #[tokio::test]
    async fn test_deep_link_opens_health_tab() {
        let (mut app, _, _) = app_with(
            ScriptedIdentityProvider::new(Some(jane()), vec![]),
            Some("#profile"),
        );
        app.resolve_session().await;
        app.splash_elapsed().await;
        assert_eq!(current_tab(&app), Some(Tab::Profile));
    }

    #[tokio::test]
    async fn test_failed_sign_in_keeps_gate() {
        let (mut app, _, _) = app_with(
            ScriptedIdentityProvider::new(None, vec![Err(IdentityError::Cancelled)]),
            None,
        );
        app.resolve_session().await;
        app.splash_elapsed().await;

        let err = app.sign_in(Some(Tab::Profile)).await.unwrap_err();
        assert!(matches!(err, AppError::Identity(IdentityError::Cancelled)));
        assert!(matches!(app.screen(), Screen::SignInGate));
        assert!(app.profile().is_none());
    }

    #[tokio::test]
    async fn test_sign_in_to_requested_tab() {
        let (mut app, _, _) =
            app_with(ScriptedIdentityProvider::new(None, vec![Ok(jane())]), None);
        app.resolve_session().await;
        app.splash_elapsed().await;

        assert_eq!(app.sign_in(Some(Tab::Profile)).await.unwrap(), Tab::Profile);
    }

    #[tokio::test]
    async fn test_sign_out_returns_to_gate() {
        let (mut app, _) = signed_in_app().await;
        app.dispatch(Intent::SelectTab(Tab::Procedures)).await.unwrap();
        app.dispatch(Intent::SelectCategory(CategoryId::from("dental")))
            .await
            .unwrap();

        app.dispatch(Intent::SignOut).await.unwrap();
        assert!(matches!(app.screen(), Screen::SignInGate));
        assert_eq!(app.session(), &SessionState::Anonymous);
        assert!(app.profile().is_none());

        let err = app.dispatch(Intent::Back).await.unwrap_err();
        assert!(matches!(
            err,
            AppError::Navigation(NavigationError::NotInShell)
        ));
    }

    #[tokio::test]
    async fn test_pushed_sign_out_returns_to_gate() {
        let (mut app, provider, _) =
            app_with(ScriptedIdentityProvider::new(Some(jane()), vec![]), None);
        app.resolve_session().await;
        app.splash_elapsed().await;
        assert!(!app.sync_identity().await);

        provider.sender.send_replace(None);
        assert!(app.sync_identity().await);
        assert!(matches!(app.screen(), Screen::SignInGate));
    }

    #[tokio::test]
    async fn test_pushed_sign_in_opens_shell() {
        let (mut app, provider, _) = app_with(ScriptedIdentityProvider::new(None, vec![]), None);
        app.resolve_session().await;
        app.splash_elapsed().await;

        provider.sender.send_replace(Some(jane()));
        assert!(app.sync_identity().await);
        assert_eq!(current_tab(&app), Some(Tab::Find));
    }

    #[tokio::test]
    async fn test_find_results_put_hot_providers_first() {
        let (mut app, _) = signed_in_app().await;
        app.dispatch(Intent::Search("mapo".into())).await.unwrap();

        let Screen::Shell {
            body: ShellBody::Find { results, query, .. },
            ..
        } = app.screen()
        else {
            panic!("expected the Find tab");
        };
        assert_eq!(query, "mapo");
        let ids: Vec<u32> = results.iter().map(|p| p.id.0).collect();
        assert_eq!(ids, vec![14, 2, 7, 9]);
    }

    #[tokio::test]
    async fn test_provider_detail_with_review_filter_and_modal() {
        let (mut app, _) = signed_in_app().await;
        app.dispatch(Intent::SelectProvider(ProviderId(1))).await.unwrap();
        app.dispatch(Intent::FilterReviews(ReviewFilter::parse("Italy")))
            .await
            .unwrap();
        app.dispatch(Intent::OpenInsurance(InsuranceKey::from("All Types")))
            .await
            .unwrap();
        app.dispatch(Intent::CloseInsurance).await.unwrap();

        let Screen::Shell {
            body:
                ShellBody::Provider {
                    provider,
                    reviews,
                    nationalities,
                    insurance,
                    ..
                },
            modal,
            ..
        } = app.screen()
        else {
            panic!("expected provider detail");
        };
        assert_eq!(provider.id, ProviderId(1));
        assert!(modal.is_none());
        assert_eq!(nationalities, vec!["All", "USA", "Italy", "China"]);
        assert_eq!(reviews.len(), 1);
        assert_eq!(reviews[0].author, "Marco P.");
        assert_eq!(insurance.len(), 2);
    }

    #[tokio::test]
    async fn test_procedures_drill_down_renders_each_level() {
        let (mut app, _) = signed_in_app().await;
        app.dispatch(Intent::SelectTab(Tab::Procedures)).await.unwrap();
        assert!(matches!(
            app.screen(),
            Screen::Shell {
                body: ShellBody::CategoryGrid { .. },
                ..
            }
        ));

        app.dispatch(Intent::SelectCategory(CategoryId::from("dental")))
            .await
            .unwrap();
        app.dispatch(Intent::SelectProcedure(0)).await.unwrap();
        assert!(matches!(
            app.screen(),
            Screen::Shell {
                body: ShellBody::Steps { .. },
                ..
            }
        ));

        app.dispatch(Intent::Back).await.unwrap();
        assert!(matches!(
            app.screen(),
            Screen::Shell {
                body: ShellBody::ProcedureList { .. },
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_profile_intents_report_outcomes() {
        let (mut app, store) = signed_in_app().await;

        let effect = app
            .dispatch(Intent::AddTag(TagKind::Allergy, "Peanuts".into()))
            .await
            .unwrap();
        assert_eq!(effect, Effect::Profile(ProfileChange::Applied { persisted: true }));

        let effect = app
            .dispatch(Intent::AddTag(TagKind::Allergy, "Peanuts".into()))
            .await
            .unwrap();
        assert_eq!(
            effect,
            Effect::Profile(ProfileChange::Rejected(RejectReason::Duplicate))
        );
        assert_eq!(store.write_count(), 1);
    }

    #[tokio::test]
    async fn test_scan_intent_schedules_timer() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let image = write_png(&temp_dir, "rx.png");
        let (mut app, _) = signed_in_app().await;
        app.dispatch(Intent::SelectTab(Tab::Scan)).await.unwrap();

        let effect = app.dispatch(Intent::StartScan(image)).await.unwrap();
        assert_eq!(effect, Effect::ScanTimer(Duration::from_millis(2000)));

        app.scan_elapsed().unwrap();
        assert!(matches!(
            app.screen(),
            Screen::Shell {
                body: ShellBody::Scan(ScanState::Result { .. }),
                ..
            }
        ));

        app.dispatch(Intent::ResetScan).await.unwrap();
        let err = app.scan_elapsed().unwrap_err();
        assert!(matches!(err, AppError::Scan(ScanError::NotScanning)));
    }

    #[tokio::test]
    async fn test_category_identity_and_share_link() {
        let (app, _) = signed_in_app().await;
        assert_eq!(
            app.category_identity("ENT"),
            CategoryIdentity::Category(CategoryId::from("ent"))
        );
        assert_eq!(
            app.share_link("https://sickseek.example"),
            "https://sickseek.example/#profile"
        );
    }
}
