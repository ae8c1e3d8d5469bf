//! Translation session lifecycle.
//!
//! One [`SessionController`] drives one host window. It decides which surface
//! shows a query, debounces the fetch, and applies fetch results back on the
//! task that owns it. Every request bumps a generation counter; results carry
//! the generation they were started with and are dropped when it is no longer
//! current, so a slow answer can never overwrite a newer query.

use crate::application::registry::{ExternalLink, Fetched, ProviderRegistry};
use crate::domain::model::{
    DismissReason, FocusTarget, HostAction, SessionPhase, SurfaceKind, TranslationResult,
};
use crate::domain::traits::SurfaceHost;
use crate::infrastructure::config::PopupSettings;
use crate::presentation::messages::Locale;
use crate::presentation::view::{Key, KeyStroke, TranslationView};
use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, info, trace, warn};

pub const POPUP_FOCUS: &str = "qtrans.popup";
pub const TOOL_WINDOW_FOCUS: &str = "qtrans.tool-window";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Session {
    pub generation: u64,
    pub query: String,
    pub provider: Option<String>,
    pub phase: SessionPhase,
    pub surface: SurfaceKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestOutcome {
    /// Nothing selected.
    Ignored,
    /// The surface already shows this query; it only got the focus.
    Refocused,
    Scheduled { generation: u64 },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Applied {
    Shown(TranslationResult),
    /// Result of a superseded or dismissed session; nothing changed.
    Stale { generation: u64 },
}

#[derive(Debug)]
struct FetchEvent {
    generation: u64,
    query: String,
    fetched: Result<Option<Fetched>, String>,
}

pub struct SessionController<H: SurfaceHost> {
    host: H,
    registry: Arc<ProviderRegistry>,
    settings: PopupSettings,
    locale: Locale,
    generation: Arc<AtomicU64>,
    session: Option<Session>,
    popup: Option<TranslationView>,
    docked: Option<TranslationView>,
    previously_focused: Option<FocusTarget>,
    tx: mpsc::UnboundedSender<FetchEvent>,
    rx: mpsc::UnboundedReceiver<FetchEvent>,
}

impl<H: SurfaceHost> SessionController<H> {
    pub fn new(
        host: H,
        registry: Arc<ProviderRegistry>,
        settings: PopupSettings,
        locale: Locale,
    ) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            host,
            registry,
            settings,
            locale,
            generation: Arc::new(AtomicU64::new(0)),
            session: None,
            popup: None,
            docked: None,
            previously_focused: None,
            tx,
            rx,
        }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn registry(&self) -> &ProviderRegistry {
        &self.registry
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn phase(&self) -> SessionPhase {
        self.session
            .as_ref()
            .map(|s| s.phase)
            .unwrap_or(SessionPhase::Idle)
    }

    pub fn is_pinned(&self) -> bool {
        self.docked.is_some()
    }

    pub fn popup_visible(&self) -> bool {
        self.popup.is_some()
    }

    /// View of the current session's surface, else whichever is open.
    pub fn active_view(&self) -> Option<&TranslationView> {
        match self.session.as_ref().map(|s| s.surface) {
            Some(SurfaceKind::ToolWindow) => self.docked.as_ref(),
            Some(SurfaceKind::Popup) => self.popup.as_ref(),
            None => self.popup.as_ref().or(self.docked.as_ref()),
        }
    }

    pub fn active_view_mut(&mut self) -> Option<&mut TranslationView> {
        match self.session.as_ref().map(|s| s.surface) {
            Some(SurfaceKind::ToolWindow) => self.docked.as_mut(),
            Some(SurfaceKind::Popup) => self.popup.as_mut(),
            None => self.popup.as_mut().or(self.docked.as_mut()),
        }
    }

    /// Show the translation of `query`.
    pub fn request(&mut self, query: &str, request_focus: bool) -> RequestOutcome {
        if query.trim().is_empty() {
            return RequestOutcome::Ignored;
        }

        // focus on one of our own surfaces keeps the owner recorded before it
        match self.host.focus_owner() {
            Some(owner) if is_own_surface(&owner) => {}
            owner => self.previously_focused = owner,
        }

        if self.docked.is_none() && self.settings.show_in_tool_window {
            self.docked = Some(TranslationView::new(self.settings.font_size));
        }

        let kind = if self.docked.is_some() {
            SurfaceKind::ToolWindow
        } else {
            SurfaceKind::Popup
        };

        let same_query = self
            .session
            .as_ref()
            .is_some_and(|s| s.surface == kind && s.query == query && s.phase != SessionPhase::Idle);
        if same_query && self.view(kind).is_some() {
            debug!("{:?} already shows {:?}, refocusing", kind, query);
            if request_focus {
                self.host.focus(&focus_target(kind));
            }
            return RequestOutcome::Refocused;
        }

        let generation = self.start_fetch(query, kind);
        if request_focus {
            self.host.focus(&focus_target(kind));
        }
        RequestOutcome::Scheduled { generation }
    }

    fn start_fetch(&mut self, query: &str, kind: SurfaceKind) -> u64 {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        info!("session {} for {:?} on {:?}", generation, query, kind);

        self.session = Some(Session {
            generation,
            query: query.to_string(),
            provider: None,
            phase: SessionPhase::Fetching,
            surface: kind,
        });

        let font_size = self.settings.font_size;
        let fetching = self.locale.fetching();
        let slot = match kind {
            SurfaceKind::Popup => &mut self.popup,
            SurfaceKind::ToolWindow => &mut self.docked,
        };
        let view = slot.get_or_insert_with(|| TranslationView::new(font_size));
        if view.is_empty() {
            view.set_text(fetching, None, None);
        }
        view.start_wait();
        self.show(kind);

        self.schedule(generation, query.to_string());
        generation
    }

    /// Run the fetch after the debounce delay unless a newer request came in
    /// meanwhile. Bumping the generation is what cancels a scheduled fetch;
    /// one that already started runs to completion and is dropped on apply.
    fn schedule(&self, generation: u64, query: String) {
        let registry = Arc::clone(&self.registry);
        let current = Arc::clone(&self.generation);
        let tx = self.tx.clone();
        let delay = self.settings.debounce();

        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if current.load(Ordering::SeqCst) != generation {
                trace!("session {} superseded before fetching", generation);
                return;
            }

            debug!("Started fetching translation for {:?}", query);
            let q = query.clone();
            let fetched = tokio::spawn(async move { registry.translate(&q).await })
                .await
                .map_err(|e| e.to_string());

            if tx
                .send(FetchEvent {
                    generation,
                    query,
                    fetched,
                })
                .is_err()
            {
                trace!("controller gone, dropping session {} result", generation);
            }
        });
    }

    /// Wait for the next fetch result and apply it.
    pub async fn pump(&mut self) -> Option<Applied> {
        let event = self.rx.recv().await?;
        Some(self.apply(event))
    }

    /// Apply a result that is already waiting, if any.
    pub fn try_pump(&mut self) -> Option<Applied> {
        let event = self.rx.try_recv().ok()?;
        Some(self.apply(event))
    }

    /// Pump until the current session leaves `Fetching`.
    pub async fn settle(&mut self) -> Option<TranslationResult> {
        while self.phase() == SessionPhase::Fetching {
            match self.pump().await? {
                Applied::Shown(result) => return Some(result),
                Applied::Stale { .. } => continue,
            }
        }
        None
    }

    fn apply(&mut self, event: FetchEvent) -> Applied {
        let stale = Applied::Stale {
            generation: event.generation,
        };
        let Some(session) = self.session.as_mut() else {
            return stale;
        };
        if session.generation != event.generation {
            debug!(
                "dropping stale result of session {} (current {})",
                event.generation, session.generation
            );
            return stale;
        }
        let view = match session.surface {
            SurfaceKind::Popup => self.popup.as_mut(),
            SurfaceKind::ToolWindow => self.docked.as_mut(),
        };
        let Some(view) = view else {
            return stale;
        };

        let query = Some(event.query.as_str());
        let result = match event.fetched {
            Err(e) => {
                warn!("translation fetch panicked: {}", e);
                let message = self.locale.fetch_error();
                view.set_text(message, None, None);
                TranslationResult::Error(message.to_string())
            }
            Ok(None) => {
                let message = self.locale.no_info_found();
                view.set_text(message, query, None);
                TranslationResult::Error(message.to_string())
            }
            Ok(Some(fetched)) if fetched.text.is_empty() => {
                let current = view.html().to_string();
                view.set_text(&current, query, Some(&fetched.translator));
                session.provider = Some(fetched.translator);
                TranslationResult::Empty
            }
            Ok(Some(fetched)) => {
                view.set_data(
                    query,
                    &fetched.text,
                    Some(&fetched.translator),
                    fetched.external_url.as_deref(),
                );
                session.provider = Some(fetched.translator);
                if fetched.is_error {
                    TranslationResult::Error(fetched.text)
                } else {
                    TranslationResult::Text(fetched.text)
                }
            }
        };

        session.phase = match result {
            TranslationResult::Error(_) => SessionPhase::Failed,
            _ => SessionPhase::Displaying,
        };
        let kind = session.surface;
        self.show(kind);
        Applied::Shown(result)
    }

    fn view(&self, kind: SurfaceKind) -> Option<&TranslationView> {
        match kind {
            SurfaceKind::Popup => self.popup.as_ref(),
            SurfaceKind::ToolWindow => self.docked.as_ref(),
        }
    }

    fn show(&mut self, kind: SurfaceKind) {
        match kind {
            SurfaceKind::Popup => {
                if let Some(view) = &self.popup {
                    self.host.show_transient(view);
                }
            }
            SurfaceKind::ToolWindow => {
                if let Some(view) = &self.docked {
                    self.host.show_docked(view);
                }
            }
        }
    }

    /// Close the transient popup. Returns false when none was showing.
    pub fn dismiss(&mut self, reason: DismissReason) -> bool {
        if self.popup.take().is_none() {
            return false;
        }
        debug!("popup dismissed: {:?}", reason);
        self.host.dismiss(SurfaceKind::Popup);

        if self
            .session
            .as_ref()
            .is_some_and(|s| s.surface == SurfaceKind::Popup)
        {
            self.session = None;
        }

        let to_focus = self.previously_focused.take();
        if reason.restores_focus() {
            if let Some(target) = to_focus {
                self.host.focus(&target);
            }
        }
        true
    }

    /// Called before the host runs an action. Returns true when the popup
    /// was dismissed because of it.
    pub fn before_action(&mut self, action: &HostAction) -> bool {
        if self.popup.is_none() {
            return false;
        }
        if *action == HostAction::IgnoredByHint {
            self.host.focus(&focus_target(SurfaceKind::Popup));
            return false;
        }
        if action.keeps_popup() {
            return false;
        }
        self.dismiss(DismissReason::Action)
    }

    pub fn before_typing(&mut self) -> bool {
        self.dismiss(DismissReason::Typing)
    }

    /// Focus moved to `new_owner`; anything but the popup itself closes it.
    pub fn focus_lost(&mut self, new_owner: Option<&FocusTarget>) -> bool {
        let popup = focus_target(SurfaceKind::Popup);
        if new_owner == Some(&popup) {
            return false;
        }
        self.dismiss(DismissReason::FocusLost)
    }

    /// Key pressed inside a surface: Escape closes the popup, scroll keys go
    /// straight to the active view.
    pub fn handle_key(&mut self, stroke: KeyStroke) -> bool {
        if stroke.key == Key::Escape {
            return self.dismiss(DismissReason::CancelKey);
        }
        self.active_view_mut()
            .map(|view| view.handle_key(stroke))
            .unwrap_or(false)
    }

    /// Move the popup content into the docked tool window.
    pub fn pin(&mut self) -> bool {
        let Some(view) = self.popup.take() else {
            return false;
        };
        self.host.dismiss(SurfaceKind::Popup);
        self.docked = Some(view);
        if let Some(session) = self.session.as_mut() {
            session.surface = SurfaceKind::ToolWindow;
        }
        self.show(SurfaceKind::ToolWindow);
        true
    }

    /// Leave tool-window mode: focus goes back where it was and the content
    /// returns to a transient popup.
    pub fn restore_popup(&mut self) -> bool {
        let Some(view) = self.docked.take() else {
            return false;
        };
        self.host.dismiss(SurfaceKind::ToolWindow);
        if let Some(target) = &self.previously_focused {
            self.host.focus(target);
        }
        self.popup = Some(view);
        if let Some(session) = self.session.as_mut() {
            session.surface = SurfaceKind::Popup;
        }
        self.show(SurfaceKind::Popup);
        true
    }

    /// Slider moved in the active view.
    pub fn set_font_slider(&mut self, index: usize) {
        let Some(view) = self.active_view_mut() else {
            return;
        };
        view.set_font_slider(index);
        if let Some(kind) = self.current_surface() {
            self.show(kind);
        }
    }

    fn current_surface(&self) -> Option<SurfaceKind> {
        self.session.as_ref().map(|s| s.surface).or(if self.popup.is_some() {
            Some(SurfaceKind::Popup)
        } else if self.docked.is_some() {
            Some(SurfaceKind::ToolWindow)
        } else {
            None
        })
    }

    /// Text selected in the active view, for copy actions.
    pub fn selected_text(&self) -> Option<String> {
        self.active_view()?.selected_text()
    }

    /// Links for the external dictionary action: the active view's own
    /// translator when it shows a result, otherwise every translator.
    pub fn external_links(&self, query: &str) -> Vec<ExternalLink> {
        if let Some(view) = self.active_view() {
            if let (Some(url), Some(shown)) = (view.external_url(), view.query()) {
                if shown == query {
                    return vec![ExternalLink {
                        translator: view.translator().unwrap_or_default().to_string(),
                        icon: String::new(),
                        url: url.to_string(),
                    }];
                }
            }
        }
        self.registry.external_urls(query)
    }
}

fn is_own_surface(target: &FocusTarget) -> bool {
    target.0 == POPUP_FOCUS || target.0 == TOOL_WINDOW_FOCUS
}

fn focus_target(kind: SurfaceKind) -> FocusTarget {
    match kind {
        SurfaceKind::Popup => FocusTarget::new(POPUP_FOCUS),
        SurfaceKind::ToolWindow => FocusTarget::new(TOOL_WINDOW_FOCUS),
    }
}
