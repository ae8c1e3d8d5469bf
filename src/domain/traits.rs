use crate::domain::model::{FetchOutcome, FocusTarget, SurfaceKind, TranslatorId};
use crate::presentation::view::TranslationView;
use async_trait::async_trait;

/// Trait for translation services
///
/// Implementations are queried in registration order; the first one that
/// produces a result wins.
#[async_trait]
pub trait Translator: Send + Sync {
    fn id(&self) -> TranslatorId;

    fn title(&self) -> &str;

    /// Icon resource name shown next to the title.
    fn icon(&self) -> &str;

    /// Fetch a translation. Never panics and never returns an error;
    /// failures are folded into the outcome.
    async fn fetch_info(&self, query: &str) -> FetchOutcome;

    /// Link to the provider's own web page for this query.
    fn external_url(&self, query: &str) -> Option<String>;
}

/// The UI toolkit side of a translation session.
///
/// The controller calls these from the task that owns it and never holds
/// any toolkit type itself.
pub trait SurfaceHost {
    /// Show (or refresh) the transient popup with the given view.
    fn show_transient(&mut self, view: &TranslationView);

    /// Show (or refresh) the docked panel with the given view.
    fn show_docked(&mut self, view: &TranslationView);

    fn dismiss(&mut self, kind: SurfaceKind);

    fn focus(&mut self, target: &FocusTarget);

    /// Component that currently owns input focus, if any.
    fn focus_owner(&self) -> Option<FocusTarget>;
}
