use crate::domain::error::{FetchError, QtError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// 翻译源
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum TranslatorId {
    #[default]
    Youdao,
    Google,
}

impl TranslatorId {
    pub fn as_str(&self) -> &'static str {
        match self {
            TranslatorId::Youdao => "youdao",
            TranslatorId::Google => "google",
        }
    }
}

impl fmt::Display for TranslatorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TranslatorId {
    type Err = QtError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "youdao" => Ok(TranslatorId::Youdao),
            "google" => Ok(TranslatorId::Google),
            other => Err(QtError::UnknownTranslator(other.to_string())),
        }
    }
}

/// What a single provider produced for a query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    Text(String),
    /// The provider has nothing to say (no in-app fetch, or nothing found).
    Empty,
    Failed(FetchError),
}

impl FetchOutcome {
    /// Collapse to the nullable form: text, or the reason phrase of a
    /// non-2xx response. Transport and decode failures count as no result.
    pub fn into_text(self) -> Option<String> {
        match self {
            FetchOutcome::Text(text) => Some(text),
            FetchOutcome::Failed(FetchError::Status { reason, .. }) => Some(reason),
            FetchOutcome::Empty
            | FetchOutcome::Failed(FetchError::Transport(_))
            | FetchOutcome::Failed(FetchError::Decode(_)) => None,
        }
    }
}

// 控制器看到的结果
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum TranslationResult {
    Text(String),
    Empty,
    Error(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SessionPhase {
    Idle,
    Fetching,
    Displaying,
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SurfaceKind {
    Popup,
    ToolWindow,
}

/// Opaque handle of a focusable host component.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FocusTarget(pub String);

impl FocusTarget {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

/// Host actions observed while a popup is showing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostAction {
    /// Actions that keep the popup and hand it the focus (copy, external lookup).
    IgnoredByHint,
    ListScroll,
    MoveCaretUp,
    MoveCaretDown,
    MoveCaretPageUp,
    MoveCaretPageDown,
    InplaceSettings,
    NavigateToSource,
    Other(String),
}

impl HostAction {
    /// Actions that leave the transient popup open.
    pub fn keeps_popup(&self) -> bool {
        !matches!(self, HostAction::Other(_))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DismissReason {
    FocusLost,
    CancelKey,
    Typing,
    Action,
    Explicit,
}

impl DismissReason {
    pub fn restores_focus(&self) -> bool {
        !matches!(self, DismissReason::FocusLost)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_failure_keeps_reason_phrase() {
        let outcome = FetchOutcome::Failed(FetchError::Status {
            code: 404,
            reason: "Not Found".to_string(),
        });
        assert_eq!(outcome.into_text().as_deref(), Some("Not Found"));
    }

    #[test]
    fn transport_and_decode_are_no_result() {
        let t = FetchOutcome::Failed(FetchError::Transport("refused".into()));
        let d = FetchOutcome::Failed(FetchError::Decode("eof".into()));
        assert!(t.into_text().is_none());
        assert!(d.into_text().is_none());
        assert!(FetchOutcome::Empty.into_text().is_none());
    }

    #[test]
    fn translator_id_parses_case_insensitively() {
        assert_eq!("Google".parse::<TranslatorId>().ok(), Some(TranslatorId::Google));
        assert!("bing".parse::<TranslatorId>().is_err());
    }
}
