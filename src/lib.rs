//! Quick translation of selected text.
//!
//! Translators live behind [`domain::traits::Translator`], the UI behind
//! [`domain::traits::SurfaceHost`]; [`application::session::SessionController`]
//! ties the two together.

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;
pub mod presentation;
pub mod state;
