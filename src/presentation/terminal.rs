// Terminal implementation of the surface host
use crate::domain::model::{FocusTarget, SurfaceKind};
use crate::domain::traits::SurfaceHost;
use crate::presentation::theme::Theme;
use crate::presentation::view::TranslationView;
use std::fmt::Write as _;
use std::io::Write;
use tracing::debug;

pub const TERMINAL_FOCUS: &str = "terminal";

/// Render a view as coloured terminal text.
pub fn render_view(view: &TranslationView, theme: &Theme, pinned: bool) -> String {
    let mut output = String::new();

    let label = view.translator().unwrap_or("qtrans");
    let header = if pinned {
        format!("── {} (pinned) ──", label)
    } else {
        format!("── {} ──", label)
    };
    writeln!(output, "{}", (theme.line)(&header)).ok();

    let document = view.document();
    let chars: Vec<char> = document.text().chars().collect();
    for run in document.runs() {
        let piece: String = chars[run.range.clone()].iter().collect();
        let style = if view.is_empty() {
            theme.notice
        } else {
            theme.for_class(run.style.class.as_deref())
        };
        // style per line so that colour codes never span a line break
        let styled = piece
            .split('\n')
            .map(|line| if line.is_empty() { String::new() } else { style(line) })
            .collect::<Vec<_>>()
            .join("\n");
        output.push_str(&styled);
    }
    writeln!(output).ok();

    if let Some(url) = view.external_url() {
        writeln!(output, "{}", (theme.line)(url)).ok();
    }
    output
}

pub struct TerminalSurface<W: Write> {
    out: W,
    theme: Theme,
    popup_visible: bool,
    docked_visible: bool,
    focused: Option<FocusTarget>,
}

impl<W: Write> TerminalSurface<W> {
    pub fn new(out: W, theme: Theme) -> Self {
        Self {
            out,
            theme,
            popup_visible: false,
            docked_visible: false,
            focused: Some(FocusTarget::new(TERMINAL_FOCUS)),
        }
    }

    pub fn is_visible(&self, kind: SurfaceKind) -> bool {
        match kind {
            SurfaceKind::Popup => self.popup_visible,
            SurfaceKind::ToolWindow => self.docked_visible,
        }
    }

    pub fn get_ref(&self) -> &W {
        &self.out
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn print(&mut self, view: &TranslationView, pinned: bool) {
        let rendered = render_view(view, &self.theme, pinned);
        if let Err(e) = self.out.write_all(rendered.as_bytes()).and_then(|_| self.out.flush()) {
            debug!("terminal write failed: {}", e);
        }
    }
}

impl<W: Write> SurfaceHost for TerminalSurface<W> {
    fn show_transient(&mut self, view: &TranslationView) {
        self.popup_visible = true;
        self.print(view, false);
    }

    fn show_docked(&mut self, view: &TranslationView) {
        self.docked_visible = true;
        self.print(view, true);
    }

    fn dismiss(&mut self, kind: SurfaceKind) {
        debug!("dismiss {:?}", kind);
        match kind {
            SurfaceKind::Popup => self.popup_visible = false,
            SurfaceKind::ToolWindow => self.docked_visible = false,
        }
    }

    fn focus(&mut self, target: &FocusTarget) {
        self.focused = Some(target.clone());
    }

    fn focus_owner(&self) -> Option<FocusTarget> {
        self.focused.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presentation::view::FontSize;

    #[test]
    fn renders_text_and_tracks_visibility() {
        colored::control::set_override(false);
        let mut view = TranslationView::new(FontSize::Medium);
        view.set_data(
            Some("hi"),
            "<div class=\"trans\">hi : 嗨</div>",
            Some("Youdao Translation"),
            Some("http://dict.youdao.com/w/hi/#keyfrom=dict2.top"),
        );

        let mut surface = TerminalSurface::new(Vec::new(), Theme::from_name("temp"));
        surface.show_transient(&view);
        assert!(surface.is_visible(SurfaceKind::Popup));
        surface.dismiss(SurfaceKind::Popup);
        assert!(!surface.is_visible(SurfaceKind::Popup));

        let printed = String::from_utf8(surface.into_inner()).unwrap();
        assert!(printed.contains("── Youdao Translation ──"));
        assert!(printed.contains("hi : 嗨"));
        assert!(printed.contains("keyfrom=dict2.top"));
    }
}
