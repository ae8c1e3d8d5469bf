use crate::presentation::markup::{self, Segment};
use serde::{Deserialize, Serialize};
use std::ops::Range;

/// Discrete font size steps of the slider.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum FontSize {
    XxSmall,
    XSmall,
    Small,
    #[default]
    Medium,
    Large,
    XLarge,
    XxLarge,
}

impl FontSize {
    pub const ALL: [FontSize; 7] = [
        FontSize::XxSmall,
        FontSize::XSmall,
        FontSize::Small,
        FontSize::Medium,
        FontSize::Large,
        FontSize::XLarge,
        FontSize::XxLarge,
    ];

    pub fn points(&self) -> u32 {
        match self {
            FontSize::XxSmall => 8,
            FontSize::XSmall => 10,
            FontSize::Small => 12,
            FontSize::Medium => 14,
            FontSize::Large => 16,
            FontSize::XLarge => 18,
            FontSize::XxLarge => 24,
        }
    }

    pub fn slider_index(&self) -> usize {
        Self::ALL.iter().position(|s| s == self).unwrap_or(3)
    }

    pub fn from_slider(index: usize) -> Self {
        Self::ALL[index.min(Self::ALL.len() - 1)]
    }

    pub fn larger(&self) -> Self {
        Self::from_slider(self.slider_index() + 1)
    }

    pub fn smaller(&self) -> Self {
        Self::from_slider(self.slider_index().saturating_sub(1))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharStyle {
    pub class: Option<String>,
    pub font_size: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleRun {
    pub range: Range<usize>,
    pub style: CharStyle,
}

/// Plain text plus character-level style runs covering all of it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyledDocument {
    text: String,
    runs: Vec<StyleRun>,
}

impl StyledDocument {
    pub fn from_segments(segments: &[Segment], font_size: FontSize) -> Self {
        let mut text = String::new();
        let mut runs = Vec::with_capacity(segments.len());
        for segment in segments {
            let start = text.chars().count();
            text.push_str(&segment.text);
            runs.push(StyleRun {
                range: start..start + segment.text.chars().count(),
                style: CharStyle {
                    class: segment.class.clone(),
                    font_size: font_size.points(),
                },
            });
        }
        Self { text, runs }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn runs(&self) -> &[StyleRun] {
        &self.runs
    }

    pub fn line_count(&self) -> usize {
        self.text.lines().count().max(1)
    }

    pub fn longest_line(&self) -> usize {
        self.text.lines().map(|l| l.chars().count()).max().unwrap_or(0)
    }

    /// Set the font size on every character, leaving text and other
    /// attributes alone.
    pub fn set_font_size(&mut self, font_size: FontSize) {
        for run in &mut self.runs {
            run.style.font_size = font_size.points();
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    PageUp,
    PageDown,
    Home,
    End,
    Escape,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyStroke {
    pub key: Key,
    pub ctrl: bool,
}

impl KeyStroke {
    pub fn plain(key: Key) -> Self {
        Self { key, ctrl: false }
    }

    pub fn ctrl(key: Key) -> Self {
        Self { key, ctrl: true }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScrollBar {
    pub value: u32,
    pub maximum: u32,
    pub unit: u32,
    pub block: u32,
}

impl ScrollBar {
    fn step(&mut self, delta: i64) {
        let value = (self.value as i64 + delta).clamp(0, self.maximum as i64);
        self.value = value as u32;
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScrollState {
    pub vertical: ScrollBar,
    pub horizontal: ScrollBar,
}

impl ScrollState {
    /// Recompute extents for content of `lines` x `columns` cells in a
    /// viewport of `viewport` pixels, at `font` points per line.
    pub fn resize(&mut self, lines: usize, columns: usize, viewport: (u32, u32), font: u32) {
        let content_h = lines as u32 * font;
        let content_w = columns as u32 * font;
        self.vertical.maximum = content_h.saturating_sub(viewport.1);
        self.vertical.unit = font;
        self.vertical.block = viewport.1.max(font);
        self.horizontal.maximum = content_w.saturating_sub(viewport.0);
        self.horizontal.unit = font;
        self.horizontal.block = viewport.0.max(font);
        self.vertical.value = self.vertical.value.min(self.vertical.maximum);
        self.horizontal.value = self.horizontal.value.min(self.horizontal.maximum);
    }

    /// Returns false for keys that are not scroll keys.
    pub fn handle_key(&mut self, stroke: KeyStroke) -> bool {
        let v = &mut self.vertical;
        let h = &mut self.horizontal;
        match (stroke.key, stroke.ctrl) {
            (Key::Up, _) => v.step(-(v.unit as i64)),
            (Key::Down, _) => v.step(v.unit as i64),
            (Key::Left, _) => h.step(-(h.unit as i64)),
            (Key::Right, _) => h.step(h.unit as i64),
            (Key::PageUp, _) => v.step(-(v.block as i64)),
            (Key::PageDown, _) => v.step(v.block as i64),
            (Key::Home, false) => h.value = 0,
            (Key::End, false) => h.value = h.maximum,
            (Key::Home, true) => v.value = 0,
            (Key::End, true) => v.value = v.maximum,
            (Key::Escape, _) => return false,
        }
        true
    }
}

pub const DEFAULT_VIEWPORT: (u32, u32) = (500, 300);

/// What a surface shows: one query's translation with its controls.
#[derive(Debug, Clone)]
pub struct TranslationView {
    query: Option<String>,
    html: String,
    translator: Option<String>,
    external_url: Option<String>,
    empty: bool,
    document: StyledDocument,
    font_size: FontSize,
    scroll: ScrollState,
    viewport: (u32, u32),
    selection: Option<Range<usize>>,
}

impl TranslationView {
    pub fn new(font_size: FontSize) -> Self {
        Self {
            query: None,
            html: String::new(),
            translator: None,
            external_url: None,
            empty: true,
            document: StyledDocument::default(),
            font_size,
            scroll: ScrollState::default(),
            viewport: DEFAULT_VIEWPORT,
            selection: None,
        }
    }

    pub fn query(&self) -> Option<&str> {
        self.query.as_deref()
    }

    pub fn html(&self) -> &str {
        &self.html
    }

    pub fn translator(&self) -> Option<&str> {
        self.translator.as_deref()
    }

    pub fn external_url(&self) -> Option<&str> {
        self.external_url.as_deref()
    }

    pub fn document(&self) -> &StyledDocument {
        &self.document
    }

    pub fn font_size(&self) -> FontSize {
        self.font_size
    }

    pub fn scroll(&self) -> &ScrollState {
        &self.scroll
    }

    pub fn is_empty(&self) -> bool {
        self.empty
    }

    /// Mark the content as outdated while a new fetch runs.
    pub fn start_wait(&mut self) {
        self.empty = true;
    }

    pub fn set_text(&mut self, text: &str, query: Option<&str>, translator: Option<&str>) {
        self.set_data(query, text, translator, None);
    }

    pub fn set_data(
        &mut self,
        query: Option<&str>,
        html: &str,
        translator: Option<&str>,
        external_url: Option<&str>,
    ) {
        self.query = query.map(str::to_string);
        self.translator = translator.map(str::to_string);
        self.external_url = external_url.map(str::to_string);
        self.html = html.to_string();
        self.document = StyledDocument::from_segments(&markup::parse(html), self.font_size);
        self.selection = None;
        self.scroll = ScrollState::default();
        self.empty = false;
        self.relayout();
    }

    /// Slider moved: restyle the whole document without re-fetching.
    pub fn set_font_slider(&mut self, index: usize) {
        self.apply_font_size(FontSize::from_slider(index));
    }

    pub fn apply_font_size(&mut self, font_size: FontSize) {
        self.font_size = font_size;
        self.document.set_font_size(font_size);
        self.relayout();
    }

    pub fn set_viewport(&mut self, width: u32, height: u32) {
        self.viewport = (width, height);
        self.relayout();
    }

    pub fn handle_key(&mut self, stroke: KeyStroke) -> bool {
        self.scroll.handle_key(stroke)
    }

    /// Select a char range of the plain text.
    pub fn select(&mut self, range: Range<usize>) {
        let len = self.document.text().chars().count();
        let start = range.start.min(len);
        let end = range.end.clamp(start, len);
        self.selection = Some(start..end);
    }

    pub fn select_all(&mut self) {
        self.select(0..usize::MAX);
    }

    /// Selected text with non-breaking spaces turned into plain spaces.
    pub fn selected_text(&self) -> Option<String> {
        let range = self.selection.clone()?;
        let text: String = self
            .document
            .text()
            .chars()
            .skip(range.start)
            .take(range.end - range.start)
            .map(|c| if c == '\u{a0}' { ' ' } else { c })
            .collect();
        if text.is_empty() {
            None
        } else {
            Some(text)
        }
    }

    fn relayout(&mut self) {
        self.scroll.resize(
            self.document.line_count(),
            self.document.longest_line(),
            self.viewport,
            self.font_size.points(),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "<div class=\"trans\">你好 : hello</div><div class=\"trans-container\"><ul><li>greeting</li></ul></div>";

    fn loaded() -> TranslationView {
        let mut view = TranslationView::new(FontSize::Medium);
        view.set_data(Some("你好"), SAMPLE, Some("Youdao Translation"), None);
        view
    }

    #[test]
    fn font_change_keeps_text() {
        let mut view = loaded();
        let before = view.document().text().to_string();

        view.set_font_slider(6);
        let once = view.document().clone();
        view.set_font_slider(6);

        assert_eq!(view.document().text(), before);
        assert_eq!(view.document(), &once);
        assert!(view.document().runs().iter().all(|r| r.style.font_size == 24));
        assert_eq!(view.font_size(), FontSize::XxLarge);
    }

    #[test]
    fn slider_index_is_clamped() {
        assert_eq!(FontSize::from_slider(99), FontSize::XxLarge);
        assert_eq!(FontSize::Medium.slider_index(), 3);
        assert_eq!(FontSize::XxSmall.smaller(), FontSize::XxSmall);
        assert_eq!(FontSize::Small.larger(), FontSize::Medium);
    }

    #[test]
    fn vertical_scroll_keys() {
        let mut view = loaded();
        view.set_viewport(40, 14);
        let max = view.scroll().vertical.maximum;
        assert!(max > 0);

        assert!(view.handle_key(KeyStroke::plain(Key::Down)));
        assert_eq!(view.scroll().vertical.value, 14.min(max));
        view.handle_key(KeyStroke::ctrl(Key::End));
        assert_eq!(view.scroll().vertical.value, max);
        view.handle_key(KeyStroke::plain(Key::PageDown));
        assert_eq!(view.scroll().vertical.value, max);
        view.handle_key(KeyStroke::ctrl(Key::Home));
        assert_eq!(view.scroll().vertical.value, 0);
        view.handle_key(KeyStroke::plain(Key::Up));
        assert_eq!(view.scroll().vertical.value, 0);
    }

    #[test]
    fn home_end_without_ctrl_are_horizontal() {
        let mut view = loaded();
        view.set_viewport(20, 300);
        view.handle_key(KeyStroke::plain(Key::End));
        assert_eq!(view.scroll().horizontal.value, view.scroll().horizontal.maximum);
        assert_eq!(view.scroll().vertical.value, 0);
        view.handle_key(KeyStroke::plain(Key::Home));
        assert_eq!(view.scroll().horizontal.value, 0);
    }

    #[test]
    fn escape_is_not_a_scroll_key() {
        let mut view = loaded();
        assert!(!view.handle_key(KeyStroke::plain(Key::Escape)));
    }

    #[test]
    fn selection_replaces_nbsp() {
        let mut view = TranslationView::new(FontSize::Medium);
        view.set_text("a&nbsp;b", None, None);
        view.select_all();
        assert_eq!(view.selected_text().as_deref(), Some("a b"));
    }

    #[test]
    fn start_wait_marks_empty_but_keeps_content() {
        let mut view = loaded();
        view.start_wait();
        assert!(view.is_empty());
        assert_eq!(view.query(), Some("你好"));
    }
}
