//! Flattening of the small HTML subset produced by the renderers.
//!
//! Only what the translators emit is understood: `div`, `span`, `ul`, `li`,
//! `h3`, `br`, a `<style>` block and HTML entities. Every piece of
//! text keeps the innermost `class` that applied to it, so surfaces can style
//! it without a real HTML engine.

use html_escape::decode_html_entities;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub text: String,
    pub class: Option<String>,
}

impl Segment {
    fn new(text: impl Into<String>, class: Option<String>) -> Self {
        Self {
            text: text.into(),
            class,
        }
    }
}

pub const BULLET_CLASS: &str = "bullet";

pub fn parse(html: &str) -> Vec<Segment> {
    let mut out: Vec<Segment> = Vec::new();
    let mut classes: Vec<Option<String>> = Vec::new();
    let mut in_style = false;
    let mut rest = html;

    while !rest.is_empty() {
        match rest.find('<') {
            Some(0) => {
                let Some(end) = rest.find('>') else {
                    // unterminated tag, keep it as text
                    push_text(&mut out, rest, current(&classes));
                    break;
                };
                let tag = &rest[1..end];
                rest = &rest[end + 1..];

                let closing = tag.starts_with('/');
                let name = tag
                    .trim_start_matches('/')
                    .split(|c: char| c.is_whitespace() || c == '/')
                    .next()
                    .unwrap_or("")
                    .to_ascii_lowercase();

                if name == "style" {
                    in_style = !closing;
                    continue;
                }

                match (name.as_str(), closing) {
                    ("br", _) => newline(&mut out),
                    ("html" | "body", _) => {}
                    (_, true) => {
                        classes.pop();
                        if matches!(name.as_str(), "div" | "li" | "h3" | "ul" | "p") {
                            newline(&mut out);
                        }
                    }
                    (_, false) => {
                        let class = class_attr(tag).or_else(|| current(&classes));
                        if name == "li" {
                            out.push(Segment::new("• ", Some(BULLET_CLASS.to_string())));
                        }
                        classes.push(class);
                    }
                }
            }
            Some(idx) => {
                if !in_style {
                    push_text(&mut out, &rest[..idx], current(&classes));
                }
                rest = &rest[idx..];
            }
            None => {
                if !in_style {
                    push_text(&mut out, rest, current(&classes));
                }
                break;
            }
        }
    }

    while out.last().is_some_and(|s| s.text == "\n") {
        out.pop();
    }
    let leading = out
        .iter()
        .take_while(|s| s.text.trim().is_empty())
        .count();
    out.drain(..leading);
    out
}

fn current(classes: &[Option<String>]) -> Option<String> {
    classes.last().cloned().flatten()
}

fn newline(out: &mut Vec<Segment>) {
    if out.last().is_some_and(|s| s.text != "\n") {
        out.push(Segment::new("\n", None));
    }
}

fn push_text(out: &mut Vec<Segment>, raw: &str, class: Option<String>) {
    if raw.is_empty() {
        return;
    }
    out.push(Segment::new(decode_html_entities(raw), class));
}

fn class_attr(tag: &str) -> Option<String> {
    let start = tag.find("class=\"")? + "class=\"".len();
    let len = tag[start..].find('"')?;
    Some(tag[start..start + len].to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain_text(segments: &[Segment]) -> String {
        segments.iter().map(|s| s.text.as_str()).collect()
    }

    #[test]
    fn keeps_innermost_class() {
        let segments = parse(
            "<div class=\"baav\"><span class=\"pronounce\"> 美式：<span class=\"phonetic\">[u]</span></span></div>",
        );
        assert_eq!(segments[0], Segment::new(" 美式：", Some("pronounce".into())));
        assert_eq!(segments[1], Segment::new("[u]", Some("phonetic".into())));
    }

    #[test]
    fn drops_style_and_wrapper() {
        let segments = parse("<html><style type=\"text/css\">\n.a{}</style>\n<body>hi</body></html>");
        assert_eq!(plain_text(&segments), "hi");
    }

    #[test]
    fn list_items_get_bullets_and_breaks() {
        let segments = parse("<ul><li>a</li><li>b &amp; c</li></ul>");
        assert_eq!(plain_text(&segments), "• a\n• b & c");
    }

    #[test]
    fn named_and_numeric_entities_are_decoded() {
        let segments = parse("<div>caf&eacute; &#x27;x&#x27; a&nbsp;b &lt;c&gt;</div>");
        assert_eq!(plain_text(&segments), "café 'x' a\u{a0}b <c>");
    }

    #[test]
    fn plain_message_passes_through() {
        assert_eq!(plain_text(&parse("错误代码：60\n无词典结果")), "错误代码：60\n无词典结果");
    }
}
