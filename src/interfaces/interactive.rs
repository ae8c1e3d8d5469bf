// Line commands of the interactive mode
use crate::domain::model::HostAction;
use crate::presentation::view::{Key, KeyStroke};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// A new selection to translate.
    Select(String),
    Key(KeyStroke),
    Font(usize),
    Pin,
    Unpin,
    Copy,
    /// Open an external dictionary; the number picks one of several.
    External(Option<usize>),
    Typing,
    Blur,
    Action(HostAction),
    Help,
    Quit,
}

pub const HELP: &str = "\
<text>            translate text
:pin / :unpin     dock the result / back to popup
:esc              close the popup
:up :down :left :right :pgup :pgdn :home :end   scroll (prefix ctrl- to jump)
:font <0-6>       font size step
:copy             print the selected text
:ext [n]          open the external dictionary (n picks from the list)
:type             simulate typing in the editor
:blur             simulate focus moving elsewhere
:action <name>    simulate a host action (scroll, up, down, pgup, pgdn, settings, navigate, copy, <other>)
:q                quit";

impl Command {
    pub fn parse(line: &str) -> Option<Command> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }
        let Some(rest) = line.strip_prefix(':') else {
            return Some(Command::Select(line.to_string()));
        };

        let mut parts = rest.split_whitespace();
        let head = parts.next()?;
        let arg = parts.next();

        let (ctrl, name) = match head.strip_prefix("ctrl-") {
            Some(name) => (true, name),
            None => (false, head),
        };
        let key = match name {
            "up" => Some(Key::Up),
            "down" => Some(Key::Down),
            "left" => Some(Key::Left),
            "right" => Some(Key::Right),
            "pgup" => Some(Key::PageUp),
            "pgdn" => Some(Key::PageDown),
            "home" => Some(Key::Home),
            "end" => Some(Key::End),
            "esc" => Some(Key::Escape),
            _ => None,
        };
        if let Some(key) = key {
            return Some(Command::Key(KeyStroke { key, ctrl }));
        }

        match head {
            "pin" => Some(Command::Pin),
            "unpin" => Some(Command::Unpin),
            "copy" => Some(Command::Copy),
            "ext" => match arg {
                None => Some(Command::External(None)),
                Some(a) => a.parse().ok().map(|n| Command::External(Some(n))),
            },
            "type" => Some(Command::Typing),
            "blur" => Some(Command::Blur),
            "font" => arg.and_then(|a| a.parse().ok()).map(Command::Font),
            "action" => arg.map(|a| Command::Action(parse_action(a))),
            "help" | "h" | "?" => Some(Command::Help),
            "q" | "quit" => Some(Command::Quit),
            _ => None,
        }
    }
}

fn parse_action(name: &str) -> HostAction {
    match name {
        "scroll" => HostAction::ListScroll,
        "up" => HostAction::MoveCaretUp,
        "down" => HostAction::MoveCaretDown,
        "pgup" => HostAction::MoveCaretPageUp,
        "pgdn" => HostAction::MoveCaretPageDown,
        "settings" => HostAction::InplaceSettings,
        "navigate" => HostAction::NavigateToSource,
        "copy" => HostAction::IgnoredByHint,
        other => HostAction::Other(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_line_is_a_selection() {
        assert_eq!(
            Command::parse("  hello world "),
            Some(Command::Select("hello world".to_string()))
        );
        assert_eq!(Command::parse("   "), None);
    }

    #[test]
    fn ctrl_prefix_sets_modifier() {
        assert_eq!(
            Command::parse(":ctrl-end"),
            Some(Command::Key(KeyStroke::ctrl(Key::End)))
        );
        assert_eq!(
            Command::parse(":esc"),
            Some(Command::Key(KeyStroke::plain(Key::Escape)))
        );
    }

    #[test]
    fn actions_and_arguments() {
        assert_eq!(Command::parse(":font 5"), Some(Command::Font(5)));
        assert_eq!(Command::parse(":font big"), None);
        assert_eq!(Command::parse(":ext"), Some(Command::External(None)));
        assert_eq!(Command::parse(":ext 2"), Some(Command::External(Some(2))));
        assert_eq!(Command::parse(":ext two"), None);
        assert_eq!(
            Command::parse(":action navigate"),
            Some(Command::Action(HostAction::NavigateToSource))
        );
        assert_eq!(
            Command::parse(":action GotoLine"),
            Some(Command::Action(HostAction::Other("GotoLine".to_string())))
        );
    }
}
