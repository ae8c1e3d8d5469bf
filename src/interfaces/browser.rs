// External dictionary links in the system browser
use crate::application::registry::ExternalLink;
use colored::Colorize;
use tracing::{info, warn};

/// Open `link`, printing the URL instead when no browser can be launched.
pub fn open_link(link: &ExternalLink) {
    match webbrowser::open(&link.url) {
        Ok(()) => info!("opened {} in browser", link.url),
        Err(e) => {
            warn!("could not open browser for {}: {}", link.url, e);
            println!("{}: {}", link.translator, link.url);
        }
    }
}

/// One line per link, numbered from 1.
pub fn numbered(links: &[ExternalLink]) -> String {
    links
        .iter()
        .enumerate()
        .map(|(i, link)| format!("{}) {}  {}", i + 1, link.translator, link.url.bright_black()))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Link picked by a 1-based number typed by the user.
pub fn pick<'a>(links: &'a [ExternalLink], choice: &str) -> Option<&'a ExternalLink> {
    let index: usize = choice.trim().parse().ok()?;
    index.checked_sub(1).and_then(|i| links.get(i))
}
