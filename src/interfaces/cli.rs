use clap::Parser;

#[derive(Parser)]
#[command(name = "qtrans")]
#[command(about = "Quick translation of selected text.")]
#[command(version)]
pub struct Cli {
    /// Only ask this translator (youdao, google)
    #[arg(short = 't', long)]
    pub translator: Option<String>,

    /// Open the external dictionary in the browser instead of translating
    #[arg(short = 'e', long)]
    pub external: bool,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// Show the result in the pinned tool window
    #[arg(short = 'p', long)]
    pub pin: bool,

    /// Read selections from stdin, one per line
    #[arg(short = 'i', long)]
    pub interactive: bool,

    /// Choose color theme
    #[arg(short = 'T', long)]
    pub theme: Option<String>,

    /// Generate config sample
    #[arg(long)]
    pub generate_config: bool,

    /// Edit configuration file
    #[arg(long)]
    pub edit_config: bool,

    /// Show status
    #[arg(long)]
    pub status: bool,

    /// Query text
    #[arg(num_args = 1..)]
    pub query: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_query_and_flags() {
        let cli = Cli::parse_from(["qtrans", "-t", "google", "--pin", "hello", "world"]);
        assert_eq!(cli.translator.as_deref(), Some("google"));
        assert!(cli.pin);
        assert!(!cli.interactive);
        assert_eq!(cli.query.join(" "), "hello world");
    }
}
