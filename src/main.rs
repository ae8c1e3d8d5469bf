// Main entry point
use clap::Parser;
use colored::Colorize;
use qtrans::application::session::{Applied, SessionController};
use qtrans::domain::model::{DismissReason, TranslatorId};
use qtrans::infrastructure::config::{self, Config, Logging};
use qtrans::application::registry::ExternalLink;
use qtrans::interfaces::browser;
use qtrans::interfaces::cli::Cli;
use qtrans::interfaces::interactive::{Command, HELP};
use qtrans::presentation::terminal::TerminalSurface;
use qtrans::presentation::theme::Theme;
use qtrans::state::AppState;
use std::io::Stdout;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::debug;

type Controller = SessionController<TerminalSurface<Stdout>>;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut config = config::load_config()?;

    // Initialize logging
    if config.logging.enable {
        init_logging(&config.logging)?;
    }

    if cli.generate_config {
        config::generate_config_sample()?;
        return Ok(());
    }
    if cli.edit_config {
        if let Some(config_path) = config::get_config_path() {
            let editor = std::env::var("EDITOR").unwrap_or_else(|_| "vi".to_string());
            // Run editor in blocking task
            tokio::task::spawn_blocking(move || {
                std::process::Command::new(editor).arg(&config_path).status()
            })
            .await??;
        } else {
            eprintln!("{}", "Config file not found".red());
        }
        return Ok(());
    }

    // --translator overrides the configured selection for this run
    if let Some(name) = &cli.translator {
        let id: TranslatorId = name.parse()?;
        config.translation.enable_specified = true;
        config.translation.specified_translator = id;
    }
    if cli.pin {
        config.popup.show_in_tool_window = true;
    }

    let state = AppState::new(config)?;

    if cli.status {
        print_status(&state);
        return Ok(());
    }

    let theme_name = cli.theme.as_deref().unwrap_or(state.config.theme.as_str());
    let theme = Theme::from_name(theme_name);

    if cli.interactive {
        let controller = new_controller(&state, theme);
        return run_interactive(controller).await;
    }

    // Handle query
    if cli.query.is_empty() {
        eprintln!("{}", "Please provide a query word".red());
        std::process::exit(1);
    }
    let query = cli.query.join(" ");

    if cli.external {
        let links = state.registry.external_urls(&query);
        if cli.json {
            println!("{}", serde_json::to_string_pretty(&links)?);
            return Ok(());
        }
        if links.len() > 1 {
            println!("{}", browser::numbered(&links));
            eprint!("Open which? ");
            let mut lines = BufReader::new(tokio::io::stdin()).lines();
            let choice = lines.next_line().await?.unwrap_or_default();
            match browser::pick(&links, &choice) {
                Some(link) => browser::open_link(link),
                None => eprintln!("{}", "No such link".red()),
            }
        } else {
            open_external(&links, None);
        }
        return Ok(());
    }

    if cli.json {
        let fetched = state.registry.translate(&query).await;
        let output = serde_json::json!({
            "query": query,
            "result": fetched,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    let mut controller = new_controller(&state, theme);
    controller.request(&query, true);
    tokio::select! {
        result = controller.settle() => {
            debug!("settled with {:?}", result);
        }
        _ = tokio::signal::ctrl_c() => {
            eprintln!("\n已中断");
        }
    }

    Ok(())
}

fn new_controller(state: &AppState, theme: Theme) -> Controller {
    SessionController::new(
        TerminalSurface::new(std::io::stdout(), theme),
        state.registry.clone(),
        state.config.popup.clone(),
        state.config.locale,
    )
}

async fn run_interactive(mut controller: Controller) -> anyhow::Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    eprintln!("{}", "Type text to translate, :help for commands".bright_black());

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else {
                    break;
                };
                let Some(command) = Command::parse(&line) else {
                    continue;
                };
                if !run_command(&mut controller, command) {
                    break;
                }
            }
            applied = controller.pump() => {
                if let Some(Applied::Stale { generation }) = applied {
                    debug!("ignored stale result of session {}", generation);
                }
            }
            _ = tokio::signal::ctrl_c() => {
                eprintln!("\n收到中断信号，正在退出...");
                break;
            }
        }
    }

    Ok(())
}

/// Returns false when the loop should stop.
fn run_command(controller: &mut Controller, command: Command) -> bool {
    match command {
        Command::Select(text) => {
            controller.request(&text, true);
        }
        Command::Key(stroke) => {
            if !controller.handle_key(stroke) {
                eprintln!("{}", "nothing to scroll".bright_black());
            }
        }
        Command::Font(index) => controller.set_font_slider(index),
        Command::Pin => {
            controller.pin();
        }
        Command::Unpin => {
            controller.restore_popup();
        }
        Command::Copy => {
            if let Some(view) = controller.active_view_mut() {
                view.select_all();
            }
            match controller.selected_text() {
                Some(text) => println!("{}", text),
                None => eprintln!("{}", "nothing selected".bright_black()),
            }
        }
        Command::External(choice) => {
            let query = controller.session().map(|s| s.query.clone());
            match query {
                Some(query) => open_external(&controller.external_links(&query), choice),
                None => eprintln!("{}", "nothing translated yet".bright_black()),
            }
        }
        Command::Typing => {
            controller.before_typing();
        }
        Command::Blur => {
            controller.focus_lost(None);
        }
        Command::Action(action) => {
            if controller.before_action(&action) {
                debug!("{:?} closed the popup", action);
            }
        }
        Command::Help => eprintln!("{}", HELP),
        Command::Quit => {
            controller.dismiss(DismissReason::Explicit);
            return false;
        }
    }
    true
}

/// A single link opens directly; several are listed unless `choice` picks one.
fn open_external(links: &[ExternalLink], choice: Option<usize>) {
    match (links, choice) {
        ([], _) => eprintln!("{}", "No external dictionary".red()),
        ([link], _) => browser::open_link(link),
        (_, Some(n)) => match browser::pick(links, &n.to_string()) {
            Some(link) => browser::open_link(link),
            None => eprintln!("{}", "No such link".red()),
        },
        (_, None) => println!("{}", browser::numbered(links)),
    }
}

/// Initialize logging with path and level configuration
fn init_logging(logging: &Logging) -> anyhow::Result<()> {
    use tracing_subscriber::EnvFilter;

    let level = match logging.level.as_str() {
        "DEBUG" => "debug",
        "INFO" => "info",
        "WARN" => "warn",
        "ERROR" => "error",
        _ => "warn",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    if let Some(path) = &logging.path {
        if !path.is_empty() {
            // Log to file
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(file)
                .init();
            return Ok(());
        }
    }

    // Log to stderr (default)
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    Ok(())
}

fn print_status(state: &AppState) {
    let config: &Config = &state.config;
    println!("{}", "qtrans Status".green().bold());
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    println!(
        "Config: {}",
        config::get_config_path()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "Not found".to_string())
    );
    println!("Translators: {}", state.registry.titles().join(", "));
    println!("Youdao keyfrom: {}", config.translation.youdao_keyfrom);
    if config.translation.google_api_key.is_some() {
        println!("Google API: Configured");
    } else {
        println!("Google API: Not configured");
    }
    println!(
        "Popup: debounce {} ms, tool window {}, font {:?}",
        config.popup.debounce_ms, config.popup.show_in_tool_window, config.popup.font_size
    );
}
