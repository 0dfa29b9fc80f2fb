mod app;
mod config;
mod github;
mod search;
mod theme;
mod ui;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::sync::{Arc, Mutex};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use app::{App, Flow};
use config::AppConfig;
use github::{GitHubClient, ProfileSource};
use theme::ThemeMode;

#[derive(Parser, Debug)]
#[command(name = "hubpeek")]
#[command(version)]
#[command(about = "Look up a GitHub user from the terminal")]
struct Args {
    /// Username to look up as soon as the TUI opens
    #[arg(short, long)]
    user: Option<String>,

    /// Look up a user, print the card and exit
    #[arg(short, long, value_name = "USERNAME")]
    print: Option<String>,

    /// With --print, output the profile as JSON
    #[arg(long, requires = "print")]
    json: bool,

    /// Start in dark mode
    #[arg(short, long)]
    dark: bool,

    /// API base URL (default https://api.github.com)
    #[arg(long)]
    api_base: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // The TUI owns the terminal, so its logs go to a file
    init_logging(args.print.is_none());

    let mut config = AppConfig::load().unwrap_or_default();
    if let Some(base) = args.api_base.clone() {
        config.api_base = base;
    }

    let client = GitHubClient::new(&config)?;

    if let Some(username) = args.print {
        return print_profile(&client, &username, args.json).await;
    }

    let theme_mode = ThemeMode::from_dark(args.dark || config.dark_mode);
    run_tui(Arc::new(client), theme_mode, args.user).await
}

fn init_logging(to_file: bool) {
    let registry = tracing_subscriber::registry().with(EnvFilter::from_default_env());

    if !to_file {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
            .init();
        return;
    }

    match open_log_file() {
        Ok(file) => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_ansi(false)
                    .with_writer(Mutex::new(file)),
            )
            .init(),
        // Nowhere safe to write; stay quiet rather than draw over the UI
        Err(_) => registry.init(),
    }
}

fn open_log_file() -> Result<std::fs::File> {
    let dir = dirs::cache_dir()
        .ok_or_else(|| anyhow::anyhow!("Could not find cache directory"))?
        .join("hubpeek");
    std::fs::create_dir_all(&dir)?;

    std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(dir.join("hubpeek.log"))
        .context("Failed to open log file")
}

async fn print_profile(source: &dyn ProfileSource, username: &str, json: bool) -> Result<()> {
    if username.is_empty() {
        anyhow::bail!(search::EMPTY_QUERY);
    }

    let profile = match source.fetch_profile(username).await {
        Ok(profile) => profile,
        Err(e) => anyhow::bail!("{}", e),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&profile)?);
    } else {
        println!("{}", github::render_card_text(&profile));
    }
    Ok(())
}

async fn run_tui(
    source: Arc<dyn ProfileSource>,
    theme_mode: ThemeMode,
    initial_user: Option<String>,
) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(source, theme_mode);
    if let Some(user) = initial_user {
        app.set_username(user);
        app.search();
    }

    // Main loop
    let result = run_app(&mut terminal, &mut app).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<()> {
    loop {
        let theme = app.theme();
        terminal.draw(|f| ui::draw(f, app, &theme))?;

        // Poll without blocking the runtime so lookup tasks keep running
        let ready = tokio::task::block_in_place(|| {
            event::poll(std::time::Duration::from_millis(100))
        })?;

        if ready {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    if app.handle_key(key) == Flow::Quit {
                        return Ok(());
                    }
                }
            }
        }

        app.tick();
    }
}
