mod app;
mod bootstrap;
mod cli;
mod config;
mod duration;
mod runtime;
mod time_utils;
mod ui;

use std::io;

use anyhow::{Context, Result};
use clap::Parser;
use cradle_client::CradleClient;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use cli::{Cli, Commands};
use config::CradleConfig;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Commands::Run => {
            let cfg = CradleConfig::load()?;
            let client = CradleClient::new(&cfg.api_url)
                .with_context(|| format!("Invalid api_url in config: {}", cfg.api_url))?;
            run_tui(&cfg, client).await
        }
        Commands::Dev => {
            let cfg = CradleConfig::default();
            run_tui(&cfg, CradleClient::dev()).await
        }
        Commands::ConfigPath => {
            let path = CradleConfig::config_path()?;
            if !path.exists() {
                CradleConfig::default().save()?;
            }
            println!("{}", path.display());
            Ok(())
        }
    }
}

async fn run_tui(cfg: &CradleConfig, client: CradleClient) -> Result<()> {
    let mut app = app::App::new(cfg);
    bootstrap::initialize_app_state(&mut app, &client).await;

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = runtime::run_app(&mut terminal, &mut app, &client).await;

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    res
}
