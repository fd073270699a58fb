use std::io;
use std::time::{Duration, Instant};

use anyhow::Result;
use cradle_client::CradleClient;
use crossterm::event::{self, Event};
use ratatui::{backend::CrosstermBackend, Terminal};

use crate::app::App;
use crate::ui;

use super::action_queue::channel;
use super::actions::run_action;
use super::views::{handle_mouse, handle_view_key};

pub async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    client: &CradleClient,
) -> Result<()> {
    let (action_tx, mut action_rx) = channel();

    loop {
        terminal.draw(|f| ui::render(f, app))?;

        if app.is_loading {
            app.throbber_state.calc_next();
        }

        if event::poll(Duration::from_millis(100))? {
            match event::read()? {
                Event::Key(key) => handle_view_key(key, app, &action_tx),
                Event::Mouse(mouse) => handle_mouse(mouse, app, &action_tx),
                _ => {}
            }
        }

        // Flash marks are time-boxed; drop the ones whose window closed.
        app.prune_flashes(Instant::now());

        while let Ok(action) = action_rx.try_recv() {
            run_action(action, app, client).await?;
        }

        if !app.running {
            break;
        }
    }

    Ok(())
}
