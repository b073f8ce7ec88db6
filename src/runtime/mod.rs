use std::env;
use std::time::Duration;

use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing::{error, info};

use crate::engine::RodioEngine;
use crate::player::Player;
use crate::ui::TerminalSurface;

mod event_loop;
mod logging;
mod settings;
mod startup;

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let settings = settings::load_settings();

    match logging::init(&settings.logging) {
        Ok(path) => info!(log = %path.display(), "reprise starting"),
        Err(e) => eprintln!("reprise: logging disabled: {e}"),
    }

    let arg = env::args().nth(1);
    let items = startup::resolve_items(arg.as_deref(), &settings)?;

    let engine = RodioEngine::open().inspect_err(|e| error!(error = %e, "cannot open audio output"))?;
    let surface = TerminalSurface::new(settings.ui.header_text.clone());
    let mut player = Player::new(settings.player_config(items), Box::new(engine), surface)?;

    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let frame = Duration::from_millis(settings.ui.frame_ms);
    let run_result = event_loop::run(&mut terminal, &mut player, frame);

    player.stop();

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;

    info!("reprise exiting");
    run_result
}
