//! Interactive locker browser: saved roadmaps, live from the store.

pub mod app;
mod ui;

use std::io;
use std::path::PathBuf;

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use innings_db::LocalStore;

use app::{App, View};

/// Launch the locker browser.
pub async fn run_locker(store: LocalStore, export_dir: PathBuf) -> Result<()> {
    let mut app = App::new(store, export_dir);

    // Initial data load, before the terminal switches mode.
    app.wait_for_update().await?;

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_event_loop(&mut terminal, &mut app).await;

    // Restore terminal.
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

async fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<()> {
    let tick_rate = app.tick_rate;

    loop {
        terminal.draw(|f| ui::render(f, app))?;

        if event::poll(tick_rate)? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                app.status_message = None;

                if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL)
                {
                    app.should_quit = true;
                } else if let View::ConfirmDelete { .. } = app.current_view {
                    match key.code {
                        KeyCode::Char('y') | KeyCode::Char('Y') => {
                            if let Err(e) = app.confirm_delete().await {
                                app.status_message = Some(format!("Delete failed: {e}"));
                                app.navigate_back();
                            }
                        }
                        _ => app.navigate_back(),
                    }
                } else {
                    match key.code {
                        KeyCode::Char('q') | KeyCode::Esc => app.navigate_back(),
                        KeyCode::Enter | KeyCode::Char(' ') => app.navigate_enter(),
                        KeyCode::Char('j') | KeyCode::Down => app.move_down(),
                        KeyCode::Char('k') | KeyCode::Up => app.move_up(),
                        KeyCode::Tab if app.current_view == View::List => app.cycle_filter(),
                        KeyCode::Char('d') => app.request_delete(),
                        KeyCode::Char('e') => {
                            if let Err(e) = app.export_selected() {
                                app.status_message = Some(format!("Export failed: {e:#}"));
                            }
                        }
                        KeyCode::Char('?') => app.show_help(),
                        _ => {}
                    }
                }
            }
        }

        app.poll_updates()?;

        if app.should_quit {
            return Ok(());
        }
    }
}
