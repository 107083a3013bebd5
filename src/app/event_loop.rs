use std::io::stdout;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{self, DisableBracketedPaste, EnableBracketedPaste};
use crossterm::execute;
use ratatui::DefaultTerminal;

use crate::app::{App, Session};

use super::input::event_to_message;

impl App {
    /// Run the main event loop.
    ///
    /// # Errors
    ///
    /// Returns an error if terminal initialization or the event loop
    /// encounters an I/O failure.
    pub fn run(self) -> Result<()> {
        let mut terminal = ratatui::try_init()
            .context("Failed to initialize terminal, splitmark requires an interactive terminal")?;
        execute!(stdout(), EnableBracketedPaste)?;
        let size = terminal.size()?;
        tracing::info!(width = size.width, height = size.height, "terminal ready");

        let mut session = self.into_session((size.width, size.height));
        let result = Self::event_loop(&mut terminal, &mut session);

        let _ = execute!(stdout(), DisableBracketedPaste);
        ratatui::restore();
        result
    }

    fn event_loop(terminal: &mut DefaultTerminal, session: &mut Session) -> Result<()> {
        let start = Instant::now();
        let mut needs_render = true;

        loop {
            let now_ms = elapsed_ms(start);
            if session.tick(now_ms) {
                needs_render = true;
            }

            let poll = if needs_render {
                Duration::ZERO
            } else {
                session.poll_timeout(now_ms)
            };
            if event::poll(poll)? {
                // Refresh timestamp after poll wait so the debounce uses accurate times.
                let event_ms = elapsed_ms(start);
                if let Some(msg) = event_to_message(event::read()?, session.model()) {
                    tracing::trace!(?msg, "event");
                    session.handle(msg, event_ms);
                    needs_render = true;
                }

                // Coalesce key repeat bursts and pastes into a single draw.
                while event::poll(Duration::ZERO)? {
                    let drain_ms = elapsed_ms(start);
                    if let Some(msg) = event_to_message(event::read()?, session.model()) {
                        session.handle(msg, drain_ms);
                        needs_render = true;
                    }
                }
            }

            if needs_render {
                terminal.draw(|frame| crate::ui::render(session.model(), frame))?;
                needs_render = false;
            }

            if session.model().should_quit {
                break;
            }
        }
        Ok(())
    }
}

fn elapsed_ms(start: Instant) -> u64 {
    u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX)
}
