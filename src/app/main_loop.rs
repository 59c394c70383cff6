use crossterm::event::EventStream;
use futures::StreamExt;
use ratatui::DefaultTerminal;
use tokio::signal::unix::{SignalKind, signal};
use tokio::time::MissedTickBehavior;

use super::App;
use crate::app::event_handlers::EventHandlers;
use crate::app::terminal::query_geometry;
use crate::ui::CycleOutcome;

/// Trait for main application loop
pub trait AppMainLoop {
    async fn run(self, terminal: DefaultTerminal) -> color_eyre::Result<()>
    where
        Self: Sized;
}

impl AppMainLoop for App {
    /// Run the application's main loop.
    ///
    /// A poll cycle blocks the thread while it talks to the player, fetches artwork
    /// or runs the renderer. Input arriving meanwhile is buffered by the event stream
    /// and handled once the cycle returns.
    async fn run(mut self, mut terminal: DefaultTerminal) -> color_eyre::Result<()> {
        self.running = true;

        let mut events = EventStream::new();
        let mut ticker = tokio::time::interval(self.config.player.poll_interval());
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        let mut sigint = signal(SignalKind::interrupt())?;
        let mut sigterm = signal(SignalKind::terminate())?;

        log::info!(
            "Entering main loop (poll interval {:?})",
            self.config.player.poll_interval()
        );

        while self.running {
            tokio::select! {
                _ = ticker.tick() => {
                    self.poll_cycle(&mut terminal)?;
                }

                maybe_event = events.next() => match maybe_event {
                    Some(Ok(event)) => self.handle_event(event),
                    Some(Err(e)) => {
                        log::error!("Failed to read terminal event: {}", e);
                        return Err(e.into());
                    }
                    None => {
                        log::info!("Terminal event stream closed");
                        self.quit();
                    }
                },

                _ = sigint.recv() => {
                    log::info!("Received SIGINT, shutting down gracefully");
                    self.quit();
                }

                _ = sigterm.recv() => {
                    log::info!("Received SIGTERM, shutting down gracefully");
                    self.quit();
                }
            }
        }

        log::info!("Exiting main loop");
        self.orchestrator.cache().log_stats();

        Ok(())
    }
}

impl App {
    /// One tick: apply a pending resize, then let the orchestrator redraw if needed.
    fn poll_cycle(&mut self, terminal: &mut DefaultTerminal) -> color_eyre::Result<()> {
        if std::mem::take(&mut self.resized) {
            terminal.clear()?;
            self.orchestrator.invalidate();
        }

        let geometry = query_geometry(self.cell_fallback)?;
        let outcome = self.orchestrator.cycle(
            terminal,
            self.source.as_ref(),
            &geometry,
            self.show_status_bar,
            &self.config,
        )?;

        if let CycleOutcome::Rendered { artwork } = outcome {
            log::trace!(
                "Rendered {}x{} (artwork: {:?})",
                geometry.columns,
                geometry.rows,
                artwork
            );
        }
        Ok(())
    }
}
