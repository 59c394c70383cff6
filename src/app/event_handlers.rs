use crossterm::event::{Event, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind};

use super::App;
use crate::app::config::binds::normalize_key;
use crate::app::logging::{log_player_command, log_user_interaction};
use crate::app::player_handler::PlayerAction;
use crate::ui::layout::{ClickTarget, hit_test};

/// Trait for event handling
pub trait EventHandlers {
    fn handle_event(&mut self, event: Event);
    fn on_key_event(&mut self, key: KeyEvent);
    fn on_mouse_event(&mut self, mouse: MouseEvent);
    fn dispatch(&mut self, action: PlayerAction);
    fn quit(&mut self);
}

impl EventHandlers for App {
    fn handle_event(&mut self, event: Event) {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => self.on_key_event(key),
            Event::Mouse(mouse) => self.on_mouse_event(mouse),
            // Redraw happens at the top of the next cycle
            Event::Resize(columns, rows) => {
                log::debug!("Terminal resized to {}x{}", columns, rows);
                self.resized = true;
            }
            _ => {}
        }
    }

    fn on_key_event(&mut self, key: KeyEvent) {
        let lookup = normalize_key(key.modifiers, key.code);
        if let Some(action) = self.key_map.get(&lookup).copied() {
            self.dispatch(action);
        }
    }

    /// Left clicks on the progress bar and its buttons become player commands.
    fn on_mouse_event(&mut self, mouse: MouseEvent) {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return;
        }

        let action = match hit_test(mouse.column, mouse.row, self.orchestrator.layout()) {
            ClickTarget::SeekTo(fraction) => PlayerAction::SeekTo(fraction),
            ClickTarget::Previous => PlayerAction::Previous,
            ClickTarget::Next => PlayerAction::Next,
            ClickTarget::None => return,
        };
        log_user_interaction(
            "click",
            Some(&format!("{},{} -> {:?}", mouse.column, mouse.row, action)),
        );
        self.dispatch(action);
    }

    fn dispatch(&mut self, action: PlayerAction) {
        match action {
            PlayerAction::Quit => self.quit(),
            PlayerAction::ToggleStatusBar => {
                self.show_status_bar = !self.show_status_bar;
                self.orchestrator.invalidate();
                log_user_interaction("toggle status bar", None);
            }
            _ => {
                let result = action.execute(self.source.as_ref(), &self.config.player);
                log_player_command(&action, &result);
            }
        }
    }

    /// Set running to false to quit the application.
    fn quit(&mut self) {
        self.running = false;
    }
}
