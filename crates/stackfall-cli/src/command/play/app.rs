use std::time::Duration;

use crossterm::event::Event;
use ratatui::Frame;
use stackfall_engine::PieceSeed;

use crate::{
    command::play::{PlayArg, screen::PlayScreen},
    record::{RecordingGame, SessionHistory},
    tui::{App, Tui},
};

#[derive(Debug)]
pub struct PlayApp {
    screen: PlayScreen,
    tick_interval: Duration,
}

impl PlayApp {
    pub fn new(seed: PieceSeed, arg: &PlayArg) -> Self {
        let game = RecordingGame::new(seed, arg.history_size);
        Self {
            screen: PlayScreen::new(game, arg.bell, !arg.no_controls),
            tick_interval: Duration::from_millis(arg.tick_ms),
        }
    }

    pub fn into_history(self) -> SessionHistory {
        self.screen.into_history()
    }

    /// The clock only runs while the game does.
    fn sync_clock(&self, tui: &mut Tui) {
        tui.set_tick_interval(self.screen.is_running().then_some(self.tick_interval));
    }
}

impl App for PlayApp {
    fn init(&mut self, tui: &mut Tui) {
        self.sync_clock(tui);
    }

    fn should_exit(&self) -> bool {
        self.screen.is_exiting()
    }

    fn handle_event(&mut self, tui: &mut Tui, event: Event) {
        self.screen.handle_event(&event);
        self.sync_clock(tui);
    }

    fn draw(&self, frame: &mut Frame) {
        self.screen.draw(frame);
    }

    fn update(&mut self, tui: &mut Tui) {
        self.screen.update();
        self.sync_clock(tui);
    }
}
