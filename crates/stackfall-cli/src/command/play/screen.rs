use std::io::{self, Write as _};

use crossterm::event::{Event, KeyCode};
use ratatui::{
    Frame,
    layout::{Constraint, Flex, Layout},
    widgets::Block,
};
use stackfall_engine::{GameEvent, GameEvents, RunState};

use crate::{
    record::{RecordingGame, SessionHistory},
    ui::widgets::{
        BoardDisplay, DialogDisplay, KeyBinding, KeyBindingDisplay, ScoreDisplay, color, style,
    },
};

/// A popup that pauses the game until the player answers it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Dialog {
    Controls,
    ConfirmReset,
    GameOver { final_score: usize },
}

const RUNNING_KEYS: &[KeyBinding] = &[
    (&["←", "→"], "Move"),
    (&["↓"], "Drop"),
    (&["↑"], "Rotate"),
    (&["P"], "Pause"),
    (&["R"], "Reset"),
    (&["H"], "Help"),
    (&["Q"], "Quit"),
];
const PAUSED_KEYS: &[KeyBinding] = &[
    (&["P"], "Resume"),
    (&["R"], "Reset"),
    (&["H"], "Help"),
    (&["Q"], "Quit"),
];
const CONTROLS_KEYS: &[KeyBinding] = &[(&["Enter"], "Play"), (&["Q"], "Quit")];
const CONFIRM_KEYS: &[KeyBinding] = &[(&["Y"], "Reset"), (&["N"], "Cancel")];
const GAME_OVER_KEYS: &[KeyBinding] = &[(&["Enter"], "Play again"), (&["Q"], "Quit")];

#[derive(Debug)]
pub struct PlayScreen {
    game: RecordingGame,
    dialog: Option<Dialog>,
    bell: bool,
    is_exiting: bool,
}

impl PlayScreen {
    pub fn new(game: RecordingGame, bell: bool, show_controls: bool) -> Self {
        let mut screen = Self {
            game,
            dialog: None,
            bell,
            is_exiting: false,
        };
        if show_controls {
            screen.open(Dialog::Controls);
        }
        screen
    }

    pub fn is_running(&self) -> bool {
        !self.is_exiting && self.dialog.is_none() && !self.game.is_paused()
    }

    pub fn is_exiting(&self) -> bool {
        self.is_exiting
    }

    pub fn into_history(self) -> SessionHistory {
        self.game.into_history()
    }

    pub fn handle_event(&mut self, event: &Event) {
        if let Some(event) = event.as_key_press_event() {
            self.handle_key(event.code);
        }
    }

    /// Advances the game one step unless a dialog is open.
    pub fn update(&mut self) {
        if self.dialog.is_none() {
            let events = self.game.tick();
            self.react(&events);
        }
    }

    fn handle_key(&mut self, code: KeyCode) {
        let events = match self.dialog {
            Some(dialog) => self.handle_dialog_key(dialog, code),
            None => self.handle_game_key(code),
        };
        self.react(&events);
    }

    fn handle_game_key(&mut self, code: KeyCode) -> GameEvents {
        let is_running = !self.game.is_paused();
        match code {
            KeyCode::Left if is_running => self.game.move_left(),
            KeyCode::Right if is_running => self.game.move_right(),
            KeyCode::Down if is_running => self.game.move_down(),
            KeyCode::Up if is_running => self.game.rotate(),
            KeyCode::Char('p' | 'P') => self.game.toggle(),
            KeyCode::Char('r' | 'R') => {
                self.open(Dialog::ConfirmReset);
                GameEvents::new()
            }
            KeyCode::Char('h' | 'H') => {
                self.open(Dialog::Controls);
                GameEvents::new()
            }
            KeyCode::Char('q' | 'Q') | KeyCode::Esc => {
                self.is_exiting = true;
                GameEvents::new()
            }
            _ => GameEvents::new(),
        }
    }

    fn handle_dialog_key(&mut self, dialog: Dialog, code: KeyCode) -> GameEvents {
        match (dialog, code) {
            (Dialog::ConfirmReset, KeyCode::Char('y' | 'Y')) => {
                self.dialog = None;
                self.game.reset()
            }
            (Dialog::ConfirmReset, KeyCode::Char('n' | 'N') | KeyCode::Esc)
            | (Dialog::Controls, KeyCode::Enter | KeyCode::Esc | KeyCode::Char('h' | 'H'))
            | (Dialog::GameOver { .. }, KeyCode::Enter | KeyCode::Esc) => {
                self.dialog = None;
                self.game.resume()
            }
            (Dialog::Controls | Dialog::GameOver { .. }, KeyCode::Char('q' | 'Q')) => {
                self.is_exiting = true;
                GameEvents::new()
            }
            _ => GameEvents::new(),
        }
    }

    fn open(&mut self, dialog: Dialog) {
        self.dialog = Some(dialog);
        self.game.pause();
    }

    fn react(&mut self, events: &GameEvents) {
        for event in events {
            match *event {
                GameEvent::RowsCleared { .. } => self.ring_bell(),
                GameEvent::GameOver { final_score } => {
                    self.ring_bell();
                    self.open(Dialog::GameOver { final_score });
                }
                GameEvent::StateChanged => {}
            }
        }
    }

    fn ring_bell(&self) {
        if self.bell {
            let mut out = io::stdout();
            _ = out.write_all(b"\x07").and_then(|()| out.flush());
        }
    }

    pub fn draw(&self, frame: &mut Frame<'_>) {
        let border_style = match self.game.run_state() {
            RunState::Running => color::WHITE,
            RunState::Paused => color::YELLOW,
        };
        let board = BoardDisplay::new(self.game.board())
            .active_piece(self.game.active_piece())
            .block(Block::bordered().border_style(border_style).style(style::DEFAULT));
        let score = ScoreDisplay::new(&self.game).block(
            Block::bordered()
                .border_style(border_style)
                .style(style::DEFAULT),
        );
        let help = KeyBindingDisplay::new(self.key_bindings());

        let [main_area, help_area] = Layout::vertical([
            Constraint::Length(board.height()),
            Constraint::Length(1),
        ])
        .flex(Flex::Center)
        .areas(frame.area());
        let [board_area, side_area] = Layout::horizontal([
            Constraint::Length(board.width()),
            Constraint::Length(score.width()),
        ])
        .flex(Flex::Center)
        .spacing(1)
        .areas(main_area);
        let [score_area] =
            Layout::vertical([Constraint::Length(score.height())]).areas(side_area);

        frame.render_widget(board, board_area);
        frame.render_widget(score, score_area);
        frame.render_widget(help, help_area);
        if let Some(dialog) = self.dialog {
            frame.render_widget(dialog_display(dialog), board_area);
        }
    }

    fn key_bindings(&self) -> &'static [KeyBinding<'static>] {
        match self.dialog {
            Some(Dialog::Controls) => CONTROLS_KEYS,
            Some(Dialog::ConfirmReset) => CONFIRM_KEYS,
            Some(Dialog::GameOver { .. }) => GAME_OVER_KEYS,
            None if self.game.is_paused() => PAUSED_KEYS,
            None => RUNNING_KEYS,
        }
    }
}

fn dialog_display(dialog: Dialog) -> DialogDisplay<'static> {
    match dialog {
        Dialog::Controls => DialogDisplay::new("CONTROLS", style::DIALOG)
            .line("P      Pause / resume")
            .line("↑      Rotate")
            .line("← ↓ →  Move")
            .line("R      Reset")
            .line("Q      Quit")
            .line("")
            .line("Enter to play"),
        Dialog::ConfirmReset => DialogDisplay::new("RESET", style::DIALOG)
            .line("Start a new game?")
            .line("")
            .line("Y yes / N no"),
        Dialog::GameOver { final_score } => DialogDisplay::new("GAME OVER", style::GAME_OVER)
            .line(format!("Score: {final_score}"))
            .line("Try again!")
            .line("")
            .line("Enter to continue"),
    }
}
