use crate::core::{board::Board, piece::Piece};

use super::{
    event::{GameEvent, GameEvents},
    piece_source::{PieceSeed, PieceSource, RandomPieceSource},
};

/// Points per cleared row.
pub const ROW_SCORE: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum RunState {
    Running,
    Paused,
}

/// Horizontal direction for [`Game::shift`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
}

impl Direction {
    const fn dx(self) -> i32 {
        match self {
            Self::Left => -1,
            Self::Right => 1,
        }
    }
}

/// A running game: the board, at most one falling piece, the score and
/// the paused/running flag.
///
/// The engine never fails. Illegal moves are ignored, and locking a piece
/// at the top row reports [`GameEvent::GameOver`] and starts over with an
/// empty board and zero score.
///
/// # Example
///
/// ```
/// use stackfall_engine::{Game, GameEvent, ShapeKind};
///
/// let mut game = Game::with_source(|| ShapeKind::O);
/// game.tick();
/// let piece = game.active_piece().unwrap();
/// assert_eq!((piece.x(), piece.y()), (5, 1));
///
/// game.move_left();
/// assert_eq!(game.active_piece().unwrap().x(), 4);
/// ```
#[derive(Debug, Clone)]
pub struct Game<S = RandomPieceSource> {
    board: Board,
    active: Option<Piece>,
    score: usize,
    run_state: RunState,
    source: S,
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl Game {
    /// Creates a game with a random piece seed.
    #[must_use]
    pub fn new() -> Self {
        Self::with_source(RandomPieceSource::new())
    }

    /// Like [`Self::new`], but with a specific seed for a reproducible
    /// piece sequence.
    #[must_use]
    pub fn with_seed(seed: PieceSeed) -> Self {
        Self::with_source(RandomPieceSource::with_seed(seed))
    }

    /// The seed the piece sequence was generated from.
    #[must_use]
    pub fn seed(&self) -> PieceSeed {
        self.source.seed()
    }
}

impl<S> Game<S>
where
    S: PieceSource,
{
    /// Creates a running game on an empty board with no active piece. The
    /// first [`Self::tick`] spawns one.
    #[must_use]
    pub fn with_source(source: S) -> Self {
        Self {
            board: Board::EMPTY,
            active: None,
            score: 0,
            run_state: RunState::Running,
            source,
        }
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn active_piece(&self) -> Option<&Piece> {
        self.active.as_ref()
    }

    #[must_use]
    pub fn score(&self) -> usize {
        self.score
    }

    #[must_use]
    pub fn run_state(&self) -> RunState {
        self.run_state
    }

    #[must_use]
    pub fn is_paused(&self) -> bool {
        self.run_state.is_paused()
    }

    pub fn pause(&mut self) -> GameEvents {
        self.run_state = RunState::Paused;
        GameEvents::new()
    }

    pub fn resume(&mut self) -> GameEvents {
        self.run_state = RunState::Running;
        GameEvents::new()
    }

    pub fn toggle(&mut self) -> GameEvents {
        match self.run_state {
            RunState::Running => self.pause(),
            RunState::Paused => self.resume(),
        }
    }

    /// Starts over: empty board, zero score, a fresh piece, running.
    pub fn reset(&mut self) -> GameEvents {
        self.board = Board::EMPTY;
        self.score = 0;
        self.active = Some(self.spawn());
        self.run_state = RunState::Running;
        let mut events = GameEvents::new();
        events.push(GameEvent::StateChanged);
        events
    }

    /// Advances the game by one clock step.
    ///
    /// Clears full rows left by the previous lock, spawns a piece if none
    /// is active, then moves the active piece down. Does nothing while
    /// paused.
    pub fn tick(&mut self) -> GameEvents {
        if self.is_paused() {
            return GameEvents::new();
        }

        let mut events = GameEvents::new();
        let count = self.board.clear_full_rows();
        if count > 0 {
            self.score += count * ROW_SCORE;
            events.push(GameEvent::RowsCleared { count });
        }
        if self.active.is_none() {
            self.active = Some(self.spawn());
        }
        self.step_down(&mut events);
        events
    }

    /// Moves the active piece down one row, locking it if it cannot move.
    pub fn move_down(&mut self) -> GameEvents {
        let mut events = GameEvents::new();
        self.step_down(&mut events);
        events
    }

    pub fn move_left(&mut self) -> GameEvents {
        self.shift(Direction::Left)
    }

    pub fn move_right(&mut self) -> GameEvents {
        self.shift(Direction::Right)
    }

    /// Moves the active piece one column if the target is free.
    pub fn shift(&mut self, direction: Direction) -> GameEvents {
        let mut events = GameEvents::new();
        let Some(piece) = &mut self.active else {
            return events;
        };
        let dx = direction.dx();
        if !self.board.collides(piece.x() + dx, piece.y(), piece.shape()) {
            piece.shift(dx, 0);
        }
        events.push(GameEvent::StateChanged);
        events
    }

    /// Turns the active piece clockwise in place if the result is free.
    ///
    /// There are no wall kicks: a blocked rotation is ignored.
    pub fn rotate(&mut self) -> GameEvents {
        let mut events = GameEvents::new();
        let Some(piece) = &mut self.active else {
            return events;
        };
        let rotated = piece.rotated_cw();
        if !self.board.collides(piece.x(), piece.y(), &rotated) {
            piece.set_shape(rotated);
        }
        events.push(GameEvent::StateChanged);
        events
    }

    fn spawn(&mut self) -> Piece {
        Piece::spawn(self.source.next_kind())
    }

    fn step_down(&mut self, events: &mut GameEvents) {
        if let Some(mut piece) = self.active {
            if self.board.collides(piece.x(), piece.y() + 1, piece.shape()) {
                self.board.lock(&piece);
                if piece.y() == 0 {
                    events.push(GameEvent::GameOver {
                        final_score: self.score,
                    });
                    self.score = 0;
                    self.board = Board::EMPTY;
                }
                self.active = None;
            } else {
                piece.shift(0, 1);
                self.active = Some(piece);
            }
        }
        events.push(GameEvent::StateChanged);
    }
}
