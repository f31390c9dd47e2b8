use std::{
    collections::VecDeque,
    fs::{self, File},
    io::{BufWriter, Write as _},
    ops::Deref,
    path::{Path, PathBuf},
};

use anyhow::Context;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use stackfall_engine::{Game, GameEvent, GameEvents, PieceSeed};

/// A wrapper around [`Game`] that records what the engine reports.
///
/// Offers the same mutators as `Game` and logs every event except
/// [`GameEvent::StateChanged`], stamped with the number of ticks played
/// so far. Use [`into_history`](Self::into_history) to extract the log.
#[derive(Debug)]
pub struct RecordingGame {
    game: Game,
    history: SessionHistory,
}

/// Provides read-only access to the underlying `Game`.
///
/// `DerefMut` is deliberately missing: mutations must go through
/// `RecordingGame` so their events are recorded.
impl Deref for RecordingGame {
    type Target = Game;

    fn deref(&self) -> &Self::Target {
        &self.game
    }
}

impl RecordingGame {
    /// Creates a recorded game.
    ///
    /// # Arguments
    ///
    /// * `seed` - Seed for the piece sequence
    /// * `history_size` - Maximum number of events to keep in the ring buffer
    pub fn new(seed: PieceSeed, history_size: usize) -> Self {
        Self {
            game: Game::with_seed(seed),
            history: SessionHistory::new(seed, history_size),
        }
    }

    /// Consumes the game and returns the recorded history with the final
    /// score filled in.
    pub fn into_history(mut self) -> SessionHistory {
        self.history.final_score = self.game.score();
        self.history
    }

    fn record(&mut self, events: GameEvents) -> GameEvents {
        for event in &events {
            if !event.is_state_changed() {
                self.history.record(*event);
            }
        }
        events
    }

    pub fn tick(&mut self) -> GameEvents {
        let events = self.game.tick();
        if !self.game.is_paused() {
            self.history.ticks += 1;
        }
        self.record(events)
    }

    pub fn move_down(&mut self) -> GameEvents {
        let events = self.game.move_down();
        self.record(events)
    }

    pub fn move_left(&mut self) -> GameEvents {
        self.game.move_left()
    }

    pub fn move_right(&mut self) -> GameEvents {
        self.game.move_right()
    }

    pub fn rotate(&mut self) -> GameEvents {
        self.game.rotate()
    }

    pub fn pause(&mut self) -> GameEvents {
        self.game.pause()
    }

    pub fn resume(&mut self) -> GameEvents {
        self.game.resume()
    }

    pub fn toggle(&mut self) -> GameEvents {
        self.game.toggle()
    }

    pub fn reset(&mut self) -> GameEvents {
        let events = self.game.reset();
        self.history.resets += 1;
        self.record(events)
    }
}

/// One recorded engine event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRecord {
    /// Ticks played so far, including the one that produced the event.
    pub tick: u64,
    #[serde(flatten)]
    pub event: GameEvent,
}

/// Everything written to a recording file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordedSession {
    pub recorded_at: DateTime<Utc>,
    pub seed: PieceSeed,
    pub final_score: usize,
    pub ticks: u64,
    pub resets: usize,
    pub events: Vec<EventRecord>,
}

/// Recorded history of a game.
///
/// Holds the seed (which fully determines the piece sequence), the final
/// score and a ring buffer of recent events. Created by
/// [`RecordingGame::into_history`]; written out with [`save`](Self::save).
#[derive(Debug)]
pub struct SessionHistory {
    seed: PieceSeed,
    final_score: usize,
    ticks: u64,
    resets: usize,
    buffer: RingBuffer<EventRecord>,
}

impl SessionHistory {
    fn new(seed: PieceSeed, capacity: usize) -> Self {
        Self {
            seed,
            final_score: 0,
            ticks: 0,
            resets: 0,
            buffer: RingBuffer::with_capacity(capacity),
        }
    }

    fn record(&mut self, event: GameEvent) {
        self.buffer.push(EventRecord {
            tick: self.ticks,
            event,
        });
    }

    fn to_recorded(&self, recorded_at: DateTime<Utc>) -> RecordedSession {
        RecordedSession {
            recorded_at,
            seed: self.seed,
            final_score: self.final_score,
            ticks: self.ticks,
            resets: self.resets,
            events: self.buffer.to_vec(),
        }
    }

    /// Saves the history to a JSON file.
    ///
    /// The file is named after the current time, `session_{YYYYMMDD_HHMMSS}.json`.
    ///
    /// # Arguments
    ///
    /// * `record_dir` - Directory to save the recording (created if it doesn't exist)
    ///
    /// # Returns
    ///
    /// The path of the written file.
    pub fn save(&self, record_dir: &Path) -> anyhow::Result<PathBuf> {
        fs::create_dir_all(record_dir)
            .with_context(|| format!("Failed to create directory {}", record_dir.display()))?;

        let timestamp = Utc::now();
        let filename = format!("session_{}.json", timestamp.format("%Y%m%d_%H%M%S"));
        let filepath = record_dir.join(filename);
        let data = self.to_recorded(timestamp);

        let file = File::create(&filepath)
            .with_context(|| format!("Failed to create file: {}", filepath.display()))?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, &data)
            .with_context(|| format!("Failed to write JSON to {}", filepath.display()))?;
        writer
            .flush()
            .with_context(|| format!("Failed to flush output to {}", filepath.display()))?;

        Ok(filepath)
    }
}

/// A fixed-capacity ring buffer that overwrites oldest entries when full.
#[derive(Debug)]
struct RingBuffer<T> {
    capacity: usize,
    buf: VecDeque<T>,
}

impl<T> RingBuffer<T> {
    fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity,
            buf: VecDeque::with_capacity(capacity),
        }
    }

    fn push(&mut self, item: T) {
        if self.capacity == 0 {
            return;
        }
        if self.buf.len() >= self.capacity {
            self.buf.pop_front();
        }
        self.buf.push_back(item);
    }

    fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.buf.iter().cloned().collect()
    }
}
