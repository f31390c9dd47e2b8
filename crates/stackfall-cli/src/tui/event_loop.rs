use std::time::{Duration, Instant};

use crossterm::event;

use crate::tui::event::TuiEvent;

/// Event loop state management.
///
/// Produces a `Tick` every tick interval (none while the interval is
/// unset), a `Render` whenever something happened since the last frame,
/// and otherwise waits for terminal input.
#[derive(Debug)]
pub(super) struct EventLoop {
    tick_interval: Option<Duration>,
    last_tick: Instant,
    dirty: bool,
}

impl EventLoop {
    pub(super) fn new(now: Instant) -> Self {
        Self {
            tick_interval: None,
            last_tick: now,
            dirty: true, // Initial render is required on startup
        }
    }

    /// Sets the tick interval.
    ///
    /// Pass `None` to stop ticking. Re-enabling the clock starts a full
    /// interval from `now` instead of firing a catch-up tick.
    pub(super) fn set_tick_interval(&mut self, interval: Option<Duration>, now: Instant) {
        if self.tick_interval.is_none() && interval.is_some() {
            self.last_tick = now;
        }
        self.tick_interval = interval;
    }

    /// Returns the next event.
    ///
    /// Blocks until the next tick is due or a crossterm event occurs.
    pub(super) fn next(&mut self) -> anyhow::Result<TuiEvent> {
        loop {
            let now = Instant::now();
            if let Some(event) = self.due(now) {
                return Ok(event);
            }

            if let Some(timeout) = self.timeout(now)
                && !event::poll(timeout)?
            {
                continue;
            }

            self.dirty = true;
            return Ok(event::read()?.into());
        }
    }

    /// The tick or render event due at `now`, if any. Ticks take priority.
    fn due(&mut self, now: Instant) -> Option<TuiEvent> {
        if let Some(tick_interval) = self.tick_interval
            && now.duration_since(self.last_tick) >= tick_interval
        {
            self.last_tick = now;
            self.dirty = true;
            return Some(TuiEvent::Tick);
        }
        if self.dirty {
            self.dirty = false;
            return Some(TuiEvent::Render);
        }
        None
    }

    /// How long to wait for input before the next tick is due.
    fn timeout(&self, now: Instant) -> Option<Duration> {
        let next_tick_at = self.last_tick + self.tick_interval?;
        Some(next_tick_at.saturating_duration_since(now))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const INTERVAL: Duration = Duration::from_millis(500);

    #[test]
    fn test_renders_once_on_startup() {
        let now = Instant::now();
        let mut events = EventLoop::new(now);
        assert_eq!(events.due(now), Some(TuiEvent::Render));
        assert_eq!(events.due(now), None);
        assert_eq!(events.timeout(now), None);
    }

    #[test]
    fn test_tick_after_interval() {
        let start = Instant::now();
        let mut events = EventLoop::new(start);
        events.set_tick_interval(Some(INTERVAL), start);
        assert_eq!(events.due(start), Some(TuiEvent::Render));

        let early = start + Duration::from_millis(200);
        assert_eq!(events.due(early), None);
        assert_eq!(events.timeout(early), Some(Duration::from_millis(300)));

        let late = start + Duration::from_millis(520);
        assert_eq!(events.due(late), Some(TuiEvent::Tick));
        assert_eq!(events.due(late), Some(TuiEvent::Render));
        assert_eq!(events.timeout(late), Some(INTERVAL));
    }

    #[test]
    fn test_overdue_timeout_is_zero() {
        let start = Instant::now();
        let mut events = EventLoop::new(start);
        events.set_tick_interval(Some(INTERVAL), start);
        assert_eq!(events.timeout(start + INTERVAL * 3), Some(Duration::ZERO));
    }

    #[test]
    fn test_stopped_clock_does_not_tick() {
        let start = Instant::now();
        let mut events = EventLoop::new(start);
        events.set_tick_interval(Some(INTERVAL), start);
        events.set_tick_interval(None, start);
        events.due(start);
        assert_eq!(events.due(start + INTERVAL * 10), None);
        assert_eq!(events.timeout(start + INTERVAL * 10), None);
    }

    #[test]
    fn test_restarted_clock_waits_full_interval() {
        let start = Instant::now();
        let mut events = EventLoop::new(start);
        events.due(start);

        let resumed = start + INTERVAL * 4;
        events.set_tick_interval(Some(INTERVAL), resumed);
        assert_eq!(events.due(resumed), None);
        assert_eq!(events.timeout(resumed), Some(INTERVAL));
        assert_eq!(events.due(resumed + INTERVAL), Some(TuiEvent::Tick));
    }

    #[test]
    fn test_changing_running_interval_keeps_phase() {
        let start = Instant::now();
        let mut events = EventLoop::new(start);
        events.set_tick_interval(Some(INTERVAL), start);
        events.due(start);

        let later = start + Duration::from_millis(100);
        events.set_tick_interval(Some(Duration::from_millis(250)), later);
        assert_eq!(events.timeout(later), Some(Duration::from_millis(150)));
    }
}
