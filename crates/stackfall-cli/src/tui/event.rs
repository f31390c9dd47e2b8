use crossterm::event::Event as CrosstermEvent;

/// Events processed by TUI applications.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::From)]
pub(super) enum TuiEvent {
    /// The tick interval elapsed.
    Tick,
    /// State changed since the last frame.
    Render,
    /// Terminal events such as key input, mouse, and resize.
    #[from]
    Crossterm(CrosstermEvent),
}
