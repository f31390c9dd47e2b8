use arrayvec::ArrayVec;
use serde::{Deserialize, Serialize};

/// Something a [`Game`](super::Game) call did that collaborators may want
/// to react to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, derive_more::IsVariant)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GameEvent {
    /// Full rows were removed at the start of a tick.
    RowsCleared { count: usize },
    /// A piece locked at the top row. The score is reported before the
    /// board and score are reset.
    GameOver { final_score: usize },
    /// The board or the active piece may have changed; redraw.
    StateChanged,
}

/// Events produced by one engine call, in the order they happened.
pub type GameEvents = ArrayVec<GameEvent, 4>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialized_form() {
        let events = [
            GameEvent::RowsCleared { count: 2 },
            GameEvent::GameOver { final_score: 30 },
            GameEvent::StateChanged,
        ];
        let json = serde_json::to_string(&events).unwrap();
        assert_eq!(
            json,
            r#"[{"type":"rows_cleared","count":2},{"type":"game_over","final_score":30},{"type":"state_changed"}]"#
        );
        let parsed: Vec<GameEvent> = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, events);
    }

    #[test]
    fn test_is_variant() {
        assert!(GameEvent::StateChanged.is_state_changed());
        assert!(GameEvent::GameOver { final_score: 0 }.is_game_over());
        assert!(!GameEvent::RowsCleared { count: 1 }.is_game_over());
    }
}
