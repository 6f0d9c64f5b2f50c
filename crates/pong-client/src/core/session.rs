use crate::api::types::GameState;
use crate::bridge::protocol::RequestId;

/// One played game: the server-issued id and the newest state applied to it.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    game_id: String,
    state: GameState,
    /// Request whose reply produced `state`. Replies to older requests are stale.
    applied: RequestId,
}

impl Session {
    /// A fresh session from a `/start` reply.
    pub fn new(game_id: String, state: GameState, started_by: RequestId) -> Self {
        Self {
            game_id,
            state,
            applied: started_by,
        }
    }

    pub fn game_id(&self) -> &str {
        &self.game_id
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Replace the state with the reply to request `id`.
    ///
    /// Returns `false` (leaving the state untouched) if a reply to a newer
    /// request has already been applied.
    pub fn apply(&mut self, id: RequestId, state: GameState) -> bool {
        if id <= self.applied {
            return false;
        }
        self.applied = id;
        self.state = state;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scored(player_score: u32) -> GameState {
        GameState {
            player_score,
            ..GameState::default()
        }
    }

    #[test]
    fn newer_reply_replaces_state() {
        let mut s = Session::new("g1".into(), scored(0), RequestId(1));
        assert!(s.apply(RequestId(3), scored(1)));
        assert_eq!(s.state().player_score, 1);
        assert_eq!(s.game_id(), "g1");
    }

    #[test]
    fn older_reply_is_discarded() {
        let mut s = Session::new("g1".into(), scored(0), RequestId(1));
        assert!(s.apply(RequestId(5), scored(2)));
        assert!(!s.apply(RequestId(4), scored(1)));
        assert!(!s.apply(RequestId(5), scored(9)));
        assert_eq!(s.state().player_score, 2);
    }
}
