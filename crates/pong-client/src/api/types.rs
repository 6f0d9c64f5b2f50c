use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Which side won a finished game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Winner {
    Player,
    Computer,
}

/// Paddle movement direction sent to `/move`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
}

impl Direction {
    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
        }
    }
}

/// Authoritative game snapshot as served by the backend.
///
/// The client trusts these values as-is: positions are not range checked
/// and `winner` is only meaningful once `game_over` is set.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GameState {
    pub player_y: f32,
    pub computer_y: f32,
    pub ball_x: f32,
    pub ball_y: f32,
    /// Ball velocity. Sent by the server, never read by the client.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ball_vx: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ball_vy: Option<f32>,
    pub player_score: u32,
    pub computer_score: u32,
    pub game_over: bool,
    #[serde(default)]
    pub winner: Option<Winner>,
}

/// One row of the high-score table. Display only.
///
/// The server stores whatever score a client posted, so `score` is kept as
/// raw JSON rather than rejecting the whole table over one odd row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HighScoreEntry {
    pub username: String,
    #[serde(default)]
    pub score: Value,
    pub date: String,
}

impl HighScoreEntry {
    /// The score as a browser would print it: whole floats lose their
    /// fraction, strings go in unquoted.
    pub fn score_text(&self) -> String {
        match &self.score {
            Value::Number(n) => match (n.as_i64(), n.as_u64(), n.as_f64()) {
                (Some(i), _, _) => i.to_string(),
                (_, Some(u), _) => u.to_string(),
                (_, _, Some(f)) if f.fract() == 0.0 && f.abs() < 1e15 => (f as i64).to_string(),
                (_, _, Some(f)) => f.to_string(),
                _ => n.to_string(),
            },
            Value::String(s) => s.clone(),
            other => other.to_string(),
        }
    }
}

// ---- Reply bodies ----

/// Body of a `/start` reply.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct StartReply {
    pub game_id: String,
    pub state: GameState,
}

/// Body of a `/state` or `/move` reply.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct StateReply {
    pub state: GameState,
}

/// Body of a `/high_scores` reply.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct HighScoresReply {
    pub high_scores: Vec<HighScoreEntry>,
}

// ---- Request bodies ----

#[derive(Debug, Clone, Serialize)]
pub struct MoveBody<'a> {
    pub game_id: &'a str,
    pub direction: Direction,
}

#[derive(Debug, Clone, Serialize)]
pub struct SaveScoreBody<'a> {
    pub username: &'a str,
    pub score: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_server_state_with_integers_and_extra_fields() {
        let json = r#"{
            "player_y": 250, "computer_y": 250,
            "ball_x": 392, "ball_y": 292,
            "ball_vx": 12, "ball_vy": -12,
            "player_score": 0, "computer_score": 3,
            "game_over": false, "winner": null,
            "unexpected": "ignored"
        }"#;
        let state: GameState = serde_json::from_str(json).unwrap();
        assert_eq!(state.player_y, 250.0);
        assert_eq!(state.ball_x, 392.0);
        assert_eq!(state.ball_vy, Some(-12.0));
        assert_eq!(state.computer_score, 3);
        assert!(!state.game_over);
        assert_eq!(state.winner, None);
    }

    #[test]
    fn winner_and_velocity_are_optional() {
        let json = r#"{"player_y":0,"computer_y":0,"ball_x":0,"ball_y":0,
            "player_score":5,"computer_score":1,"game_over":true,"winner":"player"}"#;
        let state: GameState = serde_json::from_str(json).unwrap();
        assert_eq!(state.winner, Some(Winner::Player));
        assert_eq!(state.ball_vx, None);
    }

    #[test]
    fn score_text_matches_browser_output() {
        let entry = |score: Value| HighScoreEntry {
            username: "ann".into(),
            score,
            date: String::new(),
        };
        assert_eq!(entry(serde_json::json!(7)).score_text(), "7");
        assert_eq!(entry(serde_json::json!(3.0)).score_text(), "3");
        assert_eq!(entry(serde_json::json!(2.5)).score_text(), "2.5");
        assert_eq!(entry(serde_json::json!(-4)).score_text(), "-4");
        assert_eq!(entry(serde_json::json!("12")).score_text(), "12");
        assert_eq!(entry(Value::Null).score_text(), "null");
    }

    #[test]
    fn move_body_uses_lowercase_direction() {
        let body = MoveBody { game_id: "g1", direction: Direction::Down };
        let json = serde_json::to_string(&body).unwrap();
        assert_eq!(json, r#"{"game_id":"g1","direction":"down"}"#);
        assert_eq!(Direction::Up.as_str(), "up");
    }
}
