//! HTTP contract with the game server.
//!
//! Requests are described as data: the web layer turns an [`ApiRequest`] into
//! a `fetch` call and hands the raw reply body back to [`ApiCall::decode`].
//!
//! ```text
//! POST /start                 -> {game_id, state}
//! GET  /state?game_id=ID      -> {state}
//! POST /move   {game_id, direction}
//!                             -> {state}
//! POST /save_score {username, score}
//!                             -> (ignored)
//! GET  /high_scores           -> {high_scores: [{username, score, date}]}
//! ```

use crate::api::types::{
    Direction, GameState, HighScoreEntry, HighScoresReply, MoveBody, SaveScoreBody, StartReply,
    StateReply,
};
use crate::bridge::error::ClientError;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// Bytes escaped in query values: everything but the RFC 3986 unreserved set.
const QUERY_VALUE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Content type of every request body.
pub const JSON_CONTENT_TYPE: &str = "application/json";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

impl Method {
    pub fn as_str(self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
        }
    }
}

/// Identifier of an issued request. Monotonic per controller, so it doubles
/// as the ordering key for state-bearing replies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestId(pub u64);

/// One endpoint call with its arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiCall {
    Start,
    FetchState { game_id: String },
    Move { game_id: String, direction: Direction },
    SaveScore { username: String, score: u32 },
    FetchHighScores,
}

/// A call tagged with the id it was issued under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiRequest {
    pub id: RequestId,
    pub call: ApiCall,
}

/// Decoded reply, one variant per endpoint.
#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    Started { game_id: String, state: GameState },
    State(GameState),
    Moved(GameState),
    ScoreSaved,
    HighScores(Vec<HighScoreEntry>),
}

impl ApiCall {
    pub fn method(&self) -> Method {
        match self {
            ApiCall::FetchState { .. } | ApiCall::FetchHighScores => Method::Get,
            ApiCall::Start | ApiCall::Move { .. } | ApiCall::SaveScore { .. } => Method::Post,
        }
    }

    /// Path and query, relative to the API base URL.
    pub fn path(&self) -> String {
        match self {
            ApiCall::Start => "/start".to_string(),
            ApiCall::FetchState { game_id } => {
                format!("/state?game_id={}", utf8_percent_encode(game_id, QUERY_VALUE))
            }
            ApiCall::Move { .. } => "/move".to_string(),
            ApiCall::SaveScore { .. } => "/save_score".to_string(),
            ApiCall::FetchHighScores => "/high_scores".to_string(),
        }
    }

    /// JSON request body, if the endpoint takes one.
    pub fn body(&self) -> Result<Option<String>, ClientError> {
        let json = match self {
            ApiCall::Move { game_id, direction } => serde_json::to_string(&MoveBody {
                game_id,
                direction: *direction,
            }),
            ApiCall::SaveScore { username, score } => serde_json::to_string(&SaveScoreBody {
                username,
                score: *score,
            }),
            ApiCall::Start | ApiCall::FetchState { .. } | ApiCall::FetchHighScores => {
                return Ok(None)
            }
        };
        json.map(Some).map_err(|e| ClientError::Encode(e.to_string()))
    }

    /// Decode the raw reply body for this call.
    pub fn decode(&self, body: &str) -> Result<Reply, ClientError> {
        Ok(match self {
            ApiCall::Start => {
                let reply: StartReply = serde_json::from_str(body)?;
                Reply::Started {
                    game_id: reply.game_id,
                    state: reply.state,
                }
            }
            ApiCall::FetchState { .. } => Reply::State(serde_json::from_str::<StateReply>(body)?.state),
            ApiCall::Move { .. } => Reply::Moved(serde_json::from_str::<StateReply>(body)?.state),
            // The save acknowledgement carries nothing the client needs.
            ApiCall::SaveScore { .. } => Reply::ScoreSaved,
            ApiCall::FetchHighScores => {
                Reply::HighScores(serde_json::from_str::<HighScoresReply>(body)?.high_scores)
            }
        })
    }

    /// Short label used in log lines.
    pub fn label(&self) -> &'static str {
        match self {
            ApiCall::Start => "start",
            ApiCall::FetchState { .. } => "state",
            ApiCall::Move { .. } => "move",
            ApiCall::SaveScore { .. } => "save_score",
            ApiCall::FetchHighScores => "high_scores",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_table() {
        let cases = [
            (ApiCall::Start, Method::Post, "/start"),
            (
                ApiCall::FetchState { game_id: "g1".into() },
                Method::Get,
                "/state?game_id=g1",
            ),
            (
                ApiCall::Move { game_id: "g1".into(), direction: Direction::Up },
                Method::Post,
                "/move",
            ),
            (
                ApiCall::SaveScore { username: "ann".into(), score: 3 },
                Method::Post,
                "/save_score",
            ),
            (ApiCall::FetchHighScores, Method::Get, "/high_scores"),
        ];
        for (call, method, path) in cases {
            assert_eq!(call.method(), method, "{}", call.label());
            assert_eq!(call.path(), path);
        }
    }

    #[test]
    fn state_query_is_percent_encoded() {
        let call = ApiCall::FetchState { game_id: "a b&c=d".into() };
        assert_eq!(call.path(), "/state?game_id=a%20b%26c%3Dd");
        let uuid = ApiCall::FetchState { game_id: "3f2a-9c_1.x~".into() };
        assert_eq!(uuid.path(), "/state?game_id=3f2a-9c_1.x~");
        let unicode = ApiCall::FetchState { game_id: "é".into() };
        assert_eq!(unicode.path(), "/state?game_id=%C3%A9");
    }

    #[test]
    fn bodies() {
        assert_eq!(ApiCall::Start.body().unwrap(), None);
        assert_eq!(ApiCall::FetchHighScores.body().unwrap(), None);
        let save = ApiCall::SaveScore { username: "ann".into(), score: 5 };
        assert_eq!(
            save.body().unwrap().as_deref(),
            Some(r#"{"username":"ann","score":5}"#)
        );
    }

    #[test]
    fn decode_start_reply() {
        let body = r#"{"game_id":"g1","state":{"player_y":250,"computer_y":250,
            "ball_x":400,"ball_y":300,"player_score":0,"computer_score":0,"game_over":false}}"#;
        match ApiCall::Start.decode(body).unwrap() {
            Reply::Started { game_id, state } => {
                assert_eq!(game_id, "g1");
                assert_eq!(state.ball_x, 400.0);
            }
            other => panic!("unexpected reply {:?}", other),
        }
    }

    #[test]
    fn decode_high_scores_with_loose_scores() {
        let body = r#"{"high_scores":[
            {"username":"ann","score":3.0,"date":"2025-03-07T16:05:09"},
            {"username":"bo","score":-2,"date":"2025-03-07T16:05:09"},
            {"username":"cy","score":null,"date":"2025-03-07T16:05:09"},
            {"username":"di","date":"2025-03-07T16:05:09"}
        ]}"#;
        match ApiCall::FetchHighScores.decode(body).unwrap() {
            Reply::HighScores(entries) => assert_eq!(entries.len(), 4),
            other => panic!("unexpected reply {:?}", other),
        }
    }

    #[test]
    fn decode_save_ignores_body() {
        let save = ApiCall::SaveScore { username: "ann".into(), score: 5 };
        assert_eq!(save.decode("").unwrap(), Reply::ScoreSaved);
    }

    #[test]
    fn decode_error_reply_is_decode_error() {
        let err = ApiCall::FetchHighScores
            .decode(r#"{"error":"Invalid game_id"}"#)
            .unwrap_err();
        assert!(matches!(err, ClientError::Decode(_)), "got {:?}", err);
    }
}
