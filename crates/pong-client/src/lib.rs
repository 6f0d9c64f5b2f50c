pub mod api;
pub mod core;
pub mod bridge;
pub mod input;
pub mod renderer;
pub mod ui;

// Re-export key types at crate root for convenience
pub use api::config::ClientConfig;
pub use api::types::{Direction, GameState, HighScoreEntry, Winner};
pub use bridge::error::ClientError;
pub use bridge::protocol::{ApiCall, ApiRequest, Method, Reply, RequestId, JSON_CONTENT_TYPE};
pub use crate::core::controller::{Phase, SaveStatus, SessionController};
pub use crate::core::session::Session;
pub use crate::core::time::Interval;
pub use input::keys::{direction_for_key, InputTracker, KeyTarget};
pub use renderer::{build_frame, scoreboard_text, DrawCommand, Frame, Surface};
pub use ui::effects::{endgame_message, ConnectionStatus, UiEffect};
pub use ui::highscores::{format_date, format_entry, HighScoreBoard};
