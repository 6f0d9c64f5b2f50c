use crate::api::types::Winner;
use crate::renderer::frame::Frame;
use crate::ui::highscores::HighScoreBoard;

/// Health of the connection to the game server, shown by the status indicator.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ConnectionStatus {
    /// Nothing has been exchanged yet.
    #[default]
    Idle,
    /// The last reply succeeded.
    Connected,
    /// The last reply failed.
    Error(String),
}

impl ConnectionStatus {
    pub fn label(&self) -> String {
        match self {
            ConnectionStatus::Idle => "Connecting…".to_string(),
            ConnectionStatus::Connected => "Connected".to_string(),
            ConnectionStatus::Error(msg) => format!("Connection problem: {}", msg),
        }
    }
}

/// An instruction from the controller to the page.
/// Produced in order; the DOM layer applies them in the same order.
#[derive(Debug, Clone, PartialEq)]
pub enum UiEffect {
    /// Repaint the canvas and update the scoreboard text.
    Render { frame: Frame, scoreboard: String },
    /// Show the end-game modal with this message.
    ShowEndgame { message: &'static str },
    /// Hide the end-game modal and clear the username field.
    HideEndgame,
    /// Enable or disable the save-score button.
    SetSaveEnabled(bool),
    /// Replace the high-score panel contents.
    ShowHighScores(HighScoreBoard),
    /// Update the connection indicator.
    SetStatus(ConnectionStatus),
}

/// End-game modal text for the given winner. Anything but a player win
/// counts as a computer win.
pub fn endgame_message(winner: Option<Winner>) -> &'static str {
    match winner {
        Some(Winner::Player) => "You win! 🎉",
        _ => "Computer wins! 😢",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endgame_messages() {
        assert!(endgame_message(Some(Winner::Player)).contains("You win!"));
        assert!(endgame_message(Some(Winner::Computer)).contains("Computer wins!"));
        assert!(endgame_message(None).contains("Computer wins!"));
    }

    #[test]
    fn status_labels() {
        assert_eq!(ConnectionStatus::default(), ConnectionStatus::Idle);
        assert_eq!(ConnectionStatus::Connected.label(), "Connected");
        assert!(ConnectionStatus::Error("server returned HTTP 500".into())
            .label()
            .ends_with("HTTP 500"));
    }
}
