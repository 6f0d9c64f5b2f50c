use glam::Vec2;

use crate::api::types::GameState;

/// Logical canvas size in game units.
pub const CANVAS_WIDTH: f32 = 800.0;
pub const CANVAS_HEIGHT: f32 = 600.0;

pub const PADDLE_WIDTH: f32 = 16.0;
pub const PADDLE_HEIGHT: f32 = 100.0;
pub const BALL_SIZE: f32 = 16.0;
/// Dash and gap length of the center line.
pub const CENTER_DASH: f32 = 16.0;

pub const PADDLE_COLOR: &str = "#f1f1f1";
pub const BALL_COLOR: &str = "#ffb300";
pub const CENTER_LINE_COLOR: &str = "#444";

/// A single 2D drawing primitive, in canvas units.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Clear a rectangle to transparent.
    Clear { origin: Vec2, size: Vec2 },
    /// Fill an axis-aligned rectangle.
    FillRect {
        origin: Vec2,
        size: Vec2,
        color: &'static str,
    },
    /// Stroke a dashed segment. `dash` is the `[on, off]` pattern.
    DashedLine {
        from: Vec2,
        to: Vec2,
        dash: [f32; 2],
        color: &'static str,
    },
}

/// Ordered draw commands for one redraw.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Frame {
    pub commands: Vec<DrawCommand>,
}

impl Frame {
    pub fn new() -> Self {
        Self {
            commands: Vec::with_capacity(5),
        }
    }

    pub fn push(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

/// Build the frame for a state snapshot: clear, both paddles, ball, center line.
///
/// Values are drawn exactly where the server puts them; nothing is clamped.
pub fn build_frame(state: &GameState) -> Frame {
    let paddle = Vec2::new(PADDLE_WIDTH, PADDLE_HEIGHT);
    let mut frame = Frame::new();

    frame.push(DrawCommand::Clear {
        origin: Vec2::ZERO,
        size: Vec2::new(CANVAS_WIDTH, CANVAS_HEIGHT),
    });
    frame.push(DrawCommand::FillRect {
        origin: Vec2::new(0.0, state.player_y),
        size: paddle,
        color: PADDLE_COLOR,
    });
    frame.push(DrawCommand::FillRect {
        origin: Vec2::new(CANVAS_WIDTH - PADDLE_WIDTH, state.computer_y),
        size: paddle,
        color: PADDLE_COLOR,
    });
    frame.push(DrawCommand::FillRect {
        origin: Vec2::new(state.ball_x, state.ball_y),
        size: Vec2::splat(BALL_SIZE),
        color: BALL_COLOR,
    });
    frame.push(DrawCommand::DashedLine {
        from: Vec2::new(CANVAS_WIDTH / 2.0, 0.0),
        to: Vec2::new(CANVAS_WIDTH / 2.0, CANVAS_HEIGHT),
        dash: [CENTER_DASH, CENTER_DASH],
        color: CENTER_LINE_COLOR,
    });

    frame
}

/// Scoreboard line shown above the canvas.
pub fn scoreboard_text(state: &GameState) -> String {
    format!(
        "Player: {}  |  Computer: {}",
        state.player_score, state.computer_score
    )
}
