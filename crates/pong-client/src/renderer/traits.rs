//! Drawing surface seam.
//!
//! The renderer produces [`Frame`]s as plain data. A concrete backend (the
//! browser's `CanvasRenderingContext2d` in `pong-web`) implements [`Surface`]
//! and replays them.

use glam::Vec2;

use super::frame::{DrawCommand, Frame};

/// A 2D target that can execute draw commands.
pub trait Surface {
    fn clear(&mut self, origin: Vec2, size: Vec2);

    fn fill_rect(&mut self, origin: Vec2, size: Vec2, color: &str);

    /// Stroke a dashed segment. The dash pattern must not leak into
    /// subsequent strokes.
    fn dashed_line(&mut self, from: Vec2, to: Vec2, dash: [f32; 2], color: &str);
}

impl Frame {
    /// Issue every command, in order, to the surface.
    pub fn replay<S: Surface + ?Sized>(&self, surface: &mut S) {
        for command in &self.commands {
            match command {
                DrawCommand::Clear { origin, size } => surface.clear(*origin, *size),
                DrawCommand::FillRect { origin, size, color } => {
                    surface.fill_rect(*origin, *size, color)
                }
                DrawCommand::DashedLine { from, to, dash, color } => {
                    surface.dashed_line(*from, *to, *dash, color)
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::GameState;
    use crate::renderer::frame::build_frame;

    #[derive(Default)]
    struct Recorder {
        calls: Vec<String>,
    }

    impl Surface for Recorder {
        fn clear(&mut self, origin: Vec2, size: Vec2) {
            self.calls.push(format!("clear {} {} {} {}", origin.x, origin.y, size.x, size.y));
        }

        fn fill_rect(&mut self, origin: Vec2, size: Vec2, color: &str) {
            self.calls
                .push(format!("fill {} {} {} {} {}", origin.x, origin.y, size.x, size.y, color));
        }

        fn dashed_line(&mut self, from: Vec2, to: Vec2, dash: [f32; 2], color: &str) {
            self.calls.push(format!(
                "dash {} {} {} {} [{},{}] {}",
                from.x, from.y, to.x, to.y, dash[0], dash[1], color
            ));
        }
    }

    #[test]
    fn replay_issues_commands_in_order() {
        let state = GameState {
            player_y: 250.0,
            computer_y: 100.0,
            ball_x: 400.0,
            ball_y: 300.0,
            ..GameState::default()
        };
        let mut rec = Recorder::default();
        build_frame(&state).replay(&mut rec);
        assert_eq!(
            rec.calls,
            vec![
                "clear 0 0 800 600",
                "fill 0 250 16 100 #f1f1f1",
                "fill 784 100 16 100 #f1f1f1",
                "fill 400 300 16 16 #ffb300",
                "dash 400 0 400 600 [16,16] #444",
            ]
        );
    }
}
