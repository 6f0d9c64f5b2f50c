pub mod frame;
pub mod traits;

pub use frame::{build_frame, scoreboard_text, DrawCommand, Frame};
pub use traits::Surface;
