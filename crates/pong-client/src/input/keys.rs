use crate::api::types::Direction;

/// Map a `KeyboardEvent.key` value to a paddle direction.
/// Arrow keys and W/S (either case) are recognized; everything else is ignored.
pub fn direction_for_key(key: &str) -> Option<Direction> {
    match key {
        "ArrowUp" | "w" | "W" => Some(Direction::Up),
        "ArrowDown" | "s" | "S" => Some(Direction::Down),
        _ => None,
    }
}

/// Where a key event originated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyTarget {
    /// The page itself (canvas, body, buttons).
    Page,
    /// A text input such as the username field.
    TextField,
}

/// Which movement keys are currently held.
/// Key handlers write it; the input timer reads it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputTracker {
    up: bool,
    down: bool,
}

impl InputTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle a key press. Returns `true` if the key is a movement key.
    pub fn key_down(&mut self, key: &str) -> bool {
        self.set(key, true)
    }

    /// Handle a key press from `target`. Presses inside a text field are
    /// typing, not steering, and are ignored.
    pub fn key_down_from(&mut self, key: &str, target: KeyTarget) -> bool {
        match target {
            KeyTarget::Page => self.key_down(key),
            KeyTarget::TextField => false,
        }
    }

    /// Handle a key release. Returns `true` if the key is a movement key.
    pub fn key_up(&mut self, key: &str) -> bool {
        self.set(key, false)
    }

    fn set(&mut self, key: &str, held: bool) -> bool {
        match direction_for_key(key) {
            Some(Direction::Up) => self.up = held,
            Some(Direction::Down) => self.down = held,
            None => return false,
        }
        true
    }

    pub fn is_held(&self, direction: Direction) -> bool {
        match direction {
            Direction::Up => self.up,
            Direction::Down => self.down,
        }
    }

    /// Held directions in send order: up before down.
    pub fn held(&self) -> impl Iterator<Item = Direction> + '_ {
        [Direction::Up, Direction::Down]
            .into_iter()
            .filter(move |d| self.is_held(*d))
    }

    /// Release everything (e.g. when the window loses focus).
    pub fn clear(&mut self) {
        self.up = false;
        self.down = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arrow_and_letter_keys_map_to_directions() {
        for key in ["ArrowUp", "w", "W"] {
            assert_eq!(direction_for_key(key), Some(Direction::Up), "{}", key);
        }
        for key in ["ArrowDown", "s", "S"] {
            assert_eq!(direction_for_key(key), Some(Direction::Down), "{}", key);
        }
        assert_eq!(direction_for_key("a"), None);
        assert_eq!(direction_for_key(" "), None);
    }

    #[test]
    fn press_and_release() {
        let mut input = InputTracker::new();
        assert!(input.key_down("W"));
        assert!(input.is_held(Direction::Up));
        // Releasing the arrow releases the same direction.
        assert!(input.key_up("ArrowUp"));
        assert!(!input.is_held(Direction::Up));
        assert!(!input.key_down("Enter"));
        assert_eq!(input, InputTracker::default());
    }

    #[test]
    fn text_field_presses_are_ignored() {
        let mut input = InputTracker::new();
        assert!(!input.key_down_from("s", KeyTarget::TextField));
        assert!(!input.key_down_from("ArrowUp", KeyTarget::TextField));
        assert_eq!(input.held().count(), 0);
        assert!(input.key_down_from("s", KeyTarget::Page));
        assert!(input.is_held(Direction::Down));
    }

    #[test]
    fn both_held_yields_up_then_down() {
        let mut input = InputTracker::new();
        input.key_down("s");
        input.key_down("ArrowUp");
        let held: Vec<_> = input.held().collect();
        assert_eq!(held, vec![Direction::Up, Direction::Down]);
        input.clear();
        assert_eq!(input.held().count(), 0);
    }
}
