//! DOM contract with the host page.
//!
//! Element IDs are fixed; `connection-status` is optional.

use pong_client::{HighScoreBoard, UiEffect};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, HtmlButtonElement, HtmlCanvasElement, HtmlInputElement};

use crate::canvas::CanvasSurface;

pub const CANVAS_ID: &str = "pong-canvas";
pub const SCOREBOARD_ID: &str = "scoreboard";
pub const ENDGAME_MODAL_ID: &str = "endgame-modal";
pub const ENDGAME_MESSAGE_ID: &str = "endgame-message";
pub const USERNAME_ID: &str = "username";
pub const SAVE_SCORE_BTN_ID: &str = "save-score-btn";
pub const PLAY_AGAIN_BTN_ID: &str = "play-again-btn";
pub const HIGHSCORES_ID: &str = "highscores";
pub const STATUS_ID: &str = "connection-status";

/// CSS class toggled on the end-game modal.
const HIDDEN_CLASS: &str = "hidden";
/// Canvas attribute that overrides the API base URL.
const API_URL_ATTR: &str = "data-api-url";

/// Handles to every element the client reads or writes.
pub struct Page {
    document: Document,
    pub canvas: HtmlCanvasElement,
    surface: CanvasSurface,
    scoreboard: Element,
    modal: Element,
    message: Element,
    pub username: HtmlInputElement,
    pub save_button: HtmlButtonElement,
    pub play_again_button: Element,
    highscores: Element,
    status: Option<Element>,
}

impl Page {
    /// Look up all elements. Fails if a required one is missing or has the wrong type.
    pub fn locate(document: &Document) -> Result<Self, JsValue> {
        let canvas: HtmlCanvasElement = typed(document, CANVAS_ID)?;
        let surface = CanvasSurface::from_canvas(&canvas)?;
        Ok(Self {
            document: document.clone(),
            surface,
            canvas,
            scoreboard: required(document, SCOREBOARD_ID)?,
            modal: required(document, ENDGAME_MODAL_ID)?,
            message: required(document, ENDGAME_MESSAGE_ID)?,
            username: typed(document, USERNAME_ID)?,
            save_button: typed(document, SAVE_SCORE_BTN_ID)?,
            play_again_button: required(document, PLAY_AGAIN_BTN_ID)?,
            highscores: required(document, HIGHSCORES_ID)?,
            status: document.get_element_by_id(STATUS_ID),
        })
    }

    /// API base URL from the canvas's `data-api-url` attribute, if set.
    pub fn api_url_override(&self) -> Option<String> {
        self.canvas
            .get_attribute(API_URL_ATTR)
            .filter(|url| !url.trim().is_empty())
    }

    pub fn username_value(&self) -> String {
        self.username.value()
    }

    pub fn apply(&mut self, effect: UiEffect) -> Result<(), JsValue> {
        match effect {
            UiEffect::Render { frame, scoreboard } => {
                frame.replay(&mut self.surface);
                self.scoreboard.set_text_content(Some(&scoreboard));
            }
            UiEffect::ShowEndgame { message } => {
                self.modal.class_list().remove_1(HIDDEN_CLASS)?;
                self.message.set_text_content(Some(message));
            }
            UiEffect::HideEndgame => {
                self.modal.class_list().add_1(HIDDEN_CLASS)?;
                self.username.set_value("");
            }
            UiEffect::SetSaveEnabled(enabled) => self.save_button.set_disabled(!enabled),
            UiEffect::ShowHighScores(board) => self.render_high_scores(&board)?,
            UiEffect::SetStatus(status) => {
                if let Some(el) = &self.status {
                    el.set_text_content(Some(&status.label()));
                }
            }
        }
        Ok(())
    }

    /// Replace the panel with a heading and an ordered list. Entries go in as
    /// text, so usernames are never interpreted as markup.
    fn render_high_scores(&self, board: &HighScoreBoard) -> Result<(), JsValue> {
        self.highscores.set_text_content(None);

        let heading = self.document.create_element("h3")?;
        heading.set_text_content(Some(board.heading));
        self.highscores.append_child(&heading)?;

        let list = self.document.create_element("ol")?;
        for line in &board.lines {
            let item = self.document.create_element("li")?;
            item.set_text_content(Some(line));
            list.append_child(&item)?;
        }
        self.highscores.append_child(&list)?;
        Ok(())
    }
}

fn required(document: &Document, id: &str) -> Result<Element, JsValue> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| JsValue::from_str(&format!("missing element #{}", id)))
}

fn typed<T: JsCast>(document: &Document, id: &str) -> Result<T, JsValue> {
    required(document, id)?
        .dyn_into::<T>()
        .map_err(|_| JsValue::from_str(&format!("element #{} has the wrong type", id)))
}
