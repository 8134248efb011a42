//! Elements the hosting page provides around the board.

use gloo::events::EventListener;
use thiserror::Error;
use web_sys::{Document, Element, Event};

/// Marker class gating input on the board container and its cells.
pub const DISABLED_CLASS: &str = "disabled";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HostError {
    #[error("Could not find id=\"{0}\" element")]
    MissingElement(&'static str),
}

#[derive(Clone, Debug, PartialEq)]
pub struct HostPage {
    board: Element,
    move_counter: Element,
    reset_button: Element,
}

impl HostPage {
    pub const BOARD_ID: &'static str = "game-board";
    pub const MOVE_COUNTER_ID: &'static str = "move-counter";
    pub const RESET_BUTTON_ID: &'static str = "reset-button";

    pub fn bind() -> Result<Self, HostError> {
        Self::from_document(&gloo::utils::document())
    }

    pub fn from_document(document: &Document) -> Result<Self, HostError> {
        let find = |id: &'static str| {
            document
                .get_element_by_id(id)
                .ok_or(HostError::MissingElement(id))
        };

        Ok(Self {
            board: find(Self::BOARD_ID)?,
            move_counter: find(Self::MOVE_COUNTER_ID)?,
            reset_button: find(Self::RESET_BUTTON_ID)?,
        })
    }

    /// Container the cells are rendered into.
    pub fn board(&self) -> &Element {
        &self.board
    }

    pub fn set_interactive(&self, interactive: bool) {
        if let Err(err) = self
            .board
            .class_list()
            .toggle_with_force(DISABLED_CLASS, !interactive)
        {
            log::error!("failed to toggle board gate: {:?}", err);
        }
    }

    pub fn set_move_counter(&self, moves: u32) {
        self.move_counter.set_text_content(Some(&moves.to_string()));
    }

    pub fn set_reset_enabled(&self, enabled: bool) {
        let result = if enabled {
            self.reset_button.remove_attribute("disabled")
        } else {
            self.reset_button.set_attribute("disabled", "")
        };
        if let Err(err) = result {
            log::error!("failed to toggle reset button: {:?}", err);
        }
    }

    /// Listens for reset clicks until the returned listener is dropped.
    pub fn on_reset<F>(&self, callback: F) -> EventListener
    where
        F: FnMut(&Event) + 'static,
    {
        EventListener::new(&self.reset_button, "click", callback)
    }
}
