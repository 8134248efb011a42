use crate::protocol::WireBoard;
use serde::{Deserialize, Serialize};

/// Glyphs the server uses for lit and unlit cells, opaque equality tokens.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Legend {
    pub on: char,
    pub off: char,
}

/// Client-side mirror of the authoritative server state.
///
/// Only written from server replies, never from user input. Dimensions are not checked here, see
/// [`Frame::project`](crate::Frame::project).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardModel {
    board: WireBoard,
    moves: u32,
    legend: Option<Legend>,
    loaded: bool,
}

impl BoardModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn board(&self) -> &WireBoard {
        &self.board
    }

    pub fn moves(&self) -> u32 {
        self.moves
    }

    pub fn legend(&self) -> Option<Legend> {
        self.legend
    }

    /// Whether any server reply has been applied yet.
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn glyph_at(&self, (row, col): crate::Coord2) -> Option<char> {
        self.board
            .get(usize::from(row))
            .and_then(|cells| cells.get(usize::from(col)))
            .copied()
    }

    /// Records the glyph legend, the first capture wins for the rest of the page session.
    pub fn capture_legend(&mut self, legend: Legend) -> bool {
        match self.legend {
            None => {
                log::debug!("glyph legend: on={:?} off={:?}", legend.on, legend.off);
                self.legend = Some(legend);
                true
            }
            Some(current) => {
                if current != legend {
                    log::warn!("ignoring new glyph legend {:?}, keeping {:?}", legend, current);
                }
                false
            }
        }
    }

    pub fn apply(&mut self, board: WireBoard, moves: u32) {
        self.board = board;
        self.moves = moves;
        self.loaded = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn legend_is_captured_once() {
        let mut model = BoardModel::new();
        assert!(model.capture_legend(Legend { on: 'X', off: 'O' }));
        assert!(!model.capture_legend(Legend { on: '#', off: '.' }));
        assert_eq!(model.legend(), Some(Legend { on: 'X', off: 'O' }));
    }

    #[test]
    fn apply_overwrites_in_place() {
        let mut model = BoardModel::new();
        assert!(!model.is_loaded());

        model.apply(vec![vec!['O', 'X']], 3);
        model.apply(vec![vec!['X', 'X']], 4);

        assert!(model.is_loaded());
        assert_eq!(model.moves(), 4);
        assert_eq!(model.glyph_at((0, 0)), Some('X'));
        assert_eq!(model.glyph_at((1, 0)), None);
    }
}
