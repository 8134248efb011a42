use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Light {
    On,
    #[default]
    Off,
}

impl Light {
    pub const fn is_on(self) -> bool {
        matches!(self, Self::On)
    }

    /// CSS class carried by a cell in this state.
    pub const fn class(self) -> &'static str {
        match self {
            Self::On => "light-on",
            Self::Off => "light-off",
        }
    }
}

/// Drawable projection of a [`BoardModel`] onto the fixed grid.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    lights: Array2<Light>,
}

impl Frame {
    /// Classifies every cell of `size` against the captured `on` glyph.
    ///
    /// Without a legend nothing can match, so every cell is off.
    pub fn project(model: &BoardModel, size: Coord2) -> core::result::Result<Self, RenderError> {
        if model.board().is_empty() {
            return Err(RenderError::EmptyBoard);
        }

        let on_glyph = model.legend().map(|legend| legend.on);
        let mut lights = Array2::default(size.to_nd_index());
        for coords in iter_coords(size) {
            let glyph = model.glyph_at(coords).ok_or(RenderError::ShapeMismatch)?;
            if Some(glyph) == on_glyph {
                lights[coords.to_nd_index()] = Light::On;
            }
        }

        Ok(Self { lights })
    }

    pub fn size(&self) -> Coord2 {
        let (rows, cols) = self.lights.dim();
        (
            rows.try_into().unwrap_or(Coord::MAX),
            cols.try_into().unwrap_or(Coord::MAX),
        )
    }

    pub fn light_at(&self, coords: Coord2) -> Light {
        self.lights[coords.to_nd_index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = (Coord2, Light)> + '_ {
        iter_coords(self.size()).map(|coords| (coords, self.light_at(coords)))
    }

    pub fn lit_count(&self) -> usize {
        self.lights.iter().filter(|light| light.is_on()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use alloc::vec::Vec;

    fn model_with(board: Vec<Vec<char>>) -> BoardModel {
        let mut model = BoardModel::new();
        model.capture_legend(Legend { on: 'X', off: 'O' });
        model.apply(board, 0);
        model
    }

    #[test]
    fn every_cell_gets_exactly_one_light_class() {
        let mut board = vec![vec!['O'; 5]; 5];
        board[1][3] = 'X';
        let frame = Frame::project(&model_with(board), GRID_SIZE).unwrap();

        assert_eq!(frame.iter().count(), 25);
        for (coords, light) in frame.iter() {
            let expected = if coords == (1, 3) { "light-on" } else { "light-off" };
            assert_eq!(light.class(), expected);
        }
    }

    #[test]
    fn empty_board_is_refused() {
        assert_eq!(
            Frame::project(&model_with(Vec::new()), GRID_SIZE),
            Err(RenderError::EmptyBoard)
        );
        assert_eq!(
            Frame::project(&BoardModel::new(), GRID_SIZE),
            Err(RenderError::EmptyBoard)
        );
    }

    #[test]
    fn short_board_is_refused() {
        let board = vec![vec!['O'; 5]; 4];
        assert_eq!(
            Frame::project(&model_with(board), GRID_SIZE),
            Err(RenderError::ShapeMismatch)
        );

        let mut ragged = vec![vec!['O'; 5]; 5];
        ragged[2].pop();
        assert_eq!(
            Frame::project(&model_with(ragged), GRID_SIZE),
            Err(RenderError::ShapeMismatch)
        );
    }

    #[test]
    fn larger_board_is_cropped_to_grid() {
        let board = vec![vec!['X'; 6]; 6];
        let frame = Frame::project(&model_with(board), GRID_SIZE).unwrap();
        assert_eq!(frame.size(), GRID_SIZE);
        assert_eq!(frame.lit_count(), 25);
    }

    #[test]
    fn unknown_glyph_renders_off() {
        let frame = Frame::project(&model_with(vec![vec!['?']]), (1, 1)).unwrap();
        assert_eq!(frame.light_at((0, 0)), Light::Off);
    }

    #[test]
    fn missing_legend_renders_all_off() {
        let mut model = BoardModel::new();
        model.apply(vec![vec!['X', 'O']], 0);
        let frame = Frame::project(&model, (1, 2)).unwrap();
        assert_eq!(frame.lit_count(), 0);
    }
}
