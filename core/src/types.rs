use crate::{GameError, Result};

/// Single coordinate axis used for grid height, width, and positions.
pub type Coord = u8;

/// Two-dimensional coordinates `(row, col)`.
pub type Coord2 = (Coord, Coord);

pub const GRID_ROWS: Coord = 5;
pub const GRID_COLS: Coord = 5;

/// Grid dimensions the client renders, must match the server's board.
pub const GRID_SIZE: Coord2 = (GRID_ROWS, GRID_COLS);

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for Coord2 {
    type Output = [usize; 2];

    fn to_nd_index(self) -> Self::Output {
        [self.0.into(), self.1.into()]
    }
}

pub fn validate_coords(coords: Coord2, size: Coord2) -> Result<Coord2> {
    if coords.0 < size.0 && coords.1 < size.1 {
        Ok(coords)
    } else {
        Err(GameError::InvalidCoords)
    }
}

/// Iterates every position of a grid in row-major order.
pub fn iter_coords((rows, cols): Coord2) -> impl Iterator<Item = Coord2> {
    (0..rows).flat_map(move |row| (0..cols).map(move |col| (row, col)))
}
