/// Single coordinate axis used for board rows, columns, and positions.
pub type Coord = u16;

/// Linear tile index, the canonical identity of a cell. Row/column pairs
/// are a derived view, never stored state.
pub type Tile = usize;

pub const fn mult(a: Coord, b: Coord) -> usize {
    a as usize * b as usize
}
