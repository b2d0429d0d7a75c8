//! Cursor movement for keyboard navigation.

use crossterm::event::KeyCode;

/// Cards per grid row.
pub const GRID_COLUMNS: usize = 4;

/// Moves the cursor on a grid of `len` cards, `columns` wide.
///
/// Movement stops at the edges; keys other than arrows leave it in place.
pub fn move_cursor(cursor: usize, key: KeyCode, columns: usize, len: usize) -> usize {
    if len == 0 || columns == 0 {
        return 0;
    }
    let column = cursor % columns;

    let next = match key {
        KeyCode::Left if column > 0 => cursor - 1,
        KeyCode::Right if column + 1 < columns => cursor + 1,
        KeyCode::Up if cursor >= columns => cursor - columns,
        KeyCode::Down => cursor + columns,
        _ => cursor,
    };

    if next < len { next } else { cursor }
}
