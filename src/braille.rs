use crate::grid::Grid;

/// Braille character rendering for dense terminal grids.
/// Each Braille character represents a 2x4 block of cells (8 dots total).
///
/// Dot positions and their bit values:
/// ```text
/// (0,0)=0x01  (1,0)=0x08
/// (0,1)=0x02  (1,1)=0x10
/// (0,2)=0x04  (1,2)=0x20
/// (0,3)=0x40  (1,3)=0x80
/// ```
///
/// Unicode Braille patterns: U+2800 to U+28FF (256 patterns)
const BRAILLE_BASE: u32 = 0x2800;

/// Dot position to bit mapping for Braille characters
const BRAILLE_DOTS: [[u8; 4]; 2] = [
    [0x01, 0x02, 0x04, 0x40], // Left column (x=0): rows 0,1,2,3
    [0x08, 0x10, 0x20, 0x80], // Right column (x=1): rows 0,1,2,3
];

/// A single rendered Braille character at a canvas position
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BrailleCell {
    pub x: u16,
    pub y: u16,
    pub char: char,
    /// This character covers the cursor cell
    pub has_cursor: bool,
}

/// Canvas size in characters needed to show the whole grid
pub fn canvas_size(grid: &Grid) -> (u16, u16) {
    (grid.cols().div_ceil(2) as u16, grid.rows().div_ceil(4) as u16)
}

/// Map each live cell to one dot. Only characters with at least one dot,
/// or holding the cursor, are returned.
pub fn render_to_braille(grid: &Grid, cursor: Option<(usize, usize)>) -> Vec<BrailleCell> {
    let (width, height) = canvas_size(grid);
    let width = width as usize;
    let mut patterns = vec![0u8; width * height as usize];

    for (row, col) in grid.live_cells() {
        patterns[(row / 4) * width + col / 2] |= BRAILLE_DOTS[col % 2][row % 4];
    }

    let cursor_index = cursor.map(|(row, col)| (row / 4) * width + col / 2);

    patterns
        .iter()
        .enumerate()
        .filter(|&(i, &pattern)| pattern != 0 || cursor_index == Some(i))
        .map(|(i, &pattern)| BrailleCell {
            x: (i % width) as u16,
            y: (i / width) as u16,
            char: char::from_u32(BRAILLE_BASE + pattern as u32).unwrap_or(' '),
            has_cursor: cursor_index == Some(i),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Cell;

    #[test]
    fn test_braille_pattern() {
        // Test that single dot patterns work correctly
        assert_eq!(BRAILLE_DOTS[0][0], 0x01); // Top-left
        assert_eq!(BRAILLE_DOTS[1][0], 0x08); // Top-right
        assert_eq!(BRAILLE_DOTS[0][3], 0x40); // Bottom-left
        assert_eq!(BRAILLE_DOTS[1][3], 0x80); // Bottom-right

        // All dots should give 0xFF
        let all_dots: u8 = BRAILLE_DOTS[0].iter().sum::<u8>() + BRAILLE_DOTS[1].iter().sum::<u8>();
        assert_eq!(all_dots, 0xFF);
    }

    #[test]
    fn test_canvas_size_rounds_up() {
        let grid = Grid::empty(5, 7).unwrap();
        assert_eq!(canvas_size(&grid), (4, 2));
    }

    #[test]
    fn test_full_block_is_all_dots() {
        let grid = Grid::from_fn(4, 2, |_, _| Cell::Alive).unwrap();
        let cells = render_to_braille(&grid, None);
        assert_eq!(cells.len(), 1);
        assert_eq!(cells[0].char, '\u{28FF}');
    }

    #[test]
    fn test_dot_positions() {
        let mut grid = Grid::empty(8, 4).unwrap();
        // Row 5, col 3 -> character (1, 1), right column, dot row 1
        grid.set(5, 3, Cell::Alive).unwrap();
        let cells = render_to_braille(&grid, None);
        assert_eq!(
            cells,
            vec![BrailleCell {
                x: 1,
                y: 1,
                char: char::from_u32(BRAILLE_BASE + 0x10).unwrap(),
                has_cursor: false,
            }]
        );
    }

    #[test]
    fn test_cursor_cell_emitted_when_empty() {
        let grid = Grid::empty(8, 8).unwrap();
        let cells = render_to_braille(&grid, Some((6, 5)));
        assert_eq!(cells.len(), 1);
        assert_eq!((cells[0].x, cells[0].y), (2, 1));
        assert!(cells[0].has_cursor);
        assert_eq!(cells[0].char, '\u{2800}');
    }
}
