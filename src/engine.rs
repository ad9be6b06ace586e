//! Next-generation computation.

use crate::grid::Grid;
use crate::rules::Rules;

/// No cell's fate depends on more than "4 or more vs. fewer", so the
/// neighbour scan stops counting there.
const BAIL_THRESHOLD: i8 = 4;

/// Compute the next generation. Pure over the input grid; the returned grid
/// always has identical dimensions.
///
/// `wrap_edges` selects the edge policy: out-of-range neighbours are skipped
/// when false (the neighbourhood truncates at the border) and wrapped modulo
/// width/height when true (toroidal topology). With wrapping and a width or
/// height of 2 or less the modulo makes cells neighbour themselves or count
/// the same neighbour more than once; that falls out of the wrap arithmetic
/// and is not special-cased.
pub fn next_generation(grid: &Grid, wrap_edges: bool, rules: &mut Rules, generation: u64) -> Grid {
    let mut next = Grid::new(grid.width(), grid.height());
    for y in 0..grid.height() {
        for x in 0..grid.width() {
            let count = live_neighbours_bail(grid, x, y, wrap_edges, BAIL_THRESHOLD);
            let alive = if grid.get(x, y) {
                rules.survives(count)
            } else {
                rules.born(count, generation)
            };
            next.set(x, y, alive);
        }
    }
    next
}

/// Count live neighbours of `(x, y)`, bailing out at `bail`.
///
/// The counter starts at -1 for a live cell: the 3x3 scan below includes the
/// cell itself, so the discount cancels that one self-count.
fn live_neighbours_bail(grid: &Grid, x: usize, y: usize, wrap_edges: bool, bail: i8) -> u8 {
    let width = grid.width() as isize;
    let height = grid.height() as isize;
    let mut count: i8 = if grid.get(x, y) { -1 } else { 0 };

    for dy in -1..=1isize {
        let row = y as isize + dy;
        if !wrap_edges && (row < 0 || row >= height) {
            continue;
        }
        let row = row.rem_euclid(height) as usize;

        for dx in -1..=1isize {
            let col = x as isize + dx;
            if !wrap_edges && (col < 0 || col >= width) {
                continue;
            }
            let col = col.rem_euclid(width) as usize;

            if grid.get(col, row) {
                count += 1;
                if count == bail {
                    return bail as u8;
                }
            }
        }
    }

    debug_assert!(count >= 0);
    count as u8
}
