//! Seed persistence.
//!
//! On disk a seed is a depth-2 JSON boolean matrix, stored rotated a quarter
//! turn clockwise from the in-memory orientation. Encode rotates clockwise,
//! decode rotates counter-clockwise, so `decode(encode(g)) == g` for every
//! grid, including non-square ones (width and height swap across the
//! rotation boundary).

use std::fs;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use tracing::{debug, info};

use crate::error::{Result, SeedError};
use crate::grid::Grid;

pub const SEED_EXTENSION: &str = "seed";

/// Serialize a grid to its on-disk form.
pub fn encode(grid: &Grid) -> String {
    let rotated = rotate_clockwise(grid);
    serde_json::to_string(&rotated).expect("Vec<Vec<bool>> serialization cannot fail")
}

/// Parse a seed from its on-disk form.
pub fn decode(text: &str) -> Result<Grid> {
    let rows: Vec<Vec<bool>> = serde_json::from_str(text)?;
    validate(&rows)?;
    Ok(rotate_counter_clockwise(&rows))
}

/// Parse a seed and reject it unless it has exactly the expected in-memory
/// dimensions. Never crops or pads.
pub fn decode_expecting(text: &str, width: usize, height: usize) -> Result<Grid> {
    let grid = decode(text)?;
    if grid.width() != width || grid.height() != height {
        return Err(SeedError::DimensionMismatch {
            width: grid.width(),
            height: grid.height(),
            expected_width: width,
            expected_height: height,
        });
    }
    Ok(grid)
}

/// Read and decode a seed file.
pub fn load_seed(path: &Path) -> Result<Grid> {
    let text = fs::read_to_string(path)?;
    let grid = decode(&text)?;
    debug!(
        path = %path.display(),
        width = grid.width(),
        height = grid.height(),
        "loaded seed"
    );
    Ok(grid)
}

/// Encode a seed and write it to `dir` under a timestamp-derived filename.
/// Returns the path written.
pub fn save_seed(grid: &Grid, dir: &Path) -> Result<PathBuf> {
    let stamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or(0);
    let path = dir.join(format!("{stamp}.{SEED_EXTENSION}"));
    fs::write(&path, encode(grid))?;
    info!(path = %path.display(), "saved seed");
    Ok(path)
}

fn validate(rows: &[Vec<bool>]) -> Result<()> {
    if rows.is_empty() {
        return Err(SeedError::Empty);
    }
    let expected = rows[0].len();
    for (row, cells) in rows.iter().enumerate() {
        if cells.is_empty() {
            return Err(SeedError::EmptyRow { row });
        }
        if cells.len() != expected {
            return Err(SeedError::RaggedRow {
                row,
                len: cells.len(),
                expected,
            });
        }
    }
    Ok(())
}

/// Quarter turn clockwise: a `w x h` grid becomes `w` rows of `h` cells.
fn rotate_clockwise(grid: &Grid) -> Vec<Vec<bool>> {
    let width = grid.width();
    let height = grid.height();
    (0..width)
        .map(|row| (0..height).map(|col| grid.get(row, height - 1 - col)).collect())
        .collect()
}

/// Quarter turn counter-clockwise, the exact inverse of `rotate_clockwise`.
/// Caller has validated the matrix is non-empty and rectangular.
fn rotate_counter_clockwise(rows: &[Vec<bool>]) -> Grid {
    let width = rows.len();
    let height = rows[0].len();
    let mut grid = Grid::new(width, height);
    for y in 0..height {
        for x in 0..width {
            grid.set(x, y, rows[x][height - 1 - y]);
        }
    }
    grid
}

#[cfg(test)]
mod tests {
    use super::{decode, encode};
    use crate::grid::Grid;

    #[test]
    fn on_disk_form_is_rotated() {
        // 3x2 grid with only (0, 0) alive. Clockwise rotation carries the
        // top-left corner to the end of the first on-disk row.
        let mut grid = Grid::new(3, 2);
        grid.set(0, 0, true);
        assert_eq!(
            encode(&grid),
            "[[false,true],[false,false],[false,false]]"
        );
        assert_eq!(decode(&encode(&grid)).expect("round trip"), grid);
    }
}
