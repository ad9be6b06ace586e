//! Fixed-size boolean board.

use rand::Rng;

/// A `width x height` boolean matrix addressed as `(x, y)` with `x`
/// fast-varying. Every cell is materialised; there is no sparse form.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<bool>,
}

impl Grid {
    /// Create an all-dead grid.
    ///
    /// # Panics
    /// Panics if `width` or `height` is zero.
    pub fn new(width: usize, height: usize) -> Self {
        assert!(width >= 1 && height >= 1, "grid dimensions must be >= 1");
        Self {
            width,
            height,
            cells: vec![false; width * height],
        }
    }

    /// Create a grid with each cell alive with probability 0.5.
    pub fn random<R: Rng>(width: usize, height: usize, rng: &mut R) -> Self {
        Self::random_with_density(width, height, 0.5, rng)
    }

    /// Create a grid with each cell alive with the given probability.
    pub fn random_with_density<R: Rng>(
        width: usize,
        height: usize,
        density: f64,
        rng: &mut R,
    ) -> Self {
        let mut grid = Self::new(width, height);
        for cell in grid.cells.iter_mut() {
            *cell = rng.random_bool(density);
        }
        grid
    }

    /// Build a grid from row-major rows. Rows must be non-empty and uniform.
    ///
    /// # Panics
    /// Panics on empty or ragged input; callers holding untrusted data go
    /// through the seed codec, which validates first.
    pub fn from_rows(rows: &[Vec<bool>]) -> Self {
        assert!(!rows.is_empty(), "grid needs at least one row");
        let width = rows[0].len();
        assert!(width >= 1, "grid needs at least one column");
        let mut grid = Self::new(width, rows.len());
        for (y, row) in rows.iter().enumerate() {
            assert_eq!(row.len(), width, "ragged row {y}");
            for (x, &alive) in row.iter().enumerate() {
                grid.set(x, y, alive);
            }
        }
        grid
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> bool {
        assert!(x < self.width && y < self.height, "cell ({x},{y}) out of range");
        self.cells[y * self.width + x]
    }

    #[inline]
    pub fn set(&mut self, x: usize, y: usize, alive: bool) {
        assert!(x < self.width && y < self.height, "cell ({x},{y}) out of range");
        self.cells[y * self.width + x] = alive;
    }

    /// Number of live cells.
    pub fn population(&self) -> usize {
        self.cells.iter().filter(|&&c| c).count()
    }

    pub fn is_empty(&self) -> bool {
        !self.cells.iter().any(|&c| c)
    }
}

#[cfg(test)]
mod tests {
    use super::Grid;
    use rand::SeedableRng;

    #[test]
    fn set_and_get_round_trip() {
        let mut grid = Grid::new(4, 3);
        grid.set(3, 2, true);
        assert!(grid.get(3, 2));
        grid.set(3, 2, false);
        assert!(!grid.get(3, 2));
    }

    #[test]
    #[should_panic]
    fn zero_width_rejected() {
        let _ = Grid::new(0, 5);
    }

    #[test]
    #[should_panic]
    fn out_of_range_get_panics() {
        let grid = Grid::new(4, 3);
        let _ = grid.get(4, 0);
    }

    #[test]
    fn random_is_deterministic_per_seed() {
        let mut a = rand::rngs::StdRng::seed_from_u64(7);
        let mut b = rand::rngs::StdRng::seed_from_u64(7);
        assert_eq!(Grid::random(16, 16, &mut a), Grid::random(16, 16, &mut b));
    }

    #[test]
    fn from_rows_preserves_orientation() {
        let grid = Grid::from_rows(&[vec![true, false, false], vec![false, false, true]]);
        assert_eq!(grid.width(), 3);
        assert_eq!(grid.height(), 2);
        assert!(grid.get(0, 0));
        assert!(grid.get(2, 1));
        assert_eq!(grid.population(), 2);
    }
}
