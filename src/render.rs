//! Renderer capability.

use crate::grid::Grid;

/// Consumes grid snapshots; implemented per output target (console, canvas,
/// test probe). The runner calls `initialise` exactly once before the first
/// `render`, and every grid handed to `render` has the dimensions given to
/// `initialise`.
pub trait Renderer {
    fn initialise(&mut self, width: usize, height: usize);
    fn render(&mut self, grid: &Grid);
}

/// Discards every frame. Useful for headless runs and tests.
#[derive(Default)]
pub struct NullRenderer {
    pub frames: usize,
}

impl Renderer for NullRenderer {
    fn initialise(&mut self, _width: usize, _height: usize) {}

    fn render(&mut self, _grid: &Grid) {
        self.frames += 1;
    }
}
