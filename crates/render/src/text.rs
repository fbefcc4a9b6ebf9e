//! Terminal backend used by `human` render mode.

use glam::Vec2;

use crate::scene::{Scene, Shape};

/// Fixed-size character grid a [`Scene`] is sampled onto.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TextCanvas {
    pub cols: usize,
    pub rows: usize,
}

impl Default for TextCanvas {
    fn default() -> Self {
        Self { cols: 60, rows: 20 }
    }
}

impl TextCanvas {
    #[must_use]
    pub const fn new(cols: usize, rows: usize) -> Self {
        Self { cols, rows }
    }

    /// Sample the scene at each cell centre. Uncovered cells are blank and
    /// trailing blanks are kept so every line has `cols` characters.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn draw(&self, scene: &Scene) -> String {
        let cell_w = scene.width / self.cols as f32;
        let cell_h = scene.height / self.rows as f32;
        let mut out = String::with_capacity((self.cols + 1) * self.rows);
        for row in (0..self.rows).rev() {
            for col in 0..self.cols {
                let p = Vec2::new(
                    (col as f32 + 0.5) * cell_w,
                    (row as f32 + 0.5) * cell_h,
                );
                out.push(scene.shape_at(p).map_or(' ', Shape::glyph));
            }
            out.push('\n');
        }
        out
    }
}
