//! Grid planning.
//!
//! Drawing a dot per grid node is slow, so renderers paint a small tile
//! once and repeat it. The tile must be an exact number of pixels wide,
//! otherwise fractional zoom factors drift and the dots look uneven. The
//! plan picks the least multiple `l` of the grid step for which
//! `l * zoom` is an integer (within 0.01) and sizes the tile from it.

use tracing::{debug, warn};

use crate::map_coordinates::MapCoordinates;

/// Largest tile edge, in pixels, before falling back to dot-by-dot.
pub const MAX_TILE_SIZE: i32 = 500;

/// Device pitch above which a line grid is drawn.
pub const LINE_GRID_PITCH: f64 = 35.0;

/// Device pitch below which the step is coarsened.
pub const DENSE_GRID_PITCH: f64 = 3.0;

const COARSEN_FACTOR: i32 = 5;
const MULTIPLE_SEARCH_LIMIT: u32 = 105;
const MULTIPLE_TOLERANCE: f64 = 0.01;

/// A repeatable dot tile.
#[derive(Debug, Clone, PartialEq)]
pub struct GridTile {
    pub width: i32,
    pub height: i32,
    /// Row-major, `true` where a dot is painted.
    pub mask: Vec<bool>,
}

impl GridTile {
    pub fn is_dot(&self, x: i32, y: i32) -> bool {
        if x < 0 || y < 0 || x >= self.width || y >= self.height {
            return false;
        }
        self.mask
            .get((y * self.width + x) as usize)
            .copied()
            .unwrap_or(false)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum GridPattern {
    /// Pitch is large: draw full lines.
    Lines,
    /// Paint [`GridTile`] repeatedly.
    Tiled(GridTile),
    /// Paint each node individually.
    Dots,
}

/// How to draw the grid for one zoom level.
#[derive(Debug, Clone, PartialEq)]
pub struct GridPlan {
    /// Logical step in use, after any coarsening.
    pub step_x: i32,
    pub step_y: i32,
    /// Least multiple of the step mapping to whole pixels.
    pub multiple: u32,
    pub pattern: GridPattern,
}

/// Least `l` in `1..105` with `|l*z - round(l*z)| < 0.01`, or 1.
pub fn least_integer_multiple(zoom: f64) -> u32 {
    (1..MULTIPLE_SEARCH_LIMIT)
        .find(|l| {
            let v = f64::from(*l) * zoom;
            (v - v.round()).abs() < MULTIPLE_TOLERANCE
        })
        .unwrap_or(1)
}

impl GridPlan {
    /// Chooses line, tile or dot drawing for the current mapping.
    pub fn new(map: &MapCoordinates) -> Self {
        let mut step_x = map.x_grid_step();
        let mut step_y = map.y_grid_step();
        let multiple = least_integer_multiple(map.y_magnitude());

        let pitch_x = f64::from((map.map_x(step_x, 0) - map.map_x(0, 0)).abs());
        let pitch_y = f64::from((map.map_y(0, step_y) - map.map_y(0, 0)).abs());

        if pitch_x > LINE_GRID_PITCH || pitch_y > LINE_GRID_PITCH {
            return Self {
                step_x,
                step_y,
                multiple,
                pattern: GridPattern::Lines,
            };
        }
        if pitch_x < DENSE_GRID_PITCH || pitch_y < DENSE_GRID_PITCH {
            step_x *= COARSEN_FACTOR;
            step_y *= COARSEN_FACTOR;
        }

        let span_x = multiple as i32 * step_x;
        let span_y = multiple as i32 * step_y;
        let width = (map.map_x(span_x, 0) - map.map_x(0, 0)).abs().max(1);
        let height = (map.map_y(0, span_y) - map.map_y(0, 0)).abs().max(1);

        let pattern = if width > MAX_TILE_SIZE || height > MAX_TILE_SIZE {
            debug!("Grid tile {}x{} too large, drawing dots", width, height);
            GridPattern::Dots
        } else {
            match build_tile(map, width, height, step_x, step_y) {
                Some(tile) => GridPattern::Tiled(tile),
                None => GridPattern::Dots,
            }
        };

        Self {
            step_x,
            step_y,
            multiple,
            pattern,
        }
    }

    /// Device X positions of vertical grid lines across `[xmin, xmax]`.
    pub fn line_columns(&self, map: &MapCoordinates, xmin: i32, xmax: i32) -> Vec<i32> {
        logical_range(map.unmap_x_snap(xmin), map.unmap_x_snap(xmax), self.step_x)
            .map(|x| map.map_x(x, 0))
            .collect()
    }

    /// Device Y positions of horizontal grid lines across `[ymin, ymax]`.
    pub fn line_rows(&self, map: &MapCoordinates, ymin: i32, ymax: i32) -> Vec<i32> {
        logical_range(map.unmap_y_snap(ymin), map.unmap_y_snap(ymax), self.step_y)
            .map(|y| map.map_y(0, y))
            .collect()
    }

    /// Device positions of every grid node inside the given device box.
    pub fn dots(
        &self,
        map: &MapCoordinates,
        (xmin, ymin): (i32, i32),
        (xmax, ymax): (i32, i32),
    ) -> Vec<(i32, i32)> {
        let mut out = Vec::new();
        for x in logical_range(map.unmap_x_snap(xmin), map.unmap_x_snap(xmax), self.step_x) {
            for y in logical_range(map.unmap_y_snap(ymin), map.unmap_y_snap(ymax), self.step_y) {
                out.push((map.map_x(x, y), map.map_y(x, y)));
            }
        }
        out
    }
}

fn logical_range(from: i32, to: i32, step: i32) -> impl Iterator<Item = i32> {
    let step = step.max(1);
    std::iter::successors(Some(from), move |v| v.checked_add(step)).take_while(move |v| *v <= to)
}

fn build_tile(
    map: &MapCoordinates,
    width: i32,
    height: i32,
    step_x: i32,
    step_y: i32,
) -> Option<GridTile> {
    let len = (width as usize) * (height as usize);
    let mut mask: Vec<bool> = Vec::new();
    if let Err(e) = mask.try_reserve_exact(len) {
        warn!("Out of memory building {}x{} grid tile: {}", width, height, e);
        return None;
    }
    mask.resize(len, false);

    let mut tile = GridTile {
        width,
        height,
        mask,
    };
    let origin_x = map.map_x(0, 0);
    let origin_y = map.map_y(0, 0);
    for x in logical_range(0, map.unmap_x_nosnap(origin_x + width), step_x) {
        for y in logical_range(0, map.unmap_y_nosnap(origin_y + height), step_y) {
            let px = map.map_x(x, y) - origin_x;
            let py = map.map_y(x, y) - origin_y;
            if px >= 0 && py >= 0 && px < width && py < height {
                tile.mask[(py * width + px) as usize] = true;
            }
        }
    }
    Some(tile)
}
