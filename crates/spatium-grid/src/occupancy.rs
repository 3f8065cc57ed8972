//! A 2D occupancy map with line rasterization and exploration scoring.

use serde::{Deserialize, Serialize};
use spatium_math::Vector2;
use thiserror::Error;

/// State of a single occupancy cell.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellState {
    /// Known to be traversable.
    Free,
    /// Known to contain an obstacle.
    Occupied,
    /// Never observed.
    #[default]
    Unknown,
}

impl CellState {
    /// The single-byte export value of this state.
    pub const fn raw_value(self) -> u8 {
        match self {
            CellState::Free => 0,
            CellState::Unknown => 100,
            CellState::Occupied => 255,
        }
    }

    /// The RGB export triplet of this state.
    pub const fn rgb(self) -> [u8; 3] {
        match self {
            CellState::Free => [255, 255, 255],
            CellState::Unknown => [128, 128, 128],
            CellState::Occupied => [0, 0, 0],
        }
    }
}

/// Errors raised when constructing an [`OccupancyGrid`].
#[derive(Debug, Error, PartialEq)]
pub enum OccupancyGridError {
    /// The resolution was zero, negative or not finite.
    #[error("grid resolution must be positive and finite, got {0}")]
    InvalidResolution(f64),
    /// Width or height was zero.
    #[error("grid dimensions must be non-zero, got {width}x{height}")]
    EmptyDimensions {
        /// Requested width in cells.
        width: usize,
        /// Requested height in cells.
        height: usize,
    },
}

/// A fixed-size 2D grid of occupancy cells.
///
/// Cells are addressed by integer grid coordinates with `(0, 0)` at the
/// corner whose world position is the grid origin; storage is row-major
/// (`y * width + x`). World coordinates map to the nearest cell center.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OccupancyGrid {
    resolution: f64,
    width: usize,
    height: usize,
    origin: Vector2,
    cells: Vec<CellState>,
}

impl OccupancyGrid {
    /// An all-unknown grid.
    ///
    /// `resolution` is in meters per cell; `origin` is the world
    /// position of the corner of cell `(0, 0)`.
    pub fn new(
        resolution: f64,
        width: usize,
        height: usize,
        origin: Vector2,
    ) -> Result<Self, OccupancyGridError> {
        if !resolution.is_finite() || resolution <= 0.0 {
            return Err(OccupancyGridError::InvalidResolution(resolution));
        }
        if width == 0 || height == 0 {
            return Err(OccupancyGridError::EmptyDimensions { width, height });
        }
        Ok(Self {
            resolution,
            width,
            height,
            origin,
            cells: vec![CellState::Unknown; width * height],
        })
    }

    /// Resolution in meters per cell.
    pub const fn resolution(&self) -> f64 {
        self.resolution
    }

    /// Width in cells.
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Height in cells.
    pub const fn height(&self) -> usize {
        self.height
    }

    /// World position of the corner of cell `(0, 0)`.
    pub const fn origin(&self) -> Vector2 {
        self.origin
    }

    /// True when the grid coordinate addresses a cell.
    pub fn is_valid_grid_coordinate(&self, x: i32, y: i32) -> bool {
        x >= 0 && (x as usize) < self.width && y >= 0 && (y as usize) < self.height
    }

    /// Grid cell containing a world position, or None when the position
    /// falls outside the grid.
    pub fn world_to_grid(&self, world_x: f64, world_y: f64) -> Option<(usize, usize)> {
        let gx = ((world_x - self.origin.x) / self.resolution).round() as i64;
        let gy = ((world_y - self.origin.y) / self.resolution).round() as i64;
        if gx >= 0 && (gx as usize) < self.width && gy >= 0 && (gy as usize) < self.height {
            Some((gx as usize, gy as usize))
        } else {
            None
        }
    }

    /// World position of the center of a grid cell.
    pub fn grid_to_world(&self, grid_x: usize, grid_y: usize) -> Vector2 {
        Vector2::new(
            grid_x as f64 * self.resolution + self.origin.x + self.resolution / 2.0,
            grid_y as f64 * self.resolution + self.origin.y + self.resolution / 2.0,
        )
    }

    /// The state of a cell; out-of-range coordinates read as Unknown.
    pub fn cell_state(&self, x: i32, y: i32) -> CellState {
        if self.is_valid_grid_coordinate(x, y) {
            self.cells[y as usize * self.width + x as usize]
        } else {
            CellState::Unknown
        }
    }

    /// Set the state of a cell; out-of-range coordinates are ignored.
    pub fn set_cell_state(&mut self, x: i32, y: i32, state: CellState) {
        if self.is_valid_grid_coordinate(x, y) {
            self.cells[y as usize * self.width + x as usize] = state;
        }
    }

    /// Rasterize a line of cells between two grid coordinates.
    ///
    /// Integer Bresenham; both endpoints are included and out-of-range
    /// cells are skipped. Occupied cells are never overwritten by a
    /// weaker state, so marking a free ray through a wall keeps the
    /// wall.
    pub fn mark_line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, state: CellState) {
        for (x, y) in line_cells(x0, y0, x1, y1) {
            if state != CellState::Occupied && self.cell_state(x, y) == CellState::Occupied {
                continue;
            }
            self.set_cell_state(x, y, state);
        }
    }

    /// Mark the cell containing a world position as Occupied. Returns
    /// false when the position is outside the grid.
    pub fn mark_occupied(&mut self, world_x: f64, world_y: f64) -> bool {
        match self.world_to_grid(world_x, world_y) {
            Some((gx, gy)) => {
                self.set_cell_state(gx as i32, gy as i32, CellState::Occupied);
                true
            }
            None => false,
        }
    }

    /// Mark the cells along a world-coordinate segment as Free. Returns
    /// false when either endpoint is outside the grid.
    pub fn mark_free(&mut self, x0: f64, y0: f64, x1: f64, y1: f64) -> bool {
        match (self.world_to_grid(x0, y0), self.world_to_grid(x1, y1)) {
            (Some((gx0, gy0)), Some((gx1, gy1))) => {
                self.mark_line(
                    gx0 as i32,
                    gy0 as i32,
                    gx1 as i32,
                    gy1 as i32,
                    CellState::Free,
                );
                true
            }
            _ => false,
        }
    }

    /// Information gain of a sensor ray between two grid coordinates.
    ///
    /// Counts the Unknown cells a ray would newly observe, walking the
    /// Bresenham line from start to end and stopping at the first
    /// Occupied cell. A ray whose target lies outside the grid is
    /// scored as if everything in its path were unexplored: every
    /// in-bounds cell it traverses counts.
    pub fn calculate_i_gain(&self, x0: i32, y0: i32, x1: i32, y1: i32) -> u32 {
        let mut gain = 0;
        if !self.is_valid_grid_coordinate(x1, y1) {
            for (x, y) in line_cells(x0, y0, x1, y1) {
                if self.is_valid_grid_coordinate(x, y) {
                    gain += 1;
                }
            }
            return gain;
        }
        for (x, y) in line_cells(x0, y0, x1, y1) {
            if !self.is_valid_grid_coordinate(x, y) {
                continue;
            }
            match self.cell_state(x, y) {
                CellState::Occupied => break,
                CellState::Unknown => gain += 1,
                CellState::Free => {}
            }
        }
        gain
    }

    /// Render the grid as packed RGB bytes, row-major, three bytes per
    /// cell: Free white, Unknown gray, Occupied black.
    pub fn to_rgb_image(&self) -> Vec<u8> {
        let mut pixels = Vec::with_capacity(self.cells.len() * 3);
        for cell in &self.cells {
            pixels.extend_from_slice(&cell.rgb());
        }
        pixels
    }

    /// Export the grid as one byte per cell, row-major: Free 0,
    /// Unknown 100, Occupied 255.
    pub fn raw_occupancy(&self) -> Vec<u8> {
        self.cells.iter().map(|c| c.raw_value()).collect()
    }
}

/// Grid cells visited by a Bresenham walk from `(x0, y0)` to
/// `(x1, y1)`, in traversal order starting at the first endpoint.
fn line_cells(x0: i32, y0: i32, x1: i32, y1: i32) -> Vec<(i32, i32)> {
    let steep = (y1 - y0).abs() > (x1 - x0).abs();
    let (x0, y0, x1, y1) = if steep { (y0, x0, y1, x1) } else { (x0, y0, x1, y1) };

    let dx = (x1 - x0).abs();
    let dy = (y1 - y0).abs();
    let x_step = if x0 < x1 { 1 } else { -1 };
    let y_step = if y0 < y1 { 1 } else { -1 };

    let mut cells = Vec::with_capacity(dx as usize + 1);
    let mut error = dx / 2;
    let mut x = x0;
    let mut y = y0;
    loop {
        cells.push(if steep { (y, x) } else { (x, y) });
        if x == x1 {
            break;
        }
        x += x_step;
        error -= dy;
        if error < 0 {
            y += y_step;
            error += dx;
        }
    }
    cells
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(resolution: f64, width: usize, height: usize) -> OccupancyGrid {
        OccupancyGrid::new(resolution, width, height, Vector2::ZERO).unwrap()
    }

    #[test]
    fn test_construction() {
        let g = OccupancyGrid::new(0.5, 10, 20, Vector2::new(-5.0, -10.0)).unwrap();
        assert_eq!(g.resolution(), 0.5);
        assert_eq!(g.width(), 10);
        assert_eq!(g.height(), 20);
        assert_eq!(g.origin(), Vector2::new(-5.0, -10.0));
        for y in 0..20 {
            for x in 0..10 {
                assert_eq!(g.cell_state(x, y), CellState::Unknown);
            }
        }
    }

    #[test]
    fn test_construction_errors() {
        assert_eq!(
            OccupancyGrid::new(0.0, 10, 10, Vector2::ZERO).unwrap_err(),
            OccupancyGridError::InvalidResolution(0.0)
        );
        assert!(OccupancyGrid::new(-1.0, 10, 10, Vector2::ZERO).is_err());
        assert_eq!(
            OccupancyGrid::new(1.0, 0, 10, Vector2::ZERO).unwrap_err(),
            OccupancyGridError::EmptyDimensions { width: 0, height: 10 }
        );
    }

    #[test]
    fn test_coordinate_conversions() {
        let g = OccupancyGrid::new(0.5, 10, 10, Vector2::new(1.0, 2.0)).unwrap();

        assert_eq!(g.world_to_grid(1.0, 2.0), Some((0, 0)));
        assert_eq!(g.world_to_grid(5.4, 6.4), Some((9, 9)));
        assert_eq!(g.world_to_grid(0.0, 0.0), None);

        assert_eq!(g.grid_to_world(0, 0), Vector2::new(1.25, 2.25));
        assert_eq!(g.grid_to_world(9, 9), Vector2::new(5.75, 6.75));
    }

    #[test]
    fn test_boundary_conditions() {
        let g = OccupancyGrid::new(0.1, 10, 10, Vector2::new(-0.5, -0.5)).unwrap();

        assert_eq!(g.world_to_grid(-0.5, -0.5), Some((0, 0)));
        assert_eq!(g.world_to_grid(0.4, 0.4), Some((9, 9)));
        assert_eq!(g.world_to_grid(-0.56, -0.5), None);
        assert_eq!(g.world_to_grid(0.45, 0.4), None);

        assert!(g.is_valid_grid_coordinate(0, 0));
        assert!(g.is_valid_grid_coordinate(9, 9));
        assert!(!g.is_valid_grid_coordinate(-1, 5));
        assert!(!g.is_valid_grid_coordinate(5, -1));
        assert!(!g.is_valid_grid_coordinate(10, 5));
        assert!(!g.is_valid_grid_coordinate(5, 10));
    }

    #[test]
    fn test_cell_state() {
        let mut g = grid(1.0, 5, 5);
        assert_eq!(g.cell_state(2, 2), CellState::Unknown);
        g.set_cell_state(2, 2, CellState::Occupied);
        assert_eq!(g.cell_state(2, 2), CellState::Occupied);
        g.set_cell_state(2, 2, CellState::Free);
        assert_eq!(g.cell_state(2, 2), CellState::Free);

        // out of range: writes ignored, reads come back Unknown
        g.set_cell_state(10, 10, CellState::Occupied);
        assert_eq!(g.cell_state(10, 10), CellState::Unknown);
    }

    #[test]
    fn test_mark_occupied_and_free() {
        let mut g = grid(0.1, 10, 10);

        assert!(g.mark_occupied(0.55, 0.55));
        let (gx, gy) = g.world_to_grid(0.55, 0.55).unwrap();
        assert_eq!(g.cell_state(gx as i32, gy as i32), CellState::Occupied);

        assert!(g.mark_free(0.1, 0.1, 0.8, 0.1));
        for x in 1..=8 {
            assert_eq!(g.cell_state(x, 1), CellState::Free);
        }

        assert!(!g.mark_occupied(5.0, 5.0));
        assert!(!g.mark_free(0.1, 0.1, 5.0, 5.0));
    }

    #[test]
    fn test_bresenham_diagonal() {
        let mut g = grid(1.0, 10, 10);
        g.mark_line(0, 0, 5, 5, CellState::Occupied);
        for i in 0..=5 {
            assert_eq!(g.cell_state(i, i), CellState::Occupied);
        }
        assert_eq!(g.cell_state(6, 6), CellState::Unknown);
    }

    #[test]
    fn test_bresenham_shallow_line() {
        let mut g = grid(1.0, 10, 10);
        g.mark_line(0, 6, 8, 8, CellState::Free);
        let expected = [
            (0, 6),
            (1, 6),
            (2, 6),
            (3, 7),
            (4, 7),
            (5, 7),
            (6, 7),
            (7, 8),
            (8, 8),
        ];
        for (x, y) in expected {
            assert_eq!(g.cell_state(x, y), CellState::Free, "cell ({x}, {y})");
        }
    }

    #[test]
    fn test_mark_line_preserves_occupied() {
        let mut g = grid(1.0, 10, 10);
        g.set_cell_state(3, 3, CellState::Occupied);
        g.set_cell_state(5, 5, CellState::Occupied);

        g.mark_line(1, 1, 7, 7, CellState::Free);

        assert_eq!(g.cell_state(3, 3), CellState::Occupied);
        assert_eq!(g.cell_state(5, 5), CellState::Occupied);
        for i in [1, 2, 4, 6, 7] {
            assert_eq!(g.cell_state(i, i), CellState::Free);
        }
    }

    #[test]
    fn test_line_cells_direction_preserved() {
        let forward = line_cells(0, 0, 5, 0);
        assert_eq!(forward.first(), Some(&(0, 0)));
        assert_eq!(forward.last(), Some(&(5, 0)));

        let backward = line_cells(5, 0, 0, 0);
        assert_eq!(backward.first(), Some(&(5, 0)));
        assert_eq!(backward.last(), Some(&(0, 0)));

        let steep = line_cells(2, 0, 2, 4);
        assert_eq!(steep.len(), 5);
        assert_eq!(steep.first(), Some(&(2, 0)));
        assert_eq!(steep.last(), Some(&(2, 4)));
    }

    #[test]
    fn test_i_gain() {
        let mut g = grid(1.0, 10, 10);

        // all unknown: six cells along the ray
        assert_eq!(g.calculate_i_gain(0, 0, 5, 0), 6);

        // an obstacle stops the ray before it
        g.set_cell_state(3, 0, CellState::Occupied);
        assert_eq!(g.calculate_i_gain(0, 0, 5, 0), 3);

        // free cells are already observed, not counted
        g.set_cell_state(1, 0, CellState::Free);
        assert_eq!(g.calculate_i_gain(0, 0, 5, 0), 2);

        // an out-of-range target scores all traversed in-bounds cells
        assert_eq!(g.calculate_i_gain(0, 0, 15, 0), 10);
    }

    #[test]
    fn test_rgb_export() {
        let mut g = grid(1.0, 2, 2);
        g.set_cell_state(0, 0, CellState::Free);
        g.set_cell_state(0, 1, CellState::Occupied);

        let pixels = g.to_rgb_image();
        assert_eq!(pixels.len(), 12);
        assert_eq!(&pixels[0..3], &[255, 255, 255]); // (0, 0) free
        assert_eq!(&pixels[3..6], &[128, 128, 128]); // (1, 0) unknown
        assert_eq!(&pixels[6..9], &[0, 0, 0]); // (0, 1) occupied
        assert_eq!(&pixels[9..12], &[128, 128, 128]); // (1, 1) unknown
    }

    #[test]
    fn test_raw_export() {
        let mut g = grid(1.0, 2, 2);
        g.set_cell_state(0, 0, CellState::Free);
        g.set_cell_state(0, 1, CellState::Occupied);

        assert_eq!(g.raw_occupancy(), vec![0, 100, 255, 100]);
    }
}
