//! The ice sheet as a grid of physical cells
//!
//! Pebble height, temperature, moisture and grade vary per cell; the force
//! model reads them through bilinear sampling and writes wear back as rocks
//! travel. The grid uses a cell-center convention: cell (i, j) is centered
//! at world `((i + 0.5) * CELL_SIZE, (j + 0.5) * CELL_SIZE - SHEET_HALF_WIDTH)`.

use serde::{Deserialize, Serialize};

use crate::consts::{SHEET_HALF_WIDTH, SHEET_LENGTH};
use crate::tuning::Tuning;

/// Cell edge length in world units
pub const CELL_SIZE: f32 = 0.25;
/// Cells along the sheet (x axis)
pub const GRID_COLS: usize = (SHEET_LENGTH / CELL_SIZE) as usize;
/// Cells across the sheet (y axis)
pub const GRID_ROWS: usize = (2.0 * SHEET_HALF_WIDTH / CELL_SIZE) as usize;

/// Moisture lost per second to evaporation, every cell, every tick
const EVAPORATION_RATE: f32 = 0.04;

/// Wear weight of the cell under the rock vs its eight neighbors
const WEAR_CENTER_WEIGHT: f32 = 1.0;
const WEAR_NEIGHBOR_WEIGHT: f32 = 0.3;
/// Sweeping multiplies wear by this on top of the base rate
const SWEEP_WEAR_FACTOR: f32 = 2.5;
/// Moisture deposited per second of sweeping at weight 1.0
const SWEEP_MOISTURE_RATE: f32 = 0.05;

/// One grid element of ice state
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Cell {
    /// Texture height; fresh pebble is 1.0, wears toward 0
    pub pebble_height: f32,
    /// Deviation from nominal ice temperature; negative = colder and harder
    pub temperature: f32,
    /// Surface water from sweeping, 0..=1, decays over time
    pub moisture: f32,
    /// Along-sheet grade (positive = downhill toward +x)
    pub slope_x: f32,
    /// Cross-sheet grade (positive = downhill toward +y)
    pub slope_y: f32,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            pebble_height: 1.0,
            temperature: 0.0,
            moisture: 0.0,
            slope_x: 0.0,
            slope_y: 0.0,
        }
    }
}

impl Cell {
    /// Effective friction of this cell under the given tuning
    fn friction(&self, tuning: &Tuning) -> f32 {
        let f = tuning.base_friction + self.pebble_height * tuning.pebble_friction_bonus
            - self.moisture * tuning.moisture_coeff
            + self.temperature * tuning.temp_coeff;
        f.max(tuning.friction_floor)
    }
}

/// Per-cell state over the whole playable sheet
///
/// Created once per round from a profile; wear accumulates across the
/// deliveries of that round. Exactly one simulation instance owns a field.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IceField {
    cells: Vec<Cell>,
}

impl Default for IceField {
    fn default() -> Self {
        Self::new()
    }
}

impl IceField {
    /// A flat, fully pebbled sheet (profiles shape it further)
    pub fn new() -> Self {
        Self {
            cells: vec![Cell::default(); GRID_COLS * GRID_ROWS],
        }
    }

    #[inline]
    pub fn cell(&self, i: usize, j: usize) -> &Cell {
        &self.cells[j * GRID_COLS + i]
    }

    #[inline]
    pub fn cell_mut(&mut self, i: usize, j: usize) -> &mut Cell {
        &mut self.cells[j * GRID_COLS + i]
    }

    /// Visit every cell with its world-space center, for profile setup
    pub fn for_each_cell(&mut self, mut f: impl FnMut(f32, f32, &mut Cell)) {
        for j in 0..GRID_ROWS {
            for i in 0..GRID_COLS {
                let (wx, wy) = cell_center(i, j);
                f(wx, wy, self.cell_mut(i, j));
            }
        }
    }

    /// Bilinear sample of an arbitrary per-cell quantity at a world position
    ///
    /// Base indices clamp to the grid and interpolation weights clamp to
    /// [0, 1], so edge and off-sheet queries snap to the nearest valid cells
    /// instead of extrapolating.
    fn sample(&self, x: f32, y: f32, f: impl Fn(&Cell) -> f32) -> f32 {
        // Fractional grid coordinates, cell-center convention
        let gx = x / CELL_SIZE - 0.5;
        let gy = (y + SHEET_HALF_WIDTH) / CELL_SIZE - 0.5;

        let i0 = (gx.floor() as isize).clamp(0, GRID_COLS as isize - 2) as usize;
        let j0 = (gy.floor() as isize).clamp(0, GRID_ROWS as isize - 2) as usize;
        let tx = (gx - i0 as f32).clamp(0.0, 1.0);
        let ty = (gy - j0 as f32).clamp(0.0, 1.0);

        let v00 = f(self.cell(i0, j0));
        let v10 = f(self.cell(i0 + 1, j0));
        let v01 = f(self.cell(i0, j0 + 1));
        let v11 = f(self.cell(i0 + 1, j0 + 1));

        let top = v00 + (v10 - v00) * tx;
        let bottom = v01 + (v11 - v01) * tx;
        top + (bottom - top) * ty
    }

    /// Interpolated friction coefficient at a world position
    pub fn sample_friction(&self, x: f32, y: f32, tuning: &Tuning) -> f32 {
        self.sample(x, y, |c| c.friction(tuning))
    }

    /// Interpolated (slope_x, slope_y) grade at a world position
    pub fn sample_slope(&self, x: f32, y: f32) -> (f32, f32) {
        (
            self.sample(x, y, |c| c.slope_x),
            self.sample(x, y, |c| c.slope_y),
        )
    }

    /// Degrade pebble in the 3x3 neighborhood around the cell containing
    /// (x, y); sweeping wears harder and deposits moisture
    pub fn apply_wear(&mut self, x: f32, y: f32, dt: f32, sweeping: bool, wear_rate: f32) {
        let ci = ((x / CELL_SIZE).floor() as isize).clamp(0, GRID_COLS as isize - 1);
        let cj = (((y + SHEET_HALF_WIDTH) / CELL_SIZE).floor() as isize)
            .clamp(0, GRID_ROWS as isize - 1);

        for dj in -1..=1 {
            for di in -1..=1 {
                let i = ci + di;
                let j = cj + dj;
                if i < 0 || j < 0 || i >= GRID_COLS as isize || j >= GRID_ROWS as isize {
                    continue;
                }
                let weight = if di == 0 && dj == 0 {
                    WEAR_CENTER_WEIGHT
                } else {
                    WEAR_NEIGHBOR_WEIGHT
                };

                let cell = self.cell_mut(i as usize, j as usize);
                // Cold ice wears slower, warm ice faster
                let temp_scale = (1.0 + cell.temperature * 0.5).clamp(0.25, 2.0);
                let mut wear = wear_rate * weight * dt * temp_scale;
                if sweeping {
                    wear += SWEEP_WEAR_FACTOR * wear_rate * weight * dt;
                    cell.moisture = (cell.moisture + SWEEP_MOISTURE_RATE * weight * dt).min(1.0);
                }
                cell.pebble_height = (cell.pebble_height - wear).max(0.0);
            }
        }
    }

    /// Per-tick moisture decay across the whole sheet
    pub fn evaporate(&mut self, dt: f32) {
        for cell in &mut self.cells {
            cell.moisture = (cell.moisture - EVAPORATION_RATE * dt).max(0.0);
        }
    }
}

/// World-space center of cell (i, j)
pub fn cell_center(i: usize, j: usize) -> (f32, f32) {
    (
        (i as f32 + 0.5) * CELL_SIZE,
        (j as f32 + 0.5) * CELL_SIZE - SHEET_HALF_WIDTH,
    )
}
