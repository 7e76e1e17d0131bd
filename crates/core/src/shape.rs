//! Column reshaping of tile layers: an operation evaluated once per column
//! gives how far that column slides vertically.

use opal_errors::OpalError;
use opal_ir::Operation;
use opal_vm::{ExecutionContext, VirtualMachine};

use log::warn;

/// A row-major grid of tile indices. `None` is an empty cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileGrid {
    pub width: usize,
    pub height: usize,
    pub tiles: Vec<Option<u32>>,
}

impl TileGrid {
    pub fn new(width: usize, height: usize) -> TileGrid {
        TileGrid {
            width,
            height,
            tiles: vec![None; width * height],
        }
    }

    pub fn get(&self, column: usize, row: usize) -> Option<u32> {
        if column >= self.width || row >= self.height {
            return None;
        }

        self.tiles.get(row * self.width + column).copied().flatten()
    }

    /// Shifts every column down by `operation` evaluated at `x = column`,
    /// rounded. Negative results shift up. Cells shifted out of the grid are
    /// dropped and vacated cells are left empty.
    pub fn reshape(&self, operation: &Operation) -> Result<TileGrid, OpalError> {
        let mut vm = VirtualMachine::new();
        let mut shaped = TileGrid::new(self.width, self.height);

        for column in 0..self.width {
            let mut context = ExecutionContext::new(column as f64);

            let value = vm.run(operation, &mut context)?.unwrap_or(0.0);

            let shift = if value.is_finite() {
                value.round() as i64
            } else {
                warn!("column {} shift is {}, leaving it in place", column, value);
                0
            };

            for row in 0..self.height {
                let target = row as i64 + shift;

                if target < 0 || target >= self.height as i64 {
                    continue;
                }

                shaped.tiles[target as usize * self.width + column] = self.get(column, row);
            }
        }

        Ok(shaped)
    }
}
