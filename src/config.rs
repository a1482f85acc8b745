// Command-line / environment configuration.

use clap::Parser;

use crate::error::Error;
use crate::feedback::{GUIDE_SQUARE_SIZE, Guides};
use crate::types::ShapeMode;

/// Smallest window side; leaves room around the 200 px guide square.
pub const MIN_SIDE: usize = GUIDE_SQUARE_SIZE as usize;

#[derive(Parser, Debug, Clone)]
#[command(name = "perfect-shape", about = "Draw a circle (or a square) freehand and see how close you got")]
pub struct Config {
    /// Target shape
    #[arg(long, value_enum, env = "PERFECT_SHAPE_MODE", default_value_t = ShapeMode::Circle)]
    pub mode: ShapeMode,

    /// Window width in pixels
    #[arg(long, env = "PERFECT_SHAPE_WIDTH", default_value_t = 960)]
    pub width: usize,

    /// Window height in pixels
    #[arg(long, env = "PERFECT_SHAPE_HEIGHT", default_value_t = 720)]
    pub height: usize,

    /// Start with the background grid hidden (square mode)
    #[arg(long)]
    pub hide_grid: bool,

    /// Start with the reference square hidden (square mode)
    #[arg(long)]
    pub hide_guide: bool,

    /// Don't ring the terminal bell on completion
    #[arg(long)]
    pub no_bell: bool,
}

impl Config {
    pub fn validate(&self) -> Result<(), Error> {
        if self.width < MIN_SIDE || self.height < MIN_SIDE {
            return Err(Error::InvalidSize { width: self.width, height: self.height, min: MIN_SIDE });
        }
        Ok(())
    }

    pub fn guides(&self) -> Guides {
        Guides { grid: !self.hide_grid, square: !self.hide_guide }
    }
}
