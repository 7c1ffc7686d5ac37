//! # charge 子命令 CLI 定义
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/charge.rs`

use clap::{Args, ValueEnum};
use std::path::PathBuf;

/// Bader 表中的坐标单位
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq, Default)]
pub enum CoordinateUnit {
    /// Bohr (converted to Å)
    #[default]
    Bohr,
    /// Already in Å
    Angstrom,
}

impl std::fmt::Display for CoordinateUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CoordinateUnit::Bohr => write!(f, "bohr"),
            CoordinateUnit::Angstrom => write!(f, "angstrom"),
        }
    }
}

/// charge 子命令参数
#[derive(Args, Debug)]
pub struct ChargeArgs {
    /// Reference Bader file (e.g., ref.dat)
    pub reference: PathBuf,

    /// Defective Bader file (e.g., def.dat)
    pub defective: PathBuf,

    /// Unit of the coordinates in both Bader files
    #[arg(long, value_enum, default_value = "bohr")]
    pub unit: CoordinateUnit,

    /// Normalize the charge differences between 0 and 1
    #[arg(long, default_value_t = false)]
    pub normalize: bool,

    /// Output image (PNG or SVG by extension)
    #[arg(short, long, default_value = "charge_difference.png")]
    pub output: PathBuf,

    /// Also write per-atom results to this CSV file
    #[arg(long)]
    pub csv: Option<PathBuf>,

    /// Skip plot generation
    #[arg(long, default_value_t = false)]
    pub no_plot: bool,

    /// Figure width in pixels (for PNG) or points (for SVG)
    #[arg(long, default_value_t = 1100)]
    pub width: u32,

    /// Figure height in pixels (for PNG) or points (for SVG)
    #[arg(long, default_value_t = 900)]
    pub height: u32,

    /// Marker radius in pixels
    #[arg(long, default_value_t = 8)]
    pub marker_size: u32,
}
