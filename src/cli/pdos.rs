//! # pdos 子命令 CLI 定义
//!
//! 投影态密度处理，包含两个子命令：
//! - `smear`: 将 CP2K .pdos 高斯展宽并写出 .dat
//! - `plot`: 绘制一个或多个 .dat 曲线
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/pdos.rs`

use crate::analysis::smearing::{DEFAULT_POINTS_PER_LEVEL, DEFAULT_WIDTH};

use clap::{Args, Subcommand};
use std::path::PathBuf;

// ─────────────────────────────────────────────────────────────
// pdos 主命令
// ─────────────────────────────────────────────────────────────

/// pdos 主命令参数
#[derive(Args, Debug)]
pub struct PdosArgs {
    #[command(subcommand)]
    pub command: PdosCommands,
}

/// pdos 子命令
#[derive(Subcommand, Debug)]
pub enum PdosCommands {
    /// Apply Gaussian smearing to CP2K .pdos files and write two-column .dat files
    Smear(SmearArgs),

    /// Plot smeared .dat curves
    Plot(PlotArgs),
}

// ─────────────────────────────────────────────────────────────
// smear 子命令
// ─────────────────────────────────────────────────────────────

/// smear 子命令参数
#[derive(Args, Debug)]
pub struct SmearArgs {
    /// .pdos files or directories containing them
    #[arg(required = true, num_args = 1..)]
    pub inputs: Vec<PathBuf>,

    /// Gaussian smearing width in eV
    #[arg(long, env = "QPOST_SMEAR_WIDTH", default_value_t = DEFAULT_WIDTH)]
    pub width: f64,

    /// Number of grid points (default: points-per-level x number of eigenvalues)
    #[arg(long)]
    pub npts: Option<usize>,

    /// Grid points per eigenvalue when --npts is not given
    #[arg(long, default_value_t = DEFAULT_POINTS_PER_LEVEL)]
    pub points_per_level: usize,

    /// Only sum these orbitals (comma separated, e.g. "s,px,py,pz")
    #[arg(long, value_delimiter = ',')]
    pub orbitals: Option<Vec<String>>,

    /// Directory for the .dat files (default: next to each input)
    #[arg(long)]
    pub output_dir: Option<PathBuf>,

    /// Also write the sum of all smeared curves to this file (grids must match)
    #[arg(long)]
    pub sum: Option<PathBuf>,

    /// Glob pattern for files inside input directories
    #[arg(long, default_value = "*.pdos")]
    pub pattern: String,

    /// Recurse into subdirectories
    #[arg(long, default_value_t = false)]
    pub recursive: bool,

    /// Overwrite existing output files
    #[arg(long, default_value_t = false)]
    pub overwrite: bool,
}

// ─────────────────────────────────────────────────────────────
// plot 子命令
// ─────────────────────────────────────────────────────────────

/// plot 子命令参数
#[derive(Args, Debug)]
pub struct PlotArgs {
    /// Two-column .dat files (energy, DOS), plotted in the given order
    #[arg(required = true, num_args = 1..)]
    pub files: Vec<PathBuf>,

    /// Spin-down curves: these files (from the list above) are plotted with negated DOS
    #[arg(long)]
    pub beta: Vec<PathBuf>,

    /// Treat every file whose name contains "BETA" as spin-down
    #[arg(long, default_value_t = false)]
    pub auto_beta: bool,

    /// Energy axis limits
    #[arg(
        long,
        num_args = 2,
        value_names = ["MIN", "MAX"],
        allow_negative_numbers = true,
        default_values_t = [-3.0, 4.0]
    )]
    pub xlim: Vec<f64>,

    /// DOS axis limits
    #[arg(
        long,
        num_args = 2,
        value_names = ["MIN", "MAX"],
        allow_negative_numbers = true,
        default_values_t = [-70.0, 70.0]
    )]
    pub ylim: Vec<f64>,

    /// Output image (PNG or SVG by extension)
    #[arg(short, long, default_value = "pdos_plot.png")]
    pub output: PathBuf,

    /// Figure width in pixels (for PNG) or points (for SVG)
    #[arg(long, default_value_t = 2000)]
    pub width: u32,

    /// Figure height in pixels (for PNG) or points (for SVG)
    #[arg(long, default_value_t = 2000)]
    pub height: u32,

    /// Title for the plot
    #[arg(long)]
    pub title: Option<String>,
}
