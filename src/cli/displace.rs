//! # displace 子命令 CLI 定义
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/displace.rs`

use clap::Args;
use std::path::PathBuf;

/// displace 子命令参数
#[derive(Args, Debug)]
pub struct DisplaceArgs {
    /// Reference (pristine) .xyz file
    pub reference: PathBuf,

    /// Defective .xyz file
    pub defective: PathBuf,

    /// Normalize the displacement values between 0 and 1
    #[arg(long, default_value_t = false)]
    pub normalize: bool,

    /// Frame to use from multi-frame files (negative counts from the end)
    #[arg(long, default_value_t = -1, allow_negative_numbers = true)]
    pub frame: i64,

    /// Output image (PNG or SVG by extension)
    #[arg(short, long, default_value = "displacement.png")]
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
