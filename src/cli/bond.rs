//! # bond 子命令 CLI 定义
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/bond.rs`

use clap::Args;
use std::path::PathBuf;

/// bond 子命令参数
#[derive(Args, Debug)]
pub struct BondArgs {
    /// Structure or trajectory in .xyz format
    pub input: PathBuf,

    /// Species whose nearest neighbour is searched (one distance per atom)
    #[arg(long, default_value = "W")]
    pub center: String,

    /// Neighbour species
    #[arg(long, default_value = "S")]
    pub neighbor: String,

    /// Frame to use from multi-frame files (negative counts from the end)
    #[arg(long, default_value_t = -1, allow_negative_numbers = true)]
    pub frame: i64,

    /// Also write per-atom results to this CSV file
    #[arg(long)]
    pub csv: Option<PathBuf>,
}
