//! # 命令执行模块
//!
//! 实现各子命令的业务逻辑。
//!
//! ## 依赖关系
//! - 被 `main.rs` 调用
//! - 使用 `cli/`, `parsers/`, `analysis/`, `export/`, `plot/`, `utils/`
//! - 子模块: charge, displace, bond, pdos, report

pub mod bond;
pub mod charge;
pub mod displace;
pub mod pdos;
pub mod report;

use crate::cli::Commands;
use crate::error::Result;

/// 执行命令
pub fn run(cmd: Commands) -> Result<()> {
    match cmd {
        Commands::Charge(args) => charge::execute(args),
        Commands::Displace(args) => displace::execute(args),
        Commands::Bond(args) => bond::execute(args),
        Commands::Pdos(args) => pdos::execute(args),
    }
}
