//! # qpost - 原子模拟结果后处理工具
//!
//! 将缺陷结构分析与 PDOS 处理脚本统一成单一可执行文件。
//!
//! ## 子命令
//! - `charge`   - Bader 电荷差（最近邻匹配）与俯视热图
//! - `displace` - 缺陷结构原子位移与俯视热图
//! - `bond`     - 两种元素之间的最近邻键长
//! - `pdos`     - CP2K PDOS 处理
//!   - `smear` - 高斯展宽，输出 .dat
//!   - `plot`  - 绘制 .dat 曲线（自旋向下取反）
//!
//! ## 依赖关系
//! ```text
//! main.rs
//!   ├── cli/        (命令行参数定义)
//!   ├── commands/   (命令执行逻辑)
//!   │     ├── parsers/   (格式解析器)
//!   │     ├── analysis/  (最近邻匹配、高斯展宽)
//!   │     ├── models/    (数据模型)
//!   │     ├── export/    (.dat / CSV 输出)
//!   │     └── plot/      (热图、DOS 图)
//!   ├── batch/      (批量文件收集与处理)
//!   ├── utils/      (工具函数)
//!   └── error.rs    (错误处理)
//! ```

mod analysis;
mod batch;
mod cli;
mod commands;
mod error;
mod export;
mod models;
mod parsers;
mod plot;
mod utils;

use clap::Parser;
use cli::Cli;

fn main() {
    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    let cli = Cli::parse();

    if let Err(e) = commands::run(cli.command) {
        utils::output::print_error(&format!("{}", e));
        std::process::exit(1);
    }
}
