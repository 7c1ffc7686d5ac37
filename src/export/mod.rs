//! # 数据导出模块
//!
//! ## 子模块
//! - `dat`: 展宽曲线两列文本
//! - `table`: 逐原子结果 CSV
//!
//! ## 依赖关系
//! - 被 `commands/` 调用

pub mod dat;
pub mod table;

pub use table::AtomValueRow;
