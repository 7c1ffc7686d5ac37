//! # 数值计算模块
//!
//! ## 子模块
//! - `nearest`: 最近邻匹配（电荷差、位移、键长）
//! - `smearing`: 高斯展宽与曲线相加
//! - `units`: 单位换算常数
//!
//! ## 依赖关系
//! - 被 `commands/` 使用
//! - 使用 `models/`

pub mod nearest;
pub mod smearing;
pub mod units;

pub use nearest::{match_nearest, nearest_species_distances, normalize, MatchMode};
