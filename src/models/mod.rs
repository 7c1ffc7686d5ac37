//! # 数据模型模块
//!
//! 定义点集、原子结构与态密度的数据模型。所有模型构建后不再修改。
//!
//! ## 依赖关系
//! - 被 `parsers/`, `analysis/` 和 `commands/` 使用
//! - 子模块: points, structure, spectrum

pub mod points;
pub mod spectrum;
pub mod structure;

pub use points::{PointRecord, PointSet};
pub use spectrum::{PdosData, PdosRow, SmearedCurve, Spectrum};
pub use structure::{Atom, Frame};
