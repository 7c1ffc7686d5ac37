//! # 解析器模块
//!
//! 解析 Bader 电荷表、XYZ 坐标、CP2K .pdos 与两列 .dat 曲线。
//! 所有解析函数返回不可变的数据模型，不保留解析状态。
//!
//! ## 依赖关系
//! - 被 `commands/` 模块使用
//! - 使用 `models/` 数据模型
//! - 子模块: bader, dat, pdos, xyz

pub mod bader;
pub mod dat;
pub mod pdos;
pub mod xyz;
