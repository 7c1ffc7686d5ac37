//! # 点集数据模型
//!
//! 每个点带有位置和一个标量属性（Bader 电荷或其他仅用于输出的数值）。
//! 构建后不可变，单位换算通过 `scaled` 返回新的点集。
//!
//! ## 依赖关系
//! - 被 `parsers/bader.rs`, `models/structure.rs` 构建
//! - 被 `analysis/nearest.rs` 使用

use serde::{Deserialize, Serialize};

/// 单个点记录
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointRecord {
    /// 位置 [x, y, z]
    pub position: [f64; 3],
    /// 标量属性
    pub attribute: f64,
}

impl PointRecord {
    pub fn new(position: [f64; 3], attribute: f64) -> Self {
        PointRecord {
            position,
            attribute,
        }
    }
}

/// 有序点集
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PointSet {
    records: Vec<PointRecord>,
}

impl PointSet {
    pub fn new(records: Vec<PointRecord>) -> Self {
        PointSet { records }
    }

    pub fn records(&self) -> &[PointRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn positions(&self) -> Vec<[f64; 3]> {
        self.records.iter().map(|r| r.position).collect()
    }

    /// 坐标乘以常数因子（如 Bohr -> Å），属性不变
    pub fn scaled(&self, factor: f64) -> PointSet {
        PointSet {
            records: self
                .records
                .iter()
                .map(|r| {
                    PointRecord::new(
                        [
                            r.position[0] * factor,
                            r.position[1] * factor,
                            r.position[2] * factor,
                        ],
                        r.attribute,
                    )
                })
                .collect(),
        }
    }
}

impl FromIterator<PointRecord> for PointSet {
    fn from_iter<I: IntoIterator<Item = PointRecord>>(iter: I) -> Self {
        PointSet::new(iter.into_iter().collect())
    }
}
