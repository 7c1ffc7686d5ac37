//! # 原子结构数据模型
//!
//! XYZ 文件中的原子与帧（轨迹中的一个快照）。坐标均为笛卡尔坐标 (Å)。
//!
//! ## 依赖关系
//! - 被 `parsers/xyz.rs` 和 `commands/` 使用
//! - 使用 `models/points.rs` 构建 PointSet

use crate::models::{PointRecord, PointSet};
use serde::{Deserialize, Serialize};

/// 原子信息
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Atom {
    /// 元素符号
    pub element: String,

    /// 笛卡尔坐标 [x, y, z] (Å)
    pub position: [f64; 3],
}

impl Atom {
    pub fn new(element: impl Into<String>, position: [f64; 3]) -> Self {
        Atom {
            element: element.into(),
            position,
        }
    }

    /// 元素符号比较（忽略大小写）
    pub fn is_species(&self, species: &str) -> bool {
        self.element.eq_ignore_ascii_case(species)
    }
}

/// 结构帧
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Frame {
    /// 注释行（CP2K 轨迹中包含 i = ..., time = ..., E = ...）
    pub comment: String,

    /// 原子列表
    pub atoms: Vec<Atom>,
}

impl Frame {
    pub fn new(comment: impl Into<String>, atoms: Vec<Atom>) -> Self {
        Frame {
            comment: comment.into(),
            atoms,
        }
    }

    /// 所有原子坐标
    pub fn positions(&self) -> Vec<[f64; 3]> {
        self.atoms.iter().map(|a| a.position).collect()
    }

    /// 转换为 PointSet，属性值统一为 0
    pub fn to_point_set(&self) -> PointSet {
        PointSet::new(
            self.atoms
                .iter()
                .map(|a| PointRecord::new(a.position, 0.0))
                .collect(),
        )
    }

    /// 统计某元素的原子数
    pub fn count_species(&self, species: &str) -> usize {
        self.atoms.iter().filter(|a| a.is_species(species)).count()
    }

    /// 计算化学式
    pub fn formula(&self) -> String {
        use std::collections::BTreeMap;
        let mut counts: BTreeMap<&str, usize> = BTreeMap::new();

        for atom in &self.atoms {
            *counts.entry(atom.element.as_str()).or_insert(0) += 1;
        }

        counts
            .into_iter()
            .map(|(el, count)| {
                if count == 1 {
                    el.to_string()
                } else {
                    format!("{}{}", el, count)
                }
            })
            .collect::<Vec<_>>()
            .join("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ws2_fragment() -> Frame {
        Frame::new(
            "WS2",
            vec![
                Atom::new("W", [0.0, 0.0, 0.0]),
                Atom::new("S", [1.6, 0.9, 1.5]),
                Atom::new("S", [1.6, 0.9, -1.5]),
            ],
        )
    }

    #[test]
    fn test_frame_formula() {
        assert_eq!(ws2_fragment().formula(), "S2W");
    }

    #[test]
    fn test_count_species_ignores_case() {
        let frame = ws2_fragment();
        assert_eq!(frame.count_species("s"), 2);
        assert_eq!(frame.count_species("W"), 1);
        assert_eq!(frame.count_species("Mo"), 0);
    }

    #[test]
    fn test_to_point_set_keeps_order() {
        let set = ws2_fragment().to_point_set();
        assert_eq!(set.len(), 3);
        assert_eq!(set.records()[1].position, [1.6, 0.9, 1.5]);
        assert_eq!(set.records()[2].attribute, 0.0);
    }
}
