//! # 最近邻匹配
//!
//! 对查询点集中的每个点，在参考点集中暴力搜索距离最近的点。
//!
//! ## 算法概述
//! 1. 对每个查询点 q，遍历全部参考点 r，计算欧氏距离
//! 2. 使用严格小于比较，距离相同时保留参考点集中先出现的点
//! 3. 按模式输出属性差或最小距离
//!
//! 复杂度 O(|query| × |reference|)，点数在几十到几千之间，不使用空间索引。
//!
//! ## 依赖关系
//! - 被 `commands/charge.rs`, `commands/displace.rs`, `commands/bond.rs` 调用
//! - 使用 `models/points.rs`, `models/structure.rs`

use crate::models::{Atom, PointSet};

/// 匹配输出模式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchMode {
    /// query.attribute - reference.attribute
    AttributeDifference,
    /// 最小距离本身
    Displacement,
}

/// 单个查询点的匹配结果
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NearestMatch {
    /// 参考点索引
    pub index: usize,
    /// 距离
    pub distance: f64,
}

/// 欧氏距离
pub fn distance(a: &[f64; 3], b: &[f64; 3]) -> f64 {
    let dx = a[0] - b[0];
    let dy = a[1] - b[1];
    let dz = a[2] - b[2];
    (dx * dx + dy * dy + dz * dz).sqrt()
}

/// 在参考坐标中查找距 `query` 最近的点
///
/// 参考为空，或所有距离都是 NaN 时返回 None。
pub fn find_nearest<'a, I>(reference: I, query: &[f64; 3]) -> Option<NearestMatch>
where
    I: IntoIterator<Item = &'a [f64; 3]>,
{
    let mut best: Option<NearestMatch> = None;
    let mut min_distance = f64::INFINITY;

    for (index, r) in reference.into_iter().enumerate() {
        let d = distance(query, r);
        // NaN 永远不满足 <
        if d < min_distance {
            min_distance = d;
            best = Some(NearestMatch { index, distance: d });
        }
    }

    best
}

/// 对查询点集中每个点做最近邻匹配
///
/// 返回值长度等于 `query.len()`。没有可用匹配的点得到 NaN。
pub fn match_nearest(reference: &PointSet, query: &PointSet, mode: MatchMode) -> Vec<f64> {
    let ref_records = reference.records();

    query
        .records()
        .iter()
        .map(|q| {
            match find_nearest(ref_records.iter().map(|r| &r.position), &q.position) {
                Some(m) => match mode {
                    MatchMode::AttributeDifference => {
                        q.attribute - ref_records[m.index].attribute
                    }
                    MatchMode::Displacement => m.distance,
                },
                None => f64::NAN,
            }
        })
        .collect()
}

/// 按元素筛选的最近距离（键长）
///
/// 对每个 `source` 元素原子，找最近的 `target` 元素原子并返回距离。
/// 不存在 `target` 原子时返回 +inf。结果按 `source` 原子出现顺序排列。
pub fn nearest_species_distances(atoms: &[Atom], source: &str, target: &str) -> Vec<f64> {
    let targets: Vec<&[f64; 3]> = atoms
        .iter()
        .filter(|a| a.is_species(target))
        .map(|a| &a.position)
        .collect();

    atoms
        .iter()
        .filter(|a| a.is_species(source))
        .map(|a| {
            let mut nearest = f64::INFINITY;
            for t in &targets {
                let d = distance(&a.position, t);
                if d < nearest {
                    nearest = d;
                }
            }
            nearest
        })
        .collect()
}

/// 最小-最大归一化到 [0, 1]
///
/// 所有值相等时除零，结果为 NaN/Inf，不做保护。
/// NaN 不参与 min/max 的计算。
pub fn normalize(values: &[f64]) -> Vec<f64> {
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let span = max - min;

    values.iter().map(|v| (v - min) / span).collect()
}
