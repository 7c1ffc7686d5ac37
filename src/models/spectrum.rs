//! # 态密度数据模型
//!
//! - `PdosData`: CP2K .pdos 文件解析结果（原始单位 a.u.）
//! - `EnergyPoint` / `Spectrum`: 已移至费米能级并换算为 eV 的离散谱
//! - `SmearedCurve`: 展宽后的连续曲线
//!
//! ## 依赖关系
//! - 被 `parsers/pdos.rs`, `parsers/dat.rs` 构建
//! - 被 `analysis/smearing.rs`, `export/`, `plot/` 使用
//! - 使用 `analysis/units.rs` 做费米能级平移与单位换算

use crate::analysis::units;
use crate::error::{QpostError, Result};
use serde::{Deserialize, Serialize};

/// 离散谱中的一条谱线
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnergyPoint {
    /// 能量 (eV，相对费米能级)
    pub energy: f64,
    /// 权重（各轨道投影之和）
    pub weight: f64,
}

impl EnergyPoint {
    pub fn new(energy: f64, weight: f64) -> Self {
        EnergyPoint { energy, weight }
    }
}

/// 离散谱，能量无需有序
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Spectrum {
    points: Vec<EnergyPoint>,
}

impl Spectrum {
    pub fn new(points: Vec<EnergyPoint>) -> Self {
        Spectrum { points }
    }

    pub fn points(&self) -> &[EnergyPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// 能量范围 (emin, emax)，空谱返回 None
    pub fn energy_range(&self) -> Option<(f64, f64)> {
        if self.is_empty() {
            return None;
        }
        let emin = self
            .points
            .iter()
            .map(|p| p.energy)
            .fold(f64::INFINITY, f64::min);
        let emax = self
            .points
            .iter()
            .map(|p| p.energy)
            .fold(f64::NEG_INFINITY, f64::max);
        Some((emin, emax))
    }
}

impl FromIterator<EnergyPoint> for Spectrum {
    fn from_iter<I: IntoIterator<Item = EnergyPoint>>(iter: I) -> Self {
        Spectrum::new(iter.into_iter().collect())
    }
}

/// 展宽后的曲线：均匀网格上的 (能量, 态密度) 采样
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SmearedCurve {
    energies: Vec<f64>,
    densities: Vec<f64>,
}

impl SmearedCurve {
    /// 由网格与密度构建，两者长度必须一致
    pub fn new(energies: Vec<f64>, densities: Vec<f64>) -> Result<Self> {
        if energies.len() != densities.len() {
            return Err(QpostError::InvalidArgument(format!(
                "grid has {} points but density has {}",
                energies.len(),
                densities.len()
            )));
        }
        Ok(SmearedCurve {
            energies,
            densities,
        })
    }

    pub fn from_samples(samples: &[(f64, f64)]) -> Self {
        SmearedCurve {
            energies: samples.iter().map(|(e, _)| *e).collect(),
            densities: samples.iter().map(|(_, d)| *d).collect(),
        }
    }

    pub fn energies(&self) -> &[f64] {
        &self.energies
    }

    pub fn densities(&self) -> &[f64] {
        &self.densities
    }

    pub fn len(&self) -> usize {
        self.energies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.energies.is_empty()
    }

    pub fn samples(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.energies
            .iter()
            .copied()
            .zip(self.densities.iter().copied())
    }

    /// 密度取反（自旋向下通道的绘图约定）
    pub fn negated(&self) -> SmearedCurve {
        SmearedCurve {
            energies: self.energies.clone(),
            densities: self.densities.iter().map(|d| -d).collect(),
        }
    }
}

/// .pdos 文件中的一行（一个本征值）
#[derive(Debug, Clone, PartialEq)]
pub struct PdosRow {
    /// 本征值 (a.u.)
    pub eigenvalue: f64,
    /// 占据数
    pub occupation: f64,
    /// 各轨道投影
    pub projections: Vec<f64>,
}

impl PdosRow {
    /// 所有轨道投影之和
    pub fn total(&self) -> f64 {
        self.projections.iter().sum()
    }
}

/// CP2K 投影态密度
#[derive(Debug, Clone, PartialEq)]
pub struct PdosData {
    /// 投影的原子种类（或原子列表编号）
    pub atom_kind: String,
    /// 迭代步
    pub iteration_step: Option<i64>,
    /// 费米能级 (a.u.)
    pub fermi_energy: f64,
    /// 轨道名称
    pub orbitals: Vec<String>,
    /// 数据行
    pub rows: Vec<PdosRow>,
}

impl PdosData {
    /// (本征值 - 费米能级)，单位 eV
    pub fn shifted_energies(&self) -> Vec<f64> {
        self.rows
            .iter()
            .map(|r| units::shift_to_fermi_ev(r.eigenvalue, self.fermi_energy))
            .collect()
    }

    /// 占据态数量
    pub fn occupied_count(&self) -> usize {
        self.rows.iter().filter(|r| r.occupation > 0.0).count()
    }

    /// 构建离散谱
    ///
    /// `orbitals` 为 None 时权重为全部轨道之和，否则只累加指定轨道。
    pub fn to_spectrum(&self, orbitals: Option<&[String]>) -> Result<Spectrum> {
        let columns: Option<Vec<usize>> = match orbitals {
            None => None,
            Some(names) => {
                let mut idx = Vec::with_capacity(names.len());
                for name in names {
                    let pos = self
                        .orbitals
                        .iter()
                        .position(|o| o.eq_ignore_ascii_case(name))
                        .ok_or_else(|| {
                            QpostError::InvalidArgument(format!(
                                "orbital '{}' not present (available: {})",
                                name,
                                self.orbitals.join(", ")
                            ))
                        })?;
                    idx.push(pos);
                }
                Some(idx)
            }
        };

        Ok(self
            .shifted_energies()
            .into_iter()
            .zip(&self.rows)
            .map(|(energy, row)| {
                let weight = match &columns {
                    None => row.total(),
                    Some(cols) => cols
                        .iter()
                        .map(|&c| row.projections.get(c).copied().unwrap_or(0.0))
                        .sum(),
                };
                EnergyPoint::new(energy, weight)
            })
            .collect())
    }
}
