//! # 高斯展宽
//!
//! 将离散谱 (energy, weight) 展宽为连续态密度曲线。
//!
//! ## 算法概述
//! 1. 网格为 [emin, emax] 上均匀分布的 npts 个点（包含两端）
//! 2. 每条谱线贡献 w · exp(-((g - e)/width)²) / (√π · width)
//! 3. 所有谱线贡献逐点累加
//!
//! 费米能级平移与 Hartree -> eV 换算在构建 `Spectrum` 时完成，不在此处进行。
//!
//! ## 依赖关系
//! - 被 `commands/pdos.rs` 调用
//! - 使用 `models/spectrum.rs`

use crate::error::{QpostError, Result};
use crate::models::{SmearedCurve, Spectrum};

use std::f64::consts::PI;

/// 默认展宽宽度 (eV)
pub const DEFAULT_WIDTH: f64 = 0.10;

/// 默认每条谱线对应的网格点数
pub const DEFAULT_POINTS_PER_LEVEL: usize = 4;

/// 网格对齐容差
const GRID_TOLERANCE: f64 = 1e-9;

/// 展宽参数
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SmearingParams {
    /// 网格点数
    pub npts: usize,
    /// 高斯宽度 (eV)
    pub width: f64,
}

impl SmearingParams {
    /// 创建并校验参数
    pub fn new(npts: usize, width: f64) -> Result<Self> {
        if !(width.is_finite() && width > 0.0) {
            return Err(QpostError::InvalidArgument(format!(
                "smearing width must be a positive number, got {}",
                width
            )));
        }
        Ok(Self { npts, width })
    }

    /// 按谱线数量确定网格点数（默认每条谱线 4 个点）
    pub fn for_spectrum(
        spectrum: &Spectrum,
        npts: Option<usize>,
        points_per_level: usize,
        width: f64,
    ) -> Result<Self> {
        let npts = npts.unwrap_or(spectrum.len() * points_per_level);
        Self::new(npts, width)
    }
}

/// 在 [start, end] 上生成 n 个均匀分布的点，包含两端
///
/// n = 1 时返回 [start]，n = 0 时返回空。
pub fn linspace(start: f64, end: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (n - 1) as f64;
            let mut grid: Vec<f64> = (0..n).map(|i| start + i as f64 * step).collect();
            grid[n - 1] = end;
            grid
        }
    }
}

/// 在网格上求值的归一化高斯核
pub fn gaussian(grid: &[f64], center: f64, width: f64) -> Vec<f64> {
    let norm = PI.sqrt() * width;
    grid.iter()
        .map(|g| {
            let x = (g - center) / width;
            (-x * x).exp() / norm
        })
        .collect()
}

/// 对离散谱做高斯展宽
pub fn smear(spectrum: &Spectrum, npts: usize, width: f64) -> Result<SmearedCurve> {
    let (emin, emax) = spectrum
        .energy_range()
        .ok_or_else(|| QpostError::EmptySpectrum("cannot smear a spectrum without levels".into()))?;

    let grid = linspace(emin, emax, npts);
    let mut density = vec![0.0; grid.len()];

    for point in spectrum.points() {
        for (d, k) in density
            .iter_mut()
            .zip(gaussian(&grid, point.energy, width))
        {
            *d += point.weight * k;
        }
    }

    SmearedCurve::new(grid, density)
}

/// 使用参数结构体进行展宽
pub fn smear_with(spectrum: &Spectrum, params: &SmearingParams) -> Result<SmearedCurve> {
    smear(spectrum, params.npts, params.width)
}

/// 两条曲线逐点相加
///
/// 两条曲线必须位于同一网格（点数相同，各网格能量在容差内一致）。
pub fn add_curves(a: &SmearedCurve, b: &SmearedCurve) -> Result<SmearedCurve> {
    if a.len() != b.len() {
        return Err(QpostError::GridMismatch {
            reason: format!("{} points vs {} points", a.len(), b.len()),
        });
    }

    if let Some((i, (ea, eb))) = a
        .energies()
        .iter()
        .zip(b.energies())
        .enumerate()
        .find(|(_, (ea, eb))| (*ea - *eb).abs() > GRID_TOLERANCE)
    {
        return Err(QpostError::GridMismatch {
            reason: format!("grid point {} differs: {:.6} vs {:.6} eV", i, ea, eb),
        });
    }

    let density = a
        .densities()
        .iter()
        .zip(b.densities())
        .map(|(x, y)| x + y)
        .collect();

    SmearedCurve::new(a.energies().to_vec(), density)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::spectrum::EnergyPoint;

    fn spectrum(points: &[(f64, f64)]) -> Spectrum {
        points
            .iter()
            .map(|(e, w)| EnergyPoint::new(*e, *w))
            .collect()
    }

    #[test]
    fn test_linspace_endpoints() {
        let grid = linspace(-2.0, 3.0, 11);
        assert_eq!(grid.len(), 11);
        assert_eq!(grid[0], -2.0);
        assert_eq!(grid[10], 3.0);
        assert!((grid[1] - (-1.5)).abs() < 1e-12);

        assert_eq!(linspace(1.0, 5.0, 1), vec![1.0]);
        assert!(linspace(1.0, 5.0, 0).is_empty());
    }

    #[test]
    fn test_smear_grid_shape() {
        let s = spectrum(&[(-3.2, 1.0), (0.4, 0.5), (2.7, 2.0), (-1.1, 0.1)]);
        let curve = smear(&s, 37, 0.1).unwrap();

        assert_eq!(curve.len(), 37);
        assert!((curve.energies()[0] - (-3.2)).abs() < 1e-12);
        assert!((curve.energies()[36] - 2.7).abs() < 1e-12);
    }

    #[test]
    fn test_smear_single_level_example() {
        let s = spectrum(&[(0.0, 1.0)]);
        let curve = smear(&s, 5, 1.0).unwrap();

        assert_eq!(curve.energies(), &[0.0; 5]);
        for d in curve.densities() {
            assert!((d - 1.0 / PI.sqrt()).abs() < 1e-12);
            assert!((d - 0.5642).abs() < 1e-4);
        }
    }

    #[test]
    fn test_smear_is_linear() {
        // 两个谱的 min/max 相同，保证网格一致
        let a = spectrum(&[(-1.0, 0.3), (0.2, 1.0), (2.0, 0.7)]);
        let b = spectrum(&[(2.0, 0.1), (-1.0, 1.5), (0.9, 0.4), (1.3, 2.2)]);

        let npts = 64;
        let width = 0.25;
        let combined = smear(&a.points().iter().chain(b.points()).copied().collect(), npts, width).unwrap();
        let summed = add_curves(
            &smear(&a, npts, width).unwrap(),
            &smear(&b, npts, width).unwrap(),
        )
        .unwrap();

        assert_eq!(combined.energies(), summed.energies());
        for (x, y) in combined.densities().iter().zip(summed.densities()) {
            assert!((x - y).abs() < 1e-12);
        }
    }

    #[test]
    fn test_smear_order_independent() {
        let a = spectrum(&[(0.0, 1.0), (1.0, 2.0), (-0.5, 0.5)]);
        let b = spectrum(&[(1.0, 2.0), (-0.5, 0.5), (0.0, 1.0)]);

        let ca = smear(&a, 20, 0.2).unwrap();
        let cb = smear(&b, 20, 0.2).unwrap();
        for (x, y) in ca.densities().iter().zip(cb.densities()) {
            assert!((x - y).abs() < 1e-12);
        }
    }

    #[test]
    fn test_smear_integral_close_to_weight() {
        // 网格足够宽时，积分约等于总权重
        let s = spectrum(&[(-10.0, 0.0), (0.0, 3.0), (10.0, 0.0)]);
        let curve = smear(&s, 2001, 0.1).unwrap();
        let de = curve.energies()[1] - curve.energies()[0];
        let integral: f64 = curve.densities().iter().sum::<f64>() * de;
        assert!((integral - 3.0).abs() < 1e-3);
    }

    #[test]
    fn test_smear_empty_spectrum() {
        assert!(matches!(
            smear(&Spectrum::default(), 10, 0.1),
            Err(QpostError::EmptySpectrum(_))
        ));
    }

    #[test]
    fn test_add_curves_rejects_mismatch() {
        let a = smear(&spectrum(&[(0.0, 1.0), (1.0, 1.0)]), 10, 0.1).unwrap();
        let b = smear(&spectrum(&[(0.0, 1.0), (2.0, 1.0)]), 10, 0.1).unwrap();
        let c = smear(&spectrum(&[(0.0, 1.0), (1.0, 1.0)]), 12, 0.1).unwrap();

        assert!(matches!(
            add_curves(&a, &b),
            Err(QpostError::GridMismatch { .. })
        ));
        assert!(matches!(
            add_curves(&a, &c),
            Err(QpostError::GridMismatch { .. })
        ));
    }

    #[test]
    fn test_params_validation() {
        let s = spectrum(&[(0.0, 1.0), (1.0, 1.0), (2.0, 1.0)]);
        let p = SmearingParams::for_spectrum(&s, None, DEFAULT_POINTS_PER_LEVEL, DEFAULT_WIDTH)
            .unwrap();
        assert_eq!(p.npts, 12);

        let p = SmearingParams::for_spectrum(&s, Some(100), 4, 0.05).unwrap();
        assert_eq!(p.npts, 100);

        assert!(SmearingParams::new(10, 0.0).is_err());
        assert!(SmearingParams::new(10, -0.1).is_err());
        assert!(SmearingParams::new(10, f64::NAN).is_err());
    }
}
