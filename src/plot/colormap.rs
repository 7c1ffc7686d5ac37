//! # 颜色映射
//!
//! 分段线性插值的 coolwarm（发散型，用于电荷差）与 hot（顺序型，用于位移）。

use plotters::style::RGBColor;

/// NaN 数据点的颜色
pub const MISSING_COLOR: RGBColor = RGBColor(160, 160, 160);

const COOLWARM: &[(f64, (u8, u8, u8))] = &[
    (0.0, (59, 76, 192)),
    (0.25, (124, 159, 249)),
    (0.5, (221, 221, 221)),
    (0.75, (246, 163, 128)),
    (1.0, (180, 4, 38)),
];

const HOT: &[(f64, (u8, u8, u8))] = &[
    (0.0, (10, 0, 0)),
    (0.365, (255, 0, 0)),
    (0.746, (255, 255, 0)),
    (1.0, (255, 255, 255)),
];

/// 可用颜色映射
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorMap {
    CoolWarm,
    Hot,
}

impl ColorMap {
    fn stops(&self) -> &'static [(f64, (u8, u8, u8))] {
        match self {
            ColorMap::CoolWarm => COOLWARM,
            ColorMap::Hot => HOT,
        }
    }

    /// t ∈ [0, 1] 映射到颜色，超出范围时截断，NaN 返回 MISSING_COLOR
    pub fn color(&self, t: f64) -> RGBColor {
        if t.is_nan() {
            return MISSING_COLOR;
        }
        let t = t.clamp(0.0, 1.0);
        let stops = self.stops();

        for pair in stops.windows(2) {
            let (t0, c0) = pair[0];
            let (t1, c1) = pair[1];
            if t <= t1 {
                let f = if t1 > t0 { (t - t0) / (t1 - t0) } else { 0.0 };
                return RGBColor(lerp(c0.0, c1.0, f), lerp(c0.1, c1.1, f), lerp(c0.2, c1.2, f));
            }
        }

        let (_, last) = stops[stops.len() - 1];
        RGBColor(last.0, last.1, last.2)
    }

    /// 在 [vmin, vmax] 内取值
    pub fn color_in_range(&self, value: f64, vmin: f64, vmax: f64) -> RGBColor {
        self.color((value - vmin) / (vmax - vmin))
    }
}

fn lerp(a: u8, b: u8, f: f64) -> u8 {
    (a as f64 + (b as f64 - a as f64) * f).round() as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_colormap_endpoints() {
        assert_eq!(ColorMap::CoolWarm.color(0.0), RGBColor(59, 76, 192));
        assert_eq!(ColorMap::CoolWarm.color(1.0), RGBColor(180, 4, 38));
        assert_eq!(ColorMap::Hot.color(1.0), RGBColor(255, 255, 255));
    }

    #[test]
    fn test_colormap_clamps_and_nan() {
        assert_eq!(ColorMap::Hot.color(-3.0), ColorMap::Hot.color(0.0));
        assert_eq!(ColorMap::Hot.color(9.0), ColorMap::Hot.color(1.0));
        assert_eq!(ColorMap::CoolWarm.color(f64::NAN), MISSING_COLOR);
    }

    #[test]
    fn test_colormap_midpoint() {
        assert_eq!(ColorMap::CoolWarm.color(0.5), RGBColor(221, 221, 221));
        assert_eq!(ColorMap::CoolWarm.color_in_range(0.0, -1.0, 1.0), RGBColor(221, 221, 221));
    }
}
