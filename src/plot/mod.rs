//! # 图表生成模块
//!
//! 使用 `plotters` 生成原子热图与 PDOS 曲线图，支持 PNG 和 SVG 输出。
//!
//! ## 子模块
//! - `colormap`: 颜色映射
//! - `heatmap`: 原子热图
//! - `dos`: 态密度曲线
//!
//! ## 依赖关系
//! - 被 `commands/` 调用

pub mod colormap;
pub mod dos;
pub mod heatmap;

pub use colormap::ColorMap;
pub use dos::{DosPlotStyle, LabeledCurve};
pub use heatmap::HeatmapStyle;

use crate::error::QpostError;
use std::path::Path;

/// 绘图后端错误转换
pub(crate) fn plot_err<E: std::fmt::Debug>(e: E) -> QpostError {
    QpostError::Plot(format!("{:?}", e))
}

/// 输出路径是否为 SVG
pub fn is_svg(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case("svg"))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_svg() {
        assert!(is_svg(Path::new("out/pdos.SVG")));
        assert!(!is_svg(Path::new("pdos.png")));
        assert!(!is_svg(Path::new("pdos")));
    }
}
