//! # 态密度曲线图
//!
//! 在同一坐标系中绘制多条展宽后的 PDOS 曲线。自旋向下通道在调用方取反后传入。
//!
//! ## 依赖关系
//! - 被 `commands/pdos.rs` 调用
//! - 使用 `models/spectrum.rs` 的 SmearedCurve
//! - 使用 `plotters` 渲染图表

use crate::error::Result;
use crate::models::SmearedCurve;
use crate::plot::{is_svg, plot_err};

use plotters::coord::Shift;
use plotters::prelude::*;
use std::path::Path;

/// 调色板：相邻两条曲线（α/β）同色
pub const PALETTE: [RGBColor; 6] = [
    RGBColor(31, 119, 180),
    RGBColor(31, 119, 180),
    RGBColor(214, 39, 40),
    RGBColor(214, 39, 40),
    RGBColor(148, 103, 189),
    RGBColor(148, 103, 189),
];

/// 带图例标签的曲线
#[derive(Debug, Clone)]
pub struct LabeledCurve {
    pub label: String,
    pub curve: SmearedCurve,
}

/// 图表样式
#[derive(Debug, Clone)]
pub struct DosPlotStyle {
    pub width: u32,
    pub height: u32,
    pub x_range: (f64, f64),
    pub y_range: (f64, f64),
    pub title: Option<String>,
}

/// 第 i 条曲线的颜色
pub fn curve_color(index: usize) -> RGBColor {
    PALETTE[index % PALETTE.len()]
}

/// 生成 PDOS 图 (PNG/SVG 由扩展名决定)
pub fn generate_dos_plot(
    curves: &[LabeledCurve],
    output_path: &Path,
    style: &DosPlotStyle,
) -> Result<()> {
    if is_svg(output_path) {
        let root = SVGBackend::new(output_path, (style.width, style.height)).into_drawing_area();
        draw_dos_chart(&root, curves, style)?;
        root.present().map_err(plot_err)?;
    } else {
        let root = BitMapBackend::new(output_path, (style.width, style.height)).into_drawing_area();
        draw_dos_chart(&root, curves, style)?;
        root.present().map_err(plot_err)?;
    }
    Ok(())
}

fn draw_dos_chart<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    curves: &[LabeledCurve],
    style: &DosPlotStyle,
) -> Result<()>
where
    DB::ErrorType: 'static,
{
    root.fill(&WHITE).map_err(plot_err)?;

    let (x0, x1) = style.x_range;
    let (y0, y1) = style.y_range;

    let mut builder = ChartBuilder::on(root);
    builder
        .margin(30)
        .x_label_area_size(55)
        .y_label_area_size(60);
    if let Some(title) = &style.title {
        builder.caption(title, ("sans-serif", 26).into_font());
    }
    let mut chart = builder
        .build_cartesian_2d(x0..x1, y0..y1)
        .map_err(plot_err)?;

    chart
        .configure_mesh()
        .disable_mesh()
        .x_desc("Energy (eV)")
        .x_labels(((x1 - x0).round() as usize + 1).max(2))
        .x_label_style(("sans-serif", 20))
        .y_label_style(("sans-serif", 20))
        .axis_desc_style(("sans-serif", 22))
        .draw()
        .map_err(plot_err)?;

    for (i, labeled) in curves.iter().enumerate() {
        let color = curve_color(i);
        chart
            .draw_series(LineSeries::new(
                visible_samples(&labeled.curve, style),
                color.stroke_width(3),
            ))
            .map_err(plot_err)?
            .label(labeled.label.as_str())
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(3)));
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::LowerMiddle)
        .label_font(("sans-serif", 16))
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()
        .map_err(plot_err)?;

    Ok(())
}

/// 截取 x 范围内的采样点，y 截断到绘图范围
fn visible_samples(curve: &SmearedCurve, style: &DosPlotStyle) -> Vec<(f64, f64)> {
    let (x0, x1) = style.x_range;
    let (y0, y1) = style.y_range;
    curve
        .samples()
        .filter(|(x, y)| x.is_finite() && y.is_finite() && *x >= x0 && *x <= x1)
        .map(|(x, y)| (x, y.clamp(y0, y1)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn style() -> DosPlotStyle {
        DosPlotStyle {
            width: 800,
            height: 800,
            x_range: (-3.0, 4.0),
            y_range: (-70.0, 70.0),
            title: None,
        }
    }

    #[test]
    fn test_palette_pairs() {
        assert_eq!(curve_color(0), curve_color(1));
        assert_ne!(curve_color(1), curve_color(2));
        assert_eq!(curve_color(6), curve_color(0));
    }

    #[test]
    fn test_visible_samples_window() {
        let curve = SmearedCurve::from_samples(&[
            (-5.0, 1.0),
            (-3.0, 100.0),
            (0.0, f64::NAN),
            (1.0, -90.0),
            (4.5, 2.0),
        ]);
        let pts = visible_samples(&curve, &style());
        assert_eq!(pts, vec![(-3.0, 70.0), (1.0, -70.0)]);
    }
}
