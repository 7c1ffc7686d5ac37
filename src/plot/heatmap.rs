//! # 原子热图
//!
//! 从 +z 方向俯视的原子散点图，颜色表示逐原子数值（电荷差、位移、键长），
//! 右侧绘制色条。z 较大的原子后绘制，覆盖在上层。
//!
//! ## 依赖关系
//! - 被 `commands/charge.rs`, `commands/displace.rs` 调用
//! - 使用 `plot/colormap.rs`
//! - 使用 `plotters` 渲染图表

use crate::error::Result;
use crate::plot::colormap::{ColorMap, MISSING_COLOR};
use crate::plot::{is_svg, plot_err};

use plotters::coord::Shift;
use plotters::prelude::*;
use std::path::Path;

/// 色条区域宽度（像素）
const COLORBAR_WIDTH: u32 = 170;

/// 热图样式
#[derive(Debug, Clone)]
pub struct HeatmapStyle {
    pub width: u32,
    pub height: u32,
    pub colormap: ColorMap,
    pub colorbar_label: String,
    pub title: Option<String>,
    /// 原子半径（像素）
    pub marker_size: u32,
}

/// 数值范围，忽略 NaN/inf；退化时向两侧扩展
pub fn value_range(values: &[f64]) -> (f64, f64) {
    let finite = values.iter().copied().filter(|v| v.is_finite());
    let (min, max) = finite.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    });

    if !min.is_finite() {
        (0.0, 1.0)
    } else if max - min < 1e-12 {
        (min - 0.5, max + 0.5)
    } else {
        (min, max)
    }
}

/// 生成原子热图 (PNG/SVG 由扩展名决定)
pub fn generate_atom_heatmap(
    positions: &[[f64; 3]],
    values: &[f64],
    output_path: &Path,
    style: &HeatmapStyle,
) -> Result<()> {
    if is_svg(output_path) {
        let root = SVGBackend::new(output_path, (style.width, style.height)).into_drawing_area();
        draw_heatmap(&root, positions, values, style)?;
        root.present().map_err(plot_err)?;
    } else {
        let root = BitMapBackend::new(output_path, (style.width, style.height)).into_drawing_area();
        draw_heatmap(&root, positions, values, style)?;
        root.present().map_err(plot_err)?;
    }
    Ok(())
}

fn draw_heatmap<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    positions: &[[f64; 3]],
    values: &[f64],
    style: &HeatmapStyle,
) -> Result<()>
where
    DB::ErrorType: 'static,
{
    root.fill(&WHITE).map_err(plot_err)?;

    let split = style.width.saturating_sub(COLORBAR_WIDTH);
    let (main_area, bar_area) = root.split_horizontally(split);

    let (vmin, vmax) = value_range(values);
    let (x_range, y_range) = xy_extent(positions);

    let mut builder = ChartBuilder::on(&main_area);
    builder
        .margin(30)
        .x_label_area_size(50)
        .y_label_area_size(60);
    if let Some(title) = &style.title {
        builder.caption(title, ("sans-serif", 26).into_font());
    }
    let mut chart = builder
        .build_cartesian_2d(x_range.0..x_range.1, y_range.0..y_range.1)
        .map_err(plot_err)?;

    chart
        .configure_mesh()
        .disable_mesh()
        .x_desc("X (Å)")
        .y_desc("Y (Å)")
        .x_label_style(("sans-serif", 16))
        .y_label_style(("sans-serif", 16))
        .axis_desc_style(("sans-serif", 18))
        .draw()
        .map_err(plot_err)?;

    // 按 z 升序绘制
    let mut order: Vec<usize> = (0..positions.len().min(values.len())).collect();
    order.sort_by(|&a, &b| positions[a][2].total_cmp(&positions[b][2]));

    let size = style.marker_size as i32;
    chart
        .draw_series(
            order
                .iter()
                .filter(|&&i| positions[i][0].is_finite() && positions[i][1].is_finite())
                .map(|&i| {
                    let color = if values[i].is_finite() {
                        style.colormap.color_in_range(values[i], vmin, vmax)
                    } else {
                        MISSING_COLOR
                    };
                    EmptyElement::at((positions[i][0], positions[i][1]))
                        + Circle::new((0, 0), size, color.filled())
                        + Circle::new((0, 0), size, BLACK.stroke_width(1))
                }),
        )
        .map_err(plot_err)?;

    draw_colorbar(&bar_area, style, vmin, vmax)
}

/// 绘制色条
fn draw_colorbar<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    style: &HeatmapStyle,
    vmin: f64,
    vmax: f64,
) -> Result<()>
where
    DB::ErrorType: 'static,
{
    let mut bar = ChartBuilder::on(area)
        .margin_top(80)
        .margin_bottom(80)
        .margin_right(20)
        .y_label_area_size(70)
        .build_cartesian_2d(0.0..1.0, vmin..vmax)
        .map_err(plot_err)?;

    bar.configure_mesh()
        .disable_mesh()
        .disable_x_axis()
        .y_desc(style.colorbar_label.as_str())
        .y_label_style(("sans-serif", 14))
        .axis_desc_style(("sans-serif", 16))
        .draw()
        .map_err(plot_err)?;

    let steps = 128;
    let dv = (vmax - vmin) / steps as f64;
    bar.draw_series((0..steps).map(|k| {
        let lo = vmin + k as f64 * dv;
        let color = style.colormap.color((k as f64 + 0.5) / steps as f64);
        Rectangle::new([(0.0, lo), (1.0, lo + dv)], color.filled())
    }))
    .map_err(plot_err)?;

    Ok(())
}

/// XY 范围，两侧各留 1 Å
fn xy_extent(positions: &[[f64; 3]]) -> ((f64, f64), (f64, f64)) {
    let xs: Vec<f64> = positions.iter().map(|p| p[0]).collect();
    let ys: Vec<f64> = positions.iter().map(|p| p[1]).collect();
    let (x0, x1) = value_range(&xs);
    let (y0, y1) = value_range(&ys);
    ((x0 - 1.0, x1 + 1.0), (y0 - 1.0, y1 + 1.0))
}
