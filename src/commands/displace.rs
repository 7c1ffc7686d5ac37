//! # displace 子命令实现
//!
//! 缺陷结构与参考结构原子数可以不同（空位、间隙），因此每个缺陷结构原子
//! 的位移取其到参考结构中最近原子的距离。
//!
//! ## 依赖关系
//! - 使用 `cli/displace.rs` 定义的参数
//! - 使用 `parsers/xyz.rs`, `analysis/nearest.rs`
//! - 使用 `plot/heatmap.rs`, `export/table.rs`

use crate::analysis::{match_nearest, normalize, MatchMode};
use crate::cli::displace::DisplaceArgs;
use crate::commands::report;
use crate::error::Result;
use crate::export::{self, AtomValueRow};
use crate::parsers::xyz;
use crate::plot::{heatmap, ColorMap, HeatmapStyle};
use crate::utils::{output, progress};

/// 执行 displace 命令
pub fn execute(args: DisplaceArgs) -> Result<()> {
    output::print_header("Atomic Displacement");

    let reference = xyz::read_frame(&args.reference, args.frame)?;
    let defective = xyz::read_frame(&args.defective, args.frame)?;

    output::print_success(&format!(
        "Loaded reference {} ({} atoms) and defective {} ({} atoms)",
        reference.formula(),
        reference.atoms.len(),
        defective.formula(),
        defective.atoms.len()
    ));
    if reference.atoms.len() != defective.atoms.len() {
        output::print_info("Atom counts differ, matching each atom to its nearest reference atom");
    }

    let mut values = match_nearest(
        &reference.to_point_set(),
        &defective.to_point_set(),
        MatchMode::Displacement,
    );
    report::print_statistics(&values, "Displacement (Å)");

    let label = if args.normalize {
        values = normalize(&values);
        output::print_info("Displacements normalized to [0, 1]");
        "Normalized Displacement"
    } else {
        "Displacement (Å)"
    };

    let rows: Vec<AtomValueRow> = defective
        .atoms
        .iter()
        .zip(&values)
        .enumerate()
        .map(|(i, (a, v))| AtomValueRow::new(i + 1, a.element.as_str(), a.position, *v))
        .collect();

    report::print_top_atoms(&rows, 10, "displacement");

    if let Some(csv_path) = &args.csv {
        export::table::rows_to_csv(&rows, "displacement", csv_path)?;
        output::print_success(&format!("Per-atom results saved to '{}'", csv_path.display()));
    }

    if !args.no_plot {
        let style = HeatmapStyle {
            width: args.width,
            height: args.height,
            colormap: ColorMap::Hot,
            colorbar_label: label.to_string(),
            title: None,
            marker_size: args.marker_size,
        };
        let spinner = progress::create_spinner("Rendering heat map");
        let result =
            heatmap::generate_atom_heatmap(&defective.positions(), &values, &args.output, &style);
        spinner.finish_and_clear();
        result?;
        output::print_success(&format!("Heat map saved to '{}'", args.output.display()));
    }

    Ok(())
}
