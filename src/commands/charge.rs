//! # charge 子命令实现
//!
//! 对缺陷结构中的每个原子，在参考结构中找到最近的原子，输出 Bader 电荷差
//! (defective - reference)，并绘制俯视热图。
//!
//! ## 依赖关系
//! - 使用 `cli/charge.rs` 定义的参数
//! - 使用 `parsers/bader.rs`, `analysis/nearest.rs`
//! - 使用 `plot/heatmap.rs`, `export/table.rs`

use crate::analysis::units::BOHR_TO_ANGSTROM;
use crate::analysis::{match_nearest, normalize, MatchMode};
use crate::cli::charge::{ChargeArgs, CoordinateUnit};
use crate::commands::report;
use crate::error::Result;
use crate::export::{self, AtomValueRow};
use crate::models::PointSet;
use crate::parsers::bader;
use crate::plot::{heatmap, ColorMap, HeatmapStyle};
use crate::utils::{output, progress};

use std::path::Path;

/// 执行 charge 命令
pub fn execute(args: ChargeArgs) -> Result<()> {
    output::print_header("Bader Charge Difference");

    let reference = load_bader(&args.reference, args.unit)?;
    let defective = load_bader(&args.defective, args.unit)?;

    output::print_success(&format!(
        "Loaded reference '{}' ({} atoms) and defective '{}' ({} atoms)",
        args.reference.display(),
        reference.len(),
        args.defective.display(),
        defective.len()
    ));
    if reference.is_empty() {
        output::print_warning("Reference table has no atoms, every charge difference is undefined");
    }
    if args.unit == CoordinateUnit::Bohr {
        output::print_info(&format!(
            "Coordinates converted from Bohr (x {})",
            BOHR_TO_ANGSTROM
        ));
    }

    let mut values = match_nearest(&reference, &defective, MatchMode::AttributeDifference);
    report::print_statistics(&values, "Charge difference (e)");

    let label = if args.normalize {
        values = normalize(&values);
        output::print_info("Charge differences normalized to [0, 1]");
        "Normalized Charge Difference"
    } else {
        "Charge Difference (e)"
    };

    let rows: Vec<AtomValueRow> = defective
        .records()
        .iter()
        .zip(&values)
        .enumerate()
        .map(|(i, (r, v))| AtomValueRow::new(i + 1, "-", r.position, *v))
        .collect();

    report::print_top_atoms(&rows, 10, "charge difference");

    if let Some(csv_path) = &args.csv {
        export::table::rows_to_csv(&rows, "charge_difference", csv_path)?;
        output::print_success(&format!("Per-atom results saved to '{}'", csv_path.display()));
    }

    if !args.no_plot {
        let style = HeatmapStyle {
            width: args.width,
            height: args.height,
            colormap: ColorMap::CoolWarm,
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

/// 读取 Bader 表并换算为 Å
fn load_bader(path: &Path, unit: CoordinateUnit) -> Result<PointSet> {
    let set = bader::parse_bader_file(path)?;
    Ok(match unit {
        CoordinateUnit::Bohr => set.scaled(BOHR_TO_ANGSTROM),
        CoordinateUnit::Angstrom => set,
    })
}
