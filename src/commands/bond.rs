//! # bond 子命令实现
//!
//! 对每个中心元素原子，计算到最近邻元素原子的距离。
//!
//! ## 依赖关系
//! - 使用 `cli/bond.rs` 定义的参数
//! - 使用 `parsers/xyz.rs`, `analysis/nearest.rs`

use crate::analysis::nearest_species_distances;
use crate::cli::bond::BondArgs;
use crate::commands::report;
use crate::error::Result;
use crate::export::{self, AtomValueRow};
use crate::parsers::xyz;
use crate::utils::output::{self, format_value};

use tabled::{Table, Tabled};

/// 执行 bond 命令
pub fn execute(args: BondArgs) -> Result<()> {
    output::print_header(&format!(
        "Nearest {}-{} Bond Distances",
        args.center, args.neighbor
    ));

    let frame = xyz::read_frame(&args.input, args.frame)?;
    output::print_success(&format!(
        "Loaded '{}': {} ({} atoms)",
        args.input.display(),
        frame.formula(),
        frame.atoms.len()
    ));

    let distances = nearest_species_distances(&frame.atoms, &args.center, &args.neighbor);

    if distances.is_empty() {
        output::print_warning(&format!(
            "No {}-{} bonds found.",
            args.center, args.neighbor
        ));
        return Ok(());
    }
    if frame.count_species(&args.neighbor) == 0 {
        output::print_warning(&format!(
            "No {} atoms in the structure, distances are reported as 'none'",
            args.neighbor
        ));
    }

    let rows: Vec<AtomValueRow> = frame
        .atoms
        .iter()
        .enumerate()
        .filter(|(_, a)| a.is_species(&args.center))
        .zip(&distances)
        .map(|((i, a), d)| AtomValueRow::new(i + 1, a.element.as_str(), a.position, *d))
        .collect();

    print_distance_table(&rows, &args.center, &args.neighbor);
    report::print_statistics(&distances, &format!("{}-{} distance (Å)", args.center, args.neighbor));

    if let Some(csv_path) = &args.csv {
        export::table::rows_to_csv(&rows, "distance", csv_path)?;
        output::print_success(&format!("Per-atom results saved to '{}'", csv_path.display()));
    }

    Ok(())
}

/// 打印全部键长
fn print_distance_table(rows: &[AtomValueRow], center: &str, neighbor: &str) {
    #[derive(Tabled)]
    struct BondRow {
        #[tabled(rename = "#")]
        index: usize,
        #[tabled(rename = "Atom")]
        element: String,
        #[tabled(rename = "Distance (Å)")]
        distance: String,
    }

    let table_rows: Vec<BondRow> = rows
        .iter()
        .map(|r| BondRow {
            index: r.index,
            element: r.element.clone(),
            distance: format_value(r.value, 6),
        })
        .collect();

    output::print_header(&format!("Nearest {}-{} bond distances (in Å)", center, neighbor));
    println!("{}", Table::new(&table_rows));
}
