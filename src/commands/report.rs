//! # 逐原子结果的终端报告
//!
//! ## 依赖关系
//! - 被 `commands/charge.rs`, `commands/displace.rs`, `commands/bond.rs` 使用
//! - 使用 `tabled` 输出表格

use crate::export::AtomValueRow;
use crate::utils::output::{self, format_value};

use tabled::{Table, Tabled};

/// 有限值统计
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Statistics {
    pub count: usize,
    pub missing: usize,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
}

impl Statistics {
    /// 统计有限值；NaN 与 inf 计入 missing
    pub fn from_values(values: &[f64]) -> Self {
        let finite: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
        let count = finite.len();
        let (min, max) = finite
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
                (lo.min(v), hi.max(v))
            });
        let mean = if count > 0 {
            finite.iter().sum::<f64>() / count as f64
        } else {
            f64::NAN
        };

        Statistics {
            count,
            missing: values.len() - count,
            min,
            max,
            mean,
        }
    }
}

/// 打印统计信息
pub fn print_statistics(values: &[f64], label: &str) {
    let stats = Statistics::from_values(values);

    output::print_info(&format!(
        "{}: {} atoms, min {}, max {}, mean {}",
        label,
        stats.count,
        format_value(stats.min, 4),
        format_value(stats.max, 4),
        format_value(stats.mean, 4)
    ));
    if stats.missing > 0 {
        output::print_warning(&format!("{} atoms without a finite value", stats.missing));
    }
}

/// 按 |value| 降序打印前 `count` 个原子
pub fn print_top_atoms(rows: &[AtomValueRow], count: usize, value_label: &str) {
    #[derive(Tabled)]
    struct AtomRow {
        #[tabled(rename = "#")]
        index: usize,
        #[tabled(rename = "Element")]
        element: String,
        #[tabled(rename = "x (Å)")]
        x: String,
        #[tabled(rename = "y (Å)")]
        y: String,
        #[tabled(rename = "z (Å)")]
        z: String,
        #[tabled(rename = "Value")]
        value: String,
    }

    let table_rows: Vec<AtomRow> = top_by_magnitude(rows, count)
        .into_iter()
        .map(|r| AtomRow {
            index: r.index,
            element: r.element.clone(),
            x: format!("{:.3}", r.x),
            y: format!("{:.3}", r.y),
            z: format!("{:.3}", r.z),
            value: format_value(r.value, 4),
        })
        .collect();

    if !table_rows.is_empty() {
        output::print_header(&format!("Top {} Atoms by |{}|", table_rows.len(), value_label));
        println!("{}", Table::new(&table_rows));
    }
}

/// 有限值按绝对值降序，取前 count 个
fn top_by_magnitude(rows: &[AtomValueRow], count: usize) -> Vec<&AtomValueRow> {
    let mut sorted: Vec<&AtomValueRow> = rows.iter().filter(|r| r.value.is_finite()).collect();
    sorted.sort_by(|a, b| b.value.abs().total_cmp(&a.value.abs()));
    sorted.truncate(count);
    sorted
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_statistics_skip_missing() {
        let stats = Statistics::from_values(&[1.0, f64::NAN, 3.0, f64::INFINITY, -1.0]);
        assert_eq!(stats.count, 3);
        assert_eq!(stats.missing, 2);
        assert_eq!(stats.min, -1.0);
        assert_eq!(stats.max, 3.0);
        assert!((stats.mean - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_statistics_all_missing() {
        let stats = Statistics::from_values(&[f64::NAN]);
        assert_eq!(stats.count, 0);
        assert!(stats.mean.is_nan());
    }

    #[test]
    fn test_top_by_magnitude() {
        let rows = vec![
            AtomValueRow::new(1, "W", [0.0; 3], 0.1),
            AtomValueRow::new(2, "S", [0.0; 3], -0.9),
            AtomValueRow::new(3, "S", [0.0; 3], f64::NAN),
            AtomValueRow::new(4, "S", [0.0; 3], 0.5),
        ];
        let top: Vec<usize> = top_by_magnitude(&rows, 2).iter().map(|r| r.index).collect();
        assert_eq!(top, vec![2, 4]);
    }
}
