//! # 逐原子结果导出
//!
//! 将电荷差、位移或键长按原子写成 CSV（index, element, x, y, z, value）。
//! NaN/inf 原样写出，由下游决定如何处理。
//!
//! ## 依赖关系
//! - 被 `commands/charge.rs`, `commands/displace.rs`, `commands/bond.rs` 调用
//! - 使用 `csv` + `serde` 写入

use crate::error::{QpostError, Result};

use serde::Serialize;
use std::path::Path;

/// 单个原子的结果行
#[derive(Debug, Clone, Serialize)]
pub struct AtomValueRow {
    /// 1 起始的原子序号
    pub index: usize,
    pub element: String,
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub value: f64,
}

impl AtomValueRow {
    pub fn new(index: usize, element: impl Into<String>, position: [f64; 3], value: f64) -> Self {
        Self {
            index,
            element: element.into(),
            x: position[0],
            y: position[1],
            z: position[2],
            value,
        }
    }
}

/// 写出 CSV，`value_name` 作为最后一列的列名
pub fn rows_to_csv(rows: &[AtomValueRow], value_name: &str, output_path: &Path) -> Result<()> {
    let mut wtr = csv::Writer::from_path(output_path)?;
    write_rows(&mut wtr, rows, value_name)?;
    wtr.flush().map_err(|e| QpostError::FileWriteError {
        path: output_path.display().to_string(),
        source: e,
    })?;
    Ok(())
}

fn write_rows<W: std::io::Write>(
    wtr: &mut csv::Writer<W>,
    rows: &[AtomValueRow],
    value_name: &str,
) -> Result<()> {
    wtr.write_record(["index", "element", "x", "y", "z", value_name])?;
    for row in rows {
        wtr.write_record(&[
            row.index.to_string(),
            row.element.clone(),
            format!("{:.6}", row.x),
            format!("{:.6}", row.y),
            format!("{:.6}", row.z),
            format!("{:.6}", row.value),
        ])?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_csv_layout() {
        let rows = vec![
            AtomValueRow::new(1, "W", [0.0, 0.5, 1.0], 0.25),
            AtomValueRow::new(2, "S", [1.0, 1.0, 1.0], f64::NAN),
        ];

        let mut wtr = csv::Writer::from_writer(Vec::new());
        write_rows(&mut wtr, &rows, "charge_diff").unwrap();
        let text = String::from_utf8(wtr.into_inner().unwrap()).unwrap();

        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "index,element,x,y,z,charge_diff");
        assert_eq!(lines[1], "1,W,0.000000,0.500000,1.000000,0.250000");
        assert_eq!(lines[2], "2,S,1.000000,1.000000,1.000000,NaN");
    }
}
