//! # CP2K .pdos 格式解析器
//!
//! ## 格式说明
//! ```text
//! # Projected DOS for atomic kind W at iteration step i = 0, E(Fermi) =    -0.123456 a.u.
//! #     MO Eigenvalue [a.u.]      Occupation                 s                py ...
//!        1      -2.99178839        2.00000000        0.00123 ...
//! ```
//!
//! 第一行给出原子种类（或原子列表编号）、迭代步与费米能级；
//! 第二行 `Occupation` 之后为轨道名称。
//!
//! ## 依赖关系
//! - 被 `commands/pdos.rs` 使用
//! - 使用 `models/spectrum.rs`
//! - 使用 `regex` 解析表头

use crate::error::{QpostError, Result};
use crate::models::{PdosData, PdosRow};
use regex::Regex;
use std::fs;
use std::path::Path;

/// 解析 .pdos 文件
pub fn parse_pdos_file(path: &Path) -> Result<PdosData> {
    let content = fs::read_to_string(path).map_err(|e| QpostError::FileReadError {
        path: path.display().to_string(),
        source: e,
    })?;

    parse_pdos_content(&content, &path.display().to_string())
}

/// 从字符串内容解析 .pdos
pub fn parse_pdos_content(content: &str, source_name: &str) -> Result<PdosData> {
    let err = |reason: String| QpostError::ParseError {
        format: "pdos".to_string(),
        path: source_name.to_string(),
        reason,
    };

    let mut lines = content.lines();
    let first = lines
        .next()
        .ok_or_else(|| err("Missing header line".to_string()))?;
    let second = lines
        .next()
        .ok_or_else(|| err("Missing column header line".to_string()))?;

    let (atom_kind, iteration_step, fermi_energy) = parse_header(first).map_err(err)?;
    let orbitals = parse_orbital_names(second);

    let mut rows = Vec::new();
    for (offset, line) in lines.enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let line_no = offset + 3;

        let values: Vec<f64> = line
            .split_whitespace()
            .skip(1) // MO 序号
            .map(|s| s.parse::<f64>())
            .collect::<std::result::Result<_, _>>()
            .map_err(|_| err(format!("line {}: invalid number", line_no)))?;

        if values.len() < 2 {
            return Err(err(format!(
                "line {}: expected eigenvalue and occupation",
                line_no
            )));
        }

        rows.push(PdosRow {
            eigenvalue: values[0],
            occupation: values[1],
            projections: values[2..].to_vec(),
        });
    }

    if rows.is_empty() {
        return Err(err("No eigenvalue rows found".to_string()));
    }

    Ok(PdosData {
        atom_kind,
        iteration_step,
        fermi_energy,
        orbitals,
        rows,
    })
}

/// 解析第一行表头: (原子种类, 迭代步, 费米能级 a.u.)
fn parse_header(line: &str) -> std::result::Result<(String, Option<i64>, f64), String> {
    let kind_re = Regex::new(r"(?:kind|list)\s+(\S+)").map_err(|e| e.to_string())?;
    let step_re = Regex::new(r"step\s+i\s*=\s*(-?\d+)").map_err(|e| e.to_string())?;
    let fermi_re = Regex::new(r"E\(Fermi\)\s*=\s*([-+0-9.EeDd]+)").map_err(|e| e.to_string())?;

    let atom_kind = kind_re
        .captures(line)
        .map(|c| c[1].to_string())
        .unwrap_or_else(|| "unknown".to_string());

    let iteration_step = step_re.captures(line).and_then(|c| c[1].parse().ok());

    let fermi_energy = fermi_re
        .captures(line)
        .and_then(|c| c[1].replace(['D', 'd'], "E").parse::<f64>().ok())
        .ok_or_else(|| format!("No Fermi energy in header: '{}'", line.trim()))?;

    Ok((atom_kind, iteration_step, fermi_energy))
}

/// 解析第二行中的轨道名称
fn parse_orbital_names(line: &str) -> Vec<String> {
    let parts: Vec<&str> = line.split_whitespace().collect();
    match parts.iter().position(|p| p.eq_ignore_ascii_case("Occupation")) {
        Some(pos) => parts[pos + 1..].iter().map(|s| s.to_string()).collect(),
        None => parts.iter().skip(5).map(|s| s.to_string()).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PDOS: &str = r#"# Projected DOS for atomic kind W at iteration step i = 12, E(Fermi) =    -0.150000 a.u.
#     MO Eigenvalue [a.u.]      Occupation                 s                py                pz                px
       1      -0.30000000        2.00000000        0.10000000        0.20000000        0.00000000        0.00000000
       2      -0.15000000        1.00000000        0.00000000        0.50000000        0.50000000        0.00000000
       3       0.05000000        0.00000000        0.25000000        0.00000000        0.00000000        0.25000000
"#;

    #[test]
    fn test_parse_header_fields() {
        let data = parse_pdos_content(PDOS, "W-ALPHA.pdos").unwrap();
        assert_eq!(data.atom_kind, "W");
        assert_eq!(data.iteration_step, Some(12));
        assert!((data.fermi_energy - (-0.15)).abs() < 1e-12);
        assert_eq!(data.orbitals, vec!["s", "py", "pz", "px"]);
    }

    #[test]
    fn test_parse_rows() {
        let data = parse_pdos_content(PDOS, "W-ALPHA.pdos").unwrap();
        assert_eq!(data.rows.len(), 3);
        assert!((data.rows[0].total() - 0.3).abs() < 1e-12);
        assert_eq!(data.occupied_count(), 2);

        let e = data.shifted_energies();
        assert!(e[1].abs() < 1e-12);
        assert!((e[2] - 0.2 * crate::analysis::units::HARTREE_TO_EV).abs() < 1e-9);
    }

    #[test]
    fn test_parse_atom_list_header() {
        let content = "# Projected DOS for list  2 of  atoms, at iteration step i = 0, E(Fermi) = 0.01 a.u.\n\
                       # MO Eigenvalue [a.u.] Occupation d-2 d-1 d0 d+1 d+2\n\
                       1 -0.1 2.0 0.1 0.1 0.1 0.1 0.1\n";
        let data = parse_pdos_content(content, "list2.pdos").unwrap();
        assert_eq!(data.atom_kind, "2");
        assert_eq!(data.orbitals.len(), 5);
        assert!((data.rows[0].total() - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_missing_fermi_is_error() {
        let content = "# Projected DOS for atomic kind W\n# MO Eigenvalue [a.u.] Occupation s\n1 -0.1 2.0 0.1\n";
        assert!(parse_pdos_content(content, "bad.pdos").is_err());
    }

    #[test]
    fn test_invalid_row_is_error() {
        let content = PDOS.replace("0.05000000", "oops");
        let err = parse_pdos_content(&content, "bad.pdos").unwrap_err();
        assert!(err.to_string().contains("line 5"));
    }
}
