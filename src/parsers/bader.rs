//! # Bader 电荷表解析器
//!
//! 解析 Bader 分析输出的 ACF.dat 风格表格。
//!
//! ## 格式说明
//! ```text
//!     #         X           Y           Z       CHARGE      MIN DIST   ATOMIC VOL
//!  --------------------------------------------------------------------------------
//!     1    0.000000    0.000000    0.000000    5.123456     1.234567    12.345678
//!     2    ...
//!  --------------------------------------------------------------------------------
//!     VACUUM CHARGE:               0.0000
//!     VACUUM VOLUME:               0.0000
//!     NUMBER OF ELECTRONS:        42.0000
//! ```
//!
//! 首行为表头；少于 5 列的行（分隔线、尾部统计）被跳过。
//! 无法解析的数值字段记为 NaN，该行保留。
//!
//! ## 依赖关系
//! - 被 `commands/charge.rs` 使用
//! - 使用 `models/points.rs`

use crate::error::{QpostError, Result};
use crate::models::{PointRecord, PointSet};
use std::fs;
use std::path::Path;

/// 解析 Bader 电荷文件，坐标保持文件中的单位
pub fn parse_bader_file(path: &Path) -> Result<PointSet> {
    let content = fs::read_to_string(path).map_err(|e| QpostError::FileReadError {
        path: path.display().to_string(),
        source: e,
    })?;

    parse_bader_content(&content, &path.display().to_string())
}

/// 从字符串内容解析 Bader 电荷表
pub fn parse_bader_content(content: &str, source_name: &str) -> Result<PointSet> {
    let records: Vec<PointRecord> = content
        .lines()
        .filter(|l| !l.trim().is_empty())
        .skip(1) // 表头
        .filter_map(|line| {
            let parts: Vec<&str> = line.split_whitespace().collect();
            if parts.len() < 5 || is_separator(parts[0]) {
                return None;
            }
            Some(PointRecord::new(
                [
                    coerce(parts[1]),
                    coerce(parts[2]),
                    coerce(parts[3]),
                ],
                coerce(parts[4]),
            ))
        })
        .collect();

    if records.is_empty() {
        return Err(QpostError::ParseError {
            format: "bader".to_string(),
            path: source_name.to_string(),
            reason: "No atom rows found".to_string(),
        });
    }

    Ok(PointSet::new(records))
}

/// 数值字段解析，失败时为 NaN
fn coerce(field: &str) -> f64 {
    field.parse().unwrap_or(f64::NAN)
}

fn is_separator(token: &str) -> bool {
    token.starts_with("--") || token.starts_with("==")
}

#[cfg(test)]
mod tests {
    use super::*;

    const ACF: &str = r#"    #         X           Y           Z       CHARGE      MIN DIST   ATOMIC VOL
 --------------------------------------------------------------------------------
    1    0.000000    0.000000    0.000000    5.500000     1.234567    12.345678
    2    1.889726    0.000000    0.000000    6.250000     1.100000    10.000000
    3    0.000000    abc         0.000000    4.000000     1.100000    10.000000
 --------------------------------------------------------------------------------
    VACUUM CHARGE:               0.0000
    VACUUM VOLUME:               0.0000
    NUMBER OF ELECTRONS:        15.7500
"#;

    #[test]
    fn test_parse_acf_table() {
        let set = parse_bader_content(ACF, "ACF.dat").unwrap();
        assert_eq!(set.len(), 3);

        let r = set.records()[1];
        assert!((r.position[0] - 1.889726).abs() < 1e-12);
        assert!((r.attribute - 6.25).abs() < 1e-12);
    }

    #[test]
    fn test_malformed_field_is_nan() {
        let set = parse_bader_content(ACF, "ACF.dat").unwrap();
        let r = set.records()[2];
        assert!(r.position[1].is_nan());
        assert_eq!(r.attribute, 4.0);
    }

    #[test]
    fn test_bohr_conversion() {
        let set = parse_bader_content(ACF, "ACF.dat")
            .unwrap()
            .scaled(crate::analysis::units::BOHR_TO_ANGSTROM);
        // 1.889726 Bohr ≈ 1 Å
        assert!((set.records()[1].position[0] - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_header_only_is_error() {
        let content = "  #  X  Y  Z  CHARGE\n ------------\n";
        assert!(parse_bader_content(content, "empty.dat").is_err());
    }
}
