//! # 两列 .dat 曲线解析器
//!
//! 读取 `pdos smear` 写出的 (能量, 态密度) 数据，空行和 `#` 注释行被忽略。
//!
//! ## 依赖关系
//! - 被 `commands/pdos.rs` 使用
//! - 使用 `models/spectrum.rs`

use crate::error::{QpostError, Result};
use crate::models::SmearedCurve;
use std::fs;
use std::path::Path;

/// 解析 .dat 文件
pub fn parse_dat_file(path: &Path) -> Result<SmearedCurve> {
    let content = fs::read_to_string(path).map_err(|e| QpostError::FileReadError {
        path: path.display().to_string(),
        source: e,
    })?;

    parse_dat_content(&content, &path.display().to_string())
}

/// 从字符串内容解析两列数据
pub fn parse_dat_content(content: &str, source_name: &str) -> Result<SmearedCurve> {
    let mut samples = Vec::new();

    for (i, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let parts: Vec<&str> = line.split_whitespace().collect();
        let parsed = match parts.as_slice() {
            [x, y, ..] => x.parse::<f64>().ok().zip(y.parse::<f64>().ok()),
            _ => None,
        };

        match parsed {
            Some(sample) => samples.push(sample),
            None => {
                return Err(QpostError::ParseError {
                    format: "dat".to_string(),
                    path: source_name.to_string(),
                    reason: format!("line {}: expected two numeric columns", i + 1),
                })
            }
        }
    }

    Ok(SmearedCurve::from_samples(&samples))
}
