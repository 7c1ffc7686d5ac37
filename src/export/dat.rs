//! # 展宽曲线导出
//!
//! 写出两列文本：`{能量:.6}     {态密度:.6}`，每行一个网格点。
//!
//! ## 依赖关系
//! - 被 `commands/pdos.rs` 调用
//! - 使用 `models/spectrum.rs` 的 SmearedCurve

use crate::error::{QpostError, Result};
use crate::models::SmearedCurve;

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// 曲线格式化为 .dat 文本
pub fn format_dat(curve: &SmearedCurve) -> String {
    let mut out = String::with_capacity(curve.len() * 28);
    for (e, d) in curve.samples() {
        out.push_str(&format!("{:.6}     {:.6}\n", e, d));
    }
    out
}

/// 写出 .dat 文件
pub fn curve_to_dat(curve: &SmearedCurve, output_path: &Path) -> Result<()> {
    let write_err = |e| QpostError::FileWriteError {
        path: output_path.display().to_string(),
        source: e,
    };

    let file = File::create(output_path).map_err(write_err)?;
    let mut writer = BufWriter::new(file);
    writer
        .write_all(format_dat(curve).as_bytes())
        .map_err(write_err)?;
    writer.flush().map_err(write_err)?;

    Ok(())
}
