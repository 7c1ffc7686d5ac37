//! # XYZ 格式解析器
//!
//! 支持单帧结构文件和多帧轨迹（如 CP2K 的 `*-pos-1.xyz`）。
//!
//! ## 格式说明
//! ```text
//! N
//! comment line
//! El x y z
//! ... (N 行)
//! N
//! comment line
//! ...
//! ```
//!
//! ## 依赖关系
//! - 被 `commands/displace.rs`, `commands/bond.rs` 使用
//! - 使用 `models/structure.rs`

use crate::error::{QpostError, Result};
use crate::models::{Atom, Frame};
use std::fs;
use std::path::Path;

/// 解析 XYZ 文件中的全部帧
pub fn parse_xyz_file(path: &Path) -> Result<Vec<Frame>> {
    let content = fs::read_to_string(path).map_err(|e| QpostError::FileReadError {
        path: path.display().to_string(),
        source: e,
    })?;

    parse_xyz_content(&content, &path.display().to_string())
}

/// 从字符串内容解析全部帧
pub fn parse_xyz_content(content: &str, source_name: &str) -> Result<Vec<Frame>> {
    let err = |line: usize, reason: String| QpostError::ParseError {
        format: "xyz".to_string(),
        path: source_name.to_string(),
        reason: format!("line {}: {}", line, reason),
    };

    let lines: Vec<&str> = content.lines().collect();
    let mut frames = Vec::new();
    let mut i = 0;

    while i < lines.len() {
        let count_line = lines[i].trim();
        if count_line.is_empty() {
            i += 1;
            continue;
        }

        let count: usize = count_line
            .parse()
            .map_err(|_| err(i + 1, format!("expected atom count, found '{}'", count_line)))?;

        let comment = lines
            .get(i + 1)
            .map(|s| s.trim().to_string())
            .unwrap_or_default();

        let remaining = lines.len().saturating_sub(i + 2);
        let end = match (i + 2).checked_add(count) {
            Some(end) if end <= lines.len() => end,
            _ => {
                return Err(err(
                    i + 1,
                    format!(
                        "frame declares {} atoms but only {} lines remain",
                        count, remaining
                    ),
                ))
            }
        };

        let mut atoms = Vec::with_capacity(count.min(remaining));
        for (offset, line) in lines[i + 2..end].iter().enumerate() {
            let line_no = i + 3 + offset;
            let parts: Vec<&str> = line.split_whitespace().collect();
            if parts.len() < 4 {
                return Err(err(line_no, "expected 'element x y z'".to_string()));
            }

            let mut position = [0.0; 3];
            for (k, field) in parts[1..4].iter().enumerate() {
                position[k] = field
                    .parse()
                    .map_err(|_| err(line_no, format!("invalid coordinate '{}'", field)))?;
            }
            atoms.push(Atom::new(parts[0], position));
        }

        frames.push(Frame::new(comment, atoms));
        i = end;
    }

    if frames.is_empty() {
        return Err(QpostError::ParseError {
            format: "xyz".to_string(),
            path: source_name.to_string(),
            reason: "No frames found".to_string(),
        });
    }

    Ok(frames)
}

/// 按索引选择帧，负数从末尾计数（-1 为最后一帧）
pub fn select_frame(frames: Vec<Frame>, index: i64) -> Result<Frame> {
    let count = frames.len();
    let resolved = if index < 0 {
        count as i64 + index
    } else {
        index
    };

    if resolved < 0 || resolved as usize >= count {
        return Err(QpostError::FrameOutOfRange { index, count });
    }

    frames
        .into_iter()
        .nth(resolved as usize)
        .ok_or(QpostError::FrameOutOfRange { index, count })
}

/// 读取文件并选择一帧
pub fn read_frame(path: &Path, index: i64) -> Result<Frame> {
    select_frame(parse_xyz_file(path)?, index)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TRAJ: &str = r#"3
 i =        0, time =        0.000, E =      -100.0
  W         0.0000000000        0.0000000000        0.0000000000
  S         1.5900000000        0.9200000000        1.5600000000
  S         1.5900000000        0.9200000000       -1.5600000000
3
 i =        1, time =        0.500, E =      -100.1
  W         0.0100000000        0.0000000000        0.0000000000
  S         1.6000000000        0.9200000000        1.5600000000
  S         1.6000000000        0.9200000000       -1.5600000000
"#;

    #[test]
    fn test_parse_multiframe() {
        let frames = parse_xyz_content(TRAJ, "traj.xyz").unwrap();
        assert_eq!(frames.len(), 2);
        assert_eq!(frames[0].atoms.len(), 3);
        assert!(frames[1].comment.starts_with("i =        1"));
        assert_eq!(frames[1].atoms[0].element, "W");
        assert!((frames[1].atoms[0].position[0] - 0.01).abs() < 1e-12);
    }

    #[test]
    fn test_select_frame_negative_index() {
        let frames = parse_xyz_content(TRAJ, "traj.xyz").unwrap();
        let last = select_frame(frames.clone(), -1).unwrap();
        assert!((last.atoms[1].position[0] - 1.6).abs() < 1e-12);

        let first = select_frame(frames.clone(), 0).unwrap();
        assert_eq!(first.atoms[1].position[0], 1.59);

        assert!(select_frame(frames.clone(), 2).is_err());
        assert!(select_frame(frames, -3).is_err());
    }

    #[test]
    fn test_truncated_frame() {
        let content = "3\ncomment\nW 0 0 0\nS 1 1 1\n";
        assert!(parse_xyz_content(content, "bad.xyz").is_err());
    }

    #[test]
    fn test_huge_atom_count() {
        let content = format!("{}\ncomment\nW 0 0 0\n", usize::MAX - 1);
        let err = parse_xyz_content(&content, "huge.xyz").unwrap_err();
        assert!(err.to_string().contains("only 1 lines remain"));
    }

    #[test]
    fn test_invalid_coordinate() {
        let content = "1\ncomment\nW 0 x 0\n";
        let err = parse_xyz_content(content, "bad.xyz").unwrap_err();
        assert!(err.to_string().contains("line 3"));
    }

    #[test]
    fn test_empty_file() {
        assert!(parse_xyz_content("\n\n", "empty.xyz").is_err());
    }
}
