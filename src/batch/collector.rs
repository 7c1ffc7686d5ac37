//! # 文件收集器
//!
//! 根据输入路径和模式收集待处理文件列表。
//!
//! ## 功能
//! - 支持文件与目录混合输入
//! - glob 模式匹配（逗号分隔多模式）
//! - 递归目录搜索
//!
//! ## 依赖关系
//! - 被 `commands/pdos.rs` 调用
//! - 使用 `walkdir` 遍历目录，`glob` 匹配文件名

use crate::error::{QpostError, Result};

use glob::Pattern;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// 文件收集器
pub struct FileCollector {
    /// 输入路径（文件或目录）
    inputs: Vec<PathBuf>,
    /// 匹配模式列表（仅作用于目录中的文件）
    patterns: Vec<Pattern>,
    /// 是否递归
    recursive: bool,
}

impl FileCollector {
    /// 创建新的文件收集器
    pub fn new(inputs: Vec<PathBuf>) -> Self {
        Self {
            inputs,
            patterns: Vec::new(),
            recursive: false,
        }
    }

    /// 设置匹配模式（逗号分隔的多模式）
    pub fn with_pattern(mut self, pattern: &str) -> Result<Self> {
        self.patterns = pattern
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| {
                Pattern::new(s).map_err(|e| {
                    QpostError::InvalidArgument(format!("Invalid glob pattern '{}': {}", s, e))
                })
            })
            .collect::<Result<_>>()?;
        Ok(self)
    }

    /// 设置是否递归搜索
    pub fn recursive(mut self, recursive: bool) -> Self {
        self.recursive = recursive;
        self
    }

    /// 收集所有文件
    ///
    /// 直接给出的文件总是保留（由调用方决定是否跳过），
    /// 目录中的文件需要匹配模式。不存在的路径返回错误。
    pub fn collect(&self) -> Result<Vec<PathBuf>> {
        let mut files = Vec::new();

        for input in &self.inputs {
            if input.is_file() {
                files.push(input.clone());
            } else if input.is_dir() {
                let mut found = self.collect_dir(input);
                found.sort();
                files.extend(found);
            } else {
                return Err(QpostError::FileNotFound {
                    path: input.display().to_string(),
                });
            }
        }

        Ok(files)
    }

    fn collect_dir(&self, dir: &Path) -> Vec<PathBuf> {
        let max_depth = if self.recursive { usize::MAX } else { 1 };

        WalkDir::new(dir)
            .max_depth(max_depth)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
            .filter(|e| self.matches_patterns(e.path()))
            .map(|e| e.path().to_path_buf())
            .collect()
    }

    /// 检查文件名是否匹配任一模式（未设置模式时全部匹配）
    fn matches_patterns(&self, path: &Path) -> bool {
        if self.patterns.is_empty() {
            return true;
        }
        let filename = match path.file_name().and_then(|n| n.to_str()) {
            Some(name) => name,
            None => return false,
        };
        self.patterns.iter().any(|p| p.matches(filename))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pattern_matching() {
        let collector = FileCollector::new(vec![])
            .with_pattern("*.pdos, *-BETA*.dat")
            .unwrap();
        assert!(collector.matches_patterns(Path::new("dir/W-ALPHA_k1-1.pdos")));
        assert!(collector.matches_patterns(Path::new("S-BETA_k2.dat")));
        assert!(!collector.matches_patterns(Path::new("S-ALPHA_k2.dat")));
    }

    #[test]
    fn test_empty_pattern_matches_all() {
        let collector = FileCollector::new(vec![]).with_pattern(" , ").unwrap();
        assert!(collector.matches_patterns(Path::new("anything.txt")));
    }

    #[test]
    fn test_invalid_pattern() {
        assert!(FileCollector::new(vec![]).with_pattern("[").is_err());
    }

    #[test]
    fn test_missing_input() {
        let collector = FileCollector::new(vec![PathBuf::from("/nonexistent/qpost/input.pdos")]);
        assert!(matches!(
            collector.collect(),
            Err(QpostError::FileNotFound { .. })
        ));
    }
}
