//! 缺交写入服务 - 业务能力层
//!
//! 只负责"写 missing_answers.txt"能力，不关心流程

use crate::error::{AppError, AppResult};
use crate::reports::missing::MissingEntry;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::debug;

/// 缺交报告默认文件名
pub const MISSING_FILE_NAME: &str = "missing_answers.txt";

/// 缺交写入服务
///
/// 职责：
/// - 将缺交记录逐行写入文本文件
/// - 每次运行覆盖旧文件
pub struct WarnWriter {
    warn_file_path: PathBuf,
}

impl WarnWriter {
    /// 在输出目录下创建
    pub fn new(output_dir: &Path) -> Self {
        Self::with_path(output_dir.join(MISSING_FILE_NAME))
    }

    fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            warn_file_path: path.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.warn_file_path
    }

    /// 写入全部缺交记录
    ///
    /// # 返回
    /// 返回写入的行数
    pub fn write_all(&self, entries: &[MissingEntry]) -> AppResult<usize> {
        let path_str = self.warn_file_path.display().to_string();
        debug!("写入缺交报告: {} 条 -> {}", entries.len(), path_str);

        let mut file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(&self.warn_file_path)
            .map_err(|e| AppError::file_write_failed(&path_str, e))?;

        for entry in entries {
            writeln!(file, "{}", entry).map_err(|e| AppError::file_write_failed(&path_str, e))?;
        }

        Ok(entries.len())
    }
}
