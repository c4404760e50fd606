//! 输出写入服务 - 业务能力层
//!
//! 负责把合并 notebook 和各类表格写到输出目录，以及清理上次的输出

use crate::error::{AppError, AppResult, NotebookError};
use crate::models::notebook::Document;
use crate::services::table::Table;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// 作答统计表文件名
pub const TALLY_FILE_NAME: &str = "answer_counts.csv";
/// 问卷表所在子目录
pub const POLLS_DIR_NAME: &str = "polls";

/// 输出写入服务
pub struct OutputWriter {
    output_dir: PathBuf,
}

impl OutputWriter {
    /// 创建输出目录（若不存在）
    pub fn create(output_dir: impl Into<PathBuf>) -> AppResult<Self> {
        let output_dir = output_dir.into();
        fs::create_dir_all(&output_dir)
            .map_err(|e| AppError::file_write_failed(output_dir.display().to_string(), e))?;
        Ok(Self { output_dir })
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// 删除上次生成的报告文件；不会删除其他文件
    ///
    /// # 返回
    /// 返回删除的文件数量
    pub fn clear(&self, merged_file_name: &str) -> AppResult<usize> {
        let mut removed = 0;

        for name in [merged_file_name, TALLY_FILE_NAME, super::warn_writer::MISSING_FILE_NAME] {
            let path = self.output_dir.join(name);
            if path.is_file() {
                remove_file(&path)?;
                removed += 1;
            }
        }

        let polls_dir = self.output_dir.join(POLLS_DIR_NAME);
        if polls_dir.is_dir() {
            let entries = fs::read_dir(&polls_dir)
                .map_err(|e| AppError::file_read_failed(polls_dir.display().to_string(), e))?;
            for entry in entries {
                let path = entry
                    .map_err(|e| AppError::file_read_failed(polls_dir.display().to_string(), e))?
                    .path();
                if path.extension().and_then(|s| s.to_str()) == Some("csv") {
                    remove_file(&path)?;
                    removed += 1;
                }
            }
        }

        info!("🗑️ 已清理 {} 个旧输出文件", removed);
        Ok(removed)
    }

    /// 写出 notebook
    pub fn write_document(&self, file_name: &str, document: &Document) -> AppResult<PathBuf> {
        let path = self.output_dir.join(file_name);
        let mut json = serde_json::to_string_pretty(document).map_err(NotebookError::SerializeFailed)?;
        json.push('\n');
        write_file(&path, json.as_bytes())?;
        debug!("已写出 notebook: {}", path.display());
        Ok(path)
    }

    /// 写出 CSV 表格到输出目录下的相对路径
    pub fn write_table(&self, relative_path: &Path, table: &Table) -> AppResult<PathBuf> {
        let path = self.output_dir.join(relative_path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| AppError::file_write_failed(parent.display().to_string(), e))?;
        }
        write_file(&path, table.to_csv_string().as_bytes())?;
        debug!("已写出表格: {}", path.display());
        Ok(path)
    }
}

fn write_file(path: &Path, content: &[u8]) -> AppResult<()> {
    fs::write(path, content).map_err(|e| AppError::file_write_failed(path.display().to_string(), e))
}

fn remove_file(path: &Path) -> AppResult<()> {
    fs::remove_file(path).map_err(|e| AppError::file_delete_failed(path.display().to_string(), e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::notebook::Block;

    #[test]
    fn test_clear_only_removes_reports() {
        let dir = tempfile::tempdir().unwrap();
        let writer = OutputWriter::create(dir.path().join("out")).unwrap();

        writer
            .write_document("combined.ipynb", &Document::new(vec![Block::markdown("x")]))
            .unwrap();
        writer
            .write_table(&Path::new(POLLS_DIR_NAME).join("feedback.csv"), &Table::default())
            .unwrap();
        fs::write(writer.output_dir().join("notes.md"), "keep me").unwrap();

        let removed = writer.clear("combined.ipynb").unwrap();

        assert_eq!(removed, 2);
        assert!(writer.output_dir().join("notes.md").exists());
        assert!(!writer.output_dir().join("combined.ipynb").exists());
    }

    #[test]
    fn test_written_document_reloads() {
        let dir = tempfile::tempdir().unwrap();
        let writer = OutputWriter::create(dir.path()).unwrap();
        let doc = Document::new(vec![Block::markdown("a\nb"), Block::code("print(1)")]);

        let path = writer.write_document("merged.ipynb", &doc).unwrap();
        let back: Document = serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap();

        assert_eq!(back, doc);
    }
}
