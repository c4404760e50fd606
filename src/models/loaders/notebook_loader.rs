use crate::error::AppError;
use crate::models::notebook::Document;
use crate::models::outcome::Owner;
use crate::models::roster::Roster;
use crate::models::submission::Submission;
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// 从文件加载 notebook
pub fn load_document(path: &Path) -> Result<Document> {
    let display = path.display().to_string();
    let content = fs::read_to_string(path).map_err(|e| AppError::file_read_failed(&display, e))?;

    let document: Document =
        serde_json::from_str(&content).map_err(|e| AppError::notebook_parse_failed(&display, e))?;

    Ok(document)
}

/// 学生提交的加载结果
#[derive(Debug, Default)]
pub struct LoadedSubmissions {
    /// 按账号排序
    pub submissions: Vec<Submission>,
    /// 跳过的目录及原因
    pub skipped: Vec<(PathBuf, String)>,
}

/// 加载提交目录下每个学生子目录中的 notebook
///
/// 读取或解析失败的提交会被跳过并记录，不影响其他学生
pub fn load_submissions(
    submissions_dir: &Path,
    notebook_name: &str,
    roster: &Roster,
    strip_common_prefix: bool,
) -> Result<LoadedSubmissions> {
    if !submissions_dir.is_dir() {
        anyhow::bail!("文件夹不存在: {}", submissions_dir.display());
    }

    let mut dirs = Vec::new();
    let entries = fs::read_dir(submissions_dir)
        .with_context(|| format!("无法读取文件夹: {}", submissions_dir.display()))?;
    for entry in entries {
        let path = entry?.path();
        if path.is_dir() {
            if let Some(name) = path.file_name().and_then(|s| s.to_str()) {
                if !name.starts_with('.') {
                    dirs.push((name.to_string(), path.clone()));
                }
            }
        }
    }
    dirs.sort();

    let names: Vec<&str> = dirs.iter().map(|(name, _)| name.as_str()).collect();
    let prefix_len = if strip_common_prefix && names.len() > 1 {
        common_prefix(&names).len()
    } else {
        0
    };

    let mut loaded = LoadedSubmissions::default();
    for (dir_name, dir) in &dirs {
        let login = match &dir_name[prefix_len..] {
            "" => dir_name.clone(),
            rest => rest.to_string(),
        };
        let notebook_path = dir.join(notebook_name);

        if !notebook_path.is_file() {
            tracing::warn!("⚠️ {} 没有提交 {}，跳过", login, notebook_name);
            loaded.skipped.push((dir.clone(), "notebook 不存在".to_string()));
            continue;
        }

        match load_document(&notebook_path) {
            Ok(document) => {
                tracing::info!("正在加载: {} ({} 个单元格)", login, document.blocks.len());
                let owner = Owner {
                    display_name: roster.display_name(&login),
                    login,
                };
                loaded.submissions.push(Submission::new(owner, document));
            }
            Err(e) => {
                tracing::warn!("加载文件失败 {}: {:#}", notebook_path.display(), e);
                loaded.skipped.push((dir.clone(), format!("{:#}", e)));
            }
        }
    }

    Ok(loaded)
}

/// 所有名称的最长公共前缀（按字符边界）
pub fn common_prefix<'a>(names: &[&'a str]) -> &'a str {
    let Some(first) = names.first() else {
        return "";
    };
    let mut end = first.len();
    for name in &names[1..] {
        end = first
            .char_indices()
            .zip(name.chars())
            .take_while(|((_, a), b)| a == b)
            .last()
            .map_or(0, |((i, a), _)| i + a.len_utf8())
            .min(end);
    }
    &first[..end]
}
