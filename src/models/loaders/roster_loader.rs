use crate::models::roster::Roster;
use anyhow::{Context, Result};
use std::path::Path;

/// 加载花名册；文件不存在时返回空花名册
pub fn load_roster(path: &Path) -> Result<Roster> {
    if !path.exists() {
        tracing::warn!("⚠️ 花名册不存在: {}，使用账号作为姓名", path.display());
        return Ok(Roster::default());
    }

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("无法读取花名册: {}", path.display()))?;
    let roster = Roster::from_csv(&content);
    tracing::info!("✓ 花名册共 {} 人", roster.len());

    Ok(roster)
}
