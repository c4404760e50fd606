//! 缺交报告
//!
//! 列出每个学生在必答题上未找到或空白的答案

use crate::models::outcome::{MatchResults, MatchStatus};
use std::fmt;

/// 一条缺交记录
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingEntry {
    pub login: String,
    pub display_name: String,
    pub prompt_name: String,
    pub status: MatchStatus,
}

impl fmt::Display for MissingEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "学生 {} ({}) | 题目 {} | {}",
            self.login, self.display_name, self.prompt_name, self.status
        )
    }
}

/// 按学生顺序收集缺交记录，可选题不计入
pub fn missing_answers(results: &MatchResults) -> Vec<MissingEntry> {
    let mut entries = Vec::new();
    for owner in &results.owners {
        for prompt in results.prompts.iter().filter(|p| !p.is_optional) {
            let status = results.status(prompt.index, &owner.login);
            if status != MatchStatus::Answered {
                entries.push(MissingEntry {
                    login: owner.login.clone(),
                    display_name: owner.display_name.clone(),
                    prompt_name: prompt.name.clone(),
                    status,
                });
            }
        }
    }
    entries
}
