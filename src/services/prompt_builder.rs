//! 题目构建服务 - 业务能力层
//!
//! 把模板 notebook 转换成有序的题目列表，并推断每道题答案的结束位置

use crate::config::Config;
use crate::models::notebook::{Block, Document};
use crate::models::prompt::{Prompt, StopText};
use regex::Regex;
use std::sync::OnceLock;
use tracing::debug;

/// markdown 标题行，捕获标题文字
const HEADING_PATTERN: &str = r"(?m)^#+[ \t]*(.*?)[ \t#]*$";

fn heading_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(HEADING_PATTERN).expect("HEADING_PATTERN 是合法正则"))
}

/// 题目构建服务
pub struct PromptBuilder {
    poll_phrase: String,
}

impl PromptBuilder {
    pub fn new(config: &Config) -> Self {
        Self::with_poll_phrase(config.poll_phrase.clone())
    }

    pub fn with_poll_phrase(poll_phrase: impl Into<String>) -> Self {
        Self {
            poll_phrase: poll_phrase.into().to_lowercase(),
        }
    }

    /// 从模板构建题目列表
    ///
    /// 没有题目单元格时返回空列表
    pub fn build(&self, template: &Document) -> Vec<Prompt> {
        let mut prompts: Vec<Prompt> = Vec::new();
        // 上一道题是否仍在等待下一道题来确定结束位置
        let mut open = false;
        let last_index = template.blocks.len().saturating_sub(1);

        for (idx, block) in template.blocks.iter().enumerate() {
            if !block.metadata.is_question {
                continue;
            }

            if open {
                if let Some(prev) = prompts.last_mut() {
                    prev.stop = StopText::Text(block.text.clone());
                }
            }

            let index = prompts.len();
            let mut prompt = Prompt {
                index,
                name: self.prompt_name(block, index),
                start_text: block.text.clone(),
                stop: StopText::NextBlock,
                is_optional: self.is_optional(block),
                is_poll: self.is_poll(block),
            };

            open = block.metadata.allow_multi_cell;
            if open && idx == last_index {
                prompt.stop = StopText::EndOfDocument;
            }

            debug!("构建题目 {} (结束标记: {:?})", prompt, prompt.stop.as_marker());
            prompts.push(prompt);
        }

        prompts
    }

    fn prompt_name(&self, block: &Block, index: usize) -> String {
        if let Some(name) = block.metadata.problem.as_deref() {
            if !name.trim().is_empty() {
                return name.trim().to_string();
            }
        }
        heading_text(&block.text).unwrap_or_else(|| format!("Question {}", index + 1))
    }

    fn is_poll(&self, block: &Block) -> bool {
        if let Some(flag) = block.metadata.is_poll {
            return flag;
        }
        !self.poll_phrase.is_empty()
            && block.first_line().to_lowercase().contains(&self.poll_phrase)
    }

    fn is_optional(&self, block: &Block) -> bool {
        block
            .metadata
            .is_optional
            .unwrap_or_else(|| block.first_line().to_lowercase().contains("optional"))
    }
}

/// 取文本中第一个 markdown 标题的内容
pub fn heading_text(text: &str) -> Option<String> {
    heading_regex()
        .captures_iter(text)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
        .find(|s| !s.is_empty())
}
