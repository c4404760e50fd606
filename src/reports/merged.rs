//! 合并 notebook
//!
//! 每道题：题目单元格只出现一次，随后是各学生的答案

use crate::config::Config;
use crate::models::notebook::{Block, BlockKind, Document};
use crate::models::outcome::MatchResults;
use crate::services::dedup::dedup_answers;
use regex::Regex;
use std::sync::OnceLock;

/// 合并选项
#[derive(Debug, Clone, Copy, Default)]
pub struct MergeOptions {
    /// 在每份答案前插入学生姓名标题；开启时不去重
    pub include_owner_names: bool,
    /// 答案中含一级标题时，把所有标题降一级
    pub demote_answer_headings: bool,
}

impl From<&Config> for MergeOptions {
    fn from(config: &Config) -> Self {
        Self {
            include_owner_names: config.include_owner_names,
            demote_answer_headings: config.demote_answer_headings,
        }
    }
}

/// 生成合并后的 notebook
pub fn assemble(results: &MatchResults, template: &Document, options: MergeOptions) -> Document {
    let mut blocks = Vec::new();

    for prompt in &results.prompts {
        // 第一个截取成功的学生带有题目单元格
        if let Some(lead) = results
            .for_prompt(prompt.index)
            .filter_map(|(_, m)| m.span.as_ref())
            .map(|span| &span.lead)
            .find(|lead| !lead.is_empty())
        {
            blocks.extend(lead.iter().cloned());
        }

        let answered: Vec<_> = results
            .for_prompt(prompt.index)
            .filter(|(_, m)| m.is_answered())
            .filter_map(|(owner, m)| Some((owner, m.span.as_ref()?)))
            .collect();
        let answered = if options.include_owner_names {
            answered
        } else {
            dedup_answers(&answered)
        };

        for (owner, span) in answered {
            if options.include_owner_names {
                blocks.push(Block::markdown(format!("#### {}", owner.display_name)));
            }
            blocks.extend(span.answer.iter().map(|block| {
                if options.demote_answer_headings && block.kind == BlockKind::Markdown {
                    let mut block = block.clone();
                    block.text = demote_headings(&block.text);
                    block
                } else {
                    block.clone()
                }
            }));
        }
    }

    Document::with_blocks_like(template, blocks)
}

/// 行首的 `#` 串及其后的空白
const HEADING_PREFIX_PATTERN: &str = r"(?m)^(#+)[ \t]*";
/// 规范化之后的一级标题
const H1_PATTERN: &str = r"(?m)^# ";

fn heading_prefix_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(HEADING_PREFIX_PATTERN).expect("HEADING_PREFIX_PATTERN 是合法正则"))
}

fn h1_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(H1_PATTERN).expect("H1_PATTERN 是合法正则"))
}

/// 规范化标题（`##title` -> `## title`），若含一级标题则所有标题降一级
///
/// 不识别代码块中的 `#`
pub fn demote_headings(markdown: &str) -> String {
    let normalized = heading_prefix_regex().replace_all(markdown, "$1 ");
    if h1_regex().is_match(&normalized) {
        heading_prefix_regex()
            .replace_all(&normalized, "$1# ")
            .into_owned()
    } else {
        normalized.into_owned()
    }
}
