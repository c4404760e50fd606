//! 问卷汇总
//!
//! 每道问卷题一张表：学生 -> 回答文本，空回答不计入

use crate::models::outcome::MatchResults;
use crate::services::table::Table;

/// 一道问卷题的汇总
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollTable {
    pub prompt_name: String,
    pub table: Table,
}

impl PollTable {
    /// 用作文件名的题目名称：小写字母数字，其余字符折叠为 `_`
    pub fn slug(&self) -> String {
        let mut slug = String::new();
        for ch in self.prompt_name.chars() {
            if ch.is_alphanumeric() {
                slug.extend(ch.to_lowercase());
            } else if !slug.ends_with('_') {
                slug.push('_');
            }
        }
        let slug = slug.trim_matches('_');
        if slug.is_empty() {
            "poll".to_string()
        } else {
            slug.to_string()
        }
    }
}

/// 生成所有问卷题的汇总表
pub fn poll_tables(results: &MatchResults) -> Vec<PollTable> {
    results
        .prompts
        .iter()
        .filter(|p| p.is_poll)
        .map(|prompt| {
            let mut table = Table::new(vec!["Owner".to_string(), "Response".to_string()]);
            for (owner, m) in results.for_prompt(prompt.index) {
                let Some(span) = m.span.as_ref() else {
                    continue;
                };
                let response = span.answer_text().trim().to_string();
                if !response.is_empty() {
                    table.push_row(vec![owner.display_name.clone(), response]);
                }
            }
            PollTable {
                prompt_name: prompt.name.clone(),
                table,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::notebook::Block;
    use crate::models::outcome::{Owner, PromptMatch, Span};
    use crate::models::prompt::{Prompt, StopText};

    fn prompt(index: usize, name: &str, is_poll: bool) -> Prompt {
        Prompt {
            index,
            name: name.to_string(),
            start_text: name.to_string(),
            stop: StopText::NextBlock,
            is_optional: false,
            is_poll,
        }
    }

    fn owner(login: &str, name: &str) -> Owner {
        Owner {
            login: login.to_string(),
            display_name: name.to_string(),
        }
    }

    fn reply(text: &str) -> PromptMatch {
        PromptMatch::from_span(Some(Span {
            lead: Vec::new(),
            answer: vec![Block::markdown(text)],
        }))
    }

    #[test]
    fn test_only_polls_with_non_empty_responses() {
        let mut results = MatchResults::new(
            vec![prompt(0, "Exercise 1", false), prompt(1, "Reading Journal feedback", true)],
            vec![owner("a", "Alice A"), owner("b", "Bob B"), owner("c", "Cy C")],
        );
        results.insert(1, "a", reply("About 2 hours\n"));
        results.insert(1, "b", reply("   "));
        results.insert(1, "c", PromptMatch::missed());

        let polls = poll_tables(&results);

        assert_eq!(polls.len(), 1);
        assert_eq!(polls[0].prompt_name, "Reading Journal feedback");
        assert_eq!(polls[0].table.rows, vec![vec!["Alice A".to_string(), "About 2 hours".to_string()]]);
        assert_eq!(polls[0].slug(), "reading_journal_feedback");
    }

    #[test]
    fn test_slug_fallback() {
        let poll = PollTable {
            prompt_name: "???".to_string(),
            table: Table::default(),
        };
        assert_eq!(poll.slug(), "poll");
    }
}
