/// 答案截取服务
///
/// 负责在一份学生 notebook 中找出与题目最匹配的连续单元格
use crate::config::Config;
use crate::models::notebook::Block;
use crate::models::outcome::Span;
use crate::models::prompt::{Prompt, StopText};
use crate::services::distance::closest_block;
use tracing::debug;

/// 合成标题中的题目名称占位符
pub const NAME_PLACEHOLDER: &str = "{name}";

/// 答案截取服务
#[derive(Debug, Clone)]
pub struct SpanMatcher {
    threshold: usize,
    question_heading: String,
}

impl SpanMatcher {
    pub fn new(config: &Config) -> Self {
        Self::with_options(config.match_threshold, config.question_heading.clone())
    }

    pub fn with_options(threshold: usize, question_heading: impl Into<String>) -> Self {
        Self {
            threshold,
            question_heading: question_heading.into(),
        }
    }

    /// 截取题目对应的单元格
    ///
    /// # 参数
    /// - `prompt`: 题目
    /// - `blocks`: 学生 notebook 的全部单元格
    /// - `suppress_non_answer`: 为真时只返回答案部分，不含标题和题目单元格
    ///
    /// # 返回
    /// 起点或终点都找不到时返回 `None`
    pub fn extract(&self, prompt: &Prompt, blocks: &[Block], suppress_non_answer: bool) -> Option<Span> {
        let Some(start) = closest_block(blocks, &prompt.start_text, self.threshold) else {
            debug!("{} 未找到起点", prompt);
            return None;
        };

        let end_offset = match &prompt.stop {
            StopText::NextBlock => 2,
            StopText::EndOfDocument => blocks.len() - start,
            StopText::Text(stop_text) => {
                let Some(offset) = closest_block(&blocks[start..], stop_text, self.threshold) else {
                    debug!("{} 未找到终点", prompt);
                    return None;
                };
                offset
            }
        };

        // 终点不早于起点之后，不超过文档末尾
        let end = (start + end_offset).clamp(start + 1, blocks.len());

        let mut lead = Vec::new();
        if !suppress_non_answer {
            if let Some(heading) = self.heading_for(prompt) {
                lead.push(heading);
            }
            lead.push(blocks[start].clone());
        }

        Some(Span {
            lead,
            answer: blocks[start + 1..end].to_vec(),
        })
    }

    fn heading_for(&self, prompt: &Prompt) -> Option<Block> {
        if self.question_heading.trim().is_empty() {
            return None;
        }
        Some(Block::markdown(
            self.question_heading.replace(NAME_PLACEHOLDER, &prompt.name),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::outcome::MatchStatus;

    fn prompt(start: &str, stop: StopText) -> Prompt {
        Prompt {
            index: 0,
            name: "Exercise 1".to_string(),
            start_text: start.to_string(),
            stop,
            is_optional: false,
            is_poll: false,
        }
    }

    fn blocks(texts: &[&str]) -> Vec<Block> {
        texts.iter().map(|t| Block::markdown(*t)).collect()
    }

    fn texts(blocks: &[Block]) -> Vec<&str> {
        blocks.iter().map(|b| b.text.as_str()).collect()
    }

    fn matcher() -> SpanMatcher {
        SpanMatcher::with_options(10, "")
    }

    #[test]
    fn test_next_block_span_has_two_blocks() {
        let p = prompt("## Exercise 1\nDescribe X", StopText::NextBlock);
        let doc = blocks(&["# Title", "## Exercise 1\nDescribe X", "answer A", "## Exercise 2"]);

        let span = matcher().extract(&p, &doc, false).unwrap();
        assert_eq!(span.len(), 2);
        assert_eq!(texts(&span.lead), vec!["## Exercise 1\nDescribe X"]);
        assert_eq!(texts(&span.answer), vec!["answer A"]);

        let suppressed = matcher().extract(&p, &doc, true).unwrap();
        assert_eq!(suppressed.len(), 1);
        assert!(suppressed.lead.is_empty());
    }

    #[test]
    fn test_typo_in_question_still_matches() {
        let p = prompt("## Exercise 1\nDescribe X", StopText::NextBlock);
        let doc = blocks(&["## Exercise 1\nDescrbe X", "answer B"]);

        let span = matcher().extract(&p, &doc, false).unwrap();
        assert_eq!(texts(&span.answer), vec!["answer B"]);
        assert_eq!(MatchStatus::classify(Some(&span)), MatchStatus::Answered);
    }

    #[test]
    fn test_end_of_document_reads_to_last_block() {
        let p = prompt("## Final", StopText::EndOfDocument);
        let doc = blocks(&["intro", "## Final", "a", "b", "c"]);

        let span = matcher().extract(&p, &doc, false).unwrap();
        assert_eq!(texts(&span.answer), vec!["a", "b", "c"]);
        assert_eq!(span.blocks().last().unwrap().text, "c");
    }

    #[test]
    fn test_stop_text_excludes_stop_block() {
        let p = prompt("## Exercise 1", StopText::Text("## Exercise 2".to_string()));
        let doc = blocks(&["## Exercise 1", "part 1", "part 2", "## Exercise 2", "later"]);

        let span = matcher().extract(&p, &doc, true).unwrap();
        assert_eq!(texts(&span.answer), vec!["part 1", "part 2"]);
    }

    #[test]
    fn test_missing_stop_is_missed() {
        let p = prompt(
            "## Exercise 1",
            StopText::Text("A completely different closing paragraph".to_string()),
        );
        let doc = blocks(&["## Exercise 1", "answer"]);
        assert!(matcher().extract(&p, &doc, false).is_none());
    }

    #[test]
    fn test_missing_start_is_missed() {
        let p = prompt("## Exercise 1\nDescribe X", StopText::NextBlock);
        let doc = blocks(&["something else entirely", "answer"]);
        assert!(matcher().extract(&p, &doc, false).is_none());
    }

    #[test]
    fn test_anchor_on_last_block() {
        let p = prompt("## Exercise 1", StopText::NextBlock);
        let doc = blocks(&["intro", "## Exercise 1"]);

        let span = matcher().extract(&p, &doc, false).unwrap();
        assert!(span.answer.is_empty());
        assert_eq!(span.len(), 1);
        assert_eq!(MatchStatus::classify(Some(&span)), MatchStatus::Blank);
    }

    #[test]
    fn test_blank_answer() {
        let p = prompt("## Exercise 1", StopText::NextBlock);
        let doc = blocks(&["## Exercise 1", ""]);

        let span = matcher().extract(&p, &doc, false).unwrap();
        assert_eq!(MatchStatus::classify(Some(&span)), MatchStatus::Blank);
    }

    #[test]
    fn test_question_heading_is_synthesized() {
        let p = prompt("## Exercise 1", StopText::NextBlock);
        let doc = blocks(&["## Exercise 1", "answer"]);
        let matcher = SpanMatcher::with_options(10, "### {name}");

        let span = matcher.extract(&p, &doc, false).unwrap();
        assert_eq!(texts(&span.lead), vec!["### Exercise 1", "## Exercise 1"]);

        let suppressed = matcher.extract(&p, &doc, true).unwrap();
        assert!(suppressed.lead.is_empty());
    }
}
