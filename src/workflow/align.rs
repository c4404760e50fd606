//! 答案对齐流程 - 流程层
//!
//! 核心职责：把模板中的每道题与每份学生 notebook 对齐
//!
//! 对齐是纯函数：输入不被修改，输出是新的 `MatchResults`。
//! 学生的遍历顺序就是输出中的顺序。

use crate::config::Config;
use crate::models::notebook::Document;
use crate::models::outcome::{MatchResults, PromptMatch};
use crate::models::prompt::Prompt;
use crate::models::submission::Submission;
use crate::services::{PromptBuilder, SpanMatcher};
use tracing::{debug, info};

/// 从模板构建题目并对齐所有学生提交
pub fn align(template: &Document, submissions: &[Submission], config: &Config) -> MatchResults {
    let prompts = PromptBuilder::new(config).build(template);
    info!("✓ 模板中共有 {} 道题目", prompts.len());
    align_prompts(prompts, submissions, &SpanMatcher::new(config))
}

/// 用给定的题目列表对齐所有学生提交
///
/// 每道题中第一个截取成功的学生保留题目单元格，之后的学生只截取答案
pub fn align_prompts(
    prompts: Vec<Prompt>,
    submissions: &[Submission],
    matcher: &SpanMatcher,
) -> MatchResults {
    let owners = submissions.iter().map(|s| s.owner.clone()).collect();
    let mut results = MatchResults::new(prompts.clone(), owners);

    for prompt in &prompts {
        let mut matched_any = false;

        for submission in submissions {
            let span = matcher.extract(prompt, &submission.document.blocks, matched_any);
            matched_any |= span.is_some();

            let result = PromptMatch::from_span(span);
            debug!("{} {} -> {}", prompt, submission.owner.login, result.status);
            results.insert(prompt.index, &submission.owner.login, result);
        }

        info!(
            "{} 已作答 {}/{}",
            prompt,
            results.answered_count(prompt.index),
            submissions.len()
        );
    }

    results
}
