use crate::models::notebook::Block;
use crate::models::prompt::Prompt;
use std::collections::HashMap;
use std::fmt;

/// 某个学生在某道题上的匹配状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MatchStatus {
    Answered,
    Blank,
    Missed,
}

impl fmt::Display for MatchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MatchStatus::Answered => "已作答",
            MatchStatus::Blank => "空白",
            MatchStatus::Missed => "未找到",
        };
        write!(f, "{}", name)
    }
}

/// 从学生 notebook 中截取的连续单元格
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Span {
    /// 合成标题和题目单元格；被抑制时为空
    pub lead: Vec<Block>,
    /// 题目单元格之后的答案单元格
    pub answer: Vec<Block>,
}

impl Span {
    /// 全部单元格，按原顺序
    pub fn blocks(&self) -> impl Iterator<Item = &Block> {
        self.lead.iter().chain(self.answer.iter())
    }

    pub fn len(&self) -> usize {
        self.lead.len() + self.answer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// 答案部分拼接后的文本
    pub fn answer_text(&self) -> String {
        self.answer.iter().map(|b| b.text.as_str()).collect()
    }
}

/// 一道题对一个学生的匹配结果
#[derive(Debug, Clone, PartialEq)]
pub struct PromptMatch {
    pub status: MatchStatus,
    pub span: Option<Span>,
}

impl PromptMatch {
    pub fn missed() -> Self {
        Self {
            status: MatchStatus::Missed,
            span: None,
        }
    }

    /// 根据截取结果判定状态
    pub fn from_span(span: Option<Span>) -> Self {
        let status = MatchStatus::classify(span.as_ref());
        Self { status, span }
    }

    pub fn is_answered(&self) -> bool {
        self.status == MatchStatus::Answered
    }
}

impl MatchStatus {
    /// 未截取到为 Missed；答案的最后一个单元格为空或答案整体为空为 Blank
    ///
    /// 只看答案部分，题目单元格是否被抑制不影响状态
    pub fn classify(span: Option<&Span>) -> Self {
        let Some(span) = span else {
            return MatchStatus::Missed;
        };
        let last_empty = span
            .answer
            .last()
            .map_or(true, |block| block.text.trim().is_empty());
        let all_empty = span.answer.iter().all(|block| block.text.trim().is_empty());
        if last_empty || all_empty {
            MatchStatus::Blank
        } else {
            MatchStatus::Answered
        }
    }
}

/// 参与对齐的学生
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Owner {
    /// 账号（如 GitHub 登录名）
    pub login: String,
    /// 显示名（花名册中的姓名，缺省为账号）
    pub display_name: String,
}

/// 对齐的完整结果，生成后不再修改
#[derive(Debug, Clone, Default)]
pub struct MatchResults {
    pub prompts: Vec<Prompt>,
    pub owners: Vec<Owner>,
    /// matches[题目序号][学生账号]
    matches: Vec<HashMap<String, PromptMatch>>,
}

impl MatchResults {
    pub fn new(prompts: Vec<Prompt>, owners: Vec<Owner>) -> Self {
        let matches = vec![HashMap::new(); prompts.len()];
        Self {
            prompts,
            owners,
            matches,
        }
    }

    pub(crate) fn insert(&mut self, prompt_index: usize, login: &str, result: PromptMatch) {
        if let Some(slot) = self.matches.get_mut(prompt_index) {
            slot.insert(login.to_string(), result);
        }
    }

    /// 查询某题某学生的结果
    pub fn get(&self, prompt_index: usize, login: &str) -> Option<&PromptMatch> {
        self.matches.get(prompt_index)?.get(login)
    }

    /// 某题某学生的状态，无记录视为 Missed
    pub fn status(&self, prompt_index: usize, login: &str) -> MatchStatus {
        self.get(prompt_index, login)
            .map_or(MatchStatus::Missed, |m| m.status)
    }

    /// 按学生顺序遍历某题的结果
    pub fn for_prompt<'a>(
        &'a self,
        prompt_index: usize,
    ) -> impl Iterator<Item = (&'a Owner, &'a PromptMatch)> + 'a {
        self.owners
            .iter()
            .filter_map(move |owner| Some((owner, self.get(prompt_index, &owner.login)?)))
    }

    /// 已作答的数量
    pub fn answered_count(&self, prompt_index: usize) -> usize {
        self.for_prompt(prompt_index)
            .filter(|(_, m)| m.is_answered())
            .count()
    }
}
