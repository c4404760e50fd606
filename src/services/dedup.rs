//! 答案去重

use crate::models::outcome::{Owner, Span};
use std::collections::HashSet;

/// 去掉与前面答案文本完全相同（拼接并去除首尾空白后）的答案
///
/// 保留第一次出现的位置，其余顺序不变
pub fn dedup_answers<'a>(answers: &[(&'a Owner, &'a Span)]) -> Vec<(&'a Owner, &'a Span)> {
    let mut seen = HashSet::new();
    answers
        .iter()
        .filter(|(_, span)| seen.insert(span.answer_text().trim().to_string()))
        .copied()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::notebook::Block;

    fn owner(login: &str) -> Owner {
        Owner {
            login: login.to_string(),
            display_name: login.to_string(),
        }
    }

    fn answer(texts: &[&str]) -> Span {
        Span {
            lead: Vec::new(),
            answer: texts.iter().map(|t| Block::markdown(*t)).collect(),
        }
    }

    #[test]
    fn test_keeps_first_of_duplicates() {
        let (a, b, c) = (owner("a"), owner("b"), owner("c"));
        let (sa, sb, sc) = (answer(&["42\n"]), answer(&["other"]), answer(&["  42"]));

        let kept = dedup_answers(&[(&a, &sa), (&b, &sb), (&c, &sc)]);
        let logins: Vec<&str> = kept.iter().map(|(o, _)| o.login.as_str()).collect();
        assert_eq!(logins, vec!["a", "b"]);
    }

    #[test]
    fn test_compares_concatenated_text() {
        let (a, b) = (owner("a"), owner("b"));
        let (sa, sb) = (answer(&["x = 1\n", "y = 2"]), answer(&["x = 1\ny = 2"]));

        assert_eq!(dedup_answers(&[(&a, &sa), (&b, &sb)]).len(), 1);
    }
}
