//! 文本距离 - 业务能力层
//!
//! 字符级 Levenshtein 距离，以及在单元格序列中查找最接近的单元格

use crate::models::notebook::Block;

/// 字符级编辑距离（按 Unicode 标量计）
pub fn levenshtein(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];

    for (i, ca) in a.iter().enumerate() {
        curr[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let cost = usize::from(ca != cb);
            curr[j + 1] = (prev[j] + cost).min(prev[j + 1] + 1).min(curr[j] + 1);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

/// 找出与 `target` 距离最小的单元格
///
/// 距离相同时取第一个；最小距离大于 `threshold` 时返回 `None`
pub fn closest_block(blocks: &[Block], target: &str, threshold: usize) -> Option<usize> {
    let (index, distance) = blocks
        .iter()
        .enumerate()
        .map(|(i, block)| (i, levenshtein(&block.text, target)))
        .fold(None, |best: Option<(usize, usize)>, (i, d)| match best {
            Some((_, best_d)) if best_d <= d => best,
            _ => Some((i, d)),
        })?;

    (distance <= threshold).then_some(index)
}
