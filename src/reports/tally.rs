//! 作答统计表
//!
//! 行为题目，列为学生，另有合计行与合计列

use crate::models::outcome::MatchResults;
use crate::services::table::Table;

pub const TOTAL_LABEL: &str = "Total";

/// 生成作答统计表
pub fn answer_counts(results: &MatchResults) -> Table {
    let mut headers = vec!["Question".to_string()];
    headers.extend(results.owners.iter().map(|o| o.login.clone()));
    headers.push(TOTAL_LABEL.to_string());

    let mut table = Table::new(headers);
    let mut owner_totals = vec![0usize; results.owners.len()];

    for prompt in &results.prompts {
        let mut row = vec![prompt.name.clone()];
        let mut answered = 0;
        for (col, owner) in results.owners.iter().enumerate() {
            let is_answered = results
                .get(prompt.index, &owner.login)
                .is_some_and(|m| m.is_answered());
            if is_answered {
                answered += 1;
                owner_totals[col] += 1;
            }
            row.push(is_answered.to_string());
        }
        row.push(answered.to_string());
        table.push_row(row);
    }

    let mut totals_row = vec![TOTAL_LABEL.to_string()];
    totals_row.extend(owner_totals.iter().map(|n| n.to_string()));
    totals_row.push(owner_totals.iter().sum::<usize>().to_string());
    table.push_row(totals_row);

    table
}
