use crate::services::table::parse_rows;
use std::collections::HashMap;

/// 账号所在列
const LOGIN_COLUMN: &str = "GitHub Login";
/// 名字列，按优先顺序
const FIRST_NAME_COLUMNS: [&str; 3] = ["Preferred", "English", "First"];
/// 姓氏列
const LAST_NAME_COLUMN: &str = "Last";

/// 花名册：账号 -> 显示名
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Roster {
    names: HashMap<String, String>,
}

impl Roster {
    /// 从 CSV 文本解析
    ///
    /// 缺少账号列或名字列时返回空花名册；名字为空的行被忽略
    pub fn from_csv(text: &str) -> Self {
        let mut rows = parse_rows(text, ',').into_iter();
        let Some(header) = rows.next() else {
            return Self::default();
        };
        let column = |name: &str| header.iter().position(|h| h.trim() == name);

        let Some(login_col) = column(LOGIN_COLUMN) else {
            return Self::default();
        };
        let Some(first_col) = FIRST_NAME_COLUMNS.iter().find_map(|&name| column(name)) else {
            return Self::default();
        };
        let last_col = column(LAST_NAME_COLUMN);

        let names = rows
            .filter_map(|row| {
                let login = row.get(login_col)?.trim();
                let first = row.get(first_col)?.trim();
                if login.is_empty() || first.is_empty() {
                    return None;
                }
                let last = last_col.and_then(|c| row.get(c)).map_or("", |s| s.trim());
                let name = if last.is_empty() {
                    first.to_string()
                } else {
                    format!("{} {}", first, last)
                };
                Some((login.to_string(), name))
            })
            .collect();

        Self { names }
    }

    /// 查询显示名，找不到时返回账号本身
    pub fn display_name(&self, login: &str) -> String {
        self.names
            .get(login)
            .cloned()
            .unwrap_or_else(|| login.to_string())
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
