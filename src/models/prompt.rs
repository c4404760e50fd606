use std::fmt;

/// "只匹配下一个单元格" 的标记
pub const NEXT_BLOCK_MARKER: &str = "match next block";
/// 旧模板中使用的同义标记
pub const NEXT_CELL_MARKER: &str = "next_cell";

/// 题目答案的结束位置
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StopText {
    /// 锚点单元格加上紧随其后的一个单元格
    NextBlock,
    /// 一直读到文档末尾
    EndOfDocument,
    /// 读到与该文本最接近的单元格为止（不含）
    Text(String),
}

impl StopText {
    /// 从模板中的标记文本解析
    pub fn from_marker(marker: &str) -> Self {
        match marker {
            NEXT_BLOCK_MARKER | NEXT_CELL_MARKER => StopText::NextBlock,
            "" => StopText::EndOfDocument,
            text => StopText::Text(text.to_string()),
        }
    }

    /// 标记文本形式
    pub fn as_marker(&self) -> &str {
        match self {
            StopText::NextBlock => NEXT_BLOCK_MARKER,
            StopText::EndOfDocument => "",
            StopText::Text(text) => text,
        }
    }
}

/// 由模板中一个题目单元格生成的题目
#[derive(Debug, Clone, PartialEq)]
pub struct Prompt {
    /// 在所有题目中的序号（从 0 开始）
    pub index: usize,
    /// 题目名称
    pub name: String,
    /// 匹配起点文本
    pub start_text: String,
    /// 匹配终点
    pub stop: StopText,
    pub is_optional: bool,
    pub is_poll: bool,
}

impl fmt::Display for Prompt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[题目 #{} {}]", self.index + 1, self.name)
    }
}
