use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashSet;

/// 单元格 id 字段名（nbformat 4.5 起必需）
const CELL_ID_KEY: &str = "id";
/// nbformat 规定的 id 最大长度
const CELL_ID_MAX_LEN: usize = 64;

/// Notebook 文档（nbformat 4）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    #[serde(rename = "cells")]
    pub blocks: Vec<Block>,
    #[serde(default)]
    pub metadata: Map<String, Value>,
    #[serde(default = "default_nbformat")]
    pub nbformat: u32,
    #[serde(default = "default_nbformat_minor")]
    pub nbformat_minor: u32,
    /// 未识别的顶层字段，原样写回
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

fn default_nbformat() -> u32 {
    4
}

fn default_nbformat_minor() -> u32 {
    2
}

impl Document {
    pub fn new(blocks: Vec<Block>) -> Self {
        Self {
            blocks,
            metadata: Map::new(),
            nbformat: default_nbformat(),
            nbformat_minor: default_nbformat_minor(),
            extra: Map::new(),
        }
    }

    /// 以模板的文档级元数据创建一个新文档
    ///
    /// 单元格来自不同文件，id 会按模板的 nbformat 版本重新整理
    pub fn with_blocks_like(template: &Document, blocks: Vec<Block>) -> Self {
        let mut doc = Self {
            blocks,
            metadata: template.metadata.clone(),
            nbformat: template.nbformat,
            nbformat_minor: template.nbformat_minor,
            extra: Map::new(),
        };
        doc.normalize_cell_ids();
        doc
    }

    /// 是否要求每个单元格带 id（nbformat 4.5 及以上）
    pub fn requires_cell_ids(&self) -> bool {
        self.nbformat > 4 || (self.nbformat == 4 && self.nbformat_minor >= 5)
    }

    /// 整理单元格 id
    ///
    /// 4.5 及以上：缺失的补上，重复或非法的改名，保证文档内唯一；
    /// 更早的版本不允许 id 字段，一律删除
    pub fn normalize_cell_ids(&mut self) {
        if !self.requires_cell_ids() {
            for block in &mut self.blocks {
                block.extra.remove(CELL_ID_KEY);
            }
            return;
        }

        let mut seen = HashSet::new();
        for block in &mut self.blocks {
            let current = block.id().map(sanitize_cell_id);
            let id = match current {
                Some(id) if !id.is_empty() && seen.insert(id.clone()) => id,
                other => {
                    let base = other.filter(|id| !id.is_empty()).unwrap_or_else(|| "cell".to_string());
                    let mut n = 1;
                    let id = loop {
                        let candidate = format!("{}-{}", base, n);
                        if !seen.contains(&candidate) {
                            break candidate;
                        }
                        n += 1;
                    };
                    seen.insert(id.clone());
                    id
                }
            };
            block.extra.insert(CELL_ID_KEY.to_string(), Value::String(id));
        }
    }
}

// 只保留 nbformat 允许的字符，并给后缀留出长度
fn sanitize_cell_id(id: &str) -> String {
    id.chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '-' || *c == '_')
        .take(CELL_ID_MAX_LEN - 10)
        .collect()
}

/// 单元格类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockKind {
    Markdown,
    Code,
    Raw,
}

/// Notebook 中的一个单元格
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    #[serde(rename = "cell_type")]
    pub kind: BlockKind,
    #[serde(
        rename = "source",
        deserialize_with = "deserialize_source",
        serialize_with = "serialize_source"
    )]
    pub text: String,
    #[serde(default)]
    pub metadata: BlockMetadata,
    /// outputs / execution_count / id 等字段
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Block {
    /// 创建 markdown 单元格
    pub fn markdown(text: impl Into<String>) -> Self {
        Self {
            kind: BlockKind::Markdown,
            text: text.into(),
            metadata: BlockMetadata::default(),
            extra: Map::new(),
        }
    }

    /// 创建 code 单元格（nbformat 要求 outputs 与 execution_count 字段）
    pub fn code(text: impl Into<String>) -> Self {
        let mut extra = Map::new();
        extra.insert("outputs".to_string(), Value::Array(Vec::new()));
        extra.insert("execution_count".to_string(), Value::Null);
        Self {
            kind: BlockKind::Code,
            text: text.into(),
            metadata: BlockMetadata::default(),
            extra,
        }
    }

    /// 单元格 id（nbformat 4.5 起）
    pub fn id(&self) -> Option<&str> {
        self.extra.get(CELL_ID_KEY).and_then(Value::as_str)
    }

    /// 首行内容
    pub fn first_line(&self) -> &str {
        self.text.lines().next().unwrap_or("")
    }
}

/// 单元格元数据
///
/// 已知字段为强类型，其余字段保存在 `extra` 中以便原样写回
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BlockMetadata {
    #[serde(default, skip_serializing_if = "is_false")]
    pub is_question: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_poll: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_optional: Option<bool>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub allow_multi_cell: bool,
    /// 显式的题目名称
    #[serde(skip_serializing_if = "Option::is_none")]
    pub problem: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

fn is_false(value: &bool) -> bool {
    !*value
}

// source 字段既可能是字符串，也可能是字符串数组
fn deserialize_source<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::{SeqAccess, Visitor};
    use std::fmt;

    struct SourceVisitor;

    impl<'de> Visitor<'de> for SourceVisitor {
        type Value = String;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a string or a list of strings")
        }

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(value.to_string())
        }

        fn visit_string<E>(self, value: String) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(value)
        }

        fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
        where
            A: SeqAccess<'de>,
        {
            let mut text = String::new();
            while let Some(line) = seq.next_element::<String>()? {
                text.push_str(&line);
            }
            Ok(text)
        }
    }

    deserializer.deserialize_any(SourceVisitor)
}

// 按 Jupyter 的习惯写成逐行数组，每行保留换行符
fn serialize_source<S>(text: &str, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    use serde::ser::SerializeSeq;

    let lines: Vec<&str> = text.split_inclusive('\n').collect();
    let mut seq = serializer.serialize_seq(Some(lines.len()))?;
    for line in lines {
        seq.serialize_element(line)?;
    }
    seq.end()
}
