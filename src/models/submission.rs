use crate::models::notebook::Document;
use crate::models::outcome::Owner;

/// 一个学生提交的 notebook
#[derive(Debug, Clone)]
pub struct Submission {
    pub owner: Owner,
    pub document: Document,
}

impl Submission {
    pub fn new(owner: Owner, document: Document) -> Self {
        Self { owner, document }
    }
}
