//! # Collate Answers
//!
//! 一个把全班学生的 Jupyter notebook 答案合并到一起的 Rust 应用程序
//!
//! ## 架构设计
//!
//! 本系统采用四层架构：
//!
//! ### ① 数据层（Models）
//! - `models/` - notebook、题目、匹配结果等数据结构，以及加载器
//!
//! ### ② 业务能力层（Services）
//! - `services/` - 描述"我能做什么"，只处理单个题目或单个文件
//! - `PromptBuilder` - 从模板构建题目
//! - `SpanMatcher` - 按编辑距离截取一位学生的答案
//! - `OutputWriter` / `WarnWriter` - 写出结果
//!
//! ### ③ 流程层（Workflow）
//! - `workflow/` - `align()`：题目 × 学生 → `MatchResults`，纯函数
//! - `reports/` - 对 `MatchResults` 的只读投影（合并 notebook、统计表、问卷、缺交）
//!
//! ### ④ 编排层（Orchestration）
//! - `orchestrator/batch_processor` - 加载输入、调用流程、写出报告
//!
//! ## 模块结构

pub mod config;
pub mod error;
pub mod models;
pub mod orchestrator;
pub mod reports;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use config::Config;
pub use error::{AppError, AppResult};
pub use models::{Block, Document, MatchResults, MatchStatus, Prompt, Submission};
pub use orchestrator::{App, RunSummary};
pub use workflow::align;
