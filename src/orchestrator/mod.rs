//! 编排层（Orchestration Layer）
//!
//! ## 职责
//!
//! 本层负责一次完整运行的调度，是整个系统的"指挥中心"。
//!
//! ## 层次关系
//!
//! ```text
//! batch_processor (加载 / 写出 / 统计)
//!     ↓
//! workflow::align (题目 × 学生 → MatchResults)
//!     ↓
//! reports (MatchResults 的只读投影)
//!     ↓
//! services (能力层：distance / span_matcher / table / writers)
//! ```
//!
//! ## 设计原则
//!
//! 1. **单一职责**：编排层只负责 I/O 与调度
//! 2. **向下依赖**：编排层 → workflow → services
//! 3. **无业务逻辑**：只做调度和统计，不做具体匹配判断

pub mod batch_processor;

// 重新导出主要类型
pub use batch_processor::{App, RunSummary};
