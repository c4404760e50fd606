//! 批量合并处理器 - 编排层
//!
//! ## 职责
//!
//! 本模块是整个应用的入口，负责一次完整的合并运行。
//!
//! ## 核心功能
//!
//! 1. **应用初始化**：写日志文件头、加载模板、花名册和全部学生提交
//! 2. **对齐**：委托 `workflow::align` 生成 `MatchResults`
//! 3. **报告**：合并 notebook、作答统计、问卷汇总、缺交报告
//! 4. **写出**：按配置清理旧输出，写入新输出
//! 5. **全局统计**：汇总题目、学生、作答与缺交数量
//!
//! ## 设计特点
//!
//! - **顶层编排**：不处理单道题的细节
//! - **单线程同步**：每一步完成后才进入下一步

use crate::config::Config;
use crate::models::{load_document, load_roster, load_submissions, Document, MatchResults, Roster, Submission};
use crate::reports::{self, MergeOptions};
use crate::services::output_writer::TALLY_FILE_NAME;
use crate::services::{OutputWriter, WarnWriter};
use crate::utils::logging::{log_startup, log_submissions_loaded, print_final_stats, truncate_text};
use crate::workflow;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// 应用主结构
pub struct App {
    config: Config,
    template: Document,
    submissions: Vec<Submission>,
    skipped: usize,
}

/// 一次运行的结果统计
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub prompts: usize,
    pub submissions: usize,
    pub skipped: usize,
    pub answered: usize,
    pub missing: usize,
    pub merged_path: PathBuf,
}

impl App {
    /// 初始化应用
    pub fn initialize(config: Config) -> Result<Self> {
        config.validate()?;

        log_startup(&config.template_path, &config.submissions_dir);

        let template = load_document(Path::new(&config.template_path))
            .context("无法加载题目模板")?;

        let roster = match &config.roster_path {
            Some(path) => load_roster(Path::new(path))?,
            None => Roster::default(),
        };

        info!("\n📁 正在扫描学生提交...");
        let loaded = load_submissions(
            Path::new(&config.submissions_dir),
            &config.notebook_name,
            &roster,
            config.strip_common_prefix,
        )?;
        log_submissions_loaded(loaded.submissions.len(), loaded.skipped.len());

        Ok(Self {
            config,
            template,
            submissions: loaded.submissions,
            skipped: loaded.skipped.len(),
        })
    }

    /// 运行应用主逻辑
    pub fn run(&self) -> Result<RunSummary> {
        if self.submissions.is_empty() {
            warn!("⚠️ 没有找到可处理的提交，仅输出题目");
        }

        let results = workflow::align(&self.template, &self.submissions, &self.config);

        if self.config.verbose_logging {
            log_prompts(&results);
        }

        let writer = OutputWriter::create(&self.config.output_dir)?;
        let merged_file_name = format!("{}.ipynb", self.config.merged_name);
        if self.config.clear_outputs {
            writer.clear(&merged_file_name)?;
        }

        // 合并 notebook
        let merged = reports::assemble(&results, &self.template, MergeOptions::from(&self.config));
        let merged_path = writer.write_document(&merged_file_name, &merged)?;
        info!("✓ 合并 notebook 已写出: {} ({} 个单元格)", merged_path.display(), merged.blocks.len());

        // 作答统计
        let tally_path = writer.write_table(Path::new(TALLY_FILE_NAME), &reports::answer_counts(&results))?;
        info!("✓ 作答统计已写出: {}", tally_path.display());

        // 问卷汇总
        for poll in reports::poll_tables(&results) {
            let relative = Path::new(crate::services::output_writer::POLLS_DIR_NAME)
                .join(format!("{}.csv", poll.slug()));
            let path = writer.write_table(&relative, &poll.table)?;
            info!("✓ 问卷 {} 共 {} 条回答: {}", poll.prompt_name, poll.table.rows.len(), path.display());
        }

        // 缺交报告
        let missing = reports::missing_answers(&results);
        let warn_writer = WarnWriter::new(writer.output_dir());
        warn_writer.write_all(&missing)?;
        if !missing.is_empty() {
            warn!("⚠️ 共 {} 条缺交记录，已写入 {}", missing.len(), warn_writer.path().display());
        }

        let summary = RunSummary {
            prompts: results.prompts.len(),
            submissions: self.submissions.len(),
            skipped: self.skipped,
            answered: (0..results.prompts.len()).map(|i| results.answered_count(i)).sum(),
            missing: missing.len(),
            merged_path,
        };

        print_final_stats(
            summary.prompts,
            summary.submissions,
            summary.answered,
            summary.missing,
            &self.config.output_log_file,
        );

        Ok(summary)
    }
}

fn log_prompts(results: &MatchResults) {
    for prompt in &results.prompts {
        debug!(
            "{} 可选: {} 问卷: {} 起点: {}",
            prompt,
            prompt.is_optional,
            prompt.is_poll,
            truncate_text(&prompt.start_text.replace('\n', " "), 60)
        );
    }
}
