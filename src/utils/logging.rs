/// 日志工具模块
///
/// 提供日志初始化、格式化和输出的辅助函数
use anyhow::{Context, Result};
use std::fs::{self, OpenOptions};
use std::sync::Mutex;
use tracing::info;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

/// 初始化 tracing 订阅者
///
/// 优先使用 `RUST_LOG`；否则详细模式为 debug，普通模式为 info。
/// 给出日志文件时，先写入文件头，之后的日志同时追加到该文件。
/// 重复调用不会报错。
pub fn init(verbose: bool, log_file_path: Option<&str>) -> Result<()> {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let file_layer = match log_file_path {
        Some(path) => {
            init_log_file(path)?;
            let file = OpenOptions::new()
                .append(true)
                .open(path)
                .with_context(|| format!("无法打开日志文件: {}", path))?;
            Some(
                fmt::layer()
                    .with_writer(Mutex::new(file))
                    .with_ansi(false)
                    .with_target(false),
            )
        }
        None => None,
    };

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false))
        .with(file_layer)
        .try_init();

    Ok(())
}

/// 初始化日志文件
///
/// # 参数
/// - `log_file_path`: 日志文件路径
pub fn init_log_file(log_file_path: &str) -> Result<()> {
    let log_header = format!(
        "{}\n作业合并日志 - {}\n{}\n\n",
        "=".repeat(60),
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
        "=".repeat(60)
    );
    fs::write(log_file_path, log_header)?;
    Ok(())
}

/// 记录程序启动信息
pub fn log_startup(template: &str, submissions_dir: &str) {
    info!("{}", "=".repeat(60));
    info!("🚀 程序启动 - 作业答案合并");
    info!("📄 题目模板: {}", template);
    info!("📁 提交目录: {}", submissions_dir);
    info!("{}", "=".repeat(60));
}

/// 记录提交加载信息
///
/// # 参数
/// - `loaded`: 成功加载数量
/// - `skipped`: 跳过数量
pub fn log_submissions_loaded(loaded: usize, skipped: usize) {
    info!("✓ 找到 {} 份可处理的提交", loaded);
    if skipped > 0 {
        info!("⚠️ 跳过 {} 份无法读取的提交", skipped);
    }
}

/// 打印最终统计信息
///
/// # 参数
/// - `prompts`: 题目数量
/// - `submissions`: 学生数量
/// - `answered`: 已作答的 (题目, 学生) 数量
/// - `missing`: 缺交记录数量
/// - `log_file_path`: 日志文件路径
pub fn print_final_stats(
    prompts: usize,
    submissions: usize,
    answered: usize,
    missing: usize,
    log_file_path: &str,
) {
    info!("\n{}", "=".repeat(60));
    info!("📊 全部处理完成统计");
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("{}", "=".repeat(60));
    info!("📝 题目: {} | 学生: {}", prompts, submissions);
    info!("✅ 已作答: {}/{}", answered, prompts * submissions);
    info!("❌ 缺交: {}", missing);
    info!("{}", "=".repeat(60));
    info!("\n日志已保存至: {}", log_file_path);
}

/// 截断长文本用于日志显示
///
/// # 参数
/// - `text`: 原始文本
/// - `max_len`: 最大长度
///
/// # 返回
/// 返回截断后的文本
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}
