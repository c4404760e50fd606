use crate::error::{AppError, AppResult, ConfigError};
use serde::Deserialize;
use std::path::Path;

/// 程序配置文件
#[derive(Clone, Debug)]
pub struct Config {
    /// 题目模板 notebook 路径
    pub template_path: String,
    /// 学生提交目录（每个学生一个子目录）
    pub submissions_dir: String,
    /// 每个学生目录内 notebook 的相对路径
    pub notebook_name: String,
    /// 花名册 CSV 路径（可选）
    pub roster_path: Option<String>,
    /// 输出目录
    pub output_dir: String,
    /// 合并后 notebook 的文件名（不含扩展名）
    pub merged_name: String,
    /// 是否在合并结果中标注学生姓名
    pub include_owner_names: bool,
    /// 写入前是否清理上次的输出
    pub clear_outputs: bool,
    /// 编辑距离阈值
    pub match_threshold: usize,
    /// 在题目前插入的标题（为空则不插入）
    pub question_heading: String,
    /// 判定为问卷题的首行短语
    pub poll_phrase: String,
    /// 是否去掉学生目录名的公共前缀
    pub strip_common_prefix: bool,
    /// 是否降低学生答案中的标题级别
    pub demote_answer_headings: bool,
    /// 是否显示详细日志
    pub verbose_logging: bool,
    /// 输出日志文件
    pub output_log_file: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            template_path: "template.ipynb".to_string(),
            submissions_dir: "submissions".to_string(),
            notebook_name: "notebook.ipynb".to_string(),
            roster_path: None,
            output_dir: "processed".to_string(),
            merged_name: "combined".to_string(),
            include_owner_names: false,
            clear_outputs: false,
            match_threshold: 10,
            question_heading: String::new(),
            poll_phrase: "Reading Journal feedback".to_string(),
            strip_common_prefix: true,
            demote_answer_headings: false,
            verbose_logging: false,
            output_log_file: "output.txt".to_string(),
        }
    }
}

/// TOML 配置文件中的可选字段，存在的字段覆盖当前值
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct ConfigFile {
    template_path: Option<String>,
    submissions_dir: Option<String>,
    notebook_name: Option<String>,
    roster_path: Option<String>,
    output_dir: Option<String>,
    merged_name: Option<String>,
    include_owner_names: Option<bool>,
    clear_outputs: Option<bool>,
    match_threshold: Option<usize>,
    question_heading: Option<String>,
    poll_phrase: Option<String>,
    strip_common_prefix: Option<bool>,
    demote_answer_headings: Option<bool>,
    verbose_logging: Option<bool>,
    output_log_file: Option<String>,
}

impl Config {
    pub fn from_env() -> Self {
        let default = Self::default();
        Self {
            template_path: std::env::var("TEMPLATE_PATH").unwrap_or(default.template_path),
            submissions_dir: std::env::var("SUBMISSIONS_DIR").unwrap_or(default.submissions_dir),
            notebook_name: std::env::var("NOTEBOOK_NAME").unwrap_or(default.notebook_name),
            roster_path: std::env::var("ROSTER_PATH").ok().or(default.roster_path),
            output_dir: std::env::var("OUTPUT_DIR").unwrap_or(default.output_dir),
            merged_name: std::env::var("MERGED_NAME").unwrap_or(default.merged_name),
            include_owner_names: std::env::var("INCLUDE_OWNER_NAMES").ok().and_then(|v| v.parse().ok()).unwrap_or(default.include_owner_names),
            clear_outputs: std::env::var("CLEAR_OUTPUTS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.clear_outputs),
            match_threshold: std::env::var("MATCH_THRESHOLD").ok().and_then(|v| v.parse().ok()).unwrap_or(default.match_threshold),
            question_heading: std::env::var("QUESTION_HEADING").unwrap_or(default.question_heading),
            poll_phrase: std::env::var("POLL_PHRASE").unwrap_or(default.poll_phrase),
            strip_common_prefix: std::env::var("STRIP_COMMON_PREFIX").ok().and_then(|v| v.parse().ok()).unwrap_or(default.strip_common_prefix),
            demote_answer_headings: std::env::var("DEMOTE_ANSWER_HEADINGS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.demote_answer_headings),
            verbose_logging: std::env::var("VERBOSE_LOGGING").ok().and_then(|v| v.parse().ok()).unwrap_or(default.verbose_logging),
            output_log_file: std::env::var("OUTPUT_LOG_FILE").unwrap_or(default.output_log_file),
        }
    }

    /// 从环境变量加载配置；若设置了 `COLLATE_CONFIG`，再叠加该 TOML 文件
    pub fn load() -> AppResult<Self> {
        let config = Self::from_env();
        match std::env::var("COLLATE_CONFIG") {
            Ok(path) => config.with_toml_file(Path::new(&path)),
            Err(_) => Ok(config),
        }
    }

    /// 读取 TOML 文件并覆盖其中出现的字段
    pub fn with_toml_file(self, path: &Path) -> AppResult<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| AppError::file_read_failed(path.display().to_string(), e))?;
        self.with_toml_str(&content, &path.display().to_string())
    }

    fn with_toml_str(mut self, content: &str, origin: &str) -> AppResult<Self> {
        let file: ConfigFile = toml::from_str(content).map_err(|source| ConfigError::TomlParseFailed {
            path: origin.to_string(),
            source,
        })?;

        if let Some(v) = file.template_path { self.template_path = v; }
        if let Some(v) = file.submissions_dir { self.submissions_dir = v; }
        if let Some(v) = file.notebook_name { self.notebook_name = v; }
        if let Some(v) = file.roster_path { self.roster_path = Some(v); }
        if let Some(v) = file.output_dir { self.output_dir = v; }
        if let Some(v) = file.merged_name { self.merged_name = v; }
        if let Some(v) = file.include_owner_names { self.include_owner_names = v; }
        if let Some(v) = file.clear_outputs { self.clear_outputs = v; }
        if let Some(v) = file.match_threshold { self.match_threshold = v; }
        if let Some(v) = file.question_heading { self.question_heading = v; }
        if let Some(v) = file.poll_phrase { self.poll_phrase = v; }
        if let Some(v) = file.strip_common_prefix { self.strip_common_prefix = v; }
        if let Some(v) = file.demote_answer_headings { self.demote_answer_headings = v; }
        if let Some(v) = file.verbose_logging { self.verbose_logging = v; }
        if let Some(v) = file.output_log_file { self.output_log_file = v; }

        self.validate()?;
        Ok(self)
    }

    /// 检查会导致输出无意义的配置
    pub fn validate(&self) -> AppResult<()> {
        if self.merged_name.trim().is_empty() {
            return Err(AppError::invalid_config("merged_name", "不能为空"));
        }
        if self.notebook_name.trim().is_empty() {
            return Err(AppError::invalid_config("notebook_name", "不能为空"));
        }
        Ok(())
    }
}
