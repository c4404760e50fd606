use anyhow::Result;
use collate_answers::utils::logging;
use collate_answers::{App, Config};

fn main() -> Result<()> {
    // 加载配置
    let config = Config::load()?;

    // 初始化日志
    logging::init(config.verbose_logging, Some(&config.output_log_file))?;

    // 初始化并运行应用
    App::initialize(config)?.run()?;

    Ok(())
}
