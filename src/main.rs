use std::path::PathBuf;

use anyhow::Result;
use news_bias_analyzer::config::{Config, DEFAULT_CONFIG_FILE};
use news_bias_analyzer::utils::logging;
use news_bias_analyzer::App;

#[tokio::main]
async fn main() -> Result<()> {
    // 加载配置（.env → analyzer.toml → 环境变量）
    let config = Config::load(DEFAULT_CONFIG_FILE)?;

    // 初始化日志
    logging::init(config.verbose_logging);

    // 命令行参数为待分析的文件，按给定顺序处理
    let paths: Vec<PathBuf> = std::env::args().skip(1).map(PathBuf::from).collect();

    // 初始化并运行应用
    App::initialize(config).await?.run(&paths).await?;

    Ok(())
}
