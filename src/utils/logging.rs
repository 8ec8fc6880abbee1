use anyhow::Result;
/// 日志工具模块
///
/// 提供日志初始化、格式化和输出的辅助函数
use std::fs;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::models::Summary;

/// 初始化 tracing
///
/// `RUST_LOG` 优先；否则 verbose 时为 debug，默认 info
pub fn init(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false))
        .with(filter)
        .try_init()
        .ok();
}

/// 初始化日志文件
///
/// # 参数
/// - `log_file_path`: 日志文件路径
pub fn init_log_file(log_file_path: &str) -> Result<()> {
    let log_header = format!(
        "{}\n新闻情感分析日志 - {}\n{}\n\n",
        "=".repeat(60),
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
        "=".repeat(60)
    );
    fs::write(log_file_path, log_header)?;
    Ok(())
}

/// 记录程序启动信息
///
/// # 参数
/// - `translator`: 翻译策略名称
/// - `analyzer_ready`: NLU 是否已配置
pub fn log_startup(translator: &str, analyzer_ready: bool) {
    info!("{}", "=".repeat(60));
    info!("🚀 程序启动 - 多语言新闻情感分析");
    info!("🌐 翻译策略: {}", translator);
    info!(
        "📊 NLU 服务: {}",
        if analyzer_ready { "已配置" } else { "未配置（使用默认值）" }
    );
    info!("{}", "=".repeat(60));
}

/// 记录文章加载信息
pub fn log_documents_loaded(total: usize) {
    info!("✓ 找到 {} 篇待分析的文章", total);
    info!("💡 按上传顺序逐篇处理\n");
}

/// 记录进度
///
/// # 参数
/// - `processed`: 已处理数量
/// - `total`: 总数
pub fn log_progress(processed: usize, total: usize) {
    let fraction = if total == 0 {
        1.0
    } else {
        processed as f64 / total as f64
    };
    info!(
        "⏳ 进度: {}/{} ({:.0}%)",
        processed,
        total,
        fraction * 100.0
    );
}

/// 打印最终统计信息
///
/// # 参数
/// - `summary`: 结果集汇总
/// - `warnings`: 警告数量
/// - `csv_path`: 结果文件路径
pub fn print_final_stats(summary: &Summary, warnings: usize, csv_path: &str) {
    info!("\n{}", "=".repeat(60));
    info!("📊 全部处理完成统计");
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("{}", "=".repeat(60));
    info!("📰 文章总数: {}", summary.total);
    info!("⚖️ 平均情感: {}", summary.average_sentiment);
    info!(
        "🔥 主导情绪: {}",
        dominant_emotion_label(summary)
    );
    info!("⚠️ 使用兜底值: {} 篇, 警告 {} 条", summary.fallbacks, warnings);
    info!("{}", "=".repeat(60));
    info!("\n结果已保存至: {}", csv_path);
}

/// 主导情绪的展示名称，没有结果时为 "-"
pub fn dominant_emotion_label(summary: &Summary) -> &'static str {
    summary.dominant_emotion.map_or("-", |e| e.label())
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dominant_emotion_is_capitalized() {
        let mut summary = Summary {
            total: 1,
            average_sentiment: 0.2,
            dominant_emotion: Some(crate::models::Emotion::Joy),
            fallbacks: 0,
        };
        assert_eq!(dominant_emotion_label(&summary), "Joy");

        summary.dominant_emotion = None;
        assert_eq!(dominant_emotion_label(&summary), "-");
    }

    #[test]
    fn test_truncate_text() {
        assert_eq!(truncate_text("short", 10), "short");
        assert_eq!(truncate_text("新闻标题很长很长", 4), "新闻标题...");
    }

    #[test]
    fn test_init_log_file_writes_header() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("output.txt");
        init_log_file(path.to_str().unwrap()).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("新闻情感分析日志"));
    }
}
