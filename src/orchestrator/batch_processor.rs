//! 批量文章处理器 - 编排层
//!
//! ## 职责
//!
//! 本模块是整个应用的入口，负责批量文章的处理和资源管理。
//!
//! ## 核心功能
//!
//! 1. **应用初始化**：写日志头、按配置构建一次外部服务（`ServiceRegistry`）
//! 2. **批量加载**：读取命令行给出的文件，或扫描输入目录下的 .txt
//! 3. **顺序处理**：按上传顺序逐篇处理，一篇失败不影响其他文章
//! 4. **进度与警告**：通过 `BatchObserver` 发出信号
//! 5. **结果导出**：写 CSV，输出汇总统计

use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::models::{self, LoadedUploads, ResultSet, Upload};
use crate::orchestrator::observer::{BatchObserver, LogObserver, Progress};
use crate::services::{csv_writer, Analyzer, ServiceRegistry, Translator, WarnWriter};
use crate::utils::logging;
use crate::workflow::{ArticleCtx, ArticleFlow, PipelineWarning};

/// 批处理参数
#[derive(Debug, Clone, Copy)]
pub struct BatchOptions {
    pub max_chars: usize,
    pub verbose_logging: bool,
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            max_chars: models::MAX_CHARS,
            verbose_logging: false,
        }
    }
}

impl From<&Config> for BatchOptions {
    fn from(config: &Config) -> Self {
        Self {
            max_chars: config.max_chars.min(models::MAX_CHARS),
            verbose_logging: config.verbose_logging,
        }
    }
}

/// 一次批处理的产出
#[derive(Debug, Clone, Default)]
pub struct BatchReport {
    /// 与输入一一对应、顺序一致
    pub results: ResultSet,
    pub warnings: Vec<PipelineWarning>,
}

/// 顺序处理一批文章
///
/// 每篇文章的翻译、分析各尝试一次；任何失败都在单篇内部转为默认值
pub async fn process_batch(
    uploads: &[Upload],
    translator: &dyn Translator,
    analyzer: &dyn Analyzer,
    options: BatchOptions,
    observer: &mut dyn BatchObserver,
) -> AppResult<BatchReport> {
    if uploads.is_empty() {
        return Err(AppError::NoDocuments);
    }

    let total = uploads.len();
    let flow = ArticleFlow::new(translator, analyzer, options.max_chars)
        .verbose(options.verbose_logging);

    let mut report = BatchReport {
        results: ResultSet::with_capacity(total),
        warnings: Vec::new(),
    };

    for (idx, upload) in uploads.iter().enumerate() {
        let ctx = ArticleCtx::new(upload.name.clone(), idx + 1, total);
        info!("{} 开始处理", ctx);

        let outcome = flow.run(upload, &ctx).await;

        for warning in &outcome.warnings {
            observer.on_warning(warning);
        }
        report.warnings.extend(outcome.warnings);
        report.results.push(outcome.result);

        observer.on_progress(Progress {
            processed: idx + 1,
            total,
        });
    }

    Ok(report)
}

/// 应用主结构
pub struct App {
    config: Config,
    services: ServiceRegistry,
}

impl App {
    /// 初始化应用
    pub async fn initialize(config: Config) -> Result<Self> {
        // 初始化日志文件
        logging::init_log_file(&config.output_log_file)
            .with_context(|| format!("无法写入日志文件: {}", config.output_log_file))?;

        let services = ServiceRegistry::initialize(&config).await;
        Ok(Self::with_services(config, services))
    }

    /// 使用已构建好的服务创建应用
    pub fn with_services(config: Config, services: ServiceRegistry) -> Self {
        logging::log_startup(
            services.translator.label(),
            services.analyzer.is_configured(),
        );
        Self { config, services }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// 运行应用主逻辑
    ///
    /// `paths` 非空时按给定顺序处理，否则扫描输入目录
    pub async fn run(&self, paths: &[PathBuf]) -> Result<BatchReport> {
        let loaded = load_uploads(&self.config, paths).await?;
        let mut observer = LogObserver::new(WarnWriter::with_path(&self.config.warn_file));

        // 读取失败的文件不产生结果行，但要和其他警告一样记录
        let mut skipped: Vec<PipelineWarning> = loaded
            .skipped
            .into_iter()
            .map(|file| PipelineWarning::Unreadable {
                article: file.name,
                reason: file.reason,
            })
            .collect();
        for warning in &skipped {
            observer.on_warning(warning);
        }

        let uploads = loaded.uploads;
        if uploads.is_empty() {
            warn!("⚠️ {}", AppError::NoDocuments);
            return Ok(BatchReport {
                warnings: skipped,
                ..BatchReport::default()
            });
        }

        logging::log_documents_loaded(uploads.len());

        let mut report = process_batch(
            &uploads,
            &self.services.translator,
            &self.services.analyzer,
            BatchOptions::from(&self.config),
            &mut observer,
        )
        .await?;
        skipped.append(&mut report.warnings);
        report.warnings = skipped;

        csv_writer::export_csv(&report.results, &self.config.output_csv)
            .with_context(|| format!("无法导出结果: {}", self.config.output_csv))?;

        // 输出最终统计
        logging::print_final_stats(
            &report.results.summary(),
            report.warnings.len(),
            &self.config.output_csv,
        );

        Ok(report)
    }
}

/// 加载文章
async fn load_uploads(config: &Config, paths: &[PathBuf]) -> Result<LoadedUploads> {
    if paths.is_empty() {
        info!("\n📁 正在扫描待分析的文章: {}", config.input_folder);
        models::load_all_text_files(&config.input_folder).await
    } else {
        info!("\n📁 正在读取 {} 个指定文件", paths.len());
        models::load_uploads(paths).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Analysis, EmotionVector, StepStatus};
    use crate::orchestrator::observer::NoopObserver;
    use crate::services::{AnalysisBackend, Outcome, TranslationStrategy};
    use async_trait::async_trait;

    struct Upper;

    #[async_trait]
    impl Translator for Upper {
        async fn translate(&self, text: &str) -> Outcome<String> {
            Outcome::Ok(text.to_uppercase())
        }
    }

    /// 按文本长度给分，便于核对顺序
    struct ByLength;

    #[async_trait]
    impl Analyzer for ByLength {
        async fn analyze(&self, text: &str) -> Outcome<Analysis> {
            let len = text.chars().count() as f64;
            Outcome::Ok(Analysis::new(
                len / 100.0,
                EmotionVector {
                    fear: 0.5,
                    ..Default::default()
                },
            ))
        }
    }

    #[derive(Default)]
    struct Recorder {
        progress: Vec<f64>,
        warnings: Vec<PipelineWarning>,
    }

    impl BatchObserver for Recorder {
        fn on_progress(&mut self, progress: Progress) {
            self.progress.push(progress.fraction());
        }

        fn on_warning(&mut self, warning: &PipelineWarning) {
            self.warnings.push(warning.clone());
        }
    }

    #[tokio::test]
    async fn test_empty_batch_is_rejected() {
        let result = process_batch(
            &[],
            &Upper,
            &ByLength,
            BatchOptions::default(),
            &mut NoopObserver,
        )
        .await;
        assert!(matches!(result, Err(AppError::NoDocuments)));
    }

    #[tokio::test]
    async fn test_rows_match_uploads_in_order() {
        let uploads = vec![
            Upload::new("c.txt", "x"),
            Upload::new("a.txt", "xxxxxxxxxx"),
            Upload::new("b.txt", "xxxxx"),
        ];
        let mut recorder = Recorder::default();

        let report = process_batch(
            &uploads,
            &Upper,
            &ByLength,
            BatchOptions::default(),
            &mut recorder,
        )
        .await
        .unwrap();

        let names: Vec<_> = report.results.rows().iter().map(|r| r.article.as_str()).collect();
        assert_eq!(names, vec!["c.txt", "a.txt", "b.txt"]);
        let scores: Vec<_> = report.results.rows().iter().map(|r| r.sentiment).collect();
        assert_eq!(scores, vec![0.01, 0.1, 0.05]);
        assert_eq!(recorder.progress, vec![1.0 / 3.0, 2.0 / 3.0, 1.0]);
        assert!(recorder.warnings.is_empty());
    }

    #[tokio::test]
    async fn test_scenario_short_and_oversized_documents() {
        let uploads = vec![
            Upload::new("hello.txt", "Hello world"),
            Upload::new("big.txt", "é".repeat(16_000)),
        ];
        let mut recorder = Recorder::default();

        let report = process_batch(
            &uploads,
            &Upper,
            &ByLength,
            BatchOptions::default(),
            &mut recorder,
        )
        .await
        .unwrap();

        assert_eq!(report.results.len(), 2);
        let first = &report.results.rows()[0];
        assert_eq!(first.article, "hello.txt");
        assert_eq!(first.source_text, "Hello world");
        assert_eq!(first.translated_text, "HELLO WORLD");

        let second = &report.results.rows()[1];
        assert_eq!(second.source_text.chars().count(), 15_000);
        assert_eq!(recorder.warnings.len(), 1);
        assert!(matches!(
            recorder.warnings[0],
            PipelineWarning::Truncated { original_chars: 16_000, .. }
        ));

        for row in report.results.rows() {
            assert_eq!(row.emotions.iter().count(), 5);
            assert!((-1.0..=1.0).contains(&row.sentiment));
        }
    }

    #[tokio::test]
    async fn test_unconfigured_services_give_neutral_rows() {
        let config = Config::default();
        let translator = TranslationStrategy::without_local(&config);
        let analyzer = AnalysisBackend::from_config(&config);
        let uploads = vec![
            Upload::new("a.txt", "Les marchés ont chuté."),
            Upload::new("b.txt", "Die Börse stieg."),
        ];
        let mut recorder = Recorder::default();

        let report = process_batch(
            &uploads,
            &translator,
            &analyzer,
            BatchOptions::default(),
            &mut recorder,
        )
        .await
        .unwrap();

        for row in report.results.rows() {
            assert_eq!(row.sentiment, 0.0);
            assert_eq!(row.emotions, EmotionVector::zero());
            assert_eq!(row.translation, StepStatus::Skipped);
            assert_eq!(row.analysis, StepStatus::FellBack);
        }
        // 未配置的分析服务每篇都会产生一条警告
        assert_eq!(recorder.warnings.len(), 2);
        assert_eq!(report.results.summary().fallbacks, 2);
    }

    #[tokio::test]
    async fn test_custom_max_chars() {
        let uploads = vec![Upload::new("a.txt", "abcdefghij")];
        let options = BatchOptions {
            max_chars: 4,
            verbose_logging: true,
        };

        let report = process_batch(&uploads, &Upper, &ByLength, options, &mut NoopObserver)
            .await
            .unwrap();

        assert_eq!(report.results.rows()[0].translated_text, "ABCD");
        assert_eq!(report.warnings.len(), 1);
    }

    #[tokio::test]
    async fn test_max_chars_above_cap_still_truncates_at_cap() {
        let config = Config {
            max_chars: 50_000,
            ..Config::default()
        };
        let options = BatchOptions::from(&config);
        assert_eq!(options.max_chars, models::MAX_CHARS);

        let uploads = vec![Upload::new("long.txt", "x".repeat(20_000))];
        let raised = BatchOptions {
            max_chars: 50_000,
            verbose_logging: false,
        };
        let report = process_batch(&uploads, &Upper, &ByLength, raised, &mut NoopObserver)
            .await
            .unwrap();

        assert_eq!(report.results.rows()[0].source_text.chars().count(), models::MAX_CHARS);
        assert!(matches!(
            report.warnings.as_slice(),
            [PipelineWarning::Truncated { original_chars: 20_000, .. }]
        ));
    }
}
