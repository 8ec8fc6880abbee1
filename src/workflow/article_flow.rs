//! 文章处理流程 - 流程层
//!
//! 核心职责：定义"一篇文章"的完整处理流程
//!
//! 流程顺序：
//! 1. 解码（丢弃非法字节）
//! 2. 超长截断 → 警告
//! 3. 翻译（失败则用原文）→ 警告
//! 4. 分析（失败则用中性默认值）→ 警告
//! 5. 组装结果行

use std::fmt;

use tracing::{debug, info, warn};

use crate::models::{AnalysisResult, Document, Upload, MAX_CHARS};
use crate::services::{Analyzer, Translator};
use crate::utils::logging::truncate_text;
use crate::workflow::article_ctx::ArticleCtx;

/// 非致命警告
#[derive(Debug, Clone, PartialEq)]
pub enum PipelineWarning {
    /// 文章超长，已截断
    Truncated {
        article: String,
        original_chars: usize,
        kept_chars: usize,
    },
    /// 翻译失败，使用原文
    TranslationFailed { article: String, reason: String },
    /// 分析失败，使用默认值
    AnalysisFailed { article: String, reason: String },
    /// 文件无法读取，未进入处理
    Unreadable { article: String, reason: String },
}

impl PipelineWarning {
    pub fn article(&self) -> &str {
        match self {
            PipelineWarning::Truncated { article, .. }
            | PipelineWarning::TranslationFailed { article, .. }
            | PipelineWarning::AnalysisFailed { article, .. }
            | PipelineWarning::Unreadable { article, .. } => article,
        }
    }
}

impl fmt::Display for PipelineWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PipelineWarning::Truncated {
                article,
                original_chars,
                kept_chars,
            } => write!(
                f,
                "{} 过长 ({} 字符)，已截断为前 {} 个字符",
                article, original_chars, kept_chars
            ),
            PipelineWarning::TranslationFailed { article, reason } => {
                write!(f, "{} 翻译失败，使用原文: {}", article, reason)
            }
            PipelineWarning::AnalysisFailed { article, reason } => {
                write!(f, "{} 分析失败，使用默认值: {}", article, reason)
            }
            PipelineWarning::Unreadable { article, reason } => {
                write!(f, "{} 无法读取，已跳过: {}", article, reason)
            }
        }
    }
}

/// 单篇文章的处理结果
#[derive(Debug, Clone)]
pub struct ArticleOutcome {
    pub result: AnalysisResult,
    pub warnings: Vec<PipelineWarning>,
}

/// 文章处理流程
///
/// - 编排单篇文章的处理顺序
/// - 每个能力只调用一次，不重试
/// - 不持有任何资源，只借用能力层
pub struct ArticleFlow<'a> {
    translator: &'a dyn Translator,
    analyzer: &'a dyn Analyzer,
    max_chars: usize,
    verbose_logging: bool,
}

impl<'a> ArticleFlow<'a> {
    /// 创建新的文章处理流程
    ///
    /// `max_chars` 只能收紧上限，超过 `MAX_CHARS` 的值按 `MAX_CHARS` 处理
    pub fn new(translator: &'a dyn Translator, analyzer: &'a dyn Analyzer, max_chars: usize) -> Self {
        Self {
            translator,
            analyzer,
            max_chars: max_chars.min(MAX_CHARS),
            verbose_logging: false,
        }
    }

    pub fn verbose(mut self, verbose_logging: bool) -> Self {
        self.verbose_logging = verbose_logging;
        self
    }

    pub async fn run(&self, upload: &Upload, ctx: &ArticleCtx) -> ArticleOutcome {
        let mut warnings = Vec::new();

        // ========== 1-2: 解码 + 截断 ==========
        let document = Document::from_bytes(&upload.name, &upload.bytes, self.max_chars);
        if document.is_truncated() {
            let warning = PipelineWarning::Truncated {
                article: document.name.clone(),
                original_chars: document.original_chars,
                kept_chars: document.char_count(),
            };
            warn!("{} ⚠️ {}", ctx, warning);
            warnings.push(warning);
        }

        if self.verbose_logging {
            self.log_preview(ctx, "原文", &document.text);
        }

        // ========== 3: 翻译 ==========
        info!("{} 🌐 正在翻译...", ctx);
        let translation = self.translator.translate(&document.text).await;
        let translation_status = translation.status();
        if let Some(reason) = translation.reason() {
            let warning = PipelineWarning::TranslationFailed {
                article: document.name.clone(),
                reason: reason.to_string(),
            };
            warn!("{} ⚠️ {}", ctx, warning);
            warnings.push(warning);
        }
        let translated_text = translation.into_value();

        if self.verbose_logging {
            self.log_preview(ctx, "译文", &translated_text);
        }

        // ========== 4: 分析 ==========
        info!("{} 📊 正在分析...", ctx);
        let analysis = self.analyzer.analyze(&translated_text).await;
        let analysis_status = analysis.status();
        if let Some(reason) = analysis.reason() {
            let warning = PipelineWarning::AnalysisFailed {
                article: document.name.clone(),
                reason: reason.to_string(),
            };
            warn!("{} ⚠️ {}", ctx, warning);
            warnings.push(warning);
        }
        let analysis = analysis.into_value();

        debug!(
            "{} 情感: {:.3}, 情绪: {:?}",
            ctx, analysis.sentiment, analysis.emotions
        );

        // ========== 5: 结果行 ==========
        let result = AnalysisResult {
            article: document.name,
            sentiment: analysis.sentiment,
            emotions: analysis.emotions,
            source_text: document.text,
            translated_text,
            translation: translation_status,
            analysis: analysis_status,
        };

        ArticleOutcome { result, warnings }
    }

    // ========== 日志辅助方法 ==========

    fn log_preview(&self, ctx: &ArticleCtx, label: &str, text: &str) {
        info!("{} {}: {}", ctx, label, truncate_text(text, 80));
    }
}
