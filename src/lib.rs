//! # News Bias Analyzer
//!
//! 多语言新闻情感 / 情绪对比分析工具
//!
//! ## 架构设计
//!
//! 本系统采用四层架构：
//!
//! ### ① 外部服务层（Clients）
//! - `clients/` - 只负责与外部服务通信
//! - `LlmClient` - 生成式语言模型（翻译）
//! - `NluClient` - 自然语言理解服务（情感 + 情绪）
//! - `LocalTranslatorClient` - 本地加速翻译模型
//!
//! ### ② 业务能力层（Services）
//! - `services/` - 描述"我能做什么"，只处理单篇文章
//! - `Translator` / `Analyzer` - 失败即放行的翻译和分析能力
//! - `WarnWriter` - 写 warn.txt 能力
//! - `csv_writer` - 导出结果
//!
//! ### ③ 流程层（Workflow）
//! - `workflow/` - 定义"一篇文章"的完整处理流程
//! - `ArticleCtx` - 上下文封装（文章名 + 序号）
//! - `ArticleFlow` - 流程编排（截断 → 翻译 → 分析 → 结果行）
//!
//! ### ④ 编排层（Orchestration）
//! - `orchestrator/batch_processor` - 批量处理器，管理服务和进度
//!
//! ## 模块结构

pub mod clients;
pub mod config;
pub mod error;
pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use config::Config;
pub use error::{AppError, AppResult};
pub use models::{AnalysisResult, Document, EmotionVector, ResultSet, Upload};
pub use orchestrator::{process_batch, App, BatchObserver, BatchOptions, BatchReport};
pub use services::{Analyzer, Outcome, ServiceRegistry, Translator};
pub use workflow::{ArticleCtx, ArticleFlow, PipelineWarning};
