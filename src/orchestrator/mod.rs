//! 编排层（Orchestration Layer）
//!
//! ## 职责
//!
//! 本层负责批量处理和流程调度，是整个系统的"指挥中心"。
//!
//! ## 模块划分
//!
//! ### `batch_processor` - 批量文章处理器
//! - 管理应用生命周期（初始化、运行、导出）
//! - 批量加载文章（Vec<Upload>）
//! - 按上传顺序逐篇调用 `ArticleFlow`
//! - 输出全局统计信息
//!
//! ### `observer` - 进度和警告信号
//! - `BatchObserver` 只观察，不改变数据
//!
//! ## 层次关系
//!
//! ```text
//! batch_processor (处理 Vec<Upload>)
//!     ↓
//! workflow::ArticleFlow (处理单篇文章)
//!     ↓
//! services (能力层：translate / analyze / warn / csv)
//!     ↓
//! clients (外部服务：LLM / NLU / 本地模型)
//! ```

pub mod batch_processor;
pub mod observer;

// 重新导出主要类型
pub use batch_processor::{process_batch, App, BatchOptions, BatchReport};
pub use observer::{BatchObserver, LogObserver, NoopObserver, Progress};
