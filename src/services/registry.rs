//! 服务注册表
//!
//! 启动时根据配置构建一次，之后以引用方式传给编排层

use crate::config::Config;
use crate::services::analysis_service::AnalysisBackend;
use crate::services::translation_service::TranslationStrategy;

/// 进程内唯一的一组外部服务
pub struct ServiceRegistry {
    pub translator: TranslationStrategy,
    pub analyzer: AnalysisBackend,
}

impl ServiceRegistry {
    /// 选择翻译策略并配置分析后端
    pub async fn initialize(config: &Config) -> Self {
        Self {
            translator: TranslationStrategy::select(config).await,
            analyzer: AnalysisBackend::from_config(config),
        }
    }
}
