//! 分析服务 - 业务能力层
//!
//! 只负责"情感 + 情绪打分"能力，不关心流程

use async_trait::async_trait;
use tracing::{info, warn};

use crate::clients::NluClient;
use crate::config::Config;
use crate::models::Analysis;
use crate::services::outcome::Outcome;

/// 分析能力
///
/// 职责：
/// - 对单篇（已翻译的）文本打分
/// - 服务未配置或调用失败时返回中性默认值，从不向上抛错
#[async_trait]
pub trait Analyzer: Send + Sync {
    async fn analyze(&self, text: &str) -> Outcome<Analysis>;
}

/// 分析后端
pub enum AnalysisBackend {
    /// 远端 NLU 服务
    Nlu(NluClient),
    /// 启动时未能配置
    Unconfigured { reason: String },
}

impl AnalysisBackend {
    /// 启动时构建一次
    pub fn from_config(config: &Config) -> Self {
        match NluClient::from_config(config) {
            Ok(Some(client)) => {
                info!("✓ NLU 服务已配置: {}", client.analyze_url());
                AnalysisBackend::Nlu(client)
            }
            Ok(None) => {
                warn!("⚠️ 缺少 NLU_API_KEY 或 NLU_URL，所有文章将使用中性默认分数");
                AnalysisBackend::Unconfigured {
                    reason: "NLU 服务未配置".to_string(),
                }
            }
            Err(e) => {
                warn!("⚠️ NLU 客户端初始化失败: {}", e);
                AnalysisBackend::Unconfigured {
                    reason: format!("NLU 客户端初始化失败: {}", e),
                }
            }
        }
    }

    pub fn is_configured(&self) -> bool {
        matches!(self, AnalysisBackend::Nlu(_))
    }
}

#[async_trait]
impl Analyzer for AnalysisBackend {
    async fn analyze(&self, text: &str) -> Outcome<Analysis> {
        match self {
            AnalysisBackend::Nlu(client) => match client.analyze(text).await {
                Ok(analysis) => Outcome::Ok(analysis),
                Err(e) => {
                    warn!("NLU 分析失败: {}", e);
                    Outcome::fallback(Analysis::neutral(), e.to_string())
                }
            },
            AnalysisBackend::Unconfigured { reason } => {
                Outcome::fallback(Analysis::neutral(), reason.clone())
            }
        }
    }
}
