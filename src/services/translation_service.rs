//! 翻译服务 - 业务能力层
//!
//! 只负责"把任意文本翻译成英文"能力，不关心流程
//!
//! ## 策略
//! 启动时选定一次，运行期间不再切换：
//! 1. `Local` - 本地加速模型已就绪时优先使用
//! 2. `Remote` - 配置了生成式语言 API key 时调用远端服务
//! 3. `Passthrough` - 都不可用时原样返回

use async_trait::async_trait;
use tracing::{info, warn};

use crate::clients::{LlmClient, LocalTranslatorClient};
use crate::config::Config;
use crate::services::outcome::Outcome;

/// 翻译能力
///
/// 职责：
/// - 只处理单篇文本
/// - 失败时返回原文（`Outcome::Fallback`），从不向上抛错
#[async_trait]
pub trait Translator: Send + Sync {
    async fn translate(&self, text: &str) -> Outcome<String>;
}

/// 翻译策略
pub enum TranslationStrategy {
    /// 本地加速模型
    Local(LocalTranslatorClient),
    /// 远端生成式语言服务
    Remote(LlmClient),
    /// 不翻译
    Passthrough,
}

impl TranslationStrategy {
    /// 根据配置选择策略
    ///
    /// 本地模型需要通过健康检查才算"已初始化"
    pub async fn select(config: &Config) -> Self {
        if let Some(url) = config.local_translator_url.as_deref() {
            match LocalTranslatorClient::new(url) {
                Ok(client) => match client.health_check().await {
                    Ok(()) => {
                        info!("✓ 本地翻译模型已就绪: {}", url);
                        return TranslationStrategy::Local(client);
                    }
                    Err(e) => warn!("⚠️ 本地翻译模型不可用，改用远端服务: {}", e),
                },
                Err(e) => warn!("⚠️ 本地翻译地址无效: {}", e),
            }
        }

        Self::without_local(config)
    }

    /// 不探测本地模型，只在远端和透传之间选择
    pub fn without_local(config: &Config) -> Self {
        match LlmClient::from_config(config) {
            Some(client) => {
                info!("✓ 使用远端翻译服务，模型: {}", client.model_name());
                TranslationStrategy::Remote(client)
            }
            None => {
                warn!("⚠️ 未配置翻译服务，文章将以原文参与分析");
                TranslationStrategy::Passthrough
            }
        }
    }

    /// 策略名称（用于日志）
    pub fn label(&self) -> &'static str {
        match self {
            TranslationStrategy::Local(_) => "local",
            TranslationStrategy::Remote(_) => "remote",
            TranslationStrategy::Passthrough => "passthrough",
        }
    }
}

#[async_trait]
impl Translator for TranslationStrategy {
    async fn translate(&self, text: &str) -> Outcome<String> {
        let result = match self {
            TranslationStrategy::Local(client) => client.translate(text).await,
            TranslationStrategy::Remote(client) => client.translate(text).await,
            TranslationStrategy::Passthrough => return Outcome::Skipped(text.to_string()),
        };

        match result {
            Ok(translated) => Outcome::Ok(translated),
            Err(e) => {
                warn!("翻译失败 ({}): {}", self.label(), e);
                Outcome::fallback(text.to_string(), e.to_string())
            }
        }
    }
}
