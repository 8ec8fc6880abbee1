//! 生成式语言模型客户端
//!
//! ## 技术栈
//! - 使用 `async-openai` crate 进行 API 调用
//! - Gemini 通过其 OpenAI 兼容端点访问，也可以换成任何兼容 OpenAI API 的服务

use std::time::Duration;

use async_openai::{
    config::OpenAIConfig,
    types::chat::{
        ChatCompletionRequestMessage, ChatCompletionRequestUserMessageArgs,
        CreateChatCompletionRequestArgs,
    },
    Client,
};
use backoff::{ExponentialBackoff, ExponentialBackoffBuilder};
use tracing::{debug, warn};

use crate::config::Config;
use crate::error::{AppError, AppResult, LlmError};

/// 翻译目标语言
pub const TARGET_LANGUAGE: &str = "English";

/// 构建翻译提示词
pub fn translation_prompt(text: &str) -> String {
    format!("Translate the following text to {}:\n{}", TARGET_LANGUAGE, text)
}

/// 不重试的退避策略
///
/// async-openai 默认会对 429 等响应指数退避重试；每篇文章只能调用一次，
/// 所以把总耗时上限设为 0，第一次失败就直接返回
pub fn no_retry_backoff() -> ExponentialBackoff {
    ExponentialBackoffBuilder::new()
        .with_max_elapsed_time(Some(Duration::ZERO))
        .build()
}

/// LLM 客户端
pub struct LlmClient {
    client: Client<OpenAIConfig>,
    model_name: String,
}

impl LlmClient {
    /// 创建新的 LLM 客户端
    pub fn new(api_key: &str, api_base_url: &str, model_name: impl Into<String>) -> Self {
        let openai_config = OpenAIConfig::new()
            .with_api_key(api_key)
            .with_api_base(api_base_url);

        Self {
            client: Client::with_config(openai_config).with_backoff(no_retry_backoff()),
            model_name: model_name.into(),
        }
    }

    /// 根据配置创建；没有 API key 时返回 None
    pub fn from_config(config: &Config) -> Option<Self> {
        let api_key = config.gemini_api_key.as_deref()?;
        Some(Self::new(
            api_key,
            &config.gemini_api_base_url,
            config.gemini_model_name.clone(),
        ))
    }

    pub fn model_name(&self) -> &str {
        &self.model_name
    }

    /// 发送单条用户消息，返回模型回复原文
    pub async fn chat(&self, user_message: &str) -> AppResult<String> {
        debug!("调用 LLM API，模型: {}", self.model_name);
        debug!("用户消息长度: {} 字符", user_message.chars().count());

        let user_msg = ChatCompletionRequestUserMessageArgs::default()
            .content(user_message)
            .build()
            .map_err(|e| AppError::llm_api_failed(&self.model_name, e))?;

        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model_name)
            .messages(vec![ChatCompletionRequestMessage::User(user_msg)])
            .build()
            .map_err(|e| AppError::llm_api_failed(&self.model_name, e))?;

        let response = self.client.chat().create(request).await.map_err(|e| {
            warn!("LLM API 调用失败: {}", e);
            AppError::llm_api_failed(&self.model_name, e)
        })?;

        debug!("LLM API 调用成功");

        response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| {
                AppError::Llm(LlmError::EmptyContent {
                    model: self.model_name.clone(),
                })
            })
    }

    /// 把文本翻译成英文
    pub async fn translate(&self, text: &str) -> AppResult<String> {
        self.chat(&translation_prompt(text)).await
    }
}
