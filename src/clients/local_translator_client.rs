/// 本地加速翻译服务客户端
///
/// 对接本机运行的 M2M100 推理服务（GPU），接口：
/// - `GET  {base}/health`
/// - `POST {base}/translate` `{"text", "target_lang", "max_length"}` → `{"translation"}`
use crate::error::{AppError, AppResult};
use crate::utils::logging::truncate_text;
use reqwest::Url;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// 默认模型（仅用于日志）
pub const LOCAL_MODEL_NAME: &str = "facebook/m2m100_418M";
/// 目标语言代码
pub const TARGET_LANG: &str = "en";
/// 模型输入截断长度（token）
pub const MAX_INPUT_TOKENS: usize = 768;

/// 本地翻译客户端
pub struct LocalTranslatorClient {
    http: reqwest::Client,
    base_url: Url,
}

#[derive(Debug, Serialize)]
struct TranslateRequest<'a> {
    text: &'a str,
    target_lang: &'a str,
    max_length: usize,
}

#[derive(Debug, Deserialize)]
struct TranslateResponse {
    translation: String,
}

impl LocalTranslatorClient {
    pub fn new(base_url: &str) -> AppResult<Self> {
        let normalized = format!("{}/", base_url.trim_end_matches('/'));
        let base_url =
            Url::parse(&normalized).map_err(|e| AppError::invalid_url(base_url, e))?;

        Ok(Self {
            http: reqwest::Client::new(),
            base_url,
        })
    }

    fn endpoint(&self, path: &str) -> AppResult<Url> {
        self.base_url
            .join(path)
            .map_err(|e| AppError::invalid_url(self.base_url.as_str(), e))
    }

    /// 启动时探测模型是否已加载
    pub async fn health_check(&self) -> AppResult<()> {
        let url = self.endpoint("health")?;
        let response = self
            .http
            .get(url.clone())
            .send()
            .await
            .map_err(|e| AppError::api_request_failed(url.as_str(), e))?;

        if !response.status().is_success() {
            return Err(AppError::api_bad_response(
                url.as_str(),
                response.status().as_u16(),
                None,
            ));
        }
        Ok(())
    }

    /// 翻译为英文
    pub async fn translate(&self, text: &str) -> AppResult<String> {
        let url = self.endpoint("translate")?;
        debug!("调用本地翻译模型 {}，文本长度: {} 字符", LOCAL_MODEL_NAME, text.chars().count());

        let request = TranslateRequest {
            text,
            target_lang: TARGET_LANG,
            max_length: MAX_INPUT_TOKENS,
        };

        let response = self
            .http
            .post(url.clone())
            .json(&request)
            .send()
            .await
            .map_err(|e| AppError::api_request_failed(url.as_str(), e))?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.ok().map(|t| truncate_text(&t, 200));
            return Err(AppError::api_bad_response(url.as_str(), status.as_u16(), message));
        }

        let body: TranslateResponse = response
            .json()
            .await
            .map_err(|e| AppError::api_request_failed(url.as_str(), e))?;

        Ok(body.translation)
    }
}
