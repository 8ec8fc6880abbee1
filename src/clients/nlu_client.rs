/// 自然语言理解（NLU）服务客户端
///
/// 对接 IBM Watson Natural Language Understanding v1 的 `analyze` 接口，
/// 请求文档级情感极性和五种情绪分数
use crate::config::Config;
use crate::error::{AppError, AppResult, NluError};
use crate::models::{Analysis, EmotionVector};
use crate::utils::logging::truncate_text;
use reqwest::Url;
use serde::Deserialize;
use serde_json::json;
use tracing::debug;

/// NLU 客户端
pub struct NluClient {
    http: reqwest::Client,
    api_key: String,
    analyze_url: Url,
    version: String,
}

#[derive(Debug, Deserialize)]
struct AnalyzeResponse {
    sentiment: Option<SentimentResult>,
    emotion: Option<EmotionResult>,
}

#[derive(Debug, Deserialize)]
struct SentimentResult {
    document: Option<DocumentSentiment>,
}

#[derive(Debug, Deserialize)]
struct DocumentSentiment {
    score: f64,
}

#[derive(Debug, Deserialize)]
struct EmotionResult {
    document: Option<DocumentEmotion>,
}

#[derive(Debug, Deserialize)]
struct DocumentEmotion {
    #[serde(default)]
    emotion: EmotionVector,
}

impl NluClient {
    /// 创建新的 NLU 客户端
    ///
    /// `service_url` 是实例地址（不含 `/v1/analyze`）
    pub fn new(api_key: &str, service_url: &str, version: &str) -> AppResult<Self> {
        let base = Url::parse(service_url.trim_end_matches('/'))
            .map_err(|e| AppError::invalid_url(service_url, e))?;
        if base.cannot_be_a_base() {
            return Err(AppError::invalid_url(service_url, "不是可用的基础地址"));
        }
        let analyze_url = Url::parse(&format!("{}/v1/analyze", base.as_str().trim_end_matches('/')))
            .map_err(|e| AppError::invalid_url(service_url, e))?;

        Ok(Self {
            http: reqwest::Client::new(),
            api_key: api_key.to_string(),
            analyze_url,
            version: version.to_string(),
        })
    }

    /// 根据配置创建；缺少凭据时返回 Ok(None)
    pub fn from_config(config: &Config) -> AppResult<Option<Self>> {
        match (config.nlu_api_key.as_deref(), config.nlu_url.as_deref()) {
            (Some(key), Some(url)) => Self::new(key, url, &config.nlu_version).map(Some),
            _ => Ok(None),
        }
    }

    pub fn analyze_url(&self) -> &Url {
        &self.analyze_url
    }

    /// 分析文本的情感和情绪
    pub async fn analyze(&self, text: &str) -> AppResult<Analysis> {
        let endpoint = self.analyze_url.as_str();
        debug!("调用 NLU API: {}，文本长度: {} 字符", endpoint, text.chars().count());

        let body = json!({
            "text": text,
            "features": {
                "sentiment": {},
                "emotion": {}
            }
        });

        let response = self
            .http
            .post(self.analyze_url.clone())
            .query(&[("version", self.version.as_str())])
            .basic_auth("apikey", Some(&self.api_key))
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::api_request_failed(endpoint, e))?;

        let status = response.status();
        let raw = response
            .text()
            .await
            .map_err(|e| AppError::api_request_failed(endpoint, e))?;

        if !status.is_success() {
            return Err(AppError::api_bad_response(
                endpoint,
                status.as_u16(),
                Some(truncate_text(&raw, 200)),
            ));
        }

        debug!("NLU API 调用成功");
        parse_analysis(&raw)
    }
}

/// 解析 analyze 响应
///
/// 情感分数和情绪对象必须存在；单个情绪缺失时按 0.0 处理
pub fn parse_analysis(raw: &str) -> AppResult<Analysis> {
    let response: AnalyzeResponse = serde_json::from_str(raw)?;

    let sentiment = response
        .sentiment
        .and_then(|s| s.document)
        .map(|d| d.score)
        .ok_or(AppError::Nlu(NluError::MissingField {
            field: "sentiment.document.score",
        }))?;

    let emotions = response
        .emotion
        .and_then(|e| e.document)
        .map(|d| d.emotion)
        .ok_or(AppError::Nlu(NluError::MissingField {
            field: "emotion.document.emotion",
        }))?;

    Ok(Analysis::new(sentiment, emotions))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_response() {
        let raw = r#"{
            "usage": {"text_units": 1, "text_characters": 42, "features": 2},
            "language": "en",
            "sentiment": {"document": {"score": -0.62, "label": "negative"}},
            "emotion": {"document": {"emotion": {
                "sadness": 0.51, "joy": 0.12, "fear": 0.33, "disgust": 0.08, "anger": 0.27
            }}}
        }"#;

        let analysis = parse_analysis(raw).unwrap();
        assert_eq!(analysis.sentiment, -0.62);
        assert_eq!(analysis.emotions.sadness, 0.51);
        assert_eq!(analysis.emotions.joy, 0.12);
        assert_eq!(analysis.emotions.fear, 0.33);
        assert_eq!(analysis.emotions.disgust, 0.08);
        assert_eq!(analysis.emotions.anger, 0.27);
    }

    #[test]
    fn test_parse_partial_emotions() {
        let raw = r#"{
            "sentiment": {"document": {"score": 0.3}},
            "emotion": {"document": {"emotion": {"joy": 0.9}}}
        }"#;

        let analysis = parse_analysis(raw).unwrap();
        assert_eq!(analysis.emotions.joy, 0.9);
        assert_eq!(analysis.emotions.anger, 0.0);
        assert_eq!(analysis.emotions.disgust, 0.0);
    }

    #[test]
    fn test_parse_missing_sentiment_is_error() {
        let raw = r#"{"emotion": {"document": {"emotion": {"joy": 0.9}}}}"#;
        let err = parse_analysis(raw).unwrap_err();
        assert!(matches!(err, AppError::Nlu(NluError::MissingField { .. })));
    }

    #[test]
    fn test_parse_invalid_json_is_error() {
        assert!(parse_analysis("not json").is_err());
    }

    #[test]
    fn test_analyze_url_is_built_from_service_url() {
        let client = NluClient::new(
            "key",
            "https://api.eu-de.natural-language-understanding.watson.cloud.ibm.com/instances/abc/",
            "2021-08-01",
        )
        .unwrap();
        assert_eq!(
            client.analyze_url().as_str(),
            "https://api.eu-de.natural-language-understanding.watson.cloud.ibm.com/instances/abc/v1/analyze"
        );
    }

    #[test]
    fn test_invalid_service_url() {
        assert!(NluClient::new("key", "not a url", "2021-08-01").is_err());
    }

    #[test]
    fn test_from_config_without_credentials() {
        let config = Config::default();
        assert!(NluClient::from_config(&config).unwrap().is_none());
    }
}
