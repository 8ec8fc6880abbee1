//! 分析结果模型
//!
//! 情感向量、单篇文章的结果行，以及整批结果集

use serde::{Deserialize, Serialize};
use std::fmt;

/// 五种基础情绪
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Emotion {
    Joy,
    Sadness,
    Anger,
    Fear,
    Disgust,
}

impl Emotion {
    /// 固定的列顺序
    pub const ALL: [Emotion; 5] = [
        Emotion::Joy,
        Emotion::Sadness,
        Emotion::Anger,
        Emotion::Fear,
        Emotion::Disgust,
    ];

    /// 与 NLU 服务及 CSV 列一致的名称
    pub fn as_str(&self) -> &'static str {
        match self {
            Emotion::Joy => "joy",
            Emotion::Sadness => "sadness",
            Emotion::Anger => "anger",
            Emotion::Fear => "fear",
            Emotion::Disgust => "disgust",
        }
    }

    /// 展示用名称（首字母大写）
    pub fn label(&self) -> &'static str {
        match self {
            Emotion::Joy => "Joy",
            Emotion::Sadness => "Sadness",
            Emotion::Anger => "Anger",
            Emotion::Fear => "Fear",
            Emotion::Disgust => "Disgust",
        }
    }
}

impl fmt::Display for Emotion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 情感向量
///
/// 五个分量始终存在，缺失时为 0.0
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct EmotionVector {
    #[serde(default)]
    pub joy: f64,
    #[serde(default)]
    pub sadness: f64,
    #[serde(default)]
    pub anger: f64,
    #[serde(default)]
    pub fear: f64,
    #[serde(default)]
    pub disgust: f64,
}

impl EmotionVector {
    /// 全零向量
    pub fn zero() -> Self {
        Self::default()
    }

    pub fn get(&self, emotion: Emotion) -> f64 {
        match emotion {
            Emotion::Joy => self.joy,
            Emotion::Sadness => self.sadness,
            Emotion::Anger => self.anger,
            Emotion::Fear => self.fear,
            Emotion::Disgust => self.disgust,
        }
    }

    /// 把每个分量限制在 [0, 1]，非有限值视为 0
    pub fn clamped(self) -> Self {
        let c = |v: f64| if v.is_finite() { v.clamp(0.0, 1.0) } else { 0.0 };
        Self {
            joy: c(self.joy),
            sadness: c(self.sadness),
            anger: c(self.anger),
            fear: c(self.fear),
            disgust: c(self.disgust),
        }
    }

    /// 按固定顺序返回 (情绪, 分数)
    pub fn iter(&self) -> impl Iterator<Item = (Emotion, f64)> + '_ {
        Emotion::ALL.into_iter().map(move |e| (e, self.get(e)))
    }
}

/// 一次分析调用的结果
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Analysis {
    /// 情感极性 [-1, 1]
    pub sentiment: f64,
    pub emotions: EmotionVector,
}

impl Analysis {
    /// 构建并规范化分数范围
    pub fn new(sentiment: f64, emotions: EmotionVector) -> Self {
        let sentiment = if sentiment.is_finite() {
            sentiment.clamp(-1.0, 1.0)
        } else {
            0.0
        };
        Self {
            sentiment,
            emotions: emotions.clamped(),
        }
    }

    /// 中性默认值：情感 0.0，情绪全零
    pub fn neutral() -> Self {
        Self::default()
    }
}

/// 某个处理步骤是否使用了服务返回值
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepStatus {
    /// 服务正常返回
    Completed,
    /// 服务未配置（直接透传 / 默认值）
    Skipped,
    /// 服务失败，使用了兜底值
    FellBack,
}

/// 单篇文章的结果行
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisResult {
    /// 文章标识
    pub article: String,
    pub sentiment: f64,
    pub emotions: EmotionVector,
    /// 送去翻译的正文（可能已截断）
    pub source_text: String,
    /// 送去分析的文本（译文或兜底原文）
    pub translated_text: String,
    pub translation: StepStatus,
    pub analysis: StepStatus,
}

/// 结果集（按上传顺序排列）
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultSet {
    rows: Vec<AnalysisResult>,
}

impl ResultSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            rows: Vec::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, row: AnalysisResult) {
        self.rows.push(row);
    }

    pub fn rows(&self) -> &[AnalysisResult] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// 按文章标识查找
    pub fn get(&self, article: &str) -> Option<&AnalysisResult> {
        self.rows.iter().find(|r| r.article == article)
    }

    /// 汇总指标
    pub fn summary(&self) -> Summary {
        let total = self.rows.len();
        if total == 0 {
            return Summary::default();
        }

        let n = total as f64;
        let average_sentiment = self.rows.iter().map(|r| r.sentiment).sum::<f64>() / n;

        let mut dominant: Option<(Emotion, f64)> = None;
        for emotion in Emotion::ALL {
            let mean = self.rows.iter().map(|r| r.emotions.get(emotion)).sum::<f64>() / n;
            // 并列时保留列顺序靠前的
            if dominant.map_or(true, |(_, best)| mean > best) {
                dominant = Some((emotion, mean));
            }
        }

        Summary {
            total,
            average_sentiment: (average_sentiment * 1000.0).round() / 1000.0,
            dominant_emotion: dominant.map(|(e, _)| e),
            fallbacks: self
                .rows
                .iter()
                .filter(|r| r.analysis == StepStatus::FellBack || r.translation == StepStatus::FellBack)
                .count(),
        }
    }
}

impl IntoIterator for ResultSet {
    type Item = AnalysisResult;
    type IntoIter = std::vec::IntoIter<AnalysisResult>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.into_iter()
    }
}

/// 结果集汇总
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Summary {
    pub total: usize,
    /// 平均情感（保留 3 位小数）
    pub average_sentiment: f64,
    pub dominant_emotion: Option<Emotion>,
    /// 至少一个步骤使用了兜底值的文章数
    pub fallbacks: usize,
}
