//! 失败即放行（fail-open）的调用结果
//!
//! 能力层的调用从不返回错误：要么拿到服务结果，要么拿到兜底值和原因

use crate::models::StepStatus;

/// 能力调用结果
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome<T> {
    /// 服务正常返回
    Ok(T),
    /// 服务未启用，按约定直接给出默认值（不算失败）
    Skipped(T),
    /// 服务失败或不可用，使用兜底值
    Fallback { value: T, reason: String },
}

impl<T> Outcome<T> {
    pub fn fallback(value: T, reason: impl Into<String>) -> Self {
        Outcome::Fallback {
            value,
            reason: reason.into(),
        }
    }

    pub fn value(&self) -> &T {
        match self {
            Outcome::Ok(v) | Outcome::Skipped(v) => v,
            Outcome::Fallback { value, .. } => value,
        }
    }

    pub fn into_value(self) -> T {
        match self {
            Outcome::Ok(v) | Outcome::Skipped(v) => v,
            Outcome::Fallback { value, .. } => value,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Outcome::Fallback { .. })
    }

    /// 兜底原因
    pub fn reason(&self) -> Option<&str> {
        match self {
            Outcome::Fallback { reason, .. } => Some(reason),
            _ => None,
        }
    }

    pub fn status(&self) -> StepStatus {
        match self {
            Outcome::Ok(_) => StepStatus::Completed,
            Outcome::Skipped(_) => StepStatus::Skipped,
            Outcome::Fallback { .. } => StepStatus::FellBack,
        }
    }

    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> Outcome<U> {
        match self {
            Outcome::Ok(v) => Outcome::Ok(f(v)),
            Outcome::Skipped(v) => Outcome::Skipped(f(v)),
            Outcome::Fallback { value, reason } => Outcome::Fallback {
                value: f(value),
                reason,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_keeps_value_and_reason() {
        let outcome = Outcome::fallback("原文".to_string(), "timeout");
        assert!(outcome.is_fallback());
        assert_eq!(outcome.reason(), Some("timeout"));
        assert_eq!(outcome.status(), StepStatus::FellBack);
        assert_eq!(outcome.into_value(), "原文");
    }

    #[test]
    fn test_status_mapping() {
        assert_eq!(Outcome::Ok(1).status(), StepStatus::Completed);
        assert_eq!(Outcome::Skipped(1).status(), StepStatus::Skipped);
        assert_eq!(Outcome::Skipped(1).reason(), None);
    }

    #[test]
    fn test_map_preserves_variant() {
        let mapped = Outcome::fallback(2, "down").map(|v| v * 10);
        assert_eq!(mapped, Outcome::fallback(20, "down"));
    }
}
