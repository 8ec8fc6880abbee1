//! 批处理观察者
//!
//! 进度和警告只是"信号"，不会影响数据流

use tracing::warn;

use crate::services::WarnWriter;
use crate::utils::logging::log_progress;
use crate::workflow::PipelineWarning;

/// 批处理进度
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    pub processed: usize,
    pub total: usize,
}

impl Progress {
    /// 已处理比例 [0, 1]
    pub fn fraction(&self) -> f64 {
        if self.total == 0 {
            return 1.0;
        }
        self.processed as f64 / self.total as f64
    }
}

/// 批处理信号接收者
pub trait BatchObserver {
    /// 每处理完一篇调用一次
    fn on_progress(&mut self, _progress: Progress) {}

    /// 每产生一条非致命警告调用一次
    fn on_warning(&mut self, _warning: &PipelineWarning) {}
}

/// 不接收任何信号
pub struct NoopObserver;

impl BatchObserver for NoopObserver {}

/// 写日志 + warn.txt
pub struct LogObserver {
    warn_writer: WarnWriter,
}

impl LogObserver {
    pub fn new(warn_writer: WarnWriter) -> Self {
        Self { warn_writer }
    }
}

impl BatchObserver for LogObserver {
    fn on_progress(&mut self, progress: Progress) {
        log_progress(progress.processed, progress.total);
    }

    fn on_warning(&mut self, warning: &PipelineWarning) {
        if let Err(e) = self.warn_writer.write(warning.article(), &warning.to_string()) {
            warn!("写入 {} 失败: {}", self.warn_writer.path(), e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fraction() {
        assert_eq!(Progress { processed: 1, total: 4 }.fraction(), 0.25);
        assert_eq!(Progress { processed: 4, total: 4 }.fraction(), 1.0);
        assert_eq!(Progress { processed: 0, total: 0 }.fraction(), 1.0);
    }

    #[test]
    fn test_log_observer_writes_warnings_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("warn.txt");
        let mut observer = LogObserver::new(WarnWriter::with_path(path.to_string_lossy()));

        observer.on_warning(&PipelineWarning::AnalysisFailed {
            article: "a.txt".to_string(),
            reason: "NLU 服务未配置".to_string(),
        });

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("文章 a.txt"));
        assert!(content.contains("NLU 服务未配置"));
    }
}
