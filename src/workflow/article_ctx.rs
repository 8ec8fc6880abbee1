//! 文章处理上下文
//!
//! 封装"我正在处理这一批中的第几篇文章"这一信息

use std::fmt::Display;

/// 文章处理上下文
#[derive(Debug, Clone)]
pub struct ArticleCtx {
    /// 文章标识（文件名）
    pub article: String,

    /// 在本批中的序号（从1开始，仅用于日志显示）
    pub article_index: usize,

    /// 本批文章总数
    pub total: usize,
}

impl ArticleCtx {
    /// 创建新的文章上下文
    pub fn new(article: String, article_index: usize, total: usize) -> Self {
        Self {
            article,
            article_index,
            total,
        }
    }
}

impl Display for ArticleCtx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[文章 {}/{} {}]", self.article_index, self.total, self.article)
    }
}
