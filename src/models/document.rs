//! 文章模型
//!
//! 一篇上传的文章：文件名 + 解码后的正文（最多 `MAX_CHARS` 个字符）

/// 单篇文章允许的最大字符数
pub const MAX_CHARS: usize = 15_000;

/// 上传的文章
///
/// 创建后不再修改；每次运行都会重新构建
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    /// 文章标识（文件名）
    pub name: String,
    /// 解码（并可能截断）后的正文
    pub text: String,
    /// 截断前的字符数
    pub original_chars: usize,
}

impl Document {
    /// 从原始字节构建文章
    ///
    /// 无法解码的字节序列会被直接丢弃，超过 `max_chars` 的部分会被截断
    pub fn from_bytes(name: impl Into<String>, bytes: &[u8], max_chars: usize) -> Self {
        let decoded = decode_lossy(bytes);
        Self::from_text(name, decoded, max_chars)
    }

    /// 从已解码的文本构建文章
    pub fn from_text(name: impl Into<String>, text: impl Into<String>, max_chars: usize) -> Self {
        let text = text.into();
        let original_chars = text.chars().count();
        let text = truncate_chars(text, max_chars);

        Self {
            name: name.into(),
            text,
            original_chars,
        }
    }

    /// 是否发生了截断
    pub fn is_truncated(&self) -> bool {
        self.original_chars > self.char_count()
    }

    /// 当前正文的字符数
    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }
}

/// 按 UTF-8 解码，丢弃非法字节
pub fn decode_lossy(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len());
    for chunk in bytes.utf8_chunks() {
        out.push_str(chunk.valid());
    }
    out
}

/// 按字符（而不是字节）截断
pub fn truncate_chars(text: String, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => {
            let mut text = text;
            text.truncate(byte_idx);
            text
        }
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_drops_invalid_bytes() {
        let bytes = b"caf\xc3\xa9 \xff\xfenews";
        assert_eq!(decode_lossy(bytes), "café news");
    }

    #[test]
    fn test_decode_keeps_valid_text() {
        let text = "Nachrichten über Wahlen — 选举新闻";
        assert_eq!(decode_lossy(text.as_bytes()), text);
    }

    #[test]
    fn test_short_document_is_untouched() {
        let doc = Document::from_text("a.txt", "Hello world", MAX_CHARS);
        assert_eq!(doc.text, "Hello world");
        assert_eq!(doc.original_chars, 11);
        assert!(!doc.is_truncated());
    }

    #[test]
    fn test_long_document_is_truncated_to_prefix() {
        let text: String = (0..20_000).map(|i| if i % 2 == 0 { 'a' } else { 'b' }).collect();
        let doc = Document::from_text("long.txt", text.clone(), MAX_CHARS);

        assert_eq!(doc.char_count(), MAX_CHARS);
        assert_eq!(doc.original_chars, 20_000);
        assert!(doc.is_truncated());
        assert!(text.starts_with(&doc.text));
    }

    #[test]
    fn test_truncation_counts_characters_not_bytes() {
        let text = "é".repeat(10);
        let truncated = truncate_chars(text, 4);
        assert_eq!(truncated, "éééé");
        assert_eq!(truncated.len(), 8);
    }

    #[test]
    fn test_exact_limit_is_not_truncated() {
        let doc = Document::from_text("exact.txt", "x".repeat(MAX_CHARS), MAX_CHARS);
        assert!(!doc.is_truncated());
        assert_eq!(doc.char_count(), MAX_CHARS);
    }
}
