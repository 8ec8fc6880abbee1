use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tokio::fs;

/// 一个待处理的上传文件（文件名 + 原始字节）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Upload {
    pub name: String,
    pub bytes: Vec<u8>,
}

impl Upload {
    pub fn new(name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            bytes: bytes.into(),
        }
    }
}

/// 读取失败、被跳过的文件
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedFile {
    pub name: String,
    pub reason: String,
}

/// 一次加载的结果
#[derive(Debug, Clone, Default)]
pub struct LoadedUploads {
    pub uploads: Vec<Upload>,
    pub skipped: Vec<SkippedFile>,
}

/// 读取单个文本文件
pub async fn load_upload(path: &Path) -> Result<Upload> {
    let bytes = fs::read(path)
        .await
        .with_context(|| format!("无法读取文章文件: {}", path.display()))?;

    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string());

    Ok(Upload { name, bytes })
}

/// 按给定顺序读取文件列表
///
/// 读取失败的文件不会中断加载，而是记入 `skipped`，由调用方上报
pub async fn load_uploads(paths: &[PathBuf]) -> Result<LoadedUploads> {
    let mut loaded = LoadedUploads {
        uploads: Vec::with_capacity(paths.len()),
        skipped: Vec::new(),
    };

    for path in paths {
        match load_upload(path).await {
            Ok(upload) => {
                tracing::info!("正在加载: {} ({} 字节)", upload.name, upload.bytes.len());
                loaded.uploads.push(upload);
            }
            Err(e) => {
                tracing::warn!("加载文件失败 {}: {:#}", path.display(), e);
                loaded.skipped.push(SkippedFile {
                    name: path.display().to_string(),
                    reason: format!("{:#}", e),
                });
            }
        }
    }

    Ok(loaded)
}

/// 从文件夹中加载所有 .txt 文件，按文件名排序
pub async fn load_all_text_files(folder_path: &str) -> Result<LoadedUploads> {
    let folder = PathBuf::from(folder_path);

    if !folder.exists() {
        anyhow::bail!("文件夹不存在: {}", folder_path);
    }

    let mut paths = Vec::new();
    let mut entries = fs::read_dir(&folder)
        .await
        .with_context(|| format!("无法读取文件夹: {}", folder_path))?;

    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        let is_txt = path
            .extension()
            .and_then(|s| s.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("txt"));
        if is_txt && path.is_file() {
            paths.push(path);
        }
    }

    // read_dir 的顺序不稳定
    paths.sort();

    if paths.is_empty() {
        tracing::warn!("在文件夹 {} 中没有找到 .txt 文件", folder_path);
    }

    load_uploads(&paths).await
}
