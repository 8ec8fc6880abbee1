pub mod text_loader;

pub use text_loader::{load_all_text_files, load_upload, load_uploads, LoadedUploads, SkippedFile, Upload};
