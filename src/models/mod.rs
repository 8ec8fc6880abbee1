pub mod analysis;
pub mod document;
pub mod loaders;

pub use analysis::{
    Analysis, AnalysisResult, Emotion, EmotionVector, ResultSet, StepStatus, Summary,
};
pub use document::{Document, MAX_CHARS};
pub use loaders::{load_all_text_files, load_uploads, LoadedUploads, SkippedFile, Upload};
