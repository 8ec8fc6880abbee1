pub mod analysis_service;
pub mod csv_writer;
pub mod outcome;
pub mod registry;
pub mod translation_service;
pub mod warn_writer;

pub use analysis_service::{AnalysisBackend, Analyzer};
pub use outcome::Outcome;
pub use registry::ServiceRegistry;
pub use translation_service::{TranslationStrategy, Translator};
pub use warn_writer::WarnWriter;
