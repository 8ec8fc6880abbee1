pub mod llm_client;
pub mod local_translator_client;
pub mod nlu_client;

pub use llm_client::LlmClient;
pub use local_translator_client::LocalTranslatorClient;
pub use nlu_client::NluClient;
