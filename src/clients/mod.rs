pub mod gemini_client;
pub mod generator;
pub mod response;

pub use gemini_client::GeminiClient;
pub use generator::{GenerationRequest, TextGenerator};
pub use response::{extract_answer, Answer, GenerateContentResponse, NO_OUTPUT_SENTINEL};
