//! Language-model providers. Gemini is tried first, OpenRouter only when
//! Gemini fails; both receive the same prompt and are asked for the same JSON.

mod gemini;
mod openrouter;
mod prompt;

pub use gemini::GeminiProvider;
pub use openrouter::OpenRouterProvider;
pub use prompt::build_prompt;
