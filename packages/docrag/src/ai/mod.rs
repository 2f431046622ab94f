//! Hosted model backends.

pub mod openai;

pub use openai::OpenAi;
