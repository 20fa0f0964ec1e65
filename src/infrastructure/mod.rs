pub mod dispatcher;
pub mod llm;
pub mod observability;
pub mod persistence;
pub mod telegram;
pub mod text_processing;
