//! Client for the external answering engine
//!
//! The engine is a black box reached over an Azure-OpenAI-shaped
//! chat-completions endpoint: it receives a table snapshot, a context
//! string, and a query, and returns either a table or free text. Calls are
//! stateless and independent; retry and timeout live here.

mod answer;
mod client;
mod config;
mod error;
mod wire;


pub use answer::Answer;
pub use client::{CollaboratorClient, truncate};
pub use config::CollaboratorConfig;
pub use error::LlmError;
