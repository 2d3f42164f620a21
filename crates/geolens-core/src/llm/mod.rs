//! LLM integration for image geolocation.
//!
//! Provides a provider abstraction over the chat-completion backend and the
//! [`Geolocator`], which turns a model reply into a validated analysis.

pub(crate) mod geolocate;
pub(crate) mod openai;
pub(crate) mod prompt;
pub(crate) mod provider;

pub use geolocate::{parse_reply, Geolocator, ReplyError};
pub use openai::OpenAiProvider;
pub use prompt::{geolocate_prompt, GEOLOCATE_SYSTEM_PROMPT};
pub use provider::{LlmProvider, LlmProviderFactory, LlmRequest, LlmResponse};
