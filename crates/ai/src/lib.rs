//! Client for the external generative-text service.
//!
//! [`AiClient`] wraps the chat-completions HTTP API behind three
//! operations: one-shot email generation, HTML improvement, and a
//! streaming chat channel. Transient upstream failures (429/503) are
//! retried with exponential backoff via [`retry::with_retry`], and the
//! loosely-structured generation response is parsed by the pure functions
//! in [`parse`].

pub mod client;
pub mod parse;
pub mod retry;

pub use client::{AiClient, AiConfig, AiError};
pub use parse::{parse_composed_email, strip_code_fences, GeneratedEmail};
pub use retry::{with_retry, RetryPolicy};
