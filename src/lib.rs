//! BugSense AI - bug report analysis backed by multiple LLM providers.
//!
//! QA descriptions are turned into structured tickets by whichever configured
//! LLM backend answers first, failing over between Groq, OpenAI, Anthropic and
//! Gemini and remembering which provider to try first next time.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
pub mod server;
pub mod telemetry;
