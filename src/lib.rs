//! Google Slides, Drive and Sheets operations packaged as tools for LLM
//! agents, plus an MCP server that exposes them over stdio.

pub mod auth;
pub mod client;
pub mod config;
pub mod converters;
pub mod errors;
pub mod helpers;
pub mod mcp;
pub mod models;
pub mod tools;
pub mod transport;

pub use auth::{AuthMethod, Credentials};
pub use client::{Endpoints, FeedbackOptions, GoogleClient};
pub use converters::markdown;
pub use errors::{Result, SlidesApiError};
pub use models::presentation::Presentation;
pub use tools::ToolOutput;
pub use transport::{ApiRequest, HttpTransport, Transport};
