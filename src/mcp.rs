//! A Model Context Protocol server exposing the tools over stdio.
//!
//! Methods:
//! - initialize → handshake
//! - tools/list → every tool with its JSON schema
//! - tools/call → dispatch to `crate::tools`
//! - ping

pub mod protocol;
pub mod registry;
pub mod server;

pub use protocol::{McpError, McpRequest, McpResponse, McpTool};
pub use registry::{call_tool, tool_definitions, ToolCallError};
pub use server::McpServer;
