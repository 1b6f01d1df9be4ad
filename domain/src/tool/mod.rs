//! Tool domain module
//!
//! This module defines the contract between the agent system and the tools it
//! can call. The agent system never implements a tool itself; it only knows a
//! tool's name, its parameter shape and the uniform result it produces.
//!
//! # Overview
//!
//! ```text
//! model text ──extract_tool_calls──▶ ToolCall ──ToolAccess──▶ executor ──▶ ToolResult
//!                                        │                                      ▲
//!                                        └──────── denied ──────────────────────┘
//! ```
//!
//! # Key Types
//!
//! - [`ToolSpec`]: registry of tool definitions, keyed by name
//! - [`ToolDefinition`]: name, description and parameters of one tool
//! - [`ToolCall`]: an invocation request parsed from model output
//! - [`ToolResult`]: the `{success, ...payload | error}` outcome
//! - [`ToolValidator`]: pure parameter validation against a definition
//!
//! # Architecture
//!
//! - **Domain** (this module): pure definitions and parsing, no I/O
//! - **Application** (`ToolExecutorPort`): port trait for tool execution
//! - **Infrastructure** (`LocalToolExecutor`): file, document, web, calendar
//!   and code-execution tools

pub mod entities;
pub mod parsing;
pub mod traits;
pub mod value_objects;

pub use entities::{ToolCall, ToolDefinition, ToolParameter, ToolSpec};
pub use parsing::extract_tool_calls;
pub use traits::{DefaultToolValidator, ToolValidator};
pub use value_objects::{ToolError, ToolResult};
