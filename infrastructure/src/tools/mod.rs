//! Tool implementations for the agent system
//!
//! Concrete tools behind the [`LocalToolExecutor`]:
//! - `file`: read_file, write_file, list_directory, create_directory, delete_file
//! - `document`: extract_text, analyze_document
//! - `code`: execute_code
//! - `calendar`: create_event, list_events, delete_event
//! - `web` (`web-tools` feature): web_search, fetch_url

pub mod calendar;
pub mod code;
pub mod document;
pub mod file;
#[cfg(feature = "web-tools")]
pub mod web;
pub mod workspace;

mod executor;

pub use executor::LocalToolExecutor;
pub use workspace::Workspace;

use switchboard_domain::tool::entities::ToolSpec;

/// Create the default tool specification with all available tools
pub fn default_tool_spec() -> ToolSpec {
    let spec = ToolSpec::new()
        .register(file::read_file_definition())
        .register(file::write_file_definition())
        .register(file::list_directory_definition())
        .register(file::create_directory_definition())
        .register(file::delete_file_definition())
        .register(document::extract_text_definition())
        .register(document::analyze_document_definition())
        .register(calendar::create_event_definition())
        .register(calendar::list_events_definition())
        .register(calendar::delete_event_definition())
        .register(code::execute_code_definition());

    #[cfg(feature = "web-tools")]
    let spec = spec
        .register(web::web_search_definition())
        .register(web::fetch_url_definition());

    spec
}
