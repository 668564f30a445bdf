//! Infrastructure adapters for application ports.

#![forbid(unsafe_code)]

mod console_navigator;
mod console_notifier;
#[cfg(feature = "deno-scripting")]
mod deno_script_engine;
mod http_action_client;
mod http_table_data_source;
mod in_memory_clipboard;
mod in_memory_table_repository;
mod logging_script_engine;
mod static_confirmation_gate;

pub use console_navigator::ConsoleNavigator;
pub use console_notifier::ConsoleNotifier;
#[cfg(feature = "deno-scripting")]
pub use deno_script_engine::DenoScriptEngine;
pub use http_action_client::HttpActionClient;
pub use http_table_data_source::{DEFAULT_TIMEOUT, HttpTableDataSource};
pub use in_memory_clipboard::InMemoryClipboard;
pub use in_memory_table_repository::InMemoryTableRepository;
pub use logging_script_engine::LoggingScriptEngine;
pub use static_confirmation_gate::StaticConfirmationGate;
