pub mod archiver;
pub mod batch;
pub mod config;
pub mod engine;
pub mod error;
pub mod naming;
pub mod progress;
pub mod prompt;
pub mod scan;
pub mod timestamp;
pub mod verifier;

pub use batch::{
    ArchiveTemplate, BatchKind, BatchPolicy, BatchRequest, BatchResult, BatchRunner, ItemOutcome,
    ItemStatus,
};
pub use crate::config::AppConfig;
pub use engine::{EngineLocation, ProcessRunner, ToolOutput, ToolRunner};
pub use error::Error;
pub use progress::{BatchReporter, SilentReporter};
pub use prompt::{Confirm, ConsolePrompt};
