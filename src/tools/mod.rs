//! Tool system: schemas, validation, the tool trait, and built-in tools.

pub mod arguments;
pub mod catalog;
pub mod invoke;
pub mod tool;
pub mod types;
pub mod validation;

pub use arguments::ToolArguments;
pub use catalog::builtin_tools;
pub use invoke::{InvocationState, ToolInvoker};
pub use tool::{GenerativeTool, MAX_TOKENS_ARG, STREAM_ARG};
pub use types::{ParameterBuilder, ToolParameters};
pub use validation::validate_arguments;
