pub mod anthropic;
pub mod shell;

pub use anthropic::{AnthropicParser, ParserConfig};
pub use shell::{SystemShell, DEFAULT_MAX_OUTPUT_BYTES};
