pub mod parser;
pub mod shell;

pub use parser::RequestParser;
pub use shell::{ShellError, ShellOutput, ShellRunner};
