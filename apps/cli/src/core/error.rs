use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Could not understand the request: {0}")]
    Parse(String),

    #[error("Runtime error: {0}")]
    Runtime(String),

    #[error("Operation cancelled by user")]
    Cancelled,
}

impl CliError {
    /// Returns a themed, actionable suggestion for the error.
    pub fn suggestion(&self) -> Option<String> {
        match self {
            CliError::Config(_) => Some(
                "Check config.toml for syntax errors, or pass --config with another file."
                    .to_string(),
            ),
            CliError::Parse(msg) if msg.contains("is not set") => Some(
                "Export your API key, or use `onboard install <tool>` to skip the language parser."
                    .to_string(),
            ),
            CliError::Parse(_) => {
                Some("Try rephrasing, or name the tools directly with `onboard install`.".to_string())
            }
            CliError::Runtime(_) => Some("Re-run with --verbose to see every command.".to_string()),
            CliError::Cancelled => None,
        }
    }

    pub fn render(&self) {
        eprintln!("\n{} {}", console::style("Error:").red().bold(), self);
        if let Some(s) = self.suggestion() {
            eprintln!("{} {}", console::style("  help:").dim(), s);
        }
    }
}
