use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

use onboard::domain::entities::SetupRequest;
use onboard::infrastructure::AnthropicParser;

use crate::core::app::App;

/// Describe what you need in plain words, e.g. `onboard setup a python 3.12 data science box`
#[derive(Parser, Debug)]
pub struct SetupCommand {
    /// Free-text description of the environment
    #[arg(required = true, num_args = 1..)]
    pub description: Vec<String>,

    /// Project directory to set up dependencies in
    #[arg(short, long)]
    pub path: Option<PathBuf>,
}

impl SetupCommand {
    pub async fn execute(self, app: &App) -> Result<()> {
        cliclack::intro(console::style("onboard setup").bold())?;

        let mut request = SetupRequest::new(self.description.join(" "));
        if let Some(path) = self.path {
            request = request.with_project_path(path);
        }

        let parser = AnthropicParser::new(app.config.parser.clone());
        app.run(&parser, request).await
    }
}
