use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

use onboard::application::StaticParser;
use onboard::domain::entities::SetupRequest;

use crate::core::app::App;

/// Install named tools without the language parser, e.g. `onboard install node@20 git`
#[derive(Parser, Debug)]
pub struct InstallCommand {
    /// Tools as `name` or `name@version`, installed in the order given
    #[arg(required = true, num_args = 1..)]
    pub tools: Vec<String>,

    #[arg(short, long)]
    pub path: Option<PathBuf>,
}

impl InstallCommand {
    pub async fn execute(self, app: &App) -> Result<()> {
        cliclack::intro(console::style("onboard install").bold())?;

        let mut request = SetupRequest::new(self.tools.join(" "));
        if let Some(path) = self.path {
            request = request.with_project_path(path);
        }

        let parser = StaticParser::from_specs(&self.tools);
        app.run(&parser, request).await
    }
}
