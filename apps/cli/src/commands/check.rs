use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;

use crate::core::app::App;
use crate::ui::{self, table, Theme};

/// Report what is already installed on this machine
#[derive(Parser, Debug)]
pub struct CheckCommand {
    #[arg(short, long)]
    pub path: Option<PathBuf>,

    /// Print the snapshot as JSON
    #[arg(long)]
    pub json: bool,
}

impl CheckCommand {
    pub async fn execute(self, app: &App) -> Result<()> {
        let env = app.probe(self.path.as_deref()).await;

        if self.json {
            let json = serde_json::to_string_pretty(&env).context("Failed to serialize snapshot")?;
            println!("{}", json);
            return Ok(());
        }

        ui::println(format!(
            "{} {} {} ({}), shell {}, home {}",
            Theme::bold("Host:"),
            env.platform,
            env.os_version,
            env.architecture,
            env.shell,
            Theme::muted(env.home_dir.display())
        ));
        ui::println(table::tools(&env).to_string());
        ui::println(table::package_managers(&env).to_string());
        Ok(())
    }
}
