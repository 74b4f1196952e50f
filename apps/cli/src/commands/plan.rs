use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

use onboard::application::StaticParser;
use onboard::domain::entities::RequestId;
use onboard::domain::synthesis::Synthesizers;
use onboard::domain::PlanBuilder;

use crate::core::app::App;
use crate::ui::{self, table, Theme};

/// Show the steps and commands an install would run, without running them
#[derive(Parser, Debug)]
pub struct PlanCommand {
    #[arg(required = true, num_args = 1..)]
    pub tools: Vec<String>,

    #[arg(short, long)]
    pub path: Option<PathBuf>,
}

impl PlanCommand {
    pub async fn execute(self, app: &App) -> Result<()> {
        let env = app.probe(self.path.as_deref()).await;

        let parser = StaticParser::from_specs(&self.tools);
        let synthesizers = Synthesizers::new().with_policy(app.config.policy());
        let parsed = parser.parsed(self.path.is_some());
        let plan = PlanBuilder::new(&synthesizers).build_request(RequestId::new(), &parsed, &env);

        ui::println(format!(
            "{} {} steps on {}, estimated {}",
            Theme::bold("Plan:"),
            plan.steps.len(),
            plan.platform,
            plan.estimated_time
        ));
        if plan.requires_admin {
            ui::warn("Some commands require administrator privileges");
        }
        ui::println(table::plan(&plan, &synthesizers, &env).to_string());
        Ok(())
    }
}
