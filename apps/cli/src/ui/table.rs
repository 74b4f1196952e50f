use comfy_table::presets::UTF8_FULL;
use comfy_table::{ContentArrangement, Table};

use onboard::domain::entities::InstallationPlan;
use onboard::domain::synthesis::Synthesizers;
use onboard::domain::system::EnvironmentSnapshot;

fn table(header: Vec<&str>) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(header);
    table
}

/// Every step with the commands it would run on this host
pub fn plan(plan: &InstallationPlan, synthesizers: &Synthesizers, env: &EnvironmentSnapshot) -> Table {
    let mut out = table(vec!["#", "Step", "Handler", "Commands", "Status"]);
    for (i, step) in plan.steps.iter().enumerate() {
        let commands = synthesizers
            .plan(step, env)
            .iter()
            .map(|c| match c.platform {
                Some(p) => format!("{} ({})", c, p),
                None => c.to_string(),
            })
            .collect::<Vec<_>>();
        let commands = if commands.is_empty() {
            "-".to_string()
        } else {
            commands.join("\n")
        };
        out.add_row(vec![
            (i + 1).to_string(),
            step.label(),
            step.handler.to_string(),
            commands,
            step.status.to_string(),
        ]);
    }
    out
}

/// Results after a run, including captured output and errors
pub fn results(plan: &InstallationPlan) -> Table {
    let mut out = table(vec!["#", "Step", "Status", "Detail"]);
    for (i, step) in plan.steps.iter().enumerate() {
        let detail = step
            .error
            .as_deref()
            .or(step.output.as_deref())
            .unwrap_or("")
            .lines()
            .last()
            .unwrap_or("")
            .to_string();
        out.add_row(vec![
            (i + 1).to_string(),
            step.label(),
            step.status.to_string(),
            detail,
        ]);
    }
    out
}

pub fn tools(env: &EnvironmentSnapshot) -> Table {
    let mut out = table(vec!["Tool", "Installed", "Version", "Path"]);
    for tool in &env.tools {
        out.add_row(vec![
            tool.tool.clone(),
            if tool.installed { "yes" } else { "no" }.to_string(),
            tool.version.clone().unwrap_or_default(),
            tool.path
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_default(),
        ]);
    }
    out
}

pub fn package_managers(env: &EnvironmentSnapshot) -> Table {
    let mut out = table(vec!["Package manager", "Installed", "Version"]);
    for pm in &env.package_managers {
        out.add_row(vec![
            pm.name.to_string(),
            if pm.installed { "yes" } else { "no" }.to_string(),
            pm.version.clone().unwrap_or_default(),
        ]);
    }
    out
}
