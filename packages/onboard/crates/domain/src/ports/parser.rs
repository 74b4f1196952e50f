use async_trait::async_trait;

use crate::entities::{ParseError, ParsedRequest, SetupRequest};
use crate::system::snapshot::EnvironmentSnapshot;

/// Turns a free-text setup request into a prioritized tool list
#[async_trait]
pub trait RequestParser: Send + Sync {
    async fn parse(
        &self,
        request: &SetupRequest,
        env: &EnvironmentSnapshot,
    ) -> Result<ParsedRequest, ParseError>;
}

pub const SYSTEM_PROMPT: &str = "You are a developer environment specialist. \
Read a developer's request for setting up their machine and extract: \
the intent (fresh setup, project setup, tool install or environment setup), \
the tools to install with versions when given, the order they should be installed in, \
and any project type or framework mentioned. Answer with JSON only.";

/// User message for a request, including what the machine already has
pub fn user_prompt(request: &SetupRequest, env: &EnvironmentSnapshot) -> String {
    let installed: Vec<&str> = env.installed_tools().map(|t| t.tool.as_str()).collect();
    let project = request
        .project_path
        .as_ref()
        .map(|p| format!("Project path: {}\n", p.display()))
        .unwrap_or_default();

    format!(
        r#"Parse this setup request: "{description}"
{project}
Current system:
- Platform: {platform}
- Installed tools: {installed}

Respond with a JSON object of this shape:
{{
  "intent": "fresh_setup" | "project_setup" | "tool_install" | "environment_setup",
  "tools": [
    {{ "name": "tool name", "version": "optional version", "priority": 1 }}
  ],
  "context": {{
    "projectType": "optional",
    "framework": "optional"
  }}
}}
Lower priority numbers are installed first."#,
        description = request.description,
        project = project,
        platform = env.platform,
        installed = if installed.is_empty() {
            "none".to_string()
        } else {
            installed.join(", ")
        },
    )
}
