use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::tool::ToolRequest;

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("No JSON object found in parser response")]
    NoJson,
    #[error("Malformed setup request: {0}")]
    Schema(#[from] serde_json::Error),
    #[error("Parser unavailable: {0}")]
    Unavailable(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SetupIntent {
    FreshSetup,
    ProjectSetup,
    ToolInstall,
    EnvironmentSetup,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestContext {
    #[serde(default)]
    pub project_type: Option<String>,
    #[serde(default)]
    pub framework: Option<String>,
}

/// Structured form of a setup request, as returned by the language parser
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedRequest {
    pub intent: SetupIntent,
    pub tools: Vec<ToolRequest>,
    #[serde(default)]
    pub context: Option<RequestContext>,
}

impl ParsedRequest {
    pub fn tool_install(tools: Vec<ToolRequest>) -> Self {
        Self {
            intent: SetupIntent::ToolInstall,
            tools,
            context: None,
        }
    }

    pub fn with_intent(mut self, intent: SetupIntent) -> Self {
        self.intent = intent;
        self
    }

    /// Decode the outermost `{...}` span of a model response.
    ///
    /// Models tend to wrap JSON in prose or code fences; anything outside the
    /// first `{` and the last `}` is ignored.
    pub fn from_response(text: &str) -> Result<Self, ParseError> {
        let start = text.find('{').ok_or(ParseError::NoJson)?;
        let end = text.rfind('}').ok_or(ParseError::NoJson)?;
        if end < start {
            return Err(ParseError::NoJson);
        }
        Ok(serde_json::from_str(&text[start..=end])?)
    }
}
