use async_trait::async_trait;
use domain::entities::{ParseError, ParsedRequest, SetupRequest};
use domain::ports::parser::{user_prompt, RequestParser, SYSTEM_PROMPT};
use domain::system::snapshot::EnvironmentSnapshot;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Settings for the language parser, the `[parser]` table of the config file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    pub model: String,
    pub max_tokens: u32,
    pub endpoint: String,
    /// Name of the environment variable holding the API key
    pub api_key_env: String,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            model: "claude-3-5-sonnet-20241022".to_string(),
            max_tokens: 4096,
            endpoint: "https://api.anthropic.com/v1/messages".to_string(),
            api_key_env: "ANTHROPIC_API_KEY".to_string(),
        }
    }
}

#[derive(Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    system: &'a str,
    messages: Vec<Message<'a>>,
}

#[derive(Serialize)]
struct Message<'a> {
    role: &'a str,
    content: String,
}

#[derive(Deserialize)]
struct MessagesResponse {
    #[serde(default)]
    content: Vec<ContentBlock>,
}

#[derive(Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    text: Option<String>,
}

impl MessagesResponse {
    fn first_text(&self) -> &str {
        self.content
            .iter()
            .find(|b| b.kind == "text")
            .and_then(|b| b.text.as_deref())
            .unwrap_or_default()
    }
}

/// Parses requests with the Anthropic Messages API
pub struct AnthropicParser {
    client: reqwest::Client,
    config: ParserConfig,
}

impl AnthropicParser {
    pub fn new(config: ParserConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    fn api_key(&self) -> Result<String, ParseError> {
        std::env::var(&self.config.api_key_env)
            .ok()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| {
                ParseError::Unavailable(format!("{} is not set", self.config.api_key_env))
            })
    }

    async fn send(&self, api_key: &str, prompt: String) -> Result<String, ParseError> {
        let body = MessagesRequest {
            model: &self.config.model,
            max_tokens: self.config.max_tokens,
            system: SYSTEM_PROMPT,
            messages: vec![Message {
                role: "user",
                content: prompt,
            }],
        };

        let res = self
            .client
            .post(&self.config.endpoint)
            .header("x-api-key", api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&body)
            .send()
            .await
            .map_err(|e| ParseError::Unavailable(e.to_string()))?;

        let status = res.status();
        if !status.is_success() {
            let detail = res.text().await.unwrap_or_default();
            return Err(ParseError::Unavailable(format!("API returned {}: {}", status, detail)));
        }

        let parsed: MessagesResponse = res
            .json()
            .await
            .map_err(|e| ParseError::Unavailable(e.to_string()))?;
        Ok(parsed.first_text().to_string())
    }
}

#[async_trait]
impl RequestParser for AnthropicParser {
    async fn parse(
        &self,
        request: &SetupRequest,
        env: &EnvironmentSnapshot,
    ) -> Result<ParsedRequest, ParseError> {
        let api_key = self.api_key()?;
        info!(request = %request.id, model = %self.config.model, "Parsing setup request");

        let text = self.send(&api_key, user_prompt(request, env)).await?;
        debug!(response = %text, "Parser response");
        ParsedRequest::from_response(&text)
    }
}
