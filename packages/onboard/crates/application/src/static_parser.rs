use async_trait::async_trait;
use domain::entities::{ParseError, ParsedRequest, SetupIntent, SetupRequest, ToolRequest};
use domain::ports::parser::RequestParser;
use domain::system::snapshot::EnvironmentSnapshot;

/// Offline parser for explicit `name[@version]` lists.
///
/// Priority follows the order the tools were given in. A request that names
/// a project directory is a project setup.
pub struct StaticParser {
    tools: Vec<ToolRequest>,
}

impl StaticParser {
    pub fn from_specs<S: AsRef<str>>(specs: &[S]) -> Self {
        let tools = specs
            .iter()
            .map(|s| s.as_ref().trim())
            .filter(|s| !s.is_empty())
            .enumerate()
            .map(|(i, spec)| ToolRequest::from_spec(spec, i as i32 + 1))
            .collect();
        Self { tools }
    }

    pub fn tools(&self) -> &[ToolRequest] {
        &self.tools
    }

    pub fn parsed(&self, with_project: bool) -> ParsedRequest {
        let parsed = ParsedRequest::tool_install(self.tools.clone());
        if with_project {
            parsed.with_intent(SetupIntent::ProjectSetup)
        } else {
            parsed
        }
    }
}

#[async_trait]
impl RequestParser for StaticParser {
    async fn parse(
        &self,
        request: &SetupRequest,
        _env: &EnvironmentSnapshot,
    ) -> Result<ParsedRequest, ParseError> {
        Ok(self.parsed(request.project_path.is_some()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_priorities_follow_argument_order() {
        let parser = StaticParser::from_specs(&["python@3.12", " ", "git", "node@20"]);
        let names: Vec<(&str, Option<&str>, i32)> = parser
            .tools()
            .iter()
            .map(|t| (t.name.as_str(), t.version.as_deref(), t.priority))
            .collect();
        assert_eq!(
            names,
            vec![("python", Some("3.12"), 1), ("git", None, 2), ("node", Some("20"), 3)]
        );
    }

    #[tokio::test]
    async fn test_project_path_makes_a_project_setup() {
        let parser = StaticParser::from_specs(&["node"]);
        let env = EnvironmentSnapshot::bare(domain::Platform::Linux);

        let plain = parser.parse(&SetupRequest::new("node"), &env).await.unwrap();
        assert_eq!(plain.intent, SetupIntent::ToolInstall);

        let request = SetupRequest::new("node").with_project_path("/work/app");
        let project = parser.parse(&request, &env).await.unwrap();
        assert_eq!(project.intent, SetupIntent::ProjectSetup);
        assert_eq!(project.tools, parser.tools());
    }
}
