use serde::{Deserialize, Serialize};
use std::fmt;

use super::HandlerCategory;

/// The closed set of tools the planner knows by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToolFamily {
    // Language runtimes
    Node,
    Python,
    Java,
    Ruby,
    Go,
    Rust,
    Php,
    // Package managers
    Homebrew,
    Chocolatey,
    Apt,
    Yum,
    // IDEs and developer tools
    Docker,
    Git,
    VsCode,
    Kubectl,
    Terraform,
    /// Anything the rules do not recognise
    Other,
}

/// Ordered matching rules: the first rule with a keyword contained in the
/// lower-cased tool name decides the family. Order is precedence, so
/// "javascript" is Java and "mongodb" is Go.
const RULES: &[(&str, ToolFamily)] = &[
    ("node", ToolFamily::Node),
    ("python", ToolFamily::Python),
    ("java", ToolFamily::Java),
    ("ruby", ToolFamily::Ruby),
    ("go", ToolFamily::Go),
    ("rust", ToolFamily::Rust),
    ("php", ToolFamily::Php),
    ("homebrew", ToolFamily::Homebrew),
    ("brew", ToolFamily::Homebrew),
    ("chocolatey", ToolFamily::Chocolatey),
    ("apt", ToolFamily::Apt),
    ("yum", ToolFamily::Yum),
    ("docker", ToolFamily::Docker),
    ("git", ToolFamily::Git),
    ("vscode", ToolFamily::VsCode),
    ("kubectl", ToolFamily::Kubectl),
    ("terraform", ToolFamily::Terraform),
];

impl ToolFamily {
    pub fn from_name(name: &str) -> Self {
        let lower = name.to_lowercase();
        RULES
            .iter()
            .find(|(keyword, _)| lower.contains(keyword))
            .map(|(_, family)| *family)
            .unwrap_or(ToolFamily::Other)
    }

    pub fn category(&self) -> HandlerCategory {
        match self {
            ToolFamily::Node
            | ToolFamily::Python
            | ToolFamily::Java
            | ToolFamily::Ruby
            | ToolFamily::Go
            | ToolFamily::Rust
            | ToolFamily::Php => HandlerCategory::Language,
            ToolFamily::Homebrew | ToolFamily::Chocolatey | ToolFamily::Apt | ToolFamily::Yum => {
                HandlerCategory::PackageManager
            }
            ToolFamily::Docker
            | ToolFamily::Git
            | ToolFamily::VsCode
            | ToolFamily::Kubectl
            | ToolFamily::Terraform
            | ToolFamily::Other => HandlerCategory::DevTool,
        }
    }

    /// Name used in detection records and user-facing messages
    pub fn display_name(&self) -> &'static str {
        match self {
            ToolFamily::Node => "Node.js",
            ToolFamily::Python => "Python",
            ToolFamily::Java => "Java",
            ToolFamily::Ruby => "Ruby",
            ToolFamily::Go => "Go",
            ToolFamily::Rust => "Rust",
            ToolFamily::Php => "PHP",
            ToolFamily::Homebrew => "Homebrew",
            ToolFamily::Chocolatey => "Chocolatey",
            ToolFamily::Apt => "apt",
            ToolFamily::Yum => "yum",
            ToolFamily::Docker => "Docker",
            ToolFamily::Git => "Git",
            ToolFamily::VsCode => "VS Code",
            ToolFamily::Kubectl => "kubectl",
            ToolFamily::Terraform => "Terraform",
            ToolFamily::Other => "unknown tool",
        }
    }
}

impl fmt::Display for ToolFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rule_precedence() {
        assert_eq!(ToolFamily::from_name("Node.js 20"), ToolFamily::Node);
        assert_eq!(ToolFamily::from_name("JavaScript"), ToolFamily::Java);
        assert_eq!(ToolFamily::from_name("Homebrew"), ToolFamily::Homebrew);
        assert_eq!(ToolFamily::from_name("brew"), ToolFamily::Homebrew);
        // "go" is checked before the dev-tool keywords
        assert_eq!(ToolFamily::from_name("google-cloud-sdk"), ToolFamily::Go);
        assert_eq!(ToolFamily::from_name("Docker Desktop"), ToolFamily::Docker);
        assert_eq!(ToolFamily::from_name("postgres"), ToolFamily::Other);
    }

    #[test]
    fn test_names_outside_the_keyword_sets_are_other() {
        assert_eq!(ToolFamily::from_name("winget"), ToolFamily::Other);
        assert_eq!(ToolFamily::from_name("choco"), ToolFamily::Other);
    }
}
