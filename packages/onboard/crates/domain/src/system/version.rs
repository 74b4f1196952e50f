use regex::Regex;
use std::sync::OnceLock;

fn version_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"v?(\d+\.\d+(?:\.\d+)?)").expect("static version regex"))
}

/// Pull a version out of a tool's `--version` style output.
///
/// Common shapes: "v20.11.0", "Python 3.11.5", "git version 2.43.0",
/// "Homebrew 4.2.0". The first `major.minor[.patch]` token wins; if there is
/// none, the first non-empty line is returned as-is. Empty output gives `None`.
pub fn extract_version(output: &str) -> Option<String> {
    let trimmed = output.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Some(caps) = version_pattern().captures(trimmed) {
        return caps.get(1).map(|m| m.as_str().to_string());
    }

    trimmed
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_parsing() {
        assert_eq!(extract_version("v20.11.0\n").as_deref(), Some("20.11.0"));
        assert_eq!(extract_version("Python 3.11.5").as_deref(), Some("3.11.5"));
        assert_eq!(
            extract_version("git version 2.43.0 (Apple Git-115)").as_deref(),
            Some("2.43.0")
        );
        assert_eq!(extract_version("openjdk 17.0.2 2022-01-18").as_deref(), Some("17.0.2"));
        assert_eq!(extract_version("go version go1.22").as_deref(), Some("1.22"));
    }

    #[test]
    fn test_falls_back_to_first_line() {
        assert_eq!(
            extract_version("\n  apt (unstable build)\nmore text").as_deref(),
            Some("apt (unstable build)")
        );
    }

    #[test]
    fn test_empty_output() {
        assert_eq!(extract_version("   \n"), None);
    }
}
