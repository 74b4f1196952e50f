use owo_colors::OwoColorize;
use std::fmt;

use onboard::domain::entities::StepStatus;

/// Colors and glyphs shared by every command's output
pub struct Theme;

impl Theme {
    pub fn primary(text: impl fmt::Display) -> String {
        format!("{}", text.cyan().bold())
    }

    pub fn bold(text: impl fmt::Display) -> String {
        format!("{}", text.bold())
    }

    pub fn success(text: impl fmt::Display) -> String {
        format!("{}", text.green().bold())
    }

    pub fn warning(text: impl fmt::Display) -> String {
        format!("{}", text.yellow().bold())
    }

    pub fn error(text: impl fmt::Display) -> String {
        format!("{}", text.red().bold())
    }

    /// Metadata, paths, raw command output
    pub fn muted(text: impl fmt::Display) -> String {
        format!("{}", text.dimmed())
    }

    /// Step status with the glyph the summary and progress lines use
    pub fn status(status: StepStatus) -> String {
        match status {
            StepStatus::Completed => Theme::success(format!("{} {}", Icon::Check, status)),
            StepStatus::Failed => Theme::error(format!("{} {}", Icon::Cross, status)),
            StepStatus::Skipped => Theme::muted(format!("{} {}", Icon::Skip, status)),
            StepStatus::InProgress => Theme::primary(format!("{} {}", Icon::Running, status)),
            StepStatus::Pending | StepStatus::RequiresApproval => Theme::muted(status),
        }
    }
}

pub enum Icon {
    Check,
    Cross,
    Skip,
    Running,
    Shield,
    Package,
}

impl fmt::Display for Icon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let icon = match self {
            Icon::Check => "✔",
            Icon::Cross => "✖",
            Icon::Skip => "↷",
            Icon::Running => "›",
            Icon::Shield => "🛡️ ",
            Icon::Package => "📦",
        };
        write!(f, "{}", icon)
    }
}
