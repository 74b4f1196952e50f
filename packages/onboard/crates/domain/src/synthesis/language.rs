use super::strategy::{choco_install, download_page, winget_install, Fallback};
use super::{StepReport, Synthesizer};
use crate::entities::{Command, InstallAction, InstallationStep};
use crate::routing::{HandlerCategory, ToolFamily};
use crate::system::platform::Platform;
use crate::system::snapshot::{EnvironmentSnapshot, PackageManagerKind as Pm};

/// Installs programming language runtimes
pub struct LanguageSynthesizer;

/// Version used when the request does not name one. Pinned rather than
/// "latest" so two runs of the same request produce the same commands.
pub fn default_version(family: ToolFamily) -> Option<&'static str> {
    match family {
        ToolFamily::Node => Some("20"),
        ToolFamily::Python => Some("3.11"),
        ToolFamily::Java => Some("17"),
        ToolFamily::Go => Some("1.22"),
        ToolFamily::Ruby => Some("3.3"),
        ToolFamily::Php => Some("8.3"),
        ToolFamily::Rust => Some("stable"),
        _ => None,
    }
}

const NVM_INSTALL: &str =
    "curl -o- https://raw.githubusercontent.com/nvm-sh/nvm/v0.39.7/install.sh | bash";
const RUSTUP_INSTALL: &str = "curl --proto '=https' --tlsv1.2 -sSf https://sh.rustup.rs | sh -s --";

impl LanguageSynthesizer {
    fn node(&self, v: &str, env: &EnvironmentSnapshot) -> Vec<Command> {
        let p = env.platform;
        let brew = || {
            vec![Command::new(format!("brew install node@{}", v), "Install Node.js via Homebrew").on(p)]
        };
        let nvm = || {
            vec![
                Command::new(NVM_INSTALL, "Install NVM (Node Version Manager)").on(p),
                Command::new(
                    format!(". ~/.nvm/nvm.sh && nvm install {}", v),
                    "Install Node.js via NVM",
                )
                .on(p),
            ]
        };

        match p {
            Platform::MacOS => Fallback::new(env).prefer(Pm::Homebrew, brew).or_else(nvm),
            Platform::Windows => Fallback::new(env)
                .prefer(Pm::Chocolatey, || {
                    vec![Command::new(choco_install("nodejs", Some(v)), "Install Node.js via Chocolatey")
                        .admin()
                        .on(p)]
                })
                .prefer(Pm::Winget, || {
                    vec![Command::new(winget_install("OpenJS.NodeJS", Some(v)), "Install Node.js via winget").on(p)]
                })
                .or_else(|| vec![download_page(p, "Node.js", "https://nodejs.org/en/download/")]),
            Platform::Linux => Fallback::new(env)
                .prefer(Pm::Apt, || {
                    vec![
                        Command::new(
                            format!("curl -fsSL https://deb.nodesource.com/setup_{}.x | sudo -E bash -", v),
                            "Add NodeSource repository",
                        )
                        .admin()
                        .on(p),
                        Command::new("sudo apt-get install -y nodejs", "Install Node.js via apt")
                            .admin()
                            .on(p),
                    ]
                })
                .prefer(Pm::Yum, || {
                    vec![
                        Command::new(
                            format!("curl -fsSL https://rpm.nodesource.com/setup_{}.x | sudo bash -", v),
                            "Add NodeSource repository",
                        )
                        .admin()
                        .on(p),
                        Command::new("sudo yum install -y nodejs", "Install Node.js via yum")
                            .admin()
                            .on(p),
                    ]
                })
                .prefer(Pm::Homebrew, brew)
                .or_else(nvm),
        }
    }

    fn python(&self, v: &str, env: &EnvironmentSnapshot) -> Vec<Command> {
        let p = env.platform;
        let brew = || {
            vec![Command::new(format!("brew install python@{}", v), "Install Python via Homebrew").on(p)]
        };
        let page = || vec![download_page(p, "Python", "https://www.python.org/downloads/")];

        match p {
            Platform::MacOS => Fallback::new(env).prefer(Pm::Homebrew, brew).or_else(page),
            Platform::Windows => Fallback::new(env)
                .prefer(Pm::Chocolatey, || {
                    vec![Command::new(choco_install("python", Some(v)), "Install Python via Chocolatey")
                        .admin()
                        .on(p)]
                })
                .prefer(Pm::Winget, || {
                    vec![Command::new(winget_install(&format!("Python.Python.{}", v), None), "Install Python via winget").on(p)]
                })
                .or_else(page),
            Platform::Linux => Fallback::new(env)
                .prefer(Pm::Apt, || {
                    vec![Command::new(
                        format!("sudo apt-get update && sudo apt-get install -y python{} python3-pip", v),
                        "Install Python via apt",
                    )
                    .admin()
                    .on(p)]
                })
                .prefer(Pm::Yum, || {
                    vec![Command::new(
                        format!("sudo yum install -y python{} python3-pip", v),
                        "Install Python via yum",
                    )
                    .admin()
                    .on(p)]
                })
                .prefer(Pm::Homebrew, brew)
                .or_else(page),
        }
    }

    fn java(&self, v: &str, env: &EnvironmentSnapshot) -> Vec<Command> {
        let p = env.platform;
        let brew = || {
            vec![Command::new(format!("brew install openjdk@{}", v), "Install OpenJDK via Homebrew").on(p)]
        };
        let page = || vec![download_page(p, "Java", "https://adoptium.net/")];

        match p {
            Platform::MacOS => Fallback::new(env).prefer(Pm::Homebrew, brew).or_else(page),
            Platform::Windows => Fallback::new(env)
                .prefer(Pm::Chocolatey, || {
                    vec![Command::new(choco_install(&format!("openjdk{}", v), None), "Install OpenJDK via Chocolatey")
                        .admin()
                        .on(p)]
                })
                .prefer(Pm::Winget, || {
                    vec![Command::new(
                        winget_install(&format!("EclipseAdoptium.Temurin.{}.JDK", v), None),
                        "Install Temurin JDK via winget",
                    )
                    .on(p)]
                })
                .or_else(page),
            Platform::Linux => Fallback::new(env)
                .prefer(Pm::Apt, || {
                    vec![Command::new(
                        format!("sudo apt-get update && sudo apt-get install -y openjdk-{}-jdk", v),
                        "Install OpenJDK via apt",
                    )
                    .admin()
                    .on(p)]
                })
                .prefer(Pm::Yum, || {
                    vec![Command::new(
                        format!("sudo yum install -y java-{}-openjdk-devel", v),
                        "Install OpenJDK via yum",
                    )
                    .admin()
                    .on(p)]
                })
                .prefer(Pm::Homebrew, brew)
                .or_else(page),
        }
    }

    fn go(&self, v: &str, env: &EnvironmentSnapshot) -> Vec<Command> {
        let p = env.platform;
        let brew =
            || vec![Command::new(format!("brew install go@{}", v), "Install Go via Homebrew").on(p)];
        let page = || vec![download_page(p, "Go", "https://go.dev/dl/")];

        match p {
            Platform::MacOS => Fallback::new(env).prefer(Pm::Homebrew, brew).or_else(page),
            Platform::Windows => Fallback::new(env)
                .prefer(Pm::Chocolatey, || {
                    vec![Command::new(choco_install("golang", Some(v)), "Install Go via Chocolatey")
                        .admin()
                        .on(p)]
                })
                .prefer(Pm::Winget, || {
                    vec![Command::new(winget_install("GoLang.Go", None), "Install Go via winget").on(p)]
                })
                .or_else(page),
            Platform::Linux => Fallback::new(env)
                .prefer(Pm::Apt, || {
                    vec![Command::new(
                        format!("sudo apt-get update && sudo apt-get install -y golang-{}-go", v),
                        "Install Go via apt",
                    )
                    .admin()
                    .on(p)]
                })
                .prefer(Pm::Yum, || {
                    vec![Command::new("sudo yum install -y golang", "Install Go via yum")
                        .admin()
                        .on(p)]
                })
                .prefer(Pm::Homebrew, brew)
                .or_else(page),
        }
    }

    fn rust(&self, v: &str, env: &EnvironmentSnapshot) -> Vec<Command> {
        let p = env.platform;
        let rustup = || {
            vec![Command::new(
                format!("{} -y --default-toolchain {}", RUSTUP_INSTALL, v),
                "Install Rust via rustup",
            )
            .on(p)]
        };

        match p {
            Platform::MacOS => Fallback::new(env)
                .prefer(Pm::Homebrew, || {
                    vec![
                        Command::new("brew install rustup", "Install rustup via Homebrew").on(p),
                        Command::new(
                            format!("rustup-init -y --default-toolchain {}", v),
                            "Install the Rust toolchain",
                        )
                        .on(p),
                    ]
                })
                .or_else(rustup),
            Platform::Windows => Fallback::new(env)
                .prefer(Pm::Chocolatey, || {
                    vec![Command::new(choco_install("rustup.install", None), "Install rustup via Chocolatey")
                        .admin()
                        .on(p)]
                })
                .prefer(Pm::Winget, || {
                    vec![Command::new(winget_install("Rustlang.Rustup", None), "Install rustup via winget").on(p)]
                })
                .or_else(|| vec![download_page(p, "Rust", "https://rustup.rs/")]),
            // Distribution packages lag behind; rustup is the supported path
            Platform::Linux => rustup(),
        }
    }

    fn ruby(&self, v: &str, env: &EnvironmentSnapshot) -> Vec<Command> {
        let p = env.platform;
        let brew =
            || vec![Command::new(format!("brew install ruby@{}", v), "Install Ruby via Homebrew").on(p)];

        match p {
            Platform::MacOS => Fallback::new(env)
                .prefer(Pm::Homebrew, brew)
                .or_else(|| vec![download_page(p, "Ruby", "https://www.ruby-lang.org/en/downloads/")]),
            Platform::Windows => Fallback::new(env)
                .prefer(Pm::Chocolatey, || {
                    vec![Command::new(choco_install("ruby", Some(v)), "Install Ruby via Chocolatey")
                        .admin()
                        .on(p)]
                })
                .prefer(Pm::Winget, || {
                    vec![Command::new(
                        winget_install(&format!("RubyInstallerTeam.Ruby.{}", v), None),
                        "Install Ruby via winget",
                    )
                    .on(p)]
                })
                .or_else(|| vec![download_page(p, "Ruby", "https://rubyinstaller.org/downloads/")]),
            Platform::Linux => Fallback::new(env)
                .prefer(Pm::Apt, || {
                    vec![Command::new(
                        format!("sudo apt-get update && sudo apt-get install -y ruby{}", v),
                        "Install Ruby via apt",
                    )
                    .admin()
                    .on(p)]
                })
                .prefer(Pm::Yum, || {
                    vec![Command::new("sudo yum install -y ruby", "Install Ruby via yum")
                        .admin()
                        .on(p)]
                })
                .prefer(Pm::Homebrew, brew)
                .or_else(|| vec![download_page(p, "Ruby", "https://www.ruby-lang.org/en/downloads/")]),
        }
    }

    fn php(&self, v: &str, env: &EnvironmentSnapshot) -> Vec<Command> {
        let p = env.platform;
        let brew =
            || vec![Command::new(format!("brew install php@{}", v), "Install PHP via Homebrew").on(p)];
        let page = || vec![download_page(p, "PHP", "https://www.php.net/downloads")];

        match p {
            Platform::MacOS => Fallback::new(env).prefer(Pm::Homebrew, brew).or_else(page),
            Platform::Windows => Fallback::new(env)
                .prefer(Pm::Chocolatey, || {
                    vec![Command::new(choco_install("php", Some(v)), "Install PHP via Chocolatey")
                        .admin()
                        .on(p)]
                })
                .or_else(page),
            Platform::Linux => Fallback::new(env)
                .prefer(Pm::Apt, || {
                    vec![Command::new(
                        format!("sudo apt-get update && sudo apt-get install -y php{}-cli", v),
                        "Install PHP via apt",
                    )
                    .admin()
                    .on(p)]
                })
                .prefer(Pm::Yum, || {
                    vec![Command::new("sudo yum install -y php-cli", "Install PHP via yum")
                        .admin()
                        .on(p)]
                })
                .prefer(Pm::Homebrew, brew)
                .or_else(page),
        }
    }
}

impl Synthesizer for LanguageSynthesizer {
    fn category(&self) -> HandlerCategory {
        HandlerCategory::Language
    }

    fn name(&self) -> &'static str {
        "Language"
    }

    fn can_handle(&self, step: &InstallationStep) -> bool {
        step.family.category() == HandlerCategory::Language
    }

    fn detection_commands(&self, step: &InstallationStep, env: &EnvironmentSnapshot) -> Vec<Command> {
        let probe = match step.family {
            ToolFamily::Node => "node --version",
            ToolFamily::Python if env.platform == Platform::Windows => "python --version",
            ToolFamily::Python => "python3 --version",
            ToolFamily::Java => "java --version",
            ToolFamily::Ruby => "ruby --version",
            ToolFamily::Go => "go version",
            ToolFamily::Rust => "rustc --version",
            ToolFamily::Php => "php --version",
            _ => return Vec::new(),
        };
        vec![Command::new(
            probe,
            format!("Check if {} is installed", step.family),
        )]
    }

    fn install_commands(&self, step: &InstallationStep, env: &EnvironmentSnapshot) -> Vec<Command> {
        let Some(version) = step.version.as_deref().or(default_version(step.family)) else {
            return Vec::new();
        };

        match step.family {
            ToolFamily::Node => self.node(version, env),
            ToolFamily::Python => self.python(version, env),
            ToolFamily::Java => self.java(version, env),
            ToolFamily::Go => self.go(version, env),
            ToolFamily::Rust => self.rust(version, env),
            ToolFamily::Ruby => self.ruby(version, env),
            ToolFamily::Php => self.php(version, env),
            _ => Vec::new(),
        }
    }

    fn finish(&self, step: &InstallationStep, env: &EnvironmentSnapshot) -> StepReport {
        match step.action {
            InstallAction::Detect => {
                let name = step.family.display_name();
                match env.detection_for(step.family) {
                    Some(d) if d.installed => StepReport::ok(format!(
                        "{} is already installed ({})",
                        name,
                        d.version.as_deref().unwrap_or("unknown version")
                    )),
                    _ => StepReport::ok(format!("{} is not installed", name)),
                }
            }
            InstallAction::Install => StepReport::ok(format!("{} installation initiated", step.tool)),
            _ => StepReport::ok(format!("{} {} completed", step.tool, step.action)),
        }
    }
}
