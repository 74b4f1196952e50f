use super::strategy::{choco_install, download_page, winget_install, Fallback};
use super::Synthesizer;
use crate::entities::{Command, InstallationStep};
use crate::routing::{HandlerCategory, ToolFamily};
use crate::system::platform::Platform;
use crate::system::snapshot::{EnvironmentSnapshot, PackageManagerKind as Pm};

/// IDEs and developer tooling. Also the fallback handler for unknown names,
/// which synthesize nothing.
pub struct DevToolSynthesizer;

impl DevToolSynthesizer {
    fn docker(&self, v: Option<&str>, env: &EnvironmentSnapshot) -> Vec<Command> {
        let p = env.platform;
        match p {
            Platform::MacOS => Fallback::new(env)
                .prefer(Pm::Homebrew, || {
                    vec![Command::new("brew install --cask docker", "Install Docker Desktop via Homebrew").on(p)]
                })
                .or_else(|| vec![download_page(p, "Docker Desktop", "https://www.docker.com/products/docker-desktop/")]),
            Platform::Windows => Fallback::new(env)
                .prefer(Pm::Chocolatey, || {
                    vec![Command::new(choco_install("docker-desktop", v), "Install Docker Desktop via Chocolatey")
                        .admin()
                        .on(p)]
                })
                .prefer(Pm::Winget, || {
                    vec![Command::new(winget_install("Docker.DockerDesktop", v), "Install Docker Desktop via winget").on(p)]
                })
                .or_else(|| vec![download_page(p, "Docker Desktop", "https://www.docker.com/products/docker-desktop/")]),
            Platform::Linux => vec![Command::new(
                "curl -fsSL https://get.docker.com -o get-docker.sh && sudo sh get-docker.sh",
                "Install Docker via official script",
            )
            .admin()
            .on(p)],
        }
    }

    fn git(&self, v: Option<&str>, env: &EnvironmentSnapshot) -> Vec<Command> {
        let p = env.platform;
        let brew = || vec![Command::new("brew install git", "Install Git via Homebrew").on(p)];
        let page = || vec![download_page(p, "Git", "https://git-scm.com/downloads")];

        match p {
            Platform::MacOS => Fallback::new(env).prefer(Pm::Homebrew, brew).or_else(|| {
                vec![Command::new("xcode-select --install", "Install Git with the Xcode Command Line Tools").on(p)]
            }),
            Platform::Windows => Fallback::new(env)
                .prefer(Pm::Chocolatey, || {
                    vec![Command::new(choco_install("git", v), "Install Git via Chocolatey")
                        .admin()
                        .on(p)]
                })
                .prefer(Pm::Winget, || {
                    vec![Command::new(winget_install("Git.Git", v), "Install Git via winget").on(p)]
                })
                .or_else(page),
            Platform::Linux => Fallback::new(env)
                .prefer(Pm::Apt, || {
                    vec![Command::new("sudo apt-get install -y git", "Install Git via apt")
                        .admin()
                        .on(p)]
                })
                .prefer(Pm::Yum, || {
                    vec![Command::new("sudo yum install -y git", "Install Git via yum")
                        .admin()
                        .on(p)]
                })
                .prefer(Pm::Homebrew, brew)
                .or_else(page),
        }
    }

    fn vscode(&self, v: Option<&str>, env: &EnvironmentSnapshot) -> Vec<Command> {
        let p = env.platform;
        let page = || vec![download_page(p, "Visual Studio Code", "https://code.visualstudio.com/download")];

        match p {
            Platform::MacOS => Fallback::new(env)
                .prefer(Pm::Homebrew, || {
                    vec![Command::new("brew install --cask visual-studio-code", "Install VS Code via Homebrew").on(p)]
                })
                .or_else(page),
            Platform::Windows => Fallback::new(env)
                .prefer(Pm::Chocolatey, || {
                    vec![Command::new(choco_install("vscode", v), "Install VS Code via Chocolatey")
                        .admin()
                        .on(p)]
                })
                .prefer(Pm::Winget, || {
                    vec![Command::new(winget_install("Microsoft.VisualStudioCode", v), "Install VS Code via winget").on(p)]
                })
                .or_else(page),
            Platform::Linux => vec![Command::new("sudo snap install code --classic", "Install VS Code via snap")
                .admin()
                .on(p)],
        }
    }

    fn kubectl(&self, v: Option<&str>, env: &EnvironmentSnapshot) -> Vec<Command> {
        let p = env.platform;
        match p {
            Platform::MacOS => Fallback::new(env)
                .prefer(Pm::Homebrew, || {
                    vec![Command::new("brew install kubectl", "Install kubectl via Homebrew").on(p)]
                })
                .or_else(|| vec![download_page(p, "kubectl", "https://kubernetes.io/docs/tasks/tools/")]),
            Platform::Windows => Fallback::new(env)
                .prefer(Pm::Chocolatey, || {
                    vec![Command::new(choco_install("kubernetes-cli", v), "Install kubectl via Chocolatey")
                        .admin()
                        .on(p)]
                })
                .prefer(Pm::Winget, || {
                    vec![Command::new(winget_install("Kubernetes.kubectl", v), "Install kubectl via winget").on(p)]
                })
                .or_else(|| vec![download_page(p, "kubectl", "https://kubernetes.io/docs/tasks/tools/")]),
            Platform::Linux => {
                let release = match v {
                    Some(v) if v.starts_with('v') => v.to_string(),
                    Some(v) => format!("v{}", v),
                    None => "$(curl -L -s https://dl.k8s.io/release/stable.txt)".to_string(),
                };
                vec![
                    Command::new(
                        format!(
                            "curl -LO \"https://dl.k8s.io/release/{}/bin/linux/{}/kubectl\"",
                            release,
                            env.architecture.release_name()
                        ),
                        "Download the kubectl binary",
                    )
                    .on(p),
                    Command::new(
                        "sudo install -o root -g root -m 0755 kubectl /usr/local/bin/kubectl",
                        "Install kubectl into /usr/local/bin",
                    )
                    .admin()
                    .on(p),
                ]
            }
        }
    }

    fn terraform(&self, v: Option<&str>, env: &EnvironmentSnapshot) -> Vec<Command> {
        let p = env.platform;
        let brew = || {
            vec![Command::new(
                "brew tap hashicorp/tap && brew install hashicorp/tap/terraform",
                "Install Terraform via Homebrew",
            )
            .on(p)]
        };
        let page = || vec![download_page(p, "Terraform", "https://developer.hashicorp.com/terraform/install")];

        match p {
            Platform::MacOS => Fallback::new(env).prefer(Pm::Homebrew, brew).or_else(page),
            Platform::Windows => Fallback::new(env)
                .prefer(Pm::Chocolatey, || {
                    vec![Command::new(choco_install("terraform", v), "Install Terraform via Chocolatey")
                        .admin()
                        .on(p)]
                })
                .prefer(Pm::Winget, || {
                    vec![Command::new(winget_install("Hashicorp.Terraform", v), "Install Terraform via winget").on(p)]
                })
                .or_else(page),
            Platform::Linux => Fallback::new(env)
                .prefer(Pm::Homebrew, brew)
                .or_else(page),
        }
    }
}

impl Synthesizer for DevToolSynthesizer {
    fn category(&self) -> HandlerCategory {
        HandlerCategory::DevTool
    }

    fn name(&self) -> &'static str {
        "IDE Tool"
    }

    fn can_handle(&self, _step: &InstallationStep) -> bool {
        true
    }

    fn detection_commands(&self, step: &InstallationStep, _env: &EnvironmentSnapshot) -> Vec<Command> {
        let probe = match step.family {
            ToolFamily::Docker => "docker --version",
            ToolFamily::Git => "git --version",
            ToolFamily::Kubectl => "kubectl version --client",
            ToolFamily::VsCode => "code --version",
            ToolFamily::Terraform => "terraform version",
            _ => return Vec::new(),
        };
        vec![Command::new(probe, format!("Check {}", step.family))]
    }

    fn install_commands(&self, step: &InstallationStep, env: &EnvironmentSnapshot) -> Vec<Command> {
        let version = step.version.as_deref();
        match step.family {
            ToolFamily::Docker => self.docker(version, env),
            ToolFamily::Git => self.git(version, env),
            ToolFamily::VsCode => self.vscode(version, env),
            ToolFamily::Kubectl => self.kubectl(version, env),
            ToolFamily::Terraform => self.terraform(version, env),
            _ => Vec::new(),
        }
    }
}
