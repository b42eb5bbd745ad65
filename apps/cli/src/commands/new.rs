use crate::core::error::CliError;
use crate::core::observer::{PatchTarget, TerminalObserver};
use crate::ui::{self, beauty, components::prompt, Icon, Theme};
use anyhow::Context;
use clap::Args;
use nexst::application::{preflight, PipelineExecutor, PipelinePlan};
use nexst::domain::config::{DEFAULT_API_PORT, DEFAULT_WEB_PORT};
use nexst::domain::templates::{BACKEND_ENV_FILE, FRONTEND_ENV_FILE};
use nexst::domain::{Profile, ScaffoldConfig, ScaffoldOptions};
use nexst::infrastructure::{PathToolLocator, SystemProcessRunner};
use nexst_manifest::PackageManager;
use std::path::Path;
use tracing::info;

#[derive(Args, Debug, Clone)]
pub struct NewCommand {
    /// Name of the directory to create
    pub project_name: Option<String>,

    /// Package manager used by every generated service
    #[arg(long = "pm", env = "NEXST_PACKAGE_MANAGER", default_value_t = PackageManager::Pnpm, value_name = "pnpm|npm")]
    pub package_manager: PackageManager,

    /// Disable the banner, the start confirmation and spinners
    #[arg(long)]
    pub no_ux: bool,

    /// Scaffold the frontend without the @/* import alias
    #[arg(long)]
    pub no_alias: bool,

    /// Frontend layout
    #[arg(long, env = "NEXST_PROFILE", default_value_t = Profile::Src, value_name = "src|flat")]
    pub profile: Profile,

    #[arg(long, default_value_t = DEFAULT_WEB_PORT)]
    pub web_port: u16,

    #[arg(long, default_value_t = DEFAULT_API_PORT)]
    pub api_port: u16,

    /// Print the steps that would run and exit
    #[arg(long)]
    pub dry_run: bool,

    /// Stream generator output and log at debug level
    #[arg(short, long)]
    pub verbose: bool,

    /// Tracing filter, e.g. `info` or `application=debug`
    #[arg(long)]
    pub log_level: Option<String>,
}

impl NewCommand {
    /// Runs the command in the current directory and returns the process exit code.
    pub async fn execute(self) -> anyhow::Result<i32> {
        let cwd = std::env::current_dir().context("cannot read the current directory")?;
        Ok(self.run_in(&cwd).await)
    }

    /// Scaffolds under `cwd`. Cancellation exits 0, every error exits 1.
    pub async fn run_in(self, cwd: &Path) -> i32 {
        let config = match ScaffoldConfig::resolve(self.options(), cwd) {
            Ok(config) => config,
            Err(e) => {
                CliError::from(e).render(cwd);
                return 1;
            }
        };
        let root = config.root.clone();

        match self.scaffold(config).await {
            Ok(()) => 0,
            Err(CliError::Cancelled) => {
                CliError::Cancelled.render(&root);
                0
            }
            Err(e) => {
                e.render(&root);
                1
            }
        }
    }

    fn options(&self) -> ScaffoldOptions {
        ScaffoldOptions {
            project_name: self.project_name.clone(),
            package_manager: self.package_manager,
            profile: self.profile,
            import_alias: !self.no_alias,
            interactive: !self.no_ux,
            output_visible: self.verbose,
            web_port: self.web_port,
            api_port: self.api_port,
        }
    }

    async fn scaffold(self, config: ScaffoldConfig) -> Result<(), CliError> {
        let plan = PipelinePlan::build(&config)?;

        if self.dry_run {
            print_plan(&config, &plan);
            return Ok(());
        }

        let runner = SystemProcessRunner::new();
        preflight(&config, &PathToolLocator, &runner).await?;

        if config.interactive {
            beauty::print_header().context("failed to draw the banner")?;
            cliclack::intro(Theme::primary(" nexst ")).context("failed to write to the terminal")?;
            cliclack::note("Project", describe(&config))
                .context("failed to write to the terminal")?;
            if !prompt::confirm("Start Scaffolding Your Project?")
                .context("failed to read the confirmation")?
            {
                return Err(CliError::Cancelled);
            }
        } else {
            println!("{}", Theme::muted("UX Disabled"));
        }

        let spinners = config.interactive && !config.output_visible && ui::progress_visible();
        let observer = TerminalObserver::new(spinners)
            .with_patch_targets(PatchTarget::collect(&plan), config.api.port);
        info!(project = %config.project_name, pm = %config.package_manager, "scaffolding");

        PipelineExecutor::new(&runner, &observer, config.output_visible)
            .run(plan)
            .await?;

        if config.interactive {
            let outro = match observer.warnings() {
                0 => Theme::success("Done").to_string(),
                n => Theme::warning(format!("Done with {} warning(s)", n)).to_string(),
            };
            cliclack::outro(outro).context("failed to write to the terminal")?;
        }
        print_success(&config);
        Ok(())
    }
}

fn describe(config: &ScaffoldConfig) -> String {
    format!(
        "Location:        {}\nPackage manager: {}\nProfile:         {}\nImport alias:    {}\nPorts:           web {} / api {}",
        config.root.display(),
        config.package_manager,
        config.profile,
        config.import_alias.as_deref().unwrap_or("off"),
        config.web.port,
        config.api.port,
    )
}

fn print_plan(config: &ScaffoldConfig, plan: &PipelinePlan) {
    println!();
    println!(
        "{} {}",
        Theme::primary("Dry run for"),
        Theme::bold(config.root.display())
    );
    println!();
    for (i, step) in plan.steps().iter().enumerate() {
        println!(
            "  {:>2}. {} {}",
            i + 1,
            Theme::bold(step.label()),
            Theme::muted(format!("[{}]", step.kind()))
        );
        println!("      {}", Theme::muted(step.describe()));
    }
    println!();
    println!("{}", Theme::muted("Nothing was written."));
}

fn print_success(config: &ScaffoldConfig) {
    let bullet = Theme::primary(Icon::Bullet);
    let url = |port: u16| Theme::primary(format!("http://localhost:{}", port));

    println!();
    println!("{}", Theme::primary(ui::rule()));
    println!();
    println!("  {}", Theme::primary("PROJECT INITIALIZED SUCCESSFULLY"));
    println!("  {}", Theme::muted("Your Full-Stack Project is Ready to Go!"));
    println!();
    println!("  {}", Theme::primary(format!("{} Quick Start", Icon::Bolt)));
    println!();
    println!("  {}", Theme::muted("1. Navigate to Your Project"));
    println!("     {}", Theme::primary(format!("cd {}", config.project_name)));
    println!();
    println!("  {}", Theme::muted("2. Run Development Servers (Both Frontend + Backend)"));
    println!("     {}", Theme::primary(config.package_manager.dev_command()));
    println!();
    println!("  {}", Theme::muted("Your Services:"));
    println!("     {} {} {}", bullet, Theme::muted("Frontend:"), url(config.web.port));
    println!("     {} {} {}", bullet, Theme::muted("Backend: "), url(config.api.port));
    println!();
    println!("  {}", Theme::muted("Environment Files:"));
    println!(
        "     {} {} {}",
        bullet,
        Theme::muted("Frontend:"),
        Theme::path(format!("{}/{}", config.web.dir, FRONTEND_ENV_FILE))
    );
    println!(
        "     {} {} {}",
        bullet,
        Theme::muted("Backend: "),
        Theme::path(format!("{}/{}", config.api.dir, BACKEND_ENV_FILE))
    );
    println!(
        "     {}",
        Theme::muted("Copy these to .env.local and .env respectively")
    );
    println!();
    println!("{}", Theme::primary(ui::rule()));
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::TempDir;

    #[derive(Parser)]
    struct TestCli {
        #[command(flatten)]
        new: NewCommand,
    }

    fn parse(args: &[&str]) -> NewCommand {
        TestCli::parse_from(std::iter::once("nexst").chain(args.iter().copied())).new
    }

    #[test]
    fn defaults_match_the_classic_layout() {
        let cmd = parse(&["acme"]);
        let options = cmd.options();

        assert_eq!(options.project_name.as_deref(), Some("acme"));
        assert_eq!(options.package_manager, PackageManager::Pnpm);
        assert_eq!(options.profile, Profile::Src);
        assert!(options.import_alias);
        assert!(options.interactive);
        assert!(!options.output_visible);
        assert_eq!((options.web_port, options.api_port), (3000, 4000));
    }

    #[test]
    fn flags_flow_into_options() {
        let cmd = parse(&[
            "acme", "--pm", "npm", "--no-ux", "--no-alias", "--api-port", "5000", "-v",
        ]);
        let options = cmd.options();

        assert_eq!(options.package_manager, PackageManager::Npm);
        assert!(!options.import_alias);
        assert!(!options.interactive);
        assert!(options.output_visible);
        assert_eq!(options.api_port, 5000);
    }

    #[test]
    fn unknown_package_manager_is_rejected() {
        assert!(TestCli::try_parse_from(["nexst", "acme", "--pm", "yarn"]).is_err());
    }

    #[test]
    fn padded_name_resolves_to_the_trimmed_root() {
        let dir = TempDir::new().unwrap();
        let config = ScaffoldConfig::resolve(parse(&[" acme "]).options(), dir.path()).unwrap();

        assert_eq!(config.root, dir.path().join("acme"));
    }

    #[tokio::test]
    async fn existing_directory_exits_1_without_touching_it() {
        let dir = TempDir::new().unwrap();
        let root = dir.path().join("acme");
        fs::create_dir(&root).unwrap();
        fs::write(root.join("keep.txt"), "mine").unwrap();

        let code = parse(&[" acme ", "--no-ux"]).run_in(dir.path()).await;

        assert_eq!(code, 1);
        let entries: Vec<_> = fs::read_dir(&root).unwrap().collect();
        assert_eq!(entries.len(), 1);
        assert_eq!(fs::read_to_string(root.join("keep.txt")).unwrap(), "mine");
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[tokio::test]
    async fn missing_name_exits_1() {
        let dir = TempDir::new().unwrap();
        assert_eq!(parse(&["--no-ux"]).run_in(dir.path()).await, 1);
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn dry_run_writes_nothing() {
        let dir = TempDir::new().unwrap();
        assert_eq!(parse(&["acme", "--dry-run"]).run_in(dir.path()).await, 0);
        assert!(!dir.path().join("acme").exists());
    }
}
