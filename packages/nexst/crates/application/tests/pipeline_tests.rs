use application::{preflight, FailureReport, PipelineExecutor, PipelinePlan};
use async_trait::async_trait;
use domain::{
    ExecutionError, ExitKind, PatchResult, ProcessRunner, RunOptions, ScaffoldConfig,
    ScaffoldError, ScaffoldOptions, SilentObserver, StepOutcome, ToolLocator, ValidationError,
};
use nexst_manifest::{PackageManager, ProjectContract, RootPackage};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tempfile::TempDir;

const NEST_MAIN: &str = "async function bootstrap() {\n  const app = await NestFactory.create(AppModule);\n  await app.listen(3000);\n}\nbootstrap();\n";

/// Records every command and fakes the generators' side effects.
#[derive(Default)]
struct FakeRunner {
    calls: Mutex<Vec<(String, Vec<String>, PathBuf)>>,
    fail_on: Option<(&'static str, &'static str)>,
    nest_main: Option<String>,
}

impl FakeRunner {
    fn failing_on(program: &'static str, first_arg: &'static str) -> Self {
        Self {
            fail_on: Some((program, first_arg)),
            ..Self::default()
        }
    }

    fn commands(&self) -> Vec<String> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .map(|(program, args, _)| format!("{} {}", program, args.join(" ")))
            .collect()
    }
}

#[async_trait]
impl ProcessRunner for FakeRunner {
    async fn run(
        &self,
        program: &str,
        args: &[String],
        options: &RunOptions,
    ) -> Result<(), ExecutionError> {
        self.calls.lock().unwrap().push((
            program.to_string(),
            args.to_vec(),
            options.working_dir.clone(),
        ));

        if let Some((fail_program, fail_arg)) = self.fail_on {
            if program == fail_program && args.first().map(String::as_str) == Some(fail_arg) {
                return Err(ExecutionError::new(program, args, ExitKind::Code(1))
                    .with_stderr("network unreachable"));
            }
        }

        let cwd = &options.working_dir;
        match args.first().map(String::as_str) {
            Some("create-next-app@latest") => fs::create_dir_all(cwd.join(&args[1])).unwrap(),
            Some("@nestjs/cli@latest") => {
                let src = cwd.join(&args[2]).join("src");
                fs::create_dir_all(&src).unwrap();
                let main = self.nest_main.as_deref().unwrap_or(NEST_MAIN);
                fs::write(src.join("main.ts"), main).unwrap();
            }
            _ => {}
        }
        Ok(())
    }
}

struct FakeLocator(bool);

impl ToolLocator for FakeLocator {
    fn locate(&self, program: &str) -> Option<PathBuf> {
        self.0.then(|| PathBuf::from("/usr/bin").join(program))
    }
}

fn resolve(cwd: &Path, pm: PackageManager) -> ScaffoldConfig {
    let options = ScaffoldOptions {
        project_name: Some("acme".to_string()),
        package_manager: pm,
        ..ScaffoldOptions::default()
    };
    ScaffoldConfig::resolve(options, cwd).unwrap()
}

#[tokio::test]
async fn test_full_run_writes_every_artifact() {
    let dir = TempDir::new().unwrap();
    let config = resolve(dir.path(), PackageManager::Pnpm);
    let runner = FakeRunner::default();

    let plan = PipelinePlan::build(&config).unwrap();
    let summary = PipelineExecutor::new(&runner, &SilentObserver, false)
        .run(plan)
        .await
        .unwrap();

    assert_eq!(summary.steps.len(), 16);
    assert_eq!(summary.warnings().count(), 0);
    assert_eq!(runner.commands().len(), 11);

    let root = dir.path().join("acme");
    let main = fs::read_to_string(root.join("backend/src/main.ts")).unwrap();
    assert!(main.contains("await app.listen(Number(process.env.PORT) || 4000);"));
    assert!(root.join("backend/.env.example").is_file());
    assert!(root.join("frontend/.env.local.example").is_file());

    let contract: ProjectContract =
        serde_json::from_str(&fs::read_to_string(root.join("nexst.json")).unwrap()).unwrap();
    assert_eq!(contract.name, "acme");

    let package: RootPackage =
        serde_json::from_str(&fs::read_to_string(root.join("package.json")).unwrap()).unwrap();
    assert_eq!(package.scripts["dev:web"], "pnpm -C frontend dev");
}

#[tokio::test]
async fn test_contract_ports_match_env_templates() {
    let dir = TempDir::new().unwrap();
    let options = ScaffoldOptions {
        project_name: Some("acme".to_string()),
        web_port: 3100,
        api_port: 4100,
        ..ScaffoldOptions::default()
    };
    let config = ScaffoldConfig::resolve(options, dir.path()).unwrap();
    let runner = FakeRunner::default();

    PipelineExecutor::new(&runner, &SilentObserver, false)
        .run(PipelinePlan::build(&config).unwrap())
        .await
        .unwrap();

    let root = dir.path().join("acme");
    let contract: ProjectContract =
        serde_json::from_str(&fs::read_to_string(root.join("nexst.json")).unwrap()).unwrap();
    let web = contract.web().unwrap().port;
    let api = contract.api().unwrap().port;
    assert_ne!(web, api);

    let backend_env = fs::read_to_string(root.join("backend/.env.example")).unwrap();
    assert!(backend_env.contains(&format!("\nPORT={}\n", api)));
    assert!(backend_env.contains(&format!("CORS_ORIGIN=http://localhost:{}\n", web)));

    let frontend_env = fs::read_to_string(root.join("frontend/.env.local.example")).unwrap();
    assert!(frontend_env.contains(&format!("NEXT_PUBLIC_API_URL=http://localhost:{}\n", api)));
}

#[tokio::test]
async fn test_install_failure_stops_the_pipeline() {
    let dir = TempDir::new().unwrap();
    let config = resolve(dir.path(), PackageManager::Pnpm);
    let runner = FakeRunner::failing_on("pnpm", "install");

    let err = PipelineExecutor::new(&runner, &SilentObserver, false)
        .run(PipelinePlan::build(&config).unwrap())
        .await
        .unwrap_err();

    // "Installing Backend Base Dependencies" is the first `pnpm install`.
    let commands = runner.commands();
    assert_eq!(commands.last().map(String::as_str), Some("pnpm install"));
    assert_eq!(commands.len(), 7);
    let main = fs::read_to_string(config.api_dir().join("src/main.ts")).unwrap();
    assert!(!main.contains("process.env.PORT"));
    assert!(!config.root.join("nexst.json").exists());

    assert!(matches!(err, ScaffoldError::Execution(_)));
    let report = FailureReport::new(&err, &config.root);
    let text = report.to_string();
    assert!(text.contains(&config.root.display().to_string()));
    assert!(text.contains("network unreachable"));
}

#[tokio::test]
async fn test_ambiguous_listen_is_a_warning_not_a_failure() {
    let dir = TempDir::new().unwrap();
    let config = resolve(dir.path(), PackageManager::Npm);
    let runner = FakeRunner {
        nest_main: Some(NEST_MAIN.replace("listen(3000)", "listen(3000, '0.0.0.0')")),
        ..FakeRunner::default()
    };

    let summary = PipelineExecutor::new(&runner, &SilentObserver, false)
        .run(PipelinePlan::build(&config).unwrap())
        .await
        .unwrap();

    let warnings: Vec<_> = summary.warnings().collect();
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0].0, "Configuring Backend Port");
    assert!(matches!(warnings[0].1, PatchResult::Ambiguous { .. }));
    assert!(config.root.join("nexst.json").is_file());
    assert!(summary
        .steps
        .iter()
        .any(|(_, outcome)| matches!(outcome, StepOutcome::Wrote { .. })));
}

#[tokio::test]
async fn test_npm_plan_never_uses_pnpm() {
    let dir = TempDir::new().unwrap();
    let config = resolve(dir.path(), PackageManager::Npm);
    let runner = FakeRunner::default();

    PipelineExecutor::new(&runner, &SilentObserver, false)
        .run(PipelinePlan::build(&config).unwrap())
        .await
        .unwrap();

    for command in runner.commands() {
        assert!(!command.starts_with("pnpm"), "unexpected pnpm call: {command}");
    }
    assert!(runner
        .commands()
        .contains(&"npx shadcn init --yes --base-color slate".to_string()));
}

#[tokio::test]
async fn test_preflight_rejects_existing_directory() {
    let dir = TempDir::new().unwrap();
    let config = resolve(dir.path(), PackageManager::Pnpm);
    fs::create_dir(&config.root).unwrap();
    fs::write(config.root.join("keep.txt"), "mine").unwrap();
    let runner = FakeRunner::default();

    let err = preflight(&config, &FakeLocator(true), &runner)
        .await
        .unwrap_err();

    assert!(matches!(err, ValidationError::DirectoryExists(_)));
    assert!(runner.commands().is_empty());
    assert_eq!(fs::read_to_string(config.root.join("keep.txt")).unwrap(), "mine");

    let report = FailureReport::new(&ScaffoldError::from(err), &config.root);
    assert_eq!(report.cleanup_command(), None);
}

#[tokio::test]
async fn test_preflight_reports_missing_package_manager() {
    let dir = TempDir::new().unwrap();
    let config = resolve(dir.path(), PackageManager::Pnpm);

    let err = preflight(&config, &FakeLocator(false), &FakeRunner::default())
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        ValidationError::PackageManagerMissing(PackageManager::Pnpm)
    ));

    let failing = FakeRunner::failing_on("pnpm", "--version");
    let err = preflight(&config, &FakeLocator(true), &failing)
        .await
        .unwrap_err();
    assert!(matches!(err, ValidationError::PackageManagerMissing(_)));
    assert!(!config.root.exists());
}

#[tokio::test]
async fn test_preflight_passes_for_fresh_target() {
    let dir = TempDir::new().unwrap();
    let config = resolve(dir.path(), PackageManager::Pnpm);
    let runner = FakeRunner::default();

    preflight(&config, &FakeLocator(true), &runner).await.unwrap();

    assert_eq!(runner.commands(), vec!["pnpm --version".to_string()]);
}
