use domain::catalog::{
    BACKEND_DEPENDENCIES, BACKEND_TYPE_DEFINITIONS, FRONTEND_DEPENDENCIES, NEST_GENERATOR,
    NEXT_GENERATOR, SHADCN_BASE_COLOR, SHADCN_CLI, SHADCN_COMPONENTS,
};
use domain::templates::{backend_env, frontend_env, BACKEND_ENV_FILE, FRONTEND_ENV_FILE};
use domain::{
    GeneratorStep, InstallStep, Invocation, PatchRule, PatchStep, PipelineStep, ScaffoldConfig,
    ScaffoldError, WriteStep,
};
use nexst_manifest::{to_pretty_json, PackageManager, RootPackage, CONTRACT_FILE, PACKAGE_FILE};
use std::path::{Path, PathBuf};

/// The ordered, fully resolved list of steps for one scaffold run.
#[derive(Debug, Clone)]
pub struct PipelinePlan {
    root: PathBuf,
    steps: Vec<PipelineStep>,
}

impl PipelinePlan {
    /// Assembles the fixed scaffold sequence from resolved configuration.
    ///
    /// Every file the run writes is rendered here, so a serialization problem
    /// surfaces before the project directory exists.
    pub fn build(config: &ScaffoldConfig) -> Result<Self, ScaffoldError> {
        let pm = config.package_manager;
        let root = config.root.clone();
        let web_dir = config.web_dir();
        let api_dir = config.api_dir();

        let contract = config.contract();
        let contract_json = to_pretty_json(&contract).map_err(|source| ScaffoldError::Serialize {
            what: "project contract",
            source,
        })?;

        let package = RootPackage::new(
            &config.project_name,
            pm,
            &config.web.descriptor(),
            &config.api.descriptor(),
        );
        let package_json = to_pretty_json(&package).map_err(|source| ScaffoldError::Serialize {
            what: "root package manifest",
            source,
        })?;

        let steps = vec![
            generate(
                "Creating NextJS App in Frontend",
                next_app(config, &root),
            ),
            PipelineStep::Install(InstallStep::add(
                "Installing ShadcnUI CLI",
                pm,
                &web_dir,
                &[SHADCN_CLI],
                true,
            )),
            generate(
                "Initializing ShadcnUI (Slate)",
                shadcn(pm, &web_dir).args(["init", "--yes", "--base-color", SHADCN_BASE_COLOR]),
            ),
            generate(
                "Adding ShadcnUI Components",
                shadcn(pm, &web_dir)
                    .args(["add", "--yes"])
                    .args(SHADCN_COMPONENTS.iter().copied()),
            ),
            PipelineStep::Install(InstallStep::add(
                "Installing Frontend Deps",
                pm,
                &web_dir,
                FRONTEND_DEPENDENCIES,
                false,
            )),
            generate(
                "Creating NestJS App in Backend",
                Invocation::new("npx", &root).args([
                    NEST_GENERATOR,
                    "new",
                    config.api.dir,
                    "--package-manager",
                    pm.binary(),
                    "--skip-git",
                    "--skip-install",
                ]),
            ),
            PipelineStep::Install(InstallStep::base(
                "Installing Backend Base Dependencies",
                pm,
                &api_dir,
            )),
            PipelineStep::Install(InstallStep::add(
                "Installing Backend Deps",
                pm,
                &api_dir,
                BACKEND_DEPENDENCIES,
                false,
            )),
            PipelineStep::Install(InstallStep::add(
                "Installing Backend Type Definitions",
                pm,
                &api_dir,
                BACKEND_TYPE_DEFINITIONS,
                true,
            )),
            generate(
                "Initializing Prisma",
                Invocation::new("npx", &api_dir).args(["prisma", "init"]),
            ),
            PipelineStep::Patch(PatchStep {
                label: "Configuring Backend Port".to_string(),
                path: api_dir.join("src").join("main.ts"),
                rule: PatchRule::listen_port(config.api.port),
            }),
            write(
                "Generating Backend .env.example",
                api_dir.join(BACKEND_ENV_FILE),
                backend_env(config.api.port, config.web.port).render(),
            ),
            write(
                "Generating Frontend .env.local.example",
                web_dir.join(FRONTEND_ENV_FILE),
                frontend_env(&config.project_name, config.api.port).render(),
            ),
            write(
                "Creating Root Package Configuration",
                root.join(PACKAGE_FILE),
                package_json,
            ),
            write(
                "Creating Project Contract (nexst.json)",
                root.join(CONTRACT_FILE),
                contract_json,
            ),
            PipelineStep::Install(InstallStep::base(
                "Installing Root Dependencies",
                pm,
                &root,
            )),
        ];

        Ok(Self { root, steps })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn steps(&self) -> &[PipelineStep] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn into_steps(self) -> Vec<PipelineStep> {
        self.steps
    }
}

fn generate(label: &str, invocation: Invocation) -> PipelineStep {
    PipelineStep::Generate(GeneratorStep {
        label: label.to_string(),
        invocation,
    })
}

fn write(label: &str, path: PathBuf, contents: String) -> PipelineStep {
    PipelineStep::Write(WriteStep {
        label: label.to_string(),
        path,
        contents,
    })
}

fn next_app(config: &ScaffoldConfig, root: &Path) -> Invocation {
    let mut invocation = Invocation::new("npx", root).args([
        NEXT_GENERATOR,
        config.web.dir,
        "--ts",
        "--eslint",
        "--tailwind",
        "--app",
        "--yes",
        config.package_manager.generator_flag(),
    ]);

    if config.src_dir {
        invocation = invocation.arg("--src-dir");
    }
    if let Some(alias) = &config.import_alias {
        invocation = invocation.args(["--import-alias", alias.as_str()]);
    }

    invocation
}

/// The shadcn CLI installed as a dev dependency of the frontend.
fn shadcn(pm: PackageManager, dir: &Path) -> Invocation {
    match pm {
        PackageManager::Pnpm => Invocation::new("pnpm", dir).args(["exec", "shadcn"]),
        PackageManager::Npm => Invocation::new("npx", dir).arg("shadcn"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::{Profile, ScaffoldOptions, StepKind};

    fn config(pm: PackageManager, profile: Profile, alias: bool) -> ScaffoldConfig {
        let options = ScaffoldOptions {
            project_name: Some("acme".to_string()),
            package_manager: pm,
            profile,
            import_alias: alias,
            ..ScaffoldOptions::default()
        };
        ScaffoldConfig::resolve(options, Path::new("/work")).unwrap()
    }

    #[test]
    fn plan_has_sixteen_steps_in_order() {
        let plan = PipelinePlan::build(&config(PackageManager::Pnpm, Profile::Src, true)).unwrap();
        let kinds: Vec<StepKind> = plan.steps().iter().map(|s| s.kind()).collect();

        assert_eq!(plan.len(), 16);
        assert_eq!(kinds[0], StepKind::Generate);
        assert_eq!(kinds[10], StepKind::Patch);
        assert_eq!(kinds[15], StepKind::Install);
        assert_eq!(plan.steps()[15].label(), "Installing Root Dependencies");
    }

    #[test]
    fn next_generator_flags_follow_profile() {
        let src = PipelinePlan::build(&config(PackageManager::Pnpm, Profile::Src, false)).unwrap();
        let args = &src.steps()[0].invocation().unwrap().args;
        assert!(args.contains(&"--src-dir".to_string()));
        assert!(!args.contains(&"--import-alias".to_string()));

        let flat = PipelinePlan::build(&config(PackageManager::Npm, Profile::Flat, true)).unwrap();
        let args = &flat.steps()[0].invocation().unwrap().args;
        assert!(!args.contains(&"--src-dir".to_string()));
        assert!(args.ends_with(&["--import-alias".to_string(), "@/*".to_string()]));
        assert!(args.contains(&"--use-npm".to_string()));
    }

    #[test]
    fn shadcn_runs_through_the_package_manager() {
        let pnpm = PipelinePlan::build(&config(PackageManager::Pnpm, Profile::Src, true)).unwrap();
        let init = pnpm.steps()[2].invocation().unwrap();
        assert_eq!(init.program, "pnpm");
        assert_eq!(init.args[..3], ["exec", "shadcn", "init"]);

        let npm = PipelinePlan::build(&config(PackageManager::Npm, Profile::Src, true)).unwrap();
        let init = npm.steps()[2].invocation().unwrap();
        assert_eq!(init.program, "npx");
        assert_eq!(init.args[..2], ["shadcn", "init"]);
    }
}
