use domain::{PatchResult, PatchRule, ScaffoldError, SourcePatcher};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

const GENERATED_MAIN: &str = r#"import { NestFactory } from '@nestjs/core';
import { AppModule } from './app.module';

async function bootstrap() {
  const app = await NestFactory.create(AppModule);
  await app.listen(3000);
}
bootstrap();
"#;

fn write_main(dir: &TempDir, content: &str) -> PathBuf {
    let path = dir.path().join("main.ts");
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn test_literal_listen_is_applied() {
    let dir = TempDir::new().unwrap();
    let path = write_main(&dir, GENERATED_MAIN);

    let result = SourcePatcher::apply(&path, &PatchRule::listen_port(4000)).unwrap();

    assert_eq!(result, PatchResult::Applied);
    let patched = fs::read_to_string(&path).unwrap();
    assert!(patched.contains("await app.listen(Number(process.env.PORT) || 4000);"));
    assert!(!patched.contains("await app.listen(3000);"));
    assert_eq!(
        patched.replace("await app.listen(Number(process.env.PORT) || 4000);", "await app.listen(3000);"),
        GENERATED_MAIN
    );
}

#[test]
fn test_reapplying_is_idempotent() {
    let dir = TempDir::new().unwrap();
    let path = write_main(&dir, GENERATED_MAIN);
    let rule = PatchRule::listen_port(4000);

    assert_eq!(SourcePatcher::apply(&path, &rule).unwrap(), PatchResult::Applied);
    let after_first = fs::read(&path).unwrap();

    let second = SourcePatcher::apply(&path, &rule).unwrap();
    assert!(matches!(second, PatchResult::NotFound { .. }));
    assert_eq!(fs::read(&path).unwrap(), after_first);
}

#[test]
fn test_two_argument_listen_is_ambiguous_and_untouched() {
    let dir = TempDir::new().unwrap();
    let source = GENERATED_MAIN.replace("app.listen(3000)", "app.listen(3000, '0.0.0.0')");
    let path = write_main(&dir, &source);

    let result = SourcePatcher::apply(&path, &PatchRule::listen_port(4000)).unwrap();

    assert_eq!(
        result,
        PatchResult::Ambiguous {
            snippet: "await app.listen(3000, '0.0.0.0');".to_string()
        }
    );
    assert_eq!(fs::read_to_string(&path).unwrap(), source);
}

#[test]
fn test_missing_listen_is_not_found_and_untouched() {
    let dir = TempDir::new().unwrap();
    let source = "export const answer = 42;\n";
    let path = write_main(&dir, source);

    let result = SourcePatcher::apply(&path, &PatchRule::listen_port(4000)).unwrap();

    assert_eq!(
        result,
        PatchResult::NotFound {
            already_patched: false
        }
    );
    assert_eq!(fs::read_to_string(&path).unwrap(), source);
}

#[test]
fn test_missing_file_is_a_prerequisite_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("src").join("main.ts");

    let err = SourcePatcher::apply(&path, &PatchRule::listen_port(4000)).unwrap_err();

    match err {
        ScaffoldError::PrerequisiteMissing { path: missing } => assert_eq!(missing, path),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_custom_fallback_port() {
    let dir = TempDir::new().unwrap();
    let path = write_main(&dir, GENERATED_MAIN);

    SourcePatcher::apply(&path, &PatchRule::listen_port(5050)).unwrap();

    assert!(fs::read_to_string(&path)
        .unwrap()
        .contains("Number(process.env.PORT) || 5050"));
}

#[test]
fn test_callback_port_is_rewritten_without_leftovers() {
    let dir = TempDir::new().unwrap();
    let source = GENERATED_MAIN.replace(
        "await app.listen(3000);",
        "await app.listen(resolvePort(() => { return cfg.port(); }));",
    );
    let path = write_main(&dir, &source);

    let result = SourcePatcher::apply(&path, &PatchRule::listen_port(4000)).unwrap();

    assert_eq!(result, PatchResult::Applied);
    let patched = fs::read_to_string(&path).unwrap();
    assert_eq!(
        patched,
        GENERATED_MAIN.replace(
            "await app.listen(3000);",
            "await app.listen(Number(process.env.PORT) || 4000);"
        )
    );
}

#[test]
fn test_unterminated_listen_leaves_file_untouched() {
    let dir = TempDir::new().unwrap();
    let source = GENERATED_MAIN.replace(
        "await app.listen(3000);",
        "await app.listen(resolvePort(() => {\n    return cfg.port();\n  });",
    );
    let path = write_main(&dir, &source);

    let result = SourcePatcher::apply(&path, &PatchRule::listen_port(4000)).unwrap();

    assert!(matches!(result, PatchResult::Ambiguous { .. }));
    assert_eq!(fs::read_to_string(&path).unwrap(), source);
}
