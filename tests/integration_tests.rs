//! Integration tests for batch translation
//!
//! These tests run the full read -> translate -> write workflow against a
//! mocked DeepL endpoint, both through the library and through the compiled
//! binary (to check exit codes and console output).

use std::path::{Path, PathBuf};
use std::time::Duration;
use tempfile::TempDir;
use wiremock::{
    matchers::{body_partial_json, method, path},
    Mock, MockServer, ResponseTemplate,
};

use batch_translate::{
    config::{BackendConfig, RunConfig},
    i18n::LanguageId,
    output::OutputTemplate,
    runner::{self, FailureStage, RunError, TranslationOutcome},
    service::build_service,
};

// ==================== Test Helpers ====================

/// Write the two input files and build a run config pointing into `temp_dir`
fn create_run_config(temp_dir: &TempDir, source_text: &str, language_list: &str) -> RunConfig {
    let source_text_path = temp_dir.path().join("input.txt");
    let language_list_path = temp_dir.path().join("target_languages.txt");
    std::fs::write(&source_text_path, source_text).expect("Failed to write source text");
    std::fs::write(&language_list_path, language_list).expect("Failed to write language list");

    let template = temp_dir.path().join("output_{code}.txt");
    RunConfig {
        source_text_path,
        language_list_path,
        source_language: LanguageId::new("en"),
        output_template: OutputTemplate::parse(template.to_str().unwrap()).unwrap(),
        report_path: None,
    }
}

fn deepl_backend(mock_server: &MockServer) -> BackendConfig {
    BackendConfig::DeepL {
        api_key: "test-deepl-key:fx".to_string(),
        api_url: mock_server.uri(),
    }
}

/// Mount a DeepL translation for one target code
async fn mount_translation(mock_server: &MockServer, target_lang: &str, text: &str) {
    Mock::given(method("POST"))
        .and(path("/v2/translate"))
        .and(body_partial_json(serde_json::json!({ "target_lang": target_lang })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "translations": [{ "detected_source_language": "EN", "text": text }]
        })))
        .mount(mock_server)
        .await;
}

/// Mount a DeepL rejection for one target code
async fn mount_rejection(mock_server: &MockServer, target_lang: &str) {
    Mock::given(method("POST"))
        .and(path("/v2/translate"))
        .and(body_partial_json(serde_json::json!({ "target_lang": target_lang })))
        .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
            "message": "Value for 'target_lang' not supported."
        })))
        .mount(mock_server)
        .await;
}

fn output_path(temp_dir: &TempDir, code: &str) -> PathBuf {
    temp_dir.path().join(format!("output_{}.txt", code))
}

fn list_outputs(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .unwrap()
        .filter_map(|e| e.ok())
        .map(|e| e.file_name().to_string_lossy().to_string())
        .filter(|name| name.starts_with("output_"))
        .collect();
    names.sort();
    names
}

// ==================== Library Workflow Tests ====================

#[tokio::test]
async fn test_two_languages_both_succeed() {
    let mock_server = MockServer::start().await;
    mount_translation(&mock_server, "FR", "Bonjour, le monde.").await;
    mount_translation(&mock_server, "ES", "Hola, mundo.").await;

    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config = create_run_config(&temp_dir, "Hello, world.", "fr\nes\n");
    let service = build_service(&deepl_backend(&mock_server), Duration::from_secs(5)).unwrap();

    let outcomes = runner::run(&config, service.as_ref())
        .await
        .expect("Run should complete");

    assert_eq!(outcomes.len(), 2);
    assert!(outcomes.iter().all(|o| o.is_success()));
    assert_eq!(
        std::fs::read_to_string(output_path(&temp_dir, "fr")).unwrap(),
        "Bonjour, le monde."
    );
    assert_eq!(
        std::fs::read_to_string(output_path(&temp_dir, "es")).unwrap(),
        "Hola, mundo."
    );
}

#[tokio::test]
async fn test_rejected_language_is_isolated() {
    let mock_server = MockServer::start().await;
    mount_translation(&mock_server, "FR", "Bonjour, le monde.").await;
    mount_rejection(&mock_server, "XX-INVALID").await;
    mount_translation(&mock_server, "DE", "Hallo, Welt.").await;

    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config = create_run_config(&temp_dir, "Hello, world.", "fr\nxx-invalid\nde\n");
    let service = build_service(&deepl_backend(&mock_server), Duration::from_secs(5)).unwrap();

    let outcomes = runner::run(&config, service.as_ref())
        .await
        .expect("Run should complete");

    let codes: Vec<&str> = outcomes.iter().map(|o| o.target_language().as_str()).collect();
    assert_eq!(codes, vec!["fr", "xx-invalid", "de"]);
    assert!(outcomes[0].is_success());
    assert!(outcomes[2].is_success());
    match &outcomes[1] {
        TranslationOutcome::Failure {
            stage,
            error_description,
            ..
        } => {
            assert_eq!(*stage, FailureStage::Translation);
            assert!(error_description.contains("400"));
        }
        other => panic!("Expected failure for xx-invalid, got {:?}", other),
    }
    assert_eq!(
        list_outputs(temp_dir.path()),
        vec!["output_de.txt", "output_fr.txt"]
    );
}

#[tokio::test]
async fn test_missing_source_text_attempts_no_jobs() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v2/translate"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config = create_run_config(&temp_dir, "Hello, world.", "fr\nes\n");
    std::fs::remove_file(&config.source_text_path).unwrap();
    let service = build_service(&deepl_backend(&mock_server), Duration::from_secs(5)).unwrap();

    let result = runner::run(&config, service.as_ref()).await;

    assert!(matches!(result, Err(RunError::InputUnreadable { .. })));
    assert!(list_outputs(temp_dir.path()).is_empty());
}

#[tokio::test]
async fn test_unreachable_service_fails_every_job_but_run_completes() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config = create_run_config(&temp_dir, "Hello, world.", "fr\nde\n");
    let backend = BackendConfig::DeepL {
        api_key: "test-deepl-key:fx".to_string(),
        // Port 9 (discard) is not expected to accept HTTP connections
        api_url: "http://127.0.0.1:9".to_string(),
    };
    let service = build_service(&backend, Duration::from_secs(2)).unwrap();

    let outcomes = runner::run(&config, service.as_ref())
        .await
        .expect("Run should complete");

    assert_eq!(outcomes.len(), 2);
    assert!(outcomes.iter().all(|o| !o.is_success()));
    assert!(list_outputs(temp_dir.path()).is_empty());
}

// ==================== Binary Tests ====================

/// Run the compiled binary with a clean environment rooted in `temp_dir`
async fn run_binary(temp_dir: &TempDir, envs: &[(&str, String)]) -> std::process::Output {
    let mut command = tokio::process::Command::new(env!("CARGO_BIN_EXE_batch-translate"));
    command
        .current_dir(temp_dir.path())
        .env_clear()
        .env("NO_COLOR", "1");
    for (key, value) in envs {
        command.env(key, value);
    }
    command.output().await.expect("Failed to run binary")
}

fn binary_env(temp_dir: &TempDir, mock_server: &MockServer) -> Vec<(&'static str, String)> {
    vec![
        ("TRANSLATION_BACKEND", "deepl".to_string()),
        ("DEEPL_API_KEY", "test-deepl-key:fx".to_string()),
        ("DEEPL_API_URL", mock_server.uri()),
        (
            "SOURCE_TEXT_FILE",
            temp_dir.path().join("input.txt").display().to_string(),
        ),
        (
            "LANGUAGE_LIST_FILE",
            temp_dir
                .path()
                .join("target_languages.txt")
                .display()
                .to_string(),
        ),
        (
            "OUTPUT_PATH_TEMPLATE",
            temp_dir.path().join("output_{code}.txt").display().to_string(),
        ),
    ]
}

#[tokio::test]
async fn test_binary_success_exits_zero() {
    let mock_server = MockServer::start().await;
    mount_translation(&mock_server, "FR", "Bonjour, le monde.").await;
    mount_translation(&mock_server, "ES", "Hola, mundo.").await;

    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    create_run_config(&temp_dir, "Hello, world.", "fr\nes\n");

    let output = run_binary(&temp_dir, &binary_env(&temp_dir, &mock_server)).await;

    assert!(output.status.success(), "{:?}", output);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Translated to fr"));
    assert!(stdout.contains("Translated to es"));
    assert!(!std::fs::read_to_string(output_path(&temp_dir, "fr"))
        .unwrap()
        .is_empty());
    assert!(!std::fs::read_to_string(output_path(&temp_dir, "es"))
        .unwrap()
        .is_empty());
}

#[tokio::test]
async fn test_binary_missing_source_exits_non_zero() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    std::fs::write(temp_dir.path().join("target_languages.txt"), "fr\nes\n").unwrap();

    let output = run_binary(&temp_dir, &binary_env(&temp_dir, &mock_server)).await;

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Failed to read input file"));
    assert!(list_outputs(temp_dir.path()).is_empty());
}

#[tokio::test]
async fn test_binary_partial_failure_exits_zero_and_writes_report() {
    let mock_server = MockServer::start().await;
    mount_translation(&mock_server, "FR", "Bonjour, le monde.").await;
    mount_rejection(&mock_server, "XX-INVALID").await;
    mount_translation(&mock_server, "DE", "Hallo, Welt.").await;

    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    create_run_config(&temp_dir, "Hello, world.", "fr\nxx-invalid\nde\n");
    let report_path = temp_dir.path().join("report.json");
    let mut envs = binary_env(&temp_dir, &mock_server);
    envs.push(("REPORT_FILE", report_path.display().to_string()));

    let output = run_binary(&temp_dir, &envs).await;

    assert!(output.status.success(), "{:?}", output);
    let stdout = String::from_utf8_lossy(&output.stdout);
    let fr = stdout.find("Translated to fr").expect("fr line");
    let xx = stdout
        .find("Translation to xx-invalid failed")
        .expect("xx-invalid line");
    let de = stdout.find("Translated to de").expect("de line");
    assert!(fr < xx && xx < de);
    assert_eq!(
        list_outputs(temp_dir.path()),
        vec!["output_de.txt", "output_fr.txt"]
    );

    let report: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&report_path).unwrap()).unwrap();
    assert_eq!(report["summary"]["total"], 3);
    assert_eq!(report["summary"]["failed"], 1);
    assert_eq!(report["outcomes"][1]["target_language"], "xx-invalid");
}

#[tokio::test]
async fn test_binary_missing_api_key_exits_non_zero() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");

    let output = run_binary(&temp_dir, &[("TRANSLATION_BACKEND", "deepl".to_string())]).await;

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("DEEPL_API_KEY"));
}
