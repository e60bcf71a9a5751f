use std::io::Write;
use std::path::Path;
use std::time::Duration;

use tempfile::{NamedTempFile, TempDir};

use ism_assess::catalog::load_catalog;
use ism_assess::cli::context::load_context;
use ism_assess::config::{parse_config, Overrides, Settings};
use ism_assess::errors::AssessError;

fn write_file(dir: &TempDir, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, content).unwrap();
    path
}

const RAW_CATALOG: &str = r#"{
    "Access Control": [
        {"ControlID": "ISM-9", "Description": "first copy"},
        {"ControlID": "ISM-10"},
        {"ControlID": "ISM-9", "Description": "second copy"}
    ],
    "Email": [
        {"ControlID": "ISM-0264", "Section": "Email gateways", "BlueprintArea": "Email"},
        {"ControlID": "ISM-9"}
    ]
}"#;

#[tokio::test]
async fn test_load_catalog_from_disk_normalizes() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "catalog.json", RAW_CATALOG);

    let catalog = load_catalog(&path).await.unwrap();
    assert_eq!(catalog.categories(), vec!["Access Control", "Email"]);

    let access: Vec<&str> = catalog.controls("Access Control").unwrap()
        .iter()
        .map(|c| c.control_id.as_str())
        .collect();
    assert_eq!(access, vec!["ISM-10", "ISM-9"]);
    assert_eq!(catalog.controls("Access Control").unwrap()[1].description, "first copy");

    // ISM-9 stays a member of both categories
    assert_eq!(catalog.categories_of("ISM-9"), vec!["Access Control", "Email"]);
    assert_eq!(catalog.find("ISM-0264").unwrap().blueprint_area, "Email");
}

#[tokio::test]
async fn test_missing_catalog_is_fatal() {
    let err = load_catalog(Path::new("/nonexistent/catalog.json")).await.unwrap_err();
    assert!(matches!(err, AssessError::CatalogLoad(_)));
    assert!(err.is_fatal());
}

#[tokio::test]
async fn test_catalog_without_control_ids_is_rejected() {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(br#"{"Email": [{"Description": "no id"}]}"#).unwrap();

    let err = load_catalog(file.path()).await.unwrap_err();
    match err {
        AssessError::CatalogLoad(msg) => assert!(msg.contains("schema"), "{}", msg),
        other => panic!("expected catalog error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_catalog_that_is_not_json_is_rejected() {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(b"ControlID,Description\nISM-1,csv is not supported\n").unwrap();

    let err = load_catalog(file.path()).await.unwrap_err();
    assert!(matches!(err, AssessError::CatalogLoad(_)));
}

#[tokio::test]
async fn test_config_file_drives_settings() {
    std::env::set_var("ISM_ASSESS_TEST_EVALUATOR_TOKEN", "from-env");
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "ism.yaml", r#"
catalog:
  path: controls.json
evaluator:
  base_url: https://eval.example.com/ism/
  timeout_secs: 30
  max_retries: 2
  api_token: $ISM_ASSESS_TEST_EVALUATOR_TOKEN
session:
  clear_selection_on_failure: true
server:
  port: 9090
"#);

    let config = parse_config(&path).await.unwrap();
    let settings = Settings::resolve(&config, &Overrides::default()).unwrap();
    assert_eq!(settings.catalog_path, Path::new("controls.json"));
    assert_eq!(settings.evaluator_url.as_str(), "https://eval.example.com/ism/");
    assert_eq!(settings.timeout, Duration::from_secs(30));
    assert_eq!(settings.retry.max_retries, 2);
    assert_eq!(settings.evaluator_token.as_deref(), Some("from-env"));
    assert!(settings.policy.clear_selection_on_failure);
    assert_eq!(settings.server_port, 9090);

    let report = settings.report_resolver().locate("out.docx").unwrap();
    assert_eq!(report.url, "https://eval.example.com/ism/download-report?filename=out.docx");
}

#[tokio::test]
async fn test_unknown_config_keys_are_rejected() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "ism.yaml", "evaluator:\n  base_uri: http://typo\n");

    let err = parse_config(&path).await.unwrap_err();
    assert!(matches!(err, AssessError::Config(_)));
    assert!(err.is_fatal());
}

#[tokio::test]
async fn test_missing_config_file_is_config_error() {
    let err = parse_config(Path::new("/nonexistent/ism.yaml")).await.unwrap_err();
    assert!(matches!(err, AssessError::Config(_)));
}

#[tokio::test]
async fn test_context_prefers_command_line_catalog() {
    let dir = TempDir::new().unwrap();
    let from_file = write_file(&dir, "a.json", r#"{"A": [{"ControlID": "ISM-1"}]}"#);
    let from_flag = write_file(&dir, "b.json", r#"{"B": [{"ControlID": "ISM-2"}]}"#);
    let config = write_file(
        &dir,
        "ism.yaml",
        &format!("catalog:\n  path: {}\n", from_file.display()),
    );

    let overrides = Overrides {
        catalog: Some(from_flag.display().to_string()),
        ..Default::default()
    };
    let ctx = load_context(config.to_str(), &overrides).await.unwrap();
    assert_eq!(ctx.catalog.categories(), vec!["B"]);

    let ctx = load_context(config.to_str(), &Overrides::default()).await.unwrap();
    assert_eq!(ctx.catalog.categories(), vec!["A"]);
}

#[tokio::test]
async fn test_invalid_evaluator_override_is_config_error() {
    let overrides = Overrides {
        evaluator_url: Some("localhost:8000".into()),
        ..Default::default()
    };
    let err = load_context(None, &overrides).await.unwrap_err();
    assert!(matches!(err, AssessError::Config(_)), "got {:?}", err);
}
