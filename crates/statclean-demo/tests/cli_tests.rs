use pretty_assertions::assert_eq;
use statclean_demo::cli::{check_file_line, command, fixture_output, run};

async fn run_args(args: &[&str]) -> anyhow::Result<String> {
    let matches = command().try_get_matches_from(args)?;
    run(&matches).await
}

#[tokio::test]
async fn test_check_file_accepts_spreadsheet() {
    let out = run_args(&["statclean", "check-file", "Survey.CSV"]).await.unwrap();
    assert_eq!(out, "Survey.CSV: accepted as .csv");
    assert_eq!(check_file_line("wave2.xlsx").unwrap(), "wave2.xlsx: accepted as .xlsx");
    assert_eq!(check_file_line("old.xls").unwrap(), "old.xls: accepted as .xls");
}

#[tokio::test]
async fn test_check_file_rejects_other_extensions() {
    let err = run_args(&["statclean", "check-file", "notes.txt"]).await.unwrap_err();
    assert_eq!(err.to_string(), "notes.txt cannot be uploaded");
    assert!(format!("{err:#}").contains("unsupported"));
}

#[test]
fn test_check_file_requires_a_name() {
    assert!(command().try_get_matches_from(["statclean", "check-file"]).is_err());
    assert!(command().try_get_matches_from(["statclean"]).is_err());
}

#[tokio::test]
async fn test_fixture_rows_limit_preview() {
    let out = run_args(&["statclean", "fixture", "--rows", "2"]).await.unwrap();
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines.len(), 4);
    assert_eq!(
        lines[0],
        "sample_survey_data.csv: 15 records, 8 fields, 2 missing values"
    );
    assert!(lines[1].starts_with("id, age, region"));
    assert!(lines[2].contains("\"occupation\":\"Teacher\""));
}

#[tokio::test]
async fn test_fixture_rows_are_clamped_to_survey() {
    let out = run_args(&["statclean", "fixture", "--rows", "100", "--json"]).await.unwrap();
    let json: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(json["records"], 15);
    assert_eq!(json["preview"].as_array().unwrap().len(), 15);

    assert_eq!(fixture_output(0, false).unwrap().lines().count(), 2);
}

#[tokio::test]
async fn test_fixture_default_preview() {
    let out = run_args(&["statclean", "fixture", "--json"]).await.unwrap();
    let json: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(json["preview"].as_array().unwrap().len(), 5);
}

#[tokio::test]
async fn test_demo_json_walks_to_report() {
    let out = run_args(&["statclean", "demo", "--fast", "--json"]).await.unwrap();
    let json: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(json["report"]["summary"]["current_step"], 6);
    assert_eq!(json["report"]["summary"]["entries"], 16);
    assert_eq!(json["activity_log"].as_array().unwrap().len(), 16);
}

#[tokio::test]
async fn test_demo_text_lists_task_messages() {
    let out = run_args(&["statclean", "--fast", "demo"]).await.unwrap();
    assert!(out.contains("imputation"));
    assert!(out
        .lines()
        .last()
        .unwrap()
        .starts_with("Completed at step 6 (Report) with 16 log entries"));
}

#[tokio::test]
async fn test_summary_reports_all_features() {
    let out = run_args(&["statclean", "summary", "--json"]).await.unwrap();
    let json: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(json["current_step"], 6);
    assert_eq!(json["features"]["cleaning"], true);
    assert_eq!(json["features"]["report_generation"], true);

    let text = run_args(&["statclean", "summary"]).await.unwrap();
    assert!(text.starts_with("step:               6 (Report)"));
}

#[tokio::test]
async fn test_missing_config_file_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("none.toml");
    let err = run_args(&["statclean", "demo", "--config", path.to_str().unwrap()])
        .await
        .unwrap_err();
    assert!(err.to_string().starts_with("loading config from"));
}
