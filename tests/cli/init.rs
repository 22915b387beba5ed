use anyhow::{Context, Result};
use insta_cmd::assert_cmd_snapshot;
use serde_json::Value;

use crate::CliTest;

/// Validates config file structure and default values.
fn assert_config_content(content: &str) -> Result<()> {
    let parsed: Value = serde_json::from_str(content).context("Config should be valid JSON")?;

    for field in ["sourceRoot", "markers", "mappingFile", "catalogFile"] {
        assert!(
            parsed.get(field).is_some(),
            "Config should have '{}' field",
            field
        );
    }
    assert_eq!(parsed["markers"][0], "tr");

    assert!(
        content.contains("  "),
        "Config should use 2-space indentation"
    );

    Ok(())
}

#[test]
fn test_init_creates_config() -> Result<()> {
    let test = CliTest::new()?;

    assert_cmd_snapshot!(test.command().arg("init"), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    ✓ Created .tssyncrc.json

    ----- stderr -----
    ");

    assert!(test.root().join(".tssyncrc.json").exists());
    let content = test.read_file(".tssyncrc.json")?;
    assert_config_content(&content)?;

    Ok(())
}

#[test]
fn test_init_fails_if_exists() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(".tssyncrc.json", "{}")?;

    let output = test.command().arg("init").output()?;
    assert_eq!(output.status.code(), Some(1));
    assert!(crate::stderr(&output).contains("Error: .tssyncrc.json already exists"));
    assert_eq!(test.read_file(".tssyncrc.json")?, "{}");

    Ok(())
}

#[test]
fn test_init_config_is_immediately_usable() -> Result<()> {
    let test = CliTest::new()?;

    test.command().arg("init").output()?;
    test.write_file("src/main.cpp", r#"auto s = tr("你好");"#)?;
    test.write_file("translations/en_us_map.tsv", "你好\tHello\n")?;

    let output = test.missing_command().output()?;
    assert!(
        output.status.success(),
        "Missing command should work with initialized config. stderr: {}",
        crate::stderr(&output)
    );
    assert!(crate::stdout(&output).contains("No missing translations found."));

    Ok(())
}
