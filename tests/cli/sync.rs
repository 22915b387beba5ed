use anyhow::Result;
use pretty_assertions::assert_eq;

use crate::{CliTest, stderr, stdout};

const CATALOG: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<!DOCTYPE TS>
<TS version="2.1" language="en_US">
<context>
    <name>PrintCenterDialog</name>
    <message>
        <location filename="../src/dialogs/printcenterdialog.cpp" line="42"/>
        <source>打印</source>
        <translation type="unfinished"></translation>
    </message>
    <message>
        <source>取消</source>
        <translation></translation>
    </message>
    <message>
        <source>关于</source>
        <translation>About</translation>
    </message>
</context>
</TS>
"#;

fn project(map: &str) -> Result<CliTest> {
    let test = CliTest::with_file("translations/en_US.ts", CATALOG)?;
    test.write_file("translations/en_us_map.tsv", map)?;
    Ok(test)
}

#[test]
fn test_sync_fills_translations_and_reports_unmapped() -> Result<()> {
    let test = project("# source\ttranslation\n打印\tPrint\n")?;

    let output = test.sync_command().output()?;
    assert_eq!(output.status.code(), Some(1), "stderr: {}", stderr(&output));
    assert_eq!(
        stdout(&output),
        "✓ ./translations/en_US.ts is updated; 1 mapped strings.\n\
         warning: 1 source strings missing from mapping:\n  取消\n"
    );

    let catalog = test.read_file("translations/en_US.ts")?;
    assert!(catalog.starts_with("<?xml version=\"1.0\" encoding=\"utf-8\"?>\n<!DOCTYPE TS>\n"));
    assert!(catalog.contains("<translation>Print</translation>"));
    assert!(catalog.contains("<translation type=\"unfinished\"></translation>"));
    assert!(catalog.contains("<translation>About</translation>"));
    assert!(catalog.contains("<location filename=\"../src/dialogs/printcenterdialog.cpp\" line=\"42\"/>"));

    Ok(())
}

#[test]
fn test_sync_complete_mapping_succeeds() -> Result<()> {
    let test = project("打印\tPrint\n取消\tCancel\n")?;

    let output = test.sync_command().output()?;
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(
        stdout(&output),
        "✓ ./translations/en_US.ts is updated; 2 mapped strings.\n"
    );

    let catalog = test.read_file("translations/en_US.ts")?;
    assert!(!catalog.contains("unfinished"));
    assert!(catalog.contains("<translation>Cancel</translation>"));

    Ok(())
}

#[test]
fn test_sync_second_run_is_up_to_date() -> Result<()> {
    let test = project("打印\tPrint\n取消\tCancel\n")?;

    test.sync_command().output()?;
    let first = test.read_file("translations/en_US.ts")?;

    let output = test.sync_command().output()?;
    assert!(output.status.success());
    assert!(stdout(&output).contains("is up to date; 2 mapped strings."));
    assert_eq!(test.read_file("translations/en_US.ts")?, first);

    Ok(())
}

#[test]
fn test_sync_unchanged_catalog_is_not_rewritten() -> Result<()> {
    let test = project("")?;
    let catalog = r#"<?xml version="1.0" encoding="utf-8"?>
<TS version="2.1">
<context><name>A</name><message><source>关于</source><translation>About</translation></message></context>
</TS>
"#;
    test.write_file("translations/en_US.ts", catalog)?;

    let output = test.sync_command().output()?;
    assert!(output.status.success());
    assert!(stdout(&output).contains("is up to date; 0 mapped strings."));
    assert_eq!(test.read_file("translations/en_US.ts")?, catalog);

    Ok(())
}

#[test]
fn test_sync_with_path_overrides() -> Result<()> {
    let test = CliTest::with_file("i18n/app_en.ts", CATALOG)?;
    test.write_file("i18n/map.tsv", "打印\tPrint\n取消\tCancel\n")?;

    let output = test
        .sync_command()
        .args(["--catalog", "i18n/app_en.ts", "--map", "i18n/map.tsv"])
        .output()?;
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains("i18n/app_en.ts is updated; 2 mapped strings."));

    Ok(())
}

#[test]
fn test_sync_paths_from_config() -> Result<()> {
    let test = CliTest::with_file("i18n/app_en.ts", CATALOG)?;
    test.write_file("i18n/map.tsv", "打印\tPrint\n")?;
    test.write_file(
        ".tssyncrc.json",
        r#"{ "mappingFile": "i18n/map.tsv", "catalogFile": "i18n/app_en.ts" }"#,
    )?;

    let output = test.sync_command().output()?;
    assert_eq!(output.status.code(), Some(1));
    assert!(stdout(&output).starts_with("✓ i18n/app_en.ts is updated; 1 mapped strings."));

    Ok(())
}

#[test]
fn test_sync_missing_mapping_is_fatal() -> Result<()> {
    let test = CliTest::with_file("translations/en_US.ts", CATALOG)?;

    let output = test.sync_command().output()?;
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("Error: Mapping file not found: ./translations/en_us_map.tsv"));
    assert_eq!(test.read_file("translations/en_US.ts")?, CATALOG);

    Ok(())
}

#[test]
fn test_sync_missing_catalog_is_fatal() -> Result<()> {
    let test = CliTest::with_file("translations/en_us_map.tsv", "打印\tPrint\n")?;

    let output = test.sync_command().output()?;
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("not found: ./translations/en_US.ts"));

    Ok(())
}

#[test]
fn test_sync_malformed_mapping_line_is_fatal() -> Result<()> {
    let test = project("打印\tPrint\n取消 Cancel\n")?;

    let output = test.sync_command().output()?;
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("Line 2"));
    assert_eq!(test.read_file("translations/en_US.ts")?, CATALOG);

    Ok(())
}

#[test]
fn test_sync_malformed_catalog_is_fatal() -> Result<()> {
    let test = project("打印\tPrint\n")?;
    test.write_file("translations/en_US.ts", "<TS><context></TS>")?;

    let output = test.sync_command().output()?;
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("Failed to parse catalog"));

    Ok(())
}
