use anyhow::Result;
use insta::assert_snapshot;
use pretty_assertions::assert_eq;

use crate::{CliTest, stderr, stdout};

fn project() -> Result<CliTest> {
    let test = CliTest::with_file(
        "src/dialogs/print.cpp",
        r#"
        tr("打印");
        tr("Print");
        tr("取消");
        tr("打印");
        "#,
    )?;
    test.write_file("src/panels/props.cpp", r#"qsTr("打印预览"); tr("取消");"#)?;
    Ok(test)
}

#[test]
fn test_extract_counts_aligned() -> Result<()> {
    let test = project()?;

    let output = test.extract_command().output()?;
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_snapshot!(stdout(&output), @r"
    取消      2
    打印      2
    打印预览  1
    ");

    Ok(())
}

#[test]
fn test_extract_all_includes_plain_ascii() -> Result<()> {
    let test = project()?;

    let output = test.extract_command().arg("--all").output()?;
    assert!(output.status.success());
    assert!(stdout(&output).starts_with("Print     1\n"));

    Ok(())
}

#[test]
fn test_extract_by_file() -> Result<()> {
    let test = project()?;

    let output = test.extract_command().arg("--by-file").output()?;
    assert!(output.status.success());
    assert_eq!(
        stdout(&output),
        "[dialogs/print.cpp]\n打印\n取消\n\n[panels/props.cpp]\n打印预览\n取消\n\n"
    );

    Ok(())
}

#[test]
fn test_extract_empty_tree() -> Result<()> {
    let test = CliTest::with_file("src/main.cpp", "int main() { return 0; }")?;

    let output = test.extract_command().output()?;
    assert!(output.status.success());
    assert_eq!(stdout(&output), "No strings found.\n");

    Ok(())
}
