use anyhow::Result;
use pretty_assertions::assert_eq;

use crate::{CliTest, stderr, stdout};

#[test]
fn test_missing_groups_texts_by_file() -> Result<()> {
    let test = CliTest::with_file(
        "src/dialogs/printcenterdialog.cpp",
        r#"
        setWindowTitle(tr("打印中心"));
        m_cancel->setText(tr("取消"));
        m_ok->setText(tr("确定"));
        "#,
    )?;
    test.write_file(
        "src/panels/labelpropswidget.cpp",
        r#"m_reset->setText(tr("取消")); m_label->setText(tr("Width"));"#,
    )?;
    test.write_file("translations/en_us_map.tsv", "确定\tOK\n")?;

    let output = test.missing_command().output()?;
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(
        stdout(&output),
        "取消\n  - dialogs/printcenterdialog.cpp\n  - panels/labelpropswidget.cpp\n\n\
         打印中心\n  - dialogs/printcenterdialog.cpp\n\n"
    );

    Ok(())
}

#[test]
fn test_missing_nothing_missing() -> Result<()> {
    let test = CliTest::with_file("src/main.cpp", r#"tr("你好"); tr("Hello");"#)?;
    test.write_file("translations/en_us_map.tsv", "你好\tHello\n")?;

    let output = test.missing_command().output()?;
    assert!(output.status.success());
    assert_eq!(stdout(&output), "✓ No missing translations found.\n");

    Ok(())
}

#[test]
fn test_missing_joins_adjacent_literals_and_decodes_escapes() -> Result<()> {
    let test = CliTest::with_file(
        "src/main.cpp",
        "label->setText(tr(\"第一行\\n\"\n    \"第二行\"));\n",
    )?;
    test.write_file("translations/en_us_map.tsv", "第一行\\n第二行\tLine one\\nLine two\n")?;

    let output = test.missing_command().output()?;
    assert!(output.status.success());
    assert_eq!(stdout(&output), "✓ No missing translations found.\n");

    Ok(())
}

#[test]
fn test_missing_respects_source_root_override() -> Result<()> {
    let test = CliTest::with_file("app/widgets/main.cpp", r#"tr("保存");"#)?;
    test.write_file("translations/en_us_map.tsv", "")?;

    let output = test
        .missing_command()
        .args(["--source-root", "app"])
        .output()?;
    assert!(output.status.success());
    assert_eq!(stdout(&output), "保存\n  - widgets/main.cpp\n\n");

    Ok(())
}

#[test]
fn test_missing_honors_config_ignores_and_extensions() -> Result<()> {
    let test = CliTest::with_file("src/ui/main.cpp", r#"tr("保存");"#)?;
    test.write_file("src/generated/moc_main.cpp", r#"tr("生成");"#)?;
    test.write_file("src/ui/main.py", r#"tr("脚本")"#)?;
    test.write_file("translations/en_us_map.tsv", "")?;
    test.write_file(
        ".tssyncrc.json",
        r#"{ "ignores": ["generated"], "extensions": ["cpp"] }"#,
    )?;

    let output = test.missing_command().output()?;
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(stdout(&output), "保存\n  - ui/main.cpp\n\n");

    Ok(())
}

#[test]
fn test_missing_source_root_not_found() -> Result<()> {
    let test = CliTest::with_file("translations/en_us_map.tsv", "")?;

    let output = test.missing_command().output()?;
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("Source root not found: ./src"));

    Ok(())
}
