use std::process::Command;

use anyhow::Result;

use crate::{CliTest, stderr, stdout};

const THEME_STYLESHEET: &str = "/*\nTheme Name: Foo\nAuthor: Jane\nText Domain: foo\nLicense: GPLv2 or later\n*/\n";

#[test]
fn theme_project_end_to_end() -> Result<()> {
    let test = CliTest::with_file("style.css", THEME_STYLESHEET)?;
    test.write_file("functions.php", "<?php\n__( 'Hello World', 'foo' );\n")?;

    let output = test.run(&["--slug=demo"])?;
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains("Success:"));

    let pot = test.read_file("demo.pot")?;
    assert!(pot.contains("# Copyright (C)"));
    assert!(pot.contains("Jane"));
    assert!(pot.contains("distributed under the GPLv2 or later."));
    assert!(pot.contains("\"Project-Id-Version: Foo\\n\""));
    assert!(
        pot.contains("\"Report-Msgid-Bugs-To: https://wordpress.org/support/theme/demo\\n\"")
    );
    assert!(pot.contains("\"X-Domain: foo\\n\""));
    assert!(pot.contains("#. Theme Name of the theme"));
    assert!(pot.contains("msgid \"Hello World\""));
    assert!(pot.contains("#: functions.php:2"));
    Ok(())
}

#[test]
fn plugin_project_end_to_end() -> Result<()> {
    let test = CliTest::with_file(
        "bar.php",
        concat!(
            "<?php\n",
            "/*\n",
            "Plugin Name: Bar\n",
            "Description: A plugin.\n",
            "Text Domain: bar\n",
            "*/\n",
            "_x( 'Post', 'noun', 'bar' );\n",
        ),
    )?;

    let output = test.run(&["--slug=bar"])?;
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let pot = test.read_file("bar.pot")?;
    assert!(
        pot.contains("\"Report-Msgid-Bugs-To: https://wordpress.org/support/plugins/bar\\n\"")
    );
    assert!(pot.contains("#. Plugin Name of the plugin"));
    assert!(pot.contains("#. Description of the plugin"));
    assert!(pot.contains("msgctxt \"noun\""));
    assert!(pot.contains("msgid \"Post\""));
    // The template never carries a Language header.
    assert!(!pot.contains("\"Language:"));
    Ok(())
}

#[test]
fn generic_project_has_no_support_header() -> Result<()> {
    let test = CliTest::with_file("app.js", "__( 'Only me', 'whatever' );\n")?;

    let output = test.run(&["--slug=demo", "--ignore-domain", "--package-name=My Tool"])?;
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let pot = test.read_file("demo.pot")?;
    assert!(!pot.contains("Report-Msgid-Bugs-To"));
    assert!(pot.contains("\"Project-Id-Version: My Tool\\n\""));
    assert!(pot.contains("under the same license as the My Tool package."));
    assert!(pot.contains("msgid \"Only me\""));
    assert!(!pot.contains("X-Domain"));
    Ok(())
}

#[test]
fn invalid_source_directory_fails() -> Result<()> {
    let output = Command::new(env!("CARGO_BIN_EXE_makepot"))
        .arg("/definitely/not/a/real/path")
        .output()?;
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("Error:"));
    Ok(())
}

#[test]
fn missing_merge_path_warns_but_succeeds() -> Result<()> {
    let test = CliTest::with_file("main.php", "<?php __( 'Text' );\n")?;

    let output = test.run(&["--slug=demo", "--ignore-domain", "--merge=absent.pot"])?;
    assert!(output.status.success());
    assert!(stderr(&output).contains("warning:"));
    assert!(stderr(&output).contains("absent.pot"));

    let pot = test.read_file("demo.pot")?;
    assert!(pot.contains("msgid \"Text\""));
    Ok(())
}

#[test]
fn merge_carries_old_comments_forward() -> Result<()> {
    let test = CliTest::with_file("main.php", "<?php __( 'Kept' );\n")?;

    let first = test.run(&["--slug=demo", "--ignore-domain"])?;
    assert!(first.status.success());

    let second = test.run(&["--slug=demo", "--ignore-domain", "--merge"])?;
    assert!(second.status.success(), "stderr: {}", stderr(&second));
    assert!(stdout(&second).contains("1 entry"));

    let pot = test.read_file("demo.pot")?;
    assert!(pot.contains("msgid \"Kept\""));
    Ok(())
}

#[test]
fn exclude_flag_skips_fragments() -> Result<()> {
    let test = CliTest::with_file("main.php", "<?php __( 'Kept' );\n")?;
    test.write_file("tests/fixture.php", "<?php __( 'Dropped' );\n")?;
    test.write_file("node_modules/dep.php", "<?php __( 'Also dropped' );\n")?;

    let output = test.run(&["--slug=demo", "--ignore-domain", "--exclude=tests"])?;
    assert!(output.status.success());

    let pot = test.read_file("demo.pot")?;
    assert!(pot.contains("msgid \"Kept\""));
    assert!(!pot.contains("Dropped"));
    Ok(())
}

#[test]
fn include_flag_limits_the_scan() -> Result<()> {
    let test = CliTest::with_file("src/app.php", "<?php __( 'In' );\n")?;
    test.write_file("other/out.php", "<?php __( 'Out' );\n")?;

    let output = test.run(&["--slug=demo", "--ignore-domain", "--include=src"])?;
    assert!(output.status.success());

    let pot = test.read_file("demo.pot")?;
    assert!(pot.contains("msgid \"In\""));
    assert!(!pot.contains("msgid \"Out\""));
    Ok(())
}

#[test]
fn header_overrides_apply_last() -> Result<()> {
    let test = CliTest::with_file("main.php", "<?php __( 'Text' );\n")?;

    let output = test.run(&[
        "--slug=demo",
        "--ignore-domain",
        r#"--headers={"Report-Msgid-Bugs-To":"https://example.com/issues"}"#,
    ])?;
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let pot = test.read_file("demo.pot")?;
    assert!(pot.contains("\"Report-Msgid-Bugs-To: https://example.com/issues\\n\""));
    Ok(())
}

#[test]
fn skip_js_flag() -> Result<()> {
    let test = CliTest::with_file("main.php", "<?php __( 'PHP' );\n")?;
    test.write_file("app.js", "__( 'JS' );\n")?;

    let output = test.run(&["--slug=demo", "--ignore-domain", "--skip-js"])?;
    assert!(output.status.success());

    let pot = test.read_file("demo.pot")?;
    assert!(pot.contains("msgid \"PHP\""));
    assert!(!pot.contains("msgid \"JS\""));
    Ok(())
}

#[test]
fn explicit_destination_argument() -> Result<()> {
    let test = CliTest::with_file("main.php", "<?php __( 'Text' );\n")?;
    let destination = test.project_dir().join("out").join("custom.pot");

    let output = Command::new(env!("CARGO_BIN_EXE_makepot"))
        .arg(test.project_dir())
        .arg(&destination)
        .args(["--slug=demo", "--ignore-domain"])
        .output()?;
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let pot = test.read_file("out/custom.pot")?;
    assert!(pot.contains("msgid \"Text\""));
    Ok(())
}

#[test]
fn conflicting_translator_comments_warn() -> Result<()> {
    let test = CliTest::with_file(
        "main.php",
        concat!(
            "<?php\n",
            "// translators: first meaning.\n",
            "__( 'Twice' );\n",
            "// translators: second meaning.\n",
            "__( 'Twice' );\n",
        ),
    )?;

    let output = test.run(&["--slug=demo", "--ignore-domain"])?;
    assert!(output.status.success());
    assert!(stderr(&output).contains("different translator comments"));
    Ok(())
}
