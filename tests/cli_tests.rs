//! Integration tests for the `forge` binary.

use std::fs;
use std::path::Path;
use std::process::Command;

use assert_cmd::assert::OutputAssertExt;
use predicates::prelude::*;

/// `forge` with a clean environment, run inside `dir`.
fn forge(dir: &Path) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_forge"));
    cmd.current_dir(dir).env_clear();
    cmd
}

fn write_letter(dir: &Path) {
    fs::write(
        dir.join("cover_letter.md"),
        "# Cover Letter\n\nDear {{HIRING_MANAGER_NAME}},\n\n{{NAME}}\n{{PHONE}}\n",
    )
    .unwrap();
}

#[test]
fn help_lists_flags() {
    let dir = tempfile::tempdir().unwrap();
    forge(dir.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage:"))
        .stdout(predicate::str::contains("--no-pdf"))
        .stdout(predicate::str::contains("--chrome-path"));
}

#[test]
fn no_pdf_writes_html_from_environment() {
    let dir = tempfile::tempdir().unwrap();
    write_letter(dir.path());

    forge(dir.path())
        .arg("--no-pdf")
        .env("NAME", "Alex")
        .env("HIRING_MANAGER_NAME", "Sam")
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    let html = fs::read_to_string(dir.path().join("cover_letter.html")).unwrap();
    assert!(html.contains("<title>Cover Letter</title>"));
    assert!(html.contains("Dear Sam,"));
    assert!(html.contains("Alex"));
    assert!(!html.contains("{{PHONE}}"));
    assert!(!dir.path().join("cover_letter.pdf").exists());
}

#[test]
fn dotenv_fills_missing_values_but_environment_wins() {
    let dir = tempfile::tempdir().unwrap();
    write_letter(dir.path());
    fs::write(dir.path().join(".env"), "NAME=FromDotenv\nHIRING_MANAGER_NAME=Dana\n").unwrap();

    forge(dir.path())
        .args(["--no-pdf", "cover_letter.md"])
        .env("NAME", "FromEnv")
        .assert()
        .success();

    let html = fs::read_to_string(dir.path().join("cover_letter.html")).unwrap();
    assert!(html.contains("Dear Dana,"));
    assert!(html.contains("FromEnv"));
    assert!(!html.contains("FromDotenv"));
}

#[test]
fn stylesheet_next_to_input_is_inlined() {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir(dir.path().join("letters")).unwrap();
    fs::write(dir.path().join("letters/acme.md"), "# Acme\n").unwrap();
    fs::write(dir.path().join("letters/acme.css"), "h1 { color: teal; }").unwrap();

    forge(dir.path())
        .args(["letters/acme.md", "--no-pdf"])
        .assert()
        .success();

    let html = fs::read_to_string(dir.path().join("letters/acme.html")).unwrap();
    assert!(html.contains("h1 { color: teal; }"));
    assert!(html.contains("<title>Acme</title>"));
}

#[test]
fn missing_input_fails() {
    let dir = tempfile::tempdir().unwrap();

    forge(dir.path())
        .arg("--no-pdf")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Error:"))
        .stderr(predicate::str::contains("cover_letter.md"));
}

#[test]
fn missing_browser_fails_with_message() {
    let dir = tempfile::tempdir().unwrap();
    let empty_path = tempfile::tempdir().unwrap();
    write_letter(dir.path());

    forge(dir.path())
        .env("PATH", empty_path.path())
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Chrome path could not be found"));

    // HTML is written before the export step
    assert!(dir.path().join("cover_letter.html").exists());
}

#[test]
fn unlaunchable_browser_fails() {
    let dir = tempfile::tempdir().unwrap();
    write_letter(dir.path());

    forge(dir.path())
        .arg("--chrome-path")
        .arg(dir.path().join("no-such-browser"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to launch"));
}

#[cfg(unix)]
mod fake_browser {
    use std::os::unix::fs::PermissionsExt;

    use super::*;

    /// Shell script that mimics `--print-to-pdf=` and records its arguments.
    fn install(dir: &Path, exit_code: i32) -> std::path::PathBuf {
        let script = dir.join("fake-chrome");
        let args_file = dir.join("args.txt");
        let body = format!(
            "#!/bin/sh\n\
             printf '%s\\n' \"$@\" > '{}'\n\
             for a in \"$@\"; do\n\
             case \"$a\" in\n\
             --print-to-pdf=*) printf '%%PDF-1.4\\n' > \"${{a#--print-to-pdf=}}\" ;;\n\
             esac\n\
             done\n\
             exit {exit_code}\n",
            args_file.display()
        );
        fs::write(&script, body).unwrap();
        fs::set_permissions(&script, fs::Permissions::from_mode(0o755)).unwrap();
        script
    }

    #[test]
    fn prints_pdf_through_browser() {
        let dir = tempfile::tempdir().unwrap();
        let bin = tempfile::tempdir().unwrap();
        write_letter(dir.path());
        let browser = install(bin.path(), 0);

        forge(dir.path())
            .arg("--chrome-path")
            .arg(&browser)
            .env("NAME", "Alex")
            .assert()
            .success()
            .stdout(predicate::str::contains("PDF saved as:"))
            .stdout(predicate::str::contains("cover_letter.pdf"));

        let pdf = fs::read(dir.path().join("cover_letter.pdf")).unwrap();
        assert!(pdf.starts_with(b"%PDF-"));

        let args = fs::read_to_string(bin.path().join("args.txt")).unwrap();
        let args: Vec<&str> = args.lines().collect();
        assert_eq!(
            &args[..5],
            [
                "--no-sandbox",
                "--headless",
                "--print-to-pdf-no-header",
                "--no-pdf-header-footer",
                "--disable-gpu",
            ]
        );
        let profile = args[5].strip_prefix("--user-data-dir=").unwrap();
        assert!(!Path::new(profile).exists(), "profile dir left behind");
        assert!(args[7].starts_with("data:text/html;base64,"));
    }

    #[test]
    fn name_from_fields_renames_pdf() {
        let dir = tempfile::tempdir().unwrap();
        let bin = tempfile::tempdir().unwrap();
        write_letter(dir.path());
        let browser = install(bin.path(), 0);

        forge(dir.path())
            .arg("--name-from-fields")
            .arg("--chrome-path")
            .arg(&browser)
            .env("NAME", "Alex Doe")
            .env("APPLYING_COMPANY", "Acme")
            .env("JOB_TITLE", "Engineer")
            .assert()
            .success();

        assert!(dir.path().join("Alex_Doe-Acme-Engineer.pdf").exists());
    }

    #[test]
    fn browser_failure_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let bin = tempfile::tempdir().unwrap();
        write_letter(dir.path());
        let browser = install(bin.path(), 3);

        forge(dir.path())
            .arg("--chrome-path")
            .arg(&browser)
            .assert()
            .failure()
            .code(1)
            .stderr(predicate::str::contains("exited with"));

        let args = fs::read_to_string(bin.path().join("args.txt")).unwrap();
        let profile_arg = args
            .lines()
            .find_map(|l| l.strip_prefix("--user-data-dir="))
            .unwrap();
        assert!(!Path::new(profile_arg).exists());
    }
}
