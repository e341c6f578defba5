use std::fs;

use tempfile::tempdir;

use specup_cli::{Args, Command, run};

const SAMPLE_SPEC: &str = "\
# Example Specification

## Terminology

A [[def: widget, Widget]] does things for a [[ref: operator]].

An [[def: operator]] drives widgets.
";

fn write_config(dir: &std::path::Path, output_dir: &std::path::Path) -> String {
    let config_path = dir.join("specup.toml");
    fs::write(
        &config_path,
        format!(
            r#"
            [site]
            title = "Example Specification"

            [output]
            dir = {:?}
            "#,
            output_dir.to_string_lossy()
        ),
    )
    .expect("Failed to write config");
    config_path.to_string_lossy().to_string()
}

#[test]
fn e2e_build_writes_page_and_assets() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let source_path = temp_dir.path().join("spec.md");
    fs::write(&source_path, SAMPLE_SPEC).expect("Failed to write spec");
    let output_dir = temp_dir.path().join("out");
    let config = write_config(temp_dir.path(), &output_dir);

    let args = Args {
        command: Command::Build {
            input: source_path.to_string_lossy().to_string(),
            config: Some(config),
            highlight: None,
        },
        log_level: "off".to_string(),
    };

    run(&args).expect("Build should succeed");

    let page = fs::read_to_string(output_dir.join("index.html")).expect("Missing index.html");
    assert!(page.contains("Example Specification"));
    assert!(page.contains("id=\"term:widget\""));
    assert!(output_dir.join("assets/main.css").is_file());
}

#[test]
fn e2e_build_rejects_malformed_directives() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let source_path = temp_dir.path().join("spec.md");
    fs::write(&source_path, "# Bad\n\nAn [[def:]] without a term.\n").unwrap();
    let output_dir = temp_dir.path().join("out");
    let config = write_config(temp_dir.path(), &output_dir);

    let args = Args {
        command: Command::Build {
            input: source_path.to_string_lossy().to_string(),
            config: Some(config),
            highlight: None,
        },
        log_level: "off".to_string(),
    };

    assert!(run(&args).is_err(), "Malformed directive should fail build");
}

#[test]
fn e2e_build_then_freeze() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let source_path = temp_dir.path().join("spec.md");
    fs::write(&source_path, SAMPLE_SPEC).unwrap();
    let output_dir = temp_dir.path().join("out");
    let config = write_config(temp_dir.path(), &output_dir);

    let build = Args {
        command: Command::Build {
            input: source_path.to_string_lossy().to_string(),
            config: Some(config.clone()),
            highlight: None,
        },
        log_level: "off".to_string(),
    };
    run(&build).expect("Build should succeed");

    let freeze = Args {
        command: Command::Freeze {
            dir: None,
            config: Some(config),
        },
        log_level: "off".to_string(),
    };
    run(&freeze).expect("Freeze should succeed");

    assert!(output_dir.join("v1/index.html").is_file());
    assert!(output_dir.join("versions.html").is_file());
}

#[test]
fn e2e_freeze_without_build_fails() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let output_dir = temp_dir.path().join("out");
    fs::create_dir_all(&output_dir).unwrap();
    let config = write_config(temp_dir.path(), &output_dir);

    let args = Args {
        command: Command::Freeze {
            dir: None,
            config: Some(config),
        },
        log_level: "off".to_string(),
    };

    assert!(run(&args).is_err(), "Freeze needs an existing index.html");
}

#[test]
fn e2e_missing_input_fails() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let output_dir = temp_dir.path().join("out");
    let config = write_config(temp_dir.path(), &output_dir);

    let args = Args {
        command: Command::Build {
            input: temp_dir
                .path()
                .join("missing.md")
                .to_string_lossy()
                .to_string(),
            config: Some(config),
            highlight: None,
        },
        log_level: "off".to_string(),
    };

    assert!(run(&args).is_err(), "Missing input should fail");
}
