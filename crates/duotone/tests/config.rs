//! Loading options from configuration files.

use std::fs;

use duotone::{process, Error, Nesting, Options, Strategy, Theme};
use tempfile::TempDir;

fn write(dir: &TempDir, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn yaml_file() {
    let dir = TempDir::new().unwrap();
    let path = write(
        &dir,
        "theme.yaml",
        r##"
inject-flags: true
colors:
  --G01: ["#eee", "#111"]
  --C02a: "#f00"
  --C02b: "#0f0"
  --G02: [--C02a, --C02b]
"##,
    );

    let options = Options::from_file(&path).unwrap();
    assert!(options.inject_flags);
    assert_eq!(options.colors.resolve(Theme::Dark, "--G02", "x"), "#0f0");

    let output = process("a { color: oklch(from var(--G02) l c h) }", &options).unwrap();
    assert!(output.css.starts_with("html {"));
    assert!(output.css.contains("--v749561967"));
}

#[test]
fn yml_and_json_files() {
    let dir = TempDir::new().unwrap();
    let yml = write(&dir, "dark.yml", "strategy: dark-rule\nnesting: flatten\n");
    let json = write(
        &dir,
        "dark.json",
        r##"{"strategy": "dark-rule", "nesting": "nested-rule", "colors": {"G01": ["#eee", "#111"]}}"##,
    );

    let options = Options::from_file(yml).unwrap();
    assert_eq!(options.strategy, Strategy::DarkRule);
    assert_eq!(options.nesting, Nesting::Flatten);

    let options = Options::from_file(json).unwrap();
    assert_eq!(options.nesting, Nesting::NestedRule);
    let output = process("a { color: cc(G01) }", &options).unwrap();
    assert_eq!(
        output.css,
        "a { color: #eee; html[data-theme=\"dark\"] & { color: #111 } }"
    );
}

#[test]
fn invalid_content_names_the_file() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "broken.yaml", "strategy: sideways\n");
    let err = Options::from_file(&path).unwrap_err();
    match &err {
        Error::Config { path: p, message } => {
            assert_eq!(p, &path);
            assert!(message.contains("sideways"), "{message}");
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(err.to_string().contains("broken.yaml"));
}

#[test]
fn missing_file_is_io_error() {
    let dir = TempDir::new().unwrap();
    let err = Options::from_file(dir.path().join("absent.json")).unwrap_err();
    assert!(matches!(err, Error::Io { .. }));
}

#[test]
fn unknown_extension() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "theme.toml", "colors = {}\n");
    assert!(matches!(
        Options::from_file(path),
        Err(Error::Config { .. })
    ));
}

#[test]
fn invalid_css_is_an_error() {
    let err = process("a { nonsense }", &Options::default()).unwrap_err();
    assert!(matches!(err, Error::Sheet(_)));
}
