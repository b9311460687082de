use std::path::PathBuf;

fn demo(name: &str) -> String {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("demos")
        .join(name)
        .display()
        .to_string()
}

fn run(tokens: &[&str]) -> anyhow::Result<()> {
    let args = std::iter::once("sqlchain")
        .chain(tokens.iter().copied())
        .map(str::to_string)
        .collect();
    sqlchain_cli::run(args)
}

#[test]
fn comparison_demo_passes_every_command() {
    let file = demo("comparison.toml");
    run(&["check", &file]).unwrap();
    run(&["compile", &file]).unwrap();
    run(&["compile", "--json", &file]).unwrap();
    run(&["show", &file]).unwrap();
}

#[test]
fn dangling_demo_fails_check_but_still_compiles() {
    let file = demo("dangling.toml");
    let err = run(&["check", &file]).unwrap_err();
    assert_eq!(err.to_string(), "chain check failed");

    run(&["compile", &file]).unwrap();
    run(&["show", &file]).unwrap();
}

#[test]
fn missing_file_is_reported_with_its_path() {
    let file = demo("does-not-exist.toml");
    let err = run(&["compile", &file]).unwrap_err();
    let message = format!("{err:#}");
    assert!(message.starts_with("failed to read chain file"));
    assert!(message.contains("does-not-exist.toml"));
}
