use indexmap::IndexMap;
use jstyle::cli::CliHandler;
use jstyle::core::models::*;
use tempfile::tempdir;

fn rule(selector: &str, declarations: &[(&str, &str)]) -> Rule {
    Rule {
        selectors: vec![selector.to_string()],
        declarations: declarations
            .iter()
            .map(|(n, v)| (n.to_string(), v.to_string()))
            .collect(),
    }
}

fn entry(rules: Vec<Rule>) -> EntrySource {
    EntrySource {
        require: Vec::new(),
        rules,
    }
}

fn list_output_files(dir: &std::path::Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

#[tokio::test]
async fn entry_mode_writes_one_file_per_entry() {
    let out = tempdir().unwrap();

    let mut entries = EntryMap::new();
    entries.insert(
        "a.css".to_string(),
        entry(vec![rule("body", &[("margin", "0")])]),
    );
    entries.insert(
        "b.css".to_string(),
        entry(vec![rule("h1", &[("color", "red")])]),
    );
    let config = BuildConfig {
        entries: Some(entries),
        ..Default::default()
    };

    CliHandler::new()
        .run_build(config, out.path().to_path_buf())
        .await
        .unwrap();

    assert_eq!(list_output_files(out.path()), ["a.css", "b.css"]);
    assert_eq!(
        std::fs::read_to_string(out.path().join("a.css")).unwrap(),
        "body {\n  margin: 0;\n}"
    );
    assert_eq!(
        std::fs::read_to_string(out.path().join("b.css")).unwrap(),
        "h1 {\n  color: red;\n}"
    );
}

#[tokio::test]
async fn entry_mode_supports_nested_output_paths() {
    let out = tempdir().unwrap();

    let mut entries = EntryMap::new();
    entries.insert(
        "css/nested/a.css".to_string(),
        entry(vec![rule("body", &[("margin", "0")])]),
    );
    let config = BuildConfig {
        entries: Some(entries),
        ..Default::default()
    };

    CliHandler::new()
        .run_build(config, out.path().to_path_buf())
        .await
        .unwrap();

    assert!(out.path().join("css/nested/a.css").exists());
}

#[tokio::test]
async fn chunk_mode_writes_base_then_chunks_and_class_registry() {
    let out = tempdir().unwrap();

    let shared = rule(".shared", &[("margin", "0")]);
    let mut chunks = ChunkSet::new();
    chunks.insert(
        "one.css".to_string(),
        entry(vec![shared.clone(), rule(".one", &[("color", "red")])]),
    );
    chunks.insert(
        "two.css".to_string(),
        entry(vec![shared, rule(".two", &[("color", "blue")])]),
    );
    let config = BuildConfig {
        chunks: Some(chunks),
        minify_class_names: MinifyNames::Enabled,
        ..Default::default()
    };

    CliHandler::new()
        .run_build(config, out.path().to_path_buf())
        .await
        .unwrap();

    assert_eq!(
        list_output_files(out.path()),
        ["base.css", "class_names.json", "one.css", "two.css"]
    );

    // Shared rule sits in the base chunk and nowhere else; its class was
    // registered first.
    let base = std::fs::read_to_string(out.path().join("base.css")).unwrap();
    let one = std::fs::read_to_string(out.path().join("one.css")).unwrap();
    assert!(base.contains(".a {"));
    assert!(!one.contains(".a {"));

    let registry: IndexMap<String, String> = serde_json::from_str(
        &std::fs::read_to_string(out.path().join("class_names.json")).unwrap(),
    )
    .unwrap();
    let expected: IndexMap<String, String> = [
        ("shared".to_string(), "a".to_string()),
        ("one".to_string(), "b".to_string()),
        ("two".to_string(), "c".to_string()),
    ]
    .into_iter()
    .collect();
    assert_eq!(registry, expected);
}

#[tokio::test]
async fn tag_registry_honors_custom_file_name() {
    let out = tempdir().unwrap();

    let mut entries = EntryMap::new();
    entries.insert(
        "a.css".to_string(),
        entry(vec![rule("header", &[("color", "red")])]),
    );
    let config = BuildConfig {
        entries: Some(entries),
        minify_tag_names: MinifyNames::File("custom_tags.json".to_string()),
        tag_name_prefix: Some("x-".to_string()),
        ..Default::default()
    };

    CliHandler::new()
        .run_build(config, out.path().to_path_buf())
        .await
        .unwrap();

    assert!(out.path().join("custom_tags.json").exists());
    assert!(!out.path().join("tag_names.json").exists());

    let registry: IndexMap<String, String> = serde_json::from_str(
        &std::fs::read_to_string(out.path().join("custom_tags.json")).unwrap(),
    )
    .unwrap();
    assert_eq!(registry.get("header").unwrap(), "x-a");
}

#[tokio::test]
async fn disabled_minification_writes_no_registry() {
    let out = tempdir().unwrap();

    let mut entries = EntryMap::new();
    entries.insert(
        "a.css".to_string(),
        entry(vec![rule(".title", &[("color", "red")])]),
    );
    let config = BuildConfig {
        entries: Some(entries),
        ..Default::default()
    };

    CliHandler::new()
        .run_build(config, out.path().to_path_buf())
        .await
        .unwrap();

    assert_eq!(list_output_files(out.path()), ["a.css"]);
    // Selector untouched when minification is off.
    assert!(std::fs::read_to_string(out.path().join("a.css"))
        .unwrap()
        .contains(".title"));
}

#[tokio::test]
async fn empty_config_builds_nothing_and_succeeds() {
    let out = tempdir().unwrap();

    CliHandler::new()
        .run_build(BuildConfig::default(), out.path().to_path_buf())
        .await
        .unwrap();

    assert!(list_output_files(out.path()).is_empty());
}

#[tokio::test]
async fn rebuild_is_byte_identical() {
    let out = tempdir().unwrap();

    let make_config = || {
        let mut entries = EntryMap::new();
        entries.insert(
            "a.css".to_string(),
            entry(vec![
                rule(".title", &[("color", "red")]),
                rule("header .title", &[("margin", "0")]),
            ]),
        );
        BuildConfig {
            entries: Some(entries),
            minify_tag_names: MinifyNames::Enabled,
            minify_class_names: MinifyNames::Enabled,
            ..Default::default()
        }
    };

    CliHandler::new()
        .run_build(make_config(), out.path().to_path_buf())
        .await
        .unwrap();
    let first_css = std::fs::read(out.path().join("a.css")).unwrap();
    let first_tags = std::fs::read(out.path().join("tag_names.json")).unwrap();
    let first_classes = std::fs::read(out.path().join("class_names.json")).unwrap();

    CliHandler::new()
        .run_build(make_config(), out.path().to_path_buf())
        .await
        .unwrap();

    assert_eq!(std::fs::read(out.path().join("a.css")).unwrap(), first_css);
    assert_eq!(
        std::fs::read(out.path().join("tag_names.json")).unwrap(),
        first_tags
    );
    assert_eq!(
        std::fs::read(out.path().join("class_names.json")).unwrap(),
        first_classes
    );
}
