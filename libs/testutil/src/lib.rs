use anyhow::{Context, Result, anyhow};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

mod path_safety;

pub use path_safety::normalize_under_root;

/// Directory holding the shared card fixtures, relative to the workspace root.
pub const CARD_SAMPLES_DIR: &str = "tests/fixtures/cards";

fn workspace_root() -> Result<PathBuf> {
    // workspace root is two levels up from this crate's manifest (libs/testutil)
    let root = Path::new(env!("CARGO_MANIFEST_DIR"))
        .ancestors()
        .nth(2)
        .ok_or_else(|| anyhow!("testutil manifest has no workspace root"))?;
    root.canonicalize()
        .with_context(|| format!("failed to canonicalize {}", root.display()))
}

/// Path of a named fixture under [`CARD_SAMPLES_DIR`], e.g. `"all_resources"`.
pub fn card_sample_path(name: &str) -> String {
    format!("{CARD_SAMPLES_DIR}/{name}.json")
}

/// Reads a fixture as raw text, for tests that exercise string parsing.
pub fn load_card_text(path: &str) -> Result<String> {
    let absolute = absolute_path(path)?;
    fs::read_to_string(&absolute).with_context(|| format!("failed to read {}", absolute.display()))
}

/// Loads a JSON or YAML card fixture as a JSON value.
pub fn load_card_value(path: &str) -> Result<Value> {
    let absolute = absolute_path(path)?;
    let content = fs::read_to_string(&absolute)
        .with_context(|| format!("failed to read {}", absolute.display()))?;
    let extension = absolute
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or_default()
        .to_ascii_lowercase();

    match extension.as_str() {
        "json" => serde_json::from_str(&content)
            .with_context(|| format!("failed to parse json {}", absolute.display())),
        "yaml" | "yml" => {
            let yaml: serde_yaml_bw::Value = serde_yaml_bw::from_str(&content)
                .with_context(|| format!("failed to parse yaml {}", absolute.display()))?;
            serde_json::to_value(yaml)
                .with_context(|| format!("failed to convert yaml {}", absolute.display()))
        }
        other => Err(anyhow!("unsupported fixture extension: {other}")),
    }
}

fn absolute_path<P>(path: P) -> Result<PathBuf>
where
    P: AsRef<Path>,
{
    let root = workspace_root()?;
    let relative = path.as_ref();
    if relative.is_absolute() {
        return relative
            .canonicalize()
            .with_context(|| format!("failed to canonicalize {}", relative.display()));
    }

    normalize_under_root(&root, relative)
}

#[macro_export]
macro_rules! load_card {
    ($path:expr $(,)?) => {{
        $crate::load_card_value($path)
            .unwrap_or_else(|err| panic!("failed to load card {}: {}", $path, err))
    }};
}

#[macro_export]
macro_rules! load_card_text {
    ($path:expr $(,)?) => {{
        $crate::load_card_text($path)
            .unwrap_or_else(|err| panic!("failed to load card {}: {}", $path, err))
    }};
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn loads_yaml_fixtures_as_json() {
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        writeln!(file, "type: AdaptiveCard\nversion: \"1.0\"\nbody: []").unwrap();
        let value = load_card_value(file.path().to_str().unwrap()).unwrap();
        assert_eq!(value["type"], "AdaptiveCard");
        assert_eq!(value["version"], "1.0");
    }

    #[test]
    fn rejects_paths_escaping_the_workspace() {
        assert!(load_card_value("../../../etc/passwd").is_err());
    }

    #[test]
    fn sample_paths_live_under_cards_dir() {
        assert_eq!(
            card_sample_path("all_resources"),
            "tests/fixtures/cards/all_resources.json"
        );
    }
}
