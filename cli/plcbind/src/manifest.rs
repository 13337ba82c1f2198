//! `plcbind.toml` manifest parsing and project configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use plcbind_binding::{BindingEntry, PipelineConfig};
use plcbind_targets::PinTableRegistry;
use serde::{Deserialize, Serialize};

/// Manifest file name searched for from the working directory upward.
pub const MANIFEST_FILE: &str = "plcbind.toml";

/// The top-level manifest structure for a plcbind project.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlcbindManifest {
    /// Project settings (required).
    pub project: ProjectConfig,
    /// Explicit pin bindings. When absent the platform defaults apply.
    #[serde(default)]
    pub bindings: Option<Vec<BindingEntry>>,
}

/// Project settings section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ProjectConfig {
    /// Project name (required).
    pub name: String,
    /// Target platform (e.g., "esp8266").
    pub platform: String,
    /// Directory holding the PLC runtime headers, relative to the project.
    pub matiec_includes: PathBuf,
    /// Directory holding the compiler's generated sources, relative to the project.
    pub generated_code: PathBuf,
    /// Semver requirement on the identifier mangling scheme (e.g., "^1").
    #[serde(default)]
    pub mangling: Option<String>,
}

impl PlcbindManifest {
    /// Search upward from `start_dir` for a `plcbind.toml` file, parse and return it
    /// along with the directory it was found in.
    pub fn find_and_load(start_dir: &Path) -> Result<Option<(Self, PathBuf)>> {
        let mut dir = start_dir.to_path_buf();
        loop {
            let candidate = dir.join(MANIFEST_FILE);
            if candidate.is_file() {
                let content = std::fs::read_to_string(&candidate)
                    .with_context(|| format!("reading {}", candidate.display()))?;
                let manifest: PlcbindManifest = toml::from_str(&content)
                    .with_context(|| format!("parsing {}", candidate.display()))?;
                return Ok(Some((manifest, dir)));
            }
            if !dir.pop() {
                break;
            }
        }
        Ok(None)
    }

    /// Parse a manifest from a TOML string.
    #[cfg(test)]
    pub fn from_str(s: &str) -> Result<Self> {
        toml::from_str(s).context("parsing plcbind.toml")
    }

    /// Pipeline inputs for this project.
    pub fn pipeline_config<'a>(
        &self,
        project_dir: &Path,
        registry: &'a PinTableRegistry,
    ) -> PipelineConfig<'a> {
        PipelineConfig {
            platform: self.project.platform.clone(),
            bindings: self.bindings.clone(),
            mangling: self.project.mangling.clone(),
            matiec_includes: self.project.matiec_includes.clone(),
            generated_code: self.project.generated_code.clone(),
            project_dir: project_dir.to_path_buf(),
            registry,
        }
    }

    /// Generate the default template for `plcbind init`.
    pub fn template(name: &str, platform: &str) -> String {
        format!(
            r#"[project]
name = "{name}"
platform = "{platform}"
matiec-includes = "matiec"
generated-code = "generated"
mangling = "^1"

# Remove the comment markers to declare bindings explicitly. Without a
# [[bindings]] list the platform's default pin table is used.
#
# [[bindings]]
# address = "%IX0.0"
# pin = {{ number = "D4", input = true }}
"#
        )
    }
}

/// Built-in pin tables plus any `pins/*.pins.toml` in the project.
pub fn load_registry(project_dir: Option<&Path>) -> Result<PinTableRegistry> {
    let mut registry = PinTableRegistry::builtin();
    if let Some(dir) = project_dir {
        registry
            .load_project_tables(dir)
            .with_context(|| format!("loading pin tables from {}", dir.join("pins").display()))?;
    }
    Ok(registry)
}

#[cfg(test)]
mod tests {
    use super::*;
    use plcbind_address::IoMode;

    #[test]
    fn parse_full_manifest() {
        let toml_str = r#"
[project]
name = "tank"
platform = "esp8266"
matiec-includes = "matiec/lib"
generated-code = "build/generated"
mangling = "^1"

[[bindings]]
address = "%IX0.0"
mode = "digital-in"
pin = { number = "D4", input = true }
sensor = { id = "level_high" }

[[bindings]]
variable = "__QW0"
pin = { number = "D8", output = true, analog = true }
"#;
        let manifest = PlcbindManifest::from_str(toml_str).unwrap();
        assert_eq!(manifest.project.name, "tank");
        assert_eq!(manifest.project.platform, "esp8266");
        assert_eq!(manifest.project.generated_code, PathBuf::from("build/generated"));
        assert_eq!(manifest.project.mangling.as_deref(), Some("^1"));
        let bindings = manifest.bindings.unwrap();
        assert_eq!(bindings.len(), 2);
        assert_eq!(bindings[0].mode, Some(IoMode::DigitalIn));
        assert_eq!(bindings[1].variable.as_deref(), Some("__QW0"));
    }

    #[test]
    fn absent_bindings_differ_from_empty() {
        let base = "[project]\nname = \"p\"\nplatform = \"esp8266\"\nmatiec-includes = \"m\"\ngenerated-code = \"g\"\n";
        let manifest = PlcbindManifest::from_str(base).unwrap();
        assert!(manifest.bindings.is_none());

        let manifest = PlcbindManifest::from_str(&format!("bindings = []\n{base}")).unwrap();
        assert_eq!(manifest.bindings.map(|b| b.len()), Some(0));
    }

    #[test]
    fn reject_missing_platform() {
        let toml_str = "[project]\nname = \"p\"\nmatiec-includes = \"m\"\ngenerated-code = \"g\"\n";
        assert!(PlcbindManifest::from_str(toml_str).is_err());
    }

    #[test]
    fn reject_invalid_toml() {
        assert!(PlcbindManifest::from_str("this is not valid toml [[[").is_err());
    }

    #[test]
    fn template_is_valid_toml() {
        let template = PlcbindManifest::template("demo", "esp32");
        let manifest = PlcbindManifest::from_str(&template).unwrap();
        assert_eq!(manifest.project.name, "demo");
        assert_eq!(manifest.project.platform, "esp32");
        assert!(manifest.bindings.is_none());
    }

    #[test]
    fn find_and_load_walks_up() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(MANIFEST_FILE),
            PlcbindManifest::template("parent", "esp8266"),
        )
        .unwrap();
        let nested = dir.path().join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();

        let (manifest, found_dir) = PlcbindManifest::find_and_load(&nested).unwrap().unwrap();
        assert_eq!(manifest.project.name, "parent");
        assert_eq!(found_dir, dir.path());
    }

    #[test]
    fn load_registry_includes_project_tables() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("pins")).unwrap();
        std::fs::write(
            dir.path().join("pins").join("custom.pins.toml"),
            "platform = \"custom\"\n\n[digital-out]\n__QX0_0 = \"GPIO2\"\n",
        )
        .unwrap();
        let registry = load_registry(Some(dir.path())).unwrap();
        assert!(registry.get("custom").is_some());
        assert!(registry.get("esp8266").is_some());
    }
}
