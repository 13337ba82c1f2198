//! `plcbind init`: project scaffolding.

use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use plcbind_targets::PinTableRegistry;

use crate::manifest::{PlcbindManifest, MANIFEST_FILE};

/// Create a new project in the directory `name`, relative to cwd.
pub fn run(name: &str, platform: &str) -> Result<()> {
    create_project(Path::new(name), name, platform)
}

pub(crate) fn create_project(project_dir: &Path, name: &str, platform: &str) -> Result<()> {
    if project_dir.exists() {
        bail!("directory '{}' already exists", project_dir.display());
    }
    if PinTableRegistry::builtin().get(platform).is_none() {
        tracing::warn!(platform, "no built-in pin table; add one under pins/ or declare [[bindings]]");
    }

    fs::create_dir_all(project_dir.join("pins")).context("creating pins/ directory")?;

    fs::write(
        project_dir.join(MANIFEST_FILE),
        PlcbindManifest::template(name, platform),
    )
    .with_context(|| format!("writing {MANIFEST_FILE}"))?;

    fs::write(project_dir.join(".gitignore"), "generated/\n").context("writing .gitignore")?;

    println!("Created project '{name}' for {platform}");
    println!("  {name}/{MANIFEST_FILE}");
    println!("  {name}/pins/");
    println!("  {name}/.gitignore");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_creates_project_structure() {
        let dir = tempfile::tempdir().unwrap();
        let project_path = dir.path().join("tank");

        create_project(&project_path, "tank", "esp8266").unwrap();

        assert!(project_path.join(MANIFEST_FILE).is_file());
        assert!(project_path.join("pins").is_dir());
        assert!(project_path.join(".gitignore").is_file());
    }

    #[test]
    fn init_generates_valid_manifest() {
        let dir = tempfile::tempdir().unwrap();
        let project_path = dir.path().join("pump");
        create_project(&project_path, "pump", "rp2040").unwrap();

        let (manifest, _) = PlcbindManifest::find_and_load(&project_path).unwrap().unwrap();
        assert_eq!(manifest.project.name, "pump");
        assert_eq!(manifest.project.platform, "rp2040");
    }

    #[test]
    fn init_refuses_existing_directory() {
        let dir = tempfile::tempdir().unwrap();
        assert!(create_project(dir.path(), "x", "esp8266").is_err());
    }
}
