//! `plcbind check`: validate configuration against the generated code.
//!
//! Unlike `resolve`, which stops at the first unbound address, `check`
//! reports every one of them.

use std::path::Path;

use anyhow::{bail, Context, Result};
use plcbind_binding::{extract_used_in, missing_bindings, validate_config};

use crate::manifest::{load_registry, PlcbindManifest};

/// Outcome of a check run.
#[derive(Debug)]
pub(crate) struct CheckReport {
    pub bindings: usize,
    pub used: usize,
    pub missing: Vec<String>,
}

pub fn run(project_dir: &Path, manifest: &PlcbindManifest) -> Result<()> {
    let report = check_project(project_dir, manifest)?;

    println!("Project:   {}", manifest.project.name);
    println!("Platform:  {}", manifest.project.platform);
    println!("Bindings:  {}", report.bindings);
    println!("Used:      {}", report.used);

    if report.missing.is_empty() {
        println!("OK: every used address is bound");
        return Ok(());
    }
    println!();
    for identifier in &report.missing {
        println!("  unbound: {identifier}");
    }
    bail!("{} used address(es) have no pin binding", report.missing.len())
}

pub(crate) fn check_project(project_dir: &Path, manifest: &PlcbindManifest) -> Result<CheckReport> {
    let registry = load_registry(Some(project_dir))?;
    let config = manifest.pipeline_config(project_dir, &registry);

    let table = validate_config(&config).context("validating bindings")?;
    let generated = project_dir.join(&manifest.project.generated_code);
    let used = extract_used_in(&generated).context("reading generated code")?;
    let missing = missing_bindings(&used, &table);
    tracing::debug!(bindings = table.len(), used = used.len(), missing = missing.len(), "check complete");

    Ok(CheckReport {
        bindings: table.len(),
        used: used.len(),
        missing,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use plcbind_binding::extract::LOCATED_VARIABLES_FILE;

    fn project(manifest: &str, symbols: &str) -> (tempfile::TempDir, PlcbindManifest) {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("generated")).unwrap();
        std::fs::write(dir.path().join("generated").join(LOCATED_VARIABLES_FILE), symbols).unwrap();
        (dir, PlcbindManifest::from_str(manifest).unwrap())
    }

    const HEADER: &str = "[project]\nname = \"t\"\nplatform = \"esp8266\"\nmatiec-includes = \"matiec\"\ngenerated-code = \"generated\"\n";

    #[test]
    fn reports_every_unbound_address() {
        let (dir, manifest) = project(
            HEADER,
            "__LOCATED_VAR(BOOL,__IX0_0,I,X,0,0)\n__LOCATED_VAR(BOOL,__IX2_1,I,X,2,1)\n__LOCATED_VAR(INT,__IW7,I,W,7)\n",
        );
        let report = check_project(dir.path(), &manifest).unwrap();
        assert_eq!(report.bindings, 10);
        assert_eq!(report.used, 3);
        assert_eq!(report.missing, vec!["__IX2_1", "__IW7"]);
        assert!(run(dir.path(), &manifest).is_err());
    }

    #[test]
    fn clean_project_passes() {
        let (dir, manifest) = project(HEADER, "__LOCATED_VAR(BOOL,__QX0_1,Q,X,0,1)\n");
        let report = check_project(dir.path(), &manifest).unwrap();
        assert!(report.missing.is_empty());
        assert!(run(dir.path(), &manifest).is_ok());
    }

    #[test]
    fn invalid_binding_fails_before_extraction() {
        let manifest = format!(
            "{HEADER}\n[[bindings]]\naddress = \"%IX0.0\"\npin = {{ number = \"D0\", output = true }}\n"
        );
        let (dir, manifest) = project(&manifest, "");
        let err = check_project(dir.path(), &manifest).unwrap_err();
        assert!(format!("{err:#}").contains("validating bindings"));
    }
}
