//! `plcbind resolve`: run the full pipeline and print the build plan.

use std::path::Path;

use anyhow::{bail, Context, Result};
use plcbind_binding::{bind, PipelineOutput};

use crate::manifest::{load_registry, PlcbindManifest};

pub fn run(project_dir: &Path, manifest: &PlcbindManifest, format: &str) -> Result<()> {
    let output = resolve_project(project_dir, manifest)?;
    match format {
        "human" => print!("{}", render_human(&output)),
        "json" => {
            let json = serde_json::to_string_pretty(&output.plan).context("serializing build plan")?;
            println!("{json}");
        }
        other => bail!("unknown format '{other}': expected human or json"),
    }
    Ok(())
}

pub(crate) fn resolve_project(project_dir: &Path, manifest: &PlcbindManifest) -> Result<PipelineOutput> {
    let registry = load_registry(Some(project_dir))?;
    let config = manifest.pipeline_config(project_dir, &registry);
    bind(&config).with_context(|| format!("binding project '{}'", manifest.project.name))
}

fn render_human(output: &PipelineOutput) -> String {
    let mut out = String::new();
    out.push_str("Copy into src/:\n");
    for dir in &output.plan.copy_dirs {
        out.push_str(&format!("  {}\n", dir.display()));
    }
    out.push_str("Build flags:\n");
    for flag in &output.plan.build_flags {
        out.push_str(&format!("  {flag}\n"));
    }
    out.push_str(&format!("Registrations ({}):\n", output.plan.registrations.len()));
    for reg in &output.plan.registrations {
        let sensor = reg
            .sensor()
            .map(|s| format!("  sensor={}", s.id))
            .unwrap_or_default();
        out.push_str(&format!(
            "  {:<24} {:<10} {}{sensor}\n",
            reg.method(),
            reg.variable().as_str(),
            reg.pin()
        ));
    }
    out
}
