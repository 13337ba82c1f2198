//! Binding pipeline orchestrator.

use std::path::PathBuf;

use plcbind_address::check_mangling_scheme;
use plcbind_targets::PinTableRegistry;

use crate::config::{effective_entries, BindingEntry};
use crate::error::BindError;
use crate::extract::{extract_used_in, UsedVariable};
use crate::plan::BuildPlan;
use crate::resolve::{resolve, BindingRecord};
use crate::validate::{validate_entries, BindingTable};

/// Inputs for one binding run.
///
/// Each run owns its configuration; concurrent runs share only the
/// read-only registry.
pub struct PipelineConfig<'a> {
    /// Target platform name, used to pick default pins.
    pub platform: String,
    /// Explicit bindings, or `None` to use the platform defaults.
    pub bindings: Option<Vec<BindingEntry>>,
    /// Optional semver requirement on the mangling scheme.
    pub mangling: Option<String>,
    /// Runtime include directory, relative to the project (copied into the build).
    pub matiec_includes: PathBuf,
    /// Generated-code directory, relative to the project (copied into the build).
    pub generated_code: PathBuf,
    /// Project root used to locate the generated code on disk.
    pub project_dir: PathBuf,
    /// Pin tables for default bindings.
    pub registry: &'a PinTableRegistry,
}

/// Output of a successful binding run.
#[derive(Debug)]
pub struct PipelineOutput {
    /// Validated configuration.
    pub table: BindingTable,
    /// Variables used by the compiled logic.
    pub used: Vec<UsedVariable>,
    /// One record per used variable.
    pub records: Vec<BindingRecord>,
    /// Side effects for the firmware build.
    pub plan: BuildPlan,
}

/// Validate the configuration of a run without reading any artifact.
pub fn validate_config(config: &PipelineConfig<'_>) -> Result<BindingTable, BindError> {
    if let Some(requirement) = &config.mangling {
        check_mangling_scheme(requirement).map_err(crate::error::ConfigError::from)?;
    }
    let entries = effective_entries(config.bindings.as_deref(), config.registry, &config.platform);
    Ok(validate_entries(&entries)?)
}

/// Run the full pipeline:
/// mangling check -> validate configuration -> extract used variables -> resolve -> plan.
pub fn bind(config: &PipelineConfig<'_>) -> Result<PipelineOutput, BindError> {
    // Stage 1: configuration
    let table = validate_config(config)?;

    // Stage 2: used variables
    let used = extract_used_in(&config.project_dir.join(&config.generated_code))?;

    // Stage 3: resolution
    let records = resolve(&used, &table)?;

    // Stage 4: build plan
    let plan = BuildPlan::new(&config.matiec_includes, &config.generated_code, &records);

    Ok(PipelineOutput {
        table,
        used,
        records,
        plan,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ConfigError, ResolveError};
    use crate::extract::LOCATED_VARIABLES_FILE;
    use plcbind_address::IoMode;
    use plcbind_targets::PinDescriptor;

    fn project(symbols: &str) -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        let generated = dir.path().join("generated");
        std::fs::create_dir_all(&generated).unwrap();
        std::fs::write(generated.join(LOCATED_VARIABLES_FILE), symbols).unwrap();
        dir
    }

    fn config<'a>(dir: &tempfile::TempDir, registry: &'a PinTableRegistry) -> PipelineConfig<'a> {
        PipelineConfig {
            platform: "esp8266".into(),
            bindings: None,
            mangling: None,
            matiec_includes: PathBuf::from("matiec"),
            generated_code: PathBuf::from("generated"),
            project_dir: dir.path().to_path_buf(),
            registry,
        }
    }

    #[test]
    fn defaults_bind_used_variables() {
        let dir = project("__LOCATED_VAR(BOOL,__IX0_0,I,X,0,0)\n__LOCATED_VAR(BOOL,__QX0_2,Q,X,0,2)\n");
        let registry = PinTableRegistry::builtin();
        let output = bind(&config(&dir, &registry)).unwrap();
        assert_eq!(output.records.len(), 2);
        assert_eq!(output.records[0].pin.number, "D4");
        assert_eq!(output.records[1].pin.number, "D2");
        assert_eq!(output.plan.registrations[1].method(), "add_digital_output_pin");
        assert_eq!(output.table.len(), 10);
    }

    #[test]
    fn explicit_bindings_override_defaults() {
        let dir = project("__LOCATED_VAR(BOOL,__IX0_0,I,X,0,0)\n");
        let registry = PinTableRegistry::builtin();
        let mut cfg = config(&dir, &registry);
        cfg.bindings = Some(vec![BindingEntry::literal(
            "%IX0.1",
            PinDescriptor::for_mode("D5", IoMode::DigitalIn),
        )]);
        let err = bind(&cfg).unwrap_err();
        assert!(matches!(err, BindError::Resolve(ResolveError::UnboundAddress(ref id)) if id == "__IX0_0"));
    }

    #[test]
    fn incompatible_mangling_stops_before_extraction() {
        let dir = tempfile::tempdir().unwrap();
        let registry = PinTableRegistry::builtin();
        let mut cfg = config(&dir, &registry);
        cfg.mangling = Some("^2".into());
        assert!(matches!(bind(&cfg).unwrap_err(), BindError::Config(ConfigError::Mangling(_))));
    }

    #[test]
    fn missing_artifact_is_an_extract_error() {
        let dir = tempfile::tempdir().unwrap();
        let registry = PinTableRegistry::builtin();
        assert!(matches!(bind(&config(&dir, &registry)).unwrap_err(), BindError::Extract(_)));
    }
}
