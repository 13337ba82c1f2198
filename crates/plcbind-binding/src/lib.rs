//! Binding validation and resolution for plcbind.
//!
//! Reconciles the located variables a compiled IEC 61131-3 program uses
//! with the pins a project configures, producing one binding record per
//! used variable or failing on the first problem.
//!
//! ## Modules
//!
//! - [`config`]: binding entry schema and platform defaults
//! - [`validate`]: configuration validator and `BindingTable`
//! - [`extract`]: used-variable extraction from `LOCATED_VARIABLES.h`
//! - [`resolve`]: binding resolver
//! - [`registration`]: per-mode registration shapes
//! - [`plan`]: build plan for the firmware build
//! - [`pipeline`]: end-to-end orchestration

pub mod config;
pub mod error;
pub mod extract;
pub mod pipeline;
pub mod plan;
pub mod registration;
pub mod resolve;
pub mod validate;

pub use config::{default_entries, effective_entries, BindingEntry, SensorMetadata};
pub use error::{BindError, ConfigError, ExtractError, ResolveError};
pub use extract::{extract_used, extract_used_from_str, extract_used_in, UsedVariable};
pub use pipeline::{bind, validate_config, PipelineConfig, PipelineOutput};
pub use plan::BuildPlan;
pub use registration::Registration;
pub use resolve::{missing_bindings, resolve, BindingRecord};
pub use validate::{validate_entries, BindingTable, PinBindingConfig, MAX_BINDINGS};
