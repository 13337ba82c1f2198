//! TOML parsing, serialization, validation, and discovery for pin tables.
//!
//! Project-specific pin tables are stored as `.pins.toml` files in the
//! `pins/` directory of a plcbind project:
//!
//! ```toml
//! platform = "my-board"
//!
//! [digital-in]
//! __IX0_0 = "GPIO4"
//!
//! [analog-out]
//! __QW0 = "GPIO15"
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use plcbind_address::IoMode;

use crate::error::{Result, TargetError};
use crate::platform::PinTable;

/// Severity of a pin table validation issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

/// A validation issue found in a pin table.
#[derive(Debug, Clone)]
pub struct ValidationIssue {
    pub severity: Severity,
    /// Human-readable description.
    pub message: String,
}

/// Load a pin table from a `.pins.toml` file.
pub fn load_pin_table_toml(path: &Path) -> Result<PinTable> {
    if !path.exists() {
        return Err(TargetError::NotFound {
            path: path.to_path_buf(),
        });
    }
    let content = std::fs::read_to_string(path)?;
    let table = parse_pin_table_toml(&content)?;
    if let Err(issues) = validate_pin_table(&table) {
        let errors: Vec<_> = issues
            .iter()
            .filter(|i| i.severity == Severity::Error)
            .map(|i| i.message.as_str())
            .collect();
        for issue in issues.iter().filter(|i| i.severity == Severity::Warning) {
            tracing::warn!(path = %path.display(), "{}", issue.message);
        }
        if !errors.is_empty() {
            return Err(TargetError::Validation {
                platform: table.platform.clone(),
                detail: errors.join("; "),
            });
        }
    }
    Ok(table)
}

/// Parse a pin table from a TOML string.
pub fn parse_pin_table_toml(toml_str: &str) -> Result<PinTable> {
    let table: PinTable = toml::from_str(toml_str)?;
    Ok(table)
}

/// Serialize a pin table to pretty TOML.
pub fn pin_table_to_toml(table: &PinTable) -> Result<String> {
    let toml_str = toml::to_string_pretty(table)?;
    Ok(toml_str)
}

/// Validate a pin table for structural correctness.
///
/// Returns `Ok(())` if valid, or `Err(issues)` with a list of problems.
pub fn validate_pin_table(table: &PinTable) -> std::result::Result<(), Vec<ValidationIssue>> {
    let mut issues = Vec::new();

    if table.platform.trim().is_empty() {
        issues.push(ValidationIssue {
            severity: Severity::Error,
            message: "platform name is empty".into(),
        });
    }

    let mut pin_users: BTreeMap<&str, Vec<&str>> = BTreeMap::new();
    for mode in IoMode::ALL {
        for (id, number) in table.pins(mode) {
            let addr = id.address();
            if addr.io_mode() != Some(mode) {
                issues.push(ValidationIssue {
                    severity: Severity::Error,
                    message: format!(
                        "'{id}' ({addr}) is listed under {mode} but its address class is {} {}",
                        addr.location(),
                        addr.size()
                    ),
                });
            }
            if number.trim().is_empty() {
                issues.push(ValidationIssue {
                    severity: Severity::Error,
                    message: format!("'{id}' has an empty pin name"),
                });
            }
            pin_users.entry(number.as_str()).or_default().push(id.as_str());
        }
    }

    for (number, users) in &pin_users {
        if users.len() > 1 {
            issues.push(ValidationIssue {
                severity: Severity::Warning,
                message: format!("pin '{number}' is assigned to {}", users.join(", ")),
            });
        }
    }

    if issues.is_empty() {
        Ok(())
    } else {
        Err(issues)
    }
}

/// Generate a template `.pins.toml` for a new platform.
///
/// Seeds from the ESP8266 table with the given name.
pub fn generate_template(platform: &str) -> Result<String> {
    let mut table = PinTable::esp8266();
    table.platform = platform.into();
    table.description = None;
    pin_table_to_toml(&table)
}

/// Discover all `.pins.toml` files in a project's `pins/` directory.
///
/// Returns a list of (file stem, file path) pairs sorted by name.
pub fn discover_pin_tables(project_dir: &Path) -> Result<Vec<(String, PathBuf)>> {
    let pins_dir = project_dir.join("pins");
    if !pins_dir.is_dir() {
        return Ok(Vec::new());
    }

    let mut tables = Vec::new();
    for entry in std::fs::read_dir(&pins_dir)? {
        let path = entry?.path();
        let stem = path
            .file_name()
            .and_then(|n| n.to_str())
            .and_then(|n| n.strip_suffix(".pins.toml"))
            .map(str::to_string);
        if let Some(name) = stem {
            tables.push((name, path));
        }
    }
    tables.sort_by(|a, b| a.0.cmp(&b.0));
    Ok(tables)
}
