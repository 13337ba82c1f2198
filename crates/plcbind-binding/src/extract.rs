//! Used-variable extraction from the compiler's `LOCATED_VARIABLES.h`.
//!
//! The compiler declares one macro invocation per located variable the
//! program references:
//!
//! ```text
//! __LOCATED_VAR(BOOL,__IX0_0,I,X,0,0)
//! __LOCATED_VAR(INT,__QW3,Q,W,3)
//! ```
//!
//! The second argument is the canonical identifier. A line is kept when it
//! carries the marker, has at least two arguments, and the identifier
//! contains one of the I/O infixes `IX`, `QX`, `IW` or `QW` anywhere.
//! The infix test is a substring match, not an anchored prefix check.

use std::fmt;
use std::path::Path;

use serde::Serialize;

use crate::error::ExtractError;

/// File name of the symbol artifact inside the generated-code directory.
pub const LOCATED_VARIABLES_FILE: &str = "LOCATED_VARIABLES.h";

/// Token marking a located-variable declaration.
pub const LOCATED_VAR_MARKER: &str = "__LOCATED_VAR";

/// Infixes that make an identifier I/O-relevant.
pub const IO_INFIXES: [&str; 4] = ["IX", "QX", "IW", "QW"];

/// A variable referenced by compiled logic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UsedVariable {
    /// Raw identifier as emitted by the compiler.
    pub identifier: String,
    /// 1-based line number in the artifact.
    pub line: usize,
    /// The full source line, trimmed.
    pub source: String,
}

impl AsRef<str> for UsedVariable {
    fn as_ref(&self) -> &str {
        &self.identifier
    }
}

impl fmt::Display for UsedVariable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (line {})", self.identifier, self.line)
    }
}

/// Whether an identifier contains one of the I/O infixes.
pub fn is_io_identifier(identifier: &str) -> bool {
    IO_INFIXES.iter().any(|infix| identifier.contains(infix))
}

/// Extract the second argument of the first parenthesized group.
fn identifier_field(line: &str) -> Option<&str> {
    let (_, after_paren) = line.split_once('(')?;
    let group = after_paren.split(['(', ')']).next()?;
    let mut fields = group.split(',');
    fields.next()?;
    fields.next().map(str::trim)
}

/// Extract used I/O variables from artifact text, in file order.
///
/// Duplicates are kept.
pub fn extract_used_from_str(content: &str) -> Vec<UsedVariable> {
    let mut used = Vec::new();
    for (index, line) in content.lines().enumerate() {
        if !line.contains(LOCATED_VAR_MARKER) {
            continue;
        }
        let Some(identifier) = identifier_field(line) else {
            tracing::debug!(line = index + 1, "skipping located variable without an identifier field");
            continue;
        };
        if !is_io_identifier(identifier) {
            tracing::debug!(line = index + 1, identifier, "skipping non-I/O located variable");
            continue;
        }
        used.push(UsedVariable {
            identifier: identifier.to_string(),
            line: index + 1,
            source: line.trim().to_string(),
        });
    }
    used
}

/// Extract used I/O variables from a symbol artifact file.
pub fn extract_used(artifact: &Path) -> Result<Vec<UsedVariable>, ExtractError> {
    if !artifact.is_file() {
        return Err(ExtractError::NotFound {
            path: artifact.to_path_buf(),
        });
    }
    let content = std::fs::read_to_string(artifact).map_err(|source| ExtractError::Io {
        path: artifact.to_path_buf(),
        source,
    })?;
    let used = extract_used_from_str(&content);
    tracing::info!(path = %artifact.display(), count = used.len(), "extracted used I/O variables");
    Ok(used)
}

/// Extract used I/O variables from `LOCATED_VARIABLES.h` in a generated-code directory.
pub fn extract_used_in(generated_dir: &Path) -> Result<Vec<UsedVariable>, ExtractError> {
    extract_used(&generated_dir.join(LOCATED_VARIABLES_FILE))
}
