//! Canonical identifiers: the mangled form of an address used by the
//! IEC 61131-3 compiler's generated symbol table.
//!
//! The compiler names the storage for `%IX0.0` as `__IX0_0` and for `%QW3`
//! as `__QW3`. Keys in a binding table and identifiers extracted from
//! `LOCATED_VARIABLES.h` are joined by plain string equality, so this rule
//! must match the compiler byte for byte. Any change to it is a new
//! [`MANGLING_SCHEME`] version.

use std::borrow::Borrow;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::address::Address;
use crate::decode::decode;
use crate::error::{DecodeError, ManglingError};

/// Prefix replacing the `%` of a literal.
pub const CANONICAL_PREFIX: &str = "__";

/// Separator replacing the `.` between major and minor.
pub const CANONICAL_BIT_SEPARATOR: char = '_';

/// Version of the mangling rule implemented by [`canonicalize`].
pub const MANGLING_SCHEME: semver::Version = semver::Version::new(1, 0, 0);

/// The mangled identifier of an address, e.g. `__IX0_0`.
///
/// Ordering, equality and hashing follow the identifier text, so a map keyed
/// by `CanonicalIdentifier` can be queried with a plain `&str`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CanonicalIdentifier {
    text: String,
    address: Address,
}

impl CanonicalIdentifier {
    /// The identifier text.
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// The address this identifier was mangled from.
    pub fn address(&self) -> Address {
        self.address
    }
}

impl PartialEq for CanonicalIdentifier {
    fn eq(&self, other: &Self) -> bool {
        self.text == other.text
    }
}

impl Eq for CanonicalIdentifier {}

impl PartialOrd for CanonicalIdentifier {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for CanonicalIdentifier {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.text.cmp(&other.text)
    }
}

impl std::hash::Hash for CanonicalIdentifier {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.text.hash(state);
    }
}

impl fmt::Display for CanonicalIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl Borrow<str> for CanonicalIdentifier {
    fn borrow(&self) -> &str {
        &self.text
    }
}

impl AsRef<str> for CanonicalIdentifier {
    fn as_ref(&self) -> &str {
        &self.text
    }
}

impl From<&Address> for CanonicalIdentifier {
    fn from(addr: &Address) -> Self {
        canonicalize(addr)
    }
}

impl From<CanonicalIdentifier> for String {
    fn from(value: CanonicalIdentifier) -> Self {
        value.text
    }
}

impl TryFrom<String> for CanonicalIdentifier {
    type Error = DecodeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        let addr = parse_canonical(&value)?;
        Ok(canonicalize(&addr))
    }
}

/// Mangle an address into the compiler's identifier form.
pub fn canonicalize(addr: &Address) -> CanonicalIdentifier {
    let mut id = format!(
        "{CANONICAL_PREFIX}{}{}{}",
        addr.location().letter(),
        addr.size().letter(),
        addr.major()
    );
    if let Some(minor) = addr.minor() {
        id.push(CANONICAL_BIT_SEPARATOR);
        id.push_str(&minor.to_string());
    }
    CanonicalIdentifier {
        text: id,
        address: *addr,
    }
}

/// Invert [`canonicalize`].
///
/// Only identifiers that `canonicalize` itself could have produced are
/// accepted; leading zeros such as `__IX007_1` are rejected as malformed.
pub fn parse_canonical(identifier: &str) -> Result<Address, DecodeError> {
    let malformed = || DecodeError::MalformedLiteral {
        literal: identifier.to_string(),
    };

    let body = identifier
        .strip_prefix(CANONICAL_PREFIX)
        .ok_or_else(malformed)?;
    let literal = format!("%{}", body.replacen(CANONICAL_BIT_SEPARATOR, ".", 1));
    let addr = decode(&literal).map_err(|e| match e {
        DecodeError::MalformedLiteral { .. } => malformed(),
        DecodeError::OutOfRange {
            component,
            value,
            max,
            ..
        } => DecodeError::OutOfRange {
            literal: identifier.to_string(),
            component,
            value,
            max,
        },
    })?;

    if canonicalize(&addr).as_str() != identifier {
        return Err(malformed());
    }
    Ok(addr)
}

impl Address {
    /// The canonical identifier of this address.
    pub fn canonical(&self) -> CanonicalIdentifier {
        canonicalize(self)
    }
}

/// Check that [`MANGLING_SCHEME`] satisfies a semver requirement such as `"^1"`.
pub fn check_mangling_scheme(requirement: &str) -> Result<(), ManglingError> {
    let req = semver::VersionReq::parse(requirement).map_err(|e| {
        ManglingError::InvalidRequirement {
            requirement: requirement.to_string(),
            detail: e.to_string(),
        }
    })?;
    if !req.matches(&MANGLING_SCHEME) {
        return Err(ManglingError::Incompatible {
            requirement: requirement.to_string(),
            supported: MANGLING_SCHEME.to_string(),
        });
    }
    Ok(())
}
