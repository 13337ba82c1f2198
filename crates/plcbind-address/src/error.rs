//! Error types for address decoding and role validation.

use crate::address::{AddressLocation, AddressSize};

/// Errors produced while decoding an address literal.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    /// The literal matches neither the bit form nor the word form.
    #[error("malformed address literal '{literal}': expected %<I|Q|M>X<major>.<minor> or %<I|Q|M><B|W|D|L><major>")]
    MalformedLiteral {
        /// The rejected literal.
        literal: String,
    },

    /// A numeric component exceeds its ceiling.
    #[error("address '{literal}': {component} {value} is out of range (max {max})")]
    OutOfRange {
        /// The rejected literal.
        literal: String,
        /// Which component overflowed ("major" or "minor").
        component: &'static str,
        /// The parsed value, saturated at `u64::MAX` when the digits overflow.
        value: u64,
        /// The inclusive ceiling for this component.
        max: u32,
    },
}

/// Errors produced when an address does not fit the role a call site requires.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// The address refers to the wrong address space.
    #[error("address '{address}' has location {found}, but {expected} is required")]
    LocationMismatch {
        /// Rendered address.
        address: String,
        /// Location required by the role.
        expected: AddressLocation,
        /// Location of the decoded address.
        found: AddressLocation,
    },

    /// The address has the wrong width.
    #[error("address '{address}' has size {found}, but {expected} is required")]
    SizeMismatch {
        /// Rendered address.
        address: String,
        /// Size required by the role.
        expected: AddressSize,
        /// Size of the decoded address.
        found: AddressSize,
    },

    /// No I/O mode exists for the address class (memory or non bit/word sizes).
    #[error("address '{address}' ({location} {size}) cannot be bound to an I/O pin")]
    NoIoMode {
        /// Rendered address.
        address: String,
        /// Location of the decoded address.
        location: AddressLocation,
        /// Size of the decoded address.
        size: AddressSize,
    },
}

/// Errors from the mangling-scheme compatibility check.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ManglingError {
    /// The requirement string is not a valid semver requirement.
    #[error("invalid mangling scheme requirement '{requirement}': {detail}")]
    InvalidRequirement {
        /// The requirement as written.
        requirement: String,
        /// Parser message.
        detail: String,
    },

    /// The supported scheme does not satisfy the requirement.
    #[error("mangling scheme {supported} does not satisfy requirement '{requirement}'")]
    Incompatible {
        /// The requirement as written.
        requirement: String,
        /// The scheme version implemented here.
        supported: String,
    },
}
