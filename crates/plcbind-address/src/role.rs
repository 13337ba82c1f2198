//! I/O roles and address-class validation.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::address::{Address, AddressLocation, AddressSize};
use crate::error::ValidationError;

/// Direction and signal kind of a pin binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IoMode {
    /// `(Input, Bit)`.
    DigitalIn,
    /// `(Output, Bit)`.
    DigitalOut,
    /// `(Input, Word)`.
    AnalogIn,
    /// `(Output, Word)`.
    AnalogOut,
}

impl IoMode {
    /// All modes in table order.
    pub const ALL: [IoMode; 4] = [
        Self::DigitalIn,
        Self::DigitalOut,
        Self::AnalogIn,
        Self::AnalogOut,
    ];

    /// The mode for an address class, if the class can be bound to a pin at all.
    pub fn from_class(location: AddressLocation, size: AddressSize) -> Option<Self> {
        match (location, size) {
            (AddressLocation::Input, AddressSize::Bit) => Some(Self::DigitalIn),
            (AddressLocation::Output, AddressSize::Bit) => Some(Self::DigitalOut),
            (AddressLocation::Input, AddressSize::Word) => Some(Self::AnalogIn),
            (AddressLocation::Output, AddressSize::Word) => Some(Self::AnalogOut),
            _ => None,
        }
    }

    /// Location an address must have to serve this role.
    pub fn required_location(self) -> AddressLocation {
        match self {
            Self::DigitalIn | Self::AnalogIn => AddressLocation::Input,
            Self::DigitalOut | Self::AnalogOut => AddressLocation::Output,
        }
    }

    /// Size an address must have to serve this role.
    pub fn required_size(self) -> AddressSize {
        match self {
            Self::DigitalIn | Self::DigitalOut => AddressSize::Bit,
            Self::AnalogIn | Self::AnalogOut => AddressSize::Word,
        }
    }

    pub fn is_input(self) -> bool {
        matches!(self, Self::DigitalIn | Self::AnalogIn)
    }

    pub fn is_output(self) -> bool {
        matches!(self, Self::DigitalOut | Self::AnalogOut)
    }

    pub fn is_analog(self) -> bool {
        matches!(self, Self::AnalogIn | Self::AnalogOut)
    }

    /// The kebab-case name used in configuration files.
    pub fn name(self) -> &'static str {
        match self {
            Self::DigitalIn => "digital-in",
            Self::DigitalOut => "digital-out",
            Self::AnalogIn => "analog-in",
            Self::AnalogOut => "analog-out",
        }
    }
}

impl fmt::Display for IoMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for IoMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|m| m.name() == s)
            .ok_or_else(|| format!("unknown I/O mode '{s}' (expected digital-in, digital-out, analog-in or analog-out)"))
    }
}

/// Check that an address has the location and size a call site requires.
///
/// Location is checked first, so `%MW5` against `(Input, Word)` reports a
/// location mismatch.
pub fn validate_role(
    addr: &Address,
    expected_location: AddressLocation,
    expected_size: AddressSize,
) -> Result<(), ValidationError> {
    if addr.location() != expected_location {
        return Err(ValidationError::LocationMismatch {
            address: addr.render(),
            expected: expected_location,
            found: addr.location(),
        });
    }
    if addr.size() != expected_size {
        return Err(ValidationError::SizeMismatch {
            address: addr.render(),
            expected: expected_size,
            found: addr.size(),
        });
    }
    Ok(())
}

/// [`validate_role`] against the class required by `mode`.
pub fn validate_for_mode(addr: &Address, mode: IoMode) -> Result<(), ValidationError> {
    validate_role(addr, mode.required_location(), mode.required_size())
}

/// Derive the I/O mode of an address, failing for classes with no mode.
pub fn io_mode_of(addr: &Address) -> Result<IoMode, ValidationError> {
    IoMode::from_class(addr.location(), addr.size()).ok_or_else(|| ValidationError::NoIoMode {
        address: addr.render(),
        location: addr.location(),
        size: addr.size(),
    })
}

impl Address {
    /// The I/O mode implied by this address's class, if any.
    pub fn io_mode(&self) -> Option<IoMode> {
        IoMode::from_class(self.location(), self.size())
    }
}
