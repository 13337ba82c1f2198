//! Configuration validator.
//!
//! Turns declared [`BindingEntry`] values into a [`BindingTable`] keyed by
//! canonical identifier. Each entry is decoded, checked against its role,
//! and its pin flags are checked against the role's requirements. The first
//! failure aborts validation of the whole list.

use std::collections::BTreeMap;

use plcbind_address::{io_mode_of, validate_for_mode, Address, CanonicalIdentifier, IoMode};
use plcbind_targets::PinDescriptor;
use serde::Serialize;

use crate::config::{BindingEntry, SensorMetadata};
use crate::error::ConfigError;

/// Maximum number of binding entries per component.
pub const MAX_BINDINGS: usize = 32;

/// A validated binding declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PinBindingConfig {
    pub address: Address,
    pub io_mode: IoMode,
    pub pin: PinDescriptor,
    pub sensor: Option<SensorMetadata>,
}

/// Validated bindings keyed by canonical identifier.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BindingTable {
    entries: BTreeMap<CanonicalIdentifier, PinBindingConfig>,
}

impl BindingTable {
    /// Look up a binding by identifier text.
    pub fn get(&self, identifier: &str) -> Option<&PinBindingConfig> {
        self.entries.get(identifier)
    }

    pub fn contains(&self, identifier: &str) -> bool {
        self.entries.contains_key(identifier)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Bindings in identifier order.
    pub fn iter(&self) -> impl Iterator<Item = (&CanonicalIdentifier, &PinBindingConfig)> {
        self.entries.iter()
    }
}

/// Check a pin's capability flags against a role.
///
/// Inputs need `input`, outputs need `output`, and `analog` must be set for
/// analog roles and clear for digital ones.
pub fn check_pin_capabilities(
    addr: &Address,
    mode: IoMode,
    pin: &PinDescriptor,
) -> Result<(), ConfigError> {
    let requirement = if mode.is_input() && !pin.input {
        Some("must be configured as an input")
    } else if mode.is_output() && !pin.output {
        Some("must be configured as an output")
    } else if mode.is_analog() && !pin.analog {
        Some("must be configured as analog")
    } else if !mode.is_analog() && pin.analog {
        Some("must not be configured as analog")
    } else {
        None
    };

    match requirement {
        Some(requirement) => Err(ConfigError::PinCapabilityMismatch {
            address: addr.render(),
            mode,
            pin: pin.number.clone(),
            requirement,
        }),
        None => Ok(()),
    }
}

/// Validate one entry.
pub fn validate_entry(index: usize, entry: &BindingEntry) -> Result<PinBindingConfig, ConfigError> {
    if entry.pin.number.trim().is_empty() {
        return Err(ConfigError::InvalidEntry {
            index,
            detail: format!("'{}' has an empty pin number", entry.label()),
        });
    }

    let address = entry.decode_address(index)?;
    let io_mode = match entry.mode {
        Some(mode) => {
            validate_for_mode(&address, mode)?;
            mode
        }
        None => io_mode_of(&address)?,
    };
    check_pin_capabilities(&address, io_mode, &entry.pin)?;

    Ok(PinBindingConfig {
        address,
        io_mode,
        pin: entry.pin.clone(),
        sensor: entry.sensor.clone(),
    })
}

/// Validate a full configuration list.
pub fn validate_entries(entries: &[BindingEntry]) -> Result<BindingTable, ConfigError> {
    if entries.len() > MAX_BINDINGS {
        return Err(ConfigError::TooManyBindings {
            count: entries.len(),
            max: MAX_BINDINGS,
        });
    }

    let mut table = BindingTable::default();
    let mut labels: BTreeMap<CanonicalIdentifier, &str> = BTreeMap::new();
    for (index, entry) in entries.iter().enumerate() {
        let binding = validate_entry(index, entry)?;
        let identifier = binding.address.canonical();
        if let Some(first) = labels.get(&identifier) {
            return Err(ConfigError::DuplicateAddress {
                identifier: identifier.to_string(),
                first: (*first).to_string(),
                second: entry.label().to_string(),
            });
        }
        tracing::debug!(
            identifier = %identifier,
            mode = %binding.io_mode,
            pin = %binding.pin,
            "validated binding"
        );
        labels.insert(identifier.clone(), entry.label());
        table.entries.insert(identifier, binding);
    }
    Ok(table)
}
