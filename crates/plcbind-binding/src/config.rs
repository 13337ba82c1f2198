//! Declarative binding configuration.
//!
//! A binding entry pairs one located variable with a physical pin. The
//! variable is written either as an address literal (`address = "%IX0.0"`)
//! or, in the legacy form, as the compiler's variable name
//! (`variable = "__IX0_0"`).

use plcbind_address::{decode, parse_canonical, Address, IoMode};
use plcbind_targets::{PinDescriptor, PinTableRegistry};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Optional sensor published alongside a binding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct SensorMetadata {
    /// Component ID of the sensor.
    pub id: String,
    /// Friendly name shown in the frontend.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// One user- or default-supplied binding declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct BindingEntry {
    /// Address literal, e.g. `%IX0.0`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    /// Legacy form: canonical variable name, e.g. `__IX0_0`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variable: Option<String>,
    /// Declared role. Derived from the address class when omitted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<IoMode>,
    /// Physical pin.
    pub pin: PinDescriptor,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sensor: Option<SensorMetadata>,
}

impl BindingEntry {
    /// An entry declared by address literal.
    pub fn literal(address: impl Into<String>, pin: PinDescriptor) -> Self {
        Self {
            address: Some(address.into()),
            variable: None,
            mode: None,
            pin,
            sensor: None,
        }
    }

    /// An entry declared by canonical variable name.
    pub fn legacy(variable: impl Into<String>, pin: PinDescriptor) -> Self {
        Self {
            address: None,
            variable: Some(variable.into()),
            mode: None,
            pin,
            sensor: None,
        }
    }

    /// Set an explicit role.
    pub fn with_mode(mut self, mode: IoMode) -> Self {
        self.mode = Some(mode);
        self
    }

    /// Attach sensor metadata.
    pub fn with_sensor(mut self, sensor: SensorMetadata) -> Self {
        self.sensor = Some(sensor);
        self
    }

    /// The address or variable text as written, for diagnostics.
    pub fn label(&self) -> &str {
        self.address
            .as_deref()
            .or(self.variable.as_deref())
            .unwrap_or("<unnamed>")
    }

    /// Decode whichever address form the entry uses.
    ///
    /// `index` is the entry's position and only appears in error messages.
    pub fn decode_address(&self, index: usize) -> Result<Address, ConfigError> {
        match (&self.address, &self.variable) {
            (Some(literal), None) => Ok(decode(literal)?),
            (None, Some(variable)) => Ok(parse_canonical(variable)?),
            (Some(_), Some(_)) => Err(ConfigError::InvalidEntry {
                index,
                detail: "specify either 'address' or 'variable', not both".into(),
            }),
            (None, None) => Err(ConfigError::InvalidEntry {
                index,
                detail: "missing 'address' (or legacy 'variable')".into(),
            }),
        }
    }
}

/// Materialize a platform's default pin table as binding entries.
///
/// Entries come out in mode order, then identifier order, with an explicit
/// role and pin flags that satisfy it.
pub fn default_entries(registry: &PinTableRegistry, platform: &str) -> Vec<BindingEntry> {
    registry
        .default_bindings_for(platform)
        .into_iter()
        .flat_map(|(mode, pins)| {
            pins.into_iter().map(move |(id, pin)| {
                BindingEntry::literal(id.address().render(), pin).with_mode(mode)
            })
        })
        .collect()
}

/// The entries that apply to a build.
///
/// Explicit bindings replace the platform defaults entirely, even when the
/// explicit list is empty.
pub fn effective_entries(
    explicit: Option<&[BindingEntry]>,
    registry: &PinTableRegistry,
    platform: &str,
) -> Vec<BindingEntry> {
    match explicit {
        Some(entries) => entries.to_vec(),
        None => {
            let defaults = default_entries(registry, platform);
            tracing::info!(platform, count = defaults.len(), "no bindings configured; using platform defaults");
            defaults
        }
    }
}
