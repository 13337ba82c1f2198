//! Default pin tables per target platform.
//!
//! A pin table maps the canonical identifier of each located variable to a
//! board pin, grouped by I/O mode. Tables only supply defaults: a project
//! that declares its own bindings never consults them.

use std::collections::BTreeMap;

use plcbind_address::{CanonicalIdentifier, IoMode};
use serde::{Deserialize, Serialize};

use crate::pin::PinDescriptor;

/// Platform identifier for ESP8266 boards.
pub const ESP8266: &str = "esp8266";
/// Platform identifier for ESP32 boards.
pub const ESP32: &str = "esp32";
/// Platform identifier for RP2040 boards.
pub const RP2040: &str = "rp2040";
/// Platform identifier for Beken BK72xx boards.
pub const BK72XX: &str = "bk72xx";
/// Platform identifier for Realtek RTL87xx boards.
pub const RTL87XX: &str = "rtl87xx";

/// Default bindings grouped by mode: `IoMode -> (identifier -> pin)`.
pub type DefaultBindings = BTreeMap<IoMode, BTreeMap<CanonicalIdentifier, PinDescriptor>>;

/// The default pin assignment of one platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct PinTable {
    /// Platform name (e.g., "esp8266").
    pub platform: String,
    /// Short human-readable description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// `%IX` bit inputs.
    #[serde(default)]
    pub digital_in: BTreeMap<CanonicalIdentifier, String>,
    /// `%QX` bit outputs.
    #[serde(default)]
    pub digital_out: BTreeMap<CanonicalIdentifier, String>,
    /// `%IW` word inputs (ADC).
    #[serde(default)]
    pub analog_in: BTreeMap<CanonicalIdentifier, String>,
    /// `%QW` word outputs (PWM).
    #[serde(default)]
    pub analog_out: BTreeMap<CanonicalIdentifier, String>,
}

impl PinTable {
    /// An empty table for `platform`.
    pub fn empty(platform: impl Into<String>) -> Self {
        Self {
            platform: platform.into(),
            description: None,
            digital_in: BTreeMap::new(),
            digital_out: BTreeMap::new(),
            analog_in: BTreeMap::new(),
            analog_out: BTreeMap::new(),
        }
    }

    /// Pin names for one mode.
    pub fn pins(&self, mode: IoMode) -> &BTreeMap<CanonicalIdentifier, String> {
        match mode {
            IoMode::DigitalIn => &self.digital_in,
            IoMode::DigitalOut => &self.digital_out,
            IoMode::AnalogIn => &self.analog_in,
            IoMode::AnalogOut => &self.analog_out,
        }
    }

    /// Mutable pin names for one mode.
    pub fn pins_mut(&mut self, mode: IoMode) -> &mut BTreeMap<CanonicalIdentifier, String> {
        match mode {
            IoMode::DigitalIn => &mut self.digital_in,
            IoMode::DigitalOut => &mut self.digital_out,
            IoMode::AnalogIn => &mut self.analog_in,
            IoMode::AnalogOut => &mut self.analog_out,
        }
    }

    /// Pin descriptor for an identifier under a given mode.
    pub fn descriptor(&self, mode: IoMode, identifier: &str) -> Option<PinDescriptor> {
        self.pins(mode)
            .get(identifier)
            .map(|number| PinDescriptor::for_mode(number.clone(), mode))
    }

    /// All four modes, each mapping identifiers to full pin descriptors.
    ///
    /// Every mode is present in the result, possibly with an empty map.
    pub fn bindings(&self) -> DefaultBindings {
        IoMode::ALL
            .into_iter()
            .map(|mode| {
                let pins = self
                    .pins(mode)
                    .iter()
                    .map(|(id, number)| (id.clone(), PinDescriptor::for_mode(number.clone(), mode)))
                    .collect();
                (mode, pins)
            })
            .collect()
    }

    /// Total number of assigned pins.
    pub fn len(&self) -> usize {
        IoMode::ALL.iter().map(|&m| self.pins(m).len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// ESP8266 (NodeMCU / Wemos D1 style pin names).
    pub fn esp8266() -> Self {
        let mut table = Self::empty(ESP8266);
        table.description = Some("ESP8266 (NodeMCU pinout)".into());
        table.assign(IoMode::DigitalIn, &[("%IX0.0", "D4"), ("%IX0.1", "D5"), ("%IX0.2", "D6"), ("%IX0.3", "D7")]);
        table.assign(IoMode::DigitalOut, &[("%QX0.0", "D0"), ("%QX0.1", "D1"), ("%QX0.2", "D2"), ("%QX0.3", "D3")]);
        table.assign(IoMode::AnalogIn, &[("%IW0", "A0")]);
        table.assign(IoMode::AnalogOut, &[("%QW0", "D8")]);
        table
    }

    /// ESP32 (no curated defaults yet).
    pub fn esp32() -> Self {
        let mut table = Self::empty(ESP32);
        table.description = Some("ESP32".into());
        table
    }

    /// RP2040 (no curated defaults yet).
    pub fn rp2040() -> Self {
        let mut table = Self::empty(RP2040);
        table.description = Some("Raspberry Pi RP2040".into());
        table
    }

    /// BK72xx (no curated defaults yet).
    pub fn bk72xx() -> Self {
        let mut table = Self::empty(BK72XX);
        table.description = Some("Beken BK72xx".into());
        table
    }

    /// RTL87xx (no curated defaults yet).
    pub fn rtl87xx() -> Self {
        let mut table = Self::empty(RTL87XX);
        table.description = Some("Realtek RTL87xx".into());
        table
    }

    /// Every table shipped with plcbind.
    pub fn builtin() -> Vec<Self> {
        vec![
            Self::esp8266(),
            Self::esp32(),
            Self::rp2040(),
            Self::bk72xx(),
            Self::rtl87xx(),
        ]
    }

    // Literals here are static and known to decode.
    fn assign(&mut self, mode: IoMode, entries: &[(&str, &str)]) {
        for (literal, number) in entries {
            if let Ok(addr) = plcbind_address::decode(literal) {
                self.pins_mut(mode).insert(addr.canonical(), (*number).to_string());
            }
        }
    }
}
