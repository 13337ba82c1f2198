//! Registration shapes handed to code generation.
//!
//! Each binding record becomes exactly one registration call on the PLC
//! component. The mapping is an exhaustive match on [`IoMode`].

use plcbind_address::{CanonicalIdentifier, IoMode};
use plcbind_targets::PinDescriptor;
use serde::Serialize;

use crate::config::SensorMetadata;
use crate::resolve::BindingRecord;

/// One component registration call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum Registration {
    DigitalInput {
        pin: PinDescriptor,
        variable: CanonicalIdentifier,
        sensor: Option<SensorMetadata>,
    },
    DigitalOutput {
        pin: PinDescriptor,
        variable: CanonicalIdentifier,
        sensor: Option<SensorMetadata>,
    },
    AnalogInput {
        pin: PinDescriptor,
        variable: CanonicalIdentifier,
        sensor: Option<SensorMetadata>,
    },
    AnalogOutput {
        pin: PinDescriptor,
        variable: CanonicalIdentifier,
        sensor: Option<SensorMetadata>,
    },
}

impl Registration {
    /// Name of the component method that performs this registration.
    pub fn method(&self) -> &'static str {
        match self {
            Self::DigitalInput { .. } => "add_digital_input_pin",
            Self::DigitalOutput { .. } => "add_digital_output_pin",
            Self::AnalogInput { .. } => "add_analog_input_pin",
            Self::AnalogOutput { .. } => "add_analog_output_pin",
        }
    }

    pub fn pin(&self) -> &PinDescriptor {
        match self {
            Self::DigitalInput { pin, .. }
            | Self::DigitalOutput { pin, .. }
            | Self::AnalogInput { pin, .. }
            | Self::AnalogOutput { pin, .. } => pin,
        }
    }

    pub fn variable(&self) -> &CanonicalIdentifier {
        match self {
            Self::DigitalInput { variable, .. }
            | Self::DigitalOutput { variable, .. }
            | Self::AnalogInput { variable, .. }
            | Self::AnalogOutput { variable, .. } => variable,
        }
    }

    pub fn sensor(&self) -> Option<&SensorMetadata> {
        match self {
            Self::DigitalInput { sensor, .. }
            | Self::DigitalOutput { sensor, .. }
            | Self::AnalogInput { sensor, .. }
            | Self::AnalogOutput { sensor, .. } => sensor.as_ref(),
        }
    }
}

impl From<&BindingRecord> for Registration {
    fn from(record: &BindingRecord) -> Self {
        let pin = record.pin.clone();
        let variable = record.address.canonical();
        let sensor = record.sensor.clone();
        match record.io_mode {
            IoMode::DigitalIn => Self::DigitalInput { pin, variable, sensor },
            IoMode::DigitalOut => Self::DigitalOutput { pin, variable, sensor },
            IoMode::AnalogIn => Self::AnalogInput { pin, variable, sensor },
            IoMode::AnalogOut => Self::AnalogOutput { pin, variable, sensor },
        }
    }
}

impl BindingRecord {
    /// The registration call for this record.
    pub fn registration(&self) -> Registration {
        Registration::from(self)
    }
}
