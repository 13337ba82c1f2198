//! Physical pin descriptors.

use std::fmt;

use plcbind_address::IoMode;
use serde::{Deserialize, Serialize};

/// A physical pin and the capabilities it is configured with.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct PinDescriptor {
    /// Board-level pin name or GPIO number (e.g. "D4", "A0", "GPIO5").
    pub number: String,
    /// Pin is configured as an input.
    #[serde(default)]
    pub input: bool,
    /// Pin is configured as an output.
    #[serde(default)]
    pub output: bool,
    /// Pin is used through the ADC or PWM peripheral.
    #[serde(default)]
    pub analog: bool,
    /// Logic level is inverted.
    #[serde(default)]
    pub inverted: bool,
}

impl PinDescriptor {
    /// A descriptor whose capability flags are exactly those `mode` needs.
    pub fn for_mode(number: impl Into<String>, mode: IoMode) -> Self {
        Self {
            number: number.into(),
            input: mode.is_input(),
            output: mode.is_output(),
            analog: mode.is_analog(),
            inverted: false,
        }
    }

    /// Short flag summary such as `"in"`, `"out analog"`.
    pub fn flags(&self) -> String {
        let mut flags = Vec::new();
        if self.input {
            flags.push("in");
        }
        if self.output {
            flags.push("out");
        }
        if self.analog {
            flags.push("analog");
        }
        if self.inverted {
            flags.push("inverted");
        }
        if flags.is_empty() {
            "none".to_string()
        } else {
            flags.join(" ")
        }
    }
}

impl fmt::Display for PinDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}]", self.number, self.flags())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn for_mode_sets_required_flags() {
        let pin = PinDescriptor::for_mode("A0", IoMode::AnalogIn);
        assert!(pin.input && pin.analog && !pin.output);
        let pin = PinDescriptor::for_mode("D8", IoMode::AnalogOut);
        assert!(pin.output && pin.analog && !pin.input);
        let pin = PinDescriptor::for_mode("D0", IoMode::DigitalOut);
        assert!(pin.output && !pin.analog);
    }

    #[test]
    fn display_lists_flags() {
        let pin = PinDescriptor::for_mode("D4", IoMode::DigitalIn);
        assert_eq!(pin.to_string(), "D4 [in]");
        let bare = PinDescriptor {
            number: "GPIO2".into(),
            input: false,
            output: false,
            analog: false,
            inverted: false,
        };
        assert_eq!(bare.to_string(), "GPIO2 [none]");
    }

    #[test]
    fn flags_default_to_false() {
        let pin: PinDescriptor = toml::from_str("number = \"D1\"\noutput = true").unwrap();
        assert!(pin.output);
        assert!(!pin.input && !pin.analog && !pin.inverted);
    }
}
