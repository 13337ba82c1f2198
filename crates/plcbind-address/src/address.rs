//! Structured located-variable addresses.
//!
//! An [`Address`] is the decoded form of a literal such as `%IX0.0` or
//! `%QW3`. Values are range-checked on construction and never change
//! afterwards.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::decode::decode;
use crate::error::DecodeError;

/// Highest major index accepted for bit addresses.
pub const MAX_BIT_MAJOR: u32 = 1023;

/// Highest bit index within a byte.
pub const MAX_BIT_MINOR: u32 = 7;

/// Highest major index accepted for byte/word/double/long addresses.
pub const MAX_WORD_MAJOR: u32 = 31;

/// The address space an address refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AddressLocation {
    /// `I`: process inputs.
    Input,
    /// `Q`: process outputs.
    Output,
    /// `M`: internal memory.
    Memory,
}

impl AddressLocation {
    /// All locations, in letter order `I`, `Q`, `M`.
    pub const ALL: [AddressLocation; 3] = [Self::Input, Self::Output, Self::Memory];

    /// The single-letter prefix used in literals.
    pub fn letter(self) -> char {
        match self {
            Self::Input => 'I',
            Self::Output => 'Q',
            Self::Memory => 'M',
        }
    }

    /// Parse a location prefix letter.
    pub fn from_letter(c: char) -> Option<Self> {
        match c {
            'I' => Some(Self::Input),
            'Q' => Some(Self::Output),
            'M' => Some(Self::Memory),
            _ => None,
        }
    }
}

impl fmt::Display for AddressLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Input => write!(f, "input"),
            Self::Output => write!(f, "output"),
            Self::Memory => write!(f, "memory"),
        }
    }
}

/// The width of the addressed unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AddressSize {
    /// `X`: 1 bit.
    Bit,
    /// `B`: 8 bits.
    Byte,
    /// `W`: 16 bits.
    Word,
    /// `D`: 32 bits.
    DoubleWord,
    /// `L`: 64 bits.
    LongWord,
}

impl AddressSize {
    /// All sizes, narrowest first.
    pub const ALL: [AddressSize; 5] = [
        Self::Bit,
        Self::Byte,
        Self::Word,
        Self::DoubleWord,
        Self::LongWord,
    ];

    /// The single-letter size prefix used in literals.
    pub fn letter(self) -> char {
        match self {
            Self::Bit => 'X',
            Self::Byte => 'B',
            Self::Word => 'W',
            Self::DoubleWord => 'D',
            Self::LongWord => 'L',
        }
    }

    /// Parse a size prefix letter of the word form.
    ///
    /// `X` is absent: it only appears in the bit form.
    pub fn from_word_letter(c: char) -> Option<Self> {
        match c {
            'B' => Some(Self::Byte),
            'W' => Some(Self::Word),
            'D' => Some(Self::DoubleWord),
            'L' => Some(Self::LongWord),
            _ => None,
        }
    }

    /// Width of the unit in bits.
    pub fn bits(self) -> u32 {
        match self {
            Self::Bit => 1,
            Self::Byte => 8,
            Self::Word => 16,
            Self::DoubleWord => 32,
            Self::LongWord => 64,
        }
    }

    /// Inclusive ceiling for the major index of this size.
    pub fn max_major(self) -> u32 {
        match self {
            Self::Bit => MAX_BIT_MAJOR,
            _ => MAX_WORD_MAJOR,
        }
    }
}

impl fmt::Display for AddressSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bit => write!(f, "bit"),
            Self::Byte => write!(f, "byte"),
            Self::Word => write!(f, "word"),
            Self::DoubleWord => write!(f, "double word"),
            Self::LongWord => write!(f, "long word"),
        }
    }
}

/// A decoded located-variable address.
///
/// `minor` is `Some` exactly when `size` is [`AddressSize::Bit`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Address {
    location: AddressLocation,
    size: AddressSize,
    major: u32,
    minor: Option<u32>,
}

impl Address {
    /// Construct a bit address, or `None` if an index is out of range.
    pub fn bit(location: AddressLocation, major: u32, minor: u32) -> Option<Self> {
        if major > MAX_BIT_MAJOR || minor > MAX_BIT_MINOR {
            return None;
        }
        Some(Self {
            location,
            size: AddressSize::Bit,
            major,
            minor: Some(minor),
        })
    }

    /// Construct a byte/word/double/long address.
    ///
    /// Returns `None` for [`AddressSize::Bit`] (use [`Address::bit`]) or when
    /// `major` is out of range.
    pub fn word(location: AddressLocation, size: AddressSize, major: u32) -> Option<Self> {
        if size == AddressSize::Bit || major > MAX_WORD_MAJOR {
            return None;
        }
        Some(Self {
            location,
            size,
            major,
            minor: None,
        })
    }

    /// Address space.
    pub fn location(&self) -> AddressLocation {
        self.location
    }

    /// Unit width.
    pub fn size(&self) -> AddressSize {
        self.size
    }

    /// Major index (byte index for bit addresses).
    pub fn major(&self) -> u32 {
        self.major
    }

    /// Bit index within the byte, for bit addresses only.
    pub fn minor(&self) -> Option<u32> {
        self.minor
    }

    /// Reconstruct the literal form, e.g. `%IX0.0` or `%QW3`.
    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "%{}{}{}",
            self.location.letter(),
            self.size.letter(),
            self.major
        )?;
        if let Some(minor) = self.minor {
            write!(f, ".{minor}")?;
        }
        Ok(())
    }
}

impl FromStr for Address {
    type Err = DecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        decode(s)
    }
}

impl TryFrom<String> for Address {
    type Error = DecodeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        decode(&value)
    }
}

impl From<Address> for String {
    fn from(value: Address) -> Self {
        value.to_string()
    }
}
