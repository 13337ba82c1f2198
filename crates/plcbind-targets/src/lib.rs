//! Default pin tables for plcbind target platforms.
//!
//! Each supported platform has a hand-curated table assigning located
//! variables to board pins. Tables are held in a [`PinTableRegistry`] value
//! rather than global state; projects can add their own tables as
//! `pins/*.pins.toml` files.

pub mod error;
pub mod parse;
pub mod pin;
pub mod platform;
pub mod registry;

pub use error::TargetError;
pub use pin::PinDescriptor;
pub use platform::{DefaultBindings, PinTable};
pub use registry::PinTableRegistry;
