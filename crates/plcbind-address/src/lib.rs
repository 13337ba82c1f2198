//! Located-variable address handling for plcbind.
//!
//! IEC 61131-3 programs refer to process I/O through located variables such
//! as `%IX0.0` (input bit 0 of byte 0) or `%QW3` (output word 3). This crate
//! decodes those literals, mangles them into the identifiers the compiler
//! emits, and checks an address against the class an I/O role requires.
//!
//! ## Modules
//!
//! - [`address`]: `Address`, `AddressLocation`, `AddressSize`
//! - [`decode`]: literal grammar
//! - [`canonical`]: compiler identifier mangling and its version
//! - [`role`]: `IoMode` and role validation
//! - [`error`]: decode and validation errors

pub mod address;
pub mod canonical;
pub mod decode;
pub mod error;
pub mod role;

pub use address::{Address, AddressLocation, AddressSize};
pub use canonical::{canonicalize, check_mangling_scheme, parse_canonical, CanonicalIdentifier, MANGLING_SCHEME};
pub use decode::decode;
pub use error::{DecodeError, ManglingError, ValidationError};
pub use role::{io_mode_of, validate_for_mode, validate_role, IoMode};
