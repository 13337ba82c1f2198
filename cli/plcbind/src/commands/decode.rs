//! `plcbind decode`: show what a located-variable literal means.

use std::fmt::Write as _;

use anyhow::Result;
use plcbind_address::decode;

/// Decode `literal` and print its fields.
pub fn run(literal: &str) -> Result<()> {
    print!("{}", describe(literal)?);
    Ok(())
}

fn describe(literal: &str) -> Result<String> {
    let address = decode(literal)?;
    let mut out = String::new();
    writeln!(out, "Address:    {address}")?;
    writeln!(out, "Location:   {}", address.location())?;
    writeln!(out, "Size:       {}", address.size())?;
    writeln!(out, "Major:      {}", address.major())?;
    if let Some(minor) = address.minor() {
        writeln!(out, "Minor:      {minor}")?;
    }
    writeln!(out, "Identifier: {}", address.canonical())?;
    match address.io_mode() {
        Some(mode) => writeln!(out, "I/O mode:   {mode}")?,
        None => writeln!(out, "I/O mode:   (none)")?,
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bit_input_lists_minor_and_mode() {
        let text = describe("%IX0.3").unwrap();
        assert!(text.contains("Minor:      3"));
        assert!(text.contains("Identifier: __IX0_3"));
        assert!(text.contains("digital-in"));
    }

    #[test]
    fn memory_word_has_no_mode() {
        let text = describe("%MW5").unwrap();
        assert!(!text.contains("Minor"));
        assert!(text.contains("(none)"));
    }

    #[test]
    fn malformed_literal_fails() {
        let err = describe("%IX0").unwrap_err();
        assert!(err.to_string().contains("%IX0"));
    }
}
