//! `plcbind platform`: pin table listing and description.

use std::fmt::Write as _;

use anyhow::{bail, Result};
use plcbind_address::IoMode;
use plcbind_targets::parse::{generate_template, pin_table_to_toml};
use plcbind_targets::{PinTable, PinTableRegistry};

/// List every platform in the registry.
pub fn list(registry: &PinTableRegistry) -> Result<()> {
    println!("Platforms:");
    println!();
    for name in registry.platforms() {
        let Some(table) = registry.get(name) else { continue };
        let description = table.description.as_deref().unwrap_or("");
        println!("  {name:<12} {:>3} pins  {description}", table.len());
    }
    println!();
    println!("Use 'plcbind platform describe <name>' for details.");
    Ok(())
}

/// Describe one platform's default pins.
pub fn describe(registry: &PinTableRegistry, name: &str, format: Option<&str>) -> Result<()> {
    let Some(table) = registry.get(name) else {
        bail!("unknown platform: '{name}'. Use 'plcbind platform list' to see available platforms.");
    };
    match format {
        Some("toml") => print!("{}", pin_table_to_toml(table)?),
        None | Some("human") => print!("{}", render(table)?),
        Some(other) => bail!("unknown format '{other}': expected human or toml"),
    }
    Ok(())
}

/// Print a starter `.pins.toml`.
pub fn template(name: &str) -> Result<()> {
    print!("{}", generate_template(name)?);
    Ok(())
}

fn render(table: &PinTable) -> Result<String> {
    let mut out = String::new();
    writeln!(out, "=== Platform: {} ===", table.platform)?;
    if let Some(description) = &table.description {
        writeln!(out, "{description}")?;
    }
    if table.is_empty() {
        writeln!(out)?;
        writeln!(out, "No default pins; declare [[bindings]] in plcbind.toml.")?;
        return Ok(out);
    }
    let bindings = table.bindings();
    for mode in IoMode::ALL {
        let Some(pins) = bindings.get(&mode).filter(|pins| !pins.is_empty()) else {
            continue;
        };
        writeln!(out)?;
        writeln!(out, "--- {mode} ---")?;
        for (identifier, pin) in pins {
            writeln!(out, "  {:<10} {pin}", identifier.address().to_string())?;
        }
    }
    Ok(out)
}
