//! Immutable-by-convention registry of platform pin tables.
//!
//! The registry is an ordinary value: callers build one (usually from
//! [`PinTableRegistry::builtin`]), optionally layer project tables on top,
//! and pass it by reference. Nothing here is process-global, so tests can
//! supply synthetic tables freely.

use std::collections::BTreeMap;
use std::path::Path;

use plcbind_address::IoMode;

use crate::error::Result;
use crate::parse::{discover_pin_tables, load_pin_table_toml};
use crate::platform::{DefaultBindings, PinTable};

/// Pin tables keyed by platform name.
#[derive(Debug, Clone, Default)]
pub struct PinTableRegistry {
    tables: BTreeMap<String, PinTable>,
}

impl PinTableRegistry {
    /// A registry with no tables.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding every built-in table.
    pub fn builtin() -> Self {
        PinTable::builtin()
            .into_iter()
            .fold(Self::new(), |registry, table| registry.with_table(table))
    }

    /// Add or replace a table, builder style.
    pub fn with_table(mut self, table: PinTable) -> Self {
        self.insert(table);
        self
    }

    /// Add or replace a table, returning the one it replaced.
    pub fn insert(&mut self, table: PinTable) -> Option<PinTable> {
        self.tables.insert(table.platform.clone(), table)
    }

    /// Look up a platform's table.
    pub fn get(&self, platform: &str) -> Option<&PinTable> {
        self.tables.get(platform)
    }

    /// Registered platform names, sorted.
    pub fn platforms(&self) -> impl Iterator<Item = &str> {
        self.tables.keys().map(String::as_str)
    }

    /// Default bindings for a platform.
    ///
    /// Unknown platforms yield empty maps for all four modes; missing
    /// defaults are not an error.
    pub fn default_bindings_for(&self, platform: &str) -> DefaultBindings {
        match self.tables.get(platform) {
            Some(table) => table.bindings(),
            None => {
                tracing::debug!(platform, "no pin table registered; using empty defaults");
                IoMode::ALL
                    .into_iter()
                    .map(|mode| (mode, BTreeMap::new()))
                    .collect()
            }
        }
    }

    /// Load every `*.pins.toml` file under `<project_dir>/pins/`.
    ///
    /// Project tables replace built-in tables of the same platform name.
    /// Returns the number of tables loaded.
    pub fn load_project_tables(&mut self, project_dir: &Path) -> Result<usize> {
        let files = discover_pin_tables(project_dir)?;
        for (name, path) in &files {
            let table = load_pin_table_toml(path)?;
            if self.insert(table).is_some() {
                tracing::info!(table = %name, path = %path.display(), "project pin table overrides built-in");
            } else {
                tracing::debug!(table = %name, path = %path.display(), "loaded project pin table");
            }
        }
        Ok(files.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::{ESP32, ESP8266};

    #[test]
    fn builtin_lists_all_platforms() {
        let registry = PinTableRegistry::builtin();
        let names: Vec<_> = registry.platforms().collect();
        assert_eq!(names, vec!["bk72xx", "esp32", "esp8266", "rp2040", "rtl87xx"]);
    }

    #[test]
    fn defaults_for_esp8266() {
        let registry = PinTableRegistry::builtin();
        let defaults = registry.default_bindings_for(ESP8266);
        let pin = &defaults[&IoMode::DigitalIn]["__IX0_0"];
        assert_eq!(pin.number, "D4");
        assert_eq!(defaults[&IoMode::AnalogIn].len(), 1);
    }

    #[test]
    fn unknown_platform_has_empty_defaults() {
        let registry = PinTableRegistry::builtin();
        let defaults = registry.default_bindings_for("avr");
        assert_eq!(defaults.len(), 4);
        assert!(defaults.values().all(|m| m.is_empty()));
    }

    #[test]
    fn synthetic_table_injection() {
        let mut table = PinTable::empty("test-board");
        let id = plcbind_address::decode("%IX3.3").unwrap().canonical();
        table.digital_in.insert(id, "GPIO9".into());
        let registry = PinTableRegistry::new().with_table(table);

        let defaults = registry.default_bindings_for("test-board");
        assert_eq!(defaults[&IoMode::DigitalIn]["__IX3_3"].number, "GPIO9");
        assert!(registry.get(ESP8266).is_none());
    }

    #[test]
    fn insert_replaces_existing() {
        let mut registry = PinTableRegistry::builtin();
        let replaced = registry.insert(PinTable::empty(ESP32));
        assert!(replaced.is_some());
        assert!(registry.get(ESP32).unwrap().description.is_none());
    }

    #[test]
    fn load_project_tables_overrides_builtin() {
        let dir = tempfile::tempdir().unwrap();
        let pins_dir = dir.path().join("pins");
        std::fs::create_dir_all(&pins_dir).unwrap();
        std::fs::write(
            pins_dir.join("esp8266.pins.toml"),
            "platform = \"esp8266\"\n\n[digital-in]\n__IX0_0 = \"D3\"\n",
        )
        .unwrap();

        let mut registry = PinTableRegistry::builtin();
        assert_eq!(registry.load_project_tables(dir.path()).unwrap(), 1);
        let table = registry.get(ESP8266).unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.digital_in.get("__IX0_0").map(String::as_str), Some("D3"));
    }
}
