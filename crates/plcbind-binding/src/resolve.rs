//! Binding resolver.
//!
//! Joins the identifiers the compiled logic uses with the validated
//! configuration. Identifiers are looked up verbatim; they already carry
//! the compiler's mangling, which is the same rule the table keys use.

use plcbind_address::{Address, IoMode};
use plcbind_targets::PinDescriptor;
use serde::Serialize;

use crate::config::SensorMetadata;
use crate::error::ResolveError;
use crate::validate::BindingTable;

/// One used address bound to its pin and role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BindingRecord {
    pub address: Address,
    pub io_mode: IoMode,
    pub pin: PinDescriptor,
    pub sensor: Option<SensorMetadata>,
}

/// Resolve every used identifier to a binding record.
///
/// Records follow the order of `used`. The first identifier without a
/// configured binding aborts resolution. Configured bindings that are
/// never used produce no record.
pub fn resolve<S: AsRef<str>>(
    used: &[S],
    configured: &BindingTable,
) -> Result<Vec<BindingRecord>, ResolveError> {
    let mut records = Vec::with_capacity(used.len());
    for identifier in used {
        let identifier = identifier.as_ref();
        let binding = configured
            .get(identifier)
            .ok_or_else(|| ResolveError::UnboundAddress(identifier.to_string()))?;
        records.push(BindingRecord {
            address: binding.address,
            io_mode: binding.io_mode,
            pin: binding.pin.clone(),
            sensor: binding.sensor.clone(),
        });
    }

    for (identifier, _) in configured.iter() {
        if !used.iter().any(|u| u.as_ref() == identifier.as_str()) {
            tracing::warn!(identifier = %identifier, "binding configured but not used by the program");
        }
    }
    tracing::info!(records = records.len(), "resolved bindings");
    Ok(records)
}

/// Every used identifier that has no binding, deduplicated, in first-use order.
///
/// Diagnostic companion to [`resolve`], which stops at the first miss.
pub fn missing_bindings<S: AsRef<str>>(used: &[S], configured: &BindingTable) -> Vec<String> {
    let mut missing: Vec<String> = Vec::new();
    for identifier in used.iter().map(AsRef::as_ref) {
        if !configured.contains(identifier) && !missing.iter().any(|m| m == identifier) {
            missing.push(identifier.to_string());
        }
    }
    missing
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BindingEntry;
    use crate::validate::validate_entries;

    fn table() -> BindingTable {
        validate_entries(&[
            BindingEntry::literal("%IX0.0", PinDescriptor::for_mode("D4", IoMode::DigitalIn)),
            BindingEntry::literal("%QX0.0", PinDescriptor::for_mode("D0", IoMode::DigitalOut)),
            BindingEntry::literal("%IW0", PinDescriptor::for_mode("A0", IoMode::AnalogIn)),
        ])
        .unwrap()
    }

    #[test]
    fn records_follow_used_order() {
        let records = resolve(&["__IW0", "__IX0_0"], &table()).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].io_mode, IoMode::AnalogIn);
        assert_eq!(records[0].pin.number, "A0");
        assert_eq!(records[1].address.to_string(), "%IX0.0");
    }

    #[test]
    fn unused_configuration_is_permitted() {
        let records = resolve::<&str>(&[], &table()).unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn first_unbound_address_fails() {
        let err = resolve(&["__IX0_0", "__IX2_1", "__QX5_5"], &table()).unwrap_err();
        assert_eq!(err, ResolveError::UnboundAddress("__IX2_1".into()));
    }

    #[test]
    fn resolution_is_deterministic() {
        let used = ["__QX0_0", "__IX0_0", "__QX0_0"];
        let a = resolve(&used, &table()).unwrap();
        let b = resolve(&used, &table()).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.len(), 3);
    }

    #[test]
    fn lookup_is_verbatim() {
        // Not re-decoded: a literal is not a canonical identifier.
        let err = resolve(&["%IX0.0"], &table()).unwrap_err();
        assert_eq!(err, ResolveError::UnboundAddress("%IX0.0".into()));
    }

    #[test]
    fn missing_bindings_lists_all() {
        let used = ["__IX2_1", "__IX0_0", "__QW7", "__IX2_1"];
        assert_eq!(missing_bindings(&used, &table()), vec!["__IX2_1", "__QW7"]);
        assert!(missing_bindings(&["__IX0_0"], &table()).is_empty());
    }

    #[test]
    fn record_serializes_literal_address() {
        let records = resolve(&["__IX0_0"], &table()).unwrap();
        let json = serde_json::to_value(&records[0]).unwrap();
        assert_eq!(json["address"], "%IX0.0");
        assert_eq!(json["io_mode"], "digital-in");
        assert_eq!(json["pin"]["number"], "D4");
    }
}
