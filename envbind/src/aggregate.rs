use std::fmt;

use tracing::warn;

use crate::{
    lookup::Lookup,
    resolve::{FieldResolution, FieldSpec, resolve},
    value::Value,
};

/// Resolutions for every bound field of a type, in field order.
#[derive(Debug, Clone, PartialEq)]
pub struct BindingReport {
    entries: Vec<(FieldSpec, FieldResolution)>,
}

impl BindingReport {
    pub fn entries(&self) -> &[(FieldSpec, FieldResolution)] {
        &self.entries
    }

    pub fn get(&self, field: &str) -> Option<&FieldResolution> {
        self.entries
            .iter()
            .find(|(spec, _)| spec.name == field)
            .map(|(_, resolution)| resolution)
    }

    pub fn all_satisfied(&self) -> bool {
        self.entries
            .iter()
            .all(|(_, resolution)| resolution.is_satisfied())
    }

    pub fn unsatisfied(&self) -> impl Iterator<Item = &(FieldSpec, FieldResolution)> {
        self.entries
            .iter()
            .filter(|(_, resolution)| !resolution.is_satisfied())
    }

    /// Writes the failing fields and, under each, every rejected key.
    ///
    /// Satisfied fields and successful keys are left out so that no resolved
    /// value can end up in the message.
    pub fn render(&self, type_name: &str, f: &mut impl fmt::Write) -> fmt::Result {
        writeln!(f, "failed to bind environment for type `{type_name}`:")?;

        for (spec, resolution) in self.unsatisfied() {
            writeln!(f, "  field `{}`:", spec.name)?;
            for (key, error) in resolution.failures() {
                writeln!(f, "    \"{key}\": {error}")?;
            }
        }
        Ok(())
    }

    fn into_values(self) -> Vec<Value> {
        self.entries
            .into_iter()
            .map(|(spec, resolution)| {
                if !resolution.has_success() {
                    warn!(
                        field = spec.name,
                        "optional field did not resolve, binding empty value"
                    );
                }
                resolution.into_value()
            })
            .collect()
    }
}

/// Resolves every spec and returns the chosen values in the same order, or
/// the full report if any required field is unsatisfied.
pub fn aggregate<L: Lookup + ?Sized>(
    specs: &[FieldSpec],
    lookup: &L,
) -> Result<Vec<Value>, BindingReport> {
    let report = BindingReport {
        entries: specs
            .iter()
            .map(|spec| (spec.clone(), resolve(spec, lookup)))
            .collect(),
    };

    if report.all_satisfied() {
        Ok(report.into_values())
    } else {
        Err(report)
    }
}
