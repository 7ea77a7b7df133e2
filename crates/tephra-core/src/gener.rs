//! Generator (sink/source) entities.

/// Injection/production type code(s) for one generator entity.
#[derive(Clone, Debug, PartialEq)]
pub enum GenKind {
    /// A single type code, e.g. `"MASS"`, `"COM1"`, `"HEAT"`.
    Single(String),
    /// One type code per injected component. The entity expands into one
    /// deck record per component; every per-component attribute array
    /// must match this list's length.
    Components(Vec<String>),
}

/// A generator attribute that is either one scalar or a per-entry array.
///
/// For a [`GenKind::Single`] generator a `Table` is only meaningful
/// together with a time table; for [`GenKind::Components`] a `Table`
/// supplies one scalar per component.
#[derive(Clone, Debug, PartialEq)]
pub enum GenValue {
    /// One value for the whole record.
    Scalar(f64),
    /// One value per table row or per component.
    Table(Vec<f64>),
}

impl GenValue {
    /// Number of entries (1 for a scalar).
    pub fn len(&self) -> usize {
        match self {
            Self::Scalar(_) => 1,
            Self::Table(t) => t.len(),
        }
    }

    /// True for an empty table.
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Table(t) if t.is_empty())
    }
}

/// One sink/source definition, keyed by element name in
/// [`Simulation::generators`](crate::Simulation::generators).
#[derive(Clone, Debug, PartialEq)]
pub struct Generator {
    /// Type code(s); drives record expansion.
    pub kind: GenKind,
    /// Time table for tabular generation rates. Only valid for a
    /// [`GenKind::Single`] generator; requires a matching rate table.
    pub times: Option<Vec<f64>>,
    /// Generation rate (kg/s or W), scalar or tabular.
    pub rates: Option<GenValue>,
    /// Specific enthalpy of the injected fluid (J/kg).
    pub specific_enthalpy: Option<GenValue>,
    /// Layer thickness for well-on-deliverability generators (m).
    pub layer_thickness: Option<GenValue>,
}

impl Generator {
    /// A constant-rate generator of the given type.
    pub fn constant(type_code: &str, rate: f64) -> Self {
        Self {
            kind: GenKind::Single(type_code.to_string()),
            times: None,
            rates: Some(GenValue::Scalar(rate)),
            specific_enthalpy: None,
            layer_thickness: None,
        }
    }
}
