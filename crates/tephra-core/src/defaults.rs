//! Process-wide defaults registry.
//!
//! Immutable baseline tables for every entity category: rock properties,
//! numerical-method option flags, and the physical-model (EOS) component
//! and phase counts. The registry is read-only; the merge resolver copies
//! values out of it, never into it.

use crate::rock::{ModelRecord, Permeability, Rock};

/// Baseline material record. Every rock inherits these values unless the
/// configuration-wide default record or the rock itself overrides them.
pub fn rock() -> Rock {
    Rock {
        density: Some(2600.0),
        porosity: Some(0.1),
        permeability: Some(Permeability::Isotropic(1.0e-13)),
        conductivity: Some(3.0),
        specific_heat: Some(1000.0),
        compressibility: None,
        expansion: None,
        conductivity_dry: None,
        tortuosity: None,
        klinkenberg: None,
        xkd3: None,
        xkd4: None,
        incon: None,
        relative_permeability: Some(ModelRecord::new(3, &[0.3, 0.05])),
        capillarity: Some(ModelRecord::new(1, &[0.0, 0.0, 1.0])),
        permeability_model: Some(ModelRecord::new(1, &[])),
        equivalent_pore_pressure: Some(ModelRecord::new(3, &[0.2684e8, -0.1991e8, 0.3845])),
    }
}

/// Baseline MOP option flags (PARAM record 1, columns 41-64). `None`
/// slots encode as blanks, letting the simulator apply its own default.
pub const MOP: [Option<u8>; 24] = [
    None,
    Some(0),
    Some(0),
    Some(0),
    None,
    Some(0),
    Some(2),
    None,
    Some(0),
    Some(0),
    Some(0),
    Some(0),
    Some(0),
    None,
    None,
    Some(4),
    None,
    None,
    None,
    None,
    Some(3),
    None,
    None,
    None,
];

/// Per-model MULTI block geometry. The balance equation count is not
/// tabulated: it is always derived from the component count and the
/// isothermal flag.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EosSpec {
    /// Number of mass components (NK).
    pub components: u32,
    /// Number of phases (NPH).
    pub phases: u32,
    /// Number of secondary parameters (NB).
    pub secondary: u32,
}

const fn eos_spec(components: u32, phases: u32, secondary: u32) -> EosSpec {
    EosSpec {
        components,
        phases,
        secondary,
    }
}

/// Registered component/phase counts for a physical model, or `None` for
/// an unrecognized model name.
pub fn eos(name: &str) -> Option<EosSpec> {
    let spec = match name {
        "eos1" => eos_spec(1, 2, 6),
        "eos2" | "eos3" | "eos4" | "eos5" => eos_spec(2, 2, 6),
        "eos7" => eos_spec(3, 2, 6),
        "eos7r" => eos_spec(5, 2, 6),
        "eos8" => eos_spec(3, 3, 6),
        "eos9" => eos_spec(1, 1, 6),
        "ewasg" => eos_spec(3, 3, 6),
        "eco2n" | "eco2n_v2" => eos_spec(3, 3, 6),
        "eco2m" => eos_spec(3, 4, 6),
        _ => return None,
    };
    Some(spec)
}

/// Physical models that consume the SELEC selection-parameter block.
pub fn eos_requires_selec(name: &str) -> bool {
    matches!(
        name,
        "eos7" | "eos7r" | "ewasg" | "eco2n" | "eco2n_v2" | "eco2m"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_models_resolve() {
        let spec = eos("eco2n").unwrap();
        assert_eq!(spec.components, 3);
        assert_eq!(spec.phases, 3);
        assert_eq!(spec.secondary, 6);
        assert!(eos("eos1").is_some());
        assert!(eos("eos9").is_some());
    }

    #[test]
    fn unknown_model_is_none() {
        assert!(eos("eos99").is_none());
        assert!(eos("ECO2N").is_none()); // names are lower-case keys
    }

    #[test]
    fn selec_subset() {
        assert!(eos_requires_selec("eco2n"));
        assert!(eos_requires_selec("ewasg"));
        assert!(!eos_requires_selec("eos1"));
        assert!(!eos_requires_selec("eos3"));
    }

    #[test]
    fn rock_registry_has_both_submodels() {
        let r = rock();
        assert!(r.relative_permeability.is_some());
        assert!(r.capillarity.is_some());
        assert_eq!(r.incon, None);
    }

    #[test]
    fn mop_registry_matches_simulator_table() {
        assert_eq!(MOP[6], Some(2)); // MOP(7)
        assert_eq!(MOP[15], Some(4)); // MOP(16)
        assert_eq!(MOP[20], Some(3)); // MOP(21)
        assert_eq!(MOP[0], None);
    }
}
