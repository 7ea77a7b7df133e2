//! Rock (material) records and the layered default-merge resolver.
//!
//! A [`Rock`] is an all-optional attribute record. The same type serves as
//! a registry default table, a configuration-wide default patch, a
//! per-entity explicit patch, and the fully-merged effective record: only
//! the merge level changes, never the shape. `None` is an explicit
//! "absent" marker that encodes as a blank field.

use smallvec::SmallVec;

/// Initial-condition slots for one material (primary variables 1-4).
///
/// Unset slots encode as blank 20-column fields.
pub type Incon = [Option<f64>; 4];

/// A nested sub-model selection: a law id plus its parameter vector.
///
/// Used for relative permeability, capillary pressure, the permeability
/// law, and the equivalent pore pressure model. A sub-record line carries
/// at most 7 parameters.
#[derive(Clone, Debug, PartialEq)]
pub struct ModelRecord {
    /// Simulator-defined law id.
    pub id: i64,
    /// Law parameters, written at `10.3e` in declaration order.
    pub parameters: SmallVec<[f64; 8]>,
}

impl ModelRecord {
    /// Convenience constructor from a parameter slice.
    pub fn new(id: i64, parameters: &[f64]) -> Self {
        Self {
            id,
            parameters: SmallVec::from_slice(parameters),
        }
    }
}

/// Absolute permeability, either isotropic or per principal axis.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Permeability {
    /// One value applied to all three axes.
    Isotropic(f64),
    /// Explicit values along the three principal axes.
    Axes([f64; 3]),
}

impl Permeability {
    /// The three per-axis values, broadcasting the isotropic case.
    pub fn axes(&self) -> [f64; 3] {
        match *self {
            Self::Isotropic(k) => [k, k, k],
            Self::Axes(k) => k,
        }
    }
}

/// One material record. All attributes are optional; merging fills them
/// from the defaults registry and the configuration-wide default patch.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Rock {
    /// Rock grain density (kg/m3).
    pub density: Option<f64>,
    /// Porosity (fraction).
    pub porosity: Option<f64>,
    /// Absolute permeability (m2).
    pub permeability: Option<Permeability>,
    /// Formation heat conductivity under fully liquid-saturated
    /// conditions (W/m C).
    pub conductivity: Option<f64>,
    /// Rock grain specific heat (J/kg C).
    pub specific_heat: Option<f64>,
    /// Pore compressibility (1/Pa).
    pub compressibility: Option<f64>,
    /// Pore expansivity (1/C).
    pub expansion: Option<f64>,
    /// Heat conductivity under desaturated conditions (W/m C).
    pub conductivity_dry: Option<f64>,
    /// Tortuosity factor for binary diffusion.
    pub tortuosity: Option<f64>,
    /// Klinkenberg parameter (1/Pa).
    pub klinkenberg: Option<f64>,
    /// Distribution coefficient for parent radionuclide (m3/kg).
    pub xkd3: Option<f64>,
    /// Distribution coefficient for daughter radionuclide (m3/kg).
    pub xkd4: Option<f64>,
    /// Domain-specific initial conditions. Never filled from category
    /// defaults; see [`NO_CASCADE`].
    pub incon: Option<Incon>,
    /// Relative permeability model.
    pub relative_permeability: Option<ModelRecord>,
    /// Capillary pressure model.
    pub capillarity: Option<ModelRecord>,
    /// Permeability law (mechanically coupled runs).
    pub permeability_model: Option<ModelRecord>,
    /// Equivalent pore pressure model (mechanically coupled runs).
    pub equivalent_pore_pressure: Option<ModelRecord>,
}

/// Attribute names of a [`Rock`], used to address attributes in the
/// merge resolver's exclusion set.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RockField {
    /// [`Rock::density`]
    Density,
    /// [`Rock::porosity`]
    Porosity,
    /// [`Rock::permeability`]
    Permeability,
    /// [`Rock::conductivity`]
    Conductivity,
    /// [`Rock::specific_heat`]
    SpecificHeat,
    /// [`Rock::compressibility`]
    Compressibility,
    /// [`Rock::expansion`]
    Expansion,
    /// [`Rock::conductivity_dry`]
    ConductivityDry,
    /// [`Rock::tortuosity`]
    Tortuosity,
    /// [`Rock::klinkenberg`]
    Klinkenberg,
    /// [`Rock::xkd3`]
    Xkd3,
    /// [`Rock::xkd4`]
    Xkd4,
    /// [`Rock::incon`]
    Incon,
    /// [`Rock::relative_permeability`]
    RelativePermeability,
    /// [`Rock::capillarity`]
    Capillarity,
    /// [`Rock::permeability_model`]
    PermeabilityModel,
    /// [`Rock::equivalent_pore_pressure`]
    EquivalentPorePressure,
}

/// Attributes that never cascade from defaults into per-entity records.
///
/// Initial conditions are meaningful only when supplied explicitly for a
/// material; inheriting them from the default record would silently turn
/// a global starting state into domain-specific overrides.
pub const NO_CASCADE: &[RockField] = &[RockField::Incon];

fn pick<T: Clone>(
    field: RockField,
    excluded: &[RockField],
    base: &Option<T>,
    category: &Option<T>,
    explicit: &Option<T>,
) -> Option<T> {
    if excluded.contains(&field) {
        explicit.clone()
    } else {
        explicit
            .clone()
            .or_else(|| category.clone())
            .or_else(|| base.clone())
    }
}

/// Merge registry defaults, category defaults, and per-entity explicit
/// values into one effective record.
///
/// The overlay is strictly layered with last-writer-wins semantics per
/// attribute: a sub-model supplied at a higher layer replaces the whole
/// sub-model, it is never deep-merged field by field. Attributes listed
/// in `excluded` skip the cascade entirely and keep only their explicit
/// value.
pub fn effective(base: &Rock, category: &Rock, explicit: &Rock, excluded: &[RockField]) -> Rock {
    use RockField as F;
    Rock {
        density: pick(F::Density, excluded, &base.density, &category.density, &explicit.density),
        porosity: pick(F::Porosity, excluded, &base.porosity, &category.porosity, &explicit.porosity),
        permeability: pick(
            F::Permeability,
            excluded,
            &base.permeability,
            &category.permeability,
            &explicit.permeability,
        ),
        conductivity: pick(
            F::Conductivity,
            excluded,
            &base.conductivity,
            &category.conductivity,
            &explicit.conductivity,
        ),
        specific_heat: pick(
            F::SpecificHeat,
            excluded,
            &base.specific_heat,
            &category.specific_heat,
            &explicit.specific_heat,
        ),
        compressibility: pick(
            F::Compressibility,
            excluded,
            &base.compressibility,
            &category.compressibility,
            &explicit.compressibility,
        ),
        expansion: pick(F::Expansion, excluded, &base.expansion, &category.expansion, &explicit.expansion),
        conductivity_dry: pick(
            F::ConductivityDry,
            excluded,
            &base.conductivity_dry,
            &category.conductivity_dry,
            &explicit.conductivity_dry,
        ),
        tortuosity: pick(
            F::Tortuosity,
            excluded,
            &base.tortuosity,
            &category.tortuosity,
            &explicit.tortuosity,
        ),
        klinkenberg: pick(
            F::Klinkenberg,
            excluded,
            &base.klinkenberg,
            &category.klinkenberg,
            &explicit.klinkenberg,
        ),
        xkd3: pick(F::Xkd3, excluded, &base.xkd3, &category.xkd3, &explicit.xkd3),
        xkd4: pick(F::Xkd4, excluded, &base.xkd4, &category.xkd4, &explicit.xkd4),
        incon: pick(F::Incon, excluded, &base.incon, &category.incon, &explicit.incon),
        relative_permeability: pick(
            F::RelativePermeability,
            excluded,
            &base.relative_permeability,
            &category.relative_permeability,
            &explicit.relative_permeability,
        ),
        capillarity: pick(
            F::Capillarity,
            excluded,
            &base.capillarity,
            &category.capillarity,
            &explicit.capillarity,
        ),
        permeability_model: pick(
            F::PermeabilityModel,
            excluded,
            &base.permeability_model,
            &category.permeability_model,
            &explicit.permeability_model,
        ),
        equivalent_pore_pressure: pick(
            F::EquivalentPorePressure,
            excluded,
            &base.equivalent_pore_pressure,
            &category.equivalent_pore_pressure,
            &explicit.equivalent_pore_pressure,
        ),
    }
}
