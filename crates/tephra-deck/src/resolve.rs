//! Merged deck view and derived values.
//!
//! [`Deck::resolve`] turns a caller-supplied [`Simulation`] into the
//! fully-merged view the block encoders consume: effective rock records,
//! the default record, the MULTI block counts, the INDOM flag, and the
//! expanded generator records. It operates on its own copy of the input;
//! the caller's configuration is never mutated.
//!
//! Cross-field consistency errors (generator array lengths, table
//! shapes) are raised here, before any block is encoded.

use indexmap::IndexMap;

use tephra_core::{
    defaults, rock, Advisory, GenKind, GenValue, Generator, Rock, Simulation, WriteError,
    NO_CASCADE,
};

/// Derived MULTI block counts, computed once per write.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Multi {
    /// Number of mass components.
    pub nk: u32,
    /// Number of balance equations.
    pub neq: u32,
    /// Number of phases; also the DIFFU row width.
    pub nph: u32,
    /// Number of secondary parameters (8 when diffusion is active).
    pub nb: u32,
}

/// A time/rate/enthalpy table for one generator record.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct GenTable {
    pub times: Vec<f64>,
    pub rates: Vec<f64>,
    /// Tabular enthalpy, or a scalar broadcast across the table length.
    pub enthalpy: Option<GenValue>,
}

/// One fully-expanded generator record, ready to encode.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct GenRecord {
    pub name: String,
    pub type_code: String,
    pub table: Option<GenTable>,
    pub rate: Option<f64>,
    pub enthalpy: Option<f64>,
    pub thickness: Option<f64>,
}

/// The merged configuration a single write operates on.
pub(crate) struct Deck {
    /// Post-migration copy of the input configuration.
    pub sim: Simulation,
    /// Effective rock records in output order.
    pub rocks: IndexMap<String, Rock>,
    /// Registry defaults overlaid with the configuration-wide default
    /// record; source of the PARAM initial-condition record.
    pub default_record: Rock,
    /// MULTI counts, present whenever a physical model is selected.
    pub multi: Option<Multi>,
    /// Whether any rock supplies explicit initial-condition slots.
    pub indom: bool,
    /// Expanded generator records in definition order.
    pub gener: Vec<GenRecord>,
}

impl Deck {
    /// Merge defaults, compute derived values, and expand generators.
    ///
    /// Advisories (legacy layout migration, missing START flag) are
    /// collected into `advisories`; fatal inconsistencies abort.
    pub fn resolve(
        input: &Simulation,
        advisories: &mut Vec<Advisory>,
    ) -> Result<Self, WriteError> {
        if input.rocks.is_empty() {
            return Err(WriteError::MissingRocks);
        }
        if input.options.is_none() {
            return Err(WriteError::MissingOptions);
        }

        let mut sim = input.clone();

        // Deprecated layout: initial conditions under the numerical
        // options migrate into the default record.
        if let Some(options) = sim.options.as_mut() {
            if let Some(incon) = options.incon.take() {
                sim.default.incon = Some(incon);
                let advisory = Advisory::LegacyIncon;
                log::warn!("{advisory}");
                advisories.push(advisory);
            }
        }

        let multi = match sim.eos.as_deref() {
            Some(name) => {
                let spec = defaults::eos(name).ok_or_else(|| WriteError::UnknownEos {
                    name: name.to_string(),
                })?;
                let nk = sim.n_component.unwrap_or(spec.components);
                let neq = if sim.isothermal { nk } else { nk + 1 };
                let nph = sim.n_phase.unwrap_or(spec.phases);
                let nb = if sim.diffusion.is_some() {
                    8
                } else {
                    spec.secondary
                };
                Some(Multi { nk, neq, nph, nb })
            }
            None => None,
        };

        let order: Vec<String> = match &sim.rocks_order {
            Some(order) => {
                for name in order {
                    if !sim.rocks.contains_key(name) {
                        return Err(WriteError::UnknownRock { name: name.clone() });
                    }
                }
                order.clone()
            }
            None => sim.rocks.keys().cloned().collect(),
        };

        let registry = defaults::rock();
        let default_record = rock::effective(&registry, &sim.default, &Rock::default(), &[]);

        let mut rocks = IndexMap::with_capacity(order.len());
        let mut indom = false;
        for name in &order {
            let patch = &sim.rocks[name];
            if let Some(incon) = &patch.incon {
                if incon.iter().any(Option::is_some) {
                    indom = true;
                }
            }
            let merged = rock::effective(&registry, &sim.default, patch, NO_CASCADE);
            rocks.insert(name.clone(), merged);
        }

        if indom && !sim.start {
            let advisory = Advisory::StartNotSet;
            log::warn!("{advisory}");
            advisories.push(advisory);
        }

        let mut gener = Vec::new();
        for (name, g) in &sim.generators {
            expand_generator(name, g, &mut gener)?;
        }

        Ok(Self {
            sim,
            rocks,
            default_record,
            multi,
            indom,
            gener,
        })
    }
}

/// Split a generator entity into deck records.
///
/// A per-component type list yields one record per component, each
/// drawing one scalar from the corresponding index of every supplied
/// attribute array. A single type code yields one record, tabular when a
/// time table is present.
fn expand_generator(
    name: &str,
    g: &Generator,
    out: &mut Vec<GenRecord>,
) -> Result<(), WriteError> {
    match &g.kind {
        GenKind::Components(codes) => {
            if g.times.is_some() {
                return Err(WriteError::TimesNotAllowed {
                    generator: name.to_string(),
                });
            }
            let n = codes.len();
            let rates = per_component(name, "rates", &g.rates, n)?;
            let enthalpy = per_component(name, "specific_enthalpy", &g.specific_enthalpy, n)?;
            let thickness = per_component(name, "layer_thickness", &g.layer_thickness, n)?;
            for (i, code) in codes.iter().enumerate() {
                out.push(GenRecord {
                    name: name.to_string(),
                    type_code: code.clone(),
                    table: None,
                    rate: rates.as_ref().map(|v| v[i]),
                    enthalpy: enthalpy.as_ref().map(|v| v[i]),
                    thickness: thickness.as_ref().map(|v| v[i]),
                });
            }
            Ok(())
        }
        GenKind::Single(code) => {
            let record = match &g.times {
                Some(times) => expand_tabular(name, code, times, g)?,
                None => expand_scalar(name, code, g)?,
            };
            out.push(record);
            Ok(())
        }
    }
}

fn expand_tabular(
    name: &str,
    code: &str,
    times: &[f64],
    g: &Generator,
) -> Result<GenRecord, WriteError> {
    let ltab = times.len();
    if ltab < 2 {
        return Err(WriteError::TableTooShort {
            generator: name.to_string(),
            len: ltab,
        });
    }
    let rates = match &g.rates {
        Some(GenValue::Table(rates)) => {
            if rates.len() != ltab {
                return Err(WriteError::TableLengthMismatch {
                    generator: name.to_string(),
                    attribute: "rates",
                    expected: ltab,
                    actual: rates.len(),
                });
            }
            rates.clone()
        }
        Some(GenValue::Scalar(_)) | None => {
            return Err(WriteError::MissingRates {
                generator: name.to_string(),
            });
        }
    };
    let enthalpy = match &g.specific_enthalpy {
        Some(GenValue::Table(h)) if h.len() != ltab => {
            return Err(WriteError::TableLengthMismatch {
                generator: name.to_string(),
                attribute: "specific_enthalpy",
                expected: ltab,
                actual: h.len(),
            });
        }
        other => other.clone(),
    };
    let thickness = scalar_only(name, "layer_thickness", &g.layer_thickness)?;
    Ok(GenRecord {
        name: name.to_string(),
        type_code: code.to_string(),
        table: Some(GenTable {
            times: times.to_vec(),
            rates,
            enthalpy,
        }),
        rate: None,
        enthalpy: None,
        thickness,
    })
}

fn expand_scalar(name: &str, code: &str, g: &Generator) -> Result<GenRecord, WriteError> {
    Ok(GenRecord {
        name: name.to_string(),
        type_code: code.to_string(),
        table: None,
        rate: scalar_only(name, "rates", &g.rates)?,
        enthalpy: scalar_only(name, "specific_enthalpy", &g.specific_enthalpy)?,
        thickness: scalar_only(name, "layer_thickness", &g.layer_thickness)?,
    })
}

/// Without a time table, tabular attribute values are a contract
/// violation, never a silent truncation.
fn scalar_only(
    name: &str,
    attribute: &'static str,
    v: &Option<GenValue>,
) -> Result<Option<f64>, WriteError> {
    match v {
        None => Ok(None),
        Some(GenValue::Scalar(x)) => Ok(Some(*x)),
        Some(GenValue::Table(_)) => Err(WriteError::ScalarRequired {
            generator: name.to_string(),
            attribute,
        }),
    }
}

fn per_component(
    name: &str,
    attribute: &'static str,
    v: &Option<GenValue>,
    n: usize,
) -> Result<Option<Vec<f64>>, WriteError> {
    match v {
        None => Ok(None),
        Some(GenValue::Table(t)) if t.len() == n => Ok(Some(t.clone())),
        Some(other) => Err(WriteError::ComponentMismatch {
            generator: name.to_string(),
            attribute,
            expected: n,
            actual: other.len(),
        }),
    }
}
