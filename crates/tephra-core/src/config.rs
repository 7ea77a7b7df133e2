//! Whole-deck configuration model.
//!
//! [`Simulation`] is the input to the deck writer. It is never mutated by
//! a write: the writer operates on its own copy, so one configuration can
//! be encoded repeatedly (or from several threads) with identical results.

use indexmap::IndexMap;

use crate::gener::Generator;
use crate::rock::{Incon, Rock};

// ── Format version ─────────────────────────────────────────────────

/// Target deck format version.
///
/// Some blocks (MOMOP, OUTPU) only exist in the TOUGH3 format; requesting
/// them for TOUGH2 skips the block with a warning rather than failing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormatVersion {
    /// Legacy TOUGH2 fixed format.
    Tough2,
    /// TOUGH3 fixed format with extended option blocks.
    Tough3,
}

impl FormatVersion {
    /// Whether this version understands the extended MOMOP/OUTPU blocks.
    pub fn supports_extended_blocks(self) -> bool {
        matches!(self, Self::Tough3)
    }
}

impl Default for FormatVersion {
    fn default() -> Self {
        Self::Tough3
    }
}

// ── Feature sections ───────────────────────────────────────────────

/// Mechanical-model (geomechanics) coupling parameters. Presence of this
/// struct is the FLAC block flag.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Flac {
    /// Enable creep in the mechanical model.
    pub creep: bool,
    /// Porosity model selector.
    pub porosity_model: i64,
}

/// Linear solver settings (SOLVR block). `Default` carries the registry
/// values; override fields with struct-update syntax.
#[derive(Clone, Debug, PartialEq)]
pub struct Solver {
    /// Solver selector (2-6).
    pub method: i64,
    /// Z-preconditioning keyword.
    pub z_precond: String,
    /// O-preconditioning keyword.
    pub o_precond: String,
    /// Maximum ratio of solver iterations to equations.
    pub rel_iter_max: f64,
    /// Convergence criterion.
    pub eps: f64,
}

impl Default for Solver {
    fn default() -> Self {
        Self {
            method: 3,
            z_precond: "Z0".to_string(),
            o_precond: "O0".to_string(),
            rel_iter_max: 0.1,
            eps: 1.0e-6,
        }
    }
}

/// Time stepping specification for the PARAM block.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum TimeSteps {
    /// Let the simulator choose; encodes one blank table slot.
    #[default]
    Auto,
    /// One constant time step length (seconds).
    Uniform(f64),
    /// Explicit time step table, written 8 values per record. Must be
    /// non-empty.
    Table(Vec<f64>),
}

/// Computation parameters, time stepping information, and default initial
/// conditions (PARAM block). Unset fields encode as blank columns.
#[derive(Clone, Debug, PartialEq)]
pub struct Options {
    /// Maximum number of Newton iterations per time step.
    pub n_iteration: Option<i64>,
    /// Printout verbosity selector.
    pub verbosity: Option<i64>,
    /// Maximum number of time steps.
    pub n_cycle: Option<i64>,
    /// Maximum simulation duration in machine seconds.
    pub n_second: Option<i64>,
    /// Printout interval in time steps.
    pub n_cycle_print: Option<i64>,
    /// Temperature dependence of gas phase viscosity.
    pub temperature_dependence_gas: Option<f64>,
    /// Effective strength of vapor pressure lowering.
    pub effective_strength_vapor: Option<f64>,
    /// Simulation start time (seconds).
    pub t_ini: Option<f64>,
    /// Simulation stop time (seconds).
    pub t_max: Option<f64>,
    /// Time step specification.
    pub t_steps: TimeSteps,
    /// Upper limit for time step size (seconds).
    pub t_step_max: Option<f64>,
    /// Time step reduction factor on convergence failure.
    pub t_reduce_factor: Option<f64>,
    /// Gravitational acceleration (m/s2).
    pub gravity: Option<f64>,
    /// Scale factor for grid block distances.
    pub mesh_scale_factor: Option<f64>,
    /// Convergence criterion for relative error.
    pub eps1: Option<f64>,
    /// Convergence criterion for absolute error.
    pub eps2: Option<f64>,
    /// Upstream weighting factor for mobilities and enthalpies.
    pub w_upstream: Option<f64>,
    /// Newton-Raphson increment weighting factor.
    pub w_newton: Option<f64>,
    /// Increment factor for numerical derivatives.
    pub derivative_factor: Option<f64>,
    /// Deprecated location for the default initial conditions. Writes
    /// migrate this into the default record and emit a
    /// [`LegacyIncon`](crate::Advisory::LegacyIncon) advisory; put the
    /// value in [`Simulation::default`] instead.
    pub incon: Option<Incon>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            n_iteration: None,
            verbosity: None,
            n_cycle: None,
            n_second: None,
            n_cycle_print: None,
            temperature_dependence_gas: None,
            effective_strength_vapor: None,
            t_ini: None,
            t_max: None,
            t_steps: TimeSteps::Auto,
            t_step_max: None,
            t_reduce_factor: None,
            gravity: Some(9.81),
            mesh_scale_factor: None,
            eps1: None,
            eps2: None,
            w_upstream: None,
            w_newton: None,
            derivative_factor: None,
            incon: None,
        }
    }
}

/// MOP numerical-method option flags (24 one-column slots in PARAM
/// record 1). Unset slots fall back to the registry table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Mop(pub [Option<u8>; 24]);

impl Default for Mop {
    fn default() -> Self {
        Self([None; 24])
    }
}

/// MOMOP extended option flags (TOUGH3 only, 40 one-column slots).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Momop(pub [Option<u8>; 40]);

impl Default for Momop {
    fn default() -> Self {
        Self([None; 40])
    }
}

/// Module-specific selection parameters (SELEC block). Written whenever
/// the selected physical model belongs to the subset that consumes them.
#[derive(Clone, Debug, PartialEq)]
pub struct Selections {
    /// The 16 integer selection slots of record 1.
    pub integers: [Option<i64>; 16],
    /// Optional floating-point selection parameters, wrapped 8 per record.
    pub extra: Option<Vec<f64>>,
}

impl Default for Selections {
    fn default() -> Self {
        Self {
            integers: [None; 16],
            extra: None,
        }
    }
}

/// Binary diffusion coefficient table (DIFFU block): one row per mass
/// component, one column per phase. Row lengths must equal the resolved
/// phase count.
#[derive(Clone, Debug, PartialEq)]
pub struct Diffusion {
    /// Diffusion coefficients of mass component 1, per phase.
    pub mass1: Vec<f64>,
    /// Diffusion coefficients of mass component 2, per phase.
    pub mass2: Vec<f64>,
}

/// Printout variable requests (OUTPU block, TOUGH3 only).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Output {
    /// Output file format keyword (e.g. `"csv"`), upper-cased on write.
    pub format: Option<String>,
    /// Requested variables with at most two column specifiers each.
    pub variables: IndexMap<String, Vec<i64>>,
}

// ── Simulation ─────────────────────────────────────────────────────

/// Complete deck configuration.
///
/// Entity maps preserve insertion order; the emitted deck lists entities
/// in that order unless [`rocks_order`](Self::rocks_order) overrides it.
#[derive(Clone, Debug, PartialEq)]
pub struct Simulation {
    /// Title line written at the top of the deck.
    pub title: String,
    /// Target format version.
    pub version: FormatVersion,
    /// Selected physical model (EOS module), e.g. `"eco2n"`. Must be a
    /// recognized registry key when set.
    pub eos: Option<String>,
    /// Override for the model's mass component count.
    pub n_component: Option<u32>,
    /// Override for the model's phase count.
    pub n_phase: Option<u32>,
    /// Suppress the energy balance equation.
    pub isothermal: bool,
    /// Allow flexible initialization (START block). Required for
    /// domain-specific initial conditions to take effect.
    pub start: bool,
    /// Skip the version check in the simulator (NOVER marker block).
    pub nover: bool,
    /// Close the deck with ENDFI instead of ENDCY.
    pub endfi: bool,
    /// Mechanical-model coupling; presence enables the FLAC block.
    pub flac: Option<Flac>,
    /// Material definitions, keyed by rock name (at most 5 significant
    /// characters). Required: a deck without materials is rejected.
    pub rocks: IndexMap<String, Rock>,
    /// Optional explicit output order for materials; every entry must
    /// name a defined rock.
    pub rocks_order: Option<Vec<String>>,
    /// Configuration-wide default record overlaid on every material.
    pub default: Rock,
    /// Numerical options (PARAM block). Required.
    pub options: Option<Options>,
    /// MOP option flags.
    pub extra_options: Mop,
    /// Extended MOMOP option flags (TOUGH3 only).
    pub more_options: Option<Momop>,
    /// Module-specific selection parameters.
    pub selections: Selections,
    /// Linear solver settings; presence enables the SOLVR block.
    pub solver: Option<Solver>,
    /// Sink/source definitions, keyed by element name.
    pub generators: IndexMap<String, Generator>,
    /// Printout times (TIMES block).
    pub times: Option<Vec<f64>>,
    /// Elements with time-series output (FOFT block).
    pub element_history: Option<Vec<String>>,
    /// Connections with time-series output (COFT block).
    pub connection_history: Option<Vec<String>>,
    /// Sinks/sources with time-series output (GOFT block).
    pub generator_history: Option<Vec<String>>,
    /// Binary diffusion coefficients; presence enables the DIFFU block
    /// and forces the secondary-parameter sentinel in MULTI.
    pub diffusion: Option<Diffusion>,
    /// Printout variable requests (TOUGH3 only).
    pub output: Option<Output>,
}

impl Default for Simulation {
    fn default() -> Self {
        Self {
            title: String::new(),
            version: FormatVersion::default(),
            eos: None,
            n_component: None,
            n_phase: None,
            isothermal: false,
            start: false,
            nover: false,
            endfi: false,
            flac: None,
            rocks: IndexMap::new(),
            rocks_order: None,
            default: Rock::default(),
            options: None,
            extra_options: Mop::default(),
            more_options: None,
            selections: Selections::default(),
            solver: None,
            generators: IndexMap::new(),
            times: None,
            element_history: None,
            connection_history: None,
            generator_history: None,
            diffusion: None,
            output: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_simulation_is_empty_tough3() {
        let sim = Simulation::default();
        assert_eq!(sim.version, FormatVersion::Tough3);
        assert!(sim.rocks.is_empty());
        assert!(sim.options.is_none());
        assert!(!sim.start);
    }

    #[test]
    fn solver_default_matches_registry() {
        let s = Solver::default();
        assert_eq!(s.method, 3);
        assert_eq!(s.z_precond, "Z0");
        assert_eq!(s.o_precond, "O0");
        assert_eq!(s.rel_iter_max, 0.1);
        assert_eq!(s.eps, 1.0e-6);
    }

    #[test]
    fn options_default_only_sets_gravity() {
        let o = Options::default();
        assert_eq!(o.gravity, Some(9.81));
        assert_eq!(o.n_iteration, None);
        assert_eq!(o.t_steps, TimeSteps::Auto);
    }

    #[test]
    fn version_capabilities() {
        assert!(FormatVersion::Tough3.supports_extended_blocks());
        assert!(!FormatVersion::Tough2.supports_extended_blocks());
    }
}
