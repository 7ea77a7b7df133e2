//! Computation-parameter blocks: START, PARAM, and MOMOP.

use tephra_core::{defaults, TimeSteps, WriteError};

use crate::blocks::RULER;
use crate::fmt::{self, Fmt};
use crate::record::{multi_record, record, DEFAULT_COLUMNS};
use crate::resolve::Deck;

/// START: the ruler line with the MOP column legend spliced into
/// columns 12-40.
pub(crate) fn start(_deck: &Deck) -> Vec<String> {
    let ruler = format!("{:<5}{}", "----*", RULER);
    let mut line = String::with_capacity(81);
    line.push_str(&ruler[..11]);
    line.push_str("MOP: 123456789*123456789*1234");
    line.push_str(&ruler[40..]);
    line.push('\n');
    vec![line]
}

/// An explicit time step table must not be empty.
pub(crate) fn validate(deck: &Deck) -> Result<(), WriteError> {
    if let Some(options) = &deck.sim.options {
        if matches!(&options.t_steps, TimeSteps::Table(t) if t.is_empty()) {
            return Err(WriteError::EmptyTimeSteps);
        }
    }
    Ok(())
}

/// The 24-column MOP flag string: explicit slots over the registry table,
/// blanks where neither is set.
fn mop_string(deck: &Deck) -> String {
    let mut out = String::with_capacity(24);
    for (slot, registry) in deck.sim.extra_options.0.iter().copied().zip(defaults::MOP) {
        match slot.or(registry) {
            Some(v) => out.push_str(&v.to_string()),
            None => out.push(' '),
        }
    }
    out
}

/// PARAM: records 1-4 plus the time step table.
pub(crate) fn param(deck: &Deck) -> Vec<String> {
    let Some(o) = &deck.sim.options else {
        return Vec::new();
    };

    let steps: Vec<Option<f64>> = match &o.t_steps {
        TimeSteps::Auto => vec![None],
        TimeSteps::Uniform(dt) => vec![Some(*dt)],
        TimeSteps::Table(t) => t.iter().copied().map(Some).collect(),
    };

    let mut out = Vec::with_capacity(5);

    // Record 1
    out.push(record([
        fmt::int(o.n_iteration, &Fmt::int(2)),
        fmt::int(o.verbosity, &Fmt::int(2)),
        fmt::int(o.n_cycle, &Fmt::int(4)),
        fmt::int(o.n_second, &Fmt::int(4)),
        fmt::int(o.n_cycle_print, &Fmt::int(4)),
        mop_string(deck),
        fmt::blank(10),
        fmt::float(o.temperature_dependence_gas, &Fmt::exp(10, 4)),
        fmt::float(o.effective_strength_vapor, &Fmt::exp(10, 4)),
    ]));

    // Record 2; the negative count is the number of table records.
    let n_records = steps.len().div_ceil(DEFAULT_COLUMNS).max(1) as i64;
    out.push(record([
        fmt::float(o.t_ini, &Fmt::exp(10, 4)),
        fmt::float(o.t_max, &Fmt::exp(10, 4)),
        fmt::int(Some(-n_records), &Fmt::int(9)) + ".",
        fmt::float(o.t_step_max, &Fmt::exp(10, 4)),
        fmt::blank(10),
        fmt::float(o.gravity, &Fmt::exp(10, 4)),
        fmt::float(o.t_reduce_factor, &Fmt::exp(10, 4)),
        fmt::float(o.mesh_scale_factor, &Fmt::exp(10, 4)),
    ]));

    // Record 2.1: the time step table itself.
    let fields: Vec<String> = steps
        .iter()
        .map(|&dt| fmt::float(dt, &Fmt::exp(10, 4)))
        .collect();
    out.extend(multi_record(&fields, DEFAULT_COLUMNS));

    // Record 3
    out.push(record([
        fmt::float(o.eps1, &Fmt::exp(10, 4)),
        fmt::float(o.eps2, &Fmt::exp(10, 4)),
        fmt::blank(10),
        fmt::float(o.w_upstream, &Fmt::exp(10, 4)),
        fmt::float(o.w_newton, &Fmt::exp(10, 4)),
        fmt::float(o.derivative_factor, &Fmt::exp(10, 4)),
    ]));

    // Record 4: default initial conditions at 20.4e.
    let incon = deck.default_record.incon.unwrap_or([None; 4]);
    out.push(record(
        incon.iter().map(|&slot| fmt::float(slot, &Fmt::exp(20, 4))),
    ));

    out
}

/// MOMOP: 40 one-column flag slots, blanks where unset.
pub(crate) fn momop(deck: &Deck) -> Vec<String> {
    let Some(momop) = &deck.sim.more_options else {
        return Vec::new();
    };
    let mut flags = String::with_capacity(40);
    for slot in momop.0 {
        match slot {
            Some(v) => flags.push_str(&v.to_string()),
            None => flags.push(' '),
        }
    }
    vec![record([flags])]
}
