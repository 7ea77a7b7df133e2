//! Balance-equation and solver blocks: MULTI, SELEC, and SOLVR.

use crate::fmt::{self, Fmt, Scalar};
use crate::record::{multi_record, record, DEFAULT_COLUMNS};
use crate::resolve::Deck;

/// MULTI: the four derived counts in 5-column fields.
pub(crate) fn multi(deck: &Deck) -> Vec<String> {
    let Some(m) = &deck.multi else {
        return Vec::new();
    };
    vec![record([
        fmt::int(Some(i64::from(m.nk)), &Fmt::int(5)),
        fmt::int(Some(i64::from(m.neq)), &Fmt::int(5)),
        fmt::int(Some(i64::from(m.nph)), &Fmt::int(5)),
        fmt::int(Some(i64::from(m.nb)), &Fmt::int(5)),
    ])]
}

/// SELEC: 16 integer slots, then the optional floating-point table.
pub(crate) fn selec(deck: &Deck) -> Vec<String> {
    let s = &deck.sim.selections;
    let mut out = vec![record(
        s.integers.iter().map(|&v| fmt::int(v, &Fmt::int(5))),
    )];
    if let Some(extra) = &s.extra {
        let fields: Vec<String> = extra
            .iter()
            .map(|&v| fmt::float(Some(v), &Fmt::exp(10, 3)))
            .collect();
        out.extend(multi_record(&fields, DEFAULT_COLUMNS));
    }
    out
}

/// SOLVR: one record of solver selections.
pub(crate) fn solvr(deck: &Deck) -> Vec<String> {
    let Some(s) = &deck.sim.solver else {
        return Vec::new();
    };
    vec![record([
        fmt::int(Some(s.method), &Fmt::int(1)) + "  ",
        fmt::field(Some(&Scalar::Text(s.z_precond.clone())), &Fmt::text_right(2)) + "   ",
        fmt::field(Some(&Scalar::Text(s.o_precond.clone())), &Fmt::text_right(2)),
        fmt::float(Some(s.rel_iter_max), &Fmt::exp(10, 4)),
        fmt::float(Some(s.eps), &Fmt::exp(10, 4)),
    ])]
}
