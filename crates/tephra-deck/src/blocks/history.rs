//! Printout-time and time-series blocks: TIMES, FOFT, COFT, and GOFT.

use crate::fmt::{self, Fmt, Scalar};
use crate::record::{multi_record, record, DEFAULT_COLUMNS};
use crate::resolve::Deck;

/// TIMES: the count record followed by the printout times, 8 per record.
pub(crate) fn times(deck: &Deck) -> Vec<String> {
    let Some(times) = &deck.sim.times else {
        return Vec::new();
    };
    let mut out = vec![record([fmt::int(Some(times.len() as i64), &Fmt::int(5))])];
    let fields: Vec<String> = times
        .iter()
        .map(|&t| fmt::float(Some(t), &Fmt::exp(10, 4)))
        .collect();
    out.extend(multi_record(&fields, DEFAULT_COLUMNS));
    out
}

fn names(items: &[String], width: usize) -> Vec<String> {
    let fields: Vec<String> = items
        .iter()
        .map(|name| fmt::field(Some(&Scalar::Text(name.clone())), &Fmt::text_right(width)))
        .collect();
    multi_record(&fields, 1)
}

/// FOFT: one element name per record.
pub(crate) fn foft(deck: &Deck) -> Vec<String> {
    match &deck.sim.element_history {
        Some(items) => names(items, 5),
        None => Vec::new(),
    }
}

/// COFT: one connection name per record; connection names are two
/// element names back to back.
pub(crate) fn coft(deck: &Deck) -> Vec<String> {
    match &deck.sim.connection_history {
        Some(items) => names(items, 10),
        None => Vec::new(),
    }
}

/// GOFT: one sink/source name per record.
pub(crate) fn goft(deck: &Deck) -> Vec<String> {
    match &deck.sim.generator_history {
        Some(items) => names(items, 5),
        None => Vec::new(),
    }
}
