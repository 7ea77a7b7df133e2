//! 80-column record assembly.
//!
//! Every deck line is exactly [`LINE_WIDTH`] columns plus a newline.
//! [`record`] concatenates pre-formatted fields and pads or truncates to
//! that width; [`multi_record`] wraps a long homogeneous field sequence
//! into as many records as needed, preserving order.

use tephra_core::ModelRecord;

use crate::fmt::{self, Fmt};

/// Fixed record width of the deck format.
pub const LINE_WIDTH: usize = 80;

/// Default number of values per record for wrapped sequences.
pub const DEFAULT_COLUMNS: usize = 8;

/// Assemble one newline-terminated 80-column record from pre-formatted
/// fields. The concatenation is padded with blanks or truncated so the
/// record body is exactly [`LINE_WIDTH`] columns.
pub fn record<I>(fields: I) -> String
where
    I: IntoIterator<Item = String>,
{
    let joined: String = fields.into_iter().collect();
    let mut line = String::with_capacity(LINE_WIDTH + 1);
    let mut n = 0;
    for c in joined.chars() {
        if n == LINE_WIDTH {
            break;
        }
        line.push(c);
        n += 1;
    }
    for _ in n..LINE_WIDTH {
        line.push(' ');
    }
    line.push('\n');
    line
}

/// Wrap a homogeneous field sequence into records of at most `ncol`
/// values each. Order is preserved and the final record may be shorter;
/// an empty sequence produces no records.
pub fn multi_record(fields: &[String], ncol: usize) -> Vec<String> {
    fields
        .chunks(ncol.max(1))
        .map(|chunk| record(chunk.iter().cloned()))
        .collect()
}

/// One sub-model record: a pre-formatted id field followed by at most 7
/// parameters at `10.3e`.
pub fn model_record(id_field: String, model: &ModelRecord) -> String {
    let mut fields = Vec::with_capacity(8);
    fields.push(id_field);
    for &p in model.parameters.iter().take(7) {
        fields.push(fmt::float(Some(p), &Fmt::exp(10, 3)));
    }
    record(fields)
}
