//! Material blocks: ROCKS, FLAC, and INDOM.

use tephra_core::ModelRecord;

use crate::fmt::{self, Fmt};
use crate::record::{model_record, record};
use crate::resolve::Deck;

// Both sub-model records are always resolved from the defaults registry,
// so the additional-record count is fixed.
const NAD: i64 = 2;

fn sub_record(model: &ModelRecord) -> String {
    model_record(fmt::int(Some(model.id), &Fmt::int(5)) + &fmt::blank(5), model)
}

/// ROCKS: two main records per material plus the relative permeability
/// and capillary pressure sub-records.
pub(crate) fn rocks(deck: &Deck) -> Vec<String> {
    let mut out = Vec::new();
    for (name, rock) in &deck.rocks {
        let axes = rock.permeability.map(|p| p.axes());
        let axis = |i: usize| axes.map(|a| a[i]);

        out.push(record([
            fmt::name(name, 5),
            fmt::int(Some(NAD), &Fmt::int(5)),
            fmt::float(rock.density, &Fmt::exp(10, 4)),
            fmt::float(rock.porosity, &Fmt::exp(10, 4)),
            fmt::float(axis(0), &Fmt::exp(10, 4)),
            fmt::float(axis(1), &Fmt::exp(10, 4)),
            fmt::float(axis(2), &Fmt::exp(10, 4)),
            fmt::float(rock.conductivity, &Fmt::exp(10, 4)),
            fmt::float(rock.specific_heat, &Fmt::exp(10, 4)),
        ]));

        out.push(record([
            fmt::float(rock.compressibility, &Fmt::exp(10, 4)),
            fmt::float(rock.expansion, &Fmt::exp(10, 4)),
            fmt::float(rock.conductivity_dry, &Fmt::exp(10, 4)),
            fmt::float(rock.tortuosity, &Fmt::exp(10, 4)),
            fmt::float(rock.klinkenberg, &Fmt::exp(10, 4)),
            fmt::float(rock.xkd3, &Fmt::exp(10, 4)),
            fmt::float(rock.xkd4, &Fmt::exp(10, 4)),
        ]));

        if let Some(model) = &rock.relative_permeability {
            out.push(sub_record(model));
        }
        if let Some(model) = &rock.capillarity {
            out.push(sub_record(model));
        }
    }
    out
}

/// FLAC: one mechanical-coupling record plus, per material, the
/// permeability law and the equivalent pore pressure model.
pub(crate) fn flac(deck: &Deck) -> Vec<String> {
    let Some(flac) = &deck.sim.flac else {
        return Vec::new();
    };
    let mut out = vec![record([
        fmt::int(Some(i64::from(flac.creep)), &Fmt::int(5)),
        fmt::int(Some(flac.porosity_model), &Fmt::int(5)),
    ])];
    for rock in deck.rocks.values() {
        if let Some(model) = &rock.permeability_model {
            // The permeability law id takes the full 10 columns.
            out.push(model_record(fmt::int(Some(model.id), &Fmt::int(10)), model));
        }
        if let Some(model) = &rock.equivalent_pore_pressure {
            out.push(sub_record(model));
        }
    }
    out
}

/// INDOM: domain-specific initial conditions for every material that
/// supplies at least one explicit slot.
pub(crate) fn indom(deck: &Deck) -> Vec<String> {
    let mut out = Vec::new();
    for (name, rock) in &deck.rocks {
        let Some(incon) = &rock.incon else { continue };
        if incon.iter().all(Option::is_none) {
            continue;
        }
        out.push(format!("{}\n", fmt::name(name, 5)));
        out.push(record(
            incon.iter().map(|&slot| fmt::float(slot, &Fmt::exp(20, 4))),
        ));
    }
    out
}
