//! Sink/source block: GENER.

use tephra_core::GenValue;

use crate::fmt::{self, Fmt, Scalar};
use crate::record::{multi_record, record};
use crate::resolve::{Deck, GenRecord};

fn table_fields(values: &[f64]) -> Vec<String> {
    values
        .iter()
        .map(|&v| fmt::float(Some(v), &Fmt::exp(14, 7)))
        .collect()
}

fn record_1(g: &GenRecord) -> String {
    let ltab = g.table.as_ref().map(|t| t.times.len() as i64);
    let itab = g.table.as_ref().map(|_| 1);
    record([
        fmt::name(&g.name, 5),
        fmt::blank(5),
        fmt::blank(5),
        fmt::blank(5),
        fmt::blank(5),
        fmt::int(ltab, &Fmt::int(5)),
        fmt::blank(5),
        fmt::field(Some(&Scalar::Text(g.type_code.clone())), &Fmt::text(4)),
        fmt::int(itab, &Fmt::int(1)),
        fmt::float(g.rate, &Fmt::exp(10, 3)),
        fmt::float(g.enthalpy, &Fmt::exp(10, 3)),
        fmt::float(g.thickness, &Fmt::exp(10, 3)),
    ])
}

/// GENER: one main record per expanded generator, followed by the time,
/// rate, and enthalpy tables at 4 values per record.
pub(crate) fn gener(deck: &Deck) -> Vec<String> {
    let mut out = Vec::new();
    for g in &deck.gener {
        out.push(record_1(g));
        let Some(table) = &g.table else { continue };
        out.extend(multi_record(&table_fields(&table.times), 4));
        out.extend(multi_record(&table_fields(&table.rates), 4));
        match &table.enthalpy {
            Some(GenValue::Table(h)) => out.extend(multi_record(&table_fields(h), 4)),
            Some(GenValue::Scalar(h)) => {
                // A scalar enthalpy broadcasts across the table length.
                let broadcast = vec![*h; table.times.len()];
                out.extend(multi_record(&table_fields(&broadcast), 4));
            }
            None => {}
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use tephra_core::{GenKind, Generator, Options, Rock, Simulation};

    fn resolve(sim: &Simulation) -> Deck {
        let mut advisories = Vec::new();
        Deck::resolve(sim, &mut advisories).unwrap()
    }

    fn base_sim() -> Simulation {
        let mut sim = Simulation::default();
        sim.rocks.insert("SAND ".to_string(), Rock::default());
        sim.options = Some(Options::default());
        sim
    }

    #[test]
    fn constant_generator_writes_one_record() {
        let mut sim = base_sim();
        sim.generators
            .insert("WEL 1".to_string(), Generator::constant("MASS", 2.5e-2));
        let lines = gener(&resolve(&sim));
        assert_eq!(lines.len(), 1);
        let rec = &lines[0];
        assert!(rec.starts_with("WEL 1"));
        assert_eq!(&rec[35..39], "MASS");
        assert_eq!(&rec[39..40], " "); // no table, no ITAB flag
        assert_eq!(&rec[40..50], " 2.500e-02");
    }

    #[test]
    fn tabular_generator_writes_tables_at_four_per_record() {
        let mut sim = base_sim();
        sim.generators.insert(
            "PRO 1".to_string(),
            Generator {
                kind: GenKind::Single("MASS".to_string()),
                times: Some(vec![0.0, 3600.0, 7200.0, 10800.0, 14400.0]),
                rates: Some(GenValue::Table(vec![1.0, 2.0, 3.0, 4.0, 5.0])),
                specific_enthalpy: Some(GenValue::Scalar(1.0e5)),
                layer_thickness: None,
            },
        );
        let lines = gener(&resolve(&sim));
        let rec = &lines[0];
        assert_eq!(&rec[25..30], "    5"); // LTAB
        assert_eq!(&rec[39..40], "1"); // ITAB
        assert_eq!(&rec[40..50], "          "); // rate lives in the table
        // 5 values wrap into 2 records for each of times, rates, enthalpy.
        assert_eq!(lines.len(), 7);
        assert!(lines[1].starts_with(" 0.0000000e+00 3.6000000e+03"));
        assert!(lines[3].starts_with(" 1.0000000e+00 2.0000000e+00"));
        // The scalar enthalpy broadcasts across all 5 slots.
        assert!(lines[5].starts_with(" 1.0000000e+05 1.0000000e+05"));
        assert!(lines[6].starts_with(" 1.0000000e+05"));
    }
}
