//! Diffusion and printout blocks: DIFFU and OUTPU.

use tephra_core::WriteError;

use crate::fmt::{self, Fmt};
use crate::record::{multi_record, DEFAULT_COLUMNS};
use crate::resolve::Deck;

/// The diffusion table needs a resolved phase count, and each row must
/// carry one coefficient per phase.
pub(crate) fn validate_diffu(deck: &Deck) -> Result<(), WriteError> {
    let Some(diffusion) = &deck.sim.diffusion else {
        return Ok(());
    };
    let Some(multi) = &deck.multi else {
        return Err(WriteError::DiffusionRequiresEos);
    };
    let nph = multi.nph as usize;
    for (row, values) in [("mass1", &diffusion.mass1), ("mass2", &diffusion.mass2)] {
        if values.len() != nph {
            return Err(WriteError::DiffusionShape {
                row,
                expected: nph,
                actual: values.len(),
            });
        }
    }
    Ok(())
}

/// DIFFU: one wrapped row of coefficients per mass component.
pub(crate) fn diffu(deck: &Deck) -> Vec<String> {
    let Some(diffusion) = &deck.sim.diffusion else {
        return Vec::new();
    };
    let mut out = Vec::new();
    for row in [&diffusion.mass1, &diffusion.mass2] {
        let fields: Vec<String> = row
            .iter()
            .map(|&v| fmt::float(Some(v), &Fmt::exp(10, 3)))
            .collect();
        out.extend(multi_record(&fields, DEFAULT_COLUMNS));
    }
    out
}

/// Each output variable takes at most two column specifiers.
pub(crate) fn validate_outpu(deck: &Deck) -> Result<(), WriteError> {
    let Some(output) = &deck.sim.output else {
        return Ok(());
    };
    for (variable, columns) in &output.variables {
        if columns.len() > 2 {
            return Err(WriteError::OutputArity {
                variable: variable.clone(),
                len: columns.len(),
            });
        }
    }
    Ok(())
}

/// OUTPU: format keyword, variable count, then one upper-cased variable
/// per line with its column specifiers.
pub(crate) fn outpu(deck: &Deck) -> Vec<String> {
    let Some(output) = &deck.sim.output else {
        return Vec::new();
    };
    let mut out = Vec::new();
    match &output.format {
        Some(format) => out.push(format!("{:<20}\n", format.to_uppercase())),
        None => out.push("\n".to_string()),
    }
    if !output.variables.is_empty() {
        out.push(format!("{:<15}\n", output.variables.len()));
        for (variable, columns) in &output.variables {
            let mut line = format!("{:<20}", variable.to_uppercase());
            for &c in columns.iter().take(2) {
                line.push_str(&fmt::int(Some(c), &Fmt::int(5)));
            }
            line.push('\n');
            out.push(line);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use tephra_core::{Diffusion, Options, Output, Rock, Simulation};

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
    fn diffu_requires_a_physical_model() {
        let mut sim = base_sim();
        sim.diffusion = Some(Diffusion {
            mass1: vec![1.0e-5, 1.0e-10],
            mass2: vec![2.0e-5, 2.0e-10],
        });
        let deck = resolve(&sim);
        assert_eq!(validate_diffu(&deck), Err(WriteError::DiffusionRequiresEos));
    }

    #[test]
    fn diffu_rows_must_match_the_phase_count() {
        let mut sim = base_sim();
        sim.eos = Some("eos3".to_string()); // 2 phases
        sim.diffusion = Some(Diffusion {
            mass1: vec![1.0e-5, 1.0e-10],
            mass2: vec![2.0e-5],
        });
        let deck = resolve(&sim);
        assert_eq!(
            validate_diffu(&deck),
            Err(WriteError::DiffusionShape {
                row: "mass2",
                expected: 2,
                actual: 1,
            })
        );
    }

    #[test]
    fn diffu_writes_one_row_per_component() {
        let mut sim = base_sim();
        sim.eos = Some("eos3".to_string());
        sim.diffusion = Some(Diffusion {
            mass1: vec![1.0e-5, 1.0e-10],
            mass2: vec![2.0e-5, 2.0e-10],
        });
        let deck = resolve(&sim);
        validate_diffu(&deck).unwrap();
        let lines = diffu(&deck);
        assert_eq!(lines.len(), 2);
        assert_eq!(&lines[0][0..20], " 1.000e-05 1.000e-10");
        assert_eq!(&lines[1][0..20], " 2.000e-05 2.000e-10");
    }

    #[test]
    fn outpu_upper_cases_and_limits_specifiers() {
        let mut sim = base_sim();
        let mut output = Output::default();
        output.format = Some("csv".to_string());
        output.variables.insert("pressure".to_string(), vec![]);
        output.variables.insert("saturation".to_string(), vec![2]);
        sim.output = Some(output);
        let deck = resolve(&sim);
        validate_outpu(&deck).unwrap();
        let lines = outpu(&deck);
        assert_eq!(lines[0], format!("{:<20}\n", "CSV"));
        assert_eq!(lines[1], format!("{:<15}\n", 2));
        assert_eq!(lines[2], format!("{:<20}\n", "PRESSURE"));
        assert_eq!(lines[3], format!("{:<20}    2\n", "SATURATION"));
    }

    #[test]
    fn outpu_rejects_more_than_two_specifiers() {
        let mut sim = base_sim();
        let mut output = Output::default();
        output
            .variables
            .insert("velocity".to_string(), vec![1, 2, 3]);
        sim.output = Some(output);
        let deck = resolve(&sim);
        assert_eq!(
            validate_outpu(&deck),
            Err(WriteError::OutputArity {
                variable: "velocity".to_string(),
                len: 3,
            })
        );
    }
}
