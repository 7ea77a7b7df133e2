//! Block encoders and the ordered inclusion table.
//!
//! Each deck block is a [`BlockSpec`]: a 5-character keyword, an
//! inclusion predicate over the merged [`Deck`], a pre-encoding validate
//! hook, and a body encoder. [`SEQUENCE`] is the single source of block
//! order; the assembler walks it once per write.
//!
//! Encoders are stateless and infallible: every cross-field check runs in
//! the validate phase, so by the time a body is produced the input is
//! known good.

pub(crate) mod gener;
pub(crate) mod history;
pub(crate) mod multi;
pub(crate) mod output;
pub(crate) mod param;
pub(crate) mod rocks;

use tephra_core::{defaults, Advisory, WriteError};

use crate::resolve::Deck;

/// The 75-column ruler appended to every block keyword.
pub(crate) const RULER: &str =
    "----1----*----2----*----3----*----4----*----5----*----6----*----7----*----8";

/// One block header line: keyword padded to 5 columns plus the ruler.
pub(crate) fn header(keyword: &str) -> String {
    format!("{keyword:<5}{RULER}\n")
}

/// Outcome of an inclusion predicate.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum Inclusion {
    /// Emit the block.
    Include,
    /// The configuration does not request the block.
    Omit,
    /// The block was requested but the target format version does not
    /// support it; warn and leave it out.
    Skip(Advisory),
}

/// One entry of the inclusion table.
pub(crate) struct BlockSpec {
    /// Block keyword, at most 5 characters.
    pub keyword: &'static str,
    /// Whether the body spans a variable number of records; such blocks
    /// are closed with a blank line.
    pub multi: bool,
    /// End-of-file markers never take the blank terminator.
    pub terminal: bool,
    /// Inclusion predicate over the merged deck.
    pub include: fn(&Deck) -> Inclusion,
    /// Cross-field checks, run for every included block before any body
    /// is encoded.
    pub validate: fn(&Deck) -> Result<(), WriteError>,
    /// Body encoder; records only, the header is added by the assembler.
    pub encode: fn(&Deck) -> Vec<String>,
}

fn always(_: &Deck) -> Inclusion {
    Inclusion::Include
}

fn valid(_: &Deck) -> Result<(), WriteError> {
    Ok(())
}

fn empty(_: &Deck) -> Vec<String> {
    Vec::new()
}

fn when(on: bool) -> Inclusion {
    if on {
        Inclusion::Include
    } else {
        Inclusion::Omit
    }
}

fn include_flac(deck: &Deck) -> Inclusion {
    when(deck.sim.flac.is_some())
}

fn include_multi(deck: &Deck) -> Inclusion {
    when(deck.multi.is_some())
}

fn include_selec(deck: &Deck) -> Inclusion {
    when(matches!(deck.sim.eos.as_deref(), Some(name) if defaults::eos_requires_selec(name)))
}

fn include_solvr(deck: &Deck) -> Inclusion {
    when(deck.sim.solver.is_some())
}

fn include_start(deck: &Deck) -> Inclusion {
    when(deck.sim.start)
}

fn include_indom(deck: &Deck) -> Inclusion {
    when(deck.indom)
}

fn include_momop(deck: &Deck) -> Inclusion {
    versioned(deck, "MOMOP", deck.sim.more_options.is_some())
}

fn include_times(deck: &Deck) -> Inclusion {
    when(deck.sim.times.is_some())
}

fn include_foft(deck: &Deck) -> Inclusion {
    when(deck.sim.element_history.is_some())
}

fn include_coft(deck: &Deck) -> Inclusion {
    when(deck.sim.connection_history.is_some())
}

fn include_goft(deck: &Deck) -> Inclusion {
    when(deck.sim.generator_history.is_some())
}

fn include_gener(deck: &Deck) -> Inclusion {
    when(!deck.sim.generators.is_empty())
}

fn include_diffu(deck: &Deck) -> Inclusion {
    when(deck.sim.diffusion.is_some())
}

fn include_outpu(deck: &Deck) -> Inclusion {
    versioned(deck, "OUTPU", deck.sim.output.is_some())
}

fn include_nover(deck: &Deck) -> Inclusion {
    when(deck.sim.nover)
}

fn include_endfi(deck: &Deck) -> Inclusion {
    when(deck.sim.endfi)
}

fn include_endcy(deck: &Deck) -> Inclusion {
    when(!deck.sim.endfi)
}

/// Requested blocks that only exist in the extended format are skipped
/// with an advisory, never a failure.
fn versioned(deck: &Deck, keyword: &'static str, requested: bool) -> Inclusion {
    if !requested {
        Inclusion::Omit
    } else if deck.sim.version.supports_extended_blocks() {
        Inclusion::Include
    } else {
        Inclusion::Skip(Advisory::VersionSkip {
            keyword,
            version: deck.sim.version,
        })
    }
}

/// The fixed block order of a deck. ENDFI and ENDCY are mutually
/// exclusive terminals; exactly one of them closes every deck.
pub(crate) const SEQUENCE: &[BlockSpec] = &[
    BlockSpec {
        keyword: "ROCKS",
        multi: true,
        terminal: false,
        include: always,
        validate: valid,
        encode: rocks::rocks,
    },
    BlockSpec {
        keyword: "FLAC",
        multi: true,
        terminal: false,
        include: include_flac,
        validate: valid,
        encode: rocks::flac,
    },
    BlockSpec {
        keyword: "MULTI",
        multi: false,
        terminal: false,
        include: include_multi,
        validate: valid,
        encode: multi::multi,
    },
    BlockSpec {
        keyword: "SELEC",
        multi: false,
        terminal: false,
        include: include_selec,
        validate: valid,
        encode: multi::selec,
    },
    BlockSpec {
        keyword: "SOLVR",
        multi: false,
        terminal: false,
        include: include_solvr,
        validate: valid,
        encode: multi::solvr,
    },
    BlockSpec {
        keyword: "START",
        multi: false,
        terminal: false,
        include: include_start,
        validate: valid,
        encode: param::start,
    },
    BlockSpec {
        keyword: "PARAM",
        multi: false,
        terminal: false,
        include: always,
        validate: param::validate,
        encode: param::param,
    },
    BlockSpec {
        keyword: "INDOM",
        multi: true,
        terminal: false,
        include: include_indom,
        validate: valid,
        encode: rocks::indom,
    },
    BlockSpec {
        keyword: "MOMOP",
        multi: false,
        terminal: false,
        include: include_momop,
        validate: valid,
        encode: param::momop,
    },
    BlockSpec {
        keyword: "TIMES",
        multi: true,
        terminal: false,
        include: include_times,
        validate: valid,
        encode: history::times,
    },
    BlockSpec {
        keyword: "FOFT",
        multi: true,
        terminal: false,
        include: include_foft,
        validate: valid,
        encode: history::foft,
    },
    BlockSpec {
        keyword: "COFT",
        multi: true,
        terminal: false,
        include: include_coft,
        validate: valid,
        encode: history::coft,
    },
    BlockSpec {
        keyword: "GOFT",
        multi: true,
        terminal: false,
        include: include_goft,
        validate: valid,
        encode: history::goft,
    },
    BlockSpec {
        keyword: "GENER",
        multi: true,
        terminal: false,
        include: include_gener,
        validate: valid,
        encode: gener::gener,
    },
    BlockSpec {
        keyword: "DIFFU",
        multi: false,
        terminal: false,
        include: include_diffu,
        validate: output::validate_diffu,
        encode: output::diffu,
    },
    BlockSpec {
        keyword: "OUTPU",
        multi: false,
        terminal: false,
        include: include_outpu,
        validate: output::validate_outpu,
        encode: output::outpu,
    },
    BlockSpec {
        keyword: "NOVER",
        multi: false,
        terminal: false,
        include: include_nover,
        validate: valid,
        encode: empty,
    },
    BlockSpec {
        keyword: "ENDFI",
        multi: false,
        terminal: true,
        include: include_endfi,
        validate: valid,
        encode: empty,
    },
    BlockSpec {
        keyword: "ENDCY",
        multi: false,
        terminal: true,
        include: include_endcy,
        validate: valid,
        encode: empty,
    },
];

#[cfg(test)]
mod tests {
    use super::*;
    use tephra_core::{FormatVersion, Momop, Options, Rock, Simulation};

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

    fn included(deck: &Deck) -> Vec<&'static str> {
        SEQUENCE
            .iter()
            .filter(|spec| (spec.include)(deck) == Inclusion::Include)
            .map(|spec| spec.keyword)
            .collect()
    }

    #[test]
    fn header_is_80_columns() {
        let line = header("ROCKS");
        assert_eq!(line.len(), 81);
        assert!(line.starts_with("ROCKS----1"));
        let line = header("FLAC");
        assert_eq!(line.len(), 81);
        assert!(line.starts_with("FLAC ----1"));
    }

    #[test]
    fn minimal_deck_includes_only_mandatory_blocks() {
        let deck = resolve(&base_sim());
        assert_eq!(included(&deck), vec!["ROCKS", "PARAM", "ENDCY"]);
    }

    #[test]
    fn endfi_and_endcy_are_exclusive() {
        let mut sim = base_sim();
        sim.endfi = true;
        let deck = resolve(&sim);
        let keys = included(&deck);
        assert!(keys.contains(&"ENDFI"));
        assert!(!keys.contains(&"ENDCY"));
    }

    #[test]
    fn selec_follows_the_model_subset() {
        let mut sim = base_sim();
        sim.eos = Some("eco2n".to_string());
        let keys = included(&resolve(&sim));
        assert!(keys.contains(&"MULTI"));
        assert!(keys.contains(&"SELEC"));

        sim.eos = Some("eos1".to_string());
        let keys = included(&resolve(&sim));
        assert!(keys.contains(&"MULTI"));
        assert!(!keys.contains(&"SELEC"));
    }

    #[test]
    fn momop_skips_on_the_legacy_version() {
        let mut sim = base_sim();
        sim.more_options = Some(Momop::default());
        sim.version = FormatVersion::Tough2;
        let deck = resolve(&sim);
        let spec = SEQUENCE.iter().find(|s| s.keyword == "MOMOP").unwrap();
        match (spec.include)(&deck) {
            Inclusion::Skip(Advisory::VersionSkip { keyword, version }) => {
                assert_eq!(keyword, "MOMOP");
                assert_eq!(version, FormatVersion::Tough2);
            }
            other => panic!("expected Skip, got {other:?}"),
        }
    }

    #[test]
    fn unrelated_flags_do_not_disturb_other_predicates() {
        let mut sim = base_sim();
        let before = included(&resolve(&sim));
        sim.nover = true;
        let after = included(&resolve(&sim));
        // NOVER joins; nothing else moves.
        assert_eq!(
            after.iter().filter(|k| **k != "NOVER").collect::<Vec<_>>(),
            before.iter().collect::<Vec<_>>()
        );
    }

    #[test]
    fn sequence_order_is_fixed() {
        let keys: Vec<_> = SEQUENCE.iter().map(|s| s.keyword).collect();
        assert_eq!(
            keys,
            vec![
                "ROCKS", "FLAC", "MULTI", "SELEC", "SOLVR", "START", "PARAM", "INDOM",
                "MOMOP", "TIMES", "FOFT", "COFT", "GOFT", "GENER", "DIFFU", "OUTPU",
                "NOVER", "ENDFI", "ENDCY",
            ]
        );
    }

    #[test]
    fn only_variable_length_blocks_take_the_terminator() {
        for spec in SEQUENCE {
            if spec.terminal {
                assert!(!spec.multi, "{} cannot be both", spec.keyword);
            }
        }
    }
}
