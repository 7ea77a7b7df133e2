//! Fixed-width field formatting.
//!
//! A [`Fmt`] pairs a field width/precision template with justification
//! and numeric style; [`field`] renders one value against it. The rules
//! mirror the simulator's fixed-column conventions:
//!
//! - a missing value is an all-blank field of the declared width, never a
//!   ragged-width output;
//! - a text value under a numeric style keeps the declared width and
//!   justification but bypasses exponent notation;
//! - floats under [`Style::Exp`] use a fixed mantissa precision with a
//!   signed two-digit exponent (`2.6000e+03`), right-justified.
//!
//! The formatter assumes pre-validated input: it never fails, it only
//! renders. Shape and type contracts are enforced by the validation gate
//! before any field reaches this module.

/// A single field value.
#[derive(Clone, Debug, PartialEq)]
pub enum Scalar {
    /// Integer value, rendered right-justified.
    Int(i64),
    /// Floating-point value.
    Float(f64),
    /// Text value; bypasses numeric styles at the declared width.
    Text(String),
}

/// Numeric rendering style.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Style {
    /// Exponential notation with fixed mantissa precision.
    Exp,
    /// General notation; integral floats render bare.
    General,
    /// Plain text.
    Text,
}

/// Field justification.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Align {
    /// Pad on the right.
    Left,
    /// Pad on the left.
    Right,
}

/// A field width/precision template. Purely descriptive; carries no
/// mutable state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Fmt {
    /// Declared field width in columns.
    pub width: usize,
    /// Mantissa precision for [`Style::Exp`], or a truncation limit for
    /// text values.
    pub precision: Option<usize>,
    /// Numeric rendering style.
    pub style: Style,
    /// Justification within the field.
    pub align: Align,
}

impl Fmt {
    /// Right-justified exponential field, e.g. `Fmt::exp(10, 4)` for
    /// `10.4e` columns.
    pub const fn exp(width: usize, precision: usize) -> Self {
        Self {
            width,
            precision: Some(precision),
            style: Style::Exp,
            align: Align::Right,
        }
    }

    /// Right-justified integer field.
    pub const fn int(width: usize) -> Self {
        Self {
            width,
            precision: None,
            style: Style::General,
            align: Align::Right,
        }
    }

    /// Left-justified name field, truncated to the declared width.
    pub const fn name(width: usize) -> Self {
        Self {
            width,
            precision: Some(width),
            style: Style::Text,
            align: Align::Left,
        }
    }

    /// Left-justified text field without truncation.
    pub const fn text(width: usize) -> Self {
        Self {
            width,
            precision: None,
            style: Style::Text,
            align: Align::Left,
        }
    }

    /// Right-justified text field without truncation.
    pub const fn text_right(width: usize) -> Self {
        Self {
            width,
            precision: None,
            style: Style::Text,
            align: Align::Right,
        }
    }
}

/// An all-blank field of the given width.
pub fn blank(width: usize) -> String {
    " ".repeat(width)
}

/// Render one value into a fixed-width field. `None` and the empty
/// string render as blanks of the declared width.
pub fn field(value: Option<&Scalar>, fmt: &Fmt) -> String {
    let Some(value) = value else {
        return blank(fmt.width);
    };
    match value {
        Scalar::Text(s) if s.is_empty() => blank(fmt.width),
        Scalar::Text(s) => text_field(s, fmt),
        Scalar::Int(i) => match fmt.style {
            Style::Exp => justify(
                &exp_notation(*i as f64, fmt.precision.unwrap_or(6)),
                fmt,
            ),
            _ => justify(&i.to_string(), fmt),
        },
        Scalar::Float(x) => match fmt.style {
            Style::Exp => justify(&exp_notation(*x, fmt.precision.unwrap_or(6)), fmt),
            Style::General => justify(&general_notation(*x), fmt),
            Style::Text => justify(&x.to_string(), fmt),
        },
    }
}

/// Convenience wrapper: format an optional float.
pub fn float(x: Option<f64>, fmt: &Fmt) -> String {
    field(x.map(Scalar::Float).as_ref(), fmt)
}

/// Convenience wrapper: format an optional integer.
pub fn int(x: Option<i64>, fmt: &Fmt) -> String {
    field(x.map(Scalar::Int).as_ref(), fmt)
}

/// Convenience wrapper: format a name at [`Fmt::name`] width.
pub fn name(s: &str, width: usize) -> String {
    field(Some(&Scalar::Text(s.to_string())), &Fmt::name(width))
}

fn text_field(s: &str, fmt: &Fmt) -> String {
    // A numeric template given a text value keeps width, precision, and
    // justification but never applies exponent notation.
    let truncated: String = match fmt.precision {
        Some(p) => s.chars().take(p).collect(),
        None => s.to_string(),
    };
    justify(&truncated, fmt)
}

fn justify(s: &str, fmt: &Fmt) -> String {
    let len = s.chars().count();
    if len >= fmt.width {
        return s.to_string();
    }
    let pad = blank(fmt.width - len);
    match fmt.align {
        Align::Left => format!("{s}{pad}"),
        Align::Right => format!("{pad}{s}"),
    }
}

/// Exponential notation with a signed two-digit exponent, matching the
/// simulator's expectations (`1.000e-13`, `2.6000e+03`).
fn exp_notation(x: f64, precision: usize) -> String {
    if !x.is_finite() {
        return x.to_string();
    }
    let rendered = format!("{:.*e}", precision, x);
    let Some((mantissa, exponent)) = rendered.split_once('e') else {
        return rendered;
    };
    let exp: i32 = exponent.parse().unwrap_or(0);
    if exp < 0 {
        format!("{mantissa}e-{:02}", -exp)
    } else {
        format!("{mantissa}e+{exp:02}")
    }
}

fn general_notation(x: f64) -> String {
    if x.is_finite() && x.fract() == 0.0 && x.abs() < 1.0e15 {
        format!("{}", x as i64)
    } else {
        format!("{x}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn none_is_all_blanks() {
        assert_eq!(field(None, &Fmt::exp(10, 4)), "          ");
        assert_eq!(field(None, &Fmt::int(5)), "     ");
    }

    #[test]
    fn empty_string_is_all_blanks() {
        let v = Scalar::Text(String::new());
        assert_eq!(field(Some(&v), &Fmt::exp(10, 4)), "          ");
    }

    #[test]
    fn exp_notation_fixed_cases() {
        assert_eq!(float(Some(2600.0), &Fmt::exp(10, 4)), "2.6000e+03");
        assert_eq!(float(Some(1.0e-13), &Fmt::exp(10, 3)), " 1.000e-13");
        assert_eq!(float(Some(0.0), &Fmt::exp(10, 4)), "0.0000e+00");
        assert_eq!(float(Some(-9.81), &Fmt::exp(11, 4)), "-9.8100e+00");
    }

    #[test]
    fn text_bypasses_exponent_style() {
        let v = Scalar::Text("Z0".to_string());
        let out = field(
            Some(&v),
            &Fmt {
                width: 2,
                precision: None,
                style: Style::Exp,
                align: Align::Right,
            },
        );
        assert_eq!(out, "Z0");
    }

    #[test]
    fn name_truncates_and_left_justifies() {
        assert_eq!(name("SANDSTONE", 5), "SANDS");
        assert_eq!(name("CAP", 5), "CAP  ");
    }

    #[test]
    fn int_right_justifies() {
        assert_eq!(int(Some(2), &Fmt::int(5)), "    2");
        assert_eq!(int(Some(-1), &Fmt::int(9)), "       -1");
    }

    proptest! {
        #[test]
        fn width_is_exact_for_plausible_magnitudes(
            x in -1.0e99..1.0e99f64,
        ) {
            let out = float(Some(x), &Fmt::exp(20, 4));
            prop_assert_eq!(out.len(), 20);
        }

        #[test]
        fn none_width_matches_any_template(w in 1usize..40) {
            prop_assert_eq!(field(None, &Fmt::exp(w, 4)).len(), w);
            prop_assert_eq!(field(None, &Fmt::int(w)).len(), w);
        }

        #[test]
        fn names_always_fill_declared_width(s in "[A-Z ]{0,12}", w in 1usize..8) {
            prop_assert_eq!(name(&s, w).chars().count(), w);
        }
    }
}
