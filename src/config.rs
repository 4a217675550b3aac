use std::time::Duration;

/// How tokens on a grid row are separated.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum Separator {
    /// Tokens are separated by a single space, e.g. `A 0 B`.
    #[default]
    Space,
    /// No separator; every character is a token, e.g. `A0B`.
    NoSpace,
}

impl Separator {
    /// Split one row of input into its tokens.
    pub fn split<'a>(&self, row: &'a str) -> Vec<&'a str> {
        match self {
            Self::Space => row.split(' ').collect(),
            // char boundaries, so multi-byte color glyphs stay whole
            Self::NoSpace => row.char_indices()
                .map(|(start, c)| &row[start..start + c.len_utf8()])
                .collect(),
        }
    }

    /// The separator as it appears between tokens.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Space => " ",
            Self::NoSpace => "",
        }
    }
}

/// Knobs shared by parsing and solving.
#[derive(Clone, Debug, Default)]
pub struct Settings {
    /// Separator between tokens of a row.
    pub separator: Separator,
    /// Reject puzzles where some color does not appear exactly twice.
    pub strict_pairs: bool,
    /// Give up and report [`Outcome::Unknown`](crate::Outcome::Unknown) after this long.
    ///
    /// The solver thread is not cancelled when time runs out; it keeps a core busy until it finishes on its own.
    /// Submitting many formulas that time out leaves that many threads running.
    pub timeout: Option<Duration>,
}

/// Parse a timeout given in (possibly fractional) seconds.
///
/// Negative, NaN, infinite or overflowing values are rejected rather than treated as "no timeout".
pub fn parse_timeout(secs: &str) -> Result<Duration, String> {
    let value = secs.trim().parse::<f64>()
        .map_err(|err| format!("{:?} is not a number of seconds: {}", secs, err))?;
    Duration::try_from_secs_f64(value)
        .map_err(|err| format!("{:?} is not a usable timeout: {}", secs, err))
}
