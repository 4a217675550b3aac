use std::fmt::{Display, Formatter};

use crate::palette::ColorID;

/// Token marking a cell no terminus sits on.
pub const EMPTY_TOKEN: &str = "0";

/// A cell as read from input.
#[derive(Clone, Debug, Default, Eq, Hash, PartialEq)]
pub enum Label {
    /// Written as [`EMPTY_TOKEN`].
    #[default]
    Empty,
    /// Any other token; a flow endpoint of this color.
    Color(String),
}

impl From<&str> for Label {
    fn from(token: &str) -> Self {
        match token {
            EMPTY_TOKEN => Self::Empty,
            color => Self::Color(color.to_owned()),
        }
    }
}

impl Display for Label {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => write!(f, "{}", EMPTY_TOKEN),
            Self::Color(color) => write!(f, "{}", color),
        }
    }
}

/// A cell classified against the palette, ready for constraint generation.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub(crate) enum Cell {
    Terminus { color: ColorID },
    Passthrough,
}
