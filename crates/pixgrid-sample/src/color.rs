use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Named overlay colours.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GridColor {
    Red,
    Green,
    Blue,
    Yellow,
    Cyan,
    Magenta,
    #[default]
    Gray,
    White,
    Black,
}

impl GridColor {
    pub const ALL: [GridColor; 9] = [
        GridColor::Red,
        GridColor::Green,
        GridColor::Blue,
        GridColor::Yellow,
        GridColor::Cyan,
        GridColor::Magenta,
        GridColor::Gray,
        GridColor::White,
        GridColor::Black,
    ];

    pub const fn rgb(self) -> [u8; 3] {
        match self {
            GridColor::Red => [255, 0, 0],
            GridColor::Green => [0, 255, 0],
            GridColor::Blue => [0, 0, 255],
            GridColor::Yellow => [255, 255, 0],
            GridColor::Cyan => [0, 255, 255],
            GridColor::Magenta => [255, 0, 255],
            GridColor::Gray => [128, 128, 128],
            GridColor::White => [255, 255, 255],
            GridColor::Black => [0, 0, 0],
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            GridColor::Red => "red",
            GridColor::Green => "green",
            GridColor::Blue => "blue",
            GridColor::Yellow => "yellow",
            GridColor::Cyan => "cyan",
            GridColor::Magenta => "magenta",
            GridColor::Gray => "gray",
            GridColor::White => "white",
            GridColor::Black => "black",
        }
    }
}

impl fmt::Display for GridColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown grid colour `{0}`")]
pub struct UnknownColor(pub String);

impl FromStr for GridColor {
    type Err = UnknownColor;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        GridColor::ALL
            .into_iter()
            .find(|c| c.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownColor(s.to_string()))
    }
}
