//! Corporate colour table and the named palettes used to colour chart series.

use std::fmt;
use std::str::FromStr;

/// Dark corporate blue, used for map maxima and hover labels.
pub const PRIMARY: &str = "#003B5C";
pub const PRIMARY_LIGHT: &str = "#0056A3";
pub const SECONDARY: &str = "#8B95A5";
pub const ACCENT: &str = "#FF8C00";
pub const ACCENT_LIGHT: &str = "#FFA500";
pub const LIGHT_GRAY: &str = "#E8EEF2";

/// An ordered list of series colours.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub name: PaletteName,
    pub colors: &'static [&'static str],
}

pub const BLUE: Palette = Palette {
    name: PaletteName::Blue,
    colors: &[
        "#003B5C", "#004A75", "#00598E", "#0068A7", "#0077C0", "#0086D9",
    ],
};

pub const ORANGE: Palette = Palette {
    name: PaletteName::Orange,
    colors: &[
        "#FF8C00", "#FF9519", "#FF9E32", "#FFA74B", "#FFB064", "#FFB97D",
    ],
};

pub const GRAY: Palette = Palette {
    name: PaletteName::Gray,
    colors: &[
        "#5A6C7D", "#6B7C8D", "#7C8C9D", "#8B95A5", "#9BA5B5", "#ABB5C5",
    ],
};

/// Palette identifiers. `Blue` is the default for every chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PaletteName {
    #[default]
    Blue,
    Orange,
    Gray,
}

impl PaletteName {
    pub fn palette(self) -> Palette {
        match self {
            PaletteName::Blue => BLUE,
            PaletteName::Orange => ORANGE,
            PaletteName::Gray => GRAY,
        }
    }

    pub fn colors(self) -> &'static [&'static str] {
        self.palette().colors
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PaletteName::Blue => "blue",
            PaletteName::Orange => "orange",
            PaletteName::Gray => "gray",
        }
    }
}

impl fmt::Display for PaletteName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown palette: {0:?} (expected blue, orange or gray)")]
pub struct UnknownPalette(pub String);

impl FromStr for PaletteName {
    type Err = UnknownPalette;

    /// Accepts the short names and the `*Gradient` keys stored by older dashboards.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "blue" | "bluegradient" => Ok(PaletteName::Blue),
            "orange" | "orangegradient" => Ok(PaletteName::Orange),
            "gray" | "grey" | "graygradient" => Ok(PaletteName::Gray),
            _ => Err(UnknownPalette(s.to_string())),
        }
    }
}

/// Fixed three-stop gradient used for choropleth maps, lightest first.
pub fn map_colorscale() -> [(f64, &'static str); 3] {
    [(0.0, LIGHT_GRAY), (0.5, PRIMARY_LIGHT), (1.0, PRIMARY)]
}
