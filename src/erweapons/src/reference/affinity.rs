//! Weapon affinities

use super::Kind;

named_kind! {
    /// A weapon affinity.
    ///
    /// `Standard` and `Special` never come from an Ash of War: the sources
    /// write both as `None` and they are told apart during normalization.
    pub enum Affinity {
        Standard => "Standard",
        Heavy => "Heavy",
        Keen => "Keen",
        Quality => "Quality",
        Fire => "Fire",
        FlameArt => "Flame Art",
        Lightning => "Lightning",
        Sacred => "Sacred",
        Magic => "Magic",
        Cold => "Cold",
        Poison => "Poison",
        Blood => "Blood",
        Occult => "Occult",
        Special => "Special",
    }
}

/// Spreadsheet name of the placeholder affinity for uninfused weapons
pub const PLACEHOLDER_AFFINITY: &str = "None";

/// Affinity as written in the extra data source, before resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RawAffinity {
    /// Written as `None`: either uninfused or not infusable at all
    Unset,
    Infused(Affinity),
}

impl RawAffinity {
    /// Parse a spreadsheet affinity.
    ///
    /// Only `None` and Ash of War affinities are accepted. `Standard` and
    /// `Special` are resolved from `None`, so a raw one is rejected.
    pub fn from_name(name: &str) -> Option<Self> {
        if name == PLACEHOLDER_AFFINITY {
            return Some(Self::Unset);
        }
        Affinity::from_name(name)
            .filter(|affinity| !matches!(affinity, Affinity::Standard | Affinity::Special))
            .map(Self::Infused)
    }

    pub fn is_unset(self) -> bool {
        matches!(self, Self::Unset)
    }
}

impl std::fmt::Display for RawAffinity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unset => f.write_str(PLACEHOLDER_AFFINITY),
            Self::Infused(affinity) => write!(f, "{}", affinity),
        }
    }
}
