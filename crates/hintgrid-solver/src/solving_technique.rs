use std::{fmt, str::FromStr};

use derive_more::{Display, Error};

/// Stable identifiers of the solving techniques, ordered by difficulty.
///
/// The declaration order is the default priority used by
/// [`all_finders`](crate::technique::all_finders).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SolvingTechnique {
    /// A house missing a single value.
    FullHouse,
    /// A cell with a single candidate.
    NakedSingle,
    /// A value with a single position in a house.
    HiddenSingle,
    /// Two cells of a block and line sharing two candidates.
    LockedPair,
    /// Three cells of a block and line sharing three candidates.
    LockedTriple,
    /// A block's candidates confined to one line.
    LockedCandidatesPointing,
    /// A line's candidates confined to one block.
    LockedCandidatesClaiming,
    /// Two values confined to two cells of a house.
    HiddenPair,
    /// Three values confined to three cells of a house.
    HiddenTriple,
    /// Four values confined to four cells of a house.
    HiddenQuadruple,
    /// Two cells of a house sharing two candidates.
    NakedPair,
    /// Three cells of a house sharing three candidates.
    NakedTriple,
    /// Four cells of a house sharing four candidates.
    NakedQuadruple,
    /// Basic fish of size two.
    XWing,
    /// Basic fish of size three.
    Swordfish,
    /// Basic fish of size four.
    Jellyfish,
    /// Two conjugate pairs joined in a line.
    Skyscraper,
    /// A row and column conjugate pair joined in a block.
    TwoStringKite,
    /// Unique rectangle with one deviating cell.
    UniqueRectangleType1,
    /// Unique rectangle with one shared extra candidate.
    UniqueRectangleType2,
    /// Unique rectangle with a conjugate pair on the roof.
    UniqueRectangleType4,
    /// A chain of identical bivalue cells.
    RemotePair,
    /// An alternating single-value chain.
    XChain,
}

impl SolvingTechnique {
    /// All techniques in priority order.
    pub const ALL: [Self; 23] = [
        Self::FullHouse,
        Self::NakedSingle,
        Self::HiddenSingle,
        Self::LockedPair,
        Self::LockedTriple,
        Self::LockedCandidatesPointing,
        Self::LockedCandidatesClaiming,
        Self::HiddenPair,
        Self::HiddenTriple,
        Self::HiddenQuadruple,
        Self::NakedPair,
        Self::NakedTriple,
        Self::NakedQuadruple,
        Self::XWing,
        Self::Swordfish,
        Self::Jellyfish,
        Self::Skyscraper,
        Self::TwoStringKite,
        Self::UniqueRectangleType1,
        Self::UniqueRectangleType2,
        Self::UniqueRectangleType4,
        Self::RemotePair,
        Self::XChain,
    ];

    /// Returns the display name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::FullHouse => "Full House",
            Self::NakedSingle => "Naked Single",
            Self::HiddenSingle => "Hidden Single",
            Self::LockedPair => "Locked Pair",
            Self::LockedTriple => "Locked Triple",
            Self::LockedCandidatesPointing => "Locked Candidates Type 1 (Pointing)",
            Self::LockedCandidatesClaiming => "Locked Candidates Type 2 (Claiming)",
            Self::HiddenPair => "Hidden Pair",
            Self::HiddenTriple => "Hidden Triple",
            Self::HiddenQuadruple => "Hidden Quadruple",
            Self::NakedPair => "Naked Pair",
            Self::NakedTriple => "Naked Triple",
            Self::NakedQuadruple => "Naked Quadruple",
            Self::XWing => "X-Wing",
            Self::Swordfish => "Swordfish",
            Self::Jellyfish => "Jellyfish",
            Self::Skyscraper => "Skyscraper",
            Self::TwoStringKite => "2-String Kite",
            Self::UniqueRectangleType1 => "Unique Rectangle Type 1",
            Self::UniqueRectangleType2 => "Unique Rectangle Type 2",
            Self::UniqueRectangleType4 => "Unique Rectangle Type 4",
            Self::RemotePair => "Remote Pair",
            Self::XChain => "X-Chain",
        }
    }

    /// Returns the difficulty rank; lower is easier.
    #[must_use]
    pub const fn difficulty(self) -> usize {
        self as usize
    }
}

impl fmt::Display for SolvingTechnique {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when parsing an unknown technique name.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
#[display("unknown solving technique {name:?}")]
pub struct UnknownTechnique {
    name: String,
}

impl FromStr for SolvingTechnique {
    type Err = UnknownTechnique;

    /// Parses a display name, ignoring ASCII case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|technique| technique.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownTechnique { name: s.to_owned() })
    }
}
