use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{BitOr, BitOrAssign};

/// Per-cell property bitmask.
///
/// Only `FIXED` and `INSULATOR` carry meaning for stepping. Any other bits
/// are carried through load and save untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
#[repr(transparent)]
pub struct CellFlags(pub u32);

impl CellFlags {
    /// Ordinary cell: updated by the diffusion rule.
    pub const NONE: Self = Self(0);
    /// Value never changes (heat source, boundary).
    pub const FIXED: Self = Self(0x1);
    /// Blocks diffusion through itself; also never changes.
    pub const INSULATOR: Self = Self(0x2);

    pub fn bits(self) -> u32 {
        self.0
    }

    pub fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    pub fn is_fixed(self) -> bool {
        self.contains(Self::FIXED)
    }

    pub fn is_insulator(self) -> bool {
        self.contains(Self::INSULATOR)
    }

    /// True when the diffusion rule leaves this cell's value alone.
    pub fn is_frozen(self) -> bool {
        self.0 & (Self::FIXED.0 | Self::INSULATOR.0) != 0
    }
}

impl BitOr for CellFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for CellFlags {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl From<u32> for CellFlags {
    fn from(bits: u32) -> Self {
        Self(bits)
    }
}

/// Serialization format selector for saved worlds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Format {
    /// Human-readable, whitespace-separated text.
    #[default]
    Text,
    /// Compact CBOR body behind a one-line header. Lossless.
    Binary,
}

impl Format {
    /// Map the numeric format flag used on the command line (0 = text).
    pub fn from_flag(flag: u32) -> Self {
        if flag != 0 { Self::Binary } else { Self::Text }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text => f.write_str("text"),
            Self::Binary => f.write_str("binary"),
        }
    }
}
