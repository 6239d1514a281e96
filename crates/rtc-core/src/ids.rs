use core::fmt;
use core::num::NonZeroU32;

use crate::error::{RtcError, RtcResult};

/// Compact, stable handle into the assembled object arena.
///
/// - `u32` keeps handle lists small
/// - `NonZero` enables `Option<Id>` to be pointer-optimized
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Id(NonZeroU32);

impl Id {
    /// Create an Id from a 0-based arena slot by storing slot+1.
    pub fn from_index(index: u32) -> Self {
        Self(NonZeroU32::MIN.saturating_add(index))
    }

    /// Name a new arena slot, usually the arena's current length.
    ///
    /// Fails when slot+1 does not fit in a `u32`.
    pub fn try_from_slot(slot: usize) -> RtcResult<Self> {
        u32::try_from(slot)
            .ok()
            .and_then(|index| index.checked_add(1))
            .and_then(NonZeroU32::new)
            .map(Self)
            .ok_or_else(|| RtcError::Invariant {
                what: format!("arena slot {slot} is out of handle range"),
            })
    }

    /// Handle of an existing arena slot. Arenas only grow through
    /// [`Id::try_from_slot`], so every slot below their length fits.
    pub fn from_slot(slot: usize) -> Self {
        Self::from_index(u32::try_from(slot).unwrap_or(u32::MAX - 1))
    }

    /// Recover the 0-based index.
    pub fn index(self) -> u32 {
        self.0.get() - 1
    }

    /// Recover the 0-based index as a `usize` for slice access.
    pub fn slot(self) -> usize {
        self.index() as usize
    }
}

impl fmt::Debug for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Id({})", self.index())
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.index())
    }
}

/// Handle of an assembled rule, condition, signal, expression or connection point.
pub type ObjectId = Id;
