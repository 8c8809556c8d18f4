use serde::{Deserialize, Serialize};
use std::fmt;

/// Which repair operation a cooldown belongs to.
///
/// The two tracks expire independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CooldownTrack {
    /// Repairing the item held in hand.
    Hand,
    /// Repairing the whole inventory.
    All,
}

impl CooldownTrack {
    pub const ALL_TRACKS: [CooldownTrack; 2] = [CooldownTrack::Hand, CooldownTrack::All];

    pub fn as_str(self) -> &'static str {
        match self {
            CooldownTrack::Hand => "hand",
            CooldownTrack::All => "all",
        }
    }
}

impl fmt::Display for CooldownTrack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
