//! Code lookup tables and their fallback policy.
//!
//! Every byte that indexes a table goes through a [`CodeTable`]. A miss is
//! never an error: the table's [`Fallback`] decides whether a fixed default is
//! substituted or the raw code is reported as `Unknown (<code>)`.

use std::fmt;

/// What a [`CodeTable`] yields for a code it has no entry for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fallback<V: 'static> {
    /// Substitute a fixed value.
    Default(V),
    /// Report the raw code as unknown.
    Unknown,
}

/// Outcome of a table lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolved<V> {
    /// The code has an entry.
    Mapped(V),
    /// No entry; the table's default was substituted.
    Default(V),
    /// No entry and no default.
    Unknown(u8),
}

impl<V: Copy> Resolved<V> {
    /// The mapped or substituted value, if any.
    pub fn value(&self) -> Option<V> {
        match self {
            Resolved::Mapped(v) | Resolved::Default(v) => Some(*v),
            Resolved::Unknown(_) => None,
        }
    }

    /// Whether the code had its own entry.
    pub fn is_mapped(&self) -> bool {
        matches!(self, Resolved::Mapped(_))
    }
}

impl<V: fmt::Display> fmt::Display for Resolved<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Resolved::Mapped(v) | Resolved::Default(v) => write!(f, "{}", v),
            Resolved::Unknown(code) => write!(f, "Unknown ({})", code),
        }
    }
}

/// A static code → value table with an explicit miss policy.
#[derive(Debug, Clone, Copy)]
pub struct CodeTable<V: 'static> {
    /// Table name, used in log output.
    pub name: &'static str,
    entries: &'static [(u8, V)],
    fallback: Fallback<V>,
}

impl<V: Copy> CodeTable<V> {
    /// Creates a table from its entries and miss policy.
    pub const fn new(name: &'static str, entries: &'static [(u8, V)], fallback: Fallback<V>) -> Self {
        Self {
            name,
            entries,
            fallback,
        }
    }

    /// Returns the entry for `code`, ignoring the fallback.
    pub fn get(&self, code: u8) -> Option<V> {
        self.entries
            .iter()
            .find(|(c, _)| *c == code)
            .map(|(_, v)| *v)
    }

    /// Looks up `code`, applying the fallback on a miss.
    pub fn resolve(&self, code: u8) -> Resolved<V> {
        match self.get(code) {
            Some(v) => Resolved::Mapped(v),
            None => {
                tracing::trace!(table = self.name, code, "lookup miss");
                match self.fallback {
                    Fallback::Default(v) => Resolved::Default(v),
                    Fallback::Unknown => Resolved::Unknown(code),
                }
            }
        }
    }

    /// The table's miss policy.
    pub fn fallback(&self) -> Fallback<V> {
        self.fallback
    }

    /// All explicit entries.
    pub fn entries(&self) -> &'static [(u8, V)] {
        self.entries
    }
}

// ============================================================================
// Tables
// ============================================================================

/// Transmit reason labels. Unmapped codes are reported as unknown.
pub const TX_REASON_TABLE: CodeTable<&'static str> = CodeTable::new(
    "tx_reason",
    &[
        (0, "Timer Event"),
        (1, "User Button Event"),
        (2, "Input Event"),
        (3, "FUOTA Event"),
        (4, "App Cycle Event"),
        (5, "Timeout Event"),
        (255, "Undefined Event"),
    ],
    Fallback::Unknown,
);

/// Channel bandwidth in kHz per EU868 datarate index. Defaults to 125 kHz.
pub const BANDWIDTH_KHZ_TABLE: CodeTable<u16> = CodeTable::new(
    "bandwidth_khz",
    &[
        (0, 125), // SF12
        (1, 125), // SF11
        (2, 125), // SF10
        (3, 125), // SF9
        (4, 125), // SF8
        (5, 125), // SF7
        (6, 250), // SF7/250kHz
    ],
    Fallback::Default(125),
);

/// Nominal bitrate in bit/s per EU868 datarate index. Defaults to 0.
pub const BITRATE_BPS_TABLE: CodeTable<u32> = CodeTable::new(
    "bitrate_bps",
    &[
        (0, 250),
        (1, 440),
        (2, 980),
        (3, 1760),
        (4, 3125),
        (5, 5470),
    ],
    Fallback::Default(0),
);
