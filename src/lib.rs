use std::fmt::{Display, Formatter, Result as FmtResult};

mod graph;
pub use graph::*;

mod parse;
pub use parse::*;

mod chain;
pub use chain::*;

mod branch;
pub use branch::*;

mod orient;
pub use orient::*;

mod naming;
pub use naming::*;

mod namer;
pub use namer::*;

mod visualize;
pub use visualize::*;

mod database;
pub use database::*;

/// The halogens a formula can attach to a carbon.
///
/// The numeric codes (`1..=4`) are the halogen kinds carried by branch
/// records; `0` means "no halogen".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Halogen {
    Chlorine,
    Bromine,
    Fluorine,
    Iodine,
}

impl Halogen {
    /// Priority order used when a carbon carries more than one halogen.
    pub const PRIORITY: [Halogen; 4] = [
        Halogen::Chlorine,
        Halogen::Bromine,
        Halogen::Fluorine,
        Halogen::Iodine,
    ];

    pub fn symbol(&self) -> &'static str {
        match self {
            Halogen::Chlorine => "Cl",
            Halogen::Bromine => "Br",
            Halogen::Fluorine => "F",
            Halogen::Iodine => "I",
        }
    }

    pub fn from_symbol(symbol: &str) -> Option<Self> {
        Self::PRIORITY.into_iter().find(|h| h.symbol() == symbol)
    }

    pub fn code(&self) -> u8 {
        match self {
            Halogen::Chlorine => 1,
            Halogen::Bromine => 2,
            Halogen::Fluorine => 3,
            Halogen::Iodine => 4,
        }
    }

    pub fn from_code(code: u8) -> Option<Self> {
        Self::PRIORITY.into_iter().find(|h| h.code() == code)
    }

    /// Substituent prefix, e.g. `chloro`.
    pub fn prefix(&self) -> &'static str {
        match self {
            Halogen::Chlorine => "chloro",
            Halogen::Bromine => "bromo",
            Halogen::Fluorine => "fluoro",
            Halogen::Iodine => "iodo",
        }
    }
}

impl Display for Halogen {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        write!(f, "{}", self.symbol())
    }
}

/// Install a `tracing` subscriber printing at `level` (`"trace"`, `"debug"`, ...).
///
/// Unknown levels fall back to `info`. Calling this more than once is harmless.
pub fn init_logging(level: &str) {
    let level = level
        .trim()
        .parse::<tracing::Level>()
        .unwrap_or(tracing::Level::INFO);
    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .try_init();
}
