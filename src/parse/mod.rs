mod formula;
pub use formula::*;
