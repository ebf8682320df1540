//! Market regime: per-index status grading and the composite BUY/HOLD/SELL verdict.

pub mod breadth;
pub mod indices;
pub mod readings;
pub mod verdict;

pub use breadth::{BreadthReading, DEFAULT_UNIVERSE_SIZE};
pub use indices::{
    normalize_breadth, normalize_crypto, normalize_index, IndexReading, IndexStatus, ReadingKind,
    Tone,
};
pub use readings::MarketReadings;
pub use verdict::{
    clamp_composite, term_structure_ratio, CompositeScorer, MarketSignal, ScoreBreakdown,
    TermStructure, VerdictResult,
};
