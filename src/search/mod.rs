pub mod alphabeta;
pub mod clock;
pub mod eval;
pub mod ordering;

pub use alphabeta::{IterationReport, SearchParams, SearchResult, Searcher};
pub use clock::TimeControl;
