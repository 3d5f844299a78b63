//! Source layer: fetches raw deadline candidates from upstream domain
//! calculators and gathers them fail-open for one evaluation.

mod error;
pub mod file;
pub mod gather;
pub mod source;

#[cfg(feature = "http")]
pub mod http;

pub use error::SourceError;
pub use file::JsonFileSource;
pub use gather::{Gathered, SourceFailure, gather};
pub use source::{CandidateSource, decode_list};

#[cfg(feature = "http")]
pub use http::HttpSource;
