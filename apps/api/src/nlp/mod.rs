//! Language resources shared by the similarity scorer.

pub mod stopwords;

pub use stopwords::StopwordFilter;
