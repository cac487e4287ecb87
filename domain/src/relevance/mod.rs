//! Query relevance classification.

pub mod verdict;
