//! Dataset domain.
//!
//! - [`entities::DatasetHandle`]: the loaded CSV table as a typed polars frame

pub mod entities;
