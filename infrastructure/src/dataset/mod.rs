//! Dataset loading adapters

mod csv_loader;

pub use csv_loader::CsvDatasetLoader;
