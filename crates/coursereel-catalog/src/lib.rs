//! Coursereel-Catalog: the video catalog behind the coursereel server.
//!
//! This crate holds everything that does not need HTTP:
//!
//! - **Models**: [`VideoRecord`], [`Dataset`], [`ModuleTag`] and the transfer
//!   records returned to clients
//! - **Loading**: [`DatasetSource`] and the CSV-backed [`CsvSource`]
//! - **Queries**: module listing, keyword search, transcript export
//! - **Error Handling**: [`Error`] and the [`Result`] alias
//!
//! # Examples
//!
//! ```
//! use coursereel_catalog::{queries, Dataset, VideoRecord};
//!
//! let dataset = Dataset::from(vec![VideoRecord::new(
//!     "Mod01_WhatIsML.mp4",
//!     "full transcript",
//!     "Supervised learning basics",
//! )]);
//!
//! let videos = queries::list_by_module(&dataset, 1, "https://cdn.example/");
//! assert_eq!(videos[0].title, "WhatIsML");
//! assert_eq!(videos[0].url, "https://cdn.example/Mod01_WhatIsML.mp4");
//! ```

pub mod error;
pub mod loader;
pub mod models;
pub mod queries;

pub use error::{Error, Result};
pub use loader::{CsvSource, DatasetSource, InMemorySource};
pub use models::*;
