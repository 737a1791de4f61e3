//! Persistence for the series file and its derived per-sample files

pub mod series;
