//! Distribution families and their on-disk boot layouts.

pub mod catalog;

pub use catalog::{lookup, DistributionMapping, CATALOG};
