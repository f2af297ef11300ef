//! Regions of the map.
//!
//! Continent and lake flood fills with their content scans, and coastline
//! predicates used when planning landings.

pub mod coast;
pub mod continent;

pub use coast::{real_at_sea, real_shore, view_at_sea, view_shore};
pub use continent::{
    real_continent, scan_continent, scan_real, scan_view, view_continent, ContinentMap, MapSource,
    ScanCounts,
};
