//! Station/platform records and the read-only adjacency view derived from them.
//!
//! A [`Network`] is what a data loader hands over: stations keyed by shortcode, each with an
//! optional authoritative coordinate and a set of platforms pointing at other stations. A
//! [`GraphSnapshot`] freezes that into a stable station ordering plus a symmetric adjacency
//! relation, which is all the layout code needs.

pub mod error;
pub mod network;
pub mod snapshot;

pub use error::{Error, Result};
pub use network::{MissingReverse, Network, PlatformRecord, ServiceKind, StationRecord};
pub use snapshot::{Adjacency, AdjacencyMatrix, GraphSnapshot, Link};
