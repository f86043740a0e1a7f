//! The station/platform container produced by a data loader.

use crate::error::{Error, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

mod records;

pub use records::{PlatformRecord, ServiceKind, StationRecord};

/// A connection `from -> to` (via `platform`) with no connection back from `to`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MissingReverse {
    pub from: String,
    pub platform: String,
    pub to: String,
}

/// Stations keyed by shortcode. Insertion order is the stable station ordering used by every
/// derived view.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Network {
    stations: IndexMap<String, StationRecord>,
}

impl Network {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_stations(stations: IndexMap<String, StationRecord>) -> Self {
        Self { stations }
    }

    pub fn from_json_str(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn from_value(value: serde_json::Value) -> Result<Self> {
        Ok(serde_json::from_value(value)?)
    }

    pub fn len(&self) -> usize {
        self.stations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }

    pub fn contains(&self, shortcode: &str) -> bool {
        self.stations.contains_key(shortcode)
    }

    pub fn station(&self, shortcode: &str) -> Option<&StationRecord> {
        self.stations.get(shortcode)
    }

    pub fn stations(&self) -> impl Iterator<Item = (&str, &StationRecord)> {
        self.stations.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn shortcodes(&self) -> impl Iterator<Item = &str> {
        self.stations.keys().map(String::as_str)
    }

    /// Inserts or replaces a station, keeping its original position in the ordering on replace.
    pub fn insert_station(
        &mut self,
        shortcode: impl Into<String>,
        record: StationRecord,
    ) -> Option<StationRecord> {
        self.stations.insert(shortcode.into(), record)
    }

    pub fn insert_platform(
        &mut self,
        from: &str,
        platform: impl Into<String>,
        record: PlatformRecord,
    ) -> Result<()> {
        let Some(station) = self.stations.get_mut(from) else {
            return Err(Error::UnknownStation {
                shortcode: from.to_string(),
            });
        };
        station.platforms.insert(platform.into(), record);
        Ok(())
    }

    pub fn fixed_coordinate(&self, shortcode: &str) -> Option<(f64, f64)> {
        self.stations.get(shortcode)?.fixed_coordinate()
    }

    /// Drops stations without any platform and returns their shortcodes.
    ///
    /// Platforms pointing at a removed station are left alone; `validate` reports them.
    pub fn prune_platformless(&mut self) -> Vec<String> {
        let mut removed = Vec::new();
        self.stations.retain(|shortcode, station| {
            if station.platforms.is_empty() {
                removed.push(shortcode.clone());
                false
            } else {
                true
            }
        });
        removed
    }

    /// Every platform must lead to a known station.
    pub fn validate(&self) -> Result<()> {
        for (from, station) in &self.stations {
            for (platform, record) in &station.platforms {
                if !self.stations.contains_key(&record.to) {
                    return Err(Error::DanglingPlatform {
                        from: from.clone(),
                        platform: platform.clone(),
                        to: record.to.clone(),
                    });
                }
            }
        }
        Ok(())
    }

    /// Connections whose destination has no platform leading back.
    ///
    /// Dangling destinations are not reported here.
    pub fn missing_reverse_connections(&self) -> Vec<MissingReverse> {
        let mut out = Vec::new();
        for (from, station) in &self.stations {
            for (platform, record) in &station.platforms {
                let Some(dest) = self.stations.get(&record.to) else {
                    continue;
                };
                if record.to == *from {
                    continue;
                }
                if !dest.connects_to(from) {
                    out.push(MissingReverse {
                        from: from.clone(),
                        platform: platform.clone(),
                        to: record.to.clone(),
                    });
                }
            }
        }
        out
    }
}

impl FromIterator<(String, StationRecord)> for Network {
    fn from_iter<T: IntoIterator<Item = (String, StationRecord)>>(iter: T) -> Self {
        Self {
            stations: iter.into_iter().collect(),
        }
    }
}
