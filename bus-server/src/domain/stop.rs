//! Stop and city types.

use super::{CityId, StopId};

/// The city a stop belongs to, with its region/country chain for display.
#[derive(Debug, Clone, PartialEq)]
pub struct City {
    pub id: CityId,
    pub name: String,
    pub region: String,
    pub country: String,
}

/// A physical boarding/alighting point.
///
/// Stops are immutable once created and shared via `Arc` between route
/// legs. The owning city carries the region/country chain used to render
/// the full display name.
#[derive(Debug, Clone, PartialEq)]
pub struct Stop {
    pub id: StopId,
    pub name: String,
    pub city: City,
    pub latitude: f64,
    pub longitude: f64,
}

impl Stop {
    /// Returns the id of the owning city.
    pub fn city_id(&self) -> CityId {
        self.city.id
    }

    /// Renders the full hierarchical display name,
    /// e.g. `"Central Station, Springfield, West Region, Freedonia"`.
    pub fn full_name(&self) -> String {
        format!(
            "{}, {}, {}, {}",
            self.name, self.city.name, self.city.region, self.city.country
        )
    }
}
