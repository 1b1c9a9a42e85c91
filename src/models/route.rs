//! Route planning and voyage ETA estimates.

use serde::{Deserialize, Serialize};

use crate::ship_type::ship_type_name;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RoutePoint {
    pub lng: f64,
    pub lat: f64,
}

/// Planned sea route between two points or two ports
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlannedRoute {
    /// Total distance, nautical miles
    pub distance: f64,
    pub route: Vec<RoutePoint>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SingleEtaShipInfo {
    pub mmsi: u32,
    pub imo: u32,
    pub ship_name: String,
    pub call_sign: String,
    pub ship_type: i64,
}

impl SingleEtaShipInfo {
    pub fn ship_type_name(&self) -> &'static str {
        ship_type_name(self.ship_type)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SingleEtaLocationInfo {
    pub lng: f64,
    pub lat: f64,
    #[serde(default)]
    pub speed: f64,
    #[serde(default)]
    pub sog: f64,
    #[serde(default)]
    pub sea_area: String,
    #[serde(default)]
    pub sea_area_code: String,
}

/// Departure port of the current voyage
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SingleEtaPortInfo {
    pub port_code: String,
    pub port_cnname: String,
    pub port_name: String,
    pub time_zone: i64,
    pub port_country_code: String,
    pub port_country_name: String,
    pub port_country_cnname: String,
    pub ata: f64,
    pub atb: f64,
    pub atd: f64,
}

/// Destination port of the current voyage with progress figures
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SingleEtaNextPortInfo {
    pub port_code: String,
    pub port_cnname: String,
    pub port_name: String,
    pub time_zone: i64,
    pub port_country_code: String,
    pub port_country_name: String,
    pub port_country_cnname: String,
    pub sailed_distance: f64,
    pub sailed_time: f64,
    pub ais_speed: f64,
    pub speed: f64,
    pub eta: String,
    pub eta_utc: i64,
    pub remaining_distance: f64,
    pub distance: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SingleEtaPreciseData {
    pub ship: SingleEtaShipInfo,
    pub location: SingleEtaLocationInfo,
    pub preport: SingleEtaPortInfo,
    pub nextport: SingleEtaNextPortInfo,
}
