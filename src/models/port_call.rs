//! Port-call history and current port status.
//!
//! Port-call records reference ports by five-character code and vessels by
//! mmsi/imo; timestamps (`ata`, `atb`, `atd`) are upstream-formatted strings.

use serde::{Deserialize, Serialize};

/// A vessel's call at some port, from `GetPortofCallByShip`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortOfCallData {
    pub ship_name: String,
    pub call_sign: String,
    pub imo: u32,
    pub mmsi: u32,
    pub ship_type: String,
    pub port_cnname: String,
    pub port_name: String,
    pub port_time_zone: String,
    pub port_code: String,
    pub terminal_name: String,
    pub berth_name: String,
    pub port_country_cnname: String,
    pub port_country_name: String,
    pub port_country_code: String,
    #[serde(default)]
    pub arrival_anchorage: String,
    /// Actual time of arrival
    #[serde(default)]
    pub ata: String,
    /// Actual time of berthing
    #[serde(default)]
    pub atb: String,
    /// Actual time of departure
    #[serde(default)]
    pub atd: String,
    #[serde(default)]
    pub arrival_draught: f64,
    #[serde(default)]
    pub departure_draught: f64,
    #[serde(default)]
    pub stay_time: f64,
    #[serde(default)]
    pub stay_terminal_time: f64,
}

/// A vessel's call at one given port, from `GetPortofCallByShipPort`.
///
/// Same shape as [`PortOfCallData`] except upstream spells the anchorage
/// field `arriveanchorage`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortOfCallByShipPortData {
    pub ship_name: String,
    pub call_sign: String,
    pub imo: u32,
    pub mmsi: u32,
    pub ship_type: String,
    pub port_cnname: String,
    pub port_name: String,
    pub port_time_zone: String,
    pub port_code: String,
    pub terminal_name: String,
    pub berth_name: String,
    pub port_country_cnname: String,
    pub port_country_name: String,
    pub port_country_code: String,
    #[serde(default)]
    pub arriveanchorage: String,
    #[serde(default)]
    pub ata: String,
    #[serde(default)]
    pub atb: String,
    #[serde(default)]
    pub atd: String,
    #[serde(default)]
    pub arrival_draught: f64,
    #[serde(default)]
    pub departure_draught: f64,
    #[serde(default)]
    pub stay_time: f64,
    #[serde(default)]
    pub stay_terminal_time: f64,
}

/// Port entry on a ship-status record.
///
/// `currentport` may carry `country_en`, `country_code` and
/// `arriveanchorage` instead of the `port_country_*` fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatusPortInfo {
    pub port_code: String,
    pub port_name: String,
    pub port_cnname: String,
    pub port_time_zone: String,
    pub port_country_name: String,
    pub port_country_cnname: String,
    pub port_country_code: String,
    pub arrive_anchorage: String,
    pub ata: String,
    pub atb: String,
    pub atd: String,
    pub country_en: String,
    pub country_code: String,
    pub arriveanchorage: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShipStatusData {
    pub ship_name: String,
    pub call_sign: String,
    pub imo: u32,
    pub mmsi: u32,
    pub ship_type: String,
    #[serde(default)]
    pub current_sea_area: String,
    #[serde(default)]
    pub sea_area_code: String,
    #[serde(default)]
    pub current_city: String,
    #[serde(default)]
    pub current_city_code: String,
    #[serde(default)]
    pub lng: f64,
    #[serde(default)]
    pub lat: f64,
    #[serde(default)]
    pub previousport: Option<StatusPortInfo>,
    /// Set only while the vessel is calling at a port
    #[serde(default)]
    pub currentport: Option<StatusPortInfo>,
}

impl ShipStatusData {
    pub fn is_in_port(&self) -> bool {
        self.currentport
            .as_ref()
            .is_some_and(|port| !port.port_code.is_empty())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PortCallPortInfo {
    pub port_code: String,
    pub port_cnname: String,
    pub port_name: String,
    pub port_time_zone: String,
    pub terminal_name: String,
    pub berth_name: String,
    pub arrival_anchorage: String,
    pub ata: String,
    pub atb: String,
    pub atd: String,
    pub arrival_draught: f64,
    pub departure_draught: f64,
    pub stay_time: f64,
    pub stay_terminal_time: f64,
}

/// A vessel that called at the queried port, with its previous and next calls
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortOfCallByPortData {
    pub imo: u32,
    pub mmsi: u32,
    pub ship_type: String,
    pub ship_name: String,
    pub call_sign: String,
    #[serde(default)]
    pub currentport: Option<PortCallPortInfo>,
    #[serde(default)]
    pub previousport: Option<PortCallPortInfo>,
    #[serde(default)]
    pub nextport: Option<PortCallPortInfo>,
}
