//! Vessel records: search hits, positions, particulars, tracks, approaches.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ship_type::ship_type_name;

/// Fuzzy search hit from `SearchShip`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchShipResult {
    /// Which field the keywords matched
    pub match_type: i64,
    pub mmsi: u32,
    pub imo: u32,
    pub call_sign: String,
    pub ship_name: String,
    pub data_source: i64,
    pub last_time: String,
    pub last_time_utc: i64,
}

/// Static particulars plus the latest AIS position report of a vessel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShipPosition {
    pub mmsi: u32,
    pub imo: u32,
    pub call_sign: String,
    pub ship_name: String,
    pub ship_cnname: String,
    pub data_source: i64,
    /// Numeric ship-type code, see [`crate::ship_type`]
    pub ship_type: i64,
    /// Length in metres
    pub length: f64,
    /// Breadth in metres
    pub width: f64,
    /// Antenna distance from the port side
    pub left: f64,
    /// Antenna distance from the stern
    pub trail: f64,
    /// Draught in metres
    pub draught: f64,
    pub dest: String,
    pub destcode: String,
    pub eta: String,
    /// Not every position endpoint reports this
    #[serde(default)]
    pub eta_utc: i64,
    /// Navigational status
    pub navistat: i64,
    /// WGS84 latitude
    pub lat: f64,
    /// WGS84 longitude
    pub lng: f64,
    /// Speed over ground, knots
    pub sog: f64,
    /// Course over ground, degrees
    pub cog: f64,
    /// Heading, degrees
    pub hdg: f64,
    /// Rate of turn
    pub rot: f64,
    pub last_time: String,
    pub last_time_utc: i64,
}

impl ShipPosition {
    pub fn ship_type_name(&self) -> &'static str {
        ship_type_name(self.ship_type)
    }

    /// Time of the last position report
    pub fn last_seen(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.last_time_utc, 0)
    }
}

/// Ships inside a polygon, paged by a session code
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AreaShipData {
    pub total: i64,
    /// Session token to pass back for the next page
    pub scode: i64,
    /// Non-zero when more pages remain
    #[serde(rename = "continue", default)]
    pub continue_: i64,
    pub ship_list: Vec<ShipPosition>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShipRegistryData {
    pub mmsi: u32,
    /// Flag country or region
    pub registry: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineInfo {
    pub designer: String,
    #[serde(rename = "powerKW")]
    pub power_kw: i64,
}

/// Register particulars of a vessel. Only ships with an imo number have one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShipParticularData {
    pub mmsi: u32,
    pub imo: u32,
    pub call_sign: String,
    pub ship_name: String,
    pub length: f64,
    pub mould_width: f64,
    pub flag_country_code: String,
    pub flag_country: String,
    pub build_country: String,
    pub build_date: String,
    pub class_name: String,
    pub pandi_club: String,
    pub ship_type: String,
    pub ship_type_level5_subgroup: String,
    pub ship_type_group: String,
    pub ship_status: String,
    pub gross_tonnage: f64,
    pub net_tonnage: f64,
    pub deadweight: f64,
    pub teu: i64,
    pub speed_max: f64,
    pub speed_service: f64,
    pub draught: f64,
    pub port_of_registry: String,
    pub group_code: String,
    pub group_company: String,
    pub group_country_code: String,
    pub group_country: String,
    pub shipmanager_code: String,
    pub shipmanager_company: String,
    pub shipmanager_country_code: String,
    #[serde(rename = "shipManager_country")]
    pub shipmanager_country: String,
    pub operator_code: String,
    pub operator_company: String,
    pub operator_country_code: String,
    pub operator_country: String,
    pub doc_code: String,
    pub doc_company: String,
    pub doc_country_code: String,
    pub doc_country: String,
    pub registered_code: String,
    pub registered_owner: String,
    pub registered_country_code: String,
    pub registered_country: String,
    pub technical_code: String,
    pub technical_manager: String,
    pub technical_country_code: String,
    pub technical_country: String,
    pub builder_code: String,
    pub builder_company: String,
    pub builder_country_code: String,
    pub builder_country: String,
    pub update_time: String,
    pub main_engine_list: Vec<EngineInfo>,
    pub aux_engine_list: Vec<EngineInfo>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShipTrackPoint {
    pub data_source: i64,
    /// Unix timestamp of the fix
    pub utc: i64,
    pub lng: f64,
    pub lat: f64,
    pub sog: f64,
    pub cog: f64,
}

impl ShipTrackPoint {
    pub fn time(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.utc, 0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApproachShipInfo {
    pub mmsi: u32,
    pub imo: u32,
    pub call_sign: String,
    pub ship_name: String,
    pub ship_type: i64,
}

impl ApproachShipInfo {
    pub fn ship_type_name(&self) -> &'static str {
        ship_type_name(self.ship_type)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApproachEventInfo {
    pub approach_zone: i64,
    pub lat: f64,
    pub lng: f64,
    pub port_code: String,
    pub position: String,
    pub approach_time: String,
    pub approach_time_utc: i64,
    pub separation_time: String,
    pub separation_time_utc: i64,
    pub duration: f64,
    pub sog: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApproachDataItem {
    pub approach_ship: ApproachShipInfo,
    pub approach_event: ApproachEventInfo,
}

/// A queried vessel and every other vessel that came alongside it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShipApproachData {
    pub ship_data: ApproachShipInfo,
    pub approach_data: Vec<ApproachDataItem>,
}
