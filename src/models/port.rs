//! Port lookup and ships at or bound for a port.

use serde::{Deserialize, Serialize};

use crate::ship_type::ship_type_name;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortData {
    /// Five-character port code, the key for every port-level query
    pub port_code: String,
    pub port_name: String,
    pub port_cnname: String,
    pub port_time_zone: String,
    pub port_country_name: String,
    pub port_country_cnname: String,
    pub port_country_code: String,
}

/// Ship currently at berth in a port
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BerthShipData {
    pub mmsi: u32,
    pub imo: u32,
    pub call_sign: String,
    pub ship_name: String,
    pub ship_type: i64,
    pub length: f64,
    pub width: f64,
    pub left: f64,
    pub trail: f64,
    pub draught: f64,
    pub arrival_time: String,
    pub arrival_time_utc: i64,
    /// Hours in port so far
    pub stay_time: f64,
    #[serde(default)]
    pub navistat: i64,
}

impl BerthShipData {
    pub fn ship_type_name(&self) -> &'static str {
        ship_type_name(self.ship_type)
    }
}

/// Ship currently waiting at a port's anchorage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnchorShipData {
    pub mmsi: u32,
    pub imo: u32,
    pub call_sign: String,
    pub ship_name: String,
    pub ship_type: i64,
    pub length: f64,
    pub width: f64,
    pub left: f64,
    pub trail: f64,
    pub draught: f64,
    pub arrival_time: String,
    pub arrival_time_utc: i64,
    pub stay_time: f64,
    #[serde(default)]
    pub navistat: i64,
}

impl AnchorShipData {
    pub fn ship_type_name(&self) -> &'static str {
        ship_type_name(self.ship_type)
    }
}

/// Ship expected to arrive at a port within the queried window
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EtaShipData {
    pub mmsi: u32,
    pub ship_name: String,
    pub imo: u32,
    /// Deadweight tonnage
    pub dwt: f64,
    /// Textual ship type, unlike the numeric code on position records
    pub ship_type: String,
    pub length: f64,
    pub width: f64,
    pub draught: f64,
    pub preport_cnname: String,
    pub last_time: String,
    pub last_time_utc: i64,
    pub eta: String,
    pub eta_utc: i64,
    pub dest: String,
    #[serde(default)]
    pub ship_flag: String,
    #[serde(default)]
    pub registry: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_berth_ship_without_navistat() {
        let s = r#"{
            "mmsi": 477000001, "imo": 9300001, "call_sign": "VRAB", "ship_name": "OOCL TEST",
            "ship_type": 100, "length": 366.0, "width": 51.0, "left": 25.0, "trail": 300.0,
            "draught": 14.5, "arrival_time": "2025-03-01 02:00", "arrival_time_utc": 1740794400,
            "stay_time": 30.5
        }"#;
        let ship: BerthShipData = serde_json::from_str(s).unwrap();
        assert_eq!(ship.navistat, 0);
        assert_eq!(ship.ship_type_name(), "Container ship");
    }

    #[test]
    fn parse_eta_ship_defaults() {
        let s = r#"{
            "mmsi": 1, "ship_name": "A", "imo": 2, "dwt": 50000.0, "ship_type": "Bulk Carrier",
            "length": 190.0, "width": 32.0, "draught": 11.0, "preport_cnname": "",
            "last_time": "", "last_time_utc": 0, "eta": "2025-03-05 10:00",
            "eta_utc": 1741168800, "dest": "CNNGB"
        }"#;
        let ship: EtaShipData = serde_json::from_str(s).unwrap();
        assert_eq!(ship.ship_flag, "");
        assert_eq!(ship.registry, "");
    }
}
