//! Typed request parameters, one struct per endpoint.
//!
//! Each struct serializes to the upstream query names. Absent optionals are
//! skipped entirely: upstream treats an empty parameter differently from a
//! missing one. The same structs deserialize tool-call arguments, so defaults
//! for optional scalars (`output`, `time_zone`, `type`) live here too.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use serde_with::{formats::CommaSeparator, serde_as, StringWithSeparator};

use crate::errors::{Result, ShipxyError};
use crate::models::Mmsi;

/// Upstream cap on list sizes and `max`
pub const MAX_ITEMS: usize = 100;

/// Checks run before a request is built
pub trait Validate {
    fn validate(&self) -> Result<()>;
}

fn default_output() -> i64 {
    1
}

fn default_time_zone() -> i64 {
    2
}

fn default_call_type() -> i64 {
    1
}

fn require_text(param: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(ShipxyError::validation(param, "must not be empty"));
    }
    Ok(())
}

fn check_max(max: Option<u32>) -> Result<()> {
    match max {
        Some(m) if m == 0 || m as usize > MAX_ITEMS => Err(ShipxyError::validation(
            "max_results",
            format!("must be between 1 and {MAX_ITEMS}"),
        )),
        _ => Ok(()),
    }
}

fn check_window(start_time: i64, end_time: i64) -> Result<()> {
    if start_time > end_time {
        return Err(ShipxyError::validation(
            "start_time",
            "must not be later than end_time",
        ));
    }
    Ok(())
}

fn check_json_output(output: i64) -> Result<()> {
    if output != 1 {
        return Err(ShipxyError::validation(
            "output",
            "only JSON output (1) can be decoded",
        ));
    }
    Ok(())
}

fn check_time_zone(time_zone: i64) -> Result<()> {
    if !(0..=2).contains(&time_zone) {
        return Err(ShipxyError::validation("time_zone", "must be 0, 1 or 2"));
    }
    Ok(())
}

/// Flatten a query struct into `key=value` pairs, dropping nulls
pub(crate) fn to_pairs<Q: Serialize>(query: &Q) -> Result<Vec<(String, String)>> {
    let value = serde_json::to_value(query)
        .map_err(|e| ShipxyError::validation("query", e.to_string()))?;
    let Value::Object(map) = value else {
        return Err(ShipxyError::validation("query", "not a parameter object"));
    };

    let pairs = map
        .into_iter()
        .filter_map(|(key, value)| match value {
            Value::Null => None,
            Value::String(s) => Some((key, s)),
            other => Some((key, other.to_string())),
        })
        .collect();
    Ok(pairs)
}

/// Endpoints that take no parameters besides the key
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NoParams {}

impl Validate for NoParams {
    fn validate(&self) -> Result<()> {
        Ok(())
    }
}

/// Fuzzy ship search by name, call sign, mmsi or imo
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchShipQuery {
    pub keywords: String,
    #[serde(rename = "max", alias = "max_results", skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub max_results: Option<u32>,
}

impl Validate for SearchShipQuery {
    fn validate(&self) -> Result<()> {
        require_text("keywords", &self.keywords)?;
        check_max(self.max_results)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MmsiQuery {
    pub mmsi: Mmsi,
}

impl Validate for MmsiQuery {
    fn validate(&self) -> Result<()> {
        Ok(())
    }
}

#[serde_as]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManyShipQuery {
    #[serde_as(serialize_as = "StringWithSeparator::<CommaSeparator, Mmsi>")]
    pub mmsis: Vec<Mmsi>,
}

impl Validate for ManyShipQuery {
    fn validate(&self) -> Result<()> {
        if self.mmsis.is_empty() {
            return Err(ShipxyError::validation("mmsis", "must not be empty"));
        }
        if self.mmsis.len() > MAX_ITEMS {
            return Err(ShipxyError::validation(
                "mmsis",
                format!("at most {MAX_ITEMS} numbers per call, got {}", self.mmsis.len()),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FleetQuery {
    pub fleet_id: String,
}

impl Validate for FleetQuery {
    fn validate(&self) -> Result<()> {
        require_text("fleet_id", &self.fleet_id)
    }
}

/// Ships inside a polygon given as `lng,lat-lng,lat-...`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AreaShipQuery {
    pub region: String,
    #[serde(default = "default_output")]
    pub output: i64,
    /// Session code from a previous page
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scode: Option<i64>,
}

impl AreaShipQuery {
    pub fn new(region: impl Into<String>) -> Self {
        Self {
            region: region.into(),
            output: default_output(),
            scode: None,
        }
    }
}

impl Validate for AreaShipQuery {
    fn validate(&self) -> Result<()> {
        require_text("region", &self.region)?;
        check_json_output(self.output)
    }
}

/// Register particulars lookup; needs at least one identifying field
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ShipParticularQuery {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mmsi: Option<Mmsi>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub imo: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub call_sign: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ship_name: Option<String>,
}

impl Validate for ShipParticularQuery {
    fn validate(&self) -> Result<()> {
        if self.mmsi.is_none()
            && self.imo.is_none()
            && self.call_sign.is_none()
            && self.ship_name.is_none()
        {
            return Err(ShipxyError::validation(
                "mmsi",
                "at least one of mmsi, imo, call_sign or ship_name is required",
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchPortQuery {
    pub keywords: String,
    #[serde(rename = "max", alias = "max_results", skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub max_results: Option<u32>,
}

impl Validate for SearchPortQuery {
    fn validate(&self) -> Result<()> {
        require_text("keywords", &self.keywords)?;
        check_max(self.max_results)
    }
}

/// Ships at berth or at anchor in a port
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortShipsQuery {
    pub port_code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ship_type: Option<i64>,
}

impl Validate for PortShipsQuery {
    fn validate(&self) -> Result<()> {
        require_text("port_code", &self.port_code)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EtaShipsQuery {
    pub port_code: String,
    pub start_time: i64,
    pub end_time: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ship_type: Option<i64>,
}

impl Validate for EtaShipsQuery {
    fn validate(&self) -> Result<()> {
        require_text("port_code", &self.port_code)?;
        check_window(self.start_time, self.end_time)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShipTrackQuery {
    pub mmsi: Mmsi,
    pub start_time: i64,
    pub end_time: i64,
    #[serde(default = "default_output")]
    pub output: i64,
}

impl ShipTrackQuery {
    pub fn new(mmsi: Mmsi, start_time: i64, end_time: i64) -> Self {
        Self {
            mmsi,
            start_time,
            end_time,
            output: default_output(),
        }
    }
}

impl Validate for ShipTrackQuery {
    fn validate(&self) -> Result<()> {
        check_window(self.start_time, self.end_time)?;
        check_json_output(self.output)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShipApproachQuery {
    pub mmsi: Mmsi,
    pub start_time: i64,
    pub end_time: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub approach_zone: Option<i64>,
}

impl Validate for ShipApproachQuery {
    fn validate(&self) -> Result<()> {
        check_window(self.start_time, self.end_time)
    }
}

/// Port calls of one ship within a time window
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortOfCallByShipQuery {
    pub mmsi: Mmsi,
    pub start_time: i64,
    pub end_time: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub imo: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ship_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub call_sign: Option<String>,
    /// 2 reports times in Beijing time
    #[serde(default = "default_time_zone")]
    pub time_zone: i64,
}

impl PortOfCallByShipQuery {
    pub fn new(mmsi: Mmsi, start_time: i64, end_time: i64) -> Self {
        Self {
            mmsi,
            start_time,
            end_time,
            imo: None,
            ship_name: None,
            call_sign: None,
            time_zone: default_time_zone(),
        }
    }
}

impl Validate for PortOfCallByShipQuery {
    fn validate(&self) -> Result<()> {
        check_window(self.start_time, self.end_time)?;
        check_time_zone(self.time_zone)
    }
}

/// Port calls of one ship at one port within a time window
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortOfCallByShipPortQuery {
    pub mmsi: Mmsi,
    pub port_code: String,
    pub start_time: i64,
    pub end_time: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub imo: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ship_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub call_sign: Option<String>,
    #[serde(default = "default_time_zone")]
    pub time_zone: i64,
}

impl PortOfCallByShipPortQuery {
    pub fn new(mmsi: Mmsi, port_code: impl Into<String>, start_time: i64, end_time: i64) -> Self {
        Self {
            mmsi,
            port_code: port_code.into(),
            start_time,
            end_time,
            imo: None,
            ship_name: None,
            call_sign: None,
            time_zone: default_time_zone(),
        }
    }
}

impl Validate for PortOfCallByShipPortQuery {
    fn validate(&self) -> Result<()> {
        require_text("port_code", &self.port_code)?;
        check_window(self.start_time, self.end_time)?;
        check_time_zone(self.time_zone)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShipStatusQuery {
    pub mmsi: Mmsi,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub imo: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ship_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub call_sign: Option<String>,
    #[serde(default = "default_time_zone")]
    pub time_zone: i64,
}

impl ShipStatusQuery {
    pub fn new(mmsi: Mmsi) -> Self {
        Self {
            mmsi,
            imo: None,
            ship_name: None,
            call_sign: None,
            time_zone: default_time_zone(),
        }
    }
}

impl Validate for ShipStatusQuery {
    fn validate(&self) -> Result<()> {
        check_time_zone(self.time_zone)
    }
}

/// Calls at a port within a time window, filtered on ATA (1) or ATD (2)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortOfCallByPortQuery {
    pub port_code: String,
    pub start_time: i64,
    pub end_time: i64,
    #[serde(rename = "type", alias = "type_", default = "default_call_type")]
    pub call_type: i64,
    #[serde(default = "default_time_zone")]
    pub time_zone: i64,
}

impl PortOfCallByPortQuery {
    pub fn new(port_code: impl Into<String>, start_time: i64, end_time: i64) -> Self {
        Self {
            port_code: port_code.into(),
            start_time,
            end_time,
            call_type: default_call_type(),
            time_zone: default_time_zone(),
        }
    }
}

impl Validate for PortOfCallByPortQuery {
    fn validate(&self) -> Result<()> {
        require_text("port_code", &self.port_code)?;
        check_window(self.start_time, self.end_time)?;
        if !matches!(self.call_type, 1 | 2) {
            return Err(ShipxyError::validation("type", "must be 1 (ATA) or 2 (ATD)"));
        }
        check_time_zone(self.time_zone)
    }
}

/// Route between two `lng,lat` points
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RouteByPointQuery {
    pub start_point: String,
    pub end_point: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avoid: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub through: Option<String>,
}

impl Validate for RouteByPointQuery {
    fn validate(&self) -> Result<()> {
        require_text("start_point", &self.start_point)?;
        require_text("end_point", &self.end_point)
    }
}

/// Route between two five-character port codes
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RouteByPortQuery {
    pub start_port_code: String,
    pub end_port_code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avoid: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub through: Option<String>,
}

impl Validate for RouteByPortQuery {
    fn validate(&self) -> Result<()> {
        require_text("start_port_code", &self.start_port_code)?;
        require_text("end_port_code", &self.end_port_code)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SingleEtaPreciseQuery {
    pub mmsi: Mmsi,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port_code: Option<String>,
    /// Assumed speed in knots
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speed: Option<f64>,
}

impl Validate for SingleEtaPreciseQuery {
    fn validate(&self) -> Result<()> {
        match self.speed {
            Some(speed) if !(speed.is_finite() && speed > 0.0) => {
                Err(ShipxyError::validation("speed", "must be a positive number"))
            }
            _ => Ok(()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherByPointQuery {
    pub lng: f64,
    pub lat: f64,
    /// Latest forecast when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weather_time: Option<i64>,
}

impl Validate for WeatherByPointQuery {
    fn validate(&self) -> Result<()> {
        if !(-180.0..=180.0).contains(&self.lng) {
            return Err(ShipxyError::validation("lng", "must be within [-180, 180]"));
        }
        if !(-90.0..=90.0).contains(&self.lat) {
            return Err(ShipxyError::validation("lat", "must be within [-90, 90]"));
        }
        Ok(())
    }
}

/// Sea-area forecasts: 0 all, 1 coastal, 2 offshore, 3 open sea
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherQuery {
    pub weather_type: i64,
}

impl Validate for WeatherQuery {
    fn validate(&self) -> Result<()> {
        if !(0..=3).contains(&self.weather_type) {
            return Err(ShipxyError::validation("weather_type", "must be 0, 1, 2 or 3"));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TyphoonQuery {
    pub typhoon_id: i64,
}

impl Validate for TyphoonQuery {
    fn validate(&self) -> Result<()> {
        Ok(())
    }
}

/// Tide table of one station; dates go out as `yyyy-MM-dd`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TideDataQuery {
    pub port_code: i64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl Validate for TideDataQuery {
    fn validate(&self) -> Result<()> {
        if self.start_date > self.end_date {
            return Err(ShipxyError::validation(
                "start_date",
                "must not be later than end_date",
            ));
        }
        Ok(())
    }
}
