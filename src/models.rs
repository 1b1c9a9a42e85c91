//! Data models.
//!
//! Response envelopes and payload records mirroring the Shipxy JSON contract.
//! Field names follow upstream exactly; where upstream omits a field
//! inconsistently the field carries `#[serde(default)]`.

mod port;
mod port_call;
mod route;
mod ship;
mod tide;
mod weather;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::ShipxyError;
use serde_helpers::*;

pub use port::{AnchorShipData, BerthShipData, EtaShipData, PortData};
pub use port_call::{
    PortCallPortInfo, PortOfCallByPortData, PortOfCallByShipPortData, PortOfCallData,
    ShipStatusData, StatusPortInfo,
};
pub use route::{
    PlannedRoute, RoutePoint, SingleEtaLocationInfo, SingleEtaNextPortInfo, SingleEtaPortInfo,
    SingleEtaPreciseData, SingleEtaShipInfo,
};
pub use ship::{
    ApproachDataItem, ApproachEventInfo, ApproachShipInfo, AreaShipData, EngineInfo,
    SearchShipResult, ShipApproachData, ShipParticularData, ShipPosition, ShipRegistryData,
    ShipTrackPoint,
};
pub use tide::{TideData, TideDetailItem, TideOverviewItem, TideStation};
pub use weather::{PointWeather, SeaAreaWeather, TyphoonSummary, TyphoonTrackPoint};

/// Maritime Mobile Service Identity (MMSI)
///
/// A nine-digit number identifying a vessel's radio station. Unique at a
/// point in time, but may be reassigned when a vessel is sold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Mmsi(u32);

const MAX_MMSI: u32 = 999_999_999;

fn mmsi_too_long(value: u32) -> String {
    format!("{value} is longer than nine digits")
}

impl TryFrom<u32> for Mmsi {
    type Error = ShipxyError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        if value > MAX_MMSI {
            return Err(ShipxyError::validation("mmsi", mmsi_too_long(value)));
        }
        Ok(Self(value))
    }
}

impl<'de> Deserialize<'de> for Mmsi {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = u32::deserialize(deserializer)?;
        if value > MAX_MMSI {
            return Err(serde::de::Error::custom(mmsi_too_long(value)));
        }
        Ok(Self(value))
    }
}

impl fmt::Display for Mmsi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Mmsi {
    /// Get the raw MMSI value
    pub fn value(&self) -> u32 {
        self.0
    }
}

/// Envelope whose payload is a single record, or a list without a count
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Response<T> {
    #[serde(deserialize_with = "deserialize_status")]
    pub status: i64,
    pub msg: String,
    pub data: T,
}

/// Envelope whose payload is a list with an upstream `total`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListResponse<T> {
    #[serde(deserialize_with = "deserialize_status")]
    pub status: i64,
    pub msg: String,
    pub total: i64,
    pub data: Vec<T>,
}

/// Anchor-ship envelope.
///
/// Upstream sometimes returns a single object instead of a list; after
/// decoding, `data` is always a list and `total` is its logical count.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnchorShipsResponse {
    pub status: i64,
    pub msg: String,
    pub total: i64,
    pub data: Vec<AnchorShipData>,
}

impl<'de> Deserialize<'de> for AnchorShipsResponse {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Raw {
            #[serde(deserialize_with = "deserialize_status")]
            status: i64,
            msg: String,
            #[serde(default)]
            total: i64,
            #[serde(default)]
            data: OneOrMany<AnchorShipData>,
        }

        let raw = Raw::deserialize(deserializer)?;
        let (total, data) = match raw.data {
            OneOrMany::One(ship) => (1, vec![ship]),
            OneOrMany::Many(ships) => (raw.total, ships),
        };
        Ok(Self {
            status: raw.status,
            msg: raw.msg,
            total,
            data,
        })
    }
}

/// Approach-event envelope, the one endpoint keyed on `code`/`message`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApproachResponse {
    #[serde(deserialize_with = "deserialize_status")]
    pub code: i64,
    pub message: String,
    pub data: Vec<ShipApproachData>,
}

pub type SearchShipResponse = ListResponse<SearchShipResult>;
pub type SingleShipResponse = Response<ShipPosition>;
pub type ManyShipResponse = Response<Vec<ShipPosition>>;
pub type FleetShipResponse = Response<Vec<ShipPosition>>;
pub type SurroundingShipResponse = ListResponse<ShipPosition>;
pub type AreaShipResponse = Response<AreaShipData>;
pub type ShipRegistryResponse = Response<ShipRegistryData>;
pub type SearchShipParticularResponse = Response<Vec<ShipParticularData>>;
pub type SearchPortResponse = ListResponse<PortData>;
pub type BerthShipsResponse = ListResponse<BerthShipData>;
pub type EtaShipsResponse = ListResponse<EtaShipData>;
pub type ShipTrackResponse = Response<Vec<ShipTrackPoint>>;
pub type PortOfCallByShipResponse = Response<Vec<PortOfCallData>>;
pub type PortOfCallByShipPortResponse = ListResponse<PortOfCallByShipPortData>;
pub type ShipStatusResponse = ListResponse<ShipStatusData>;
pub type PortOfCallByPortResponse = ListResponse<PortOfCallByPortData>;
pub type PlanRouteResponse = Response<PlannedRoute>;
pub type SingleEtaPreciseResponse = Response<SingleEtaPreciseData>;
pub type WeatherByPointResponse = Response<PointWeather>;
pub type WeatherResponse = ListResponse<SeaAreaWeather>;
pub type AllTyphoonResponse = ListResponse<TyphoonSummary>;
pub type SingleTyphoonResponse = ListResponse<TyphoonTrackPoint>;
pub type TidesResponse = ListResponse<TideStation>;
pub type TideDataResponse = Response<TideData>;

/// Custom deserializers
mod serde_helpers {
    use serde::{self, de::Error, Deserialize, Deserializer};

    /// Payload that upstream sends either as one object or as a list
    #[derive(Deserialize)]
    #[serde(untagged)]
    pub enum OneOrMany<T> {
        Many(Vec<T>),
        One(T),
    }

    impl<T> Default for OneOrMany<T> {
        fn default() -> Self {
            OneOrMany::Many(Vec::new())
        }
    }

    /// Status sentinels arrive as integers, except on some endpoints as `0.0`
    pub fn deserialize_status<'de, D>(deserializer: D) -> Result<i64, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = serde_json::Number::deserialize(deserializer)?;
        if let Some(i) = value.as_i64() {
            return Ok(i);
        }
        match value.as_f64() {
            Some(f) if f.fract() == 0.0 && f.abs() < i64::MAX as f64 => Ok(f as i64),
            _ => Err(D::Error::custom(format!("non-integral status {value}"))),
        }
    }
}
