//! Marine weather and typhoon tracks.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Forecast for a whole sea area, from `GetWeather`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeaAreaWeather {
    /// 1 coastal, 2 offshore, 3 open sea
    pub weather_type: i64,
    pub sea_area: String,
    pub publish_time: String,
    pub center_lat: f64,
    pub center_lng: f64,
    pub forecastaging: String,
    pub meteorological: String,
    pub winddirection: String,
    pub windpower: String,
    pub waveheight: String,
    pub visibility: f64,
}

/// Conditions at a single coordinate, from `GetWeatherByPoint`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointWeather {
    /// 500 hPa geopotential height
    pub bm500: f64,
    pub humidity: f64,
    /// Current direction
    pub oceandir: f64,
    pub oceanspeed: f64,
    pub pressure: f64,
    pub swelldir: f64,
    pub swellheight: f64,
    pub swellperiod: f64,
    pub temperature: f64,
    pub visibility: f64,
    pub waveheight: f64,
    pub winddir: f64,
    pub windspeed: f64,
    pub publish_time: String,
    pub lng: f64,
    pub lat: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TyphoonSummary {
    /// Pass to `GetSingleTyphoon`
    pub typhoon_id: i64,
    pub typhoon_code: i64,
    pub typhoon_cncode: String,
    pub typhoon_cnname: String,
    pub typhoon_name: String,
    pub current_year: i64,
    #[serde(rename = "dataMark")]
    pub data_mark: String,
}

/// One observed or forecast point of a typhoon track
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TyphoonTrackPoint {
    pub typhoon_id: i64,
    pub typhoon_time: i64,
    pub forecast: String,
    /// Forecast lead time
    pub fhour: String,
    pub lat: f64,
    pub lng: f64,
    pub grade: i64,
    /// Maximum sustained wind speed
    pub mspeed: f64,
    pub pressure: f64,
    /// Translation speed
    pub kspeed: f64,
    pub direction: String,
    pub radius7: f64,
    pub radius10: f64,
    pub radius7_s: f64,
    pub radius10_s: f64,
    pub radius12_s: f64,
}

impl TyphoonTrackPoint {
    pub fn time(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.typhoon_time, 0)
    }
}
