//! Tide stations and tide tables.
//!
//! Heights are relative to each station's own datum (`datumn`), so values
//! from different stations are not comparable.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TideStation {
    /// Station id, pass to `GetTideData`
    pub port_code: i64,
    pub port_cnname: String,
    pub port_name: String,
    pub port_country_cnname: String,
    pub port_country_name: String,
    pub lat: f64,
    pub lng: f64,
    pub port_time_zone: String,
    pub datumn: String,
    pub tidetype: String,
}

/// High and low waters of one day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TideOverviewItem {
    pub tide_date: String,
    pub tide_time1: String,
    pub tide_time2: String,
    pub tide_time3: String,
    pub tide_time4: String,
    pub tide_height1: f64,
    pub tide_height2: f64,
    pub tide_height3: f64,
    pub tide_height4: f64,
    pub tide_lowhigh1: String,
    pub tide_lowhigh2: String,
    pub tide_lowhigh3: String,
    pub tide_lowhigh4: String,
}

/// Hourly heights of one day, `h0` at 00:00 through `h23` at 23:00
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TideDetailItem {
    pub tide_date: String,
    #[serde(default)]
    pub h0: f64,
    #[serde(default)]
    pub h1: f64,
    #[serde(default)]
    pub h2: f64,
    #[serde(default)]
    pub h3: f64,
    #[serde(default)]
    pub h4: f64,
    #[serde(default)]
    pub h5: f64,
    #[serde(default)]
    pub h6: f64,
    #[serde(default)]
    pub h7: f64,
    #[serde(default)]
    pub h8: f64,
    #[serde(default)]
    pub h9: f64,
    #[serde(default)]
    pub h10: f64,
    #[serde(default)]
    pub h11: f64,
    #[serde(default)]
    pub h12: f64,
    #[serde(default)]
    pub h13: f64,
    #[serde(default)]
    pub h14: f64,
    #[serde(default)]
    pub h15: f64,
    #[serde(default)]
    pub h16: f64,
    #[serde(default)]
    pub h17: f64,
    #[serde(default)]
    pub h18: f64,
    #[serde(default)]
    pub h19: f64,
    #[serde(default)]
    pub h20: f64,
    #[serde(default)]
    pub h21: f64,
    #[serde(default)]
    pub h22: f64,
    #[serde(default)]
    pub h23: f64,
}

impl TideDetailItem {
    /// Heights in hour order
    pub fn hourly(&self) -> [f64; 24] {
        [
            self.h0, self.h1, self.h2, self.h3, self.h4, self.h5, self.h6, self.h7, self.h8,
            self.h9, self.h10, self.h11, self.h12, self.h13, self.h14, self.h15, self.h16,
            self.h17, self.h18, self.h19, self.h20, self.h21, self.h22, self.h23,
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TideData {
    pub overview: Vec<TideOverviewItem>,
    pub detail: Vec<TideDetailItem>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_detail_missing_hours() {
        let s = r#"{"tide_date": "2025-03-01", "h0": 1.2, "h23": 3.4}"#;
        let detail: TideDetailItem = serde_json::from_str(s).unwrap();
        let hours = detail.hourly();
        assert_eq!(hours[0], 1.2);
        assert_eq!(hours[12], 0.0);
        assert_eq!(hours[23], 3.4);
    }
}
