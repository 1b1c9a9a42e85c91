//! Shipxy API client
//!
//! One method per upstream endpoint. Every call runs the same path:
//! validate parameters, GET (with a POST retry on 414 where allowed),
//! reject non-200 statuses, check the success sentinel, decode.

use serde::de::{DeserializeOwned, Error as _};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::config::AppConfig;
use crate::endpoint::Endpoint;
use crate::errors::{Result, ShipxyError};
use crate::models::*;
use crate::query::*;
use crate::transport::{HttpResponse, HttpTransport, Transport};

const URI_TOO_LONG: u16 = 414;

pub struct ShipxyClient<T = HttpTransport> {
    transport: T,
    api_key: String,
    base_url: String,
}

impl ShipxyClient<HttpTransport> {
    pub fn new(api_key: impl Into<String>, base_url: impl Into<String>) -> Result<Self> {
        let transport = HttpTransport::new().map_err(|source| ShipxyError::Transport {
            operation: "client setup",
            source,
        })?;
        Ok(Self::with_transport(api_key, base_url, transport))
    }

    pub fn from_config(config: &AppConfig) -> Result<Self> {
        config.validate()?;
        Self::new(config.api_key.clone(), config.base_url.clone())
    }
}

impl<T: Transport> ShipxyClient<T> {
    pub fn with_transport(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
        transport: T,
    ) -> Self {
        Self {
            transport,
            api_key: api_key.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    async fn call<Q, R>(&self, endpoint: Endpoint, query: &Q) -> Result<R>
    where
        Q: Serialize + Validate,
        R: DeserializeOwned,
    {
        query.validate()?;

        let mut params = vec![("key".to_string(), self.api_key.clone())];
        params.extend(to_pairs(query)?);

        let url = format!("{}{}", self.base_url, endpoint.path());
        debug!(
            "{} with parameters {:?}",
            endpoint.name(),
            params.iter().skip(1).collect::<Vec<_>>()
        );

        let operation = endpoint.name();
        let transport_err = |source| ShipxyError::Transport { operation, source };

        let mut response = self
            .transport
            .get(&url, &params)
            .await
            .map_err(transport_err)?;
        if response.status == URI_TOO_LONG && endpoint.post_fallback() {
            warn!("{}: URI too long, retrying as POST", operation);
            response = self
                .transport
                .post_form(&url, &params)
                .await
                .map_err(transport_err)?;
        }

        let HttpResponse { status, body } = response;
        if status != 200 {
            return Err(ShipxyError::HttpStatus { operation, status });
        }

        decode_response(endpoint, &body)
    }

    /// Fuzzy search by name, call sign, mmsi or imo.
    ///
    /// An imo lists every mmsi the hull has used; a name lists every ship
    /// that has carried it.
    pub async fn search_ship(
        &self,
        keywords: &str,
        max_results: Option<u32>,
    ) -> Result<SearchShipResponse> {
        let query = SearchShipQuery {
            keywords: keywords.to_string(),
            max_results,
        };
        self.call(Endpoint::SearchShip, &query).await
    }

    /// Static particulars and latest position of one ship
    pub async fn get_single_ship(&self, mmsi: u32) -> Result<SingleShipResponse> {
        let query = MmsiQuery {
            mmsi: Mmsi::try_from(mmsi)?,
        };
        self.call(Endpoint::GetSingleShip, &query).await
    }

    /// Up to 100 ships in one call
    pub async fn get_many_ship(&self, mmsis: &[u32]) -> Result<ManyShipResponse> {
        let mmsis = mmsis
            .iter()
            .map(|&m| Mmsi::try_from(m))
            .collect::<Result<Vec<_>>>()?;
        let query = ManyShipQuery { mmsis };
        self.call(Endpoint::GetManyShip, &query).await
    }

    /// Every ship of a fleet maintained in the Shipxy console
    pub async fn get_fleet_ship(&self, fleet_id: &str) -> Result<FleetShipResponse> {
        let query = FleetQuery {
            fleet_id: fleet_id.to_string(),
        };
        self.call(Endpoint::GetFleetShip, &query).await
    }

    /// Ships within 10 nautical miles of the given ship, nearest first
    pub async fn get_surrounding_ship(&self, mmsi: u32) -> Result<SurroundingShipResponse> {
        let query = MmsiQuery {
            mmsi: Mmsi::try_from(mmsi)?,
        };
        self.call(Endpoint::GetSurroundingShip, &query).await
    }

    pub async fn get_area_ship(&self, query: &AreaShipQuery) -> Result<AreaShipResponse> {
        self.call(Endpoint::GetAreaShip, query).await
    }

    /// Flag country or region of a ship
    pub async fn get_ship_registry(&self, mmsi: u32) -> Result<ShipRegistryResponse> {
        let query = MmsiQuery {
            mmsi: Mmsi::try_from(mmsi)?,
        };
        self.call(Endpoint::GetShipRegistry, &query).await
    }

    pub async fn search_ship_particular(
        &self,
        query: &ShipParticularQuery,
    ) -> Result<SearchShipParticularResponse> {
        self.call(Endpoint::SearchShipParticular, query).await
    }

    /// Fuzzy port search by name or five-character code
    pub async fn search_port(
        &self,
        keywords: &str,
        max_results: Option<u32>,
    ) -> Result<SearchPortResponse> {
        let query = SearchPortQuery {
            keywords: keywords.to_string(),
            max_results,
        };
        self.call(Endpoint::SearchPort, &query).await
    }

    pub async fn get_berth_ships(
        &self,
        port_code: &str,
        ship_type: Option<i64>,
    ) -> Result<BerthShipsResponse> {
        let query = PortShipsQuery {
            port_code: port_code.to_string(),
            ship_type,
        };
        self.call(Endpoint::GetBerthShips, &query).await
    }

    /// Ships at a port's anchorage. `data` is always a list, even when
    /// upstream answers with a single object.
    pub async fn get_anchor_ships(
        &self,
        port_code: &str,
        ship_type: Option<i64>,
    ) -> Result<AnchorShipsResponse> {
        let query = PortShipsQuery {
            port_code: port_code.to_string(),
            ship_type,
        };
        self.call(Endpoint::GetAnchorShips, &query).await
    }

    pub async fn get_eta_ships(&self, query: &EtaShipsQuery) -> Result<EtaShipsResponse> {
        self.call(Endpoint::GetEtaShips, query).await
    }

    pub async fn get_ship_track(&self, query: &ShipTrackQuery) -> Result<ShipTrackResponse> {
        self.call(Endpoint::GetShipTrack, query).await
    }

    /// Vessels that stayed alongside the given ship for five minutes or more
    pub async fn search_ship_approach(
        &self,
        query: &ShipApproachQuery,
    ) -> Result<ApproachResponse> {
        self.call(Endpoint::SearchShipApproach, query).await
    }

    pub async fn get_port_of_call_by_ship(
        &self,
        query: &PortOfCallByShipQuery,
    ) -> Result<PortOfCallByShipResponse> {
        self.call(Endpoint::GetPortOfCallByShip, query).await
    }

    pub async fn get_port_of_call_by_ship_port(
        &self,
        query: &PortOfCallByShipPortQuery,
    ) -> Result<PortOfCallByShipPortResponse> {
        self.call(Endpoint::GetPortOfCallByShipPort, query).await
    }

    pub async fn get_ship_status(&self, query: &ShipStatusQuery) -> Result<ShipStatusResponse> {
        self.call(Endpoint::GetShipStatus, query).await
    }

    pub async fn get_port_of_call_by_port(
        &self,
        query: &PortOfCallByPortQuery,
    ) -> Result<PortOfCallByPortResponse> {
        self.call(Endpoint::GetPortOfCallByPort, query).await
    }

    pub async fn plan_route_by_point(&self, query: &RouteByPointQuery) -> Result<PlanRouteResponse> {
        self.call(Endpoint::PlanRouteByPoint, query).await
    }

    pub async fn plan_route_by_port(&self, query: &RouteByPortQuery) -> Result<PlanRouteResponse> {
        self.call(Endpoint::PlanRouteByPort, query).await
    }

    pub async fn get_single_eta_precise(
        &self,
        query: &SingleEtaPreciseQuery,
    ) -> Result<SingleEtaPreciseResponse> {
        self.call(Endpoint::GetSingleEtaPrecise, query).await
    }

    pub async fn get_weather_by_point(
        &self,
        query: &WeatherByPointQuery,
    ) -> Result<WeatherByPointResponse> {
        self.call(Endpoint::GetWeatherByPoint, query).await
    }

    /// Sea-area forecasts for the next 72 hours
    pub async fn get_weather(&self, weather_type: i64) -> Result<WeatherResponse> {
        self.call(Endpoint::GetWeather, &WeatherQuery { weather_type })
            .await
    }

    /// Typhoons of the last three years
    pub async fn get_all_typhoon(&self) -> Result<AllTyphoonResponse> {
        self.call(Endpoint::GetAllTyphoon, &NoParams {}).await
    }

    pub async fn get_single_typhoon(&self, typhoon_id: i64) -> Result<SingleTyphoonResponse> {
        self.call(Endpoint::GetSingleTyphoon, &TyphoonQuery { typhoon_id })
            .await
    }

    /// Domestic tide stations
    pub async fn get_tides(&self) -> Result<TidesResponse> {
        self.call(Endpoint::GetTides, &NoParams {}).await
    }

    pub async fn get_tide_data(&self, query: &TideDataQuery) -> Result<TideDataResponse> {
        self.call(Endpoint::GetTideData, query).await
    }
}

/// Check the success sentinel of a raw body and decode it
pub fn decode_response<R: DeserializeOwned>(endpoint: Endpoint, body: &str) -> Result<R> {
    let operation = endpoint.name();
    let decode_err = |source| ShipxyError::Decode { operation, source };

    let value: Value = serde_json::from_str(body).map_err(decode_err)?;
    if !value.is_object() {
        return Err(decode_err(serde_json::Error::custom(
            "expected a JSON object envelope",
        )));
    }

    let field = endpoint.success_field();
    let sentinel = value.get(field.sentinel_key());
    if sentinel.and_then(Value::as_f64) != Some(0.0) {
        let code = sentinel
            .and_then(|v| v.as_i64().or_else(|| v.as_f64().map(|f| f as i64)))
            .unwrap_or(-1);
        let message = value
            .get(field.message_key())
            .and_then(Value::as_str)
            .unwrap_or("unknown error")
            .to_string();
        warn!("{} failed upstream with {}: {}", operation, code, message);
        return Err(ShipxyError::Upstream {
            operation,
            code,
            message,
        });
    }

    serde_json::from_value(value).map_err(decode_err)
}
