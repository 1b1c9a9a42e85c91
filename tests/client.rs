use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use serde_json::json;

use shipxy_mcp::{
    client::decode_response,
    endpoint::Endpoint,
    errors::{ErrorKind, ShipxyError, TransportError},
    models::{AnchorShipsResponse, SingleShipResponse},
    query::{RouteByPointQuery, ShipParticularQuery, TideDataQuery},
    tools,
    transport::{HttpResponse, Transport},
    ShipxyClient,
};

#[derive(Debug, Clone, PartialEq)]
struct Recorded {
    method: &'static str,
    url: String,
    params: Vec<(String, String)>,
}

impl Recorded {
    fn param(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// Records every request and answers from a queue of canned replies
#[derive(Default)]
struct StubTransport {
    replies: Mutex<VecDeque<Result<HttpResponse, TransportError>>>,
    calls: Mutex<Vec<Recorded>>,
}

impl StubTransport {
    fn replying(replies: Vec<Result<HttpResponse, TransportError>>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            calls: Mutex::default(),
        }
    }

    fn ok(body: &str) -> Self {
        Self::replying(vec![Ok(HttpResponse::new(200, body))])
    }

    fn record(
        &self,
        method: &'static str,
        url: &str,
        params: &[(String, String)],
    ) -> Result<HttpResponse, TransportError> {
        self.calls.lock().unwrap().push(Recorded {
            method,
            url: url.to_string(),
            params: params.to_vec(),
        });
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(TransportError::Failed("no canned reply".to_string())))
    }

    fn calls(&self) -> Vec<Recorded> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl Transport for StubTransport {
    async fn get(
        &self,
        url: &str,
        query: &[(String, String)],
    ) -> Result<HttpResponse, TransportError> {
        self.record("GET", url, query)
    }

    async fn post_form(
        &self,
        url: &str,
        form: &[(String, String)],
    ) -> Result<HttpResponse, TransportError> {
        self.record("POST", url, form)
    }
}

fn client(transport: StubTransport) -> ShipxyClient<StubTransport> {
    ShipxyClient::with_transport("secret-key", "http://api.test/apicall/", transport)
}

const SINGLE_SHIP: &str = r#"{
    "status": 0,
    "msg": "success",
    "data": {
        "mmsi": 412345678, "imo": 9123456, "call_sign": "BVAB",
        "ship_name": "XIN HAI", "ship_cnname": "新海", "data_source": 1,
        "ship_type": 52, "length": 32.5, "width": 10.2, "left": 5.0,
        "trail": 20.0, "draught": 4.1, "dest": "SHANGHAI", "destcode": "CNSHA",
        "eta": "2025-03-01 10:00", "eta_utc": 1740794400, "navistat": 0,
        "lat": 31.23, "lng": 121.47, "sog": 8.4, "cog": 95.0, "hdg": 96.0,
        "rot": 0.0, "last_time": "2025-03-01 08:00:00",
        "last_time_utc": 1740787200, "unexpected_field": true
    }
}"#;

#[tokio::test]
async fn test_single_ship_end_to_end() {
    let client = client(StubTransport::ok(SINGLE_SHIP));
    let resp = client.get_single_ship(412345678).await.unwrap();

    assert_eq!(resp.status, 0);
    assert_eq!(resp.data.mmsi, 412345678);
    assert_eq!(resp.data.ship_type_name(), "Tug");
    assert_eq!(resp.data.last_seen().unwrap().timestamp(), 1740787200);

    let calls = client.transport().calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].method, "GET");
    assert_eq!(calls[0].url, "http://api.test/apicall/v3/GetSingleShip");
    assert_eq!(calls[0].params[0], ("key".to_string(), "secret-key".to_string()));
    assert_eq!(calls[0].param("mmsi"), Some("412345678"));
}

#[tokio::test]
async fn test_validation_makes_no_request() {
    let client = client(StubTransport::default());

    let err = client.search_ship("  ", None).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);

    let err = client.get_single_ship(1_234_567_890).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);

    let err = client
        .search_ship_particular(&ShipParticularQuery::default())
        .await
        .unwrap_err();
    assert!(matches!(err, ShipxyError::Validation { ref param, .. } if param == "mmsi"));

    let err = client.search_port("SHANGHAI", Some(101)).await.unwrap_err();
    assert!(err.to_string().contains("max_results"));

    let err = client
        .get_tide_data(&TideDataQuery {
            port_code: 1001,
            start_date: NaiveDate::from_ymd_opt(2025, 3, 7).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
        })
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);

    assert!(client.transport().calls().is_empty());
}

#[tokio::test]
async fn test_http_status_error() {
    let client = client(StubTransport::replying(vec![Ok(HttpResponse::new(
        500,
        "Internal Server Error",
    ))]));
    let err = client.get_tides().await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Transport);
    assert!(matches!(err, ShipxyError::HttpStatus { status: 500, .. }));
    assert!(err.to_string().contains("500"));
}

#[tokio::test]
async fn test_timeout_is_flagged() {
    let client = client(StubTransport::replying(vec![Err(TransportError::Timeout(
        Duration::from_secs(10),
    ))]));
    let err = client.get_all_typhoon().await.unwrap_err();
    assert!(err.is_timeout());
    assert_eq!(err.operation(), Some("GetAllTyphoon"));
}

#[tokio::test]
async fn test_upstream_status_error() {
    let client = client(StubTransport::ok(r#"{"status": 3, "msg": "key expired"}"#));
    let err = client.get_weather(1).await.unwrap_err();
    match err {
        ShipxyError::Upstream {
            operation,
            code,
            message,
        } => {
            assert_eq!(operation, "GetWeather");
            assert_eq!(code, 3);
            assert_eq!(message, "key expired");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_approach_search_uses_code() {
    let client = client(StubTransport::ok(
        r#"{"code": 105, "message": "no approach permission"}"#,
    ));
    let query = serde_json::from_value(json!({
        "mmsi": 412345678, "start_time": 1740700000, "end_time": 1740787200
    }))
    .unwrap();
    let err = client.search_ship_approach(&query).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Upstream);
    assert!(err.to_string().contains("no approach permission"));
    assert_eq!(
        client.transport().calls()[0].url,
        "http://api.test/apicall/v3/SearchshipApproach"
    );
}

#[tokio::test]
async fn test_search_ship_falls_back_to_post() {
    let body = r#"{"status": 0, "msg": "ok", "total": 1, "data": [{
        "match_type": 1, "mmsi": 412345678, "imo": 9123456, "call_sign": "BVAB",
        "ship_name": "XIN HAI", "data_source": 1,
        "last_time": "2025-03-01 08:00:00", "last_time_utc": 1740787200
    }]}"#;
    let client = client(StubTransport::replying(vec![
        Ok(HttpResponse::new(414, "")),
        Ok(HttpResponse::new(200, body)),
    ]));

    let resp = client.search_ship("XIN HAI", Some(5)).await.unwrap();
    assert_eq!(resp.total, 1);
    assert_eq!(resp.data[0].mmsi, 412345678);

    let calls = client.transport().calls();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[0].method, "GET");
    assert_eq!(calls[1].method, "POST");
    assert_eq!(calls[0].params, calls[1].params);
    assert_eq!(calls[1].param("max"), Some("5"));
}

#[tokio::test]
async fn test_no_post_fallback_elsewhere() {
    let client = client(StubTransport::replying(vec![Ok(HttpResponse::new(414, ""))]));
    let err = client.search_port("SHANGHAI", None).await.unwrap_err();
    assert!(matches!(err, ShipxyError::HttpStatus { status: 414, .. }));
    assert_eq!(client.transport().calls().len(), 1);
}

#[tokio::test]
async fn test_route_planner_omits_absent_options() {
    let body = r#"{"status": 0, "msg": "ok", "data": {
        "distance": 2150.4,
        "route": [{"lng": 121.5, "lat": 31.2}, {"lng": 103.8, "lat": 1.2}]
    }}"#;
    let client = client(StubTransport::ok(body));
    let query = RouteByPointQuery {
        start_point: "121.5,31.2".to_string(),
        end_point: "103.8,1.2".to_string(),
        ..Default::default()
    };
    let resp = client.plan_route_by_point(&query).await.unwrap();
    assert_eq!(resp.data.route.len(), 2);

    let calls = client.transport().calls();
    assert!(calls[0].param("avoid").is_none());
    assert!(calls[0].param("through").is_none());
    assert_eq!(calls[0].param("start_point"), Some("121.5,31.2"));
}

#[tokio::test]
async fn test_many_ship_joins_mmsis() {
    let client = client(StubTransport::ok(r#"{"status": 0, "msg": "ok", "data": []}"#));
    let resp = client.get_many_ship(&[412345678, 413000001]).await.unwrap();
    assert!(resp.data.is_empty());
    assert_eq!(
        client.transport().calls()[0].param("mmsis"),
        Some("412345678,413000001")
    );
}

#[tokio::test]
async fn test_anchor_ships_single_object() {
    let body = r#"{"status": 0, "msg": "ok", "data": {
        "mmsi": 413000001, "imo": 9000001, "call_sign": "BQRS",
        "ship_name": "HAI YANG", "ship_type": 80, "length": 180.0,
        "width": 30.0, "left": 15.0, "trail": 90.0, "draught": 8.5,
        "arrival_time": "2025-03-01 08:00:00", "arrival_time_utc": 1740787200,
        "stay_time": 12.5
    }}"#;
    let client = client(StubTransport::ok(body));
    let resp = client.get_anchor_ships("CNSHA", None).await.unwrap();
    assert_eq!(resp.total, 1);
    assert_eq!(resp.data.len(), 1);
    assert_eq!(resp.data[0].ship_type_name(), "Tanker");
    assert!(client.transport().calls()[0].param("ship_type").is_none());
}

#[test]
fn test_decode_is_idempotent() {
    let first: SingleShipResponse = decode_response(Endpoint::GetSingleShip, SINGLE_SHIP).unwrap();
    let second: SingleShipResponse =
        decode_response(Endpoint::GetSingleShip, SINGLE_SHIP).unwrap();
    assert_eq!(first, second);

    let anchor = r#"{"status": 0, "msg": "ok", "total": 0, "data": []}"#;
    let a: AnchorShipsResponse = decode_response(Endpoint::GetAnchorShips, anchor).unwrap();
    let b: AnchorShipsResponse = decode_response(Endpoint::GetAnchorShips, anchor).unwrap();
    assert_eq!(a, b);
}

#[tokio::test]
async fn test_tool_dispatch() {
    let client = client(StubTransport::ok(SINGLE_SHIP));

    let err = tools::dispatch(&client, "get_ship_track", json!({"mmsi": 412345678}))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);
    assert!(client.transport().calls().is_empty());

    let value = tools::dispatch(&client, "get_single_ship", json!({"mmsi": 412345678}))
        .await
        .unwrap();
    assert_eq!(value["data"]["ship_name"], "XIN HAI");
    assert_eq!(client.transport().calls().len(), 1);
}

#[tokio::test]
async fn test_tool_defaults_reach_upstream() {
    let client = client(StubTransport::ok(
        r#"{"status": 0, "msg": "ok", "total": 0, "data": []}"#,
    ));
    tools::dispatch(
        &client,
        "get_port_of_call_by_port",
        json!({"port_code": "CNSHA", "start_time": 1740700000, "end_time": 1740787200}),
    )
    .await
    .unwrap();

    let calls = client.transport().calls();
    assert_eq!(calls[0].param("type"), Some("1"));
    assert_eq!(calls[0].param("time_zone"), Some("2"));
    assert_eq!(
        calls[0].url,
        "http://api.test/apicall/v3/GetPortofCallByPort"
    );
}

const START: i64 = 1740700000;
const END: i64 = 1740787200;

/// Smallest valid arguments per tool and the upstream path each one hits
fn minimal_call(tool: &str) -> Option<(serde_json::Value, &'static str)> {
    let mmsi = 412345678;
    let call = match tool {
        "search_ship" => (json!({"keywords": "XIN HAI"}), "SearchShip"),
        "get_single_ship" => (json!({"mmsi": mmsi}), "GetSingleShip"),
        "get_many_ship" => (json!({"mmsis": [mmsi, 413000000]}), "GetManyShip"),
        "get_fleet_ship" => (json!({"fleet_id": "f-1"}), "GetFleetShip"),
        "get_surrounding_ship" => (json!({"mmsi": mmsi}), "GetSurRoundingShip"),
        "get_area_ship" => (
            json!({"region": "121.1,31.1-121.9,31.1-121.9,31.9"}),
            "GetAreaShip",
        ),
        "get_ship_registry" => (json!({"mmsi": mmsi}), "GetShipRegistry"),
        "search_ship_particular" => (json!({"imo": 9123456}), "SearchShipParticular"),
        "search_port" => (json!({"keywords": "SHANGHAI"}), "SearchPort"),
        "get_berth_ships" => (json!({"port_code": "CNSHA"}), "GetBerthShips"),
        "get_anchor_ships" => (json!({"port_code": "CNSHA"}), "GetAnchorShips"),
        "get_eta_ships" => (
            json!({"port_code": "CNSHA", "start_time": START, "end_time": END}),
            "GetETAShips",
        ),
        "get_ship_track" => (
            json!({"mmsi": mmsi, "start_time": START, "end_time": END}),
            "GetShipTrack",
        ),
        "search_ship_approach" => (
            json!({"mmsi": mmsi, "start_time": START, "end_time": END}),
            "SearchshipApproach",
        ),
        "get_port_of_call_by_ship" => (
            json!({"mmsi": mmsi, "start_time": START, "end_time": END}),
            "GetPortofCallByShip",
        ),
        "get_port_of_call_by_ship_port" => (
            json!({"mmsi": mmsi, "port_code": "CNSHA", "start_time": START, "end_time": END}),
            "GetPortofCallByShipPort",
        ),
        "get_ship_status" => (json!({"mmsi": mmsi}), "GetShipStatus"),
        "get_port_of_call_by_port" => (
            json!({"port_code": "CNSHA", "start_time": START, "end_time": END}),
            "GetPortofCallByPort",
        ),
        "plan_route_by_point" => (
            json!({"start_point": "121.5,31.2", "end_point": "113.9,22.5"}),
            "PlanRouteByPoint",
        ),
        "plan_route_by_port" => (
            json!({"start_port_code": "CNSHA", "end_port_code": "CNSZX"}),
            "PlanRouteByPort",
        ),
        "get_single_eta_precise" => (json!({"mmsi": mmsi}), "GetSingleETAPrecise"),
        "get_weather_by_point" => (json!({"lng": 121.5, "lat": 31.2}), "GetWeatherByPoint"),
        "get_weather" => (json!({"weather_type": 0}), "GetWeather"),
        "get_all_typhoon" => (json!({}), "GetAllTyphoon"),
        "get_single_typhoon" => (json!({"typhoon_id": 2501}), "GetSingleTyphoon"),
        "get_tides" => (json!({}), "GetTides"),
        "get_tide_data" => (
            json!({"port_code": 1001, "start_date": "2025-03-01", "end_date": "2025-03-07"}),
            "GetTideData",
        ),
        _ => return None,
    };
    Some(call)
}

#[tokio::test]
async fn test_every_tool_reports_http_status() {
    for spec in tools::catalog() {
        let (arguments, path) =
            minimal_call(spec.name).unwrap_or_else(|| panic!("no arguments for {}", spec.name));
        let client = client(StubTransport::replying(vec![Ok(HttpResponse::new(
            500,
            "Internal Server Error",
        ))]));

        let err = tools::dispatch(&client, spec.name, arguments)
            .await
            .unwrap_err();
        assert!(
            matches!(err, ShipxyError::HttpStatus { status: 500, .. }),
            "{}: {err:?}",
            spec.name
        );

        let calls = client.transport().calls();
        assert_eq!(calls.len(), 1, "{}", spec.name);
        assert_eq!(calls[0].method, "GET", "{}", spec.name);
        assert_eq!(
            calls[0].url,
            format!("http://api.test/apicall/v3/{path}"),
            "{}",
            spec.name
        );
        assert_eq!(calls[0].param("key"), Some("secret-key"), "{}", spec.name);
    }
}

#[tokio::test]
async fn test_every_tool_reports_upstream_refusal() {
    let refusal = r#"{"status": 5, "msg": "denied", "code": 5, "message": "denied"}"#;
    for spec in tools::catalog() {
        let (arguments, _) =
            minimal_call(spec.name).unwrap_or_else(|| panic!("no arguments for {}", spec.name));
        let client = client(StubTransport::ok(refusal));

        let err = tools::dispatch(&client, spec.name, arguments)
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Upstream, "{}: {err:?}", spec.name);
        match err {
            ShipxyError::Upstream { code, message, .. } => {
                assert_eq!(code, 5, "{}", spec.name);
                assert_eq!(message, "denied", "{}", spec.name);
            }
            other => panic!("{}: unexpected {other:?}", spec.name),
        }
    }
}
