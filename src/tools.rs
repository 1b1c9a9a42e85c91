//! Tool catalog and dispatch.
//!
//! Maps tool-call names and JSON arguments onto client operations. Arguments
//! deserialize straight into the query structs, so missing or mistyped
//! arguments fail as validation errors naming the offending parameter, before
//! any request is made.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{json, Map, Value};
use tracing::debug;

use crate::client::ShipxyClient;
use crate::errors::{Result, ShipxyError};
use crate::models::Mmsi;
use crate::query::*;
use crate::transport::Transport;

/// One entry of the `tools/list` result
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolSpec {
    pub name: &'static str,
    pub description: &'static str,
    pub input_schema: Value,
}

fn integer(description: &str) -> Value {
    json!({ "type": "integer", "description": description })
}

fn number(description: &str) -> Value {
    json!({ "type": "number", "description": description })
}

fn string(description: &str) -> Value {
    json!({ "type": "string", "description": description })
}

fn with_default(mut schema: Value, default: i64) -> Value {
    schema["default"] = json!(default);
    schema
}

fn object(properties: Vec<(&str, Value)>, required: &[&str]) -> Value {
    let properties: Map<String, Value> = properties
        .into_iter()
        .map(|(name, schema)| (name.to_string(), schema))
        .collect();
    json!({
        "type": "object",
        "properties": properties,
        "required": required,
    })
}

fn tool(name: &'static str, description: &'static str, input_schema: Value) -> ToolSpec {
    ToolSpec {
        name,
        description,
        input_schema,
    }
}

fn mmsi() -> Value {
    integer(
        "MMSI: nine-digit maritime mobile service identity of the ship. The first \
         three digits give the flag country or region; the number may change when \
         the ship is sold.",
    )
}

fn imo() -> Value {
    integer("IMO number: seven-digit hull identifier assigned by the International Maritime Organization")
}

fn ship_name() -> Value {
    string("English name of the ship")
}

fn call_sign() -> Value {
    string("Radio call sign of the ship")
}

fn start_time() -> Value {
    integer("Start of the time window, Unix timestamp in seconds (UTC)")
}

fn end_time() -> Value {
    integer("End of the time window, Unix timestamp in seconds (UTC)")
}

fn port_code() -> Value {
    string("Standard five-character port code, e.g. CNSHA; see search_port")
}

fn ship_type_filter() -> Value {
    integer("Only return ships of this numeric AIS ship-type code")
}

fn time_zone() -> Value {
    with_default(
        integer("Time zone of returned times: 0 port local time, 1 UTC, 2 Beijing time"),
        2,
    )
}

fn output() -> Value {
    with_default(integer("Output format; only 1 (JSON) is supported"), 1)
}

fn max_results() -> Value {
    integer("Maximum number of results to return, 1 to 100")
}

fn avoid() -> Value {
    string("Waypoints or areas the route must go around")
}

fn through() -> Value {
    string("Waypoints the route must pass through")
}

/// All tools served, in the order they are listed
pub fn catalog() -> Vec<ToolSpec> {
    vec![
        tool(
            "search_ship",
            "Fuzzy ship search. Matches keywords against MMSI, IMO, ship name and \
             call sign and returns static records of every matching ship. Searching \
             by IMO lists every MMSI the hull has used; searching by name lists every \
             ship that has carried that name.",
            object(
                vec![
                    ("keywords", string("Ship name, call sign, MMSI or IMO, whole or partial")),
                    ("max_results", max_results()),
                ],
                &["keywords"],
            ),
        ),
        tool(
            "get_single_ship",
            "Position of one ship. Returns static particulars (IMO, call sign, \
             English and Chinese names, ship type, length and breadth) plus the \
             latest AIS report: position, navigational status, destination, speed, \
             ETA, heading and course.",
            object(vec![("mmsi", mmsi())], &["mmsi"]),
        ),
        tool(
            "get_many_ship",
            "Positions of several ships. Returns, for each MMSI, the same static \
             particulars and latest AIS report as get_single_ship.",
            object(
                vec![(
                    "mmsis",
                    json!({
                        "type": "array",
                        "items": { "type": "integer" },
                        "minItems": 1,
                        "maxItems": MAX_ITEMS,
                        "description": "MMSIs of the ships, at most 100",
                    }),
                )],
                &["mmsis"],
            ),
        ),
        tool(
            "get_fleet_ship",
            "Positions of every ship in a fleet maintained in the Shipxy console.",
            object(
                vec![("fleet_id", string("Fleet id from the Shipxy console"))],
                &["fleet_id"],
            ),
        ),
        tool(
            "get_surrounding_ship",
            "Ships within a 10 nautical mile radius of the given ship, nearest \
             first, each with static particulars and the latest AIS report.",
            object(vec![("mmsi", mmsi())], &["mmsi"]),
        ),
        tool(
            "get_area_ship",
            "Ships currently inside a polygon, with static particulars and latest \
             AIS reports. Large areas are paged: pass the returned scode back to \
             fetch the next page.",
            object(
                vec![
                    (
                        "region",
                        string("Polygon vertices as lng,lat pairs joined by '-', e.g. 121.1,31.1-121.9,31.1-121.9,31.9"),
                    ),
                    ("output", output()),
                    ("scode", integer("Session code returned by the previous page")),
                ],
                &["region"],
            ),
        ),
        tool(
            "get_ship_registry",
            "Flag country or region the ship is registered in.",
            object(vec![("mmsi", mmsi())], &["mmsi"]),
        ),
        tool(
            "search_ship_particular",
            "Register particulars of a ship (owner, manager, tonnage, dimensions, \
             engines, build) by MMSI, IMO, call sign or English name. Only ships with \
             an IMO number have a register record. At least one identifier is required.",
            object(
                vec![
                    ("mmsi", mmsi()),
                    ("imo", imo()),
                    ("call_sign", call_sign()),
                    ("ship_name", ship_name()),
                ],
                &[],
            ),
        ),
        tool(
            "search_port",
            "Fuzzy search over ports worldwide by Chinese or English name or \
             five-character code. Returns names, port code and time zone; the port \
             code is the key for every port-level query.",
            object(
                vec![
                    ("keywords", string("Port name (Chinese or English) or port code, whole or partial")),
                    ("max_results", max_results()),
                ],
                &["keywords"],
            ),
        ),
        tool(
            "get_berth_ships",
            "Ships currently at berth in a port: total count, ship types, basic \
             particulars, arrival time and time spent in port.",
            object(
                vec![("port_code", port_code()), ("ship_type", ship_type_filter())],
                &["port_code"],
            ),
        ),
        tool(
            "get_anchor_ships",
            "Ships currently waiting at a port's anchorage: total count, ship types, \
             basic particulars, arrival time and time spent waiting.",
            object(
                vec![("port_code", port_code()), ("ship_type", ship_type_filter())],
                &["port_code"],
            ),
        ),
        tool(
            "get_eta_ships",
            "Ships expected to arrive at a port within a future time window, with \
             their particulars, previous port and ETA.",
            object(
                vec![
                    ("port_code", port_code()),
                    ("start_time", start_time()),
                    ("end_time", end_time()),
                    ("ship_type", ship_type_filter()),
                ],
                &["port_code", "start_time", "end_time"],
            ),
        ),
        tool(
            "get_ship_track",
            "Historical track of a ship: the AIS points it reported within a time \
             window, with position, speed, course and heading.",
            object(
                vec![
                    ("mmsi", mmsi()),
                    ("start_time", start_time()),
                    ("end_time", end_time()),
                    ("output", output()),
                ],
                &["mmsi", "start_time", "end_time"],
            ),
        ),
        tool(
            "search_ship_approach",
            "Approach events of a ship within a time window: other ships that lay \
             alongside or sailed side by side with it for more than five minutes, \
             with their particulars, position and the start and end of each event.",
            object(
                vec![
                    ("mmsi", mmsi()),
                    ("start_time", start_time()),
                    ("end_time", end_time()),
                    ("approach_zone", integer("Region code to restrict events to")),
                ],
                &["mmsi", "start_time", "end_time"],
            ),
        ),
        tool(
            "get_port_of_call_by_ship",
            "Port-call history of a ship within a time window: anchorage arrival, \
             port arrival (ATA), berthing (ATB) and departure (ATD) times, time \
             spent in port and draught on arrival and departure.",
            object(
                vec![
                    ("mmsi", mmsi()),
                    ("start_time", start_time()),
                    ("end_time", end_time()),
                    ("imo", imo()),
                    ("ship_name", ship_name()),
                    ("call_sign", call_sign()),
                    ("time_zone", time_zone()),
                ],
                &["mmsi", "start_time", "end_time"],
            ),
        ),
        tool(
            "get_port_of_call_by_ship_port",
            "Calls of a ship at one specific port within a time window, with the \
             same arrival, berthing, departure, stay and draught details as \
             get_port_of_call_by_ship.",
            object(
                vec![
                    ("mmsi", mmsi()),
                    ("port_code", port_code()),
                    ("start_time", start_time()),
                    ("end_time", end_time()),
                    ("imo", imo()),
                    ("ship_name", ship_name()),
                    ("call_sign", call_sign()),
                    ("time_zone", time_zone()),
                ],
                &["mmsi", "port_code", "start_time", "end_time"],
            ),
        ),
        tool(
            "get_ship_status",
            "Whether a ship is in port right now; if so, the port it is calling at \
             and when it arrived, together with its previous port.",
            object(
                vec![
                    ("mmsi", mmsi()),
                    ("imo", imo()),
                    ("ship_name", ship_name()),
                    ("call_sign", call_sign()),
                    ("time_zone", time_zone()),
                ],
                &["mmsi"],
            ),
        ),
        tool(
            "get_port_of_call_by_port",
            "Every ship that called at a port within a time window, with its \
             particulars, the call itself and its previous and next port calls.",
            object(
                vec![
                    ("port_code", port_code()),
                    ("start_time", start_time()),
                    ("end_time", end_time()),
                    (
                        "type_",
                        with_default(
                            integer("Which time the window filters on: 1 arrival (ATA), 2 departure (ATD)"),
                            1,
                        ),
                    ),
                    ("time_zone", time_zone()),
                ],
                &["port_code", "start_time", "end_time"],
            ),
        ),
        tool(
            "plan_route_by_point",
            "Sea route between two coordinates: total distance in nautical miles \
             and the waypoints the route passes.",
            object(
                vec![
                    ("start_point", string("Start as lng,lat")),
                    ("end_point", string("End as lng,lat")),
                    ("avoid", avoid()),
                    ("through", through()),
                ],
                &["start_point", "end_point"],
            ),
        ),
        tool(
            "plan_route_by_port",
            "Sea route between two ports: total distance in nautical miles and the \
             waypoints the route passes.",
            object(
                vec![
                    ("start_port_code", string("Five-character code of the departure port")),
                    ("end_port_code", string("Five-character code of the arrival port")),
                    ("avoid", avoid()),
                    ("through", through()),
                ],
                &["start_port_code", "end_port_code"],
            ),
        ),
        tool(
            "get_single_eta_precise",
            "Estimated arrival of a ship: departure port and actual departure time, \
             then total distance, distance sailed and predicted arrival at the next \
             destination port.",
            object(
                vec![
                    ("mmsi", mmsi()),
                    ("port_code", string("Destination port code; defaults to the ship's reported destination")),
                    ("speed", number("Assumed speed in knots; defaults to the ship's current speed")),
                ],
                &["mmsi"],
            ),
        ),
        tool(
            "get_weather_by_point",
            "Marine weather at a coordinate anywhere in the world: air pressure and \
             its trend, wind direction and speed, wave height and visibility.",
            object(
                vec![
                    ("lng", number("Longitude, -180 to 180")),
                    ("lat", number("Latitude, -90 to 90")),
                    ("weather_time", integer("Forecast time as Unix seconds; latest when omitted")),
                ],
                &["lng", "lat"],
            ),
        ),
        tool(
            "get_weather",
            "Sea-area forecasts for the next 72 hours. Forecasts cover whole sea \
             areas, so they are coarser than get_weather_by_point.",
            object(
                vec![(
                    "weather_type",
                    integer("Sea areas to include: 0 all, 1 coastal, 2 offshore, 3 open sea"),
                )],
                &["weather_type"],
            ),
        ),
        tool(
            "get_all_typhoon",
            "Typhoons worldwide over the last three years. Use the returned typhoon \
             id with get_single_typhoon for position, heading, wind speed, wind \
             force and radius details.",
            object(vec![], &[]),
        ),
        tool(
            "get_single_typhoon",
            "Track of one typhoon: position, heading, wind speed, wind force and \
             radius at each point. Take the id from get_all_typhoon.",
            object(
                vec![("typhoon_id", integer("Typhoon id from get_all_typhoon"))],
                &["typhoon_id"],
            ),
        ),
        tool(
            "get_tides",
            "Domestic tide stations. Use a station's code with get_tide_data for \
             its hourly tide heights.",
            object(vec![], &[]),
        ),
        tool(
            "get_tide_data",
            "Hourly tide heights of one domestic station between two dates. Heights \
             are relative to each station's own tidal datum, which differs between \
             ports.",
            object(
                vec![
                    ("port_code", integer("Tide station code from get_tides")),
                    ("start_date", string("First day, yyyy-MM-dd")),
                    ("end_date", string("Last day, yyyy-MM-dd")),
                ],
                &["port_code", "start_date", "end_date"],
            ),
        ),
    ]
}

/// Field name out of serde's "missing field `x`" message
fn missing_field(message: &str) -> Option<&str> {
    message.strip_prefix("missing field `")?.split('`').next()
}

fn parse<Q: DeserializeOwned>(arguments: Value) -> Result<Q> {
    serde_path_to_error::deserialize(arguments).map_err(|err| {
        let path = err.path().to_string();
        let message = err.into_inner().to_string();
        let param = if path != "." {
            path
        } else {
            missing_field(&message).unwrap_or("arguments").to_string()
        };
        ShipxyError::validation(param, message)
    })
}

fn to_json<R: Serialize>(result: R) -> Result<Value> {
    serde_json::to_value(result).map_err(|source| ShipxyError::Decode {
        operation: "tool result",
        source,
    })
}

/// Run one tool call and return its result as JSON
pub async fn dispatch<T: Transport>(
    client: &ShipxyClient<T>,
    name: &str,
    arguments: Value,
) -> Result<Value> {
    let arguments = match arguments {
        Value::Null => Value::Object(Map::new()),
        other => other,
    };
    debug!("Dispatching tool {}", name);

    match name {
        "search_ship" => {
            let q: SearchShipQuery = parse(arguments)?;
            to_json(client.search_ship(&q.keywords, q.max_results).await?)
        }
        "get_single_ship" => {
            let q: MmsiQuery = parse(arguments)?;
            to_json(client.get_single_ship(q.mmsi.value()).await?)
        }
        "get_many_ship" => {
            let q: ManyShipQuery = parse(arguments)?;
            let mmsis: Vec<u32> = q.mmsis.iter().map(Mmsi::value).collect();
            to_json(client.get_many_ship(&mmsis).await?)
        }
        "get_fleet_ship" => {
            let q: FleetQuery = parse(arguments)?;
            to_json(client.get_fleet_ship(&q.fleet_id).await?)
        }
        "get_surrounding_ship" => {
            let q: MmsiQuery = parse(arguments)?;
            to_json(client.get_surrounding_ship(q.mmsi.value()).await?)
        }
        "get_area_ship" => to_json(client.get_area_ship(&parse(arguments)?).await?),
        "get_ship_registry" => {
            let q: MmsiQuery = parse(arguments)?;
            to_json(client.get_ship_registry(q.mmsi.value()).await?)
        }
        "search_ship_particular" => {
            to_json(client.search_ship_particular(&parse(arguments)?).await?)
        }
        "search_port" => {
            let q: SearchPortQuery = parse(arguments)?;
            to_json(client.search_port(&q.keywords, q.max_results).await?)
        }
        "get_berth_ships" => {
            let q: PortShipsQuery = parse(arguments)?;
            to_json(client.get_berth_ships(&q.port_code, q.ship_type).await?)
        }
        "get_anchor_ships" => {
            let q: PortShipsQuery = parse(arguments)?;
            to_json(client.get_anchor_ships(&q.port_code, q.ship_type).await?)
        }
        "get_eta_ships" => to_json(client.get_eta_ships(&parse(arguments)?).await?),
        "get_ship_track" => to_json(client.get_ship_track(&parse(arguments)?).await?),
        "search_ship_approach" => to_json(client.search_ship_approach(&parse(arguments)?).await?),
        "get_port_of_call_by_ship" => {
            to_json(client.get_port_of_call_by_ship(&parse(arguments)?).await?)
        }
        "get_port_of_call_by_ship_port" => {
            to_json(client.get_port_of_call_by_ship_port(&parse(arguments)?).await?)
        }
        "get_ship_status" => to_json(client.get_ship_status(&parse(arguments)?).await?),
        "get_port_of_call_by_port" => {
            to_json(client.get_port_of_call_by_port(&parse(arguments)?).await?)
        }
        "plan_route_by_point" => to_json(client.plan_route_by_point(&parse(arguments)?).await?),
        "plan_route_by_port" => to_json(client.plan_route_by_port(&parse(arguments)?).await?),
        "get_single_eta_precise" => {
            to_json(client.get_single_eta_precise(&parse(arguments)?).await?)
        }
        "get_weather_by_point" => to_json(client.get_weather_by_point(&parse(arguments)?).await?),
        "get_weather" => {
            let q: WeatherQuery = parse(arguments)?;
            to_json(client.get_weather(q.weather_type).await?)
        }
        "get_all_typhoon" => to_json(client.get_all_typhoon().await?),
        "get_single_typhoon" => {
            let q: TyphoonQuery = parse(arguments)?;
            to_json(client.get_single_typhoon(q.typhoon_id).await?)
        }
        "get_tides" => to_json(client.get_tides().await?),
        "get_tide_data" => to_json(client.get_tide_data(&parse(arguments)?).await?),
        _ => Err(ShipxyError::validation(
            "name",
            format!("unknown tool `{name}`"),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::{ErrorKind, TransportError};
    use crate::transport::HttpResponse;
    use async_trait::async_trait;
    use std::collections::HashSet;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Answers every request with an empty list envelope
    #[derive(Default)]
    struct EmptyList {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl Transport for EmptyList {
        async fn get(
            &self,
            _url: &str,
            _query: &[(String, String)],
        ) -> std::result::Result<HttpResponse, TransportError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(HttpResponse::new(
                200,
                r#"{"status": 0, "msg": "ok", "total": 0, "data": []}"#,
            ))
        }

        async fn post_form(
            &self,
            url: &str,
            form: &[(String, String)],
        ) -> std::result::Result<HttpResponse, TransportError> {
            self.get(url, form).await
        }
    }

    fn client() -> ShipxyClient<EmptyList> {
        ShipxyClient::with_transport("test-key", "http://stub", EmptyList::default())
    }

    fn invalid_param(err: &ShipxyError) -> &str {
        match err {
            ShipxyError::Validation { param, .. } => param.as_str(),
            other => panic!("expected a validation error, got {other:?}"),
        }
    }

    #[test]
    fn catalog_names_are_unique() {
        let tools = catalog();
        assert_eq!(tools.len(), 27);
        let names: HashSet<_> = tools.iter().map(|t| t.name).collect();
        assert_eq!(names.len(), 27);
    }

    #[test]
    fn catalog_serializes_input_schema() {
        let tools = catalog();
        let value = serde_json::to_value(&tools[0]).unwrap();
        assert_eq!(value["name"], "search_ship");
        assert_eq!(value["inputSchema"]["required"], json!(["keywords"]));
        assert_eq!(
            value["inputSchema"]["properties"]["keywords"]["type"],
            "string"
        );
    }

    #[test]
    fn required_properties_are_declared() {
        for spec in catalog() {
            let schema = &spec.input_schema;
            for name in schema["required"].as_array().unwrap() {
                let name = name.as_str().unwrap();
                assert!(
                    schema["properties"].get(name).is_some(),
                    "{}: {} is required but not declared",
                    spec.name,
                    name
                );
            }
        }
    }

    #[tokio::test]
    async fn unknown_tool() {
        let err = dispatch(&client(), "get_greeting", json!({}))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("unknown tool"));
    }

    #[tokio::test]
    async fn missing_argument_names_parameter() {
        let client = client();
        let err = dispatch(&client, "get_single_ship", json!({}))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert_eq!(invalid_param(&err), "mmsi");

        let err = dispatch(&client, "get_eta_ships", json!({"port_code": "CNSHA", "start_time": 1}))
            .await
            .unwrap_err();
        assert_eq!(invalid_param(&err), "end_time");
        assert_eq!(client.transport().calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn mistyped_argument_names_parameter() {
        let client = client();

        let err = dispatch(&client, "get_single_ship", json!({"mmsi": "abc"}))
            .await
            .unwrap_err();
        assert_eq!(invalid_param(&err), "mmsi");
        assert!(err.to_string().contains("`mmsi`"));

        let err = dispatch(
            &client,
            "get_ship_track",
            json!({"mmsi": 412345678, "start_time": "yesterday", "end_time": 1}),
        )
        .await
        .unwrap_err();
        assert_eq!(invalid_param(&err), "start_time");

        let err = dispatch(
            &client,
            "get_tide_data",
            json!({"port_code": 1001, "start_date": "03/01/2025", "end_date": "2025-03-07"}),
        )
        .await
        .unwrap_err();
        assert_eq!(invalid_param(&err), "start_date");

        let err = dispatch(&client, "get_many_ship", json!({"mmsis": [412345678, "x"]}))
            .await
            .unwrap_err();
        assert_eq!(invalid_param(&err), "mmsis[1]");

        let err = dispatch(&client, "get_single_ship", json!({"mmsi": 1234567890}))
            .await
            .unwrap_err();
        assert_eq!(invalid_param(&err), "mmsi");
        assert!(err.to_string().contains("longer than nine digits"));

        assert_eq!(client.transport().calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn null_arguments_mean_empty() {
        let client = client();
        let value = dispatch(&client, "get_tides", Value::Null).await.unwrap();
        assert_eq!(value["total"], 0);
        assert_eq!(client.transport().calls.load(Ordering::SeqCst), 1);
    }
}
