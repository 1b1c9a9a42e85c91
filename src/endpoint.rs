//! Upstream endpoint table.

/// Field pair carrying the success sentinel and its message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuccessField {
    /// `status` / `msg`, used by nearly every endpoint
    Status,
    /// `code` / `message`, used by the approach-event search
    Code,
}

impl SuccessField {
    pub fn sentinel_key(self) -> &'static str {
        match self {
            SuccessField::Status => "status",
            SuccessField::Code => "code",
        }
    }

    pub fn message_key(self) -> &'static str {
        match self {
            SuccessField::Status => "msg",
            SuccessField::Code => "message",
        }
    }
}

/// One Shipxy REST operation, named after its `/v3/` sub-path
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    SearchShip,
    GetSingleShip,
    GetManyShip,
    GetFleetShip,
    GetSurroundingShip,
    GetAreaShip,
    GetShipRegistry,
    SearchShipParticular,
    SearchPort,
    GetBerthShips,
    GetAnchorShips,
    GetEtaShips,
    GetShipTrack,
    SearchShipApproach,
    GetPortOfCallByShip,
    GetPortOfCallByShipPort,
    GetShipStatus,
    GetPortOfCallByPort,
    PlanRouteByPoint,
    PlanRouteByPort,
    GetSingleEtaPrecise,
    GetWeatherByPoint,
    GetWeather,
    GetAllTyphoon,
    GetSingleTyphoon,
    GetTides,
    GetTideData,
}

impl Endpoint {
    pub const ALL: [Endpoint; 27] = [
        Endpoint::SearchShip,
        Endpoint::GetSingleShip,
        Endpoint::GetManyShip,
        Endpoint::GetFleetShip,
        Endpoint::GetSurroundingShip,
        Endpoint::GetAreaShip,
        Endpoint::GetShipRegistry,
        Endpoint::SearchShipParticular,
        Endpoint::SearchPort,
        Endpoint::GetBerthShips,
        Endpoint::GetAnchorShips,
        Endpoint::GetEtaShips,
        Endpoint::GetShipTrack,
        Endpoint::SearchShipApproach,
        Endpoint::GetPortOfCallByShip,
        Endpoint::GetPortOfCallByShipPort,
        Endpoint::GetShipStatus,
        Endpoint::GetPortOfCallByPort,
        Endpoint::PlanRouteByPoint,
        Endpoint::PlanRouteByPort,
        Endpoint::GetSingleEtaPrecise,
        Endpoint::GetWeatherByPoint,
        Endpoint::GetWeather,
        Endpoint::GetAllTyphoon,
        Endpoint::GetSingleTyphoon,
        Endpoint::GetTides,
        Endpoint::GetTideData,
    ];

    /// Sub-path below `/v3/`, spelled exactly as upstream expects
    pub fn name(self) -> &'static str {
        match self {
            Endpoint::SearchShip => "SearchShip",
            Endpoint::GetSingleShip => "GetSingleShip",
            Endpoint::GetManyShip => "GetManyShip",
            Endpoint::GetFleetShip => "GetFleetShip",
            Endpoint::GetSurroundingShip => "GetSurRoundingShip",
            Endpoint::GetAreaShip => "GetAreaShip",
            Endpoint::GetShipRegistry => "GetShipRegistry",
            Endpoint::SearchShipParticular => "SearchShipParticular",
            Endpoint::SearchPort => "SearchPort",
            Endpoint::GetBerthShips => "GetBerthShips",
            Endpoint::GetAnchorShips => "GetAnchorShips",
            Endpoint::GetEtaShips => "GetETAShips",
            Endpoint::GetShipTrack => "GetShipTrack",
            Endpoint::SearchShipApproach => "SearchshipApproach",
            Endpoint::GetPortOfCallByShip => "GetPortofCallByShip",
            Endpoint::GetPortOfCallByShipPort => "GetPortofCallByShipPort",
            Endpoint::GetShipStatus => "GetShipStatus",
            Endpoint::GetPortOfCallByPort => "GetPortofCallByPort",
            Endpoint::PlanRouteByPoint => "PlanRouteByPoint",
            Endpoint::PlanRouteByPort => "PlanRouteByPort",
            Endpoint::GetSingleEtaPrecise => "GetSingleETAPrecise",
            Endpoint::GetWeatherByPoint => "GetWeatherByPoint",
            Endpoint::GetWeather => "GetWeather",
            Endpoint::GetAllTyphoon => "GetAllTyphoon",
            Endpoint::GetSingleTyphoon => "GetSingleTyphoon",
            Endpoint::GetTides => "GetTides",
            Endpoint::GetTideData => "GetTideData",
        }
    }

    pub fn path(self) -> String {
        format!("/v3/{}", self.name())
    }

    pub fn success_field(self) -> SuccessField {
        match self {
            Endpoint::SearchShipApproach => SuccessField::Code,
            _ => SuccessField::Status,
        }
    }

    /// Whether a 414 on GET is retried once as a form POST.
    ///
    /// Only the keyword search can build query strings long enough to hit
    /// proxy URL limits.
    pub fn post_fallback(self) -> bool {
        matches!(self, Endpoint::SearchShip)
    }
}
