use crate::models::{Coordinate, Language, TravelTimeRequest};

/// `SearchType` value selecting intercity search
pub const SEARCH_TYPE_INTERCITY: u8 = 1;

/// `SearchPathType` value restricting results to bus-only paths
pub const SEARCH_PATH_TYPE_BUS: u8 = 2;

const OUTPUT_FORMAT: &str = "json";

/// Outbound parameter set for one ODsay path search
///
/// ODsay takes coordinates as X/Y pairs, so longitude goes to `SX`/`EX` and
/// latitude to `SY`/`EY`. The API key is not part of the query; the client
/// attaches it when sending.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UpstreamQuery {
    pub start: Coordinate,
    pub end: Coordinate,
    pub lang: Language,
}

impl UpstreamQuery {
    pub fn new(start: Coordinate, end: Coordinate, lang: Language) -> Self {
        Self { start, end, lang }
    }

    /// Build the query from an inbound request
    ///
    /// A missing `lang` falls back to Korean. Returns the rejected code when
    /// `lang` is not one of the six codes ODsay understands.
    pub fn from_request(req: &TravelTimeRequest) -> Result<Self, u8> {
        let lang = req
            .lang
            .map(Language::try_from)
            .transpose()?
            .unwrap_or_default();
        Ok(Self::new(req.start(), req.end(), lang))
    }

    /// Query parameters in the order ODsay documents them
    pub fn params(&self) -> Vec<(&'static str, String)> {
        vec![
            ("SX", self.start.lon.to_string()),
            ("SY", self.start.lat.to_string()),
            ("EX", self.end.lon.to_string()),
            ("EY", self.end.lat.to_string()),
            ("SearchType", SEARCH_TYPE_INTERCITY.to_string()),
            ("SearchPathType", SEARCH_PATH_TYPE_BUS.to_string()),
            ("lang", self.lang.code().to_string()),
            ("output", OUTPUT_FORMAT.to_string()),
        ]
    }
}
