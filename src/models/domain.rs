use serde::{Deserialize, Serialize};

/// A WGS84 point
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinate {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

/// Result language accepted by ODsay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Language {
    #[default]
    Korean,
    English,
    Japanese,
    ChineseSimplified,
    ChineseTraditional,
    Vietnamese,
}

impl Language {
    /// Numeric code sent as the `lang` query parameter
    pub fn code(self) -> u8 {
        match self {
            Language::Korean => 0,
            Language::English => 1,
            Language::Japanese => 2,
            Language::ChineseSimplified => 3,
            Language::ChineseTraditional => 4,
            Language::Vietnamese => 5,
        }
    }
}

impl TryFrom<u8> for Language {
    type Error = u8;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(Language::Korean),
            1 => Ok(Language::English),
            2 => Ok(Language::Japanese),
            3 => Ok(Language::ChineseSimplified),
            4 => Ok(Language::ChineseTraditional),
            5 => Ok(Language::Vietnamese),
            other => Err(other),
        }
    }
}

/// Travel time extracted from an upstream route
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TravelTimeResult {
    /// Passed through unchanged from ODsay `info.totalTime` (minutes)
    pub total_time: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_codes_round_trip() {
        for code in 0..=5u8 {
            let lang = Language::try_from(code).unwrap();
            assert_eq!(lang.code(), code);
        }
    }

    #[test]
    fn test_unknown_language_code() {
        assert_eq!(Language::try_from(6), Err(6));
        assert_eq!(Language::default(), Language::Korean);
    }
}
