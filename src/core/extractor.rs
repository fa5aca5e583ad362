use crate::models::TravelTimeResult;
use serde::Deserialize;
use serde_json::{Number, Value};
use thiserror::Error;

/// ODsay `pathType` values for paths made only of bus legs
/// (2 = intracity bus, 12 = express/intercity bus)
pub const BUS_ONLY_PATH_TYPES: [i64; 2] = [2, 12];

/// ODsay `pathType` for mixed intercity routes, kept only when all legs are buses
pub const MIXED_INTERCITY_PATH_TYPE: i64 = 20;

/// `subPath.trafficType` values for bus legs
/// (2 = city bus, 5 = express bus, 6 = intercity bus)
const BUS_TRAFFIC_TYPES: [i64; 3] = [2, 5, 6];

/// `subPath.trafficType` for a walking transfer
const WALK_TRAFFIC_TYPE: i64 = 3;

/// ODsay error codes meaning the search ran but found nothing to ride
/// (-98 endpoints within 700m, -99 no result, 3/4/5 no stop near start/end/both)
const NO_ROUTE_ERROR_CODES: [&str; 5] = ["-98", "-99", "3", "4", "5"];

/// Errors produced while reading an ODsay path search payload
#[derive(Debug, Error, PartialEq)]
pub enum ExtractError {
    #[error("Path data not found: {0}")]
    PathDataNotFound(String),

    #[error("Unexpected response shape: {0}")]
    ResponseParse(String),

    #[error("Upstream rejected the search ({code}): {message}")]
    UpstreamRejected { code: String, message: String },
}

#[derive(Debug, Deserialize)]
struct RawEnvelope {
    #[serde(default)]
    error: Option<Value>,
    #[serde(default)]
    result: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct RawResult {
    #[serde(default)]
    path: Option<Vec<Value>>,
}

#[derive(Debug, Deserialize)]
struct RawPath {
    #[serde(rename = "pathType", default)]
    path_type: Option<i64>,
    #[serde(default)]
    info: Option<RawPathInfo>,
    #[serde(rename = "subPath", default)]
    sub_path: Option<Vec<RawSubPath>>,
}

#[derive(Debug, Deserialize)]
struct RawSubPath {
    #[serde(rename = "trafficType", default)]
    traffic_type: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct RawPathInfo {
    #[serde(rename = "totalTime", default)]
    total_time: Option<Number>,
}

#[derive(Debug, Deserialize)]
struct RawUpstreamError {
    #[serde(default)]
    code: Option<Value>,
    #[serde(default, alias = "msg")]
    message: Option<String>,
}

impl RawPath {
    /// Paths without a `pathType` are trusted to match the requested filter.
    /// Mixed intercity paths qualify only when their legs are all bus or walk
    /// legs with at least one bus leg.
    fn is_bus_only(&self) -> bool {
        match self.path_type {
            None => true,
            Some(t) if BUS_ONLY_PATH_TYPES.contains(&t) => true,
            Some(MIXED_INTERCITY_PATH_TYPE) => self.legs_are_bus_only(),
            Some(_) => false,
        }
    }

    fn legs_are_bus_only(&self) -> bool {
        let Some(legs) = self.sub_path.as_ref() else {
            return false;
        };
        let is_bus = |leg: &RawSubPath| {
            leg.traffic_type
                .map_or(false, |t| BUS_TRAFFIC_TYPES.contains(&t))
        };

        legs.iter().any(is_bus)
            && legs
                .iter()
                .all(|leg| is_bus(leg) || leg.traffic_type == Some(WALK_TRAFFIC_TYPE))
    }

    fn total_time(&self) -> Option<u32> {
        let number = self.info.as_ref()?.total_time.as_ref()?;
        if let Some(n) = number.as_u64() {
            return u32::try_from(n).ok();
        }
        // Some responses encode whole minutes as floats, e.g. 45.0
        number
            .as_f64()
            .filter(|f| *f >= 0.0 && f.fract() == 0.0 && *f <= f64::from(u32::MAX))
            .map(|f| f as u32)
    }
}

/// Extract the bus-only total travel time from an ODsay path search payload
///
/// # Pipeline
/// 1. Upstream error envelope -> no-route codes become `PathDataNotFound`,
///    anything else `UpstreamRejected`
/// 2. Missing or malformed `result.path` container -> `PathDataNotFound`
/// 3. Empty container or no bus-only candidate -> `PathDataNotFound`
/// 4. Candidate without an integer `info.totalTime` -> `ResponseParse`
/// 5. Shortest total time wins, ties go to the earliest candidate
pub fn extract_total_time(payload: &Value) -> Result<TravelTimeResult, ExtractError> {
    let envelope = RawEnvelope::deserialize(payload).map_err(|_| {
        tracing::warn!("ODsay payload is not an object: {}", describe_shape(payload));
        ExtractError::PathDataNotFound("payload is not a JSON object".to_string())
    })?;

    if let Some(error) = envelope.error.as_ref() {
        return Err(classify_upstream_error(error));
    }

    let paths = path_container(envelope.result.as_ref(), payload)?;
    if paths.is_empty() {
        return Err(ExtractError::PathDataNotFound(
            "upstream returned no paths".to_string(),
        ));
    }

    let decoded = paths
        .iter()
        .enumerate()
        .map(|(i, path)| {
            RawPath::deserialize(path).map_err(|e| {
                tracing::warn!("Undecodable path[{}]: {} ({})", i, e, describe_shape(path));
                ExtractError::ResponseParse(format!("path[{}] could not be decoded: {}", i, e))
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let mut best: Option<(usize, u32)> = None;
    let mut bus_candidates = 0;

    for (i, path) in decoded.iter().enumerate().filter(|(_, p)| p.is_bus_only()) {
        bus_candidates += 1;

        let total_time = path.total_time().ok_or_else(|| {
            tracing::warn!(
                "path[{}] has no usable info.totalTime: {}",
                i,
                describe_shape(&paths[i])
            );
            ExtractError::ResponseParse(format!(
                "path[{}] is missing an integer info.totalTime",
                i
            ))
        })?;

        if best.map_or(true, |(_, shortest)| total_time < shortest) {
            best = Some((i, total_time));
        }
    }

    match best {
        Some((index, total_time)) => {
            tracing::debug!(
                "Selected path[{}] of {} bus-only candidates ({} total): {} min",
                index,
                bus_candidates,
                paths.len(),
                total_time
            );
            Ok(TravelTimeResult { total_time })
        }
        None => Err(ExtractError::PathDataNotFound(format!(
            "none of the {} paths is bus-only",
            paths.len()
        ))),
    }
}

fn path_container(result: Option<&Value>, payload: &Value) -> Result<Vec<Value>, ExtractError> {
    let result = result.ok_or_else(|| {
        tracing::debug!("ODsay payload has no 'result': {}", describe_shape(payload));
        ExtractError::PathDataNotFound("response has no 'result' field".to_string())
    })?;

    let raw = RawResult::deserialize(result).map_err(|_| {
        tracing::warn!("Malformed 'result' container: {}", describe_shape(result));
        ExtractError::PathDataNotFound("'result.path' is not a list of paths".to_string())
    })?;

    raw.path.ok_or_else(|| {
        tracing::debug!("ODsay 'result' has no 'path': {}", describe_shape(result));
        ExtractError::PathDataNotFound("response has no 'result.path' field".to_string())
    })
}

/// ODsay reports errors either as one object or as a list of objects
fn classify_upstream_error(error: &Value) -> ExtractError {
    let first = match error {
        Value::Array(items) => items.first(),
        other => Some(other),
    };

    let raw = first.and_then(|e| RawUpstreamError::deserialize(e).ok());
    let code = raw
        .as_ref()
        .and_then(|e| e.code.as_ref())
        .map(|c| match c {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        })
        .unwrap_or_else(|| "unknown".to_string());
    let message = raw
        .and_then(|e| e.message)
        .unwrap_or_else(|| "no message".to_string());

    if NO_ROUTE_ERROR_CODES.contains(&code.as_str()) {
        ExtractError::PathDataNotFound(format!("upstream found no route ({}): {}", code, message))
    } else {
        ExtractError::UpstreamRejected { code, message }
    }
}

/// One-level summary of a JSON value's structure, for drift diagnostics
pub fn describe_shape(value: &Value) -> String {
    match value {
        Value::Object(map) => {
            let fields = map
                .iter()
                .map(|(k, v)| format!("{}: {}", k, type_name(v)))
                .collect::<Vec<_>>()
                .join(", ");
            format!("{{{}}}", fields)
        }
        other => type_name(other),
    }
}

fn type_name(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(_) => "bool".to_string(),
        Value::Number(_) => "number".to_string(),
        Value::String(_) => "string".to_string(),
        Value::Array(items) => format!("array[{}]", items.len()),
        Value::Object(_) => "object".to_string(),
    }
}
