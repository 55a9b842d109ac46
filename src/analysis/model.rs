use crate::{region::Region, Error, Result};
use base64::{engine::general_purpose::STANDARD, Engine};
use serde::Serialize;
use serde_json::{Map, Value};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisRequest {
    pub bounds: [f64; 4],
}

impl AnalysisRequest {
    pub fn new(region: &Region) -> AnalysisRequest {
        AnalysisRequest {
            bounds: region.wire_bounds(),
        }
    }
}

/// A response field that the backend may omit or get wrong.
#[derive(Debug, Clone, PartialEq)]
pub enum Field<T> {
    Absent,
    Malformed(String),
    Present(T),
}

impl<T> Field<T> {
    pub fn as_present(&self) -> Option<&T> {
        match self {
            Field::Present(v) => Some(v),
            _ => None,
        }
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, Field::Absent)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ImageRef {
    /// Relative path or URL, resolved against the backend address.
    Path(String),
    /// A `data:` URI with its decoded payload.
    Inline {
        uri: String,
        mime: String,
        bytes: Vec<u8>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub date: Vec<String>,
    pub values: Vec<Option<f64>>,
    pub change: Field<Vec<Option<f64>>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisResponse {
    pub error: Option<String>,
    pub landcover: Field<ImageRef>,
    pub population_data: Field<Series>,
    pub built_area_data: Field<Series>,
    pub pop_graph: Field<ImageRef>,
    pub built_graph: Field<ImageRef>,
}

pub const POPULATION_DATA: &str = "population_data";
pub const BUILT_AREA_DATA: &str = "built_area_data";

impl AnalysisResponse {
    /// Only the envelope has to be an object, every field is validated on its own.
    pub fn from_json(value: Value) -> Result<AnalysisResponse> {
        let Value::Object(obj) = value else {
            return Err(Error::InvalidResponse(format!(
                "Expected a JSON object, got: {value}"
            )));
        };
        Ok(AnalysisResponse {
            error: error(&obj),
            landcover: image(&obj, "landcover"),
            population_data: series(&obj, POPULATION_DATA, "pop"),
            built_area_data: series(&obj, BUILT_AREA_DATA, "area"),
            pop_graph: image(&obj, "pop_graph"),
            built_graph: image(&obj, "built_graph"),
        })
    }
}

fn error(obj: &Map<String, Value>) -> Option<String> {
    match obj.get("error") {
        None | Some(Value::Null) | Some(Value::Bool(false)) => None,
        Some(Value::String(s)) if s.is_empty() => None,
        Some(Value::Number(n)) if n.as_f64() == Some(0.0) => None,
        Some(Value::String(s)) => Some(s.clone()),
        Some(other) => Some(other.to_string()),
    }
}

fn image(obj: &Map<String, Value>, key: &str) -> Field<ImageRef> {
    match obj.get(key) {
        None | Some(Value::Null) => Field::Absent,
        Some(Value::String(s)) if s.is_empty() => Field::Malformed(format!("{key} is empty")),
        Some(Value::String(s)) if s.starts_with("data:") => match decode_data_uri(s) {
            Ok((mime, bytes)) => Field::Present(ImageRef::Inline {
                uri: s.clone(),
                mime,
                bytes,
            }),
            Err(e) => Field::Malformed(format!("{key} is not a valid data URI: {e}")),
        },
        Some(Value::String(s)) => Field::Present(ImageRef::Path(s.clone())),
        Some(other) => Field::Malformed(format!("{key} should be a string, got: {other}")),
    }
}

fn decode_data_uri(uri: &str) -> Result<(String, Vec<u8>)> {
    let rest = &uri["data:".len()..];
    let (meta, payload) = rest
        .split_once(',')
        .ok_or(Error::InvalidResponse("Missing data URI payload".into()))?;
    let mime = meta
        .strip_suffix(";base64")
        .ok_or(Error::InvalidResponse("Only base64 data URIs are supported".into()))?;
    if !mime.starts_with("image/") {
        Err(Error::InvalidResponse(format!("Not an image: {mime}")))?
    }
    let bytes = STANDARD.decode(payload)?;
    Ok((mime.to_string(), bytes))
}

fn series(obj: &Map<String, Value>, key: &str, values_key: &str) -> Field<Series> {
    let data = match obj.get(key) {
        None | Some(Value::Null) => return Field::Absent,
        Some(Value::Object(data)) => data,
        Some(other) => {
            return Field::Malformed(format!("{key} should be an object, got: {other}"))
        }
    };
    let date = match required(data, key, "date", labels) {
        Ok(v) => v,
        Err(e) => return Field::Malformed(e),
    };
    let values = match required(data, key, values_key, numbers) {
        Ok(v) => v,
        Err(e) => return Field::Malformed(e),
    };
    if date.len() != values.len() {
        return Field::Malformed(format!(
            "{key}.date has {} entries but {key}.{values_key} has {}",
            date.len(),
            values.len()
        ));
    }
    let change = match data.get("change") {
        None | Some(Value::Null) => Field::Absent,
        Some(v) => match numbers(v) {
            Ok(change) if change.len() == date.len() => Field::Present(change),
            Ok(change) => Field::Malformed(format!(
                "{key}.change has {} entries, expected {}",
                change.len(),
                date.len()
            )),
            Err(e) => Field::Malformed(format!("{key}.change {e}")),
        },
    };
    Field::Present(Series {
        date,
        values,
        change,
    })
}

fn required<T>(
    data: &Map<String, Value>,
    key: &str,
    name: &str,
    parse: fn(&Value) -> std::result::Result<T, String>,
) -> std::result::Result<T, String> {
    match data.get(name) {
        None | Some(Value::Null) => Err(format!("{key}.{name} is missing")),
        Some(v) => parse(v).map_err(|e| format!("{key}.{name} {e}")),
    }
}

fn labels(value: &Value) -> std::result::Result<Vec<String>, String> {
    let Value::Array(items) = value else {
        return Err("should be an array".into());
    };
    items
        .iter()
        .map(|it| match it {
            Value::String(s) => Ok(s.clone()),
            Value::Number(n) => Ok(n.to_string()),
            other => Err(format!("contains a non-label entry: {other}")),
        })
        .collect()
}

// Nulls are kept as gaps
fn numbers(value: &Value) -> std::result::Result<Vec<Option<f64>>, String> {
    let Value::Array(items) = value else {
        return Err("should be an array".into());
    };
    items
        .iter()
        .map(|it| match it {
            Value::Null => Ok(None),
            Value::Number(n) => n
                .as_f64()
                .map(Some)
                .ok_or(format!("contains an out of range number: {n}")),
            other => Err(format!("contains a non-numeric entry: {other}")),
        })
        .collect()
}
