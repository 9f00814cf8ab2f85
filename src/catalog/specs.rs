//! The per-component attribute bag and its default policy.
//!
//! Specs stay an open JSON map because their shape depends on the category and
//! nothing upstream enforces a schema. Every read the rules need goes through a
//! named accessor below so the default for a missing or mistyped field lives in
//! exactly one place: lengths, heights, wattages and TDP read as `0`, form
//! factor reads as `ATX`, socket reads as absent.

use crate::catalog::identity::FormFactor;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub const SOCKET: &str = "socket";
pub const LENGTH: &str = "length";
pub const HEIGHT: &str = "height";
pub const TDP: &str = "tdp";
pub const WATTAGE: &str = "wattage";
pub const FORM_FACTOR: &str = "form_factor";
pub const MAX_GPU_LENGTH: &str = "max_gpu_length";
pub const MAX_CPU_COOLER_HEIGHT: &str = "max_cpu_cooler_height";

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Specs(Map<String, Value>);

impl Specs {
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Numeric field, `0` when missing or not a number.
    pub fn number_or_zero(&self, key: &str) -> f64 {
        self.0.get(key).and_then(Value::as_f64).unwrap_or(0.0)
    }

    pub fn socket(&self) -> Option<&Value> {
        self.get(SOCKET).filter(|value| !value.is_null())
    }

    pub fn length_mm(&self) -> f64 {
        self.number_or_zero(LENGTH)
    }

    pub fn height_mm(&self) -> f64 {
        self.number_or_zero(HEIGHT)
    }

    pub fn tdp_watts(&self) -> f64 {
        self.number_or_zero(TDP)
    }

    pub fn wattage(&self) -> f64 {
        self.number_or_zero(WATTAGE)
    }

    pub fn max_gpu_length_mm(&self) -> f64 {
        self.number_or_zero(MAX_GPU_LENGTH)
    }

    pub fn max_cooler_height_mm(&self) -> f64 {
        self.number_or_zero(MAX_CPU_COOLER_HEIGHT)
    }

    /// `ATX` only when the key is absent; a stored null, number, or other
    /// non-string is an unrecognized form factor.
    pub fn form_factor(&self) -> FormFactor {
        match self.0.get(FORM_FACTOR) {
            None => FormFactor::Atx,
            Some(Value::String(text)) => FormFactor::parse(text),
            Some(other) => FormFactor::Other(display_value(Some(other))),
        }
    }
}

/// Render a spec value for messages: strings bare, whole numbers without a
/// trailing `.0`, absent as `unspecified`.
pub fn display_value(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => "unspecified".to_string(),
        Some(Value::String(text)) => text.clone(),
        Some(Value::Number(number)) => match number.as_f64() {
            Some(float) => display_number(float),
            None => number.to_string(),
        },
        Some(other) => other.to_string(),
    }
}

pub fn display_number(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        value.to_string()
    }
}
