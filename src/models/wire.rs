// RouterOS REST encodes every scalar as a JSON string ("49", "true").
// These helpers accept the string form and the plain JSON form.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
    Bool(bool),
    Number(f64),
    Text(String),
}

pub(crate) fn parse_f64(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok()
}

pub(crate) fn f64_from_wire<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    match Scalar::deserialize(deserializer)? {
        Scalar::Number(v) => Ok(v),
        Scalar::Text(s) => {
            parse_f64(&s).ok_or_else(|| D::Error::custom(format!("invalid number {s:?}")))
        }
        Scalar::Bool(b) => Err(D::Error::custom(format!("expected number, got {b}"))),
    }
}

pub(crate) fn bool_from_wire<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    match Scalar::deserialize(deserializer)? {
        Scalar::Bool(b) => Ok(b),
        Scalar::Text(s) => match s.trim() {
            "true" | "yes" => Ok(true),
            "false" | "no" => Ok(false),
            other => Err(D::Error::custom(format!("invalid boolean {other:?}"))),
        },
        Scalar::Number(v) => Err(D::Error::custom(format!("expected boolean, got {v}"))),
    }
}
