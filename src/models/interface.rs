// /interface

use serde::Deserialize;

use super::wire::{bool_from_wire, f64_from_wire};

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Interface {
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default, deserialize_with = "bool_from_wire")]
    pub running: bool,
    #[serde(default, deserialize_with = "bool_from_wire")]
    pub disabled: bool,
    #[serde(default, deserialize_with = "f64_from_wire")]
    pub rx_byte: f64,
    #[serde(default, deserialize_with = "f64_from_wire")]
    pub rx_drop: f64,
    #[serde(default, deserialize_with = "f64_from_wire")]
    pub rx_error: f64,
    #[serde(default, deserialize_with = "f64_from_wire")]
    pub rx_packet: f64,
    #[serde(default, deserialize_with = "f64_from_wire")]
    pub tx_byte: f64,
    #[serde(default, deserialize_with = "f64_from_wire")]
    pub tx_drop: f64,
    #[serde(default, deserialize_with = "f64_from_wire")]
    pub tx_error: f64,
    #[serde(default, deserialize_with = "f64_from_wire")]
    pub tx_packet: f64,
    #[serde(default, deserialize_with = "f64_from_wire")]
    pub tx_queue_drop: f64,
}

impl Interface {
    /// Running and not administratively disabled.
    pub fn is_active(&self) -> bool {
        self.running && !self.disabled
    }
}
