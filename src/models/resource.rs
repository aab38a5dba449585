// /system/resource

use serde::Deserialize;

use super::wire::f64_from_wire;

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Resource {
    #[serde(default, deserialize_with = "f64_from_wire")]
    pub cpu_count: f64,
    /// MHz
    #[serde(default, deserialize_with = "f64_from_wire")]
    pub cpu_frequency: f64,
    /// Percent, all CPUs combined.
    #[serde(default, deserialize_with = "f64_from_wire")]
    pub cpu_load: f64,
    #[serde(default, deserialize_with = "f64_from_wire")]
    pub free_hdd_space: f64,
    #[serde(default, deserialize_with = "f64_from_wire")]
    pub total_hdd_space: f64,
    #[serde(default, deserialize_with = "f64_from_wire")]
    pub free_memory: f64,
    #[serde(default, deserialize_with = "f64_from_wire")]
    pub total_memory: f64,
    #[serde(rename = "write-sect-since-reboot", default, deserialize_with = "f64_from_wire")]
    pub write_sectors_since_reboot: f64,
    #[serde(rename = "write-sect-total", default, deserialize_with = "f64_from_wire")]
    pub write_sectors_total: f64,
}
