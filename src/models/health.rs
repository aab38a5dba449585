// /system/health

use serde::Deserialize;

use super::wire::parse_f64;

/// One row of `/system/health`; RouterOS 7 reports sensors as a list.
#[derive(Debug, Clone, Deserialize)]
pub struct HealthEntry {
    pub name: String,
    #[serde(default)]
    pub value: String,
}

/// Board health. Sensors the device does not report read as 0.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(try_from = "Vec<HealthEntry>")]
pub struct Health {
    pub temperature: f64,
    pub voltage: f64,
}

impl TryFrom<Vec<HealthEntry>> for Health {
    type Error = String;

    fn try_from(entries: Vec<HealthEntry>) -> Result<Self, Self::Error> {
        let mut health = Health::default();
        for entry in entries {
            let slot = match entry.name.as_str() {
                "temperature" => &mut health.temperature,
                "voltage" => &mut health.voltage,
                _ => continue,
            };
            *slot = parse_f64(&entry.value)
                .ok_or_else(|| format!("invalid {} value {:?}", entry.name, entry.value))?;
        }
        Ok(health)
    }
}
