// Probe-time metrics snapshot: one fresh, request-scoped set of metrics per probe

use std::collections::HashSet;
use std::fmt;

use crate::device::DeviceProbe;
use crate::error::Error;
use crate::models::{Health, Interface, Resource};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricKind {
    /// Last observed value.
    Gauge,
    /// Cumulative since device boot, passed through verbatim.
    Counter,
}

/// Name, help text and type of one metric family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MetricDesc {
    pub name: &'static str,
    pub help: &'static str,
    pub kind: MetricKind,
}

impl MetricDesc {
    const fn gauge(name: &'static str, help: &'static str) -> Self {
        Self {
            name,
            help,
            kind: MetricKind::Gauge,
        }
    }

    const fn counter(name: &'static str, help: &'static str) -> Self {
        Self {
            name,
            help,
            kind: MetricKind::Counter,
        }
    }
}

pub const PROBE_SUCCESS: MetricDesc =
    MetricDesc::gauge("mikrotik_probe_success", "Whether the Mikrotik probe was successful");

const HEALTH_TEMPERATURE: MetricDesc =
    MetricDesc::gauge("mikrotik_system_health_temperature", "System Health Temperature");
const HEALTH_VOLTAGE: MetricDesc =
    MetricDesc::gauge("mikrotik_system_health_voltage", "System Health Voltage");

const RESOURCE_METRICS: [(MetricDesc, fn(&Resource) -> f64); 9] = [
    (
        MetricDesc::gauge(
            "mikrotik_system_resource_cpu_count",
            "Number of CPUs present on the system. Each core is separate CPU, Intel HT is also separate CPU.",
        ),
        |r: &Resource| r.cpu_count,
    ),
    (
        MetricDesc::gauge("mikrotik_system_resource_cpu_frequency", "Current CPU frequency"),
        |r: &Resource| r.cpu_frequency,
    ),
    (
        MetricDesc::gauge(
            "mikrotik_system_resource_cpu_load",
            "Percentage of used CPU resources. Combines all CPUs.",
        ),
        |r: &Resource| r.cpu_load,
    ),
    (
        MetricDesc::gauge("mikrotik_system_resource_hdd_space_free", "Free space on hard drive in bytes"),
        |r: &Resource| r.free_hdd_space,
    ),
    (
        MetricDesc::gauge("mikrotik_system_resource_hdd_space_total", "Size of the hard drive in bytes"),
        |r: &Resource| r.total_hdd_space,
    ),
    (
        MetricDesc::gauge("mikrotik_system_resource_memory_free", "Unused amount of RAM in bytes"),
        |r: &Resource| r.free_memory,
    ),
    (
        MetricDesc::gauge("mikrotik_system_resource_memory_total", "Size of the memory in bytes"),
        |r: &Resource| r.total_memory,
    ),
    (
        MetricDesc::gauge(
            "mikrotik_system_resource_write_sectors_since_reboot",
            "Sectors written to storage since the last reboot",
        ),
        |r: &Resource| r.write_sectors_since_reboot,
    ),
    (
        MetricDesc::gauge(
            "mikrotik_system_resource_write_sectors_total",
            "Sectors written to storage over the device lifetime",
        ),
        |r: &Resource| r.write_sectors_total,
    ),
];

/// Label names on every interface metric, keyed by `(name, type)`.
pub const INTERFACE_LABELS: [&str; 2] = ["name", "type"];

const INTERFACE_METRICS: [(MetricDesc, fn(&Interface) -> f64); 9] = [
    (
        MetricDesc::gauge("mikrotik_interface_rx_bytes", "Bytes received on the interface"),
        |i: &Interface| i.rx_byte,
    ),
    (
        MetricDesc::gauge("mikrotik_interface_tx_bytes", "Bytes transmitted on the interface"),
        |i: &Interface| i.tx_byte,
    ),
    (
        MetricDesc::counter("mikrotik_interface_rx_packets_total", "Packets received on the interface"),
        |i: &Interface| i.rx_packet,
    ),
    (
        MetricDesc::counter("mikrotik_interface_rx_drops_total", "Received packets dropped"),
        |i: &Interface| i.rx_drop,
    ),
    (
        MetricDesc::counter("mikrotik_interface_rx_errors_total", "Receive errors"),
        |i: &Interface| i.rx_error,
    ),
    (
        MetricDesc::counter("mikrotik_interface_tx_packets_total", "Packets transmitted on the interface"),
        |i: &Interface| i.tx_packet,
    ),
    (
        MetricDesc::counter("mikrotik_interface_tx_drops_total", "Transmitted packets dropped"),
        |i: &Interface| i.tx_drop,
    ),
    (
        MetricDesc::counter("mikrotik_interface_tx_errors_total", "Transmit errors"),
        |i: &Interface| i.tx_error,
    ),
    (
        MetricDesc::counter("mikrotik_interface_tx_queue_drops_total", "Packets dropped by the transmit queue"),
        |i: &Interface| i.tx_queue_drop,
    ),
];

#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    pub desc: MetricDesc,
    /// `(label name, label value)` pairs; empty for unlabelled metrics.
    pub labels: Vec<(&'static str, String)>,
    pub value: f64,
}

/// Metrics from one probe. Holds exactly one probe-success flag; a failed
/// snapshot carries no other sample.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricsSnapshot {
    success: bool,
    samples: Vec<Sample>,
}

impl MetricsSnapshot {
    fn succeeded(samples: Vec<Sample>) -> Self {
        Self {
            success: true,
            samples,
        }
    }

    /// Minimal snapshot: `probe_success 0` and nothing else.
    pub fn failed() -> Self {
        Self {
            success: false,
            samples: Vec::new(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.success
    }

    /// The probe-success entry, always present.
    pub fn probe_success(&self) -> Sample {
        Sample {
            desc: PROBE_SUCCESS,
            labels: Vec::new(),
            value: if self.success { 1.0 } else { 0.0 },
        }
    }

    /// Device samples, excluding probe success.
    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    /// Every sample in render order: probe success first.
    pub fn iter(&self) -> impl Iterator<Item = Sample> + '_ {
        std::iter::once(self.probe_success()).chain(self.samples.iter().cloned())
    }
}

/// Where a probe stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeStage {
    /// Building the device client, before any request.
    Connect,
    Health,
    Interfaces,
    Resource,
}

impl fmt::Display for ProbeStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ProbeStage::Connect => "connect",
            ProbeStage::Health => "health",
            ProbeStage::Interfaces => "interfaces",
            ProbeStage::Resource => "resource",
        };
        f.write_str(s)
    }
}

#[derive(Debug)]
pub struct ProbeFailure {
    pub stage: ProbeStage,
    pub error: Error,
}

/// Result of one probe. Both outcomes carry a renderable snapshot.
#[derive(Debug)]
pub struct ProbeReport {
    pub snapshot: MetricsSnapshot,
    pub failure: Option<ProbeFailure>,
}

impl ProbeReport {
    pub fn failed(stage: ProbeStage, error: Error) -> Self {
        Self {
            snapshot: MetricsSnapshot::failed(),
            failure: Some(ProbeFailure { stage, error }),
        }
    }
}

/// Runs health, interfaces, resource in order. The first failing sub-query
/// discards everything collected so far.
pub async fn build<D: DeviceProbe + Sync>(device: &D) -> ProbeReport {
    match collect(device).await {
        Ok(samples) => ProbeReport {
            snapshot: MetricsSnapshot::succeeded(samples),
            failure: None,
        },
        Err(ProbeFailure { stage, error }) => ProbeReport::failed(stage, error),
    }
}

async fn collect<D: DeviceProbe + Sync>(device: &D) -> Result<Vec<Sample>, ProbeFailure> {
    let mut samples = Vec::new();

    let health = device
        .fetch_health()
        .await
        .map_err(|error| ProbeFailure { stage: ProbeStage::Health, error })?;
    push_health(&mut samples, &health);

    let interfaces = device
        .fetch_interfaces()
        .await
        .map_err(|error| ProbeFailure { stage: ProbeStage::Interfaces, error })?;
    push_interfaces(&mut samples, &interfaces);

    let resource = device
        .fetch_resource()
        .await
        .map_err(|error| ProbeFailure { stage: ProbeStage::Resource, error })?;
    push_resource(&mut samples, &resource);

    Ok(samples)
}

fn unlabelled(desc: MetricDesc, value: f64) -> Sample {
    Sample {
        desc,
        labels: Vec::new(),
        value,
    }
}

fn push_health(samples: &mut Vec<Sample>, health: &Health) {
    samples.push(unlabelled(HEALTH_TEMPERATURE, health.temperature));
    samples.push(unlabelled(HEALTH_VOLTAGE, health.voltage));
}

fn push_resource(samples: &mut Vec<Sample>, resource: &Resource) {
    samples.extend(
        RESOURCE_METRICS
            .iter()
            .map(|(desc, value)| unlabelled(*desc, value(resource))),
    );
}

/// Active interfaces only; a repeated `(name, type)` keeps the first entry.
fn push_interfaces(samples: &mut Vec<Sample>, interfaces: &[Interface]) {
    let mut seen: HashSet<(&str, &str)> = HashSet::new();
    for iface in interfaces.iter().filter(|i| i.is_active()) {
        if !seen.insert((iface.name.as_str(), iface.kind.as_str())) {
            tracing::warn!(
                interface = %iface.name,
                kind = %iface.kind,
                "duplicate interface in device response, skipping"
            );
            continue;
        }
        for (desc, value) in INTERFACE_METRICS.iter() {
            samples.push(Sample {
                desc: *desc,
                labels: vec![
                    (INTERFACE_LABELS[0], iface.name.clone()),
                    (INTERFACE_LABELS[1], iface.kind.clone()),
                ],
                value: value(iface),
            });
        }
    }
}
