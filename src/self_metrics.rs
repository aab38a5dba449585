// Exporter self-health metrics served on /metrics

use std::time::Duration;

use prometheus::{Gauge, Histogram, HistogramOpts, IntCounterVec, Opts, Registry};

use crate::exposition;
use crate::version::VERSION;

/// Counts and times probes served by this process. Independent of any probe snapshot.
pub struct ExporterMetrics {
    registry: Registry,
    probes_total: IntCounterVec,
    probe_duration: Histogram,
}

impl ExporterMetrics {
    pub fn new() -> prometheus::Result<Self> {
        let registry = Registry::new();

        let probes_total = IntCounterVec::new(
            Opts::new("routeros_exporter_probes_total", "Probes served, by result"),
            &["result"],
        )?;
        let probe_duration = Histogram::with_opts(HistogramOpts::new(
            "routeros_exporter_probe_duration_seconds",
            "Wall-clock duration of a probe",
        ))?;
        let build_info = Gauge::with_opts(
            Opts::new("routeros_exporter_build_info", "Exporter build information")
                .const_label("version", VERSION),
        )?;
        build_info.set(1.0);

        registry.register(Box::new(probes_total.clone()))?;
        registry.register(Box::new(probe_duration.clone()))?;
        registry.register(Box::new(build_info))?;
        #[cfg(target_os = "linux")]
        registry.register(Box::new(
            prometheus::process_collector::ProcessCollector::for_self(),
        ))?;

        Ok(Self {
            registry,
            probes_total,
            probe_duration,
        })
    }

    pub fn observe_probe(&self, success: bool, elapsed: Duration) {
        let result = if success { "success" } else { "failure" };
        self.probes_total.with_label_values(&[result]).inc();
        self.probe_duration.observe(elapsed.as_secs_f64());
    }

    pub fn render(&self) -> prometheus::Result<String> {
        exposition::encode(&self.registry)
    }
}
