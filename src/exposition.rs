// Prometheus text exposition for a probe snapshot.
// Each render registers into its own Registry; nothing touches the global one.

use prometheus::core::Collector;
use prometheus::{Counter, CounterVec, Encoder, Gauge, GaugeVec, Opts, Registry, TextEncoder};

use crate::snapshot::{MetricKind, MetricsSnapshot, Sample};

/// Content type of the rendered body.
pub const CONTENT_TYPE: &str = prometheus::TEXT_FORMAT;

pub fn render(snapshot: &MetricsSnapshot) -> prometheus::Result<String> {
    let registry = Registry::new();
    for family in group_by_name(snapshot.iter()) {
        registry.register(family_collector(&family)?)?;
    }
    encode(&registry)
}

pub(crate) fn encode(registry: &Registry) -> prometheus::Result<String> {
    let mut buf = Vec::new();
    TextEncoder::new().encode(&registry.gather(), &mut buf)?;
    String::from_utf8(buf).map_err(|e| prometheus::Error::Msg(e.to_string()))
}

/// Samples sharing a metric name, in first-seen order.
fn group_by_name(samples: impl Iterator<Item = Sample>) -> Vec<Vec<Sample>> {
    let mut families: Vec<Vec<Sample>> = Vec::new();
    for sample in samples {
        match families
            .iter_mut()
            .find(|f| f[0].desc.name == sample.desc.name)
        {
            Some(family) => family.push(sample),
            None => families.push(vec![sample]),
        }
    }
    families
}

fn family_collector(family: &[Sample]) -> prometheus::Result<Box<dyn Collector>> {
    let first = &family[0];
    let opts = Opts::new(first.desc.name, first.desc.help);

    if first.labels.is_empty() {
        return Ok(match first.desc.kind {
            MetricKind::Gauge => {
                let gauge = Gauge::with_opts(opts)?;
                gauge.set(first.value);
                Box::new(gauge)
            }
            MetricKind::Counter => {
                let counter = Counter::with_opts(opts)?;
                counter.inc_by(counter_value(first.value));
                Box::new(counter)
            }
        });
    }

    let label_names: Vec<&str> = first.labels.iter().map(|(name, _)| *name).collect();
    Ok(match first.desc.kind {
        MetricKind::Gauge => {
            let vec = GaugeVec::new(opts, &label_names)?;
            for sample in family {
                vec.get_metric_with_label_values(&label_values(sample))?
                    .set(sample.value);
            }
            Box::new(vec)
        }
        MetricKind::Counter => {
            let vec = CounterVec::new(opts, &label_names)?;
            for sample in family {
                vec.get_metric_with_label_values(&label_values(sample))?
                    .inc_by(counter_value(sample.value));
            }
            Box::new(vec)
        }
    })
}

fn label_values(sample: &Sample) -> Vec<&str> {
    sample.labels.iter().map(|(_, value)| value.as_str()).collect()
}

/// Counters cannot go negative; a negative or NaN device reading renders as 0.
fn counter_value(value: f64) -> f64 {
    value.max(0.0)
}
