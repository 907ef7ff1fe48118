//! Minimal metrics registry for the gateway.
//!
//! Counters with dynamic labels live in a `DashMap` keyed by sorted label
//! pairs so rendering order is stable per label set. The online gauge is not
//! stored here; the `/metrics` handler reads it from the registry and passes
//! it in as an extra line.

use std::fmt::Write;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use dashmap::DashMap;

fn escape_label(v: &str) -> String {
    v.replace('\\', "\\\\").replace('"', "\\\"").replace('\n', "\\n")
}

fn label_key(labels: &[(&str, &str)]) -> Vec<(String, String)> {
    let mut key: Vec<(String, String)> = labels
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    key.sort();
    key
}

#[derive(Default)]
pub struct CounterVec {
    map: DashMap<Vec<(String, String)>, AtomicU64>,
}

impl CounterVec {
    pub fn inc(&self, labels: &[(&str, &str)]) {
        self.add(labels, 1);
    }

    pub fn add(&self, labels: &[(&str, &str)], v: u64) {
        let counter = self
            .map
            .entry(label_key(labels))
            .or_insert_with(|| AtomicU64::new(0));
        counter.fetch_add(v, Ordering::Relaxed);
    }

    /// Current value for an exact label set (0 when never touched).
    pub fn get(&self, labels: &[(&str, &str)]) -> u64 {
        self.map
            .get(&label_key(labels))
            .map(|c| c.load(Ordering::Relaxed))
            .unwrap_or(0)
    }

    fn render(&self, name: &str, out: &mut String) {
        let _ = writeln!(out, "# TYPE {name} counter");
        for r in self.map.iter() {
            let val = r.value().load(Ordering::Relaxed);
            if r.key().is_empty() {
                let _ = writeln!(out, "{name} {val}");
                continue;
            }
            let label_str = r
                .key()
                .iter()
                .map(|(k, v)| format!("{}=\"{}\"", k, escape_label(v)))
                .collect::<Vec<_>>()
                .join(",");
            let _ = writeln!(out, "{name}{{{label_str}}} {val}");
        }
    }
}

#[derive(Default)]
pub struct OndutyMetrics {
    pub clock_ins: CounterVec,
    pub clock_outs: CounterVec,
    pub evictions: CounterVec,
    pub resets: CounterVec,
    pub admin_rejections: CounterVec,
    pub commands: CounterVec,
    draining: AtomicBool,
}

impl OndutyMetrics {
    pub fn set_draining(&self) {
        self.draining.store(true, Ordering::Relaxed);
    }

    pub fn is_draining(&self) -> bool {
        self.draining.load(Ordering::Relaxed)
    }

    /// Render all counters plus gauges supplied by the caller.
    pub fn render(&self, gauges: &[(&str, u64)]) -> String {
        let mut out = String::new();
        self.clock_ins.render("onduty_clock_ins_total", &mut out);
        self.clock_outs.render("onduty_clock_outs_total", &mut out);
        self.evictions.render("onduty_evictions_total", &mut out);
        self.resets.render("onduty_resets_total", &mut out);
        self.admin_rejections.render("onduty_admin_rejections_total", &mut out);
        self.commands.render("onduty_commands_total", &mut out);

        let _ = writeln!(
            out,
            "# TYPE onduty_draining gauge\nonduty_draining {}",
            u8::from(self.is_draining())
        );
        for (k, v) in gauges {
            let _ = writeln!(out, "# TYPE {k} gauge\n{k} {v}");
        }
        out
    }
}
