use std::collections::VecDeque;

use hdrhistogram::Histogram;
use serde::{Deserialize, Serialize};

use crate::engine::Simulation;

#[derive(Clone, Copy, Serialize, Deserialize, Debug)]
pub struct MetricPoint {
    pub round: u64,
    pub busy_cells: u32,
    pub jammed_cells: u32,
    pub active_devices: u32,
    pub completed: u64,
}

pub struct MetricsCollector {
    pub history: VecDeque<MetricPoint>,
    pub max_points: usize,
    latency_hist: Histogram<u64>,
    recorded: usize,
}

impl MetricsCollector {
    pub fn new(max_points: usize) -> Self {
        Self {
            history: VecDeque::with_capacity(max_points),
            max_points,
            latency_hist: Histogram::new(3).expect("3 significant figures is valid"),
            recorded: 0,
        }
    }

    /// Sample the simulation after a round. Completion latencies are
    /// absorbed incrementally from the driver's append-only log.
    pub fn update(&mut self, sim: &Simulation) {
        let busy = sim.medium.cells().iter().filter(|c| !c.is_clear()).count() as u32;
        let jammed = sim.medium.cells().iter().filter(|c| c.has_jam()).count() as u32;

        self.history.push_back(MetricPoint {
            round: sim.round,
            busy_cells: busy,
            jammed_cells: jammed,
            active_devices: sim.devices.len() as u32,
            completed: sim.completed_count(),
        });
        if self.history.len() > self.max_points {
            self.history.pop_front();
        }

        for &(_, rounds) in sim.latencies.iter().skip(self.recorded) {
            self.latency_hist.record(rounds.max(1)).ok();
        }
        self.recorded = sim.latencies.len();
    }

    pub fn latency_p50(&self) -> u64 {
        self.latency_hist.value_at_quantile(0.5)
    }

    pub fn latency_p99(&self) -> u64 {
        self.latency_hist.value_at_quantile(0.99)
    }

    pub fn latency_mean(&self) -> f64 {
        self.latency_hist.mean()
    }

    pub fn completions(&self) -> u64 {
        self.latency_hist.len()
    }

    pub fn reset(&mut self) {
        self.history.clear();
        self.latency_hist.reset();
        self.recorded = 0;
    }
}
