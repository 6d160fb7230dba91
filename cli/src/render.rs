use std::thread;
use std::time::Duration;

use coax_core::{Device, DeviceStatus, MetricsCollector, RoundObserver, Simulation};

fn device_row(sim: &Simulation) -> String {
    let mut row = vec![' '; sim.medium.len()];
    for device in &sim.devices {
        row[device.position] = device.label;
    }
    row.into_iter().collect()
}

fn status_label(device: &Device) -> Option<String> {
    match device.status() {
        DeviceStatus::Idle => None,
        DeviceStatus::Sending { sent, total } => {
            Some(format!("{}: transmitting ({}/{} left)", device.label, total - sent, total))
        }
        DeviceStatus::AwaitingClearance { rounds } => Some(format!(
            "{}: waiting for collision detection ({} rounds)",
            device.label, rounds
        )),
        DeviceStatus::BackingOff { rounds } => {
            Some(format!("{}: backing off ({} rounds)", device.label, rounds))
        }
    }
}

/// Frame-per-round console view: the cable, the station positions, and one
/// status entry per active transmission.
pub struct Console {
    frame_delay: Duration,
    pub metrics: MetricsCollector,
}

impl Console {
    pub fn new(frame_delay_ms: u64) -> Self {
        Self {
            frame_delay: Duration::from_millis(frame_delay_ms),
            metrics: MetricsCollector::new(4096),
        }
    }

    pub fn print_summary(&self, sim: &Simulation) {
        println!();
        println!(
            "finished after {} rounds: {}/{} transmissions completed, {} collisions",
            sim.round,
            sim.completed_count(),
            sim.scheduled_count(),
            sim.collision_count(),
        );
        if self.metrics.completions() > 0 {
            println!(
                "completion latency (rounds): p50 {}  p99 {}  mean {:.1}",
                self.metrics.latency_p50(),
                self.metrics.latency_p99(),
                self.metrics.latency_mean(),
            );
        }
    }
}

impl RoundObserver for Console {
    fn on_round(&mut self, sim: &Simulation) {
        self.metrics.update(sim);

        println!("round {}", sim.round);
        println!("  cable:  {}", sim.medium.render());
        println!("  devs:   {}", device_row(sim));
        let statuses: Vec<String> = sim.devices.iter().filter_map(status_label).collect();
        if !statuses.is_empty() {
            println!("  status: {}", statuses.join(" | "));
        }

        if !self.frame_delay.is_zero() {
            thread::sleep(self.frame_delay);
        }
    }
}

/// One JSON object per round on stdout, for piping into other tools.
pub struct JsonFrames;

impl RoundObserver for JsonFrames {
    fn on_round(&mut self, sim: &Simulation) {
        let devices: Vec<serde_json::Value> =
            sim.devices.iter().map(Device::snapshot).collect();
        let frame = serde_json::json!({
            "round": sim.round,
            "cable": sim.medium.render(),
            "cells": sim.medium.cells(),
            "devices": devices,
        });
        println!("{}", frame);
    }
}
