use rand::prelude::*;

use crate::components::device::Device;
use crate::config::{ConfigError, SimulationConfig};
use crate::medium::Medium;

/// Rendering/reporting boundary. Observers get a read-only view after each
/// round and must not feed anything back into the simulation.
pub trait RoundObserver {
    fn on_round(&mut self, sim: &Simulation);
}

pub struct NullObserver;

impl RoundObserver for NullObserver {
    fn on_round(&mut self, _sim: &Simulation) {}
}

/// The simulation driver: one cable, the live device set, one round counter.
///
/// Each round propagates the cable once, then refreshes every live device
/// against that same snapshot in insertion order. Devices only read and
/// write the cell they sit on, so the refresh order cannot influence which
/// transmissions collide; collisions are resolved by the propagation step
/// alone.
#[derive(Debug)]
pub struct Simulation {
    pub medium: Medium,
    pub devices: Vec<Device>,
    /// Devices that drained their schedule, kept for end-of-run accounting.
    pub finished: Vec<Device>,
    pub round: u64,
    /// (completion round, rounds from activation to completion), append-only.
    pub latencies: Vec<(u64, u64)>,
}

impl Simulation {
    /// Validate the config and build the initial state. The seed feeds a
    /// master generator that deals one private `StdRng` per device, so a
    /// run is reproduced exactly by (config, seed).
    pub fn from_config(config: &SimulationConfig, seed: u64) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut master = StdRng::seed_from_u64(seed);
        let devices = config
            .devices
            .iter()
            .map(|device| Device::from_config(device, config, StdRng::seed_from_u64(master.gen())))
            .collect();
        Ok(Self {
            medium: Medium::new(config.cable_length),
            devices,
            finished: Vec::new(),
            round: 0,
            latencies: Vec::new(),
        })
    }

    /// Advance one round. Returns false once no live devices remain.
    pub fn step(&mut self) -> bool {
        if self.devices.is_empty() {
            return false;
        }
        self.round += 1;
        self.medium = self.medium.propagate();

        let mut live = Vec::with_capacity(self.devices.len());
        for mut device in self.devices.drain(..) {
            let completed_before = device.completed;
            let still_active = device.refresh(&mut self.medium);
            if device.completed > completed_before {
                if let Some(&entry) = device.completion_log.last() {
                    self.latencies.push(entry);
                }
            }
            if still_active {
                live.push(device);
            } else {
                self.finished.push(device);
            }
        }
        self.devices = live;
        true
    }

    /// Drive the simulation to completion or `max_rounds`, handing the
    /// observer each round as it lands. Returns true if every device
    /// finished before the round limit.
    pub fn run(&mut self, observer: &mut dyn RoundObserver, max_rounds: u64) -> bool {
        while self.round < max_rounds {
            if !self.step() {
                return true;
            }
            observer.on_round(self);
        }
        self.devices.is_empty()
    }

    pub fn run_rounds(&mut self, rounds: u64) {
        for _ in 0..rounds {
            if !self.step() {
                break;
            }
        }
    }

    pub fn is_complete(&self) -> bool {
        self.devices.is_empty()
    }

    fn all_devices(&self) -> impl Iterator<Item = &Device> {
        self.devices.iter().chain(self.finished.iter())
    }

    pub fn scheduled_count(&self) -> u64 {
        self.all_devices().map(|d| d.scheduled).sum()
    }

    pub fn completed_count(&self) -> u64 {
        self.all_devices().map(|d| d.completed).sum()
    }

    pub fn collision_count(&self) -> u64 {
        self.all_devices().map(Device::collision_count).sum()
    }

    pub fn get_percentile(&self, p: f32) -> Option<u64> {
        let mut sample: Vec<u64> = self.latencies.iter().map(|(_, l)| *l).collect();
        if sample.is_empty() {
            return None;
        }
        sample.sort_unstable();
        let idx = ((p / 100.0) * (sample.len() as f32 - 1.0)) as usize;
        Some(sample[idx])
    }
}
