use std::collections::VecDeque;

use rand::prelude::*;
use serde::{Deserialize, Serialize};

use crate::components::transmission::{Transmission, TransmissionState};
use crate::config::{DeviceConfig, SimulationConfig};
use crate::medium::{DeviceId, Medium};

/// Observer-facing view of what a device is doing this round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeviceStatus {
    Idle,
    Sending { sent: u32, total: u32 },
    AwaitingClearance { rounds: u32 },
    BackingOff { rounds: u32 },
}

/// A station attached to the cable at a fixed cell. Attempts are released
/// strictly in insertion order; a later entry never overtakes an earlier
/// one, even when the earlier one is stuck in backoff.
#[derive(Debug)]
pub struct Device {
    pub label: DeviceId,
    pub position: usize,
    pub round: u64,
    pub active: Option<Transmission>,
    pub pending: VecDeque<(u64, Transmission)>,
    pub backoff_units: [u32; 2],
    pub rng: StdRng,
    pub scheduled: u64,
    pub completed: u64,
    /// (completion round, rounds from activation to completion) per attempt.
    pub completion_log: Vec<(u64, u64)>,
    active_since: u64,
    finished_collisions: u64,
}

impl Device {
    /// Build a device from its validated config entry. `rng` is this
    /// device's private stream, dealt by the driver from the master seed.
    pub fn from_config(config: &DeviceConfig, sim: &SimulationConfig, mut rng: StdRng) -> Self {
        let (min_len, max_len) = sim.packet_len_range;
        let pending: VecDeque<(u64, Transmission)> = config
            .schedule
            .iter()
            .map(|entry| {
                let len = entry
                    .packet_len
                    .unwrap_or_else(|| rng.gen_range(min_len..=max_len));
                (
                    entry.release_round,
                    Transmission::new(config.label, config.position, len, sim.cable_length),
                )
            })
            .collect();
        Self {
            label: config.label,
            position: config.position,
            round: 0,
            active: None,
            scheduled: pending.len() as u64,
            pending,
            backoff_units: sim.backoff_units,
            rng,
            completed: 0,
            completion_log: Vec::new(),
            active_since: 0,
            finished_collisions: 0,
        }
    }

    /// Advance the device by one round against the freshly propagated cable.
    /// Returns false once the schedule is drained and nothing is active,
    /// at which point the driver drops the device from the live set.
    pub fn refresh(&mut self, medium: &mut Medium) -> bool {
        self.round += 1;

        if let Some(tx) = self.active.as_mut() {
            if tx.transmit(medium, self.backoff_units, &mut self.rng) {
                self.completed += 1;
                self.finished_collisions += u64::from(tx.collisions);
                self.completion_log
                    .push((self.round, self.round + 1 - self.active_since));
                self.active = None;
            } else {
                return true;
            }
        }

        let due = matches!(self.pending.front(), Some((release, _)) if self.round >= *release);
        if due {
            if let Some((_, mut tx)) = self.pending.pop_front() {
                self.active_since = self.round;
                // A freshly released attempt contends for the cable in the
                // very round it starts.
                tx.transmit(medium, self.backoff_units, &mut self.rng);
                self.active = Some(tx);
            }
            return true;
        }
        !self.pending.is_empty()
    }

    pub fn status(&self) -> DeviceStatus {
        match &self.active {
            None => DeviceStatus::Idle,
            Some(tx) => match tx.state() {
                TransmissionState::Sending => DeviceStatus::Sending {
                    sent: tx.len - tx.remaining,
                    total: tx.len,
                },
                TransmissionState::AwaitingClearance => {
                    DeviceStatus::AwaitingClearance { rounds: tx.wait }
                }
                TransmissionState::Backoff => DeviceStatus::BackingOff { rounds: tx.sleep },
                TransmissionState::Done => DeviceStatus::Idle,
            },
        }
    }

    /// Collisions detected across all attempts, finished or not.
    pub fn collision_count(&self) -> u64 {
        let active = self.active.iter().map(|tx| u64::from(tx.collisions));
        let pending = self.pending.iter().map(|(_, tx)| u64::from(tx.collisions));
        active.chain(pending).sum::<u64>() + self.finished_collisions
    }

    pub fn snapshot(&self) -> serde_json::Value {
        serde_json::json!({
            "label": self.label,
            "position": self.position,
            "status": self.status(),
            "pending": self.pending.len(),
            "completed": self.completed,
            "collisions": self.collision_count(),
        })
    }
}
