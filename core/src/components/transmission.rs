use crate::medium::{DeviceId, Medium};
use rand::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransmissionState {
    Sending,
    AwaitingClearance,
    Backoff,
    Done,
}

/// One transmission attempt: carrier sensing at the device's cell,
/// bit-by-bit injection, jam detection, randomized backoff and
/// retransmission from scratch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transmission {
    pub src: DeviceId,
    pub pos: usize,      // cell the owning device sits on
    pub len: u32,        // total packet length in bit-rounds
    pub remaining: u32,  // bits still to send in the current attempt
    pub wait: u32,       // rounds left in the collision-detection window
    pub sleep: u32,      // rounds left in backoff
    pub collisions: u32, // collisions this transmission has backed off from
}

impl Transmission {
    pub fn new(src: DeviceId, pos: usize, len: u32, cable_length: usize) -> Self {
        Self {
            src,
            pos,
            len,
            remaining: len,
            wait: cable_length as u32,
            sleep: 0,
            collisions: 0,
        }
    }

    pub fn state(&self) -> TransmissionState {
        if self.wait == 0 {
            TransmissionState::Done
        } else if self.sleep > 0 {
            TransmissionState::Backoff
        } else if self.remaining > 0 {
            TransmissionState::Sending
        } else {
            TransmissionState::AwaitingClearance
        }
    }

    /// Advance the attempt by one round against the freshly propagated cable.
    /// Returns true once the attempt is complete.
    pub fn transmit(
        &mut self,
        medium: &mut Medium,
        backoff_units: [u32; 2],
        rng: &mut StdRng,
    ) -> bool {
        if self.wait == 0 {
            return true;
        }

        if self.sleep > 0 {
            self.sleep -= 1;
            return false;
        }

        if medium.cell(self.pos).has_jam() {
            // Jam at our cell aborts the attempt: back off for one or two
            // cable lengths, then the whole packet goes again.
            let unit = backoff_units[rng.gen_range(0..backoff_units.len())];
            self.sleep = unit * medium.len() as u32;
            self.wait = medium.len() as u32;
            self.remaining = self.len;
            self.collisions += 1;
            return false;
        }

        if self.remaining == 0 {
            self.wait -= 1;
        } else if medium.cell(self.pos).is_clear() {
            medium.inject(self.pos, self.src);
            self.remaining -= 1;
        }
        // Cell occupied but not jammed: another signal is passing through.
        // Hold this bit and try again next round.

        false
    }
}
