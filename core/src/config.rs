use std::fmt;

use serde::{Deserialize, Serialize};

use crate::medium::DeviceId;

/// One scheduled transmission attempt. A `None` packet length is drawn from
/// the simulation's configured range when the device is built.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ScheduleEntry {
    pub release_round: u64,
    #[serde(default)]
    pub packet_len: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeviceConfig {
    pub label: DeviceId,
    pub position: usize,
    #[serde(default)]
    pub schedule: Vec<ScheduleEntry>,
}

/// Full description of a run. Together with the seed this determines every
/// round of the simulation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationConfig {
    #[serde(default = "default_cable_length")]
    pub cable_length: usize,
    /// Inclusive draw range for schedule entries that leave the length open.
    #[serde(default = "default_packet_len_range")]
    pub packet_len_range: (u32, u32),
    /// The two backoff multipliers a collision picks from, in cable lengths.
    #[serde(default = "default_backoff_units")]
    pub backoff_units: [u32; 2],
    pub devices: Vec<DeviceConfig>,
}

fn default_cable_length() -> usize {
    crate::DEFAULT_CABLE_LENGTH
}

fn default_packet_len_range() -> (u32, u32) {
    crate::DEFAULT_PACKET_LEN_RANGE
}

fn default_backoff_units() -> [u32; 2] {
    crate::BACKOFF_UNITS
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            cable_length: default_cable_length(),
            packet_len_range: default_packet_len_range(),
            backoff_units: default_backoff_units(),
            devices: Vec::new(),
        }
    }
}

impl SimulationConfig {
    /// Reject configurations the simulation must never start from.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cable_length == 0 {
            return Err(ConfigError::ZeroCableLength);
        }
        if self.devices.is_empty() {
            return Err(ConfigError::NoDevices);
        }
        let (min_len, max_len) = self.packet_len_range;
        if min_len == 0 || min_len > max_len {
            return Err(ConfigError::InvalidPacketRange {
                min: min_len,
                max: max_len,
            });
        }
        if self.backoff_units.contains(&0) {
            return Err(ConfigError::ZeroBackoffUnit);
        }
        let mut seen = Vec::with_capacity(self.devices.len());
        for device in &self.devices {
            if device.position >= self.cable_length {
                return Err(ConfigError::PositionOutOfRange {
                    label: device.label,
                    position: device.position,
                    cable_length: self.cable_length,
                });
            }
            if seen.contains(&device.label) {
                return Err(ConfigError::DuplicateLabel {
                    label: device.label,
                });
            }
            seen.push(device.label);
            for entry in &device.schedule {
                if entry.packet_len == Some(0) {
                    return Err(ConfigError::ZeroPacketLength {
                        label: device.label,
                    });
                }
            }
        }
        Ok(())
    }
}

/// Construction-time validation failures. Runtime collisions are protocol
/// events, not errors.
#[derive(Debug, Clone)]
pub enum ConfigError {
    ZeroCableLength,
    NoDevices,
    PositionOutOfRange {
        label: DeviceId,
        position: usize,
        cable_length: usize,
    },
    DuplicateLabel {
        label: DeviceId,
    },
    ZeroPacketLength {
        label: DeviceId,
    },
    InvalidPacketRange {
        min: u32,
        max: u32,
    },
    ZeroBackoffUnit,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroCableLength => write!(f, "cable length must be at least one cell"),
            Self::NoDevices => write!(f, "at least one device is required"),
            Self::PositionOutOfRange {
                label,
                position,
                cable_length,
            } => write!(
                f,
                "device '{}' position {} is outside the cable (length {})",
                label, position, cable_length
            ),
            Self::DuplicateLabel { label } => {
                write!(f, "device label '{}' is used more than once", label)
            }
            Self::ZeroPacketLength { label } => {
                write!(f, "device '{}' schedules a zero-length packet", label)
            }
            Self::InvalidPacketRange { min, max } => write!(
                f,
                "packet length range {}..={} must start above zero and not be inverted",
                min, max
            ),
            Self::ZeroBackoffUnit => write!(f, "backoff units must be non-zero"),
        }
    }
}

impl std::error::Error for ConfigError {}
