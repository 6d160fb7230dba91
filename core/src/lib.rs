pub mod analytics;
pub mod components;
pub mod config;
pub mod engine;
pub mod medium;

pub use analytics::{MetricPoint, MetricsCollector};
pub use components::device::{Device, DeviceStatus};
pub use components::transmission::{Transmission, TransmissionState};
pub use config::{ConfigError, DeviceConfig, ScheduleEntry, SimulationConfig};
pub use engine::{NullObserver, RoundObserver, Simulation};
pub use medium::{Cell, DeviceId, Medium, Signal};

/// Default simulation constants (in cells and rounds)
pub const DEFAULT_CABLE_LENGTH: usize = 20; // also the collision-detection window
pub const DEFAULT_PACKET_LEN_RANGE: (u32, u32) = (5, 10); // inclusive draw range
pub const BACKOFF_UNITS: [u32; 2] = [1, 2]; // multipliers, in cable lengths
