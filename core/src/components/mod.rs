pub mod device;
pub mod transmission;

pub use device::{Device, DeviceStatus};
pub use transmission::{Transmission, TransmissionState};
