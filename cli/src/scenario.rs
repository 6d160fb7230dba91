use coax_core::{DeviceConfig, ScheduleEntry, SimulationConfig};

fn entries(rounds: &[u64]) -> Vec<ScheduleEntry> {
    rounds
        .iter()
        .map(|&release_round| ScheduleEntry {
            release_round,
            packet_len: None,
        })
        .collect()
}

/// Built-in three-station scenario: staggered schedules on a 20-cell cable,
/// packet lengths drawn from the default range.
pub fn demo() -> SimulationConfig {
    SimulationConfig {
        devices: vec![
            DeviceConfig {
                label: 'A',
                position: 3,
                schedule: entries(&[1, 40, 41]),
            },
            DeviceConfig {
                label: 'B',
                position: 9,
                schedule: entries(&[50]),
            },
            DeviceConfig {
                label: 'C',
                position: 15,
                schedule: entries(&[55, 60, 80]),
            },
        ],
        ..SimulationConfig::default()
    }
}
