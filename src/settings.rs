use crate::CONFY_APP_NAME;

use serde::{Deserialize, Serialize};

use crate::pose::OracleConfig;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldSettings {
    pub particle_count: usize,
    pub height_range: f32,
    pub point_size: f32,
}

impl Default for FieldSettings {
    fn default() -> Self {
        Self {
            particle_count: 15000,
            height_range: 60.0,
            point_size: 3.0,
        }
    }
}

impl FieldSettings {
    pub fn load() -> Self {
        confy::load(CONFY_APP_NAME, "field").unwrap_or_default()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackingSettings {
    pub listen_addr: String,
    pub oracle: OracleConfig,
}

impl Default for TrackingSettings {
    fn default() -> Self {
        Self {
            listen_addr: "127.0.0.1:7878".to_string(),
            oracle: OracleConfig::default(),
        }
    }
}

impl TrackingSettings {
    pub fn load() -> Self {
        confy::load(CONFY_APP_NAME, "tracking").unwrap_or_default()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplaySettings {
    pub background: [f32; 3],
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            background: [0.0, 0.0, 0.0],
        }
    }
}

impl DisplaySettings {
    pub fn load() -> Self {
        confy::load(CONFY_APP_NAME, "display").unwrap_or_default()
    }
}

// Aggregate struct for convenience
pub struct Settings {
    pub field: FieldSettings,
    pub tracking: TrackingSettings,
    pub display: DisplaySettings,
}

impl Settings {
    pub fn load() -> Self {
        Self {
            field: FieldSettings::load(),
            tracking: TrackingSettings::load(),
            display: DisplaySettings::load(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_reference_setup() {
        let field = FieldSettings::default();
        assert_eq!(field.particle_count, 15000);
        assert_eq!(field.height_range, 60.0);
        assert_eq!(field.point_size, 3.0);

        let tracking = TrackingSettings::default();
        assert_eq!(tracking.oracle.max_num_hands, 2);
        assert!(!tracking.listen_addr.is_empty());
    }
}
