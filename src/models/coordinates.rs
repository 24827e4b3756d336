use serde::{Deserialize, Serialize};

/// A point picked on the map or reported by the device
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Latitude and longitude as shown in the form, six decimals
    pub fn to_fixed(&self) -> (String, String) {
        (
            format!("{:.6}", self.latitude),
            format!("{:.6}", self.longitude),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_fixed() {
        let c = Coordinates::new(36.7538, -3.0588123456);
        assert_eq!(
            c.to_fixed(),
            ("36.753800".to_string(), "-3.058812".to_string())
        );
    }
}
