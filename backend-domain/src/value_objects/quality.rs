// Item quality value object

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum QualityLevel {
    Normal,
    Good,
    Outstanding,
    Excellent,
    Masterpiece,
    Unknown,
}

impl QualityLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            QualityLevel::Normal => "Normal",
            QualityLevel::Good => "Good",
            QualityLevel::Outstanding => "Outstanding",
            QualityLevel::Excellent => "Excellent",
            QualityLevel::Masterpiece => "Masterpiece",
            QualityLevel::Unknown => "Unknown",
        }
    }
}

impl From<u8> for QualityLevel {
    fn from(value: u8) -> Self {
        match value {
            0 => QualityLevel::Normal,
            1 => QualityLevel::Good,
            2 => QualityLevel::Outstanding,
            3 => QualityLevel::Excellent,
            4 => QualityLevel::Masterpiece,
            _ => QualityLevel::Unknown,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_known_and_unknown_qualities() {
        assert_eq!(QualityLevel::from(1).as_str(), "Good");
        assert_eq!(QualityLevel::from(4).as_str(), "Masterpiece");
        assert_eq!(QualityLevel::from(9), QualityLevel::Unknown);
    }
}
