use crate::features::Level;
use serde::Serialize;

/// Score of a document that triggers nothing
pub const BASE_SCORE: u32 = 10;
/// Score points per unit of rule weight
pub const WEIGHT_MULTIPLIER: u32 = 4;
pub const MAX_SCORE: u32 = 100;

pub const HIGH_THRESHOLD: u32 = 70;
pub const MEDIUM_THRESHOLD: u32 = 40;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub fn from_score(score: u32) -> Self {
        match score {
            s if s >= HIGH_THRESHOLD => RiskLevel::High,
            s if s >= MEDIUM_THRESHOLD => RiskLevel::Medium,
            _ => RiskLevel::Low,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RiskLevel::Low => "Low",
            RiskLevel::Medium => "Medium",
            RiskLevel::High => "High",
        }
    }

    pub fn tier(&self) -> Level {
        match self {
            RiskLevel::Low => Level::Ok,
            RiskLevel::Medium => Level::Warn,
            RiskLevel::High => Level::Bad,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Verdict {
    pub label: String,
    pub tier: Level,
}

impl Verdict {
    pub fn from_score(score: u32) -> Self {
        let level = RiskLevel::from_score(score);
        Self {
            label: level.label().to_string(),
            tier: level.tier(),
        }
    }
}

/// Map accumulated rule weight onto 0..=100
pub fn normalize(total_weight: u32) -> u32 {
    let raw = u64::from(BASE_SCORE) + u64::from(total_weight) * u64::from(WEIGHT_MULTIPLIER);
    raw.min(u64::from(MAX_SCORE)) as u32
}
