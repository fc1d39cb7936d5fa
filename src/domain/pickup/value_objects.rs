use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Lifecycle status of a pickup request
///
/// # Status Transitions
/// ```text
/// Pending -> Accepted -> Completed
///                └-----> Cancelled
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PickupStatus {
    /// Submitted by a customer, waiting for a collector
    Pending,
    /// Claimed by a collector
    Accepted,
    /// Collected; terminal
    Completed,
    /// Dropped by the assigned collector; terminal
    Cancelled,
}

impl PickupStatus {
    /// Checks if a transition from current status to next status is valid
    ///
    /// # Valid Transitions
    /// - Pending -> Accepted
    /// - Accepted -> Completed
    /// - Accepted -> Cancelled
    ///
    /// # Example
    /// ```
    /// use ecocycle_api::domain::pickup::PickupStatus;
    ///
    /// assert!(PickupStatus::Pending.can_transition_to(PickupStatus::Accepted));
    /// assert!(!PickupStatus::Pending.can_transition_to(PickupStatus::Cancelled));
    /// ```
    pub fn can_transition_to(&self, next: PickupStatus) -> bool {
        use PickupStatus::*;
        matches!(
            (self, next),
            (Pending, Accepted) | (Accepted, Completed) | (Accepted, Cancelled)
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PickupStatus::Pending => "pending",
            PickupStatus::Accepted => "accepted",
            PickupStatus::Completed => "completed",
            PickupStatus::Cancelled => "cancelled",
        }
    }
}

impl std::fmt::Display for PickupStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PickupStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(PickupStatus::Pending),
            "accepted" => Ok(PickupStatus::Accepted),
            "completed" => Ok(PickupStatus::Completed),
            "cancelled" => Ok(PickupStatus::Cancelled),
            other => Err(format!("Unknown pickup status: {}", other)),
        }
    }
}

/// One categorized line of a pickup request
///
/// # Invariants
/// - `waste_type` is non-empty after trimming
/// - `weight` is finite and strictly positive (kilograms)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WasteItem {
    #[serde(rename = "type")]
    waste_type: String,
    weight: f64,
}

impl WasteItem {
    pub fn new(waste_type: impl AsRef<str>, weight: f64) -> Result<Self, String> {
        let waste_type = waste_type.as_ref().trim();
        if waste_type.is_empty() {
            return Err("Waste item type cannot be empty".to_string());
        }
        if !weight.is_finite() || weight <= 0.0 {
            return Err(format!("Invalid weight for {}: must be positive", waste_type));
        }
        Ok(Self {
            waste_type: waste_type.to_string(),
            weight,
        })
    }

    pub fn waste_type(&self) -> &str {
        &self.waste_type
    }

    pub fn weight(&self) -> f64 {
        self.weight
    }
}
