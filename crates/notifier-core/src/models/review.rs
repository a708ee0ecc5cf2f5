//! Review document model.

use serde::{Deserialize, Serialize};

use crate::types::UserId;

/// Snapshot of a newly created specialist review.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Review {
    /// The reviewed specialist.
    #[serde(default)]
    pub specialist_id: Option<UserId>,
    /// Numeric rating given by the client.
    #[serde(default)]
    pub rating: Option<f64>,
}

impl Review {
    /// The specialist identifier, if present and non-blank.
    pub fn specialist(&self) -> Option<&UserId> {
        self.specialist_id.as_ref().filter(|id| !id.is_blank())
    }

    /// The rating formatted for display; a missing rating shows as `0`.
    pub fn rating_label(&self) -> String {
        let rating = self.rating.filter(|r| r.is_finite()).unwrap_or(0.0);
        if rating.fract() == 0.0 {
            format!("{rating:.0}")
        } else {
            format!("{rating}")
        }
    }
}
