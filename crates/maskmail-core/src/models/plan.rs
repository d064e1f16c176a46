/// Plan tiers
use serde::{Deserialize, Serialize};

use crate::constants::PREMIUM_PLAN;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Plan {
    Premium,
    #[default]
    Free,
}

impl Plan {
    /// Maps an optional tier name to a plan
    ///
    /// Only the exact name `premium` selects the premium tier; anything
    /// else, including an absent tier, is the free tier.
    pub fn from_tier(tier: Option<&str>) -> Self {
        match tier {
            Some(PREMIUM_PLAN) => Self::Premium,
            _ => Self::Free,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Premium => PREMIUM_PLAN,
            Self::Free => "free",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_tier() {
        assert_eq!(Plan::from_tier(Some("premium")), Plan::Premium);
        assert_eq!(Plan::from_tier(Some("free")), Plan::Free);
        assert_eq!(Plan::from_tier(Some("Premium")), Plan::Free);
        assert_eq!(Plan::from_tier(Some("")), Plan::Free);
        assert_eq!(Plan::from_tier(None), Plan::Free);
    }
}
