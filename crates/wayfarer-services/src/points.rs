//! Loyalty points: balance, cash valuation and partner boosts.

use async_trait::async_trait;
use wayfarer_core::types::{PointsBalance, PointsBoost, PointsValuation};

use crate::error::ServiceError;

#[async_trait]
pub trait PointsService: Send + Sync {
    async fn balance(&self) -> Result<PointsBalance, ServiceError>;

    async fn calculate_value(&self, points: u64) -> Result<PointsValuation, ServiceError>;

    /// Best current boost for redeeming `points` with a partner.
    async fn apply_boost(&self, points: u64) -> Result<PointsBoost, ServiceError>;
}

/// Fixed-account points service.
pub struct InMemoryPoints {
    balance: PointsBalance,
    cents_per_point: f64,
    multiplier: f64,
    partner: String,
}

impl Default for InMemoryPoints {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryPoints {
    pub fn new() -> Self {
        Self {
            balance: PointsBalance {
                points: 84_250,
                tier: "Gold".to_string(),
                lounge_passes: 2,
            },
            cents_per_point: 1.4,
            multiplier: 1.25,
            partner: "Skyline Hotels".to_string(),
        }
    }

    pub fn with_balance(mut self, balance: PointsBalance) -> Self {
        self.balance = balance;
        self
    }
}

#[async_trait]
impl PointsService for InMemoryPoints {
    async fn balance(&self) -> Result<PointsBalance, ServiceError> {
        Ok(self.balance.clone())
    }

    async fn calculate_value(&self, points: u64) -> Result<PointsValuation, ServiceError> {
        let value = (points as f64 * self.cents_per_point).round() / 100.0;
        Ok(PointsValuation {
            points,
            cents_per_point: self.cents_per_point,
            value,
        })
    }

    async fn apply_boost(&self, points: u64) -> Result<PointsBoost, ServiceError> {
        if points == 0 {
            return Err(ServiceError::InvalidRequest(
                "No points to boost".to_string(),
            ));
        }
        let boosted = (points as f64 * self.multiplier).round() as u64;
        Ok(PointsBoost {
            base_points: points,
            boosted_points: boosted,
            multiplier: self.multiplier,
            partner: self.partner.clone(),
            description: format!(
                "Redeem with {} for a {}x boost: {} points become {}.",
                self.partner, self.multiplier, points, boosted
            ),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_balance_defaults() {
        let balance = InMemoryPoints::new().balance().await.unwrap();
        assert_eq!(balance.points, 84_250);
        assert_eq!(balance.tier, "Gold");
        assert_eq!(balance.lounge_passes, 2);
    }

    #[tokio::test]
    async fn test_calculate_value() {
        let valuation = InMemoryPoints::new().calculate_value(10_000).await.unwrap();
        assert!((valuation.value - 140.0).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_apply_boost() {
        let boost = InMemoryPoints::new().apply_boost(10_000).await.unwrap();
        assert_eq!(boost.boosted_points, 12_500);
        assert_eq!(boost.partner, "Skyline Hotels");
    }

    #[tokio::test]
    async fn test_apply_boost_zero_points() {
        let empty = InMemoryPoints::new().with_balance(PointsBalance {
            points: 0,
            tier: "Blue".to_string(),
            lounge_passes: 0,
        });
        assert!(matches!(
            empty.apply_boost(0).await,
            Err(ServiceError::InvalidRequest(_))
        ));
    }
}
