use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::require_text;
use crate::error::AppError;

/// What the site pays for one denomination of a product.
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ExchangeRate {
    pub id: i64,
    pub product_id: i64,
    pub denomination: String,
    pub currency: String,
    pub rate: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExchangeRateInput {
    pub product_id: i64,
    pub denomination: String,
    pub currency: String,
    pub rate: f64,
}

impl ExchangeRateInput {
    pub fn validated(self) -> Result<Self, AppError> {
        require_text("denomination", &self.denomination)?;
        require_text("currency", &self.currency)?;
        if !self.rate.is_finite() || self.rate <= 0.0 {
            return Err(AppError::BadRequest("rate 必须大于 0".into()));
        }
        Ok(Self {
            denomination: self.denomination.trim().to_string(),
            currency: self.currency.trim().to_uppercase(),
            ..self
        })
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RateQuery {
    pub product_id: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(rate: f64) -> ExchangeRateInput {
        ExchangeRateInput {
            product_id: 1,
            denomination: " $100 ".into(),
            currency: "cny".into(),
            rate,
        }
    }

    #[test]
    fn currency_is_uppercased() {
        let rate = input(6.5).validated().unwrap();
        assert_eq!(rate.currency, "CNY");
        assert_eq!(rate.denomination, "$100");
    }

    #[test]
    fn non_positive_rates_are_rejected() {
        for bad in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            assert!(matches!(input(bad).validated(), Err(AppError::BadRequest(_))));
        }
    }
}
