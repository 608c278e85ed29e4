// storefront/src/models/product.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct Product {
  pub id: i64,
  pub name: String,
  pub description: String,
  pub price_cents: i64,
  pub image: Option<String>, // file name under the image URL prefix
  pub carbon_footprint: Option<f64>, // kg CO2e per unit
}

impl Product {
  pub fn price(&self) -> f64 {
    super::cents_to_decimal(self.price_cents)
  }

  pub fn footprint_or_zero(&self) -> f64 {
    self.carbon_footprint.unwrap_or(0.0)
  }
}

/// Insert payload used by the seed routine.
#[derive(Debug, Clone, Deserialize)]
pub struct NewProduct {
  pub name: String,
  pub description: String,
  pub price_cents: i64,
  pub image: Option<String>,
  pub carbon_footprint: Option<f64>,
}

impl NewProduct {
  pub fn new(name: &str, description: &str, price_cents: i64) -> Self {
    Self {
      name: name.to_string(),
      description: description.to_string(),
      price_cents,
      image: None,
      carbon_footprint: None,
    }
  }

  pub fn with_image(mut self, image: &str) -> Self {
    self.image = Some(image.to_string());
    self
  }

  pub fn with_carbon_footprint(mut self, kg: f64) -> Self {
    self.carbon_footprint = Some(kg);
    self
  }
}
