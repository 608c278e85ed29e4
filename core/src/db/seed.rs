// storefront/src/db/seed.rs

use crate::catalog;
use crate::error::ShopResult;
use crate::models::NewProduct;
use sqlx::SqlitePool;
use tracing::{debug, info};

/// The sneakers the shop launches with.
pub fn sample_products() -> Vec<NewProduct> {
  vec![
    NewProduct::new(
      "Air Jordan 1 Retro High OG",
      "A classic high-top with the Nike swoosh, the Wings logo and an Air-sole unit, here in a \
       brown and black colourway on a premium leather upper. The shoe Michael Jordan wore in his \
       rookie season.",
      18_000,
    )
    .with_image("Jordan1.jpg")
    .with_carbon_footprint(12.5),
    NewProduct::new(
      "Jordan 4 Retro 'Bred Reimagined'",
      "Mesh netting, distinctive wings and a visible Air-sole. The 1989 'Bred' colourway returns \
       in full-grain leather for a more premium feel.",
      22_000,
    )
    .with_image("Jordan4.jpg")
    .with_carbon_footprint(14.0),
    NewProduct::new(
      "Jordan 11 Retro 'Concord'",
      "Patent leather, a carbon fibre spring plate and the black and white 'Concord' colourway \
       debuted during the 95-96 championship season.",
      22_500,
    )
    .with_image("Jordan11.jpg")
    .with_carbon_footprint(15.2),
    NewProduct::new(
      "Jordan 3 Retro 'White Cement'",
      "Tinker Hatfield's design with a white tumbled leather upper and elephant print overlays \
       on the toe and mudguard.",
      20_000,
    )
    .with_image("Jordan3.jpg")
    .with_carbon_footprint(13.8),
  ]
}

/// Inserts the sample products when the catalog is empty. Returns how many were inserted.
pub async fn seed_catalog(pool: &SqlitePool) -> ShopResult<usize> {
  if catalog::count(pool).await? > 0 {
    debug!("Catalog already populated, skipping seed.");
    return Ok(0);
  }

  let mut inserted = 0;
  for new_product in sample_products() {
    if catalog::find_by_name(pool, &new_product.name).await?.is_some() {
      continue;
    }
    catalog::insert_product(pool, &new_product).await?;
    inserted += 1;
  }
  info!(inserted, "Seeded the product catalog.");
  Ok(inserted)
}
