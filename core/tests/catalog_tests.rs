// tests/catalog_tests.rs
mod common;

use common::*;
use storefront::catalog::{self, SortKey};
use storefront::models::NewProduct;
use storefront::{db, ShopError};

fn names(products: &[storefront::models::Product]) -> Vec<&str> {
  products.iter().map(|p| p.name.as_str()).collect()
}

#[tokio::test]
async fn test_seed_inserts_four_products_once() {
  setup_tracing();
  let pool = empty_store().await;
  assert_eq!(db::seed_catalog(&pool).await.unwrap(), 4);
  assert_eq!(db::seed_catalog(&pool).await.unwrap(), 0);
  assert_eq!(catalog::count(&pool).await.unwrap(), 4);
}

#[tokio::test]
async fn test_list_sorted_by_each_key() {
  setup_tracing();
  let pool = seeded_store().await;

  let by_name = catalog::list_sorted(&pool, SortKey::Name).await.unwrap();
  assert_eq!(
    names(&by_name),
    vec![
      "Air Jordan 1 Retro High OG",
      "Jordan 11 Retro 'Concord'",
      "Jordan 3 Retro 'White Cement'",
      "Jordan 4 Retro 'Bred Reimagined'",
    ]
  );

  let by_price = catalog::list_sorted(&pool, SortKey::Price).await.unwrap();
  let prices: Vec<i64> = by_price.iter().map(|p| p.price_cents).collect();
  assert_eq!(prices, vec![22_500, 22_000, 20_000, 18_000]);

  let by_carbon = catalog::list_sorted(&pool, SortKey::Carbon).await.unwrap();
  let footprints: Vec<f64> = by_carbon.iter().map(|p| p.footprint_or_zero()).collect();
  assert_eq!(footprints, vec![15.2, 14.0, 13.8, 12.5]);
}

#[tokio::test]
async fn test_products_without_footprint_sort_last_by_carbon() {
  setup_tracing();
  let pool = seeded_store().await;
  insert(&pool, NewProduct::new("Plain Canvas Low", "Unrated canvas shoe.", 5_000)).await;

  let by_carbon = catalog::list_sorted(&pool, SortKey::Carbon).await.unwrap();
  assert_eq!(by_carbon.last().map(|p| p.name.as_str()), Some("Plain Canvas Low"));
}

#[test]
fn test_sort_key_parse_falls_back_to_name() {
  assert_eq!(SortKey::parse(Some("price")), SortKey::Price);
  assert_eq!(SortKey::parse(Some("carbon")), SortKey::Carbon);
  assert_eq!(SortKey::parse(Some("name")), SortKey::Name);
  assert_eq!(SortKey::parse(Some("popularity")), SortKey::Name);
  assert_eq!(SortKey::parse(None), SortKey::Name);
}

#[tokio::test]
async fn test_search_is_case_insensitive_on_name_or_description() {
  setup_tracing();
  let pool = empty_store().await;
  insert(
    &pool,
    NewProduct::new("Air Jordan 1 Retro High OG", "Brown and black leather high-top.", 18_000),
  )
  .await;
  insert(&pool, NewProduct::new("Nike Air Max", "Visible cushioning unit.", 15_000)).await;

  let hits = catalog::search(&pool, "jordan").await.unwrap();
  assert_eq!(names(&hits), vec!["Air Jordan 1 Retro High OG"]);

  let by_description = catalog::search(&pool, "CUSHIONING").await.unwrap();
  assert_eq!(names(&by_description), vec!["Nike Air Max"]);

  let both = catalog::search(&pool, "air").await.unwrap();
  assert_eq!(both.len(), 2);

  assert!(catalog::search(&pool, "sandal").await.unwrap().is_empty());
}

#[tokio::test]
async fn test_search_treats_wildcards_literally() {
  setup_tracing();
  let pool = seeded_store().await;
  assert!(catalog::search(&pool, "%").await.unwrap().is_empty());
  assert!(catalog::search(&pool, "_").await.unwrap().is_empty());
}

#[tokio::test]
async fn test_get_by_id_not_found() {
  setup_tracing();
  let pool = seeded_store().await;
  let first = product_named(&pool, "Air Jordan 1 Retro High OG").await;
  assert_eq!(catalog::get_by_id(&pool, first.id).await.unwrap(), first);

  let err = catalog::get_by_id(&pool, 9_999).await.unwrap_err();
  assert!(matches!(err, ShopError::NotFound(_)));
}

#[tokio::test]
async fn test_get_many_ordered_keeps_requested_order() {
  setup_tracing();
  let pool = seeded_store().await;
  let all = catalog::list_sorted(&pool, SortKey::Name).await.unwrap();
  let ids = vec![all[2].id, 9_999, all[0].id];

  let fetched = catalog::get_many_ordered(&pool, &ids).await.unwrap();
  let fetched_ids: Vec<i64> = fetched.iter().map(|p| p.id).collect();
  assert_eq!(fetched_ids, vec![all[2].id, all[0].id]);
  assert!(catalog::get_many_ordered(&pool, &[]).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_product_names_are_unique() {
  setup_tracing();
  let pool = seeded_store().await;
  let duplicate = NewProduct::new("Air Jordan 1 Retro High OG", "Again.", 1);
  let err = catalog::insert_product(&pool, &duplicate).await.unwrap_err();
  assert!(matches!(err, ShopError::Store(_)));
}
