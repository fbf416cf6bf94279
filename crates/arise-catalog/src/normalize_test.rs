use serde_json::json;

use super::*;

fn raw(value: serde_json::Value) -> RawProduct {
    serde_json::from_value(value).expect("fixture should decode")
}

fn complete() -> serde_json::Value {
    json!({
        "name": "Nike Dunk Low Panda",
        "brand": "Nike",
        "price": 2499,
        "category": "men",
        "collection": "Dunk",
        "sizes": ["8", "9", "10"],
        "image": "images/dunk-panda.webp",
        "isNew": true
    })
}

fn table() -> BrandTable {
    BrandTable::builtin()
}

// -----------------------------------------------------------------------
// normalize_product
// -----------------------------------------------------------------------

#[test]
fn normalize_product_keeps_complete_record() {
    let product = normalize_product(raw(complete()), "#0", &table()).unwrap();
    assert_eq!(product.name, "Nike Dunk Low Panda");
    assert_eq!(product.brand, "nike");
    assert_eq!(product.price, 2499);
    assert_eq!(product.category, Category::Men);
    assert_eq!(product.collection, "Dunk");
    assert_eq!(product.sizes, vec!["8", "9", "10"]);
    assert!(product.is_new);
}

#[test]
fn normalize_product_rejects_missing_name() {
    let mut value = complete();
    value["name"] = json!("  ");
    let err = normalize_product(raw(value), "#3 in men", &table()).unwrap_err();
    assert!(
        matches!(err, CatalogError::InvalidRecord { ref context, ref reason } if context == "#3 in men" && reason.contains("name"))
    );
}

#[test]
fn normalize_product_rejects_missing_price() {
    let mut value = complete();
    value.as_object_mut().unwrap().remove("price");
    let err = normalize_product(raw(value), "#0", &table()).unwrap_err();
    assert!(matches!(err, CatalogError::InvalidRecord { ref reason, .. } if reason.contains("price")));
}

#[test]
fn normalize_product_rejects_missing_image() {
    let mut value = complete();
    value["image"] = serde_json::Value::Null;
    let err = normalize_product(raw(value), "#0", &table()).unwrap_err();
    assert!(matches!(err, CatalogError::InvalidRecord { ref reason, .. } if reason.contains("image")));
}

#[test]
fn normalize_product_applies_defaults() {
    let value = json!({
        "name": "Adidas Samba OG",
        "brand": "adidas",
        "price": 1999,
        "image": "images/samba.webp"
    });
    let product = normalize_product(raw(value), "#0", &table()).unwrap();
    assert_eq!(product.category, Category::Unisex);
    assert_eq!(product.collection, DEFAULT_COLLECTION);
    assert_eq!(product.sizes, DEFAULT_SIZES.to_vec());
    assert!(!product.is_new);
}

#[test]
fn normalize_product_empty_sizes_fall_back_to_defaults() {
    let mut value = complete();
    value["sizes"] = json!([]);
    let product = normalize_product(raw(value), "#0", &table()).unwrap();
    assert_eq!(product.sizes.len(), DEFAULT_SIZES.len());
}

#[test]
fn normalize_product_unknown_category_becomes_unisex() {
    let mut value = complete();
    value["category"] = json!("kids");
    let product = normalize_product(raw(value), "#0", &table()).unwrap();
    assert_eq!(product.category, Category::Unisex);
}

#[test]
fn normalize_product_accepts_man_category() {
    let mut value = complete();
    value["category"] = json!("man");
    let product = normalize_product(raw(value), "#0", &table()).unwrap();
    assert_eq!(product.category, Category::Men);
}

#[test]
fn normalize_product_normalizes_brand_spelling() {
    let mut value = complete();
    value["brand"] = json!("New-Balance");
    let product = normalize_product(raw(value), "#0", &table()).unwrap();
    assert_eq!(product.brand, "newbalance");
}

#[test]
fn normalize_product_guesses_brand_from_name() {
    let mut value = complete();
    value.as_object_mut().unwrap().remove("brand");
    value["name"] = json!("Onitsuka Mexico 66 Kill Bill");
    let product = normalize_product(raw(value), "#0", &table()).unwrap();
    assert_eq!(product.brand, "onitsuka tiger");
}

#[test]
fn normalize_product_unknown_brand_when_nothing_matches() {
    let mut value = complete();
    value["brand"] = json!("");
    value["name"] = json!("Classic Court Sneaker");
    let product = normalize_product(raw(value), "#0", &table()).unwrap();
    assert_eq!(product.brand, UNKNOWN_BRAND);
}

#[test]
fn normalize_product_reads_legacy_new_flag() {
    let mut value = complete();
    value.as_object_mut().unwrap().remove("isNew");
    value["new"] = json!(true);
    let product = normalize_product(raw(value), "#0", &table()).unwrap();
    assert!(product.is_new);
}

#[test]
fn normalize_product_zero_price_is_valid() {
    let mut value = complete();
    value["price"] = json!(0);
    let product = normalize_product(raw(value), "#0", &table()).unwrap();
    assert_eq!(product.price, 0);
}

// -----------------------------------------------------------------------
// parse_price
// -----------------------------------------------------------------------

#[test]
fn parse_price_strips_currency_and_grouping() {
    let price = RawPrice::Text("₹1,29,999".to_owned());
    assert_eq!(parse_price(&price), Ok(129_999));
}

#[test]
fn parse_price_drops_fraction_of_text() {
    let price = RawPrice::Text("$12.99".to_owned());
    assert_eq!(parse_price(&price), Ok(12));
}

#[test]
fn parse_price_truncates_float_number() {
    let price: RawPrice = serde_json::from_value(json!(2499.9)).unwrap();
    assert_eq!(parse_price(&price), Ok(2499));
}

#[test]
fn parse_price_rejects_negative_number() {
    let price: RawPrice = serde_json::from_value(json!(-5)).unwrap();
    assert!(parse_price(&price).unwrap_err().contains("negative"));
}

#[test]
fn parse_price_rejects_text_without_digits() {
    let price = RawPrice::Text("call for price".to_owned());
    assert!(parse_price(&price).is_err());
}

#[test]
fn parse_price_rejects_overflow() {
    let price: RawPrice = serde_json::from_value(json!(10_000_000_000_u64)).unwrap();
    assert!(parse_price(&price).unwrap_err().contains("out of range"));
}

// -----------------------------------------------------------------------
// normalize_document
// -----------------------------------------------------------------------

#[test]
fn normalize_document_skips_invalid_records_without_aborting() {
    let records = vec![
        complete(),
        json!({ "name": "No Price", "image": "x.webp" }),
        json!("not an object"),
        json!({ "name": 42, "price": 100, "image": "x.webp" }),
        complete(),
    ];
    let products = normalize_document(records, "men", &table());
    assert_eq!(products.len(), 2);
}

#[test]
fn normalize_document_keeps_records_with_mistyped_optional_fields() {
    let with = |field: &str, value: serde_json::Value| {
        let mut record = complete();
        record[field] = value;
        record
    };
    let records = vec![
        with("isNew", json!("true")),
        with("sizes", json!("7,8,9")),
        with("category", json!(5)),
    ];

    let products = normalize_document(records, "men", &table());

    assert_eq!(products.len(), 3);
    assert!(!products[0].is_new);
    assert_eq!(products[1].sizes, vec!["7", "8", "9", "10", "11"]);
    assert_eq!(products[2].category, Category::Unisex);
}

#[test]
fn normalize_document_empty_input_is_empty() {
    assert!(normalize_document(vec![], "women", &table()).is_empty());
}
