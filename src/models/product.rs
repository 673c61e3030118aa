use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    error::{AppError, Result},
    models::Category,
};

/// One `{name, value}` entry of a product's spec sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductSpec {
    pub name: String,
    pub value: String,
}

/// Raw product row. `images` and `specs` hold JSON-encoded arrays (or NULL)
/// and are only decoded through [`ProductRow::into_product`].
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ProductRow {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub description: String,
    pub short_desc: Option<String>,
    pub price: Decimal,
    pub compare_price: Option<Decimal>,
    pub main_image: String,
    pub images: Option<String>,
    pub specs: Option<String>,
    pub meta_title: Option<String>,
    pub meta_desc: Option<String>,
    pub is_active: bool,
    pub is_featured: bool,
    pub is_new: bool,
    pub stock: i32,
    pub in_stock: bool,
    pub category_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub description: String,
    pub short_desc: Option<String>,
    pub price: Decimal,
    pub compare_price: Option<Decimal>,
    pub main_image: String,
    pub images: Vec<String>,
    pub specs: Vec<ProductSpec>,
    pub meta_title: Option<String>,
    pub meta_desc: Option<String>,
    pub is_active: bool,
    pub is_featured: bool,
    pub is_new: bool,
    pub stock: i32,
    pub in_stock: bool,
    pub category_id: Option<Uuid>,
    pub category: Option<Category>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ProductRow {
    pub fn into_product(self, category: Option<Category>) -> Result<Product> {
        let images = decode_images(self.images.as_deref())?;
        let specs = decode_specs(self.specs.as_deref())?;

        Ok(Product {
            id: self.id,
            name: self.name,
            slug: self.slug,
            description: self.description,
            short_desc: self.short_desc,
            price: self.price,
            compare_price: self.compare_price,
            main_image: self.main_image,
            images,
            specs,
            meta_title: self.meta_title,
            meta_desc: self.meta_desc,
            is_active: self.is_active,
            is_featured: self.is_featured,
            is_new: self.is_new,
            stock: self.stock,
            in_stock: self.in_stock,
            category_id: self.category_id,
            category,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

/// Decode a JSON-encoded text column. NULL means an empty sequence.
pub fn decode_images(raw: Option<&str>) -> Result<Vec<String>> {
    match raw {
        None => Ok(Vec::new()),
        Some(text) => serde_json::from_str(text)
            .map_err(|e| AppError::CorruptData(format!("invalid images column: {}", e))),
    }
}

pub fn decode_specs(raw: Option<&str>) -> Result<Vec<ProductSpec>> {
    match raw {
        None => Ok(Vec::new()),
        Some(text) => serde_json::from_str(text)
            .map_err(|e| AppError::CorruptData(format!("invalid specs column: {}", e))),
    }
}

pub fn encode_images(images: Option<&[String]>) -> Result<Option<String>> {
    images
        .map(|imgs| {
            serde_json::to_string(imgs)
                .map_err(|e| AppError::InternalError(format!("failed to encode images: {}", e)))
        })
        .transpose()
}

pub fn encode_specs(specs: Option<&[ProductSpec]>) -> Result<Option<String>> {
    specs
        .map(|s| {
            serde_json::to_string(s)
                .map_err(|e| AppError::InternalError(format!("failed to encode specs: {}", e)))
        })
        .transpose()
}

/// Create and partial-update payload. Creation validates required fields at
/// the route layer; absent fields are left untouched on update.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductRequest {
    pub name: Option<String>,
    pub slug: Option<String>,
    pub description: Option<String>,
    pub short_desc: Option<String>,
    pub price: Option<Decimal>,
    pub compare_price: Option<Decimal>,
    pub main_image: Option<String>,
    pub images: Option<Vec<String>>,
    pub specs: Option<Vec<ProductSpec>>,
    pub meta_title: Option<String>,
    pub meta_desc: Option<String>,
    pub is_active: Option<bool>,
    pub is_featured: Option<bool>,
    pub is_new: Option<bool>,
    pub stock: Option<i32>,
    pub in_stock: Option<bool>,
    pub category_id: Option<Uuid>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductFilters {
    pub category_id: Option<Uuid>,
    pub is_active: Option<bool>,
    pub is_featured: Option<bool>,
    pub is_new: Option<bool>,
    pub search: Option<String>,
    pub page: Option<i64>,
    pub page_size: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct LimitQuery {
    pub limit: Option<i64>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginatedResponse<T> {
    pub data: Vec<T>,
    pub total: i64,
    pub page: i64,
    pub page_size: i64,
    pub total_pages: i64,
}

impl<T> PaginatedResponse<T> {
    pub fn new(data: Vec<T>, total: i64, page: i64, page_size: i64) -> Self {
        let total_pages = if page_size > 0 {
            (total + page_size - 1) / page_size
        } else {
            0
        };

        Self {
            data,
            total,
            page,
            page_size,
            total_pages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_columns_decode_to_empty() {
        assert!(decode_images(None).unwrap().is_empty());
        assert!(decode_specs(None).unwrap().is_empty());
    }

    #[test]
    fn specs_round_trip() {
        let specs = vec![ProductSpec {
            name: "Drivers".to_string(),
            value: "1DD".to_string(),
        }];

        let encoded = encode_specs(Some(&specs)).unwrap().unwrap();
        let decoded = decode_specs(Some(&encoded)).unwrap();

        assert_eq!(decoded, specs);
    }

    #[test]
    fn images_round_trip() {
        let images = vec!["https://cdn.example.com/a.webp".to_string()];

        let encoded = encode_images(Some(&images)).unwrap().unwrap();
        let decoded = decode_images(Some(&encoded)).unwrap();

        assert_eq!(decoded, images);
    }

    #[test]
    fn absent_payload_encodes_to_null() {
        assert!(encode_images(None).unwrap().is_none());
        assert!(encode_specs(None).unwrap().is_none());
    }

    #[test]
    fn malformed_text_is_corrupt_data() {
        let err = decode_specs(Some("{not json")).unwrap_err();
        assert!(matches!(err, AppError::CorruptData(_)));

        // valid JSON of the wrong shape must be rejected too
        let err = decode_images(Some("{\"a\":1}")).unwrap_err();
        assert!(matches!(err, AppError::CorruptData(_)));
    }

    #[test]
    fn total_pages_rounds_up() {
        let page = PaginatedResponse::<()>::new(Vec::new(), 3, 1, 2);
        assert_eq!(page.total_pages, 2);

        let page = PaginatedResponse::<()>::new(Vec::new(), 24, 1, 12);
        assert_eq!(page.total_pages, 2);

        let page = PaginatedResponse::<()>::new(Vec::new(), 0, 1, 12);
        assert_eq!(page.total_pages, 0);
    }
}
