//! Diesel models for the content tables.

use crate::schema::{blocks, media_library, pages, suites, testimonials};
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde_json::Value as JsonValue;
use uuid::Uuid;

/// Database row for pages table.
#[derive(Debug, Clone, Queryable, Identifiable, Selectable)]
#[diesel(table_name = pages)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct PageRow {
    pub id: Uuid,
    pub slug: String,
    pub name: String,
    pub template: String,
    pub priority: i32,
    pub created_at: DateTime<Utc>,
}

/// Insertable struct for pages table.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = pages)]
pub struct NewPageRow {
    pub slug: String,
    pub name: String,
    pub template: String,
    pub priority: i32,
}

/// Database row for blocks table.
#[derive(Debug, Clone, Queryable, Identifiable, Selectable, Associations)]
#[diesel(belongs_to(PageRow, foreign_key = page_id))]
#[diesel(table_name = blocks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct BlockRow {
    pub id: Uuid,
    pub page_id: Uuid,
    pub block_type: String,
    pub position: i32,
    pub payload: JsonValue,
    pub published: Option<JsonValue>,
    pub updated_at: DateTime<Utc>,
}

/// Insertable struct for blocks table.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = blocks)]
pub struct NewBlockRow {
    pub id: Uuid,
    pub page_id: Uuid,
    pub block_type: String,
    pub position: i32,
    pub payload: JsonValue,
    pub published: Option<JsonValue>,
}

/// Database row for media_library table.
#[derive(Debug, Clone, Queryable, Identifiable, Selectable)]
#[diesel(table_name = media_library)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct MediaRow {
    pub id: Uuid,
    pub path: String,
    pub alt: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Database row for suites table.
#[derive(Debug, Clone, Queryable, Identifiable, Selectable)]
#[diesel(table_name = suites)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct SuiteRow {
    pub id: Uuid,
    pub name: String,
    pub capacity: i32,
    pub area_m2: i32,
    pub price: i32,
    pub description: String,
    pub images: Vec<Uuid>,
}

/// Insertable struct for suites table.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = suites)]
pub struct NewSuiteRow {
    pub name: String,
    pub capacity: i32,
    pub area_m2: i32,
    pub price: i32,
    pub description: String,
    pub images: Vec<Uuid>,
}

/// Database row for testimonials table.
#[derive(Debug, Clone, Queryable, Identifiable, Selectable)]
#[diesel(table_name = testimonials)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TestimonialRow {
    pub id: Uuid,
    pub author: String,
    pub city: Option<String>,
    pub rating: i16,
    pub quote: String,
    pub is_featured: bool,
}

/// Insertable struct for testimonials table.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = testimonials)]
pub struct NewTestimonialRow {
    pub author: String,
    pub city: Option<String>,
    pub rating: i16,
    pub quote: String,
    pub is_featured: bool,
}
