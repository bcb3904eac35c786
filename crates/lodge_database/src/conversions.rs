//! Conversions between database rows and domain types.

use crate::models::{BlockRow, MediaRow, NewBlockRow, PageRow, SuiteRow, TestimonialRow};
use crate::DatabaseResult;
use lodge_core::{Block, BlockKind, Media, Page, PageTemplate, Suite, Testimonial};
use lodge_error::{DatabaseError, DatabaseErrorKind};

/// Convert a page row.
pub fn row_to_page(row: PageRow) -> Page {
    Page {
        id: row.id,
        slug: row.slug,
        name: row.name,
        template: PageTemplate::from_stored(&row.template),
        priority: row.priority,
        created_at: row.created_at,
    }
}

/// Parse a stored block type.
pub fn parse_block_kind(value: &str) -> DatabaseResult<BlockKind> {
    value.parse().map_err(|_| {
        DatabaseError::new(DatabaseErrorKind::Serialization(format!(
            "Unknown block type '{}'",
            value
        )))
    })
}

/// Convert a block row.
///
/// Fails when the stored type is not a known block kind.
pub fn row_to_block(row: BlockRow) -> DatabaseResult<Block> {
    Ok(Block {
        id: row.id,
        page_id: row.page_id,
        kind: parse_block_kind(&row.block_type)?,
        position: row.position,
        payload: row.payload,
        published: row.published.filter(|v| !v.is_null()),
        updated_at: row.updated_at,
    })
}

/// Convert a block into an insertable row.
pub fn block_to_new_row(block: &Block, position: i32) -> NewBlockRow {
    NewBlockRow {
        id: block.id,
        page_id: block.page_id,
        block_type: block.kind.to_string(),
        position,
        payload: block.payload.clone(),
        published: block.published.clone(),
    }
}

/// Convert a media row.
pub fn row_to_media(row: MediaRow) -> Media {
    Media {
        id: row.id,
        path: row.path,
        alt: row.alt,
        created_at: row.created_at,
    }
}

/// Convert a suite row.
pub fn row_to_suite(row: SuiteRow) -> Suite {
    Suite {
        id: row.id,
        name: row.name,
        capacity: row.capacity,
        area_m2: row.area_m2,
        price: row.price,
        description: row.description,
        images: row.images,
    }
}

/// Convert a testimonial row.
pub fn row_to_testimonial(row: TestimonialRow) -> Testimonial {
    Testimonial {
        id: row.id,
        author: row.author,
        city: row.city,
        rating: row.rating,
        quote: row.quote,
        is_featured: row.is_featured,
    }
}
