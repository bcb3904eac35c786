//! Synchronous content queries.
//!
//! These functions take a borrowed connection so the CLI can use them
//! directly; [`crate::PostgresContentStore`] runs them on the blocking pool.

use crate::conversions::{
    block_to_new_row, row_to_block, row_to_media, row_to_page, row_to_suite, row_to_testimonial,
};
use crate::models::{BlockRow, MediaRow, PageRow, SuiteRow, TestimonialRow};
use crate::schema::{blocks, media_library, pages, suites, testimonials};
use crate::DatabaseResult;
use chrono::Utc;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use lodge_core::{Block, BlockKind, Media, Page, PageWithBlocks, Suite, Testimonial};
use lodge_error::DatabaseError;
use serde_json::Value as JsonValue;
use tracing::{debug, instrument};
use uuid::Uuid;

/// All pages ordered by priority, then slug.
#[instrument(skip(conn))]
pub fn list_pages(conn: &mut PgConnection) -> DatabaseResult<Vec<Page>> {
    let rows: Vec<PageRow> = pages::table
        .select(PageRow::as_select())
        .order((pages::priority.asc(), pages::slug.asc()))
        .load(conn)?;
    debug!(count = rows.len(), "Loaded pages");
    Ok(rows.into_iter().map(row_to_page).collect())
}

/// The page with this slug.
#[instrument(skip(conn))]
pub fn page_by_slug(conn: &mut PgConnection, slug: &str) -> DatabaseResult<Option<Page>> {
    let row: Option<PageRow> = pages::table
        .filter(pages::slug.eq(slug))
        .select(PageRow::as_select())
        .first(conn)
        .optional()?;
    Ok(row.map(row_to_page))
}

/// A page with all of its blocks, sorted by position.
#[instrument(skip(conn))]
pub fn page_with_blocks(
    conn: &mut PgConnection,
    page_id: Uuid,
) -> DatabaseResult<Option<PageWithBlocks>> {
    let Some(page_row) = pages::table
        .find(page_id)
        .select(PageRow::as_select())
        .first(conn)
        .optional()?
    else {
        return Ok(None);
    };

    let block_rows: Vec<BlockRow> = BlockRow::belonging_to(&page_row)
        .select(BlockRow::as_select())
        .order(blocks::position.asc())
        .load(conn)?;
    debug!(blocks = block_rows.len(), "Loaded page blocks");

    let blocks = block_rows
        .into_iter()
        .map(row_to_block)
        .collect::<DatabaseResult<Vec<_>>>()?;

    Ok(Some(PageWithBlocks::new(row_to_page(page_row), blocks)))
}

/// A single block.
#[instrument(skip(conn))]
pub fn block_by_id(conn: &mut PgConnection, block_id: Uuid) -> DatabaseResult<Option<Block>> {
    blocks::table
        .find(block_id)
        .select(BlockRow::as_select())
        .first(conn)
        .optional()?
        .map(row_to_block)
        .transpose()
}

/// Append a block after the last block of its page.
#[instrument(skip(conn, block), fields(page_id = %block.page_id, kind = %block.kind))]
pub fn insert_block(conn: &mut PgConnection, block: &Block) -> DatabaseResult<Block> {
    conn.transaction::<_, DatabaseError, _>(|conn| {
        let last: Option<i32> = blocks::table
            .filter(blocks::page_id.eq(block.page_id))
            .select(diesel::dsl::max(blocks::position))
            .first(conn)?;
        let position = last.unwrap_or(0) + 1;

        let row: BlockRow = diesel::insert_into(blocks::table)
            .values(&block_to_new_row(block, position))
            .returning(BlockRow::as_returning())
            .get_result(conn)?;
        debug!(position, "Inserted block");
        row_to_block(row)
    })
}

/// Replace a block's type and draft payload.
#[instrument(skip(conn, payload))]
pub fn save_draft(
    conn: &mut PgConnection,
    block_id: Uuid,
    kind: BlockKind,
    payload: &JsonValue,
) -> DatabaseResult<Option<Block>> {
    diesel::update(blocks::table.find(block_id))
        .set((
            blocks::block_type.eq(kind.to_string()),
            blocks::payload.eq(payload),
            blocks::updated_at.eq(Utc::now()),
        ))
        .returning(BlockRow::as_returning())
        .get_result(conn)
        .optional()?
        .map(row_to_block)
        .transpose()
}

/// Set or clear a block's published snapshot.
#[instrument(skip(conn, snapshot), fields(publish = snapshot.is_some()))]
pub fn set_published(
    conn: &mut PgConnection,
    block_id: Uuid,
    snapshot: Option<&JsonValue>,
) -> DatabaseResult<Option<Block>> {
    diesel::update(blocks::table.find(block_id))
        .set((
            blocks::published.eq(snapshot),
            blocks::updated_at.eq(Utc::now()),
        ))
        .returning(BlockRow::as_returning())
        .get_result(conn)
        .optional()?
        .map(row_to_block)
        .transpose()
}

/// Delete a block.
#[instrument(skip(conn))]
pub fn delete_block(conn: &mut PgConnection, block_id: Uuid) -> DatabaseResult<()> {
    let deleted = diesel::delete(blocks::table.find(block_id)).execute(conn)?;
    debug!(deleted, "Deleted block");
    Ok(())
}

/// Rewrite the positions of a page's blocks in one transaction.
///
/// Positions are first parked on their negatives so the
/// `(page_id, position)` unique constraint holds after every statement.
/// Blocks of the page missing from `ordered` (added concurrently) keep
/// their relative order after the written ones.
#[instrument(skip(conn, ordered), fields(count = ordered.len()))]
pub fn write_block_positions(
    conn: &mut PgConnection,
    page_id: Uuid,
    ordered: &[Block],
) -> DatabaseResult<()> {
    conn.transaction::<_, DatabaseError, _>(|conn| {
        let now = Utc::now();

        diesel::update(blocks::table.filter(blocks::page_id.eq(page_id)))
            .set(blocks::position.eq(blocks::position * -1))
            .execute(conn)?;

        let mut next = 1;
        for block in ordered.iter().filter(|b| b.page_id == page_id) {
            let updated = diesel::update(
                blocks::table
                    .filter(blocks::id.eq(block.id))
                    .filter(blocks::page_id.eq(page_id)),
            )
            .set((blocks::position.eq(next), blocks::updated_at.eq(now)))
            .execute(conn)?;
            if updated > 0 {
                next += 1;
            }
        }

        let stragglers: Vec<Uuid> = blocks::table
            .filter(blocks::page_id.eq(page_id))
            .filter(blocks::position.lt(0))
            .order(blocks::position.desc())
            .select(blocks::id)
            .load(conn)?;
        if !stragglers.is_empty() {
            tracing::warn!(count = stragglers.len(), "Blocks missing from reorder, appending");
        }
        for id in stragglers {
            diesel::update(blocks::table.find(id))
                .set(blocks::position.eq(next))
                .execute(conn)?;
            next += 1;
        }

        debug!(positions = next - 1, "Wrote block positions");
        Ok(())
    })
}

/// Every media row, newest first.
#[instrument(skip(conn))]
pub fn list_media(conn: &mut PgConnection) -> DatabaseResult<Vec<Media>> {
    let rows: Vec<MediaRow> = media_library::table
        .select(MediaRow::as_select())
        .order(media_library::created_at.desc())
        .load(conn)?;
    Ok(rows.into_iter().map(row_to_media).collect())
}

/// Media rows with the given ids.
#[instrument(skip(conn, ids), fields(count = ids.len()))]
pub fn media_by_ids(conn: &mut PgConnection, ids: &[Uuid]) -> DatabaseResult<Vec<Media>> {
    if ids.is_empty() {
        return Ok(Vec::new());
    }
    let rows: Vec<MediaRow> = media_library::table
        .filter(media_library::id.eq_any(ids))
        .select(MediaRow::as_select())
        .load(conn)?;
    Ok(rows.into_iter().map(row_to_media).collect())
}

/// All suites by ascending price.
#[instrument(skip(conn))]
pub fn list_suites(conn: &mut PgConnection) -> DatabaseResult<Vec<Suite>> {
    let rows: Vec<SuiteRow> = suites::table
        .select(SuiteRow::as_select())
        .order((suites::price.asc(), suites::name.asc()))
        .load(conn)?;
    Ok(rows.into_iter().map(row_to_suite).collect())
}

/// Testimonials, featured first.
#[instrument(skip(conn))]
pub fn list_testimonials(
    conn: &mut PgConnection,
    featured_only: bool,
) -> DatabaseResult<Vec<Testimonial>> {
    let mut query = testimonials::table
        .select(TestimonialRow::as_select())
        .order((testimonials::is_featured.desc(), testimonials::rating.desc()))
        .into_boxed();
    if featured_only {
        query = query.filter(testimonials::is_featured.eq(true));
    }
    let rows: Vec<TestimonialRow> = query.load(conn)?;
    Ok(rows.into_iter().map(row_to_testimonial).collect())
}
