//! Default content for a fresh database.
//!
//! Every insert is `ON CONFLICT DO NOTHING`, so seeding twice changes nothing.

use crate::DatabaseResult;
use crate::conversions::block_to_new_row;
use crate::models::{NewPageRow, NewSuiteRow, NewTestimonialRow, PageRow};
use crate::schema::{blocks, pages, suites, testimonials};
use diesel::pg::PgConnection;
use diesel::prelude::*;
use lodge_core::{Block, BlockKind, PageTemplate};
use lodge_error::DatabaseError;
use serde::Serialize;
use serde_json::json;
use tracing::{info, instrument};

/// Rows inserted by [`seed_defaults`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SeedReport {
    /// New pages
    pub pages: usize,
    /// New blocks
    pub blocks: usize,
    /// New suites
    pub suites: usize,
    /// New testimonials
    pub testimonials: usize,
}

impl SeedReport {
    /// Total rows inserted.
    pub fn total(&self) -> usize {
        self.pages + self.blocks + self.suites + self.testimonials
    }
}

const DEFAULT_PAGES: [(&str, &str, i32); 5] = [
    ("home", "Home", 1),
    ("suites", "Suites", 2),
    ("experiences", "Experiences", 3),
    ("gallery", "Gallery", 4),
    ("contact", "Contact", 5),
];

fn default_pages() -> Vec<NewPageRow> {
    DEFAULT_PAGES
        .iter()
        .map(|(slug, name, priority)| NewPageRow {
            slug: slug.to_string(),
            name: name.to_string(),
            template: PageTemplate::default_for_slug(slug).to_string(),
            priority: *priority,
        })
        .collect()
}

fn default_suites() -> Vec<NewSuiteRow> {
    [
        ("Fern Cabin", 2, 28, 180, "A quiet cabin at the edge of the fern grove."),
        ("Canopy Suite", 2, 38, 240, "Raised among the treetops with a wraparound deck."),
        ("River Lodge", 4, 64, 360, "Two bedrooms above the river bend, with a wood stove."),
    ]
    .into_iter()
    .map(|(name, capacity, area_m2, price, description)| NewSuiteRow {
        name: name.to_string(),
        capacity,
        area_m2,
        price,
        description: description.to_string(),
        images: Vec::new(),
    })
    .collect()
}

fn default_testimonials() -> Vec<NewTestimonialRow> {
    [
        ("Marta", Some("Lisbon"), 5, "We woke to birdsong every morning.", true),
        ("Jonas", Some("Hamburg"), 5, "The canopy suite is worth the climb.", true),
        ("Aiko", None, 4, "Lovely staff and a very good breakfast.", false),
    ]
    .into_iter()
    .map(|(author, city, rating, quote, is_featured)| NewTestimonialRow {
        author: author.to_string(),
        city: city.map(str::to_string),
        rating,
        quote: quote.to_string(),
        is_featured,
    })
    .collect()
}

fn welcome_hero() -> serde_json::Value {
    json!({
        "title": "Sleep under the canopy",
        "subtitle": "Suites in the forest, an hour from the city.",
        "background_image": "/images/hero.jpg",
        "overlay": true,
        "height": "100vh"
    })
}

/// Insert the default pages, suites and testimonials.
///
/// A freshly created home page also gets a published hero block.
#[instrument(skip(conn))]
pub fn seed_defaults(conn: &mut PgConnection) -> DatabaseResult<SeedReport> {
    conn.transaction::<_, DatabaseError, _>(|conn| {
        let mut report = SeedReport::default();

        let created: Vec<PageRow> = diesel::insert_into(pages::table)
            .values(&default_pages())
            .on_conflict(pages::slug)
            .do_nothing()
            .returning(PageRow::as_returning())
            .get_results(conn)?;
        report.pages = created.len();

        if let Some(home) = created.iter().find(|p| p.slug == "home") {
            let payload = welcome_hero();
            let mut hero = Block::draft(home.id, BlockKind::HeroImage, 1, payload.clone());
            hero.published = Some(payload);
            report.blocks = diesel::insert_into(blocks::table)
                .values(&block_to_new_row(&hero, 1))
                .execute(conn)?;
        }

        report.suites = diesel::insert_into(suites::table)
            .values(&default_suites())
            .on_conflict(suites::name)
            .do_nothing()
            .execute(conn)?;

        report.testimonials = diesel::insert_into(testimonials::table)
            .values(&default_testimonials())
            .on_conflict_do_nothing()
            .execute(conn)?;

        info!(
            pages = report.pages,
            blocks = report.blocks,
            suites = report.suites,
            testimonials = report.testimonials,
            "Seeded default content"
        );
        Ok(report)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use lodge_core::BlockContent;

    #[test]
    fn default_pages_use_slug_templates() {
        let pages = default_pages();
        assert_eq!(pages.len(), 5);
        assert_eq!(pages[0].template, "home");
        assert!(pages.windows(2).all(|w| w[0].priority < w[1].priority));
    }

    #[test]
    fn seeded_hero_passes_validation() {
        assert!(BlockContent::parse(BlockKind::HeroImage, &welcome_hero()).is_ok());
    }

    #[test]
    fn seeded_testimonials_have_valid_ratings() {
        assert!(default_testimonials().iter().all(|t| (1..=5).contains(&t.rating)));
    }
}
