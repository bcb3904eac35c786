//! Core content types for the Lodge content service.
//!
//! This crate provides the domain types shared by every Lodge crate:
//!
//! - [`Page`] and [`PageTemplate`]: routable pages, with placeholder synthesis
//! - [`Block`] and [`BlockKind`]: positioned content units with a draft payload
//!   and an optional published snapshot
//! - [`BlockContent`]: the tagged union of validated block payloads
//! - [`Media`], [`Suite`], [`Testimonial`]: static site inventory
//! - [`reorder`]: array-move and position renumbering for the block editor

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod block;
mod catalog;
mod content;
mod page;
pub mod reorder;
mod schema;

pub use block::{Block, BlockKind, PageWithBlocks, RenderedBlock, RenderedPage};
pub use catalog::{Media, Suite, SuiteWithMedia, Testimonial};
pub use content::{
    BlockContent, CallToAction, Gallery, GalleryImage, HeroImage, ImagePosition, Link, RichText,
    SplitBlock, TestimonialStrip,
};
pub use page::{Page, PageBuilder, PageTemplate};
pub use reorder::{has_contiguous_positions, move_item, renumber_positions, reorder_blocks};
