//! Typed block payloads.
//!
//! Block payloads are stored as JSON and decoded through [`BlockContent::parse`],
//! which dispatches on the block's [`BlockKind`], checks the variant's schema
//! and only then deserializes into the typed struct.

use crate::BlockKind;
use crate::schema::PayloadChecker;
use lodge_error::{FieldError, ValidationError};
use serde::{Deserialize, Serialize};
use serde::de::DeserializeOwned;
use serde_json::Value as JsonValue;

const TITLE_MAX: usize = 120;
const LABEL_MAX: usize = 60;
const ALT_MAX: usize = 200;

fn default_true() -> bool {
    true
}

fn default_hero_height() -> String {
    "100vh".to_string()
}

fn default_testimonial_limit() -> u8 {
    3
}

/// Full-width image with a headline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeroImage {
    /// Headline
    pub title: String,
    /// Line under the headline
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    /// Background image URL or local path
    pub background_image: String,
    /// Darken the image behind the text
    #[serde(default = "default_true")]
    pub overlay: bool,
    /// CSS height (`100vh`, `480px`, `60%`)
    #[serde(default = "default_hero_height")]
    pub height: String,
}

impl HeroImage {
    fn check(checker: &mut PayloadChecker<'_>) {
        checker.required_text("title", TITLE_MAX);
        checker.optional_text("subtitle", 240);
        checker.media_ref("background_image", true);
        checker.optional_bool("overlay");
        checker.css_height("height");
    }
}

/// Which side of a split block the image sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImagePosition {
    /// Image on the left
    #[default]
    Left,
    /// Image on the right
    Right,
}

/// A labelled link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    /// Link text
    pub label: String,
    /// Target URL or local path
    pub href: String,
}

impl Link {
    fn check(checker: &mut PayloadChecker<'_>) {
        checker.required_text("label", LABEL_MAX);
        checker.media_ref("href", true);
    }
}

/// Text beside an image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SplitBlock {
    /// Heading
    pub title: String,
    /// Body text
    pub description: String,
    /// Image URL or local path
    pub image: String,
    /// Image side
    pub image_position: ImagePosition,
    /// Optional call to action
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<Link>,
    /// Optional bullet list
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub bullets: Vec<String>,
}

impl SplitBlock {
    fn check(checker: &mut PayloadChecker<'_>) {
        checker.required_text("title", TITLE_MAX);
        checker.required_text("description", 1200);
        checker.media_ref("image", true);
        checker.choice("image_position", &["left", "right"], true);
        checker.optional_object("link", Link::check);
        checker.string_list("bullets", 8, 160);
    }
}

/// Free-form prose.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RichText {
    /// Optional heading
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub heading: Option<String>,
    /// Markdown body
    pub body: String,
}

impl RichText {
    fn check(checker: &mut PayloadChecker<'_>) {
        checker.optional_text("heading", TITLE_MAX);
        checker.required_text("body", 8000);
    }
}

/// One image of a gallery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GalleryImage {
    /// Image URL or local path
    pub src: String,
    /// Alternative text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,
}

/// Image grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Gallery {
    /// Optional heading
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Between 1 and 24 images
    pub images: Vec<GalleryImage>,
}

impl Gallery {
    fn check(checker: &mut PayloadChecker<'_>) {
        checker.optional_text("title", TITLE_MAX);
        checker.object_list("images", 1, 24, |image| {
            image.media_ref("src", true);
            image.optional_text("alt", ALT_MAX);
        });
    }
}

/// Headline with a single button.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallToAction {
    /// Headline
    pub title: String,
    /// Supporting text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Button text
    pub button_label: String,
    /// Button target
    pub button_href: String,
}

impl CallToAction {
    fn check(checker: &mut PayloadChecker<'_>) {
        checker.required_text("title", TITLE_MAX);
        checker.optional_text("text", 400);
        checker.required_text("button_label", LABEL_MAX);
        checker.media_ref("button_href", true);
    }
}

/// Strip of guest quotes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestimonialStrip {
    /// Optional heading
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Only show featured testimonials
    #[serde(default = "default_true")]
    pub featured_only: bool,
    /// How many quotes to show (1..=12)
    #[serde(default = "default_testimonial_limit")]
    pub limit: u8,
}

impl TestimonialStrip {
    fn check(checker: &mut PayloadChecker<'_>) {
        checker.optional_text("title", TITLE_MAX);
        checker.optional_bool("featured_only");
        checker.optional_int("limit", 1, 12);
    }
}

/// Validated content of a block, one variant per [`BlockKind`].
///
/// Serialized with the kind as a `type` tag next to the payload fields.
///
/// # Examples
///
/// ```
/// use lodge_core::{BlockContent, BlockKind};
/// use serde_json::json;
///
/// let err = BlockContent::parse(
///     BlockKind::SplitBlock,
///     &json!({"title": "Forest suites", "image": "/img/forest.jpg", "image_position": "left"}),
/// )
/// .unwrap_err();
///
/// assert_eq!(err.message_for("description"), Some("is required"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum BlockContent {
    /// Full-width image with headline
    HeroImage(HeroImage),
    /// Text beside an image
    SplitBlock(SplitBlock),
    /// Free-form prose
    RichText(RichText),
    /// Image grid
    Gallery(Gallery),
    /// Headline with a single button
    CallToAction(CallToAction),
    /// Guest quotes
    Testimonials(TestimonialStrip),
}

impl BlockContent {
    /// Validate `payload` against the schema of `kind` and decode it.
    ///
    /// Every failing field is reported, not just the first.
    pub fn parse(kind: BlockKind, payload: &JsonValue) -> Result<Self, ValidationError> {
        match kind {
            BlockKind::HeroImage => decode(kind, payload, HeroImage::check).map(Self::HeroImage),
            BlockKind::SplitBlock => decode(kind, payload, SplitBlock::check).map(Self::SplitBlock),
            BlockKind::RichText => decode(kind, payload, RichText::check).map(Self::RichText),
            BlockKind::Gallery => decode(kind, payload, Gallery::check).map(Self::Gallery),
            BlockKind::CallToAction => {
                decode(kind, payload, CallToAction::check).map(Self::CallToAction)
            }
            BlockKind::Testimonials => {
                decode(kind, payload, TestimonialStrip::check).map(Self::Testimonials)
            }
        }
    }

    /// The discriminant of this content.
    pub fn kind(&self) -> BlockKind {
        match self {
            Self::HeroImage(_) => BlockKind::HeroImage,
            Self::SplitBlock(_) => BlockKind::SplitBlock,
            Self::RichText(_) => BlockKind::RichText,
            Self::Gallery(_) => BlockKind::Gallery,
            Self::CallToAction(_) => BlockKind::CallToAction,
            Self::Testimonials(_) => BlockKind::Testimonials,
        }
    }

    /// Payload JSON without the `type` tag, as stored in the `payload` column.
    pub fn to_payload(&self) -> JsonValue {
        let value = match self {
            Self::HeroImage(c) => serde_json::to_value(c),
            Self::SplitBlock(c) => serde_json::to_value(c),
            Self::RichText(c) => serde_json::to_value(c),
            Self::Gallery(c) => serde_json::to_value(c),
            Self::CallToAction(c) => serde_json::to_value(c),
            Self::Testimonials(c) => serde_json::to_value(c),
        };
        // Plain structs of strings, bools and integers always serialize.
        value.unwrap_or(JsonValue::Null)
    }
}

fn decode<'a, T: DeserializeOwned>(
    kind: BlockKind,
    payload: &'a JsonValue,
    check: impl FnOnce(&mut PayloadChecker<'a>),
) -> Result<T, ValidationError> {
    let mut checker = PayloadChecker::new(payload);
    check(&mut checker);
    let errors = checker.finish();
    if !errors.is_empty() {
        return Err(ValidationError::new(kind.to_string(), errors));
    }

    serde_json::from_value(payload.clone()).map_err(|e| {
        ValidationError::new(kind.to_string(), vec![FieldError::new("payload", e.to_string())])
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn hero_defaults_apply() {
        let content = BlockContent::parse(
            BlockKind::HeroImage,
            &json!({"title": "Sleep under the canopy", "background_image": "/img/hero.jpg"}),
        )
        .unwrap();
        let BlockContent::HeroImage(hero) = content else {
            panic!("expected hero");
        };
        assert!(hero.overlay);
        assert_eq!(hero.height, "100vh");
        assert_eq!(hero.subtitle, None);
    }

    #[test]
    fn tagged_serialization_uses_kebab_case() {
        let content = BlockContent::RichText(RichText {
            heading: None,
            body: "Welcome".to_string(),
        });
        let value = serde_json::to_value(&content).unwrap();
        assert_eq!(value["type"], "rich-text");
        assert_eq!(value["body"], "Welcome");
        assert!(content.to_payload().get("type").is_none());
    }

    #[test]
    fn testimonial_limit_is_bounded() {
        let err = BlockContent::parse(BlockKind::Testimonials, &json!({"limit": 40})).unwrap_err();
        assert!(err.has_field("limit"));

        let ok = BlockContent::parse(BlockKind::Testimonials, &json!({})).unwrap();
        assert_eq!(
            ok,
            BlockContent::Testimonials(TestimonialStrip {
                title: None,
                featured_only: true,
                limit: 3,
            })
        );
    }
}
