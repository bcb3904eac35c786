//! Field-level checks for JSON block payloads.
//!
//! Each block variant describes its schema with a [`PayloadChecker`]; every
//! failing field is collected so editors see all problems at once.

use lodge_error::FieldError;
use regex::Regex;
use serde_json::{Map, Value as JsonValue};
use std::sync::LazyLock;

/// Longest URL or path accepted for media references.
pub(crate) const MAX_MEDIA_REF_LEN: usize = 2048;

// Absolute http(s) URL, or a site-local path. Protocol-relative `//host` is rejected.
static MEDIA_REF: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:https?://[^\s/?#]+[^\s]*|/(?:[^/\s][^\s]*)?)$").expect("valid media regex")
});

static CSS_HEIGHT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{1,4}(?:vh|px|%)$").expect("valid height regex"));

/// Whether `value` is an http(s) URL or a site-local path.
pub(crate) fn is_media_ref(value: &str) -> bool {
    value.len() <= MAX_MEDIA_REF_LEN && MEDIA_REF.is_match(value)
}

/// Whether `value` is a CSS height the templates understand.
pub(crate) fn is_css_height(value: &str) -> bool {
    CSS_HEIGHT.is_match(value)
}

pub(crate) struct PayloadChecker<'a> {
    object: Option<&'a Map<String, JsonValue>>,
    prefix: String,
    errors: Vec<FieldError>,
}

impl<'a> PayloadChecker<'a> {
    pub(crate) fn new(value: &'a JsonValue) -> Self {
        let mut checker = Self {
            object: value.as_object(),
            prefix: String::new(),
            errors: Vec::new(),
        };
        if checker.object.is_none() {
            checker
                .errors
                .push(FieldError::new("payload", "must be a JSON object"));
        }
        checker
    }

    fn nested_at(value: &'a JsonValue, prefix: String) -> Self {
        Self {
            object: value.as_object(),
            prefix,
            errors: Vec::new(),
        }
    }

    fn path(&self, field: &str) -> String {
        format!("{}{}", self.prefix, field)
    }

    fn fail(&mut self, field: &str, message: impl Into<String>) {
        let path = self.path(field);
        self.errors.push(FieldError::new(path, message));
    }

    fn get(&self, field: &str) -> Option<&'a JsonValue> {
        self.object
            .and_then(|o| o.get(field))
            .filter(|v| !v.is_null())
    }

    fn text(&mut self, field: &str, max: usize, required: bool) -> Option<&'a str> {
        let Some(value) = self.get(field) else {
            if required && self.object.is_some() {
                self.fail(field, "is required");
            }
            return None;
        };
        let Some(text) = value.as_str() else {
            self.fail(field, "must be a string");
            return None;
        };
        if required && text.trim().is_empty() {
            self.fail(field, "must not be blank");
            return None;
        }
        let len = text.chars().count();
        if len > max {
            self.fail(field, format!("must be at most {} characters (got {})", max, len));
            return None;
        }
        Some(text)
    }

    pub(crate) fn required_text(&mut self, field: &str, max: usize) {
        self.text(field, max, true);
    }

    pub(crate) fn optional_text(&mut self, field: &str, max: usize) {
        self.text(field, max, false);
    }

    pub(crate) fn media_ref(&mut self, field: &str, required: bool) {
        if let Some(text) = self.text(field, MAX_MEDIA_REF_LEN, required)
            && !is_media_ref(text)
        {
            self.fail(field, "must be an http(s) URL or a path starting with /");
        }
    }

    pub(crate) fn css_height(&mut self, field: &str) {
        if let Some(text) = self.text(field, 16, false)
            && !is_css_height(text)
        {
            self.fail(field, "must look like 100vh, 480px or 60%");
        }
    }

    pub(crate) fn optional_bool(&mut self, field: &str) {
        if let Some(value) = self.get(field)
            && !value.is_boolean()
        {
            self.fail(field, "must be true or false");
        }
    }

    pub(crate) fn choice(&mut self, field: &str, options: &[&str], required: bool) {
        if let Some(text) = self.text(field, 32, required)
            && !options.contains(&text)
        {
            self.fail(field, format!("must be one of: {}", options.join(", ")));
        }
    }

    pub(crate) fn optional_int(&mut self, field: &str, min: i64, max: i64) {
        let Some(value) = self.get(field) else {
            return;
        };
        match value.as_i64() {
            Some(n) if (min..=max).contains(&n) => {}
            Some(_) => self.fail(field, format!("must be between {} and {}", min, max)),
            None => self.fail(field, "must be an integer"),
        }
    }

    /// Check an optional nested object with its own schema.
    pub(crate) fn optional_object(&mut self, field: &str, check: impl FnOnce(&mut PayloadChecker<'a>)) {
        let Some(value) = self.get(field) else {
            return;
        };
        if !value.is_object() {
            self.fail(field, "must be an object");
            return;
        }
        let mut nested = Self::nested_at(value, format!("{}.", self.path(field)));
        check(&mut nested);
        self.errors.append(&mut nested.errors);
    }

    /// Check an optional list of short strings.
    pub(crate) fn string_list(&mut self, field: &str, max_items: usize, item_max: usize) {
        let Some(value) = self.get(field) else {
            return;
        };
        let Some(items) = value.as_array() else {
            self.fail(field, "must be a list");
            return;
        };
        if items.len() > max_items {
            self.fail(field, format!("must have at most {} items", max_items));
        }
        for (i, item) in items.iter().enumerate() {
            let item_field = format!("{}[{}]", field, i);
            match item.as_str() {
                None => self.fail(&item_field, "must be a string"),
                Some(text) if text.trim().is_empty() => self.fail(&item_field, "must not be blank"),
                Some(text) if text.chars().count() > item_max => {
                    self.fail(&item_field, format!("must be at most {} characters", item_max))
                }
                Some(_) => {}
            }
        }
    }

    /// Check a required list of objects, each with its own schema.
    pub(crate) fn object_list(
        &mut self,
        field: &str,
        min_items: usize,
        max_items: usize,
        check: impl Fn(&mut PayloadChecker<'a>),
    ) {
        let Some(value) = self.get(field) else {
            if self.object.is_some() {
                self.fail(field, "is required");
            }
            return;
        };
        let Some(items) = value.as_array() else {
            self.fail(field, "must be a list");
            return;
        };
        if items.len() < min_items || items.len() > max_items {
            self.fail(
                field,
                format!("must have between {} and {} items", min_items, max_items),
            );
        }
        for (i, item) in items.iter().enumerate() {
            let item_path = format!("{}[{}]", self.path(field), i);
            if !item.is_object() {
                self.errors.push(FieldError::new(item_path, "must be an object"));
                continue;
            }
            let mut nested = Self::nested_at(item, format!("{}.", item_path));
            check(&mut nested);
            self.errors.append(&mut nested.errors);
        }
    }

    pub(crate) fn finish(self) -> Vec<FieldError> {
        self.errors
    }
}
