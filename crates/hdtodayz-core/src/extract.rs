//! Field extractors
//!
//! A field is described by an ordered list of [`Candidate`]s. Each candidate
//! names a CSS selector and where to read the value from (visible text or an
//! attribute). Extraction tries the candidates in order and the first one
//! that yields a non-empty value wins; a coercion then turns that value into
//! the field's type. Nothing in here returns an error: a missing node, an
//! invalid selector or an unparseable number all end up as `None`.

use regex::Regex;
use scraper::{ElementRef, Selector};
use serde::{Deserialize, Serialize};

use crate::url::absolutize;

/// Where a candidate reads its value from
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Source {
    /// Whitespace-normalized visible text of the node
    #[default]
    Text,
    /// Value of the named attribute
    Attr(String),
}

/// One way of locating a field inside a node
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    /// CSS selector matched against descendants of the scope node
    pub selector: String,

    /// Only keep matched nodes whose text contains this label.
    /// Stands in for the non-standard `:contains()` pseudo-class.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    /// Descendant selector applied to the nodes left after the label filter
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inner: Option<String>,

    #[serde(default)]
    pub source: Source,
}

impl Candidate {
    /// Reads the visible text of the first node matching `selector`
    pub fn text(selector: impl Into<String>) -> Self {
        Self {
            selector: selector.into(),
            label: None,
            inner: None,
            source: Source::Text,
        }
    }

    /// Reads `attr` from the first node matching `selector`
    pub fn attr(selector: impl Into<String>, attr: impl Into<String>) -> Self {
        Self {
            selector: selector.into(),
            label: None,
            inner: None,
            source: Source::Attr(attr.into()),
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn within(mut self, inner: impl Into<String>) -> Self {
        self.inner = Some(inner.into());
        self
    }
}

/// Ordered candidate list for one field
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldSpec(pub Vec<Candidate>);

impl FieldSpec {
    pub fn new(candidates: Vec<Candidate>) -> Self {
        Self(candidates)
    }

    /// A field the site does not provide
    pub fn none() -> Self {
        Self(Vec::new())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn candidates(&self) -> &[Candidate] {
        &self.0
    }
}

impl From<Candidate> for FieldSpec {
    fn from(candidate: Candidate) -> Self {
        Self(vec![candidate])
    }
}

/// Compiles a selector, logging instead of failing on bad input
pub(crate) fn compile(selector: &str) -> Option<Selector> {
    match Selector::parse(selector) {
        Ok(selector) => Some(selector),
        Err(e) => {
            tracing::debug!(selector, error = ?e, "skipping invalid selector");
            None
        }
    }
}

/// Selects all descendants of `scope` matching `selector`, in document order
///
/// An invalid selector matches nothing.
pub fn select_all<'a>(scope: ElementRef<'a>, selector: &str) -> Vec<ElementRef<'a>> {
    match compile(selector) {
        Some(selector) => scope.select(&selector).collect(),
        None => Vec::new(),
    }
}

/// Whitespace-normalized text of a node
pub fn node_text(node: ElementRef<'_>) -> String {
    node.text()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Reads a candidate's source from a node, `None` when empty
fn read(node: ElementRef<'_>, source: &Source) -> Option<String> {
    let value = match source {
        Source::Text => node_text(node),
        Source::Attr(name) => node.value().attr(name)?.trim().to_string(),
    };
    (!value.is_empty()).then_some(value)
}

/// Nodes a candidate points at, after the label filter and inner selector
fn candidate_nodes<'a>(scope: ElementRef<'a>, candidate: &Candidate) -> Vec<ElementRef<'a>> {
    let matched = select_all(scope, &candidate.selector)
        .into_iter()
        .filter(|node| match &candidate.label {
            Some(label) => node_text(*node).contains(label.as_str()),
            None => true,
        });

    match &candidate.inner {
        Some(inner) => match compile(inner) {
            Some(inner) => matched
                .flat_map(|node| node.select(&inner).collect::<Vec<_>>())
                .collect(),
            None => Vec::new(),
        },
        None => matched.collect(),
    }
}

/// Raw value of the first candidate yielding a non-empty string
pub fn extract_raw(scope: ElementRef<'_>, spec: &FieldSpec) -> Option<String> {
    spec.candidates().iter().find_map(|candidate| {
        candidate_nodes(scope, candidate)
            .into_iter()
            .find_map(|node| read(node, &candidate.source))
    })
}

/// Extracts a field and applies `coerce` to the winning value
///
/// A failed coercion yields `None`; later candidates are not consulted.
pub fn extract<T>(
    scope: ElementRef<'_>,
    spec: &FieldSpec,
    coerce: impl FnOnce(&str) -> Option<T>,
) -> Option<T> {
    extract_raw(scope, spec).and_then(|value| coerce(&value))
}

pub fn extract_text(scope: ElementRef<'_>, spec: &FieldSpec) -> Option<String> {
    extract_raw(scope, spec)
}

/// Extracts a URL and resolves it against `base`
pub fn extract_url(scope: ElementRef<'_>, spec: &FieldSpec, base: &str) -> Option<String> {
    extract(scope, spec, |value| absolutize(base, value))
}

pub fn extract_year(scope: ElementRef<'_>, spec: &FieldSpec) -> Option<i32> {
    extract(scope, spec, coerce_year)
}

pub fn extract_rating(scope: ElementRef<'_>, spec: &FieldSpec) -> Option<u8> {
    extract(scope, spec, coerce_rating)
}

/// Extracts every value of a multi-valued field (e.g. genre tags)
///
/// The first candidate that yields at least one value wins. Values keep
/// document order with duplicates removed.
pub fn extract_all(scope: ElementRef<'_>, spec: &FieldSpec) -> Vec<String> {
    for candidate in spec.candidates() {
        let mut values: Vec<String> = Vec::new();
        for node in candidate_nodes(scope, candidate) {
            if let Some(value) = read(node, &candidate.source)
                && !values.contains(&value)
            {
                values.push(value);
            }
        }
        if !values.is_empty() {
            return values;
        }
    }
    Vec::new()
}

/// Parses a release year out of text like "Released: 2021-05-01"
///
/// Looks after the first `:` when there is one and takes the first
/// standalone four digit number.
pub fn coerce_year(text: &str) -> Option<i32> {
    let value = text.split_once(':').map_or(text, |(_, after)| after);
    let re = Regex::new(r"\b(\d{4})\b").ok()?;
    re.captures(value)?.get(1)?.as_str().parse().ok()
}

/// Parses a rating into the 0-100 scale
///
/// Ten-point ratings ("7.5") are scaled by ten, hundred-point ratings are
/// kept. Anything else, including non-numeric text, is `None`.
pub fn coerce_rating(text: &str) -> Option<u8> {
    let compact: String = text.chars().filter(|c| !c.is_whitespace()).collect();
    let value = compact.parse::<f64>().ok()?;
    if !value.is_finite() || value < 0.0 {
        return None;
    }

    let scaled = if value <= 10.0 {
        value * 10.0
    } else if value <= 100.0 {
        value
    } else {
        return None;
    };
    Some(scaled.round() as u8)
}
