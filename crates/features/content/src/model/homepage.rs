use super::{MAX_TEXT_CHARS, MAX_TITLE_CHARS};
use atelier_derive::api_model;
use atelier_kernel::time::millis;
use atelier_kernel::validation::{self, MAX_URL_CHARS, ValidationError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const MAX_ELEMENTS: usize = 50;

/// What an element's `value` holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "server", derive(utoipa::ToSchema))]
#[serde(rename_all = "snake_case")]
pub enum ElementKind {
    Text,
    Image,
    Link,
    /// A product id.
    Product,
    /// A collection or category slug.
    Collection,
}

#[api_model(stored)]
#[derive(Clone, PartialEq, Eq)]
pub struct ContentElement {
    pub kind: ElementKind,
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default)]
    pub position: i32,
}

/// One section of the homepage, addressed by its slug.
#[api_model(stored)]
#[derive(Clone, PartialEq, Eq)]
pub struct HomepageContent {
    /// Slug; also the record key.
    pub section: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    #[serde(default)]
    pub elements: Vec<ContentElement>,
    pub position: i32,
    pub is_active: bool,
    #[serde(with = "millis")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "millis")]
    pub updated_at: DateTime<Utc>,
}

impl HomepageContent {
    /// Orders elements by `position`; ties keep their stored order.
    #[must_use]
    pub fn sorted(mut self) -> Self {
        self.elements.sort_by_key(|element| element.position);
        self
    }
}

#[api_model]
pub struct ContentElementInput {
    pub kind: ElementKind,
    pub value: String,
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub position: i32,
}

/// Body of `PUT /api/admin/homepage/{section}`.
#[api_model]
pub struct HomepageContentInput {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub subtitle: Option<String>,
    #[serde(default)]
    pub elements: Vec<ContentElementInput>,
    #[serde(default)]
    pub position: i32,
    #[serde(default = "active")]
    pub is_active: bool,
}

const fn active() -> bool {
    true
}

impl ContentElementInput {
    fn validate(self) -> Result<ContentElement, ValidationError> {
        let value = match self.kind {
            ElementKind::Image => validation::link("elements.value", &self.value)?,
            ElementKind::Product | ElementKind::Collection => {
                validation::required("elements.value", &self.value, MAX_TITLE_CHARS)?
            },
            ElementKind::Text | ElementKind::Link => {
                validation::required("elements.value", &self.value, MAX_URL_CHARS)?
            },
        };
        let link = validation::optional_link("elements.link", self.link.as_deref())?;
        if self.kind == ElementKind::Link && link.is_none() {
            return Err(ValidationError::invalid("elements.link", "is required for link elements"));
        }

        Ok(ContentElement {
            kind: self.kind,
            value,
            link,
            image_url: validation::optional_link("elements.imageUrl", self.image_url.as_deref())?,
            position: self.position,
        })
    }
}

impl HomepageContentInput {
    /// # Errors
    /// Oversized text, too many elements, or an invalid element.
    pub fn into_section(
        self,
        section: String,
        created_at: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> Result<HomepageContent, ValidationError> {
        validation::max_items("elements", self.elements.len(), MAX_ELEMENTS)?;
        let elements =
            self.elements.into_iter().map(ContentElementInput::validate).collect::<Result<_, _>>()?;

        Ok(HomepageContent {
            section,
            title: validation::optional("title", self.title.as_deref(), MAX_TITLE_CHARS)?,
            subtitle: validation::optional("subtitle", self.subtitle.as_deref(), MAX_TEXT_CHARS)?,
            elements,
            position: self.position,
            is_active: self.is_active,
            created_at,
            updated_at: now,
        }
        .sorted())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn element(kind: ElementKind, value: &str, position: i32) -> ContentElementInput {
        ContentElementInput { kind, value: value.to_owned(), link: None, image_url: None, position }
    }

    #[test]
    fn elements_are_stored_in_position_order() {
        let now = atelier_kernel::time::now();
        let input = HomepageContentInput {
            title: Some("New arrivals".to_owned()),
            subtitle: None,
            elements: vec![
                element(ElementKind::Product, "p-2", 2),
                element(ElementKind::Text, "Fresh from Paris", 0),
                element(ElementKind::Image, "https://cdn.atelier.example/a.jpg", 1),
            ],
            position: 0,
            is_active: true,
        };

        let section = input.into_section("arrivals".to_owned(), now, now).unwrap();
        let kinds: Vec<ElementKind> = section.elements.iter().map(|e| e.kind).collect();
        assert_eq!(kinds, vec![ElementKind::Text, ElementKind::Image, ElementKind::Product]);
    }

    #[test]
    fn link_elements_need_a_target() {
        let now = atelier_kernel::time::now();
        let input = HomepageContentInput {
            title: None,
            subtitle: None,
            elements: vec![element(ElementKind::Link, "Shop bags", 0)],
            position: 0,
            is_active: true,
        };
        let err = input.into_section("links".to_owned(), now, now).unwrap_err();
        assert_eq!(err.to_string(), "elements.link is required for link elements");
    }
}
