use serde::{Deserialize, Deserializer, Serialize};

/// A book record as submitted by a form or API client.
///
/// Every field is optional on the wire so that missing input reaches the
/// validator instead of failing deserialization.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BookInput {
    /// Title of the book
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Author of the book
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    /// Hyphenated ISBN-10 or ISBN-13
    #[serde(skip_serializing_if = "Option::is_none")]
    pub isbn: Option<String>,
    /// Price as entered, kept as text
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient_text"
    )]
    pub price: Option<String>,
    /// Publication date, `YYYY-MM-DD`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub publish_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<BookDetail>,
}

/// Detail record nested under a book.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BookDetail {
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient_text"
    )]
    pub page_count: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover_image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub publisher: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub edition: Option<String>,
}

impl BookDetail {
    /// True when no field carries any non-whitespace text.
    pub fn is_empty(&self) -> bool {
        [
            &self.page_count,
            &self.cover_image_url,
            &self.description,
            &self.language,
            &self.publisher,
            &self.edition,
        ]
        .into_iter()
        .all(|value| value.as_deref().map_or(true, |text| text.trim().is_empty()))
    }
}

/// A stored book.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Book {
    /// Unique identifier for the book
    pub id: String,
    #[serde(flatten)]
    pub record: BookInput,
}

/// Live validation request for a single form input.
#[derive(Debug, Clone, Deserialize)]
pub struct FieldCheck {
    pub field: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub value: Option<String>,
}

/// Accept numeric inputs either as JSON strings or JSON numbers.
fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum TextOrNumber {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(
        Option::<TextOrNumber>::deserialize(deserializer)?.map(|value| match value {
            TextOrNumber::Text(text) => text,
            TextOrNumber::Number(number) => number.to_string(),
        }),
    )
}
