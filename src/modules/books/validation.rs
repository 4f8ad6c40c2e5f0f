//! Field and record validation for book submissions.
//!
//! Every check is a pure function returning a [`ValidationResult`]; nothing here
//! logs, panics, or keeps state. The same name → validator table backs both
//! whole-record checks ([`validate_book`]) and live single-field checks
//! ([`validate_field`]).

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use super::models::{BookDetail, BookInput};

/// Field identifiers, as used by form inputs and the wire format.
pub mod fields {
    pub const TITLE: &str = "title";
    pub const AUTHOR: &str = "author";
    pub const ISBN: &str = "isbn";
    pub const PRICE: &str = "price";
    pub const PUBLISH_DATE: &str = "publishDate";
    pub const DETAIL: &str = "detail";
    pub const PAGE_COUNT: &str = "pageCount";
    pub const COVER_IMAGE_URL: &str = "coverImageUrl";
}

/// Diagnostics shown to the user.
pub mod messages {
    pub const RECORD_REQUIRED: &str = "record data is required";
    pub const UNKNOWN_FIELD: &str = "unknown field";

    pub const TITLE_REQUIRED: &str = "Title is required";
    pub const AUTHOR_REQUIRED: &str = "Author is required";
    pub const ISBN_REQUIRED: &str = "ISBN is required";
    pub const ISBN_FORMAT: &str = "ISBN format is invalid (e.g. 978-3-16-148410-0)";
    pub const PRICE_REQUIRED: &str = "Price is required";
    pub const PRICE_POSITIVE: &str = "Price must be a number greater than 0";
    pub const PUBLISH_DATE_REQUIRED: &str = "Publish date is required";
    pub const PUBLISH_DATE_FORMAT: &str = "Publish date must use the YYYY-MM-DD format";
    pub const PAGE_COUNT_REQUIRED: &str = "Page count is required";
    pub const PAGE_COUNT_FORMAT: &str = "Page count must be a positive whole number";
    pub const COVER_IMAGE_URL_REQUIRED: &str = "Cover image URL is required";
    pub const COVER_IMAGE_URL_FORMAT: &str = "Cover image URL is invalid";

    // Declared for the form, never enforced by record validation.
    pub const DESCRIPTION_REQUIRED: &str = "Description is required";
    pub const LANGUAGE_REQUIRED: &str = "Language is required";
    pub const PUBLISHER_REQUIRED: &str = "Publisher is required";
    pub const EDITION_REQUIRED: &str = "Edition is required";
}

static ISBN_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:97[89]-)?[0-9]{1,7}-[0-9]{1,7}-[0-9]{1,7}-[0-9X]{1,7}$")
        .expect("ISBN_PATTERN must be a valid regex")
});

static PAGE_COUNT_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[1-9][0-9]*$").expect("PAGE_COUNT_PATTERN must be a valid regex"));

static URL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:https?://)?(?:[A-Za-z0-9_-]+\.)+[A-Za-z0-9_-]+(?:/\S*)?$")
        .expect("URL_PATTERN must be a valid regex")
});

static DATE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}$").expect("DATE_PATTERN must be a valid regex")
});

/// Outcome of a validation check.
///
/// When `is_valid` is false, `message` is always set. `field` names the
/// offending input and is absent only when the whole record is missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    pub is_valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<&'static str>,
}

impl ValidationResult {
    pub const fn valid() -> Self {
        Self {
            is_valid: true,
            message: None,
            field: None,
        }
    }

    pub const fn invalid(field: &'static str, message: &'static str) -> Self {
        Self {
            is_valid: false,
            message: Some(message),
            field: Some(field),
        }
    }

    /// The record itself was not supplied.
    pub const fn record_missing() -> Self {
        Self {
            is_valid: false,
            message: Some(messages::RECORD_REQUIRED),
            field: None,
        }
    }

    /// Passing result for a field no validator is registered for.
    pub const fn unknown_field() -> Self {
        Self {
            is_valid: true,
            message: Some(messages::UNKNOWN_FIELD),
            field: None,
        }
    }
}

/// A single-field check over a raw, possibly absent, text value.
pub type FieldValidator = fn(Option<&str>) -> ValidationResult;

/// The required rule: absent, or nothing left after trimming.
pub fn is_blank(value: Option<&str>) -> bool {
    value.map_or(true, |text| text.trim().is_empty())
}

fn required(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|text| !text.is_empty())
}

fn required_matching(
    value: Option<&str>,
    field: &'static str,
    required_message: &'static str,
    pattern: &Regex,
    format_message: &'static str,
) -> ValidationResult {
    match required(value) {
        None => ValidationResult::invalid(field, required_message),
        Some(text) if !pattern.is_match(text) => ValidationResult::invalid(field, format_message),
        Some(_) => ValidationResult::valid(),
    }
}

/// Individual field validators.
pub mod validators {
    use super::*;

    pub fn title(value: Option<&str>) -> ValidationResult {
        if is_blank(value) {
            return ValidationResult::invalid(fields::TITLE, messages::TITLE_REQUIRED);
        }
        ValidationResult::valid()
    }

    pub fn author(value: Option<&str>) -> ValidationResult {
        if is_blank(value) {
            return ValidationResult::invalid(fields::AUTHOR, messages::AUTHOR_REQUIRED);
        }
        ValidationResult::valid()
    }

    pub fn isbn(value: Option<&str>) -> ValidationResult {
        required_matching(
            value,
            fields::ISBN,
            messages::ISBN_REQUIRED,
            &ISBN_PATTERN,
            messages::ISBN_FORMAT,
        )
    }

    /// The amount must parse as a finite number strictly above zero.
    pub fn price(value: Option<&str>) -> ValidationResult {
        let Some(text) = required(value) else {
            return ValidationResult::invalid(fields::PRICE, messages::PRICE_REQUIRED);
        };
        match text.parse::<f64>() {
            Ok(amount) if amount.is_finite() && amount > 0.0 => ValidationResult::valid(),
            _ => ValidationResult::invalid(fields::PRICE, messages::PRICE_POSITIVE),
        }
    }

    pub fn publish_date(value: Option<&str>) -> ValidationResult {
        required_matching(
            value,
            fields::PUBLISH_DATE,
            messages::PUBLISH_DATE_REQUIRED,
            &DATE_PATTERN,
            messages::PUBLISH_DATE_FORMAT,
        )
    }

    pub fn page_count(value: Option<&str>) -> ValidationResult {
        required_matching(
            value,
            fields::PAGE_COUNT,
            messages::PAGE_COUNT_REQUIRED,
            &PAGE_COUNT_PATTERN,
            messages::PAGE_COUNT_FORMAT,
        )
    }

    pub fn cover_image_url(value: Option<&str>) -> ValidationResult {
        required_matching(
            value,
            fields::COVER_IMAGE_URL,
            messages::COVER_IMAGE_URL_REQUIRED,
            &URL_PATTERN,
            messages::COVER_IMAGE_URL_FORMAT,
        )
    }

    /// Presence check on a whole detail record.
    ///
    /// Reports the publish-date message, matching what the form has always shown.
    pub fn detail(value: Option<&BookDetail>) -> ValidationResult {
        match value {
            Some(detail) if !detail.is_empty() => ValidationResult::valid(),
            _ => ValidationResult::invalid(fields::DETAIL, messages::PUBLISH_DATE_REQUIRED),
        }
    }

    /// Raw-text form of [`detail`] for the live field path.
    pub fn detail_text(value: Option<&str>) -> ValidationResult {
        if is_blank(value) {
            return ValidationResult::invalid(fields::DETAIL, messages::PUBLISH_DATE_REQUIRED);
        }
        ValidationResult::valid()
    }
}

/// Name → validator table shared by record and live validation.
const FIELD_VALIDATORS: &[(&str, FieldValidator)] = &[
    (fields::TITLE, validators::title),
    (fields::AUTHOR, validators::author),
    (fields::ISBN, validators::isbn),
    (fields::PRICE, validators::price),
    (fields::PUBLISH_DATE, validators::publish_date),
    (fields::DETAIL, validators::detail_text),
    (fields::PAGE_COUNT, validators::page_count),
    (fields::COVER_IMAGE_URL, validators::cover_image_url),
];

/// Look up the validator registered for `name`.
pub fn validator_for(name: &str) -> Option<FieldValidator> {
    FIELD_VALIDATORS
        .iter()
        .find(|(field, _)| *field == name)
        .map(|(_, validator)| *validator)
}

/// Names of every field with a registered validator.
pub fn known_fields() -> impl Iterator<Item = &'static str> {
    FIELD_VALIDATORS.iter().map(|(field, _)| *field)
}

/// Run checks in order and stop at the first failure.
fn first_failure<'a, I>(checks: I) -> Option<ValidationResult>
where
    I: IntoIterator<Item = (&'static str, Option<&'a str>)>,
{
    checks
        .into_iter()
        .filter_map(|(field, value)| validator_for(field).map(|check| check(value)))
        .find(|result| !result.is_valid)
}

/// Validate a whole record before submission.
///
/// Gates on `title` and `author`, then, when a detail record is attached, on
/// its `pageCount` and `coverImageUrl`. Other fields are checked only through
/// [`validate_field`].
pub fn validate_book(record: Option<&BookInput>) -> ValidationResult {
    let Some(book) = record else {
        return ValidationResult::record_missing();
    };

    let top_level = [
        (fields::TITLE, book.title.as_deref()),
        (fields::AUTHOR, book.author.as_deref()),
    ];
    if let Some(failure) = first_failure(top_level) {
        return failure;
    }

    if let Some(detail) = &book.detail {
        let nested = [
            (fields::PAGE_COUNT, detail.page_count.as_deref()),
            (fields::COVER_IMAGE_URL, detail.cover_image_url.as_deref()),
        ];
        if let Some(failure) = first_failure(nested) {
            return failure;
        }
    }

    ValidationResult::valid()
}

/// Validate one named field, as a form does on input or blur.
///
/// Unknown names pass with an informational message; only `is_valid` decides.
pub fn validate_field(name: &str, value: Option<&str>) -> ValidationResult {
    match validator_for(name) {
        Some(validator) => validator(value),
        None => ValidationResult::unknown_field(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn book(title: &str, author: &str) -> BookInput {
        BookInput {
            title: Some(title.to_string()),
            author: Some(author.to_string()),
            ..BookInput::default()
        }
    }

    fn detail(page_count: Option<&str>, cover: Option<&str>) -> BookDetail {
        BookDetail {
            page_count: page_count.map(str::to_string),
            cover_image_url: cover.map(str::to_string),
            ..BookDetail::default()
        }
    }

    #[test]
    fn missing_record_has_no_field() {
        let result = validate_book(None);
        assert!(!result.is_valid);
        assert_eq!(result.message, Some(messages::RECORD_REQUIRED));
        assert_eq!(result.field, None);
    }

    #[test]
    fn blank_title_or_author_fails_with_matching_field() {
        for blank in ["", "   ", "\t\n"] {
            let result = validate_book(Some(&book(blank, "Ursula K. Le Guin")));
            assert_eq!(
                result,
                ValidationResult::invalid(fields::TITLE, messages::TITLE_REQUIRED)
            );

            let result = validate_book(Some(&book("The Dispossessed", blank)));
            assert_eq!(
                result,
                ValidationResult::invalid(fields::AUTHOR, messages::AUTHOR_REQUIRED)
            );
        }

        let absent = BookInput {
            title: Some("The Dispossessed".to_string()),
            ..BookInput::default()
        };
        assert_eq!(validate_book(Some(&absent)).field, Some(fields::AUTHOR));
    }

    #[test]
    fn title_failure_short_circuits_later_checks() {
        let mut record = book("", "");
        record.detail = Some(detail(Some("0"), Some("not a url")));

        let result = validate_book(Some(&record));
        assert_eq!(result.field, Some(fields::TITLE));
    }

    #[test]
    fn detail_page_count_is_checked_before_cover() {
        let mut record = book("Dune", "Frank Herbert");

        for bad in [None, Some(""), Some("  "), Some("0"), Some("012"), Some("12a"), Some("-3")] {
            record.detail = Some(detail(bad, Some("also not a url")));
            let result = validate_book(Some(&record));
            assert!(!result.is_valid, "page count {bad:?} should fail");
            assert_eq!(result.field, Some(fields::PAGE_COUNT));
        }

        record.detail = Some(detail(Some("412"), Some("not a url")));
        assert_eq!(
            validate_book(Some(&record)),
            ValidationResult::invalid(fields::COVER_IMAGE_URL, messages::COVER_IMAGE_URL_FORMAT)
        );

        record.detail = Some(detail(Some("412"), None));
        assert_eq!(
            validate_book(Some(&record)),
            ValidationResult::invalid(
                fields::COVER_IMAGE_URL,
                messages::COVER_IMAGE_URL_REQUIRED
            )
        );
    }

    #[test]
    fn record_ignores_unenforced_fields() {
        let mut record = book("Dune", "Frank Herbert");
        record.isbn = Some("1234".to_string());
        record.price = Some("-1".to_string());
        record.publish_date = Some("yesterday".to_string());
        assert_eq!(validate_book(Some(&record)), ValidationResult::valid());

        record.detail = Some(detail(Some("412"), Some("https://covers.example.org/dune.jpg")));
        assert_eq!(validate_book(Some(&record)), ValidationResult::valid());
    }

    #[test]
    fn unknown_field_passes_with_message() {
        let result = validate_field("nonexistent", Some("anything"));
        assert!(result.is_valid);
        assert_eq!(result.message, Some(messages::UNKNOWN_FIELD));
        assert!(validate_field("edition", None).is_valid);
    }

    #[test]
    fn isbn_field() {
        assert!(validate_field("isbn", Some("978-3-16-148410-0")).is_valid);
        assert!(validate_field("isbn", Some("  0-306-40615-2 ")).is_valid);
        assert!(validate_field("isbn", Some("0-8044-2957-X")).is_valid);
        assert_eq!(
            validate_field("isbn", Some("1234")),
            ValidationResult::invalid(fields::ISBN, messages::ISBN_FORMAT)
        );
        assert_eq!(
            validate_field("isbn", Some("9783161484100")),
            ValidationResult::invalid(fields::ISBN, messages::ISBN_FORMAT)
        );
        assert_eq!(
            validate_field("isbn", Some(" ")),
            ValidationResult::invalid(fields::ISBN, messages::ISBN_REQUIRED)
        );
    }

    #[test]
    fn publish_date_field() {
        assert!(validate_field("publishDate", Some("2024-01-15")).is_valid);
        assert_eq!(
            validate_field("publishDate", Some("2024/01/15")),
            ValidationResult::invalid(fields::PUBLISH_DATE, messages::PUBLISH_DATE_FORMAT)
        );
        assert_eq!(
            validate_field("publishDate", None),
            ValidationResult::invalid(fields::PUBLISH_DATE, messages::PUBLISH_DATE_REQUIRED)
        );
    }

    #[test]
    fn cover_image_url_field() {
        assert!(validate_field("coverImageUrl", Some("http://example.com/x.jpg")).is_valid);
        assert!(validate_field("coverImageUrl", Some("covers.example.org")).is_valid);
        assert!(!validate_field("coverImageUrl", Some("not a url")).is_valid);
        assert!(!validate_field("coverImageUrl", Some("localhost")).is_valid);
    }

    #[test]
    fn price_requires_positive_amount() {
        for ok in ["12.50", "1", " 0.01 ", "1e2"] {
            assert!(validators::price(Some(ok)).is_valid, "{ok} should pass");
        }
        for bad in ["0", "-4", "abc", "NaN", "inf"] {
            assert_eq!(
                validators::price(Some(bad)),
                ValidationResult::invalid(fields::PRICE, messages::PRICE_POSITIVE),
                "{bad} should fail"
            );
        }
        assert_eq!(
            validators::price(Some("")),
            ValidationResult::invalid(fields::PRICE, messages::PRICE_REQUIRED)
        );
    }

    #[test]
    fn detail_presence_reuses_publish_date_message() {
        let failure = ValidationResult::invalid(fields::DETAIL, messages::PUBLISH_DATE_REQUIRED);
        assert_eq!(validators::detail(None), failure);
        assert_eq!(validators::detail(Some(&BookDetail::default())), failure);
        assert!(validators::detail(Some(&detail(Some("1"), None))).is_valid);
        assert_eq!(validate_field("detail", Some("")), failure);
    }

    #[test]
    fn validators_are_idempotent() {
        for name in known_fields() {
            for value in [None, Some(""), Some("978-3-16-148410-0"), Some("2024-01-15")] {
                assert_eq!(validate_field(name, value), validate_field(name, value));
            }
        }
        let record = book("", "x");
        assert_eq!(validate_book(Some(&record)), validate_book(Some(&record)));
    }

    #[test]
    fn serializes_without_absent_keys() {
        let json = serde_json::to_value(ValidationResult::valid()).unwrap();
        assert_eq!(json, serde_json::json!({ "isValid": true }));

        let json = serde_json::to_value(ValidationResult::invalid(
            fields::PAGE_COUNT,
            messages::PAGE_COUNT_FORMAT,
        ))
        .unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "isValid": false,
                "message": messages::PAGE_COUNT_FORMAT,
                "field": "pageCount"
            })
        );
    }
}
