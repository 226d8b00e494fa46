//! Row structs, request DTOs and [`Resource`](crate::resource::Resource)
//! bindings for each catalog table.

pub mod brand;
pub mod category;
pub mod media;

use std::borrow::Cow;

use catalog_core::slug::slugify;
use validator::ValidationError;

/// Names that slugify to nothing (`日本`, `&&&`) would all share the empty
/// slug, so they are rejected up front.
pub(crate) fn validate_sluggable(name: &str) -> Result<(), ValidationError> {
    if slugify(name).is_empty() {
        let mut error = ValidationError::new("slug");
        error.message = Some(Cow::Borrowed("name must contain at least one ASCII letter or digit"));
        return Err(error);
    }
    Ok(())
}
