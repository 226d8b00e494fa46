//! HTTP middleware.
//!
//! - [`case_converter::convert_case`] -- camelCase on the wire, snake_case in handlers.

pub mod case_converter;
