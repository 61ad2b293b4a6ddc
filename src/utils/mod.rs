//! Utility functions for URL validation, template parsing, and token generation.
//!
//! This module provides helper functions used across the application:
//!
//! - [`url_validation`] - Absolute-URL checks for playground URL prefixes
//! - [`url_template`] - `{...}` placeholder extraction from URL templates
//! - [`token_generator`] - API token generation
//! - [`db_error`] - Database error classification

pub mod db_error;
pub mod token_generator;
pub mod url_template;
pub mod url_validation;
