//! URL normalization and same-origin filtering
//!
//! Every URL the crawler stores or compares has passed through
//! [`normalize`]: absolute, fragment-free, http or https. Same-origin
//! membership is decided by [`same_origin`].

mod domain;
mod normalize;

pub use domain::{extract_authority, same_origin};
pub use normalize::normalize;
