//! Kernel utilities shared across slices.
//!
//! Keep this crate lightweight: configuration loading, identifiers, timestamps, input
//! validation and, behind the `server` feature, the HTTP plumbing every slice uses
//! (state registry, error mapping, extractors, pagination, health).
//!
//! ## ID generation
//! Use `safe_nanoid!` for URL-safe, unambiguous record keys:
//! ```rust
//! # use atelier_kernel::safe_nanoid;
//! let id = safe_nanoid!();
//! assert_eq!(id.len(), 12);
//! ```
extern crate self as atelier_kernel;

pub mod config;
pub mod ids;
pub mod security;
#[cfg(feature = "server")]
pub mod server;
pub mod time;
pub mod validation;

// Alphabet excludes visually ambiguous characters (I, O, l, 0, 1).
pub const SAFE_ALPHABET: &[char; 55] = &[
    '2', '3', '4', '5', '6', '7', '8', '9', 'A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'J', 'K', 'L',
    'M', 'N', 'P', 'Q', 'R', 'S', 'T', 'U', 'V', 'W', 'X', 'Y', 'Z', 'a', 'b', 'c', 'd', 'e', 'f',
    'g', 'h', 'j', 'k', 'm', 'n', 'p', 'q', 'r', 's', 't', 'u', 'v', 'w', 'x', 'y', 'z',
];

pub use atelier_domain as domain;
pub use nanoid::nanoid;

/// Generates an unambiguous `NanoID` (no visually confusing characters).
#[macro_export]
macro_rules! safe_nanoid {
    () => {
        $crate::nanoid!(12, $crate::SAFE_ALPHABET)
    };
    ($size:expr) => {
        $crate::nanoid!($size, $crate::SAFE_ALPHABET)
    };
}
