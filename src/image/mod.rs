//! Responsive image markup
//!
//! Builds `<img>` and `<picture>` tags from a media descriptor whose
//! `thumbnails` mapping names the available format variants. Attribute values
//! reference thumbnails by format key (`src: "640x480"`); the builder swaps
//! the keys for the real URLs. The lazy variant renders placeholder assets
//! into `src`/`srcset` and moves the real URLs to `data-src`/`data-srcset`
//! for a client-side lazy loader.

pub mod config;
pub mod markup;

pub use config::ImageConfig;
pub use markup::{Attributes, ImageError, ImageRenderer, Media};
