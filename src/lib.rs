//! Web template extensions for MiniJinja
//!
//! This library provides the front-end helpers a content-management site
//! needs in its templates: a component registry for JavaScript
//! bootstrapping, responsive `<img>`/`<picture>` markup with lazy-loading
//! placeholders, and internationalization lookups.
//!
//! # Example
//!
//! ```rust
//! use webtmpl::render;
//!
//! let id = render("{{ register_component('navigation') }}", ()).unwrap();
//! assert_eq!(id, "navigation-1");
//! ```

pub mod component;
pub mod engine;
pub mod image;
pub mod intl;
pub mod settings;

pub use component::{ComponentDescriptor, ComponentRegistry, ServiceCall};
pub use engine::WebExtensions;
pub use image::{Attributes, ImageConfig, ImageError, ImageRenderer, Media};
pub use intl::{EmbeddedLocales, LocaleProvider};
pub use settings::{Settings, SettingsError};

use minijinja::Environment;
use serde::Serialize;

/// Render a one-off template with default settings.
///
/// This is the quickest way to use the extensions. For anything beyond a
/// single render, build a [`WebExtensions`] instance and register it into
/// your own [`Environment`] so the component accumulator lives exactly as
/// long as the page render.
///
/// # Example
///
/// ```rust
/// use webtmpl::render;
///
/// let html = render(
///     "{{ get_image(media, '640x480') }}",
///     serde_json::json!({
///         "media": {
///             "title": "Sea",
///             "thumbnails": {"640x480": "/uploads/sea-640.jpg"},
///         }
///     }),
/// ).unwrap();
/// assert_eq!(html, r#"<img alt="Sea" title="Sea" src="/uploads/sea-640.jpg">"#);
/// ```
pub fn render(template: &str, context: impl Serialize) -> Result<String, minijinja::Error> {
    render_with_settings(template, context, Settings::default())
}

/// Render a one-off template with custom settings.
///
/// # Example
///
/// ```rust
/// use webtmpl::{render_with_settings, Settings};
///
/// let settings = Settings::from_str("[images]\nplaceholder_path = '/ph'").unwrap();
/// let html = render_with_settings(
///     "{{ get_lazy_image(media, '640x480') }}",
///     serde_json::json!({
///         "media": {"thumbnails": {"640x480": "/uploads/sea-640.jpg"}}
///     }),
///     settings,
/// ).unwrap();
/// assert!(html.contains(r#"src="/ph/640x480.svg""#));
/// assert!(html.contains(r#"data-src="/uploads/sea-640.jpg""#));
/// ```
pub fn render_with_settings(
    template: &str,
    context: impl Serialize,
    settings: Settings,
) -> Result<String, minijinja::Error> {
    let extensions = WebExtensions::new(settings);
    let mut env = Environment::new();
    extensions.register(&mut env);
    env.render_str(template, context)
}
