//! Image and picture tag construction

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};

use serde::Deserialize;
use thiserror::Error;

use super::ImageConfig;

/// Errors that can occur while building image markup
#[derive(Debug, Error)]
pub enum ImageError {
    /// Lazy images need a placeholder base path at construction time
    #[error("no placeholder path configured, lazy images require one")]
    PlaceholderPathMissing,

    /// An attribute referenced a format key the media does not provide
    #[error("unknown thumbnail format: {key}")]
    UnknownThumbnail { key: String },
}

/// Media descriptor supplied by the content repository.
///
/// `thumbnails` maps format keys (`"640x480"`) to URLs. Extra fields on the
/// input are ignored during deserialization.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Media {
    #[serde(default)]
    pub thumbnails: BTreeMap<String, String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// Ordered attribute set for a single tag.
///
/// Keys keep their first-set position; setting an existing key replaces the
/// value in place.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Attributes(Vec<(String, String)>);

impl Attributes {
    /// Create an empty attribute set
    pub fn new() -> Self {
        Self::default()
    }

    /// Shorthand for `{src: <format>}`
    pub fn src(format: impl Into<String>) -> Self {
        Self(vec![("src".to_string(), format.into())])
    }

    /// Shorthand for `{srcset: <value>}`
    pub fn srcset(value: impl Into<String>) -> Self {
        Self(vec![("srcset".to_string(), value.into())])
    }

    /// Set a key, replacing an existing entry in place
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.0.iter_mut().find(|(existing, _)| *existing == key) {
            Some(entry) => entry.1 = value,
            None => self.0.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(existing, _)| existing == key)
            .map(|(_, value)| value.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(key, value)| (key.as_str(), value.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Attributes {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut attributes = Attributes::new();
        for (key, value) in iter {
            attributes.set(key, value);
        }
        attributes
    }
}

/// Builds image markup for one render.
///
/// The renderer only tracks whether a lazy image was requested, so a page
/// footer can decide whether to emit the lazy-loader script.
#[derive(Debug)]
pub struct ImageRenderer {
    config: ImageConfig,
    lazy_requested: AtomicBool,
}

impl ImageRenderer {
    /// Create a renderer from a configuration
    pub fn new(config: ImageConfig) -> Self {
        Self {
            config,
            lazy_requested: AtomicBool::new(false),
        }
    }

    /// Build an `<img>` tag, or a `<picture>` tag when `sources` is non-empty.
    ///
    /// Each sources entry is a `(media_query, attributes)` pair rendered as a
    /// `<source>` tag ahead of the fallback `<img>`. Empty attributes produce
    /// empty output.
    pub fn image(
        &self,
        media: &Media,
        attributes: &Attributes,
        sources: &[(String, Attributes)],
    ) -> Result<String, ImageError> {
        self.create(media, attributes, sources, None)
    }

    /// Lazy-loading variant of [`image`](Self::image).
    ///
    /// Placeholder URLs are rendered into `src`/`srcset` while the real
    /// thumbnail URLs move to `data-src`/`data-srcset`, and `lazyload` is
    /// appended to the `class` attribute. Media without thumbnails degrades
    /// to plain rendering.
    pub fn lazy_image(
        &self,
        media: &Media,
        attributes: &Attributes,
        sources: &[(String, Attributes)],
    ) -> Result<String, ImageError> {
        let placeholder_path = self
            .config
            .placeholder_path
            .as_deref()
            .ok_or(ImageError::PlaceholderPathMissing)?;

        self.lazy_requested.store(true, Ordering::Relaxed);

        let placeholders = placeholder_map(placeholder_path, &media.thumbnails);
        self.create(media, attributes, sources, placeholders.as_ref())
    }

    /// True once a lazy image was requested on this renderer
    pub fn has_lazy_image(&self) -> bool {
        self.lazy_requested.load(Ordering::Relaxed)
    }

    fn create(
        &self,
        media: &Media,
        attributes: &Attributes,
        sources: &[(String, Attributes)],
        placeholders: Option<&BTreeMap<String, String>>,
    ) -> Result<String, ImageError> {
        if attributes.is_empty() {
            return Ok(String::new());
        }

        let mut attributes = attributes.clone();
        if placeholders.is_some() {
            let class = attributes.get("class").unwrap_or("");
            attributes.set("class", format!("{class} lazyload").trim_start().to_string());
        }

        // The media title becomes the alt text; the title attribute prefers
        // the description and falls back to the alt text.
        let alt = media.title.clone().unwrap_or_default();
        let title = media
            .description
            .clone()
            .filter(|description| !description.is_empty())
            .unwrap_or_else(|| alt.clone());

        let mut merged = Attributes::new();
        merged.set("alt", alt);
        merged.set("title", title);
        for (key, value) in attributes.iter() {
            merged.set(key, value);
        }

        let img_tag = create_tag("img", &merged, &media.thumbnails, placeholders)?;

        if sources.is_empty() {
            return Ok(img_tag);
        }

        let mut source_tags = String::new();
        for (media_query, source_attributes) in sources {
            let mut merged = Attributes::new();
            merged.set("media", media_query.clone());
            for (key, value) in source_attributes.iter() {
                merged.set(key, value);
            }
            source_tags.push_str(&create_tag(
                "source",
                &merged,
                &media.thumbnails,
                placeholders,
            )?);
        }

        Ok(format!("<picture>{source_tags}{img_tag}</picture>"))
    }
}

/// Build one tag, resolving `src`/`srcset` format keys through the thumbnail
/// mapping. With placeholders, the placeholder URL takes the visible
/// attribute and the real URL moves to the matching `data-` attribute.
fn create_tag(
    tag: &str,
    attributes: &Attributes,
    thumbnails: &BTreeMap<String, String>,
    placeholders: Option<&BTreeMap<String, String>>,
) -> Result<String, ImageError> {
    let mut output = String::new();

    for (key, value) in attributes.iter() {
        match key {
            "src" => {
                let thumbnail = lookup(thumbnails, value)?;
                if let Some(placeholders) = placeholders {
                    push_attribute(&mut output, "src", lookup(placeholders, value)?);
                    push_attribute(&mut output, "data-src", thumbnail);
                } else {
                    push_attribute(&mut output, "src", thumbnail);
                }
            }
            "srcset" => {
                let replaced = replace_srcset(value, thumbnails)?;
                if let Some(placeholders) = placeholders {
                    push_attribute(&mut output, "srcset", &replace_srcset(value, placeholders)?);
                    push_attribute(&mut output, "data-srcset", &replaced);
                } else {
                    push_attribute(&mut output, "srcset", &replaced);
                }
            }
            _ => push_attribute(&mut output, key, value),
        }
    }

    Ok(format!("<{tag}{output}>"))
}

fn push_attribute(output: &mut String, key: &str, value: &str) {
    output.push(' ');
    output.push_str(key);
    output.push_str("=\"");
    output.push_str(&escape_attribute(value));
    output.push('"');
}

/// Replace each format key in a srcset value with its thumbnail URL,
/// keeping the width/density descriptors verbatim
fn replace_srcset(
    value: &str,
    thumbnails: &BTreeMap<String, String>,
) -> Result<String, ImageError> {
    let mut entries = Vec::new();

    for entry in value.split(',') {
        let entry = entry.trim();
        let (format, descriptor) = match entry.split_once(' ') {
            Some((format, descriptor)) => (format, Some(descriptor)),
            None => (entry, None),
        };

        let thumbnail = lookup(thumbnails, format)?;
        entries.push(match descriptor {
            Some(descriptor) => format!("{thumbnail} {descriptor}"),
            None => thumbnail.to_string(),
        });
    }

    Ok(entries.join(", "))
}

fn lookup<'a>(map: &'a BTreeMap<String, String>, key: &str) -> Result<&'a str, ImageError> {
    map.get(key)
        .map(String::as_str)
        .ok_or_else(|| ImageError::UnknownThumbnail {
            key: key.to_string(),
        })
}

/// Placeholder URLs for the current thumbnail key set, `None` when the media
/// has no thumbnails
fn placeholder_map(
    base: &str,
    thumbnails: &BTreeMap<String, String>,
) -> Option<BTreeMap<String, String>> {
    if thumbnails.is_empty() {
        return None;
    }

    Some(
        thumbnails
            .keys()
            .map(|key| (key.clone(), format!("{base}{key}.svg")))
            .collect(),
    )
}

/// Escape special characters in attribute values
fn escape_attribute(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn media() -> Media {
        Media {
            thumbnails: BTreeMap::from([
                ("50x50".to_string(), "a.jpg".to_string()),
                ("100x100".to_string(), "b.jpg".to_string()),
            ]),
            title: Some("Sea".to_string()),
            description: Some("Waves at dusk".to_string()),
        }
    }

    fn renderer() -> ImageRenderer {
        ImageRenderer::new(ImageConfig::new())
    }

    fn lazy_renderer() -> ImageRenderer {
        ImageRenderer::new(ImageConfig::new().with_placeholder_path("/ph/"))
    }

    #[test]
    fn test_img_tag() {
        let html = renderer()
            .image(&media(), &Attributes::src("50x50"), &[])
            .unwrap();
        assert_eq!(html, r#"<img alt="Sea" title="Waves at dusk" src="a.jpg">"#);
    }

    #[test]
    fn test_title_falls_back_to_alt() {
        let mut media = media();
        media.description = None;

        let html = renderer()
            .image(&media, &Attributes::src("50x50"), &[])
            .unwrap();
        assert_eq!(html, r#"<img alt="Sea" title="Sea" src="a.jpg">"#);
    }

    #[test]
    fn test_caller_attributes_override_seeded_ones() {
        let attributes = Attributes::from_iter([("src", "50x50"), ("alt", "Override")]);
        let html = renderer().image(&media(), &attributes, &[]).unwrap();
        assert_eq!(
            html,
            r#"<img alt="Override" title="Waves at dusk" src="a.jpg">"#
        );
    }

    #[test]
    fn test_empty_attributes_render_nothing() {
        let html = renderer().image(&media(), &Attributes::new(), &[]).unwrap();
        assert_eq!(html, "");
    }

    #[test]
    fn test_srcset_replacement() {
        let html = renderer()
            .image(&media(), &Attributes::srcset("50x50 1x, 100x100 2x"), &[])
            .unwrap();
        assert_eq!(
            html,
            r#"<img alt="Sea" title="Waves at dusk" srcset="a.jpg 1x, b.jpg 2x">"#
        );
    }

    #[test]
    fn test_srcset_without_descriptor() {
        assert_eq!(
            replace_srcset("50x50", &media().thumbnails).unwrap(),
            "a.jpg"
        );
        assert_eq!(
            replace_srcset("50x50 1x,100x100", &media().thumbnails).unwrap(),
            "a.jpg 1x, b.jpg"
        );
    }

    #[test]
    fn test_unknown_format_key_fails() {
        let err = renderer()
            .image(&media(), &Attributes::src("640x480"), &[])
            .unwrap_err();
        assert!(matches!(err, ImageError::UnknownThumbnail { key } if key == "640x480"));

        let err = renderer()
            .image(&media(), &Attributes::srcset("50x50 1x, 640x480 2x"), &[])
            .unwrap_err();
        assert!(matches!(err, ImageError::UnknownThumbnail { key } if key == "640x480"));
    }

    #[test]
    fn test_picture_tag_with_sources() {
        let sources = vec![
            (
                "(max-width: 1024px)".to_string(),
                Attributes::srcset("50x50 1x"),
            ),
            (
                "(min-width: 1025px)".to_string(),
                Attributes::srcset("100x100 1x"),
            ),
        ];
        let html = renderer()
            .image(&media(), &Attributes::src("100x100"), &sources)
            .unwrap();
        assert_eq!(
            html,
            concat!(
                "<picture>",
                r#"<source media="(max-width: 1024px)" srcset="a.jpg 1x">"#,
                r#"<source media="(min-width: 1025px)" srcset="b.jpg 1x">"#,
                r#"<img alt="Sea" title="Waves at dusk" src="b.jpg">"#,
                "</picture>",
            )
        );
    }

    #[test]
    fn test_lazy_image() {
        let renderer = lazy_renderer();
        assert!(!renderer.has_lazy_image());

        let html = renderer
            .lazy_image(&media(), &Attributes::src("50x50"), &[])
            .unwrap();
        assert_eq!(
            html,
            concat!(
                r#"<img alt="Sea" title="Waves at dusk" "#,
                r#"src="/ph/50x50.svg" data-src="a.jpg" class="lazyload">"#,
            )
        );
        assert!(renderer.has_lazy_image());
    }

    #[test]
    fn test_lazy_srcset() {
        let html = lazy_renderer()
            .lazy_image(&media(), &Attributes::srcset("50x50 1x, 100x100 2x"), &[])
            .unwrap();
        assert_eq!(
            html,
            concat!(
                r#"<img alt="Sea" title="Waves at dusk" "#,
                r#"srcset="/ph/50x50.svg 1x, /ph/100x100.svg 2x" "#,
                r#"data-srcset="a.jpg 1x, b.jpg 2x" class="lazyload">"#,
            )
        );
    }

    #[test]
    fn test_lazy_class_appended_to_existing() {
        let attributes = Attributes::from_iter([("src", "50x50"), ("class", "hero")]);
        let html = lazy_renderer()
            .lazy_image(&media(), &attributes, &[])
            .unwrap();
        assert!(html.contains(r#"class="hero lazyload""#));
    }

    #[test]
    fn test_lazy_without_placeholder_path_fails() {
        let err = renderer()
            .lazy_image(&media(), &Attributes::src("50x50"), &[])
            .unwrap_err();
        assert!(matches!(err, ImageError::PlaceholderPathMissing));
    }

    #[test]
    fn test_lazy_without_thumbnails_degrades_to_plain() {
        let media = Media {
            title: Some("Sea".to_string()),
            ..Media::default()
        };
        let html = lazy_renderer()
            .lazy_image(&media, &Attributes::from_iter([("class", "hero")]), &[])
            .unwrap();
        assert_eq!(html, r#"<img alt="Sea" title="Sea" class="hero">"#);
    }

    #[test]
    fn test_attribute_escaping() {
        let attributes = Attributes::from_iter([("src", "50x50"), ("data-caption", r#"a "quoted" <note> & more"#)]);
        let html = renderer().image(&media(), &attributes, &[]).unwrap();
        assert!(html.contains(
            r#"data-caption="a &quot;quoted&quot; &lt;note&gt; &amp; more""#
        ));
    }

    #[test]
    fn test_attributes_set_replaces_in_place() {
        let mut attributes = Attributes::from_iter([("src", "50x50"), ("class", "hero")]);
        attributes.set("src", "100x100");
        assert_eq!(attributes.get("src"), Some("100x100"));
        assert_eq!(
            attributes,
            Attributes::from_iter([("src", "100x100"), ("class", "hero")])
        );
    }

    #[test]
    fn test_placeholder_map() {
        let placeholders = placeholder_map("/ph/", &media().thumbnails).unwrap();
        assert_eq!(placeholders["50x50"], "/ph/50x50.svg");
        assert_eq!(placeholders["100x100"], "/ph/100x100.svg");
        assert!(placeholder_map("/ph/", &BTreeMap::new()).is_none());
    }

    #[test]
    fn test_escape_attribute() {
        assert_eq!(escape_attribute("a < b"), "a &lt; b");
        assert_eq!(escape_attribute("a & b"), "a &amp; b");
        assert_eq!(escape_attribute(r#""quoted""#), "&quot;quoted&quot;");
    }
}
