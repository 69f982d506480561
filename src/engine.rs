//! MiniJinja bindings for the web template extensions
//!
//! [`WebExtensions`] owns one component registry, one image renderer and one
//! locale provider, and installs their template functions (plus the
//! `intl_icu_locale` filter) into a [`minijinja::Environment`]. Construct one
//! instance per render so the component accumulator state stays
//! request-scoped.

use std::sync::{Arc, Mutex, MutexGuard};

use minijinja::value::Value;
use minijinja::{Environment, Error, ErrorKind};
use serde::de::DeserializeOwned;

use crate::component::ComponentRegistry;
use crate::image::{Attributes, ImageConfig, ImageError, ImageRenderer, Media};
use crate::intl::{self, EmbeddedLocales, LocaleProvider};
use crate::settings::Settings;

/// The extension set registered into a template environment
pub struct WebExtensions {
    components: Arc<Mutex<ComponentRegistry>>,
    images: Arc<ImageRenderer>,
    locales: Arc<dyn LocaleProvider>,
}

impl WebExtensions {
    /// Create the extensions with the embedded locale provider
    pub fn new(settings: Settings) -> Self {
        Self::with_provider(settings, EmbeddedLocales::new())
    }

    /// Create the extensions with a custom locale provider
    pub fn with_provider(settings: Settings, provider: impl LocaleProvider + 'static) -> Self {
        let mut registry = ComponentRegistry::new();
        if let Some(prefix) = settings.components.prefix.as_deref() {
            registry.set_component_prefix(prefix);
        }

        let mut config = ImageConfig::new();
        if let Some(path) = settings.images.placeholder_path.as_deref() {
            config = config.with_placeholder_path(path);
        }

        tracing::debug!(
            placeholder_path = config.placeholder_path.as_deref(),
            "building web template extensions"
        );

        Self {
            components: Arc::new(Mutex::new(registry)),
            images: Arc::new(ImageRenderer::new(config)),
            locales: Arc::new(provider),
        }
    }

    /// Install every extension function and filter into the environment
    pub fn register(&self, env: &mut Environment<'_>) {
        self.register_component_functions(env);
        self.register_image_functions(env);
        self.register_intl_functions(env);
    }

    fn register_component_functions(&self, env: &mut Environment<'_>) {
        let registry = self.components.clone();
        env.add_function(
            "register_component",
            move |name: String, options: Option<Value>, prefix: Option<String>| -> Result<String, Error> {
                let options = options.map(|value| to_json(&value)).transpose()?;
                Ok(lock(&registry).register_component(&name, options, prefix.as_deref()))
            },
        );

        let registry = self.components.clone();
        env.add_function(
            "get_components",
            move |json_encode: Option<bool>, clear: Option<bool>| -> Result<Value, Error> {
                let components = lock(&registry).components(clear.unwrap_or(true));
                encode_list(&components, json_encode.unwrap_or(true))
            },
        );

        let registry = self.components.clone();
        env.add_function(
            "get_component_list",
            move |json_encode: Option<bool>| -> Result<Value, Error> {
                let names = lock(&registry).component_list();
                encode_list(&names, json_encode.unwrap_or(false))
            },
        );

        let registry = self.components.clone();
        env.add_function(
            "call_service",
            move |name: String, func: String, args: Option<Value>| -> Result<Value, Error> {
                let args = match args {
                    Some(value) => value
                        .try_iter()?
                        .map(|arg| to_json(&arg))
                        .collect::<Result<Vec<_>, Error>>()?,
                    None => Vec::new(),
                };
                lock(&registry).call_service(&name, &func, args);
                // Renders as nothing.
                Ok(Value::from(""))
            },
        );

        let registry = self.components.clone();
        env.add_function(
            "get_services",
            move |json_encode: Option<bool>, clear: Option<bool>| -> Result<Value, Error> {
                let services = lock(&registry).services(clear.unwrap_or(true));
                encode_list(&services, json_encode.unwrap_or(true))
            },
        );

        let registry = self.components.clone();
        env.add_function(
            "get_service_list",
            move |json_encode: Option<bool>| -> Result<Value, Error> {
                let names = lock(&registry).service_list();
                encode_list(&names, json_encode.unwrap_or(false))
            },
        );

        let registry = self.components.clone();
        env.add_function("set_component_prefix", move |prefix: String| -> Value {
            lock(&registry).set_component_prefix(&prefix);
            Value::from("")
        });
    }

    fn register_image_functions(&self, env: &mut Environment<'_>) {
        let images = self.images.clone();
        env.add_function(
            "get_image",
            move |media: Value, attributes: Option<Value>, sources: Option<Value>| -> Result<Value, Error> {
                let html = match ImageCall::from_args(media, attributes, sources)? {
                    Some(call) => images
                        .image(&call.media, &call.attributes, &call.sources)
                        .map_err(image_error)?,
                    None => String::new(),
                };
                Ok(Value::from_safe_string(html))
            },
        );

        let images = self.images.clone();
        env.add_function(
            "get_lazy_image",
            move |media: Value, attributes: Option<Value>, sources: Option<Value>| -> Result<Value, Error> {
                let html = match ImageCall::from_args(media, attributes, sources)? {
                    Some(call) => images.lazy_image(&call.media, &call.attributes, &call.sources),
                    // The configuration check and the lazy marker still apply
                    // when the call degrades to empty output.
                    None => images.lazy_image(&Media::default(), &Attributes::new(), &[]),
                }
                .map_err(image_error)?;
                Ok(Value::from_safe_string(html))
            },
        );

        let images = self.images.clone();
        env.add_function("has_lazy_image", move || -> bool { images.has_lazy_image() });
    }

    fn register_intl_functions(&self, env: &mut Environment<'_>) {
        let locales = self.locales.clone();
        env.add_function("intl_countries", move |display_locale: Option<String>| -> Value {
            Value::from_serialize(locales.country_names(display_locale.as_deref()))
        });

        let locales = self.locales.clone();
        env.add_function(
            "intl_country",
            move |code: String, display_locale: Option<String>| -> Value {
                optional(locales.country_name(&code.to_uppercase(), display_locale.as_deref()))
            },
        );

        let locales = self.locales.clone();
        env.add_function("intl_languages", move |display_locale: Option<String>| -> Value {
            Value::from_serialize(locales.language_names(display_locale.as_deref()))
        });

        let locales = self.locales.clone();
        env.add_function(
            "intl_language",
            move |code: String, region: Option<String>, display_locale: Option<String>| -> Value {
                optional(locales.language_name(&code, region.as_deref(), display_locale.as_deref()))
            },
        );

        let locales = self.locales.clone();
        env.add_function("intl_locales", move |display_locale: Option<String>| -> Value {
            Value::from_serialize(locales.locale_names(display_locale.as_deref()))
        });

        let locales = self.locales.clone();
        env.add_function(
            "intl_locale",
            move |code: String, display_locale: Option<String>| -> Value {
                optional(locales.locale_name(&code, display_locale.as_deref()))
            },
        );

        env.add_filter("intl_icu_locale", |locale: String| -> String {
            intl::icu_locale(&locale)
        });
    }
}

/// Arguments of a `get_image`/`get_lazy_image` call after normalization
struct ImageCall {
    media: Media,
    attributes: Attributes,
    sources: Vec<(String, Attributes)>,
}

impl ImageCall {
    /// Returns `None` when media or attributes are falsy, which renders as
    /// empty output rather than an error.
    fn from_args(
        media: Value,
        attributes: Option<Value>,
        sources: Option<Value>,
    ) -> Result<Option<Self>, Error> {
        let attributes = attributes.unwrap_or_default();
        if !media.is_true() || !attributes.is_true() {
            return Ok(None);
        }

        let media: Media = from_value(&media)?;
        let attributes = attributes_from_value(&attributes)?;
        let sources = match sources {
            Some(value) if value.is_true() => sources_from_value(&value)?,
            _ => Vec::new(),
        };

        Ok(Some(Self {
            media,
            attributes,
            sources,
        }))
    }
}

/// Attributes argument: a map, or a bare string as `src` shorthand
fn attributes_from_value(value: &Value) -> Result<Attributes, Error> {
    if let Some(shorthand) = value.as_str() {
        return Ok(Attributes::src(shorthand));
    }
    map_to_attributes(value)
}

/// Source attributes: a map, or a bare string as `srcset` shorthand
fn source_attributes_from_value(value: &Value) -> Result<Attributes, Error> {
    if let Some(shorthand) = value.as_str() {
        return Ok(Attributes::srcset(shorthand));
    }
    map_to_attributes(value)
}

fn map_to_attributes(value: &Value) -> Result<Attributes, Error> {
    let mut attributes = Attributes::new();
    for key in value.try_iter()? {
        let item = value.get_item(&key)?;
        attributes.set(stringify(&key), stringify(&item));
    }
    Ok(attributes)
}

/// Sources argument: a map of media queries to attribute sets, in entry order
fn sources_from_value(value: &Value) -> Result<Vec<(String, Attributes)>, Error> {
    let mut sources = Vec::new();
    for key in value.try_iter()? {
        let item = value.get_item(&key)?;
        sources.push((stringify(&key), source_attributes_from_value(&item)?));
    }
    Ok(sources)
}

fn stringify(value: &Value) -> String {
    match value.as_str() {
        Some(s) => s.to_string(),
        None => value.to_string(),
    }
}

fn lock(mutex: &Mutex<ComponentRegistry>) -> MutexGuard<'_, ComponentRegistry> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn to_json(value: &Value) -> Result<serde_json::Value, Error> {
    serde_json::to_value(value).map_err(json_error)
}

fn from_value<T: DeserializeOwned>(value: &Value) -> Result<T, Error> {
    let json = serde_json::to_value(value).map_err(json_error)?;
    serde_json::from_value(json).map_err(json_error)
}

fn json_error(err: serde_json::Error) -> Error {
    Error::new(ErrorKind::InvalidOperation, "invalid argument structure").with_source(err)
}

fn image_error(err: ImageError) -> Error {
    Error::new(ErrorKind::InvalidOperation, err.to_string())
}

fn encode_list<T: serde::Serialize>(list: &[T], json_encode: bool) -> Result<Value, Error> {
    if json_encode {
        let json = serde_json::to_string(list).map_err(|err| {
            Error::new(ErrorKind::InvalidOperation, "failed to encode list as JSON")
                .with_source(err)
        })?;
        Ok(Value::from_safe_string(json))
    } else {
        Ok(Value::from_serialize(list))
    }
}

fn optional(value: Option<String>) -> Value {
    match value {
        Some(value) => Value::from(value),
        None => Value::UNDEFINED,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_attributes_from_string_shorthand() {
        let value = Value::from("640x480");
        assert_eq!(
            attributes_from_value(&value).unwrap(),
            Attributes::src("640x480")
        );
        assert_eq!(
            source_attributes_from_value(&value).unwrap(),
            Attributes::srcset("640x480")
        );
    }

    #[test]
    fn test_attributes_from_map() {
        // serde_json maps iterate in sorted key order.
        let value = Value::from_serialize(json!({"class": "hero", "src": "640x480", "width": 640}));
        let attributes = attributes_from_value(&value).unwrap();
        assert_eq!(
            attributes,
            Attributes::from_iter([("class", "hero"), ("src", "640x480"), ("width", "640")])
        );
    }

    #[test]
    fn test_media_from_value() {
        let value = Value::from_serialize(json!({
            "title": "Sea",
            "thumbnails": {"640x480": "/uploads/sea.jpg"},
            "unrelated": {"nested": true},
        }));
        let media: Media = from_value(&value).unwrap();
        assert_eq!(media.title.as_deref(), Some("Sea"));
        assert_eq!(media.thumbnails["640x480"], "/uploads/sea.jpg");
        assert_eq!(media.description, None);
    }

    #[test]
    fn test_falsy_image_arguments() {
        let media = Value::from_serialize(json!({"thumbnails": {"a": "b"}}));

        assert!(ImageCall::from_args(Value::UNDEFINED, Some(Value::from("a")), None)
            .unwrap()
            .is_none());
        assert!(ImageCall::from_args(media.clone(), None, None).unwrap().is_none());
        assert!(
            ImageCall::from_args(media.clone(), Some(Value::from("")), None)
                .unwrap()
                .is_none()
        );
        assert!(ImageCall::from_args(media, Some(Value::from("a")), None)
            .unwrap()
            .is_some());
    }
}
