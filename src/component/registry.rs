//! Per-render accumulator for components and service calls

use std::collections::HashMap;

use serde::Serialize;
use serde_json::Value;

/// A UI component registered during a template render
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComponentDescriptor {
    /// Component name, used to look up the JavaScript implementation
    pub name: String,
    /// Instance id, unique within the registry unless overridden
    pub id: String,
    /// Startup options, always a JSON object
    pub options: Value,
}

/// A service call recorded for the bootstrap script
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ServiceCall {
    pub name: String,
    pub func: String,
    pub args: Vec<Value>,
}

/// Accumulates component and service-call descriptors for one render.
///
/// A registry is constructed fresh per request and discarded afterwards;
/// clearing happens when the bootstrap script reads the lists.
#[derive(Debug, Default)]
pub struct ComponentRegistry {
    components: Vec<ComponentDescriptor>,
    services: Vec<ServiceCall>,
    instance_counter: HashMap<String, u64>,
    component_prefix: String,
}

impl ComponentRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a component and return its instance id.
    ///
    /// Ids have the form `<component_prefix><prefix><name>-<ordinal>` with a
    /// per-name ordinal starting at 1. An `id` key inside `options` replaces
    /// the generated id; the ordinal still advances.
    pub fn register_component(
        &mut self,
        name: &str,
        options: Option<Value>,
        prefix: Option<&str>,
    ) -> String {
        let counter = self.instance_counter.entry(name.to_string()).or_insert(0);
        *counter += 1;
        let ordinal = *counter;

        let mut id = format!(
            "{}{}{}-{}",
            self.component_prefix,
            prefix.unwrap_or(""),
            name,
            ordinal
        );

        // Options always serialize as a JSON object, never an empty array.
        let options = match options {
            Some(Value::Object(map)) if !map.is_empty() => {
                if let Some(override_id) = map.get("id") {
                    id = match override_id {
                        Value::String(s) => s.clone(),
                        other => other.to_string(),
                    };
                }
                Value::Object(map)
            }
            _ => Value::Object(serde_json::Map::new()),
        };

        tracing::debug!(name, id = id.as_str(), "registered component");

        self.components.push(ComponentDescriptor {
            name: name.to_string(),
            id: id.clone(),
            options,
        });

        id
    }

    /// Get all registered components, emptying the list when `clear` is set
    pub fn components(&mut self, clear: bool) -> Vec<ComponentDescriptor> {
        if clear {
            std::mem::take(&mut self.components)
        } else {
            self.components.clone()
        }
    }

    /// Distinct component names in order of first registration
    pub fn component_list(&self) -> Vec<String> {
        let mut names: Vec<String> = Vec::new();
        for component in &self.components {
            if !names.iter().any(|name| name == &component.name) {
                names.push(component.name.clone());
            }
        }
        names
    }

    /// Record a service function call
    pub fn call_service(&mut self, name: &str, func: &str, args: Vec<Value>) {
        tracing::debug!(name, func, "recorded service call");
        self.services.push(ServiceCall {
            name: name.to_string(),
            func: func.to_string(),
            args,
        });
    }

    /// Get all recorded service calls, emptying the list when `clear` is set
    pub fn services(&mut self, clear: bool) -> Vec<ServiceCall> {
        if clear {
            std::mem::take(&mut self.services)
        } else {
            self.services.clone()
        }
    }

    /// Distinct service names in order of first call
    pub fn service_list(&self) -> Vec<String> {
        let mut names: Vec<String> = Vec::new();
        for service in &self.services {
            if !names.iter().any(|name| name == &service.name) {
                names.push(service.name.clone());
            }
        }
        names
    }

    /// Set the prefix prepended to ids generated from now on.
    ///
    /// Already-registered components keep their ids.
    pub fn set_component_prefix(&mut self, prefix: &str) {
        self.component_prefix = prefix.to_string();
    }
}
