use crate::form::FormFactory;
use adminkit_schema::{describe::FieldDescription, options::Options};
use serde_json::Value;
use std::{any::Any, collections::BTreeMap, sync::Arc};
use thiserror::Error as ThisError;

///
/// FilterError
///

#[derive(Debug, ThisError)]
pub enum FilterError {
    #[error("field `{field}` has no type; the type must be defined before filter creation")]
    MissingType { field: String },

    #[error("no filter service attached to type named `{type_name}`")]
    UnknownType { type_name: String },

    #[error("no service registered under `{service_id}`")]
    UnknownService { service_id: String },

    #[error("service `{service_id}` does not provide the filter capability")]
    NotAFilter { service_id: String },

    #[error("filter initialization failed: {message}")]
    Initialize { message: String },
}

///
/// Filter
///
/// A configured query-predicate builder bound to exactly one field
/// description. Instances are created fresh per request context and
/// never reused across fields.
///

pub trait Filter: Any {
    /// Field description this filter is bound to.
    fn field_description(&self) -> Option<&FieldDescription>;

    /// Bind the filter to a field description.
    fn set_field_description(&mut self, field: FieldDescription);

    /// Apply the configured options. Called exactly once, after the
    /// descriptor is bound.
    fn initialize(&mut self, options: Options) -> Result<(), FilterError>;

    /// Hand the filter a form-building capability so it can materialize
    /// its own input widget independently of the main entity form.
    fn define_field_builder(&mut self, forms: &FormFactory);

    /// Effective options after initialization.
    fn options(&self) -> &Options;
}

impl std::fmt::Debug for dyn Filter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Filter").finish_non_exhaustive()
    }
}

///
/// FilterProvider
///
/// Registered factory for one filter kind; produces a fresh filter per
/// `create` call.
///

pub trait FilterProvider: Send + Sync {
    fn new_filter(&self) -> Box<dyn Filter>;
}

///
/// ServiceContainer
///
/// Explicit service lookup by identifier. Entries are opaque; the
/// filter factory downcasts them to the provider capability and treats
/// anything else as a misconfigured service. Populated once at
/// bootstrap, never mutated afterwards.
///

#[derive(Default)]
pub struct ServiceContainer {
    services: BTreeMap<String, Box<dyn Any + Send + Sync>>,
}

impl ServiceContainer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an arbitrary service under `id`.
    pub fn register<S>(&mut self, id: impl Into<String>, service: S)
    where
        S: Any + Send + Sync,
    {
        self.services.insert(id.into(), Box::new(service));
    }

    /// Register a filter provider under `id`.
    pub fn register_filter(&mut self, id: impl Into<String>, provider: Arc<dyn FilterProvider>) {
        self.register(id, provider);
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&(dyn Any + Send + Sync)> {
        self.services.get(id).map(Box::as_ref)
    }
}

///
/// FilterFactory
///
/// Resolves a field's declared filter type to a registered provider,
/// validates the capability contract, and configures the produced
/// filter. Never mutates the type registry.
///

pub struct FilterFactory {
    container: Arc<ServiceContainer>,
    types: BTreeMap<String, String>,
    forms: FormFactory,
}

impl FilterFactory {
    /// `types` maps semantic filter type names (for example `"text"`)
    /// to service identifiers inside `container`.
    #[must_use]
    pub const fn new(container: Arc<ServiceContainer>, types: BTreeMap<String, String>) -> Self {
        Self {
            container,
            types,
            forms: FormFactory::new(),
        }
    }

    /// Create a filter for `field`.
    ///
    /// Filters are always optional regardless of the underlying field's
    /// own requiredness: `options.field_options.required` is forced to
    /// `false` before initialization.
    pub fn create(
        &self,
        field: &FieldDescription,
        mut options: Options,
    ) -> Result<Box<dyn Filter>, FilterError> {
        let field_type = field.field_type().ok_or_else(|| FilterError::MissingType {
            field: field.name().to_string(),
        })?;

        let service_id = self
            .types
            .get(field_type)
            .ok_or_else(|| FilterError::UnknownType {
                type_name: field_type.to_string(),
            })?;

        let service = self
            .container
            .get(service_id)
            .ok_or_else(|| FilterError::UnknownService {
                service_id: service_id.clone(),
            })?;

        let provider = service
            .downcast_ref::<Arc<dyn FilterProvider>>()
            .ok_or_else(|| FilterError::NotAFilter {
                service_id: service_id.clone(),
            })?;

        let mut filter = provider.new_filter();
        filter.set_field_description(field.clone());

        options.set_in("field_options", "required", Value::Bool(false));
        filter.initialize(options)?;
        filter.define_field_builder(&self.forms);

        Ok(filter)
    }
}
