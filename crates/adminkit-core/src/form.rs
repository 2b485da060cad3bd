use adminkit_schema::options::Options;
use serde_json::Value;
use std::{any::Any, fmt};

///
/// Payload
///
/// Raw submitted request data: a mapping keyed by form/field name
/// yielding nested mappings or sequences of submitted values. A missing
/// key is an empty mapping, never an error.
///

pub type Payload = serde_json::Map<String, Value>;

/// Return the sub-mapping stored under `name`, or an empty mapping when
/// the key is absent or not an object.
#[must_use]
pub fn sub_payload(payload: &Payload, name: &str) -> Payload {
    payload
        .get(name)
        .and_then(Value::as_object)
        .cloned()
        .unwrap_or_default()
}

/// Number of submitted entries under `name`: array and object entries
/// count their items, a missing key or `null` counts as zero, any other
/// value as one.
#[must_use]
pub fn entry_count(payload: &Payload, name: &str) -> usize {
    match payload.get(name) {
        None | Some(Value::Null) => 0,
        Some(Value::Array(items)) => items.len(),
        Some(Value::Object(map)) => map.len(),
        Some(_) => 1,
    }
}

///
/// FormBuilder
///
/// Node in the pre-submission form definition tree. Names are unique
/// among siblings only, not globally. Builder state beyond the child
/// list is an opaque option bag.
///

#[derive(Clone, Debug, Default)]
pub struct FormBuilder {
    name: String,
    options: Options,
    children: Vec<FormBuilder>,
}

impl FormBuilder {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_options(mut self, options: Options) -> Self {
        self.options = options;
        self
    }

    /// Append a child node, preserving sibling order.
    pub fn add(&mut self, child: Self) -> &mut Self {
        self.children.push(child);
        self
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn options(&self) -> &Options {
        &self.options
    }

    pub fn options_mut(&mut self) -> &mut Options {
        &mut self.options
    }

    #[must_use]
    pub fn children(&self) -> &[Self] {
        &self.children
    }

    /// Materialize a form with this builder's tree shape and no data.
    #[must_use]
    pub fn get_form(&self) -> Form {
        Form {
            name: self.name.clone(),
            children: self.children.iter().map(Self::get_form).collect(),
            data: None,
            bound: Payload::new(),
        }
    }
}

///
/// Form
///
/// A built form: the node tree shape, an optionally bound data object,
/// and the raw payload bound for this form's name. Validation and value
/// coercion are the surrounding form framework's responsibility; this
/// type only records what was bound.
///

#[derive(Default)]
pub struct Form {
    name: String,
    children: Vec<Form>,
    data: Option<Box<dyn Any>>,
    bound: Payload,
}

impl Form {
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn children(&self) -> &[Self] {
        &self.children
    }

    /// Bind a data object to the form. Must happen before fields are
    /// materialized against the data.
    pub fn set_data(&mut self, data: Box<dyn Any>) {
        self.data = Some(data);
    }

    /// Bind the raw submitted payload; the slice relevant to this form
    /// is the sub-mapping stored under the form's own name.
    pub fn bind(&mut self, payload: &Payload) {
        self.bound = sub_payload(payload, &self.name);
    }

    #[must_use]
    pub fn data(&self) -> Option<&dyn Any> {
        self.data.as_deref()
    }

    pub fn data_mut(&mut self) -> Option<&mut dyn Any> {
        self.data.as_deref_mut()
    }

    /// Move the bound data object out of the form.
    pub fn take_data(&mut self) -> Option<Box<dyn Any>> {
        self.data.take()
    }

    /// Typed view of the bound data object, if it is a `T`.
    #[must_use]
    pub fn subject<T: Any>(&self) -> Option<&T> {
        self.data.as_deref().and_then(<dyn Any>::downcast_ref)
    }

    /// Raw payload bound for this form's name.
    #[must_use]
    pub const fn bound(&self) -> &Payload {
        &self.bound
    }

    /// Produce a fresh read-only view tree for one render pass.
    #[must_use]
    pub fn create_view(&self) -> FormView {
        FormView {
            name: self.name.clone(),
            children: self.children.iter().map(Self::create_view).collect(),
        }
    }
}

impl fmt::Debug for Form {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Form")
            .field("name", &self.name)
            .field("children", &self.children)
            .field("has_data", &self.data.is_some())
            .field("bound", &self.bound)
            .finish()
    }
}

///
/// FormView
///
/// Post-render view node; structurally mirrors the form tree, read-only,
/// produced fresh per render pass.
///

#[derive(Clone, Debug)]
pub struct FormView {
    name: String,
    children: Vec<FormView>,
}

impl FormView {
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn children(&self) -> &[Self] {
        &self.children
    }
}

///
/// FormFactory
///
/// Form-building capability handed to collaborators (filters) so they
/// can materialize their own widget builders independently of the main
/// entity form.
///

#[derive(Clone, Copy, Debug, Default)]
pub struct FormFactory;

impl FormFactory {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    #[must_use]
    pub fn create_builder(&self, name: &str) -> FormBuilder {
        FormBuilder::new(name)
    }
}

///
/// TESTS
///
