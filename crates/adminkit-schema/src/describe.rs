use crate::{admin::AssociationAdmin, binding::CollectionBinding, options::Options};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::{any::Any, fmt, sync::Arc};

///
/// AssociationMapping
///
/// Inverse-relation metadata for an association field: the field name on
/// the target type carrying the back-reference, and whether this side is
/// the owning side of the relation.
///
/// That `field_name` exists on the target type is a documented caller
/// contract; it is not enforced at runtime here.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct AssociationMapping {
    pub field_name: String,
    pub owning_side: bool,
}

impl AssociationMapping {
    #[must_use]
    pub fn new(field_name: impl Into<String>, owning_side: bool) -> Self {
        Self {
            field_name: field_name.into(),
            owning_side,
        }
    }
}

///
/// FieldValue
///
/// Value read back from a subject through a field accessor. The admin
/// layer never takes ownership of domain values; collection fields only
/// surface their entry count.
///

#[derive(Clone, Debug, PartialEq)]
pub enum FieldValue {
    Scalar(Value),
    Collection { len: usize },
}

impl FieldValue {
    /// Entry count as seen by the collection reconciler: collections
    /// report their length, scalar arrays their item count, `null`
    /// counts as zero and any other scalar as one.
    #[must_use]
    pub fn count(&self) -> usize {
        match self {
            Self::Collection { len } => *len,
            Self::Scalar(Value::Null) => 0,
            Self::Scalar(Value::Array(items)) => items.len(),
            Self::Scalar(_) => 1,
        }
    }
}

type ValueAccessor = Arc<dyn Fn(&dyn Any) -> Option<FieldValue> + Send + Sync>;

///
/// Association
///
/// Association block of a field description: the admin managing the
/// target type plus the inverse mapping.
///

#[derive(Clone)]
struct Association {
    admin: Arc<dyn AssociationAdmin>,
    mapping: AssociationMapping,
}

///
/// FieldDescription
///
/// Runtime metadata for one field of a domain type as exposed to the
/// form and filter machinery. Association fields additionally carry the
/// association admin, the inverse mapping, and the declared collection
/// binding used to grow the owner's collection.
///
/// A field unable to compute a current value returns `None` from
/// [`FieldDescription::value`]; that is an expected soft condition, not
/// an error.
///

#[derive(Clone, Default)]
pub struct FieldDescription {
    name: String,
    field_type: Option<String>,
    options: Options,
    accessor: Option<ValueAccessor>,
    association: Option<Association>,
    binding: Option<CollectionBinding>,
}

impl FieldDescription {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Set the semantic field type (for example `"one-to-many"` or
    /// `"text"`).
    #[must_use]
    pub fn with_type(mut self, field_type: impl Into<String>) -> Self {
        self.field_type = Some(field_type.into());
        self
    }

    /// Replace the option bag.
    #[must_use]
    pub fn with_options(mut self, options: Options) -> Self {
        self.options = options;
        self
    }

    /// Declare the value accessor for owner type `T`. A subject of a
    /// different concrete type reads back as no value.
    #[must_use]
    pub fn with_accessor<T>(
        mut self,
        accessor: impl Fn(&T) -> Option<FieldValue> + Send + Sync + 'static,
    ) -> Self
    where
        T: Any,
    {
        self.accessor = Some(Arc::new(move |subject: &dyn Any| {
            subject.downcast_ref::<T>().and_then(&accessor)
        }));
        self
    }

    /// Declare this field as an association managed by `admin` with the
    /// given inverse mapping.
    #[must_use]
    pub fn with_association(
        mut self,
        admin: Arc<dyn AssociationAdmin>,
        mapping: AssociationMapping,
    ) -> Self {
        self.association = Some(Association { admin, mapping });
        self
    }

    /// Declare the collection binding used to append instances to the
    /// owner's collection for this field.
    #[must_use]
    pub fn with_collection_binding(mut self, binding: CollectionBinding) -> Self {
        self.binding = Some(binding);
        self
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn field_type(&self) -> Option<&str> {
        self.field_type.as_deref()
    }

    #[must_use]
    pub const fn options(&self) -> &Options {
        &self.options
    }

    /// Return the option stored under `key`, if any.
    #[must_use]
    pub fn get_option(&self, key: &str) -> Option<&Value> {
        self.options.get(key)
    }

    /// Store an option, replacing any previous value.
    pub fn set_option(&mut self, key: impl Into<String>, value: Value) {
        self.options.set(key, value);
    }

    /// Read the field's current value off `subject`. `None` means the
    /// value is undefined for this subject (never-populated field or a
    /// subject of an unexpected type); callers map it to an empty state.
    #[must_use]
    pub fn value(&self, subject: &dyn Any) -> Option<FieldValue> {
        self.accessor.as_ref().and_then(|accessor| accessor(subject))
    }

    /// Admin managing the association target type, if this field is an
    /// association.
    #[must_use]
    pub fn association_admin(&self) -> Option<&Arc<dyn AssociationAdmin>> {
        self.association.as_ref().map(|assoc| &assoc.admin)
    }

    /// Inverse-relation mapping, if this field is an association.
    #[must_use]
    pub fn association_mapping(&self) -> Option<&AssociationMapping> {
        self.association.as_ref().map(|assoc| &assoc.mapping)
    }

    /// Declared collection binding, if any.
    #[must_use]
    pub fn collection_binding(&self) -> Option<&CollectionBinding> {
        self.binding.as_ref()
    }
}

impl fmt::Debug for FieldDescription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldDescription")
            .field("name", &self.name)
            .field("field_type", &self.field_type)
            .field("options", &self.options)
            .field("is_association", &self.association.is_some())
            .field("has_binding", &self.binding.is_some())
            .finish_non_exhaustive()
    }
}

///
/// TESTS
///
