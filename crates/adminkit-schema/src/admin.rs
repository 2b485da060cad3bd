use crate::{
    binding::{BindingError, CollectionBinding},
    describe::FieldDescription,
};
use std::{any::Any, collections::BTreeMap};

///
/// AssociationAdmin
///
/// One implementation per associated domain type. Creates blank
/// instances of that type, exposes its own field metadata, and wires the
/// inverse back-reference onto freshly created instances.
///
/// Implementations are registered once at bootstrap and read-mostly for
/// the remainder of the process.
///

pub trait AssociationAdmin: Send + Sync {
    /// Domain type name, used in diagnostics.
    fn type_name(&self) -> &str;

    /// Create a fully constructed, unpersisted instance of the managed
    /// type.
    fn new_instance(&self) -> Box<dyn Any>;

    /// Field metadata for the managed type, keyed by field name.
    fn form_field_descriptions(&self) -> &BTreeMap<String, FieldDescription>;

    /// Field metadata for one field, if declared.
    fn form_field_description(&self, name: &str) -> Option<&FieldDescription> {
        self.form_field_descriptions().get(name)
    }

    /// Collection binding declared for one field, if any.
    fn collection_binding(&self, name: &str) -> Option<&CollectionBinding> {
        self.form_field_description(name)?.collection_binding()
    }

    /// Set the back-reference on `instance` to point at the owning
    /// `subject`, through the capability declared on `binding`. A
    /// binding without a declared relationship is a no-op, not an
    /// error.
    fn set_parent_reference(
        &self,
        binding: &CollectionBinding,
        subject: &dyn Any,
        instance: &mut dyn Any,
    ) -> Result<(), BindingError> {
        binding.set_parent(instance, subject)
    }
}
