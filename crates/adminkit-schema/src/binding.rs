use crate::naming::adder_method_name;
use std::{any::Any, fmt, sync::Arc};
use thiserror::Error as ThisError;

///
/// BindingError
///

#[derive(Debug, ThisError)]
pub enum BindingError {
    #[error("append target is not a `{expected}`")]
    OwnerTypeMismatch { expected: &'static str },

    #[error("appended instance is not a `{expected}`")]
    InstanceTypeMismatch { expected: &'static str },

    #[error("parent reference target is not a `{expected}`")]
    ParentTypeMismatch { expected: &'static str },
}

type AppendFn = Arc<dyn Fn(&mut dyn Any, Box<dyn Any>) -> Result<(), BindingError> + Send + Sync>;
type ParentSetFn = Arc<dyn Fn(&mut dyn Any, &dyn Any) -> Result<(), BindingError> + Send + Sync>;

///
/// CollectionBinding
///
/// Declared capability record for one collection association field:
/// how to append a freshly created instance to the owner's collection,
/// and (optionally) how to set the inverse back-reference on such an
/// instance. Declared once at admin registration time; dispatch never
/// synthesizes method names from strings at call time.
///
/// The conventional adder name (`add` + PascalCase(field)) is kept for
/// diagnostics only.
///

#[derive(Clone)]
pub struct CollectionBinding {
    field_name: String,
    adder_name: String,
    append: AppendFn,
    parent_set: Option<ParentSetFn>,
}

impl CollectionBinding {
    /// Declare an append capability for `field_name` on owner type `O`,
    /// collecting instances of type `C`.
    pub fn new<O, C>(
        field_name: impl Into<String>,
        append: impl Fn(&mut O, C) + Send + Sync + 'static,
    ) -> Self
    where
        O: Any,
        C: Any,
    {
        let field_name = field_name.into();
        let adder_name = adder_method_name(&field_name);

        let append: AppendFn = Arc::new(move |owner: &mut dyn Any, instance: Box<dyn Any>| {
            let owner = owner
                .downcast_mut::<O>()
                .ok_or(BindingError::OwnerTypeMismatch {
                    expected: std::any::type_name::<O>(),
                })?;
            let instance =
                instance
                    .downcast::<C>()
                    .map_err(|_| BindingError::InstanceTypeMismatch {
                        expected: std::any::type_name::<C>(),
                    })?;

            append(owner, *instance);

            Ok(())
        });

        Self {
            field_name,
            adder_name,
            append,
            parent_set: None,
        }
    }

    /// Declare the inverse back-reference capability: given a fresh
    /// instance of `C`, point it back at the owning `O`.
    #[must_use]
    pub fn with_parent_setter<O, C>(
        mut self,
        set: impl Fn(&mut C, &O) + Send + Sync + 'static,
    ) -> Self
    where
        O: Any,
        C: Any,
    {
        let parent_set: ParentSetFn = Arc::new(move |instance: &mut dyn Any, owner: &dyn Any| {
            let instance =
                instance
                    .downcast_mut::<C>()
                    .ok_or(BindingError::InstanceTypeMismatch {
                        expected: std::any::type_name::<C>(),
                    })?;
            let owner = owner
                .downcast_ref::<O>()
                .ok_or(BindingError::ParentTypeMismatch {
                    expected: std::any::type_name::<O>(),
                })?;

            set(instance, owner);

            Ok(())
        });

        self.parent_set = Some(parent_set);
        self
    }

    /// Association field name on the owning type.
    #[must_use]
    pub fn field_name(&self) -> &str {
        &self.field_name
    }

    /// Conventional adder method name, for diagnostics.
    #[must_use]
    pub fn adder_name(&self) -> &str {
        &self.adder_name
    }

    /// Append `instance` to the owner's live collection through the
    /// declared capability.
    pub fn append(&self, owner: &mut dyn Any, instance: Box<dyn Any>) -> Result<(), BindingError> {
        (self.append)(owner, instance)
    }

    /// Set the inverse back-reference on `instance`. A binding with no
    /// declared parent capability is a no-op, not an error: the field
    /// simply has no bidirectional relationship.
    pub fn set_parent(&self, instance: &mut dyn Any, owner: &dyn Any) -> Result<(), BindingError> {
        match &self.parent_set {
            Some(set) => set(instance, owner),
            None => Ok(()),
        }
    }

    /// Whether an inverse back-reference capability is declared.
    #[must_use]
    pub const fn has_parent_setter(&self) -> bool {
        self.parent_set.is_some()
    }
}

impl fmt::Debug for CollectionBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CollectionBinding")
            .field("field_name", &self.field_name)
            .field("adder_name", &self.adder_name)
            .field("has_parent_setter", &self.parent_set.is_some())
            .finish_non_exhaustive()
    }
}

///
/// TESTS
///
