use crate::form::FormBuilder;
use adminkit_schema::admin::AssociationAdmin;
use std::{collections::BTreeMap, sync::Arc};

///
/// Admin
///
/// One implementation per top-level domain type: everything an
/// association admin provides, plus the form definition tree for the
/// type and the boolean outcome of authorization checks.
///

pub trait Admin: AssociationAdmin {
    /// Registry code identifying this admin inside the pool.
    fn code(&self) -> &str;

    /// Build the form definition tree for the managed type. The default
    /// builds a flat tree with one child per declared field; admins with
    /// nested sub-forms override this.
    fn form_builder(&self) -> FormBuilder {
        let mut builder = FormBuilder::new(self.code());

        for name in self.form_field_descriptions().keys() {
            builder.add(FormBuilder::new(name));
        }

        builder
    }

    /// Boolean outcome of an authorization check. Policy evaluation
    /// itself lives outside this crate; the default denies.
    fn is_granted(&self, _action: &str) -> bool {
        false
    }
}

///
/// Pool
///
/// Admin registry keyed by admin code. Built once at bootstrap through
/// [`PoolBuilder`] and immutable afterwards; shared by reference across
/// the process with no runtime mutation.
///

#[derive(Default)]
pub struct Pool {
    admins: BTreeMap<String, Arc<dyn Admin>>,
}

impl Pool {
    #[must_use]
    pub fn builder() -> PoolBuilder {
        PoolBuilder::default()
    }

    /// Return the admin registered under `code`, if any.
    #[must_use]
    pub fn get(&self, code: &str) -> Option<&Arc<dyn Admin>> {
        self.admins.get(code)
    }

    #[must_use]
    pub fn contains(&self, code: &str) -> bool {
        self.admins.contains_key(code)
    }

    /// Registered admin codes, in sorted order.
    pub fn codes(&self) -> impl Iterator<Item = &str> {
        self.admins.keys().map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.admins.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.admins.is_empty()
    }
}

///
/// PoolBuilder
///
/// One-time population phase for the pool. Registering two admins under
/// the same code keeps the later one; codes are the caller's namespace.
///

#[derive(Default)]
pub struct PoolBuilder {
    admins: BTreeMap<String, Arc<dyn Admin>>,
}

impl PoolBuilder {
    #[must_use]
    pub fn register(mut self, admin: Arc<dyn Admin>) -> Self {
        self.admins.insert(admin.code().to_string(), admin);
        self
    }

    #[must_use]
    pub fn build(self) -> Pool {
        Pool {
            admins: self.admins,
        }
    }
}
