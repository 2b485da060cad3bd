//! ## Crate layout
//! - `core`: form tree, tree walker, admin pool, collection reconciler,
//!   filter factory, and the reconciliation trace boundary.
//! - `schema`: field descriptions, association mappings, collection
//!   bindings, option bags, and naming utilities.
//!
//! The `prelude` module mirrors the surface used by controller-side
//! code: build a pool at bootstrap, hand an `AdminHelper` the request's
//! subject and payload, and render the rebuilt form.

pub use adminkit_core as core;
pub use adminkit_schema as schema;

//
// Consts
//

/// Workspace version re-export for downstream tooling/tests.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use adminkit_core::Error;

///
/// Prelude
///

pub mod prelude {
    pub use crate::core::{
        admin::{Admin, Pool, PoolBuilder},
        filter::{Filter, FilterFactory, FilterProvider, ServiceContainer},
        form::{Form, FormBuilder, FormFactory, FormView, Payload},
        helper::AdminHelper,
        iter::{TreeIter, find_by_name},
        subform::{SubFormOptions, build_sub_form},
        trace::{ReconcileTraceEvent, ReconcileTraceSink},
    };
    pub use crate::schema::{
        admin::AssociationAdmin,
        binding::CollectionBinding,
        describe::{AssociationMapping, FieldDescription, FieldValue},
        options::Options,
    };
}
