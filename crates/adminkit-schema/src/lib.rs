pub mod admin;
pub mod binding;
pub mod describe;
pub mod naming;
pub mod options;

use crate::binding::BindingError;
use thiserror::Error as ThisError;

///
/// Prelude
///

pub mod prelude {
    pub use crate::{
        admin::AssociationAdmin,
        binding::{BindingError, CollectionBinding},
        describe::{AssociationMapping, FieldDescription, FieldValue},
        naming::adder_method_name,
        options::Options,
    };
    pub use serde::{Deserialize, Serialize};
}

///
/// Error
///

#[derive(Debug, ThisError)]
pub enum Error {
    #[error(transparent)]
    BindingError(#[from] BindingError),
}
