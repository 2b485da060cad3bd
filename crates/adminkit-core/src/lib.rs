pub mod admin;
pub mod filter;
pub mod form;
pub mod helper;
pub mod iter;
pub mod subform;
pub mod trace;

use crate::{filter::FilterError, helper::HelperError, subform::SubFormError};
use thiserror::Error as ThisError;

///
/// Prelude
///

pub mod prelude {
    pub use crate::{
        admin::{Admin, Pool, PoolBuilder},
        filter::{Filter, FilterFactory, FilterProvider, ServiceContainer},
        form::{Form, FormBuilder, FormFactory, FormView, Payload},
        helper::AdminHelper,
        iter::{TreeIter, find_by_name},
        subform::SubFormOptions,
        trace::{ReconcileTraceEvent, ReconcileTraceSink},
    };
    pub use adminkit_schema::prelude::*;
}

///
/// Error
///

#[derive(Debug, ThisError)]
pub enum Error {
    #[error(transparent)]
    HelperError(#[from] HelperError),

    #[error(transparent)]
    FilterError(#[from] FilterError),

    #[error(transparent)]
    SubFormError(#[from] SubFormError),
}
