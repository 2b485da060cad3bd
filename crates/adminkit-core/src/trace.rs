//! Reconciliation trace boundary.
//!
//! Tracing is optional, injected by the caller, and must not affect
//! reconciliation semantics.

///
/// ReconcileTraceSink
///

pub trait ReconcileTraceSink: Send + Sync {
    fn on_event(&self, event: ReconcileTraceEvent<'_>);
}

///
/// ReconcileTraceEvent
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ReconcileTraceEvent<'a> {
    /// A fresh form was built and bound to the subject and payload.
    FormBound { form: &'a str },
    /// The target child builder was located in the definition tree.
    ChildLocated { element_id: &'a str },
    /// The catch-up loop appended `appended` instances.
    CatchUpAppended { field: &'a str, appended: usize },
    /// The unconditional enrichment instance was appended with its
    /// back-reference set.
    EnrichmentAppended { field: &'a str },
    /// The second form was rebuilt around the mutated data object.
    FormRebuilt { form: &'a str },
}
