use crate::{
    admin::{Admin, Pool},
    form::{Form, FormBuilder, FormView, Payload, entry_count},
    iter::find_by_name,
    trace::{ReconcileTraceEvent, ReconcileTraceSink},
};
use adminkit_schema::{
    binding::BindingError, describe::FieldDescription, naming::adder_method_name,
};
use std::{any::Any, sync::Arc};
use thiserror::Error as ThisError;

///
/// HelperError
///
/// Configuration and structural failures surfaced by the reconciler.
/// All of these indicate a developer or setup mistake, never user input;
/// they are not retried and carry enough context to act on.
///

#[derive(Debug, ThisError)]
pub enum HelperError {
    #[error("no child named `{element_id}` in the form tree")]
    ChildNotFound { element_id: String },

    #[error("no field description declared for `{field}`")]
    MissingFieldDescription { field: String },

    #[error("field `{field}` has no association admin; it cannot grow a collection")]
    MissingAssociationAdmin { field: String },

    #[error("no collection binding for `{method}` declared on `{type_name}`; register one with the admin")]
    MissingCollectionBinding { method: String, type_name: String },

    #[error("form has no bound data")]
    NoBoundData,

    #[error(transparent)]
    BindingError(#[from] BindingError),
}

///
/// AdminHelper
///
/// Request-scoped reconciliation entry point over the admin pool: walks
/// a form definition tree to a named association field, grows the
/// subject's live collection to match the submitted entry count, and
/// rebuilds a bound form around the mutated subject.
///

pub struct AdminHelper {
    pool: Arc<Pool>,
    trace: Option<Arc<dyn ReconcileTraceSink>>,
}

impl AdminHelper {
    #[must_use]
    pub const fn new(pool: Arc<Pool>) -> Self {
        Self { pool, trace: None }
    }

    /// Inject an optional trace sink; events never affect semantics.
    #[must_use]
    pub fn with_trace_sink(mut self, sink: Arc<dyn ReconcileTraceSink>) -> Self {
        self.trace = Some(sink);
        self
    }

    #[must_use]
    pub fn pool(&self) -> &Pool {
        &self.pool
    }

    /// Admin registered under `code`, if any.
    #[must_use]
    pub fn admin(&self, code: &str) -> Option<&Arc<dyn Admin>> {
        self.pool.get(code)
    }

    /// Locate a child builder by name anywhere in the definition tree.
    #[must_use]
    pub fn get_child_form_builder<'a>(
        &self,
        builder: &'a FormBuilder,
        element_id: &str,
    ) -> Option<&'a FormBuilder> {
        find_by_name(builder, element_id)
    }

    /// Locate a child view by name anywhere in the render tree.
    #[must_use]
    pub fn get_child_form_view<'a>(
        &self,
        view: &'a FormView,
        element_id: &str,
    ) -> Option<&'a FormView> {
        find_by_name(view, element_id)
    }

    /// Grow the association collection named `element_id` on `subject`
    /// to match the submitted payload, then rebuild a bound form around
    /// the mutated subject.
    ///
    /// The catch-up loop appends exactly `post_count - object_count`
    /// instances; after it, one further instance is appended
    /// unconditionally with its back-reference to the subject set first.
    /// That extra append happens on every call, including when the
    /// counts already match; callers relying on it must not treat the
    /// operation as idempotent. The collection never shrinks.
    ///
    /// All lookup and descriptor-resolution failures occur before the
    /// first mutation.
    pub fn append_form_field_element(
        &self,
        admin: &dyn Admin,
        subject: Box<dyn Any>,
        element_id: &str,
        payload: &Payload,
    ) -> Result<(FieldDescription, Form), HelperError> {
        let builder = admin.form_builder();

        let mut form = builder.get_form();
        form.set_data(subject);
        form.bind(payload);
        self.emit(ReconcileTraceEvent::FormBound {
            form: builder.name(),
        });

        // locate the target field element
        let child = self
            .get_child_form_builder(&builder, element_id)
            .ok_or_else(|| HelperError::ChildNotFound {
                element_id: element_id.to_string(),
            })?;
        let child_name = child.name().to_string();
        self.emit(ReconcileTraceEvent::ChildLocated {
            element_id: &child_name,
        });

        let field = admin
            .form_field_description(&child_name)
            .ok_or_else(|| HelperError::MissingFieldDescription {
                field: child_name.clone(),
            })?
            .clone();
        let association =
            field
                .association_admin()
                .cloned()
                .ok_or_else(|| HelperError::MissingAssociationAdmin {
                    field: field.name().to_string(),
                })?;
        let binding = field
            .collection_binding()
            .cloned()
            .ok_or_else(|| HelperError::MissingCollectionBinding {
                method: adder_method_name(field.name()),
                type_name: admin.type_name().to_string(),
            })?;

        // a field unable to compute a value reads as an empty collection
        let data = form.data().ok_or(HelperError::NoBoundData)?;
        let mut object_count = field.value(data).map_or(0, |value| value.count());
        let post_count = entry_count(form.bound(), &child_name);

        // catch-up: append exactly post_count - object_count instances
        let appended = post_count.saturating_sub(object_count);
        while object_count < post_count {
            let data = form.data_mut().ok_or(HelperError::NoBoundData)?;
            binding.append(data, association.new_instance())?;
            object_count += 1;
        }
        self.emit(ReconcileTraceEvent::CatchUpAppended {
            field: &child_name,
            appended,
        });

        // enrichment: one unconditional extra instance, back-reference
        // set before it is exposed to further form processing
        let mut instance = association.new_instance();
        {
            let data = form.data().ok_or(HelperError::NoBoundData)?;
            association.set_parent_reference(&binding, data, instance.as_mut())?;
        }
        let data = form.data_mut().ok_or(HelperError::NoBoundData)?;
        binding.append(data, instance)?;
        self.emit(ReconcileTraceEvent::EnrichmentAppended { field: &child_name });

        // rebuild a fresh form around the mutated data object so the
        // field-building pass picks up the appended entries
        let mut final_form = admin.form_builder().get_form();
        let data = form.take_data().ok_or(HelperError::NoBoundData)?;
        final_form.set_data(data);
        self.emit(ReconcileTraceEvent::FormRebuilt {
            form: final_form.name(),
        });

        Ok((field, final_form))
    }

    /// Append one new instance to the association collection described
    /// by `field` on `object`, without touching back-references.
    pub fn add_new_instance(
        &self,
        admin: &dyn Admin,
        object: &mut dyn Any,
        field: &FieldDescription,
    ) -> Result<(), HelperError> {
        let association =
            field
                .association_admin()
                .ok_or_else(|| HelperError::MissingAssociationAdmin {
                    field: field.name().to_string(),
                })?;
        let binding =
            field
                .collection_binding()
                .ok_or_else(|| HelperError::MissingCollectionBinding {
                    method: adder_method_name(field.name()),
                    type_name: admin.type_name().to_string(),
                })?;

        binding.append(object, association.new_instance())?;

        Ok(())
    }

    fn emit(&self, event: ReconcileTraceEvent<'_>) {
        if let Some(sink) = &self.trace {
            sink.on_event(event);
        }
    }
}
