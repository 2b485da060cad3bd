mod common;

use adminkit_core::{
    admin::{Admin, Pool},
    helper::{AdminHelper, HelperError},
    trace::{ReconcileTraceEvent, ReconcileTraceSink},
};
use common::{Invoice, InvoiceAdmin, invoice_with_lines, posted_lines};
use serde_json::json;
use std::sync::{Arc, Mutex};

fn helper_with(admin: InvoiceAdmin) -> (AdminHelper, Arc<dyn Admin>) {
    let pool = Pool::builder().register(Arc::new(admin)).build();
    let pool = Arc::new(pool);
    let admin = pool.get("invoice").expect("admin registered").clone();

    (AdminHelper::new(pool), admin)
}

#[test]
fn catch_up_plus_enrichment_grows_collection_to_posted_count_plus_one() {
    let (helper, admin) = helper_with(InvoiceAdmin::new());
    let subject = invoice_with_lines(2);

    let (field, form) = helper
        .append_form_field_element(admin.as_ref(), Box::new(subject), "lines", &posted_lines(5))
        .expect("reconciliation should succeed");

    let invoice = form.subject::<Invoice>().expect("form holds the mutated invoice");
    // 3 via the catch-up loop, 1 via the enrichment step
    assert_eq!(invoice.lines.len(), 6);
    assert_eq!(field.name(), "lines");
    assert_eq!(form.name(), "invoice");
}

#[test]
fn enrichment_appends_even_when_counts_match() {
    let (helper, admin) = helper_with(InvoiceAdmin::new());
    let subject = invoice_with_lines(2);

    let (_, form) = helper
        .append_form_field_element(admin.as_ref(), Box::new(subject), "lines", &posted_lines(2))
        .expect("reconciliation should succeed");

    let invoice = form.subject::<Invoice>().expect("form holds the mutated invoice");
    assert_eq!(invoice.lines.len(), 3);
}

#[test]
fn collection_never_shrinks_below_its_prior_size() {
    let (helper, admin) = helper_with(InvoiceAdmin::new());
    let before = 4;
    let subject = invoice_with_lines(before);

    // missing payload key for the field reads as zero posted entries
    let payload = json!({ "invoice": {} }).as_object().expect("object").clone();
    let (_, form) = helper
        .append_form_field_element(admin.as_ref(), Box::new(subject), "lines", &payload)
        .expect("reconciliation should succeed");

    let invoice = form.subject::<Invoice>().expect("form holds the mutated invoice");
    assert!(invoice.lines.len() >= before);
    assert_eq!(invoice.lines.len(), before + 1);
}

#[test]
fn enrichment_instance_carries_the_back_reference() {
    let (helper, admin) = helper_with(InvoiceAdmin::new());
    let subject = invoice_with_lines(2);

    let (_, form) = helper
        .append_form_field_element(admin.as_ref(), Box::new(subject), "lines", &posted_lines(5))
        .expect("reconciliation should succeed");

    let invoice = form.subject::<Invoice>().expect("form holds the mutated invoice");
    let last = invoice.lines.last().expect("collection grew");
    assert_eq!(last.invoice.as_deref(), Some("inv-7"));

    // catch-up instances are appended without back-references
    assert!(invoice.lines[2].invoice.is_none());
    assert!(invoice.lines[3].invoice.is_none());
    assert!(invoice.lines[4].invoice.is_none());
}

#[test]
fn unknown_element_is_a_structural_error() {
    let (helper, admin) = helper_with(InvoiceAdmin::new());

    let err = helper
        .append_form_field_element(
            admin.as_ref(),
            Box::new(invoice_with_lines(0)),
            "missing",
            &posted_lines(1),
        )
        .expect_err("unknown element must fail");

    assert!(matches!(err, HelperError::ChildNotFound { .. }));
    assert!(err.to_string().contains("missing"));
}

#[test]
fn non_association_field_is_a_fatal_precondition() {
    let (helper, admin) = helper_with(InvoiceAdmin::new());

    let err = helper
        .append_form_field_element(
            admin.as_ref(),
            Box::new(invoice_with_lines(0)),
            "id",
            &posted_lines(1),
        )
        .expect_err("scalar field must fail");

    assert!(matches!(err, HelperError::MissingAssociationAdmin { .. }));
}

#[test]
fn missing_binding_names_the_adder_and_the_owning_type() {
    let (helper, admin) = helper_with(InvoiceAdmin::without_binding());

    let err = helper
        .append_form_field_element(
            admin.as_ref(),
            Box::new(invoice_with_lines(0)),
            "lines",
            &posted_lines(1),
        )
        .expect_err("undeclared binding must fail");

    let message = err.to_string();
    assert!(matches!(err, HelperError::MissingCollectionBinding { .. }));
    assert!(message.contains("addLines"));
    assert!(message.contains("Invoice"));
}

#[test]
fn never_populated_collection_reads_as_zero() {
    let (helper, admin) = helper_with(InvoiceAdmin::new());
    let subject = Invoice {
        id: "inv-7".to_string(),
        lines: Vec::new(),
    };

    let (_, form) = helper
        .append_form_field_element(admin.as_ref(), Box::new(subject), "lines", &posted_lines(2))
        .expect("reconciliation should succeed");

    let invoice = form.subject::<Invoice>().expect("form holds the mutated invoice");
    assert_eq!(invoice.lines.len(), 3);
}

///
/// Trace sink
///

#[derive(Default)]
struct RecordingSink {
    events: Mutex<Vec<String>>,
}

impl ReconcileTraceSink for RecordingSink {
    fn on_event(&self, event: ReconcileTraceEvent<'_>) {
        self.events
            .lock()
            .expect("sink lock")
            .push(format!("{event:?}"));
    }
}

#[test]
fn trace_sink_observes_the_reconciliation_phases() {
    let pool = Arc::new(Pool::builder().register(Arc::new(InvoiceAdmin::new())).build());
    let admin = pool.get("invoice").expect("admin registered").clone();
    let sink = Arc::new(RecordingSink::default());
    let helper = AdminHelper::new(pool).with_trace_sink(sink.clone());

    helper
        .append_form_field_element(
            admin.as_ref(),
            Box::new(invoice_with_lines(1)),
            "lines",
            &posted_lines(3),
        )
        .expect("reconciliation should succeed");

    let events = sink.events.lock().expect("sink lock");
    assert_eq!(events.len(), 5);
    assert!(events[0].starts_with("FormBound"));
    assert!(events[2].contains("appended: 2"));
    assert!(events[3].starts_with("EnrichmentAppended"));
    assert!(events[4].starts_with("FormRebuilt"));
}
