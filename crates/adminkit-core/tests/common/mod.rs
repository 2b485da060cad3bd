#![allow(dead_code)]

use adminkit_core::{admin::Admin, form::Payload};
use adminkit_schema::{
    admin::AssociationAdmin,
    binding::CollectionBinding,
    describe::{AssociationMapping, FieldDescription, FieldValue},
};
use serde_json::{Value, json};
use std::{any::Any, collections::BTreeMap, sync::Arc};

///
/// Fixture domain: an invoice owning an ordered collection of lines,
/// with the bidirectional back-reference carried as the owning invoice
/// id on each line.
///

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Invoice {
    pub id: String,
    pub lines: Vec<Line>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Line {
    pub note: String,
    pub invoice: Option<String>,
}

pub struct LineAdmin {
    fields: BTreeMap<String, FieldDescription>,
}

impl LineAdmin {
    pub fn new() -> Self {
        let mut fields = BTreeMap::new();
        fields.insert(
            "note".to_string(),
            FieldDescription::new("note").with_type("text"),
        );

        Self { fields }
    }
}

impl AssociationAdmin for LineAdmin {
    fn type_name(&self) -> &str {
        "Line"
    }

    fn new_instance(&self) -> Box<dyn Any> {
        Box::new(Line::default())
    }

    fn form_field_descriptions(&self) -> &BTreeMap<String, FieldDescription> {
        &self.fields
    }
}

pub struct InvoiceAdmin {
    fields: BTreeMap<String, FieldDescription>,
}

impl InvoiceAdmin {
    pub fn new() -> Self {
        Self::build(true)
    }

    /// Variant with the `lines` collection binding left undeclared, for
    /// exercising the configuration-error path.
    pub fn without_binding() -> Self {
        Self::build(false)
    }

    fn build(with_binding: bool) -> Self {
        let line_admin: Arc<dyn AssociationAdmin> = Arc::new(LineAdmin::new());

        let mut lines = FieldDescription::new("lines")
            .with_type("one-to-many")
            .with_accessor(|invoice: &Invoice| {
                Some(FieldValue::Collection {
                    len: invoice.lines.len(),
                })
            })
            .with_association(line_admin, AssociationMapping::new("invoice", false));

        if with_binding {
            lines = lines.with_collection_binding(
                CollectionBinding::new("lines", |invoice: &mut Invoice, line: Line| {
                    invoice.lines.push(line);
                })
                .with_parent_setter(|line: &mut Line, invoice: &Invoice| {
                    line.invoice = Some(invoice.id.clone());
                }),
            );
        }

        let mut fields = BTreeMap::new();
        fields.insert(
            "id".to_string(),
            FieldDescription::new("id").with_type("text"),
        );
        fields.insert("lines".to_string(), lines);

        Self { fields }
    }
}

impl AssociationAdmin for InvoiceAdmin {
    fn type_name(&self) -> &str {
        "Invoice"
    }

    fn new_instance(&self) -> Box<dyn Any> {
        Box::new(Invoice::default())
    }

    fn form_field_descriptions(&self) -> &BTreeMap<String, FieldDescription> {
        &self.fields
    }
}

impl Admin for InvoiceAdmin {
    fn code(&self) -> &str {
        "invoice"
    }

    fn is_granted(&self, action: &str) -> bool {
        action == "DELETE"
    }
}

/// Invoice with `count` existing lines, none back-referenced.
pub fn invoice_with_lines(count: usize) -> Invoice {
    Invoice {
        id: "inv-7".to_string(),
        lines: (0..count)
            .map(|i| Line {
                note: format!("line {i}"),
                invoice: None,
            })
            .collect(),
    }
}

/// Posted payload carrying `count` submitted entries for `lines` under
/// the `invoice` form name.
pub fn posted_lines(count: usize) -> Payload {
    let entries: Vec<Value> = (0..count).map(|i| json!({ "note": format!("posted {i}") })).collect();

    json!({ "invoice": { "lines": entries } })
        .as_object()
        .expect("payload fixture must be an object")
        .clone()
}
