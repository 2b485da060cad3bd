use convert_case::{Case, Casing};

///
/// Naming
///
/// Identifier synthesis shared by diagnostics and binding registration.
/// Collection adders follow the `add` + PascalCase(field) convention, so
/// a `lines` association maps to `addLines` and `shipping_address` maps
/// to `addShippingAddress`.
///

/// Return the conventional adder method name for an association field.
#[must_use]
pub fn adder_method_name(field_name: &str) -> String {
    format!("add{}", field_name.to_case(Case::Pascal))
}

/// Camelize a field name for display in diagnostics.
#[must_use]
pub fn camelize(field_name: &str) -> String {
    field_name.to_case(Case::Camel)
}

///
/// TESTS
///
