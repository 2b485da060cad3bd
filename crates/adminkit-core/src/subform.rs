use crate::form::FormBuilder;
use adminkit_schema::describe::FieldDescription;
use serde_json::Value;
use thiserror::Error as ThisError;

///
/// SubFormError
///

#[derive(Debug, ThisError)]
pub enum SubFormError {
    #[error("provide a valid `field_description` option")]
    MissingFieldDescription,

    #[error("field `{field}` has no association admin")]
    MissingAssociationAdmin { field: String },
}

///
/// SubFormOptions
///
/// Build options for one nested association sub-form. The field
/// description is mandatory: a sub-form only makes sense against the
/// association field that embeds it.
///

#[derive(Clone, Debug)]
pub struct SubFormOptions {
    /// Whether a `_delete` checkbox child is offered at all; the
    /// authorization outcome still gates it.
    pub delete: bool,
    pub field_description: Option<FieldDescription>,
}

impl Default for SubFormOptions {
    fn default() -> Self {
        Self {
            delete: true,
            field_description: None,
        }
    }
}

/// Populate `builder` with the children of one association sub-form:
/// an optional `_delete` checkbox (when offered and granted) followed
/// by one child per field declared on the association admin.
///
/// `delete_granted` is the boolean outcome of the caller's
/// authorization check; policy evaluation itself lives elsewhere.
pub fn build_sub_form(
    builder: &mut FormBuilder,
    options: &SubFormOptions,
    delete_granted: bool,
) -> Result<(), SubFormError> {
    let field = options
        .field_description
        .as_ref()
        .ok_or(SubFormError::MissingFieldDescription)?;
    let admin = field
        .association_admin()
        .ok_or_else(|| SubFormError::MissingAssociationAdmin {
            field: field.name().to_string(),
        })?;

    if options.delete && delete_granted {
        let mut delete = FormBuilder::new("_delete");
        delete.options_mut().set("type", Value::String("checkbox".to_string()));
        delete.options_mut().set("required", Value::Bool(false));
        builder.add(delete);
    }

    for name in admin.form_field_descriptions().keys() {
        builder.add(FormBuilder::new(name));
    }

    Ok(())
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_field_description_is_a_configuration_error() {
        let mut builder = FormBuilder::new("sub");
        let options = SubFormOptions {
            field_description: None,
            ..SubFormOptions::default()
        };

        let err = build_sub_form(&mut builder, &options, true)
            .expect_err("sub-form without a field description must fail");

        assert!(matches!(err, SubFormError::MissingFieldDescription));
    }

    #[test]
    fn plain_field_description_is_not_a_sub_form() {
        let mut builder = FormBuilder::new("sub");
        let options = SubFormOptions {
            field_description: Some(FieldDescription::new("title")),
            ..SubFormOptions::default()
        };

        let err = build_sub_form(&mut builder, &options, true)
            .expect_err("non-association field must fail");

        assert!(matches!(err, SubFormError::MissingAssociationAdmin { .. }));
    }
}
