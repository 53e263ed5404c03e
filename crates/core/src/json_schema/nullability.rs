//! Optional-field normalization for generated Avro fields
//!
//! Runs after a field's type is derived. Avro requires a union default to
//! match the first arm, so null is moved to the front of every union that
//! contains it.

use serde_json::Value;

use crate::avro::{AvroType, Field, Primitive};

/// Make a field that is not listed in `required` nullable
///
/// - A union without `null` gets `null` inserted.
/// - Any other type is wrapped as `["null", T]` unless it carries a non-null
///   default, which would not be valid for the null-first union.
/// - A missing default becomes an explicit null default.
pub fn set_nullability(field: &mut Field) {
    match &mut field.ty {
        AvroType::Union(arms) => {
            if !arms.iter().any(AvroType::is_null) {
                arms.insert(0, AvroType::Primitive(Primitive::Null));
            }
        }
        ty => {
            if field.default.as_ref().is_none_or(Value::is_null) {
                let inner = std::mem::replace(ty, AvroType::Primitive(Primitive::Null));
                *ty = AvroType::Union(vec![AvroType::Primitive(Primitive::Null), inner]);
            }
        }
    }
    if field.default.is_none() {
        field.default = Some(Value::Null);
    }
}

/// Move `null` to the first position of every union in `ty`, including
/// unions nested in array items and map values
pub fn null_to_first(ty: &mut AvroType) {
    match ty {
        AvroType::Union(arms) => {
            if let Some(position) = arms.iter().position(AvroType::is_null) {
                let null = arms.remove(position);
                arms.insert(0, null);
            }
            arms.iter_mut().for_each(null_to_first);
        }
        AvroType::Array(items) => null_to_first(items),
        AvroType::Map(values) => null_to_first(values),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn string() -> AvroType {
        AvroType::Primitive(Primitive::String)
    }

    fn null() -> AvroType {
        AvroType::Primitive(Primitive::Null)
    }

    #[test]
    fn test_wraps_plain_type() {
        let mut field = Field::new("c7", string());
        set_nullability(&mut field);

        assert_eq!(field.ty, AvroType::Union(vec![null(), string()]));
        assert_eq!(field.default, Some(Value::Null));
    }

    #[test]
    fn test_keeps_non_null_default_unwrapped() {
        let mut field = Field::new("c1", string()).with_default(json!("test"));
        set_nullability(&mut field);

        assert_eq!(field.ty, string());
        assert_eq!(field.default, Some(json!("test")));
    }

    #[test]
    fn test_inserts_null_into_union() {
        let long = AvroType::Primitive(Primitive::Long);
        let mut field = Field::new("c2", AvroType::Union(vec![string(), long.clone()]));
        set_nullability(&mut field);

        assert_eq!(field.ty, AvroType::Union(vec![null(), string(), long]));
        assert_eq!(field.default, Some(Value::Null));
    }

    #[test]
    fn test_null_to_first() {
        let mut ty = AvroType::Union(vec![string(), null()]);
        null_to_first(&mut ty);
        assert_eq!(ty, AvroType::Union(vec![null(), string()]));

        let mut plain = string();
        null_to_first(&mut plain);
        assert_eq!(plain, string());
    }

    #[test]
    fn test_null_to_first_in_containers() {
        let mut items = AvroType::Array(Box::new(AvroType::Union(vec![string(), null()])));
        null_to_first(&mut items);
        assert_eq!(items, AvroType::Array(Box::new(AvroType::Union(vec![null(), string()]))));

        let long = AvroType::Primitive(Primitive::Long);
        let mut values = AvroType::Union(vec![
            AvroType::Map(Box::new(AvroType::Union(vec![long.clone(), null()]))),
            null(),
        ]);
        null_to_first(&mut values);
        assert_eq!(
            values,
            AvroType::Union(vec![null(), AvroType::Map(Box::new(AvroType::Union(vec![null(), long])))])
        );
    }
}
