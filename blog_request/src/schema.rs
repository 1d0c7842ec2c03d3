use crate::value::Value;

/// Records that can be inspected by field name.
///
/// Field names are the ones used in [`crate::filter::Filter`], with relations written as
/// `relation.field`.
pub trait SchemaMapped {
    fn get_field(&self, name: &str) -> Value;
}
