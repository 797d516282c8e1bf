//! Schema-driven record mapping.

use crate::error::MapError;
use crate::record::{FieldValue, PK_ATTRIBUTE, RawRecord, RecordDict};
use crate::schema::{PK_MARKER, Schema};

/// Map raw records onto a schema, producing one [`RecordDict`] per record in
/// the same order.
///
/// Every record gets `model = "<namespace>.<entity>"` (see
/// [`Schema::entity_name`]) and `pk` from its `Id` attribute. Each schema
/// column other than [`PK_MARKER`] becomes a field: the attribute's value if
/// the record has it, [`FieldValue::Absent`] otherwise. Attributes the schema
/// does not name are ignored.
///
/// The schema is validated before any record is looked at, so a malformed
/// schema fails even when there are no records.
pub fn map(
    schema: &Schema,
    records: &[RawRecord],
    namespace: &str,
) -> Result<Vec<RecordDict>, MapError> {
    let model = format!("{namespace}.{}", schema.entity_name()?);
    let columns: Vec<&str> = schema
        .column_names()?
        .filter(|name| *name != PK_MARKER)
        .collect();

    let mapped = records
        .iter()
        .enumerate()
        .map(|(index, record)| map_record(&model, &columns, index, record))
        .collect::<Result<Vec<_>, _>>()?;

    tracing::debug!(model = %model, records = mapped.len(), "mapped records");
    Ok(mapped)
}

fn map_record(
    model: &str,
    columns: &[&str],
    index: usize,
    record: &RawRecord,
) -> Result<RecordDict, MapError> {
    let pk = record
        .get_attr(PK_ATTRIBUTE)
        .ok_or(MapError::MissingAttribute {
            index,
            attribute: PK_ATTRIBUTE,
        })?;

    let mut dict = RecordDict::new(model, pk);
    for &column in columns {
        dict.fields
            .insert(column.to_owned(), FieldValue::from(record.get_attr(column)));
    }
    tracing::trace!(?dict, "mapped record");
    Ok(dict)
}
