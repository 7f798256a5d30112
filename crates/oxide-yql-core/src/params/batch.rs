//! Row accumulation for bulk execution of a batchable statement.

use super::binding::{Item, unify_column};
use super::{Params, QueryParams, YqlType, YqlValue};
use crate::error::{QueryError, Result};
use crate::query::{BatchCommand, BatchPattern, QueryCommand};

/// Name of the list parameter carrying all rows.
pub const BATCH_PARAM: &str = "$batch";

/// Rows of a batchable statement, executed as one statement over a list
/// of structs.
///
/// Each row is a snapshot of the values bound to the statement's
/// placeholders, taken by [`BatchedQuery::add_batch`].
#[derive(Debug, Clone)]
pub struct BatchedQuery {
    pattern: BatchPattern,
    rows: Vec<Vec<YqlValue>>,
}

impl BatchedQuery {
    /// Creates an empty batch for the given shape.
    #[must_use]
    pub const fn new(pattern: BatchPattern) -> Self {
        Self {
            pattern,
            rows: Vec::new(),
        }
    }

    /// Returns the recognized statement shape.
    #[must_use]
    pub const fn pattern(&self) -> &BatchPattern {
        &self.pattern
    }

    /// Always [`QueryCommand::Batch`].
    #[must_use]
    pub const fn command(&self) -> QueryCommand {
        QueryCommand::Batch
    }

    /// Returns the number of accumulated rows.
    #[must_use]
    pub fn batch_size(&self) -> usize {
        self.rows.len()
    }

    /// Appends the values currently bound in `params` as a new row.
    ///
    /// # Errors
    ///
    /// Fails if one of the statement's placeholders has no value.
    pub fn add_batch(&mut self, params: &QueryParams) -> Result<()> {
        let row = self
            .pattern
            .bindings()
            .map(|(_, param)| params.value(param))
            .collect::<Result<Vec<_>>>()?;
        self.rows.push(row);
        Ok(())
    }

    /// Drops all accumulated rows.
    pub fn clear_batch(&mut self) {
        self.rows.clear();
    }

    fn build(&self) -> Result<(YqlType, YqlValue)> {
        if self.rows.is_empty() {
            return Err(QueryError::EmptyBatch);
        }
        let mut members = Vec::new();
        let mut structs: Vec<Vec<(String, YqlValue)>> = vec![Vec::new(); self.rows.len()];
        for (index, (column, _)) in self.pattern.bindings().enumerate() {
            let items = self
                .rows
                .iter()
                .map(|row| Item::Value(row[index].clone()))
                .collect();
            let (ty, values) = unify_column(column, items)?;
            members.push((column.to_string(), ty));
            for (fields, value) in structs.iter_mut().zip(values) {
                fields.push((column.to_string(), value));
            }
        }
        let item = YqlType::Struct(members);
        let value = YqlValue::List {
            item: item.clone(),
            items: structs.into_iter().map(YqlValue::Struct).collect(),
        };
        Ok((YqlType::list(item), value))
    }

    /// Builds the engine parameters: a single `$batch` list.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::EmptyBatch`] without rows and
    /// [`QueryError::TypeMismatch`] when rows disagree on a column type.
    pub fn to_params(&self) -> Result<Params> {
        let (_, value) = self.build()?;
        let mut params = Params::new();
        params.insert(BATCH_PARAM, value);
        Ok(params)
    }

    /// Returns the bulk statement text.
    ///
    /// # Errors
    ///
    /// Same as [`BatchedQuery::to_params`].
    pub fn yql_text(&self) -> Result<String> {
        let (ty, _) = self.build()?;
        let table = self.pattern.table();
        let body = match self.pattern.command() {
            cmd @ (BatchCommand::Insert | BatchCommand::Upsert | BatchCommand::Replace) => {
                format!("{} INTO `{table}` SELECT * FROM AS_TABLE({BATCH_PARAM});", cmd.as_str())
            }
            BatchCommand::Update => {
                format!("UPDATE `{table}` ON SELECT * FROM AS_TABLE({BATCH_PARAM});")
            }
            BatchCommand::Delete => {
                format!("DELETE FROM `{table}` ON SELECT * FROM AS_TABLE({BATCH_PARAM});")
            }
        };
        Ok(format!("DECLARE {BATCH_PARAM} AS {ty};\n{body}"))
    }
}
