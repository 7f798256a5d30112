//! Runtime state of bound parameter values.

use super::{HostValue, ParamFactory, TABLE_COLUMN, TypeLookup, YqlType, YqlValue};
use crate::error::{QueryError, Result};

/// Type of a single placeholder as far as it is known.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum TypeState {
    Unresolved,
    Resolved(YqlType),
}

impl TypeState {
    fn resolved(&self) -> Option<&YqlType> {
        match self {
            Self::Unresolved => None,
            Self::Resolved(ty) => Some(ty),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Binding {
    Unbound,
    Null,
    Value(YqlValue),
}

/// One positional placeholder.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Cell {
    binding: Binding,
    ty: TypeState,
}

impl Cell {
    const fn new() -> Self {
        Self {
            binding: Binding::Unbound,
            ty: TypeState::Unresolved,
        }
    }

    fn bind(
        &mut self,
        display_name: &str,
        declared: Option<&YqlType>,
        value: HostValue,
        hint: Option<&YqlType>,
        lookup: &dyn TypeLookup,
    ) -> Result<()> {
        let ty = declared.cloned().or_else(|| lookup.find_type(&value, hint));
        self.binding = if value.is_null() {
            Binding::Null
        } else {
            let target = ty
                .clone()
                .ok_or_else(|| QueryError::ParameterTypeUnknown(display_name.to_string()))?;
            let converted =
                lookup
                    .convert(value, &target)
                    .map_err(|reason| QueryError::InvalidValue {
                        name: display_name.to_string(),
                        expected: target.clone(),
                        reason,
                    })?;
            Binding::Value(converted)
        };
        self.ty = ty.map_or(TypeState::Unresolved, TypeState::Resolved);
        Ok(())
    }

    fn reset(&mut self) {
        self.binding = Binding::Unbound;
        self.ty = TypeState::Unresolved;
    }

    fn item(&self, display_name: &str) -> Result<Item> {
        match &self.binding {
            Binding::Unbound => Err(QueryError::MissingValue(display_name.to_string())),
            Binding::Null => Ok(Item::Null(self.ty.resolved().cloned())),
            Binding::Value(v) => Ok(Item::Value(v.clone())),
        }
    }
}

/// A value contributing to a list element or a batch column.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Item {
    /// NULL, with the type it was bound with if any.
    Null(Option<YqlType>),
    Value(YqlValue),
}

/// Brings values that must share one type to a common type.
///
/// All non-null values must agree on their base type. If any value is NULL
/// or already optional, the common type becomes `Optional` and every value
/// is wrapped accordingly.
pub(crate) fn unify_column(name: &str, items: Vec<Item>) -> Result<(YqlType, Vec<YqlValue>)> {
    let mut base: Option<YqlType> = None;
    let mut nullable = false;
    for item in &items {
        let ty = match item {
            Item::Null(ty) => {
                nullable = true;
                ty.clone()
            }
            Item::Value(v) => {
                let ty = v.yql_type();
                nullable |= ty.is_optional();
                Some(ty)
            }
        };
        let Some(ty) = ty else { continue };
        let ty = ty.unwrap_optional();
        match &base {
            None => base = Some(ty.clone()),
            Some(expected) if expected != ty => {
                return Err(QueryError::TypeMismatch {
                    name: name.to_string(),
                    expected: expected.clone(),
                    found: ty.clone(),
                })
            }
            Some(_) => {}
        }
    }
    let base = base.ok_or_else(|| QueryError::ParameterTypeUnknown(name.to_string()))?;
    let values = items
        .into_iter()
        .map(|item| match item {
            Item::Null(_) => YqlValue::null(&base),
            Item::Value(v) if nullable => v.into_optional(),
            Item::Value(v) => v,
        })
        .collect();
    let ty = if nullable { base.optional() } else { base };
    Ok((ty, values))
}

/// Runtime counterpart of a [`ParamFactory`].
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct BoundParam {
    factory: ParamFactory,
    cells: Vec<Cell>,
}

impl BoundParam {
    pub(crate) fn new(factory: &ParamFactory) -> Self {
        Self {
            factory: factory.clone(),
            cells: (0..factory.slots()).map(|_| Cell::new()).collect(),
        }
    }

    pub(crate) fn name(&self) -> &str {
        self.factory.name()
    }

    pub(crate) fn slots(&self) -> usize {
        self.cells.len()
    }

    const fn declared(&self) -> Option<&YqlType> {
        match &self.factory {
            ParamFactory::Simple { declared, .. } => declared.as_ref(),
            _ => None,
        }
    }

    pub(crate) fn display_name(&self, slot: usize) -> String {
        self.factory.display_name(slot)
    }

    /// Returns the type of a slot if it is already known.
    pub(crate) fn slot_type(&self, slot: usize) -> Option<YqlType> {
        self.declared()
            .or_else(|| self.cells.get(slot).and_then(|c| c.ty.resolved()))
            .cloned()
    }

    pub(crate) fn bind(
        &mut self,
        slot: usize,
        value: HostValue,
        hint: Option<&YqlType>,
        lookup: &dyn TypeLookup,
    ) -> Result<()> {
        let display_name = self.display_name(slot);
        let declared = self.declared().cloned();
        match self.cells.get_mut(slot) {
            Some(cell) => cell.bind(&display_name, declared.as_ref(), value, hint, lookup),
            None => Err(QueryError::ParameterIndexOutOfRange {
                index: slot + 1,
                count: self.cells.len(),
            }),
        }
    }

    /// Clears bound values; prepare-time types are kept.
    pub(crate) fn reset(&mut self) {
        self.cells.iter_mut().for_each(Cell::reset);
    }

    fn items(&self, slots: impl Iterator<Item = usize>) -> Result<Vec<Item>> {
        slots
            .map(|slot| self.cells[slot].item(&self.display_name(slot)))
            .collect()
    }

    /// Builds the engine value of this parameter.
    pub(crate) fn to_value(&self) -> Result<YqlValue> {
        match &self.factory {
            ParamFactory::Simple { name, declared } => match self.cells[0].item(name)? {
                Item::Value(v) => Ok(v),
                Item::Null(ty) => declared
                    .as_ref()
                    .or(ty.as_ref())
                    .map(YqlValue::null)
                    .ok_or_else(|| QueryError::ParameterTypeUnknown(name.clone())),
            },
            ParamFactory::InList {
                name,
                list_size,
                tuple_size,
            } => {
                if *tuple_size <= 1 {
                    let (item, items) = unify_column(name, self.items(0..*list_size)?)?;
                    return Ok(YqlValue::List { item, items });
                }
                let mut member_types = Vec::with_capacity(*tuple_size);
                let mut rows: Vec<Vec<YqlValue>> = vec![Vec::with_capacity(*tuple_size); *list_size];
                for member in 0..*tuple_size {
                    let slots = (0..*list_size).map(|row| row * tuple_size + member);
                    let (ty, values) = unify_column(name, self.items(slots)?)?;
                    member_types.push(ty);
                    for (row, value) in rows.iter_mut().zip(values) {
                        row.push(value);
                    }
                }
                Ok(YqlValue::List {
                    item: YqlType::Tuple(member_types),
                    items: rows.into_iter().map(YqlValue::Tuple).collect(),
                })
            }
            ParamFactory::TableList { name, list_size } => {
                let (ty, values) = unify_column(name, self.items(0..*list_size)?)?;
                Ok(YqlValue::List {
                    item: YqlType::Struct(vec![(TABLE_COLUMN.to_string(), ty)]),
                    items: values
                        .into_iter()
                        .map(|v| YqlValue::Struct(vec![(TABLE_COLUMN.to_string(), v)]))
                        .collect(),
                })
            }
        }
    }
}
