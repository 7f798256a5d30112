//! Per-execution container of bound values.

use std::sync::Arc;

use super::binding::BoundParam;
use super::{ParamDescription, ParamFactory, Params, ToHostValue, TypeLookup, YqlType, YqlValue};
use crate::error::{QueryError, Result};

/// Values bound to the positional placeholders of one query.
///
/// Positions are 1-based and run over every placeholder of every statement
/// in source order; a list parameter covers as many positions as it
/// replaced. A container belongs to a single execution and is not meant to
/// be shared between threads while values are being bound.
pub struct QueryParams {
    lookup: Arc<dyn TypeLookup>,
    params: Vec<BoundParam>,
    /// Maps a 0-based position to (parameter index, slot within parameter).
    positions: Vec<(usize, usize)>,
}

impl QueryParams {
    /// Creates an empty container for the given parameters.
    pub fn new<'a>(
        factories: impl IntoIterator<Item = &'a ParamFactory>,
        lookup: Arc<dyn TypeLookup>,
    ) -> Self {
        let params: Vec<BoundParam> = factories.into_iter().map(BoundParam::new).collect();
        let positions = params
            .iter()
            .enumerate()
            .flat_map(|(index, param)| (0..param.slots()).map(move |slot| (index, slot)))
            .collect();
        Self {
            lookup,
            params,
            positions,
        }
    }

    /// Returns the number of positional placeholders.
    #[must_use]
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Returns true if the query takes no values.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    fn position(&self, index: usize) -> Result<(usize, usize)> {
        index
            .checked_sub(1)
            .and_then(|i| self.positions.get(i).copied())
            .ok_or(QueryError::ParameterIndexOutOfRange {
                index,
                count: self.positions.len(),
            })
    }

    fn bind(&mut self, index: usize, value: super::HostValue, hint: Option<&YqlType>) -> Result<()> {
        let (param, slot) = self.position(index)?;
        self.params[param].bind(slot, value, hint, self.lookup.as_ref())
    }

    /// Binds a value to the placeholder at `index` (1-based).
    ///
    /// # Errors
    ///
    /// Fails if the index is out of range or the value cannot be converted
    /// to the parameter's type.
    pub fn set(&mut self, index: usize, value: impl ToHostValue) -> Result<()> {
        self.bind(index, value.to_host_value(), None)
    }

    /// Binds a value with an explicit engine type.
    ///
    /// # Errors
    ///
    /// Same as [`QueryParams::set`].
    pub fn set_typed(&mut self, index: usize, value: impl ToHostValue, ty: &YqlType) -> Result<()> {
        self.bind(index, value.to_host_value(), Some(ty))
    }

    /// Binds NULL, optionally telling which type the NULL has.
    ///
    /// # Errors
    ///
    /// Fails if the index is out of range.
    pub fn set_null(&mut self, index: usize, ty: Option<&YqlType>) -> Result<()> {
        self.bind(index, super::HostValue::Null, ty)
    }

    /// Forgets all bound values, keeping prepare-time types.
    pub fn clear(&mut self) {
        self.params.iter_mut().for_each(BoundParam::reset);
    }

    /// Describes every positional placeholder.
    #[must_use]
    pub fn describe(&self) -> Vec<ParamDescription> {
        self.positions
            .iter()
            .map(|&(param, slot)| {
                let param = &self.params[param];
                ParamDescription {
                    name: param.name().to_string(),
                    display_name: param.display_name(slot),
                    ty: param.slot_type(slot),
                }
            })
            .collect()
    }

    /// Returns the current engine value of one generated parameter.
    ///
    /// # Errors
    ///
    /// Fails if the parameter is unknown, unbound or its type cannot be
    /// determined.
    pub fn value(&self, name: &str) -> Result<YqlValue> {
        self.params
            .iter()
            .find(|p| p.name() == name)
            .ok_or_else(|| QueryError::MissingValue(name.to_string()))?
            .to_value()
    }

    /// Builds the engine parameter map.
    ///
    /// # Errors
    ///
    /// Fails on the first parameter without a value or without a type.
    pub fn to_params(&self) -> Result<Params> {
        let mut params = Params::new();
        for param in &self.params {
            params.insert(param.name(), param.to_value()?);
        }
        Ok(params)
    }
}

impl std::fmt::Debug for QueryParams {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueryParams")
            .field("params", &self.params)
            .finish_non_exhaustive()
    }
}
