//! Contains logic for mapping between nested markup and the flat model.

pub mod flat_to_nested;
pub mod nested_to_flat;
pub mod whitespace;
