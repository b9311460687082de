//! Convenient imports for typical `sqlchain` usage.
//!
//! ```ignore
//! use sqlchain::prelude::*;
//! ```

pub use crate::{
    ArgumentKind, BuilderConfig, Chain, ChainError, ChainResult, Compilable, FieldRule,
    OperatorCategory, SqlFunction, Unit, UnitKind,
};
