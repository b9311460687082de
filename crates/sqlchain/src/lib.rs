//! # sqlchain
//!
//! Assemble SQL expressions from typed, stackable building blocks.
//!
//! ## Features
//!
//! - **Typed units**: fields, constants, operators and functions, each with its own editable state
//! - **Ordering rules**: the chain decides which kind may come next and which may start or end it
//! - **Forgiving compilation**: a dangling trailing operator is dropped, and any unit with missing
//!   state turns the whole output into a readable sentinel instead of an error
//! - **Message-based removal**: units ask their chain to remove them through an event channel
//! - **Hooks**: log, count or trace chain activity
//!
//! ## Example
//!
//! ```ignore
//! use sqlchain::prelude::*;
//!
//! let mut chain = Chain::new(BuilderConfig::new().with_field("ABC", 1))?;
//!
//! chain.append(UnitKind::Field);
//! chain.last_mut().and_then(Unit::field_mut).unwrap().select("ABC")?;
//!
//! chain.append(UnitKind::Operator);
//! chain.last_mut().and_then(Unit::operator_mut).unwrap().select_symbol(">")?;
//!
//! chain.append(UnitKind::Function);
//! let function = chain.last_mut().and_then(Unit::function_mut).unwrap();
//! function.set_function(SqlFunction::Length);
//! function.set_argument_kind(ArgumentKind::Constant);
//! function.argument_constant_mut().unwrap().set_value("abc");
//!
//! assert_eq!(chain.compile(), "ABC > LENGTH('abc')");
//! ```

pub mod chain;
pub mod config;
pub mod error;
pub mod fragment;
pub mod hook;
pub mod kind;
pub mod prelude;
pub mod registry;
pub mod text;

pub use chain::{
    COMPILE_ERROR_SENTINEL, Chain, ChainEvent, ChainSnapshot, LastAdded, Unit, UnitFailure,
    UnitId, UnitSnapshot, UnitState,
};
pub use config::{BuilderConfig, FieldRule};
pub use error::{ChainError, ChainResult};
pub use fragment::{
    Argument, ArgumentKind, Compilable, ConstantUnit, FieldOption, FieldUnit, Fragment,
    FragmentFactory, FunctionUnit, OperatorCategory, OperatorUnit, SqlFunction,
};
pub use hook::{
    AppendRejection, ChainHook, ChainStats, CompileReport, CompositeHook, LoggingHook, NoopHook,
    StatsHook,
};
pub use kind::{KindOption, UnitKind};
pub use registry::{KindMetadata, Registry, STANDARD_METADATA};

#[cfg(feature = "tracing")]
pub use hook::TracingHook;
