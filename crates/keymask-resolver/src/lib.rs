//! KeyMask resolver chain
//!
//! Dispatches values to the resolver responsible for them:
//! - `ResolverChain` asks resolvers in ascending order, first match wins
//! - `MapFlatTypeResolver` masks JSON objects annotated with `MapSensitive`
//! - `FieldSchema` applies the chain to fields of a record by path

pub mod map_resolver;
pub mod resolver;
pub mod schema;

pub use map_resolver::{MAP_RESOLVER_ORDER, MapFlatTypeResolver};
pub use resolver::{ResolverChain, TypeResolver};
pub use schema::FieldSchema;
