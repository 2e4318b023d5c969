//! Data-driven planning catalogs.
//!
//! This crate turns declarative files into planning-core values:
//! - Jobs (RON, via [`specs::JobSpec`])
//! - Combat resources in preference order (RON, via [`specs::ResourceSpec`])
//! - Routing order (RON)
//! - Run options and the combat kit (TOML)
//!
//! Conditions and procedures are small declarative languages
//! ([`specs::ConditionSpec`], [`specs::ProcedureSpec`]) that build the
//! closures plan-core stores.

pub mod specs;

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(test)]
mod testing;

pub use specs::{
    ConditionSpec, EffectSpec, JobSpec, PULLS_USED_COUNTER, ProcedureSpec, ResourceSpec, ValueSpec,
};

#[cfg(feature = "loaders")]
pub use loaders::{
    Catalog, CatalogFactory, JobLoader, KitLoader, LoadResult, OptionsLoader, ResourceLoader,
    RouteLoader, load_ron,
};
