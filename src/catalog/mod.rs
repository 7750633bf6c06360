//! TMDB catalog: wire types, client, mapping and the caching repository.

pub mod api_types;
pub mod client;
pub mod mapping;
pub mod repository;
pub mod result;
pub mod types;

pub use client::{CatalogSource, RemoteConfig, TmdbClient};
pub use repository::CatalogRepository;
pub use result::FetchResult;
pub use types::{
  Collection, Company, Country, Details, Genre, Language, ListItem, ListQuery, ListSnapshot,
};
