//! Serde-deserializable types matching TMDB API responses.
//!
//! These types are separate from the public catalog types so the wire
//! format (snake_case, nullable everywhere) stays out of the rest of the crate.

use serde::Deserialize;

// ============================================================================
// Discover endpoint response
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct RawListPage {
  pub page: u32,
  pub results: Vec<RawListItem>,
  pub total_pages: u32,
  pub total_results: u64,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawListItem {
  pub id: i64,
  pub adult: Option<bool>,
  pub backdrop_path: Option<String>,
  pub genre_ids: Option<Vec<i64>>,
  pub original_language: Option<String>,
  pub original_title: Option<String>,
  pub overview: Option<String>,
  pub popularity: Option<f32>,
  pub poster_path: Option<String>,
  pub release_date: Option<String>,
  pub title: Option<String>,
  pub video: Option<bool>,
  pub vote_average: Option<f32>,
  pub vote_count: Option<u32>,
}

// ============================================================================
// Movie details endpoint response
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct RawGenre {
  pub id: i64,
  pub name: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawCollection {
  pub id: i64,
  pub name: Option<String>,
  pub poster_path: Option<String>,
  pub backdrop_path: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawCompany {
  pub id: i64,
  pub logo_path: Option<String>,
  pub name: Option<String>,
  pub origin_country: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawCountry {
  pub iso_3166_1: Option<String>,
  pub name: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawLanguage {
  pub english_name: Option<String>,
  pub iso_639_1: Option<String>,
  pub name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawDetails {
  pub id: i64,
  pub adult: Option<bool>,
  pub backdrop_path: Option<String>,
  pub belongs_to_collection: Option<RawCollection>,
  pub budget: Option<i64>,
  pub imdb_id: Option<String>,
  pub homepage: Option<String>,
  pub origin_country: Option<Vec<String>>,
  pub original_language: Option<String>,
  pub original_title: Option<String>,
  pub overview: Option<String>,
  pub popularity: Option<f32>,
  pub poster_path: Option<String>,
  pub production_companies: Option<Vec<RawCompany>>,
  pub production_countries: Option<Vec<RawCountry>>,
  pub spoken_languages: Option<Vec<RawLanguage>>,
  pub title: Option<String>,
  pub tagline: Option<String>,
  pub release_date: Option<String>,
  pub runtime: Option<u32>,
  pub revenue: i64,
  pub status: Option<String>,
  pub video: Option<bool>,
  pub vote_average: Option<f32>,
  pub vote_count: u32,
  pub genres: Option<Vec<RawGenre>>,
}
