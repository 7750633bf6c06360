use serde::{Deserialize, Serialize};

/// One page of the catalog, as held in the local cache
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListSnapshot {
  pub page: u32,
  pub total_pages: u32,
  pub total_results: u64,
  pub items: Vec<ListItem>,
}

/// Movie entry in a list snapshot
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ListItem {
  pub id: i64,
  pub title: Option<String>,
  pub original_title: Option<String>,
  pub original_language: Option<String>,
  pub overview: Option<String>,
  pub popularity: Option<f32>,
  /// Fully-qualified image URL
  pub poster_path: Option<String>,
  /// TMDB file path, as received
  pub backdrop_path: Option<String>,
  pub genre_ids: Option<Vec<i64>>,
  pub release_date: Option<String>,
  pub adult: Option<bool>,
  pub video: Option<bool>,
  pub vote_average: Option<f32>,
  pub vote_count: Option<u32>,
  /// Page number the item was requested with
  pub page: u32,
}

/// Full movie details (never cached)
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Details {
  pub id: i64,
  pub imdb_id: Option<String>,
  pub homepage: Option<String>,
  pub overview: Option<String>,
  /// Fully-qualified image URL
  pub poster_path: Option<String>,
  /// TMDB file path, as received
  pub backdrop_path: Option<String>,
  pub title: Option<String>,
  pub original_title: Option<String>,
  pub original_language: Option<String>,
  pub tagline: Option<String>,
  pub release_date: Option<String>,
  pub runtime: Option<u32>,
  pub adult: Option<bool>,
  pub video: Option<bool>,
  pub budget: Option<i64>,
  pub revenue: i64,
  pub popularity: Option<f32>,
  pub status: Option<String>,
  pub vote_average: Option<f32>,
  pub vote_count: u32,
  pub genres: Vec<Genre>,
  pub collection: Option<Collection>,
  pub origin_country: Option<Vec<String>>,
  pub production_companies: Option<Vec<Company>>,
  pub production_countries: Option<Vec<Country>>,
  pub spoken_languages: Option<Vec<Language>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Genre {
  pub id: i64,
  pub name: Option<String>,
}

/// Franchise a movie belongs to
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Collection {
  pub id: i64,
  pub name: Option<String>,
  pub poster_path: Option<String>,
  pub backdrop_path: Option<String>,
}

/// Production company
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Company {
  pub id: i64,
  pub name: Option<String>,
  pub logo_path: Option<String>,
  pub origin_country: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Country {
  /// ISO 3166-1 code
  pub code: Option<String>,
  pub name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Language {
  /// ISO 639-1 code
  pub code: Option<String>,
  pub english_name: Option<String>,
  pub name: Option<String>,
}

/// Fixed query parameters for the catalog listing endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListQuery {
  pub include_adult: bool,
  pub include_video: bool,
  pub page: u32,
}

impl ListQuery {
  pub const FIRST_PAGE: u32 = 1;
}

impl Default for ListQuery {
  fn default() -> Self {
    Self {
      include_adult: false,
      include_video: false,
      page: Self::FIRST_PAGE,
    }
  }
}
