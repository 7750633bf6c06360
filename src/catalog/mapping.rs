//! Conversions from TMDB wire records to catalog types.

use super::api_types::{
  RawCollection, RawCompany, RawCountry, RawDetails, RawGenre, RawLanguage, RawListItem,
  RawListPage,
};
use super::types::{Collection, Company, Country, Details, Genre, Language, ListItem, ListSnapshot};

const IMAGE_BASE_URL: &str = "https://image.tmdb.org/t/p";
const LIST_POSTER_SIZE: &str = "original";
const DETAILS_POSTER_SIZE: &str = "w200";

/// Build an image URL from a TMDB file path.
///
/// A missing path still yields a URL (ending in `/`); callers rendering
/// images have to treat that as "no image".
fn image_url(size: &str, path: Option<&str>) -> String {
  format!("{}/{}/{}", IMAGE_BASE_URL, size, path.unwrap_or_default())
}

/// Normalize a discover page. `requested_page` is stamped onto every item.
pub fn list_snapshot(raw: RawListPage, requested_page: u32) -> ListSnapshot {
  ListSnapshot {
    page: raw.page,
    total_pages: raw.total_pages,
    total_results: raw.total_results,
    items: raw
      .results
      .into_iter()
      .map(|item| list_item(item, requested_page))
      .collect(),
  }
}

fn list_item(raw: RawListItem, page: u32) -> ListItem {
  ListItem {
    id: raw.id,
    poster_path: Some(image_url(LIST_POSTER_SIZE, raw.poster_path.as_deref())),
    backdrop_path: raw.backdrop_path,
    title: raw.title,
    original_title: raw.original_title,
    original_language: raw.original_language,
    overview: raw.overview,
    popularity: raw.popularity,
    genre_ids: raw.genre_ids,
    release_date: raw.release_date,
    adult: raw.adult,
    video: raw.video,
    vote_average: raw.vote_average,
    vote_count: raw.vote_count,
    page,
  }
}

pub fn details(raw: RawDetails) -> Details {
  Details {
    id: raw.id,
    poster_path: Some(image_url(DETAILS_POSTER_SIZE, raw.poster_path.as_deref())),
    backdrop_path: raw.backdrop_path,
    imdb_id: raw.imdb_id,
    homepage: raw.homepage,
    overview: raw.overview,
    title: raw.title,
    original_title: raw.original_title,
    original_language: raw.original_language,
    tagline: raw.tagline,
    release_date: raw.release_date,
    runtime: raw.runtime,
    adult: raw.adult,
    video: raw.video,
    budget: raw.budget,
    revenue: raw.revenue,
    popularity: raw.popularity,
    status: raw.status,
    vote_average: raw.vote_average,
    vote_count: raw.vote_count,
    genres: raw
      .genres
      .unwrap_or_default()
      .into_iter()
      .map(genre)
      .collect(),
    collection: raw.belongs_to_collection.map(collection),
    origin_country: raw.origin_country,
    production_companies: raw
      .production_companies
      .map(|list| list.into_iter().map(company).collect()),
    production_countries: raw
      .production_countries
      .map(|list| list.into_iter().map(country).collect()),
    spoken_languages: raw
      .spoken_languages
      .map(|list| list.into_iter().map(language).collect()),
  }
}

fn genre(raw: RawGenre) -> Genre {
  Genre {
    id: raw.id,
    name: raw.name,
  }
}

fn collection(raw: RawCollection) -> Collection {
  Collection {
    id: raw.id,
    name: raw.name,
    poster_path: raw.poster_path,
    backdrop_path: raw.backdrop_path,
  }
}

fn company(raw: RawCompany) -> Company {
  Company {
    id: raw.id,
    name: raw.name,
    logo_path: raw.logo_path,
    origin_country: raw.origin_country,
  }
}

fn country(raw: RawCountry) -> Country {
  Country {
    code: raw.iso_3166_1,
    name: raw.name,
  }
}

fn language(raw: RawLanguage) -> Language {
  Language {
    code: raw.iso_639_1,
    english_name: raw.english_name,
    name: raw.name,
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn raw_item(id: i64, title: Option<&str>, poster: Option<&str>) -> RawListItem {
    RawListItem {
      id,
      title: title.map(String::from),
      poster_path: poster.map(String::from),
      ..Default::default()
    }
  }

  fn raw_details(genres: Option<Vec<RawGenre>>, poster: Option<&str>) -> RawDetails {
    RawDetails {
      id: 7,
      poster_path: poster.map(String::from),
      genres,
      ..Default::default()
    }
  }

  #[test]
  fn test_list_item_poster_becomes_original_url() {
    let raw = RawListPage {
      page: 1,
      results: vec![raw_item(5, Some("X"), Some("/p.jpg"))],
      total_pages: 10,
      total_results: 100,
    };

    let snapshot = list_snapshot(raw, 1);
    assert_eq!(snapshot.page, 1);
    assert_eq!(snapshot.total_pages, 10);
    assert_eq!(snapshot.total_results, 100);

    let item = snapshot.items.iter().find(|i| i.id == 5).unwrap();
    assert_eq!(
      item.poster_path.as_deref(),
      Some("https://image.tmdb.org/t/p/original//p.jpg")
    );
    assert_eq!(item.title.as_deref(), Some("X"));
  }

  #[test]
  fn test_list_preserves_order_and_stamps_page() {
    let raw = RawListPage {
      page: 3,
      results: vec![
        raw_item(30, None, None),
        raw_item(10, None, None),
        raw_item(20, None, None),
      ],
      total_pages: 3,
      total_results: 60,
    };

    let snapshot = list_snapshot(raw, 3);
    let ids: Vec<i64> = snapshot.items.iter().map(|i| i.id).collect();
    assert_eq!(ids, vec![30, 10, 20]);
    assert!(snapshot.items.iter().all(|i| i.page == 3));
  }

  #[test]
  fn test_absent_fields_stay_absent() {
    let raw = RawListPage {
      page: 1,
      results: vec![raw_item(1, None, None)],
      total_pages: 1,
      total_results: 1,
    };

    let item = &list_snapshot(raw, 1).items[0];
    assert!(item.title.is_none());
    assert!(item.overview.is_none());
    assert!(item.popularity.is_none());
    assert!(item.release_date.is_none());
    assert!(item.vote_count.is_none());
    assert!(item.genre_ids.is_none());
    // Missing poster still produces a (dangling) URL
    assert_eq!(
      item.poster_path.as_deref(),
      Some("https://image.tmdb.org/t/p/original/")
    );
  }

  #[test]
  fn test_details_null_genres_map_to_empty() {
    let details = details(raw_details(None, Some("/d.jpg")));
    assert_eq!(details.id, 7);
    assert!(details.genres.is_empty());
    assert!(details
      .poster_path
      .as_deref()
      .unwrap()
      .contains("/t/p/w200//d.jpg"));
  }

  #[test]
  fn test_details_genres_keep_order() {
    let genres = vec![
      RawGenre {
        id: 28,
        name: Some("Action".to_string()),
      },
      RawGenre { id: 35, name: None },
    ];
    let details = details(raw_details(Some(genres), None));
    assert_eq!(
      details.genres,
      vec![
        Genre {
          id: 28,
          name: Some("Action".to_string())
        },
        Genre { id: 35, name: None },
      ]
    );
    assert_eq!(
      details.poster_path.as_deref(),
      Some("https://image.tmdb.org/t/p/w200/")
    );
  }

  #[test]
  fn test_list_item_carries_extra_fields_through() {
    let raw = RawListPage {
      page: 1,
      results: vec![RawListItem {
        id: 939243,
        adult: Some(false),
        backdrop_path: Some("/b.jpg".to_string()),
        genre_ids: Some(vec![28, 878]),
        original_language: Some("en".to_string()),
        original_title: Some("Sonic the Hedgehog 3".to_string()),
        video: Some(false),
        vote_count: Some(1438),
        ..Default::default()
      }],
      total_pages: 1,
      total_results: 1,
    };

    let item = &list_snapshot(raw, 1).items[0];
    // Backdrops are passed through untouched
    assert_eq!(item.backdrop_path.as_deref(), Some("/b.jpg"));
    assert_eq!(item.genre_ids, Some(vec![28, 878]));
    assert_eq!(item.original_language.as_deref(), Some("en"));
    assert_eq!(item.original_title.as_deref(), Some("Sonic the Hedgehog 3"));
    assert_eq!(item.adult, Some(false));
    assert_eq!(item.video, Some(false));
    assert_eq!(item.vote_count, Some(1438));
  }

  #[test]
  fn test_details_nested_records_are_mapped() {
    let mut raw = raw_details(None, None);
    raw.budget = Some(122000000);
    raw.belongs_to_collection = Some(RawCollection {
      id: 720879,
      name: Some("Sonic the Hedgehog Collection".to_string()),
      poster_path: None,
      backdrop_path: None,
    });
    raw.production_countries = Some(vec![RawCountry {
      iso_3166_1: Some("JP".to_string()),
      name: Some("Japan".to_string()),
    }]);
    raw.spoken_languages = Some(vec![RawLanguage {
      english_name: Some("English".to_string()),
      iso_639_1: Some("en".to_string()),
      name: Some("English".to_string()),
    }]);

    let details = details(raw);
    assert_eq!(details.budget, Some(122000000));
    assert_eq!(details.collection.as_ref().map(|c| c.id), Some(720879));
    assert_eq!(
      details.production_countries,
      Some(vec![Country {
        code: Some("JP".to_string()),
        name: Some("Japan".to_string()),
      }])
    );
    assert_eq!(
      details.spoken_languages.unwrap()[0].code.as_deref(),
      Some("en")
    );
    // Absent lists stay absent rather than becoming empty
    assert!(details.production_companies.is_none());
    assert!(details.origin_country.is_none());
  }
}
