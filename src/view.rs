//! Plain-text rendering of catalog data for the terminal.

use std::fmt::{self, Write};

use crate::catalog::{Details, ListSnapshot};

const UNKNOWN: &str = "-";

pub fn render_list(out: &mut impl Write, snapshot: &ListSnapshot) -> fmt::Result {
  writeln!(
    out,
    "Page {} of {} ({} results)",
    snapshot.page, snapshot.total_pages, snapshot.total_results
  )?;

  for item in &snapshot.items {
    let year = item
      .release_date
      .as_deref()
      .and_then(|d| d.get(..4))
      .unwrap_or(UNKNOWN);
    writeln!(
      out,
      "{:>9}  {:<48}  {:>4}  {:>4}",
      item.id,
      truncate(item.title.as_deref().unwrap_or(UNKNOWN), 48),
      year,
      item
        .vote_average
        .map(|v| format!("{:.1}", v))
        .unwrap_or_else(|| UNKNOWN.to_string()),
    )?;
  }

  Ok(())
}

pub fn render_details(out: &mut impl Write, details: &Details) -> fmt::Result {
  let title = details.title.as_deref().unwrap_or(UNKNOWN);
  writeln!(out, "{} [{}]", title, details.id)?;
  if let Some(original) = details
    .original_title
    .as_deref()
    .filter(|o| Some(*o) != details.title.as_deref())
  {
    writeln!(out, "({})", original)?;
  }
  if let Some(tagline) = details.tagline.as_deref().filter(|t| !t.is_empty()) {
    writeln!(out, "\"{}\"", tagline)?;
  }
  writeln!(out)?;

  let genres = join(details.genres.iter().filter_map(|g| g.name.as_deref()));
  let languages = join(
    details
      .spoken_languages
      .iter()
      .flatten()
      .filter_map(|l| l.english_name.as_deref().or(l.name.as_deref())),
  );
  let companies = join(
    details
      .production_companies
      .iter()
      .flatten()
      .filter_map(|c| c.name.as_deref()),
  );

  let rows: [(&str, String); 14] = [
    ("Status", opt(&details.status)),
    ("Released", opt(&details.release_date)),
    (
      "Runtime",
      details
        .runtime
        .map(|m| format!("{} min", m))
        .unwrap_or_else(|| UNKNOWN.to_string()),
    ),
    ("Genres", genres),
    ("Language", languages),
    (
      "Rating",
      match details.vote_average {
        Some(avg) => format!("{:.1} ({} votes)", avg, details.vote_count),
        None => format!("{} ({} votes)", UNKNOWN, details.vote_count),
      },
    ),
    (
      "Budget",
      details
        .budget
        .map(|b| format!("${}", b))
        .unwrap_or_else(|| UNKNOWN.to_string()),
    ),
    ("Revenue", format!("${}", details.revenue)),
    (
      "Part of",
      details
        .collection
        .as_ref()
        .and_then(|c| c.name.clone())
        .unwrap_or_else(|| UNKNOWN.to_string()),
    ),
    ("Studios", companies),
    ("IMDb", opt(&details.imdb_id)),
    ("Homepage", opt(&details.homepage)),
    ("Poster", opt(&details.poster_path)),
    ("Backdrop", opt(&details.backdrop_path)),
  ];

  for (label, value) in rows {
    writeln!(out, "{:<10}{}", label, value)?;
  }

  if let Some(overview) = details.overview.as_deref() {
    writeln!(out)?;
    writeln!(out, "{}", overview)?;
  }

  Ok(())
}

fn opt(value: &Option<String>) -> String {
  value.clone().unwrap_or_else(|| UNKNOWN.to_string())
}

/// Comma-join names, or the unknown marker when there are none.
fn join<'a>(names: impl Iterator<Item = &'a str>) -> String {
  let joined = names.collect::<Vec<_>>().join(", ");
  if joined.is_empty() {
    UNKNOWN.to_string()
  } else {
    joined
  }
}

fn truncate(s: &str, max: usize) -> String {
  if s.chars().count() <= max {
    s.to_string()
  } else {
    let cut: String = s.chars().take(max.saturating_sub(1)).collect();
    format!("{}…", cut)
  }
}
