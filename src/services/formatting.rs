//! Display helpers turning raw catalog metadata into strings for templates.

use crate::models::Genre;

pub const POSTER_BASE_URL: &str = "https://image.tmdb.org/t/p/";
pub const POSTER_SIZE: &str = "w500";
pub const DEFAULT_POSTER_URL: &str = "http://www.reelviews.net/resources/img/default_poster.jpg";

/// Turns a TMDB image path into a full poster URL
pub fn poster_url(image_path: Option<&str>) -> String {
    match image_path {
        Some(path) if !path.is_empty() => format!("{}{}{}", POSTER_BASE_URL, POSTER_SIZE, path),
        _ => DEFAULT_POSTER_URL.to_string(),
    }
}

/// Year part of a `YYYY-MM-DD` or `YYYY` release date
pub fn release_year(release_date: Option<&str>) -> Option<String> {
    let date = release_date.filter(|d| !d.is_empty())?;
    date.split('-').next().map(str::to_string)
}

/// Comma separated genre names
pub fn genres_to_string(genres: Option<&[Genre]>) -> Option<String> {
    let genres = genres.filter(|g| !g.is_empty())?;
    Some(
        genres
            .iter()
            .map(|g| g.name.as_str())
            .collect::<Vec<_>>()
            .join(", "),
    )
}
