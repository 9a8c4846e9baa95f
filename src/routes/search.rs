use axum::{
    extract::{Query, State},
    response::{Html, Redirect},
    Form,
};

use crate::{api::AppState, error::AppResult, services::movies::search_cards};

use super::list::movie_grid;

const NO_MATCHES: &str = "Sorry, nothing matched your search.";

/// First `q` (or legacy `search`) value; repeated fields are not an error
fn search_term(fields: &[(String, String)]) -> &str {
    fields
        .iter()
        .find(|(key, _)| key == "q" || key == "search")
        .map(|(_, value)| value.as_str())
        .unwrap_or_default()
}

/// Search results for `?q=`; no query means no results
pub async fn search(
    State(state): State<AppState>,
    Query(params): Query<Vec<(String, String)>>,
) -> AppResult<Html<String>> {
    let query = search_term(&params).trim();

    let movies = if query.is_empty() {
        Vec::new()
    } else {
        search_cards(state.catalog.as_ref(), query).await
    };

    movie_grid(
        &state.views,
        "Search Results",
        "Search Results",
        NO_MATCHES,
        &movies,
        Some(query),
    )
}

/// Turns a submitted search form into a bookmarkable GET URL
pub async fn search_submit(Form(fields): Form<Vec<(String, String)>>) -> Redirect {
    Redirect::to(&search_url(search_term(&fields)))
}

fn search_url(query: &str) -> String {
    format!("/search?q={}", urlencoding::encode(query))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_url_is_percent_encoded() {
        assert_eq!(search_url("star wars"), "/search?q=star%20wars");
        assert_eq!(search_url("a&b=c"), "/search?q=a%26b%3Dc");
        assert_eq!(search_url(""), "/search?q=");
    }

    fn fields(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_search_term_takes_first_matching_field() {
        assert_eq!(search_term(&fields(&[("q", "alien")])), "alien");
        assert_eq!(search_term(&fields(&[("search", "nemo")])), "nemo");
        assert_eq!(
            search_term(&fields(&[("page", "2"), ("q", "a"), ("search", "b")])),
            "a"
        );
        assert_eq!(search_term(&fields(&[("q", "a"), ("q", "b")])), "a");
        assert_eq!(search_term(&[]), "");
    }
}
