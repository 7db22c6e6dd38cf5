//! Identifier-keyed merging of movie lists
//!
//! Both screens grow their lists page by page. These helpers keep the
//! collection free of duplicate ids while preserving first-seen order.

use std::collections::{HashMap, HashSet};

use crate::models::Movie;

/// Fold `existing` then `incoming` through an ordered map keyed by id.
///
/// A later movie with an already-seen id replaces the earlier value at the
/// earlier position. Unseen ids are appended in the order they arrive.
pub fn merge_by_id(existing: Vec<Movie>, incoming: Vec<Movie>) -> Vec<Movie> {
    let mut positions: HashMap<u64, usize> = HashMap::with_capacity(existing.len() + incoming.len());
    let mut merged: Vec<Movie> = Vec::with_capacity(existing.len() + incoming.len());

    for movie in existing.into_iter().chain(incoming) {
        match positions.get(&movie.id) {
            Some(&idx) => merged[idx] = movie,
            None => {
                positions.insert(movie.id, merged.len());
                merged.push(movie);
            }
        }
    }

    merged
}

/// Append the movies of `incoming` whose id is not already present.
///
/// Existing entries are never replaced.
pub fn append_new(mut existing: Vec<Movie>, incoming: Vec<Movie>) -> Vec<Movie> {
    let mut seen: HashSet<u64> = existing.iter().map(|m| m.id).collect();
    for movie in incoming {
        if seen.insert(movie.id) {
            existing.push(movie);
        }
    }
    existing
}

#[cfg(test)]
mod tests {
    use super::*;

    fn movie(id: u64, title: &str) -> Movie {
        Movie {
            id,
            title: title.to_string(),
            image: String::new(),
            date: "2020".into(),
            rate: 7.0,
            overview: String::new(),
            trailer_key: None,
            runtime: "100".into(),
            genres: Vec::new(),
            director: None,
            platforms: Vec::new(),
        }
    }

    fn ids(movies: &[Movie]) -> Vec<u64> {
        movies.iter().map(|m| m.id).collect()
    }

    #[test]
    fn test_merge_overlapping_page() {
        let merged = merge_by_id(
            vec![movie(1, "a"), movie(2, "b")],
            vec![movie(2, "b2"), movie(3, "c")],
        );
        assert_eq!(ids(&merged), vec![1, 2, 3]);
        // Later value wins, earlier position kept
        assert_eq!(merged[1].title, "b2");
    }

    #[test]
    fn test_merge_disjoint_pages_keeps_order() {
        let merged = merge_by_id(
            vec![movie(5, "e"), movie(1, "a")],
            vec![movie(9, "i"), movie(2, "b")],
        );
        assert_eq!(ids(&merged), vec![5, 1, 9, 2]);
    }

    #[test]
    fn test_merge_dedups_within_incoming() {
        let merged = merge_by_id(Vec::new(), vec![movie(4, "x"), movie(4, "y"), movie(6, "z")]);
        assert_eq!(ids(&merged), vec![4, 6]);
        assert_eq!(merged[0].title, "y");
    }

    #[test]
    fn test_merge_empty_incoming() {
        let merged = merge_by_id(vec![movie(1, "a")], Vec::new());
        assert_eq!(ids(&merged), vec![1]);
    }

    #[test]
    fn test_append_new_never_replaces() {
        let merged = append_new(
            vec![movie(1, "a"), movie(2, "b")],
            vec![movie(2, "b2"), movie(3, "c"), movie(3, "c2")],
        );
        assert_eq!(ids(&merged), vec![1, 2, 3]);
        assert_eq!(merged[1].title, "b");
        assert_eq!(merged[2].title, "c");
    }
}
