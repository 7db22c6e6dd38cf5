//! Discovery deck state
//!
//! Holds the deck of candidate cards, the platform filter and the swipe
//! cursor. Swiping near the end of the deck asks for a prefetch; changing
//! the filter throws the deck away and asks for a fresh batch.

use std::collections::BTreeSet;

use anyhow::Result;
use tracing::{debug, error};

use crate::merge::append_new;
use crate::models::{Movie, Opinion, Platform};

/// A prefetch is requested once the swiped card is this close to the end
pub const PREFETCH_THRESHOLD: usize = 10;

// =============================================================================
// Platform filter
// =============================================================================

/// Set of selected platforms, iterated in a stable order
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PlatformSet(BTreeSet<Platform>);

impl PlatformSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Filter applied on first launch
    pub fn default_selection() -> Self {
        [
            Platform::DisneyPlus,
            Platform::Netflix,
            Platform::PrimeVideo,
            Platform::HboMax,
            Platform::ParamountPlus,
        ]
        .into_iter()
        .collect()
    }

    pub fn contains(&self, platform: Platform) -> bool {
        self.0.contains(&platform)
    }

    /// Flip a platform in or out of the set
    pub fn toggle(&mut self, platform: Platform) {
        if !self.0.remove(&platform) {
            self.0.insert(platform);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn to_vec(&self) -> Vec<Platform> {
        self.0.iter().copied().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = Platform> + '_ {
        self.0.iter().copied()
    }
}

impl FromIterator<Platform> for PlatformSet {
    fn from_iter<I: IntoIterator<Item = Platform>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

// =============================================================================
// Swipes
// =============================================================================

/// Direction a card leaves the deck
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwipeDirection {
    Left,
    Right,
    Up,
    Down,
}

impl SwipeDirection {
    /// Opinion recorded for a swipe in this direction
    pub fn opinion(self) -> Opinion {
        match self {
            SwipeDirection::Left => Opinion::DidntLikeIt,
            SwipeDirection::Right => Opinion::LovedIt,
            SwipeDirection::Up => Opinion::WantToWatch,
            SwipeDirection::Down => Opinion::Pass,
        }
    }
}

/// What the caller must do after a swipe
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SwipeOutcome {
    pub movie_id: u64,
    pub opinion: Opinion,
    /// Start a background fetch for more candidates
    pub prefetch: bool,
}

/// Which side of the top card is showing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CardFace {
    #[default]
    Poster,
    Details,
}

/// Kind of discovery fetch in flight
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiscoverRequest {
    /// First load or filter change; the deck was already cleared
    Reset,
    /// Background top-up near the end of the deck
    Prefetch,
}

// =============================================================================
// Deck state
// =============================================================================

/// Discovery screen state
#[derive(Debug, Clone, PartialEq)]
pub struct DiscoveryState {
    pub deck: Vec<Movie>,
    /// Index of the top card (number of cards swiped so far)
    pub index: usize,
    /// Filter used for requests
    pub platforms: PlatformSet,
    /// Filter being edited in the selector, applied on confirm
    pub pending: PlatformSet,
    pub loading: bool,
    pub preloading: bool,
    pub face: CardFace,
}

impl Default for DiscoveryState {
    fn default() -> Self {
        Self::with_platforms(PlatformSet::default_selection())
    }
}

impl DiscoveryState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_platforms(platforms: PlatformSet) -> Self {
        Self {
            deck: Vec::new(),
            index: 0,
            pending: platforms.clone(),
            platforms,
            loading: false,
            preloading: false,
            face: CardFace::Poster,
        }
    }

    /// Card on top of the deck
    pub fn current(&self) -> Option<&Movie> {
        self.deck.get(self.index)
    }

    /// Cards still to swipe
    pub fn remaining(&self) -> usize {
        self.deck.len().saturating_sub(self.index)
    }

    /// Show the spinner instead of the deck
    pub fn show_loading(&self) -> bool {
        self.loading || (self.preloading && self.index >= self.deck.len())
    }

    /// Kick off the first load
    pub fn begin_initial(&mut self) -> DiscoverRequest {
        self.loading = true;
        DiscoverRequest::Reset
    }

    /// Open the selector with the applied filter
    pub fn edit_filter(&mut self) {
        self.pending = self.platforms.clone();
    }

    pub fn toggle_pending(&mut self, platform: Platform) {
        self.pending.toggle(platform);
    }

    /// Apply the edited filter. A changed set discards the deck and returns
    /// a reset request; an unchanged set does nothing.
    pub fn apply_filter(&mut self) -> Option<DiscoverRequest> {
        if self.pending == self.platforms {
            return None;
        }

        debug!(platforms = ?self.pending.to_vec(), "platform filter changed");
        self.platforms = self.pending.clone();
        self.deck.clear();
        self.index = 0;
        self.face = CardFace::Poster;
        self.loading = true;
        Some(DiscoverRequest::Reset)
    }

    /// Swipe the top card away
    pub fn swipe(&mut self, direction: SwipeDirection) -> Option<SwipeOutcome> {
        let swiped = self.index;
        let movie_id = self.deck.get(swiped)?.id;

        self.index += 1;
        self.face = CardFace::Poster;

        let near_end = swiped + PREFETCH_THRESHOLD >= self.deck.len();
        let prefetch = near_end && !self.preloading && !self.loading;
        if prefetch {
            debug!(swiped, deck = self.deck.len(), "prefetching next candidates");
            self.preloading = true;
        }

        Some(SwipeOutcome {
            movie_id,
            opinion: direction.opinion(),
            prefetch,
        })
    }

    /// Flip the top card between poster and details
    pub fn flip(&mut self) {
        self.face = match self.face {
            CardFace::Poster => CardFace::Details,
            CardFace::Details => CardFace::Poster,
        };
    }

    /// Fold a discovery result into the deck
    pub fn apply(&mut self, request: DiscoverRequest, result: Result<Vec<Movie>>) {
        match result {
            Ok(movies) => {
                debug!(?request, count = movies.len(), "discovery batch loaded");
                let deck = std::mem::take(&mut self.deck);
                self.deck = append_new(deck, movies);
            }
            Err(e) => error!(?request, "Error while fetching movies: {:#}", e),
        }
        self.loading = false;
        self.preloading = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn movie(id: u64) -> Movie {
        Movie {
            id,
            title: format!("Movie {}", id),
            image: String::new(),
            date: "2019".into(),
            rate: 5.0,
            overview: String::new(),
            trailer_key: None,
            runtime: "95".into(),
            genres: Vec::new(),
            director: None,
            platforms: Vec::new(),
        }
    }

    fn deck_of(n: u64) -> DiscoveryState {
        let mut state = DiscoveryState::new();
        state.deck = (1..=n).map(movie).collect();
        state
    }

    #[test]
    fn test_default_selection() {
        let set = PlatformSet::default_selection();
        assert_eq!(set.len(), 5);
        assert!(set.contains(Platform::Netflix));
        assert!(!set.contains(Platform::Hulu));
    }

    #[test]
    fn test_toggle() {
        let mut set = PlatformSet::new();
        set.toggle(Platform::HboMax);
        assert!(set.contains(Platform::HboMax));
        set.toggle(Platform::HboMax);
        assert!(set.is_empty());
    }

    #[test]
    fn test_swipe_directions_map_to_opinions() {
        assert_eq!(SwipeDirection::Left.opinion(), Opinion::DidntLikeIt);
        assert_eq!(SwipeDirection::Right.opinion(), Opinion::LovedIt);
        assert_eq!(SwipeDirection::Up.opinion(), Opinion::WantToWatch);
        assert_eq!(SwipeDirection::Down.opinion(), Opinion::Pass);
    }

    #[test]
    fn test_swipe_far_from_end_no_prefetch() {
        let mut state = deck_of(20);
        let outcome = state.swipe(SwipeDirection::Right).unwrap();
        assert_eq!(outcome.movie_id, 1);
        assert_eq!(outcome.opinion, Opinion::LovedIt);
        assert!(!outcome.prefetch);
        assert_eq!(state.index, 1);
    }

    #[test]
    fn test_swipe_near_end_prefetches_once() {
        let mut state = deck_of(12);
        // Card at index 2 is exactly 10 from the end
        state.index = 2;
        let outcome = state.swipe(SwipeDirection::Left).unwrap();
        assert!(outcome.prefetch);
        assert!(state.preloading);

        let outcome = state.swipe(SwipeDirection::Left).unwrap();
        assert!(!outcome.prefetch);
    }

    #[test]
    fn test_swipe_blocked_while_loading() {
        let mut state = deck_of(3);
        state.loading = true;
        let outcome = state.swipe(SwipeDirection::Up).unwrap();
        assert!(!outcome.prefetch);
    }

    #[test]
    fn test_swipe_empty_deck() {
        let mut state = DiscoveryState::new();
        assert!(state.swipe(SwipeDirection::Right).is_none());
        assert_eq!(state.index, 0);
    }

    #[test]
    fn test_swipe_resets_face() {
        let mut state = deck_of(15);
        state.flip();
        assert_eq!(state.face, CardFace::Details);
        state.swipe(SwipeDirection::Down);
        assert_eq!(state.face, CardFace::Poster);
    }

    #[test]
    fn test_apply_filter_changed_resets_deck() {
        let mut state = DiscoveryState::with_platforms([Platform::Netflix].into_iter().collect());
        state.deck = vec![movie(1), movie(2)];
        state.index = 1;

        state.edit_filter();
        state.toggle_pending(Platform::HboMax);
        let request = state.apply_filter();

        assert_eq!(request, Some(DiscoverRequest::Reset));
        assert!(state.deck.is_empty());
        assert_eq!(state.index, 0);
        assert!(state.loading);
        assert_eq!(state.platforms.to_vec(), vec![Platform::Netflix, Platform::HboMax]);
    }

    #[test]
    fn test_apply_filter_unchanged_is_noop() {
        let mut state = deck_of(4);
        state.edit_filter();
        assert_eq!(state.apply_filter(), None);
        assert_eq!(state.deck.len(), 4);
        assert!(!state.loading);
    }

    #[test]
    fn test_apply_appends_without_replacing() {
        let mut state = deck_of(2);
        state.preloading = true;
        let mut replacement = movie(2);
        replacement.title = "Changed".into();

        state.apply(DiscoverRequest::Prefetch, Ok(vec![replacement, movie(3)]));

        let ids: Vec<u64> = state.deck.iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert_eq!(state.deck[1].title, "Movie 2");
        assert!(!state.preloading);
    }

    #[test]
    fn test_apply_failure_keeps_deck() {
        let mut state = deck_of(2);
        state.loading = true;
        state.apply(DiscoverRequest::Reset, Err(anyhow::anyhow!("timeout")));
        assert_eq!(state.deck.len(), 2);
        assert!(!state.loading);
    }

    #[test]
    fn test_show_loading_when_exhausted_and_preloading() {
        let mut state = deck_of(1);
        state.swipe(SwipeDirection::Right);
        assert!(state.preloading);
        assert!(state.show_loading());
    }
}
