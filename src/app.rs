//! App state and core application logic
//!
//! Manages the screen state machine and navigation stack, turns key presses
//! into state changes, and queues the network work those changes require.
//! The event loop drains [`Effect`]s, runs them on tasks, and feeds the
//! results back as [`AppEvent`]s.

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::discovery::{DiscoverRequest, DiscoveryState, PlatformSet, SwipeDirection, SwipeOutcome};
use crate::models::{Movie, Opinion, Platform, WatchlistPage};
use crate::watchlist::{PageRequest, WatchlistState};

/// Posters per row on the watchlist screen
pub const WATCHLIST_COLUMNS: usize = 3;

// =============================================================================
// App State Enum
// =============================================================================

/// Application state enum representing current screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppState {
    /// Swipeable deck of candidates
    #[default]
    Discover,
    /// Platform selector overlay
    Filter,
    /// Grid of "want to watch" movies
    Watchlist,
    /// Full movie info
    Detail,
}

// =============================================================================
// Effects and Events
// =============================================================================

/// Network work requested by a state change
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    Discover {
        request: DiscoverRequest,
        platforms: Vec<Platform>,
    },
    RecordOpinion {
        movie_id: u64,
        opinion: Opinion,
    },
    Watchlist(PageRequest),
}

/// Result of an effect, delivered back to the UI loop
#[derive(Debug)]
pub enum AppEvent {
    Discovered(DiscoverRequest, Result<Vec<Movie>>),
    WatchlistLoaded(PageRequest, Result<WatchlistPage>),
}

// =============================================================================
// Grid Selection State
// =============================================================================

/// Selection state for the poster grid
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridState {
    pub selected: usize,
    /// First visible row
    pub offset: usize,
    pub len: usize,
    pub columns: usize,
    /// Rows that fit on screen at the last render, 0 until drawn
    pub visible_rows: usize,
}

impl GridState {
    pub fn new(len: usize, columns: usize) -> Self {
        Self {
            selected: 0,
            offset: 0,
            len,
            columns: columns.max(1),
            visible_rows: 0,
        }
    }

    pub fn row(&self) -> usize {
        self.selected / self.columns
    }

    pub fn rows(&self) -> usize {
        self.len.div_ceil(self.columns)
    }

    /// Whether the selection sits on the last row
    pub fn at_last_row(&self) -> bool {
        self.len > 0 && self.row() + 1 >= self.rows()
    }

    pub fn left(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn right(&mut self) {
        if self.selected + 1 < self.len {
            self.selected += 1;
        }
    }

    pub fn up(&mut self) {
        if self.selected >= self.columns {
            self.selected -= self.columns;
        }
    }

    /// Move down a row, landing on the last item of a short final row
    pub fn down(&mut self) {
        if self.row() + 1 < self.rows() {
            self.selected = (self.selected + self.columns).min(self.len - 1);
        }
    }

    /// Keep the selected row inside a viewport of `visible_rows`
    pub fn scroll_into_view(&mut self, visible_rows: usize) {
        self.visible_rows = visible_rows;
        let row = self.row();
        if row < self.offset {
            self.offset = row;
        } else if visible_rows > 0 && row >= self.offset + visible_rows {
            self.offset = row + 1 - visible_rows;
        }
    }

    /// Whether every row is on screen, so scrolling can't reach the end
    pub fn fits_viewport(&self) -> bool {
        self.visible_rows > 0 && self.rows() <= self.visible_rows
    }

    /// Update length (e.g., when a page arrives)
    pub fn set_len(&mut self, len: usize) {
        self.len = len;
        if len == 0 {
            self.selected = 0;
            self.offset = 0;
        } else if self.selected >= len {
            self.selected = len - 1;
        }
    }
}

// =============================================================================
// Main Application State
// =============================================================================

/// Main application state
#[derive(Debug)]
pub struct App {
    /// Current screen
    pub state: AppState,
    /// Navigation history stack
    pub nav_stack: Vec<AppState>,
    /// Whether the app is running
    pub running: bool,

    pub discovery: DiscoveryState,
    pub watchlist: WatchlistState,
    pub grid: GridState,
    /// Highlighted row in the platform selector
    pub filter_cursor: usize,
    /// Movie shown on the detail screen
    pub detail: Option<Movie>,
    /// Last swipe, for the overlay label
    pub last_swipe: Option<SwipeOutcome>,

    effects: Vec<Effect>,
}

impl Default for App {
    fn default() -> Self {
        Self::new(PlatformSet::default_selection())
    }
}

impl App {
    /// Create a new App with the given platform filter
    pub fn new(platforms: PlatformSet) -> Self {
        Self {
            state: AppState::Discover,
            nav_stack: Vec::new(),
            running: true,
            discovery: DiscoveryState::with_platforms(platforms),
            watchlist: WatchlistState::new(),
            grid: GridState::new(0, WATCHLIST_COLUMNS),
            filter_cursor: 0,
            detail: None,
            last_swipe: None,
            effects: Vec::new(),
        }
    }

    /// Queue the first discovery load
    pub fn start(&mut self) {
        let request = self.discovery.begin_initial();
        self.queue_discover(request);
    }

    /// Drain queued effects
    pub fn take_effects(&mut self) -> Vec<Effect> {
        std::mem::take(&mut self.effects)
    }

    fn queue_discover(&mut self, request: DiscoverRequest) {
        self.effects.push(Effect::Discover {
            request,
            platforms: self.discovery.platforms.to_vec(),
        });
    }

    /// Navigate to a new state, pushing current to stack
    pub fn navigate(&mut self, state: AppState) {
        if self.state == state {
            return;
        }
        self.nav_stack.push(self.state);
        self.state = state;
        self.on_enter(state);
    }

    /// Switch between the two top-level tabs without growing the stack
    pub fn switch_tab(&mut self, state: AppState) {
        self.nav_stack.clear();
        if self.state != state {
            self.state = state;
            self.on_enter(state);
        }
    }

    /// Screen focus hooks
    fn on_enter(&mut self, state: AppState) {
        match state {
            AppState::Watchlist => self.refresh_watchlist(),
            AppState::Filter => {
                self.discovery.edit_filter();
                self.filter_cursor = 0;
            }
            AppState::Discover | AppState::Detail => {}
        }
    }

    /// Go back to previous state
    pub fn back(&mut self) -> bool {
        if let Some(prev) = self.nav_stack.pop() {
            self.state = prev;
            // Regaining focus reloads the list; the filter hook must not rerun
            if prev == AppState::Watchlist {
                self.refresh_watchlist();
            }
            true
        } else {
            false
        }
    }

    /// Quit the application
    pub fn quit(&mut self) {
        self.running = false;
    }

    /// Open the detail screen for a movie
    pub fn open_detail(&mut self, movie: Movie) {
        self.detail = Some(movie);
        self.navigate(AppState::Detail);
    }

    // -------------------------------------------------------------------------
    // Discovery
    // -------------------------------------------------------------------------

    /// Swipe the top card and queue the opinion (and a prefetch if due)
    pub fn swipe(&mut self, direction: SwipeDirection) {
        let Some(outcome) = self.discovery.swipe(direction) else {
            return;
        };

        self.effects.push(Effect::RecordOpinion {
            movie_id: outcome.movie_id,
            opinion: outcome.opinion,
        });
        if outcome.prefetch {
            self.queue_discover(DiscoverRequest::Prefetch);
        }
        self.last_swipe = Some(outcome);
    }

    /// Confirm the platform selector
    pub fn apply_filter(&mut self) {
        if let Some(request) = self.discovery.apply_filter() {
            self.last_swipe = None;
            self.queue_discover(request);
        }
        self.back();
    }

    // -------------------------------------------------------------------------
    // Watchlist
    // -------------------------------------------------------------------------

    /// Reload the watchlist from page 1
    pub fn refresh_watchlist(&mut self) {
        if let Some(request) = self.watchlist.begin(true) {
            self.effects.push(Effect::Watchlist(request));
        }
    }

    /// Fetch the next page once the selection reaches the end of the list
    fn load_more_if_at_end(&mut self) {
        if self.grid.len == 0 || self.grid.at_last_row() {
            self.load_more();
        }
    }

    fn load_more(&mut self) {
        if self.watchlist.is_busy() {
            return;
        }
        if let Some(request) = self.watchlist.begin(false) {
            self.effects.push(Effect::Watchlist(request));
        }
    }

    pub fn selected_watchlist_movie(&self) -> Option<&Movie> {
        self.watchlist.movies.get(self.grid.selected)
    }

    // -------------------------------------------------------------------------
    // Async results
    // -------------------------------------------------------------------------

    /// Apply the result of a finished effect
    pub fn handle_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::Discovered(request, result) => self.discovery.apply(request, result),
            AppEvent::WatchlistLoaded(request, result) => {
                let grew = matches!(&result, Ok(page) if !page.movies.is_empty());
                if request.reset && result.is_ok() {
                    let visible_rows = self.grid.visible_rows;
                    self.grid = GridState::new(0, WATCHLIST_COLUMNS);
                    self.grid.visible_rows = visible_rows;
                }
                self.watchlist.apply(request, result);
                self.grid.set_len(self.watchlist.movies.len());

                // A short list never scrolls to its end, so keep filling
                if grew && self.grid.fits_viewport() {
                    self.load_more();
                }
            }
        }
    }

    // -------------------------------------------------------------------------
    // Keyboard Event Handling
    // -------------------------------------------------------------------------

    /// Handle keyboard event, returns true if event was consumed
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.quit();
            return true;
        }

        match key.code {
            KeyCode::Char('q') if self.state != AppState::Filter => {
                self.quit();
                return true;
            }
            KeyCode::Esc => {
                return self.back();
            }
            KeyCode::Char('1') if self.state != AppState::Filter => {
                self.switch_tab(AppState::Discover);
                return true;
            }
            KeyCode::Char('2') | KeyCode::Char('w') if self.state != AppState::Filter => {
                self.switch_tab(AppState::Watchlist);
                return true;
            }
            _ => {}
        }

        match self.state {
            AppState::Discover => self.handle_discover_key(key),
            AppState::Filter => self.handle_filter_key(key),
            AppState::Watchlist => self.handle_watchlist_key(key),
            AppState::Detail => false,
        }
    }

    fn handle_discover_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Left | KeyCode::Char('h') => self.swipe(SwipeDirection::Left),
            KeyCode::Right | KeyCode::Char('l') => self.swipe(SwipeDirection::Right),
            KeyCode::Up | KeyCode::Char('k') => self.swipe(SwipeDirection::Up),
            KeyCode::Down | KeyCode::Char('j') => self.swipe(SwipeDirection::Down),
            KeyCode::Char(' ') | KeyCode::Char('i') => self.discovery.flip(),
            KeyCode::Char('f') => self.navigate(AppState::Filter),
            KeyCode::Enter => {
                if let Some(movie) = self.discovery.current().cloned() {
                    self.open_detail(movie);
                }
            }
            _ => return false,
        }
        true
    }

    fn handle_filter_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.filter_cursor = self.filter_cursor.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if self.filter_cursor + 1 < Platform::ALL.len() {
                    self.filter_cursor += 1;
                }
            }
            KeyCode::Char(' ') => {
                let platform = Platform::ALL[self.filter_cursor];
                self.discovery.toggle_pending(platform);
            }
            KeyCode::Enter => self.apply_filter(),
            _ => return false,
        }
        true
    }

    fn handle_watchlist_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Left | KeyCode::Char('h') => self.grid.left(),
            KeyCode::Right | KeyCode::Char('l') => {
                self.grid.right();
                self.load_more_if_at_end();
            }
            KeyCode::Up | KeyCode::Char('k') => self.grid.up(),
            KeyCode::Down | KeyCode::Char('j') => {
                self.grid.down();
                self.load_more_if_at_end();
            }
            KeyCode::Char('r') => self.refresh_watchlist(),
            KeyCode::Enter => {
                if let Some(movie) = self.selected_watchlist_movie().cloned() {
                    self.open_detail(movie);
                }
            }
            _ => return false,
        }
        true
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
