//! In-memory adapters for integration tests.
//!
//! Compiled only with the `test-support` feature. The repositories honour the
//! same contracts as the Diesel adapters: unique titles, ascending id order
//! and one rating per `(movie_title, rater_id)`.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

use async_trait::async_trait;

use crate::domain::ports::{
    BoxOfficeSource, BoxOfficeSourceError, MovieListQuery, MovieRepository, MovieRepositoryError,
    RatingRepository, RatingRepositoryError, RatingTotals,
};
use crate::domain::{
    BoxOfficeRecord, Movie, MovieDraft, MovieEnrichment, MovieId, Rating, RatingUpsertOutcome,
};

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    match mutex.lock() {
        Ok(guard) => guard,
        Err(_) => panic!("in-memory store mutex poisoned"),
    }
}

#[derive(Default)]
struct MovieStore {
    next_id: i64,
    rows: Vec<Movie>,
}

/// Movie repository backed by a vector.
#[derive(Default)]
pub struct InMemoryMovieRepository {
    store: Mutex<MovieStore>,
}

impl InMemoryMovieRepository {
    /// Number of stored movies.
    pub fn len(&self) -> usize {
        lock(&self.store).rows.len()
    }

    /// Whether nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Stored movie with exactly `title`, if any.
    pub fn find_by_title(&self, title: &str) -> Option<Movie> {
        lock(&self.store)
            .rows
            .iter()
            .find(|movie| movie.title == title)
            .cloned()
    }
}

#[async_trait]
impl MovieRepository for InMemoryMovieRepository {
    async fn insert(&self, draft: &MovieDraft) -> Result<MovieId, MovieRepositoryError> {
        let mut store = lock(&self.store);
        if store.rows.iter().any(|movie| movie.title == draft.title) {
            return Err(MovieRepositoryError::duplicate_title(draft.title.as_str()));
        }
        store.next_id += 1;
        let id = MovieId::new(store.next_id);
        store
            .rows
            .push(Movie::from_draft(id, draft.clone(), MovieEnrichment::default()));
        Ok(id)
    }

    async fn apply_enrichment(
        &self,
        id: MovieId,
        enrichment: &MovieEnrichment,
    ) -> Result<(), MovieRepositoryError> {
        let mut store = lock(&self.store);
        let Some(movie) = store.rows.iter_mut().find(|movie| movie.id == id) else {
            return Err(MovieRepositoryError::query(format!(
                "movie {id} vanished before update"
            )));
        };
        movie.distributor = enrichment.distributor.clone();
        movie.budget = enrichment.budget;
        movie.mpa_rating = enrichment.mpa_rating.clone();
        movie.box_office = enrichment.box_office.clone();
        Ok(())
    }

    async fn delete(&self, id: MovieId) -> Result<(), MovieRepositoryError> {
        lock(&self.store).rows.retain(|movie| movie.id != id);
        Ok(())
    }

    async fn list(&self, query: &MovieListQuery) -> Result<Vec<Movie>, MovieRepositoryError> {
        let offset = usize::try_from(query.offset)
            .map_err(|_| MovieRepositoryError::query("requested offset exceeds usize range"))?;
        let store = lock(&self.store);
        Ok(store
            .rows
            .iter()
            .filter(|movie| query.predicates.iter().all(|p| p.matches(movie)))
            .skip(offset)
            .take(query.limit)
            .cloned()
            .collect())
    }

    async fn exists_by_title(&self, title: &str) -> Result<bool, MovieRepositoryError> {
        Ok(lock(&self.store)
            .rows
            .iter()
            .any(|movie| movie.title == title))
    }
}

/// Rating repository keyed by `(movie_title, rater_id)`.
#[derive(Default)]
pub struct InMemoryRatingRepository {
    ratings: Mutex<HashMap<(String, String), f64>>,
}

#[async_trait]
impl RatingRepository for InMemoryRatingRepository {
    async fn upsert(&self, rating: &Rating) -> Result<RatingUpsertOutcome, RatingRepositoryError> {
        let previous = lock(&self.ratings).insert(
            (rating.movie_title.clone(), rating.rater_id.clone()),
            rating.value.value(),
        );
        Ok(RatingUpsertOutcome::from_inserted(previous.is_none()))
    }

    async fn totals(&self, movie_title: &str) -> Result<RatingTotals, RatingRepositoryError> {
        let ratings = lock(&self.ratings);
        let values: Vec<f64> = ratings
            .iter()
            .filter(|((title, _), _)| title == movie_title)
            .map(|(_, value)| *value)
            .collect();
        let count = u32::try_from(values.len())
            .map_err(|_| RatingRepositoryError::query("rating count exceeds u32 range"))?;
        let average = (count > 0).then(|| values.iter().sum::<f64>() / f64::from(count));
        let count = i64::from(count);
        Ok(RatingTotals { average, count })
    }
}

enum StubBehaviour {
    Records(HashMap<String, BoxOfficeRecord>),
    Fail,
    Stall(Duration),
}

/// Scriptable box-office source.
pub struct StubBoxOfficeSource {
    behaviour: StubBehaviour,
    calls: AtomicUsize,
}

impl StubBoxOfficeSource {
    fn with_behaviour(behaviour: StubBehaviour) -> Self {
        Self {
            behaviour,
            calls: AtomicUsize::new(0),
        }
    }

    /// Source that knows exactly one title.
    pub fn with_record(title: impl Into<String>, record: BoxOfficeRecord) -> Self {
        Self::with_behaviour(StubBehaviour::Records(HashMap::from([(
            title.into(),
            record,
        )])))
    }

    /// Source that knows no titles.
    pub fn empty() -> Self {
        Self::with_behaviour(StubBehaviour::Records(HashMap::new()))
    }

    /// Source whose every lookup fails with a transport error.
    pub fn failing() -> Self {
        Self::with_behaviour(StubBehaviour::Fail)
    }

    /// Source that answers nothing until `delay` has elapsed.
    pub fn stalled(delay: Duration) -> Self {
        Self::with_behaviour(StubBehaviour::Stall(delay))
    }

    /// Lookups performed so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl BoxOfficeSource for StubBoxOfficeSource {
    async fn fetch(&self, title: &str) -> Result<Option<BoxOfficeRecord>, BoxOfficeSourceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.behaviour {
            StubBehaviour::Records(records) => Ok(records.get(title).cloned()),
            StubBehaviour::Fail => Err(BoxOfficeSourceError::transport("connection refused")),
            StubBehaviour::Stall(delay) => {
                tokio::time::sleep(*delay).await;
                Ok(None)
            }
        }
    }
}
