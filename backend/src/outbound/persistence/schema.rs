//! Diesel table definitions.
//!
//! Must match `backend/migrations` exactly. Column order matters: row structs
//! in `models.rs` load by position.

diesel::table! {
    /// Movie catalogue.
    ///
    /// The five `box_office_*` columns are either all NULL or all set.
    movies (id) {
        id -> Int8,
        title -> Text,
        genre -> Text,
        release_date -> Date,
        distributor -> Nullable<Text>,
        budget -> Nullable<Int8>,
        mpa_rating -> Nullable<Text>,
        box_office_worldwide -> Nullable<Int8>,
        box_office_opening_weekend_usa -> Nullable<Int8>,
        box_office_currency -> Nullable<Text>,
        box_office_source -> Nullable<Text>,
        box_office_last_updated -> Nullable<Timestamptz>,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// One rating per `(movie_title, rater_id)`.
    ratings (movie_title, rater_id) {
        movie_title -> Text,
        rater_id -> Text,
        rating -> Float8,
        updated_at -> Timestamptz,
    }
}
