//! End-to-end HTTP behaviour over in-memory adapters.

mod support;

use std::time::Duration;

use actix_http::Request;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::http::header::LOCATION;
use actix_web::test;
use movie_catalogue::inbound::http::movies::{MovieBody, MoviePageBody};
use movie_catalogue::middleware::TRACE_ID_HEADER;
use movie_catalogue::test_support::StubBoxOfficeSource;
use rstest::rstest;
use serde_json::{Value, json};

use support::{Catalogue, bearer, inception_record};

fn movie(title: &str, genre: &str, release_date: &str) -> Value {
    json!({ "title": title, "genre": genre, "releaseDate": release_date })
}

#[rstest]
#[actix_rt::test]
async fn user_values_win_over_enrichment_and_gaps_are_filled() {
    let catalogue = Catalogue::new(StubBoxOfficeSource::with_record(
        "Inception",
        inception_record(),
    ));
    let app = test::init_service(catalogue.app()).await;

    let mut payload = movie("Inception", "Sci-Fi", "2010-07-16");
    payload["distributor"] = json!("Legendary");
    let req = test::TestRequest::post()
        .uri("/movies")
        .insert_header(bearer())
        .set_json(payload)
        .to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::CREATED);
    assert_eq!(
        res.headers().get(LOCATION).and_then(|v| v.to_str().ok()),
        Some("/movies/Inception")
    );
    let body: MovieBody = test::read_body_json(res).await;
    assert_eq!(body.distributor.as_deref(), Some("Legendary"));
    assert_eq!(body.budget, Some(160_000_000));
    assert_eq!(body.mpa_rating.as_deref(), Some("PG-13"));
    let box_office = body.box_office.expect("box office attached");
    assert_eq!(box_office.revenue.worldwide, 836_836_967);
    assert_eq!(catalogue.source.calls(), 1);
}

#[rstest]
#[case::upstream_error(StubBoxOfficeSource::failing())]
#[case::upstream_stall(StubBoxOfficeSource::stalled(Duration::from_secs(5)))]
#[case::unknown_title(StubBoxOfficeSource::empty())]
#[actix_rt::test]
async fn creation_degrades_without_enrichment(#[case] source: StubBoxOfficeSource) {
    let catalogue = Catalogue::new(source);
    let app = test::init_service(catalogue.app()).await;

    let req = test::TestRequest::post()
        .uri("/movies")
        .insert_header(bearer())
        .set_json(movie("Heat", "Crime", "1995-12-15"))
        .to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["boxOffice"], Value::Null);
    assert_eq!(body["distributor"], Value::Null);
    assert_eq!(catalogue.movies.len(), 1);
}

#[rstest]
#[actix_rt::test]
async fn duplicate_title_is_rejected_and_first_record_kept() {
    let catalogue = Catalogue::new(StubBoxOfficeSource::empty());
    let app = test::init_service(catalogue.app()).await;

    let first = test::TestRequest::post()
        .uri("/movies")
        .insert_header(bearer())
        .set_json(movie("Inception", "Sci-Fi", "2010-07-16"))
        .to_request();
    assert_eq!(test::call_service(&app, first).await.status(), StatusCode::CREATED);

    let second = test::TestRequest::post()
        .uri("/movies")
        .insert_header(bearer())
        .set_json(movie("Inception", "Drama", "2011-01-01"))
        .to_request();
    let res = test::call_service(&app, second).await;
    assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["code"], "VALIDATION_ERROR");

    let stored = catalogue.movies.find_by_title("Inception").expect("first kept");
    assert_eq!(stored.genre, "Sci-Fi");
    assert_eq!(catalogue.movies.len(), 1);
}

#[rstest]
#[actix_rt::test]
async fn creation_requires_bearer_token() {
    let catalogue = Catalogue::new(StubBoxOfficeSource::empty());
    let app = test::init_service(catalogue.app()).await;

    let req = test::TestRequest::post()
        .uri("/movies")
        .insert_header(("Authorization", "Bearer wrong"))
        .set_json(movie("Heat", "Crime", "1995-12-15"))
        .to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    let trace_header = res
        .headers()
        .get(TRACE_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned)
        .expect("trace header");
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["code"], "UNAUTHORIZED");
    assert_eq!(body["traceId"], trace_header.as_str());
    assert!(catalogue.movies.is_empty());
}

async fn seed(
    app: &impl Service<Request, Response = ServiceResponse, Error = actix_web::Error>,
    movies: &[(&str, &str, &str)],
) {
    for (title, genre, date) in movies {
        let req = test::TestRequest::post()
            .uri("/movies")
            .insert_header(bearer())
            .set_json(movie(title, genre, date))
            .to_request();
        assert_eq!(test::call_service(app, req).await.status(), StatusCode::CREATED);
    }
}

#[rstest]
#[actix_rt::test]
async fn pagination_walks_every_match_once() {
    let catalogue = Catalogue::new(StubBoxOfficeSource::empty());
    let app = test::init_service(catalogue.app()).await;
    seed(
        &app,
        &[
            ("Heat", "Crime", "1995-12-15"),
            ("Casino", "Crime", "1995-11-22"),
            ("Se7en", "Crime", "1995-09-22"),
        ],
    )
    .await;

    let first: MoviePageBody = test::call_and_read_body_json(
        &app,
        test::TestRequest::get().uri("/movies?year=1995&limit=2").to_request(),
    )
    .await;
    assert_eq!(first.items.len(), 2);
    let cursor = first.next_cursor.expect("more results");

    let second: MoviePageBody = test::call_and_read_body_json(
        &app,
        test::TestRequest::get()
            .uri(&format!("/movies?year=1995&limit=2&cursor={cursor}"))
            .to_request(),
    )
    .await;
    assert_eq!(second.items.len(), 1);
    assert!(second.next_cursor.is_none());

    let titles: Vec<_> = first
        .items
        .iter()
        .chain(&second.items)
        .map(|m| m.title.as_str())
        .collect();
    assert_eq!(titles, ["Heat", "Casino", "Se7en"]);
}

#[rstest]
#[actix_rt::test]
async fn genre_filter_ignores_case() {
    let catalogue = Catalogue::new(StubBoxOfficeSource::empty());
    let app = test::init_service(catalogue.app()).await;
    seed(
        &app,
        &[
            ("Whiplash", "Drama", "2014-10-10"),
            ("Heat", "Crime", "1995-12-15"),
            ("Moonlight", "DRAMA", "2016-10-21"),
        ],
    )
    .await;

    let upper: Value = test::call_and_read_body_json(
        &app,
        test::TestRequest::get().uri("/movies?genre=Drama").to_request(),
    )
    .await;
    let lower: Value = test::call_and_read_body_json(
        &app,
        test::TestRequest::get().uri("/movies?genre=drama").to_request(),
    )
    .await;

    assert_eq!(upper, lower);
    assert_eq!(upper["items"].as_array().map(Vec::len), Some(2));
}

async fn rate(
    app: &impl Service<Request, Response = ServiceResponse, Error = actix_web::Error>,
    title: &str,
    rater: &str,
    rating: f64,
) -> (StatusCode, Value) {
    let req = test::TestRequest::post()
        .uri(&format!("/movies/{title}/ratings"))
        .insert_header(("X-Rater-Id", rater))
        .set_json(json!({ "rating": rating }))
        .to_request();
    let res = test::call_service(app, req).await;
    let status = res.status();
    (status, test::read_body_json(res).await)
}

#[rstest]
#[actix_rt::test]
async fn rating_twice_keeps_latest_value() {
    let catalogue = Catalogue::new(StubBoxOfficeSource::empty());
    let app = test::init_service(catalogue.app()).await;
    seed(&app, &[("Inception", "Sci-Fi", "2010-07-16")]).await;

    let (first, _) = rate(&app, "Inception", "user-1", 4.0).await;
    let (second, body) = rate(&app, "Inception", "user-1", 3.5).await;

    assert_eq!(first, StatusCode::CREATED);
    assert_eq!(second, StatusCode::OK);
    assert_eq!(body["rating"], 3.5);

    let aggregate: Value = test::call_and_read_body_json(
        &app,
        test::TestRequest::get().uri("/movies/Inception/rating").to_request(),
    )
    .await;
    assert_eq!(aggregate, json!({ "average": 3.5, "count": 1 }));
}

#[rstest]
#[case(0.0)]
#[case(0.25)]
#[case(5.5)]
#[case(-1.0)]
#[actix_rt::test]
async fn out_of_scale_ratings_are_rejected(#[case] rating: f64) {
    let catalogue = Catalogue::new(StubBoxOfficeSource::empty());
    let app = test::init_service(catalogue.app()).await;
    seed(&app, &[("Inception", "Sci-Fi", "2010-07-16")]).await;

    let (status, body) = rate(&app, "Inception", "user-1", rating).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["code"], "INVALID_RATING");
}

#[rstest]
#[actix_rt::test]
async fn aggregates_average_and_count() {
    let catalogue = Catalogue::new(StubBoxOfficeSource::empty());
    let app = test::init_service(catalogue.app()).await;
    seed(&app, &[("Inception", "Sci-Fi", "2010-07-16")]).await;

    let empty: Value = test::call_and_read_body_json(
        &app,
        test::TestRequest::get().uri("/movies/Inception/rating").to_request(),
    )
    .await;
    assert_eq!(empty, json!({ "average": 0.0, "count": 0 }));

    rate(&app, "Inception", "user-1", 4.0).await;
    rate(&app, "Inception", "user-2", 5.0).await;
    let rated: Value = test::call_and_read_body_json(
        &app,
        test::TestRequest::get().uri("/movies/Inception/rating").to_request(),
    )
    .await;
    assert_eq!(rated, json!({ "average": 4.5, "count": 2 }));
}

#[rstest]
#[actix_rt::test]
async fn aggregate_divides_by_this_movies_count_and_rounds() {
    let catalogue = Catalogue::new(StubBoxOfficeSource::empty());
    let app = test::init_service(catalogue.app()).await;
    seed(
        &app,
        &[
            ("Inception", "Sci-Fi", "2010-07-16"),
            ("Heat", "Crime", "1995-12-15"),
        ],
    )
    .await;

    rate(&app, "Inception", "user-1", 4.0).await;
    rate(&app, "Inception", "user-2", 3.5).await;
    rate(&app, "Inception", "user-3", 2.0).await;
    rate(&app, "Heat", "user-1", 0.5).await;

    let rated: Value = test::call_and_read_body_json(
        &app,
        test::TestRequest::get().uri("/movies/Inception/rating").to_request(),
    )
    .await;
    assert_eq!(rated, json!({ "average": 3.2, "count": 3 }));
}

#[rstest]
#[actix_rt::test]
async fn unknown_movie_ratings_are_not_found() {
    let catalogue = Catalogue::new(StubBoxOfficeSource::empty());
    let app = test::init_service(catalogue.app()).await;

    let (status, body) = rate(&app, "Nope", "user-1", 4.0).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "NOT_FOUND");

    let res = test::call_service(
        &app,
        test::TestRequest::get().uri("/movies/Nope/rating").to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}
