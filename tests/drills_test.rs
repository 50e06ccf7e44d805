mod common;

use axum::http::StatusCode;
use serde_json::json;
use tower::ServiceExt;

use drilldeck::repositories::DrillRepository;

#[tokio::test]
async fn test_create_drill_success() {
    let pool = common::setup_test_db();
    let app = common::create_test_app(pool);

    let response = app
        .oneshot(common::json_request(
            "POST",
            "/api/drills",
            json!({
                "name": "Medicine Ball Slams",
                "description": "Overhead slams with a medicine ball",
                "category": "Upper Body",
                "difficulty": "Medium"
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);

    let body = common::body_json(response).await;
    assert_eq!(body["name"], "Medicine Ball Slams");
    assert_eq!(body["category"], "Upper Body");
    assert_eq!(body["difficulty"], "Medium");
    assert!(body["id"].as_str().is_some());
    assert!(body["createdAt"].as_str().is_some());
}

#[tokio::test]
async fn test_create_then_fetch_round_trip() {
    let pool = common::setup_test_db();
    let app = common::create_test_app(pool);

    let response = app
        .clone()
        .oneshot(common::json_request(
            "POST",
            "/api/drills",
            json!({
                "name": "Hill Sprints",
                "description": "Short uphill sprints at full effort",
                "category": "Max Speed",
                "difficulty": "Hard"
            }),
        ))
        .await
        .unwrap();
    let created = common::body_json(response).await;
    let id = created["id"].as_str().unwrap();

    let response = app
        .oneshot(common::get(&format!("/api/drills/{id}")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let fetched = common::body_json(response).await;
    assert_eq!(fetched["name"], "Hill Sprints");
    assert_eq!(fetched["description"], "Short uphill sprints at full effort");
    assert_eq!(fetched["category"], "Max Speed");
    assert_eq!(fetched["difficulty"], "Hard");
}

#[tokio::test]
async fn test_create_drill_missing_fields() {
    let pool = common::setup_test_db();
    let app = common::create_test_app(pool);

    let response = app
        .oneshot(common::json_request(
            "POST",
            "/api/drills",
            json!({ "name": "Nameless" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = common::body_json(response).await;
    assert_eq!(body["error"], "Validation Error");
    assert_eq!(body["errors"]["description"][0], "description is required");
    assert_eq!(body["errors"]["category"][0], "category is required");
    assert_eq!(body["errors"]["difficulty"][0], "difficulty is required");
    assert!(body["errors"]["name"].is_null());
}

#[tokio::test]
async fn test_create_drill_invalid_enums() {
    let pool = common::setup_test_db();
    let app = common::create_test_app(pool);

    let response = app
        .oneshot(common::json_request(
            "POST",
            "/api/drills",
            json!({
                "name": "Jumping Jacks",
                "description": "Classic warmup",
                "category": "Cardio",
                "difficulty": "Trivial"
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = common::body_json(response).await;
    assert_eq!(body["errors"]["category"][0], "Cardio is not a valid category");
    assert_eq!(
        body["errors"]["difficulty"][0],
        "Trivial is not a valid difficulty level"
    );
}

#[tokio::test]
async fn test_list_drills_filters_and_sorts() {
    let pool = common::setup_test_db();
    let app = common::create_test_app(pool.clone());

    common::create_test_drill(&pool, "Sled Push", "Lower Body", "Hard").await;
    common::create_test_drill(&pool, "A-Skips", "Max Speed", "Easy").await;
    common::create_test_drill(&pool, "Flying 30s", "Max Speed", "Medium").await;

    let response = app
        .clone()
        .oneshot(common::get("/api/drills?category=Max%20Speed"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = common::body_json(response).await;
    assert_eq!(body.as_array().unwrap().len(), 2);

    let response = app
        .clone()
        .oneshot(common::get("/api/drills?sortBy=name&order=desc"))
        .await
        .unwrap();
    let body = common::body_json(response).await;
    let names: Vec<_> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["name"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(names, vec!["Sled Push", "Flying 30s", "A-Skips"]);

    // "All" disables the category filter.
    let response = app
        .oneshot(common::get("/api/drills?category=All"))
        .await
        .unwrap();
    let body = common::body_json(response).await;
    assert_eq!(body.as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_get_drill_invalid_id_format() {
    let pool = common::setup_test_db();
    let app = common::create_test_app(pool);

    let response = app
        .oneshot(common::get("/api/drills/not-a-uuid"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = common::body_json(response).await;
    assert_eq!(body["error"], "Invalid drill ID format");
}

#[tokio::test]
async fn test_get_drill_not_found() {
    let pool = common::setup_test_db();
    let app = common::create_test_app(pool);

    let response = app
        .oneshot(common::get(&format!(
            "/api/drills/{}",
            uuid::Uuid::new_v4()
        )))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = common::body_json(response).await;
    assert_eq!(body["error"], "Drill not found");
}

#[tokio::test]
async fn test_update_drill_partial() {
    let pool = common::setup_test_db();
    let app = common::create_test_app(pool.clone());

    let drill = common::create_test_drill(&pool, "Depth Jumps", "Plyometrics", "Medium").await;

    let response = app
        .oneshot(common::json_request(
            "PATCH",
            &format!("/api/drills/{}", drill.id),
            json!({ "difficulty": "Hard" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = common::body_json(response).await;
    assert_eq!(body["difficulty"], "Hard");
    assert_eq!(body["name"], "Depth Jumps");
}

#[tokio::test]
async fn test_update_drill_rejects_invalid_value() {
    let pool = common::setup_test_db();
    let app = common::create_test_app(pool.clone());

    let drill = common::create_test_drill(&pool, "Depth Jumps", "Plyometrics", "Medium").await;

    let response = app
        .oneshot(common::json_request(
            "PATCH",
            &format!("/api/drills/{}", drill.id),
            json!({ "category": "Stretching" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = common::body_json(response).await;
    assert_eq!(
        body["errors"]["category"][0],
        "Stretching is not a valid category"
    );

    // Record is untouched.
    let repo = DrillRepository::new(pool);
    let stored = repo.find_by_id(&drill.id).await.unwrap().unwrap();
    assert_eq!(stored.category, "Plyometrics");
}

#[tokio::test]
async fn test_delete_drill_returns_deleted_record() {
    let pool = common::setup_test_db();
    let app = common::create_test_app(pool.clone());

    let drill = common::create_test_drill(&pool, "Sled Push", "Lower Body", "Hard").await;

    let response = app
        .clone()
        .oneshot(
            axum::http::Request::builder()
                .method("DELETE")
                .uri(format!("/api/drills/{}", drill.id))
                .body(axum::body::Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = common::body_json(response).await;
    assert_eq!(body["message"], "Drill deleted successfully");
    assert_eq!(body["id"], drill.id.as_str());
    assert_eq!(body["deletedDrill"]["name"], "Sled Push");

    let response = app
        .oneshot(common::get(&format!("/api/drills/{}", drill.id)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_drill_invalid_id_leaves_storage_untouched() {
    let pool = common::setup_test_db();
    let app = common::create_test_app(pool.clone());

    common::create_test_drill(&pool, "Sled Push", "Lower Body", "Hard").await;

    let response = app
        .oneshot(
            axum::http::Request::builder()
                .method("DELETE")
                .uri("/api/drills/definitely-not-a-uuid")
                .body(axum::body::Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = common::body_json(response).await;
    assert_eq!(body["error"], "Invalid drill ID format");

    let repo = DrillRepository::new(pool);
    let drills = repo
        .find(None, "category".to_string(), "asc".to_string())
        .await
        .unwrap();
    assert_eq!(drills.len(), 1);
}
