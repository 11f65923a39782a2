//! Participant endpoints

use axum::{
    Json, Router,
    extract::{Query, State},
    routing::get,
};
use serde::Deserialize;

use weekmeet_core::Profile;

use crate::routes::{Ack, AppError, required};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route(
        "/users",
        get(list_users)
            .post(save_user)
            .put(update_user)
            .delete(delete_user),
    )
}

/// GET /users - List every profile, in join order
async fn list_users(State(state): State<AppState>) -> Result<Json<Vec<Profile>>, AppError> {
    Ok(Json(state.roster.list().await?))
}

/// Request body for creating or replacing a profile
#[derive(Deserialize)]
pub struct SaveProfileRequest {
    pub id: Option<String>,
    pub name: Option<String>,
    pub color: Option<String>,
}

/// Acknowledgement carrying the stored profile
#[derive(serde::Serialize)]
pub struct SaveProfileResponse {
    pub success: bool,
    pub user: Profile,
}

/// POST /users - Create a profile, or replace the one with the same id
async fn save_user(
    State(state): State<AppState>,
    Json(req): Json<SaveProfileRequest>,
) -> Result<Json<SaveProfileResponse>, AppError> {
    let id = required(req.id, "id")?;
    let name = required(req.name, "name")?;
    let color = required(req.color, "color")?;

    let user = state.roster.upsert(Profile { id, name, color }).await?;
    tracing::info!(user = %user.name, "profile saved");

    Ok(Json(SaveProfileResponse {
        success: true,
        user,
    }))
}

/// Request body for renaming or recoloring a profile
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    pub user_id: Option<String>,
    pub user_name: Option<String>,
    pub color: Option<String>,
}

/// PUT /users - Rename or recolor, rewriting the copies in every stored week
async fn update_user(
    State(state): State<AppState>,
    Json(req): Json<UpdateProfileRequest>,
) -> Result<Json<Ack>, AppError> {
    let user_id = required(req.user_id, "userId")?;
    let user_name = required(req.user_name, "userName")?;
    let color = required(req.color, "color")?;

    let user = state
        .roster
        .update(&user_id, &user_name, &color, &state.calendar)
        .await?;
    tracing::info!(user = %user.name, "profile updated");

    Ok(Json(Ack::ok()))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteUserParams {
    pub user_id: Option<String>,
}

/// DELETE /users?userId= - Remove a profile and every mark it left
async fn delete_user(
    State(state): State<AppState>,
    Query(params): Query<DeleteUserParams>,
) -> Result<Json<Ack>, AppError> {
    let user_id = required(params.user_id, "userId")?;

    state.roster.delete(&user_id, &state.calendar).await?;
    tracing::info!(%user_id, "profile deleted");

    Ok(Json(Ack::ok()))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::Router;
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode};
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use weekmeet_core::store::MemoryStore;

    use crate::state::AppState;

    fn app() -> Router {
        let state = AppState::new(Arc::new(MemoryStore::new()));
        Router::new()
            .merge(super::router())
            .merge(crate::routes::calendar::router())
            .with_state(state)
    }

    async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(v) => {
                builder = builder.header("content-type", "application/json");
                Body::from(v.to_string())
            }
            None => Body::empty(),
        };

        let response = app.clone().oneshot(builder.body(body).unwrap()).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };

        (status, value)
    }

    fn ana() -> Value {
        json!({"id": "ana-1", "name": "Ana", "color": "#ef4444"})
    }

    #[tokio::test]
    async fn profiles_round_trip_through_the_api() {
        let app = app();

        let (status, body) = send(&app, "POST", "/users", Some(ana())).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], json!(true));
        assert_eq!(body["user"]["name"], json!("Ana"));

        let (status, body) = send(&app, "GET", "/users", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!([{"id": "ana-1", "name": "Ana", "color": "#ef4444"}]));
    }

    #[tokio::test]
    async fn saving_without_required_fields_is_rejected() {
        let app = app();

        let (status, body) = send(&app, "POST", "/users", Some(json!({"id": "x"}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().contains("name"));

        let blank = json!({"id": "x", "name": "   ", "color": "#fff"});
        let (status, _) = send(&app, "POST", "/users", Some(blank)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn updating_rewrites_the_roster_and_every_mark() {
        let app = app();
        send(&app, "POST", "/users", Some(ana())).await;

        let mark = json!({
            "weekKey": "2024-03-03", "day": 1, "timeIndex": 4,
            "userId": "ana-1", "userName": "Ana", "color": "#ef4444",
            "isSelected": true
        });
        let (status, _) = send(&app, "PUT", "/calendar", Some(mark)).await;
        assert_eq!(status, StatusCode::OK);

        let rename = json!({"userId": "ana-1", "userName": "Ana B", "color": "#22c55e"});
        let (status, body) = send(&app, "PUT", "/users", Some(rename)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"success": true}));

        let (_, users) = send(&app, "GET", "/users", None).await;
        assert_eq!(users[0]["name"], json!("Ana B"));

        let (_, table) = send(&app, "GET", "/calendar?weekKey=2024-03-03", None).await;
        assert_eq!(table["1-4"][0]["userName"], json!("Ana B"));
        assert_eq!(table["1-4"][0]["color"], json!("#22c55e"));
    }

    #[tokio::test]
    async fn updating_an_unknown_profile_is_rejected() {
        let app = app();

        let rename = json!({"userId": "ghost", "userName": "Who", "color": "#000"});
        let (status, body) = send(&app, "PUT", "/users", Some(rename)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().contains("ghost"));
    }

    #[tokio::test]
    async fn deleting_removes_the_profile_and_its_marks() {
        let app = app();
        send(&app, "POST", "/users", Some(ana())).await;

        let mark = json!({
            "weekKey": "2024-03-03", "day": 0, "timeIndex": 0,
            "userId": "ana-1", "userName": "Ana", "color": "#ef4444",
            "isSelected": true
        });
        send(&app, "PUT", "/calendar", Some(mark)).await;

        let (status, body) = send(&app, "DELETE", "/users?userId=ana-1", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"success": true}));

        let (_, users) = send(&app, "GET", "/users", None).await;
        assert_eq!(users, json!([]));

        let (_, table) = send(&app, "GET", "/calendar?weekKey=2024-03-03", None).await;
        assert_eq!(table, json!({}));
    }

    #[tokio::test]
    async fn deleting_without_a_user_id_is_rejected() {
        let app = app();

        let (status, body) = send(&app, "DELETE", "/users", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().contains("userId"));
    }
}
