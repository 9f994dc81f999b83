use std::{net::IpAddr, sync::Arc};

use anyhow::Context;
use axum::{extract::State, http::StatusCode, routing, Json, Router};
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;
use tracing::info;

const SUBMIT_ROUTE: &str = "/submit";

pub async fn start_server(host: IpAddr, port: u16, access_key: String) -> anyhow::Result<()> {
    info!("Starting form relay testing server on {host}:{port}");
    info!("Form relay submit endpoint: http://{host}:{port}{SUBMIT_ROUTE}");
    info!("Access key: {access_key:?}");

    let listener = TcpListener::bind((host, port))
        .await
        .with_context(|| format!("Failed to bind to {host}:{port}"))?;
    axum::serve(listener, router(access_key))
        .await
        .context("Failed to start HTTP server")
}

pub fn router(access_key: String) -> Router {
    Router::new()
        .route(SUBMIT_ROUTE, routing::post(submit))
        .with_state(access_key.into())
}

#[derive(Debug, Deserialize)]
struct SubmitRequest {
    access_key: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    email: String,
    #[serde(default)]
    phone: String,
    #[serde(default)]
    message: String,
    subject: Option<String>,
    from_name: Option<String>,
    ccemail: Option<String>,
}

#[derive(Debug, Serialize)]
struct SubmitResponse {
    success: bool,
    message: String,
}

async fn submit(
    state: State<Arc<str>>,
    Json(request): Json<SubmitRequest>,
) -> (StatusCode, Json<SubmitResponse>) {
    if *request.access_key != **state {
        return reply(StatusCode::UNAUTHORIZED, false, "Invalid access key".into());
    }

    let missing = [
        ("name", &request.name),
        ("email", &request.email),
        ("message", &request.message),
    ]
    .into_iter()
    .filter(|(_, value)| value.trim().is_empty())
    .map(|(name, _)| name)
    .collect::<Vec<_>>();
    if !missing.is_empty() {
        return reply(
            StatusCode::BAD_REQUEST,
            false,
            format!("Missing required fields: {}", missing.join(", ")),
        );
    }

    info!(
        name = %request.name,
        email = %request.email,
        phone = %request.phone,
        subject = ?request.subject,
        from_name = ?request.from_name,
        ccemail = ?request.ccemail,
        "Received form submission:\n{}",
        request.message
    );

    reply(StatusCode::OK, true, "Email sent successfully!".into())
}

fn reply(
    status: StatusCode,
    success: bool,
    message: String,
) -> (StatusCode, Json<SubmitResponse>) {
    (status, Json(SubmitResponse { success, message }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(access_key: &str) -> SubmitRequest {
        serde_json::from_value(serde_json::json!({
            "access_key": access_key,
            "name": "田中",
            "email": "tanaka@example.com",
            "phone": "090-1111-2222",
            "message": "hello",
            "subject": "Contact",
        }))
        .unwrap()
    }

    #[tokio::test]
    async fn ok() {
        let (status, Json(response)) =
            submit(State("secret".into()), Json(request("secret"))).await;
        assert_eq!(status, StatusCode::OK);
        assert!(response.success);
    }

    #[tokio::test]
    async fn invalid_access_key() {
        let (status, Json(response)) =
            submit(State("secret".into()), Json(request("wrong"))).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert!(!response.success);
    }

    #[tokio::test]
    async fn missing_fields() {
        let request = SubmitRequest {
            name: " ".into(),
            message: String::new(),
            ..request("secret")
        };
        let (status, Json(response)) = submit(State("secret".into()), Json(request)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(!response.success);
        assert_eq!(response.message, "Missing required fields: name, message");
    }
}
