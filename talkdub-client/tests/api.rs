//! HTTP contract tests against a local stand-in for the jobs API

use std::sync::Arc;
use std::time::Duration;

use axum::{
    Json, Router,
    extract::Path,
    http::{HeaderMap, StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde_json::{Value, json};
use talkdub_client::{ClientError, DownloadGate, DubbingClient, PollEvent, PollOutcome, StatusPoller};
use talkdub_core::domain::job::JobStatus;
use talkdub_core::dto::job::CreateJob;
use talkdub_core::validation::PinCode;

const VALID_PIN: &str = "123456";

async fn create_job(Json(body): Json<Value>) -> Response {
    if body["src_lang"] == body["tgt_lang"] {
        return (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({"detail": [
                {"loc": ["body", "tgt_lang"], "msg": "languages must differ", "type": "value_error"}
            ]})),
        )
            .into_response();
    }
    if body["video_url"] == "https://youtu.be/AAAAAAAAAAA" {
        return (
            StatusCode::OK,
            Json(json!({
                "job_id": "existing",
                "status": "ALREADY_QUEUED",
                "message": "この動画は既に処理中または処理済みです",
                "status_url": "/api/v1/jobs/existing/status"
            })),
        )
            .into_response();
    }
    (
        StatusCode::ACCEPTED,
        Json(json!({
            "job_id": "new-job",
            "status": "QUEUED",
            "estimated_completion": "2025-03-02T10:00:00Z",
            "status_url": "/api/v1/jobs/new-job/status",
            "download_url": "/api/v1/jobs/new-job/download",
            "message": "ジョブを受け付けました。"
        })),
    )
        .into_response()
}

async fn job_status(Path(job_id): Path<String>) -> Response {
    let (status, download_available, error) = match job_id.as_str() {
        "missing" => {
            return (
                StatusCode::NOT_FOUND,
                Json(json!({"detail": "ジョブが見つかりません"})),
            )
                .into_response();
        }
        "broken" => {
            return (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response();
        }
        "done" => ("COMPLETED", true, Value::Null),
        "failed" => ("FAILED", false, json!("TTS合成に失敗しました")),
        _ => ("PROCESSING", false, Value::Null),
    };

    Json(json!({
        "job_id": job_id,
        "status": status,
        "current_phase": "tts_qwen",
        "progress": {"completed_segments": 3, "total_segments": 7, "percent": 42.567},
        "created_at": "2025-03-01T10:00:00.000000Z",
        "estimated_completion": "2025-03-02T10:00:00.000000+00:00Z",
        "download_available": download_available,
        "download_expires_at": null,
        "error": error
    }))
    .into_response()
}

async fn download(Path(job_id): Path<String>, headers: HeaderMap) -> Response {
    let pin = headers.get("x-pin").and_then(|v| v.to_str().ok());
    if pin != Some(VALID_PIN) {
        return (StatusCode::FORBIDDEN, Json(json!({"detail": "invalid pin"}))).into_response();
    }
    (
        [
            (header::CONTENT_TYPE, "application/zip".to_string()),
            (header::HeaderName::from_static("x-download-count"), "2".to_string()),
            (
                header::HeaderName::from_static("x-expires-at"),
                "2025-03-05T10:00:00Z".to_string(),
            ),
        ],
        format!("zip-for-{}", job_id).into_bytes(),
    )
        .into_response()
}

async fn spawn_server() -> anyhow::Result<String> {
    let app = Router::new()
        .route("/api/v1/jobs", post(create_job))
        .route("/api/v1/jobs/{job_id}/status", get(job_status))
        .route("/api/v1/jobs/{job_id}/download", get(download));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    Ok(format!("http://{}", addr))
}

/// Answers every connection with a 500 whose body is cut short
async fn spawn_truncating_server() -> anyhow::Result<String> {
    use tokio::io::{AsyncReadExt, AsyncWriteExt};

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    tokio::spawn(async move {
        while let Ok((mut socket, _)) = listener.accept().await {
            let mut buf = [0u8; 1024];
            let _ = socket.read(&mut buf).await;
            let _ = socket
                .write_all(
                    b"HTTP/1.1 500 Internal Server Error\r\n\
                      Content-Type: application/json\r\n\
                      Content-Length: 100\r\n\r\n\
                      {\"detail\":",
                )
                .await;
            let _ = socket.shutdown().await;
        }
    });

    Ok(format!("http://{}", addr))
}

fn submission(src: &str, tgt: &str) -> CreateJob {
    CreateJob {
        video_url: "https://youtu.be/dQw4w9WgXcQ".to_string(),
        src_lang: src.to_string(),
        tgt_lang: tgt.to_string(),
        email: "user@example.com".to_string(),
        webhook_url: None,
    }
}

#[tokio::test]
async fn test_create_job_accepted() -> anyhow::Result<()> {
    let client = DubbingClient::new(spawn_server().await?);

    let created = client.create_job(submission("ja", "en")).await?;
    assert_eq!(created.job_id, "new-job");
    assert_eq!(created.status, JobStatus::Queued);
    assert!(!created.is_duplicate());
    Ok(())
}

#[tokio::test]
async fn test_create_job_duplicate() -> anyhow::Result<()> {
    let client = DubbingClient::new(spawn_server().await?);

    let mut req = submission("ja", "en");
    req.video_url = "https://youtu.be/AAAAAAAAAAA".to_string();
    let created = client.create_job(req).await?;
    assert!(created.is_duplicate());
    assert_eq!(created.job_id, "existing");
    Ok(())
}

#[tokio::test]
async fn test_create_job_validation_detail() -> anyhow::Result<()> {
    let client = DubbingClient::new(spawn_server().await?);

    let err = client.create_job(submission("ja", "ja")).await.unwrap_err();
    assert_eq!(err.status(), Some(422));
    assert_eq!(err.to_string(), "languages must differ");
    Ok(())
}

#[tokio::test]
async fn test_status_of_failed_job_is_ok() -> anyhow::Result<()> {
    let client = DubbingClient::new(spawn_server().await?);

    let report = client.get_job_status("failed").await?;
    assert_eq!(report.status, JobStatus::Failed);
    assert_eq!(report.error.as_deref(), Some("TTS合成に失敗しました"));
    assert_eq!(report.progress.total_segments, 7);
    Ok(())
}

#[tokio::test]
async fn test_status_errors_surface_detail() -> anyhow::Result<()> {
    let client = DubbingClient::new(spawn_server().await?);

    let err = client.get_job_status("missing").await.unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(err.to_string(), "ジョブが見つかりません");

    let err = client.get_job_status("broken").await.unwrap_err();
    assert!(err.is_server_error());
    assert_eq!(err.to_string(), "Internal Server Error");
    Ok(())
}

#[tokio::test]
async fn test_download_requires_pin_header() -> anyhow::Result<()> {
    let client = DubbingClient::new(spawn_server().await?);

    let err = client
        .download_artifact("done", &PinCode::parse("000000")?)
        .await
        .unwrap_err();
    assert!(err.is_forbidden());
    assert_eq!(err.to_string(), "invalid pin");

    let artifact = client
        .download_artifact("done", &PinCode::parse(VALID_PIN)?)
        .await?;
    assert_eq!(artifact.bytes, b"zip-for-done");
    assert_eq!(artifact.download_count, Some(2));
    assert_eq!(artifact.expires_at.as_deref(), Some("2025-03-05T10:00:00Z"));
    Ok(())
}

#[tokio::test]
async fn test_gate_shows_server_detail_then_saves() -> anyhow::Result<()> {
    let client = DubbingClient::new(spawn_server().await?);
    let dir = tempfile::tempdir()?;
    let mut gate = DownloadGate::new("done", dir.path());
    gate.open();

    assert!(gate.submit(&client, "999999").await.is_none());
    assert!(gate.is_open());
    assert_eq!(gate.error(), Some("invalid pin"));

    let saved = gate.submit(&client, VALID_PIN).await.expect("download should succeed");
    assert_eq!(saved.path, dir.path().join("dub_done.zip"));
    assert_eq!(std::fs::read(&saved.path)?, b"zip-for-done");
    assert!(!gate.is_open());
    Ok(())
}

#[tokio::test]
async fn test_poller_against_server() -> anyhow::Result<()> {
    let client = Arc::new(DubbingClient::new(spawn_server().await?));

    let (handle, mut events) = StatusPoller::new(client.clone(), "done")
        .with_interval(Duration::from_millis(50))
        .start();
    match events.recv().await {
        Some(PollEvent::Updated(report)) => assert!(report.download_available),
        other => panic!("unexpected event: {:?}", other),
    }
    assert!(events.recv().await.is_none());
    assert!(matches!(handle.wait().await, PollOutcome::Terminal(_)));

    let (handle, mut events) = StatusPoller::new(client, "missing").start();
    assert_eq!(
        events.recv().await,
        Some(PollEvent::Failed("ジョブが見つかりません".to_string()))
    );
    assert_eq!(
        handle.wait().await,
        PollOutcome::Failed("ジョブが見つかりません".to_string())
    );
    Ok(())
}

#[tokio::test]
async fn test_broken_error_body_is_a_request_failure() -> anyhow::Result<()> {
    let client = DubbingClient::new(spawn_truncating_server().await?);

    let err = client.get_job_status("any").await.unwrap_err();
    assert!(matches!(err, ClientError::RequestFailed(_)), "got {:?}", err);
    assert_ne!(err.to_string(), "Unknown error");
    Ok(())
}
