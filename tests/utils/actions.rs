use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use serde_json::{json, Value};
use tower::ServiceExt; // for `oneshot`

use super::setup::{png_bytes, TestSetup};

const BOUNDARY: &str = "pinpoint-workflow-boundary";

/// Status and decoded JSON body of a response
#[derive(Debug)]
pub struct Reply {
    pub status: StatusCode,
    pub body: Value,
}

impl Reply {
    pub fn assert_ok(&self) -> &Value {
        assert_eq!(self.status, StatusCode::OK, "unexpected reply: {:?}", self.body);
        &self.body
    }

    pub fn assert_error(&self, status: StatusCode, kind: &str) {
        assert_eq!(self.status, status, "unexpected reply: {:?}", self.body);
        assert_eq!(self.body["kind"], kind);
    }
}

// ============================================================================
// Action Helpers
// ============================================================================

impl TestSetup {
    /// Send a request through the router and decode the reply
    pub async fn send(&self, request: Request<Body>) -> Reply {
        let response = self.app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        Reply {
            status,
            body: serde_json::from_slice(&bytes).unwrap_or(Value::Null),
        }
    }

    pub async fn get(&self, uri: &str) -> Reply {
        self.send(Request::get(uri).body(Body::empty()).unwrap())
            .await
    }

    pub async fn post_json(&self, uri: &str, body: Value) -> Reply {
        self.send(
            Request::post(uri)
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
    }

    // ============================================================================
    // Convenience Action Methods
    // ============================================================================

    pub async fn add_player(&self, name: &str) -> Reply {
        self.post_json("/api/players", json!({ "name": name })).await
    }

    pub async fn remove_player(&self, name: &str) -> Reply {
        self.post_json("/api/players/remove", json!({ "name": name }))
            .await
    }

    /// Upload a blank map of the given size; returns the new round id
    pub async fn upload_map(&self, width: u32, height: u32) -> String {
        let reply = self.upload_file("map.png", &png_bytes(width, height)).await;
        reply.assert_ok()["round_id"].as_str().unwrap().to_string()
    }

    pub async fn upload_file(&self, filename: &str, bytes: &[u8]) -> Reply {
        let mut body = format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"map_image\"; filename=\"{filename}\"\r\nContent-Type: application/octet-stream\r\n\r\n"
        )
        .into_bytes();
        body.extend_from_slice(bytes);
        body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());

        self.send(
            Request::post("/api/rounds")
                .header(
                    "content-type",
                    format!("multipart/form-data; boundary={BOUNDARY}"),
                )
                .body(Body::from(body))
                .unwrap(),
        )
        .await
    }

    pub async fn set_answer(&self, round_id: &str, x: i64, y: i64) -> Reply {
        self.post_json(
            &format!("/api/rounds/{round_id}/answer"),
            json!({ "x": x, "y": y }),
        )
        .await
    }

    pub async fn guess(&self, round_id: &str, player: &str, x: i64, y: i64) -> Reply {
        self.post_json(
            "/api/guess",
            json!({ "round_id": round_id, "player": player, "x": x, "y": y }),
        )
        .await
    }

    pub async fn goto_round(&self, index: i64) -> Reply {
        self.post_json("/api/goto_round", json!({ "round_index": index }))
            .await
    }

    pub async fn reset(&self) -> Reply {
        self.send(Request::post("/api/reset").body(Body::empty()).unwrap())
            .await
    }

    pub async fn leaderboard(&self) -> Value {
        self.get("/api/leaderboard").await.assert_ok().clone()
    }

    pub async fn overview(&self) -> Value {
        self.get("/api/game").await.assert_ok().clone()
    }
}
