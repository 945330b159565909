#![allow(dead_code)]

use std::sync::{
    Arc, Mutex,
    atomic::{AtomicUsize, Ordering},
};
use std::time::Duration;

use async_trait::async_trait;
use axum::{Json, Router, routing::post};
use manit_chat::{
    error::AskError,
    message::AnswerResponse,
    services::answer_client::AnswerService,
};
use reqwest::{StatusCode, Url};
use serde_json::{Value, json};

/// Serve `app` on an ephemeral local port and return the `/ask` URL.
pub async fn spawn_server(app: Router) -> Url {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    Url::parse(&format!("http://{addr}/ask")).unwrap()
}

/// Answer server that records every request body and replies with `answer`.
pub async fn answering_server(answer: &'static str) -> (Url, Arc<Mutex<Vec<Value>>>) {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let log = Arc::clone(&seen);
    let app = Router::new().route(
        "/ask",
        post(move |Json(body): Json<Value>| {
            let log = Arc::clone(&log);
            async move {
                let query = body["query"].clone();
                log.lock().unwrap().push(body);
                Json(json!({ "query": query, "answer": answer, "references": "📌 Reference 1:\nUG Ordinance" }))
            }
        }),
    );
    (spawn_server(app).await, seen)
}

pub async fn failing_server(status: StatusCode) -> Url {
    let app = Router::new().route("/ask", post(move || async move { status }));
    spawn_server(app).await
}

/// A URL nothing is listening on.
pub async fn closed_endpoint() -> Url {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    Url::parse(&format!("http://{addr}/ask")).unwrap()
}

/// In-process answer service that counts calls.
pub struct StubService {
    answer: Option<&'static str>,
    delay: Duration,
    pub calls: AtomicUsize,
    pub queries: Mutex<Vec<String>>,
}

impl StubService {
    pub fn answering(answer: &'static str) -> Self {
        Self {
            answer: Some(answer),
            delay: Duration::ZERO,
            calls: AtomicUsize::new(0),
            queries: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self { answer: None, ..Self::answering("") }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AnswerService for StubService {
    async fn ask(&self, query: &str) -> Result<AnswerResponse, AskError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.queries.lock().unwrap().push(query.to_string());
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        match self.answer {
            Some(answer) => Ok(AnswerResponse::new(answer)),
            None => Err(AskError::Status(StatusCode::INTERNAL_SERVER_ERROR)),
        }
    }
}
