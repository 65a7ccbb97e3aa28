//! Shared fixtures: in-memory PDFs and a mock title lookup service.

#![allow(dead_code)]

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Redirect, Response};
use axum::routing::get;
use axum::{Json, Router};
use lopdf::{dictionary, Dictionary, Document, Object, ObjectId};

/// Build a PDF with one page per entry, each carrying URI link annotations.
pub fn pdf_with_links(pages: &[&[&str]]) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id: ObjectId = doc.new_object_id();

    let mut kids: Vec<Object> = Vec::new();
    for uris in pages {
        let annots: Vec<Object> = uris
            .iter()
            .map(|uri| Object::Reference(doc.add_object(uri_link(uri))))
            .collect();
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
            "Annots" => annots,
        });
        kids.push(page_id.into());
    }

    let count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut buf = Vec::new();
    doc.save_to(&mut buf).unwrap();
    buf
}

fn uri_link(uri: &str) -> Dictionary {
    dictionary! {
        "Type" => "Annot",
        "Subtype" => "Link",
        "Rect" => vec![0.into(), 0.into(), 100.into(), 20.into()],
        "A" => dictionary! {
            "S" => "URI",
            "URI" => Object::string_literal(uri),
        },
    }
}

/// Targets with scripted behavior; anything else gets a titled 200.
pub const NOT_FOUND_TARGET: &str = "https://missing.example/";
pub const GARBLED_TARGET: &str = "https://garbled.example/";
pub const REMOTE_ERROR_TARGET: &str = "https://remote-error.example/";

/// A running mock of the title lookup service.
pub struct MockLookup {
    pub addr: SocketAddr,
    requests: Arc<Mutex<Vec<String>>>,
}

impl MockLookup {
    /// Endpoint answering lookups directly.
    pub fn endpoint(&self) -> String {
        format!("http://{}/api/title", self.addr)
    }

    /// Endpoint that redirects before answering.
    pub fn redirecting_endpoint(&self) -> String {
        format!("http://{}/api/moved", self.addr)
    }

    /// Target URLs received so far, in arrival order.
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

type Requests = Arc<Mutex<Vec<String>>>;

async fn title(
    State(requests): State<Requests>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    let target = params.get("url").cloned().unwrap_or_default();
    requests.lock().unwrap().push(target.clone());

    match target.as_str() {
        NOT_FOUND_TARGET => (StatusCode::NOT_FOUND, "no such page").into_response(),
        GARBLED_TARGET => (StatusCode::OK, "<html>not json</html>").into_response(),
        REMOTE_ERROR_TARGET => Json(serde_json::json!({
            "status": 502,
            "error": "upstream timed out",
        }))
        .into_response(),
        other => Json(serde_json::json!({
            "status": 200,
            "title": format!("Title of {}", other),
        }))
        .into_response(),
    }
}

async fn moved(Query(params): Query<HashMap<String, String>>) -> Redirect {
    let target = params.get("url").cloned().unwrap_or_default();
    let location = url::Url::parse_with_params("http://placeholder/api/title", [("url", target)])
        .unwrap();
    Redirect::temporary(&format!("/api/title?{}", location.query().unwrap_or_default()))
}

/// Start the mock service on an ephemeral port.
pub async fn spawn_mock_lookup() -> MockLookup {
    let requests: Requests = Arc::default();
    let app = Router::new()
        .route("/api/title", get(title))
        .route("/api/moved", get(moved))
        .with_state(requests.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    MockLookup { addr, requests }
}

/// An address nothing listens on.
pub async fn closed_endpoint() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}/api/title", addr)
}
