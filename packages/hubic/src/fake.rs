//! In-memory object store speaking the subset of the Swift API the client uses.

use std::collections::{BTreeMap, HashMap};
use std::io::Cursor;
use std::sync::{Arc, Mutex};

use hubic_http::{
    decode_content, Body, Error, HttpExecutor, HttpRequest, HttpResponse, Method,
    ResponseContent,
};

use crate::client::{COPY_FROM_HEADER, CONTAINER, DIRECTORY_CONTENT_TYPE, FILE_CONTENT_TYPE};

#[derive(Debug, Clone)]
struct StoredObject {
    content_type: String,
    data: Vec<u8>,
}

#[derive(Default)]
struct State {
    objects: BTreeMap<String, StoredObject>,
    failures: HashMap<(Method, String), u16>,
    requests: Vec<HttpRequest>,
}

#[derive(Clone)]
pub struct FakeSwift {
    container_url: String,
    state: Arc<Mutex<State>>,
}

impl FakeSwift {
    pub fn new(endpoint: &str) -> Self {
        Self {
            container_url: format!("{}/{}", endpoint.trim_end_matches('/'), CONTAINER),
            state: Arc::default(),
        }
    }

    pub fn insert(&self, path: &str, data: &[u8]) {
        self.put_object(path, FILE_CONTENT_TYPE, data.to_vec());
    }

    pub fn insert_directory(&self, path: &str) {
        self.put_object(path, DIRECTORY_CONTENT_TYPE, Vec::new());
    }

    /// Answer `method` on `path` with `status` instead of serving it.
    pub fn fail(&self, method: Method, path: &str, status: u16) {
        self.state
            .lock()
            .unwrap()
            .failures
            .insert((method, path.to_string()), status);
    }

    pub fn get(&self, path: &str) -> Option<Vec<u8>> {
        self.state
            .lock()
            .unwrap()
            .objects
            .get(path)
            .map(|object| object.data.clone())
    }

    pub fn contains(&self, path: &str) -> bool {
        self.state.lock().unwrap().objects.contains_key(path)
    }

    pub fn is_directory(&self, path: &str) -> bool {
        self.state
            .lock()
            .unwrap()
            .objects
            .get(path)
            .is_some_and(|object| object.content_type == DIRECTORY_CONTENT_TYPE)
    }

    pub fn recorded_requests(&self) -> Vec<HttpRequest> {
        self.state.lock().unwrap().requests.clone()
    }

    fn put_object(&self, path: &str, content_type: &str, data: Vec<u8>) {
        self.state.lock().unwrap().objects.insert(
            path.to_string(),
            StoredObject {
                content_type: content_type.to_string(),
                data,
            },
        );
    }

    fn list(&self, state: &State, request: &HttpRequest) -> HttpResponse {
        let path = request.query.get("path").map(String::as_str).unwrap_or("");
        let marker = request.query.get("marker");
        let limit = request
            .query
            .get("limit")
            .and_then(|limit| limit.parse().ok())
            .unwrap_or(usize::MAX);

        let mut prefix = path.to_string();
        if !prefix.is_empty() && !prefix.ends_with('/') {
            prefix.push('/');
        }

        let entries = state
            .objects
            .iter()
            .filter(|(name, _)| {
                name.strip_prefix(prefix.as_str())
                    .is_some_and(|rest| !rest.is_empty() && !rest.trim_end_matches('/').contains('/'))
            })
            .filter(|(name, _)| marker.map_or(true, |marker| name.as_str() > marker.as_str()))
            .take(limit)
            .map(|(name, object)| {
                serde_json::json!({
                    "name": name,
                    "content_type": object.content_type,
                    "bytes": object.data.len(),
                })
            })
            .collect();

        HttpResponse::new(200, ResponseContent::JsonArray(entries))
    }

    fn put(&self, state: &mut State, path: &str, request: &HttpRequest) -> Result<HttpResponse, Error> {
        if let Some(source) = request.headers.get(COPY_FROM_HEADER) {
            let source = source
                .strip_prefix(CONTAINER)
                .and_then(|rest| rest.strip_prefix('/'))
                .unwrap_or(source);
            return Ok(match state.objects.get(source).cloned() {
                Some(object) => {
                    state.objects.insert(path.to_string(), object);
                    HttpResponse::new(201, ResponseContent::Absent)
                }
                None => HttpResponse::new(404, ResponseContent::Absent),
            });
        }

        let content_type = request
            .headers
            .get("Content-Type")
            .cloned()
            .unwrap_or_else(|| FILE_CONTENT_TYPE.to_string());
        let data = match &request.body {
            Body::Empty => Vec::new(),
            Body::Bytes(bytes) => bytes.to_vec(),
            Body::File(local) => std::fs::read(local)?,
        };

        state
            .objects
            .insert(path.to_string(), StoredObject { content_type, data });
        Ok(HttpResponse::new(201, ResponseContent::Absent))
    }
}

impl HttpExecutor for FakeSwift {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, Error> {
        let mut state = self.state.lock().unwrap();
        state.requests.push(request.clone());

        if request.url == self.container_url && request.method == Method::GET {
            return Ok(self.list(&state, request));
        }

        let path = request
            .url
            .strip_prefix(&self.container_url)
            .and_then(|rest| rest.strip_prefix('/'))
            .ok_or_else(|| Error::Transport {
                message: format!("unknown url {}", request.url),
            })?
            .to_string();

        if let Some(status) = state.failures.get(&(request.method, path.clone())) {
            return Ok(HttpResponse::new(*status, ResponseContent::Absent));
        }

        match request.method {
            Method::GET => Ok(match state.objects.get(&path) {
                Some(object) => HttpResponse::new(
                    200,
                    decode_content(&request.response_mode, 200, Cursor::new(object.data.clone())),
                ),
                None => HttpResponse::new(404, ResponseContent::Absent),
            }),
            Method::HEAD => Ok(HttpResponse::new(
                if state.objects.contains_key(&path) { 200 } else { 404 },
                ResponseContent::Absent,
            )),
            Method::PUT => self.put(&mut state, &path, request),
            Method::DELETE => Ok(match state.objects.remove(&path) {
                Some(_) => HttpResponse::new(204, ResponseContent::Absent),
                None => HttpResponse::new(404, ResponseContent::Absent),
            }),
        }
    }
}
