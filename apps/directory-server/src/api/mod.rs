//! API endpoints.

pub mod directory;
pub mod profile;

use axum::{Router, routing::get};

use crate::state::SharedState;

/// Creates the router with all endpoints.
pub fn create_router() -> Router<SharedState> {
    Router::new()
        // Directory
        .route("/", get(directory::list_users))
        // Profile and note submission
        .route(
            "/user/{id}",
            get(profile::show_user).post(profile::submit_note),
        )
        // Health check
        .route("/health", get(health_check))
}

/// Health check endpoint.
async fn health_check() -> &'static str {
    "OK"
}

#[cfg(test)]
mod tests {
    use std::sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    };

    use async_trait::async_trait;
    use axum::{
        body::{Body, to_bytes},
        http::{HeaderMap, Request, StatusCode, header},
    };
    use entities::{NewUser, Note, NoteSubmission, UserId};
    use futures_util::{StreamExt, stream};
    use notes_client::{ListError, MemoryNotesClient, NoteStream, NotesClient, SubmitError};
    use tower::ServiceExt;
    use user_store::{MemoryUserStore, SqliteUserStore, UserStore, seed_default_users};

    use crate::{config::Config, create_app, create_state};

    /// Notes client with canned answers.
    #[derive(Default)]
    struct ScriptedNotes {
        /// Body returned with a 500 on submission.
        reject_with: Option<&'static str>,
        /// Fail every call before reaching the service.
        unreachable: bool,
        /// Notes yielded by every listing.
        notes: Vec<Note>,
        /// Decode fault yielded after `notes`.
        fault_after: Option<&'static str>,
        /// Calls received, of either kind.
        calls: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl NotesClient for ScriptedNotes {
        async fn submit_note(&self, _submission: &NoteSubmission) -> Result<(), SubmitError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.unreachable {
                return Err(SubmitError::Transport("connection refused".to_string()));
            }
            match self.reject_with {
                Some(body) => Err(SubmitError::Rejected {
                    status: 500,
                    body: body.to_string(),
                }),
                None => Ok(()),
            }
        }

        async fn list_notes(&self, _user_id: UserId) -> Result<NoteStream, ListError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.unreachable {
                return Err(ListError::Transport("connection refused".to_string()));
            }
            let mut items: Vec<Result<Note, ListError>> =
                self.notes.iter().cloned().map(Ok).collect();
            if let Some(fault) = self.fault_after {
                items.push(Err(ListError::Decode(fault.to_string())));
            }
            Ok(stream::iter(items).boxed())
        }
    }

    fn note(id: i64, content: &str) -> Note {
        Note {
            id,
            content: content.to_string(),
            created: "2023-06-01 10:00:00".to_string(),
        }
    }

    fn test_config() -> Config {
        Config::from_lookup(|key| (key == "NOTES_HOST").then(|| "localhost".to_string()))
            .unwrap()
    }

    async fn seeded_store() -> MemoryUserStore {
        let store = MemoryUserStore::new();
        seed_default_users(&store).await.unwrap();
        store
    }

    fn app_with<S, N>(store: S, notes: N) -> axum::Router
    where
        S: UserStore + 'static,
        N: NotesClient + 'static,
    {
        create_app(create_state(test_config(), store, notes))
    }

    async fn send(app: &axum::Router, request: Request<Body>) -> (StatusCode, HeaderMap, String) {
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, headers, String::from_utf8(body.to_vec()).unwrap())
    }

    fn get(uri: &str) -> Request<Body> {
        Request::get(uri).body(Body::empty()).unwrap()
    }

    fn post_note(uri: &str, encoded_note: &str) -> Request<Body> {
        Request::post(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(format!("note={}", encoded_note)))
            .unwrap()
    }

    #[tokio::test]
    async fn test_health_check() {
        let app = app_with(MemoryUserStore::new(), MemoryNotesClient::new());
        let (status, _, body) = send(&app, get("/health")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "OK");
    }

    #[tokio::test]
    async fn test_directory_lists_seeded_users() {
        let app = app_with(seeded_store().await, MemoryNotesClient::new());

        let (status, _, body) = send(&app, get("/")).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("User Directory"));
        assert_eq!(body.matches("<tr><td>").count(), 3);
        for id in 1..=3 {
            assert!(body.contains(&format!(r#"href="/user/{id}""#)));
        }
        assert!(body.contains("alice@othercompany.com"));
    }

    #[tokio::test]
    async fn test_sqlite_backed_directory_and_profile() {
        let store = SqliteUserStore::in_memory().await.unwrap();
        seed_default_users(&store).await.unwrap();
        let notes = MemoryNotesClient::new();
        let app = app_with(store, notes.clone());

        let (status, _, body) = send(&app, get("/")).await;
        assert_eq!(status, StatusCode::OK);
        let first = body.find(r#"href="/user/1""#).unwrap();
        let second = body.find(r#"href="/user/2""#).unwrap();
        let third = body.find(r#"href="/user/3""#).unwrap();
        assert!(first < second && second < third);

        let (status, _, _) = send(&app, post_note("/user/3", "from%20sqlite")).await;
        assert_eq!(status, StatusCode::SEE_OTHER);

        let (status, _, body) = send(&app, get("/user/3")).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("User: bob@thirdcompany.com: Bob Shamir"));
        assert!(body.contains("<td>from sqlite</td>"));

        let (status, _, body) = send(&app, get("/user/9")).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("No such user."));
        assert_eq!(notes.list_calls(), 1);
    }

    #[tokio::test]
    async fn test_submit_redirects_and_note_is_shown() {
        let notes = MemoryNotesClient::new();
        let app = app_with(seeded_store().await, notes.clone());

        let (status, headers, _) =
            send(&app, post_note("/user/2", "%20%20hello%20world%20%20")).await;
        assert_eq!(status, StatusCode::SEE_OTHER);
        assert_eq!(headers[header::LOCATION], "/user/2");
        assert_eq!(notes.submit_calls(), 1);

        let (status, _, body) = send(&app, get("/user/2")).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("User: alice@othercompany.com: Alice Rivest"));
        assert!(body.contains("<td>hello world</td>"));
    }

    #[tokio::test]
    async fn test_unknown_user_never_calls_notes() {
        let notes = MemoryNotesClient::new();
        let app = app_with(seeded_store().await, notes.clone());

        let (status, _, body) = send(&app, get("/user/42")).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("No such user."));

        let (status, _, body) = send(&app, post_note("/user/42", "hello")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, "No such user.");

        assert_eq!(notes.submit_calls(), 0);
        assert_eq!(notes.list_calls(), 0);
    }

    #[tokio::test]
    async fn test_post_without_form_goes_through_lookup() {
        let notes = MemoryNotesClient::new();
        let app = app_with(seeded_store().await, notes.clone());

        let bare = |uri: &str| Request::post(uri).body(Body::empty()).unwrap();

        let (status, _, body) = send(&app, bare("/user/42")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, "No such user.");

        let (status, _, body) = send(&app, bare("/user/2")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, "Cannot submit an empty note.");

        assert_eq!(notes.submit_calls(), 0);
    }

    #[tokio::test]
    async fn test_malformed_id_is_bad_request() {
        let app = app_with(seeded_store().await, MemoryNotesClient::new());
        let (status, _, _) = send(&app, get("/user/alice")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_blank_note_is_rejected_before_submission() {
        let notes = MemoryNotesClient::new();
        let app = app_with(seeded_store().await, notes.clone());

        let (status, headers, body) = send(&app, post_note("/user/1", "%20%20%0A")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, "Cannot submit an empty note.");
        assert!(!headers.contains_key(header::LOCATION));
        assert_eq!(notes.submit_calls(), 0);
    }

    #[tokio::test]
    async fn test_rejected_submission_shows_upstream_body() {
        let notes = ScriptedNotes {
            reject_with: Some("notes db locked"),
            ..Default::default()
        };
        let app = app_with(seeded_store().await, notes);

        let (status, headers, body) = send(&app, post_note("/user/2", "hi")).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, "Failed to submit note: notes db locked");
        assert!(!headers.contains_key(header::LOCATION));
    }

    #[tokio::test]
    async fn test_unreachable_notes_service() {
        let notes = ScriptedNotes {
            unreachable: true,
            ..Default::default()
        };
        let app = app_with(seeded_store().await, notes);

        let (status, _, body) = send(&app, post_note("/user/2", "hi")).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, "Failed to submit note: connection refused");

        let (status, _, body) = send(&app, get("/user/2")).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, "Failed to query notes for user 2: connection refused");
    }

    #[tokio::test]
    async fn test_decode_fault_keeps_rendered_rows() {
        let notes = ScriptedNotes {
            notes: vec![note(1, "one"), note(2, "two"), note(3, "three")],
            fault_after: Some("trailing characters at line 4"),
            ..Default::default()
        };
        let app = app_with(seeded_store().await, notes);

        let (status, _, body) = send(&app, get("/user/3")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.matches("<tr><td>").count(), 3);
        assert!(body.contains("<td>three</td>"));
        assert!(body.contains("Failed to decode notes for user 3: trailing characters at line 4"));
    }

    #[tokio::test]
    async fn test_duplicate_user_rows_are_an_error() {
        let twin = NewUser::new("twin@example.com", "T", "Win").with_id(1);
        let store = MemoryUserStore::with_rows(vec![twin.clone(), twin]);
        let notes = ScriptedNotes::default();
        let calls = notes.calls.clone();
        let app = create_app(create_state(test_config(), store, notes));

        let (status, _, body) = send(&app, get("/user/1")).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, "Query returned more than one user for id 1.");

        let (status, _, _) = send(&app, post_note("/user/1", "hi")).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }
}
