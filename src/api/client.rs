//! HTTP client for the reading-tracker REST API.
//!
//! All outbound traffic goes through one `ApiClient`. The session layer is
//! the only writer of its bearer token; every request issued after a
//! `set_token` carries (or drops) the credential accordingly. Requests are
//! plain verbs with no retry or backoff: a failure surfaces to the caller
//! unmodified.

use reqwest::{header, Client, Method, Response};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tracing::debug;

use crate::models::{
    Book, Classroom, Credentials, NewAssignment, NewBook, NewReading, ReadingAssignment,
    ReadingDecision, ReadingReview, ReadingStatus, RegisterRequest, Student, StudentReading,
    UserProfile,
};

use super::ApiError;

/// Default base endpoint; overridable through the config file or
/// `LECTERN_API_URL`.
pub const DEFAULT_BASE_URL: &str = "http://localhost:5009";

/// HTTP request timeout in seconds.
/// 30s allows for slow API responses while failing fast enough for good UX.
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Fallback error text when a login refusal carries no message.
const LOGIN_FALLBACK: &str = "Login failed";

/// Fallback error text when a registration refusal carries no message.
const REGISTER_FALLBACK: &str = "Registration failed";

#[derive(Debug, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub user: UserProfile,
}

#[derive(Debug, Deserialize)]
struct CreatedClassroom {
    classroom: Classroom,
}

#[derive(Debug, Deserialize)]
struct CreatedBook {
    id: i64,
}

/// API client for the tracker.
/// Clone is cheap - reqwest::Client uses Arc internally for connection pooling.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    /// Create a new API client against the given base endpoint.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }

        Ok(Self {
            client,
            base_url,
            token: None,
        })
    }

    /// Set or clear the bearer token. When present, every subsequent request
    /// carries `Authorization: Bearer <token>`; when absent the header is
    /// omitted entirely.
    pub fn set_token(&mut self, token: Option<String>) {
        self.token = token;
    }

    /// The currently attached token, if any.
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn auth_headers(&self) -> Result<header::HeaderMap, ApiError> {
        let mut headers = header::HeaderMap::new();
        if let Some(ref token) = self.token {
            let value = header::HeaderValue::from_str(&format!("Bearer {}", token))
                .map_err(|e| ApiError::InvalidResponse(format!("unusable token: {}", e)))?;
            headers.insert(header::AUTHORIZATION, value);
        }
        Ok(headers)
    }

    /// Check if a response is successful, mapping failures by status.
    async fn check(response: Response) -> Result<Response, ApiError> {
        if response.status().is_success() {
            Ok(response)
        } else {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            Err(ApiError::from_status(status, &body))
        }
    }

    async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<&impl Serialize>,
    ) -> Result<Response, ApiError> {
        debug!(method = %method, path, "API request");
        let mut request = self
            .client
            .request(method, self.url(path))
            .headers(self.auth_headers()?);
        if let Some(body) = body {
            request = request.json(body);
        }
        Ok(request.send().await?)
    }

    const NO_BODY: Option<&'static ()> = None;

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let response = Self::check(self.send(Method::GET, path, Self::NO_BODY).await?).await?;
        Ok(response.json().await?)
    }

    async fn post_json<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let response = Self::check(self.send(Method::POST, path, Some(body)).await?).await?;
        Ok(response.json().await?)
    }

    async fn patch_json<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let response = Self::check(self.send(Method::PATCH, path, Some(body)).await?).await?;
        Ok(response.json().await?)
    }

    async fn put_ack<B: Serialize>(&self, path: &str, body: &B) -> Result<(), ApiError> {
        Self::check(self.send(Method::PUT, path, Some(body)).await?).await?;
        Ok(())
    }

    async fn post_ack<B: Serialize>(&self, path: &str, body: &B) -> Result<(), ApiError> {
        Self::check(self.send(Method::POST, path, Some(body)).await?).await?;
        Ok(())
    }

    async fn delete_ack(&self, path: &str) -> Result<(), ApiError> {
        Self::check(self.send(Method::DELETE, path, Self::NO_BODY).await?).await?;
        Ok(())
    }

    // ===== Authentication =====

    /// Exchange credentials for a token and profile.
    pub async fn login(&self, credentials: &Credentials) -> Result<LoginResponse, ApiError> {
        let response = self
            .send(Method::POST, "/api/auth/login", Some(credentials))
            .await?;
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::from_auth_status(status, &body, LOGIN_FALLBACK));
        }
        Ok(response.json().await?)
    }

    /// Create an account. Does not log in.
    pub async fn register(&self, request: &RegisterRequest) -> Result<(), ApiError> {
        let response = self
            .send(Method::POST, "/api/auth/register", Some(request))
            .await?;
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::from_auth_status(status, &body, REGISTER_FALLBACK));
        }
        Ok(())
    }

    /// "Who am I" check against the attached token.
    pub async fn current_user(&self) -> Result<UserProfile, ApiError> {
        self.get_json("/api/auth/me").await
    }

    // ===== Classrooms =====

    pub async fn list_classrooms(&self) -> Result<Vec<Classroom>, ApiError> {
        self.get_json("/api/classrooms").await
    }

    pub async fn create_classroom(&self, name: &str) -> Result<Classroom, ApiError> {
        let body = serde_json::json!({ "name": name });
        let created: CreatedClassroom = self.post_json("/api/classrooms", &body).await?;
        Ok(created.classroom)
    }

    pub async fn get_classroom(&self, id: i64) -> Result<Classroom, ApiError> {
        self.get_json(&format!("/api/classrooms/{}", id)).await
    }

    pub async fn rename_classroom(&self, id: i64, name: &str) -> Result<(), ApiError> {
        let body = serde_json::json!({ "name": name });
        self.put_ack(&format!("/api/classrooms/{}", id), &body).await
    }

    pub async fn delete_classroom(&self, id: i64) -> Result<(), ApiError> {
        self.delete_ack(&format!("/api/classrooms/{}", id)).await
    }

    pub async fn classroom_students(&self, id: i64) -> Result<Vec<Student>, ApiError> {
        self.get_json(&format!("/api/classrooms/{}/students", id)).await
    }

    pub async fn enroll_student(&self, classroom_id: i64, student_id: i64) -> Result<(), ApiError> {
        let body = serde_json::json!({ "student_id": student_id });
        self.post_ack(&format!("/api/classrooms/{}/students", classroom_id), &body)
            .await
    }

    pub async fn withdraw_student(
        &self,
        classroom_id: i64,
        student_id: i64,
    ) -> Result<(), ApiError> {
        self.delete_ack(&format!(
            "/api/classrooms/{}/students/{}",
            classroom_id, student_id
        ))
        .await
    }

    // ===== Books =====

    pub async fn list_books(&self) -> Result<Vec<Book>, ApiError> {
        self.get_json("/api/books").await
    }

    pub async fn get_book(&self, id: i64) -> Result<Book, ApiError> {
        self.get_json(&format!("/api/books/{}", id)).await
    }

    /// Add a catalog entry, returning the new book's id.
    pub async fn add_book(&self, book: &NewBook) -> Result<i64, ApiError> {
        let created: CreatedBook = self.post_json("/api/books", book).await?;
        Ok(created.id)
    }

    pub async fn update_book(&self, id: i64, book: &NewBook) -> Result<(), ApiError> {
        self.put_ack(&format!("/api/books/{}", id), book).await
    }

    pub async fn delete_book(&self, id: i64) -> Result<(), ApiError> {
        self.delete_ack(&format!("/api/books/{}", id)).await
    }

    // ===== Assignments =====

    pub async fn list_assignments(&self) -> Result<Vec<ReadingAssignment>, ApiError> {
        self.get_json("/api/assignments").await
    }

    pub async fn create_assignment(
        &self,
        assignment: &NewAssignment,
    ) -> Result<ReadingAssignment, ApiError> {
        self.post_json("/api/assignments", assignment).await
    }

    pub async fn reschedule_assignment(
        &self,
        id: i64,
        due_date: chrono::NaiveDate,
    ) -> Result<ReadingAssignment, ApiError> {
        let body = serde_json::json!({ "due_date": due_date });
        self.patch_json(&format!("/api/assignments/{}", id), &body).await
    }

    pub async fn delete_assignment(&self, id: i64) -> Result<(), ApiError> {
        self.delete_ack(&format!("/api/assignments/{}", id)).await
    }

    // ===== Student readings =====

    /// Submit a summary for an assignment (student only, server-enforced).
    pub async fn submit_reading(&self, reading: &NewReading) -> Result<StudentReading, ApiError> {
        self.post_json("/api/student-readings", reading).await
    }

    /// The calling student's own submissions.
    pub async fn my_readings(&self) -> Result<Vec<StudentReading>, ApiError> {
        self.get_json("/api/student-readings/me").await
    }

    /// All submissions across the professor's classrooms.
    pub async fn review_queue(&self) -> Result<Vec<ReadingReview>, ApiError> {
        self.get_json("/api/student-readings").await
    }

    /// Record a validate/reject decision on a submission.
    pub async fn decide_reading(
        &self,
        id: i64,
        status: ReadingStatus,
    ) -> Result<ReadingDecision, ApiError> {
        let body = serde_json::json!({ "status": status });
        self.patch_json(&format!("/api/student-readings/{}", id), &body)
            .await
    }

    // ===== Users =====

    /// Directory of every student account (professor only, server-enforced).
    pub async fn list_students(&self) -> Result<Vec<Student>, ApiError> {
        self.get_json("/api/users/students").await
    }

    /// A single student's submission history with assignment context.
    pub async fn student_submissions(&self, student_id: i64) -> Result<Vec<ReadingReview>, ApiError> {
        self.get_json(&format!("/api/users/{}/submissions", student_id))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let client = ApiClient::new("http://localhost:5009/").unwrap();
        assert_eq!(client.url("/api/books"), "http://localhost:5009/api/books");
    }

    #[test]
    fn test_token_attach_and_clear() {
        let mut client = ApiClient::new(DEFAULT_BASE_URL).unwrap();
        assert!(client.auth_headers().unwrap().is_empty());

        client.set_token(Some("abc".to_string()));
        let headers = client.auth_headers().unwrap();
        assert_eq!(
            headers.get(header::AUTHORIZATION).unwrap(),
            "Bearer abc"
        );

        client.set_token(None);
        assert!(client.auth_headers().unwrap().is_empty());
        assert!(client.token().is_none());
    }

    #[test]
    fn test_parse_created_envelopes() {
        let created: CreatedClassroom = serde_json::from_str(
            r#"{"message": "Classe créée avec succès",
                "classroom": {"id": 4, "name": "Terminale L", "professor_id": 3}}"#,
        )
        .unwrap();
        assert_eq!(created.classroom.id, 4);

        let created: CreatedBook =
            serde_json::from_str(r#"{"message": "Book added successfully", "id": 2}"#).unwrap();
        assert_eq!(created.id, 2);
    }
}
