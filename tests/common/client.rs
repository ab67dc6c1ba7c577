//! HTTP client for end-to-end tests
//!
//! Wraps reqwest and provides one method per job board route. Redirects are
//! never followed so tests can assert on the 303 target.
//!
//! When routes or form fields change, update only this file.

use super::constants::*;
use reqwest::{redirect, Response, StatusCode};
use serde_json::Value;
use std::time::Duration;

/// HTTP test client with cookie-based session management
pub struct TestClient {
    /// The underlying reqwest client (public for custom requests in tests)
    pub client: reqwest::Client,
    /// The base URL of the test server
    pub base_url: String,
}

/// Returns the redirect target of a 303 response.
pub fn location(response: &Response) -> &str {
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    response
        .headers()
        .get("location")
        .expect("Redirect without location")
        .to_str()
        .expect("Non-ascii location")
}

impl TestClient {
    /// Creates a new client without a session
    pub fn new(base_url: String) -> Self {
        let client = reqwest::Client::builder()
            .cookie_store(true)
            .redirect(redirect::Policy::none())
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .expect("Failed to build reqwest client");

        Self { client, base_url }
    }

    /// Creates a client that signed up with the given handle and completed
    /// its details.
    ///
    /// # Panics
    ///
    /// Panics if signup or the details step does not redirect as expected.
    pub async fn with_profile(
        base_url: String,
        base: &str,
        number: &str,
        password: &str,
        name: &str,
        city: &str,
    ) -> Self {
        let client = Self::new(base_url);

        let response = client.login(base, number, password).await;
        assert_eq!(location(&response), "/details", "Signup failed");
        // Follow the redirect like a browser would, consuming the welcome flash
        let response = client.details_view().await;
        assert_eq!(response.status(), StatusCode::OK);

        let response = client
            .submit_details(name, &format!("{} street 1", name), city, PUNE_PINCODE)
            .await;
        assert_eq!(location(&response), "/home", "Details step failed");

        client
    }

    pub async fn alice(base_url: String) -> Self {
        Self::with_profile(
            base_url,
            ALICE_BASE,
            ALICE_NUMBER,
            ALICE_PASS,
            ALICE_NAME,
            ALICE_CITY,
        )
        .await
    }

    pub async fn bob(base_url: String) -> Self {
        Self::with_profile(base_url, BOB_BASE, BOB_NUMBER, BOB_PASS, BOB_NAME, BOB_CITY).await
    }

    async fn get(&self, path: &str) -> Response {
        self.client
            .get(format!("{}{}", self.base_url, path))
            .send()
            .await
            .expect("GET request failed")
    }

    async fn post_form(&self, path: &str, form: &[(&str, &str)]) -> Response {
        self.client
            .post(format!("{}{}", self.base_url, path))
            .form(form)
            .send()
            .await
            .expect("POST request failed")
    }

    // ========================================================================
    // Account
    // ========================================================================

    /// GET /
    pub async fn login_view(&self) -> Value {
        self.get("/").await.json().await.expect("Invalid login view")
    }

    /// POST /
    pub async fn login(&self, base: &str, number: &str, password: &str) -> Response {
        self.post_form(
            "/",
            &[("username", base), ("number", number), ("password", password)],
        )
        .await
    }

    /// POST / with arbitrary fields
    pub async fn login_form(&self, form: &[(&str, &str)]) -> Response {
        self.post_form("/", form).await
    }

    /// GET /details
    pub async fn details_view(&self) -> Response {
        self.get("/details").await
    }

    /// POST /details
    pub async fn submit_details(
        &self,
        name: &str,
        address: &str,
        city: &str,
        pincode: &str,
    ) -> Response {
        self.post_form(
            "/details",
            &[
                ("name", name),
                ("address", address),
                ("city", city),
                ("pincode", pincode),
            ],
        )
        .await
    }

    // ========================================================================
    // Jobs
    // ========================================================================

    /// GET /home
    pub async fn home(&self) -> Response {
        self.get("/home").await
    }

    /// GET /home, parsed
    pub async fn dashboard(&self) -> Value {
        let response = self.home().await;
        assert_eq!(response.status(), StatusCode::OK);
        response.json().await.expect("Invalid dashboard")
    }

    /// POST /search
    pub async fn search(&self, pincode: &str) -> Response {
        self.post_form("/search", &[("pincode", pincode)]).await
    }

    /// GET /provide
    pub async fn provide_view(&self) -> Response {
        self.get("/provide").await
    }

    /// POST /provide with a complete job
    pub async fn provide(&self, company_name: &str, pincode: &str) -> Response {
        self.provide_form(&[
            ("company_name", company_name),
            ("address", "MG Road 7"),
            ("pincode", pincode),
            ("salary", "25000/month"),
            ("job_type", "Full time"),
            ("phone", "9876543210"),
        ])
        .await
    }

    /// POST /provide with arbitrary fields
    pub async fn provide_form(&self, form: &[(&str, &str)]) -> Response {
        self.post_form("/provide", form).await
    }

    // ========================================================================
    // Acceptance
    // ========================================================================

    /// GET /accept/{job_id}
    pub async fn accept(&self, job_id: &str) -> Response {
        self.get(&format!("/accept/{}", job_id)).await
    }

    /// GET /inbox
    pub async fn inbox(&self) -> Response {
        self.get("/inbox").await
    }

    // ========================================================================
    // Status
    // ========================================================================

    /// GET /status
    pub async fn status(&self) -> Response {
        self.get("/status").await
    }
}
