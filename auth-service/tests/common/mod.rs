use std::sync::Arc;

use auth::LockoutPolicy;
use auth::PasswordHasher;
use auth::SessionRegistry;
use auth::TokenCodec;
use auth_service::config::JwtConfig;
use auth_service::domain::account::service::AuthService;
use auth_service::inbound::http::router::create_router;
use auth_service::outbound::password::Argon2PasswordVerifier;
use auth_service::outbound::repositories::InMemoryCredentialStore;

pub const TEST_JWT_SECRET: &str = "test-secret-key-for-jwt-signing-at-least-32-bytes";

/// Test application that spawns a real server over the in-memory store
pub struct TestApp {
    pub address: String,
    pub port: u16,
    pub api_client: reqwest::Client,
    pub tokens: TokenCodec,
}

impl TestApp {
    /// Spawn the application in a background task and return TestApp
    pub async fn spawn() -> Self {
        Self::spawn_with(false).await
    }

    /// Spawn the application with unknown accounts reported as invalid credentials
    pub async fn spawn_concealing() -> Self {
        Self::spawn_with(true).await
    }

    async fn spawn_with(conceal_unknown_accounts: bool) -> Self {
        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let jwt = JwtConfig {
            secret: TEST_JWT_SECRET.to_string(),
            expiration_hours: 24,
        };

        let auth_service = Arc::new(AuthService::new(
            Arc::new(InMemoryCredentialStore::new()),
            Arc::new(Argon2PasswordVerifier::new(
                PasswordHasher::with_params(1024, 1, 1).expect("Invalid Argon2 params"),
            )),
            Arc::new(TokenCodec::new(jwt.token_config())),
            Arc::new(SessionRegistry::new()),
            LockoutPolicy::default(),
        ));

        let router = create_router(auth_service, conceal_unknown_accounts);

        // Spawn server in background
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            port,
            api_client: reqwest::Client::new(),
            tokens: TokenCodec::new(jwt.token_config()),
        }
    }

    /// Helper to make GET request
    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(&format!("{}{}", self.address, path))
    }

    /// Helper to make POST request
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(&format!("{}{}", self.address, path))
    }

    /// Helper to make GET request with Bearer token
    pub fn get_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.get(path).bearer_auth(token)
    }

    /// Helper to make POST request with Bearer token
    pub fn post_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.post(path).bearer_auth(token)
    }

    /// Register an account and return the response status
    pub async fn register(&self, email: &str, password: &str) -> reqwest::StatusCode {
        self.post("/api/auth/register")
            .json(&serde_json::json!({
                "email": email,
                "password": password,
                "first_name": "Test",
                "last_name": "User"
            }))
            .send()
            .await
            .expect("Failed to execute request")
            .status()
    }

    /// Log in and return the raw response
    pub async fn login(&self, email: &str, password: &str) -> reqwest::Response {
        self.post("/api/auth/login")
            .json(&serde_json::json!({
                "email": email,
                "password": password
            }))
            .send()
            .await
            .expect("Failed to execute request")
    }

    /// Log in and extract the issued token
    pub async fn login_token(&self, email: &str, password: &str) -> String {
        let body: serde_json::Value = self
            .login(email, password)
            .await
            .json()
            .await
            .expect("Failed to parse response");
        body["data"]["token"]
            .as_str()
            .expect("Login response carries no token")
            .to_string()
    }
}
