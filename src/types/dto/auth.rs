use poem_openapi::Object;

/// Request model for logging in
#[derive(Object, Debug)]
pub struct LoginRequest {
    /// Username (1-64 characters)
    #[oai(validator(min_length = 1, max_length = 64))]
    pub username: String,

    /// Plaintext password
    #[oai(validator(min_length = 1))]
    pub password: String,
}

/// Response model for a successful login
#[derive(Object, Debug)]
pub struct TokenResponse {
    /// JWT access token
    pub access_token: String,

    /// Token type (always "Bearer")
    pub token_type: String,

    /// Access token lifetime in seconds
    pub expires_in: i64,
}

/// Response model for the whoami endpoint
#[derive(Object, Debug)]
pub struct WhoAmIResponse {
    /// Authenticated user id
    pub user_id: String,

    /// Role of the authenticated user
    pub role: String,

    /// Token expiration (unix timestamp)
    pub expires_at: i64,
}
