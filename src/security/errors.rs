#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Password hashing failed")]
    HashingError,
    #[error("Password verification failed")]
    VerificationError,
    #[error("Token creation failed")]
    TokenCreationError,
    #[error("Invalid token credentials provided.")]
    InvalidToken,
}
