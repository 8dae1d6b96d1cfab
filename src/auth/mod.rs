/// Authentication module
///
/// Password hashing, token claims and the token service.

mod claims;
mod jwt;
mod password;

pub use claims::Claims;
pub use claims::TokenKind;
pub use jwt::TokenService;
pub use password::hash_password;
pub use password::verify_password;
pub use password::HASH_COST;
