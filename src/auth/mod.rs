pub mod claims;
pub mod jwt;
pub mod middleware;
pub mod password;

pub use claims::Identity;
pub use jwt::JwtKeys;
