//! Credential adapters: bcrypt password hashing and JWT bearer tokens.

mod bcrypt_password_hasher;
mod jwt_access_tokens;

pub use bcrypt_password_hasher::{BcryptPasswordHasher, MAX_BCRYPT_COST, MIN_BCRYPT_COST};
pub use jwt_access_tokens::JwtAccessTokens;
