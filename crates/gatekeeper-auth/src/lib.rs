//! # gatekeeper-auth
//!
//! Token issuance and validation, and the access-list enforcement point used
//! by every downstream service.
//!
//! ## Modules
//!
//! - `jwt`: signed claims with an expiration-or-infinite lifetime
//! - `password`: Argon2id hashing and password policy
//! - `credentials`: bearer header / session cookie resolution
//! - `gateway`: token validation, access-list checks, admin proof
//! - `session`: register, login, refresh, logout

pub mod credentials;
pub mod gateway;
pub mod jwt;
pub mod password;
pub mod session;

pub use credentials::{AuthorizationHeader, CredentialChain, CredentialSource, SessionCookie};
pub use gateway::{AccessGateway, AdminIdentity, Identity};
pub use jwt::{Claims, Expiration, TokenCodec};
pub use password::{PasswordHasher, PasswordValidator};
pub use session::{AuthSessionManager, LoginResult, normalize_login};
