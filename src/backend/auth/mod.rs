//! Authentication Module
//!
//! This module handles user accounts, session tokens and the ownership
//! policy shared by the marketplace handlers.
//!
//! # Module Structure
//!
//! ```text
//! auth/
//! ├── mod.rs          - Module exports and documentation
//! ├── users.rs        - User model and database operations
//! ├── sessions.rs     - JWT token management
//! ├── policy.rs       - 404-vs-403 ownership policy
//! └── handlers/       - HTTP handlers
//! ```
//!
//! # Authentication Flow
//!
//! 1. **Register**: username, email and password → user created → JWT token returned
//! 2. **Login**: email and password → credentials verified → JWT token returned
//! 3. **Profile**: JWT token → token verified → user info returned
//!
//! # Security
//!
//! - Passwords are hashed using bcrypt before storage
//! - JWT tokens are used for stateless authentication
//! - Tokens expire after the configured lifetime (7 days by default)
//! - Invalid credentials return 401 (no information leakage)

/// User data model and database operations
pub mod users;

/// JWT token generation and validation
pub mod sessions;

/// Ownership mismatch reporting
pub mod policy;

/// HTTP handlers for authentication endpoints
pub mod handlers;

// Re-export commonly used types and handlers
pub use handlers::{get_profile, login, register, update_profile};
pub use policy::{AuthorizationPolicy, ResourceKind};
pub use sessions::{Claims, SessionKeys};
