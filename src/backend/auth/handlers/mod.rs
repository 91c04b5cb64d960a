//! Authentication Handlers Module
//!
//! This module contains all HTTP handlers for authentication endpoints.
//! Handlers are organized into focused submodules for maintainability.
//!
//! # Module Structure
//!
//! ```text
//! handlers/
//! ├── mod.rs      - Module exports and documentation
//! ├── types.rs    - Request and response types
//! ├── register.rs - User registration handler
//! ├── login.rs    - User authentication handler
//! └── profile.rs  - Read and update the current user
//! ```
//!
//! # Handlers
//!
//! - **`register`** - POST /api/auth/register - User registration
//! - **`login`** - POST /api/auth/login - User authentication
//! - **`get_profile`** - GET /api/auth/profile - Current user info
//! - **`update_profile`** - PUT /api/auth/profile - Update contact details

/// Request and response types
pub mod types;

/// Register handler
pub mod register;

/// Login handler
pub mod login;

/// Profile handlers
pub mod profile;

// Re-export commonly used types
pub use types::{AuthResponse, LoginRequest, RegisterRequest, UserResponse};

// Re-export handlers
pub use login::login;
pub use profile::{get_profile, update_profile};
pub use register::register;
