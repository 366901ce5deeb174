//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Clock abstraction for testable time
//! - Bounded LRU cache
//! - Fixed-window login rate limiting
//! - Client identification (IP key, fingerprint)
//! - Cookie management
//! - Cryptographic utilities (SHA-256, Base64)
//! - Password hashing (Argon2id, NIST SP 800-63B compliant)

pub mod cache;
pub mod client;
pub mod clock;
pub mod cookie;
pub mod crypto;
pub mod password;
pub mod rate_limit;
