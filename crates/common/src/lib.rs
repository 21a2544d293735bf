// ================
// common/src/lib.rs
// ================
//! Common types and structures
//! used for communication between the Memberbook client and server.
//! This module defines the JSON API request and response bodies.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Store-assigned member identifier, stable for the record's lifetime
pub type MemberId = u64;

/// Registration submission
/// # Fields
/// * `login_name` - Unique name used to authenticate
/// * `display_name` - Name shown to other members
/// * `email` - Contact email address
/// * `contact` - Contact number (digits, max 10)
/// * `password` - Plaintext password, write-only; the server stores a hash
/// * `profile_image` - Optional image reference; the server defaults it
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RegisterRequest {
    pub login_name: String,
    pub display_name: String,
    pub email: String,
    pub contact: String,
    pub password: String,
    #[serde(default)]
    pub profile_image: Option<String>,
}

/// Login submission
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct LoginRequest {
    /// Name used at registration
    pub login_name: String,
    /// Plaintext password, write-only
    pub password: String,
}

/// Public projection of a member record.
/// Never carries the password hash or any credential material.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct MemberProfile {
    /// Stable identifier generated at registration
    pub external_id: Uuid,
    pub login_name: String,
    pub display_name: String,
    pub email: String,
    pub contact: String,
    pub profile_image: String,
}

/// Response to a successful login
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct LoginResponse {
    /// Opaque session token; carried as a bearer credential on later requests
    pub token: String,
    /// Profile of the authenticated member
    pub member: MemberProfile,
}

/// Profile update submission, addressed by external id
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct UpdateRequest {
    pub external_id: Uuid,
    pub login_name: String,
    pub display_name: String,
    pub email: String,
    pub contact: String,
    /// New password; the stored hash is rewritten only when this is present
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub profile_image: Option<String>,
}

/// Deletion request, addressed by internal id
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct DeleteRequest {
    pub user_id: MemberId,
}

/// Acknowledgement of a deletion
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct DeleteResponse {
    pub success: bool,
    pub user_id: MemberId,
}

/// The member roster visible to authenticated members
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RosterResponse {
    pub members: Vec<MemberProfile>,
}

/// Acknowledgement of a logout; the client discards its token
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct LogoutResponse {
    pub message: String,
}
