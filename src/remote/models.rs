//! Request and response shapes of the remote service.
//!
//! Only the fields this service reads are modelled. Everything defaults so a
//! sparse payload does not fail a whole page.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Body of the login call.
#[derive(Serialize, Debug, Clone)]
pub struct LoginRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

/// Successful login answer. `expiresIn` is kept raw since the service sends
/// either a number or a numeric string.
#[derive(Deserialize, Debug, Clone, Default)]
pub struct LoginResponse {
    #[serde(rename = "customerPortalAccessToken", default)]
    pub access_token: Option<String>,
    #[serde(rename = "expiresIn", default)]
    pub expires_in: Option<Value>,
}

/// Error body some endpoints attach to non-success responses.
#[derive(Deserialize, Debug, Clone, Default)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}

/// Envelope of the post-listing call.
#[derive(Deserialize, Debug, Clone, Default)]
pub struct PostListResponse {
    #[serde(default)]
    pub error: Option<Value>,
    #[serde(default)]
    pub data: Option<PostPage>,
}

/// One page of posts plus the total number available.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
pub struct PostPage {
    #[serde(default)]
    pub rows: Vec<Post>,
    #[serde(default)]
    pub count: u64,
}

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct Post {
    pub id: i64,
    pub description: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub likes: i64,
    pub comments: i64,
    #[serde(rename = "createdAt")]
    pub created_at: String,
    #[serde(rename = "fromDate")]
    pub from_date: Option<String>,
    #[serde(rename = "toDate")]
    pub to_date: Option<String>,
    #[serde(rename = "postVisibility")]
    pub visibility: String,
    pub account: Account,
    pub tag_destinations: Vec<Tag>,
    pub tag_hotels: Vec<Tag>,
    pub tag_restaurants: Vec<Tag>,
}

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct Account {
    #[serde(rename = "fullName")]
    pub full_name: String,
}

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct Tag {
    pub id: i64,
    pub name: String,
}
