//! Public profile payload returned by the lookup service.
//!
//! Shape on the wire:
//!
//! ```json
//! {
//!   "id": "765929697976516610",
//!   "username": "someone",
//!   "global_name": "Some One",
//!   "avatar": { "link": "https://cdn.example/avatar.png" },
//!   "banner": { "link": null, "color": "#112233" },
//!   "accent_color": 5793266,
//!   "badges": ["NITRO"],
//!   "created_at": "2020-10-20T08:15:00.000Z"
//! }
//! ```
//!
//! Every field except `id` and `username` may be missing or `null`; the
//! renderer decides what to do with the gaps.

use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ProfilePayload {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub global_name: Option<String>,
    #[serde(default)]
    pub avatar: Option<AvatarAsset>,
    #[serde(default)]
    pub banner: Option<BannerAsset>,
    /// 24-bit RGB packed into an integer.
    #[serde(default)]
    pub accent_color: Option<u32>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub badges: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct AvatarAsset {
    #[serde(default)]
    pub link: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct BannerAsset {
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

fn non_empty(s: Option<&String>) -> Option<&str> {
    s.map(String::as_str).filter(|s| !s.is_empty())
}

impl ProfilePayload {
    pub fn avatar_url(&self) -> Option<&str> {
        non_empty(self.avatar.as_ref().and_then(|a| a.link.as_ref()))
    }

    pub fn banner_url(&self) -> Option<&str> {
        non_empty(self.banner.as_ref().and_then(|b| b.link.as_ref()))
    }

    pub fn banner_color(&self) -> Option<&str> {
        non_empty(self.banner.as_ref().and_then(|b| b.color.as_ref()))
    }

    /// `0` reads as "no accent", same as an absent field.
    pub fn accent(&self) -> Option<u32> {
        self.accent_color.filter(|&c| c != 0)
    }

    /// Global name when set, else the username, else empty.
    pub fn display_name(&self) -> &str {
        non_empty(self.global_name.as_ref()).unwrap_or(&self.username)
    }
}
