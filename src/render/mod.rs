//! Profile Renderer.
//!
//! [`ProfileView`] holds every piece of text and styling the card shows.
//! It starts out with placeholder content; [`render`] overwrites it from a
//! fetched payload. The egui side only ever paints a `ProfileView`.

pub mod animator;
pub mod color;

use chrono::{DateTime, NaiveDate, NaiveDateTime};

use crate::profile::ProfilePayload;
use color::packed_to_hex;

/// How the banner strip above the avatar is filled.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum BannerStyle {
    /// Stock styling from the app theme.
    #[default]
    Default,
    /// Image stretched to cover the strip, centred.
    Cover { url: String },
    /// Flat fill with a CSS color string.
    Fill { color: String },
}

/// Icon shown in front of a badge label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BadgeIcon {
    ScaleBalanced,
    Briefcase,
    Handshake,
    Rocket,
    Award,
}

impl BadgeIcon {
    /// Exact-match lookup; unknown tags get [`BadgeIcon::Award`].
    pub fn for_tag(tag: &str) -> Self {
        BADGE_ICONS
            .iter()
            .find(|(t, _)| *t == tag)
            .map(|&(_, icon)| icon)
            .unwrap_or(BadgeIcon::Award)
    }

    /// Glyph available in egui's bundled emoji font.
    pub fn glyph(self) -> &'static str {
        match self {
            BadgeIcon::ScaleBalanced => "\u{2696}",
            BadgeIcon::Briefcase => "\u{1F4BC}",
            BadgeIcon::Handshake => "\u{1F91D}",
            BadgeIcon::Rocket => "\u{1F680}",
            BadgeIcon::Award => "\u{1F3C6}",
        }
    }
}

const BADGE_ICONS: &[(&str, BadgeIcon)] = &[
    ("HOUSE_BALANCE", BadgeIcon::ScaleBalanced),
    ("STAFF", BadgeIcon::Briefcase),
    ("PARTNER", BadgeIcon::Handshake),
    ("NITRO", BadgeIcon::Rocket),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Badge {
    pub icon: BadgeIcon,
    pub label: String,
}

impl Badge {
    /// Only the first underscore becomes a space: `HYPESQUAD_ONLINE_HOUSE_1`
    /// reads `HYPESQUAD ONLINE_HOUSE_1`.
    pub fn from_tag(tag: &str) -> Self {
        Self {
            icon: BadgeIcon::for_tag(tag),
            label: tag.replacen('_', " ", 1),
        }
    }
}

/// Everything the card displays.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileView {
    pub avatar_url: Option<String>,
    pub display_name: String,
    pub username: String,
    pub user_id: String,
    pub created_at: String,
    pub banner: BannerStyle,
    pub badges: Vec<Badge>,
    pub title: String,
}

impl Default for ProfileView {
    fn default() -> Self {
        Self {
            avatar_url: None,
            display_name: "Loading...".to_string(),
            username: "@username".to_string(),
            user_id: "ID: Loading...".to_string(),
            created_at: "Account created: Loading...".to_string(),
            banner: BannerStyle::Default,
            badges: Vec::new(),
            title: "Discord Profile".to_string(),
        }
    }
}

/// Pick the banner fill: image, then banner color, then accent color.
/// `None` keeps whatever the banner currently shows.
pub fn resolve_banner(payload: &ProfilePayload) -> Option<BannerStyle> {
    if let Some(url) = payload.banner_url() {
        Some(BannerStyle::Cover { url: url.to_string() })
    } else if let Some(color) = payload.banner_color() {
        Some(BannerStyle::Fill { color: color.to_string() })
    } else {
        payload.accent().map(|accent| BannerStyle::Fill {
            color: packed_to_hex(accent),
        })
    }
}

/// Parse the lookup's `created_at` and format it as `October 20, 2020`.
///
/// Accepts RFC 3339, a bare `YYYY-MM-DDTHH:MM:SS[.fff]` (read as UTC) or a
/// plain date. Zoned timestamps keep the calendar day of their own offset.
pub fn format_created_at(raw: &str) -> Option<String> {
    const LONG_DATE: &str = "%B %-d, %Y";
    let raw = raw.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.format(LONG_DATE).to_string());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(dt.format(LONG_DATE).to_string());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .map(|d| d.format(LONG_DATE).to_string())
}

/// UV sub-rectangle that crops an image of size `image` to fill `frame`
/// without distortion, centred (CSS `background-size: cover`).
pub fn cover_uv(image: egui::Vec2, frame: egui::Vec2) -> egui::Rect {
    let full = egui::Rect::from_min_max(egui::Pos2::ZERO, egui::pos2(1.0, 1.0));
    if image.x <= 0.0 || image.y <= 0.0 || frame.x <= 0.0 || frame.y <= 0.0 {
        return full;
    }

    let image_aspect = image.x / image.y;
    let frame_aspect = frame.x / frame.y;
    if image_aspect > frame_aspect {
        // Too wide: trim left and right.
        let w = frame_aspect / image_aspect;
        egui::Rect::from_min_max(egui::pos2(0.5 - w / 2.0, 0.0), egui::pos2(0.5 + w / 2.0, 1.0))
    } else {
        let h = image_aspect / frame_aspect;
        egui::Rect::from_min_max(egui::pos2(0.0, 0.5 - h / 2.0), egui::pos2(1.0, 0.5 + h / 2.0))
    }
}

/// Apply `payload` to `view`. `None` (the failed-lookup sentinel) leaves the
/// placeholder content untouched.
pub fn render(view: &mut ProfileView, payload: Option<&ProfilePayload>) {
    let Some(payload) = payload else {
        log::debug!("No profile data; keeping placeholder card");
        return;
    };

    match payload.avatar_url() {
        Some(url) => view.avatar_url = Some(url.to_string()),
        None => log::warn!("Profile {} has no avatar link", payload.id),
    }

    let name = payload.display_name();
    view.display_name = name.to_string();
    view.username = payload.username.clone();
    view.user_id = format!("ID: {}", payload.id);

    match payload.created_at.as_deref().map(|raw| (raw, format_created_at(raw))) {
        Some((_, Some(date))) => view.created_at = format!("Account created: {}", date),
        Some((raw, None)) => log::warn!("Unrecognised created_at timestamp {:?}", raw),
        None => log::warn!("Profile {} has no created_at", payload.id),
    }

    if let Some(banner) = resolve_banner(payload) {
        view.banner = banner;
    }

    view.badges = payload.badges.iter().map(|tag| Badge::from_tag(tag)).collect();
    view.title = format!("Discord Profile: {}", name);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(json: &str) -> ProfilePayload {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn sentinel_keeps_placeholders() {
        let mut view = ProfileView::default();
        render(&mut view, None);
        assert_eq!(view, ProfileView::default());
    }

    #[test]
    fn renders_identity_labels() {
        let p = payload(
            r#"{"id":"765929697976516610","username":"someone","global_name":"Some One",
                "avatar":{"link":"https://cdn.example/a.png"},
                "created_at":"2020-10-20T08:15:00.000Z"}"#,
        );
        let mut view = ProfileView::default();
        render(&mut view, Some(&p));

        assert_eq!(view.avatar_url.as_deref(), Some("https://cdn.example/a.png"));
        assert_eq!(view.display_name, "Some One");
        assert_eq!(view.username, "someone");
        assert_eq!(view.user_id, "ID: 765929697976516610");
        assert_eq!(view.created_at, "Account created: October 20, 2020");
        assert_eq!(view.title, "Discord Profile: Some One");
    }

    #[test]
    fn missing_names_render_empty() {
        let p = payload(r#"{"id":"1"}"#);
        let mut view = ProfileView::default();
        render(&mut view, Some(&p));
        assert_eq!(view.display_name, "");
        assert_eq!(view.title, "Discord Profile: ");
    }

    #[test]
    fn accent_only_banner_fill() {
        let p = payload(r#"{"id":"1","username":"u","accent_color":5793266}"#);
        assert_eq!(
            resolve_banner(&p),
            Some(BannerStyle::Fill { color: "#5865f2".to_string() })
        );
    }

    #[test]
    fn banner_image_wins_over_colors() {
        let p = payload(
            r##"{"id":"1","username":"u","accent_color":5793266,
                "banner":{"link":"http://x/b.png","color":"#ff0000"}}"##,
        );
        assert_eq!(
            resolve_banner(&p),
            Some(BannerStyle::Cover { url: "http://x/b.png".to_string() })
        );
    }

    #[test]
    fn banner_color_wins_over_accent() {
        let p = payload(
            r##"{"id":"1","username":"u","accent_color":5793266,"banner":{"color":"#ff0000"}}"##,
        );
        assert_eq!(
            resolve_banner(&p),
            Some(BannerStyle::Fill { color: "#ff0000".to_string() })
        );
    }

    #[test]
    fn no_banner_fields_keeps_current_style() {
        let p = payload(r#"{"id":"1","username":"u"}"#);
        let mut view = ProfileView {
            banner: BannerStyle::Fill { color: "#123456".to_string() },
            ..ProfileView::default()
        };
        render(&mut view, Some(&p));
        assert_eq!(view.banner, BannerStyle::Fill { color: "#123456".to_string() });
    }

    #[test]
    fn badges_keep_order_and_map_icons() {
        let p = payload(r#"{"id":"1","username":"u","badges":["NITRO","UNKNOWN_TAG"]}"#);
        let mut view = ProfileView::default();
        render(&mut view, Some(&p));

        assert_eq!(
            view.badges,
            vec![
                Badge { icon: BadgeIcon::Rocket, label: "NITRO".to_string() },
                Badge { icon: BadgeIcon::Award, label: "UNKNOWN TAG".to_string() },
            ]
        );
    }

    #[test]
    fn badge_label_replaces_first_underscore_only() {
        let badge = Badge::from_tag("HYPESQUAD_ONLINE_HOUSE_1");
        assert_eq!(badge.label, "HYPESQUAD ONLINE_HOUSE_1");
        assert_eq!(Badge::from_tag("HOUSE_BALANCE").icon, BadgeIcon::ScaleBalanced);
        assert_eq!(Badge::from_tag("STAFF").icon, BadgeIcon::Briefcase);
        assert_eq!(Badge::from_tag("PARTNER").icon, BadgeIcon::Handshake);
        assert_eq!(Badge::from_tag("nitro").icon, BadgeIcon::Award);
    }

    #[test]
    fn badges_rebuilt_each_render() {
        let mut view = ProfileView::default();
        render(&mut view, Some(&payload(r#"{"id":"1","username":"u","badges":["STAFF","NITRO"]}"#)));
        render(&mut view, Some(&payload(r#"{"id":"1","username":"u","badges":["PARTNER"]}"#)));
        assert_eq!(view.badges.len(), 1);
        assert_eq!(view.badges[0].icon, BadgeIcon::Handshake);

        render(&mut view, Some(&payload(r#"{"id":"1","username":"u"}"#)));
        assert!(view.badges.is_empty());
    }

    #[test]
    fn cover_crops_the_long_axis() {
        let wide = cover_uv(egui::vec2(400.0, 100.0), egui::vec2(200.0, 100.0));
        assert_eq!(wide, egui::Rect::from_min_max(egui::pos2(0.25, 0.0), egui::pos2(0.75, 1.0)));

        let tall = cover_uv(egui::vec2(100.0, 100.0), egui::vec2(400.0, 100.0));
        assert_eq!(tall, egui::Rect::from_min_max(egui::pos2(0.0, 0.375), egui::pos2(1.0, 0.625)));

        let same = cover_uv(egui::vec2(300.0, 100.0), egui::vec2(600.0, 200.0));
        assert_eq!(same, egui::Rect::from_min_max(egui::Pos2::ZERO, egui::pos2(1.0, 1.0)));
        assert_eq!(cover_uv(egui::Vec2::ZERO, egui::vec2(1.0, 1.0)), same);
    }

    #[test]
    fn created_at_formats() {
        assert_eq!(format_created_at("2020-10-20T08:15:00.000Z").as_deref(), Some("October 20, 2020"));
        assert_eq!(format_created_at("2016-01-05T23:59:59+02:00").as_deref(), Some("January 5, 2016"));
        assert_eq!(format_created_at("2021-03-09T10:00:00").as_deref(), Some("March 9, 2021"));
        assert_eq!(format_created_at("2021-03-09").as_deref(), Some("March 9, 2021"));
        assert_eq!(format_created_at("yesterday"), None);
    }

    #[test]
    fn bad_timestamp_keeps_placeholder_date() {
        let p = payload(r#"{"id":"1","username":"u","created_at":"soon"}"#);
        let mut view = ProfileView::default();
        render(&mut view, Some(&p));
        assert_eq!(view.created_at, ProfileView::default().created_at);
        assert_eq!(view.user_id, "ID: 1");
    }
}
