//! Brand Settings
//!
//! The configuration layer of the dashboard: colors, radii, header texts and
//! business lines stored in the sync partition, plus images kept in the local
//! partition. Resolves them into CSS custom properties and header content.

use chrono::{DateTime, TimeZone, Timelike};
use regex::{NoExpand, Regex};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::html::{escape_html, sanitize_rich};

pub const DEFAULT_USER_NAME: &str = "Team";
pub const DEFAULT_SHADOW_INTENSITY: f64 = 15.0;
pub const DEFAULT_BORDER_RADIUS: f64 = 8.0;
pub const DEFAULT_OVERLAY_OPACITY: f64 = 20.0;

/// `en-US` long date with two-digit time, e.g. "Sunday, October 18, 2026 at 09:05 AM"
const DATE_FORMAT: &str = "%A, %B %-d, %Y at %I:%M %p";

fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().map_or(true, |v| v.trim().is_empty())
}

/// Brand keys of the sync partition. Absent keys stay `None`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrandSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secondary_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accent_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub card_background: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_primary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_secondary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_light: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border_color: Option<String>,
    /// 0..=100
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shadow_intensity: Option<f64>,
    /// Pixels
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border_radius: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overlay_enabled: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overlay_opacity: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_header_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_header_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub business_info_line1: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub business_info_line2: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub business_info_line3: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub business_info_line4: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_logo_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub todoist_api_key: Option<String>,
    /// Legacy location of the background image
    #[serde(default, skip_serializing)]
    pub background_image: Option<String>,
}

/// Image keys of the local partition.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrandImages {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_logo: Option<String>,
}

impl BrandImages {
    pub const KEYS: [&'static str; 2] = ["backgroundImage", "companyLogo"];
}

impl BrandSettings {
    pub const KEYS: [&'static str; 23] = [
        "primaryColor",
        "secondaryColor",
        "accentColor",
        "backgroundColor",
        "cardBackground",
        "textPrimary",
        "textSecondary",
        "textLight",
        "borderColor",
        "shadowIntensity",
        "borderRadius",
        "userName",
        "overlayEnabled",
        "overlayOpacity",
        "customHeaderTitle",
        "customHeaderText",
        "businessInfoLine1",
        "businessInfoLine2",
        "businessInfoLine3",
        "businessInfoLine4",
        "companyLogoUrl",
        "todoistApiKey",
        "backgroundImage",
    ];

    /// Hardcoded palette used when neither install defaults nor user values exist.
    pub fn fallback() -> Self {
        Self {
            primary_color: Some("#4A90E2".into()),
            secondary_color: Some("#50C878".into()),
            accent_color: Some("#FF6B6B".into()),
            background_color: Some("rgba(15, 23, 42, 0.85)".into()),
            card_background: Some("rgba(255, 255, 255, 0.95)".into()),
            text_primary: Some("#1E293B".into()),
            text_secondary: Some("#64748B".into()),
            text_light: Some("#FFFFFF".into()),
            border_color: Some("rgba(226, 232, 240, 0.5)".into()),
            shadow_intensity: Some(DEFAULT_SHADOW_INTENSITY),
            border_radius: Some(DEFAULT_BORDER_RADIUS),
            user_name: Some(DEFAULT_USER_NAME.into()),
            ..Default::default()
        }
    }

    /// Fill missing palette values from `fallback()` when the store holds
    /// no palette at all.
    pub fn with_fallbacks(self) -> Self {
        if !is_blank(&self.primary_color) || !is_blank(&self.card_background) {
            return self;
        }
        let fb = Self::fallback();
        let pick = |value: Option<String>, default: Option<String>| {
            if is_blank(&value) { default } else { value }
        };
        Self {
            primary_color: fb.primary_color,
            secondary_color: pick(self.secondary_color, fb.secondary_color),
            accent_color: pick(self.accent_color, fb.accent_color),
            background_color: pick(self.background_color, fb.background_color),
            card_background: fb.card_background,
            text_primary: pick(self.text_primary, fb.text_primary),
            text_secondary: pick(self.text_secondary, fb.text_secondary),
            text_light: pick(self.text_light, fb.text_light),
            border_color: pick(self.border_color, fb.border_color),
            shadow_intensity: self.shadow_intensity.or(fb.shadow_intensity),
            border_radius: self.border_radius.or(fb.border_radius),
            user_name: pick(self.user_name, fb.user_name),
            ..self
        }
    }

    pub fn user_name(&self) -> &str {
        match self.user_name.as_deref() {
            Some(name) if !name.is_empty() => name,
            _ => DEFAULT_USER_NAME,
        }
    }

    // ========================
    // CSS variables
    // ========================

    /// Custom properties for the root element. Blank colors are left unset.
    pub fn css_variables(&self) -> Vec<(&'static str, String)> {
        let mut vars = Vec::new();

        let rgb_colors = [
            ("--primary-color", "--primary-color-rgb", &self.primary_color),
            ("--secondary-color", "--secondary-color-rgb", &self.secondary_color),
            ("--accent-color", "--accent-color-rgb", &self.accent_color),
        ];
        for (name, rgb_name, value) in rgb_colors {
            if let Some(color) = value.as_deref().filter(|c| !c.is_empty()) {
                vars.push((name, color.to_string()));
                if let Some((r, g, b)) = hex_to_rgb(color) {
                    vars.push((rgb_name, format!("{}, {}, {}", r, g, b)));
                }
            }
        }

        let plain_colors = [
            ("--background-color", &self.background_color),
            ("--card-background", &self.card_background),
            ("--text-primary", &self.text_primary),
            ("--text-secondary", &self.text_secondary),
            ("--text-light", &self.text_light),
            ("--border-color", &self.border_color),
        ];
        for (name, value) in plain_colors {
            if let Some(color) = value.as_deref().filter(|c| !c.is_empty()) {
                vars.push((name, color.to_string()));
            }
        }

        let (shadow, shadow_lg) = shadows(self.shadow_intensity.unwrap_or(DEFAULT_SHADOW_INTENSITY));
        vars.push(("--shadow", shadow));
        vars.push(("--shadow-lg", shadow_lg));

        let radius = self.border_radius.unwrap_or(DEFAULT_BORDER_RADIUS);
        vars.push(("--border-radius", format!("{}px", radius)));
        vars.push(("--border-radius-sm", format!("{}px", (radius * 0.75).round())));
        vars.push(("--border-radius-lg", format!("{}px", (radius * 1.5).round())));

        vars
    }

    /// Overlay color, when the overlay is enabled and a background color is set.
    pub fn overlay_color(&self) -> Option<String> {
        if self.overlay_enabled == Some(false) || is_blank(&self.background_color) {
            return None;
        }
        self.background_color.clone()
    }

    // ========================
    // Header
    // ========================

    pub fn header<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> HeaderContent
    where
        Tz::Offset: std::fmt::Display,
    {
        let ctx = PlaceholderContext::at(now, self.user_name());

        let title = match self.custom_header_title.as_deref().filter(|t| !t.trim().is_empty()) {
            Some(template) => HeaderTitle::Custom(sanitize_rich(&ctx.apply(template))),
            None => HeaderTitle::Greeting {
                greeting: ctx.greeting.to_string(),
                user_name: self.user_name().to_string(),
            },
        };

        let subtitle = match self.custom_header_text.as_deref().filter(|t| !t.trim().is_empty()) {
            Some(template) => HeaderSubtitle::Custom(sanitize_rich(&ctx.apply(template))),
            None => HeaderSubtitle::Date(ctx.date.clone()),
        };

        HeaderContent {
            title,
            subtitle,
            business_lines: self.business_lines(&ctx),
        }
    }

    /// Sanitized business lines, empty when every line is blank.
    fn business_lines(&self, ctx: &PlaceholderContext) -> Vec<String> {
        [
            &self.business_info_line1,
            &self.business_info_line2,
            &self.business_info_line3,
            &self.business_info_line4,
        ]
        .into_iter()
        .filter(|line| !is_blank(line))
        .filter_map(|line| line.as_deref())
        .map(|line| sanitize_rich(&ctx.apply(line)))
        .collect()
    }

    // ========================
    // Saving
    // ========================

    /// Split a form submission into values to write and keys to remove.
    /// Text fields are trimmed; blanks are removed rather than stored empty.
    pub fn into_save(self) -> (BrandSettings, Vec<&'static str>) {
        let mut removed = Vec::new();
        let mut keep = |key: &'static str, value: Option<String>| -> Option<String> {
            match value.map(|v| v.trim().to_string()) {
                Some(v) if !v.is_empty() => Some(v),
                _ => {
                    removed.push(key);
                    None
                }
            }
        };

        let cleaned = BrandSettings {
            primary_color: keep("primaryColor", self.primary_color),
            secondary_color: keep("secondaryColor", self.secondary_color),
            accent_color: keep("accentColor", self.accent_color),
            background_color: keep("backgroundColor", self.background_color),
            card_background: keep("cardBackground", self.card_background),
            text_primary: keep("textPrimary", self.text_primary),
            text_secondary: keep("textSecondary", self.text_secondary),
            text_light: keep("textLight", self.text_light),
            border_color: keep("borderColor", self.border_color),
            user_name: Some(
                self.user_name
                    .map(|n| n.trim().to_string())
                    .filter(|n| !n.is_empty())
                    .unwrap_or_else(|| DEFAULT_USER_NAME.to_string()),
            ),
            custom_header_title: keep("customHeaderTitle", self.custom_header_title),
            custom_header_text: keep("customHeaderText", self.custom_header_text),
            business_info_line1: keep("businessInfoLine1", self.business_info_line1),
            business_info_line2: keep("businessInfoLine2", self.business_info_line2),
            business_info_line3: keep("businessInfoLine3", self.business_info_line3),
            business_info_line4: keep("businessInfoLine4", self.business_info_line4),
            company_logo_url: keep("companyLogoUrl", self.company_logo_url),
            todoist_api_key: keep("todoistApiKey", self.todoist_api_key),
            shadow_intensity: Some(self.shadow_intensity.unwrap_or(DEFAULT_SHADOW_INTENSITY).clamp(0.0, 100.0)),
            border_radius: Some(self.border_radius.unwrap_or(DEFAULT_BORDER_RADIUS).max(0.0)),
            overlay_enabled: Some(self.overlay_enabled.unwrap_or(true)),
            overlay_opacity: Some(self.overlay_opacity.unwrap_or(DEFAULT_OVERLAY_OPACITY).clamp(0.0, 100.0)),
            background_image: None,
        };
        (cleaned, removed)
    }
}

/// Resolved background image: local partition first, legacy sync value second.
pub fn background_image(images: &BrandImages, settings: &BrandSettings) -> Option<String> {
    images
        .background_image
        .as_deref()
        .or(settings.background_image.as_deref())
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
}

/// Company logo with its optional click target.
#[derive(Debug, Clone, PartialEq)]
pub struct Logo {
    pub src: String,
    pub href: Option<String>,
}

pub fn logo(images: &BrandImages, settings: &BrandSettings) -> Option<Logo> {
    let src = images.company_logo.as_deref().filter(|s| !s.trim().is_empty())?;
    Some(Logo {
        src: src.to_string(),
        href: settings
            .company_logo_url
            .as_deref()
            .map(str::trim)
            .filter(|u| !u.is_empty())
            .map(String::from),
    })
}

// ========================
// Header content
// ========================

#[derive(Debug, Clone, PartialEq)]
pub enum HeaderTitle {
    Greeting { greeting: String, user_name: String },
    /// Sanitized HTML
    Custom(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum HeaderSubtitle {
    Date(String),
    /// Sanitized HTML
    Custom(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct HeaderContent {
    pub title: HeaderTitle,
    pub subtitle: HeaderSubtitle,
    pub business_lines: Vec<String>,
}

pub fn greeting_for_hour(hour: u32) -> &'static str {
    if hour < 12 {
        "Good morning"
    } else if hour < 18 {
        "Good afternoon"
    } else {
        "Good evening"
    }
}

pub fn format_long_date<Tz: TimeZone>(now: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    now.format(DATE_FORMAT).to_string()
}

/// Values substituted into `{{greeting}}`, `{{date}}` and `{{userName}}`.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaceholderContext {
    pub greeting: &'static str,
    pub date: String,
    pub user_name: String,
}

impl PlaceholderContext {
    pub fn at<Tz: TimeZone>(now: &DateTime<Tz>, user_name: &str) -> Self
    where
        Tz::Offset: std::fmt::Display,
    {
        Self {
            greeting: greeting_for_hour(now.hour()),
            date: format_long_date(now),
            user_name: user_name.to_string(),
        }
    }

    /// Case-insensitive substitution. The result is HTML, so the user name
    /// is escaped on the way in.
    pub fn apply(&self, template: &str) -> String {
        let text = replace_token(template, "greeting", self.greeting);
        let text = replace_token(&text, "date", &self.date);
        replace_token(&text, "username", &escape_html(&self.user_name))
    }
}

fn replace_token(text: &str, token: &str, value: &str) -> String {
    let pattern = format!(r"(?i)\{{\{{{}\}}\}}", token);
    match Regex::new(&pattern) {
        Ok(re) => re.replace_all(text, NoExpand(value)).into_owned(),
        Err(e) => {
            log::warn!("[BRAND] Bad placeholder pattern {}: {}", pattern, e);
            text.to_string()
        }
    }
}

// ========================
// Colors
// ========================

/// `#rrggbb` (hash optional) to components; anything else yields `None`.
pub fn hex_to_rgb(hex: &str) -> Option<(u8, u8, u8)> {
    let digits = hex.strip_prefix('#').unwrap_or(hex);
    if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();
    Some((channel(0)?, channel(2)?, channel(4)?))
}

/// Approximate `rgb()/rgba()` back to `#rrggbb` for color pickers.
pub fn rgba_to_hex(color: &str) -> Option<String> {
    if color.starts_with('#') {
        return Some(color.to_string());
    }
    let inner = color
        .strip_prefix("rgba(")
        .or_else(|| color.strip_prefix("rgb("))?
        .trim_end_matches(')');
    let mut channels = inner.split(',').map(|p| p.trim().parse::<u8>().ok());
    let r = channels.next()??;
    let g = channels.next()??;
    let b = channels.next()??;
    Some(format!("#{:02x}{:02x}{:02x}", r, g, b))
}

/// `rgba(r, g, b, a)` from a hex color and a 0..=100 opacity.
pub fn hex_with_opacity(hex: &str, opacity_percent: f64) -> Option<String> {
    let (r, g, b) = hex_to_rgb(hex)?;
    Some(format!("rgba({}, {}, {}, {})", r, g, b, format_decimal(opacity_percent / 100.0)))
}

fn shadows(intensity: f64) -> (String, String) {
    let opacity = intensity / 100.0;
    (
        format!("0 4px 6px rgba(0, 0, 0, {})", format_decimal(0.1 * opacity)),
        format!("0 10px 25px rgba(0, 0, 0, {})", format_decimal(0.15 * opacity)),
    )
}

/// Shortest decimal at four places of precision ("0.015", "0.2", "1").
fn format_decimal(value: f64) -> String {
    let rounded = (value * 10_000.0).round() / 10_000.0;
    format!("{}", rounded)
}

// ========================
// Defaults
// ========================

/// Written on first start when no palette exists.
pub fn install_defaults() -> Value {
    json!({
        "primaryColor": "#4A90E2",
        "secondaryColor": "#50C878",
        "accentColor": "#FF6B6B",
        "backgroundColor": "rgba(15, 23, 42, 0.85)",
        "cardBackground": "rgba(255, 255, 255, 0.95)",
        "textPrimary": "#1E293B",
        "textSecondary": "#64748B",
        "userName": "Team",
        "links": [],
        "notes": []
    })
}

/// Values written by "Reset to defaults". The local background image is
/// cleared separately.
pub fn reset_defaults() -> Value {
    json!({
        "primaryColor": "#4A90E2",
        "secondaryColor": "#50C878",
        "accentColor": "#FF6B6B",
        "backgroundColor": "rgba(15, 23, 42, 0.2)",
        "cardBackground": "rgba(255, 255, 255, 0.95)",
        "textPrimary": "#1E293B",
        "textSecondary": "#64748B",
        "textLight": "#FFFFFF",
        "borderColor": "rgba(226, 232, 240, 0.5)",
        "shadowIntensity": 15,
        "borderRadius": 8,
        "backgroundImage": "",
        "userName": "Team",
        "todoistApiKey": "",
        "cardVisibilityTrackers": true,
        "cardVisibilityNotes": true,
        "cardVisibilityLinks": true,
        "cardVisibilityTodoist": true,
        "overlayEnabled": true,
        "overlayOpacity": 20
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, TimeZone};
    use pretty_assertions::assert_eq;

    fn at(hour: u32, minute: u32) -> DateTime<FixedOffset> {
        FixedOffset::east_opt(0)
            .unwrap()
            .with_ymd_and_hms(2026, 10, 18, hour, minute, 0)
            .unwrap()
    }

    fn var<'a>(vars: &'a [(&'static str, String)], name: &str) -> Option<&'a str> {
        vars.iter().find(|(n, _)| *n == name).map(|(_, v)| v.as_str())
    }

    #[test]
    fn test_greeting_boundaries() {
        assert_eq!(greeting_for_hour(0), "Good morning");
        assert_eq!(greeting_for_hour(11), "Good morning");
        assert_eq!(greeting_for_hour(12), "Good afternoon");
        assert_eq!(greeting_for_hour(17), "Good afternoon");
        assert_eq!(greeting_for_hour(18), "Good evening");
        assert_eq!(greeting_for_hour(23), "Good evening");
    }

    #[test]
    fn test_long_date_format() {
        assert_eq!(format_long_date(&at(9, 5)), "Sunday, October 18, 2026 at 09:05 AM");
        assert_eq!(format_long_date(&at(21, 30)), "Sunday, October 18, 2026 at 09:30 PM");
    }

    #[test]
    fn test_placeholders_case_insensitive() {
        let ctx = PlaceholderContext::at(&at(14, 0), "Acme");
        assert_eq!(
            ctx.apply("{{Greeting}}, {{USERNAME}} and {{userName}}"),
            "Good afternoon, Acme and Acme"
        );
        assert_eq!(ctx.apply("Today: {{DATE}}"), "Today: Sunday, October 18, 2026 at 02:00 PM");
        assert_eq!(ctx.apply("no tokens {{other}}"), "no tokens {{other}}");
    }

    #[test]
    fn test_placeholder_user_name_is_literal() {
        let ctx = PlaceholderContext::at(&at(8, 0), "$1 <b>");
        assert_eq!(ctx.apply("Hi {{userName}}"), "Hi $1 &lt;b&gt;");
    }

    #[test]
    fn test_default_header_uses_greeting_and_date() {
        let settings = BrandSettings { user_name: Some("Ops".into()), ..Default::default() };
        let header = settings.header(&at(19, 0));
        assert_eq!(
            header.title,
            HeaderTitle::Greeting { greeting: "Good evening".into(), user_name: "Ops".into() }
        );
        assert_eq!(header.subtitle, HeaderSubtitle::Date("Sunday, October 18, 2026 at 07:00 PM".into()));
        assert!(header.business_lines.is_empty());
    }

    #[test]
    fn test_custom_header_is_sanitized() {
        let settings = BrandSettings {
            custom_header_title: Some("<b>{{greeting}}</b><script>x()</script>".into()),
            business_info_line2: Some("Call {{userName}}".into()),
            business_info_line3: Some("   ".into()),
            ..Default::default()
        };
        let header = settings.header(&at(7, 0));
        assert_eq!(header.title, HeaderTitle::Custom("<b>Good morning</b>".into()));
        assert_eq!(header.business_lines, vec!["Call Team".to_string()]);
    }

    #[test]
    fn test_css_variables() {
        let settings = BrandSettings {
            primary_color: Some("#4A90E2".into()),
            accent_color: Some("tomato".into()),
            text_light: Some(String::new()),
            shadow_intensity: Some(15.0),
            border_radius: Some(5.0),
            ..Default::default()
        };
        let vars = settings.css_variables();
        assert_eq!(var(&vars, "--primary-color-rgb"), Some("74, 144, 226"));
        assert_eq!(var(&vars, "--accent-color"), Some("tomato"));
        assert_eq!(var(&vars, "--accent-color-rgb"), None);
        assert_eq!(var(&vars, "--text-light"), None);
        assert_eq!(var(&vars, "--shadow"), Some("0 4px 6px rgba(0, 0, 0, 0.015)"));
        assert_eq!(var(&vars, "--shadow-lg"), Some("0 10px 25px rgba(0, 0, 0, 0.0225)"));
        assert_eq!(var(&vars, "--border-radius"), Some("5px"));
        assert_eq!(var(&vars, "--border-radius-sm"), Some("4px"));
        assert_eq!(var(&vars, "--border-radius-lg"), Some("8px"));
    }

    #[test]
    fn test_default_radius_and_shadow() {
        let vars = BrandSettings::default().css_variables();
        assert_eq!(var(&vars, "--border-radius"), Some("8px"));
        assert_eq!(var(&vars, "--border-radius-sm"), Some("6px"));
        assert_eq!(var(&vars, "--border-radius-lg"), Some("12px"));
        assert_eq!(var(&vars, "--primary-color"), None);
    }

    #[test]
    fn test_overlay_color() {
        let mut settings = BrandSettings { background_color: Some("rgba(0, 0, 0, 0.2)".into()), ..Default::default() };
        assert_eq!(settings.overlay_color().as_deref(), Some("rgba(0, 0, 0, 0.2)"));
        settings.overlay_enabled = Some(false);
        assert_eq!(settings.overlay_color(), None);
        assert_eq!(BrandSettings::default().overlay_color(), None);
    }

    #[test]
    fn test_fallbacks_only_when_palette_missing() {
        let empty = BrandSettings::default().with_fallbacks();
        assert_eq!(empty.primary_color.as_deref(), Some("#4A90E2"));
        assert_eq!(empty.user_name(), "Team");

        let custom = BrandSettings { primary_color: Some("#000000".into()), ..Default::default() }.with_fallbacks();
        assert_eq!(custom.card_background, None);
    }

    #[test]
    fn test_color_conversions() {
        assert_eq!(hex_to_rgb("#ff6b6b"), Some((255, 107, 107)));
        assert_eq!(hex_to_rgb("50C878"), Some((80, 200, 120)));
        assert_eq!(hex_to_rgb("#fff"), None);
        assert_eq!(rgba_to_hex("rgba(15, 23, 42, 0.85)").as_deref(), Some("#0f172a"));
        assert_eq!(rgba_to_hex("#123456").as_deref(), Some("#123456"));
        assert_eq!(rgba_to_hex("blue"), None);
        assert_eq!(hex_with_opacity("#0f172a", 20.0).as_deref(), Some("rgba(15, 23, 42, 0.2)"));
        assert_eq!(hex_with_opacity("#0f172a", 0.0).as_deref(), Some("rgba(15, 23, 42, 0)"));
    }

    #[test]
    fn test_save_removes_blank_fields() {
        let form = BrandSettings {
            primary_color: Some("#111111".into()),
            custom_header_title: Some("   ".into()),
            user_name: Some(String::new()),
            business_info_line1: Some("  Line  ".into()),
            ..Default::default()
        };
        let (saved, removed) = form.into_save();
        assert_eq!(saved.user_name.as_deref(), Some("Team"));
        assert_eq!(saved.business_info_line1.as_deref(), Some("Line"));
        assert_eq!(saved.shadow_intensity, Some(15.0));
        assert!(removed.contains(&"customHeaderTitle"));
        assert!(!removed.contains(&"primaryColor"));
    }

    #[test]
    fn test_background_image_prefers_local() {
        let images = BrandImages { background_image: Some("data:local".into()), company_logo: None };
        let settings = BrandSettings { background_image: Some("https://legacy".into()), ..Default::default() };
        assert_eq!(background_image(&images, &settings).as_deref(), Some("data:local"));
        assert_eq!(background_image(&BrandImages::default(), &settings).as_deref(), Some("https://legacy"));
        assert_eq!(logo(&images, &settings), None);
    }
}
