//! Storage key names shared across surfaces.

pub const TRACKERS: &str = "countdowns";
pub const LINKS: &str = "links";
pub const NOTES: &str = "notes";
pub const QUICK_RESPONSES: &str = "quickResponses";

pub const CARD_ORDER: &str = "cardOrder";
pub const TEXT_CARDS: &str = "textCards";

pub const ADMIN_PASSWORD: &str = "adminPassword";
pub const ADMIN_UNLOCKED: &str = "adminUnlocked";

pub const PRIMARY_COLOR: &str = "primaryColor";
pub const TODOIST_API_KEY: &str = "todoistApiKey";

pub const BACKGROUND_IMAGE: &str = "backgroundImage";
pub const COMPANY_LOGO: &str = "companyLogo";
