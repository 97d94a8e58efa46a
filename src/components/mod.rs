//! UI Components
//!
//! Leptos components for the dashboard, options page and popup.

mod delete_confirm_button;
mod status_banner;

// New tab
mod brand_header;
mod dashboard_grid;
mod links_card;
mod new_tab_page;
mod notes_card;
mod text_card;
mod todoist_card;
mod trackers_card;

// Options
mod admin_section;
mod brand_form;
mod card_order_list;
mod link_editor;
mod note_editor;
mod options_page;
mod response_editor;
mod text_card_editor;
mod tracker_editor;
mod transfer_section;

// Popup
mod popup_page;

pub use delete_confirm_button::DeleteConfirmButton;
pub use status_banner::{ensure_unlocked, StatusBanner, StatusHandle, StatusKind};

pub use brand_header::{BrandBackdrop, BrandHeader};
pub use dashboard_grid::DashboardGrid;
pub use links_card::LinksCard;
pub use new_tab_page::NewTabPage;
pub use notes_card::NotesCard;
pub use text_card::TextCardView;
pub use todoist_card::TodoistCard;
pub use trackers_card::TrackersCard;

pub use admin_section::AdminSection;
pub use brand_form::BrandForm;
pub use card_order_list::CardOrderList;
pub use link_editor::LinkEditor;
pub use note_editor::NoteEditor;
pub use options_page::OptionsPage;
pub use response_editor::ResponseEditor;
pub use text_card_editor::TextCardEditor;
pub use tracker_editor::TrackerEditor;
pub use transfer_section::TransferSection;

pub use popup_page::PopupPage;
