//! Brand Form Component
//!
//! Colors, header texts, business info, images and the Todoist key.

use leptos::prelude::*;
use leptos::task::spawn_local;
use wasm_bindgen::JsCast;

use crate::brand::{
    hex_with_opacity, rgba_to_hex, BrandImages, BrandSettings, DEFAULT_BORDER_RADIUS,
    DEFAULT_OVERLAY_OPACITY, DEFAULT_SHADOW_INTENSITY,
};
use crate::changes::RefreshScope;
use crate::context::AppContext;
use crate::storage;
use crate::store::{use_dashboard_store, DashboardStateStoreFields};

use super::{ensure_unlocked, StatusHandle};

/// Free-text brand fields edited by this form
macro_rules! brand_fields {
    ($($variant:ident => $field:ident),* $(,)?) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        enum BrandField {
            $($variant),*
        }

        impl BrandField {
            fn get<'a>(&self, settings: &'a BrandSettings) -> Option<&'a str> {
                match self {
                    $(BrandField::$variant => settings.$field.as_deref()),*
                }
            }

            fn slot<'a>(&self, settings: &'a mut BrandSettings) -> &'a mut Option<String> {
                match self {
                    $(BrandField::$variant => &mut settings.$field),*
                }
            }
        }
    };
}

brand_fields! {
    PrimaryColor => primary_color,
    SecondaryColor => secondary_color,
    AccentColor => accent_color,
    BackgroundColor => background_color,
    CardBackground => card_background,
    TextPrimary => text_primary,
    TextSecondary => text_secondary,
    TextLight => text_light,
    BorderColor => border_color,
    UserName => user_name,
    CustomHeaderTitle => custom_header_title,
    CustomHeaderText => custom_header_text,
    BusinessLine1 => business_info_line1,
    BusinessLine2 => business_info_line2,
    BusinessLine3 => business_info_line3,
    BusinessLine4 => business_info_line4,
    CompanyLogoUrl => company_logo_url,
    TodoistApiKey => todoist_api_key,
}

impl BrandField {
    const COLORS: [(BrandField, &'static str); 9] = [
        (BrandField::PrimaryColor, "Primary color"),
        (BrandField::SecondaryColor, "Secondary color"),
        (BrandField::AccentColor, "Accent color"),
        (BrandField::BackgroundColor, "Overlay color"),
        (BrandField::CardBackground, "Card background"),
        (BrandField::TextPrimary, "Text (primary)"),
        (BrandField::TextSecondary, "Text (secondary)"),
        (BrandField::TextLight, "Text (light)"),
        (BrandField::BorderColor, "Border color"),
    ];

    const BUSINESS_LINES: [(BrandField, &'static str); 4] = [
        (BrandField::BusinessLine1, "Line 1"),
        (BrandField::BusinessLine2, "Line 2"),
        (BrandField::BusinessLine3, "Line 3"),
        (BrandField::BusinessLine4, "Line 4"),
    ];

    fn read(&self, form: RwSignal<BrandSettings>) -> String {
        form.with(|s| self.get(s).unwrap_or_default().to_string())
    }

    fn write(&self, form: RwSignal<BrandSettings>, value: String) {
        form.update(|s| *self.slot(s) = Some(value));
    }
}

/// The overlay color is stored with the overlay opacity folded in.
fn fold_overlay_opacity(mut settings: BrandSettings) -> BrandSettings {
    let opacity = settings.overlay_opacity.unwrap_or(DEFAULT_OVERLAY_OPACITY);
    if let Some(color) = settings.background_color.as_deref().and_then(|c| hex_with_opacity(c, opacity)) {
        settings.background_color = Some(color);
    }
    settings
}

fn parse_number(ev: &web_sys::Event) -> Option<f64> {
    event_target_value(ev).parse::<f64>().ok()
}

fn picked_file(ev: &web_sys::Event) -> Option<web_sys::File> {
    ev.target()
        .and_then(|t| t.dyn_into::<web_sys::HtmlInputElement>().ok())
        .and_then(|input| input.files())
        .and_then(|files| files.get(0))
}

#[component]
fn ColorInput(form: RwSignal<BrandSettings>, field: BrandField, label: &'static str) -> impl IntoView {
    let value = move || field.read(form);
    view! {
        <label class="form-field color-field">
            <span>{label}</span>
            <input
                type="color"
                prop:value=move || rgba_to_hex(&value()).unwrap_or_else(|| "#000000".to_string())
                on:input=move |ev| field.write(form, event_target_value(&ev))
            />
            <input
                type="text"
                class="color-text"
                prop:value=value
                on:change=move |ev| field.write(form, event_target_value(&ev))
            />
        </label>
    }
}

#[component]
fn TextInput(
    form: RwSignal<BrandSettings>,
    field: BrandField,
    label: &'static str,
    #[prop(optional)] placeholder: &'static str,
    #[prop(optional)] secret: bool,
) -> impl IntoView {
    view! {
        <label class="form-field">
            <span>{label}</span>
            <input
                type=if secret { "password" } else { "text" }
                placeholder=placeholder
                prop:value=move || field.read(form)
                on:input=move |ev| field.write(form, event_target_value(&ev))
            />
        </label>
    }
}

#[component]
fn ImagePicker(
    images: RwSignal<BrandImages>,
    label: &'static str,
    get: fn(&BrandImages) -> Option<String>,
    set: fn(&mut BrandImages, Option<String>),
) -> impl IntoView {
    let status = StatusHandle::use_context();

    let on_pick = move |ev: web_sys::Event| {
        let Some(file) = picked_file(&ev) else { return };
        spawn_local(async move {
            match storage::read_file_data_url(file).await {
                Ok(data) => images.update(|i| set(i, Some(data))),
                Err(e) => status.error(format!("Could not read image: {}", e)),
            }
        });
    };

    view! {
        <div class="form-field image-field">
            <span>{label}</span>
            {move || images.with(get).map(|src| view! { <img class="image-preview" src=src alt=label /> })}
            <input type="file" accept="image/*" on:change=on_pick />
            <button
                type="button"
                class="btn btn-secondary"
                disabled=move || images.with(get).is_none()
                on:click=move |_| images.update(|i| set(i, None))
            >
                "Remove"
            </button>
        </div>
    }
}

#[component]
pub fn BrandForm() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");
    let store = use_dashboard_store();
    let status = StatusHandle::use_context();

    let form = RwSignal::new(BrandSettings::default());
    let images = RwSignal::new(BrandImages::default());

    // Follow the stored values; a reload overwrites unsaved edits
    Effect::new(move |_| form.set(store.brand().get()));
    Effect::new(move |_| images.set(store.images().get()));

    let save = move |_| {
        let settings = fold_overlay_opacity(form.get_untracked());
        let picked = images.get_untracked();
        spawn_local(async move {
            if !ensure_unlocked(status).await {
                return;
            }
            match storage::save_brand(settings, &picked).await {
                Ok(()) => {
                    status.success("Settings saved successfully!");
                    ctx.reload_all([RefreshScope::Brand, RefreshScope::Images, RefreshScope::Todoist]);
                }
                Err(e) => status.error(format!("Failed to save settings: {}", e)),
            }
        });
    };

    let reset = move |_| {
        spawn_local(async move {
            if !ensure_unlocked(status).await {
                return;
            }
            match storage::reset_brand().await {
                Ok(()) => {
                    status.success("Settings reset to defaults");
                    ctx.reload_all([RefreshScope::Brand, RefreshScope::Images, RefreshScope::Layout]);
                }
                Err(e) => status.error(format!("Failed to reset settings: {}", e)),
            }
        });
    };

    view! {
        <section class="settings-section brand-section">
            <h2>"Branding"</h2>

            <h3>"Colors"</h3>
            <div class="color-grid">
                {BrandField::COLORS.into_iter().map(|(field, label)| view! {
                    <ColorInput form=form field=field label=label />
                }).collect_view()}
            </div>

            <h3>"Appearance"</h3>
            <label class="form-field">
                <span>"Shadow intensity"</span>
                <input
                    type="range" min="0" max="100"
                    prop:value=move || form.with(|s| s.shadow_intensity.unwrap_or(DEFAULT_SHADOW_INTENSITY)).to_string()
                    on:input=move |ev| form.update(|s| s.shadow_intensity = parse_number(&ev))
                />
            </label>
            <label class="form-field">
                <span>"Border radius (px)"</span>
                <input
                    type="number" min="0" max="40"
                    prop:value=move || form.with(|s| s.border_radius.unwrap_or(DEFAULT_BORDER_RADIUS)).to_string()
                    on:input=move |ev| form.update(|s| s.border_radius = parse_number(&ev))
                />
            </label>
            <label class="form-field checkbox-field">
                <input
                    type="checkbox"
                    prop:checked=move || form.with(|s| s.overlay_enabled.unwrap_or(true))
                    on:change=move |ev| form.update(|s| s.overlay_enabled = Some(event_target_checked(&ev)))
                />
                <span>"Show background overlay"</span>
            </label>
            <label class="form-field">
                <span>"Overlay opacity (%)"</span>
                <input
                    type="range" min="0" max="100"
                    prop:value=move || form.with(|s| s.overlay_opacity.unwrap_or(DEFAULT_OVERLAY_OPACITY)).to_string()
                    on:input=move |ev| form.update(|s| s.overlay_opacity = parse_number(&ev))
                />
            </label>

            <h3>"Images"</h3>
            <ImagePicker
                images=images
                label="Background image"
                get=|i| i.background_image.clone()
                set=|i, v| i.background_image = v
            />
            <ImagePicker
                images=images
                label="Company logo"
                get=|i| i.company_logo.clone()
                set=|i, v| i.company_logo = v
            />
            <TextInput form=form field=BrandField::CompanyLogoUrl label="Logo link" placeholder="https://example.com" />

            <h3>"Header"</h3>
            <TextInput form=form field=BrandField::UserName label="User name" placeholder="Team" />
            <TextInput
                form=form
                field=BrandField::CustomHeaderTitle
                label="Custom title"
                placeholder="{{greeting}}, {{userName}}!"
            />
            <TextInput form=form field=BrandField::CustomHeaderText label="Custom subtitle" placeholder="{{date}}" />
            <p class="form-hint">"Placeholders: {{greeting}}, {{date}}, {{userName}}. Basic HTML is allowed."</p>

            <h3>"Business Info"</h3>
            {BrandField::BUSINESS_LINES.into_iter().map(|(field, label)| view! {
                <TextInput form=form field=field label=label />
            }).collect_view()}

            <h3>"Todoist"</h3>
            <TextInput form=form field=BrandField::TodoistApiKey label="API token" secret=true />

            <div class="form-actions">
                <button class="btn btn-primary" disabled=move || !ctx.is_unlocked() on:click=save>
                    "Save Settings"
                </button>
                <button class="btn btn-secondary" disabled=move || !ctx.is_unlocked() on:click=reset>
                    "Reset to Defaults"
                </button>
            </div>
        </section>
    }
}
