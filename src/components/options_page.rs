//! Options Page Component

use leptos::prelude::*;

use super::{
    AdminSection, BrandBackdrop, BrandForm, CardOrderList, LinkEditor, NoteEditor, ResponseEditor,
    StatusBanner, StatusHandle, TextCardEditor, TrackerEditor, TransferSection,
};

/// Settings page; every editor below the admin section is gated by the lock
#[component]
pub fn OptionsPage() -> impl IntoView {
    let status = StatusHandle::new();
    provide_context(status);

    view! {
        <BrandBackdrop />
        <div class="options-container">
            <header class="options-header">
                <h1>"Brand Kit Settings"</h1>
            </header>
            <StatusBanner status=status />
            <AdminSection />
            <BrandForm />
            <CardOrderList />
            <TextCardEditor />
            <TrackerEditor />
            <LinkEditor />
            <NoteEditor />
            <ResponseEditor />
            <TransferSection />
        </div>
    }
}
