//! Todoist Card Component
//!
//! Today's tasks with completion checkboxes.

use chrono::Local;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::changes::RefreshScope;
use crate::context::AppContext;
use crate::error::TodoistError;
use crate::models::TodoistTask;
use crate::storage;
use crate::todoist::{due_label, priority_class, TodoistClient};

#[derive(Debug, Clone, PartialEq)]
enum TasksState {
    Loading,
    Failed(String),
    Loaded(Vec<TodoistTask>),
}

async fn fetch_today() -> Result<Vec<TodoistTask>, TodoistError> {
    let key = storage::load_todoist_api_key().await.unwrap_or_else(|e| {
        log::warn!("[TODOIST] Could not read API key: {}", e);
        None
    });
    let client = TodoistClient::new(key.as_deref())?;
    client.today_tasks(Local::now().date_naive()).await
}

async fn toggle_task(task_id: String, completed: bool) -> Result<(), TodoistError> {
    let key = storage::load_todoist_api_key().await.ok().flatten();
    let client = TodoistClient::new(key.as_deref())?;
    client.set_completed(&task_id, completed).await
}

#[component]
fn TaskRow(task: TodoistTask, on_changed: Callback<()>) -> impl IntoView {
    let id = task.id.clone();
    let url = task.url.clone();
    let today = Local::now().date_naive();
    let due = task.due.as_ref().map(|d| due_label(&d.date, today));
    let class = format!("todoist-task {}", priority_class(task.priority));
    let description = (!task.description.trim().is_empty()).then(|| task.description.clone());

    let toggle = move |ev: web_sys::Event| {
        ev.stop_propagation();
        let checked = event_target_checked(&ev);
        let id = id.clone();
        spawn_local(async move {
            match toggle_task(id, checked).await {
                Ok(()) => on_changed.run(()),
                Err(e) => log::error!("[TODOIST] Failed to update task: {}", e),
            }
        });
    };

    let open = move |_| {
        if let (Some(url), Some(window)) = (url.as_deref(), web_sys::window()) {
            let _ = window.open_with_url_and_target(url, "_blank");
        }
    };

    view! {
        <div class=class>
            <input
                type="checkbox"
                class="todoist-checkbox"
                prop:checked=task.is_completed
                on:click=|ev| ev.stop_propagation()
                on:change=toggle
            />
            <div class="todoist-task-body" on:click=open>
                <div class="todoist-task-content">{task.content.clone()}</div>
                {description.map(|d| view! { <div class="todoist-task-description">{d}</div> })}
                {due.map(|d| view! { <span class="todoist-due">{d}</span> })}
            </div>
        </div>
    }
}

#[component]
pub fn TodoistCard() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");

    let (state, set_state) = signal(TasksState::Loading);
    let (refresh, set_refresh) = signal(0u32);

    Effect::new(move |_| {
        let _ = ctx.trigger(RefreshScope::Todoist).get();
        let _ = refresh.get();
        set_state.set(TasksState::Loading);
        spawn_local(async move {
            let next = match fetch_today().await {
                Ok(tasks) => TasksState::Loaded(tasks),
                Err(e) => {
                    if e != TodoistError::MissingApiKey {
                        log::warn!("[TODOIST] {}", e);
                    }
                    TasksState::Failed(e.to_string())
                }
            };
            let _ = set_state.try_set(next);
        });
    });

    let reload = Callback::new(move |_| set_refresh.update(|n| *n += 1));

    view! {
        <div class="card todoist-card">
            <div class="card-header">
                <h2 class="card-title">"Today's Tasks"</h2>
                <button class="todoist-refresh" title="Refresh" on:click=move |_| reload.run(())>"↻"</button>
            </div>
            <div class="todoist-list">
                {move || match state.get() {
                    TasksState::Loading => view! {
                        <p class="todoist-loading">"Loading tasks..."</p>
                    }.into_any(),
                    TasksState::Failed(message) => view! {
                        <p class="todoist-error">{message}</p>
                    }.into_any(),
                    TasksState::Loaded(tasks) if tasks.is_empty() => view! {
                        <p class="empty-state">"No tasks for today! 🎉"</p>
                    }.into_any(),
                    TasksState::Loaded(tasks) => tasks
                        .into_iter()
                        .map(|task| view! { <TaskRow task=task on_changed=reload /> })
                        .collect_view()
                        .into_any(),
                }}
            </div>
        </div>
    }
}
