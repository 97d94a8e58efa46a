//! Todoist integration -- today's tasks on the dashboard.

use chrono::NaiveDate;
use reqwest::{Client, StatusCode};

use crate::error::TodoistError;
use crate::models::TodoistTask;

const API_BASE: &str = "https://api.todoist.com/rest/v2";
const WEB_TASK_URL: &str = "https://app.todoist.com/app/task/";

pub struct TodoistClient {
    token: String,
    client: Client,
}

impl TodoistClient {
    /// Client for a configured token; a blank token is a configuration error.
    pub fn new(token: Option<&str>) -> Result<Self, TodoistError> {
        let token = token.map(str::trim).filter(|t| !t.is_empty()).ok_or(TodoistError::MissingApiKey)?;
        Ok(Self {
            token: token.to_string(),
            client: Client::new(),
        })
    }

    /// Fetch all active tasks of the account.
    pub async fn fetch_tasks(&self) -> Result<Vec<TodoistTask>, TodoistError> {
        let resp = self
            .client
            .get(format!("{}/tasks", API_BASE))
            .header("Authorization", format!("Bearer {}", self.token))
            .send()
            .await?;

        check_status(resp.status())?;
        Ok(resp.json::<Vec<TodoistTask>>().await?)
    }

    /// Tasks due on `today`, ready to render.
    pub async fn today_tasks(&self, today: NaiveDate) -> Result<Vec<TodoistTask>, TodoistError> {
        let tasks = self.fetch_tasks().await?;
        log::debug!("[TODOIST] Fetched {} tasks", tasks.len());
        Ok(prepare_today(tasks, today))
    }

    /// Close or reopen a task.
    pub async fn set_completed(&self, task_id: &str, completed: bool) -> Result<(), TodoistError> {
        let action = if completed { "close" } else { "reopen" };
        let resp = self
            .client
            .post(format!("{}/tasks/{}/{}", API_BASE, task_id, action))
            .header("Authorization", format!("Bearer {}", self.token))
            .send()
            .await?;

        check_status(resp.status())
    }
}

fn check_status(status: StatusCode) -> Result<(), TodoistError> {
    if status == StatusCode::UNAUTHORIZED {
        return Err(TodoistError::Unauthorized);
    }
    if !status.is_success() {
        return Err(TodoistError::Status(status.as_u16()));
    }
    Ok(())
}

/// Calendar date of a Todoist due value ("2026-10-18" or "2026-10-18T09:00:00").
pub fn due_date(raw: &str) -> Option<NaiveDate> {
    let day = raw.get(..10)?;
    NaiveDate::parse_from_str(day, "%Y-%m-%d").ok()
}

/// Keep incomplete tasks due on `today`, sort by priority (4 highest) then
/// by `order`, and make sure every task carries a web URL.
pub fn prepare_today(tasks: Vec<TodoistTask>, today: NaiveDate) -> Vec<TodoistTask> {
    let mut today_tasks: Vec<TodoistTask> = tasks
        .into_iter()
        .filter(|task| !task.is_completed)
        .filter(|task| task.due.as_ref().and_then(|d| due_date(&d.date)) == Some(today))
        .map(with_web_url)
        .collect();

    today_tasks.sort_by(|a, b| b.priority.cmp(&a.priority).then(a.order.cmp(&b.order)));
    today_tasks
}

fn with_web_url(mut task: TodoistTask) -> TodoistTask {
    let current = task.url.as_deref().unwrap_or_default();
    if !current.contains("/app/task/") {
        task.url = Some(format!("{}{}", WEB_TASK_URL, task.id));
    }
    task
}

pub fn priority_class(priority: u8) -> &'static str {
    match priority {
        p if p >= 3 => "high-priority",
        2 => "medium-priority",
        _ => "low-priority",
    }
}

/// "Today" for the current date, otherwise a short month and day ("Oct 9").
pub fn due_label(raw: &str, today: NaiveDate) -> String {
    match due_date(raw) {
        Some(date) if date == today => "Today".to_string(),
        Some(date) => date.format("%b %-d").to_string(),
        None => raw.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TodoistDue;
    use pretty_assertions::assert_eq;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 18).unwrap()
    }

    fn task(id: &str, due: Option<&str>, priority: u8, order: i64) -> TodoistTask {
        TodoistTask {
            id: id.to_string(),
            content: format!("Task {}", id),
            description: String::new(),
            due: due.map(|d| TodoistDue { date: d.to_string() }),
            priority,
            order,
            is_completed: false,
            url: None,
        }
    }

    #[test]
    fn test_filters_to_incomplete_tasks_due_today() {
        let mut done = task("done", Some("2026-10-18"), 4, 0);
        done.is_completed = true;
        let tasks = vec![
            task("a", Some("2026-10-18"), 1, 2),
            task("b", Some("2026-10-19"), 4, 0),
            task("c", None, 4, 0),
            done,
            task("d", Some("2026-10-18T15:00:00"), 1, 1),
        ];
        let ids: Vec<String> = prepare_today(tasks, today()).into_iter().map(|t| t.id).collect();
        assert_eq!(ids, vec!["d".to_string(), "a".to_string()]);
    }

    #[test]
    fn test_sorts_by_priority_then_order() {
        let tasks = vec![
            task("low", Some("2026-10-18"), 1, 0),
            task("high-2", Some("2026-10-18"), 4, 2),
            task("mid", Some("2026-10-18"), 2, 0),
            task("high-1", Some("2026-10-18"), 4, 1),
        ];
        let ids: Vec<String> = prepare_today(tasks, today()).into_iter().map(|t| t.id).collect();
        assert_eq!(ids, vec!["high-1", "high-2", "mid", "low"]);
    }

    #[test]
    fn test_fills_missing_and_legacy_urls() {
        let mut legacy = task("2", Some("2026-10-18"), 1, 1);
        legacy.url = Some("https://todoist.com/showTask?id=2".into());
        let mut current = task("3", Some("2026-10-18"), 1, 2);
        current.url = Some("https://app.todoist.com/app/task/custom-3".into());
        let tasks = vec![task("1", Some("2026-10-18"), 1, 0), legacy, current];

        let urls: Vec<String> = prepare_today(tasks, today()).into_iter().filter_map(|t| t.url).collect();
        assert_eq!(
            urls,
            vec![
                "https://app.todoist.com/app/task/1",
                "https://app.todoist.com/app/task/2",
                "https://app.todoist.com/app/task/custom-3",
            ]
        );
    }

    #[test]
    fn test_priority_class() {
        assert_eq!(priority_class(4), "high-priority");
        assert_eq!(priority_class(3), "high-priority");
        assert_eq!(priority_class(2), "medium-priority");
        assert_eq!(priority_class(1), "low-priority");
    }

    #[test]
    fn test_due_label() {
        assert_eq!(due_label("2026-10-18", today()), "Today");
        assert_eq!(due_label("2026-10-09T08:00:00", today()), "Oct 9");
        assert_eq!(due_label("soon", today()), "soon");
    }

    #[test]
    fn test_status_mapping() {
        assert_eq!(check_status(StatusCode::OK), Ok(()));
        assert_eq!(check_status(StatusCode::UNAUTHORIZED), Err(TodoistError::Unauthorized));
        assert_eq!(check_status(StatusCode::FORBIDDEN), Err(TodoistError::Status(403)));
        assert_eq!(TodoistError::Status(500).to_string(), "API error: 500");
    }

    #[test]
    fn test_missing_key() {
        assert!(matches!(TodoistClient::new(None), Err(TodoistError::MissingApiKey)));
        assert!(matches!(TodoistClient::new(Some("  ")), Err(TodoistError::MissingApiKey)));
    }
}
