//! Per-session activity journal, one JSON object per line.
//!
//! Passwords are never written here.

use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;

pub struct Journal {
    session_id: String,
    file: File,
}

#[derive(Serialize)]
struct Event<'a> {
    ts: DateTime<Utc>,
    session_id: &'a str,
    #[serde(rename = "type")]
    event_type: &'a str,
    #[serde(flatten)]
    data: serde_json::Value,
}

impl Journal {
    pub fn new(path: &Path, session_id: &str) -> Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let file = OpenOptions::new().create(true).append(true).open(path)?;

        Ok(Self {
            session_id: session_id.to_string(),
            file,
        })
    }

    pub fn log(&mut self, event_type: &str, data: serde_json::Value) -> Result<()> {
        let event = Event {
            ts: Utc::now(),
            session_id: &self.session_id,
            event_type,
            data,
        };
        let line = serde_json::to_string(&event)?;
        writeln!(self.file, "{}", line)?;
        self.file.flush()?;
        Ok(())
    }

    pub fn session_start(&mut self, db_path: &Path, users: usize, projects: usize) -> Result<()> {
        self.log(
            "session_start",
            serde_json::json!({
                "db_path": db_path,
                "users": users,
                "projects": projects,
            }),
        )
    }

    pub fn user_registered(&mut self, email: &str) -> Result<()> {
        self.log("user_registered", serde_json::json!({ "email": email }))
    }

    pub fn register_rejected(&mut self, email: &str, reason: &str) -> Result<()> {
        self.log(
            "register_rejected",
            serde_json::json!({ "email": email, "reason": reason }),
        )
    }

    pub fn login_ok(&mut self, email: &str) -> Result<()> {
        self.log("login_ok", serde_json::json!({ "email": email }))
    }

    pub fn login_failed(&mut self, email: &str) -> Result<()> {
        self.log("login_failed", serde_json::json!({ "email": email }))
    }

    pub fn logout(&mut self, email: &str) -> Result<()> {
        self.log("logout", serde_json::json!({ "email": email }))
    }

    pub fn project_created(&mut self, owner: &str, title: &str) -> Result<()> {
        self.log(
            "project_created",
            serde_json::json!({ "owner": owner, "title": title }),
        )
    }

    pub fn project_rejected(&mut self, owner: &str, title: &str, reason: &str) -> Result<()> {
        self.log(
            "project_rejected",
            serde_json::json!({ "owner": owner, "title": title, "reason": reason }),
        )
    }

    pub fn project_updated(&mut self, owner: &str, title: &str) -> Result<()> {
        self.log(
            "project_updated",
            serde_json::json!({ "owner": owner, "title": title }),
        )
    }

    pub fn project_deleted(&mut self, owner: &str, title: &str) -> Result<()> {
        self.log(
            "project_deleted",
            serde_json::json!({ "owner": owner, "title": title }),
        )
    }

    /// Edit or delete attempt that found nothing the actor owns
    pub fn project_denied(&mut self, actor: &str, title: &str, action: &str) -> Result<()> {
        self.log(
            "project_denied",
            serde_json::json!({ "actor": actor, "title": title, "action": action }),
        )
    }

    pub fn search(&mut self, date: &str, matches: Option<usize>) -> Result<()> {
        self.log(
            "search",
            serde_json::json!({ "date": date, "matches": matches }),
        )
    }

    pub fn store_error(&mut self, operation: &str, error: &str) -> Result<()> {
        self.log(
            "store_error",
            serde_json::json!({ "operation": operation, "error": error }),
        )
    }
}
