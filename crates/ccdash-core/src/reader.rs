//! Read Claude Code session data from ~/.claude.
//!
//! Layout consumed:
//! - projects/<project>/<session-id>.jsonl: one conversation record per line
//! - todos/<session-id>*.json: JSON array of todo items for the session
//! - statsig/: feature flag cache (see [`crate::read_statsig`])
//!
//! Every read walks the tree from scratch. Failures degrade to empty data at
//! the smallest enclosing unit (line, todo file, session, project, root).

use crate::normalize::{normalize_record, parse_timestamp};
use crate::stats::{self, ActivityWindows};
use crate::Result;
use ccdash_types::{
    Conversation, Project, ProjectStats, Session, StatsigData, Todo, TodoPriority, TodoStatus,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

const SESSION_EXTENSION: &str = ".jsonl";
const TODO_EXTENSION: &str = ".json";

/// Todo entry as written by the CLI. Every field is optional on disk.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TodoRecord {
    #[serde(default)]
    id: Option<Value>,
    #[serde(default)]
    content: Option<String>,
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    priority: Option<String>,
    #[serde(default)]
    created_at: Option<Value>,
    #[serde(default)]
    updated_at: Option<Value>,
}

/// Reads projects, sessions and todos from a Claude data directory.
#[derive(Debug, Clone)]
pub struct LogReader {
    claude_dir: PathBuf,
}

impl LogReader {
    /// Create a reader rooted at the given Claude data directory.
    pub fn new(claude_dir: impl Into<PathBuf>) -> Self {
        Self {
            claude_dir: claude_dir.into(),
        }
    }

    pub fn claude_dir(&self) -> &Path {
        &self.claude_dir
    }

    fn projects_dir(&self) -> PathBuf {
        self.claude_dir.join("projects")
    }

    fn todos_dir(&self) -> PathBuf {
        self.claude_dir.join("todos")
    }

    /// Read every project, most recently active first.
    ///
    /// A missing or unreadable `projects/` directory yields an empty list.
    pub fn read_projects(&self) -> Vec<Project> {
        self.read_projects_at(Utc::now())
    }

    /// Like [`read_projects`](Self::read_projects), with `now` standing in for
    /// every timestamp the files do not provide.
    pub fn read_projects_at(&self, now: DateTime<Utc>) -> Vec<Project> {
        match self.try_read_projects(now) {
            Ok(projects) => projects,
            Err(e) => {
                warn!(
                    target: "ccdash::reader",
                    "Error reading projects in {:?}: {}",
                    self.projects_dir(),
                    e
                );
                Vec::new()
            }
        }
    }

    fn try_read_projects(&self, now: DateTime<Utc>) -> Result<Vec<Project>> {
        let projects_dir = self.projects_dir();

        let entries = match fs::read_dir(&projects_dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(target: "ccdash::reader", "No projects directory at {:?}", projects_dir);
                return Ok(Vec::new());
            }
            Err(e) => return Err(e.into()),
        };

        let mut project_dirs: Vec<(String, PathBuf)> = Vec::new();
        for entry in entries {
            let entry = entry?;
            match fs::metadata(entry.path()) {
                Ok(meta) if meta.is_dir() => {}
                Ok(_) => continue,
                Err(e) => {
                    warn!(target: "ccdash::reader", "Skipping {:?}: {}", entry.path(), e);
                    continue;
                }
            }
            project_dirs.push((entry.file_name().to_string_lossy().to_string(), entry.path()));
        }
        project_dirs.sort_by(|a, b| a.0.cmp(&b.0));

        let todo_files = self.list_todo_files();
        let mut projects: Vec<Project> = project_dirs
            .iter()
            .map(|(name, path)| self.build_project(name, path, &todo_files, now))
            .collect();

        projects.sort_by(|a, b| b.last_activity.cmp(&a.last_activity));

        debug!(target: "ccdash::reader", "Read {} projects from {:?}", projects.len(), projects_dir);

        Ok(projects)
    }

    /// Read one project directory. An unreadable directory gives a project
    /// with no sessions.
    pub fn read_project(&self, project_id: &str, now: DateTime<Utc>) -> Project {
        let path = self.projects_dir().join(project_id);
        self.build_project(project_id, &path, &self.list_todo_files(), now)
    }

    fn build_project(
        &self,
        project_id: &str,
        project_path: &Path,
        todo_files: &[(String, PathBuf)],
        now: DateTime<Utc>,
    ) -> Project {
        let sessions: Vec<Session> = match session_files(project_path) {
            Ok(files) => files
                .into_iter()
                .map(|(session_id, path)| {
                    let todos = todos_for(&session_id, todo_files, now);
                    let mut session = self.read_session(project_id, &session_id, &path, now);
                    session.todos = todos;
                    session
                })
                .collect(),
            Err(e) => {
                warn!(
                    target: "ccdash::reader",
                    "Error reading project directory {:?}: {}",
                    project_path,
                    e
                );
                Vec::new()
            }
        };

        let last_activity = sessions
            .iter()
            .map(|s| s.last_update)
            .max()
            .unwrap_or(now);
        let total_messages = sessions.iter().map(|s| s.message_count).sum();
        let path = project_id.replace('-', "/");

        Project {
            id: project_id.to_string(),
            name: project_name(&path),
            path,
            total_sessions: sessions.len(),
            sessions,
            last_activity,
            total_messages,
        }
    }

    /// Parse one session transcript without its todos.
    ///
    /// Malformed lines are skipped. A transcript that cannot be read at all, or
    /// has no parseable lines, yields a session with no conversations whose
    /// start and last update are both `now`.
    pub fn read_session(
        &self,
        project_id: &str,
        session_id: &str,
        path: &Path,
        now: DateTime<Utc>,
    ) -> Session {
        let conversations = match fs::read(path) {
            Ok(bytes) => parse_transcript(&String::from_utf8_lossy(&bytes), session_id, now),
            Err(e) => {
                warn!(target: "ccdash::reader", "Error reading session {:?}: {}", path, e);
                Vec::new()
            }
        };

        let start_time = conversations.iter().map(|c| c.timestamp).min().unwrap_or(now);
        let last_update = conversations.iter().map(|c| c.timestamp).max().unwrap_or(now);

        Session {
            id: session_id.to_string(),
            project_id: project_id.to_string(),
            id_prefix: session_id.split('-').next().unwrap_or(session_id).to_string(),
            message_count: conversations.len(),
            duration: (last_update - start_time).num_milliseconds(),
            conversations,
            todos: Vec::new(),
            start_time,
            last_update,
        }
    }

    /// Read the todos whose snapshot file name starts with `session_id`.
    pub fn read_todos(&self, session_id: &str, now: DateTime<Utc>) -> Vec<Todo> {
        todos_for(session_id, &self.list_todo_files(), now)
    }

    /// Find a session by id across all projects.
    pub fn find_session(&self, session_id: &str) -> Option<Session> {
        self.read_projects()
            .into_iter()
            .flat_map(|p| p.sessions)
            .find(|s| s.id == session_id)
    }

    /// Read the cached feature flag data, if present.
    pub fn read_statsig(&self) -> Option<StatsigData> {
        crate::read_statsig(&self.claude_dir.join("statsig"))
    }

    /// Read every project and aggregate them.
    pub fn get_project_stats(&self, windows: &ActivityWindows) -> ProjectStats {
        let now = Utc::now();
        stats::project_stats(&self.read_projects_at(now), now, windows)
    }

    /// File names and paths in `todos/` ending in `.json`. Empty when the
    /// directory is missing or unreadable.
    fn list_todo_files(&self) -> Vec<(String, PathBuf)> {
        let todos_dir = self.todos_dir();
        let entries = match fs::read_dir(&todos_dir) {
            Ok(entries) => entries,
            Err(e) => {
                if e.kind() != ErrorKind::NotFound {
                    warn!(target: "ccdash::reader", "Error reading todos in {:?}: {}", todos_dir, e);
                }
                return Vec::new();
            }
        };

        let mut files: Vec<(String, PathBuf)> = entries
            .flatten()
            .filter_map(|entry| {
                let name = entry.file_name().to_string_lossy().to_string();
                name.ends_with(TODO_EXTENSION).then(|| (name, entry.path()))
            })
            .collect();
        files.sort_by(|a, b| a.0.cmp(&b.0));
        files
    }
}

impl Default for LogReader {
    /// Reader rooted at `~/.claude`.
    fn default() -> Self {
        Self::new(dirs::home_dir().unwrap_or_default().join(".claude"))
    }
}

/// `(session id, path)` of every `.jsonl` file in a project directory.
fn session_files(project_path: &Path) -> Result<Vec<(String, PathBuf)>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(project_path)? {
        let entry = entry?;
        let name = entry.file_name().to_string_lossy().to_string();
        let Some(session_id) = name.strip_suffix(SESSION_EXTENSION) else {
            continue;
        };
        match fs::metadata(entry.path()) {
            Ok(meta) if meta.is_file() => files.push((session_id.to_string(), entry.path())),
            Ok(_) => {}
            Err(e) => warn!(target: "ccdash::reader", "Skipping {:?}: {}", entry.path(), e),
        }
    }
    files.sort_by(|a, b| a.0.cmp(&b.0));
    Ok(files)
}

fn parse_transcript(content: &str, session_id: &str, now: DateTime<Utc>) -> Vec<Conversation> {
    let mut conversations = Vec::new();

    for (index, line) in content.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }

        match serde_json::from_str::<Value>(line) {
            Ok(record) => conversations.push(normalize_record(&record, session_id, now)),
            Err(e) => {
                warn!(
                    target: "ccdash::reader",
                    "Skipping malformed line {} in session {}: {}",
                    index + 1,
                    session_id,
                    e
                );
            }
        }
    }

    conversations
}

fn todos_for(session_id: &str, todo_files: &[(String, PathBuf)], now: DateTime<Utc>) -> Vec<Todo> {
    let mut todos = Vec::new();

    for (name, path) in todo_files.iter().filter(|(name, _)| name.starts_with(session_id)) {
        let stem = name.strip_suffix(TODO_EXTENSION).unwrap_or(name);
        match read_todo_file(path, stem, session_id, now) {
            Ok(mut file_todos) => todos.append(&mut file_todos),
            Err(e) => {
                warn!(target: "ccdash::reader", "Error reading todos from {:?}: {}", path, e);
            }
        }
    }

    todos
}

fn read_todo_file(
    path: &Path,
    file_stem: &str,
    session_id: &str,
    now: DateTime<Utc>,
) -> Result<Vec<Todo>> {
    let content = fs::read_to_string(path)?;
    let items = match serde_json::from_str::<Value>(&content)? {
        Value::Array(items) => items,
        _ => {
            debug!(target: "ccdash::reader", "Todo file {:?} is not an array", path);
            return Ok(Vec::new());
        }
    };

    let todos = items
        .into_iter()
        .enumerate()
        .filter_map(|(index, item)| match serde_json::from_value::<TodoRecord>(item) {
            Ok(record) => Some(todo_from_record(record, index, file_stem, session_id, now)),
            Err(e) => {
                debug!(target: "ccdash::reader", "Skipping todo {} in {:?}: {}", index, path, e);
                None
            }
        })
        .collect();

    Ok(todos)
}

fn todo_from_record(
    record: TodoRecord,
    index: usize,
    file_stem: &str,
    session_id: &str,
    now: DateTime<Utc>,
) -> Todo {
    let id = match record.id {
        Some(Value::String(id)) if !id.is_empty() => id,
        Some(Value::Number(n)) => n.to_string(),
        _ => format!("{}-{}", file_stem, index),
    };

    Todo {
        id,
        content: record.content.unwrap_or_default(),
        status: record
            .status
            .as_deref()
            .and_then(TodoStatus::parse)
            .unwrap_or_default(),
        priority: record
            .priority
            .as_deref()
            .and_then(TodoPriority::parse)
            .unwrap_or_default(),
        session_id: session_id.to_string(),
        created_at: parse_timestamp(record.created_at.as_ref()).unwrap_or(now),
        updated_at: parse_timestamp(record.updated_at.as_ref()).unwrap_or(now),
    }
}

/// Last path segment of a decoded project path.
fn project_name(path: &str) -> String {
    match path.rsplit('/').next() {
        Some(name) if !name.is_empty() => name.to_string(),
        _ => "Unknown Project".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ccdash_types::ConversationKind;
    use chrono::Duration;
    use proptest::prelude::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn setup() -> (TempDir, LogReader) {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("projects")).unwrap();
        let reader = LogReader::new(temp.path());
        (temp, reader)
    }

    fn write_session(temp: &TempDir, project: &str, session: &str, lines: &[String]) -> PathBuf {
        let dir = temp.path().join("projects").join(project);
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join(format!("{}.jsonl", session));
        fs::write(&path, lines.join("\n")).unwrap();
        path
    }

    fn write_todos(temp: &TempDir, file_name: &str, content: &str) {
        let dir = temp.path().join("todos");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(file_name), content).unwrap();
    }

    fn line(value: Value) -> String {
        value.to_string()
    }

    #[test]
    fn test_default_reader_uses_home_claude_dir() {
        let reader = LogReader::default();
        assert!(reader.claude_dir().ends_with(".claude"));
    }

    #[test]
    fn test_missing_root_yields_no_projects() {
        let temp = TempDir::new().unwrap();
        let reader = LogReader::new(temp.path().join("does-not-exist"));
        assert!(reader.read_projects().is_empty());
    }

    #[test]
    fn test_non_directory_entries_are_skipped() {
        let (temp, reader) = setup();
        fs::write(temp.path().join("projects").join("stray.txt"), "x").unwrap();
        write_session(&temp, "-home-me-app", "s1", &[line(json!({"message": "hi"}))]);

        let projects = reader.read_projects();
        assert_eq!(projects.len(), 1);
        assert_eq!(projects[0].id, "-home-me-app");
    }

    #[test]
    fn test_project_path_and_name() {
        let (temp, reader) = setup();
        write_session(&temp, "-home-me-app", "s1", &[line(json!({"message": "hi"}))]);

        let project = &reader.read_projects()[0];
        assert_eq!(project.path, "/home/me/app");
        assert_eq!(project.name, "app");
        assert_eq!(project_name("/home/me/"), "Unknown Project");
    }

    #[test]
    fn test_end_to_end_single_session() {
        let (temp, reader) = setup();
        write_session(
            &temp,
            "-home-me-app",
            "abc-123",
            &[
                line(json!({
                    "uuid": "u1",
                    "type": "user",
                    "timestamp": "2024-05-01T10:00:00Z",
                    "message": {"role": "user", "content": "Fix the build"}
                })),
                line(json!({
                    "uuid": "u2",
                    "parentUuid": "u1",
                    "type": "assistant",
                    "timestamp": "2024-05-01T10:10:00Z",
                    "message": {"role": "assistant", "content": [{"type": "text", "text": "Done"}]}
                })),
            ],
        );

        let projects = reader.read_projects();
        assert_eq!(projects.len(), 1);
        let project = &projects[0];
        assert_eq!(project.total_sessions, 1);
        assert_eq!(project.total_messages, 2);

        let session = &project.sessions[0];
        assert_eq!(session.id, "abc-123");
        assert_eq!(session.project_id, "-home-me-app");
        assert_eq!(session.id_prefix, "abc");
        assert_eq!(session.duration, 600_000);
        assert!(session.todos.is_empty());
        assert_eq!(project.last_activity, session.last_update);
        assert_eq!(session.conversations[0].kind, ConversationKind::User);
        assert_eq!(session.conversations[1].message.content, "Done");
    }

    #[test]
    fn test_malformed_lines_are_skipped() {
        let (temp, reader) = setup();
        let path = write_session(
            &temp,
            "p",
            "s1",
            &[
                line(json!({"message": "one"})),
                "{not json".to_string(),
                String::new(),
                "   ".to_string(),
                line(json!({"message": "two"})),
            ],
        );

        let session = reader.read_session("p", "s1", &path, Utc::now());
        assert_eq!(session.message_count, 2);
        assert_eq!(session.conversations[1].message.content, "two");
    }

    #[test]
    fn test_invalid_utf8_line_does_not_drop_session() {
        let (temp, reader) = setup();
        let dir = temp.path().join("projects").join("p");
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("s1.jsonl");

        let mut bytes = line(json!({"message": "first", "timestamp": "2024-01-01T10:00:00Z"}))
            .into_bytes();
        bytes.extend_from_slice(
            b"\n{\"message\":\"bad \xff\xfe\",\"timestamp\":\"2024-01-01T10:05:00Z\"}\n",
        );
        bytes.extend(
            line(json!({"message": "second", "timestamp": "2024-01-01T10:10:00Z"})).into_bytes(),
        );
        fs::write(&path, bytes).unwrap();

        let session = reader.read_session("p", "s1", &path, Utc::now());
        assert_eq!(session.message_count, 3);
        assert_eq!(session.conversations[0].message.content, "first");
        assert!(session.conversations[1].message.content.contains('\u{FFFD}'));
        assert_eq!(session.conversations[2].message.content, "second");
        assert_eq!(session.duration, 600_000);
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinked_project_and_session_are_read() {
        use std::os::unix::fs::symlink;

        let (temp, reader) = setup();
        let outside = TempDir::new().unwrap();
        let real_project = outside.path().join("real");
        fs::create_dir_all(&real_project).unwrap();
        fs::write(real_project.join("s1.jsonl"), line(json!({"message": "linked dir"}))).unwrap();
        symlink(&real_project, temp.path().join("projects").join("-linked")).unwrap();

        let real_session = outside.path().join("transcript.jsonl");
        fs::write(&real_session, line(json!({"message": "linked file"}))).unwrap();
        let plain = temp.path().join("projects").join("-plain");
        fs::create_dir_all(&plain).unwrap();
        symlink(&real_session, plain.join("s2.jsonl")).unwrap();
        symlink(outside.path().join("missing.jsonl"), plain.join("dangling.jsonl")).unwrap();

        let projects = reader.read_projects();
        assert_eq!(projects.len(), 2);

        let linked = projects.iter().find(|p| p.id == "-linked").unwrap();
        assert_eq!(linked.total_sessions, 1);
        assert_eq!(linked.sessions[0].conversations[0].message.content, "linked dir");

        let plain = projects.iter().find(|p| p.id == "-plain").unwrap();
        assert_eq!(plain.total_sessions, 1);
        assert_eq!(plain.sessions[0].id, "s2");
    }

    #[cfg(unix)]
    #[test]
    fn test_unreadable_project_keeps_siblings() {
        use std::os::unix::fs::PermissionsExt;

        let (temp, reader) = setup();
        write_session(&temp, "-ok", "s1", &[line(json!({"message": "hi"}))]);
        write_session(&temp, "-locked", "s2", &[line(json!({"message": "hidden"}))]);
        let locked = temp.path().join("projects").join("-locked");
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

        // Permission bits do not bind root.
        if fs::read_dir(&locked).is_ok() {
            fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();
            return;
        }

        let projects = reader.read_projects();
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();

        assert_eq!(projects.len(), 2);
        let locked = projects.iter().find(|p| p.id == "-locked").unwrap();
        assert_eq!(locked.total_sessions, 0);
        let ok = projects.iter().find(|p| p.id == "-ok").unwrap();
        assert_eq!(ok.total_sessions, 1);
        assert_eq!(ok.total_messages, 1);
    }

    #[test]
    fn test_empty_session_is_degenerate() {
        let (temp, reader) = setup();
        let path = write_session(&temp, "p", "s1", &["garbage".to_string()]);
        let now = Utc::now();

        let session = reader.read_session("p", "s1", &path, now);
        assert!(session.is_degenerate());
        assert_eq!(session.start_time, now);
        assert_eq!(session.last_update, now);
        assert_eq!(session.duration, 0);
    }

    #[test]
    fn test_unreadable_session_file_is_degenerate() {
        let (temp, reader) = setup();
        let now = Utc::now();
        let session = reader.read_session("p", "gone", &temp.path().join("gone.jsonl"), now);
        assert_eq!(session.message_count, 0);
        assert_eq!(session.duration, 0);
    }

    #[test]
    fn test_project_without_sessions_is_active_now() {
        let (temp, reader) = setup();
        fs::create_dir_all(temp.path().join("projects").join("empty")).unwrap();
        let now = Utc::now();

        let projects = reader.read_projects_at(now);
        assert_eq!(projects[0].total_sessions, 0);
        assert_eq!(projects[0].total_messages, 0);
        assert_eq!(projects[0].last_activity, now);
    }

    #[test]
    fn test_project_without_sessions_defaults_to_call_time() {
        let (temp, reader) = setup();
        fs::create_dir_all(temp.path().join("projects").join("empty")).unwrap();

        let before = Utc::now();
        let projects = reader.read_projects();
        let after = Utc::now();
        assert!(projects[0].last_activity >= before && projects[0].last_activity <= after);
    }

    #[test]
    fn test_projects_sorted_by_last_activity() {
        let (temp, reader) = setup();
        write_session(
            &temp,
            "old",
            "s1",
            &[line(json!({"message": "a", "timestamp": "2023-01-01T00:00:00Z"}))],
        );
        write_session(
            &temp,
            "new",
            "s2",
            &[line(json!({"message": "b", "timestamp": "2024-01-01T00:00:00Z"}))],
        );

        let ids: Vec<String> = reader.read_projects().into_iter().map(|p| p.id).collect();
        assert_eq!(ids, vec!["new", "old"]);
    }

    #[test]
    fn test_todos_joined_by_prefix() {
        let (temp, reader) = setup();
        write_session(&temp, "p", "sess-1", &[line(json!({"message": "hi"}))]);
        write_todos(
            &temp,
            "sess-1.json",
            &json!([
                {"id": "1", "content": "Write tests", "status": "completed", "priority": "high"},
                {"id": "2", "content": "Ship", "status": "pending", "priority": "low"}
            ])
            .to_string(),
        );
        write_todos(&temp, "other.json", "[{\"id\": \"x\"}]");

        let session = &reader.read_projects()[0].sessions[0];
        assert_eq!(session.todos.len(), 2);
        assert!(session.todos.iter().all(|t| t.session_id == "sess-1"));
        assert_eq!(session.todos[0].status, TodoStatus::Completed);
        assert_eq!(session.todos[1].priority, TodoPriority::Low);
    }

    #[test]
    fn test_malformed_todo_file_does_not_block_siblings() {
        let (temp, reader) = setup();
        write_todos(&temp, "s1-agent-a.json", "{broken");
        write_todos(&temp, "s1-agent-b.json", "[{\"content\": \"Keep going\"}]");
        write_todos(&temp, "s1-agent-c.json", "{\"not\": \"an array\"}");

        let todos = reader.read_todos("s1", Utc::now());
        assert_eq!(todos.len(), 1);
        assert_eq!(todos[0].id, "s1-agent-b-0");
        assert_eq!(todos[0].content, "Keep going");
        assert_eq!(todos[0].status, TodoStatus::Pending);
        assert_eq!(todos[0].priority, TodoPriority::Medium);
    }

    #[test]
    fn test_missing_todos_dir_is_empty() {
        let (_temp, reader) = setup();
        assert!(reader.read_todos("s1", Utc::now()).is_empty());
    }

    #[test]
    fn test_rereading_is_stable() {
        let (temp, reader) = setup();
        write_session(
            &temp,
            "p",
            "s1",
            &[
                line(json!({"uuid": "u1", "timestamp": "2024-05-01T10:00:00Z", "message": "a"})),
                line(json!({"timestamp": "2024-05-01T10:05:00Z", "message": {"other": 1}})),
            ],
        );

        let first = reader.read_projects();
        let second = reader.read_projects();
        let (a, b) = (&first[0].sessions[0], &second[0].sessions[0]);

        assert_eq!(a.message_count, b.message_count);
        assert_eq!(a.duration, b.duration);
        for (x, y) in a.conversations.iter().zip(&b.conversations) {
            assert_eq!(x.message, y.message);
            assert_eq!(x.timestamp, y.timestamp);
            if !x.id_synthesized {
                assert_eq!(x.id, y.id);
            }
        }
        assert!(a.conversations[1].id_synthesized);
    }

    #[test]
    fn test_find_session() {
        let (temp, reader) = setup();
        write_session(&temp, "p", "wanted", &[line(json!({"message": "hi"}))]);

        assert_eq!(reader.find_session("wanted").unwrap().project_id, "p");
        assert!(reader.find_session("missing").is_none());
    }

    #[test]
    fn test_get_project_stats_counts_recent_sessions() {
        let (temp, reader) = setup();
        let recent = (Utc::now() - Duration::minutes(5)).to_rfc3339();
        write_session(&temp, "p", "s1", &[line(json!({"message": "a", "timestamp": recent}))]);
        write_session(
            &temp,
            "p",
            "s2",
            &[line(json!({"message": "b", "timestamp": "2020-01-01T00:00:00Z"}))],
        );
        write_session(
            &temp,
            "q",
            "s3",
            &[line(json!({"message": "c", "timestamp": "2020-01-02T00:00:00Z"}))],
        );

        let stats = reader.get_project_stats(&ActivityWindows::default());
        assert_eq!(stats.total_sessions, 3);
        assert_eq!(stats.active_sessions, 1);
        assert_eq!(stats.total_projects, 2);
        assert_eq!(stats.active_projects, 1);
    }

    proptest! {
        #[test]
        fn prop_only_valid_lines_become_conversations(valid in 0usize..20, invalid in 0usize..20) {
            let (temp, reader) = setup();
            let mut lines: Vec<String> = (0..valid)
                .map(|i| line(json!({"message": format!("m{}", i)})))
                .collect();
            lines.extend((0..invalid).map(|i| format!("{{broken {}", i)));

            let path = write_session(&temp, "p", "s", &lines);
            let session = reader.read_session("p", "s", &path, Utc::now());

            prop_assert_eq!(session.conversations.len(), valid);
            prop_assert_eq!(session.message_count, valid);
        }
    }
}
