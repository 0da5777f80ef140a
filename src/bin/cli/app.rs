use std::path::Path;

use anyhow::{bail, Context, Result};

use lifeos_lib::config::AppConfig;
use lifeos_lib::courses::{Course, FileSystemNode, TreePath};
use lifeos_lib::search::GeminiClient;
use lifeos_lib::storage::Record;
use lifeos_lib::AppState;

/// Shared application state for CLI commands
pub struct App {
    pub state: AppState,
}

impl App {
    /// Load configuration and open every collection
    pub fn new(config_path: Option<&Path>, data_dir: Option<&Path>) -> Result<Self> {
        let mut config = AppConfig::from_env(config_path).context("Failed to load configuration")?;
        if let Some(dir) = data_dir {
            config.data_dir = Some(dir.to_path_buf());
        }

        let data_dir = config
            .resolve_data_dir()
            .context("Failed to get data directory")?;
        let state = AppState::open(config, data_dir).context("Failed to open data directory")?;

        Ok(Self { state })
    }

    pub fn search_client(&self) -> Result<GeminiClient> {
        GeminiClient::new(&self.state.config.search).context("Failed to create search client")
    }

    /// Find a course by title (case-insensitive prefix match) or id
    pub fn find_course(&self, name: &str) -> Result<Course> {
        let courses = self.state.courses.list_courses();
        let name_lower = name.to_lowercase();

        // Exact title or id first
        if let Some(course) = courses
            .iter()
            .find(|c| c.title.to_lowercase() == name_lower || c.id == name)
        {
            return Ok(course.clone());
        }

        let matches: Vec<&Course> = courses
            .iter()
            .filter(|c| c.title.to_lowercase().starts_with(&name_lower))
            .collect();

        match matches.len() {
            0 => bail!(
                "No course matching '{}'. Available courses:\n{}",
                name,
                courses
                    .iter()
                    .map(|c| format!("  - {}", c.title))
                    .collect::<Vec<_>>()
                    .join("\n")
            ),
            1 => Ok(matches[0].clone()),
            _ => bail!(
                "Ambiguous course name '{}'. Matches:\n{}",
                name,
                matches
                    .iter()
                    .map(|c| format!("  - {}", c.title))
                    .collect::<Vec<_>>()
                    .join("\n")
            ),
        }
    }
}

/// Find a record by full id, or a fragment that matches the start or end of exactly one id
pub fn find_by_id<'a, T: Record>(items: &'a [T], id: &str, what: &str) -> Result<&'a T> {
    if let Some(item) = items.iter().find(|i| i.id() == id) {
        return Ok(item);
    }

    let matches: Vec<&T> = items
        .iter()
        .filter(|i| i.id().ends_with(id) || i.id().starts_with(id))
        .collect();
    match matches.len() {
        0 => bail!("No {} with id '{}'", what, id),
        1 => Ok(matches[0]),
        n => bail!("Id '{}' matches {} {}s; use more characters", id, n, what),
    }
}

/// Split a `Week1/Slides` style folder path into names
pub fn split_path(path: Option<&str>) -> Vec<String> {
    path.unwrap_or("")
        .split('/')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

/// Resolve a folder path inside a course tree
pub fn course_path(course: &Course, path: Option<&str>) -> Result<TreePath> {
    let names = split_path(path);
    TreePath::from_names(&course.file_system, &names)
        .with_context(|| format!("No folder '{}' in course '{}'", path.unwrap_or("/"), course.title))
}

/// Find an entry of one directory by id or name (case-insensitive).
/// Duplicate names must be disambiguated by id.
pub fn find_entry<'a>(level: &'a [FileSystemNode], name: &str) -> Result<&'a FileSystemNode> {
    if let Some(node) = level.iter().find(|n| n.id == name) {
        return Ok(node);
    }

    let name_lower = name.to_lowercase();
    let matches: Vec<&FileSystemNode> = level
        .iter()
        .filter(|n| n.name.to_lowercase() == name_lower)
        .collect();

    match matches.len() {
        0 => bail!("No file or folder named '{}'", name),
        1 => Ok(matches[0]),
        _ => bail!(
            "Several entries are named '{}'. Use an id:\n{}",
            name,
            matches
                .iter()
                .map(|n| format!("  - {} ({})", n.name, n.id))
                .collect::<Vec<_>>()
                .join("\n")
        ),
    }
}

/// Split a comma-separated list, dropping blanks
pub fn split_list(value: Option<&str>) -> Vec<String> {
    value
        .unwrap_or("")
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}
