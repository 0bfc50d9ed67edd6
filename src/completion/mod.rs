// src/completion/mod.rs
// Tab completion: builtins and PATH executables for the first word,
// directory entries for everything else.

use std::path::{Path, PathBuf};

use crate::executor::builtin::BUILTIN_NAMES;

/// A completion candidate. `is_word` means the value is a whole word and a
/// space may follow it; directories leave the cursor after the `/`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub value: String,
    pub builtin: bool,
    pub is_word: bool,
}

pub fn complete(partial: &str, is_first_word: bool) -> Vec<Candidate> {
    if partial.is_empty() {
        return vec![];
    }

    let looks_like_path = partial.contains('/') || partial.starts_with('.') || partial.starts_with('~');
    let mut out = Vec::new();

    if is_first_word && !looks_like_path {
        out.extend(
            BUILTIN_NAMES
                .iter()
                .filter(|name| name.starts_with(partial))
                .map(|name| Candidate { value: name.to_string(), builtin: true, is_word: true }),
        );
        out.extend(
            complete_commands(partial)
                .into_iter()
                .filter(|name| !BUILTIN_NAMES.contains(&name.as_str()))
                .map(|value| Candidate { value, builtin: false, is_word: true }),
        );
    }

    out.extend(complete_path(partial));
    out
}

fn complete_path(partial: &str) -> Vec<Candidate> {
    let home = dirs::home_dir().map(|h| h.display().to_string());
    let expanded = match (&home, partial.strip_prefix('~')) {
        (Some(h), Some(rest)) => format!("{h}{rest}"),
        _ => partial.to_string(),
    };

    // "src/ma" -> ("src/", "ma"), "ma" -> ("", "ma")
    let split = expanded.rfind('/').map_or(0, |i| i + 1);
    let (dir_part, prefix) = expanded.split_at(split);
    let dir = if dir_part.is_empty() { PathBuf::from(".") } else { PathBuf::from(dir_part) };

    let Ok(entries) = std::fs::read_dir(&dir) else { return vec![] };

    let mut matches: Vec<Candidate> = entries
        .flatten()
        .filter_map(|entry| {
            let name = entry.file_name().to_string_lossy().to_string();
            if !name.starts_with(prefix) || (name.starts_with('.') && !prefix.starts_with('.')) {
                return None;
            }
            let is_dir = entry.file_type().map(|t| t.is_dir()).unwrap_or(false);
            let mut value = format!("{dir_part}{name}{}", if is_dir { "/" } else { "" });
            if let (Some(h), true) = (&home, partial.starts_with('~')) {
                value = value.replacen(h.as_str(), "~", 1);
            }
            Some(Candidate { value, builtin: false, is_word: !is_dir })
        })
        .collect();

    matches.sort_by(|a, b| a.value.cmp(&b.value));
    matches
}

fn complete_commands(partial: &str) -> Vec<String> {
    let Some(path_var) = std::env::var_os("PATH") else { return vec![] };

    let mut commands: Vec<String> = std::env::split_paths(&path_var)
        .filter_map(|dir| std::fs::read_dir(dir).ok())
        .flat_map(|entries| entries.flatten())
        .filter(|entry| is_executable(&entry.path()))
        .map(|entry| entry.file_name().to_string_lossy().to_string())
        .filter(|name| name.starts_with(partial))
        .collect();

    commands.sort();
    commands.dedup();
    commands
}

fn is_executable(path: &Path) -> bool {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::metadata(path)
            .map(|m| m.is_file() && m.permissions().mode() & 0o111 != 0)
            .unwrap_or(false)
    }
    #[cfg(not(unix))]
    {
        path.is_file()
    }
}
