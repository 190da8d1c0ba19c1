//! Parse INI-style rule text into raw sections

use crate::error::RuleError;
use std::collections::HashSet;

/// A section as written in the file, before indexing
#[derive(Debug, Clone)]
pub(crate) struct RawSection {
    pub name: String,
    pub entries: Vec<(String, String)>,
}

/// Parse rule text into sections, in file order
///
/// Accepted syntax:
/// - `[name]` section headers (case-sensitive names)
/// - `key = value` or `key: value` (first delimiter wins)
/// - full-line comments starting with `#` or `;`
/// - indented lines continue the previous value, joined with `\n`
///
/// A blank line ends a continuation. Duplicate sections, duplicate keys
/// within a section (compared case-insensitively) and keys outside any
/// section are errors.
pub(crate) fn parse_ini(text: &str, origin: &str) -> Result<Vec<RawSection>, RuleError> {
    let mut sections: Vec<RawSection> = Vec::new();
    let mut section_names: HashSet<String> = HashSet::new();
    let mut section_keys: HashSet<String> = HashSet::new();
    let mut continuing = false;

    let error = |line: usize, message: String| RuleError::Parse {
        origin: origin.to_string(),
        line,
        message,
    };

    for (idx, raw_line) in text.lines().enumerate() {
        let line_no = idx + 1;
        let line = raw_line.trim_end();
        let trimmed = line.trim_start();

        if trimmed.is_empty() {
            continuing = false;
            continue;
        }
        if trimmed.starts_with('#') || trimmed.starts_with(';') {
            continue;
        }

        let indented = trimmed.len() != line.len();
        if indented && continuing {
            if let Some((_, value)) = sections.last_mut().and_then(|s| s.entries.last_mut()) {
                if !value.is_empty() {
                    value.push('\n');
                }
                value.push_str(trimmed);
                continue;
            }
        }

        if let Some(header) = trimmed.strip_prefix('[') {
            let end = header
                .find(']')
                .ok_or_else(|| error(line_no, "unterminated section header".to_string()))?;
            if !header[end + 1..].trim().is_empty() {
                return Err(error(
                    line_no,
                    "unexpected text after section header".to_string(),
                ));
            }
            let name = header[..end].trim();
            if name.is_empty() {
                return Err(error(line_no, "empty section name".to_string()));
            }
            if !section_names.insert(name.to_string()) {
                return Err(error(line_no, format!("duplicate section [{}]", name)));
            }
            sections.push(RawSection {
                name: name.to_string(),
                entries: Vec::new(),
            });
            section_keys.clear();
            continuing = false;
            continue;
        }

        let section = sections.last_mut().ok_or_else(|| {
            error(line_no, "entry appears before any section header".to_string())
        })?;

        let delimiter = trimmed
            .find(['=', ':'])
            .ok_or_else(|| error(line_no, format!("expected 'key = value', found '{}'", trimmed)))?;
        let key = trimmed[..delimiter].trim();
        let value = trimmed[delimiter + 1..].trim();

        if key.is_empty() {
            return Err(error(line_no, "empty key".to_string()));
        }
        if !section_keys.insert(key.to_lowercase()) {
            return Err(error(
                line_no,
                format!("duplicate key '{}' in [{}]", key, section.name),
            ));
        }

        section.entries.push((key.to_string(), value.to_string()));
        continuing = true;
    }

    Ok(sections)
}
