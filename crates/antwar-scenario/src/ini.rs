//! Minimal INI reader for scenario files.
//!
//! Sections keep their rows in file order. Section names match
//! case-insensitively; keys match exactly after trimming.

/// One `[Section]` and its `key=value` rows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IniSection {
    pub name: String,
    pub entries: Vec<(String, String)>,
}

impl IniSection {
    /// Value of the first row with this key.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v.as_str())
    }
}

/// A parsed INI document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IniFile {
    pub sections: Vec<IniSection>,
}

impl IniFile {
    pub fn parse(text: &str) -> Self {
        let mut sections: Vec<IniSection> = Vec::new();

        for raw in text.lines() {
            let line = match raw.find(';') {
                Some(i) => &raw[..i],
                None => raw,
            }
            .trim();
            if line.is_empty() {
                continue;
            }

            if let Some(name) = line.strip_prefix('[').and_then(|l| l.strip_suffix(']')) {
                sections.push(IniSection {
                    name: name.trim().to_string(),
                    entries: Vec::new(),
                });
                continue;
            }

            // Rows before the first header have nowhere to go.
            let Some(section) = sections.last_mut() else {
                continue;
            };
            if let Some((key, value)) = line.split_once('=') {
                section
                    .entries
                    .push((key.trim().to_string(), value.trim().to_string()));
            }
        }

        Self { sections }
    }

    /// Section by name, case-insensitive. Duplicate headers: the first wins.
    pub fn section(&self, name: &str) -> Option<&IniSection> {
        self.sections
            .iter()
            .find(|s| s.name.eq_ignore_ascii_case(name))
    }

    /// Rows of a section, empty if the section is absent.
    pub fn entries(&self, name: &str) -> &[(String, String)] {
        self.section(name)
            .map(|s| s.entries.as_slice())
            .unwrap_or(&[])
    }
}
