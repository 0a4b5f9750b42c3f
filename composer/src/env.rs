use indexmap::IndexMap;

#[derive(Clone, Debug, PartialEq, Eq)]
struct Section {
    title: String,
    entries: IndexMap<String, String>,
}

/// Ordered `KEY=VALUE` document grouped under comment headers.
///
/// A key lives in exactly one section. Setting it again replaces the value
/// where it already stands, whatever section is current.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EnvDocument {
    sections: Vec<Section>,
    current: usize,
}

impl EnvDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Selects a section, creating it at the end if needed. New keys land in it.
    pub fn section(&mut self, title: impl Into<String>) -> &mut Self {
        let title = title.into();
        self.current = match self.sections.iter().position(|s| s.title == title) {
            Some(index) => index,
            None => {
                self.sections.push(Section {
                    title,
                    entries: IndexMap::new(),
                });
                self.sections.len() - 1
            }
        };
        self
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        let key = key.into();
        let value = value.into();

        if let Some(slot) = self.sections.iter_mut().find_map(|s| s.entries.get_mut(&key)) {
            *slot = value;
            return self;
        }

        if self.sections.is_empty() {
            self.section("General");
        }
        if let Some(current) = self.sections.get_mut(self.current) {
            current.entries.insert(key, value);
        }
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.sections
            .iter()
            .find_map(|s| s.entries.get(key))
            .map(String::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn len(&self) -> usize {
        self.sections.iter().map(|s| s.entries.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        for section in self.sections.iter().filter(|s| !s.entries.is_empty()) {
            if !out.is_empty() {
                out.push('\n');
            }
            out.push_str(&format!("# --- {} ---\n", section.title));
            for (key, value) in &section.entries {
                out.push_str(key);
                out.push('=');
                out.push_str(value);
                out.push('\n');
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn overwrite_keeps_position() {
        let mut env = EnvDocument::new();
        env.section("Network").set("NETWORK", "mainnet").set("EC_BOOTNODES", "a");
        env.section("Execution").set("EC_API_PORT", "8545");
        env.set("NETWORK", "sepolia");

        assert_eq!(
            env.render(),
            "# --- Network ---\nNETWORK=sepolia\nEC_BOOTNODES=a\n\n# --- Execution ---\nEC_API_PORT=8545\n"
        );
    }

    #[test]
    fn empty_sections_are_not_rendered() {
        let mut env = EnvDocument::new();
        env.section("Empty");
        env.section("Full").set("A", "1");
        assert_eq!(env.render(), "# --- Full ---\nA=1\n");
        assert_eq!(env.len(), 1);
    }

    #[test]
    fn reselecting_a_section_appends_to_it() {
        let mut env = EnvDocument::new();
        env.section("A").set("X", "1");
        env.section("B").set("Y", "2");
        env.section("A").set("Z", "3");
        assert_eq!(env.render(), "# --- A ---\nX=1\nZ=3\n\n# --- B ---\nY=2\n");
    }

    #[test]
    fn keys_without_a_section_get_a_general_one() {
        let mut env = EnvDocument::new();
        env.set("A", "");
        assert!(env.contains_key("A"));
        assert_eq!(env.get("A"), Some(""));
        assert_eq!(env.render(), "# --- General ---\nA=\n");
    }
}
