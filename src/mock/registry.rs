//! In-memory template catalog backing the fake client.

use std::collections::BTreeMap;
use std::sync::{Arc, LazyLock, Mutex};

use crate::templates::{Template, TemplateList};

/// Identifiers at or above this value are never listed.
pub const LIST_CEILING: i64 = 1000;

/// Catalog shared by every [`MockPostmark::shared`](super::MockPostmark::shared) handle.
pub(super) static SHARED: LazyLock<Arc<Mutex<Registry>>> =
    LazyLock::new(|| Arc::new(Mutex::new(Registry::seeded())));

/// A stored template plus the model keys it expects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) struct Entry {
    pub template: Template,
    pub keys: Vec<String>,
}

/// Templates keyed by identifier.
#[derive(Debug, Clone)]
pub(super) struct Registry {
    entries: BTreeMap<i64, Entry>,
    last_id: i64,
}

impl Registry {
    /// Builds the fixed five-template catalog.
    pub fn seeded() -> Self {
        let seeds: [(&str, &str, bool, [&str; 3]); 5] = [
            ("", "", true, ["val1", "val2", "val3"]),
            ("TEST BODY", "TEST TEXT BODY", false, ["val2", "val5", "val4"]),
            (
                "ANOTHER TEST BODY",
                "ANOTHER TEST TEXT BODY",
                true,
                ["val6", "val9", "val12"],
            ),
            (
                "some random text",
                "qwweqwweqweqwe",
                false,
                ["val11", "val12", "val13"],
            ),
            ("", "", true, ["val2", "val1", "val3"]),
        ];

        let entries: BTreeMap<i64, Entry> = (1_i64..)
            .zip(seeds)
            .map(|(id, (html_body, text_body, active, keys))| {
                let entry = Entry {
                    template: Template {
                        template_id: id,
                        name: format!("Template {id}"),
                        subject: format!("Subject {id}"),
                        html_body: html_body.to_string(),
                        text_body: text_body.to_string(),
                        associated_server_id: 0,
                        active,
                    },
                    keys: keys.iter().map(ToString::to_string).collect(),
                };
                (id, entry)
            })
            .collect();
        let last_id = entries.keys().next_back().copied().unwrap_or_default();

        Self { entries, last_id }
    }

    pub fn get(&self, id: i64) -> Option<&Entry> {
        self.entries.get(&id)
    }

    pub fn contains(&self, id: i64) -> bool {
        self.entries.contains_key(&id)
    }

    /// Stores a template under the next free identifier and returns it.
    ///
    /// Identifiers are never reused, even after deletion.
    pub fn insert_new(&mut self, mut template: Template) -> Template {
        self.last_id += 1;
        template.template_id = self.last_id;
        self.entries.insert(
            self.last_id,
            Entry {
                template: template.clone(),
                keys: Vec::new(),
            },
        );
        template
    }

    /// Replaces the template under `id`, keeping its expected keys.
    ///
    /// Returns `None` if nothing is stored under `id`.
    pub fn replace(&mut self, id: i64, mut template: Template) -> Option<Template> {
        let entry = self.entries.get_mut(&id)?;
        template.template_id = id;
        entry.template = template.clone();
        Some(template)
    }

    pub fn remove(&mut self, id: i64) {
        self.entries.remove(&id);
    }

    /// Collects up to `count` templates with identifiers above `offset`,
    /// in ascending order.
    pub fn page(&self, count: u32, offset: u32) -> TemplateList {
        let first = i64::from(offset) + 1;
        if first >= LIST_CEILING {
            return TemplateList::default();
        }

        let templates: Vec<Template> = self
            .entries
            .range(first..LIST_CEILING)
            .take(count as usize)
            .map(|(_, entry)| entry.template.clone())
            .collect();

        TemplateList {
            template_count: i64::try_from(templates.len()).unwrap_or(i64::MAX),
            templates,
        }
    }
}
