//! Email alias table: merges contributor identities that appear under
//! multiple addresses.
//!
//! Loaded from an operator-supplied TOML file:
//!
//! ```toml
//! [aliases]
//! "jane@company.com" = ["jane@oldmail.com", "jdoe@users.noreply.github.com"]
//! "bob@company.com" = ["robert@personal.net"]
//! ```
//!
//! Conflicting declarations are resolved deterministically (canonical keys
//! are applied in sorted order, last write wins) and surfaced as warnings,
//! never as fatal errors.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};
use std::path::Path;
use tracing::{debug, warn};

/// Normalize a raw email for matching: trim whitespace, lowercase.
pub fn normalize_email(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// On-disk shape of the alias file.
#[derive(Debug, Default, Deserialize)]
struct AliasDoc {
    /// canonical email -> list of alias emails.
    /// BTreeMap gives a sorted, reproducible application order.
    #[serde(default)]
    aliases: BTreeMap<String, Vec<String>>,
}

/// Read-only mapping from alias email to canonical email.
///
/// Single-hop by construction: a lookup never needs to chase chains.
#[derive(Debug, Default)]
pub struct AliasTable {
    map: HashMap<String, String>,
}

impl AliasTable {
    /// Empty table; every email is its own canonical identity.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Load an alias table from a TOML file.
    ///
    /// A missing file is a warning, not an error: the run proceeds with an
    /// empty table. A file that exists but cannot be parsed is fatal.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            warn!(
                "alias file not found at {}, proceeding without aliases",
                path.display()
            );
            return Ok(Self::empty());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read alias file {}", path.display()))?;
        let doc: AliasDoc = toml::from_str(&content)
            .with_context(|| format!("Failed to parse alias file {}", path.display()))?;
        let table = Self::from_groups(&doc.aliases);
        debug!("loaded {} alias mappings", table.len());
        Ok(table)
    }

    /// Build the table from declared canonical groups.
    ///
    /// Groups are applied in sorted key order so that the last-write-wins
    /// conflict rule is reproducible across runs on the same file.
    pub fn from_groups(groups: &BTreeMap<String, Vec<String>>) -> Self {
        let mut map: HashMap<String, String> = HashMap::new();

        for (canonical, alias_list) in groups {
            let canonical = normalize_email(canonical);
            if canonical.is_empty() {
                continue;
            }

            // A canonical that is already someone's alias would create a
            // chain; ignore it as a canonical and keep the earlier mapping.
            if let Some(existing) = map.get(&canonical) {
                warn!(
                    "canonical email '{}' is already an alias for '{}'; \
                     ignoring its group, check your aliases file",
                    canonical, existing
                );
                continue;
            }

            for alias in alias_list {
                let alias = normalize_email(alias);
                if alias.is_empty() || alias == canonical {
                    continue;
                }

                if let Some(existing) = map.get(&alias) {
                    if existing != &canonical {
                        warn!(
                            "alias '{}' is mapped to multiple canonical emails \
                             ('{}' and '{}'); using '{}', check your aliases file",
                            alias, existing, canonical, canonical
                        );
                    }
                }
                if groups.contains_key(&alias) {
                    warn!(
                        "email '{}' is listed both as an alias (for '{}') and as \
                         a canonical email itself; using it as an alias",
                        alias, canonical
                    );
                }
                map.insert(alias, canonical.clone());
            }
        }

        Self { map }
    }

    /// Resolve a raw email to its canonical identity.
    ///
    /// Returns the normalized input unchanged when it has no mapping, so
    /// resolving is idempotent on its own output.
    pub fn resolve(&self, raw: &str) -> String {
        let normalized = normalize_email(raw);
        match self.map.get(&normalized) {
            Some(canonical) => canonical.clone(),
            None => normalized,
        }
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}
