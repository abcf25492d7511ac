//! The `init` command: write an example aliases.toml.

use anyhow::{bail, Result};
use std::path::Path;

const ALIASES_FILE: &str = "aliases.toml";

const EXAMPLE: &str = r#"# Email aliases for gitowner
#
# Each key under [aliases] is a canonical email; its list contains the
# other addresses the same person has committed under. Scores for all
# listed addresses are merged into the canonical identity.
#
# Pass this file with: gitowner rank . --aliases-file aliases.toml

[aliases]
# "jane@company.com" = ["jane@oldmail.com", "jdoe@users.noreply.github.com"]
# "bob@company.com" = ["robert@personal.net"]
"#;

pub fn run(force: bool) -> Result<()> {
    let path = Path::new(ALIASES_FILE);
    if path.exists() && !force {
        bail!(
            "{} already exists. Use --force to overwrite.",
            path.display()
        );
    }

    std::fs::write(path, EXAMPLE)?;
    println!("Wrote example alias file to {}", path.display());
    println!("Edit it, then run: gitowner rank . --aliases-file {}", ALIASES_FILE);
    Ok(())
}
