//! Text (terminal) reporter with colors and formatting

use crate::models::OwnershipReport;
use anyhow::Result;

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";
const YELLOW: &str = "\x1b[33m";

/// Render report as formatted terminal output
pub fn render(report: &OwnershipReport) -> Result<String> {
    let mut out = String::new();

    out.push_str(&format!("\n{BOLD}Top Likely Owners{RESET}\n"));
    out.push_str(&format!(
        "{DIM}──────────────────────────────────────{RESET}\n"
    ));
    out.push_str(&format!(
        "Repos: {}  Tau: {:.1}d  Bonus/repo: {:.0}%",
        report.repos_analyzed.len(),
        report.tau,
        report.bonus_per_repo * 100.0
    ));
    if report.alias_mappings > 0 {
        out.push_str(&format!("  Aliases: {}", report.alias_mappings));
    }
    out.push_str("\n\n");

    if !report.repos_skipped.is_empty() {
        for skip in &report.repos_skipped {
            out.push_str(&format!(
                "{YELLOW}warning:{RESET} skipped {}: {}\n",
                skip.repo, skip.reason
            ));
        }
        out.push('\n');
    }

    if report.owners.is_empty() {
        out.push_str("No commit data found or processed successfully.\n");
        return Ok(out);
    }

    out.push_str(&format!(
        "{DIM}  #   SCORE     RAW       REPOS  OWNER{RESET}\n"
    ));
    out.push_str(&format!(
        "{DIM}  ─────────────────────────────────────────────────{RESET}\n"
    ));

    for (i, owner) in report.owners.iter().enumerate() {
        out.push_str(&format!(
            "  {DIM}{:>3}{RESET}  {BOLD}{:<8.2}{RESET}  {:<8.2}  {:<5}  {}",
            i + 1,
            owner.final_score,
            owner.raw_score,
            owner.repo_count,
            owner.canonical
        ));
        if !owner.aliases.is_empty() {
            out.push_str(&format!(
                " {DIM}(aliases: {}){RESET}",
                owner.aliases.join(", ")
            ));
        }
        out.push('\n');
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reporters::tests::test_report;

    #[test]
    fn test_text_render_contents() {
        let report = test_report();
        let out = render(&report).expect("render text");
        assert!(out.contains("jane@co.com"));
        assert!(out.contains("aliases: jd@old.net"));
        assert!(out.contains("skipped broken"));
        assert!(out.contains("Bonus/repo: 10%"));
    }

    #[test]
    fn test_text_render_empty() {
        let mut report = test_report();
        report.owners.clear();
        let out = render(&report).expect("render text");
        assert!(out.contains("No commit data"));
    }
}
