// Plain-text reports for cached issues and milestones.
// Renders one block per entity to any writer.

use std::io::{self, Write};

use crate::github::types::{Issue, Milestone};

const SEPARATOR: &str = "------------------";

/// Render at most `limit` issues, in document order.
pub fn render_issues<W: Write>(out: &mut W, issues: &[Issue], limit: usize) -> io::Result<()> {
    for issue in issues.iter().take(limit) {
        let assignee = issue
            .assignee
            .as_ref()
            .map_or("Unassigned", |user| user.login.as_str());

        writeln!(out, "{}", SEPARATOR)?;
        writeln!(out, "Number:   {}", issue.number)?;
        writeln!(out, "Title:    {}", issue.title)?;
        writeln!(out, "State:    {}", issue.state)?;
        writeln!(out, "User:     {}", issue.user.login)?;
        writeln!(out, "Assignee: {}", assignee)?;
    }
    Ok(())
}

/// Render every milestone, in document order.
pub fn render_milestones<W: Write>(out: &mut W, milestones: &[Milestone]) -> io::Result<()> {
    for milestone in milestones {
        writeln!(out, "{}", SEPARATOR)?;
        writeln!(out, "Number:      {}", milestone.number)?;
        writeln!(out, "Title:       {}", milestone.title)?;
        writeln!(out, "Description: {}", milestone.description)?;
        writeln!(out, "State:       {}", milestone.state)?;
        writeln!(out, "Creator:     {}", milestone.creator.login)?;
        writeln!(
            out,
            "Created:     {}",
            milestone.created_at.format("%Y-%m-%d %H:%M:%S %z UTC")
        )?;
    }
    Ok(())
}
