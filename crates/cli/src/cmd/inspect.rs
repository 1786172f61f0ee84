//! Placeholder report for a single template.

use super::{build_vars, fail, load_config, open_repository};
use crate::InspectArgs;
use docfill_core::templates::parser::{Segment, parse};
use serde::Serialize;
use std::path::Path;
use tabled::{Table, Tabled, settings::Style};

#[derive(Debug, Serialize, Tabled)]
struct PlaceholderRow {
    #[tabled(rename = "Placeholder")]
    name: String,
    #[tabled(rename = "Uses")]
    uses: usize,
    #[tabled(rename = "First at")]
    first_at: String,
    #[tabled(rename = "Resolved")]
    resolved: bool,
}

pub fn run(config: Option<&Path>, profile: Option<&str>, args: &InspectArgs) {
    let rc = load_config("inspect", config, profile);
    let repo = open_repository("inspect", &rc);
    let loaded = repo.get_by_name(&args.template).unwrap_or_else(|e| fail("inspect", e));
    let ctx = build_vars("inspect", &rc, &args.vars);

    let segments = parse(&loaded.content).unwrap_or_else(|e| fail("inspect", e));

    let mut rows: Vec<PlaceholderRow> = Vec::new();
    for seg in segments {
        let Segment::Placeholder { name, position } = seg else { continue };
        if let Some(row) = rows.iter_mut().find(|r| r.name == name) {
            row.uses += 1;
        } else {
            rows.push(PlaceholderRow {
                name: name.to_string(),
                uses: 1,
                first_at: format!("{}:{}", position.line, position.column),
                resolved: ctx.contains_key(name),
            });
        }
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&rows).unwrap_or_default());
        return;
    }

    if rows.is_empty() {
        println!("(no placeholders in {})", loaded.logical_name);
        return;
    }

    let missing = rows.iter().filter(|r| !r.resolved).count();
    let total = rows.len();
    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{table}");
    println!("-- {total} placeholders, {missing} unresolved --");
}
