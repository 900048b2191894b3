use crate::support::{load_relation_or_exit, print_json};
use relchain_core::{Datasource, JoinCondition};
use serde_json::json;

pub fn run(relation_path: String, qualify: bool, json_output: bool) {
    let (file, relation) = load_relation_or_exit(&relation_path);
    let ds: &dyn Datasource = &file.datasource;

    let joins: Vec<JoinCondition> = match relation.join_conditions(Some(ds)) {
        Ok(joins) => joins,
        Err(e) => {
            tracing::info!(error = %e, "skipping joins");
            Vec::new()
        }
    };

    if json_output {
        let nodes: Vec<_> = relation
            .nodes()
            .iter()
            .map(|node| {
                json!({
                    "name": node.name(false, Some(ds)),
                    "fullName": node.full_name(Some(ds)),
                    "predecessorNames": node.predecessor_names(Some(ds), qualify),
                    "successorNames": node.successor_names(Some(ds), qualify),
                })
            })
            .collect();
        print_json(&json!({
            "action": "relation.names",
            "relationPath": relation_path,
            "nodes": nodes,
            "joins": joins,
        }));
        return;
    }

    println!("relchain names {relation_path}");
    for (index, node) in relation.nodes().iter().enumerate() {
        println!("  [{index}] {}", node.full_name(Some(ds)));
        let pred = node.predecessor_names(Some(ds), qualify);
        if !pred.is_empty() {
            println!("    predecessor: {}", pred.join(", "));
        }
        let succ = node.successor_names(Some(ds), qualify);
        if !succ.is_empty() {
            println!("    successor: {}", succ.join(", "));
        }
    }
    if !joins.is_empty() {
        println!("  Joins:");
        for join in &joins {
            let columns: Vec<String> = join
                .columns
                .iter()
                .map(|pair| format!("{} = {}", pair.referencing, pair.referenced))
                .collect();
            println!("    - {}", columns.join(" AND "));
        }
    }
}
