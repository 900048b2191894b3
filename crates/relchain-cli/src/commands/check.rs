use crate::support::{load_relation_or_exit, print_json, yes_no};
use serde_json::json;

pub fn run(relation_path: String, json_output: bool) {
    let (_, relation) = load_relation_or_exit(&relation_path);
    let defect = relation.check_complete().err().map(|e| e.to_string());

    if json_output {
        let nodes: Vec<_> = relation
            .nodes()
            .iter()
            .enumerate()
            .map(|(index, node)| {
                json!({
                    "index": index,
                    "name": node.resolved_name(),
                    "model": node.model().name,
                    "valid": node.is_valid(),
                    "endPoint": node.is_end_point(),
                    "manyToMany": node.is_many_to_many(),
                    "bindMode": node.bind_mode().bits(),
                    "predecessorWidth": node.predecessor_reference_width(),
                    "successorWidth": node.successor_reference_width(),
                })
            })
            .collect();
        print_json(&json!({
            "action": "relation.check",
            "relationPath": relation_path,
            "complete": defect.is_none(),
            "defect": defect,
            "nodes": nodes,
        }));
    } else {
        println!("relchain check {relation_path}");
        println!("  Nodes: {}", relation.len());
        for (index, node) in relation.nodes().iter().enumerate() {
            println!(
                "  [{index}] {} ({}): end point {}, many-to-many {}, widths {}/{}",
                node.resolved_name(),
                node.model().name,
                yes_no(node.is_end_point()),
                yes_no(node.is_many_to_many()),
                node.predecessor_reference_width(),
                node.successor_reference_width(),
            );
        }
        println!("  Complete: {}", yes_no(defect.is_none()));
        if let Some(defect) = &defect {
            println!("  Defect: {defect}");
        }
    }

    if defect.is_some() {
        std::process::exit(1);
    }
}
