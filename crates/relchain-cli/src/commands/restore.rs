use crate::support::{format_values, load_relation_or_exit, print_json};
use relchain_core::RelationBinding;
use relchain_session::{FileSessionStore, binding_key, take_binding};
use serde_json::json;

pub fn run(relation_path: String, session: String, key_prefix: String, json_output: bool) {
    let (_, mut relation) = load_relation_or_exit(&relation_path);
    let key = binding_key(&key_prefix, &relation);
    let store = FileSessionStore::new(&session);

    let _binding: RelationBinding =
        take_binding(&store, &key, &mut relation).unwrap_or_else(|e| {
            eprintln!("error: failed to restore binding from {session}: {e}");
            std::process::exit(1);
        });

    if json_output {
        let nodes: Vec<_> = relation
            .nodes()
            .iter()
            .map(|node| {
                json!({
                    "name": node.resolved_name(),
                    "predecessor": node.predecessor_values(),
                    "successor": node.successor_values(),
                    "bindState": node.bind_state().bits(),
                })
            })
            .collect();
        print_json(&json!({
            "action": "binding.restore",
            "relationPath": relation_path,
            "sessionPath": session,
            "key": key,
            "nodes": nodes,
        }));
    } else {
        println!("relchain restore {relation_path}");
        println!("  Session: {session}");
        println!("  Key: {key}");
        for node in relation.nodes() {
            println!(
                "  {}: predecessor {}, successor {}",
                node.resolved_name(),
                format_values(node.predecessor_values()),
                format_values(node.successor_values()),
            );
        }
    }
}
