use crate::config::BindArg;
use crate::support::{format_values, load_relation_or_exit, print_json};
use relchain_core::RelationBinding;
use relchain_session::{FileSessionStore, binding_key, save_binding};
use serde_json::json;

pub struct Args {
    pub relation: String,
    pub session: String,
    pub key_prefix: String,
    pub binds: Vec<String>,
    pub json: bool,
}

pub fn run(args: Args) {
    let (_, mut relation) = load_relation_or_exit(&args.relation);

    for raw in &args.binds {
        BindArg::parse(raw)
            .and_then(|bind| bind.apply(&mut relation))
            .unwrap_or_else(|e| {
                eprintln!("error: {e}");
                std::process::exit(1);
            });
    }

    let mut binding: RelationBinding = RelationBinding::create_on_relation(&relation);
    binding.save(&relation).unwrap_or_else(|e| {
        eprintln!("error: failed to save binding: {e}");
        std::process::exit(1);
    });

    let key = binding_key(&args.key_prefix, &relation);
    let mut store = FileSessionStore::new(&args.session);
    save_binding(&mut store, &key, &binding).unwrap_or_else(|e| {
        eprintln!("error: failed to store binding in {}: {e}", args.session);
        std::process::exit(1);
    });

    if args.json {
        print_json(&json!({
            "action": "binding.save",
            "relationPath": args.relation,
            "sessionPath": args.session,
            "key": key,
            "binding": binding,
        }));
    } else {
        println!("relchain save {}", args.relation);
        println!("  Session: {}", args.session);
        println!("  Key: {key}");
        for entry in binding.entries() {
            println!(
                "  {}: predecessor {}, successor {}",
                entry.name,
                format_values(entry.predecessor.as_deref()),
                format_values(entry.successor.as_deref()),
            );
        }
    }
}
