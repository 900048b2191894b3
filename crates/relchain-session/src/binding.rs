//! Persist relation bindings in a session store.

use crate::error::SessionError;
use crate::store::SessionStore;
use relchain_core::{Relation, RelationBinding};
use serde::Serialize;
use serde::de::DeserializeOwned;

/// Session key for bindings of `relation`: `<prefix>:<shape digest>`.
///
/// Two relations share a key only when they have the same shape, so a
/// widget can never pick up a snapshot taken on a different chain.
pub fn binding_key(prefix: &str, relation: &Relation) -> String {
    format!("{prefix}:{}", relation.shape_digest())
}

/// Serialize `binding` into `store` under `key`.
pub fn save_binding<A: Serialize>(
    store: &mut dyn SessionStore,
    key: &str,
    binding: &RelationBinding<A>,
) -> Result<(), SessionError> {
    let value = serde_json::to_value(binding).map_err(|e| SessionError::Serialize(e.to_string()))?;
    store.put(key, value)?;
    tracing::debug!(key, entries = binding.len(), "stored relation binding");
    Ok(())
}

/// Load the binding stored under `key`, if any.
pub fn load_binding<A: DeserializeOwned>(
    store: &dyn SessionStore,
    key: &str,
) -> Result<Option<RelationBinding<A>>, SessionError> {
    store
        .get(key)?
        .map(|value| {
            serde_json::from_value(value).map_err(|e| SessionError::Parse(format!("{key}: {e}")))
        })
        .transpose()
}

/// Load the binding stored under `key` and restore it into `relation`.
///
/// Fails with [`SessionError::Missing`] when nothing is stored, and with the
/// underlying relation error when the relation's shape no longer matches.
pub fn take_binding<A: DeserializeOwned>(
    store: &dyn SessionStore,
    key: &str,
    relation: &mut Relation,
) -> Result<RelationBinding<A>, SessionError> {
    let binding: RelationBinding<A> =
        load_binding(store, key)?.ok_or_else(|| SessionError::Missing(key.to_string()))?;
    binding.restore(relation)?;
    Ok(binding)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemorySessionStore;
    use relchain_core::{ModelDescriptor, RelationError, RelationNode, tuple};

    fn relation() -> Relation {
        Relation::new()
            .with_node(
                RelationNode::create_on_model(&ModelDescriptor::new("Page", "page"))
                    .and_then(|n| n.make_referencing_successor_in(["layout_id"]))
                    .expect("page"),
            )
            .with_node(
                RelationNode::create_on_model(&ModelDescriptor::new("Layout", "layout"))
                    .and_then(|n| n.make_referenced_by_predecessor_on(["id"]))
                    .expect("layout"),
            )
    }

    #[test]
    fn binding_round_trips_through_the_store() {
        let mut relation = relation();
        relation
            .node_at_mut(0)
            .expect("page")
            .bind_on_successor(Some(tuple([11])))
            .expect("bind");

        let mut binding: RelationBinding = RelationBinding::create_on_relation(&relation);
        binding.save(&relation).expect("save");
        binding
            .set_attachment("page", serde_json::json!("editing"))
            .expect("attach");

        let mut store = MemorySessionStore::new();
        let key = binding_key("editor", &relation);
        save_binding(&mut store, &key, &binding).expect("store");

        relation.clear_bindings();
        let restored: RelationBinding =
            take_binding(&store, &key, &mut relation).expect("restore");
        assert_eq!(restored, binding);
        assert_eq!(
            relation.node_at(0).expect("page").successor_values(),
            Some(&tuple([11])[..])
        );
    }

    #[test]
    fn missing_key_is_reported() {
        let store = MemorySessionStore::new();
        let mut relation = relation();
        let result: Result<RelationBinding, _> = take_binding(&store, "nope", &mut relation);
        assert!(matches!(result, Err(SessionError::Missing(key)) if key == "nope"));
        assert!(
            load_binding::<serde_json::Value>(&store, "nope")
                .expect("load")
                .is_none()
        );
    }

    #[test]
    fn unsaved_binding_surfaces_relation_error() {
        let mut store = MemorySessionStore::new();
        let binding: RelationBinding = RelationBinding::new();
        save_binding(&mut store, "k", &binding).expect("store");

        let mut relation = relation();
        let result: Result<RelationBinding, _> = take_binding(&store, "k", &mut relation);
        assert!(matches!(
            result,
            Err(SessionError::Relation(RelationError::NotSaved))
        ));
    }

    #[test]
    fn key_tracks_relation_shape() {
        let a = relation();
        let mut b = relation();
        b.node_at_mut(1)
            .expect("layout")
            .set_alias(Some("l"))
            .expect("alias");
        assert_eq!(binding_key("w", &a), binding_key("w", &relation()));
        assert_ne!(binding_key("w", &a), binding_key("w", &b));
        assert!(binding_key("w", &a).starts_with("w:"));
    }
}
