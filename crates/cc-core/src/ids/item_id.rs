use serde::{Deserialize, Serialize};

use super::id_macro::impl_id;

/// Stable identity of one canvas item, shared by its arrangement record and its paste model.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ItemId(String);

impl_id!(ItemId);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_ids_are_unique() {
        assert_ne!(ItemId::new(), ItemId::new());
    }

    #[test]
    fn test_display_matches_inner() {
        let id = ItemId::from("item-1");
        assert_eq!(id.to_string(), "item-1");
        assert_eq!(id.as_str(), "item-1");
    }
}
