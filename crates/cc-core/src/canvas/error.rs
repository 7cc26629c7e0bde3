use thiserror::Error;

use crate::ids::ItemId;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ArrangementError {
    #[error("item {0} is not on the canvas")]
    UnknownItem(ItemId),

    #[error("item {0} is already on the canvas")]
    DuplicateItem(ItemId),

    #[error("z-index {index} is held by both {first} and {second}")]
    DuplicateIndex {
        index: usize,
        first: ItemId,
        second: ItemId,
    },

    #[error("z-index {index} of {item} is outside 0..{len}")]
    IndexOutOfRange {
        item: ItemId,
        index: usize,
        len: usize,
    },
}
