use crate::scene::ArrowPart;

use super::DrawCmd;

/// A single draw item: which renderable produced it + its command.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawItem {
    pub part: ArrowPart,
    pub cmd: DrawCmd,
}

/// Recorded draw stream for a frame.
///
/// Items are drawn in insertion order, which is the order the host refreshed
/// them in. `push()` is O(1); `clear()` keeps the allocation for the next frame.
#[derive(Debug, Default)]
pub struct DrawList {
    items: Vec<DrawItem>,
}

impl DrawList {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn clear(&mut self) {
        self.items.clear();
    }

    #[inline]
    pub fn items(&self) -> &[DrawItem] {
        &self.items
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[inline]
    pub fn push(&mut self, part: ArrowPart, cmd: DrawCmd) {
        self.items.push(DrawItem { part, cmd });
    }

    pub fn iter(&self) -> impl Iterator<Item = &DrawItem> {
        self.items.iter()
    }
}
