//! Sampler slot bookkeeping.

/// Append-only map from sampler uniform name to texture slot.
///
/// Slots are handed out densely from 0 in first-seen order and a name keeps
/// its slot for the lifetime of the table, even in frames that omit it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BindingTable {
    /// Index is the slot.
    names: Vec<String>,
}

impl BindingTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn slot(&self, name: &str) -> Option<u32> {
        self.names.iter().position(|n| n == name).map(|i| i as u32)
    }

    /// The slot the next unseen name will get.
    pub fn next_slot(&self) -> u32 {
        self.names.len() as u32
    }

    /// Slot for `name`, assigning the next free one on first sight.
    pub fn assign(&mut self, name: &str) -> u32 {
        if let Some(slot) = self.slot(name) {
            return slot;
        }
        let slot = self.next_slot();
        self.names.push(name.to_string());
        slot
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// `(slot, name)` pairs in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (u32, &str)> {
        self.names
            .iter()
            .enumerate()
            .map(|(i, n)| (i as u32, n.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slots_are_dense_in_first_seen_order() {
        let mut table = BindingTable::new();
        for (i, name) in ["screen_texture", "noise", "palette"].iter().enumerate() {
            assert_eq!(table.next_slot(), i as u32);
            assert_eq!(table.assign(name), i as u32);
        }
        assert_eq!(table.len(), 3);
    }

    #[test]
    fn known_names_keep_their_slot() {
        let mut table = BindingTable::new();
        table.assign("a");
        table.assign("b");

        assert_eq!(table.assign("a"), 0);
        assert_eq!(table.len(), 2);
        assert_eq!(table.assign("c"), 2);
        assert_eq!(table.slot("b"), Some(1));
        assert_eq!(table.slot("missing"), None);
    }

    #[test]
    fn iter_is_slot_ordered() {
        let mut table = BindingTable::new();
        table.assign("x");
        table.assign("y");
        assert_eq!(table.iter().collect::<Vec<_>>(), vec![(0, "x"), (1, "y")]);
    }
}
