/// FIFO of pending actions for one actor. The head stays queued while the
/// actor walks to it and is popped once it resolves.
#[derive(Debug, Default, Clone)]
struct ActionQueue {
    entries: VecDeque<Action>,
}

impl ActionQueue {
    fn push(&mut self, action: Action) {
        self.entries.push_back(action);
    }

    fn head(&self) -> Option<&Action> {
        self.entries.front()
    }

    fn pop_head(&mut self) -> Option<Action> {
        self.entries.pop_front()
    }

    fn len(&self) -> usize {
        self.entries.len()
    }

    fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn iter(&self) -> impl Iterator<Item = &Action> + '_ {
        self.entries.iter()
    }

    #[cfg(test)]
    fn contains_object(&self, object: EntityId) -> bool {
        self.entries.iter().any(|action| action.object == object)
    }

    /// Removes the first entry for `object`, and the entry right after it
    /// when that one is a bin drop-off. The pairing assumes the player
    /// clicked "collect, then deposit" and is never verified, so an
    /// unrelated bin entry that happens to follow is dropped too.
    ///
    /// Returns how many entries were removed (0, 1 or 2).
    fn cancel(&mut self, object: EntityId) -> usize {
        let Some(index) = self
            .entries
            .iter()
            .position(|action| action.object == object)
        else {
            return 0;
        };
        self.entries.remove(index);
        let paired_bin = self
            .entries
            .get(index)
            .is_some_and(|next| next.kind == ActionKind::Bin);
        if paired_bin {
            self.entries.remove(index);
            2
        } else {
            1
        }
    }
}
