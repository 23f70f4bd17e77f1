//! Histories of operations performed on a shared object.
use std::collections::HashMap;
use std::ops::Index;

/// A process identifier.
pub type ProcessId = usize;

/// An identifier of an entry in a history.
pub type EntryId = usize;

/// A step taken by a process: either calling an operation, or receiving its response.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Action<T> {
    Call(T),
    Response(T),
}

/// The call of an operation, linked to the entry of its response.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CallEntry<T> {
    pub id: EntryId,
    pub operation: T,
    pub response: EntryId,
}

/// The response of an operation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResponseEntry<T> {
    pub id: EntryId,
    pub operation: T,
}

/// An entry in a history.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Entry<T> {
    Call(CallEntry<T>),
    Response(ResponseEntry<T>),
}

impl<T> Entry<T> {
    /// Returns the identifier of the entry.
    pub fn id(&self) -> EntryId {
        match self {
            Entry::Call(call) => call.id,
            Entry::Response(response) => response.id,
        }
    }
}

/// A complete history of operations, in real-time order.
///
/// Entries can be temporarily _lifted_ out of the history, and later restored
/// to the exact positions they were lifted from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct History<T> {
    entries: Vec<Entry<T>>,
    // When an entry is removed from this history, its index is recorded here.
    removed_from: Vec<Option<usize>>,
}

impl<T> History<T> {
    /// Creates a history from a sequence of actions, each performed by a process.
    ///
    /// # Panics
    ///
    /// Panics if a process calls an operation while another of its operations
    /// is pending, if a response does not follow a call by the same process,
    /// or if some call never receives a response.
    pub fn from_actions(actions: Vec<(ProcessId, Action<T>)>) -> Self {
        let mut pending: HashMap<ProcessId, EntryId> = HashMap::new();
        let mut responses: Vec<Option<EntryId>> = vec![None; actions.len()];
        for (id, (process, action)) in actions.iter().enumerate() {
            match action {
                Action::Call(_) => {
                    if pending.insert(*process, id).is_some() {
                        panic!("Process {process} called an operation while another was pending");
                    }
                }
                Action::Response(_) => match pending.remove(process) {
                    Some(call) => responses[call] = Some(id),
                    None => panic!("Process {process} responded without a pending call"),
                },
            }
        }
        if let Some(process) = pending.keys().next() {
            panic!("Process {process} called an operation that never responded");
        }

        let num_entries = actions.len();
        let entries = actions
            .into_iter()
            .zip(responses)
            .enumerate()
            .map(|(id, ((_, action), response))| match (action, response) {
                (Action::Call(operation), Some(response)) => Entry::Call(CallEntry {
                    id,
                    operation,
                    response,
                }),
                (Action::Response(operation), None) => {
                    Entry::Response(ResponseEntry { id, operation })
                }
                _ => unreachable!("every call was matched with a response above"),
            })
            .collect();
        Self {
            entries,
            removed_from: vec![None; num_entries],
        }
    }

    /// Returns the position of the entry with the given identifier.
    ///
    /// # Panics
    ///
    /// Panics if no such entry is currently in the history.
    pub fn index_of_id(&self, id: EntryId) -> usize {
        match self.entries.iter().position(|e| e.id() == id) {
            Some(index) => index,
            None => panic!("Entry {id} is not in the history"),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Entry<T>> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Removes the call entry at position `i`, along with its response.
    ///
    /// # Panics
    ///
    /// Panics if the entry at position `i` is not a call.
    pub fn lift(&mut self, i: usize) -> (Entry<T>, Entry<T>) {
        let response = match &self.entries[i] {
            Entry::Call(call) => call.response,
            Entry::Response(response) => {
                panic!("Cannot lift entry {}, which is a response", response.id)
            }
        };
        let call = self.remove(i);
        let response = self.remove(self.index_of_id(response));
        (call, response)
    }

    /// Restores a call and its response that were previously lifted, and
    /// returns the position of the call.
    pub fn unlift(&mut self, call: Entry<T>, response: Entry<T>) -> usize {
        self.insert(response);
        self.insert(call)
    }

    fn remove(&mut self, i: usize) -> Entry<T> {
        let entry = self.entries.remove(i);
        self.removed_from[entry.id()] = Some(i);
        entry
    }

    /// # Panics
    ///
    /// Panics if input entry was not previously removed from the history.
    fn insert(&mut self, entry: Entry<T>) -> usize {
        match self.removed_from[entry.id()].take() {
            Some(index) => {
                self.entries.insert(index, entry);
                index
            }
            None => panic!("Index that entry {} was removed from is unknown", entry.id()),
        }
    }
}

impl<T> Index<usize> for History<T> {
    type Output = Entry<T>;

    fn index(&self, i: usize) -> &Self::Output {
        &self.entries[i]
    }
}
