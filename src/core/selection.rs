use crate::domain::model::ServiceIdentifier;
use crate::utils::error::{GenError, Result};
use tokio::sync::watch;

/// 有序且不重複的選取清單。
/// 每次實際變動都會同步發佈目前的完整清單給訂閱者。
#[derive(Debug)]
pub struct SelectionStore {
    items: Vec<ServiceIdentifier>,
    tx: watch::Sender<Vec<ServiceIdentifier>>,
}

impl Default for SelectionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SelectionStore {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(Vec::new());
        Self {
            items: Vec::new(),
            tx,
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<Vec<ServiceIdentifier>> {
        self.tx.subscribe()
    }

    pub fn list(&self) -> &[ServiceIdentifier] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn contains(&self, identifier: &ServiceIdentifier) -> bool {
        self.items.contains(identifier)
    }

    /// 已存在時不變動，回傳 false
    pub fn add(&mut self, identifier: ServiceIdentifier) -> bool {
        if self.contains(&identifier) {
            return false;
        }
        self.items.push(identifier);
        self.notify();
        true
    }

    pub fn remove(&mut self, identifier: &ServiceIdentifier) -> bool {
        let Some(index) = self.items.iter().position(|i| i == identifier) else {
            return false;
        };
        self.items.remove(index);
        self.notify();
        true
    }

    pub fn reorder(&mut self, from_index: usize, to_index: usize) -> Result<()> {
        let len = self.items.len();
        if from_index >= len || to_index >= len {
            return Err(GenError::SelectionError {
                message: format!(
                    "Cannot move {} -> {} in a selection of {} items",
                    from_index, to_index, len
                ),
            });
        }
        if from_index == to_index {
            return Ok(());
        }

        let moved = self.items.remove(from_index);
        self.items.insert(to_index, moved);
        self.notify();
        Ok(())
    }

    pub fn clear(&mut self) {
        if self.items.is_empty() {
            return;
        }
        self.items.clear();
        self.notify();
    }

    fn notify(&self) {
        tracing::debug!("📝 Selection changed: {} services", self.items.len());
        self.tx.send_replace(self.items.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(raw: &str) -> ServiceIdentifier {
        ServiceIdentifier::parse(raw).unwrap()
    }

    fn names(store: &SelectionStore) -> Vec<&str> {
        store.list().iter().map(|i| i.as_str()).collect()
    }

    #[test]
    fn test_add_is_unique_and_ordered() {
        let mut store = SelectionStore::new();
        assert!(store.add(id("github")));
        assert!(store.add(id("xai")));
        assert!(!store.add(id("github")));
        assert_eq!(names(&store), vec!["github", "xai"]);
    }

    #[test]
    fn test_remove() {
        let mut store = SelectionStore::new();
        store.add(id("github"));
        store.add(id("xai"));
        assert!(store.remove(&id("github")));
        assert!(!store.remove(&id("github")));
        assert_eq!(names(&store), vec!["xai"]);
    }

    #[test]
    fn test_reorder_moves_item() {
        let mut store = SelectionStore::new();
        for raw in ["a", "b", "c", "d"] {
            store.add(id(raw));
        }
        store.reorder(0, 2).unwrap();
        assert_eq!(names(&store), vec!["b", "c", "a", "d"]);
        store.reorder(3, 0).unwrap();
        assert_eq!(names(&store), vec!["d", "b", "c", "a"]);
    }

    #[test]
    fn test_reorder_out_of_range() {
        let mut store = SelectionStore::new();
        store.add(id("a"));
        assert!(store.reorder(0, 1).is_err());
        assert!(store.reorder(2, 0).is_err());
    }

    #[test]
    fn test_mutations_publish_current_list() {
        let mut store = SelectionStore::new();
        let mut rx = store.subscribe();

        store.add(id("github"));
        assert!(rx.has_changed().unwrap());
        assert_eq!(*rx.borrow_and_update(), vec![id("github")]);

        // 重複加入不應觸發通知
        store.add(id("github"));
        assert!(!rx.has_changed().unwrap());

        store.add(id("xai"));
        store.reorder(1, 0).unwrap();
        assert_eq!(*rx.borrow_and_update(), vec![id("xai"), id("github")]);

        store.clear();
        assert!(rx.borrow_and_update().is_empty());
    }
}
