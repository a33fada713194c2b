use std::fmt;
use std::str::FromStr;
use serde::{Deserialize, Serialize};

use super::errors::{DomainError, DomainResult};

/// Identifier of a todo item, unique within a [`TodoList`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TodoId(pub u64);

impl TodoId {
    pub const FIRST: TodoId = TodoId(1);

    pub fn next(self) -> TodoId {
        TodoId(self.0 + 1)
    }
}

impl fmt::Display for TodoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    pub id: TodoId,
    pub title: String,
    pub description: String,
    pub done: bool,
}

impl Todo {
    pub fn new(id: TodoId, title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            description: description.into(),
            done: false,
        }
    }
}

/// The fixed sample set the application starts with.
pub fn sample_todos() -> Vec<Todo> {
    (1..=3)
        .map(|n| Todo::new(TodoId(n), format!("todo {}", n), format!("description {}", n)))
        .collect()
}

/// Ordered collection of todo items, kept in insertion order.
///
/// # Examples
///
/// ```
/// use ttodo::domain::{TodoList, TodoId, sample_todos};
///
/// let mut list = TodoList::from(sample_todos());
/// assert_eq!(list.next_id(), TodoId(4));
/// list.remove(TodoId(2));
/// let ids: Vec<u64> = list.iter().map(|t| t.id.0).collect();
/// assert_eq!(ids, vec![1, 3]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoList {
    items: Vec<Todo>,
}

impl From<Vec<Todo>> for TodoList {
    fn from(items: Vec<Todo>) -> Self {
        Self { items }
    }
}

impl TodoList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[Todo] {
        &self.items
    }

    pub fn iter(&self) -> impl Iterator<Item = &Todo> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Todo> {
        self.items.get(index)
    }

    pub fn last(&self) -> Option<&Todo> {
        self.items.last()
    }

    pub fn position(&self, id: TodoId) -> Option<usize> {
        self.items.iter().position(|todo| todo.id == id)
    }

    /// Identifier following the last element, or 1 when empty.
    ///
    /// Removing the last element and then asking again yields the removed
    /// element's identifier.
    pub fn next_id(&self) -> TodoId {
        self.items
            .last()
            .map(|todo| todo.id.next())
            .unwrap_or(TodoId::FIRST)
    }

    pub fn push(&mut self, todo: Todo) {
        self.items.push(todo);
    }

    pub fn replace(&mut self, items: Vec<Todo>) {
        self.items = items;
    }

    /// Removes the item with the given identifier, keeping the order of the rest.
    pub fn remove(&mut self, id: TodoId) -> Option<Todo> {
        let index = self.position(id)?;
        Some(self.items.remove(index))
    }
}

/// How identifiers for new items are chosen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IdPolicy {
    /// Last element's identifier plus one. Identifiers of deleted trailing
    /// items are handed out again.
    #[default]
    FollowLast,
    /// Never hands out an identifier seen earlier in the session.
    Monotonic,
}

impl FromStr for IdPolicy {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "follow-last" => Ok(IdPolicy::FollowLast),
            "monotonic" => Ok(IdPolicy::Monotonic),
            _ => Err(DomainError::UnknownIdPolicy(s.to_string())),
        }
    }
}

impl fmt::Display for IdPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IdPolicy::FollowLast => write!(f, "follow-last"),
            IdPolicy::Monotonic => write!(f, "monotonic"),
        }
    }
}

/// Hands out identifiers for new items according to an [`IdPolicy`].
#[derive(Debug, Clone, Default)]
pub struct IdAllocator {
    policy: IdPolicy,
    high_water: Option<TodoId>,
}

impl IdAllocator {
    pub fn new(policy: IdPolicy) -> Self {
        Self {
            policy,
            high_water: None,
        }
    }

    pub fn policy(&self) -> IdPolicy {
        self.policy
    }

    /// Records an identifier that entered the collection.
    pub fn observe(&mut self, id: TodoId) {
        if self.high_water.is_none_or(|seen| id > seen) {
            self.high_water = Some(id);
        }
    }

    pub fn next(&self, list: &TodoList) -> TodoId {
        let following = list.next_id();
        match (self.policy, self.high_water) {
            (IdPolicy::Monotonic, Some(seen)) => following.max(seen.next()),
            _ => following,
        }
    }
}

/// Which of the two draft inputs is meant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DraftField {
    #[default]
    Title,
    Description,
}

impl DraftField {
    pub fn other(self) -> DraftField {
        match self {
            DraftField::Title => DraftField::Description,
            DraftField::Description => DraftField::Title,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            DraftField::Title => "Title",
            DraftField::Description => "Description",
        }
    }
}

/// The uncommitted title/description pair of the add form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Draft {
    pub title: String,
    pub description: String,
}

impl Draft {
    pub fn field(&self, field: DraftField) -> &str {
        match field {
            DraftField::Title => &self.title,
            DraftField::Description => &self.description,
        }
    }

    pub fn field_mut(&mut self, field: DraftField) -> &mut String {
        match field {
            DraftField::Title => &mut self.title,
            DraftField::Description => &mut self.description,
        }
    }

    pub fn is_blank(&self) -> bool {
        self.title.is_empty() && self.description.is_empty()
    }

    pub fn clear(&mut self) {
        self.title.clear();
        self.description.clear();
    }

    /// Only emptiness is checked; whitespace counts as content.
    pub fn validate(&self) -> DomainResult<()> {
        if self.title.is_empty() {
            return Err(DomainError::EmptyTitle);
        }
        if self.description.is_empty() {
            return Err(DomainError::EmptyDescription);
        }
        Ok(())
    }

    pub fn to_todo(&self, id: TodoId) -> DomainResult<Todo> {
        self.validate()?;
        Ok(Todo::new(id, self.title.clone(), self.description.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(list: &TodoList) -> Vec<u64> {
        list.iter().map(|t| t.id.0).collect()
    }

    #[test]
    fn test_sample_todos() {
        let seed = sample_todos();
        assert_eq!(seed.len(), 3);
        assert_eq!(seed[0], Todo::new(TodoId(1), "todo 1", "description 1"));
        assert_eq!(seed[2].title, "todo 3");
        assert!(seed.iter().all(|t| !t.done));
    }

    #[test]
    fn test_next_id_empty_list() {
        let list = TodoList::new();
        assert_eq!(list.next_id(), TodoId(1));
    }

    #[test]
    fn test_next_id_follows_last_not_max() {
        let list = TodoList::from(vec![
            Todo::new(TodoId(7), "a", "b"),
            Todo::new(TodoId(2), "c", "d"),
        ]);
        assert_eq!(list.next_id(), TodoId(3));
    }

    #[test]
    fn test_remove_present_id() {
        let mut list = TodoList::from(sample_todos());
        let removed = list.remove(TodoId(2)).unwrap();
        assert_eq!(removed.title, "todo 2");
        assert_eq!(ids(&list), vec![1, 3]);
    }

    #[test]
    fn test_remove_absent_id() {
        let mut list = TodoList::from(sample_todos());
        let before = list.clone();
        assert!(list.remove(TodoId(42)).is_none());
        assert_eq!(list, before);
    }

    #[test]
    fn test_follow_last_reuses_deleted_trailing_id() {
        let mut list = TodoList::from(sample_todos());
        let mut allocator = IdAllocator::new(IdPolicy::FollowLast);
        list.iter().for_each(|t| allocator.observe(t.id));

        list.remove(TodoId(3));
        assert_eq!(allocator.next(&list), TodoId(3));
    }

    #[test]
    fn test_monotonic_never_reuses() {
        let mut list = TodoList::from(sample_todos());
        let mut allocator = IdAllocator::new(IdPolicy::Monotonic);
        list.iter().for_each(|t| allocator.observe(t.id));

        list.remove(TodoId(3));
        assert_eq!(allocator.next(&list), TodoId(4));

        list.remove(TodoId(1));
        list.remove(TodoId(2));
        assert_eq!(allocator.next(&list), TodoId(4));
    }

    #[test]
    fn test_monotonic_without_history_starts_at_one() {
        let allocator = IdAllocator::new(IdPolicy::Monotonic);
        assert_eq!(allocator.next(&TodoList::new()), TodoId(1));
    }

    #[test]
    fn test_id_policy_parse() {
        assert_eq!("follow-last".parse::<IdPolicy>(), Ok(IdPolicy::FollowLast));
        assert_eq!("monotonic".parse::<IdPolicy>(), Ok(IdPolicy::Monotonic));
        assert_eq!(
            "random".parse::<IdPolicy>(),
            Err(DomainError::UnknownIdPolicy("random".to_string()))
        );
    }

    #[test]
    fn test_id_policy_parse_matches_config_spelling() {
        for alias in ["follow_last", "last", "counter", "Monotonic"] {
            assert_eq!(
                alias.parse::<IdPolicy>(),
                Err(DomainError::UnknownIdPolicy(alias.to_string()))
            );
            assert!(serde_json::from_str::<IdPolicy>(&format!("\"{}\"", alias)).is_err());
        }
        assert_eq!(IdPolicy::Monotonic.to_string(), "monotonic");
    }

    #[test]
    fn test_id_policy_serde() {
        let policy: IdPolicy = serde_json::from_str("\"monotonic\"").unwrap();
        assert_eq!(policy, IdPolicy::Monotonic);
        assert_eq!(serde_json::to_string(&IdPolicy::FollowLast).unwrap(), "\"follow-last\"");
    }

    #[test]
    fn test_draft_validation() {
        let mut draft = Draft::default();
        assert_eq!(draft.validate(), Err(DomainError::EmptyTitle));

        draft.title = "todo".to_string();
        assert_eq!(draft.validate(), Err(DomainError::EmptyDescription));

        draft.title.clear();
        draft.description = "non-empty".to_string();
        assert_eq!(draft.validate(), Err(DomainError::EmptyTitle));

        draft.title = " ".to_string();
        assert!(draft.validate().is_ok());
    }

    #[test]
    fn test_draft_to_todo() {
        let draft = Draft {
            title: "todo 4".to_string(),
            description: "description 4".to_string(),
        };
        let todo = draft.to_todo(TodoId(4)).unwrap();
        assert_eq!(todo, Todo::new(TodoId(4), "todo 4", "description 4"));
    }

    #[test]
    fn test_draft_fields() {
        let mut draft = Draft::default();
        draft.field_mut(DraftField::Description).push_str("desc");
        assert_eq!(draft.field(DraftField::Description), "desc");
        assert!(!draft.is_blank());
        draft.clear();
        assert!(draft.is_blank());
        assert_eq!(DraftField::Title.other(), DraftField::Description);
    }
}
