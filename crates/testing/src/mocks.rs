//! In-memory repository mocks.
//!
//! These implement the reference repository traits of the infrastructure
//! crate with the same error contract as the PostgreSQL versions, so a
//! [`Store`](catalog_infrastructure::Store) can be partially backed by them.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::RwLock;

use catalog_common::pagination::{PaginatedResult, SortDirection};
use catalog_domain::{
    Author, CreateAuthor, CreateDirection, CreateTag, Direction, Tag, UpdateAuthor,
    UpdateDirection, UpdateTag,
};
use catalog_infrastructure::{
    AuthorRepository, DirectionRepository, Error, ListOptions, Result, TagRepository,
};

/// Rows of one mocked table, keyed by id.
struct MemoryTable<T> {
    entity: &'static str,
    rows: Arc<RwLock<HashMap<String, T>>>,
}

impl<T: Clone> MemoryTable<T> {
    fn new(entity: &'static str) -> Self {
        Self {
            entity,
            rows: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    fn get(&self, id: &str) -> Result<T> {
        self.rows
            .read()
            .get(id)
            .cloned()
            .ok_or_else(|| Error::NotFound {
                entity: self.entity,
                id: id.to_string(),
            })
    }

    fn list(&self, options: ListOptions, label: fn(&T) -> &str) -> Result<PaginatedResult<T>> {
        if options.filter.is_some() {
            return Err(Error::InvalidArgument(format!(
                "in-memory {} repository does not support filters",
                self.entity
            )));
        }

        let mut items: Vec<T> = self.rows.read().values().cloned().collect();
        items.sort_by(|a, b| label(a).cmp(label(b)));
        if matches!(&options.sort, Some(sort) if sort.direction == SortDirection::Desc) {
            items.reverse();
        }

        let total = items.len() as u64;
        let offset = options.page.offset().unwrap_or(0) as usize;
        let limit = options.page.limit().map_or(usize::MAX, |l| l as usize);
        let page = items.into_iter().skip(offset).take(limit).collect();

        Ok(PaginatedResult::new(page, options.page, total))
    }

    fn insert(&self, build: impl FnOnce(String) -> T) -> String {
        let id = uuid::Uuid::new_v4().to_string();
        self.rows.write().insert(id.clone(), build(id.clone()));
        id
    }

    fn no_rows(&self, id: &str) -> Error {
        Error::NoRowsAffected {
            entity: self.entity,
            id: id.to_string(),
        }
    }

    fn delete(&self, id: &str) -> Result<()> {
        self.rows
            .write()
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| self.no_rows(id))
    }

    fn modify(&self, id: &str, apply: impl FnOnce(&mut T)) -> Result<()> {
        match self.rows.write().get_mut(id) {
            Some(row) => {
                apply(row);
                Ok(())
            }
            None => Err(self.no_rows(id)),
        }
    }

    fn count(&self) -> usize {
        self.rows.read().len()
    }

    fn clear(&self) {
        self.rows.write().clear();
    }
}

fn replace_unless_empty(target: &mut String, value: &str) {
    if !value.is_empty() {
        *target = value.to_string();
    }
}

/// Mock tag repository for testing
pub struct MockTagRepository {
    table: MemoryTable<Tag>,
}

impl MockTagRepository {
    pub fn new() -> Self {
        Self {
            table: MemoryTable::new("tag"),
        }
    }

    /// Seed a tag with a known id.
    pub fn insert(&self, tag: Tag) {
        self.table.rows.write().insert(tag.id.clone(), tag);
    }

    pub fn count(&self) -> usize {
        self.table.count()
    }

    pub fn clear(&self) {
        self.table.clear();
    }
}

impl Default for MockTagRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TagRepository for MockTagRepository {
    async fn get_one(&self, id: &str) -> Result<Tag> {
        self.table.get(id)
    }

    async fn get_all(&self, options: ListOptions) -> Result<PaginatedResult<Tag>> {
        self.table.list(options, |tag| tag.name.as_str())
    }

    async fn create(&self, tag: &CreateTag) -> Result<String> {
        Ok(self.table.insert(|id| Tag::new(id, tag.name.clone())))
    }

    async fn delete(&self, id: &str) -> Result<()> {
        self.table.delete(id)
    }

    async fn update(&self, id: &str, changes: &UpdateTag) -> Result<()> {
        self.table
            .modify(id, |tag| replace_unless_empty(&mut tag.name, &changes.name))
    }
}

/// Mock author repository for testing
pub struct MockAuthorRepository {
    table: MemoryTable<Author>,
}

impl MockAuthorRepository {
    pub fn new() -> Self {
        Self {
            table: MemoryTable::new("author"),
        }
    }

    /// Seed an author with a known id.
    pub fn insert(&self, author: Author) {
        self.table.rows.write().insert(author.id.clone(), author);
    }

    pub fn count(&self) -> usize {
        self.table.count()
    }

    pub fn clear(&self) {
        self.table.clear();
    }
}

impl Default for MockAuthorRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AuthorRepository for MockAuthorRepository {
    async fn get_one(&self, id: &str) -> Result<Author> {
        self.table.get(id)
    }

    async fn get_all(&self, options: ListOptions) -> Result<PaginatedResult<Author>> {
        self.table.list(options, |author| author.full_name.as_str())
    }

    async fn create(&self, author: &CreateAuthor) -> Result<String> {
        Ok(self.table.insert(|id| Author {
            id,
            full_name: author.full_name.clone(),
        }))
    }

    async fn delete(&self, id: &str) -> Result<()> {
        self.table.delete(id)
    }

    async fn update(&self, id: &str, changes: &UpdateAuthor) -> Result<()> {
        self.table.modify(id, |author| {
            replace_unless_empty(&mut author.full_name, &changes.full_name)
        })
    }
}

/// Mock direction repository for testing
pub struct MockDirectionRepository {
    table: MemoryTable<Direction>,
}

impl MockDirectionRepository {
    pub fn new() -> Self {
        Self {
            table: MemoryTable::new("direction"),
        }
    }

    /// Seed a direction with a known id.
    pub fn insert(&self, direction: Direction) {
        self.table
            .rows
            .write()
            .insert(direction.id.clone(), direction);
    }

    pub fn count(&self) -> usize {
        self.table.count()
    }

    pub fn clear(&self) {
        self.table.clear();
    }
}

impl Default for MockDirectionRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DirectionRepository for MockDirectionRepository {
    async fn get_one(&self, id: &str) -> Result<Direction> {
        self.table.get(id)
    }

    async fn get_all(&self, options: ListOptions) -> Result<PaginatedResult<Direction>> {
        self.table.list(options, |direction| direction.name.as_str())
    }

    async fn create(&self, direction: &CreateDirection) -> Result<String> {
        Ok(self.table.insert(|id| Direction {
            id,
            name: direction.name.clone(),
        }))
    }

    async fn delete(&self, id: &str) -> Result<()> {
        self.table.delete(id)
    }

    async fn update(&self, id: &str, changes: &UpdateDirection) -> Result<()> {
        self.table.modify(id, |direction| {
            replace_unless_empty(&mut direction.name, &changes.name)
        })
    }
}
