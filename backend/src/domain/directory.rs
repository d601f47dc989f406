//! User directory store: the in-memory user table plus its search keyword,
//! pagination cursor and the record currently open in the edit form.
//!
//! All operations are synchronous and total. Unknown ids are silent no-ops,
//! duplicate emails and phones are accepted, and the page number is never
//! clamped, so paging past the end simply shows nothing.

use std::sync::Arc;

use chrono::NaiveDate;
use mockable::Clock;
use pagination::{Page, PageCursor, PageSize};
use serde::Serialize;
use tracing::debug;

use super::{Role, UserDraft, UserId, UserPatch, UserRecord};

/// Ordered user table with filter and pagination state.
pub struct UserDirectory {
    users: Vec<UserRecord>,
    search_keyword: String,
    cursor: PageCursor,
    editing: Option<UserRecord>,
    clock: Arc<dyn Clock>,
    last_issued: Option<i64>,
}

impl UserDirectory {
    /// Empty directory on page one.
    pub fn new(clock: Arc<dyn Clock>, page_size: PageSize) -> Self {
        Self::with_records(Vec::new(), clock, page_size)
    }

    /// Directory holding the five demonstration users.
    pub fn seeded(clock: Arc<dyn Clock>, page_size: PageSize) -> Self {
        Self::with_records(seed_records(), clock, page_size)
    }

    /// Directory holding `users` in the given order.
    pub fn with_records(users: Vec<UserRecord>, clock: Arc<dyn Clock>, page_size: PageSize) -> Self {
        Self {
            users,
            search_keyword: String::new(),
            cursor: PageCursor::first(page_size),
            editing: None,
            clock,
            last_issued: None,
        }
    }

    /// Every record in insertion order, ignoring the filter.
    pub fn records(&self) -> &[UserRecord] {
        &self.users
    }

    /// Number of records, ignoring the filter.
    pub fn len(&self) -> usize {
        self.users.len()
    }

    /// Whether the directory holds no records at all.
    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    /// Current search keyword, verbatim.
    pub fn search_keyword(&self) -> &str {
        &self.search_keyword
    }

    /// Current page and page size.
    pub fn cursor(&self) -> PageCursor {
        self.cursor
    }

    /// Record currently open in the edit form, if any.
    pub fn editing_record(&self) -> Option<&UserRecord> {
        self.editing.as_ref()
    }

    /// First record with `id`.
    pub fn find(&self, id: UserId) -> Option<&UserRecord> {
        self.users.iter().find(|user| user.id() == id)
    }

    /// Append a record built from `draft`, stamped with a fresh id and
    /// today's date.
    pub fn add(&mut self, draft: UserDraft) -> UserRecord {
        let id = self.next_id();
        let record = UserRecord::from_draft(id, draft, self.today());
        debug!(%id, "user added to directory");
        self.users.push(record.clone());
        record
    }

    /// Merge `patch` into the first record with `id`.
    ///
    /// Returns the updated record, or `None` when no record matched.
    pub fn update(&mut self, id: UserId, patch: UserPatch) -> Option<&UserRecord> {
        let record = self.users.iter_mut().find(|user| user.id() == id)?;
        record.apply(patch);
        debug!(%id, "user updated in directory");
        Some(record)
    }

    /// Remove every record with `id`, returning how many were removed.
    pub fn delete(&mut self, id: UserId) -> usize {
        let before = self.users.len();
        self.users.retain(|user| user.id() != id);
        let removed = before - self.users.len();
        if removed > 0 {
            debug!(%id, removed, "user removed from directory");
        }
        removed
    }

    /// Delete as the table view does: when the deleted row was the only
    /// one visible on a page after the first, step back one page.
    pub fn delete_visible(&mut self, id: UserId) -> usize {
        let visible = self.visible_records().len();
        let removed = self.delete(id);
        let page = self.cursor.current_page();
        if removed > 0 && visible == 1 && page > 1 {
            self.cursor.set_current_page(page - 1);
        }
        removed
    }

    /// Replace the search keyword and rewind to page one.
    pub fn set_search_keyword(&mut self, keyword: impl Into<String>) {
        self.search_keyword = keyword.into();
        self.cursor.rewind();
    }

    /// Replace the page size and rewind to page one.
    pub fn set_page_size(&mut self, page_size: PageSize) {
        self.cursor.set_page_size(page_size);
    }

    /// Jump to `page` without bounds checking.
    pub fn set_current_page(&mut self, page: usize) {
        self.cursor.set_current_page(page);
    }

    /// Track which record the edit form is working on.
    pub fn set_editing_record(&mut self, record: Option<UserRecord>) {
        self.editing = record;
    }

    /// Close the edit form.
    pub fn clear_editing_record(&mut self) {
        self.editing = None;
    }

    /// Records matching the keyword, in directory order.
    ///
    /// Name and email match case-insensitively; phone matches verbatim. A
    /// blank keyword matches everything.
    pub fn filtered(&self) -> Vec<&UserRecord> {
        if self.search_keyword.trim().is_empty() {
            return self.users.iter().collect();
        }
        let needle = self.search_keyword.to_lowercase();
        self.users
            .iter()
            .filter(|user| user.matches_keyword(&needle))
            .collect()
    }

    /// Filtered records that fall on the current page.
    pub fn visible_records(&self) -> Vec<UserRecord> {
        let filtered = self.filtered();
        self.cursor.slice(&filtered).iter().copied().cloned().collect()
    }

    /// Current page plus the metadata a table view needs.
    pub fn view(&self) -> DirectoryView {
        let filtered = self.filtered();
        let page = Page::from_slice(&filtered, &self.cursor);
        DirectoryView {
            items: page.items.into_iter().cloned().collect(),
            total: self.users.len(),
            filtered_total: page.total,
            total_pages: page.total_pages,
            current_page: page.current_page,
            page_size: page.page_size,
            search_keyword: self.search_keyword.clone(),
            editing_record: self.editing.clone(),
        }
    }

    fn today(&self) -> NaiveDate {
        self.clock.utc().date_naive()
    }

    /// Epoch milliseconds, bumped past every id already issued or present.
    fn next_id(&mut self) -> UserId {
        let floor = self
            .users
            .iter()
            .map(|user| user.id().get())
            .chain(self.last_issued)
            .max()
            .map(|highest| highest.saturating_add(1));
        let now = self.clock.utc().timestamp_millis();
        let id = floor.map_or(now, |floor| floor.max(now));
        self.last_issued = Some(id);
        UserId::new(id)
    }
}

/// Derived directory state rendered by the table view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DirectoryView {
    /// Records on the current page.
    pub items: Vec<UserRecord>,
    /// Record count before filtering.
    pub total: usize,
    /// Record count after filtering.
    pub filtered_total: usize,
    /// Pages needed for the filtered records.
    pub total_pages: usize,
    /// One-based page number, possibly out of range.
    pub current_page: usize,
    /// Rows per page.
    pub page_size: PageSize,
    /// Active search keyword.
    pub search_keyword: String,
    /// Record open in the edit form.
    pub editing_record: Option<UserRecord>,
}

/// The five demonstration users the console starts with.
pub fn seed_records() -> Vec<UserRecord> {
    const SEEDS: [(i64, &str, &str, &str, Role, u32); 5] = [
        (1, "张三", "zhangsan@example.com", "13800138001", Role::Admin, 1),
        (2, "李四", "lisi@example.com", "13800138002", Role::User, 2),
        (3, "王五", "wangwu@example.com", "13800138003", Role::User, 3),
        (4, "赵六", "zhaoliu@example.com", "13800138004", Role::User, 4),
        (5, "钱七", "qianqi@example.com", "13800138005", Role::User, 5),
    ];

    SEEDS
        .into_iter()
        .filter_map(|(id, name, email, phone, role, day)| {
            let created = NaiveDate::from_ymd_opt(2024, 1, day)?;
            Some(UserRecord::seed(
                UserId::new(id),
                [name, email, phone],
                role,
                created,
            ))
        })
        .collect()
}

#[cfg(test)]
mod tests;
