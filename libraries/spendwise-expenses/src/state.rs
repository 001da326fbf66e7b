//! List state and its reducer transitions.
//!
//! Every change to the list goes through [`ListState::begin_load`] or
//! [`ListState::apply`], so races between page loads, owner changes and
//! mutations can be replayed deterministically in tests.

use spendwise_core::{Expense, ExpenseId, UserId};

/// Default number of expenses requested per page
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Locally cached view of one owner's expenses.
#[derive(Debug, Clone, PartialEq)]
pub struct ListState {
    /// Owner the list belongs to; `None` when nobody is signed in
    pub owner: Option<UserId>,
    /// Server order, with local creates at the front
    pub expenses: Vec<Expense>,
    /// Next page to fetch (1-based)
    pub page: u32,
    /// Whether another page is believed to exist
    pub has_more: bool,
    /// A page request is in flight
    pub loading: bool,
    /// Bumped on every owner change and refresh; tags page requests
    pub generation: u64,
}

impl ListState {
    pub fn new(owner: Option<UserId>) -> Self {
        Self {
            owner,
            expenses: Vec::new(),
            page: 1,
            has_more: true,
            loading: false,
            generation: 0,
        }
    }

    /// Start a page load, returning the request to send.
    ///
    /// Returns `None` (and leaves the state untouched) when there is no
    /// owner, or for a next-page load while another load is in flight or
    /// the end of data was reached. A refresh always starts: it clears the
    /// list and bumps the generation, which orphans any load in flight.
    pub fn begin_load(&mut self, mode: LoadMode, page_size: u32) -> Option<PageRequest> {
        let owner = self.owner.clone()?;

        match mode {
            LoadMode::NextPage => {
                if self.loading || !self.has_more {
                    return None;
                }
            }
            LoadMode::Refresh => {
                self.generation += 1;
                self.expenses.clear();
                self.page = 1;
                self.has_more = true;
            }
        }

        self.loading = true;

        Some(PageRequest {
            owner,
            page: self.page,
            page_size,
            mode,
            generation: self.generation,
        })
    }

    /// Apply an action. Returns true if the state changed.
    pub fn apply(&mut self, action: ListAction) -> bool {
        match action {
            ListAction::OwnerChanged(owner) => {
                if self.owner == owner {
                    return false;
                }
                let generation = self.generation + 1;
                *self = Self::new(owner);
                self.generation = generation;
                true
            }

            ListAction::PageLoaded { request, expenses } => {
                if !self.is_current(&request) {
                    return false;
                }

                // A short page is the end-of-data signal; an exactly full
                // last page is corrected by the next (empty) fetch.
                self.has_more = expenses.len() == request.page_size as usize;
                match request.mode {
                    LoadMode::Refresh => self.expenses = expenses,
                    LoadMode::NextPage => self.expenses.extend(expenses),
                }
                self.page = request.page + 1;
                self.loading = false;
                true
            }

            ListAction::PageFailed { request } => {
                if !self.is_current(&request) {
                    return false;
                }
                self.loading = false;
                true
            }

            ListAction::Created { owner, expense } => {
                if !self.is_owned_by(&owner) {
                    return false;
                }
                match self.position(&expense.id) {
                    Some(index) => self.expenses[index] = expense,
                    None => self.expenses.insert(0, expense),
                }
                true
            }

            ListAction::Updated { owner, id, expense } => {
                if !self.is_owned_by(&owner) {
                    return false;
                }
                match self.position(&id) {
                    Some(index) => {
                        self.expenses[index] = expense;
                        true
                    }
                    None => false,
                }
            }

            ListAction::Deleted { owner, id } => {
                if !self.is_owned_by(&owner) {
                    return false;
                }
                let before = self.expenses.len();
                self.expenses.retain(|e| e.id != id);
                self.expenses.len() != before
            }
        }
    }

    /// Sum of all loaded amounts
    pub fn total_spent(&self) -> f64 {
        spendwise_core::summary::total_spent(&self.expenses)
    }

    fn is_current(&self, request: &PageRequest) -> bool {
        request.generation == self.generation && self.is_owned_by(&request.owner)
    }

    fn is_owned_by(&self, owner: &UserId) -> bool {
        self.owner.as_ref() == Some(owner)
    }

    fn position(&self, id: &ExpenseId) -> Option<usize> {
        self.expenses.iter().position(|e| &e.id == id)
    }
}

impl Default for ListState {
    fn default() -> Self {
        Self::new(None)
    }
}

/// Kind of page load
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadMode {
    /// Append the page at the cursor
    NextPage,
    /// Replace the list with page 1
    Refresh,
}

/// A page request tagged with the owner and generation it was issued under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    pub owner: UserId,
    pub page: u32,
    pub page_size: u32,
    pub mode: LoadMode,
    pub generation: u64,
}

/// State transitions.
#[derive(Debug, Clone, PartialEq)]
pub enum ListAction {
    /// The signed-in owner changed; resets everything
    OwnerChanged(Option<UserId>),
    /// The store answered a page request
    PageLoaded {
        request: PageRequest,
        expenses: Vec<Expense>,
    },
    /// A page request failed
    PageFailed { request: PageRequest },
    /// The store created an expense for `owner`
    Created { owner: UserId, expense: Expense },
    /// The store returned the updated record for `id`
    Updated {
        owner: UserId,
        id: ExpenseId,
        expense: Expense,
    },
    /// The store deleted `id`
    Deleted { owner: UserId, id: ExpenseId },
}
