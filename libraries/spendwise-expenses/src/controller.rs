//! Expense list controller
//!
//! Owns a [`ListState`] for the current owner and keeps it in step with an
//! [`ExpenseStore`]. Store calls are the only suspension points; all state
//! changes are reducer transitions published through a watch channel.

use std::sync::Arc;

use spendwise_core::{
    Expense, ExpenseDraft, ExpenseId, ExpenseStore, IdentityProvider, Result, SpendError,
    UpdateExpense, UserId,
};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use crate::state::{ListAction, ListState, LoadMode, PageRequest, DEFAULT_PAGE_SIZE};

/// What a page load did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The page was applied to the list
    Loaded { page: u32, count: usize },
    /// Preconditions failed (no owner, already loading, or no more data)
    Skipped,
    /// The store call failed; only the loading flag was cleared
    Failed,
    /// The owner changed or a refresh started while the request was in flight
    Discarded,
}

/// Paginated, owner-scoped view of expenses with local mutation bookkeeping.
pub struct ExpenseListController {
    store: Arc<dyn ExpenseStore>,
    page_size: u32,
    state: watch::Sender<ListState>,
}

impl ExpenseListController {
    /// Create a controller with no owner and the default page size
    pub fn new(store: Arc<dyn ExpenseStore>) -> Self {
        Self::with_page_size(store, DEFAULT_PAGE_SIZE)
    }

    /// Create a controller with a custom page size (clamped to at least 1)
    pub fn with_page_size(store: Arc<dyn ExpenseStore>, page_size: u32) -> Self {
        let (state, _rx) = watch::channel(ListState::default());
        Self {
            store,
            page_size: page_size.max(1),
            state,
        }
    }

    /// Switch to another owner (or to nobody).
    ///
    /// Any change resets the list. A new non-empty owner is then refreshed
    /// from page 1; clearing the owner never contacts the store.
    pub async fn set_owner(&self, owner: Option<UserId>) -> LoadOutcome {
        if !self.dispatch(ListAction::OwnerChanged(owner.clone())) {
            return LoadOutcome::Skipped;
        }

        match owner {
            Some(owner_id) => {
                info!(owner_id = %owner_id, "Owner changed, refreshing expenses");
                self.refresh().await
            }
            None => {
                info!("Owner cleared, expense list reset");
                LoadOutcome::Skipped
            }
        }
    }

    /// Follow an identity provider in a background task.
    ///
    /// Each owner change is applied as soon as it is observed. A refresh
    /// still in flight is abandoned when the owner moves on, and its late
    /// response is discarded by the generation check. The task ends when
    /// the provider's channel closes.
    pub fn watch_identity<I>(self: &Arc<Self>, identity: &I) -> JoinHandle<()>
    where
        I: IdentityProvider + ?Sized,
    {
        let controller = Arc::clone(self);
        let mut owners = identity.subscribe();

        tokio::spawn(async move {
            loop {
                let owner = owners.borrow_and_update().clone();
                let current = owner.clone();

                // `set_owner` is polled first so the reset lands before
                // anything else can run.
                tokio::select! {
                    biased;
                    _ = controller.set_owner(owner) => {
                        if owners.changed().await.is_err() {
                            break;
                        }
                    }
                    open = async { owners.wait_for(|next| *next != current).await.is_ok() } => {
                        if !open {
                            break;
                        }
                        debug!("Owner changed during refresh, abandoning it");
                    }
                }
            }
            debug!("Identity channel closed, stopping owner watch");
        })
    }

    /// Fetch the page at the cursor and append it.
    pub async fn load_next_page(&self) -> LoadOutcome {
        self.load(LoadMode::NextPage).await
    }

    /// Clear the list and load page 1 in its place.
    pub async fn refresh(&self) -> LoadOutcome {
        self.load(LoadMode::Refresh).await
    }

    async fn load(&self, mode: LoadMode) -> LoadOutcome {
        let mut request = None;
        self.state.send_if_modified(|state| {
            request = state.begin_load(mode, self.page_size);
            request.is_some()
        });

        let Some(request) = request else {
            debug!(?mode, "Page load skipped");
            return LoadOutcome::Skipped;
        };

        debug!(
            owner_id = %request.owner,
            page = request.page,
            generation = request.generation,
            ?mode,
            "Loading expense page"
        );

        match self
            .store
            .list_by_owner(&request.owner, request.page, request.page_size)
            .await
        {
            Ok(expenses) => self.finish_load(request, expenses),
            Err(e) if e.is_transient() => {
                warn!(
                    owner_id = %request.owner,
                    page = request.page,
                    error = %e,
                    "Expense page unavailable, keeping current list"
                );
                self.fail_load(request)
            }
            Err(e) => {
                error!(
                    owner_id = %request.owner,
                    page = request.page,
                    error = %e,
                    "Failed to load expenses"
                );
                self.fail_load(request)
            }
        }
    }

    fn fail_load(&self, request: PageRequest) -> LoadOutcome {
        if self.dispatch(ListAction::PageFailed { request }) {
            LoadOutcome::Failed
        } else {
            LoadOutcome::Discarded
        }
    }

    fn finish_load(&self, request: PageRequest, expenses: Vec<Expense>) -> LoadOutcome {
        let page = request.page;
        let count = expenses.len();
        let owner_id = request.owner.clone();

        if self.dispatch(ListAction::PageLoaded { request, expenses }) {
            debug!(owner_id = %owner_id, page, count, "Expense page applied");
            LoadOutcome::Loaded { page, count }
        } else {
            warn!(owner_id = %owner_id, page, "Discarding stale expense page");
            LoadOutcome::Discarded
        }
    }

    /// Create an expense for the current owner and put it at the head of
    /// the list.
    ///
    /// Returns the stored record so callers can react to its amount.
    pub async fn create_expense(&self, draft: ExpenseDraft) -> Result<Expense> {
        let owner = self.owner().ok_or(SpendError::MissingOwner)?;

        let created = self
            .store
            .create_expense(draft.into_create(owner.clone()))
            .await?;

        info!(
            owner_id = %owner,
            expense_id = %created.id,
            amount = created.amount,
            "Expense created"
        );

        if !self.dispatch(ListAction::Created {
            owner,
            expense: created.clone(),
        }) {
            warn!(expense_id = %created.id, "Owner changed during create, not added to list");
        }

        Ok(created)
    }

    /// Update an expense and merge the stored record into the list.
    ///
    /// Entries that are not loaded locally are left alone.
    pub async fn update_expense(&self, id: &ExpenseId, changes: UpdateExpense) -> Result<Expense> {
        let owner = self.owner();
        let updated = self.store.update_expense(id, changes).await?;

        info!(expense_id = %id, "Expense updated");

        if let Some(owner) = owner {
            if !self.dispatch(ListAction::Updated {
                owner,
                id: id.clone(),
                expense: updated.clone(),
            }) {
                debug!(expense_id = %id, "Updated expense not in local list");
            }
        }

        Ok(updated)
    }

    /// Delete an expense, then drop it from the list.
    ///
    /// Store failures propagate and leave the list unchanged.
    pub async fn delete_expense(&self, id: &ExpenseId) -> Result<()> {
        let owner = self.owner();
        self.store.delete_expense(id).await?;

        info!(expense_id = %id, "Expense deleted");

        if let Some(owner) = owner {
            if !self.dispatch(ListAction::Deleted {
                owner,
                id: id.clone(),
            }) {
                debug!(expense_id = %id, "Deleted expense not in local list");
            }
        }

        Ok(())
    }

    /// Fetch a single expense straight from the store, bypassing the list.
    pub async fn get_expense_by_id(&self, id: &ExpenseId) -> Result<Expense> {
        self.store.get_expense(id).await
    }

    fn dispatch(&self, action: ListAction) -> bool {
        self.state.send_if_modified(|state| state.apply(action))
    }

    // ===== Snapshots =====

    pub fn snapshot(&self) -> ListState {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<ListState> {
        self.state.subscribe()
    }

    pub fn expenses(&self) -> Vec<Expense> {
        self.state.borrow().expenses.clone()
    }

    pub fn owner(&self) -> Option<UserId> {
        self.state.borrow().owner.clone()
    }

    pub fn has_more(&self) -> bool {
        self.state.borrow().has_more
    }

    pub fn is_loading(&self) -> bool {
        self.state.borrow().loading
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Sum of the loaded amounts
    pub fn total_spent(&self) -> f64 {
        self.state.borrow().total_spent()
    }
}
