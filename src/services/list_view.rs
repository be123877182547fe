//! List view controller: owns the applied filters and current page, keeps the
//! displayed posts in sync with the remote collection and sequences mutations.
//!
//! All state sits in a `RefCell` that is never borrowed across an `.await`, so
//! several controller futures can be polled concurrently on one thread.

use std::cell::RefCell;

use crate::client::errors::ClientResult;
use crate::client::{CatalogReader, PostPage, PostQuery, PostReader, PostWriter};
use crate::domain::filter::{FilterField, FilterModel};
use crate::domain::post::{NewPost, Post, UpdatePost};
use crate::domain::stats::DashboardStats;
use crate::domain::types::PostId;
use crate::dto::list_view::{ListViewSnapshot, LoadStatus};
use crate::models::config::ClientConfig;
use crate::pagination::{
    DEFAULT_ITEMS_PER_PAGE, DEFAULT_WINDOW_SIZE, Paginated, PaginationState,
};
use crate::services::{ServiceError, ServiceResult};

/// Session constants of the list view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewSettings {
    pub page_size: usize,
    pub window_size: usize,
}

impl Default for ViewSettings {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_ITEMS_PER_PAGE,
            window_size: DEFAULT_WINDOW_SIZE,
        }
    }
}

impl From<&ClientConfig> for ViewSettings {
    fn from(config: &ClientConfig) -> Self {
        Self {
            page_size: config.page_size,
            window_size: config.window_size,
        }
    }
}

/// What a call that may reload the list ended up doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The displayed posts were replaced.
    Loaded,
    /// The query was already satisfied or in flight; no request was sent.
    Unchanged,
    /// The response arrived after a newer query was issued and was dropped.
    Stale,
}

/// A list request tagged with the query it was issued for.
#[derive(Debug, Clone)]
struct LoadTicket {
    id: u64,
    query: PostQuery,
    /// Issued to fix an out-of-range page; never triggers another correction.
    corrective: bool,
}

enum Completion {
    Loaded,
    Stale,
    NeedsCorrection,
    Failed(ServiceError),
}

#[derive(Debug)]
struct ViewState {
    filters: FilterModel,
    pagination: PaginationState,
    posts: Vec<Post>,
    total_count: Option<usize>,
    status: LoadStatus,
    /// Query the displayed posts correspond to.
    satisfied: Option<PostQuery>,
    in_flight: Option<LoadTicket>,
    next_ticket: u64,
    submitting: bool,
    stats: Option<DashboardStats>,
    last_mutation_error: Option<ServiceError>,
}

impl ViewState {
    fn new(page_size: usize) -> Self {
        Self {
            filters: FilterModel::new(),
            pagination: PaginationState::new(page_size),
            posts: Vec::new(),
            total_count: None,
            status: LoadStatus::Idle,
            satisfied: None,
            in_flight: None,
            next_ticket: 0,
            submitting: false,
            stats: None,
            last_mutation_error: None,
        }
    }

    fn query(&self) -> PostQuery {
        PostQuery::new(self.filters.applied().clone()).paginate(
            self.pagination.current_page(),
            self.pagination.page_size(),
        )
    }
}

/// Resets the submitting flag when the mutation finishes or is dropped.
struct SubmitGuard<'a> {
    state: &'a RefCell<ViewState>,
}

impl Drop for SubmitGuard<'_> {
    fn drop(&mut self) {
        self.state.borrow_mut().submitting = false;
    }
}

/// Controller behind the posts list.
///
/// Created at session start and dropped at session end. The rendering layer
/// reads [`ListViewController::snapshot`] and forwards user intents to the
/// public methods.
pub struct ListViewController<C> {
    client: C,
    settings: ViewSettings,
    state: RefCell<ViewState>,
}

impl<C> ListViewController<C>
where
    C: PostReader + PostWriter + CatalogReader,
{
    /// Creates an idle controller. Nothing is requested until [`Self::sync`].
    pub fn new(client: C, settings: ViewSettings) -> Self {
        let settings = ViewSettings {
            page_size: settings.page_size.max(1),
            window_size: settings.window_size,
        };
        Self {
            client,
            state: RefCell::new(ViewState::new(settings.page_size)),
            settings,
        }
    }

    /// Borrow the remote client the controller talks to.
    pub fn client(&self) -> &C {
        &self.client
    }

    /// The query that the next reload would issue.
    pub fn query(&self) -> PostQuery {
        self.state.borrow().query()
    }

    /// Copies everything the rendering layer needs out of the current state.
    pub fn snapshot(&self) -> ListViewSnapshot {
        let state = self.state.borrow();
        ListViewSnapshot {
            posts: Paginated::with_window(
                state.posts.clone(),
                state.pagination.current_page(),
                state.pagination.total_pages(),
                self.settings.window_size,
            ),
            total_count: state.total_count,
            draft: state.filters.draft().clone(),
            applied: state.filters.applied().clone(),
            status: state.status.clone(),
            submitting: state.submitting,
            stats: state.stats.clone(),
            last_mutation_error: state.last_mutation_error.clone(),
        }
    }

    /// Edits one draft filter field. Never triggers a request.
    pub fn set_draft_field(&self, field: FilterField, value: &str) -> ServiceResult<()> {
        self.state
            .borrow_mut()
            .filters
            .set_draft_field(field, value)
            .map_err(ServiceError::from)
    }

    /// Loads the list for the current query; used on mount.
    pub async fn sync(&self) -> ServiceResult<LoadOutcome> {
        self.run_load(false).await
    }

    /// Applies the draft filters, returns to page 1 and reloads.
    pub async fn apply_filters(&self) -> ServiceResult<LoadOutcome> {
        {
            let mut state = self.state.borrow_mut();
            let applied = state.filters.apply();
            state.pagination.reset();
            log::debug!("Applied filters {applied:?}");
        }
        self.run_load(false).await
    }

    /// Resets draft and applied filters, returns to page 1 and reloads.
    pub async fn clear_filters(&self) -> ServiceResult<LoadOutcome> {
        {
            let mut state = self.state.borrow_mut();
            state.filters.clear();
            state.pagination.reset();
        }
        self.run_load(false).await
    }

    /// Moves to `page`, clamped into the known page range. Filters are left
    /// untouched.
    pub async fn go_to_page(&self, page: usize) -> ServiceResult<LoadOutcome> {
        let clamped = self.state.borrow_mut().pagination.go_to(page);
        if clamped != page {
            log::debug!("Clamped requested page {page} to {clamped}");
        }
        self.run_load(false).await
    }

    /// Reloads the aggregate statistics. On failure the previous numbers are
    /// kept.
    pub async fn refresh_stats(&self) -> ServiceResult<DashboardStats> {
        let stats = self.client.stats().await.map_err(|err| {
            log::warn!("Failed to load stats: {err}");
            ServiceError::from(err)
        })?;
        self.state.borrow_mut().stats = Some(stats.clone());
        Ok(stats)
    }

    /// Creates a post, then reloads the current page and the stats.
    ///
    /// Fails with [`ServiceError::SubmitInProgress`] while another mutation is pending.
    pub async fn create_post(&self, post: &NewPost) -> ServiceResult<PostId> {
        let _guard = self.begin_submit()?;

        let id = match self.client.create_post(post).await {
            Ok(id) => id,
            Err(err) => return Err(self.mutation_failed("create", err.into())),
        };
        log::info!("Created post {id}");

        self.resync(true).await;
        Ok(id)
    }

    /// Saves changes to a post, then reloads the current page.
    pub async fn update_post(&self, id: PostId, updates: &UpdatePost) -> ServiceResult<()> {
        let _guard = self.begin_submit()?;

        if let Err(err) = self.client.update_post(id, updates).await {
            return Err(self.mutation_failed("update", err.into()));
        }
        log::info!("Updated post {id}");

        self.resync(false).await;
        Ok(())
    }

    /// Deletes a post, then reloads the current page and the stats.
    pub async fn delete_post(&self, id: PostId) -> ServiceResult<()> {
        let _guard = self.begin_submit()?;

        if let Err(err) = self.client.delete_post(id).await {
            return Err(self.mutation_failed("delete", err.into()));
        }
        log::info!("Deleted post {id}");

        self.resync(true).await;
        Ok(())
    }

    fn begin_submit(&self) -> ServiceResult<SubmitGuard<'_>> {
        let mut state = self.state.borrow_mut();
        if state.submitting {
            return Err(ServiceError::SubmitInProgress);
        }
        state.submitting = true;
        state.last_mutation_error = None;
        Ok(SubmitGuard { state: &self.state })
    }

    fn mutation_failed(&self, action: &str, err: ServiceError) -> ServiceError {
        log::error!("Failed to {action} post: {err}");
        self.state.borrow_mut().last_mutation_error = Some(err.clone());
        err
    }

    /// Brings the view back in sync after a successful mutation. Failures
    /// here are reflected in the view state, not in the mutation result.
    async fn resync(&self, with_stats: bool) {
        // The displayed posts predate the mutation.
        self.state.borrow_mut().satisfied = None;
        if let Err(err) = self.run_load(true).await {
            log::error!("Failed to reload posts after mutation: {err}");
        }
        if with_stats {
            // Already logged by `refresh_stats`.
            let _ = self.refresh_stats().await;
        }
    }

    async fn run_load(&self, force: bool) -> ServiceResult<LoadOutcome> {
        let Some(mut ticket) = self.issue(force, false) else {
            return Ok(LoadOutcome::Unchanged);
        };

        // Runs at most twice: corrective tickets never ask for a correction.
        loop {
            let result = self.client.list_posts(&ticket.query).await;
            match self.complete(&ticket, result) {
                Completion::Loaded => return Ok(LoadOutcome::Loaded),
                Completion::Stale => return Ok(LoadOutcome::Stale),
                Completion::Failed(err) => {
                    log::error!("Failed to load posts: {err}");
                    return Err(err);
                }
                Completion::NeedsCorrection => match self.issue(true, true) {
                    Some(corrective) => ticket = corrective,
                    None => return Ok(LoadOutcome::Unchanged),
                },
            }
        }
    }

    /// Registers a new list request for the current query.
    ///
    /// Unless forced, nothing is issued when the query is already in flight
    /// or already displayed; in the latter case a pending request for another
    /// query is abandoned.
    fn issue(&self, force: bool, corrective: bool) -> Option<LoadTicket> {
        let mut state = self.state.borrow_mut();
        let query = state.query();

        if !force {
            if state
                .in_flight
                .as_ref()
                .is_some_and(|ticket| ticket.query == query)
            {
                return None;
            }
            if state.satisfied.as_ref() == Some(&query) {
                if let Some(abandoned) = state.in_flight.take() {
                    log::debug!("Abandoning load #{}", abandoned.id);
                    state.status = LoadStatus::Loaded;
                }
                return None;
            }
        }

        state.next_ticket += 1;
        let ticket = LoadTicket {
            id: state.next_ticket,
            query,
            corrective,
        };
        log::debug!(
            "Issuing load #{} for page {}",
            ticket.id,
            ticket.query.page
        );
        state.in_flight = Some(ticket.clone());
        state.status = LoadStatus::Loading;
        Some(ticket)
    }

    /// Applies a list response unless a newer request superseded it.
    fn complete(&self, ticket: &LoadTicket, result: ClientResult<PostPage>) -> Completion {
        let mut state = self.state.borrow_mut();

        if state.in_flight.as_ref().map(|t| t.id) != Some(ticket.id) {
            log::debug!("Discarding stale response of load #{}", ticket.id);
            return Completion::Stale;
        }
        state.in_flight = None;

        match result {
            Ok(page) => {
                let clamped = state.pagination.set_total_pages(page.total_pages);
                state.posts = page.items;
                state.total_count = page.total_count;

                if clamped && !ticket.corrective {
                    log::debug!(
                        "Page {} is past the last page, reloading page {}",
                        ticket.query.page,
                        state.pagination.current_page()
                    );
                    state.satisfied = None;
                    return Completion::NeedsCorrection;
                }

                // A correction that clamped again shows the posts of a page
                // other than the current one; the next sync reloads it.
                state.satisfied = (!clamped).then(|| ticket.query.clone());
                state.status = LoadStatus::Loaded;
                Completion::Loaded
            }
            Err(err) => {
                let err = ServiceError::from(err);
                state.posts.clear();
                state.total_count = None;
                state.satisfied = None;
                state.status = LoadStatus::Failed(err.clone());
                Completion::Failed(err)
            }
        }
    }
}
