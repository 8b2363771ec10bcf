//! Two-phase loader for the repository detail screen.
//!
//! Repository metadata is fetched first; once it is shown the README is
//! fetched on its own, so a broken README never hides the metadata and a
//! README retry never refetches it.

use crate::github::RepositoryGateway;
use crate::models::{RepoDetails, RepoTarget};
use crate::state::{ReadmeState, ViewState};
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

pub struct RepoDetailsViewModel {
    gateway: Arc<dyn RepositoryGateway>,
    target: RepoTarget,
    state: watch::Sender<ViewState>,
    readme_failed: bool,
}

impl RepoDetailsViewModel {
    /// Starts in [`ViewState::Loading`] without touching the network.
    pub fn new(gateway: Arc<dyn RepositoryGateway>, target: RepoTarget) -> Self {
        let (state, _) = watch::channel(ViewState::Loading);
        Self {
            gateway,
            target,
            state,
            readme_failed: false,
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<ViewState> {
        self.state.subscribe()
    }

    pub fn state(&self) -> ViewState {
        self.state.borrow().clone()
    }

    pub fn target(&self) -> &RepoTarget {
        &self.target
    }

    /// Load whatever is missing: only the README after a README failure,
    /// the full sequence otherwise.
    pub async fn load(&mut self) -> ViewState {
        if self.readme_failed {
            let repo = self.state.borrow().repo().cloned();
            if let Some(repo) = repo {
                self.load_readme(&repo).await;
                return self.state();
            }
        }
        self.load_details().await;
        self.state()
    }

    pub async fn retry(&mut self) -> ViewState {
        self.load().await
    }

    /// Always refetch the metadata, even if only the README failed.
    pub async fn reload(&mut self) -> ViewState {
        self.readme_failed = false;
        self.load_details().await;
        self.state()
    }

    async fn load_details(&mut self) {
        self.publish(ViewState::Loading);

        let result = self.gateway.get_repository(&self.target.id).await;
        if let Err(e) = &result {
            warn!(repo_id = %self.target.id, error = %e, "Failed to load repository");
        }

        let state = ViewState::from_details(result);
        let repo = state.repo().cloned();
        self.publish(state);

        if let Some(repo) = repo {
            self.load_readme(&repo).await;
        }
    }

    async fn load_readme(&mut self, repo: &RepoDetails) {
        self.readme_failed = false;
        self.update_readme(ReadmeState::Loading);

        let result = self
            .gateway
            .get_repository_readme(&self.target.owner, &self.target.name, &repo.branch)
            .await;
        if let Err(e) = &result {
            debug!(
                owner = %self.target.owner,
                repo = %self.target.name,
                branch = %repo.branch,
                error = %e,
                "README unavailable"
            );
        }

        let readme = ReadmeState::from_readme(result);
        self.readme_failed = readme.is_error();
        self.update_readme(readme);
    }

    fn update_readme(&self, readme: ReadmeState) {
        let next = self.state().with_readme(readme);
        self.publish(next);
    }

    fn publish(&self, state: ViewState) {
        self.state.send_replace(state);
    }

    /// Run the view-model on its own task, starting with the initial load.
    ///
    /// The task lives as long as the returned handle.
    pub fn spawn(gateway: Arc<dyn RepositoryGateway>, target: RepoTarget) -> ViewModelHandle {
        let mut view_model = Self::new(gateway, target);
        let state = view_model.subscribe();
        let (commands, mut inbox) = mpsc::unbounded_channel::<Command>();

        let task = tokio::spawn(async move {
            view_model.load().await;
            while let Some(command) = inbox.recv().await {
                let (state, reply) = match command {
                    Command::Retry(reply) => (view_model.retry().await, reply),
                    Command::Reload(reply) => (view_model.reload().await, reply),
                };
                let _ = reply.send(state);
            }
        });

        ViewModelHandle {
            commands,
            state,
            task,
        }
    }
}

enum Command {
    Retry(oneshot::Sender<ViewState>),
    Reload(oneshot::Sender<ViewState>),
}

/// Owner-side end of a spawned [`RepoDetailsViewModel`].
///
/// Dropping the handle cancels any fetch in flight.
pub struct ViewModelHandle {
    commands: mpsc::UnboundedSender<Command>,
    state: watch::Receiver<ViewState>,
    task: JoinHandle<()>,
}

impl ViewModelHandle {
    pub fn subscribe(&self) -> watch::Receiver<ViewState> {
        self.state.clone()
    }

    pub fn state(&self) -> ViewState {
        self.state.borrow().clone()
    }

    /// Wait until the current load has finished.
    ///
    /// Returns `None` if the task is gone.
    pub async fn settled(&mut self) -> Option<ViewState> {
        self.state
            .wait_for(ViewState::is_settled)
            .await
            .ok()
            .map(|state| state.clone())
    }

    /// Returns the state reached by the retry, or `None` if the task is gone.
    pub async fn retry(&self) -> Option<ViewState> {
        self.send(Command::Retry).await
    }

    pub async fn reload(&self) -> Option<ViewState> {
        self.send(Command::Reload).await
    }

    async fn send(&self, command: fn(oneshot::Sender<ViewState>) -> Command) -> Option<ViewState> {
        let (reply, response) = oneshot::channel();
        self.commands.send(command(reply)).ok()?;
        response.await.ok()
    }
}

impl Drop for ViewModelHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}
