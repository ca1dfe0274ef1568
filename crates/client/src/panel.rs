//! Status page: issues both queries on init and holds what the page shows.

use std::sync::Arc;

use chrono::{DateTime, FixedOffset, Local, Utc};
use tokio::sync::RwLock;
use tokio::task::JoinHandle;

use crate::services::StatusApi;
use crate::state::QueryState;

/// Page title.
pub const TITLE: &str = "PDV Mercado";

/// Status message shown while the status query is pending.
pub const STATUS_CHECKING: &str = "Verificando...";

/// Status message shown when the status query fails.
pub const STATUS_ERROR: &str = "Erro ao conectar com a API";

/// Environment shown when the environment query fails.
pub const ENVIRONMENT_UNKNOWN: &str = "Desconhecido";

/// Presentation format for the status timestamp.
pub const TIMESTAMP_FORMAT: &str = "%d/%m/%Y, %H:%M:%S";

/// Everything the status page displays.
///
/// The status query owns `status_message`, `status_timestamp` and
/// `status_query`; the environment query owns `environment` and
/// `environment_query`. Neither writes the other's fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayState {
    pub title: String,
    pub status_message: String,
    pub status_timestamp: String,
    pub environment: String,
    pub status_query: QueryState,
    pub environment_query: QueryState,
}

impl Default for DisplayState {
    fn default() -> Self {
        Self {
            title: TITLE.to_string(),
            status_message: STATUS_CHECKING.to_string(),
            status_timestamp: String::new(),
            environment: String::new(),
            status_query: QueryState::Pending,
            environment_query: QueryState::Pending,
        }
    }
}

impl std::fmt::Display for DisplayState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{}", self.title)?;
        writeln!(f, "  API status:  {}", self.status_message)?;
        if !self.status_timestamp.is_empty() {
            writeln!(f, "  Checked at:  {}", self.status_timestamp)?;
        }
        write!(f, "  Environment: {}", self.environment)
    }
}

/// Handles to the two queries spawned by [`StatusPanel::init`].
#[derive(Debug)]
pub struct PanelTasks {
    status: JoinHandle<()>,
    environment: JoinHandle<()>,
}

impl PanelTasks {
    /// Waits until both queries have settled.
    ///
    /// The queries already run independently; this only lets a caller
    /// observe the final display state.
    pub async fn settled(self) {
        for (query, handle) in [("status", self.status), ("environment", self.environment)] {
            if let Err(err) = handle.await {
                tracing::error!(query, error = %err, "status page query task aborted");
            }
        }
    }
}

/// Status page backed by a [`StatusApi`].
///
/// Cloning is cheap; clones share the same display state.
pub struct StatusPanel<A> {
    api: Arc<A>,
    display: Arc<RwLock<DisplayState>>,
    utc_offset: Option<FixedOffset>,
}

impl<A> Clone for StatusPanel<A> {
    fn clone(&self) -> Self {
        Self {
            api: Arc::clone(&self.api),
            display: Arc::clone(&self.display),
            utc_offset: self.utc_offset,
        }
    }
}

impl<A: StatusApi + 'static> StatusPanel<A> {
    /// Creates a panel in its initial state; no request is issued yet.
    pub fn new(api: A) -> Self {
        Self {
            api: Arc::new(api),
            display: Arc::new(RwLock::new(DisplayState::default())),
            utc_offset: None,
        }
    }

    /// Renders timestamps in a fixed UTC offset instead of the local timezone.
    pub fn with_utc_offset(mut self, offset: FixedOffset) -> Self {
        self.utc_offset = Some(offset);
        self
    }

    /// Issues the status and environment queries as independent tasks.
    ///
    /// Returns immediately. Completions may arrive in any order and each
    /// updates only its own part of the display state.
    pub fn init(&self) -> PanelTasks {
        let status_panel = self.clone();
        let environment_panel = self.clone();

        PanelTasks {
            status: tokio::spawn(async move { status_panel.check_status().await }),
            environment: tokio::spawn(async move { environment_panel.check_environment().await }),
        }
    }

    /// Runs the status query to completion and records its outcome.
    #[tracing::instrument(skip(self))]
    pub async fn check_status(&self) {
        let outcome = self.api.fetch_status().await;

        let mut display = self.display.write().await;
        match outcome {
            Ok(reply) => {
                if display.status_query.settle(QueryState::Succeeded) {
                    display.status_timestamp = self.render_timestamp(reply.timestamp);
                    display.status_message = reply.message;
                }
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to check API status");
                if display.status_query.settle(QueryState::Failed) {
                    display.status_message = STATUS_ERROR.to_string();
                }
            }
        }
    }

    /// Runs the environment query to completion and records its outcome.
    #[tracing::instrument(skip(self))]
    pub async fn check_environment(&self) {
        let outcome = self.api.fetch_environment().await;

        let mut display = self.display.write().await;
        match outcome {
            Ok(reply) => {
                if display.environment_query.settle(QueryState::Succeeded) {
                    display.environment = reply.environment;
                }
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to check API environment");
                if display.environment_query.settle(QueryState::Failed) {
                    display.environment = ENVIRONMENT_UNKNOWN.to_string();
                }
            }
        }
    }

    /// Returns a copy of the current display state.
    pub async fn snapshot(&self) -> DisplayState {
        self.display.read().await.clone()
    }

    /// Formats `timestamp` for display in the panel's timezone.
    pub fn render_timestamp(&self, timestamp: DateTime<Utc>) -> String {
        match self.utc_offset {
            Some(offset) => timestamp
                .with_timezone(&offset)
                .format(TIMESTAMP_FORMAT)
                .to_string(),
            None => timestamp
                .with_timezone(&Local)
                .format(TIMESTAMP_FORMAT)
                .to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use chrono::TimeZone;
    use common::{EnvironmentReply, StatusReply};
    use tracing::field::{Field, Visit};
    use tracing::{Event, Level, Subscriber};
    use tracing_subscriber::layer::{Context, Layer, SubscriberExt};

    use super::*;
    use crate::services::{InMemoryStatusApi, Stubbed};

    /// Records the level and message of every event emitted on this thread.
    #[derive(Clone, Default)]
    struct CapturedEvents(Arc<Mutex<Vec<(Level, String)>>>);

    impl CapturedEvents {
        fn messages_at(&self, level: Level) -> Vec<String> {
            self.0
                .lock()
                .unwrap()
                .iter()
                .filter(|(l, _)| *l == level)
                .map(|(_, m)| m.clone())
                .collect()
        }
    }

    struct MessageVisitor(String);

    impl Visit for MessageVisitor {
        fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
            if field.name() == "message" {
                self.0 = format!("{value:?}");
            }
        }
    }

    impl<S: Subscriber> Layer<S> for CapturedEvents {
        fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
            let mut visitor = MessageVisitor(String::new());
            event.record(&mut visitor);
            self.0
                .lock()
                .unwrap()
                .push((*event.metadata().level(), visitor.0));
        }
    }

    fn new_year() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
    }

    fn panel_for(api: &InMemoryStatusApi) -> StatusPanel<InMemoryStatusApi> {
        StatusPanel::new(api.clone()).with_utc_offset(FixedOffset::east_opt(0).unwrap())
    }

    #[tokio::test]
    async fn test_initial_display_state() {
        let panel = panel_for(&InMemoryStatusApi::new());
        let display = panel.snapshot().await;

        assert_eq!(display.title, "PDV Mercado");
        assert_eq!(display.status_message, "Verificando...");
        assert_eq!(display.status_timestamp, "");
        assert_eq!(display.environment, "");
        assert_eq!(display.status_query, QueryState::Pending);
        assert_eq!(display.environment_query, QueryState::Pending);
    }

    #[tokio::test]
    async fn test_status_success_sets_message_and_timestamp() {
        let api = InMemoryStatusApi::new();
        api.set_status(Stubbed::Reply(StatusReply::at(new_year())));
        let panel = panel_for(&api);

        panel.check_status().await;
        let display = panel.snapshot().await;

        assert_eq!(display.status_message, "API is working!");
        assert_eq!(display.status_timestamp, "01/01/2024, 00:00:00");
        assert_eq!(display.status_query, QueryState::Succeeded);
    }

    #[tokio::test]
    async fn test_status_failure_sets_error_string() {
        let api = InMemoryStatusApi::new();
        api.set_status(Stubbed::Unreachable);
        let panel = panel_for(&api);

        panel.check_status().await;
        let display = panel.snapshot().await;

        assert_eq!(display.status_message, "Erro ao conectar com a API");
        assert_eq!(display.status_timestamp, "");
        assert_eq!(display.status_query, QueryState::Failed);
    }

    #[tokio::test]
    async fn test_malformed_status_body_counts_as_failure() {
        let api = InMemoryStatusApi::new();
        api.set_status(Stubbed::Malformed);
        let panel = panel_for(&api);

        panel.check_status().await;
        let display = panel.snapshot().await;

        assert_eq!(display.status_message, "Erro ao conectar com a API");
        assert_eq!(display.status_query, QueryState::Failed);
    }

    #[tokio::test]
    async fn test_environment_success() {
        let api = InMemoryStatusApi::new();
        api.set_environment(Stubbed::Reply(EnvironmentReply::from_value(Some(
            "Production".to_string(),
        ))));
        let panel = panel_for(&api);

        panel.check_environment().await;
        let display = panel.snapshot().await;

        assert_eq!(display.environment, "Production");
        assert_eq!(display.environment_query, QueryState::Succeeded);
    }

    #[tokio::test]
    async fn test_environment_non_2xx_sets_unknown() {
        let api = InMemoryStatusApi::new();
        api.set_environment(Stubbed::Status(500));
        let panel = panel_for(&api);

        panel.check_environment().await;
        let display = panel.snapshot().await;

        assert_eq!(display.environment, "Desconhecido");
        assert_eq!(display.environment_query, QueryState::Failed);
    }

    #[tokio::test]
    async fn test_one_failure_does_not_affect_the_other() {
        let api = InMemoryStatusApi::new();
        api.set_status(Stubbed::Unreachable);
        api.set_environment(Stubbed::Reply(EnvironmentReply::from_value(Some(
            "Production".to_string(),
        ))));
        let panel = panel_for(&api);

        panel.init().settled().await;
        let display = panel.snapshot().await;

        assert_eq!(display.status_message, "Erro ao conectar com a API");
        assert_eq!(display.status_query, QueryState::Failed);
        assert_eq!(display.environment, "Production");
        assert_eq!(display.environment_query, QueryState::Succeeded);
    }

    #[tokio::test]
    async fn test_init_issues_each_query_once() {
        let api = InMemoryStatusApi::new();
        let panel = panel_for(&api);

        panel.init().settled().await;

        assert_eq!(api.status_calls(), 1);
        assert_eq!(api.environment_calls(), 1);
    }

    #[tokio::test]
    async fn test_slow_status_does_not_block_environment() {
        let api = InMemoryStatusApi::new();
        api.set_status_delay(std::time::Duration::from_secs(30));
        let panel = panel_for(&api);

        let _tasks = panel.init();

        let settled = tokio::time::timeout(std::time::Duration::from_secs(5), async {
            loop {
                if panel.snapshot().await.environment_query.is_terminal() {
                    break;
                }
                tokio::time::sleep(std::time::Duration::from_millis(5)).await;
            }
        })
        .await;

        assert!(settled.is_ok(), "environment query never settled");
        let display = panel.snapshot().await;
        assert_eq!(display.environment, "Development");
        assert_eq!(display.status_query, QueryState::Pending);
        assert_eq!(display.status_message, "Verificando...");
    }

    #[tokio::test]
    async fn test_slow_environment_does_not_block_status() {
        let api = InMemoryStatusApi::new();
        api.set_status(Stubbed::Reply(StatusReply::at(new_year())));
        api.set_environment_delay(std::time::Duration::from_secs(30));
        let panel = panel_for(&api);

        let _tasks = panel.init();

        let settled = tokio::time::timeout(std::time::Duration::from_secs(5), async {
            loop {
                if panel.snapshot().await.status_query.is_terminal() {
                    break;
                }
                tokio::time::sleep(std::time::Duration::from_millis(5)).await;
            }
        })
        .await;

        assert!(settled.is_ok(), "status query never settled");
        let display = panel.snapshot().await;
        assert_eq!(display.status_message, "API is working!");
        assert_eq!(display.status_timestamp, "01/01/2024, 00:00:00");
        assert_eq!(display.environment_query, QueryState::Pending);
        assert_eq!(display.environment, "");
    }

    #[tokio::test]
    async fn test_status_failure_is_logged_once() {
        let events = CapturedEvents::default();
        let _guard =
            tracing::subscriber::set_default(tracing_subscriber::registry().with(events.clone()));

        let api = InMemoryStatusApi::new();
        api.set_status(Stubbed::Unreachable);
        panel_for(&api).check_status().await;

        assert_eq!(
            events.messages_at(Level::ERROR),
            vec!["failed to check API status".to_string()]
        );
    }

    #[tokio::test]
    async fn test_environment_failure_is_logged_once() {
        let events = CapturedEvents::default();
        let _guard =
            tracing::subscriber::set_default(tracing_subscriber::registry().with(events.clone()));

        let api = InMemoryStatusApi::new();
        api.set_environment(Stubbed::Status(503));
        panel_for(&api).check_environment().await;

        assert_eq!(
            events.messages_at(Level::ERROR),
            vec!["failed to check API environment".to_string()]
        );
    }

    #[tokio::test]
    async fn test_successful_queries_log_no_errors() {
        let events = CapturedEvents::default();
        let _guard =
            tracing::subscriber::set_default(tracing_subscriber::registry().with(events.clone()));

        let panel = panel_for(&InMemoryStatusApi::new());
        panel.check_status().await;
        panel.check_environment().await;

        assert!(events.messages_at(Level::ERROR).is_empty());
    }

    #[tokio::test]
    async fn test_settled_query_is_not_overwritten() {
        let api = InMemoryStatusApi::new();
        api.set_status(Stubbed::Reply(StatusReply::at(new_year())));
        let panel = panel_for(&api);

        panel.check_status().await;
        api.set_status(Stubbed::Unreachable);
        panel.check_status().await;

        let display = panel.snapshot().await;
        assert_eq!(display.status_message, "API is working!");
        assert_eq!(display.status_query, QueryState::Succeeded);
    }

    #[test]
    fn test_render_timestamp_in_fixed_offset() {
        let panel = StatusPanel::new(InMemoryStatusApi::new())
            .with_utc_offset(FixedOffset::west_opt(3 * 3600).unwrap());
        assert_eq!(panel.render_timestamp(new_year()), "31/12/2023, 21:00:00");
    }

    #[test]
    fn test_render_timestamp_defaults_to_local_timezone() {
        let panel = StatusPanel::new(InMemoryStatusApi::new());
        let expected = new_year()
            .with_timezone(&Local)
            .format(TIMESTAMP_FORMAT)
            .to_string();
        assert_eq!(panel.render_timestamp(new_year()), expected);
    }

    #[test]
    fn test_display_rendering() {
        let display = DisplayState {
            status_message: "API is working!".to_string(),
            status_timestamp: "01/01/2024, 00:00:00".to_string(),
            environment: "Production".to_string(),
            status_query: QueryState::Succeeded,
            environment_query: QueryState::Succeeded,
            ..DisplayState::default()
        };

        assert_eq!(
            display.to_string(),
            "PDV Mercado\n  API status:  API is working!\n  Checked at:  01/01/2024, 00:00:00\n  Environment: Production"
        );
    }
}
