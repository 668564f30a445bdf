use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use tracing::{debug, warn};

use gridwire_core::{TableError, TableResult};
use gridwire_domain::{ErrorHandlerAction, ErrorHandlerRule, TableConfig};

use crate::action_ports::{Navigator, NotificationLevel, Notifier};
use crate::data_ports::TableDataSource;
use crate::dynamic_params::DynamicParams;
use crate::request::build_request;
use crate::response_mapper::{NormalizedPage, apply_mapping};

/// Reaction resolved from the configured error handlers for one status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorDisposition {
    /// Surface the message to the user.
    Alert(String),
    /// Navigate to the URL.
    Redirect(String),
    /// Log only, nothing user-visible.
    Log(String),
}

/// Resolves the configured reaction for a response status.
///
/// The first matching handler wins; an unmatched status resolves to the
/// generic log-only notice.
#[must_use]
pub fn resolve_error_disposition(
    handlers: &[ErrorHandlerRule],
    status: u16,
) -> ErrorDisposition {
    for handler in handlers {
        if !handler.matches(status) {
            continue;
        }

        return match handler.action {
            ErrorHandlerAction::Alert => ErrorDisposition::Alert(handler.message.clone()),
            ErrorHandlerAction::Redirect => match handler.redirect_url.as_deref() {
                Some(url) if !url.trim().is_empty() => {
                    ErrorDisposition::Redirect(url.trim().to_owned())
                }
                _ => ErrorDisposition::Log(format!(
                    "redirect handler for status {status} has no redirectUrl"
                )),
            },
            ErrorHandlerAction::Log => ErrorDisposition::Log(handler.message.clone()),
        };
    }

    ErrorDisposition::Log(format!("no error handler configured for status {status}"))
}

/// Result of a degrading page load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageLoad {
    /// The freshest load; errors already degraded to an empty page.
    Loaded(NormalizedPage),
    /// A newer load was started before this one resolved; discard it.
    Superseded,
}

/// Orchestrates table page loads: request construction, transport, response
/// mapping, and configured error handling.
pub struct TableDataService {
    data_source: Arc<dyn TableDataSource>,
    notifier: Option<Arc<dyn Notifier>>,
    navigator: Option<Arc<dyn Navigator>>,
    sequence: AtomicU64,
}

impl TableDataService {
    /// Creates a service around a data source.
    #[must_use]
    pub fn new(data_source: Arc<dyn TableDataSource>) -> Self {
        Self {
            data_source,
            notifier: None,
            navigator: None,
            sequence: AtomicU64::new(0),
        }
    }

    /// Attaches the user notification port.
    #[must_use]
    pub fn with_notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = Some(notifier);
        self
    }

    /// Attaches the navigation port used by redirect error handlers.
    #[must_use]
    pub fn with_navigator(mut self, navigator: Arc<dyn Navigator>) -> Self {
        self.navigator = Some(navigator);
        self
    }

    /// Fetches one page, propagating every error to the caller.
    pub async fn fetch_page(
        &self,
        config: &TableConfig,
        dynamic: &DynamicParams,
        page: u64,
        page_size: u64,
    ) -> TableResult<NormalizedPage> {
        let request = build_request(config, dynamic.values(), page, page_size)?;
        let body = self.data_source.fetch(request).await?;
        Ok(apply_mapping(&body, &config.mapping))
    }

    /// Fetches one page with full degradation: errors run through the
    /// configured handlers and yield an empty page, and a load that is no
    /// longer the newest reports [`PageLoad::Superseded`] instead of
    /// surfacing stale data.
    pub async fn load_page(
        &self,
        config: &TableConfig,
        dynamic: &DynamicParams,
        page: u64,
        page_size: u64,
    ) -> PageLoad {
        let ticket = self.sequence.fetch_add(1, Ordering::SeqCst) + 1;
        let result = self.fetch_page(config, dynamic, page, page_size).await;

        if self.sequence.load(Ordering::SeqCst) != ticket {
            debug!(page = page, "page load superseded by a newer request");
            return PageLoad::Superseded;
        }

        match result {
            Ok(loaded) => PageLoad::Loaded(loaded),
            Err(error) => {
                self.handle_error(config, &error);
                PageLoad::Loaded(NormalizedPage::empty())
            }
        }
    }

    fn handle_error(&self, config: &TableConfig, error: &TableError) {
        match error.http_status() {
            Some(status) => match resolve_error_disposition(&config.error_handlers, status) {
                ErrorDisposition::Alert(message) => self.notify(NotificationLevel::Error, &message),
                ErrorDisposition::Redirect(url) => match &self.navigator {
                    Some(navigator) => {
                        if let Err(error) = navigator.navigate(url.as_str()) {
                            warn!(url = url.as_str(), error = %error, "error redirect failed");
                        }
                    }
                    None => warn!(
                        url = url.as_str(),
                        "redirect error handler fired but no navigator is attached"
                    ),
                },
                ErrorDisposition::Log(message) => {
                    warn!(status = status, message = message.as_str(), "data load failed");
                }
            },
            None => {
                let guidance = match error {
                    TableError::Timeout(_) => "the API did not answer in time",
                    TableError::Network(_) => "the API is unreachable",
                    TableError::Config(_) => "the table configuration is incomplete",
                    _ => "the data load failed",
                };
                self.notify(NotificationLevel::Error, format!("{guidance}: {error}").as_str());
            }
        }
    }

    fn notify(&self, level: NotificationLevel, message: &str) {
        match &self.notifier {
            Some(notifier) => notifier.notify(level, message),
            None => warn!(message = message, "no notifier attached"),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use serde_json::{Value, json};
    use tokio::sync::{Mutex, Notify};

    use gridwire_core::{TableError, TableResult};
    use gridwire_domain::{
        ApiConnectionConfig, ErrorHandlerAction, ErrorHandlerRule, ResponseMapping, TableConfig,
    };

    use super::{ErrorDisposition, PageLoad, TableDataService, resolve_error_disposition};
    use crate::action_ports::{Navigator, NotificationLevel, Notifier};
    use crate::data_ports::TableDataSource;
    use crate::dynamic_params::DynamicParams;
    use crate::request::RequestDescriptor;
    use crate::response_mapper::NormalizedPage;

    struct StubSource {
        response: TableResult<Value>,
    }

    #[async_trait]
    impl TableDataSource for StubSource {
        async fn fetch(&self, _request: RequestDescriptor) -> TableResult<Value> {
            match &self.response {
                Ok(body) => Ok(body.clone()),
                Err(TableError::HttpStatus { status, body }) => Err(TableError::HttpStatus {
                    status: *status,
                    body: body.clone(),
                }),
                Err(other) => Err(TableError::Internal(other.to_string())),
            }
        }
    }

    #[derive(Default)]
    struct FakeNotifier {
        messages: Mutex<Vec<(NotificationLevel, String)>>,
    }

    impl Notifier for FakeNotifier {
        fn notify(&self, level: NotificationLevel, message: &str) {
            if let Ok(mut messages) = self.messages.try_lock() {
                messages.push((level, message.to_owned()));
            }
        }
    }

    #[derive(Default)]
    struct FakeNavigator {
        urls: Mutex<Vec<String>>,
    }

    impl Navigator for FakeNavigator {
        fn navigate(&self, url: &str) -> TableResult<()> {
            if let Ok(mut urls) = self.urls.try_lock() {
                urls.push(url.to_owned());
            }
            Ok(())
        }
    }

    fn config_with_handlers(handlers: Vec<ErrorHandlerRule>) -> TableConfig {
        TableConfig {
            api: ApiConnectionConfig {
                base_url: "https://api.x.com".to_owned(),
                path: "/users".to_owned(),
                ..ApiConnectionConfig::default()
            },
            mapping: ResponseMapping::new("data", "", "", "totalCount"),
            error_handlers: handlers,
            ..TableConfig::default()
        }
    }

    #[tokio::test]
    async fn fetch_page_maps_the_response_body() {
        let source = Arc::new(StubSource {
            response: Ok(json!({"data": [{"id": 1}], "totalCount": 1})),
        });
        let service = TableDataService::new(source);

        let page = service
            .fetch_page(&config_with_handlers(Vec::new()), &DynamicParams::new(), 1, 10)
            .await;
        assert_eq!(
            page.ok(),
            Some(NormalizedPage {
                data: vec![json!({"id": 1})],
                page: 1,
                total_pages: 1,
                total: 1,
            })
        );
    }

    #[tokio::test]
    async fn log_handler_stays_silent_towards_the_user() {
        let source = Arc::new(StubSource {
            response: Err(TableError::HttpStatus {
                status: 404,
                body: String::new(),
            }),
        });
        let notifier = Arc::new(FakeNotifier::default());
        let navigator = Arc::new(FakeNavigator::default());
        let service = TableDataService::new(source)
            .with_notifier(notifier.clone())
            .with_navigator(navigator.clone());

        let config = config_with_handlers(vec![ErrorHandlerRule {
            status: "404".to_owned(),
            message: "Not found".to_owned(),
            action: ErrorHandlerAction::Log,
            redirect_url: None,
        }]);

        let load = service.load_page(&config, &DynamicParams::new(), 1, 10).await;
        assert_eq!(load, PageLoad::Loaded(NormalizedPage::empty()));
        assert!(notifier.messages.lock().await.is_empty());
        assert!(navigator.urls.lock().await.is_empty());
    }

    #[tokio::test]
    async fn alert_handler_notifies_the_user() {
        let source = Arc::new(StubSource {
            response: Err(TableError::HttpStatus {
                status: 500,
                body: String::new(),
            }),
        });
        let notifier = Arc::new(FakeNotifier::default());
        let service = TableDataService::new(source).with_notifier(notifier.clone());

        let config = config_with_handlers(vec![ErrorHandlerRule {
            status: "500".to_owned(),
            message: "Server exploded".to_owned(),
            action: ErrorHandlerAction::Alert,
            redirect_url: None,
        }]);

        let load = service.load_page(&config, &DynamicParams::new(), 1, 10).await;
        assert_eq!(load, PageLoad::Loaded(NormalizedPage::empty()));

        let messages = notifier.messages.lock().await;
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].1, "Server exploded");
    }

    #[tokio::test]
    async fn redirect_handler_navigates() {
        let source = Arc::new(StubSource {
            response: Err(TableError::HttpStatus {
                status: 401,
                body: String::new(),
            }),
        });
        let navigator = Arc::new(FakeNavigator::default());
        let service = TableDataService::new(source).with_navigator(navigator.clone());

        let config = config_with_handlers(vec![ErrorHandlerRule {
            status: "401".to_owned(),
            message: "Session expired".to_owned(),
            action: ErrorHandlerAction::Redirect,
            redirect_url: Some("/login".to_owned()),
        }]);

        let load = service.load_page(&config, &DynamicParams::new(), 1, 10).await;
        assert_eq!(load, PageLoad::Loaded(NormalizedPage::empty()));
        assert_eq!(*navigator.urls.lock().await, vec!["/login".to_owned()]);
    }

    #[tokio::test]
    async fn timeout_reports_distinct_guidance() {
        struct TimeoutSource;

        #[async_trait]
        impl TableDataSource for TimeoutSource {
            async fn fetch(&self, _request: RequestDescriptor) -> TableResult<Value> {
                Err(TableError::Timeout("deadline of 30s exceeded".to_owned()))
            }
        }

        let notifier = Arc::new(FakeNotifier::default());
        let service = TableDataService::new(Arc::new(TimeoutSource)).with_notifier(notifier.clone());

        let load = service
            .load_page(&config_with_handlers(Vec::new()), &DynamicParams::new(), 1, 10)
            .await;
        assert_eq!(load, PageLoad::Loaded(NormalizedPage::empty()));

        let messages = notifier.messages.lock().await;
        assert_eq!(messages.len(), 1);
        assert!(messages[0].1.contains("did not answer in time"));
    }

    #[tokio::test]
    async fn unmatched_status_resolves_to_generic_log() {
        let disposition = resolve_error_disposition(&[], 418);
        assert_eq!(
            disposition,
            ErrorDisposition::Log("no error handler configured for status 418".to_owned())
        );
    }

    struct StaggeredSource {
        calls: AtomicUsize,
        release_first: Notify,
    }

    #[async_trait]
    impl TableDataSource for StaggeredSource {
        async fn fetch(&self, _request: RequestDescriptor) -> TableResult<Value> {
            if self.calls.fetch_add(1, Ordering::SeqCst) == 0 {
                self.release_first.notified().await;
                Ok(json!({"data": [{"stale": true}]}))
            } else {
                Ok(json!({"data": [{"fresh": true}]}))
            }
        }
    }

    #[tokio::test]
    async fn slower_older_load_is_superseded() {
        let source = Arc::new(StaggeredSource {
            calls: AtomicUsize::new(0),
            release_first: Notify::new(),
        });
        let service = Arc::new(TableDataService::new(source.clone()));
        let config = config_with_handlers(Vec::new());

        let first = {
            let service = service.clone();
            let config = config.clone();
            tokio::spawn(async move {
                service.load_page(&config, &DynamicParams::new(), 1, 10).await
            })
        };

        while source.calls.load(Ordering::SeqCst) == 0 {
            tokio::task::yield_now().await;
        }

        let second = service.load_page(&config, &DynamicParams::new(), 2, 10).await;
        let PageLoad::Loaded(fresh) = second else {
            panic!("second load should win");
        };
        assert_eq!(fresh.data, vec![json!({"fresh": true})]);

        source.release_first.notify_one();
        let first = first.await.unwrap_or(PageLoad::Superseded);
        assert_eq!(first, PageLoad::Superseded);
    }
}
