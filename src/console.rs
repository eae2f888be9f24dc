//! The query console: one query, one result, at most one request in flight.

pub mod body;
pub mod error;
pub mod notify;
pub mod transport;

pub use body::ResponseBody;
pub use error::{Error, TransportError};
use itertools::Itertools;
pub use notify::{Level, Notification, Notifier, StderrNotifier};
use parking_lot::Mutex;
use reqwest::{StatusCode, Url};
pub use transport::{HttpTransport, Reply, Transport};

pub const IDLE_LABEL: &str = "Run SQL";
pub const RUNNING_LABEL: &str = "Running...";

const ERROR_MARKER: &str = "Error: ";

/// The state the console shows to the user.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ConsoleState {
    pub query: String,
    pub result: String,
    pub in_flight: bool,
}

/// A completed submission.
#[derive(Clone, Debug, PartialEq)]
pub struct Execution {
    pub status: StatusCode,
    pub body: ResponseBody,
}

pub struct Console<T: Transport, N: Notifier> {
    endpoint: Url,
    transport: T,
    notifier: N,
    state: Mutex<ConsoleState>,
}

impl<T: Transport, N: Notifier> Console<T, N> {
    pub fn new(endpoint: Url, transport: T, notifier: N) -> Self {
        Self {
            endpoint,
            transport,
            notifier,
            state: Mutex::new(ConsoleState::default()),
        }
    }

    pub fn set_query(&self, query: impl Into<String>) {
        self.state.lock().query = query.into();
    }

    pub fn query(&self) -> String {
        self.state.lock().query.clone()
    }

    pub fn result(&self) -> String {
        self.state.lock().result.clone()
    }

    pub fn is_in_flight(&self) -> bool {
        self.state.lock().in_flight
    }

    /// The label of the submit control.
    pub fn label(&self) -> &'static str {
        if self.is_in_flight() {
            RUNNING_LABEL
        } else {
            IDLE_LABEL
        }
    }

    pub fn snapshot(&self) -> ConsoleState {
        self.state.lock().clone()
    }

    /// Submit the query currently held by the console.
    pub async fn run(&self) -> Result<Execution, Error> {
        let query = self.query();
        self.submit(&query).await
    }

    /// Send `query` to the endpoint and replace the result with the response.
    ///
    /// Any response body is a successful execution, whatever its HTTP status.
    pub async fn submit(&self, query: &str) -> Result<Execution, Error> {
        if query.trim().is_empty() {
            self.notifier.notify(Notification::error(Error::Validation.to_string()));
            return Err(Error::Validation);
        }

        let _in_flight = {
            let mut state = self.state.lock();
            if state.in_flight {
                drop(state);
                tracing::debug!("rejecting submission while another one is running");
                self.notifier.notify(Notification::error(Error::Busy.to_string()));
                return Err(Error::Busy);
            }
            state.in_flight = true;
            InFlight(&self.state)
        };

        let mut url = self.endpoint.clone();
        url.query_pairs_mut().append_pair("q", query);
        tracing::debug!(endpoint = %self.endpoint, "submitting query");

        match self.transport.get(url).await {
            Ok(Reply { status, body }) => {
                if !status.is_success() {
                    tracing::warn!(%status, "query endpoint answered with a non-success status");
                }

                let body = ResponseBody::parse(body);
                let message = if body.is_structured() {
                    "Query executed successfully"
                } else {
                    "Query executed"
                };
                self.state.lock().result = body.render();
                self.notifier.notify(Notification::success(message));

                Ok(Execution { status, body })
            }
            Err(e) => {
                let message = describe(&e);
                tracing::error!(error = %message, "query endpoint unreachable");
                self.state.lock().result = format!("{ERROR_MARKER}{message}");
                self.notifier.notify(Notification::error(message));

                Err(Error::Transport(e))
            }
        }
    }
}

/// Clears the in-flight flag when the submission finishes or is dropped.
struct InFlight<'a>(&'a Mutex<ConsoleState>);

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.lock().in_flight = false;
    }
}

/// The error message followed by its causes.
fn describe(error: &TransportError) -> String {
    std::iter::successors(
        Some(error as &(dyn std::error::Error + 'static)),
        |e| e.source(),
    )
    .map(|e| e.to_string())
    .dedup()
    .join(": ")
}
