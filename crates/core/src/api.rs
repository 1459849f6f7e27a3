//! The two server calls the controller depends on, plus the auxiliary
//! endpoints used by the signed-in listing, health checks and task follow-up.

use log::{debug, info};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::automation::Automation;
use crate::config::Settings;
use crate::error::{Error, Result};
use crate::outcome::{RunRequest, RunResponse};
use crate::session::UserProfile;
use crate::task::{StopOutcome, TaskStatus};

const USER_AGENT: &str = concat!("autorun/", env!("CARGO_PKG_VERSION"));

pub trait AutomationApi {
    /// Fetches the catalog.
    ///
    /// # Errors
    ///
    /// Returns a transport error on network failure or a non-2xx status, and
    /// [`Error::SessionExpired`] on `401`.
    fn list_automations(&self) -> Result<Vec<Automation>>;

    /// Submits a run and returns the server's verdict.
    ///
    /// # Errors
    ///
    /// Returns a transport error only when no readable response arrived.
    fn run_automation(&self, request: &RunRequest) -> Result<RunResponse>;

    /// The signed-in user, when the server exposes one.
    ///
    /// # Errors
    ///
    /// Returns a transport error if the lookup fails.
    fn current_user(&self) -> Result<Option<UserProfile>> {
        Ok(None)
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct HealthStatus {
    pub status: String,
    pub timestamp: Option<String>,
    pub auth_method: Option<String>,
}

/// Reads a JSON body from a response, also when the status is an error one.
/// The server reports script and task problems with 4xx/5xx codes and a JSON
/// body, so only `401` and transport failures become errors here.
fn read_json_body<T: DeserializeOwned>(
    url: &str,
    sent: std::result::Result<ureq::Response, ureq::Error>,
) -> Result<T> {
    let response = match sent {
        Ok(response) => response,
        Err(ureq::Error::Status(401, _)) => return Err(Error::SessionExpired),
        Err(ureq::Error::Status(status, response)) => {
            debug!("`{url}` answered with status {status}");
            response
        }
        Err(ureq::Error::Transport(transport)) => {
            return Err(Error::transport_error(url, transport))
        }
    };

    response
        .into_json::<T>()
        .map_err(|e| Error::transport_error(url, e))
}

/// [`AutomationApi`] over HTTP.
#[derive(Debug, Clone)]
pub struct HttpApi {
    settings: Settings,
    bearer: Option<String>,
}

impl HttpApi {
    #[must_use]
    pub fn new(settings: Settings) -> Self {
        Self {
            settings,
            bearer: None,
        }
    }

    /// Attaches `Authorization: Bearer <token>` to every request.
    #[must_use]
    pub fn with_bearer(mut self, token: impl Into<String>) -> Self {
        self.bearer = Some(token.into());
        self
    }

    #[must_use]
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    fn request(&self, method: &str, url: &str) -> ureq::Request {
        let request = ureq::request(method, url)
            .set("accept", "application/json")
            .set("user-agent", USER_AGENT);

        match &self.bearer {
            Some(token) => request.set("Authorization", &format!("Bearer {token}")),
            None => request,
        }
    }

    fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = self.settings.url(path);
        debug!("GET {url}");

        let response = self.request("GET", &url).call().map_err(|e| match e {
            ureq::Error::Status(401, _) => Error::SessionExpired,
            ureq::Error::Status(status, _) => Error::Status {
                url: url.clone(),
                status,
            },
            ureq::Error::Transport(transport) => Error::transport_error(&url, transport),
        })?;

        response
            .into_json::<T>()
            .map_err(|e| Error::transport_error(&url, e))
    }

    /// Queries the health endpoint.
    ///
    /// # Errors
    ///
    /// Returns a transport error if the server is unreachable or unhealthy.
    pub fn health(&self) -> Result<HealthStatus> {
        self.get_json(&self.settings.endpoints.health)
    }

    /// Asks for the status of a launched task.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SessionExpired`] on `401` and a transport error when
    /// no readable response arrived.
    pub fn task_status(&self, task_arn: &str) -> Result<TaskStatus> {
        let url = self
            .settings
            .task_url(&self.settings.endpoints.task_status, task_arn);
        debug!("GET {url}");

        read_json_body(&url, self.request("GET", &url).call())
    }

    /// Asks the server to stop a launched task.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SessionExpired`] on `401` and a transport error when
    /// no readable response arrived.
    pub fn stop_task(&self, task_arn: &str) -> Result<StopOutcome> {
        let url = self
            .settings
            .task_url(&self.settings.endpoints.stop_task, task_arn);
        info!("Stopping task `{task_arn}`");

        read_json_body(&url, self.request("POST", &url).call())
    }
}

impl AutomationApi for HttpApi {
    fn list_automations(&self) -> Result<Vec<Automation>> {
        let automations: Vec<Automation> = self.get_json(&self.settings.endpoints.automations)?;
        info!("Fetched {} automations", automations.len());
        Ok(automations)
    }

    fn run_automation(&self, request: &RunRequest) -> Result<RunResponse> {
        let url = self.settings.url(&self.settings.endpoints.run);
        debug!("POST {url} for `{}`", request.automation_id);

        let body = serde_json::to_value(request)?;
        read_json_body(&url, self.request("POST", &url).send_json(body))
    }

    fn current_user(&self) -> Result<Option<UserProfile>> {
        self.get_json(&self.settings.endpoints.user).map(Some)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{BufRead, BufReader, Read, Write};
    use std::net::TcpListener;
    use std::thread::{self, JoinHandle};

    const ARN: &str = "arn:aws:ecs:eu-west-1:123:task/automation/abc";

    /// Answers a single request with `status` and `body`, and hands back the
    /// raw request it received.
    fn serve_once(status: &str, body: &str) -> (Settings, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let settings = Settings {
            base_url: format!("http://{}", listener.local_addr().unwrap()),
            ..Settings::default()
        };
        let response = format!(
            "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );

        let handle = thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let mut reader = BufReader::new(stream.try_clone().unwrap());
            let mut request = String::new();
            let mut content_length = 0;

            loop {
                let mut line = String::new();
                if reader.read_line(&mut line).unwrap() == 0 || line == "\r\n" {
                    break;
                }
                if let Some(value) = line.to_ascii_lowercase().strip_prefix("content-length:") {
                    content_length = value.trim().parse().unwrap();
                }
                request.push_str(&line);
            }

            let mut body = vec![0; content_length];
            reader.read_exact(&mut body).unwrap();
            request.push_str(&String::from_utf8(body).unwrap());

            stream.write_all(response.as_bytes()).unwrap();
            request
        });

        (settings, handle)
    }

    fn run_request() -> RunRequest {
        let mut parameters = crate::validation::Harvest::new();
        parameters.insert(
            "source_folder".to_string(),
            crate::automation::FieldValue::Text("/tmp".to_string()),
        );
        RunRequest {
            automation_id: "file_organizer".to_string(),
            parameters,
        }
    }

    #[test]
    fn test_unreachable_server_is_transport_error() {
        let api = HttpApi::new(Settings {
            base_url: "http://127.0.0.1:1".to_string(),
            ..Settings::default()
        });

        let result = api.list_automations();
        assert!(matches!(result, Err(Error::Transport { .. })));
    }

    #[test]
    fn test_with_bearer_keeps_settings() {
        let settings = Settings::default();
        let api = HttpApi::new(settings.clone()).with_bearer("token");
        assert_eq!(api.settings(), &settings);
    }

    #[test]
    fn test_catalog_is_fetched_from_automations_endpoint() {
        let (settings, server) = serve_once(
            "200 OK",
            r#"[{"id": "file_organizer", "name": "File Organizer", "parameters": []}]"#,
        );

        let automations = HttpApi::new(settings).list_automations().unwrap();
        let request = server.join().unwrap();

        assert_eq!(automations.len(), 1);
        assert_eq!(automations[0].id, "file_organizer");
        assert!(request.starts_with("GET /api/automations HTTP/1.1"));
        assert!(request.to_ascii_lowercase().contains("accept: application/json"));
    }

    #[test]
    fn test_catalog_server_error_is_status_error() {
        let (settings, server) = serve_once("500 Internal Server Error", r#"{"error": "boom"}"#);

        let result = HttpApi::new(settings).list_automations();
        server.join().unwrap();

        assert!(matches!(result, Err(Error::Status { status: 500, .. })));
    }

    #[test]
    fn test_unauthorized_catalog_is_session_expired() {
        let (settings, server) = serve_once("401 Unauthorized", r#"{"error": "Unauthorized"}"#);

        let result = HttpApi::new(settings).with_bearer("stale").list_automations();
        let request = server.join().unwrap();

        assert!(matches!(result, Err(Error::SessionExpired)));
        assert!(request.contains("Authorization: Bearer stale"));
    }

    #[test]
    fn test_run_posts_values_as_json() {
        let (settings, server) = serve_once(
            "200 OK",
            r#"{"success": true, "returncode": 0, "stdout": "done"}"#,
        );

        let response = HttpApi::new(settings).run_automation(&run_request()).unwrap();
        let request = server.join().unwrap();

        assert_eq!(response.success, Some(true));
        assert_eq!(response.stdout.as_deref(), Some("done"));
        assert!(request.starts_with("POST /api/run HTTP/1.1"));
        assert!(request.ends_with(
            r#"{"automation_id":"file_organizer","parameters":{"source_folder":"/tmp"}}"#
        ));
    }

    #[test]
    fn test_run_error_body_is_read_from_server_error() {
        let (settings, server) = serve_once(
            "500 Internal Server Error",
            r#"{"error": "Automation not found"}"#,
        );

        let response = HttpApi::new(settings).run_automation(&run_request()).unwrap();
        server.join().unwrap();

        assert_eq!(response.error.as_deref(), Some("Automation not found"));
    }

    #[test]
    fn test_unauthorized_run_is_session_expired() {
        let (settings, server) = serve_once("401 Unauthorized", "{}");

        let result = HttpApi::new(settings).run_automation(&run_request());
        server.join().unwrap();

        assert!(matches!(result, Err(Error::SessionExpired)));
    }

    #[test]
    fn test_run_with_unreadable_body_is_transport_error() {
        let (settings, server) = serve_once("502 Bad Gateway", "<html>Bad Gateway</html>");

        let result = HttpApi::new(settings).run_automation(&run_request());
        server.join().unwrap();

        assert!(matches!(result, Err(Error::Transport { .. })));
    }

    #[test]
    fn test_task_status_uses_arn_path() {
        let (settings, server) = serve_once(
            "200 OK",
            r#"{"status": "RUNNING", "desired_status": "RUNNING", "started_at": "2024-05-01T10:00:00"}"#,
        );

        let status = HttpApi::new(settings).task_status(ARN).unwrap();
        let request = server.join().unwrap();

        assert_eq!(status.status, "RUNNING");
        assert!(!status.is_finished());
        assert!(request.starts_with(&format!("GET /api/task/{ARN}/status HTTP/1.1")));
    }

    #[test]
    fn test_task_status_error_body_is_read() {
        let (settings, server) = serve_once(
            "500 Internal Server Error",
            r#"{"error": "Task runner unavailable"}"#,
        );

        let status = HttpApi::new(settings).task_status(ARN).unwrap();
        server.join().unwrap();

        assert_eq!(status.error.as_deref(), Some("Task runner unavailable"));
        assert!(status.is_finished());
    }

    #[test]
    fn test_stop_task_posts_to_stop_endpoint() {
        let (settings, server) = serve_once("200 OK", r#"{"success": true, "task": {}}"#);

        let outcome = HttpApi::new(settings).with_bearer("abc").stop_task(ARN).unwrap();
        let request = server.join().unwrap();

        assert!(outcome.is_success());
        assert!(request.starts_with(&format!("POST /api/task/{ARN}/stop HTTP/1.1")));
        assert!(request.contains("Authorization: Bearer abc"));
    }

    #[test]
    fn test_health_reports_status() {
        let (settings, server) = serve_once(
            "200 OK",
            r#"{"status": "healthy", "timestamp": "2024-05-01T10:00:00", "auth_method": "cognito"}"#,
        );

        let health = HttpApi::new(settings).health().unwrap();
        let request = server.join().unwrap();

        assert_eq!(health.status, "healthy");
        assert_eq!(health.auth_method.as_deref(), Some("cognito"));
        assert!(request.starts_with("GET /health HTTP/1.1"));
    }
}
