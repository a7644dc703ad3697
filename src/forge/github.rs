//! forge::github
//!
//! GitHub repository client for Actions variables and workflow dispatch,
//! plus the unauthenticated latest-release lookup.
//!
//! # Design
//!
//! Every operation is one request and one response:
//! - build the URL from an [`Endpoint`]
//! - attach the authenticated headers
//! - send through the shared [`HttpClient`]
//! - check the one status code the call accepts
//! - decode the body, if the call returns one
//!
//! No retries, no caching and no state carried between calls. The client
//! only holds immutable configuration, so it can be shared freely.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use versync::core::config::Config;
//! use versync::forge::GitHubRepository;
//! use versync::http::ReqwestClient;
//!
//! let config = Config::from_env()?;
//! let repo = GitHubRepository::new(&config, Arc::new(ReqwestClient::new()?))?;
//!
//! let current = repo.read_repo_variable("falco").await?;
//! repo.update_repo_variable("falco", "0.39.0").await?;
//! ```

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::endpoint::{latest_release_url, Endpoint};
use super::errors::ForgeError;
use crate::core::config::{ApiSettings, Config};
use crate::core::naming::{generate_variable_name, payload_variable_name};
use crate::http::{HttpClient, HttpRequest, HttpResponse, Method};

/// Media type requested on authenticated calls.
pub const ACCEPT_VALUE: &str = "application/vnd.github+json";

/// Pinned REST API version.
pub const API_VERSION: &str = "2022-11-28";

const OP_READ_VARIABLE: &str = "read repository variable";
const OP_UPDATE_VARIABLE: &str = "update repository variable";
const OP_DISPATCH_WORKFLOW: &str = "dispatch workflow";
const OP_LATEST_RELEASE: &str = "fetch latest release";

const STATUS_OK: u16 = 200;
const STATUS_NO_CONTENT: u16 = 204;

/// Client for one GitHub repository.
pub struct GitHubRepository {
    /// Shared HTTP transport
    http: Arc<dyn HttpClient>,
    /// Bearer token
    token: String,
    /// Repository as `owner/name`
    repository: String,
    /// API base URL and timeout
    api: ApiSettings,
}

// Custom Debug to avoid exposing the token
impl std::fmt::Debug for GitHubRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitHubRepository")
            .field("repository", &self.repository)
            .field("api", &self.api)
            .finish_non_exhaustive()
    }
}

impl GitHubRepository {
    /// Create a client for the configured repository.
    ///
    /// Performs no network I/O.
    ///
    /// # Errors
    ///
    /// Returns `ForgeError::Configuration` if the configuration carries no
    /// token.
    pub fn new(config: &Config, http: Arc<dyn HttpClient>) -> Result<Self, ForgeError> {
        let token = config.token()?.to_string();
        Ok(Self {
            http,
            token,
            repository: config.repository().to_string(),
            api: config.api().clone(),
        })
    }

    /// Repository as `owner/name`.
    pub fn repository(&self) -> &str {
        &self.repository
    }

    pub fn api(&self) -> &ApiSettings {
        &self.api
    }

    /// The transport this client sends through.
    pub fn http(&self) -> &dyn HttpClient {
        self.http.as_ref()
    }

    /// Variable name used for `project` (see [`generate_variable_name`]).
    pub fn generate_variable_name(&self, project: &str) -> String {
        generate_variable_name(project)
    }

    /// Headers sent on every authenticated call.
    fn headers(&self) -> BTreeMap<String, String> {
        let mut headers = BTreeMap::new();
        headers.insert("Accept".to_string(), ACCEPT_VALUE.to_string());
        headers.insert("Authorization".to_string(), format!("Bearer {}", self.token));
        headers.insert("X-GitHub-Api-Version".to_string(), API_VERSION.to_string());
        headers
    }

    fn request(&self, method: Method, endpoint: Endpoint<'_>) -> HttpRequest {
        HttpRequest::new(method, endpoint.url(&self.api.base_url, &self.repository))
            .timeout(self.api.timeout)
            .headers(self.headers())
    }

    fn json_request(
        &self,
        method: Method,
        endpoint: Endpoint<'_>,
        body: Vec<u8>,
    ) -> HttpRequest {
        let mut request = self.request(method, endpoint).body(body);
        request
            .headers
            .insert("Content-Type".to_string(), "application/json".to_string());
        request
    }

    /// Read the stored value of a project's variable.
    ///
    /// # Errors
    ///
    /// - `Transport` if the request fails
    /// - `UnexpectedStatus` unless the forge answers 200
    /// - `Decode` if the body is not `{"value": string}`
    pub async fn read_repo_variable(&self, project: &str) -> Result<String, ForgeError> {
        let name = generate_variable_name(project);
        let request = self.request(Method::Get, Endpoint::RepoVariable { name: &name });

        let response = self.http.send(request).await?;
        expect_status(OP_READ_VARIABLE, &response, STATUS_OK)?;

        let variable: VariableBody = decode(OP_READ_VARIABLE, &response.body)?;
        debug!(variable = %name, value = %variable.value, "read repository variable");
        Ok(variable.value)
    }

    /// Overwrite a project's variable with `value`.
    ///
    /// The payload names the variable in upper case; the URL uses the lower
    /// case form.
    ///
    /// # Errors
    ///
    /// - `Serialize` if the body cannot be encoded
    /// - `Transport` if the request fails
    /// - `UnexpectedStatus` unless the forge answers 204
    pub async fn update_repo_variable(&self, project: &str, value: &str) -> Result<(), ForgeError> {
        let name = generate_variable_name(project);
        let payload_name = payload_variable_name(project);
        let body = encode(
            OP_UPDATE_VARIABLE,
            &UpdateVariableBody {
                name: &payload_name,
                value,
            },
        )?;

        let request = self.json_request(Method::Patch, Endpoint::RepoVariable { name: &name }, body);
        let response = self.http.send(request).await?;
        expect_status(OP_UPDATE_VARIABLE, &response, STATUS_NO_CONTENT)?;

        info!(variable = %payload_name, value, "updated repository variable");
        Ok(())
    }

    /// Trigger a `workflow_dispatch` run.
    ///
    /// # Arguments
    ///
    /// * `workflow_file` - Workflow file name, e.g. `benchmark-pipeline.yaml`
    /// * `git_ref` - Branch or tag the run uses
    /// * `inputs` - Workflow inputs; omitted from the payload when empty
    ///
    /// # Errors
    ///
    /// - `Serialize` if the body cannot be encoded
    /// - `Transport` if the request fails
    /// - `UnexpectedStatus` unless the forge answers 204
    pub async fn dispatch_workflow(
        &self,
        workflow_file: &str,
        git_ref: &str,
        inputs: &BTreeMap<String, String>,
    ) -> Result<(), ForgeError> {
        let body = encode(
            OP_DISPATCH_WORKFLOW,
            &DispatchBody { git_ref, inputs },
        )?;

        let request = self.json_request(
            Method::Post,
            Endpoint::WorkflowDispatch { workflow_file },
            body,
        );
        let response = self.http.send(request).await?;
        expect_status(OP_DISPATCH_WORKFLOW, &response, STATUS_NO_CONTENT)?;

        info!(workflow = workflow_file, git_ref, "dispatched workflow");
        Ok(())
    }
}

/// Fetch the tag name of the latest published release of `org/project`.
///
/// The call is unauthenticated and may target any repository.
///
/// # Errors
///
/// - `Transport` if the request fails
/// - `UnexpectedStatus` unless the forge answers 200
/// - `Decode` if the body has no string `tag_name`
pub async fn fetch_latest_release(
    http: &dyn HttpClient,
    api: &ApiSettings,
    org: &str,
    project: &str,
) -> Result<String, ForgeError> {
    let request = HttpRequest::new(Method::Get, latest_release_url(&api.base_url, org, project))
        .timeout(api.timeout);

    let response = http.send(request).await?;
    expect_status(OP_LATEST_RELEASE, &response, STATUS_OK)?;

    let release: ReleaseBody = decode(OP_LATEST_RELEASE, &response.body)?;
    info!(org, project, tag = %release.tag_name, "latest release");
    Ok(release.tag_name)
}

fn expect_status(
    operation: &'static str,
    response: &HttpResponse,
    expected: u16,
) -> Result<(), ForgeError> {
    if response.status == expected {
        Ok(())
    } else {
        Err(ForgeError::UnexpectedStatus {
            operation,
            expected,
            actual: response.status,
        })
    }
}

fn decode<T: DeserializeOwned>(operation: &'static str, body: &[u8]) -> Result<T, ForgeError> {
    serde_json::from_slice(body).map_err(|e| ForgeError::Decode {
        operation,
        message: e.to_string(),
    })
}

fn encode<T: Serialize>(operation: &'static str, value: &T) -> Result<Vec<u8>, ForgeError> {
    serde_json::to_vec(value).map_err(|e| ForgeError::Serialize {
        operation,
        message: e.to_string(),
    })
}

// --------------------------------------------------------------------------
// Wire types
// --------------------------------------------------------------------------

/// Body of a variable read.
#[derive(Deserialize)]
struct VariableBody {
    value: String,
}

/// Body of a variable update.
#[derive(Serialize)]
struct UpdateVariableBody<'a> {
    name: &'a str,
    value: &'a str,
}

/// Body of a workflow dispatch.
#[derive(Serialize)]
struct DispatchBody<'a> {
    #[serde(rename = "ref")]
    git_ref: &'a str,
    #[serde(skip_serializing_if = "no_inputs")]
    inputs: &'a BTreeMap<String, String>,
}

fn no_inputs(inputs: &&BTreeMap<String, String>) -> bool {
    inputs.is_empty()
}

/// Body of a latest-release lookup.
#[derive(Deserialize)]
struct ReleaseBody {
    tag_name: String,
}
