//! forge::endpoint
//!
//! URL construction for the GitHub REST endpoints versync calls.
//!
//! [`Endpoint`] covers the authenticated, repository-scoped endpoints. The
//! set is closed: every variant carries the parameters its template needs,
//! so there is no way to ask for a URL that cannot be built.

/// An authenticated endpoint on the target repository.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint<'a> {
    /// Read or update a repository Actions variable.
    RepoVariable { name: &'a str },
    /// Trigger a `workflow_dispatch` run of a workflow file.
    WorkflowDispatch { workflow_file: &'a str },
}

impl Endpoint<'_> {
    /// Format the full URL for this endpoint.
    ///
    /// # Example
    ///
    /// ```
    /// use versync::forge::Endpoint;
    ///
    /// let url = Endpoint::RepoVariable { name: "falco_version" }
    ///     .url("https://api.github.com", "cncf-tags/green-reviews-tooling");
    /// assert_eq!(
    ///     url,
    ///     "https://api.github.com/repos/cncf-tags/green-reviews-tooling/actions/variables/falco_version"
    /// );
    /// ```
    pub fn url(&self, api_base: &str, repository: &str) -> String {
        match self {
            Endpoint::RepoVariable { name } => {
                format!("{}/repos/{}/actions/variables/{}", api_base, repository, name)
            }
            Endpoint::WorkflowDispatch { workflow_file } => format!(
                "{}/repos/{}/actions/workflows/{}/dispatches",
                api_base, repository, workflow_file
            ),
        }
    }
}

/// URL of the latest published release of `org/project`.
pub fn latest_release_url(api_base: &str, org: &str, project: &str) -> String {
    format!("{}/repos/{}/{}/releases/latest", api_base, org, project)
}
