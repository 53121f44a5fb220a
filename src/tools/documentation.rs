//! Kubernetes documentation tools.
//!
//! `k8s_read_documentation` is the real pipeline: validate, fetch through the
//! cache, normalize to Markdown, paginate. `k8s_search_documentation` and
//! `k8s_recommend` serve fixed topic tables branched on the request; they do
//! no live search or recommendation.
//!
//! Expected domain errors (a URL outside the docs tree, an upstream failure)
//! are returned as an `{"error": ...}` value in the tool output, so callers
//! must check that key before reading other fields. Only misuse (bad
//! parameter types, negative pagination bounds) surfaces through the
//! dispatcher's error channel.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::config::Config;
use crate::docs::{paginate, DocFetcher, HtmlNormalizer};
use crate::error::Result;
use crate::registry::{parse_args, Tool, ToolParams};

/// Scheme-insensitive view of a URL, used for docs-path prefix checks.
fn strip_scheme(url: &str) -> &str {
    url.strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"))
        .unwrap_or(url)
}

/// Host part of the documentation base URL, e.g. `kubernetes.io`.
fn docs_root(config: &Config) -> String {
    strip_scheme(&config.docs_base_url)
        .trim_end_matches('/')
        .to_string()
}

/// Last non-empty path segment, the title fallback when a page has no
/// `<title>` element.
fn title_from_url(url: &str) -> String {
    url.rsplit('/')
        .find(|segment| !segment.is_empty())
        .unwrap_or(url)
        .to_string()
}

fn link(title: &str, url: &str) -> Value {
    json!({ "title": title, "url": url })
}

fn link_with_context(title: &str, url: &str, context: &str) -> Value {
    json!({ "title": title, "url": url, "context": context })
}

// ---------------------------------------------------------------------------
// k8s_read_documentation
// ---------------------------------------------------------------------------

/// Fetch a documentation page and return a paginated Markdown window.
pub struct ReadDocumentation {
    fetcher: Arc<DocFetcher>,
    normalizer: Arc<HtmlNormalizer>,
    docs_root: String,
}

#[derive(Debug, Deserialize)]
struct ReadDocumentationArgs {
    url: String,
    #[serde(default = "default_max_length")]
    max_length: i64,
    #[serde(default)]
    start_index: i64,
}

fn default_max_length() -> i64 {
    5000
}

impl ReadDocumentation {
    pub fn new(fetcher: Arc<DocFetcher>, normalizer: Arc<HtmlNormalizer>, config: &Config) -> Self {
        Self {
            fetcher,
            normalizer,
            docs_root: docs_root(config),
        }
    }

    fn is_docs_url(&self, url: &str) -> bool {
        strip_scheme(url).starts_with(&format!("{}/docs", self.docs_root))
    }

    fn domain_error(&self) -> Value {
        json!({ "error": format!("URL must be from {}/docs domain", self.docs_root) })
    }
}

#[async_trait]
impl Tool for ReadDocumentation {
    async fn invoke(&self, params: ToolParams) -> Result<Value> {
        let args: ReadDocumentationArgs = parse_args(params)?;
        tracing::info!(url = %args.url, "read_documentation called");

        if !self.is_docs_url(&args.url) {
            return Ok(self.domain_error());
        }

        let html = match self.fetcher.fetch(&args.url).await {
            Ok(html) => html,
            Err(e) => {
                tracing::error!(url = %args.url, error = %e, "Error reading documentation");
                return Ok(json!({ "error": e.to_string() }));
            }
        };

        let markdown = self.normalizer.normalize(&html);
        let title = self
            .normalizer
            .extract_title(&html)
            .unwrap_or_else(|| title_from_url(&args.url));

        let page = paginate(&markdown, args.start_index, args.max_length)?;

        Ok(json!({
            "title": title,
            "url": args.url,
            "content": page.content,
            "start_index": page.start_index,
            "end_index": page.end_index,
            "total_length": page.total_length,
            "is_truncated": page.is_truncated,
        }))
    }
}

// ---------------------------------------------------------------------------
// k8s_search_documentation
// ---------------------------------------------------------------------------

/// Keyword match against a fixed topic table. Not a search engine.
pub struct SearchDocumentation;

#[derive(Debug, Deserialize)]
struct SearchDocumentationArgs {
    search_phrase: String,
    #[serde(default = "default_limit")]
    limit: usize,
}

fn default_limit() -> usize {
    10
}

const SEARCH_TOPICS: &[(&str, &str)] = &[
    ("Pods", "https://kubernetes.io/docs/concepts/workloads/pods/"),
    (
        "Deployments",
        "https://kubernetes.io/docs/concepts/workloads/controllers/deployment/",
    ),
    (
        "Services",
        "https://kubernetes.io/docs/concepts/services-networking/service/",
    ),
    (
        "ConfigMaps",
        "https://kubernetes.io/docs/concepts/configuration/configmap/",
    ),
    (
        "Secrets",
        "https://kubernetes.io/docs/concepts/configuration/secret/",
    ),
    (
        "Volumes",
        "https://kubernetes.io/docs/concepts/storage/volumes/",
    ),
    (
        "Namespaces",
        "https://kubernetes.io/docs/concepts/overview/working-with-objects/namespaces/",
    ),
    ("Kubectl Commands", "https://kubernetes.io/docs/reference/kubectl/"),
    (
        "Kubernetes API",
        "https://kubernetes.io/docs/reference/kubernetes-api/",
    ),
    (
        "Cluster Architecture",
        "https://kubernetes.io/docs/concepts/architecture/",
    ),
];

#[async_trait]
impl Tool for SearchDocumentation {
    async fn invoke(&self, params: ToolParams) -> Result<Value> {
        let args: SearchDocumentationArgs = parse_args(params)?;
        tracing::info!(phrase = %args.search_phrase, "search_documentation called");

        let phrase = args.search_phrase.to_lowercase();
        let keywords: Vec<&str> = phrase.split_whitespace().collect();

        let mut results: Vec<Value> = Vec::new();
        for (title, url) in SEARCH_TOPICS {
            let title_lower = title.to_lowercase();
            if keywords.iter().any(|keyword| title_lower.contains(keyword)) {
                results.push(json!({
                    "title": title,
                    "url": url,
                    "excerpt": format!("Documentation about Kubernetes {title}"),
                }));
            }
        }

        results.truncate(args.limit);

        if results.is_empty() {
            results = vec![
                json!({
                    "title": "Kubernetes Documentation",
                    "url": "https://kubernetes.io/docs/home/",
                    "excerpt": "Home page for Kubernetes documentation.",
                }),
                json!({
                    "title": "Kubernetes Concepts",
                    "url": "https://kubernetes.io/docs/concepts/",
                    "excerpt": "Overview of Kubernetes concepts and components.",
                }),
            ];
        }

        Ok(json!({
            "query": args.search_phrase,
            "results": results,
            "total_results": results.len(),
        }))
    }
}

// ---------------------------------------------------------------------------
// k8s_recommend
// ---------------------------------------------------------------------------

/// Static recommendations branched on the URL's category segment.
pub struct Recommend {
    docs_root: String,
}

#[derive(Debug, Deserialize)]
struct RecommendArgs {
    url: String,
}

impl Recommend {
    pub fn new(config: &Config) -> Self {
        Self {
            docs_root: docs_root(config),
        }
    }

    fn similar_for_category(category: &str) -> Vec<Value> {
        match category {
            "concepts" => vec![
                link("Pods", "https://kubernetes.io/docs/concepts/workloads/pods/"),
                link(
                    "Deployments",
                    "https://kubernetes.io/docs/concepts/workloads/controllers/deployment/",
                ),
                link(
                    "Services",
                    "https://kubernetes.io/docs/concepts/services-networking/service/",
                ),
                link("Storage", "https://kubernetes.io/docs/concepts/storage/"),
            ],
            "tasks" => vec![
                link(
                    "Configure a Pod to Use a ConfigMap",
                    "https://kubernetes.io/docs/tasks/configure-pod-container/configure-pod-configmap/",
                ),
                link(
                    "Configure a Pod to Use a Secret",
                    "https://kubernetes.io/docs/tasks/inject-data-application/distribute-credentials-secure/",
                ),
                link(
                    "Use Port Forwarding",
                    "https://kubernetes.io/docs/tasks/access-application-cluster/port-forward-access-application-cluster/",
                ),
            ],
            "reference" => vec![
                link(
                    "Kubernetes API Reference",
                    "https://kubernetes.io/docs/reference/kubernetes-api/",
                ),
                link("kubectl Commands", "https://kubernetes.io/docs/reference/kubectl/"),
                link(
                    "Well-Known Labels, Annotations and Taints",
                    "https://kubernetes.io/docs/reference/labels-annotations-taints/",
                ),
            ],
            "tutorials" => vec![
                link(
                    "Kubernetes Basics",
                    "https://kubernetes.io/docs/tutorials/kubernetes-basics/",
                ),
                link(
                    "Stateless Application",
                    "https://kubernetes.io/docs/tutorials/stateless-application/",
                ),
                link(
                    "Stateful Application",
                    "https://kubernetes.io/docs/tutorials/stateful-application/",
                ),
            ],
            _ => vec![
                link("Kubernetes Concepts", "https://kubernetes.io/docs/concepts/"),
                link("Kubernetes Tasks", "https://kubernetes.io/docs/tasks/"),
                link("Kubernetes Tutorials", "https://kubernetes.io/docs/tutorials/"),
            ],
        }
    }
}

#[async_trait]
impl Tool for Recommend {
    async fn invoke(&self, params: ToolParams) -> Result<Value> {
        let args: RecommendArgs = parse_args(params)?;
        tracing::info!(url = %args.url, "recommend called");

        let prefix = format!("{}/docs", self.docs_root);
        if !strip_scheme(&args.url).starts_with(&prefix) {
            return Ok(json!({
                "error": format!("URL must be from {}/docs domain", self.docs_root)
            }));
        }

        let category = strip_scheme(&args.url)
            .strip_prefix(&format!("{}/docs/", self.docs_root))
            .unwrap_or("")
            .split('/')
            .next()
            .unwrap_or("")
            .to_string();

        Ok(json!({
            "similar": Self::similar_for_category(&category),
            "highly_rated": [
                link_with_context(
                    "Kubernetes Components",
                    "https://kubernetes.io/docs/concepts/overview/components/",
                    "Understanding the core components of Kubernetes architecture",
                ),
                link_with_context(
                    "Kubernetes API",
                    "https://kubernetes.io/docs/concepts/overview/kubernetes-api/",
                    "How to interact with the Kubernetes API",
                ),
                link_with_context(
                    "Working with kubectl",
                    "https://kubernetes.io/docs/reference/kubectl/",
                    "Essential kubectl commands for managing Kubernetes resources",
                ),
            ],
            "new": [
                link_with_context(
                    "What's new in Kubernetes v1.28",
                    "https://kubernetes.io/blog/2023/08/15/kubernetes-v1-28-release/",
                    "Latest features in Kubernetes v1.28",
                ),
                link_with_context(
                    "Validating API Field Selectors",
                    "https://kubernetes.io/docs/reference/using-api/api-concepts/#field-validation",
                    "New field validation features",
                ),
                link_with_context(
                    "Job API Updates",
                    "https://kubernetes.io/docs/concepts/workloads/controllers/job/",
                    "Recent updates to the Job API",
                ),
            ],
            "journey": [
                link_with_context(
                    "Kubernetes Troubleshooting",
                    "https://kubernetes.io/docs/tasks/debug/",
                    "Common troubleshooting scenarios",
                ),
                link_with_context(
                    "Kubernetes Best Practices",
                    "https://kubernetes.io/docs/setup/best-practices/",
                    "Best practices for configuring Kubernetes",
                ),
                link_with_context(
                    "Kubernetes Security",
                    "https://kubernetes.io/docs/concepts/security/",
                    "Security concepts and best practices",
                ),
            ],
        }))
    }
}
