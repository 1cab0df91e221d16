//! Job link fetcher: downloads a posting and reduces its HTML to visible text.
//!
//! By default only public addresses are reached. IP literals are checked
//! before connecting and host names resolve through `PublicOnlyResolver`.
//! Redirect hops get the same check. Bodies are read up to a byte cap
//! derived from `max_chars`.

use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use futures::StreamExt;
use hyper::client::connect::dns::Name;
use reqwest::dns::{Addrs, Resolve, Resolving};
use reqwest::redirect::Policy;
use reqwest::Client;
use scraper::{Html, Node};
use tracing::{debug, warn};
use url::{Host, Url};

use crate::extraction::{ExtractedText, Origin};

const USER_AGENT: &str = concat!("coverletter/", env!("CARGO_PKG_VERSION"));

const MAX_REDIRECTS: usize = 5;

/// Raw HTML bytes read per visible character wanted; markup and inline
/// scripts usually dwarf the text.
const BODY_BYTES_PER_CHAR: usize = 50;
const MIN_BODY_BYTES: usize = 256 * 1024;

/// Elements whose text is never visible on the page.
const SKIPPED_ELEMENTS: &[&str] = &["script", "style", "noscript", "template", "svg", "head"];

#[derive(Clone)]
pub struct JobLinkFetcher {
    client: Client,
    max_chars: usize,
    max_body_bytes: usize,
    allow_private_hosts: bool,
}

impl JobLinkFetcher {
    /// Only public addresses are reached unless `allow_private_hosts` is set,
    /// for local development against job pages served from the same machine.
    pub fn new(
        timeout: Duration,
        max_chars: usize,
        allow_private_hosts: bool,
    ) -> Result<Self> {
        let mut builder = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .redirect(redirect_policy(allow_private_hosts));
        if !allow_private_hosts {
            // a proxy would resolve names on our behalf and bypass the resolver
            builder = builder.no_proxy().dns_resolver(Arc::new(PublicOnlyResolver));
        }
        let client = builder
            .build()
            .context("Failed to build job link HTTP client")?;

        Ok(Self {
            client,
            max_chars,
            max_body_bytes: max_chars.saturating_mul(BODY_BYTES_PER_CHAR).max(MIN_BODY_BYTES),
            allow_private_hosts,
        })
    }

    /// Fetches `url` and returns its visible text. Any failure is replaced by
    /// a fallback narrative so the posting is treated as limited job text.
    pub async fn fetch(&self, url: &Url) -> ExtractedText {
        let text = match self.fetch_html(url).await {
            Ok(html) => {
                let text = html_to_text(&html, self.max_chars);
                debug!("Fetched {} chars of job text from {url}", text.chars().count());
                text
            }
            Err(e) => {
                warn!("Job link fetch failed for {url}: {e:#}");
                fallback_text(url)
            }
        };
        ExtractedText::new(Origin::Link, text)
    }

    async fn fetch_html(&self, url: &Url) -> Result<String> {
        if !self.allow_private_hosts && !is_public_target(url) {
            bail!("job link points at a non-public address");
        }

        let response = self
            .client
            .get(url.clone())
            .header(reqwest::header::ACCEPT, "text/html,application/xhtml+xml")
            .send()
            .await
            .context("request failed")?;

        let status = response.status();
        if !status.is_success() {
            bail!("job page returned status {status}");
        }

        let mut body = Vec::new();
        let mut chunks = response.bytes_stream();
        while let Some(chunk) = chunks.next().await {
            let chunk = chunk.context("failed to read job page body")?;
            let room = self.max_body_bytes - body.len();
            if chunk.len() >= room {
                body.extend_from_slice(&chunk[..room]);
                debug!("Job page cut off at {} bytes", self.max_body_bytes);
                break;
            }
            body.extend_from_slice(&chunk);
        }

        Ok(String::from_utf8_lossy(&body).into_owned())
    }
}

pub fn fallback_text(url: &Url) -> String {
    format!(
        "We could not directly access the job posting at {url}. \
         The page may require a login, block automated access, or no longer exist. \
         No specific details about the company or the position are available."
    )
}

/// Resolves host names with the system resolver and keeps only public
/// addresses. A name with none left fails to resolve.
struct PublicOnlyResolver;

impl Resolve for PublicOnlyResolver {
    fn resolve(&self, name: Name) -> Resolving {
        Box::pin(resolve_public(name.as_str().to_string()))
    }
}

async fn resolve_public(host: String) -> Result<Addrs, Box<dyn std::error::Error + Send + Sync>> {
    let public: Vec<SocketAddr> = tokio::net::lookup_host((host.as_str(), 0))
        .await?
        .filter(|addr| is_public_ip(addr.ip()))
        .collect();
    if public.is_empty() {
        return Err(format!("{host} does not resolve to a public address").into());
    }
    Ok(Box::new(public.into_iter()))
}

fn redirect_policy(allow_private_hosts: bool) -> Policy {
    Policy::custom(move |attempt| {
        if attempt.previous().len() >= MAX_REDIRECTS {
            attempt.error("too many redirects")
        } else if !allow_private_hosts && !is_public_target(attempt.url()) {
            let target = attempt.url().to_string();
            attempt.error(format!("redirect to non-public address {target}"))
        } else {
            attempt.follow()
        }
    })
}

/// IP-literal hosts must be public. Names are left to the resolver.
fn is_public_target(url: &Url) -> bool {
    match url.host() {
        Some(Host::Ipv4(ip)) => is_public_ip(IpAddr::V4(ip)),
        Some(Host::Ipv6(ip)) => is_public_ip(IpAddr::V6(ip)),
        Some(Host::Domain(_)) => true,
        None => false,
    }
}

fn is_public_ip(ip: IpAddr) -> bool {
    match ip {
        IpAddr::V4(v4) => is_public_v4(v4),
        IpAddr::V6(v6) => match v6.to_ipv4_mapped() {
            Some(v4) => is_public_v4(v4),
            None => is_public_v6(v6),
        },
    }
}

fn is_public_v4(ip: Ipv4Addr) -> bool {
    let [a, b, ..] = ip.octets();
    let shared = a == 100 && (b & 0xc0) == 64; // 100.64.0.0/10
    !(ip.is_loopback()
        || ip.is_private()
        || ip.is_link_local()
        || ip.is_unspecified()
        || ip.is_broadcast()
        || ip.is_documentation()
        || ip.is_multicast()
        || shared
        || a == 0)
}

fn is_public_v6(ip: Ipv6Addr) -> bool {
    let first = ip.segments()[0];
    let unique_local = (first & 0xfe00) == 0xfc00; // fc00::/7
    let link_local = (first & 0xffc0) == 0xfe80; // fe80::/10
    !(ip.is_loopback() || ip.is_unspecified() || ip.is_multicast() || unique_local || link_local)
}

/// Title plus visible body text with whitespace collapsed, truncated to
/// `max_chars` characters.
pub fn html_to_text(html: &str, max_chars: usize) -> String {
    let document = Html::parse_document(html);
    let mut pieces: Vec<String> = Vec::new();

    let title = document
        .root_element()
        .descendants()
        .filter_map(|n| n.value().as_element().map(|e| (n, e)))
        .find(|(_, e)| e.name() == "title")
        .map(|(n, _)| {
            n.descendants()
                .filter_map(|d| d.value().as_text().map(|t| t.to_string()))
                .collect::<String>()
        });
    if let Some(title) = title {
        let title = collapse_whitespace(&title);
        if !title.is_empty() {
            pieces.push(title);
        }
    }

    for node in document.root_element().descendants() {
        let Node::Text(text) = node.value() else {
            continue;
        };
        let hidden = node.ancestors().any(|a| {
            a.value()
                .as_element()
                .is_some_and(|e| SKIPPED_ELEMENTS.contains(&e.name()))
        });
        if hidden {
            continue;
        }
        let text = collapse_whitespace(text);
        if !text.is_empty() {
            pieces.push(text);
        }
    }

    let joined = pieces.join("\n");
    match joined.char_indices().nth(max_chars) {
        Some((cut, _)) => joined[..cut].to_string(),
        None => joined,
    }
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
