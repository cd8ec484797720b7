//! Integration tests for the crawler
//!
//! These tests use wiremock to create mock HTTP servers and test
//! the full crawl cycle end-to-end.

use email_trawler::config::{Config, CrawlerConfig};
use email_trawler::crawler::crawl;
use email_trawler::storage::{merge_emails, EmailStore, JsonEmailStore};
use email_trawler::TrawlerError;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, Request, Respond, ResponseTemplate};

/// Creates a test configuration with short delays
fn create_test_config(max_concurrent_fetches: u32) -> Config {
    Config {
        crawler: CrawlerConfig {
            max_concurrent_fetches,
            request_delay: 10, // Very short for testing
            request_timeout: 5,
        },
        ..Config::default()
    }
}

/// Mounts an HTML page that must be fetched exactly `times` times
async fn mount_page(server: &MockServer, page: &str, body: String, times: u64) {
    Mock::given(method("GET"))
        .and(path(page))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(body)
                .insert_header("content-type", "text/html"),
        )
        .expect(times)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_full_crawl_single_site() {
    let server = MockServer::start().await;
    let base_url = server.uri();

    mount_page(
        &server,
        "/",
        format!(
            r#"<html><body>
            <p>Write to info@example.com</p>
            <a href="{}/about">About</a>
            <a href="/contact">Contact</a>
            </body></html>"#,
            base_url
        ),
        1,
    )
    .await;
    mount_page(
        &server,
        "/about",
        r#"<p>Team lead: <b>jane.doe@Example.COM</b></p>"#.to_string(),
        1,
    )
    .await;
    mount_page(
        &server,
        "/contact",
        r#"<p>contact: sales@example.org!!</p><a href="/">Home</a>"#.to_string(),
        1,
    )
    .await;

    let result = crawl(&create_test_config(5), &format!("{}/", base_url))
        .await
        .unwrap();

    assert_eq!(result.pages_scanned, 3);
    assert_eq!(result.pages_failed, 0);
    assert_eq!(
        result.email_list(),
        vec![
            "info@example.com".to_string(),
            "jane.doe@example.com".to_string(),
            "sales@example.org".to_string(),
        ]
    );
}

#[tokio::test]
async fn test_other_hosts_never_fetched() {
    let server = MockServer::start().await;
    let other = MockServer::start().await;
    let port = url::Url::parse(&server.uri()).unwrap().port().unwrap();

    mount_page(
        &server,
        "/",
        format!(
            r#"<a href="{}/offsite">Other site</a>
            <a href="http://localhost:{}/alias">Same server, different host</a>
            <a href="/local">Local</a>"#,
            other.uri(),
            port
        ),
        1,
    )
    .await;
    mount_page(&server, "/local", "<p>nothing here</p>".to_string(), 1).await;
    mount_page(&server, "/alias", String::new(), 0).await;
    mount_page(&other, "/offsite", "<p>x@example.com</p>".to_string(), 0).await;

    let result = crawl(&create_test_config(5), &format!("{}/", server.uri()))
        .await
        .unwrap();

    assert_eq!(result.pages_scanned, 2);
    assert!(result.emails.is_empty());
}

#[tokio::test]
async fn test_media_links_never_fetched() {
    let server = MockServer::start().await;

    mount_page(
        &server,
        "/",
        r#"<a href="/brochure.pdf">PDF</a>
        <a href="/images/Logo.PNG">Logo</a>
        <a href="/page">Page</a>"#
            .to_string(),
        1,
    )
    .await;
    mount_page(&server, "/page", "<p>ok</p>".to_string(), 1).await;
    mount_page(&server, "/brochure.pdf", String::new(), 0).await;
    mount_page(&server, "/images/Logo.PNG", String::new(), 0).await;

    let result = crawl(&create_test_config(5), &format!("{}/", server.uri()))
        .await
        .unwrap();

    assert_eq!(result.pages_scanned, 2);
}

#[tokio::test]
async fn test_same_email_on_many_pages_reported_once() {
    let server = MockServer::start().await;

    mount_page(
        &server,
        "/",
        r#"<p>hello@example.com</p><a href="/a">A</a><a href="/b">B</a>"#.to_string(),
        1,
    )
    .await;
    mount_page(&server, "/a", "<p>hello@example.com</p>".to_string(), 1).await;
    mount_page(&server, "/b", "<p>HELLO@EXAMPLE.COM hello@example.com</p>".to_string(), 1).await;

    let result = crawl(&create_test_config(5), &format!("{}/", server.uri()))
        .await
        .unwrap();

    assert_eq!(result.pages_scanned, 3);
    // Local parts are case-sensitive, domains are not
    assert_eq!(
        result.email_list(),
        vec!["HELLO@example.com".to_string(), "hello@example.com".to_string()]
    );
}

#[tokio::test]
async fn test_cycles_fetch_each_page_once() {
    let server = MockServer::start().await;
    let links = r##"<a href="/">Home</a><a href="/a">A</a><a href="/b">B</a>
        <a href="/a#top">A again</a><a href="#">Self</a>"##;

    for page in ["/", "/a", "/b"] {
        mount_page(&server, page, links.to_string(), 1).await;
    }

    let result = crawl(&create_test_config(3), &format!("{}/", server.uri()))
        .await
        .unwrap();

    assert_eq!(result.pages_scanned, 3);
    assert_eq!(result.pages_failed, 0);
}

#[tokio::test]
async fn test_failed_pages_counted_and_crawl_continues() {
    let server = MockServer::start().await;

    mount_page(
        &server,
        "/",
        r#"<a href="/slow">Slow</a><a href="/missing">Missing</a><a href="/fine">Fine</a>"#
            .to_string(),
        1,
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/slow"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("<p>slow@example.com</p>")
                .set_delay(Duration::from_secs(3)),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_string("<p>gone@example.com</p>"))
        .expect(1)
        .mount(&server)
        .await;
    mount_page(&server, "/fine", "<p>fine@example.com</p>".to_string(), 1).await;

    let mut config = create_test_config(5);
    config.crawler.request_timeout = 1;

    let result = crawl(&config, &format!("{}/", server.uri())).await.unwrap();

    assert_eq!(result.pages_scanned, 2);
    assert_eq!(result.pages_failed, 2);
    assert_eq!(result.email_list(), vec!["fine@example.com".to_string()]);
}

#[tokio::test]
async fn test_invalid_candidates_are_dropped() {
    let server = MockServer::start().await;

    mount_page(
        &server,
        "/",
        r#"<p>good@example.com, bad.@example.com, a..b@example.com,
        x@-example.com, y@localhost.test, z@host.local</p>"#
            .to_string(),
        1,
    )
    .await;

    let result = crawl(&create_test_config(1), &format!("{}/", server.uri()))
        .await
        .unwrap();

    assert_eq!(result.email_list(), vec!["good@example.com".to_string()]);
}

#[tokio::test]
async fn test_single_worker_completes() {
    let server = MockServer::start().await;

    mount_page(
        &server,
        "/",
        r#"<a href="/1">1</a><a href="/2">2</a><a href="/3">3</a>"#.to_string(),
        1,
    )
    .await;
    for page in ["/1", "/2", "/3"] {
        mount_page(&server, page, "<p>done</p>".to_string(), 1).await;
    }

    let result = crawl(&create_test_config(1), &format!("{}/", server.uri()))
        .await
        .unwrap();

    assert_eq!(result.pages_scanned, 4);
}

/// Serves a hub page linking to `/p0`..`/pN` and records when each request arrived
///
/// Every response is held back for `hold`, so a request counts as in flight
/// from its arrival until `hold` later.
struct SlowSite {
    pages: usize,
    hold: Duration,
    arrivals: Arc<Mutex<Vec<Instant>>>,
}

impl Respond for SlowSite {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        self.arrivals.lock().unwrap().push(Instant::now());

        let body = if request.url.path() == "/" {
            (0..self.pages)
                .map(|i| format!(r#"<a href="/p{}">Page {}</a>"#, i, i))
                .collect::<String>()
        } else {
            "<p>leaf</p>".to_string()
        };

        ResponseTemplate::new(200)
            .set_body_string(body)
            .set_delay(self.hold)
    }
}

/// Largest number of requests whose hold windows overlap at one instant
fn peak_in_flight(arrivals: &[Instant], hold: Duration) -> usize {
    arrivals
        .iter()
        .map(|&t| {
            arrivals
                .iter()
                .filter(|&&start| start <= t && t < start + hold)
                .count()
        })
        .max()
        .unwrap_or(0)
}

#[tokio::test]
async fn test_in_flight_fetches_bounded_by_pool_size() {
    let server = MockServer::start().await;
    let hold = Duration::from_millis(300);
    let arrivals = Arc::new(Mutex::new(Vec::new()));

    Mock::given(method("GET"))
        .respond_with(SlowSite {
            pages: 6,
            hold,
            arrivals: Arc::clone(&arrivals),
        })
        .expect(7)
        .mount(&server)
        .await;

    let mut config = create_test_config(2);
    config.crawler.request_delay = 0;

    let result = crawl(&config, &format!("{}/", server.uri())).await.unwrap();
    assert_eq!(result.pages_scanned, 7);

    let arrivals = arrivals.lock().unwrap();
    let peak = peak_in_flight(&arrivals, hold);
    assert!(peak <= 2, "{} requests were in flight at once", peak);
    assert_eq!(peak, 2, "the pool never ran two fetches together");
}

#[tokio::test]
async fn test_unreachable_start_url_yields_empty_result() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);

    let result = crawl(&create_test_config(2), &format!("http://127.0.0.1:{}/", port))
        .await
        .unwrap();

    assert_eq!(result.pages_scanned, 0);
    assert_eq!(result.pages_failed, 1);
    assert!(result.emails.is_empty());
}

#[tokio::test]
async fn test_invalid_start_url_rejected() {
    let config = create_test_config(2);

    assert!(matches!(
        crawl(&config, "not a url").await,
        Err(TrawlerError::Url(_))
    ));
    assert!(matches!(
        crawl(&config, "ftp://example.com/").await,
        Err(TrawlerError::Url(_))
    ));
}

#[tokio::test]
async fn test_crawl_then_merge_into_store() {
    let server = MockServer::start().await;
    mount_page(
        &server,
        "/",
        "<p>new@example.com old@example.com</p>".to_string(),
        1,
    )
    .await;

    let dir = tempfile::tempdir().unwrap();
    let mut store = JsonEmailStore::new(dir.path().join("emails.json"));
    merge_emails(&mut store, ["old@example.com", "kept@example.com"]).unwrap();

    let result = crawl(&create_test_config(2), &format!("{}/", server.uri()))
        .await
        .unwrap();
    let outcome = merge_emails(&mut store, result.emails.iter().cloned()).unwrap();

    assert_eq!(outcome.added, 1);
    assert_eq!(outcome.total, 3);
    assert_eq!(
        store.load().unwrap(),
        vec!["kept@example.com", "new@example.com", "old@example.com"]
    );
}
