use catalog_core::*;
use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Fails the first `failures[path]` requests for a path, then succeeds
#[derive(Default, Clone)]
struct MockFetcher {
    requests: Arc<Mutex<Vec<String>>>,
    failures: Arc<Mutex<HashMap<String, u32>>>,
    delay: Option<Duration>,
}

impl MockFetcher {
    fn failing(path: &str, times: u32) -> Self {
        let fetcher = Self::default();
        fetcher
            .failures
            .lock()
            .unwrap()
            .insert(path.to_string(), times);
        fetcher
    }

    fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

impl ImageFetcher for MockFetcher {
    fn fetch(&self, url: &str) -> impl Future<Output = Result<Vec<u8>>> + Send {
        self.requests.lock().unwrap().push(url.to_string());
        let path = url.split('?').next().unwrap_or(url).to_string();
        let should_fail = {
            let mut failures = self.failures.lock().unwrap();
            match failures.get_mut(&path) {
                Some(left) if *left > 0 => {
                    *left -= 1;
                    true
                }
                _ => false,
            }
        };
        let delay = self.delay;
        async move {
            if let Some(delay) = delay {
                tokio::time::sleep(delay).await;
            }
            if should_fail {
                Err(CatalogError::Io(std::io::Error::other("connection reset")))
            } else {
                Ok(path.into_bytes())
            }
        }
    }
}

// =============================================================================
// Priority order
// =============================================================================

#[test]
fn test_image_path_format() {
    assert_eq!(image_path("images/", 1, "jpg"), "images/page-01.jpg");
    assert_eq!(image_path("assets/", 12, "png"), "assets/page-12.png");
}

#[test]
fn test_priority_on_front_cover() {
    let config = BookConfig::default();
    let order = priority_images(&config, 1, Some(ViewWindow::Single(1)), 2);
    assert_eq!(order, vec![1, 2]);
}

#[test]
fn test_priority_visible_first() {
    let config = BookConfig::new(2, 10, 2);
    let order = priority_images(&config, 5, Some(ViewWindow::Spread(5, 6)), 2);
    assert_eq!(&order[..2], &[3, 4]);
    assert!(order.contains(&2));
    assert!(order.contains(&5));
    assert!(order.iter().all(|&idx| (1..=10).contains(&idx)));

    let mut deduped = order.clone();
    deduped.dedup();
    assert_eq!(order.len(), deduped.len());
}

#[test]
fn test_priority_on_back_cover() {
    let config = BookConfig::default();
    let order = priority_images(&config, 8, Some(ViewWindow::Spread(7, 8)), 2);
    assert!(order.contains(&4));
    assert!(order.contains(&3));
}

// =============================================================================
// Loading
// =============================================================================

#[tokio::test]
async fn test_load_marks_image_loaded() {
    let fetcher = MockFetcher::default();
    let loader = ImageLoader::new(fetcher.clone(), "images/", "jpg");
    let mut tracker = ImageTracker::new(4);

    let outcome = loader.load(&mut tracker, 2).await.unwrap();
    assert_eq!(outcome, LoadOutcome::Loaded(b"images/page-02.jpg".to_vec()));
    assert!(tracker.is_loaded(2));
    assert_eq!(tracker.remaining(), vec![1, 3, 4]);
}

#[tokio::test]
async fn test_finalized_images_are_not_refetched() {
    let fetcher = MockFetcher::default();
    let loader = ImageLoader::new(fetcher.clone(), "images/", "jpg");
    let mut tracker = ImageTracker::new(4);

    loader.load(&mut tracker, 1).await.unwrap();
    assert_eq!(
        loader.load(&mut tracker, 1).await.unwrap(),
        LoadOutcome::Skipped
    );
    assert_eq!(
        loader.load(&mut tracker, 9).await.unwrap(),
        LoadOutcome::Skipped
    );
    assert_eq!(fetcher.requests().len(), 1);
}

#[tokio::test]
async fn test_retry_uses_cache_busting_url() {
    let fetcher = MockFetcher::failing("images/page-03.jpg", 1);
    let loader = ImageLoader::new(fetcher.clone(), "images/", "jpg");
    let mut tracker = ImageTracker::new(4);

    let outcome = loader.load(&mut tracker, 3).await.unwrap();
    assert!(matches!(outcome, LoadOutcome::Loaded(_)));

    let requests = fetcher.requests();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[0], "images/page-03.jpg");
    assert!(requests[1].starts_with("images/page-03.jpg?retry=1&t="));
}

#[tokio::test]
async fn test_failed_after_retries_exhausted() {
    let fetcher = MockFetcher::failing("images/page-04.jpg", 10);
    let loader = ImageLoader::new(fetcher.clone(), "images/", "jpg").with_retry_count(2);
    let mut tracker = ImageTracker::new(4);

    match loader.load(&mut tracker, 4).await {
        Err(CatalogError::ImageLoad { path, .. }) => assert_eq!(path, "images/page-04.jpg"),
        other => panic!("Expected ImageLoad error, got {:?}", other),
    }
    assert!(tracker.is_failed(4));
    assert_eq!(fetcher.requests().len(), 3);

    // Failed is final for the session
    assert_eq!(
        loader.load(&mut tracker, 4).await.unwrap(),
        LoadOutcome::Skipped
    );
    assert_eq!(fetcher.requests().len(), 3);
}

#[tokio::test]
async fn test_timeout_counts_as_failure() {
    let fetcher = MockFetcher {
        delay: Some(Duration::from_millis(200)),
        ..Default::default()
    };
    let loader = ImageLoader::new(fetcher.clone(), "images/", "jpg")
        .with_timeout(Duration::from_millis(10))
        .with_retry_count(1);
    let mut tracker = ImageTracker::new(4);

    match loader.load(&mut tracker, 1).await {
        Err(CatalogError::ImageTimeout { path }) => assert_eq!(path, "images/page-01.jpg"),
        other => panic!("Expected ImageTimeout, got {:?}", other),
    }
    assert!(tracker.is_failed(1));
    assert_eq!(fetcher.requests().len(), 2);
}

#[test]
fn test_unusable_image_moves_from_loaded_to_failed() {
    let mut tracker = ImageTracker::new(4);
    assert!(tracker.mark_loaded(1));
    assert_eq!(tracker.loaded_count(), 1);

    tracker.mark_unusable(1);
    assert!(tracker.is_failed(1));
    assert_eq!(tracker.loaded_count(), 0);
    assert!(!tracker.needs_load(1));

    tracker.mark_unusable(3);
    assert_eq!(tracker.state(3), LoadState::default());
}

#[test]
fn test_late_results_are_ignored() {
    let mut tracker = ImageTracker::new(4);
    assert!(tracker.mark_failed(2));
    assert!(!tracker.mark_loaded(2));
    assert_eq!(tracker.state(2), LoadState::Failed);

    tracker.mark_retry(2, 1);
    assert_eq!(tracker.state(2), LoadState::Failed);

    tracker.mark_retry(3, 1);
    assert_eq!(tracker.state(3), LoadState::RetryPending { attempt: 1 });
    assert!(tracker.needs_load(3));
}

#[tokio::test]
async fn test_file_fetcher_reads_relative_paths() {
    let dir = tempfile::TempDir::new().unwrap();
    std::fs::create_dir_all(dir.path().join("images")).unwrap();
    std::fs::write(dir.path().join("images/page-01.jpg"), b"jpeg").unwrap();

    let fetcher = FileFetcher::new(dir.path());
    assert_eq!(fetcher.fetch("images/page-01.jpg?retry=1&t=5").await.unwrap(), b"jpeg");
    assert!(fetcher.fetch("images/page-02.jpg").await.is_err());
}
