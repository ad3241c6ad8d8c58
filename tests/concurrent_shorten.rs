use async_trait::async_trait;
use shrtn::AppError;
use shrtn::application::services::ShorteningService;
use shrtn::domain::entities::{NewUrlRecord, UrlRecord};
use shrtn::domain::repositories::UrlRepository;
use shrtn::infrastructure::persistence::InMemoryUrlRepository;
use shrtn::utils::code_generator::is_valid_short_code;
use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::Barrier;

/// In-memory store that hands control back to the scheduler between the
/// existence check and the insert, like a database round-trip would.
struct YieldingRepository(InMemoryUrlRepository);

#[async_trait]
impl UrlRepository for YieldingRepository {
    async fn exists_by_code(&self, code: &str) -> Result<bool, AppError> {
        let exists = self.0.exists_by_code(code).await?;
        for _ in 0..4 {
            tokio::task::yield_now().await;
        }
        Ok(exists)
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<UrlRecord>, AppError> {
        self.0.find_by_code(code).await
    }

    async fn insert(&self, new_record: NewUrlRecord) -> Result<UrlRecord, AppError> {
        self.0.insert(new_record).await
    }

    async fn count(&self) -> Result<i64, AppError> {
        self.0.count().await
    }

    async fn list_recent(&self, limit: i64) -> Result<Vec<UrlRecord>, AppError> {
        self.0.list_recent(limit).await
    }

    async fn health_check(&self) -> bool {
        true
    }
}

async fn shorten_concurrently(tasks: usize) -> (Vec<Result<UrlRecord, AppError>>, i64) {
    let repo = Arc::new(YieldingRepository(InMemoryUrlRepository::new()));
    let service = Arc::new(ShorteningService::new(repo.clone(), "https://sho.rt"));
    let barrier = Arc::new(Barrier::new(tasks));

    let handles: Vec<_> = (0..tasks)
        .map(|_| {
            let service = service.clone();
            let barrier = barrier.clone();
            tokio::spawn(async move {
                barrier.wait().await;
                service.create_short_url("https://www.example.com").await
            })
        })
        .collect();

    let mut results = Vec::with_capacity(tasks);
    for handle in handles {
        results.push(handle.await.unwrap());
    }

    (results, repo.count().await.unwrap())
}

#[tokio::test]
async fn test_concurrent_shortens_of_same_url_all_succeed() {
    let (results, stored) = shorten_concurrently(8).await;

    let codes: HashSet<String> = results
        .into_iter()
        .map(|result| result.expect("every concurrent shorten succeeds").short_code)
        .collect();

    assert_eq!(codes.len(), 8);
    assert_eq!(stored, 8);
    assert!(codes.iter().all(|code| is_valid_short_code(code)));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_shortens_on_multi_thread_runtime() {
    let (results, stored) = shorten_concurrently(32).await;

    let codes: HashSet<String> = results
        .into_iter()
        .map(|result| result.expect("every concurrent shorten succeeds").short_code)
        .collect();

    assert_eq!(codes.len(), 32);
    assert_eq!(stored, 32);
}
