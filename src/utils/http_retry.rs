use http::Extensions;
use reqwest::{Client, Request, Response};
use reqwest_middleware::{
    ClientBuilder, ClientWithMiddleware, Middleware, Next, Result as MwResult,
};
use reqwest_retry::{RetryTransientMiddleware, policies::ExponentialBackoff};
use std::time::{Duration, Instant};
use tracing::{info, warn};

#[derive(Debug, Default, Clone)]
struct AttemptCount(pub u32);

/// Logs every attempt, including the retries the policy inserts.
struct AttemptLogger;

#[async_trait::async_trait]
impl Middleware for AttemptLogger {
    async fn handle(
        &self,
        req: Request,
        extensions: &mut Extensions,
        next: Next<'_>,
    ) -> MwResult<Response> {
        let attempt = match extensions.get_mut::<AttemptCount>() {
            Some(c) => {
                c.0 += 1;
                c.0
            }
            None => {
                extensions.insert(AttemptCount(1));
                1
            }
        };

        let method = req.method().clone();
        let url = req.url().clone();
        let t0 = Instant::now();

        let res = next.run(req, extensions).await;

        match &res {
            Ok(resp) => {
                info!(
                    attempt,
                    method = %method,
                    url = %url,
                    status = %resp.status(),
                    elapsed_ms = t0.elapsed().as_millis() as u64,
                    "request attempt completed"
                );
            }
            Err(err) => {
                warn!(
                    attempt,
                    method = %method,
                    url = %url,
                    elapsed_ms = t0.elapsed().as_millis() as u64,
                    error = %err,
                    "request attempt failed"
                );
            }
        }
        res
    }
}

/// Logs one line per logical request with the final status and attempt total.
struct SummaryLogger;

#[async_trait::async_trait]
impl Middleware for SummaryLogger {
    async fn handle(
        &self,
        req: Request,
        extensions: &mut Extensions,
        next: Next<'_>,
    ) -> MwResult<Response> {
        let method = req.method().clone();
        let url = req.url().clone();
        let t0 = Instant::now();

        let res = next.run(req, extensions).await;

        let attempts = extensions.get::<AttemptCount>().map(|c| c.0).unwrap_or(1);
        match &res {
            Ok(resp) => info!(
                method = %method,
                url = %url,
                status = %resp.status(),
                elapsed_ms = t0.elapsed().as_millis() as u64,
                attempts,
                "request completed"
            ),
            Err(err) => warn!(
                method = %method,
                url = %url,
                elapsed_ms = t0.elapsed().as_millis() as u64,
                attempts,
                error = %err,
                "request failed"
            ),
        }
        res
    }
}

pub fn build_client_with_retry(reqwest_client: Client) -> ClientWithMiddleware {
    let policy = ExponentialBackoff::builder()
        .retry_bounds(Duration::from_millis(250), Duration::from_secs(8))
        .build_with_max_retries(6);

    ClientBuilder::new(reqwest_client)
        .with(AttemptLogger)
        .with(RetryTransientMiddleware::new_with_policy(policy))
        .with(SummaryLogger)
        .build()
}
