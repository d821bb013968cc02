//! Page retrieval with identity-profile fallback.
//!
//! The fetcher waits `initial_delay`, then tries each identity profile of the
//! retry policy in order. A 403 or a transport failure moves on to the next
//! profile after its backoff; any other non-200 status fails at once. A 200
//! response must carry an HTML content type.

mod profile;
mod request;
mod types;
mod validate;

use std::time::Duration;

use log::{debug, info, warn};
use tokio_util::sync::CancellationToken;
use url::Url;

use crate::config::ScrapeConfig;
use crate::error_handling::{transport_reason, AttemptFailure, ScrapeError};
use crate::initialization::init_client;
use crate::run::ProgressSink;

pub use profile::{IdentityProfile, RetryPolicy};
pub use types::FetchResult;
pub use validate::{check_error_page, validate_content_type};

use request::{attempt, AttemptOutcome};

const HTTP_FORBIDDEN: u16 = 403;

/// Sleeps for `delay` unless `cancel` fires first.
async fn wait(delay: Duration, cancel: &CancellationToken) -> Result<(), ScrapeError> {
    if delay.is_zero() {
        return if cancel.is_cancelled() {
            Err(ScrapeError::Cancelled)
        } else {
            Ok(())
        };
    }
    tokio::select! {
        _ = tokio::time::sleep(delay) => Ok(()),
        _ = cancel.cancelled() => Err(ScrapeError::Cancelled),
    }
}

enum LastFailure {
    Status(u16),
    Transport,
}

/// Fetches `url`, escalating through identity profiles on 403 and transport errors.
///
/// Progress is reported at 10 (connecting), 30 (request sent) and 50
/// (response received).
///
/// # Errors
///
/// - `FetchHttp` for a non-200 status other than 403, or when the last
///   profile also got a 403
/// - `FetchTransport` when the last profile failed at the transport level
/// - `InvalidContentType` when a 200 response is not HTML
/// - `Cancelled` when `cancel` fires during a wait or request
pub async fn fetch(
    url: &Url,
    config: &ScrapeConfig,
    progress: &dyn ProgressSink,
    cancel: &CancellationToken,
) -> Result<FetchResult, ScrapeError> {
    let policy = &config.retry_policy;
    let timeout = Duration::from_secs(config.request_timeout_seconds);
    let mut attempts: Vec<AttemptFailure> = Vec::new();
    let mut last_failure = None;

    progress.on_progress(10, &format!("Connecting to {}", url.host_str().unwrap_or_default()));
    wait(policy.initial_delay, cancel).await?;

    for (index, (profile, backoff)) in policy
        .attempts(config.max_identity_profile_attempts)
        .enumerate()
    {
        if index > 0 {
            debug!("Waiting {:?} before trying profile {}", backoff, profile.name);
            wait(*backoff, cancel).await?;
        }

        let client = init_client(profile, timeout)?;
        progress.on_progress(30, &format!("Request sent ({})", profile.name));
        debug!("Requesting {} with identity profile {}", url, profile.name);

        let outcome = tokio::select! {
            outcome = attempt(&client, url, profile) => outcome,
            _ = cancel.cancelled() => return Err(ScrapeError::Cancelled),
        };

        match outcome {
            AttemptOutcome::Success(result) => {
                progress.on_progress(50, "Response received");
                validate_content_type(result.final_url.as_str(), &result.content_type)?;
                info!(
                    "Fetched {} ({} bytes) with profile {}",
                    result.final_url,
                    result.body.len(),
                    result.profile
                );
                return Ok(result);
            }
            AttemptOutcome::Status(HTTP_FORBIDDEN) => {
                info!("403 from {} with profile {}, escalating", url, profile.name);
                attempts.push(AttemptFailure {
                    profile: profile.name.clone(),
                    reason: format!("HTTP {HTTP_FORBIDDEN}"),
                });
                last_failure = Some(LastFailure::Status(HTTP_FORBIDDEN));
            }
            AttemptOutcome::Status(status) => {
                warn!("HTTP {} from {} with profile {}", status, url, profile.name);
                attempts.push(AttemptFailure {
                    profile: profile.name.clone(),
                    reason: format!("HTTP {status}"),
                });
                return Err(ScrapeError::FetchHttp {
                    url: url.to_string(),
                    status,
                    attempts,
                });
            }
            AttemptOutcome::Transport(e) => {
                warn!("Request to {} failed with profile {}: {}", url, profile.name, e);
                attempts.push(AttemptFailure {
                    profile: profile.name.clone(),
                    reason: transport_reason(&e),
                });
                last_failure = Some(LastFailure::Transport);
            }
        }
    }

    let url = url.to_string();
    Err(match last_failure {
        Some(LastFailure::Status(status)) => ScrapeError::FetchHttp {
            url,
            status,
            attempts,
        },
        Some(LastFailure::Transport) | None => ScrapeError::FetchTransport { url, attempts },
    })
}
