use futures_util::StreamExt;
use tokio::time::{timeout_at, Duration, Instant};

use crate::agent::interface::TextStream;
use crate::config::StreamLimits;
use crate::error::DelegateError;

/// Drain a streamed agent reply into a single string.
///
/// Fragments are appended strictly in arrival order with no separators;
/// an empty stream yields an empty string. The drain is bounded by the
/// configured byte cap and deadline so a stalled or runaway upstream
/// cannot hold the request open indefinitely.
pub async fn collect_text(
    mut stream: TextStream,
    limits: &StreamLimits,
) -> Result<String, DelegateError> {
    let deadline = Instant::now() + Duration::from_secs(limits.drain_timeout_secs);
    let mut text = String::new();

    loop {
        let item = timeout_at(deadline, stream.next())
            .await
            .map_err(|_| DelegateError::Timeout(limits.drain_timeout_secs))?;

        match item {
            Some(Ok(fragment)) => {
                if text.len() + fragment.len() > limits.max_response_bytes {
                    return Err(DelegateError::TooLarge(limits.max_response_bytes));
                }
                text.push_str(&fragment);
            }
            Some(Err(e)) => return Err(DelegateError::Upstream(e.to_string())),
            None => return Ok(text),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::stream;

    fn fragments(parts: &[&str]) -> TextStream {
        let items: Vec<Result<String, anyhow::Error>> =
            parts.iter().map(|p| Ok(p.to_string())).collect();
        Box::new(stream::iter(items))
    }

    #[tokio::test]
    async fn concatenates_fragments_in_arrival_order() {
        let text = collect_text(fragments(&["Sun", "ny", "!"]), &StreamLimits::default())
            .await
            .unwrap();
        assert_eq!(text, "Sunny!");
    }

    #[tokio::test]
    async fn empty_stream_yields_empty_string() {
        let text = collect_text(fragments(&[]), &StreamLimits::default())
            .await
            .unwrap();
        assert_eq!(text, "");
    }

    #[tokio::test]
    async fn failed_item_surfaces_the_upstream_message() {
        let items: Vec<Result<String, anyhow::Error>> = vec![
            Ok("partial".to_string()),
            Err(anyhow::anyhow!("connection reset")),
        ];
        let err = collect_text(Box::new(stream::iter(items)), &StreamLimits::default())
            .await
            .unwrap_err();
        assert!(matches!(err, DelegateError::Upstream(m) if m == "connection reset"));
    }

    #[tokio::test]
    async fn oversized_reply_is_rejected() {
        let limits = StreamLimits {
            max_response_bytes: 8,
            drain_timeout_secs: 60,
        };
        let err = collect_text(fragments(&["12345", "67890"]), &limits)
            .await
            .unwrap_err();
        assert!(matches!(err, DelegateError::TooLarge(8)));
    }

    #[tokio::test(start_paused = true)]
    async fn stalled_stream_times_out() {
        let limits = StreamLimits {
            max_response_bytes: 1024,
            drain_timeout_secs: 5,
        };
        let stalled: TextStream = Box::new(stream::pending());
        let err = collect_text(stalled, &limits).await.unwrap_err();
        assert!(matches!(err, DelegateError::Timeout(5)));
    }
}
