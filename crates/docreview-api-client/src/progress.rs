//! Progress-reporting request body for uploads.

use bytes::Bytes;
use docreview_core::progress_percent;
use std::sync::Arc;

/// Size of each chunk handed to the transport.
pub(crate) const CHUNK_SIZE: usize = 64 * 1024;

/// Split `content` into transport chunks without copying.
pub(crate) fn chunks(content: &Bytes) -> Vec<Bytes> {
    (0..content.len())
        .step_by(CHUNK_SIZE)
        .map(|start| content.slice(start..(start + CHUNK_SIZE).min(content.len())))
        .collect()
}

/// Wrap file bytes in a streaming body that reports the percentage sent after each chunk.
pub(crate) fn progress_body(
    content: Bytes,
    on_progress: Arc<dyn Fn(f64) + Send + Sync>,
) -> reqwest::Body {
    let total = content.len() as u64;
    let mut loaded = 0u64;
    let stream = futures::stream::iter(chunks(&content).into_iter().map(move |chunk| {
        loaded += chunk.len() as u64;
        on_progress(progress_percent(loaded, Some(total)));
        Ok::<Bytes, std::io::Error>(chunk)
    }));
    reqwest::Body::wrap_stream(stream)
}
