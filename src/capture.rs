use actix_web::HttpMessage;
use actix_web::dev::{Payload, ServiceRequest};
use actix_web::error::PayloadError;
use bytes::{Bytes, BytesMut};
use futures_util::{Stream, StreamExt};

/// Read up to `limit` bytes of the request body and put a fresh payload
/// holding exactly those bytes back on the request.
///
/// Bytes past `limit` are dropped for downstream handlers too. A failing
/// payload yields an empty capture and an empty downstream body.
pub(crate) async fn capture_body(req: &mut ServiceRequest, limit: usize) -> Bytes {
    let mut payload = req.take_payload();

    let captured = match read_limited(&mut payload, limit).await {
        Ok(bytes) => bytes,
        Err(err) => {
            #[cfg(feature = "log")]
            log::debug!("Failed to read request body: {:?}", err);
            #[cfg(not(feature = "log"))]
            let _ = err;
            Bytes::new()
        }
    };

    req.set_payload(Payload::from(captured.clone()));
    captured
}

/// Collect chunks until the stream ends or `limit` bytes are buffered.
/// The stream is not polled once the limit is reached.
pub(crate) async fn read_limited<S>(stream: &mut S, limit: usize) -> Result<Bytes, PayloadError>
where
    S: Stream<Item = Result<Bytes, PayloadError>> + Unpin,
{
    let mut buf = BytesMut::new();

    while buf.len() < limit {
        let Some(chunk) = stream.next().await else {
            break;
        };
        let chunk = chunk?;
        let take = chunk.len().min(limit - buf.len());
        buf.extend_from_slice(&chunk[..take]);
    }

    Ok(buf.freeze())
}
