use std::io::{self, Read};
use std::time::Duration;

use reqwest::blocking::{Client, Response};
use reqwest::header::{CONTENT_RANGE, RANGE};
use reqwest::StatusCode;

use super::SeekableSource;
use crate::error::{Error, Result};

/// A remote resource read with HTTP range requests.
///
/// The total length is discovered once when the source is opened. Every [`read`] issues a
/// single `Range: bytes=a-b` request, so this source should almost always be wrapped in a
/// [`BufferedReader`](crate::BufferedReader). Failed requests are not retried.
///
/// [`read`]: SeekableSource::read
#[derive(Debug)]
pub struct HttpSource {
    client: Client,
    url: String,
    position: u64,
    length: u64,
}

impl HttpSource {
    /// Request timeout used by [`HttpSource::open`].
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

    /// Opens `url` with a fresh client using [`HttpSource::DEFAULT_TIMEOUT`].
    pub fn open(url: impl Into<String>) -> Result<Self> {
        Self::open_with_timeout(url, Self::DEFAULT_TIMEOUT)
    }

    /// Opens `url` with a fresh client using a custom request timeout.
    pub fn open_with_timeout(url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("seekbuf/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(Error::Request)?;
        Self::with_client(client, url)
    }

    /// Opens `url` with an existing client, sharing its connection pool.
    pub fn with_client(client: Client, url: impl Into<String>) -> Result<Self> {
        let url = url.into();
        let response = client
            .get(&url)
            .header(RANGE, "bytes=0-0")
            .send()
            .map_err(Error::Request)?;
        let length = resource_length(&response, &url)?;

        #[cfg(feature = "tracing")]
        tracing::debug!(url = %url, length, "opened http source");

        Ok(HttpSource {
            client,
            url,
            position: 0,
            length,
        })
    }

    /// The requested URL.
    pub fn url(&self) -> &str {
        &self.url
    }

    fn fetch(&self, start: u64, end: u64) -> io::Result<Response> {
        #[cfg(feature = "tracing")]
        tracing::trace!(url = %self.url, start, end, "range request");

        let response = self
            .client
            .get(&self.url)
            .header(RANGE, format!("bytes={start}-{end}"))
            .send()
            .map_err(|e| io::Error::other(Error::Request(e)))?;

        match response.status() {
            StatusCode::PARTIAL_CONTENT => {
                let first = content_range(&response)
                    .and_then(parse_content_range)
                    .and_then(|range| range.first);
                if first == Some(start) {
                    Ok(response)
                } else {
                    Err(io::Error::new(
                        io::ErrorKind::InvalidData,
                        format!(
                            "'{}' answered a range request at {start} with a range starting at {first:?}",
                            self.url
                        ),
                    ))
                }
            }
            // the server ignored the range, the body starts at offset 0
            StatusCode::OK if start == 0 => Ok(response),
            StatusCode::OK => Err(io::Error::new(
                io::ErrorKind::Unsupported,
                format!("server ignored range request for '{}'", self.url),
            )),
            status => Err(io::Error::other(Error::Http {
                status: status.as_u16(),
                url: self.url.clone(),
            })),
        }
    }
}

fn content_range(response: &Response) -> Option<&str> {
    response
        .headers()
        .get(CONTENT_RANGE)
        .and_then(|value| value.to_str().ok())
}

fn resource_length(response: &Response, url: &str) -> Result<u64> {
    match response.status() {
        StatusCode::PARTIAL_CONTENT | StatusCode::RANGE_NOT_SATISFIABLE => {
            let value = content_range(response).ok_or_else(|| {
                Error::InvalidContentRange(format!("missing Content-Range header for '{url}'"))
            })?;
            parse_content_range(value)
                .and_then(|range| range.complete_length)
                .ok_or_else(|| Error::InvalidContentRange(value.to_owned()))
        }
        status if status.is_success() => response.content_length().ok_or_else(|| {
            Error::InvalidContentRange(format!("missing Content-Length header for '{url}'"))
        }),
        status => Err(Error::Http {
            status: status.as_u16(),
            url: url.to_owned(),
        }),
    }
}

/// A parsed `Content-Range` header value.
#[derive(Debug, PartialEq, Eq)]
struct ContentRange {
    /// First byte of the range, `None` for an unsatisfied range (`bytes */N`).
    first: Option<u64>,
    /// `None` when the server reports the complete length as unknown (`*`).
    complete_length: Option<u64>,
}

/// Parses a `Content-Range` header value such as `bytes 0-0/1234` or `bytes */1234`.
fn parse_content_range(value: &str) -> Option<ContentRange> {
    let rest = value.trim().strip_prefix("bytes")?.trim_start();
    let (range, total) = rest.split_once('/')?;
    let first = match range {
        "*" => None,
        range => {
            let (first, last) = range.split_once('-')?;
            let first: u64 = first.trim().parse().ok()?;
            let last: u64 = last.trim().parse().ok()?;
            if last < first {
                return None;
            }
            Some(first)
        }
    };
    let complete_length = match total.trim() {
        "*" => None,
        total => Some(total.parse().ok()?),
    };
    Some(ContentRange {
        first,
        complete_length,
    })
}

impl SeekableSource for HttpSource {
    #[inline]
    fn length(&self) -> io::Result<u64> {
        Ok(self.length)
    }

    #[inline]
    fn position(&self) -> io::Result<u64> {
        Ok(self.position)
    }

    #[inline]
    fn seek(&mut self, pos: u64) -> io::Result<()> {
        self.position = pos;
        Ok(())
    }

    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if buf.is_empty() || self.position >= self.length {
            return Ok(0);
        }
        let wanted = (self.length - self.position).min(buf.len() as u64) as usize;
        let mut response = self.fetch(self.position, self.position + wanted as u64 - 1)?;

        let mut total = 0;
        while total < wanted {
            match response.read(&mut buf[total..wanted]) {
                Ok(0) => break,
                Ok(n) => total += n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }
        self.position += total as u64;
        Ok(total)
    }

    #[inline]
    fn source(&self) -> &str {
        &self.url
    }
}
