//! Shared HTTP client configuration and streaming helpers.

use std::io::{self, Read, Write};
use std::sync::OnceLock;
use std::time::Duration;

const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
const READ_TIMEOUT: Duration = Duration::from_secs(30);
const WRITE_TIMEOUT: Duration = Duration::from_secs(30);

/// Chunk size used when spooling a response body to disk.
pub(crate) const DOWNLOAD_CHUNK_BYTES: usize = 512;

/// Return a shared HTTP agent with consistent timeouts.
pub(crate) fn agent() -> &'static ureq::Agent {
    static AGENT: OnceLock<ureq::Agent> = OnceLock::new();
    AGENT.get_or_init(|| {
        ureq::AgentBuilder::new()
            .timeout_connect(CONNECT_TIMEOUT)
            .timeout_read(READ_TIMEOUT)
            .timeout_write(WRITE_TIMEOUT)
            .build()
    })
}

/// Stream a response body to the provided writer in fixed-size chunks.
///
/// Empty reads are skipped; returns the total number of bytes written.
pub(crate) fn copy_response_to_writer(
    response: ureq::Response,
    writer: &mut impl Write,
) -> Result<u64, io::Error> {
    let mut reader = response.into_reader();
    let mut total = 0u64;
    let mut buf = [0u8; DOWNLOAD_CHUNK_BYTES];
    loop {
        let read = reader.read(&mut buf)?;
        if read == 0 {
            break;
        }
        writer.write_all(&buf[..read])?;
        total += read as u64;
    }
    Ok(total)
}
