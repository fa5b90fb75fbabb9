use memchr::{memchr, memchr2, memchr3};

use crate::reader::Format;
use crate::utils::unquoted;

/// Outcome of the header pass: the captured header names and the byte
/// offset at which record data begins.
#[derive(Debug)]
pub(crate) struct HeaderScan {
    pub(crate) headers: Vec<String>,
    pub(crate) data_offset: usize,
}

fn header_name(cell: &[u8], quote: Option<u8>) -> String {
    let cell = match quote {
        Some(q) => unquoted(cell, q).unwrap_or(cell),
        None => cell,
    };

    String::from_utf8_lossy(cell).into_owned()
}

/// Scalar pass over the beginning of the input that captures the designated
/// header row and locates the start of data.
///
/// Rather than inspecting every byte, this hops from structural byte to
/// structural byte with `memchr`, toggling the in-quote state as quote
/// bytes are crossed. A header row past the end of input yields an empty
/// header set with `data_offset` at the end.
pub(crate) fn scan_headers(data: &[u8], format: &Format) -> HeaderScan {
    let len = data.len();

    let mut headers = Vec::new();
    let mut pos = 0;
    let mut field_start = 0;
    let mut row_idx = 0;
    let mut in_quote = false;

    while pos < len {
        if in_quote {
            match format.quote.and_then(|q| memchr(q, &data[pos..])) {
                Some(offset) => {
                    pos += offset + 1;
                    in_quote = false;
                    continue;
                }
                None => {
                    // Unterminated quoted region: it extends to end of input.
                    pos = len;
                    break;
                }
            }
        }

        let hit = match format.quote {
            Some(q) => memchr3(format.delimiter, format.terminator, q, &data[pos..]),
            None => memchr2(format.delimiter, format.terminator, &data[pos..]),
        };

        let at = match hit {
            Some(offset) => pos + offset,
            None => break,
        };

        let byte = data[at];
        pos = at + 1;

        if Some(byte) == format.quote {
            in_quote = true;
            continue;
        }

        if row_idx == format.header_row {
            headers.push(header_name(&data[field_start..at], format.quote));
        }

        field_start = at + 1;

        if byte == format.terminator {
            if row_idx == format.header_row {
                return HeaderScan {
                    headers,
                    data_offset: at + 1,
                };
            }

            row_idx += 1;
        }
    }

    // Tail without a terminator.
    if field_start < len && row_idx == format.header_row {
        headers.push(header_name(&data[field_start..len], format.quote));
    }

    HeaderScan {
        headers,
        data_offset: len,
    }
}
