use crate::classifier::{prefix_xor, Classifier, CHUNK};
use crate::prefetch::PUBLISH_EVERY;
use crate::reader::Format;
use crate::records::Row;
use crate::utils::unquoted;

#[inline(always)]
fn trim_cell(cell: &[u8], quote: Option<u8>) -> &[u8] {
    match quote {
        Some(q) => unquoted(cell, q).unwrap_or(cell),
        None => cell,
    }
}

/// Stream the records of `data[start..]` into `consumer`.
///
/// The bulk of the input is consumed 32 bytes at a time: each window is
/// reduced to structural bitmasks, quotes are folded into an inside-quotes
/// mask through a prefix-XOR with a carry bit threading the open state
/// across windows, and the surviving structural bits are drained in
/// ascending order. The sub-window suffix is finished one byte at a time
/// with the same semantics, and a trailing record without a terminator is
/// flushed at the end.
///
/// `checkpoint` is invoked with the current offset every
/// [`PUBLISH_EVERY`] bytes of progress.
pub(crate) fn scan_records<'d, F, P>(
    data: &'d [u8],
    start: usize,
    format: &Format,
    width: usize,
    mut checkpoint: P,
    consumer: &mut F,
) where
    F: FnMut(&Row<'d>),
    P: FnMut(usize),
{
    let end = data.len();
    let quote = format.quote;
    let classifier = Classifier::new(format.delimiter, format.terminator, quote);

    let mut row = Row::with_width(width);
    let mut field_start = start;
    let mut pos = start;
    let mut carry: u32 = 0;
    let mut next_checkpoint = start + PUBLISH_EVERY;

    while pos + CHUNK <= end {
        // SAFETY: at least CHUNK bytes remain at `pos`.
        let masks = unsafe { classifier.classify(data.as_ptr().add(pos)) };

        let mut solid = 0u32;

        if quote.is_some() {
            // Bit i is set iff position i sits inside an open quoted region,
            // inclusive of the opening quote, exclusive of the closing one.
            // A set carry flips the whole window.
            solid = prefix_xor(masks.quotes) ^ carry.wrapping_neg();
            carry ^= masks.quotes.count_ones() & 1;
        }

        let terminators = masks.terminators & !solid;
        let mut structural = (masks.delimiters & !solid) | terminators;

        while structural != 0 {
            let offset = structural.trailing_zeros() as usize;
            let at = pos + offset;

            row.push(trim_cell(&data[field_start..at], quote));
            field_start = at + 1;

            if (terminators >> offset) & 1 != 0 {
                row.pad();
                consumer(&row);
                row.reset();
            }

            structural &= structural - 1;
        }

        pos += CHUNK;

        if pos >= next_checkpoint {
            checkpoint(pos);
            next_checkpoint = pos + PUBLISH_EVERY;
        }
    }

    // Residual suffix smaller than one window.
    let mut in_quote = carry != 0;

    while pos < end {
        let byte = data[pos];

        if quote == Some(byte) {
            in_quote = !in_quote;
        } else if !in_quote && (byte == format.delimiter || byte == format.terminator) {
            row.push(trim_cell(&data[field_start..pos], quote));
            field_start = pos + 1;

            if byte == format.terminator {
                row.pad();
                consumer(&row);
                row.reset();
            }
        }

        pos += 1;
    }

    // Trailing record without a terminator.
    if field_start < end {
        row.push(trim_cell(&data[field_start..end], quote));
    }

    if row.is_started() {
        row.pad();
        consumer(&row);
        row.reset();
    }
}
