#![no_main]
use std::cell::RefCell;

use arbitrary::Arbitrary;
use jsonread::{Encoding, ReaderOptions, read, read_with_options};
use libfuzzer_sys::{fuzz_mutator, fuzz_target, fuzzer_mutate};
use rand::rngs::SmallRng; // faster than StdRng
use rand::{Rng, RngCore, SeedableRng};
use serde_json::{Map, Value};

const HEADER: usize = 1; // flags

// Flag bits.
const ENCODING_MASK: u8 = 0b0011; // 0 UTF-8, 1 UTF-16LE, 2 UTF-16BE, 3 raw bytes
const WITH_BOM: u8 = 0b0100;
const REJECT_NON_FINITE: u8 = 0b1000;

thread_local! {
    // One SmallRng per thread, seeded once from the host OS
    static RNG: RefCell<SmallRng> =
        RefCell::new(SmallRng::from_os_rng());
}

// JSON whitespace, then characters that only look like whitespace.
static WS_TABLE: &[&[u8]] = &[
    b" ",
    b"\t",
    b"\n",
    b"\r",
    b"\x0C",
    "\u{00A0}".as_bytes(),
    "\u{2028}".as_bytes(),
    "\u{FEFF}".as_bytes(),
];

/// Helper: borrow the thread-local RNG and run a closure with it.
fn with_rng<F, R>(f: F) -> R
where
    F: FnOnce(&mut SmallRng) -> R,
{
    RNG.with(|cell| f(&mut cell.borrow_mut()))
}

fn mutator(data: &mut [u8], size: usize, max_size: usize, seed: u32) -> usize {
    if size < HEADER || seed.is_multiple_of(10) {
        data[0] = with_rng(|rng| rng.next_u32() as u8 & 0x0F);

        let limit = max_size - HEADER;
        let mut prefix = HEADER;
        prefix += append_whitespace(&mut data[prefix..], limit, true);
        prefix += append_value(&mut data[prefix..], size, max_size - prefix);
        prefix += append_whitespace(&mut data[prefix..], max_size - prefix, false);
        prefix
    } else {
        fuzzer_mutate(data, size, max_size)
    }
}

/// Append up to 4 whitespace sequences to `buf`, never exceeding `limit`
/// bytes. Returns the number of bytes written.
fn append_whitespace(buf: &mut [u8], limit: usize, leading: bool) -> usize {
    with_rng(|rng| {
        if limit == 0 {
            return 0;
        }

        let count = rng.random_range(0..=4);
        let mut written = 0;

        for _ in 0..count {
            // Mostly real JSON whitespace, so the value still parses.
            let table = if rng.random_bool(0.9) { &WS_TABLE[..4] } else { WS_TABLE };
            let w = table[rng.random_range(0..table.len())];

            // A leading U+FEFF is worth keeping: it is a byte-order mark in
            // bytes and an error in text.
            if !leading && w == "\u{FEFF}".as_bytes() {
                continue;
            }
            if written + w.len() > limit {
                break;
            }

            buf[written..written + w.len()].copy_from_slice(w);
            written += w.len();
        }
        written
    })
}

fn append_value(data: &mut [u8], size: usize, limit: usize) -> usize {
    let value = loop {
        let s = with_rng(|rng| rng.random_range(size / 2..=size * 2).min(limit));
        let bytes: Vec<u8> = with_rng(|rng| (0..s).map(|_| rng.random::<u8>()).collect());
        if let Ok(value) = ArbitraryValue::arbitrary(&mut arbitrary::Unstructured::new(&bytes)) {
            break value;
        }
    };

    let pretty = with_rng(|rng| rng.random_bool(0.5));
    let serialized = if pretty {
        serde_json::to_vec_pretty(&value.0)
    } else {
        serde_json::to_vec(&value.0)
    }
    .expect("Failed to serialize arbitrary value");

    let len = serialized.len().min(limit);
    data[..len].copy_from_slice(&serialized[..len]);

    len
}

fuzz_mutator!(|data: &mut [u8], size: usize, max_size: usize, seed: u32| {
    mutator(data, size, max_size, seed)
});

#[derive(Debug)]
struct ArbitraryValue(Value);

impl<'a> Arbitrary<'a> for ArbitraryValue {
    fn arbitrary(u: &mut arbitrary::Unstructured<'_>) -> arbitrary::Result<Self> {
        let node_type = u.choose_index(21)?;
        let value = match node_type {
            0 => Value::Null,
            1 => Value::Bool(u.arbitrary()?),
            2 => {
                let n: f64 = u.arbitrary()?;
                Value::Number(
                    serde_json::Number::from_f64(n).ok_or(arbitrary::Error::IncorrectFormat)?,
                )
            }
            3..=10 => Value::String(u.arbitrary()?),
            11..=15 => {
                let elems: Vec<ArbitraryValue> = u.arbitrary()?;
                Value::Array(elems.into_iter().map(|v| v.0).collect())
            }
            16..=20 => {
                let m: Vec<(String, ArbitraryValue)> = u.arbitrary()?;
                Value::Object(Map::from_iter(m.into_iter().map(|(k, v)| (k, v.0))))
            }
            _ => Err(arbitrary::Error::IncorrectFormat)?,
        };
        Ok(ArbitraryValue(value))
    }
}

/// Re-encodes `text` as the flags ask. `None` means the raw input bytes are
/// used as they are.
fn encode(text: &str, flags: u8) -> Option<(Encoding, Vec<u8>)> {
    let (encoding, bom, mut bytes): (_, &[u8], Vec<u8>) = match flags & ENCODING_MASK {
        0 => (Encoding::Utf8, b"\xEF\xBB\xBF", text.as_bytes().to_vec()),
        1 => (
            Encoding::Utf16Le,
            b"\xFF\xFE",
            text.encode_utf16().flat_map(u16::to_le_bytes).collect(),
        ),
        2 => (
            Encoding::Utf16Be,
            b"\xFE\xFF",
            text.encode_utf16().flat_map(u16::to_be_bytes).collect(),
        ),
        _ => return None,
    };
    if flags & WITH_BOM != 0 {
        bytes.splice(0..0, bom.iter().copied());
    }
    Some((encoding, bytes))
}

fn reader(data: &[u8]) {
    let Some((&flags, body)) = data.split_first() else {
        return;
    };
    let text = String::from_utf8_lossy(body);
    let options = ReaderOptions {
        reject_non_finite_numbers: flags & REJECT_NON_FINITE != 0,
        ..ReaderOptions::default()
    };

    // Detection and decoding of whatever bytes arrive must never panic.
    let _ = read_with_options(body, options);

    let from_text = read_with_options(&*text, options);

    // Text and the same text as bytes in a configured encoding agree, errors
    // and locations included. A leading U+FEFF is a byte-order mark only in
    // the byte form.
    if let Some((encoding, bytes)) = encode(&text, flags) {
        let from_bytes = read_with_options(
            bytes.as_slice(),
            ReaderOptions {
                encoding: Some(encoding),
                ..options
            },
        );
        // Detection finds the configured encoding whenever a mark is present,
        // unless a leading NUL turns the UTF-16LE mark into the UTF-32LE one.
        if flags & WITH_BOM != 0 && !text.starts_with('\0') {
            let detected = read_with_options(bytes.as_slice(), options);
            assert_eq!(format!("{detected:?}"), format!("{from_bytes:?}"));
        }
        if !text.starts_with('\u{FEFF}') {
            assert_eq!(format!("{from_text:?}"), format!("{from_bytes:?}"));
        }
    }

    // Everything serde_json accepts is accepted.
    if serde_json::from_str::<Value>(&text).is_ok() {
        assert!(
            read(&*text).is_ok(),
            "rejected a document serde_json accepts: {text:?}"
        );
    }
}

fuzz_target!(|data: &[u8]| reader(data));
