//! Canonical payload bytes shared by signers and the verifier.
//!
//! Compact JSON, object keys sorted lexicographically at every depth. The
//! bytes match `json.dumps(obj, sort_keys=True, separators=(",", ":"))`:
//! non-ASCII characters are written as `\uXXXX` escapes (UTF-16 surrogate
//! pairs above the BMP) and floats use shortest round-trip digits with an
//! exponent below `1e-4` and from `1e16` up (`1e-05`, `1e+16`).
//! Any change here invalidates every signature produced by existing clients.

use std::io;

use serde::Serialize;
use serde_json::ser::Formatter;
use serde_json::{Map, Value};

use cre_core::errors::CreResult;

/// Serialize `v` to canonical JSON bytes.
pub fn canonical_json(v: &impl Serialize) -> CreResult<Vec<u8>> {
    let value = sort_json(serde_json::to_value(v)?);
    let mut out = Vec::new();
    let mut ser = serde_json::Serializer::with_formatter(&mut out, AsciiFormatter);
    value.serialize(&mut ser)?;
    Ok(out)
}

/// Compact output with ASCII-only strings and repr-style floats.
struct AsciiFormatter;

impl Formatter for AsciiFormatter {
    fn write_string_fragment<W>(&mut self, writer: &mut W, fragment: &str) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if fragment.is_ascii() {
            return writer.write_all(fragment.as_bytes());
        }
        let mut units = [0u16; 2];
        for ch in fragment.chars() {
            if ch.is_ascii() {
                writer.write_all(&[ch as u8])?;
            } else {
                for unit in ch.encode_utf16(&mut units).iter() {
                    write!(writer, "\\u{unit:04x}")?;
                }
            }
        }
        Ok(())
    }

    fn write_f64<W>(&mut self, writer: &mut W, value: f64) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        writer.write_all(float_repr(value).as_bytes())
    }
}

/// Shortest round-trip decimal form of a finite float, `1.0` style for
/// integral values, scientific with a signed two-digit exponent outside
/// `[1e-4, 1e16)`.
fn float_repr(value: f64) -> String {
    let sci = format!("{value:e}");
    let Some((mantissa, exp)) = sci.split_once('e') else {
        return value.to_string();
    };
    let exp: i32 = exp.parse().unwrap_or(0);
    let (sign, mantissa) = match mantissa.strip_prefix('-') {
        Some(m) => ("-", m),
        None => ("", mantissa),
    };
    let digits: String = mantissa.chars().filter(|c| *c != '.').collect();

    if !(-4..16).contains(&exp) {
        let (head, tail) = digits.split_at(1);
        let frac = if tail.is_empty() { String::new() } else { format!(".{tail}") };
        let exp_sign = if exp < 0 { '-' } else { '+' };
        return format!("{sign}{head}{frac}e{exp_sign}{:02}", exp.abs());
    }
    if exp < 0 {
        let zeros = "0".repeat((-exp - 1) as usize);
        return format!("{sign}0.{zeros}{digits}");
    }
    let int_len = exp as usize + 1;
    if digits.len() <= int_len {
        let pad = "0".repeat(int_len - digits.len());
        format!("{sign}{digits}{pad}.0")
    } else {
        let (int_part, frac) = digits.split_at(int_len);
        format!("{sign}{int_part}.{frac}")
    }
}

fn sort_json(v: Value) -> Value {
    match v {
        Value::Object(map) => {
            let mut entries: Vec<(String, Value)> = map.into_iter().collect();
            entries.sort_by(|a, b| a.0.cmp(&b.0));
            let mut sorted = Map::new();
            for (k, val) in entries {
                sorted.insert(k, sort_json(val));
            }
            Value::Object(sorted)
        }
        Value::Array(arr) => Value::Array(arr.into_iter().map(sort_json).collect()),
        other => other,
    }
}

#[derive(Serialize)]
struct ClaimPayload<'a> {
    agent: &'a str,
    entity: &'a str,
    value: &'a str,
    confidence: f64,
}

#[derive(Serialize)]
struct OverrideSetPayload<'a> {
    entity: &'a str,
    value: &'a str,
    reason: &'a str,
}

#[derive(Serialize)]
struct OverrideClearPayload<'a> {
    entity: &'a str,
}

/// Bytes signed for a claim submission: `{agent, confidence, entity, value}`.
pub fn claim_payload(agent: &str, entity: &str, value: &str, confidence: f64) -> CreResult<Vec<u8>> {
    canonical_json(&ClaimPayload {
        agent,
        entity,
        value,
        confidence,
    })
}

/// Bytes signed when installing an override: `{entity, reason, value}`.
pub fn override_set_payload(entity: &str, value: &str, reason: &str) -> CreResult<Vec<u8>> {
    canonical_json(&OverrideSetPayload {
        entity,
        value,
        reason,
    })
}

/// Bytes signed when clearing an override: `{entity}`.
pub fn override_clear_payload(entity: &str) -> CreResult<Vec<u8>> {
    canonical_json(&OverrideClearPayload { entity })
}

/// Hex blake3 digest of a payload, recorded in audit entries.
pub fn payload_digest(payload: &[u8]) -> String {
    blake3::hash(payload).to_hex().to_string()
}
