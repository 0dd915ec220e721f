use serde::{Deserialize, Serialize};

/// A signal value recorded in a trace.
///
/// Scalar changes are one of `Zero`, `One`, or `Unknown` (the VCD `x`/`z`
/// states collapse to `Unknown`). Multi-bit changes keep their raw
/// bit-string, which may itself contain `x`/`z` characters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SignalValue {
    Zero,
    One,
    Unknown,
    Vector(String),
}

impl SignalValue {
    /// Interpret a VCD scalar value character.
    pub fn from_scalar(c: char) -> Self {
        match c {
            '0' => SignalValue::Zero,
            '1' => SignalValue::One,
            _ => SignalValue::Unknown,
        }
    }

    /// Binary-to-hexadecimal conversion, e.g. `1010` -> `0xa`.
    ///
    /// Returns `None` when the value has no defined two-state encoding:
    /// an unknown scalar, an empty vector, or a vector containing `x`/`z`
    /// bits. Callers decide what to do with inconvertible values.
    pub fn to_hex(&self) -> Option<String> {
        match self {
            SignalValue::Zero => Some("0x0".to_string()),
            SignalValue::One => Some("0x1".to_string()),
            SignalValue::Unknown => None,
            SignalValue::Vector(bits) => bits_to_hex(bits),
        }
    }

    /// Plain text rendering: `0`, `1`, `x`, or the raw vector bits.
    pub fn render(&self) -> &str {
        match self {
            SignalValue::Zero => "0",
            SignalValue::One => "1",
            SignalValue::Unknown => "x",
            SignalValue::Vector(bits) => bits,
        }
    }
}

/// Convert a two-state bit-string of arbitrary width to `0x..` text.
fn bits_to_hex(bits: &str) -> Option<String> {
    if bits.is_empty() || !bits.bytes().all(|b| b == b'0' || b == b'1') {
        return None;
    }
    // Strip leading zeros so 0b0001 renders as 0x1, matching integer formatting.
    let trimmed = bits.trim_start_matches('0');
    let trimmed = if trimmed.is_empty() { "0" } else { trimmed };

    let mut out = String::from("0x");
    let mut digits = Vec::new();
    for chunk in trimmed.as_bytes().rchunks(4) {
        let mut nibble = 0u8;
        for &b in chunk {
            nibble = (nibble << 1) | (b - b'0');
        }
        digits.push(std::char::from_digit(u32::from(nibble), 16)?);
    }
    out.extend(digits.iter().rev());
    Some(out)
}
