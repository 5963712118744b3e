// Path: crates/client/src/evm/abi.rs

//! Just enough of the Solidity ABI for the course-payment contract: static `address`
//! words, dynamic `string`s, and decoding a single `uint256` return value.

use learnchain_types::chain::Address;
use learnchain_types::error::ContractError;

const WORD: usize = 32;

/// `keccak256("getTotalCertificates()")[..4]`
pub const GET_TOTAL_CERTIFICATES: [u8; 4] = [0x78, 0x43, 0xbb, 0x79];
/// `keccak256("payForCourse(string,string,string,address,string)")[..4]`
pub const PAY_FOR_COURSE: [u8; 4] = [0x98, 0xbf, 0xc9, 0x42];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    Address(Address),
    String(String),
}

fn left_padded(bytes: &[u8]) -> [u8; WORD] {
    let mut word = [0u8; WORD];
    for (dst, src) in word.iter_mut().rev().zip(bytes.iter().rev()) {
        *dst = *src;
    }
    word
}

fn uint_word(value: u128) -> [u8; WORD] {
    left_padded(&value.to_be_bytes())
}

fn push_right_padded(out: &mut Vec<u8>, bytes: &[u8]) {
    for chunk in bytes.chunks(WORD) {
        let mut word = [0u8; WORD];
        for (dst, src) in word.iter_mut().zip(chunk) {
            *dst = *src;
        }
        out.extend_from_slice(&word);
    }
}

/// Encodes `tokens` as a tuple: one head word per token, dynamic tails appended in order.
pub fn encode(tokens: &[Token]) -> Vec<u8> {
    let head_len = tokens.len() * WORD;
    let mut head = Vec::with_capacity(head_len);
    let mut tail = Vec::new();

    for token in tokens {
        match token {
            Token::Address(address) => head.extend_from_slice(&left_padded(address.as_bytes())),
            Token::String(s) => {
                let offset = (head_len + tail.len()) as u128;
                head.extend_from_slice(&uint_word(offset));
                tail.extend_from_slice(&uint_word(s.len() as u128));
                push_right_padded(&mut tail, s.as_bytes());
            }
        }
    }

    head.extend_from_slice(&tail);
    head
}

/// Selector followed by the encoded arguments.
pub fn encode_call(selector: [u8; 4], tokens: &[Token]) -> Vec<u8> {
    let mut data = selector.to_vec();
    data.extend_from_slice(&encode(tokens));
    data
}

/// `0x`-prefixed hex, as JSON-RPC expects for `data` fields.
pub fn to_hex_data(bytes: &[u8]) -> String {
    format!("0x{}", hex::encode(bytes))
}

pub fn from_hex_data(raw: &str) -> Result<Vec<u8>, ContractError> {
    let digits = raw.strip_prefix("0x").unwrap_or(raw);
    hex::decode(digits).map_err(|e| ContractError::Decode(format!("{}: {}", raw, e)))
}

/// Decodes the first word of `data` as a `uint256`, rendered in decimal. The full 256
/// bits are kept; no native integer is wide enough.
pub fn decode_uint256_decimal(data: &[u8]) -> Result<String, ContractError> {
    let word = data.get(..WORD).ok_or_else(|| {
        ContractError::Decode(format!("expected a 32-byte word, got {} bytes", data.len()))
    })?;

    let mut digits = word.to_vec();
    let mut decimal = Vec::new();
    while digits.iter().any(|b| *b != 0) {
        let mut remainder = 0u32;
        for byte in digits.iter_mut() {
            let acc = (remainder << 8) | u32::from(*byte);
            *byte = (acc / 10) as u8;
            remainder = acc % 10;
        }
        decimal.push(b'0' + remainder as u8);
    }
    if decimal.is_empty() {
        return Ok("0".to_string());
    }
    decimal.reverse();
    String::from_utf8(decimal).map_err(|e| ContractError::Decode(e.to_string()))
}
