//! On-disk JSON formatting.

use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};

use crate::error::StoreResult;

const INDENT: &[u8] = b"    ";

/// Serializes `value` pretty-printed with a four-space indent.
///
/// serde_json never escapes non-ASCII characters, so text such as player
/// names is written literally as UTF-8.
pub fn to_pretty_vec<T: Serialize + ?Sized>(value: &T) -> StoreResult<Vec<u8>> {
    let mut buf = Vec::with_capacity(128);
    let mut ser = Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(INDENT));
    value.serialize(&mut ser)?;
    Ok(buf)
}
