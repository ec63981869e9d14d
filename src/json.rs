//! JSON text backend. Delegates to serde_json.
//!
//! The policies serde_json has no runtime switches for (key naming, null
//! omission, lenient numbers) are applied on the value tree between the
//! caller's type and the wire text.

use crate::error::{Error, Result};
use crate::serializer::{fail_soft, Serializer};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};
use std::io::{Read, Seek, SeekFrom};

/// Runtime policy for the JSON backend.
///
/// The defaults match what a web-facing service usually wants: camelCase
/// wire keys, no null noise, numbers accepted even when they arrive quoted.
/// Mutate the fields through the registration callback
/// ([`register_json_with`](crate::SerializerRegistry::register_json_with))
/// or build your own and hand it to [`JsonSerializer::with_options`].
#[derive(Debug, Clone)]
pub struct JsonOptions {
    /// Rename object keys snake_case → camelCase on write, and case-fold
    /// incoming keys back to snake_case on read. The fold accepts camelCase,
    /// PascalCase, and SCREAMING_SNAKE alike, so property matching is
    /// effectively case-insensitive. Default: `true`.
    pub camel_case_keys: bool,
    /// Drop null object members on write. Default: `true`.
    pub omit_nulls: bool,
    /// If typed decoding fails, coerce strings that are canonical JSON number
    /// literals into numbers and retry once. Default: `true`.
    pub lenient_numbers: bool,
    /// Traversal guard: object/array nesting deeper than this is silently
    /// pruned on write instead of erroring. Default: `64`, comfortably under
    /// serde_json's own parse recursion limit.
    pub max_depth: usize,
    /// Indented output. Default: `false` (compact).
    pub pretty: bool,
}

impl Default for JsonOptions {
    fn default() -> Self {
        Self {
            camel_case_keys: true,
            omit_nulls: true,
            lenient_numbers: true,
            max_depth: 64,
            pretty: false,
        }
    }
}

/// JSON text serializer.
///
/// ```rust
/// use codec_facade::{JsonSerializer, Serializer};
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Serialize, Deserialize)]
/// struct Login { user_name: String, retry_count: Option<u32> }
///
/// let json = JsonSerializer::new();
/// let text = json.serialize(&Login { user_name: "ada".into(), retry_count: None }).unwrap();
/// assert_eq!(text, r#"{"userName":"ada"}"#);
/// ```
#[derive(Debug, Clone, Default)]
pub struct JsonSerializer {
    options: JsonOptions,
}

impl JsonSerializer {
    /// Serializer with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Serializer with explicit options.
    pub fn with_options(options: JsonOptions) -> Self {
        Self { options }
    }

    /// The options this serializer was built with.
    #[must_use]
    pub fn options(&self) -> &JsonOptions {
        &self.options
    }

    // ---- strict API -------------------------------------------------------

    /// Encode to JSON text, surfacing the failure instead of swallowing it.
    pub fn try_serialize<T: Serialize>(&self, value: &T) -> Result<String> {
        let tree = self.encode_tree(value)?;
        let text = if self.options.pretty {
            serde_json::to_string_pretty(&tree)
        } else {
            serde_json::to_string(&tree)
        };
        text.map_err(|e| Error::Encode(e.to_string()))
    }

    /// Encode to UTF-8 JSON bytes.
    pub fn try_serialize_to_bytes<T: Serialize>(&self, value: &T) -> Result<Vec<u8>> {
        let tree = self.encode_tree(value)?;
        let bytes = if self.options.pretty {
            serde_json::to_vec_pretty(&tree)
        } else {
            serde_json::to_vec(&tree)
        };
        bytes.map_err(|e| Error::Encode(e.to_string()))
    }

    /// Decode from JSON text.
    pub fn try_deserialize<T: DeserializeOwned>(&self, text: &str) -> Result<T> {
        let tree = serde_json::from_str(text).map_err(|e| Error::Decode(e.to_string()))?;
        self.decode_tree(tree)
    }

    /// Decode from UTF-8 JSON bytes.
    pub fn try_deserialize_bytes<T: DeserializeOwned>(&self, bytes: &[u8]) -> Result<T> {
        let tree = serde_json::from_slice(bytes).map_err(|e| Error::Decode(e.to_string()))?;
        self.decode_tree(tree)
    }

    /// Decode from a reader positioned at the start of the payload.
    pub fn try_deserialize_reader<T: DeserializeOwned, R: Read>(&self, reader: R) -> Result<T> {
        let tree: Value = serde_json::from_reader(reader)?;
        self.decode_tree(tree)
    }

    /// Decode from a seekable reader, rewinding it first.
    pub fn try_deserialize_seek<T: DeserializeOwned, R: Read + Seek>(
        &self,
        mut reader: R,
    ) -> Result<T> {
        reader.seek(SeekFrom::Start(0))?;
        self.try_deserialize_reader(reader)
    }

    // ---- internal ---------------------------------------------------------

    fn encode_tree<T: Serialize>(&self, value: &T) -> Result<Value> {
        let tree = serde_json::to_value(value).map_err(|e| Error::Encode(e.to_string()))?;
        Ok(normalize(tree, &self.options))
    }

    fn decode_tree<T: DeserializeOwned>(&self, tree: Value) -> Result<T> {
        let tree = if self.options.camel_case_keys {
            fold_keys(tree)
        } else {
            tree
        };
        if !self.options.lenient_numbers {
            return serde_json::from_value(tree).map_err(Error::from);
        }
        match serde_json::from_value(tree.clone()) {
            Ok(value) => Ok(value),
            // retry with quoted numbers unquoted; report the original error
            Err(first) => {
                serde_json::from_value(coerce_numbers(tree)).map_err(|_| Error::from(first))
            }
        }
    }
}

impl Serializer for JsonSerializer {
    fn serialize<T: Serialize>(&self, value: &T) -> Option<String> {
        fail_soft("json serialize", self.try_serialize(value))
    }

    fn serialize_to_bytes<T: Serialize>(&self, value: &T) -> Option<Vec<u8>> {
        fail_soft("json serialize to bytes", self.try_serialize_to_bytes(value))
    }

    fn deserialize<T: DeserializeOwned>(&self, text: &str) -> Option<T> {
        fail_soft("json deserialize", self.try_deserialize(text))
    }

    fn deserialize_bytes<T: DeserializeOwned>(&self, bytes: &[u8]) -> Option<T> {
        fail_soft("json deserialize bytes", self.try_deserialize_bytes(bytes))
    }

    fn deserialize_reader<T: DeserializeOwned, R: Read>(&self, reader: R) -> Option<T> {
        fail_soft("json deserialize reader", self.try_deserialize_reader(reader))
    }

    fn deserialize_seek<T: DeserializeOwned, R: Read + Seek>(&self, reader: R) -> Option<T> {
        fail_soft("json deserialize seek", self.try_deserialize_seek(reader))
    }
}

// ---------------------------------------------------------------------------
// Value-tree passes
// ---------------------------------------------------------------------------

/// Outbound pass: key renaming, null omission, depth pruning.
fn normalize(tree: Value, opts: &JsonOptions) -> Value {
    walk_out(tree, opts, 0).unwrap_or(Value::Null)
}

fn walk_out(tree: Value, opts: &JsonOptions, depth: usize) -> Option<Value> {
    if depth > opts.max_depth {
        return None;
    }
    match tree {
        Value::Object(members) => {
            let mut out = Map::with_capacity(members.len());
            for (key, value) in members {
                if opts.omit_nulls && value.is_null() {
                    continue;
                }
                let Some(value) = walk_out(value, opts, depth + 1) else {
                    // pruned past max_depth; omit the member entirely
                    continue;
                };
                let key = if opts.camel_case_keys {
                    camel_case(&key)
                } else {
                    key
                };
                out.insert(key, value);
            }
            Some(Value::Object(out))
        }
        Value::Array(items) => {
            let items = items
                .into_iter()
                .filter_map(|item| walk_out(item, opts, depth + 1))
                .collect();
            Some(Value::Array(items))
        }
        scalar => Some(scalar),
    }
}

/// Inbound pass: fold every object key to snake_case so camelCase, PascalCase
/// and SCREAMING_SNAKE payloads all match snake_case struct fields.
fn fold_keys(tree: Value) -> Value {
    match tree {
        Value::Object(members) => {
            let mut out = Map::with_capacity(members.len());
            for (key, value) in members {
                out.insert(snake_case(&key), fold_keys(value));
            }
            Value::Object(out)
        }
        Value::Array(items) => Value::Array(items.into_iter().map(fold_keys).collect()),
        scalar => scalar,
    }
}

/// Inbound retry pass: strings that are canonical JSON number literals become
/// numbers. Only runs after a typed decode has already failed.
fn coerce_numbers(tree: Value) -> Value {
    match tree {
        Value::Object(members) => {
            let mut out = Map::with_capacity(members.len());
            for (key, value) in members {
                out.insert(key, coerce_numbers(value));
            }
            Value::Object(out)
        }
        Value::Array(items) => Value::Array(items.into_iter().map(coerce_numbers).collect()),
        Value::String(text) => match parse_json_number(&text) {
            Some(number) => Value::Number(number),
            None => Value::String(text),
        },
        scalar => scalar,
    }
}

/// Parse `text` as a JSON number literal. Rejects anything the JSON grammar
/// rejects (leading `+`, leading zeros, whitespace) so strings like `"01234"`
/// stay strings.
fn parse_json_number(text: &str) -> Option<serde_json::Number> {
    let digits = text.strip_prefix('-').unwrap_or(text);
    let mut chars = digits.chars();
    match chars.next() {
        Some('0') => {
            if !matches!(chars.next(), None | Some('.' | 'e' | 'E')) {
                return None;
            }
        }
        Some(c) if c.is_ascii_digit() => {}
        _ => return None,
    }
    text.parse().ok()
}

// ---- key case helpers ---------------------------------------------------

fn camel_case(key: &str) -> String {
    let mut out = String::with_capacity(key.len());
    let mut upper_next = false;
    for (i, ch) in key.chars().enumerate() {
        if ch == '_' && i > 0 {
            upper_next = true;
            continue;
        }
        if i == 0 {
            out.extend(ch.to_lowercase());
        } else if upper_next {
            out.extend(ch.to_uppercase());
            upper_next = false;
        } else {
            out.push(ch);
        }
    }
    out
}

fn snake_case(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    let mut out = String::with_capacity(key.len() + 4);
    for (i, &ch) in chars.iter().enumerate() {
        if ch.is_uppercase() {
            let after_lower = i > 0 && (chars[i - 1].is_lowercase() || chars[i - 1].is_ascii_digit());
            let before_lower = chars.get(i + 1).is_some_and(|c| c.is_lowercase());
            if i > 0 && chars[i - 1] != '_' && (after_lower || before_lower) {
                out.push('_');
            }
            out.extend(ch.to_lowercase());
        } else {
            out.push(ch);
        }
    }
    out
}
