// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Typed, panic-free reads from loosely shaped JSON (pattern configs, branches info bodies)
// role: extension/serde_json
// outputs: JsonFetch trait and JsonFetched wrapper for typed extraction with fallbacks
// invariants: No panics; missing paths yield None; `first_of` prefers earlier paths
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use serde::de::DeserializeOwned;

/// A located JSON value (or the absence of one) awaiting typed extraction.
pub struct JsonFetched<'a> {
  inner: Option<&'a serde_json::Value>,
}

impl<'a> JsonFetched<'a> {
  /// True when the path exists and is not `null`.
  pub fn is_present(&self) -> bool {
    matches!(self.inner, Some(v) if !v.is_null())
  }

  pub fn raw(&self) -> Option<&'a serde_json::Value> {
    self.inner
  }

  /// Attempt to deserialize the fetched value as `T`.
  pub fn to<T>(&self) -> Option<T>
  where
    T: DeserializeOwned,
  {
    self.inner.and_then(|v| serde_json::from_value::<T>(v.clone()).ok())
  }

  /// Render scalars as text; strings are returned without quotes.
  pub fn to_text(&self) -> Option<String> {
    match self.inner? {
      serde_json::Value::String(s) => Some(s.clone()),
      serde_json::Value::Number(n) => Some(n.to_string()),
      serde_json::Value::Bool(b) => Some(b.to_string()),
      _ => None,
    }
  }
}

/// Fetch nested values via dotted paths like "upgrades.0".
pub trait JsonFetch {
  fn fetch(&self, path: &str) -> JsonFetched<'_>;

  /// First present value among several alternative paths.
  fn first_of(&self, paths: &[&str]) -> JsonFetched<'_> {
    for path in paths {
      let fetched = self.fetch(path);
      if fetched.is_present() {
        return fetched;
      }
    }
    JsonFetched { inner: None }
  }
}

impl JsonFetch for serde_json::Value {
  fn fetch(&self, path: &str) -> JsonFetched<'_> {
    if path.is_empty() {
      return JsonFetched { inner: Some(self) };
    }

    let mut cur = self;

    for key in path.split('.') {
      let next = match cur {
        serde_json::Value::Array(items) => key.parse::<usize>().ok().and_then(|i| items.get(i)),
        _ => cur.get(key),
      };
      match next {
        Some(v) => cur = v,
        None => return JsonFetched { inner: None },
      }
    }

    JsonFetched { inner: Some(cur) }
  }
}
