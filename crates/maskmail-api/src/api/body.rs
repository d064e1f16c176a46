/// Lenient decoding of JSON request bodies
///
/// A body that is absent, not JSON, or not an object decodes as the
/// request's default (every field missing), and a field of the wrong JSON
/// type reads as missing. Handlers then report the missing field with the
/// endpoint's own status instead of a generic rejection.
use serde::{Deserialize, Deserializer, de::DeserializeOwned};
use serde_json::Value;
use tracing::debug;

pub fn decode<T>(body: &[u8]) -> T
where
    T: DeserializeOwned + Default,
{
    serde_json::from_slice(body).unwrap_or_else(|e| {
        if !body.is_empty() {
            debug!(error = %e, "Request body is not a JSON object, treating as empty");
        }
        T::default()
    })
}

/// `deserialize_with` helper: strings pass through, anything else is `None`
pub fn string_field<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(Some(s)),
        _ => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default, Deserialize)]
    struct Sample {
        #[serde(default, deserialize_with = "string_field")]
        name: Option<String>,
        #[serde(default, deserialize_with = "string_field")]
        note: Option<String>,
    }

    #[test]
    fn test_non_object_bodies_decode_as_default() {
        let bodies: [&[u8]; 6] = [b"", b"null", b"42", b"[1,2]", b"not json", b"{\"name\":"];
        for body in bodies {
            let sample: Sample = decode(body);
            assert!(sample.name.is_none() && sample.note.is_none());
        }
    }

    #[test]
    fn test_wrongly_typed_field_reads_as_missing() {
        let sample: Sample = decode(br#"{"name": 5, "note": "kept"}"#);
        assert_eq!(sample.name, None);
        assert_eq!(sample.note.as_deref(), Some("kept"));
    }
}
