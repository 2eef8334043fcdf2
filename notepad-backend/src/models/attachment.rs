//! Inline attachments carried as self-contained `data:` URLs

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};

use super::ValidationError;

/// Small file embedded in a note. `url` is the whole payload; nothing is stored elsewhere.
/// All three fields must be present as strings; their contents are up to the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    pub name: String,
    pub url: String,
    #[serde(rename = "type")]
    pub media_type: String,
}

impl Attachment {
    /// Normalize one attachment of a note request. Any name and url are accepted;
    /// `index` only feeds the error's field path.
    ///
    /// An empty `type` is filled in from a `data:` url. When `max_bytes` is set, the
    /// decoded payload of a `data:` url must fit within it.
    pub fn validate(mut self, index: usize, max_bytes: Option<usize>) -> Result<Self, ValidationError> {
        let Some(data_url) = DataUrl::parse(&self.url) else {
            return Ok(self);
        };

        if let Some(max_bytes) = max_bytes {
            let field = format!("attachments.{}.url", index);
            let size = data_url
                .decoded_len()
                .map_err(|_| ValidationError::new(field.clone(), "Attachment payload is not valid base64"))?;
            if size > max_bytes {
                return Err(ValidationError::new(
                    field,
                    format!("Attachment exceeds the {} byte limit", max_bytes),
                ));
            }
        }

        if self.media_type.trim().is_empty() {
            self.media_type = data_url.media_type.to_string();
        }

        Ok(self)
    }
}

/// Borrowed view over `data:[<media type>][;base64],<payload>`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DataUrl<'a> {
    pub media_type: &'a str,
    pub is_base64: bool,
    pub payload: &'a str,
}

impl<'a> DataUrl<'a> {
    pub fn parse(url: &'a str) -> Option<Self> {
        let rest = url.strip_prefix("data:")?;
        let (meta, payload) = rest.split_once(',')?;

        let (meta, is_base64) = match meta.strip_suffix(";base64") {
            Some(m) => (m, true),
            None => (meta, false),
        };

        // Parameters such as `;charset=utf-8` are not part of the media type
        let media_type = meta.split(';').next().unwrap_or("").trim();
        let media_type = if media_type.is_empty() {
            "text/plain"
        } else {
            media_type
        };

        Some(Self {
            media_type,
            is_base64,
            payload,
        })
    }

    /// Size of the embedded file in bytes
    pub fn decoded_len(&self) -> Result<usize, base64::DecodeError> {
        if self.is_base64 {
            Ok(STANDARD.decode(self.payload.trim())?.len())
        } else {
            // `%41` is one byte of payload, not three
            Ok(urlencoding::decode_binary(self.payload.as_bytes()).len())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attachment(name: &str, url: &str, media_type: &str) -> Attachment {
        Attachment {
            name: name.to_string(),
            url: url.to_string(),
            media_type: media_type.to_string(),
        }
    }

    #[test]
    fn test_parse_base64_data_url() {
        let parsed = DataUrl::parse("data:image/png;base64,aGVsbG8=").unwrap();
        assert_eq!(parsed.media_type, "image/png");
        assert!(parsed.is_base64);
        assert_eq!(parsed.decoded_len().unwrap(), 5);
    }

    #[test]
    fn test_parse_plain_data_url_with_params() {
        let parsed = DataUrl::parse("data:text/plain;charset=utf-8,hi there").unwrap();
        assert_eq!(parsed.media_type, "text/plain");
        assert!(!parsed.is_base64);
        assert_eq!(parsed.decoded_len().unwrap(), 8);

        let bare = DataUrl::parse("data:,x").unwrap();
        assert_eq!(bare.media_type, "text/plain");
    }

    #[test]
    fn test_percent_encoded_payload_counts_decoded_bytes() {
        let parsed = DataUrl::parse("data:,%41%42").unwrap();
        assert_eq!(parsed.decoded_len().unwrap(), 2);

        let err = attachment("ab.txt", "data:,%41%42%43", "")
            .validate(0, Some(2))
            .unwrap_err();
        assert!(err.message.contains("2 byte limit"));
        assert!(attachment("ab.txt", "data:,%41%42", "").validate(0, Some(2)).is_ok());
    }

    #[test]
    fn test_any_name_and_url_accepted() {
        assert!(DataUrl::parse("https://example.com/a.png").is_none());
        assert!(DataUrl::parse("data:image/png;base64").is_none());

        let kept = attachment("", "https://example.com/a.png", "")
            .validate(2, Some(1))
            .unwrap();
        assert_eq!(kept, attachment("", "https://example.com/a.png", ""));

        let kept = attachment(" ", "not a url", "x/y").validate(0, None).unwrap();
        assert_eq!(kept.name, " ");
        assert_eq!(kept.media_type, "x/y");
    }

    #[test]
    fn test_media_type_filled_from_url() {
        let validated = attachment("hello.txt", "data:text/plain;base64,aGVsbG8=", "")
            .validate(0, None)
            .unwrap();
        assert_eq!(validated.media_type, "text/plain");

        let validated = attachment("a.png", "data:image/png;base64,aGVsbG8=", "image/x-custom")
            .validate(0, None)
            .unwrap();
        assert_eq!(validated.media_type, "image/x-custom");
    }

    #[test]
    fn test_size_limit_only_when_configured() {
        let big = attachment("hello.txt", "data:text/plain;base64,aGVsbG8=", "text/plain");
        assert!(big.clone().validate(0, None).is_ok());

        let err = big.validate(0, Some(4)).unwrap_err();
        assert_eq!(err.field, "attachments.0.url");
        assert!(err.message.contains("4 byte limit"));
    }

    #[test]
    fn test_invalid_base64_only_checked_with_limit() {
        let bad = attachment("x.bin", "data:application/octet-stream;base64,@@@", "");
        assert!(bad.clone().validate(0, None).is_ok());

        let err = bad.validate(1, Some(1024)).unwrap_err();
        assert_eq!(err.field, "attachments.1.url");
        assert_eq!(err.message, "Attachment payload is not valid base64");
    }

    #[test]
    fn test_wire_format_uses_type_key() {
        let json = serde_json::to_value(attachment("a", "data:,x", "text/plain")).unwrap();
        assert_eq!(json["type"], "text/plain");
        assert!(json.get("media_type").is_none());
    }

    #[test]
    fn test_shape_requires_string_fields() {
        let ok: Attachment =
            serde_json::from_str(r#"{"name":"","url":"blob:x","type":""}"#).unwrap();
        assert_eq!(ok.url, "blob:x");

        assert!(serde_json::from_str::<Attachment>(r#"{"name":"a","type":"t"}"#).is_err());
        assert!(serde_json::from_str::<Attachment>(r#"{"name":1,"url":"u","type":"t"}"#).is_err());
    }
}
