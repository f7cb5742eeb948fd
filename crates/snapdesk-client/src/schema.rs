use serde::{Deserialize, Serialize};
use serde_json::Value;

/// An indicator series, oldest first. `None` marks a point where the
/// indicator has no value yet (not enough history).
pub type Series = Vec<Option<f64>>;

/// Body of `GET /api/snapshot` once the backend has seen its first candle.
/// ```json
/// {
///     "symbol": "BTCUSDT",
///     "interval": "1m",
///     "last": { "c": 64123.5 },
///     "ema9": [null, null, 64010.2],
///     "ema21": [null, null, null],
///     "rsi14": [null, 55.31]
/// }
/// ```
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub symbol: String,
    pub interval: String,
    pub last: Candle,
    pub ema9: Series,
    pub ema21: Series,
    pub rsi14: Series,
}

/// Latest candle; only the close is rendered.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq)]
pub struct Candle {
    #[serde(rename = "c")]
    pub close: f64,
}

/// What a snapshot body turned out to be.
#[derive(Debug, Clone, PartialEq)]
pub enum SnapshotReading {
    /// `last` is absent, null or another falsy value: the backend has no
    /// candles yet.
    Pending,
    Ready(Snapshot),
}

impl SnapshotReading {
    /// Reads a snapshot body.
    ///
    /// `last` is checked before anything else, so a pending body is accepted
    /// whatever the remaining fields look like.
    pub fn from_slice(body: &[u8]) -> serde_json::Result<Self> {
        let value: Value = serde_json::from_slice(body)?;
        if value.is_null() {
            return Err(serde::de::Error::custom("snapshot body is null"));
        }
        match value.get("last") {
            Some(last) if is_truthy(last) => {
                Ok(SnapshotReading::Ready(serde_json::from_value(value)?))
            }
            _ => Ok(SnapshotReading::Pending),
        }
    }
}

/// Body of `POST /perguntar`.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct Query {
    pub pergunta: String,
}

impl Query {
    pub fn new(text: &str) -> Self {
        Query {
            pergunta: text.trim().to_string(),
        }
    }
}

/// Body returned by `POST /perguntar`; one of the two fields carries the
/// message for the user.
///
/// Both fields hold the text to show, already filtered for truthiness: a
/// field that is missing, `null`, `false`, `0` or `""` is `None`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Answer {
    pub resposta: Option<String>,
    pub erro: Option<String>,
}

impl Answer {
    /// Reads an answer body.
    ///
    /// Only the two fields are looked at, and neither has to be a string. A
    /// body that is valid JSON but not an object carries no message; a `null`
    /// body is an error.
    pub fn from_slice(body: &[u8]) -> serde_json::Result<Self> {
        let value: Value = serde_json::from_slice(body)?;
        if value.is_null() {
            return Err(serde::de::Error::custom("answer body is null"));
        }
        Ok(Answer {
            resposta: value.get("resposta").and_then(message),
            erro: value.get("erro").and_then(message),
        })
    }
}

/// JavaScript truthiness of a JSON value.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map_or(true, |x| x != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Text shown for a truthy field.
fn message(value: &Value) -> Option<String> {
    if !is_truthy(value) {
        return None;
    }
    let text = match value {
        Value::String(s) => s.clone(),
        // integral floats print without a fraction, as in JS (`42.0` -> `42`)
        Value::Number(n) if n.is_f64() => n.as_f64().map_or_else(|| n.to_string(), |x| x.to_string()),
        other => other.to_string(),
    };
    Some(text)
}

////////////////////////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn null_last_is_pending_even_without_series() {
        let body = br#"{ "symbol": "BTCUSDT", "last": null }"#;
        assert_eq!(SnapshotReading::from_slice(body).unwrap(), SnapshotReading::Pending);

        let body = br#"{}"#;
        assert_eq!(SnapshotReading::from_slice(body).unwrap(), SnapshotReading::Pending);
    }

    #[test]
    fn ready_snapshot_keeps_null_gaps() {
        let body = br#"{
            "symbol": "ETHUSDT",
            "interval": "5m",
            "last": { "o": 1.0, "c": 3120.456 },
            "ema9": [null, 3110.0, 3115.25],
            "ema21": [null, null],
            "rsi14": []
        }"#;
        let reading = SnapshotReading::from_slice(body).unwrap();
        let SnapshotReading::Ready(snapshot) = reading else {
            panic!("expected a ready snapshot");
        };
        assert_eq!(snapshot.symbol, "ETHUSDT");
        assert_eq!(snapshot.last.close, 3120.456);
        assert_eq!(snapshot.ema9, vec![None, Some(3110.0), Some(3115.25)]);
        assert_eq!(snapshot.ema21, vec![None, None]);
    }

    #[test]
    fn null_body_is_not_a_snapshot() {
        assert!(SnapshotReading::from_slice(b"null").is_err());
    }

    #[test]
    fn present_last_requires_the_series() {
        let body = br#"{ "symbol": "BTCUSDT", "interval": "1m", "last": { "c": 1.0 } }"#;
        assert!(SnapshotReading::from_slice(body).is_err());
    }

    #[test]
    fn query_is_trimmed() {
        let query = Query::new("  o mercado vai subir?\n");
        assert_eq!(
            serde_json::to_value(&query).unwrap(),
            serde_json::json!({ "pergunta": "o mercado vai subir?" })
        );
    }

    #[test]
    fn falsy_last_is_pending() {
        for last in ["false", "0", "0.0", "\"\""] {
            let body = format!(r#"{{ "symbol": "BTCUSDT", "last": {last} }}"#);
            assert_eq!(
                SnapshotReading::from_slice(body.as_bytes()).unwrap(),
                SnapshotReading::Pending,
                "last = {last}"
            );
        }
    }

    #[test]
    fn truthy_scalar_last_still_needs_a_candle() {
        let body = br#"{ "symbol": "BTCUSDT", "interval": "1m", "last": 1,
                         "ema9": [], "ema21": [], "rsi14": [] }"#;
        assert!(SnapshotReading::from_slice(body).is_err());
    }

    #[test]
    fn answer_fields_are_optional() {
        assert_eq!(Answer::from_slice(b"{}").unwrap(), Answer::default());
    }

    #[test]
    fn answer_ignores_the_type_of_the_other_field() {
        let answer = Answer::from_slice(br#"{ "resposta": "ok", "erro": 5 }"#).unwrap();
        assert_eq!(answer.resposta.as_deref(), Some("ok"));
        assert_eq!(answer.erro.as_deref(), Some("5"));
    }

    #[test]
    fn answer_scalars_print_as_text() {
        let answer = Answer::from_slice(br#"{ "resposta": 42 }"#).unwrap();
        assert_eq!(answer.resposta.as_deref(), Some("42"));

        let answer = Answer::from_slice(br#"{ "resposta": 42.0, "erro": true }"#).unwrap();
        assert_eq!(answer.resposta.as_deref(), Some("42"));
        assert_eq!(answer.erro.as_deref(), Some("true"));
    }

    #[test]
    fn answer_falsy_fields_are_absent() {
        let answer = Answer::from_slice(br#"{ "resposta": 0, "erro": false }"#).unwrap();
        assert_eq!(answer, Answer::default());

        let answer = Answer::from_slice(br#"{ "resposta": "", "erro": null }"#).unwrap();
        assert_eq!(answer, Answer::default());
    }

    #[test]
    fn non_object_answer_carries_no_message() {
        assert_eq!(Answer::from_slice(br#""texto solto""#).unwrap(), Answer::default());
        assert_eq!(Answer::from_slice(b"17").unwrap(), Answer::default());
        assert_eq!(Answer::from_slice(b"[1, 2]").unwrap(), Answer::default());
        assert!(Answer::from_slice(b"null").is_err());
        assert!(Answer::from_slice(b"<html>").is_err());
    }
}
