use crate::schema::{Answer, Snapshot, SnapshotReading};
use std::fmt;

pub const WAITING: &str = "Aguardando primeiros candles...";
pub const SNAPSHOT_FAILED: &str = "Erro ao carregar snapshot.";
pub const GENERATING: &str = "Gerando análise da IA...";
pub const NO_ANSWER: &str = "Falha ao obter resposta.";
pub const REQUEST_FAILED: &str = "Erro na solicitação.";

/// Shown for a series without a single defined value.
pub const UNDEFINED: &str = "-";

// extra digits printed when looking for an exact tie; f64 cannot carry a
// non-zero remainder that far past the rounding position
const TIE_DIGITS: usize = 40;

/// Formats `value` with `digits` decimals the way JavaScript's `toFixed` does.
///
/// Rust's `{:.N}` breaks exact ties toward the even digit, `toFixed` breaks
/// them away from zero, so ties are detected and rounded by hand.
/// ```rust
/// use snapdesk_client::render::to_fixed;
/// assert_eq!(to_fixed(0.125, 2), "0.13");
/// assert_eq!(to_fixed(1.005, 2), "1.00");
/// ```
pub fn to_fixed(value: f64, digits: usize) -> String {
    // negative zero prints unsigned
    let value = if value == 0.0 { 0.0 } else { value };
    let sign = if value < 0.0 { "-" } else { "" };
    let magnitude = value.abs();

    let expanded = format!("{:.*}", digits + TIE_DIGITS, magnitude);
    let (head, tail) = expanded.split_at(expanded.len() - TIE_DIGITS);
    let head = head.trim_end_matches('.');
    let is_tie = tail.starts_with('5') && tail[1..].bytes().all(|b| b == b'0');

    if is_tie {
        format!("{sign}{}", increment_last_digit(head))
    } else {
        format!("{sign}{magnitude:.digits$}")
    }
}

/// Adds one unit in the last place of a plain decimal string, carrying
/// through nines (`"9.99"` becomes `"10.00"`).
fn increment_last_digit(digits: &str) -> String {
    let mut chars: Vec<char> = digits.chars().collect();
    let mut carry = true;
    for c in chars.iter_mut().rev() {
        match *c {
            '.' => continue,
            '9' => *c = '0',
            d => {
                *c = char::from_digit(d.to_digit(10).unwrap_or(0) + 1, 10).unwrap_or(d);
                carry = false;
                break;
            }
        }
    }
    if carry {
        chars.insert(0, '1');
    }
    chars.into_iter().collect()
}

/// Most recent defined value of a series.
pub fn last_defined(series: &[Option<f64>]) -> Option<f64> {
    series.iter().rev().find_map(|x| *x)
}

fn indicator(series: &[Option<f64>], digits: usize) -> String {
    last_defined(series)
        .map(|x| to_fixed(x, digits))
        .unwrap_or_else(|| UNDEFINED.to_string())
}

////////////////////////////////////////////////////////////////////////////////////////////////////

/// Key figures of a snapshot, already formatted for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapshotFields {
    pub symbol: String,
    pub interval: String,
    pub price: String,
    pub ema9: String,
    pub ema21: String,
    pub rsi14: String,
}

impl From<&Snapshot> for SnapshotFields {
    fn from(snapshot: &Snapshot) -> Self {
        SnapshotFields {
            symbol: snapshot.symbol.clone(),
            interval: snapshot.interval.clone(),
            price: to_fixed(snapshot.last.close, 2),
            ema9: indicator(&snapshot.ema9, 2),
            ema21: indicator(&snapshot.ema21, 2),
            rsi14: indicator(&snapshot.rsi14, 1),
        }
    }
}

/// Content of the snapshot region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SnapshotView {
    Waiting,
    Failed,
    Ready(SnapshotFields),
}

impl From<&SnapshotReading> for SnapshotView {
    fn from(reading: &SnapshotReading) -> Self {
        match reading {
            SnapshotReading::Pending => SnapshotView::Waiting,
            SnapshotReading::Ready(snapshot) => SnapshotView::Ready(snapshot.into()),
        }
    }
}

impl fmt::Display for SnapshotView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SnapshotView::Waiting => f.write_str(WAITING),
            SnapshotView::Failed => f.write_str(SNAPSHOT_FAILED),
            SnapshotView::Ready(x) => {
                writeln!(f, "Ativo: {}  Período: {}", x.symbol, x.interval)?;
                writeln!(f, "Último preço: {}", x.price)?;
                write!(f, "EMA9: {}  EMA21: {}  RSI14: {}", x.ema9, x.ema21, x.rsi14)
            }
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////

/// How a submission settled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// `resposta` was present.
    Answered(String),
    /// No `resposta`, but the backend explained why in `erro`.
    Refused(String),
    /// Neither field carried a message.
    Empty,
    /// The request or its body could not be completed.
    Failed,
}

impl Outcome {
    pub fn text(&self) -> &str {
        match self {
            Outcome::Answered(text) | Outcome::Refused(text) => text,
            Outcome::Empty => NO_ANSWER,
            Outcome::Failed => REQUEST_FAILED,
        }
    }
}

impl From<Answer> for Outcome {
    fn from(answer: Answer) -> Self {
        // empty strings count as absent
        let non_empty = |field: Option<String>| field.filter(|s| !s.is_empty());
        match (non_empty(answer.resposta), non_empty(answer.erro)) {
            (Some(resposta), _) => Outcome::Answered(resposta),
            (None, Some(erro)) => Outcome::Refused(erro),
            (None, None) => Outcome::Empty,
        }
    }
}

/// Content of the output region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResultView {
    Generating,
    Settled(Outcome),
}

impl ResultView {
    pub fn text(&self) -> &str {
        match self {
            ResultView::Generating => GENERATING,
            ResultView::Settled(outcome) => outcome.text(),
        }
    }
}

impl fmt::Display for ResultView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text())
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////
