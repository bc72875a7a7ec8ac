use serde_json::Value;

/// 任意のフィールド値を0以上の有限な数値へ変換する
///
/// 欠損・null・数値として解釈できない文字列・非有限値はすべて0になる。
/// 負の値も0に丸める。エラーは返さない。
pub fn coerce_count(value: &Value) -> f64 {
    let number = match value {
        Value::Number(number) => number.as_f64().unwrap_or(0.0),
        Value::String(text) => parse_numeric_text(text),
        Value::Bool(true) => 1.0,
        _ => 0.0,
    };

    sanitize(number)
}

/// `Option`で受け取ったフィールド用
pub fn coerce_optional(value: Option<&Value>) -> f64 {
    value.map(coerce_count).unwrap_or(0.0)
}

/// 有限かつ正の値以外を0にする
pub fn sanitize(number: f64) -> f64 {
    if number.is_finite() && number > 0.0 {
        number
    } else {
        0.0
    }
}

fn parse_numeric_text(text: &str) -> f64 {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return 0.0;
    }
    trimmed.parse::<f64>().unwrap_or(0.0)
}
