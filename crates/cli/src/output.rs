//! Command output: plain text, or a JSON envelope with `--json`.

use serde::Serialize;

#[derive(Serialize)]
struct JsonOut<T: Serialize> {
    ok: bool,
    data: T,
}

/// Render `data` as the JSON envelope.
pub fn to_json<T: Serialize>(data: T) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&JsonOut { ok: true, data })
}

/// Print `data` as JSON, or as the text produced by `text`.
pub fn print_one<T: Serialize>(
    json: bool,
    data: T,
    text: impl Fn(&T) -> String,
) -> Result<(), Box<dyn std::error::Error>> {
    if json {
        println!("{}", to_json(data)?);
    } else {
        println!("{}", text(&data));
    }
    Ok(())
}
